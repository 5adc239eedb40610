//! `cg-sim` — the turn engine of the contagion grid simulator.
//!
//! # One turn
//!
//! ```text
//! turn():
//!   ① Move      — every AgentManager steps each of its agents (±1, or ±2
//!                 while infected) on both axes.
//!   ② Bucket    — pair every agent with the bucket of its new position and
//!                 group into  BucketId → Vec<AgentRef>.
//!   ③ Clear     — buckets occupied last turn but empty now go into the
//!                 report's `cleared` set.
//!   ④ Spread    — inside each bucket, every ordered pair of distinct agents
//!                 that are near (Chebyshev ≤ 2) with at least one infected
//!                 leaves both infected.  Flags are re-read as the loop runs,
//!                 so infection can cascade inside one bucket in one turn.
//!                 It never crosses a bucket boundary within a turn.
//!   ⑤ Report    — occupied buckets with (point, status) marks, plus counts.
//!   ⑥ Remember  — this turn's occupancy replaces the previous one.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the move phase on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash for the per-turn occupancy map.                 |
//! | `serde`    | Serde derives on report types.                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cg_core::SimulationConfig;
//! use cg_sim::{EngineBuilder, NullSink};
//!
//! let mut engine = EngineBuilder::new(SimulationConfig::default()).build()?;
//! let report = engine.turn();
//! println!("{} of {} infected", report.infected_agents, report.total_agents);
//! engine.run_turns(100, &mut NullSink);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod report;
pub mod sink;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::{AgentRef, SimulationEngine};
pub use error::{SimError, SimResult};
pub use report::{Mark, RenderReport};
pub use sink::{NullSink, ReportSink};
