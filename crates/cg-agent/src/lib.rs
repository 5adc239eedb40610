//! `cg-agent` — agents and the managers that own them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`agent`]     | `Agent` (position + infection flag), the near predicate   |
//! | [`manager`]   | `AgentManager` (fixed-size group, random walk, bucketing) |
//!
//! Every agent belongs to exactly one manager for the lifetime of a run.  The
//! manager mutates positions; the engine mutates the infection flag.

pub mod agent;
pub mod manager;


pub use agent::{Agent, NEAR_DISTANCE};
pub use manager::AgentManager;
