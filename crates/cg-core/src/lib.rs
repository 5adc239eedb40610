//! `cg-core` — foundational types for the contagion grid simulator.
//!
//! This crate is a dependency of every other `cg-*` crate.  It has no `cg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geo`]         | `Point`, `BucketId`, `SpatialGrid`, `to_bucket`       |
//! | [`ids`]         | `ManagerId`, `AgentId`                                |
//! | [`status`]      | `Status` (`Healthy` / `Infected`)                     |
//! | [`turn`]        | `Turn` counter                                        |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `SimulationConfig` and its validation                 |
//! | [`error`]       | `CgError`, `CgResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod status;
pub mod turn;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimulationConfig;
pub use error::{CgError, CgResult};
pub use geo::{BucketId, Point, SpatialGrid, to_bucket};
pub use ids::{AgentId, ManagerId};
pub use rng::SimRng;
pub use status::Status;
pub use turn::Turn;
