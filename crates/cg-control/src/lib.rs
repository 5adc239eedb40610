//! `cg-control` — the command-driven lifecycle controller.
//!
//! # Architecture
//!
//! ```text
//! Caller thread(s)            Controller thread               Ticker thread (≤ 1)
//!     |                            |                               |
//!     |--start/stop/resume/turn--->| rx.recv()  (FIFO, one at a    |
//!     |   [unbounded channel]      |  time, owns engine + sink)    |
//!     |<--reply (start, state)-----|                               |
//!     |                            |<------- Tick { generation } --|
//!     |                            | engine.turn()                 | recv_timeout(step_delay)
//!     |                            | sink.on_report(&report)       |   on cancel → exit
//! ```
//!
//! Every mutation of the engine, including the periodic turns, happens on the
//! controller thread, so two turns can never run at once.  The ticker only
//! *asks* for turns.  Each ticker keeps at most one tick request queued, and
//! ticks from a cancelled ticker are recognised by their generation and
//! dropped.
//!
//! # State machine
//!
//! | Command  | Idle                 | Running                     | Paused          |
//! |----------|----------------------|-----------------------------|-----------------|
//! | `Start`  | → Running            | replace engine → Running    | replace → Running |
//! | `Stop`   | no-op                | → Paused                    | no-op           |
//! | `Resume` | no-op                | no-op                       | → Running       |
//! | `Turn`   | no-op                | one turn                    | one turn        |

pub mod command;
pub mod controller;
pub mod error;
mod ticker;


pub use command::{Command, ControllerState};
pub use controller::LifecycleController;
pub use error::{ControlError, ControlResult};
