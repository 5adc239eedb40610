//! Commands accepted by the controller and the messages its thread consumes.

use std::fmt;

use cg_core::SimulationConfig;
use crossbeam_channel::Sender;

use crate::ControlResult;

/// A request from any caller.
#[derive(Clone, Debug)]
pub enum Command {
    /// Replace whatever is running with a fresh engine and start turning.
    Start(SimulationConfig),
    /// Cancel the repeating turn, keeping the engine.
    Stop,
    /// Relaunch the repeating turn of a stopped engine.
    Resume,
    /// Run exactly one turn now, whether or not the repeating turn is active.
    Turn,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::Stop     => "stop",
            Command::Resume   => "resume",
            Command::Turn     => "turn",
        }
    }
}

/// Observable controller state.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ControllerState {
    /// No engine.
    Idle,
    /// Engine present, repeating turn active.
    Running,
    /// Engine present, repeating turn cancelled.
    Paused,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControllerState::Idle    => "idle",
            ControllerState::Running => "running",
            ControllerState::Paused  => "paused",
        })
    }
}

/// Everything that travels through the controller's single queue.
pub(crate) enum Message {
    Command {
        command: Command,
        /// Present when the caller waits for the outcome.
        reply:   Option<Sender<ControlResult<()>>>,
    },
    /// Periodic turn request from the ticker of `generation`.
    Tick { generation: u64 },
    State { reply: Sender<ControllerState> },
    Shutdown,
}
