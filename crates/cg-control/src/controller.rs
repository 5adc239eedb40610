//! `LifecycleController` — the caller-facing handle — and the single
//! command-processing thread behind it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cg_core::SimulationConfig;
use cg_sim::{EngineBuilder, ReportSink, SimulationEngine};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::command::{Command, ControllerState, Message};
use crate::ticker::Ticker;
use crate::{ControlError, ControlResult};

// ── LifecycleController ───────────────────────────────────────────────────────

/// Serialises lifecycle commands against one simulation session.
///
/// Cloning is not supported; share the controller by reference (it is
/// `Sync`) or wrap it in an `Arc`.  Commands sent from any number of threads
/// are applied one at a time, in arrival order, on a dedicated thread that
/// exclusively owns the engine and the report sink.
///
/// Dropping the controller cancels any repeating turn and joins its thread.
///
/// # Example
///
/// ```rust,ignore
/// let controller = LifecycleController::spawn(|r: &RenderReport| {
///     println!("{}: {} infected", r.turn, r.infected_agents);
/// })?;
/// controller.start(SimulationConfig::default())?;
/// std::thread::sleep(Duration::from_secs(1));
/// controller.stop()?;
/// controller.turn()?;
/// controller.resume()?;
/// ```
pub struct LifecycleController {
    tx:           Sender<Message>,
    handle:       Option<JoinHandle<()>>,
    live_tickers: Arc<AtomicUsize>,
}

impl LifecycleController {
    /// Spawn the controller thread in the `Idle` state.  Every report the
    /// session produces goes to `sink`.
    pub fn spawn<S: ReportSink + Send + 'static>(sink: S) -> ControlResult<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let live_tickers = Arc::new(AtomicUsize::new(0));

        let actor = Actor {
            rx,
            tx:         tx.clone(),
            sink:       Box::new(sink),
            engine:     None,
            ticker:     None,
            step_delay: SimulationConfig::default().step_delay,
            generation: 0,
            live:       Arc::clone(&live_tickers),
        };

        let handle = thread::Builder::new()
            .name("cg-controller".into())
            .spawn(move || actor.run())
            .map_err(|source| ControlError::Spawn { what: "controller", source })?;

        Ok(Self { tx, handle: Some(handle), live_tickers })
    }

    /// Start a fresh simulation, replacing any existing one, and wait for the
    /// outcome.
    ///
    /// An invalid `config` is rejected with [`ControlError::Config`] before
    /// anything changes; the controller keeps its prior state.
    pub fn start(&self, config: SimulationConfig) -> ControlResult<()> {
        let (reply, outcome) = crossbeam_channel::bounded(1);
        self.post(Message::Command { command: Command::Start(config), reply: Some(reply) })?;
        outcome.recv().map_err(|_| ControlError::Disconnected)?
    }

    pub fn stop(&self) -> ControlResult<()> {
        self.send(Command::Stop)
    }

    pub fn resume(&self) -> ControlResult<()> {
        self.send(Command::Resume)
    }

    pub fn turn(&self) -> ControlResult<()> {
        self.send(Command::Turn)
    }

    /// Enqueue `command` without waiting for it to be applied.
    ///
    /// A rejected `Start` sent this way is only logged; use
    /// [`start`](Self::start) to observe the error.
    pub fn send(&self, command: Command) -> ControlResult<()> {
        self.post(Message::Command { command, reply: None })
    }

    /// Current state, as of every command enqueued before this call.
    pub fn state(&self) -> ControlResult<ControllerState> {
        let (reply, state) = crossbeam_channel::bounded(1);
        self.post(Message::State { reply })?;
        state.recv().map_err(|_| ControlError::Disconnected)
    }

    /// Number of repeating-turn threads currently alive (0 or 1).
    pub fn live_tickers(&self) -> usize {
        self.live_tickers.load(Ordering::Acquire)
    }

    /// Stop everything and join the controller thread.
    pub fn shutdown(mut self) -> ControlResult<()> {
        self.close()
    }

    fn post(&self, message: Message) -> ControlResult<()> {
        self.tx.send(message).map_err(|_| ControlError::Disconnected)
    }

    fn close(&mut self) -> ControlResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // The thread may already be gone; joining still reaps it.
        let _ = self.tx.send(Message::Shutdown);
        handle.join().map_err(|_| ControlError::Disconnected)
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "controller thread did not shut down cleanly");
        }
    }
}

// ── Actor ─────────────────────────────────────────────────────────────────────

/// State owned by the controller thread.  Nothing here is shared, so nothing
/// here is locked.
struct Actor {
    rx:         Receiver<Message>,
    /// Cloned into each ticker so periodic turns enter the same queue.
    tx:         Sender<Message>,
    sink:       Box<dyn ReportSink + Send>,
    engine:     Option<SimulationEngine>,
    ticker:     Option<Ticker>,
    step_delay: Duration,
    /// Bumped for every ticker launched; ticks carry it back.
    generation: u64,
    live:       Arc<AtomicUsize>,
}

impl Actor {
    fn run(mut self) {
        while let Ok(message) = self.rx.recv() {
            match message {
                Message::Command { command, reply } => {
                    debug!(command = command.name(), state = %self.state(), "command");
                    let outcome = self.apply(command);
                    match reply {
                        Some(reply) => {
                            let _ = reply.send(outcome);
                        }
                        None => {
                            if let Err(e) = outcome {
                                warn!(error = %e, "command rejected");
                            }
                        }
                    }
                }
                Message::Tick { generation } => self.on_tick(generation),
                Message::State { reply } => {
                    let _ = reply.send(self.state());
                }
                Message::Shutdown => break,
            }
        }
        self.cancel_ticker();
        debug!("controller stopped");
    }

    fn state(&self) -> ControllerState {
        match (&self.engine, &self.ticker) {
            (None, _)          => ControllerState::Idle,
            (Some(_), Some(_)) => ControllerState::Running,
            (Some(_), None)    => ControllerState::Paused,
        }
    }

    fn apply(&mut self, command: Command) -> ControlResult<()> {
        match command {
            Command::Start(config) => self.start(config),
            Command::Stop => {
                if self.ticker.is_some() {
                    self.cancel_ticker();
                    info!("simulation paused");
                }
                Ok(())
            }
            Command::Resume => {
                if self.engine.is_some() && self.ticker.is_none() {
                    self.launch_ticker()?;
                    info!("simulation resumed");
                }
                Ok(())
            }
            Command::Turn => {
                self.run_turn();
                Ok(())
            }
        }
    }

    fn start(&mut self, config: SimulationConfig) -> ControlResult<()> {
        config.validate()?;

        self.cancel_ticker();
        if let Some(old) = self.engine.take() {
            self.sink.on_report(&old.clear_report());
            info!(turns = old.turns_completed().0, "previous simulation discarded");
        }

        let step_delay = config.step_delay;
        let engine = EngineBuilder::new(config).build()?;
        info!(
            agents   = engine.total_agents(),
            infected = engine.infected_agents(),
            delay_ms = step_delay.as_millis() as u64,
            "simulation started"
        );
        self.engine = Some(engine);
        self.step_delay = step_delay;
        self.launch_ticker()
    }

    fn on_tick(&mut self, generation: u64) {
        match &self.ticker {
            Some(ticker) if ticker.generation() == generation => {
                ticker.acknowledge();
                self.run_turn();
            }
            // Sent by a ticker that has since been cancelled.
            _ => debug!(generation, "stale tick ignored"),
        }
    }

    fn run_turn(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            let report = engine.turn();
            self.sink.on_report(&report);
        }
    }

    fn launch_ticker(&mut self) -> ControlResult<()> {
        self.generation += 1;
        let ticker = Ticker::spawn(
            self.generation,
            self.step_delay,
            self.tx.clone(),
            Arc::clone(&self.live),
        )?;
        self.ticker = Some(ticker);
        Ok(())
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}
