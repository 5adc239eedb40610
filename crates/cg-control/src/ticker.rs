//! The repeating-turn task.
//!
//! A ticker thread never touches the engine.  Each iteration it asks the
//! controller for a turn (unless a request is already queued), then waits
//! `step_delay` on its cancel channel.  Cancellation therefore lands only at
//! the wait, never in the middle of a turn.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use crate::command::Message;
use crate::{ControlError, ControlResult};

/// Handle to one live ticker thread.
pub(crate) struct Ticker {
    generation: u64,
    /// Set by the thread when it queues a tick, cleared by the controller
    /// when it dequeues one.  Keeps at most one tick of this ticker queued.
    pending:    Arc<AtomicBool>,
    cancel:     Sender<()>,
    handle:     JoinHandle<()>,
}

/// Decrements the live-ticker count when the thread exits, however it exits.
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Ticker {
    /// Launch a ticker that requests turns for `generation`.
    pub(crate) fn spawn(
        generation: u64,
        step_delay: Duration,
        tx:         Sender<Message>,
        live:       Arc<AtomicUsize>,
    ) -> ControlResult<Self> {
        let (cancel, cancel_rx) = crossbeam_channel::bounded::<()>(1);
        let pending = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pending);

        live.fetch_add(1, Ordering::AcqRel);
        let guard = LiveGuard(live);

        let handle = thread::Builder::new()
            .name(format!("cg-ticker-{generation}"))
            .spawn(move || {
                let _guard = guard;
                run(generation, step_delay, &tx, &cancel_rx, &flag);
            })
            .map_err(|source| ControlError::Spawn { what: "ticker", source })?;

        debug!(generation, delay_ms = step_delay.as_millis() as u64, "ticker launched");
        Ok(Self { generation, pending, cancel, handle })
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// The controller has dequeued this ticker's tick; allow the next one.
    #[inline]
    pub(crate) fn acknowledge(&self) {
        self.pending.store(false, Ordering::Release);
    }

    /// Signal the ticker and wait for its thread to exit.
    ///
    /// The ticker only blocks on its cancel channel (sends to the controller
    /// queue never block), so the join returns within one loop iteration.
    pub(crate) fn cancel(self) {
        drop(self.cancel);
        if self.handle.join().is_err() {
            warn!(generation = self.generation, "ticker thread panicked");
        }
        debug!(generation = self.generation, "ticker cancelled");
    }
}

fn run(
    generation: u64,
    step_delay: Duration,
    tx:         &Sender<Message>,
    cancel:     &Receiver<()>,
    pending:    &AtomicBool,
) {
    loop {
        if !pending.swap(true, Ordering::AcqRel) && tx.send(Message::Tick { generation }).is_err() {
            // Controller is gone.
            return;
        }

        match cancel.recv_timeout(step_delay) {
            Err(RecvTimeoutError::Timeout) => {
                if step_delay.is_zero() {
                    thread::yield_now();
                }
            }
            // Cancel signal or dropped sender.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
