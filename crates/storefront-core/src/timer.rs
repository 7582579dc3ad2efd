//! Cancellable delayed tasks for UI feedback and simulated order submission.
//!
//! The session never sleeps. It allocates a [`TimerId`], remembers what the
//! timer is for, and emits [`TimerCommand`]s. A [`TimerDriver`] turns those
//! commands into tokio tasks and reports fired ids back over a channel. A
//! fired id the session has already forgotten is dropped on the floor, so a
//! completion that races a cancellation is harmless.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// What a pending timer will do when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind {
    /// Revert a catalog card's "Added!" label.
    AddedFeedback { product_id: String },
    /// Revert the detail page's "Added to Cart!" label and reset its quantity.
    DetailFeedback,
    /// Finish the simulated order submission.
    OrderSubmission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Schedule { id: TimerId, delay: Duration },
    Cancel(TimerId),
}

/// Runs scheduled timers on the tokio runtime.
///
/// Dropping the driver aborts every outstanding timer.
#[derive(Debug)]
pub struct TimerDriver {
    tasks: HashMap<TimerId, JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<TimerId>,
}

impl TimerDriver {
    /// Create a driver and the receiver on which fired timer ids arrive.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        (
            Self {
                tasks: HashMap::new(),
                fired_tx,
            },
            fired_rx,
        )
    }

    /// Number of timers that have been scheduled and have not yet fired or
    /// been cancelled.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    /// Apply a batch of commands in order.
    ///
    /// Must be called from within a tokio runtime.
    pub fn apply<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = TimerCommand>,
    {
        for command in commands {
            match command {
                TimerCommand::Schedule { id, delay } => self.schedule(id, delay),
                TimerCommand::Cancel(id) => self.cancel(id),
            }
        }
    }

    /// Forget the task for a timer that has just fired.
    pub fn acknowledge(&mut self, id: TimerId) {
        self.tasks.remove(&id);
    }

    fn schedule(&mut self, id: TimerId, delay: Duration) {
        let tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended; nothing to notify.
            let _ = tx.send(id);
        });
        if let Some(previous) = self.tasks.insert(id, handle) {
            previous.abort();
        }
        tracing::debug!(%id, delay_ms = delay.as_millis(), "timer scheduled");
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            tracing::debug!(%id, "timer cancelled");
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
