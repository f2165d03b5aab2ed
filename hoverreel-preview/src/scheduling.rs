//! Cancellable timers and liveness tokens.
//!
//! Every delayed action of a preview lives in a [`TimerSlot`]; scheduling a
//! slot again cancels whatever was pending there, so a slot can never hold
//! two timers. Asynchronous results (playback starts, preference lookups)
//! carry a [`LivenessToken`] captured when the work was started and are only
//! applied while the issuing [`Liveness`] is still alive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Handle to one scheduled timer.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
struct ScheduledTask {
    due: Instant,
    handle: TaskHandle,
}

/// Single-direction timer owned by a controller.
#[derive(Debug)]
pub struct TimerSlot {
    label: &'static str,
    task: Option<ScheduledTask>,
}

impl TimerSlot {
    pub const fn new(label: &'static str) -> Self {
        Self { label, task: None }
    }

    /// Arm the slot to fire `delay` after `from`, replacing any pending timer.
    pub fn schedule(&mut self, from: Instant, delay: Duration) -> TaskHandle {
        self.cancel();
        let handle = TaskHandle::new();
        log::trace!("timer {} armed for {:?}", self.label, delay);
        self.task = Some(ScheduledTask {
            due: from + delay,
            handle: handle.clone(),
        });
        handle
    }

    /// Cancel the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                let was_live = !task.handle.is_cancelled();
                task.handle.cancel();
                if was_live {
                    log::trace!("timer {} cancelled", self.label);
                }
                was_live
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task
            .as_ref()
            .is_some_and(|task| !task.handle.is_cancelled())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.task
            .as_ref()
            .filter(|task| !task.handle.is_cancelled())
            .map(|task| task.due)
    }

    /// Consume the timer if it is due at `now`, returning its due instant.
    ///
    /// A timer fires at most once; a cancelled timer never fires.
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        let task = self.task.as_ref()?;
        if task.handle.is_cancelled() {
            self.task = None;
            return None;
        }
        if now < task.due {
            return None;
        }
        let due = task.due;
        self.task = None;
        log::trace!("timer {} fired", self.label);
        Some(due)
    }
}

/// Owner side of a liveness flag. Revoked explicitly or on drop.
#[derive(Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Captured at the call site of an asynchronous operation.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessToken {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Whether both tokens were issued by the same [`Liveness`].
    pub fn same_owner(&self, other: &LivenessToken) -> bool {
        Arc::ptr_eq(&self.alive, &other.alive)
    }
}

/// Earliest of a set of optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
