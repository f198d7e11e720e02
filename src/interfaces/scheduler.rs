// ============================================================================
// Deferred Scheduler Interface
// Cancellable delayed-callback primitive for two-phase edits
// ============================================================================

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// A deferred continuation.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling seam for edits that must not complete inside the triggering
/// event: phase 1 observes unreliable intermediate widget state, phase 2
/// runs as a later turn once the environment has settled (some input
/// stacks relocate the cursor only after the input event returns).
///
/// A superseding event does not cancel a still-pending task; that is a
/// documented limitation, not a guarantee.
pub trait DeferredScheduler: Send + Sync {
    fn defer(&self, delay: Duration, task: DeferredTask);
}

/// Runs every task immediately, ignoring the delay.
///
/// This is the synchronous stub for tests and for hosts whose event
/// ordering is already stable when the engine runs.
pub struct InlineScheduler;

impl DeferredScheduler for InlineScheduler {
    fn defer(&self, _delay: Duration, task: DeferredTask) {
        task();
    }
}

/// Queues tasks until the host pumps them with [`ManualScheduler::drain`].
///
/// Lets hosts (and tests) run deferred continuations as genuinely later,
/// independent turns.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(Duration, DeferredTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run all queued tasks in submission order. Tasks scheduled while
    /// draining run in the same pass.
    pub fn drain(&self) {
        loop {
            let next = self.queue.lock().pop_front();
            match next {
                Some((_, task)) => task(),
                None => break,
            }
        }
    }
}

impl DeferredScheduler for ManualScheduler {
    fn defer(&self, delay: Duration, task: DeferredTask) {
        self.queue.lock().push_back((delay, task));
    }
}
