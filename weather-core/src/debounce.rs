//! Cancellable timer used to debounce search-as-you-type lookups.

use std::{future::Future, time::Duration};
use tokio::task::JoinHandle;

/// Delay between the last keystroke and the suggestion request.
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Owns at most one pending timer. Scheduling replaces it, so only a call
/// that survives a full quiet period fires.
///
/// Cancellation covers the waiting period only: once the timer has elapsed
/// the job runs as its own task and is never aborted.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `job` after the quiet period unless rescheduled or cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(job);
        }));
    }

    /// Abort the pending timer. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SUGGESTION_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
