//! Cancellable scheduled work and stale-result guards.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Hands out monotonically increasing sequence numbers. Only the holder of
/// the latest number may publish results.
#[derive(Debug, Clone, Default)]
pub struct SequenceCounter {
    latest: Arc<AtomicU64>,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one.
    pub fn next(&self) -> SequenceGuard {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SequenceGuard {
            seq,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Supersede all outstanding requests without starting one.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Ticket for one request.
#[derive(Debug, Clone)]
pub struct SequenceGuard {
    seq: u64,
    latest: Arc<AtomicU64>,
}

impl SequenceGuard {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Whether no newer request has been started since this one.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.seq
    }
}

/// Runs the most recently scheduled task after a quiet period.
///
/// Scheduling aborts whatever was scheduled before, whether it is still
/// waiting or already running.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    sequence: SequenceCounter,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sequence: SequenceCounter::new(),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = handle;
    }

    /// Schedule `task` to run after the delay, cancelling the previous one.
    /// The task receives the guard it must check before publishing.
    pub fn schedule<F, Fut>(&self, task: F) -> u64
    where
        F: FnOnce(SequenceGuard) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let guard = self.sequence.next();
        let seq = guard.seq();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task(guard).await;
        });
        self.replace_pending(Some(handle));
        seq
    }

    /// Cancel the scheduled task and invalidate anything in flight.
    pub fn cancel(&self) {
        self.sequence.invalidate();
        self.replace_pending(None);
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.replace_pending(None);
    }
}
