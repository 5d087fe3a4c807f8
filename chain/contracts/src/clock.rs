//! Time source for lock-expiry checks

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use types::numeric::{Seconds, Timestamp};

/// Monotonically non-decreasing source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now().timestamp()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    /// Move time forward by `secs`.
    pub fn advance(&self, secs: Seconds) {
        let delta = i64::try_from(secs).unwrap_or(i64::MAX);
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(delta))
            });
    }

    /// Jump to `at`. Earlier instants are ignored to keep time non-decreasing.
    pub fn set(&self, at: Timestamp) {
        self.now.fetch_max(at, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
