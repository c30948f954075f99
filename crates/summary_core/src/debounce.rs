use std::time::{Duration, Instant};

/// Quiet window used by the URL input unless configured otherwise.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lags a changing value until it has been stable for `delay`.
///
/// Time is passed in by the caller, so the debouncer never sleeps and never
/// spawns anything. Every `push` replaces the pending value and restarts the
/// quiet window; `poll` hands the value out once the window has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, dropping whatever was scheduled before.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Returns the scheduled value if its quiet window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the scheduled value so it is never delivered.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
