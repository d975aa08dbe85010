//! Debouncing of rapidly changing values
//!
//! Holds a single pending value and releases it once no newer value has been
//! scheduled for the configured quiet period. Used to delay applying the
//! search term while the user is still typing.
//!
//! The clock is passed in by the caller, so the behaviour is deterministic in
//! tests.
//!
//! ## Usage
//!
//! ```rust
//! use league_lens::ui::debounce::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(300));
//! let start = Instant::now();
//!
//! debouncer.schedule("nb".to_string(), start);
//! debouncer.schedule("nba".to_string(), start + Duration::from_millis(100));
//!
//! assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
//! assert_eq!(
//!     debouncer.poll(start + Duration::from_millis(400)),
//!     Some("nba".to_string())
//! );
//! ```

use std::time::{Duration, Instant};
use tracing::trace;

/// Single-slot deferred value
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period from `now`
    pub fn schedule(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            trace!("Debounce restarted");
        }
        self.pending = Some((value, now));
    }

    /// Drops the pending value, if any
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns the pending value once the quiet period has elapsed.
    /// The value is handed out only once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, scheduled_at)) if now.duration_since(*scheduled_at) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|(_, scheduled_at)| *scheduled_at + self.delay)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
