//! Per-process monotonic timestamp source.

use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::types::Timestamp;

/// Hands out strictly increasing UTC timestamps.
///
/// `Utc::now()` can repeat or step backwards (coarse clock resolution,
/// NTP adjustments); record timestamps must be monotonic within one
/// process so that "latest" is well-defined. When the wall clock has
/// not advanced past the previous value, the clock bumps it by one
/// microsecond instead.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<Timestamp>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current timestamp, strictly greater than any previously returned
    /// by this instance.
    pub fn now(&self) -> Timestamp {
        let mut last = self.last.lock().expect("clock mutex poisoned");
        let mut now = Utc::now();
        if let Some(prev) = *last {
            if now <= prev {
                now = prev + Duration::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}
