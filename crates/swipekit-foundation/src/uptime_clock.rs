//! Monotonic millisecond clock for stamping pointer events.

use web_time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct UptimeClock {
    origin: Instant,
}

impl UptimeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn now_ms(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }

    /// Nanoseconds elapsed since the clock was created, for frame timestamps.
    pub fn now_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}
