use core::fmt::Display;
use std::time::Instant;

use once_cell::sync::Lazy;

static START: Lazy<Instant> = Lazy::new(Instant::now);

/// Time elapsed since the logging clock was first touched
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TimeStamp {
    pub hour        : u32,
    pub minute      : u8,
    pub second      : u8,
    pub millisecond : u16,
}

impl TimeStamp {
    /// Create a timestamp from a number of elapsed milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        let secs = millis / 1000;
        Self {
            hour: (secs / 3600) as u32,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
            millisecond: (millis % 1000) as u16,
        }
    }

    /// Get the current timestamp
    pub fn now() -> Self {
        Self::from_millis(START.elapsed().as_millis() as u64)
    }
}

impl Display for TimeStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:02}:{:02}:{:02}.{:03}", self.hour, self.minute, self.second, self.millisecond))
    }
}

/// Make sure the clock starts counting, so timestamps are relative to program start rather than the first log.
pub fn start_clock() {
    Lazy::force(&START);
}
