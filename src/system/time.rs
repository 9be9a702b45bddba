//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::Instant;
use pinetime_watchface::state::local_time;

/// Wall clock anchored to an uptime instant
pub struct TimeManager {
    /// Local time at `instant`
    reference: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeManager {
    /// Anchor the clock at boot. `utc_epoch` is seconds since 1970, `offset`
    /// the timezone offset in seconds.
    pub fn init(utc_epoch: i64, offset: i32) -> Self {
        Self {
            reference: local_time(utc_epoch, offset),
            instant: Instant::now(),
        }
    }

    /// Current local time
    pub fn now(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.instant);
        self.reference + chrono::Duration::milliseconds(elapsed.as_millis() as i64)
    }
}
