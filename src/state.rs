//! Time and mode state shared by the renderer and the animations
//!
//! All mutation happens from the single UI task. Every mutation that changes
//! what is on screen requests a redraw; requests coalesce until the next
//! render pass takes them.

use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::battery::BatteryLevel;
use crate::config::ConfigMessage;
use crate::settings::{FaceMode, Settings};

/// Time of day on a 12 hour dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub hours: u8,
    pub minutes: u8,
}

impl WallTime {
    pub const fn new(hours: u8, minutes: u8) -> Self {
        Self { hours, minutes }
    }

    /// Build from a 24 hour clock reading.
    pub fn from_24h(hour: u32, minute: u32) -> Self {
        Self {
            hours: (hour % 12) as u8,
            minutes: (minute % 60) as u8,
        }
    }
}

/// Local time for `utc_secs` seconds since 1970, shifted by `offset_secs`.
///
/// Out of range inputs read as the epoch.
pub fn local_time(utc_secs: i64, offset_secs: i32) -> NaiveDateTime {
    DateTime::from_timestamp(utc_secs.saturating_add(offset_secs as i64), 0)
        .map(|time| time.naive_utc())
        .unwrap_or(NaiveDateTime::UNIX_EPOCH)
}

impl From<NaiveDateTime> for WallTime {
    fn from(now: NaiveDateTime) -> Self {
        Self::from_24h(now.hour(), now.minute())
    }
}

/// State for the watch face
#[derive(Debug, Clone)]
pub struct AppState {
    /// Local time of the last tick
    clock: NaiveDateTime,
    /// Last tick on a 12 hour dial
    last_time: WallTime,
    /// Hand positions during the intro sweep, hours out of 60
    anim_time: WallTime,
    /// Outline radius
    radius: u32,
    /// Set between hand sweep start and stop
    animating: bool,
    settings: Settings,
    battery: BatteryLevel,
    redraw: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    /// Fresh state with the persisted settings. The first frame is always
    /// requested.
    pub fn new(settings: Settings) -> Self {
        Self {
            clock: NaiveDateTime::UNIX_EPOCH,
            last_time: WallTime::default(),
            anim_time: WallTime::default(),
            radius: 0,
            animating: false,
            settings,
            battery: BatteryLevel::Unknown,
            redraw: true,
        }
    }

    /// Store the current local time.
    ///
    /// A redraw is requested only when the displayed minute changes, so
    /// repeated ticks within one minute are free. Returns whether it changed.
    pub fn on_tick(&mut self, now: NaiveDateTime) -> bool {
        let now = now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now);
        if now == self.clock {
            return false;
        }

        self.clock = now;
        self.last_time = WallTime::from(now);
        self.request_redraw();

        #[cfg(feature = "defmt")]
        defmt::debug!("Tick {}:{}", self.last_time.hours, self.last_time.minutes);

        true
    }

    /// Apply a configuration message.
    ///
    /// A redraw is requested only if the face mode changed. Returns whether
    /// any setting was present, in which case the settings must be persisted.
    pub fn apply_config(&mut self, message: &ConfigMessage) -> bool {
        if let Some(mode) = message.face_mode {
            if mode != self.settings.face_mode {
                self.settings.face_mode = mode;
                self.request_redraw();
            }
        }
        if let Some(show_extra) = message.show_extra {
            self.settings.show_extra = show_extra;
        }

        message.face_mode.is_some() || message.show_extra.is_some()
    }

    /// Store a battery reading. Returns whether the level changed.
    pub fn on_battery_change(&mut self, percent: u8, charging: bool) -> bool {
        let level = BatteryLevel::from_status(percent, charging);
        if level == self.battery {
            return false;
        }

        self.battery = level;
        self.request_redraw();
        true
    }

    /// Outline radius update from the radius animation.
    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
        self.request_redraw();
    }

    /// Hand positions update from the hand sweep animation.
    pub fn set_anim_time(&mut self, time: WallTime) {
        self.anim_time = time;
        self.request_redraw();
    }

    /// Hand sweep lifecycle.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
        self.request_redraw();
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.redraw, false)
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Time the hands should show right now.
    pub fn hands_time(&self) -> WallTime {
        if self.animating {
            self.anim_time
        } else {
            self.last_time
        }
    }

    pub fn clock(&self) -> NaiveDateTime {
        self.clock
    }

    pub fn last_time(&self) -> WallTime {
        self.last_time
    }

    pub fn anim_time(&self) -> WallTime {
        self.anim_time
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn animating(&self) -> bool {
        self.animating
    }

    pub fn face_mode(&self) -> FaceMode {
        self.settings.face_mode
    }

    /// Stored and persisted, not used by any face yet.
    pub fn show_extra(&self) -> bool {
        self.settings.show_extra
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn battery(&self) -> BatteryLevel {
        self.battery
    }
}
