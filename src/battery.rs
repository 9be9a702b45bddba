//! Battery level model
//!
//! Conversion from raw SAADC samples follows
//! https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

/// Signed value reported while no battery reading has arrived yet.
pub const UNKNOWN: i8 = -2;
/// Signed value reported while the watch sits on the charger.
pub const CHARGING: i8 = -1;

/// Battery state as shown by the meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryLevel {
    /// No reading yet
    #[default]
    Unknown,
    /// Connected to the charger
    Charging,
    /// Discharging, capacity in percent (0–100)
    Percent(u8),
}

impl BatteryLevel {
    /// Level from a battery service callback.
    ///
    /// Charging takes precedence over the percentage. Percentages above 100
    /// are clamped.
    pub fn from_status(percent: u8, charging: bool) -> Self {
        if charging {
            BatteryLevel::Charging
        } else {
            BatteryLevel::Percent(percent.min(100))
        }
    }

    /// Decode the signed `[-2, 100]` representation.
    pub fn from_signed(value: i8) -> Self {
        match value {
            CHARGING => BatteryLevel::Charging,
            0..=100 => BatteryLevel::Percent(value as u8),
            _ => BatteryLevel::Unknown,
        }
    }

    /// Signed representation: -2 unknown, -1 charging, 0–100 percent.
    pub fn as_signed(self) -> i8 {
        match self {
            BatteryLevel::Unknown => UNKNOWN,
            BatteryLevel::Charging => CHARGING,
            BatteryLevel::Percent(percent) => percent as i8,
        }
    }

    /// Width of the meter fill for `available` pixels, rounded down.
    ///
    /// Unknown and charging levels have no proportional fill.
    pub fn fill_width(self, available: u32) -> u32 {
        match self {
            BatteryLevel::Percent(percent) => available * percent as u32 / 100,
            BatteryLevel::Unknown | BatteryLevel::Charging => 0,
        }
    }
}

/// Convert a 12 bit SAADC sample into the battery voltage in millivolts.
///
/// Returns `None` for samples outside the 12 bit range.
pub fn millivolts_from_sample(raw: i16) -> Option<u16> {
    match raw {
        0..=4095 => {
            // ADC value * 2 * 1000 for mV / (2^12 / 3.3 V reference)
            let millivolts = raw as u32 * 2000 / 1241;
            Some(millivolts as u16)
        }
        _ => None,
    }
}

/// Estimate the remaining capacity from the battery voltage.
///
/// Fixed data points with linear interpolation in between.
pub fn percent_from_millivolts(millivolts: u16) -> u8 {
    (match millivolts {
        0..=3449 => 0,
        3450..=3699 => (millivolts - 3450) / 5,
        3700..=4199 => 50 + (millivolts - 3700) / 10,
        _ => 100,
    }) as u8
}
