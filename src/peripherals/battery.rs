//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{
    gpio::{AnyPin, Input},
    saadc::Saadc,
};
use pinetime_watchface::battery::{millivolts_from_sample, percent_from_millivolts};

/// Reading handed to the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct BatteryInfo {
    /// Charging state
    pub charging: bool,
    /// Battery percentage
    pub percent: u8,
}

pub struct BatteryStatus {
    /// Pin P0.12: High = battery, Low = charging
    pin_charge_indication: Input<'static, AnyPin>,
    /// ADC instance for battery voltage measurement
    saadc: Saadc<'static, 1>,
    /// Last reading
    info: BatteryInfo,
}

impl BatteryStatus {
    /// Take the initial reading on boot
    pub async fn init(
        pin_charge_indication: Input<'static, AnyPin>,
        saadc: Saadc<'static, 1>,
    ) -> Self {
        let mut battery = Self {
            pin_charge_indication,
            saadc,
            info: BatteryInfo {
                charging: false,
                percent: 0,
            },
        };
        battery.update().await;
        battery
    }

    /// Return the last reading.
    ///
    /// To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Read charging state and voltage from the hardware. Return whether the
    /// reading changed.
    pub async fn update(&mut self) -> bool {
        let charging = self.pin_charge_indication.is_low();

        let mut buf = [0; 1];
        self.saadc.sample(&mut buf).await;
        let percent = match millivolts_from_sample(buf[0]) {
            Some(millivolts) => percent_from_millivolts(millivolts),
            None => {
                defmt::warn!("Invalid battery measurement: {}", buf[0]);
                self.info.percent
            }
        };

        let info = BatteryInfo { charging, percent };
        let changed = info != self.info;
        self.info = info;
        changed
    }
}
