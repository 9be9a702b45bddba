//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;
use mipidsi::{models::ST7789, Builder, Orientation};
use pinetime_watchface::{
    settings::SettingsStore,
    ui::{LCD_H, LCD_W},
    WatchApp,
};

type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

/// ST7789 panel driven over SPI2
pub struct Display {
    lcd: Lcd,
}

impl Display {
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs_pin: Output<'static, AnyPin>,
        dc_pin: Output<'static, AnyPin>,
        rst_pin: Output<'static, AnyPin>,
    ) -> Option<Self> {
        match Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W as u16, LCD_H as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
        {
            Ok(lcd) => Some(Self { lcd }),
            Err(_) => {
                defmt::error!("Display initialization failed");
                None
            }
        }
    }

    /// Paint the watch face if a redraw was requested since the last call.
    pub fn refresh<S>(&mut self, app: &mut WatchApp<S>)
    where
        S: SettingsStore,
    {
        match app.render(&mut self.lcd) {
            Ok(true) => defmt::trace!("Frame drawn"),
            Ok(false) => {}
            Err(_) => defmt::warn!("Display write failed, retrying next frame"),
        }
    }
}
