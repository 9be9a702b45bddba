//! Host stand-ins for the display and the settings flash.

#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::RgbColor,
    Pixel,
};
use embedded_storage_async::nor_flash::{
    ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash,
};
use pinetime_watchface::ui::{ColorMode, LCD_H, LCD_W};

/// Local time on 2026-10-19
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

/// 240x240 RGB565 frame kept in memory
pub struct Framebuffer {
    pixels: Vec<ColorMode>,
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![ColorMode::BLACK; (LCD_W * LCD_H) as usize],
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> ColorMode {
        self.pixels[(y as u32 * LCD_W + x as u32) as usize]
    }

    /// Pixels of row `y` between `x0` and `x1` inclusive with `color`
    pub fn count_in_row(&self, y: i32, x0: i32, x1: i32, color: ColorMode) -> usize {
        (x0..=x1).filter(|&x| self.pixel(x, y) == color).count()
    }
}

impl DrawTarget for Framebuffer {
    type Color = ColorMode;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<ColorMode>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if (0..LCD_W as i32).contains(&x) && (0..LCD_H as i32).contains(&y) {
                self.pixels[(y as u32 * LCD_W + x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(LCD_W, LCD_H)
    }
}

pub const PAGE: usize = 256;

/// NOR flash in RAM, shared between handles so a "reboot" sees old writes
#[derive(Clone)]
pub struct RamFlash {
    bytes: Rc<RefCell<Vec<u8>>>,
    erases: Rc<RefCell<usize>>,
}

impl RamFlash {
    pub fn new(pages: usize) -> Self {
        Self {
            bytes: Rc::new(RefCell::new(vec![0xff; pages * PAGE])),
            erases: Rc::new(RefCell::new(0)),
        }
    }

    pub fn erases(&self) -> usize {
        *self.erases.borrow()
    }

    pub fn corrupt(&self, offset: usize) {
        self.bytes.borrow_mut()[offset] ^= 0x01;
    }

    fn range(&self, offset: u32, len: usize) -> Result<core::ops::Range<usize>, NorFlashErrorKind> {
        let start = offset as usize;
        let end = start + len;
        if end > self.bytes.borrow().len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl ErrorType for RamFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let range = self.range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.bytes.borrow()[range]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.borrow().len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = PAGE;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if from as usize % PAGE != 0 || to as usize % PAGE != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        let range = self.range(from, (to - from) as usize)?;
        self.bytes.borrow_mut()[range].fill(0xff);
        *self.erases.borrow_mut() += 1;
        Ok(())
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if offset as usize % Self::WRITE_SIZE != 0 || bytes.len() % Self::WRITE_SIZE != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        let range = self.range(offset, bytes.len())?;
        // NOR writes can only clear bits
        for (cell, byte) in self.bytes.borrow_mut()[range].iter_mut().zip(bytes) {
            *cell &= byte;
        }
        Ok(())
    }
}
