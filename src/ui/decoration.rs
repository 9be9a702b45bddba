//! Decorative 1 bit bitmap in the bottom right corner

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    primitives::Rectangle,
    Drawable, Pixel,
};

use super::{palette, ColorMode, LCD_H, LCD_W, MARGIN};

pub const SIZE: u32 = 32;

/// One row per line, most significant bit is the leftmost pixel
const ROWS: [u32; SIZE as usize] = [
    0b00000000000000000000000000000000,
    0b00000000000111111111100000000000,
    0b00000000111111111111111100000000,
    0b00000001111100000000111110000000,
    0b00000011110000000000001111000000,
    0b00000111000000000000000011100000,
    0b00001110000000000000000001110000,
    0b00011100000000000000000000111000,
    0b00111000011110000001111000011100,
    0b00111000011110000001111000011100,
    0b00110000011110000001111000001100,
    0b01110000011110000001111000001110,
    0b01100000011110000001111000000110,
    0b01100000011110000001111000000110,
    0b01100000000000000000000000000110,
    0b01100000000000000000000000000110,
    0b01100000000000000000000000000110,
    0b01100000000000000000000000000110,
    0b01100000000000000000000000000110,
    0b01100001100000000000000110000110,
    0b01110001100000000000000110001110,
    0b00110000110000000000001100001100,
    0b00111000111000000000011100011100,
    0b00111000011110000001111000011100,
    0b00011100000111111111100000111000,
    0b00001110000001111110000001110000,
    0b00000111000000000000000011100000,
    0b00000011110000000000001111000000,
    0b00000001111100000000111110000000,
    0b00000000111111111111111100000000,
    0b00000000000111111111100000000000,
    0b00000000000000000000000000000000,
];

/// The bitmap, composited with clear pixels left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    top_left: Point,
    color: ColorMode,
}

impl Decoration {
    pub fn new(top_left: Point, color: ColorMode) -> Self {
        Self { top_left, color }
    }

    /// Aligned to the bottom right corner of the screen.
    pub fn bottom_right() -> Self {
        let offset = (SIZE + MARGIN) as i32;
        Self::new(
            Point::new(LCD_W as i32 - offset, LCD_H as i32 - offset),
            palette::FOREGROUND,
        )
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.top_left, Size::new(SIZE, SIZE))
    }

    fn pixels(&self) -> impl Iterator<Item = Pixel<ColorMode>> + '_ {
        ROWS.iter().enumerate().flat_map(move |(y, row)| {
            (0..SIZE).filter_map(move |x| {
                let set = row & (1 << (SIZE - 1 - x)) != 0;
                set.then(|| {
                    Pixel(
                        self.top_left + Point::new(x as i32, y as i32),
                        self.color,
                    )
                })
            })
        })
    }
}

impl Drawable for Decoration {
    type Color = ColorMode;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.draw_iter(self.pixels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{mock_display::MockDisplay, pixelcolor::RgbColor};

    #[test]
    fn only_set_pixels_are_drawn() {
        let mut display = MockDisplay::<ColorMode>::new();
        let decoration = Decoration::new(Point::zero(), ColorMode::WHITE);
        decoration.draw(&mut display).unwrap();

        let expected: u32 = ROWS.iter().map(|row| row.count_ones()).sum();
        let drawn = (0..SIZE as i32)
            .flat_map(|y| (0..SIZE as i32).map(move |x| Point::new(x, y)))
            .filter(|p| display.get_pixel(*p).is_some())
            .count();

        assert_eq!(drawn as u32, expected);
        // Corners are transparent
        assert_eq!(display.get_pixel(Point::zero()), None);
        assert_eq!(display.get_pixel(Point::new(11, 1)), Some(ColorMode::WHITE));
    }

    #[test]
    fn bottom_right_fits_on_screen() {
        let bounds = Decoration::bottom_right().bounds();
        let bottom_right = bounds.bottom_right().unwrap();

        assert_eq!(bottom_right, Point::new(LCD_W as i32 - 11, LCD_H as i32 - 11));
    }
}
