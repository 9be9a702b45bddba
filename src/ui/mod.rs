//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use embedded_graphics::{draw_target::DrawTarget, geometry::Point, pixelcolor::Rgb565, Drawable};

use crate::settings::FaceMode;
use crate::state::AppState;

pub mod animation;
pub mod circle_face;
pub mod decoration;
pub mod geometry;
pub mod text_face;

pub use circle_face::CircleFace;
pub use text_face::{TextFace, TimeFormat};

/// Pixel format of the ST7789
pub type ColorMode = Rgb565;

pub const LCD_W: u32 = 240;
pub const LCD_H: u32 = 240;

/// Outline radius once the intro animation is done
pub const FINAL_RADIUS: u32 = 100;
/// Centre of the circular face
pub const CENTER: Point = Point::new(LCD_W as i32 / 2, LCD_H as i32 / 2);

pub const MARGIN: u32 = 10;
pub const TEXT_HEIGHT: u32 = 30;
/// Outline and hand stroke
pub const STROKE_WIDTH: u32 = 4;

pub mod palette {
    use super::ColorMode;
    use embedded_graphics::pixelcolor::RgbColor;

    pub const BACKGROUND: ColorMode = ColorMode::BLACK;
    pub const FOREGROUND: ColorMode = ColorMode::new(0, 63, 0);
    pub const STRIPE: ColorMode = ColorMode::new(0, 42, 0);
    /// Battery meter while the level is unknown
    pub const NEUTRAL: ColorMode = ColorMode::new(16, 32, 16);
    pub const CHARGING: ColorMode = ColorMode::new(31, 63, 0);
    pub const LOW: ColorMode = ColorMode::new(31, 0, 0);
}

pub trait WatchFace {
    /// Draw the face for `state`. Never mutates state.
    fn draw<D>(&self, state: &AppState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;
}

/// Paints a full frame for the current face mode
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceRenderer {
    pub text: TextFace,
    pub circle: CircleFace,
}

impl FaceRenderer {
    pub fn new(format: TimeFormat) -> Self {
        Self {
            text: TextFace::new(format),
            circle: CircleFace,
        }
    }

    pub fn render<D>(&self, state: &AppState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        target.clear(palette::BACKGROUND)?;

        match state.face_mode() {
            FaceMode::Circular => self.circle.draw(state, target)?,
            FaceMode::Text => self.text.draw(state, target)?,
        }

        decoration::Decoration::bottom_right().draw(target)
    }
}
