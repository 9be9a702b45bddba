//! Analog face: outline circle with hour and minute hands

use embedded_graphics::{
    draw_target::DrawTarget,
    primitives::{Circle, Line, Primitive, PrimitiveStyle},
    Drawable,
};

use super::geometry::{hand_endpoints, Hand};
use super::{palette, ColorMode, WatchFace, CENTER, STROKE_WIDTH};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default)]
pub struct CircleFace;

impl CircleFace {
    /// Hands that have positive length at `radius`, hour hand first.
    pub fn visible_hands(radius: u32) -> impl Iterator<Item = Hand> {
        [Hand::Hour, Hand::Minute]
            .into_iter()
            .filter(move |hand| hand.visible(radius))
    }
}

impl WatchFace for CircleFace {
    fn draw<D>(&self, state: &AppState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let style = PrimitiveStyle::with_stroke(palette::FOREGROUND, STROKE_WIDTH);
        let radius = state.radius();

        Circle::with_center(CENTER, 2 * radius)
            .into_styled(style)
            .draw(target)?;

        // Don't use current time while animating
        let hands = hand_endpoints(CENTER, state.hands_time(), radius, state.animating());

        for hand in Self::visible_hands(radius) {
            let tip = match hand {
                Hand::Hour => hands.hour,
                Hand::Minute => hands.minute,
            };
            Line::new(CENTER, tip).into_styled(style).draw(target)?;
        }

        Ok(())
    }
}
