//! Hand angles and endpoints

use embedded_graphics::geometry::Point;

use crate::state::WallTime;

/// One full rotation in fixed-point angle units.
pub const FULL_TURN: i32 = 0x10000;

/// Gap between the minute hand tip and the outline.
pub const HAND_MARGIN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hand {
    Hour,
    Minute,
}

impl Hand {
    /// Distance between the hand tip and the outline circle.
    ///
    /// The hour hand is drawn shorter.
    pub const fn margin(self) -> u32 {
        match self {
            Hand::Hour => 2 * HAND_MARGIN,
            Hand::Minute => HAND_MARGIN,
        }
    }

    /// Whether a hand has positive length for the given outline radius.
    pub const fn visible(self, radius: u32) -> bool {
        radius > self.margin()
    }
}

/// Tips of both hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandEndpoints {
    pub minute: Point,
    pub hour: Point,
}

/// Minute hand angle in `FULL_TURN` units. Wraps at 60 minutes.
pub fn minute_angle(minutes: u8) -> i32 {
    FULL_TURN * (minutes % 60) as i32 / 60
}

/// Hour hand angle in `FULL_TURN` units.
///
/// While animating, `hours` counts out of 60 instead of 12. The hand creeps
/// towards the next hour mark proportionally to the minutes. All divisions
/// truncate.
pub fn hour_angle(hours: u8, minutes: u8, animating: bool) -> i32 {
    let hours_per_turn = if animating { 60 } else { 12 };
    let base = FULL_TURN * hours as i32 / hours_per_turn;

    base + minute_angle(minutes) * (FULL_TURN / 12) / FULL_TURN
}

/// Express an hour of a 12 hour dial as a target on a 60 unit dial.
pub fn hours_as_minutes(hours: u8) -> u8 {
    libm::roundf(hours as f32 / 12.0 * 60.0) as u8
}

/// Point at `angle` on a circle of `length` around `center`.
///
/// Angle 0 points up, angles grow clockwise. Coordinates truncate towards
/// zero.
pub fn endpoint(center: Point, angle: i32, length: i32) -> Point {
    let radians = angle as f32 / FULL_TURN as f32 * 2.0 * core::f32::consts::PI;
    let length = length as f32;

    Point::new(
        center.x + (libm::sinf(radians) * length) as i32,
        center.y + (-libm::cosf(radians) * length) as i32,
    )
}

/// Compute both hand tips for an outline of `radius`.
///
/// Lengths may be zero or negative for small radii; callers check
/// [`Hand::visible`] before drawing.
pub fn hand_endpoints(center: Point, time: WallTime, radius: u32, animating: bool) -> HandEndpoints {
    let length = |hand: Hand| radius as i32 - hand.margin() as i32;

    HandEndpoints {
        minute: endpoint(center, minute_angle(time.minutes), length(Hand::Minute)),
        hour: endpoint(
            center,
            hour_angle(time.hours, time.minutes, animating),
            length(Hand::Hour),
        ),
    }
}
