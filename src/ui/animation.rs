//! Intro animation
//!
//! Two time-boxed interpolations run side by side after startup: the outline
//! grows to its final radius, and the hands sweep from twelve o'clock to the
//! current time. Each one owns its own fields of [`AppState`]; they only meet
//! through the redraw request.

use crate::state::{AppState, WallTime};
use crate::ui::geometry::hours_as_minutes;
use crate::ui::FINAL_RADIUS;

/// Duration of the radius animation, the hand sweep takes twice as long
pub const ANIMATION_DURATION_MS: u32 = 500;
/// Delay before both animations start
pub const ANIMATION_DELAY_MS: u32 = 600;

/// Progress remapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Curve {
    Linear,
    EaseInOut,
}

impl Curve {
    pub fn apply(self, progress: f32) -> f32 {
        match self {
            Curve::Linear => progress.clamp(0.0, 1.0),
            Curve::EaseInOut => ease_in_out(progress),
        }
    }
}

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let q = -2.0 * p + 2.0;
        1.0 - q * q * q / 2.0
    }
}

/// Scale progress onto `0..=max`, rounding to nearest.
pub fn scale(progress: f32, max: u32) -> u32 {
    libm::roundf(progress.clamp(0.0, 1.0) * max as f32) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for the delay to pass
    Scheduled,
    Running,
    Finished,
}

/// Result of advancing an animation by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Eased progress in `[0, 1]`
    pub progress: f32,
    /// First frame of this animation
    pub started: bool,
    /// Last frame of this animation
    pub stopped: bool,
}

/// Timing of one animation
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    duration_ms: u32,
    delay_ms: u32,
    curve: Curve,
    scheduled_at: u64,
    phase: Phase,
}

impl Animation {
    pub const fn new(duration_ms: u32, delay_ms: u32, curve: Curve, now_ms: u64) -> Self {
        Self {
            duration_ms,
            delay_ms,
            curve,
            scheduled_at: now_ms,
            phase: Phase::Scheduled,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance to `now_ms`.
    ///
    /// Returns `None` while the delay has not passed and once the animation
    /// has finished. The last frame always has progress `1.0`.
    pub fn advance(&mut self, now_ms: u64) -> Option<Frame> {
        let start = self.scheduled_at + self.delay_ms as u64;
        if self.phase == Phase::Finished || now_ms < start {
            return None;
        }

        let started = self.phase == Phase::Scheduled;
        self.phase = Phase::Running;

        let elapsed = now_ms - start;
        let stopped = elapsed >= self.duration_ms as u64;
        let linear = if stopped {
            1.0
        } else {
            elapsed as f32 / self.duration_ms as f32
        };
        if stopped {
            self.phase = Phase::Finished;
        }

        Some(Frame {
            progress: self.curve.apply(linear),
            started,
            stopped,
        })
    }
}

/// What an animation does with its progress
pub trait AnimationImplementation {
    fn update(&mut self, state: &mut AppState, progress: f32);

    fn started(&mut self, _state: &mut AppState) {}

    fn stopped(&mut self, _state: &mut AppState) {}
}

/// Grows the outline from nothing to [`FINAL_RADIUS`]
pub struct RadiusGrowth;

impl AnimationImplementation for RadiusGrowth {
    fn update(&mut self, state: &mut AppState, progress: f32) {
        state.set_radius(scale(progress, FINAL_RADIUS));
    }
}

/// Sweeps both hands from twelve o'clock to the last tick
pub struct HandSweep;

impl AnimationImplementation for HandSweep {
    fn update(&mut self, state: &mut AppState, progress: f32) {
        let target = state.last_time();
        let hours = scale(progress, hours_as_minutes(target.hours) as u32);
        let minutes = scale(progress, target.minutes as u32);

        state.set_anim_time(WallTime::new(hours as u8, minutes as u8));
    }

    fn started(&mut self, state: &mut AppState) {
        state.set_animating(true);
    }

    fn stopped(&mut self, state: &mut AppState) {
        state.set_animating(false);
    }
}

/// An animation bound to its implementation
pub struct Scheduled<I> {
    animation: Animation,
    implementation: I,
}

impl<I> Scheduled<I>
where
    I: AnimationImplementation,
{
    pub fn new(animation: Animation, implementation: I) -> Self {
        Self {
            animation,
            implementation,
        }
    }

    pub fn update(&mut self, state: &mut AppState, now_ms: u64) {
        let Some(frame) = self.animation.advance(now_ms) else {
            return;
        };

        if frame.started {
            self.implementation.started(state);
        }
        self.implementation.update(state, frame.progress);
        if frame.stopped {
            self.implementation.stopped(state);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.animation.phase() == Phase::Finished
    }
}

/// Both intro animations, scheduled together at startup
pub struct IntroAnimation {
    radius: Scheduled<RadiusGrowth>,
    hands: Scheduled<HandSweep>,
}

impl IntroAnimation {
    pub fn new(now_ms: u64) -> Self {
        Self {
            radius: Scheduled::new(
                Animation::new(
                    ANIMATION_DURATION_MS,
                    ANIMATION_DELAY_MS,
                    Curve::EaseInOut,
                    now_ms,
                ),
                RadiusGrowth,
            ),
            hands: Scheduled::new(
                Animation::new(
                    2 * ANIMATION_DURATION_MS,
                    ANIMATION_DELAY_MS,
                    Curve::EaseInOut,
                    now_ms,
                ),
                HandSweep,
            ),
        }
    }

    /// Advance both animations to `now_ms`.
    pub fn update(&mut self, state: &mut AppState, now_ms: u64) {
        self.radius.update(state, now_ms);
        self.hands.update(state, now_ms);
    }

    /// Both animations ran to completion, frames are no longer needed.
    pub fn is_finished(&self) -> bool {
        self.radius.is_finished() && self.hands.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ticked(hour: u32, minute: u32) -> AppState {
        let mut state = AppState::default();
        let now = NaiveDate::from_ymd_opt(2024, 3, 3)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap();
        state.on_tick(now);
        state.take_redraw();
        state
    }

    #[test]
    fn ease_in_out_end_points() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn radius_scale() {
        assert_eq!(scale(0.0, FINAL_RADIUS), 0);
        assert_eq!(scale(1.0, FINAL_RADIUS), FINAL_RADIUS);
        assert_eq!(scale(0.5, 52), 26);
        assert_eq!(scale(0.505, 52), 26);
        assert_eq!(scale(0.51, 52), 27);
    }

    #[test]
    fn animation_waits_for_delay() {
        let mut animation = Animation::new(500, 600, Curve::Linear, 1_000);

        assert_eq!(animation.advance(1_000), None);
        assert_eq!(animation.advance(1_599), None);
        assert_eq!(animation.phase(), Phase::Scheduled);

        let first = animation.advance(1_600).unwrap();
        assert!(first.started);
        assert!(!first.stopped);
        assert_eq!(first.progress, 0.0);

        let middle = animation.advance(1_850).unwrap();
        assert!(!middle.started);
        assert_eq!(middle.progress, 0.5);

        let last = animation.advance(2_100).unwrap();
        assert!(last.stopped);
        assert_eq!(last.progress, 1.0);
        assert_eq!(animation.phase(), Phase::Finished);
        assert_eq!(animation.advance(3_000), None);
    }

    #[test]
    fn late_first_frame_starts_and_stops() {
        let mut animation = Animation::new(500, 600, Curve::EaseInOut, 0);
        let frame = animation.advance(10_000).unwrap();

        assert!(frame.started && frame.stopped);
        assert_eq!(frame.progress, 1.0);
    }

    #[test]
    fn intro_runs_to_completion() {
        let mut state = ticked(15, 45);
        let mut intro = IntroAnimation::new(0);

        intro.update(&mut state, 100);
        assert!(!state.take_redraw());
        assert!(!state.animating());

        intro.update(&mut state, 600);
        assert!(state.animating());
        assert_eq!(state.radius(), 0);
        assert_eq!(state.hands_time(), WallTime::new(0, 0));
        assert!(state.take_redraw());

        intro.update(&mut state, 1_100);
        assert_eq!(state.radius(), FINAL_RADIUS);
        assert!(state.animating());
        assert_eq!(state.hands_time(), WallTime::new(8, 23));
        assert!(!intro.is_finished());

        intro.update(&mut state, 1_600);
        assert!(!state.animating());
        assert_eq!(state.anim_time(), WallTime::new(15, 45));
        assert_eq!(state.hands_time(), WallTime::new(3, 45));
        assert!(intro.is_finished());
    }

    #[test]
    fn radius_never_shrinks() {
        let mut state = ticked(9, 10);
        let mut intro = IntroAnimation::new(0);
        let mut last = 0;

        for now in (0..2_000).step_by(16) {
            intro.update(&mut state, now);
            assert!(state.radius() >= last);
            assert!(state.radius() <= FINAL_RADIUS);
            last = state.radius();
        }
        assert_eq!(last, FINAL_RADIUS);
    }
}
