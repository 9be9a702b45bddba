//! Faces drawn into an in-memory framebuffer.

mod common;

use common::{at, Framebuffer};
use embedded_graphics::{
    primitives::{Circle, Primitive, PrimitiveStyle},
    Drawable,
};
use pinetime_watchface::{
    settings::{FaceMode, Settings},
    ui::{
        palette, CircleFace, FaceRenderer, TextFace, TimeFormat, WatchFace, CENTER, STROKE_WIDTH,
    },
    AppState,
};

fn circular(hour: u32, minute: u32, radius: u32) -> AppState {
    let mut state = AppState::new(Settings {
        face_mode: FaceMode::Circular,
        show_extra: false,
    });
    state.on_tick(at(hour, minute));
    state.set_radius(radius);
    state
}

fn outline_only(radius: u32) -> Framebuffer {
    let mut expected = Framebuffer::new();
    Circle::with_center(CENTER, 2 * radius)
        .into_styled(PrimitiveStyle::with_stroke(palette::FOREGROUND, STROKE_WIDTH))
        .draw(&mut expected)
        .unwrap();
    expected
}

#[test]
fn no_hands_on_a_tiny_outline() {
    let mut frame = Framebuffer::new();
    CircleFace.draw(&circular(3, 0, 5), &mut frame).unwrap();

    let expected = outline_only(5);
    for y in 100..140 {
        for x in 100..140 {
            assert_eq!(frame.pixel(x, y), expected.pixel(x, y), "({}, {})", x, y);
        }
    }
}

#[test]
fn minute_hand_appears_before_hour_hand() {
    // 3:00, minute hand up, hour hand to the right
    let mut frame = Framebuffer::new();
    CircleFace.draw(&circular(3, 0, 15), &mut frame).unwrap();
    assert_eq!(frame.pixel(120, 116), palette::FOREGROUND);
    assert_ne!(frame.pixel(123, 120), palette::FOREGROUND);

    let mut frame = Framebuffer::new();
    CircleFace.draw(&circular(3, 0, 25), &mut frame).unwrap();
    assert_eq!(frame.pixel(120, 110), palette::FOREGROUND);
    assert_eq!(frame.pixel(123, 120), palette::FOREGROUND);
}

#[test]
fn full_size_hands_point_at_the_time() {
    // 15:45, minute hand at nine o'clock, hour hand just before four
    let mut frame = Framebuffer::new();
    CircleFace.draw(&circular(15, 45, 100), &mut frame).unwrap();

    assert_eq!(frame.pixel(40, 120), palette::FOREGROUND);
    assert_eq!(frame.pixel(156, 135), palette::FOREGROUND);
    // Nothing towards twelve o'clock
    assert_ne!(frame.pixel(120, 60), palette::FOREGROUND);
}

/// Row through the inner area of the battery meter, clear of the stripes
fn meter_row() -> (i32, i32, i32) {
    let inner = TextFace::battery_meter().inner();
    let y = inner.top_left.y + 4;
    (y, inner.top_left.x, inner.top_left.x + inner.size.width as i32 - 1)
}

#[test]
fn half_full_battery_fills_half_the_meter() {
    let mut state = AppState::default();
    state.on_tick(at(10, 10));
    state.on_battery_change(50, false);

    let mut frame = Framebuffer::new();
    TextFace::new(TimeFormat::default())
        .draw(&state, &mut frame)
        .unwrap();

    let (y, x0, x1) = meter_row();
    let width = (x1 - x0 + 1) as usize;
    assert_eq!(frame.count_in_row(y, x0, x1, palette::FOREGROUND), width / 2);
    assert_eq!(frame.pixel(x0, y), palette::FOREGROUND);
    assert_ne!(frame.pixel(x1, y), palette::FOREGROUND);
}

#[test]
fn unknown_and_charging_fill_the_meter() {
    let (y, x0, x1) = meter_row();
    let width = (x1 - x0 + 1) as usize;
    let face = TextFace::new(TimeFormat::default());

    let mut frame = Framebuffer::new();
    face.draw(&AppState::default(), &mut frame).unwrap();
    assert_eq!(frame.count_in_row(y, x0, x1, palette::NEUTRAL), width);

    let mut state = AppState::default();
    state.on_battery_change(30, true);
    let mut frame = Framebuffer::new();
    face.draw(&state, &mut frame).unwrap();
    assert_eq!(frame.count_in_row(y, x0, x1, palette::CHARGING), width);
}

#[test]
fn renderer_switches_faces() {
    let renderer = FaceRenderer::new(TimeFormat::default());
    let (y, x0, x1) = meter_row();

    let mut frame = Framebuffer::new();
    renderer.render(&AppState::default(), &mut frame).unwrap();
    assert!(frame.count_in_row(y, x0, x1, palette::NEUTRAL) > 0);

    let mut frame = Framebuffer::new();
    renderer.render(&circular(3, 0, 100), &mut frame).unwrap();
    assert_eq!(frame.count_in_row(y, x0, x1, palette::NEUTRAL), 0);
    assert_eq!(frame.pixel(120, 60), palette::FOREGROUND);
}
