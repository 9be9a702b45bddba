//! Digital face: time, date and battery meter on a striped background

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle},
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    Drawable,
};
use embedded_text::{
    alignment::HorizontalAlignment,
    style::{HeightMode, TextBoxStyleBuilder},
    TextBox,
};
use profont::PROFONT_24_POINT;

use super::{palette, ColorMode, WatchFace, LCD_H, LCD_W, MARGIN, TEXT_HEIGHT};
use crate::battery::BatteryLevel;
use crate::state::AppState;

/// Size of the formatting buffers
pub const BUF_LEN: usize = 16;

const DATE_HEIGHT: u32 = 20;
const METER_W: u32 = 100;
const METER_H: u32 = 10;
/// Discharging levels at or below this are drawn in the warning color
const LOW_PERCENT: u8 = 20;

/// How the time is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormat {
    /// `15:45`
    #[default]
    TwentyFourHour,
    /// `3:45`
    TwelveHour,
}

impl TimeFormat {
    pub fn show<'a>(self, buf: &'a mut [u8; BUF_LEN], time: NaiveDateTime) -> &'a str {
        let shown = match self {
            TimeFormat::TwentyFourHour => format_no_std::show(
                buf,
                format_args!("{:02}:{:02}", time.hour(), time.minute()),
            ),
            TimeFormat::TwelveHour => {
                let hour = match time.hour() % 12 {
                    0 => 12,
                    hour => hour,
                };
                format_no_std::show(buf, format_args!("{}:{:02}", hour, time.minute()))
            }
        };
        shown.unwrap_or("--:--")
    }
}

/// Today's date as `Mon 19 Oct`
pub fn show_date(buf: &mut [u8; BUF_LEN], time: NaiveDateTime) -> &str {
    let weekday = match time.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    };
    let month = match time.month0() {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        _ => "Dec",
    };

    format_no_std::show(buf, format_args!("{} {} {}", weekday, time.day(), month)).unwrap_or("")
}

/// Single line of text in a fixed box
struct Label {
    bounds: Rectangle,
    font: &'static MonoFont<'static>,
    alignment: HorizontalAlignment,
}

impl Label {
    fn draw<D>(&self, text: &str, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let character_style = MonoTextStyle::new(self.font, palette::FOREGROUND);
        let textbox_style = TextBoxStyleBuilder::new()
            .height_mode(HeightMode::FitToText)
            .alignment(self.alignment)
            .build();

        TextBox::with_textbox_style(text, self.bounds, character_style, textbox_style)
            .draw(target)?;
        Ok(())
    }
}

/// Battery meter: outline with a fill proportional to the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryMeter {
    pub bounds: Rectangle,
}

impl BatteryMeter {
    /// Area inside the outline
    pub fn inner(&self) -> Rectangle {
        self.bounds.offset(-1)
    }

    /// Filled part of the meter and its color, `None` when nothing is filled.
    ///
    /// Unknown levels get a neutral full-width placeholder, charging a
    /// full-width bar in the charging color.
    pub fn fill(&self, level: BatteryLevel) -> Option<(Rectangle, ColorMode)> {
        let inner = self.inner();
        let (width, color) = match level {
            BatteryLevel::Unknown => (inner.size.width, palette::NEUTRAL),
            BatteryLevel::Charging => (inner.size.width, palette::CHARGING),
            BatteryLevel::Percent(percent) if percent <= LOW_PERCENT => {
                (level.fill_width(inner.size.width), palette::LOW)
            }
            BatteryLevel::Percent(_) => (level.fill_width(inner.size.width), palette::FOREGROUND),
        };

        (width > 0).then(|| {
            (
                Rectangle::new(inner.top_left, Size::new(width, inner.size.height)),
                color,
            )
        })
    }

    fn draw<D>(&self, level: BatteryLevel, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.bounds
            .into_styled(PrimitiveStyle::with_stroke(palette::FOREGROUND, 1))
            .draw(target)?;

        if let Some((area, color)) = self.fill(level) {
            target.fill_solid(&area, color)?;
        }
        Ok(())
    }
}

/// Horizontal strips over the whole screen
pub fn draw_background<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = PrimitiveStyle::with_stroke(palette::STRIPE, 1);
    for y in (0..LCD_H).step_by(4) {
        Rectangle::new(Point::new(0, y as i32), Size::new(LCD_W, 2))
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

/// Basic digital watchface
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFace {
    format: TimeFormat,
}

impl TextFace {
    pub fn new(format: TimeFormat) -> Self {
        Self { format }
    }

    fn time_label() -> Label {
        Label {
            bounds: Rectangle::new(
                Point::new(MARGIN as i32, MARGIN as i32 / 2),
                Size::new(LCD_W - 2 * MARGIN, TEXT_HEIGHT),
            ),
            font: &PROFONT_24_POINT,
            alignment: HorizontalAlignment::Left,
        }
    }

    fn date_label() -> Label {
        Label {
            bounds: Rectangle::new(
                Point::new(MARGIN as i32, (MARGIN / 2 + TEXT_HEIGHT) as i32),
                Size::new(LCD_W - 2 * MARGIN, DATE_HEIGHT),
            ),
            font: &FONT_10X20,
            alignment: HorizontalAlignment::Right,
        }
    }

    pub fn battery_meter() -> BatteryMeter {
        BatteryMeter {
            bounds: Rectangle::new(
                Point::new(
                    MARGIN as i32,
                    (MARGIN / 2 + TEXT_HEIGHT + DATE_HEIGHT + MARGIN) as i32,
                ),
                Size::new(METER_W, METER_H),
            ),
        }
    }
}

impl WatchFace for TextFace {
    fn draw<D>(&self, state: &AppState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        draw_background(target)?;

        let mut buf = [0u8; BUF_LEN];
        Self::time_label().draw(self.format.show(&mut buf, state.clock()), target)?;

        let mut buf = [0u8; BUF_LEN];
        Self::date_label().draw(show_date(&mut buf, state.clock()), target)?;

        Self::battery_meter().draw(state.battery(), target)
    }
}
