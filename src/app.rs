//! Event dispatch for the watch face
//!
//! Platform callbacks arrive as [`Event`]s and go through
//! [`WatchApp::handle`]. State mutation always happens before the redraw
//! request; painting is deferred to [`WatchApp::render`], so several events
//! handled in one loop turn produce a single frame.

use chrono::NaiveDateTime;
use embedded_graphics::draw_target::DrawTarget;

use crate::config::ConfigMessage;
use crate::settings::SettingsStore;
use crate::state::AppState;
use crate::ui::animation::IntroAnimation;
use crate::ui::{ColorMode, FaceRenderer, TimeFormat};

/// Something the platform told us
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Minute tick with the local time
    Tick(NaiveDateTime),
    /// Battery state changed
    Battery { percent: u8, charging: bool },
    /// Decoded configuration message
    Config(ConfigMessage),
    /// Animation frame at the given uptime in milliseconds
    Frame(u64),
}

pub struct WatchApp<S> {
    state: AppState,
    intro: IntroAnimation,
    store: S,
    renderer: FaceRenderer,
}

impl<S> WatchApp<S>
where
    S: SettingsStore,
{
    /// Load the persisted settings, take the first tick and schedule the
    /// intro animation at `now_ms`.
    ///
    /// Unreadable settings fall back to the defaults.
    pub async fn start(mut store: S, format: TimeFormat, now: NaiveDateTime, now_ms: u64) -> Self {
        let settings = store.load().await.unwrap_or_default();

        #[cfg(feature = "defmt")]
        defmt::info!("Starting with {}", settings);

        let mut state = AppState::new(settings);
        state.on_tick(now);

        Self {
            state,
            intro: IntroAnimation::new(now_ms),
            store,
            renderer: FaceRenderer::new(format),
        }
    }

    /// Apply one event. Configuration changes are written to the store.
    pub async fn handle(&mut self, event: Event) -> Result<(), S::Error> {
        match event {
            Event::Tick(now) => {
                self.state.on_tick(now);
            }
            Event::Battery { percent, charging } => {
                self.state.on_battery_change(percent, charging);
            }
            Event::Config(message) => {
                if self.state.apply_config(&message) {
                    self.store.save(&self.state.settings()).await?;
                }
            }
            Event::Frame(now_ms) => self.intro.update(&mut self.state, now_ms),
        }
        Ok(())
    }

    /// Paint a frame if one was requested since the last call.
    ///
    /// Returns whether anything was drawn.
    pub fn render<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if !self.state.take_redraw() {
            return Ok(false);
        }

        if let Err(e) = self.renderer.render(&self.state, target) {
            // Try again on the next pass
            self.state.request_redraw();
            return Err(e);
        }
        Ok(true)
    }

    /// Whether animation frames are still needed.
    pub fn animating(&self) -> bool {
        !self.intro.is_finished()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
