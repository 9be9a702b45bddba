//! Pip watch face for the PineTime
//!
//! Everything that does not touch a peripheral lives here so it can be
//! exercised on the host: hand geometry, the intro animation, both face
//! renderers, the time/mode state and the settings record.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod battery;
pub mod config;
pub mod error;
pub mod settings;
pub mod state;
pub mod ui;

pub use app::{Event, WatchApp};
pub use error::Error;
pub use state::AppState;
