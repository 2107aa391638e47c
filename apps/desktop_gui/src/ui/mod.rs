//! UI layer for the desktop app: app shell, fonts and the search widgets.

pub mod app;
pub mod fonts;
pub mod widgets;

pub use app::{GlossaryApp, APP_TITLE};
