//! Terminal input module (session-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::UiAction`] values the
//! terminal loop feeds to the session.

pub mod map;

pub use tui_candymon_types as types;

pub use map::{handle_key_event, should_quit};
