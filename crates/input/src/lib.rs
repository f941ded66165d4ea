//! Terminal input for blockfall.
//!
//! Maps `crossterm` key events to [`types::GameAction`]s for
//! `GameSession::apply_action`. Key-repeat timing is left to the terminal.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, map_key, should_quit, KeyCommand};
