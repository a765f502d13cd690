//! Command handlers for the chopchop CLI.

pub mod populate;
pub mod search;

pub use populate::handle_populate_command;
pub use search::{handle_search_command, SearchAction};
