//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the app state and turns it into cells on the terminal.
//! No state changes happen here.

pub mod header;
pub mod input;
pub mod layout;
pub mod screen;
pub mod suggestions;
pub mod theme;
