//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    debounce::Debouncer,
    person::Person,
    picker::PickerState,
};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneFocus {
    #[default]
    Input,
    Suggestions,
}

/// Top-level application state.
pub struct AppState {
    /// The people to pick from, in source order.  Never mutated.
    pub people: Vec<Person>,
    /// Current picker snapshot.  Replaced wholesale on every transition.
    pub picker: PickerState,
    /// Pending debounce timer for the raw query.
    pub debouncer: Debouncer<String>,
    pub debounce_delay: Duration,
    pub focus: PaneFocus,
    /// Highlighted row in the candidate list.
    pub highlighted: usize,
    /// The selection as last reported to the header.
    pub selected_person: Option<Person>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// User-configurable keybindings.
    pub config: AppConfig,
    /// Terminal size at the last draw, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(people: Vec<Person>, config: AppConfig, debouncer: Debouncer<String>) -> Self {
        Self {
            picker: PickerState::initial(&people),
            people,
            debouncer,
            debounce_delay: Duration::from_millis(config.debounce_ms),
            focus: PaneFocus::default(),
            highlighted: 0,
            selected_person: None,
            should_quit: false,
            status_message: None,
            config,
            terminal_area: Rect::default(),
        }
    }

    pub fn highlighted_candidate(&self) -> Option<&Person> {
        self.picker.candidates.get(self.highlighted)
    }
}
