//! Whole-screen composition: lays out and renders every widget for a frame.

use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::state::{AppState, PaneFocus};
use crate::ui::{
    header::HeaderWidget, input::QueryInput, layout::AppLayout, suggestions::SuggestionsWidget,
    theme::Theme,
};

pub fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    frame.render_widget(
        HeaderWidget {
            selected: state.selected_person.as_ref(),
        },
        layout.header_area,
    );

    frame.render_widget(
        QueryInput {
            query: &state.picker.query,
            has_focus: state.focus == PaneFocus::Input,
        },
        layout.input_area,
    );

    let list_focused = state.focus == PaneFocus::Suggestions;
    let list_block = Block::default()
        .title(format!(" Suggestions ({}) ", state.picker.candidates.len()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style(list_focused));
    frame.render_widget(
        SuggestionsWidget {
            block: list_block,
            candidates: &state.picker.candidates,
            highlighted: state.highlighted,
        },
        layout.list_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
}
