//! Header showing the currently selected person.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::person::Person;
use crate::ui::theme::Theme;

pub const NO_SELECTION: &str = "No selected person";

pub struct HeaderWidget<'a> {
    pub selected: Option<&'a Person>,
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = match self.selected {
            Some(person) => person.to_string(),
            None => NO_SELECTION.to_string(),
        };
        Paragraph::new(Line::from(Span::styled(text, Theme::title_style())))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style(false)),
            )
            .render(area, buf);
    }
}
