//! Suggestion list widget (candidate names, or the empty-state message).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::person::Person;
use crate::ui::theme::Theme;

pub const NO_SUGGESTIONS: &str = "No matching suggestions";

pub struct SuggestionsWidget<'a> {
    pub block: Block<'a>,
    pub candidates: &'a [Person],
    pub highlighted: usize,
}

/// First visible row so that `highlighted` stays on screen.
pub fn scroll_offset(highlighted: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    highlighted.saturating_sub(visible_rows - 1)
}

impl Widget for SuggestionsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.candidates.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                NO_SUGGESTIONS,
                Theme::empty_state_style(),
            )))
            .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
            return;
        }

        let max_rows = inner.height as usize;
        let offset = scroll_offset(self.highlighted, max_rows);
        for (row_idx, person) in self.candidates.iter().skip(offset).take(max_rows).enumerate() {
            let highlighted = offset + row_idx == self.highlighted;
            let style = if highlighted {
                Theme::person_style(person.sex).patch(Theme::highlighted_style())
            } else {
                Theme::person_style(person.sex)
            };
            let marker = if highlighted { "> " } else { "  " };
            Paragraph::new(Line::from(Span::styled(
                format!("{marker}{}", person.name),
                style,
            )))
            .render(Rect::new(inner.x, inner.y + row_idx as u16, inner.width, 1), buf);
        }
    }
}
