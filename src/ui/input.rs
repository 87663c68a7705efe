//! Query input line with a block cursor at the end.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

pub const PLACEHOLDER: &str = "Enter a part of the name";

pub struct QueryInput<'a> {
    pub query: &'a str,
    pub has_focus: bool,
}

impl Widget for QueryInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(2);
        if self.query.is_empty() && !self.has_focus {
            spans.push(Span::styled(PLACEHOLDER, Theme::placeholder_style()));
        } else {
            spans.push(Span::raw(self.query));
        }
        if self.has_focus {
            spans.push(Span::styled(" ", Theme::cursor_style()));
            if self.query.is_empty() {
                spans.push(Span::styled(PLACEHOLDER, Theme::placeholder_style()));
            }
        }

        let title = if self.has_focus { " Name [focused] " } else { " Name " };
        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style(self.has_focus)),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;

    fn render(query: &str, has_focus: bool) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(QueryInput { query, has_focus }, frame.area()))
            .unwrap();
        terminal
    }

    fn line_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn empty_unfocused_shows_placeholder() {
        let terminal = render("", false);
        let line = line_text(&terminal);
        assert!(line.starts_with(&format!("│{PLACEHOLDER}")));
        assert_eq!(terminal.backend().buffer()[(1, 1)].fg, Color::DarkGray);
    }

    #[test]
    fn empty_focused_shows_cursor_then_placeholder() {
        let terminal = render("", true);
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(1, 1)].bg, Color::White);
        assert!(line_text(&terminal).starts_with(&format!("│ {PLACEHOLDER}")));
    }

    #[test]
    fn typed_query_hides_placeholder() {
        let terminal = render("al", true);
        let line = line_text(&terminal);
        assert!(line.starts_with("│al "));
        assert!(!line.contains(PLACEHOLDER));
        assert_eq!(terminal.backend().buffer()[(3, 1)].bg, Color::White);

        let unfocused = render("al", false);
        assert!(!line_text(&unfocused).contains(PLACEHOLDER));
    }
}
