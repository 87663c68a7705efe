//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: selection header, query input, suggestion list, status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header_area: Rect,
    pub input_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // selected person
                Constraint::Length(3), // query input
                Constraint::Min(3),    // suggestions (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            input_area: chunks[1],
            list_area: chunks[2],
            status_area: chunks[3],
        }
    }

    /// Rows of the suggestion list inside its border.
    pub fn list_rows(&self) -> Rect {
        self.list_area.inner(ratatui::layout::Margin::new(1, 1))
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_top_to_bottom() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 40, 20));
        assert_eq!(layout.header_area, Rect::new(0, 0, 40, 3));
        assert_eq!(layout.input_area, Rect::new(0, 3, 40, 3));
        assert_eq!(layout.list_area, Rect::new(0, 6, 40, 13));
        assert_eq!(layout.status_area, Rect::new(0, 19, 40, 1));
        assert_eq!(layout.list_rows(), Rect::new(1, 7, 38, 11));
    }

    #[test]
    fn point_hit_test_excludes_far_edges() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(point_in_rect(r, 2, 2));
        assert!(point_in_rect(r, 4, 4));
        assert!(!point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 1, 3));
    }
}
