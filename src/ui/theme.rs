//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::person::Sex;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── suggestions ────────────────────────────────────────────
    pub fn person_style(sex: Sex) -> Style {
        match sex {
            Sex::Male => Style::default().fg(Color::Blue),
            Sex::Female => Style::default().fg(Color::Red),
        }
    }

    pub fn highlighted_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn empty_state_style() -> Style {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::ITALIC)
    }

    // ── input ──────────────────────────────────────────────────
    pub fn placeholder_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn cursor_style() -> Style {
        Style::default().bg(Color::White).fg(Color::Black)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
