//! A terminal autocomplete for picking a person from a list.
//!
//! Type part of a name; matching people appear once typing pauses.  Pick one
//! with Enter or a click.  On exit the selected person is printed to stdout.

mod app;
mod config;
mod core;
mod logging;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::{
    debounce::{Debouncer, Settled},
    person,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Pick a person by typing part of their name")]
struct Cli {
    /// Milliseconds the query must stay unchanged before the list is
    /// filtered (overrides the config file; default 300).
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    delay: Option<i64>,

    /// JSON file with the people to pick from (defaults to the built-in list).
    #[arg(long, value_name = "FILE")]
    people: Option<PathBuf>,

    /// Write tracing output to this file (defaults to the state directory;
    /// set `RUST_LOG` to choose the level).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref())?;

    let mut user_config = config::AppConfig::load();
    if let Some(ms) = cli.delay {
        // Non-positive delays fire on the next tick instead of being rejected.
        user_config.debounce_ms = ms.max(0) as u64;
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── load people before touching the terminal ──────────────
    let people = match &cli.people {
        Some(path) => person::load_people(path)?,
        None => person::builtin_people().context("loading built-in people")?,
    };
    tracing::info!(
        count = people.len(),
        debounce_ms = user_config.debounce_ms,
        "starting picker"
    );

    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel();
    let mut state = AppState::new(people, user_config, Debouncer::new(settled_tx));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let outcome = run_event_loop(&mut terminal, &mut state, &mut settled_rx).await;

    // ── teardown ──────────────────────────────────────────────
    state.debouncer.cancel();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;
    outcome?;

    print_selection(&mut io::stdout(), state.selected_person.as_ref())?;
    Ok(())
}

// ───────────────────────────────────────── event loop ───────

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    settled_rx: &mut mpsc::UnboundedReceiver<Settled<String>>,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            ui::screen::draw(frame, state);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::FocusGained => handler::handle_focus_gained(state),
                    AppEvent::Resize(_, _) | AppEvent::Tick => {}
                }
            }

            Some(settled) = settled_rx.recv() => {
                handler::handle_settled(state, settled);
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

/// Emit the final selection for whoever launched the picker.
fn print_selection(out: &mut impl io::Write, selected: Option<&person::Person>) -> io::Result<()> {
    match selected {
        Some(p) => writeln!(out, "{p}"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    use crate::ui::{header::NO_SELECTION, input::PLACEHOLDER, suggestions::NO_SUGGESTIONS};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|frame| ui::screen::draw(frame, state)).unwrap();
        screen_text(&terminal)
    }

    fn test_state() -> AppState {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        AppState::new(
            person::builtin_people().unwrap(),
            config::AppConfig::default(),
            Debouncer::new(tx),
        )
    }

    #[test]
    fn initial_screen_shows_placeholder_and_everyone() {
        let state = test_state();
        let text = draw(&state);
        assert!(text.contains(NO_SELECTION));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Carolus Haverbeke"));
    }

    #[test]
    fn selection_is_shown_in_header() {
        let mut state = test_state();
        let first = state.people[0].clone();
        state.picker.query = first.name.clone();
        state.picker.candidates.clear();
        state.selected_person = Some(first);
        let text = draw(&state);
        assert!(text.contains("Carolus Haverbeke (1832 - 1905)"));
        assert!(text.contains(NO_SUGGESTIONS));
    }

    #[test]
    fn printed_selection() {
        let people = person::builtin_people().unwrap();
        let mut out = Vec::new();
        print_selection(&mut out, Some(&people[1])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Emma de Milliano (1876 - 1956)\n");

        let mut out = Vec::new();
        print_selection(&mut out, None).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn cli_accepts_negative_delay() {
        let cli = Cli::try_parse_from(["people-picker", "--delay", "-5"]).unwrap();
        assert_eq!(cli.delay, Some(-5));
    }
}
