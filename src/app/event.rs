//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal window regained focus.
    FocusGained,
    Resize(u16, u16),
    Tick,
}

/// Translate a raw crossterm event.  Key releases and repeats are dropped so
/// every keystroke edits the query exactly once.
fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::FocusGained => Some(AppEvent::FocusGained),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => match translate(ev) {
                    Some(app_event) => app_event,
                    None => continue,
                },
                Err(err) => {
                    tracing::warn!("terminal read failed: {err}");
                    continue;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(err) => {
                tracing::warn!("terminal poll failed: {err}");
                AppEvent::Tick
            }
        };
        if tx.send(next).is_err() {
            break; // receiver dropped
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn only_key_presses_pass() {
        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(matches!(translate(CtEvent::Key(press)), Some(AppEvent::Key(_))));
        assert!(translate(CtEvent::Key(release)).is_none());
    }

    #[test]
    fn focus_gained_is_forwarded_and_lost_is_not() {
        assert!(matches!(
            translate(CtEvent::FocusGained),
            Some(AppEvent::FocusGained)
        ));
        assert!(translate(CtEvent::FocusLost).is_none());
    }
}
