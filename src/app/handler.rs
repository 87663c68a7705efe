//! Input handling. Maps key/mouse events to picker transitions, then carries
//! out the effects each transition asks for.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::debounce::Settled;
use crate::core::person::Person;
use crate::core::picker::{self, Effect, PickerInput, Transition};
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::suggestions::scroll_offset;

use super::state::{AppState, PaneFocus};

/// Run one picker transition and apply its effects.
pub fn dispatch(state: &mut AppState, input: PickerInput) {
    tracing::debug!(
        ?input,
        phase = ?state.picker.phase,
        debounce_pending = state.debouncer.is_pending(),
        "picker input"
    );
    let Transition { state: next, effects } = picker::transition(&state.picker, &state.people, input);

    if next.candidates != state.picker.candidates {
        state.highlighted = 0;
    }
    state.picker = next;

    for effect in effects {
        match effect {
            Effect::ScheduleDebounce(value) => state.debouncer.schedule(value, state.debounce_delay),
            Effect::CancelDebounce => state.debouncer.cancel(),
            Effect::Notify(person) => notify_selected(state, person),
        }
    }
}

/// Report a selection change to the owner of the picker (the header).
fn notify_selected(state: &mut AppState, person: Option<Person>) {
    match &person {
        Some(p) => {
            tracing::info!(slug = %p.slug, "person selected");
            state.status_message = Some(format!("Selected {p}"));
        }
        None => {
            tracing::info!("selection cleared");
            state.status_message = None;
        }
    }
    state.selected_person = person;
}

/// A debounce timer fired.  Stale deliveries are dropped by the debouncer.
pub fn handle_settled(state: &mut AppState, settled: Settled<String>) {
    if let Some(value) = state.debouncer.accept(settled) {
        dispatch(state, PickerInput::DebounceElapsed(value));
    }
}

/// The terminal window regained focus.  Counts as focusing the input when the
/// input is the active pane.
pub fn handle_focus_gained(state: &mut AppState) {
    if state.focus == PaneFocus::Input {
        dispatch(state, PickerInput::Focus);
    }
}

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if let Some(action) = state.config.match_key(key) {
        run_action(state, action);
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => match state.focus {
            PaneFocus::Input => state.focus = PaneFocus::Suggestions,
            PaneFocus::Suggestions => focus_input(state),
        },
        KeyCode::Backspace => {
            focus_input(state);
            let mut query = state.picker.query.clone();
            query.pop();
            dispatch(state, PickerInput::Edit(query));
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            focus_input(state);
            let mut query = state.picker.query.clone();
            query.push(c);
            dispatch(state, PickerInput::Edit(query));
        }
        _ => {}
    }
}

fn run_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => {
            state.highlighted = state.highlighted.saturating_sub(1);
        }
        Action::MoveDown => {
            if state.highlighted + 1 < state.picker.candidates.len() {
                state.highlighted += 1;
            }
        }
        Action::Pick => pick_highlighted(state),
        Action::ClearQuery => {
            focus_input(state);
            dispatch(state, PickerInput::Edit(String::new()));
        }
        Action::Quit => state.should_quit = true,
    }
}

fn pick_highlighted(state: &mut AppState) {
    if let Some(person) = state.highlighted_candidate().cloned() {
        dispatch(state, PickerInput::Pick(person));
        state.focus = PaneFocus::Input;
    }
}

/// Move keyboard focus to the input, firing the focus transition only when
/// focus actually moves.
fn focus_input(state: &mut AppState) {
    if state.focus != PaneFocus::Input {
        state.focus = PaneFocus::Input;
        dispatch(state, PickerInput::Focus);
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);
    let rows = layout.list_rows();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.input_area, mouse.column, mouse.row) {
                focus_input(state);
                return;
            }
            if !point_in_rect(rows, mouse.column, mouse.row) {
                return;
            }
            let offset = scroll_offset(state.highlighted, rows.height as usize);
            let clicked = offset + mouse.row.saturating_sub(rows.y) as usize;
            if clicked < state.picker.candidates.len() {
                state.highlighted = clicked;
                pick_highlighted(state);
            }
        }
        MouseEventKind::ScrollUp if point_in_rect(layout.list_area, mouse.column, mouse.row) => {
            run_action(state, Action::MoveUp);
        }
        MouseEventKind::ScrollDown if point_in_rect(layout.list_area, mouse.column, mouse.row) => {
            run_action(state, Action::MoveDown);
        }
        _ => {}
    }
}
