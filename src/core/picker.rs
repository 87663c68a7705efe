//! The picker state machine.
//!
//! [`PickerState`] is an immutable snapshot.  [`transition`] is a pure
//! function from a snapshot and an input to the next snapshot plus the side
//! effects the owner must carry out (timers, notifications).  The owner
//! assigns the new snapshot in one step, so nothing here knows about the
//! terminal, the clock, or the event loop.

use super::filter::filter_people;
use super::person::Person;

/// Coarse phase of the picker, mostly useful for logging and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing typed yet.
    #[default]
    Idle,
    /// The raw query changed and a debounce is pending.
    Typing,
    /// The debounced query caught up with the raw query.
    Debounced,
    /// A person was picked and the raw query still equals their name.
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerState {
    pub phase: Phase,
    /// Raw text in the input, updated on every keystroke.
    pub query: String,
    /// Last value that stayed unchanged for a full debounce window.  `None`
    /// after a pick, so the next settled value always recomputes.
    pub debounced: Option<String>,
    /// People currently offered, in source order.
    pub candidates: Vec<Person>,
    /// Invariant: when set, `selection.name == query`.
    pub selection: Option<Person>,
}

impl PickerState {
    /// State right after mount: empty query, so every person is a candidate.
    pub fn initial(people: &[Person]) -> Self {
        Self {
            debounced: Some(String::new()),
            candidates: filter_people(people, ""),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerInput {
    /// The raw query was edited to this text.
    Edit(String),
    /// The debounce timer settled on this text.
    DebounceElapsed(String),
    /// The input gained focus.
    Focus,
    /// The user picked this person from the candidates.
    Pick(Person),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the debounce timer for this value, replacing any pending one.
    ScheduleDebounce(String),
    /// Drop any pending debounce timer.
    CancelDebounce,
    /// Tell the owner the effective selection changed.
    Notify(Option<Person>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PickerState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &PickerState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Compute the next picker state for `input`.
pub fn transition(state: &PickerState, people: &[Person], input: PickerInput) -> Transition {
    match input {
        PickerInput::Edit(text) => edit(state, text),
        PickerInput::DebounceElapsed(text) => settle(state, people, text),
        PickerInput::Focus => focus(state, people),
        PickerInput::Pick(person) => pick(state, person),
    }
}

fn edit(state: &PickerState, text: String) -> Transition {
    if text == state.query {
        return Transition::unchanged(state);
    }

    let mut next = state.clone();
    let mut effects = vec![Effect::ScheduleDebounce(text.clone())];
    next.query = text;
    next.phase = Phase::Typing;

    // Any edit that moves the query away from the picked name drops the pick.
    if next
        .selection
        .as_ref()
        .is_some_and(|picked| picked.name != next.query)
    {
        next.selection = None;
        effects.push(Effect::Notify(None));
    }

    Transition {
        state: next,
        effects,
    }
}

fn settle(state: &PickerState, people: &[Person], text: String) -> Transition {
    let mut next = state.clone();
    if state.debounced.as_deref() != Some(text.as_str()) {
        next.candidates = filter_people(people, &text);
        next.debounced = Some(text);
    }
    next.phase = if next.selection.is_some() {
        Phase::Selected
    } else {
        Phase::Debounced
    };
    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn focus(state: &PickerState, people: &[Person]) -> Transition {
    if !state.query.trim().is_empty() {
        return Transition::unchanged(state);
    }
    let mut next = state.clone();
    next.candidates = filter_people(people, "");
    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn pick(state: &PickerState, person: Person) -> Transition {
    // The query jumps straight to the picked name and the list stays closed
    // until the next settled value.  The name never went through the debounce
    // window, so no settled value is recorded.
    let next = PickerState {
        phase: Phase::Selected,
        query: person.name.clone(),
        debounced: None,
        candidates: Vec::new(),
        selection: Some(person.clone()),
    };
    let mut effects = Vec::with_capacity(2);
    if state.phase == Phase::Typing {
        effects.push(Effect::CancelDebounce);
    }
    effects.push(Effect::Notify(Some(person)));
    Transition {
        state: next,
        effects,
    }
}
