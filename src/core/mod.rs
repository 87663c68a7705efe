//! Core logic – people records, filtering, debouncing, and the picker state
//! machine.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod debounce;
pub mod filter;
pub mod person;
pub mod picker;
