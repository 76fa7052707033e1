//! Interactive file selection.
//!
//! Candidates are shown as a full-screen checkbox list. Files changed since
//! the diff reference start checked.
//!
//! - Up/Down (or k/j) move one row, PgUp/PgDn move ten, Home/End jump to the ends
//! - Space toggles the focused row
//! - Enter confirms, Esc or `q` cancels with an empty selection
//! - Ctrl-C aborts the run with [`BundleError::Interrupted`]

pub mod state;
pub mod terminal;

pub use state::{build_choices, ChecklistState, Choice, PAGE_JUMP};
pub use terminal::TerminalSelector;

use crate::errors::BundleError;

/// Turns a list of choices into the user's selection.
pub trait Selector {
    /// Returns checked labels in display order; an empty list means nothing
    /// was selected or the user cancelled.
    fn select(&mut self, choices: Vec<Choice>) -> Result<Vec<String>, BundleError>;
}
