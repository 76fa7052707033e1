//! Checkbox list state: focus, viewport and checked flags.
//!
//! Kept free of terminal I/O so navigation rules can be exercised directly.

use crate::filter::Candidate;
use std::collections::HashSet;

/// Rows moved by a single page-up/page-down.
pub const PAGE_JUMP: usize = 10;

/// One row of the checkbox list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub checked: bool,
}

impl Choice {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Choice {
            label: label.into(),
            checked,
        }
    }
}

/// Builds choices in candidate order, checking those in `prechecked`.
pub fn build_choices(candidates: &[Candidate], prechecked: &HashSet<Candidate>) -> Vec<Choice> {
    candidates
        .iter()
        .map(|candidate| Choice::new(candidate.clone(), prechecked.contains(candidate)))
        .collect()
}

/// Focus and viewport over a list of choices.
///
/// `focused` always lies in `[0, len - 1]` for a non-empty list and the
/// viewport always contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistState {
    choices: Vec<Choice>,
    focused: usize,
    offset: usize,
    height: usize,
}

impl ChecklistState {
    pub fn new(choices: Vec<Choice>, height: usize) -> Self {
        ChecklistState {
            choices,
            focused: 0,
            offset: 0,
            height: height.max(1),
        }
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn move_up(&mut self) {
        self.move_to(self.focused.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.move_to(self.focused.saturating_add(1));
    }

    pub fn page_up(&mut self) {
        self.move_to(self.focused.saturating_sub(PAGE_JUMP));
    }

    pub fn page_down(&mut self) {
        self.move_to(self.focused.saturating_add(PAGE_JUMP));
    }

    pub fn move_first(&mut self) {
        self.move_to(0);
    }

    pub fn move_last(&mut self) {
        self.move_to(self.choices.len().saturating_sub(1));
    }

    pub fn toggle_focused(&mut self) {
        if let Some(choice) = self.choices.get_mut(self.focused) {
            choice.checked = !choice.checked;
        }
    }

    pub fn checked_count(&self) -> usize {
        self.choices.iter().filter(|c| c.checked).count()
    }

    /// Labels of checked rows, in display order.
    pub fn checked_labels(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.label.clone())
            .collect()
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll_to_focus();
    }

    /// Rows inside the viewport, paired with their absolute index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Choice)> {
        self.choices
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.height)
    }

    fn move_to(&mut self, target: usize) {
        if self.choices.is_empty() {
            return;
        }
        self.focused = target.min(self.choices.len() - 1);
        self.scroll_to_focus();
    }

    fn scroll_to_focus(&mut self) {
        if self.focused < self.offset {
            self.offset = self.focused;
        } else if self.focused >= self.offset + self.height {
            self.offset = self.focused + 1 - self.height;
        }
        let max_offset = self.choices.len().saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }
}
