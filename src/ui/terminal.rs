use std::io::{self, stdout, Write};

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use tracing::debug;

use super::state::{ChecklistState, Choice};
use super::Selector;
use crate::errors::BundleError;

/// Header line plus one spare row at the bottom.
const CHROME_ROWS: u16 = 2;

/// What a key press asks the event loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Confirm,
    Cancel,
    Interrupt,
}

/// Leaves raw mode and the alternate screen when dropped.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(LeaveAlternateScreen);
    }
}

/// Switches `out` to the alternate screen and raw mode. The guard exists as
/// soon as the alternate screen is entered, so a later failure still restores it.
fn enter_terminal<W: Write>(
    mut out: W,
    enable_raw: impl FnOnce() -> io::Result<()>,
) -> Result<TerminalGuard<W>, BundleError> {
    out.execute(EnterAlternateScreen).map_err(terminal_error)?;
    let mut guard = TerminalGuard { out };
    enable_raw().map_err(terminal_error)?;
    guard.out.execute(cursor::Hide).map_err(terminal_error)?;
    Ok(guard)
}

/// Full-screen checkbox list drawn with crossterm.
#[derive(Default)]
pub struct TerminalSelector;

impl TerminalSelector {
    pub fn new() -> Self {
        TerminalSelector
    }
}

impl Selector for TerminalSelector {
    fn select(&mut self, choices: Vec<Choice>) -> Result<Vec<String>, BundleError> {
        let (width, height) = terminal::size().map_err(terminal_error)?;
        let mut state = ChecklistState::new(choices, height.saturating_sub(CHROME_ROWS) as usize);
        let mut width = width;

        let _terminal_guard = enter_terminal(stdout(), enable_raw_mode)?;

        loop {
            redraw(&state, width)?;

            match event::read()? {
                Event::Key(key_event) => match handle_key(key_event, &mut state) {
                    KeyAction::Continue => {}
                    KeyAction::Confirm => {
                        debug!("Selection confirmed with {} files", state.checked_count());
                        return Ok(state.checked_labels());
                    }
                    KeyAction::Cancel => {
                        debug!("Selection cancelled");
                        return Ok(Vec::new());
                    }
                    KeyAction::Interrupt => return Err(BundleError::Interrupted),
                },
                Event::Resize(new_width, new_height) => {
                    width = new_width;
                    state.set_height(new_height.saturating_sub(CHROME_ROWS) as usize);
                }
                _ => {}
            }
        }
    }
}

fn terminal_error(err: io::Error) -> BundleError {
    BundleError::TerminalError(err.to_string())
}

/// Applies a key press to `state`.
pub fn handle_key(key_event: KeyEvent, state: &mut ChecklistState) -> KeyAction {
    if key_event.kind == KeyEventKind::Release {
        return KeyAction::Continue;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Interrupt
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            KeyAction::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            KeyAction::Continue
        }
        KeyCode::PageUp => {
            state.page_up();
            KeyAction::Continue
        }
        KeyCode::PageDown => {
            state.page_down();
            KeyAction::Continue
        }
        KeyCode::Home => {
            state.move_first();
            KeyAction::Continue
        }
        KeyCode::End => {
            state.move_last();
            KeyAction::Continue
        }
        KeyCode::Char(' ') => {
            state.toggle_focused();
            KeyAction::Continue
        }
        KeyCode::Enter => KeyAction::Confirm,
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Cancel,
        _ => KeyAction::Continue,
    }
}

fn redraw(state: &ChecklistState, width: u16) -> Result<(), BundleError> {
    let mut stdout = stdout();
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(state, width)?;

    for (row, (index, choice)) in state.visible().enumerate() {
        print_choice(row as u16 + 1, choice, index == state.focused(), width)?;
    }

    stdout.flush()?;
    Ok(())
}

fn print_header(state: &ChecklistState, width: u16) -> Result<(), BundleError> {
    let mut stdout = stdout();
    let instructions = format!(
        "  ↑/↓ move  PgUp/PgDn page  space toggle  enter confirm  esc cancel   |   {}/{}   |   {} checked",
        state.focused() + 1,
        state.len(),
        state.checked_count()
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(fit_to_width(&instructions, width)),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;
    Ok(())
}

fn print_choice(
    row: u16,
    choice: &Choice,
    is_focused: bool,
    width: u16,
) -> Result<(), BundleError> {
    let mut stdout = stdout();
    let mark = if choice.checked { "[x]" } else { "[ ]" };
    let content = format!("{mark} {}", choice.label);

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
    if is_focused {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    }
    queue!(
        stdout,
        Print(fit_to_width(&content, width)),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;
    Ok(())
}

/// Pads or truncates `text` to exactly `width` characters.
fn fit_to_width(text: &str, width: u16) -> String {
    let width = width as usize;
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    if len < width {
        fitted.push_str(&" ".repeat(width - len));
    }
    fitted
}
