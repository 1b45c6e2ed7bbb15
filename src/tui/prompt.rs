use crate::agents::wager;
use crate::player::Action;
use crossterm::event::KeyCode;

/// What a key press did to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PromptOutcome {
    Pending,
    Submit(Action),
    Quit,
}

/// Key handling for one turn, kept apart from the terminal so it can be
/// driven directly.
///
/// `C` checks, `F` folds, `B` opens an amount entry prefilled with what is
/// owed, `?` toggles help and `Q` quits. Inside the entry, digits and
/// Backspace edit, `+`/`-` step by the bet unit, Enter submits and Esc
/// cancels.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    to_match: u64,
    step: u64,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    help_open: bool,
}

impl Prompt {
    const MAX_DIGITS: usize = 12;

    pub fn new(to_match: u64, step: u64) -> Self {
        Self { to_match, step: step.max(1), ..Self::default() }
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn to_match(&self) -> u64 {
        self.to_match
    }

    pub fn handle_key(&mut self, code: KeyCode) -> PromptOutcome {
        if self.help_open {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
                self.help_open = false;
            }
            return PromptOutcome::Pending;
        }
        if self.amount_entry.is_some() {
            return self.handle_amount_key(code);
        }
        match code {
            KeyCode::Char('c') | KeyCode::Char('C') => PromptOutcome::Submit(Action::Check),
            KeyCode::Char('f') | KeyCode::Char('F') => PromptOutcome::Submit(Action::Fold),
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.open_amount_entry();
                PromptOutcome::Pending
            }
            KeyCode::Char('?') => {
                self.help_open = true;
                PromptOutcome::Pending
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => PromptOutcome::Quit,
            _ => PromptOutcome::Pending,
        }
    }

    fn handle_amount_key(&mut self, code: KeyCode) -> PromptOutcome {
        match code {
            KeyCode::Esc => self.amount_entry_cancel(),
            KeyCode::Enter => return self.amount_entry_submit(),
            KeyCode::Backspace => self.amount_entry_backspace(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.amount_entry_adjust(1),
            KeyCode::Char('-') => self.amount_entry_adjust(-1),
            KeyCode::Char(c) => {
                if let Some(d) = c.to_digit(10) {
                    self.amount_entry_push_digit(d);
                }
            }
            _ => {}
        }
        PromptOutcome::Pending
    }

    fn open_amount_entry(&mut self) {
        let start = if self.to_match == 0 { self.step } else { self.to_match };
        self.amount_entry = Some(start.to_string());
        self.amount_entry_error = None;
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_push_digit(&mut self, digit: u32) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() >= Self::MAX_DIGITS {
                return;
            }
            if buf == "0" {
                buf.clear();
            }
            buf.extend(char::from_digit(digit, 10));
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_adjust(&mut self, direction: i8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<u64>().unwrap_or(0);
            let next = if direction > 0 {
                cur.saturating_add(self.step)
            } else {
                cur.saturating_sub(self.step)
            };
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> PromptOutcome {
        let Some(buf) = self.amount_entry.as_ref() else {
            return PromptOutcome::Pending;
        };
        match buf.parse::<u64>() {
            Ok(amount) => {
                self.amount_entry = None;
                self.amount_entry_error = None;
                PromptOutcome::Submit(wager(amount))
            }
            Err(_) => {
                self.amount_entry_error = Some("Enter an amount".to_string());
                PromptOutcome::Pending
            }
        }
    }

    fn amount_entry_cancel(&mut self) {
        self.amount_entry = None;
        self.amount_entry_error = None;
    }
}
