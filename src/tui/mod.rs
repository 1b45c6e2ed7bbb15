//! Full-screen terminal front end.
//!
//! [`TuiSession`] owns the terminal for as long as it lives and restores it
//! on drop. [`TuiAgent`] is an [`ActionProvider`] that draws the table and
//! blocks on key presses until the seated human picks an action.

mod layout;
pub mod prompt;
mod table;

use crate::agents::{ActionProvider, AgentKind, TurnView};
use crate::cards::Card;
use crate::game::{HandSummary, Phase};
use crate::player::{Action, BetError};
use crossterm::event::{self as term_event, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::rc::Rc;
use tracing::{event, Level};

pub use prompt::{Prompt, PromptOutcome};

/// One seat as the acting player is allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub chips: u64,
    pub bet: u64,
    pub folded: bool,
    pub acting: bool,
    pub winner: bool,
    /// Face-up cards; empty for everyone but the acting player.
    pub cards: Vec<Card>,
    pub card_count: usize,
    pub rank_label: Option<&'static str>,
}

/// Everything the table screen draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub seats: Vec<SeatView>,
    pub pot: u64,
    pub bet_to_match: u64,
    pub phase: Phase,
    pub log: Vec<String>,
}

impl TableSnapshot {
    pub fn from_view(view: &TurnView<'_>) -> Self {
        let acting = view.player.seat();
        let seats = view
            .table
            .iter()
            .map(|p| SeatView {
                seat: p.seat(),
                name: p.name().to_string(),
                chips: p.chips(),
                bet: p.bet(),
                folded: p.folded(),
                acting: p.seat() == acting,
                winner: false,
                cards: if p.seat() == acting { p.hand().cards().to_vec() } else { Vec::new() },
                card_count: p.hand().len(),
                rank_label: None,
            })
            .collect();
        Self {
            seats,
            pot: view.round.pot,
            bet_to_match: view.round.bet_to_match,
            phase: view.phase,
            log: Vec::new(),
        }
    }

    /// Mark the winner, reveal showdown ranks and show the stacks after the
    /// payout; nobody is acting any more.
    pub fn apply_summary(&mut self, summary: &HandSummary) {
        self.phase = Phase::Showdown;
        self.pot = 0;
        for seat in &mut self.seats {
            seat.acting = false;
            seat.winner = seat.seat == summary.winner_seat;
            if let Some((_, chips)) = summary.stacks.iter().find(|(s, _)| *s == seat.seat) {
                seat.chips = *chips;
            }
            seat.bet = 0;
            seat.rank_label = summary
                .showdown
                .iter()
                .find(|(s, _)| *s == seat.seat)
                .map(|(_, rank)| rank.label());
        }
    }

    fn acting_name(&self) -> Option<&str> {
        self.seats.iter().find(|s| s.acting).map(|s| s.name.as_str())
    }
}

/// The terminal in raw mode on the alternate screen, plus a quit flag shared
/// by every agent drawing on it.
pub struct TuiSession {
    terminal: RefCell<Terminal<CrosstermBackend<Stdout>>>,
    quit: Cell<bool>,
}

impl TuiSession {
    pub fn start() -> io::Result<Rc<Self>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Rc::new(Self { terminal: RefCell::new(terminal), quit: Cell::new(false) }))
    }

    /// Whether a player asked to leave.
    pub fn quit_requested(&self) -> bool {
        self.quit.get()
    }

    fn draw(&self, table: &TableSnapshot, prompt: Option<&Prompt>) -> io::Result<()> {
        self.terminal.borrow_mut().draw(|f| table::draw_table(f, table, prompt))?;
        Ok(())
    }

    fn next_key(&self) -> io::Result<KeyCode> {
        loop {
            if let Event::Key(key) = term_event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code);
                }
            }
        }
    }

    fn restore(&self) -> io::Result<()> {
        disable_raw_mode()?;
        let mut terminal = self.terminal.borrow_mut();
        crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            event!(Level::ERROR, error = %e, "failed to restore terminal");
        }
    }
}

/// A human seat played through the full-screen table.
pub struct TuiAgent {
    session: Rc<TuiSession>,
    bet_unit: u64,
    log: VecDeque<String>,
    last_table: Option<TableSnapshot>,
}

impl TuiAgent {
    const LOG_LINES: usize = 5;

    pub fn new(session: Rc<TuiSession>, bet_unit: u64) -> Self {
        Self { session, bet_unit, log: VecDeque::new(), last_table: None }
    }

    fn note(&mut self, line: String) {
        if self.log.len() == Self::LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    fn snapshot(&self, view: &TurnView<'_>) -> TableSnapshot {
        let mut table = TableSnapshot::from_view(view);
        table.log = self.log.iter().cloned().collect();
        table
    }

    fn ask(&mut self, view: &TurnView<'_>) -> io::Result<Action> {
        let table = self.snapshot(view);
        let mut prompt = Prompt::new(view.to_match(), self.bet_unit);
        loop {
            self.session.draw(&table, Some(&prompt))?;
            match prompt.handle_key(self.session.next_key()?) {
                PromptOutcome::Pending => {}
                PromptOutcome::Submit(action) => {
                    self.last_table = Some(table);
                    return Ok(action);
                }
                PromptOutcome::Quit => {
                    self.session.quit.set(true);
                    return Ok(Action::Fold);
                }
            }
        }
    }

    fn show_summary(&mut self, summary: &HandSummary) -> io::Result<()> {
        let Some(mut table) = self.last_table.take() else {
            return Ok(());
        };
        table.apply_summary(summary);
        table.log = self.log.iter().cloned().collect();
        self.session.draw(&table, None)?;
        if matches!(self.session.next_key()?, KeyCode::Char('q') | KeyCode::Char('Q')) {
            self.session.quit.set(true);
        }
        Ok(())
    }
}

impl ActionProvider for TuiAgent {
    fn next_action(&mut self, view: &TurnView<'_>) -> Action {
        if self.session.quit_requested() {
            return Action::Fold;
        }
        match self.ask(view) {
            Ok(action) => action,
            Err(e) => {
                event!(Level::ERROR, error = %e, "terminal input failed, folding");
                self.session.quit.set(true);
                Action::Fold
            }
        }
    }

    fn on_rejected(&mut self, view: &TurnView<'_>, error: &BetError) {
        self.note(format!("{}: {error}", view.player.name()));
    }

    fn on_hand_complete(&mut self, summary: &HandSummary) {
        self.note(summary.to_string());
        for name in &summary.eliminated {
            self.note(format!("{name} is out of chips."));
        }
        if self.session.quit_requested() {
            return;
        }
        if let Err(e) = self.show_summary(summary) {
            event!(Level::ERROR, error = %e, "terminal draw failed");
            self.session.quit.set(true);
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}
