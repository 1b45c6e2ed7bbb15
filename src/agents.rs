//! Agents: where player decisions come from.
//!
//! The game never reads input itself. On every turn it builds a [`TurnView`]
//! and asks an [`ActionProvider`] for an [`Action`]; rejected actions are
//! reported back through [`ActionProvider::on_rejected`] and asked for again.
//! [`AgentTable`] routes each seat to its own provider so humans and bots can
//! share a table.

use crate::game::{HandSummary, Phase};
use crate::player::{Action, BetError, Player, RoundState};
use core::fmt;
use std::collections::VecDeque;
use tracing::{event, Level};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// What an agent may look at when deciding: its own seat in full, the
/// shared wagering state, and the other seats.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub player: &'a Player,
    pub round: RoundState,
    pub phase: Phase,
    pub table: &'a [Player],
}

impl TurnView<'_> {
    /// Chips the acting player must add to stay in.
    pub fn to_match(&self) -> u64 {
        self.player.to_match(&self.round)
    }

    /// Players still in the hand, the actor included.
    pub fn active_players(&self) -> usize {
        self.table.iter().filter(|p| !p.folded()).count()
    }
}

/// A source of decisions for one or more seats.
pub trait ActionProvider {
    /// Choose an action for `view.player`.
    fn next_action(&mut self, view: &TurnView<'_>) -> Action;
    /// The last action was illegal; the same player will be asked again.
    fn on_rejected(&mut self, _view: &TurnView<'_>, _error: &BetError) {}
    /// The pot has been paid out.
    fn on_hand_complete(&mut self, _summary: &HandSummary) {}
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

mod bots;
mod console;

pub use bots::{BotAgent, BotProfile, Difficulty};
pub use console::{ConsoleAgent, StdinLines};

/// Checks when it can, otherwise matches the table, folding only when the
/// stack is too short to match.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgent;

impl ActionProvider for CallingAgent {
    fn next_action(&mut self, view: &TurnView<'_>) -> Action {
        match view.to_match() {
            0 => Action::Check,
            n if n > view.player.chips() => Action::Fold,
            n => wager(n),
        }
    }
}

/// Folds every time it is asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingAgent;

impl ActionProvider for FoldingAgent {
    fn next_action(&mut self, _view: &TurnView<'_>) -> Action {
        Action::Fold
    }
}

/// Plays back a fixed list of actions in order, regardless of seat, then
/// repeats a fallback once the list runs out.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    queue: VecDeque<Action>,
    fallback: Action,
    rejections: usize,
}

impl ScriptedAgent {
    pub fn new<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        Self { queue: actions.into_iter().collect(), fallback: Action::Check, rejections: 0 }
    }

    pub fn with_fallback(mut self, fallback: Action) -> Self {
        self.fallback = fallback;
        self
    }

    /// Scripted actions not yet used.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// How many scripted actions the game refused.
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl ActionProvider for ScriptedAgent {
    fn next_action(&mut self, _view: &TurnView<'_>) -> Action {
        self.queue.pop_front().unwrap_or(self.fallback)
    }

    fn on_rejected(&mut self, _view: &TurnView<'_>, _error: &BetError) {
        self.rejections += 1;
    }
}

/// Wraps a closure as a provider.
pub struct FnAgent<F> {
    decide: F,
}

impl<F> FnAgent<F>
where
    F: FnMut(&TurnView<'_>) -> Action,
{
    pub fn new(decide: F) -> Self {
        Self { decide }
    }
}

impl<F> ActionProvider for FnAgent<F>
where
    F: FnMut(&TurnView<'_>) -> Action,
{
    fn next_action(&mut self, view: &TurnView<'_>) -> Action {
        (self.decide)(view)
    }
}

/// One optional provider per seat. Seats without one fold.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn ActionProvider>>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Human) => 'H',
                Some(AgentKind::Bot) => 'B',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn ActionProvider>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    pub fn with_agent(mut self, seat: usize, agent: impl ActionProvider + 'static) -> Self {
        self.set_agent(seat, Some(Box::new(agent)));
        self
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).is_some_and(|a| a.is_some())
    }

    /// Whether any human agents are seated.
    pub fn any_humans(&self) -> bool {
        (0..self.seats.len()).any(|s| self.agent_kind(s) == Some(AgentKind::Human))
    }

    fn agent_mut(&mut self, seat: usize) -> Option<&mut (dyn ActionProvider + 'static)> {
        self.seats.get_mut(seat).and_then(|a| a.as_deref_mut())
    }
}

impl ActionProvider for AgentTable {
    fn next_action(&mut self, view: &TurnView<'_>) -> Action {
        let seat = view.player.seat();
        match self.agent_mut(seat) {
            Some(agent) => agent.next_action(view),
            None => {
                event!(Level::WARN, seat, "no agent seated, folding");
                Action::Fold
            }
        }
    }

    fn on_rejected(&mut self, view: &TurnView<'_>, error: &BetError) {
        if let Some(agent) = self.agent_mut(view.player.seat()) {
            agent.on_rejected(view, error);
        }
    }

    fn on_hand_complete(&mut self, summary: &HandSummary) {
        for agent in self.seats.iter_mut().filter_map(|a| a.as_deref_mut()) {
            agent.on_hand_complete(summary);
        }
    }
}

/// A wager of `amount` chips.
pub(crate) fn wager(amount: u64) -> Action {
    Action::Bet(i64::try_from(amount).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;

    fn view_of<'a>(table: &'a [Player], seat: usize, round: RoundState) -> TurnView<'a> {
        TurnView { player: &table[seat], round, phase: Phase::Waiting, table }
    }

    #[test]
    fn calling_agent_matches_or_folds() {
        let table = vec![Player::new(0, "A", 100), Player::new(1, "B", 30)];
        let quiet = RoundState::default();
        assert_eq!(CallingAgent.next_action(&view_of(&table, 0, quiet)), Action::Check);

        let facing = RoundState { pot: 50, bet_to_match: 50 };
        assert_eq!(CallingAgent.next_action(&view_of(&table, 0, facing)), Action::Bet(50));
        assert_eq!(CallingAgent.next_action(&view_of(&table, 1, facing)), Action::Fold);
    }

    #[test]
    fn scripted_agent_falls_back() {
        let table = vec![Player::new(0, "A", 100)];
        let view = view_of(&table, 0, RoundState::default());
        let mut agent = ScriptedAgent::new([Action::Bet(5)]).with_fallback(Action::Fold);
        assert_eq!(agent.next_action(&view), Action::Bet(5));
        assert_eq!(agent.remaining(), 0);
        assert_eq!(agent.next_action(&view), Action::Fold);
    }

    #[test]
    fn table_routes_by_seat() {
        let mut agents = AgentTable::for_seats(3)
            .with_agent(0, ScriptedAgent::new([Action::Bet(7)]))
            .with_agent(1, CallingAgent);
        let table =
            vec![Player::new(0, "A", 100), Player::new(1, "B", 100), Player::new(2, "C", 100)];
        let round = RoundState::default();
        assert_eq!(agents.next_action(&view_of(&table, 0, round)), Action::Bet(7));
        assert_eq!(agents.next_action(&view_of(&table, 1, round)), Action::Check);
        assert_eq!(agents.next_action(&view_of(&table, 2, round)), Action::Fold);
        assert!(agents.has_agent(1));
        assert!(!agents.has_agent(2));
        assert_eq!(format!("{agents:?}"), "AgentTable(BB-)");
    }

    #[test]
    fn table_plays_a_full_hand() {
        let mut game = Game::new(GameConfig::new(3).with_seed(11)).unwrap();
        let mut agents = AgentTable::for_seats(3)
            .with_agent(0, CallingAgent)
            .with_agent(1, CallingAgent)
            .with_agent(2, FoldingAgent);
        let summary = game.play_one_hand(&mut agents).unwrap();
        assert_ne!(summary.winner_seat, 2);
        assert_eq!(summary.showdown.len(), 2);
    }
}
