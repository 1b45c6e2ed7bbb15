use crate::agents::{ActionProvider, TurnView};
use crate::config::{ConfigError, GameConfig, MIN_PLAYERS};
use crate::deck::{Deck, DeckError};
use crate::evaluator::HandRank;
use crate::hand::HandError;
use crate::player::{Action, BetError, Player, RoundState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{event, Level};

/// Every player ends the hand holding this many cards.
pub const CARDS_PER_PLAYER: usize = 5;

/// Dealing happens in three rounds, each followed by betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Street {
    Hole,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 3] = [Street::Hole, Street::Turn, Street::River];

    /// Cards each player receives on this street.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Hole | Street::Turn => 2,
            Street::River => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Hole => "hole",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    Waiting,
    Dealing(Street),
    Betting(Street),
    Showdown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Waiting => f.write_str("waiting"),
            Phase::Dealing(s) => write!(f, "dealing {}", s.label()),
            Phase::Betting(s) => write!(f, "betting after {}", s.label()),
            Phase::Showdown => f.write_str("showdown"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("hand error: {0}")]
    Hand(#[from] HandError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("need at least 2 players to play a hand, {0} remain")]
    NotEnoughPlayers(usize),
    #[error("every player folded")]
    NoContenders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    Deal,
    Check,
    Call,
    Bet,
    Raise,
    Fold,
    ForcedFold,
    Rejected,
    Win,
    Eliminated,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::Deal => "Dealt",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::Raise => "Raise",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::ForcedFold => "Folded by table",
            HandHistoryVerb::Rejected => "Rejected",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Eliminated => "Out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub phase: Phase,
}

/// Result of one hand, handed to every provider once the pot is paid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandSummary {
    /// 1-based count of hands played by this game.
    pub hand_number: usize,
    pub winner_seat: usize,
    pub winner_name: String,
    pub pot: u64,
    /// `None` when everyone else folded before the hand was complete.
    pub winning_rank: Option<HandRank>,
    /// Seat and rank of every player still in at showdown.
    pub showdown: Vec<(usize, HandRank)>,
    /// Names of players who busted out this hand.
    pub eliminated: Vec<String>,
    /// Seat and chip count of everyone dealt in, after the payout.
    pub stacks: Vec<(usize, u64)>,
}

impl fmt::Display for HandSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.winning_rank {
            Some(rank) => write!(
                f,
                "{} won the round with {} and takes {} chips",
                self.winner_name,
                rank.label(),
                self.pot
            ),
            None => write!(f, "{} takes {} chips uncontested", self.winner_name, self.pot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct MatchOutcome {
    pub hands_played: usize,
    /// Seat of the last player standing; `None` if the hand cap stopped play first.
    pub champion: Option<usize>,
    /// Remaining players as `(name, chips)`, in seat order.
    pub standings: Vec<(String, u64)>,
}

/// The table: deck, seated players, and the shared wagering state.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    config: GameConfig,
    deck: Deck,
    players: Vec<Player>,
    round: RoundState,
    phase: Phase,
    rng: ChaCha8Rng,
    hands_played: usize,
    hand_history: Vec<HandHistoryEntry>,
    last_summary: Option<HandSummary>,
}

impl Game {
    /// Seat `config.num_players` players with the configured chips and names.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let players = (0..config.num_players)
            .map(|seat| Player::new(seat, config.name_for(seat), config.starting_chips))
            .collect();
        Ok(Self::assemble(players, config))
    }

    /// Use already constructed players; the config's seat count, chips and
    /// names are ignored.
    pub fn with_players(players: Vec<Player>, config: GameConfig) -> Result<Self, GameError> {
        config.validate_seats(players.len())?;
        Ok(Self::assemble(players, config))
    }

    fn assemble(players: Vec<Player>, config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = Deck::shuffled_with(&mut rng);
        event!(Level::DEBUG, seed, players = players.len(), "table created");
        Self {
            config,
            deck,
            players,
            round: RoundState::default(),
            phase: Phase::Waiting,
            rng,
            hands_played: 0,
            hand_history: Vec::new(),
            last_summary: None,
        }
    }

    /// Returns the configuration the table was built with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the players still seated, in seat order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player in `seat`, if still seated
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Returns the current pot size
    pub fn pot(&self) -> u64 {
        self.round.pot
    }

    /// Returns the amount every active player must have in this betting round
    pub fn bet_to_match(&self) -> u64 {
        self.round.bet_to_match
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn hands_played(&self) -> usize {
        self.hands_played
    }

    /// Returns the summary of the last completed hand
    pub fn last_summary(&self) -> Option<&HandSummary> {
        self.last_summary.as_ref()
    }

    /// Everything recorded during the current (or last) hand.
    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.hand_history
    }

    pub fn history_recent(&self, n: usize) -> Vec<HandHistoryEntry> {
        let start = self.hand_history.len().saturating_sub(n);
        self.hand_history[start..].to_vec()
    }

    /// Players who have not folded this hand.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.folded).count()
    }

    /// Shuffle a fresh deck and play one hand.
    pub fn play_one_hand(
        &mut self,
        provider: &mut dyn ActionProvider,
    ) -> Result<HandSummary, GameError> {
        let deck = Deck::shuffled_with(&mut self.rng);
        self.play_one_hand_with_deck(deck, provider)
    }

    /// Play one hand from a prearranged deck. Cards go out street by street,
    /// each player in seat order taking the street's full count before the
    /// next player.
    pub fn play_one_hand_with_deck(
        &mut self,
        deck: Deck,
        provider: &mut dyn ActionProvider,
    ) -> Result<HandSummary, GameError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers(self.players.len()));
        }
        self.start_hand(deck);
        for street in Street::ALL {
            self.deal_street(street)?;
            self.betting_round(street, provider);
        }
        let summary = self.showdown()?;
        provider.on_hand_complete(&summary);
        Ok(summary)
    }

    /// Play hands until one player holds every chip, or until the configured
    /// hand cap is reached.
    pub fn run_until_one_player_remains(
        &mut self,
        provider: &mut dyn ActionProvider,
    ) -> Result<MatchOutcome, GameError> {
        let start = self.hands_played;
        while self.players.len() > 1 {
            if let Some(cap) = self.config.max_hands {
                if self.hands_played - start >= cap {
                    event!(Level::INFO, cap, "hand cap reached");
                    break;
                }
            }
            self.play_one_hand(provider)?;
        }
        let champion = match self.players.as_slice() {
            [last] => {
                event!(Level::INFO, winner = %last.name, chips = last.chips, "match over");
                Some(last.seat)
            }
            _ => None,
        };
        Ok(MatchOutcome {
            hands_played: self.hands_played - start,
            champion,
            standings: self.players.iter().map(|p| (p.name.clone(), p.chips)).collect(),
        })
    }

    fn start_hand(&mut self, deck: Deck) {
        self.deck = deck;
        self.round = RoundState::default();
        self.hand_history.clear();
        for p in &mut self.players {
            p.reset_for_hand();
        }
        event!(Level::INFO, hand = self.hands_played + 1, players = self.players.len(), "new hand");
    }

    fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        self.phase = Phase::Dealing(street);
        let count = street.cards_dealt();
        for p in &mut self.players {
            self.deck.deal_into(&mut p.hand, count)?;
        }
        let seats: Vec<usize> = self.players.iter().map(|p| p.seat).collect();
        for seat in seats {
            self.record(seat, HandHistoryVerb::Deal, None);
        }
        event!(Level::DEBUG, street = street.label(), left = self.deck.remaining(), "dealt");
        Ok(())
    }

    /// One betting round. Each pass asks every player still in, in seat
    /// order; the round closes after a pass that leaves every active bet
    /// equal to bet-to-match. A round that runs past the configured number
    /// of passes folds whoever is still short.
    fn betting_round(&mut self, street: Street, provider: &mut dyn ActionProvider) {
        self.phase = Phase::Betting(street);
        self.round.reset_round();
        for p in &mut self.players {
            p.bet = 0;
        }

        let mut passes = 0;
        loop {
            if self.active_count() <= 1 {
                return;
            }
            for idx in 0..self.players.len() {
                if self.active_count() <= 1 {
                    return;
                }
                if self.players[idx].folded {
                    continue;
                }
                self.take_turn(idx, provider);
            }
            passes += 1;
            if self.bets_settled() {
                event!(Level::DEBUG, street = street.label(), passes, pot = self.round.pot, "betting closed");
                return;
            }
            if passes >= self.config.max_betting_passes {
                event!(Level::WARN, street = street.label(), passes, "betting pass cap reached");
                self.fold_unmatched();
                return;
            }
        }
    }

    fn bets_settled(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.folded)
            .all(|p| p.bet == self.round.bet_to_match)
    }

    fn fold_unmatched(&mut self) {
        let short: Vec<usize> = (0..self.players.len())
            .filter(|&i| !self.players[i].folded && self.players[i].bet < self.round.bet_to_match)
            .collect();
        for idx in short {
            self.force_fold(idx);
        }
    }

    fn force_fold(&mut self, idx: usize) {
        let seat = self.players[idx].seat;
        self.players[idx].fold();
        event!(Level::WARN, seat, name = %self.players[idx].name, "player folded by the table");
        self.record(seat, HandHistoryVerb::ForcedFold, None);
    }

    fn turn_view(&self, idx: usize) -> TurnView<'_> {
        TurnView {
            player: &self.players[idx],
            round: self.round,
            phase: self.phase,
            table: &self.players,
        }
    }

    /// Ask the provider until it supplies a legal action. Each rejection is
    /// reported back so the same player can try again; after too many the
    /// player is folded.
    fn take_turn(&mut self, idx: usize, provider: &mut dyn ActionProvider) {
        for _ in 0..=self.config.max_action_retries {
            let action = provider.next_action(&self.turn_view(idx));
            match self.apply_action(idx, action) {
                Ok(()) => return,
                Err(err) => {
                    let seat = self.players[idx].seat;
                    event!(Level::WARN, seat, %action, error = %err, "action rejected");
                    self.record(seat, HandHistoryVerb::Rejected, None);
                    provider.on_rejected(&self.turn_view(idx), &err);
                }
            }
        }
        self.force_fold(idx);
    }

    fn apply_action(&mut self, idx: usize, action: Action) -> Result<(), BetError> {
        let before = self.round.bet_to_match;
        let player = &mut self.players[idx];
        let bet_before = player.bet;
        let verb = match action {
            Action::Fold => {
                player.fold();
                HandHistoryVerb::Fold
            }
            Action::Check => {
                player.check(&mut self.round)?;
                HandHistoryVerb::Check
            }
            Action::Bet(amount) => {
                player.place_bet(amount, &mut self.round)?;
                if self.round.bet_to_match > before {
                    if before == 0 {
                        HandHistoryVerb::Bet
                    } else {
                        HandHistoryVerb::Raise
                    }
                } else if player.bet > bet_before {
                    HandHistoryVerb::Call
                } else {
                    HandHistoryVerb::Check
                }
            }
        };
        let seat = player.seat;
        let added = player.bet - bet_before;
        event!(Level::DEBUG, seat, verb = verb.label(), added, pot = self.round.pot, "action");
        let amount = (added > 0).then_some(added);
        self.record(seat, verb, amount);
        Ok(())
    }

    /// Award the pot to the best hand among players who did not fold. Ties
    /// go to the earliest seat. Players left without chips are removed.
    fn showdown(&mut self) -> Result<HandSummary, GameError> {
        self.phase = Phase::Showdown;
        let contenders: Vec<usize> =
            (0..self.players.len()).filter(|&i| !self.players[i].folded).collect();

        let mut showdown = Vec::new();
        let (winner_idx, winning_rank) = match contenders.as_slice() {
            [] => return Err(GameError::NoContenders),
            [only] => (*only, None),
            _ => {
                let mut best: Option<(usize, HandRank)> = None;
                for &i in &contenders {
                    let rank = self.players[i].hand.rank()?;
                    showdown.push((self.players[i].seat, rank.clone()));
                    let better = match &best {
                        Some((_, top)) => rank > *top,
                        None => true,
                    };
                    if better {
                        best = Some((i, rank));
                    }
                }
                let (i, rank) = best.ok_or(GameError::NoContenders)?;
                (i, Some(rank))
            }
        };

        let pot = self.round.take_pot();
        let winner = &mut self.players[winner_idx];
        winner.chips += pot;
        let (winner_seat, winner_name) = (winner.seat, winner.name.clone());
        self.record(winner_seat, HandHistoryVerb::Win, Some(pot));
        event!(
            Level::INFO,
            winner = %winner_name,
            pot,
            hand = winning_rank.as_ref().map(HandRank::label).unwrap_or("uncontested"),
            "pot awarded"
        );

        let stacks: Vec<(usize, u64)> = self.players.iter().map(|p| (p.seat, p.chips)).collect();
        let busted: Vec<(usize, String)> = self
            .players
            .iter()
            .filter(|p| p.chips == 0)
            .map(|p| (p.seat, p.name.clone()))
            .collect();
        for (seat, name) in &busted {
            event!(Level::INFO, seat, name = %name, "player eliminated");
            self.record(*seat, HandHistoryVerb::Eliminated, None);
        }
        self.players.retain(|p| p.chips > 0);

        self.hands_played += 1;
        let summary = HandSummary {
            hand_number: self.hands_played,
            winner_seat,
            winner_name,
            pot,
            winning_rank,
            showdown,
            eliminated: busted.into_iter().map(|(_, name)| name).collect(),
            stacks,
        };
        self.last_summary = Some(summary.clone());
        Ok(summary)
    }

    fn record(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        self.hand_history.push(HandHistoryEntry { seat, verb, amount, phase: self.phase });
    }
}
