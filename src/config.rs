use crate::deck::DECK_SIZE;
use crate::game::CARDS_PER_PLAYER;

pub const MIN_PLAYERS: usize = 2;
/// Everyone is dealt five cards from one deck, so ten seats use it up.
pub const MAX_PLAYERS: usize = DECK_SIZE / CARDS_PER_PLAYER;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("at most 10 players fit one deck, got {0}")]
    TooManyPlayers(usize),
    #[error("starting chips must be positive")]
    NoChips,
    #[error("max betting passes must be positive")]
    NoBettingPasses,
    #[error("expected {expected} player names, got {got}")]
    NameCount { expected: usize, got: usize },
}

/// Table settings.
///
/// ```
/// use stud_rs::config::GameConfig;
///
/// let cfg = GameConfig::new(4).with_starting_chips(500).with_seed(7);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameConfig {
    pub num_players: usize,
    pub starting_chips: u64,
    /// Seat names; empty means `P1..Pn`.
    pub player_names: Vec<String>,
    /// Full passes around the table before a betting round is forced closed.
    pub max_betting_passes: usize,
    /// Rejected actions tolerated per turn before the player is folded.
    pub max_action_retries: usize,
    /// Stop `run_until_one_player_remains` after this many hands.
    pub max_hands: Option<usize>,
    /// Seed for the deck RNG; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(num_players: usize) -> Self {
        Self { num_players, ..Self::default() }
    }

    pub fn with_starting_chips(mut self, chips: u64) -> Self {
        self.starting_chips = chips;
        self
    }

    pub fn with_player_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_betting_passes(mut self, passes: usize) -> Self {
        self.max_betting_passes = passes;
        self
    }

    pub fn with_max_action_retries(mut self, retries: usize) -> Self {
        self.max_action_retries = retries;
        self
    }

    pub fn with_max_hands(mut self, hands: usize) -> Self {
        self.max_hands = Some(hands);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_seats(self.num_players)?;
        if self.starting_chips == 0 {
            return Err(ConfigError::NoChips);
        }
        if !self.player_names.is_empty() && self.player_names.len() != self.num_players {
            return Err(ConfigError::NameCount {
                expected: self.num_players,
                got: self.player_names.len(),
            });
        }
        Ok(())
    }

    /// Checks that apply whether seats come from the config or are supplied
    /// directly.
    pub(crate) fn validate_seats(&self, seats: usize) -> Result<(), ConfigError> {
        if seats < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(seats));
        }
        if seats > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(seats));
        }
        if self.max_betting_passes == 0 {
            return Err(ConfigError::NoBettingPasses);
        }
        Ok(())
    }

    pub(crate) fn name_for(&self, seat: usize) -> String {
        self.player_names.get(seat).cloned().unwrap_or_else(|| format!("P{}", seat + 1))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: MIN_PLAYERS,
            starting_chips: 1000,
            player_names: Vec::new(),
            max_betting_passes: 16,
            max_action_retries: 3,
            max_hands: None,
            seed: None,
        }
    }
}
