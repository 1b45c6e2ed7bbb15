use crate::hand::Hand;
use std::fmt;
use std::str::FromStr;

/// Shared wagering state of the table for the current hand.
///
/// The game owns it and hands a mutable borrow to whichever player is
/// acting; players never hold on to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundState {
    pub pot: u64,
    pub bet_to_match: u64,
}

impl RoundState {
    /// Start a new betting round. The pot carries over until payout.
    pub fn reset_round(&mut self) {
        self.bet_to_match = 0;
    }

    /// Empty the pot, returning what was in it.
    pub fn take_pot(&mut self) -> u64 {
        std::mem::take(&mut self.pot)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetError {
    #[error("You can't bet a negative amount ({0})")]
    Negative(i64),
    #[error("You can't bet {amount}, you only have {chips} chips")]
    ExceedsStack { amount: u64, chips: u64 },
    #[error("Bet at least {needed} or fold.")]
    BelowBetToMatch { needed: u64, got: u64 },
}

/// What a player chose to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Wager nothing more; legal only when already matching.
    Check,
    /// Add this many chips to the current bet. Kept signed so raw input can
    /// reach validation unchanged.
    Bet(i64),
    Fold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Check => f.write_str("check"),
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Fold => f.write_str("fold"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("no action given")]
    Empty,
    #[error("unknown action '{0}', expected c, b <amount> or f")]
    Unknown(String),
    #[error("bet needs an amount")]
    MissingAmount,
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

/// Parse typed input such as `c`, `check`, `b 20`, `bet 20` or `f`.
///
/// ```
/// use stud_rs::player::{parse_action, Action};
///
/// assert_eq!(parse_action("B 20").unwrap(), Action::Bet(20));
/// assert_eq!(parse_action("c").unwrap(), Action::Check);
/// ```
pub fn parse_action(input: &str) -> Result<Action, ActionParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next().ok_or(ActionParseError::Empty)?;
    match verb {
        "c" | "check" => Ok(Action::Check),
        "f" | "fold" => Ok(Action::Fold),
        "b" | "bet" => {
            // the amount is the last word, as in "b 20" or "bet to 20"
            let amount = words.last().ok_or(ActionParseError::MissingAmount)?;
            amount
                .parse::<i64>()
                .map(Action::Bet)
                .map_err(|_| ActionParseError::InvalidAmount(amount.to_string()))
        }
        other => Err(ActionParseError::Unknown(other.to_string())),
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(s)
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Player {
    pub(crate) seat: usize,
    pub(crate) name: String,
    pub(crate) chips: u64,
    pub(crate) bet: u64,
    pub(crate) hand: Hand,
    pub(crate) folded: bool,
}

impl Player {
    pub fn new(seat: usize, name: impl Into<String>, chips: u64) -> Self {
        Self { seat, name: name.into(), chips, bet: 0, hand: Hand::new(), folded: false }
    }

    /// Stable seat number, kept even after other players bust out.
    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips put in during the current betting round.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    /// Chips still needed to match the table.
    pub fn to_match(&self, round: &RoundState) -> u64 {
        round.bet_to_match.saturating_sub(self.bet)
    }

    /// Put `amount` more chips in.
    ///
    /// Rejected when negative, larger than the stack, or when the new total
    /// would still trail the table's bet-to-match; a rejected wager changes
    /// nothing. A total above bet-to-match raises it for everyone.
    pub fn place_bet(&mut self, amount: i64, round: &mut RoundState) -> Result<(), BetError> {
        let amount = u64::try_from(amount).map_err(|_| BetError::Negative(amount))?;
        if amount > self.chips {
            return Err(BetError::ExceedsStack { amount, chips: self.chips });
        }
        let total = self.bet + amount;
        if total < round.bet_to_match {
            return Err(BetError::BelowBetToMatch { needed: self.to_match(round), got: amount });
        }
        self.chips -= amount;
        self.bet = total;
        round.pot += amount;
        if total > round.bet_to_match {
            round.bet_to_match = total;
        }
        Ok(())
    }

    /// A zero wager: only legal when already matching.
    pub fn check(&mut self, round: &mut RoundState) -> Result<(), BetError> {
        self.place_bet(0, round)
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hand = Hand::new();
        self.folded = false;
        self.bet = 0;
    }
}
