use crate::cards::{Card, Rank, Suit};
use crate::hand::{Hand, HandError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("cannot deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("card {0} appears twice in a stacked deck")]
    DuplicateCard(Card),
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// A shuffled 52-card deck used as a stack: cards leave from the top and
/// are never put back.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A freshly shuffled deck using the thread-local RNG.
    ///
    /// ```
    /// use stud_rs::deck::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn new() -> Self {
        Self::shuffled_with(&mut rand::rng())
    }

    /// A deck shuffled by a seeded ChaCha RNG; the same seed yields the same order.
    pub fn seeded(seed: u64) -> Self {
        Self::shuffled_with(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.cards.shuffle(rng);
        deck
    }

    /// A prearranged deck for replays and tests. `top_first[0]` is dealt
    /// first; the deck may be shorter than 52 but never repeats a card.
    pub fn stacked(top_first: Vec<Card>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(top_first.len());
        if let Some(dup) = top_first.iter().find(|c| !seen.insert(**c)) {
            return Err(DeckError::DuplicateCard(*dup));
        }
        let mut cards = top_first;
        cards.reverse();
        Ok(Self { cards })
    }

    fn ordered() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still in the deck, bottom first.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Remove and return the top `count` cards. Asking for more than remain
    /// is an error and leaves the deck untouched.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if count > remaining {
            return Err(DeckError::InsufficientCards { requested: count, remaining });
        }
        Ok(self.cards.split_off(remaining - count))
    }

    /// Deal `count` cards straight into a hand.
    pub fn deal_into(&mut self, hand: &mut Hand, count: usize) -> Result<(), DeckError> {
        if hand.len() + count > Hand::MAX_CARDS {
            return Err(HandError::TooManyCards(hand.len() + count).into());
        }
        let cards = self.deal(count)?;
        hand.add_cards(cards)?;
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
