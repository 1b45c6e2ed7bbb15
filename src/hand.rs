use crate::cards::{parse_cards, Card};
use crate::evaluator::{evaluate_five, HandRank};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("a hand must hold exactly 5 cards to be ranked, it holds {0}")]
    InvalidSize(usize),
    #[error("a hand holds at most 7 cards, got {0}")]
    TooManyCards(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// The cards a player holds.
///
/// A hand grows as cards are dealt and may briefly hold anywhere from 0 to 7
/// cards, but only a hand of exactly five can be ranked.
///
/// ```
/// use stud_rs::hand::Hand;
///
/// let hand: Hand = "Ah Kh Qh Jh 10h".parse().unwrap();
/// assert_eq!(hand.category_label().unwrap(), "royal flush");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub const RANKED_SIZE: usize = 5;
    pub const MAX_CARDS: usize = 7;

    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(Self::RANKED_SIZE) }
    }

    pub fn add_card(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() >= Self::MAX_CARDS {
            return Err(HandError::TooManyCards(self.cards.len() + 1));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn add_cards<I>(&mut self, cards: I) -> Result<(), HandError>
    where
        I: IntoIterator<Item = Card>,
    {
        for card in cards {
            self.add_card(card)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the hand holds exactly the five cards needed for ranking.
    pub fn is_complete(&self) -> bool {
        self.cards.len() == Self::RANKED_SIZE
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Rank the hand. Recomputed on every call; the held cards keep their
    /// dealt order.
    pub fn rank(&self) -> Result<HandRank, HandError> {
        let five: &[Card; 5] =
            self.cards.as_slice().try_into().map_err(|_| HandError::InvalidSize(self.cards.len()))?;
        Ok(evaluate_five(five))
    }

    pub fn category_label(&self) -> Result<&'static str, HandError> {
        self.rank().map(|r| r.label())
    }

    /// Compare two complete hands by strength.
    pub fn compare(&self, other: &Hand) -> Result<Ordering, HandError> {
        Ok(self.rank()?.cmp(&other.rank()?))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        f.write_str(&shown.join(" "))
    }
}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        let mut hand = Hand::new();
        hand.add_cards(cards)?;
        Ok(hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn add_card_counts() {
        let mut hand = Hand::new();
        hand.add_card(Card::new(Rank::Eight, Suit::Hearts)).unwrap();
        assert_eq!(hand.len(), 1);
        assert!(!hand.is_complete());
    }

    #[test]
    fn ranking_requires_exactly_five() {
        let four: Hand = "6h As 9c 10d".parse().unwrap();
        assert_eq!(four.rank().unwrap_err(), HandError::InvalidSize(4));

        let six: Hand = "6h As 9c 10d 4s 2c".parse().unwrap();
        assert_eq!(six.rank().unwrap_err(), HandError::InvalidSize(6));

        assert_eq!(Hand::new().rank().unwrap_err(), HandError::InvalidSize(0));
    }

    #[test]
    fn capacity_is_seven() {
        let mut hand: Hand = "2h 3h 4h 5h 6h 7h 8h".parse().unwrap();
        let err = hand.add_card(Card::new(Rank::Nine, Suit::Hearts)).unwrap_err();
        assert_eq!(err, HandError::TooManyCards(8));
        assert_eq!(hand.len(), 7);
    }

    #[test]
    fn ranking_leaves_card_order_alone() {
        let hand: Hand = "Kd 2s Ah 7c 7d".parse().unwrap();
        let before = hand.cards().to_vec();
        hand.rank().unwrap();
        assert_eq!(hand.cards(), before.as_slice());
    }

    #[test]
    fn compare_two_pair_by_high_pair() {
        let kings: Hand = "Kh Ks 3c 3d 9s".parse().unwrap();
        let jacks: Hand = "Jh Js 10c 10d As".parse().unwrap();
        assert_eq!(kings.compare(&jacks).unwrap(), Ordering::Greater);
        assert_eq!(jacks.compare(&kings).unwrap(), Ordering::Less);
    }

    #[test]
    fn compare_fails_on_incomplete_hand() {
        let full: Hand = "Kh Ks 3c 3d 9s".parse().unwrap();
        let short: Hand = "Jh Js".parse().unwrap();
        assert_eq!(full.compare(&short).unwrap_err(), HandError::InvalidSize(2));
    }

    #[test]
    fn display_lists_cards() {
        let hand: Hand = "Ah 10s".parse().unwrap();
        assert_eq!(hand.to_string(), "A♥ 10♠");
    }
}
