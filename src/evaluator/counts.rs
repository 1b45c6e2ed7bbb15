use crate::cards::{Card, Rank, Suit};
use std::collections::BTreeMap;

/// Multiplicity of each rank present in a hand.
///
/// Example: A A A K Q counts as {A: 3, K: 1, Q: 1}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankCounts {
    counts: BTreeMap<Rank, u8>,
}

impl RankCounts {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.rank()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Ranks appearing exactly `multiplicity` times, highest first.
    pub fn ranks_with(&self, multiplicity: u8) -> Vec<Rank> {
        self.counts.iter().rev().filter(|(_, &n)| n == multiplicity).map(|(&r, _)| r).collect()
    }

    pub fn has(&self, multiplicity: u8) -> bool {
        self.counts.values().any(|&n| n == multiplicity)
    }
}

/// Multiplicity of each suit present in a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitCounts {
    counts: BTreeMap<Suit, u8>,
}

impl SuitCounts {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.suit()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// The suit held five times, if any.
    pub fn flush_suit(&self) -> Option<Suit> {
        self.counts.iter().find(|(_, &n)| n == 5).map(|(&s, _)| s)
    }
}
