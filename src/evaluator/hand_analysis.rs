use super::counts::{RankCounts, SuitCounts};
use super::straight::straight_top;
use crate::cards::{Card, Rank};

/// Everything the category rules need, computed once from an immutable
/// sorted copy of the caller's cards.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Ranks in ascending order.
    pub ranks: [Rank; 5],
    pub rank_counts: RankCounts,
    pub suit_counts: SuitCounts,
    /// Top of the straight, wheel already folded down to Five.
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted = *cards;
        sorted.sort_by_key(|c| (c.rank(), c.suit()));
        let ranks = sorted.map(Card::rank);

        Self {
            ranks,
            rank_counts: RankCounts::from_cards(&sorted),
            suit_counts: SuitCounts::from_cards(&sorted),
            straight_top: straight_top(&ranks),
        }
    }

    pub fn is_flush(&self) -> bool {
        self.suit_counts.flush_suit().is_some()
    }

    pub fn ranks_desc(&self) -> Vec<Rank> {
        self.ranks.iter().rev().copied().collect()
    }
}
