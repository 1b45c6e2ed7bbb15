//! Five-card hand classification and ordering.
//!
//! [`evaluate_five`] is a pure function: it sorts a copy of the cards, counts
//! ranks and suits once, then walks the category rules from strongest to
//! weakest. The first rule that matches names the category and builds the
//! tiebreak key.

pub(crate) mod counts;
pub(crate) mod hand_analysis;
pub(crate) mod rules;
pub(crate) mod straight;

use crate::cards::{Card, Rank};
use hand_analysis::HandAnalysis;
use std::fmt;

/// Hand categories from weakest to strongest. The derived order is the
/// severity order used at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Human-readable name, e.g. "two pair".
    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength of a complete five-card hand.
///
/// Ordering compares the category first and then the tiebreak ranks element
/// by element, most significant first. Hands of one category always carry
/// keys of the same length, so equal keys mean equal hands.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    pub category: Category,
    pub tiebreak: Vec<Rank>,
}

impl HandRank {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key: Vec<&str> = self.tiebreak.iter().map(|r| r.label()).collect();
        write!(f, "{} [{}]", self.category, key.join(" "))
    }
}

/// Classify exactly five cards.
///
/// ```
/// use stud_rs::cards::parse_cards;
/// use stud_rs::evaluator::{evaluate_five, Category};
///
/// let cards: [_; 5] = parse_cards("Ah As 9c 10d 10s").unwrap().try_into().unwrap();
/// let rank = evaluate_five(&cards);
/// assert_eq!(rank.category, Category::TwoPair);
/// ```
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let analysis = HandAnalysis::new(cards);
    for rule in rules::RULES {
        if let Some(tiebreak) = rule.tiebreak(&analysis) {
            return HandRank { category: rule.category(), tiebreak };
        }
    }
    HandRank { category: Category::HighCard, tiebreak: analysis.ranks_desc() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> HandRank {
        let cards: [Card; 5] = parse_cards(s).unwrap().try_into().unwrap();
        evaluate_five(&cards)
    }

    #[test]
    fn canonical_categories() {
        assert_eq!(eval("10s Js Qs Ks As").category, Category::RoyalFlush);
        assert_eq!(eval("9s 10s Js Qs Ks").category, Category::StraightFlush);
        assert_eq!(eval("Ah As Ac Ad 10s").category, Category::FourOfAKind);
        assert_eq!(eval("Ah As Ac 10d 10s").category, Category::FullHouse);
        assert_eq!(eval("As Ks 6s Js 10s").category, Category::Flush);
        assert_eq!(eval("Ah Ks Qs Js 10s").category, Category::Straight);
        assert_eq!(eval("Ah As Ac 10d 9s").category, Category::ThreeOfAKind);
        assert_eq!(eval("Ah As 9c 10d 10s").category, Category::TwoPair);
        assert_eq!(eval("6h As 9c 10d 10s").category, Category::Pair);
        assert_eq!(eval("6h As 9c 10d 4s").category, Category::HighCard);
    }

    #[test]
    fn tiebreak_keys_follow_category_layout() {
        use Rank::*;
        assert_eq!(eval("Ah As Ac Ad 10s").tiebreak, vec![Ace, Ten]);
        assert_eq!(eval("Ah As Ac 10d 10s").tiebreak, vec![Ace, Ten]);
        assert_eq!(eval("As Ks 6s Js 10s").tiebreak, vec![Ace, King, Jack, Ten, Six]);
        assert_eq!(eval("Ah Ks Qs Js 10s").tiebreak, vec![Ace]);
        assert_eq!(eval("Ah As Ac 10d 9s").tiebreak, vec![Ace, Ten, Nine]);
        assert_eq!(eval("Ah As 9c 10d 10s").tiebreak, vec![Ace, Ten, Nine]);
        assert_eq!(eval("6h As 9c 10d 10s").tiebreak, vec![Ten, Ace, Nine, Six]);
        assert_eq!(eval("6h As 9c 10d 4s").tiebreak, vec![Ace, Ten, Nine, Six, Four]);
    }

    #[test]
    fn wheel_ranks_as_five_high() {
        let wheel = eval("Ah 2s 3c 4d 5s");
        assert_eq!(wheel.category, Category::Straight);
        assert_eq!(wheel.tiebreak, vec![Rank::Five]);
        assert!(wheel < eval("2h 3s 4c 5d 6s"));

        let steel = eval("Ad 2d 3d 4d 5d");
        assert_eq!(steel.category, Category::StraightFlush);
        assert_eq!(steel.tiebreak, vec![Rank::Five]);
    }

    #[test]
    fn labels_are_spaced_words() {
        assert_eq!(eval("Ah As 9c 10d 10s").label(), "two pair");
        assert_eq!(Category::ThreeOfAKind.to_string(), "three of a kind");
    }
}
