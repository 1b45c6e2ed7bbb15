use super::hand_analysis::HandAnalysis;
use super::Category;
use crate::cards::Rank;

/// One category test. `tiebreak` returns the key when the hand belongs to the
/// category; rules are tried strongest first so each may assume every
/// stronger rule already failed.
pub trait CategoryRule {
    fn category(&self) -> Category;
    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>>;
}

/// Ace-high straight flush.
pub struct RoyalFlushRule;

impl CategoryRule for RoyalFlushRule {
    fn category(&self) -> Category {
        Category::RoyalFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        match analysis.straight_top {
            Some(Rank::Ace) if analysis.is_flush() => Some(vec![Rank::Ace]),
            _ => None,
        }
    }
}

pub struct StraightFlushRule;

impl CategoryRule for StraightFlushRule {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.straight_top.filter(|_| analysis.is_flush()).map(|top| vec![top])
    }
}

pub struct FourOfAKindRule;

impl CategoryRule for FourOfAKindRule {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let quad = *analysis.rank_counts.ranks_with(4).first()?;
        let mut key = vec![quad];
        key.extend(analysis.rank_counts.ranks_with(1));
        Some(key)
    }
}

pub struct FullHouseRule;

impl CategoryRule for FullHouseRule {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let trips = *analysis.rank_counts.ranks_with(3).first()?;
        let pair = *analysis.rank_counts.ranks_with(2).first()?;
        Some(vec![trips, pair])
    }
}

pub struct FlushRule;

impl CategoryRule for FlushRule {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.is_flush().then(|| analysis.ranks_desc())
    }
}

pub struct StraightRule;

impl CategoryRule for StraightRule {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.straight_top.map(|top| vec![top])
    }
}

pub struct ThreeOfAKindRule;

impl CategoryRule for ThreeOfAKindRule {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        if analysis.rank_counts.has(2) {
            return None;
        }
        let trips = *analysis.rank_counts.ranks_with(3).first()?;
        let mut key = vec![trips];
        key.extend(analysis.rank_counts.ranks_with(1));
        Some(key)
    }
}

pub struct TwoPairRule;

impl CategoryRule for TwoPairRule {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let mut key = analysis.rank_counts.ranks_with(2);
        if key.len() != 2 {
            return None;
        }
        key.extend(analysis.rank_counts.ranks_with(1));
        Some(key)
    }
}

pub struct PairRule;

impl CategoryRule for PairRule {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let mut key = analysis.rank_counts.ranks_with(2);
        if key.len() != 1 {
            return None;
        }
        key.extend(analysis.rank_counts.ranks_with(1));
        Some(key)
    }
}

pub struct HighCardRule;

impl CategoryRule for HighCardRule {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        Some(analysis.ranks_desc())
    }
}

pub const RULES: [&dyn CategoryRule; 10] = [
    &RoyalFlushRule,
    &StraightFlushRule,
    &FourOfAKindRule,
    &FullHouseRule,
    &FlushRule,
    &StraightRule,
    &ThreeOfAKindRule,
    &TwoPairRule,
    &PairRule,
    &HighCardRule,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card};

    fn analyze(s: &str) -> HandAnalysis {
        let cards: [Card; 5] = parse_cards(s).unwrap().try_into().unwrap();
        HandAnalysis::new(&cards)
    }

    fn first_match(analysis: &HandAnalysis) -> Category {
        RULES
            .iter()
            .find(|rule| rule.tiebreak(analysis).is_some())
            .map(|rule| rule.category())
            .unwrap()
    }

    #[test]
    fn rules_are_in_severity_order() {
        let cats: Vec<Category> = RULES.iter().map(|r| r.category()).collect();
        let mut sorted = cats.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(cats, sorted);
    }

    #[test]
    fn straight_flush_beats_its_parts() {
        let a = analyze("9h 8h 7h 6h 5h");
        assert!(FlushRule.tiebreak(&a).is_some());
        assert!(StraightRule.tiebreak(&a).is_some());
        assert!(RoyalFlushRule.tiebreak(&a).is_none());
        assert_eq!(first_match(&a), Category::StraightFlush);
    }

    #[test]
    fn full_house_is_not_trips() {
        let a = analyze("3c 3d 3h Js Jc");
        assert!(ThreeOfAKindRule.tiebreak(&a).is_none());
        assert_eq!(FullHouseRule.tiebreak(&a), Some(vec![Rank::Three, Rank::Jack]));
    }

    #[test]
    fn quads_carry_their_kicker() {
        let a = analyze("9c 9d 9h 9s Ac");
        assert_eq!(FourOfAKindRule.tiebreak(&a), Some(vec![Rank::Nine, Rank::Ace]));
    }

    #[test]
    fn pair_rule_rejects_two_pair() {
        let a = analyze("Jc Jd 9c 9h 2s");
        assert!(PairRule.tiebreak(&a).is_none());
        assert_eq!(TwoPairRule.tiebreak(&a), Some(vec![Rank::Jack, Rank::Nine, Rank::Two]));
    }

    #[test]
    fn high_card_always_matches() {
        let a = analyze("Ah Kd 7s 5c 2d");
        assert_eq!(first_match(&a), Category::HighCard);
    }
}
