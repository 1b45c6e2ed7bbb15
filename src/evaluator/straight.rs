use crate::cards::Rank;

/// Top rank of the straight formed by five ranks sorted ascending, if any.
///
/// A-2-3-4-5 (the wheel) counts as a straight with the ace playing low, so
/// its top rank is Five rather than Ace.
pub fn straight_top(ascending: &[Rank; 5]) -> Option<Rank> {
    let consecutive = ascending.windows(2).all(|w| w[1].value() == w[0].value() + 1);
    if consecutive {
        return Some(ascending[4]);
    }
    const WHEEL: [Rank; 5] = [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Ace];
    if *ascending == WHEEL {
        return Some(Rank::Five);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use Rank::*;

    #[test]
    fn regular_straights() {
        assert_eq!(straight_top(&[Nine, Ten, Jack, Queen, King]), Some(King));
        assert_eq!(straight_top(&[Ten, Jack, Queen, King, Ace]), Some(Ace));
        assert_eq!(straight_top(&[Two, Three, Four, Five, Six]), Some(Six));
    }

    #[test]
    fn wheel_tops_at_five() {
        assert_eq!(straight_top(&[Two, Three, Four, Five, Ace]), Some(Five));
    }

    #[test]
    fn gaps_and_pairs_are_not_straights() {
        assert_eq!(straight_top(&[Nine, Jack, Queen, King, Ace]), None);
        assert_eq!(straight_top(&[Jack, Queen, King, Ace, Ace]), None);
        assert_eq!(straight_top(&[Three, Four, Five, Ace, Ace]), None);
        // no wrap-around through the ace
        assert_eq!(straight_top(&[Two, Three, Queen, King, Ace]), None);
    }
}
