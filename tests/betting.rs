use stud_rs::agents::{CallingAgent, FnAgent, ScriptedAgent, TurnView};
use stud_rs::config::GameConfig;
use stud_rs::game::{Game, HandHistoryVerb, Phase, Street};
use stud_rs::player::{Action, BetError, Player, RoundState};

fn mk_game(n: usize) -> Game {
    Game::new(GameConfig::new(n).with_starting_chips(100).with_seed(21)).unwrap()
}

#[test]
fn rejected_bet_leaves_table_unchanged() {
    let mut p = Player::new(0, "Ann", 50);
    let mut round = RoundState { pot: 30, bet_to_match: 30 };
    for (amount, expected) in [
        (-1, BetError::Negative(-1)),
        (60, BetError::ExceedsStack { amount: 60, chips: 50 }),
        (10, BetError::BelowBetToMatch { needed: 30, got: 10 }),
    ] {
        assert_eq!(p.place_bet(amount, &mut round), Err(expected));
        assert_eq!(p.chips(), 50);
        assert_eq!(p.bet(), 0);
        assert_eq!(round, RoundState { pot: 30, bet_to_match: 30 });
    }
}

#[test]
fn raise_propagates_to_bet_to_match() {
    let mut a = Player::new(0, "Ann", 100);
    let mut b = Player::new(1, "Bob", 100);
    let mut round = RoundState::default();
    a.place_bet(10, &mut round).unwrap();
    b.place_bet(25, &mut round).unwrap();
    assert_eq!(round.bet_to_match, 25);
    assert_eq!(a.to_match(&round), 15);
    assert!(a.check(&mut round).is_err());
    a.place_bet(15, &mut round).unwrap();
    assert_eq!(round.bet_to_match, 25);
    assert_eq!(round.pot, 50);
}

#[test]
fn settled_round_has_every_active_bet_equal() {
    let mut g = mk_game(3);
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = seen.clone();
    // seat 0 opens each street, the others call
    let mut agent = FnAgent::new(move |view: &TurnView<'_>| {
        log.borrow_mut().push((view.phase, view.player.seat(), view.round.bet_to_match));
        if view.player.seat() == 0 && view.round.bet_to_match == 0 {
            Action::Bet(5)
        } else {
            Action::Bet(view.to_match() as i64)
        }
    });
    let summary = g.play_one_hand(&mut agent).unwrap();
    assert_eq!(summary.pot, 45);
    let asked = seen.borrow();
    assert_eq!(asked.len(), 9);
    assert!(asked.iter().all(|(_, seat, btm)| *seat == 0 || *btm == 5));
}

#[test]
fn each_street_starts_from_zero() {
    let mut g = mk_game(2);
    let mut agent = FnAgent::new(|view: &TurnView<'_>| {
        if view.player.seat() == 0 {
            // seat 0 opens every street and must find nothing carried over
            assert_eq!(view.round.bet_to_match, 0);
            assert_eq!(view.player.bet(), 0);
            Action::Bet(10)
        } else {
            Action::Bet(view.to_match() as i64)
        }
    });
    let summary = g.play_one_hand(&mut agent).unwrap();
    assert_eq!(summary.pot, 60);
}

#[test]
fn re_raise_reopens_the_round() {
    let mut g = mk_game(2);
    // hole: A bets 10, B raises to 30, A calls 20, B checks; later streets check
    let mut agent =
        ScriptedAgent::new([Action::Bet(10), Action::Bet(30), Action::Bet(20)]).with_fallback(Action::Check);
    let summary = g.play_one_hand(&mut agent).unwrap();
    assert_eq!(summary.pot, 60);
    let verbs: Vec<_> = g
        .history()
        .iter()
        .filter(|e| e.phase == Phase::Betting(Street::Hole))
        .map(|e| e.verb)
        .collect();
    assert_eq!(
        verbs,
        vec![
            HandHistoryVerb::Bet,
            HandHistoryVerb::Raise,
            HandHistoryVerb::Call,
            HandHistoryVerb::Check,
        ]
    );
    assert_eq!(agent.rejections(), 0);
}

#[test]
fn checking_into_a_bet_is_rejected_then_retried() {
    let mut g = mk_game(2);
    // B tries to check facing 10, is refused, then calls
    let mut agent =
        ScriptedAgent::new([Action::Bet(10), Action::Check, Action::Bet(10)]).with_fallback(Action::Check);
    let summary = g.play_one_hand(&mut agent).unwrap();
    assert_eq!(agent.rejections(), 1);
    assert_eq!(summary.pot, 20);
}

#[test]
fn last_player_standing_is_not_asked() {
    let mut g = mk_game(3);
    let asked = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = asked.clone();
    let mut agent = FnAgent::new(move |_view: &TurnView<'_>| {
        counter.set(counter.get() + 1);
        Action::Fold
    });
    let summary = g.play_one_hand(&mut agent).unwrap();
    assert_eq!(asked.get(), 2);
    assert_eq!(summary.winner_seat, 2);
}

#[test]
fn endless_raising_is_cut_off() {
    let mut g = Game::new(GameConfig::new(3).with_max_betting_passes(3).with_seed(8)).unwrap();
    let mut agent = FnAgent::new(|view: &TurnView<'_>| Action::Bet(view.to_match() as i64 + 1));
    let summary = g.play_one_hand(&mut agent).unwrap();
    // only the last raiser matches after the cap
    assert_eq!(summary.winner_seat, 2);
    assert!(g.history().iter().any(|e| e.verb == HandHistoryVerb::ForcedFold));
}

#[test]
fn calling_station_table_checks_down() {
    let mut g = mk_game(4);
    let summary = g.play_one_hand(&mut CallingAgent).unwrap();
    assert_eq!(summary.pot, 0);
    assert_eq!(summary.showdown.len(), 4);
    assert_eq!(g.players().iter().map(|p| p.chips()).sum::<u64>(), 400);
}
