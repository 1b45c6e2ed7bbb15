use proptest::prelude::*;
use std::io::Cursor;
use stud_rs::agents::{
    AgentKind, AgentTable, BotAgent, BotProfile, CallingAgent, ConsoleAgent, Difficulty, FoldingAgent,
};
use stud_rs::cards::parse_cards;
use stud_rs::config::GameConfig;
use stud_rs::deck::Deck;
use stud_rs::game::{Game, Street};

fn stacked(hands: &[&str]) -> Deck {
    let hands: Vec<_> = hands.iter().map(|h| parse_cards(h).unwrap()).collect();
    let mut order = Vec::new();
    let mut taken = 0;
    for street in Street::ALL {
        for hand in &hands {
            order.extend_from_slice(&hand[taken..taken + street.cards_dealt()]);
        }
        taken += street.cards_dealt();
    }
    Deck::stacked(order).unwrap()
}

#[test]
fn console_players_share_a_keyboard() {
    let config = GameConfig::new(2)
        .with_player_names(["Ann", "Bob"])
        .with_starting_chips(100)
        .with_seed(1);
    let mut g = Game::new(config).unwrap();
    let deck = stacked(&["9c 9d 2h 5s Kc", "Ah Qd 7c 4s 3h"]);
    let typed = "b 10\nraise\nb 10\nc\nc\nc\nc\n";
    let mut console = ConsoleAgent::new(Cursor::new(typed), Vec::new());
    let summary = g.play_one_hand_with_deck(deck, &mut console).unwrap();

    assert_eq!(summary.winner_name, "Ann");
    assert_eq!(summary.pot, 20);
    let printed = String::from_utf8(console.into_output()).unwrap();
    assert!(printed.contains("Bob (100 chips)"));
    assert!(printed.contains("Bob (90 chips)"));
    assert!(printed.contains("You need 10 more to stay in."));
    assert!(printed.contains("unknown action 'raise'"));
    assert!(printed.contains("Ann won the round with pair and takes 20 chips"));
}

#[test]
fn console_sees_rejections() {
    let mut g = Game::new(GameConfig::new(2).with_seed(2)).unwrap();
    // the second player tries to under-call, then folds
    let typed = "b 30\nb 5\nf\n";
    let mut console = ConsoleAgent::new(Cursor::new(typed), Vec::new());
    let summary = g.play_one_hand(&mut console).unwrap();
    assert_eq!(summary.winner_seat, 0);
    let printed = String::from_utf8(console.into_output()).unwrap();
    assert!(printed.contains("Bet at least 30 or fold."));
    assert!(printed.contains("P1 takes 30 chips uncontested"));
}

#[test]
fn mixed_table_reports_its_seats() {
    let agents = AgentTable::for_seats(3)
        .with_agent(0, ConsoleAgent::new(Cursor::new(""), Vec::new()))
        .with_agent(1, BotAgent::new(BotProfile::default()));
    assert!(agents.any_humans());
    assert_eq!(agents.agent_kind(0), Some(AgentKind::Human));
    assert_eq!(agents.agent_kind(1), Some(AgentKind::Bot));
    assert_eq!(agents.agent_kind(2), None);
    assert_eq!(format!("{agents:?}"), "AgentTable(HB-)");
}

#[test_log::test]
fn bots_play_against_fixed_strategies() {
    let mut g = Game::new(GameConfig::new(4).with_starting_chips(300).with_max_hands(40).with_seed(17))
        .unwrap();
    let mut agents = AgentTable::for_seats(4)
        .with_agent(0, BotAgent::new(BotProfile::for_difficulty(Difficulty::Hard).with_seed(1)))
        .with_agent(1, BotAgent::new(BotProfile::for_difficulty(Difficulty::Easy).with_seed(2)))
        .with_agent(2, CallingAgent)
        .with_agent(3, FoldingAgent);
    let outcome = g.run_until_one_player_remains(&mut agents).unwrap();
    assert!(outcome.hands_played <= 40);
    let total: u64 = outcome.standings.iter().map(|(_, chips)| chips).sum();
    assert_eq!(total, 1200);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn bot_matches_conserve_chips(seed in any::<u64>(), players in 2usize..=6) {
        let config = GameConfig::new(players)
            .with_starting_chips(150)
            .with_max_hands(25)
            .with_seed(seed);
        let mut g = Game::new(config).unwrap();
        let mut bot = BotAgent::new(BotProfile::for_difficulty(Difficulty::Medium).with_seed(seed));
        let outcome = g.run_until_one_player_remains(&mut bot).unwrap();
        let total: u64 = outcome.standings.iter().map(|(_, chips)| chips).sum();
        prop_assert_eq!(total, 150 * players as u64);
        prop_assert_eq!(g.pot(), 0);
        if let Some(seat) = outcome.champion {
            prop_assert_eq!(g.players().len(), 1);
            prop_assert_eq!(g.players()[0].seat(), seat);
        }
    }
}
