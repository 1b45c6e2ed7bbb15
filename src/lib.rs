//! stud-rs: a turn-based five-card poker table.
//!
//! Goals:
//! - Correct ranking of five-card hands across all ten categories, the
//!   ace-low wheel included
//! - Betting rounds where every wager is validated by the game, never trusted
//!   from the player
//! - Decisions supplied through a small trait so humans, bots and scripts
//!   can share a table
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: rank and compare hands
//! ```
//! use stud_rs::evaluator::Category;
//! use stud_rs::hand::Hand;
//! use std::cmp::Ordering;
//!
//! let wheel: Hand = "Ah 2d 3c 4s 5h".parse().unwrap();
//! let trips: Hand = "9c 9d 9h Ks 2c".parse().unwrap();
//!
//! assert_eq!(wheel.rank().unwrap().category, Category::Straight);
//! assert_eq!(wheel.compare(&trips).unwrap(), Ordering::Greater);
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use stud_rs::agents::CallingAgent;
//! use stud_rs::config::GameConfig;
//! use stud_rs::game::Game;
//!
//! let mut game = Game::new(GameConfig::new(3).with_seed(7)).unwrap();
//! let summary = game.play_one_hand(&mut CallingAgent).unwrap();
//! assert!(summary.winning_rank.is_some());
//! ```
//!
//! ## TUI
//! Run the interactive table with:
//! ```sh
//! cargo run --bin stud-rs
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod player;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
