use crate::cards::{Card, Rank};
use crate::evaluator::{evaluate_five, Category};
use crate::game::CARDS_PER_PLAYER;
use crate::player::Action;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::{wager, ActionProvider, AgentKind, TurnView};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    pub curiosity: f64,
    /// Smallest opening bet, in chips.
    pub bet_unit: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff, curiosity) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03, 0.4),
            Difficulty::Medium => (0.5, 0.35, 0.05, 0.2),
            Difficulty::Hard => (0.62, 0.48, 0.08, 0.12),
            Difficulty::Expert => (0.72, 0.6, 0.12, 0.1),
        };
        Self { difficulty, tightness, aggression, bluff, curiosity, bet_unit: 10, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_bet_unit(mut self, unit: u64) -> Self {
        self.bet_unit = unit.max(1);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

#[derive(Debug, Clone, Copy)]
struct DecisionParams {
    adjusted: f64,
    fold_threshold: f64,
    raise_threshold: f64,
    aggression: f64,
    bluff: f64,
    curiosity: f64,
}

struct BotContext<'a> {
    to_match: u64,
    pot: u64,
    bet_to_match: u64,
    chips: u64,
    bet: u64,
    opponents: usize,
    cards: &'a [Card],
}

struct BotPolicy;

impl BotPolicy {
    fn decide(ctx: &BotContext<'_>, profile: &BotProfile, state: &mut BotState) -> Action {
        if ctx.to_match > ctx.chips {
            return Action::Fold;
        }
        let strength = estimate_strength(ctx.cards, ctx.opponents);
        let pot_odds = if ctx.to_match == 0 {
            0.0
        } else {
            ctx.to_match as f64 / (ctx.pot + ctx.to_match) as f64
        };
        let (mistake_rate, diff_bias) = difficulty_modifiers(profile.difficulty);
        // raising gets less attractive as more of the stack is already committed
        let committed = ctx.bet_to_match as f64 / (ctx.bet + ctx.chips).max(1) as f64;
        let tightness = (profile.tightness + diff_bias).clamp(0.05, 0.95);
        let aggression = (profile.aggression + diff_bias - committed * 0.5).clamp(0.0, 0.95);

        let noise = state.rng.random_range(-1.0..=1.0) * mistake_rate * 0.18;
        let adjusted = (strength + noise).clamp(0.0, 1.0);
        let fold_threshold = (0.3 + tightness * 0.3 - pot_odds * 0.25).clamp(0.1, 0.9);
        let raise_threshold = (0.68 - aggression * 0.25).clamp(0.15, 0.9);

        let params = DecisionParams {
            adjusted,
            fold_threshold,
            raise_threshold,
            aggression,
            bluff: (profile.bluff + diff_bias * 0.5).clamp(0.0, 0.5),
            curiosity: profile.curiosity.clamp(0.0, 0.6),
        };

        if ctx.to_match > 0 {
            decide_facing_bet(ctx, profile, state, params)
        } else {
            decide_when_checked(ctx, profile, state, params)
        }
    }
}

fn decide_facing_bet(
    ctx: &BotContext<'_>,
    profile: &BotProfile,
    state: &mut BotState,
    params: DecisionParams,
) -> Action {
    if params.adjusted < params.fold_threshold && state.rng.random::<f64>() > params.curiosity * 0.3
    {
        return Action::Fold;
    }
    if params.adjusted > params.raise_threshold
        && ctx.chips > ctx.to_match
        && state.rng.random::<f64>() < params.aggression
    {
        let extra = choose_size(ctx, profile, params.aggression, params.adjusted);
        return wager((ctx.to_match + extra).min(ctx.chips));
    }
    wager(ctx.to_match)
}

fn decide_when_checked(
    ctx: &BotContext<'_>,
    profile: &BotProfile,
    state: &mut BotState,
    params: DecisionParams,
) -> Action {
    if ctx.chips == 0 {
        return Action::Check;
    }
    let value = params.adjusted > params.raise_threshold
        && state.rng.random::<f64>() < params.aggression;
    let bluff =
        params.adjusted < params.fold_threshold && state.rng.random::<f64>() < params.bluff;
    if value || bluff {
        return wager(choose_size(ctx, profile, params.aggression, params.adjusted).min(ctx.chips));
    }
    Action::Check
}

fn difficulty_modifiers(difficulty: Difficulty) -> (f64, f64) {
    match difficulty {
        Difficulty::Easy => (0.28, -0.1),
        Difficulty::Medium => (0.14, 0.0),
        Difficulty::Hard => (0.08, 0.05),
        Difficulty::Expert => (0.04, 0.09),
    }
}

/// Chips to put in beyond what is owed; at least one bet unit.
fn choose_size(ctx: &BotContext<'_>, profile: &BotProfile, aggression: f64, strength: f64) -> u64 {
    let unit = profile.bet_unit.max(1);
    let base_factor = if strength > 0.85 {
        0.9
    } else if strength > 0.65 {
        0.6
    } else {
        0.33
    };
    let scale = 0.8 + aggression * 0.4;
    let size = if ctx.pot == 0 {
        unit
    } else {
        ((ctx.pot as f64) * base_factor * scale).round() as u64
    };
    size.max(unit)
}

/// Rough 0..1 strength of the cards seen so far. A complete hand is scored by
/// category; a partial one by its made pairs, high cards and draws, shaded
/// down as more opponents stay in.
fn estimate_strength(cards: &[Card], opponents: usize) -> f64 {
    let crowd = (opponents.saturating_sub(1) as f64 * 0.03).min(0.15);
    if let Ok(five) = <&[Card; CARDS_PER_PLAYER]>::try_from(cards) {
        let rank = evaluate_five(five);
        let base = rank.category.ordinal() as f64 / Category::RoyalFlush.ordinal() as f64;
        let high = rank.tiebreak.first().map_or(0.0, |r| r.value() as f64 / 14.0);
        return (base * 0.85 + high * 0.15 - crowd).clamp(0.0, 1.0);
    }
    (partial_strength(cards) - crowd).clamp(0.0, 1.0)
}

fn partial_strength(cards: &[Card]) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank().value() as usize] += 1;
    }
    let high = cards.iter().map(|c| c.rank().value()).max().unwrap_or(2) as f64;
    let mut score = (high / 14.0) * 0.35;
    for (value, &n) in counts.iter().enumerate() {
        let weight = value as f64 / 14.0;
        score += match n {
            0 | 1 => 0.0,
            2 => 0.2 + weight * 0.1,
            3 => 0.45 + weight * 0.1,
            _ => 0.7,
        };
    }
    (score + draw_bonus(cards)).clamp(0.0, 1.0)
}

fn draw_bonus(cards: &[Card]) -> f64 {
    if cards.len() < 2 {
        return 0.0;
    }
    let mut bonus = 0.0;
    let first_suit = cards[0].suit();
    if cards.iter().all(|c| c.suit() == first_suit) {
        bonus += 0.03 * cards.len() as f64;
    }

    let mut ranks: Vec<i32> = cards.iter().map(|c| c.rank().value() as i32).collect();
    ranks.sort_unstable();
    ranks.dedup();
    let distinct = ranks.len() == cards.len();
    if ranks.contains(&(Rank::Ace.value() as i32)) {
        ranks.insert(0, 1);
    }
    let connected = distinct && ranks.windows(cards.len()).any(|w| w[w.len() - 1] - w[0] <= 4);
    if connected {
        bonus += 0.02 * cards.len() as f64;
    }
    bonus
}

/// A heuristic bot. It reads only its own cards and the table's wagering
/// state, and never asks for a bet it cannot cover.
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl ActionProvider for BotAgent {
    fn next_action(&mut self, view: &TurnView<'_>) -> Action {
        let ctx = BotContext {
            to_match: view.to_match(),
            pot: view.round.pot,
            bet_to_match: view.round.bet_to_match,
            chips: view.player.chips(),
            bet: view.player.bet(),
            opponents: view.active_players().saturating_sub(1),
            cards: view.player.hand().cards(),
        };
        BotPolicy::decide(&ctx, &self.profile, &mut self.state)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}
