//! A five-dice scoring game, the reference game for the runtime.
//!
//! Each turn a player rolls up to three times, holding dice between
//! rolls, then scores the hand into one of thirteen categories. The upper
//! six categories pay a 35-point bonus at 63+; five of a kind pays 50,
//! and each subsequent five of a kind while that box holds 50 pays a
//! 100-point bonus. The game ends when every seat has filled every
//! category.
//!
//! The module wires the game into the runtime: action sets for the turn
//! menu, named handlers and predicates in a [`RulesRegistry`], a bot
//! policy ([`bot::DiceBot`]), and a fast-forward playout for duration
//! estimation.

pub mod bot;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::actions::{Action, ActionId, ActionSet};
use crate::core::{EngineConfig, GamePhase, GameRng, Player, PlayerId};
use crate::dispatch::{Cx, Engine, View};
use crate::estimate::EstimateError;
use crate::rules::{ActionHandler, Enablement, EnabledPredicate, RulesRegistry};
use crate::session::NullSession;

/// Dice per hand.
pub const DICE_PER_HAND: usize = 5;
/// Rolls available each turn.
pub const ROLLS_PER_TURN: u8 = 3;
/// Upper-section total needed for the bonus.
pub const UPPER_BONUS_THRESHOLD: i64 = 63;
/// Upper-section bonus value.
pub const UPPER_BONUS: i64 = 35;
/// Score for five of a kind.
pub const FIVE_KIND_SCORE: i64 = 50;
/// Bonus for each extra five of a kind.
pub const FIVE_KIND_BONUS: i64 = 100;

/// A scoring category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeKind,
    FourKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    FiveKind,
    Chance,
}

impl Category {
    /// Every category, in score-sheet order.
    pub const ALL: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeKind,
        Category::FourKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::FiveKind,
        Category::Chance,
    ];

    /// The upper section, counting toward the 63-point bonus.
    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Stable identifier used in action ids and score keys.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeKind => "three_kind",
            Category::FourKind => "four_kind",
            Category::FullHouse => "full_house",
            Category::SmallStraight => "small_straight",
            Category::LargeStraight => "large_straight",
            Category::FiveKind => "five_kind",
            Category::Chance => "chance",
        }
    }

    /// Parse a category from its stable identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }

    /// The action id that scores this category.
    #[must_use]
    pub fn action_id(self) -> String {
        format!("score_{}", self.id())
    }

    /// Die face this upper category counts, if it is one.
    #[must_use]
    pub fn target_face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// Whether this category belongs to the upper section.
    #[must_use]
    pub fn is_upper(self) -> bool {
        self.target_face().is_some()
    }
}

/// Occurrences of each face 1..=6; index `face - 1`.
#[must_use]
pub fn face_counts(dice: &[u8; DICE_PER_HAND]) -> [u8; 6] {
    let mut counts = [0u8; 6];
    for &die in dice {
        if (1..=6).contains(&die) {
            counts[die as usize - 1] += 1;
        }
    }
    counts
}

/// The face with the most copies, ties broken toward the higher face.
/// Returns `(face, count)`.
#[must_use]
pub fn best_face(counts: &[u8; 6]) -> (u8, u8) {
    let mut best = (1u8, 0u8);
    for (i, &count) in counts.iter().enumerate() {
        let face = i as u8 + 1;
        if count > best.1 || (count == best.1 && face > best.0) {
            best = (face, count);
        }
    }
    best
}

/// Length of the longest consecutive face run in the hand.
#[must_use]
pub fn longest_run(dice: &[u8; DICE_PER_HAND]) -> u8 {
    let counts = face_counts(dice);
    let mut best = 0u8;
    let mut current = 0u8;
    for &count in &counts {
        if count > 0 {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Score a hand against a category under standard rules. Does not apply
/// the five-of-a-kind bonus; that lives on the seat.
#[must_use]
pub fn score_for(dice: &[u8; DICE_PER_HAND], category: Category) -> i64 {
    let counts = face_counts(dice);
    let sum: i64 = dice.iter().map(|&d| i64::from(d)).sum();

    if let Some(face) = category.target_face() {
        return i64::from(counts[face as usize - 1]) * i64::from(face);
    }

    let (_, best_count) = best_face(&counts);
    match category {
        Category::ThreeKind => {
            if best_count >= 3 {
                sum
            } else {
                0
            }
        }
        Category::FourKind => {
            if best_count >= 4 {
                sum
            } else {
                0
            }
        }
        Category::FullHouse => {
            let mut shape: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
            shape.sort_unstable_by(|a, b| b.cmp(a));
            if shape.first().copied().unwrap_or(0) >= 3 && shape.get(1).copied().unwrap_or(0) >= 2 {
                25
            } else if shape.first().copied() == Some(5) {
                // Five of a kind fills any box
                25
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if longest_run(dice) >= 4 {
                30
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if longest_run(dice) >= 5 {
                40
            } else {
                0
            }
        }
        Category::FiveKind => {
            if best_count >= 5 {
                FIVE_KIND_SCORE
            } else {
                0
            }
        }
        Category::Chance => sum,
        // Upper categories handled above
        _ => 0,
    }
}

/// One player's dice and score sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePlayer {
    /// Current hand.
    pub dice: [u8; DICE_PER_HAND],
    /// Which dice are held between rolls.
    pub held: [bool; DICE_PER_HAND],
    /// Rolls remaining this turn.
    pub rolls_left: u8,
    /// Whether the hand has been rolled at least once this turn.
    pub has_rolled: bool,
    /// Filled categories. Absent key = still open.
    pub scores: FxHashMap<Category, i64>,
    /// Extra five-of-a-kind bonuses earned.
    pub five_kind_bonuses: u32,
}

impl DicePlayer {
    /// Categories not yet filled, in score-sheet order.
    #[must_use]
    pub fn open_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.scores.contains_key(c))
            .collect()
    }

    /// Upper-section total so far, without the bonus.
    #[must_use]
    pub fn upper_total(&self) -> i64 {
        Category::UPPER
            .into_iter()
            .filter_map(|c| self.scores.get(&c))
            .sum()
    }

    /// Whether the upper bonus has been earned.
    #[must_use]
    pub fn upper_bonus_awarded(&self) -> bool {
        self.upper_total() >= UPPER_BONUS_THRESHOLD
    }

    /// Grand total including bonuses.
    #[must_use]
    pub fn total(&self) -> i64 {
        let base: i64 = self.scores.values().sum();
        let upper = if self.upper_bonus_awarded() {
            UPPER_BONUS
        } else {
            0
        };
        base + upper + i64::from(self.five_kind_bonuses) * FIVE_KIND_BONUS
    }

    /// Whether every category is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scores.len() == Category::ALL.len()
    }

    fn start_turn(&mut self) {
        self.dice = [0; DICE_PER_HAND];
        self.held = [false; DICE_PER_HAND];
        self.rolls_left = ROLLS_PER_TURN;
        self.has_rolled = false;
    }
}

/// Full game state for one table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiceGame {
    seats: FxHashMap<PlayerId, DicePlayer>,
    rng: GameRng,
}

impl DiceGame {
    /// Create a game with seats for the given players, first turn ready.
    pub fn new(seed: u64, players: &[PlayerId]) -> Self {
        let mut seats = FxHashMap::default();
        for id in players {
            let mut seat = DicePlayer::default();
            seat.start_turn();
            seats.insert(id.clone(), seat);
        }
        Self {
            seats,
            rng: GameRng::new(seed),
        }
    }

    /// A player's seat.
    #[must_use]
    pub fn seat(&self, player: &PlayerId) -> Option<&DicePlayer> {
        self.seats.get(player)
    }

    /// Mutable seat lookup.
    pub fn seat_mut(&mut self, player: &PlayerId) -> Option<&mut DicePlayer> {
        self.seats.get_mut(player)
    }

    /// Remove a seat when a player leaves mid-game.
    pub fn remove_seat(&mut self, player: &PlayerId) {
        self.seats.remove(player);
    }

    /// Roll every unheld die. No-op without rolls left.
    pub fn roll(&mut self, player: &PlayerId) {
        let Some(seat) = self.seats.get_mut(player) else {
            return;
        };
        if seat.rolls_left == 0 {
            return;
        }
        for i in 0..DICE_PER_HAND {
            if !seat.held[i] {
                seat.dice[i] = self.rng.gen_range(1..7) as u8;
            }
        }
        seat.rolls_left -= 1;
        seat.has_rolled = true;
    }

    /// Toggle a die's held flag. Out-of-range indexes are ignored.
    pub fn toggle_hold(&mut self, player: &PlayerId, index: usize) {
        if index >= DICE_PER_HAND {
            return;
        }
        if let Some(seat) = self.seats.get_mut(player) {
            if seat.has_rolled {
                seat.held[index] = !seat.held[index];
            }
        }
    }

    /// Score the current hand into a category and reset the seat for its
    /// next turn. Returns the points awarded, or `None` if the category
    /// was already filled.
    pub fn score(&mut self, player: &PlayerId, category: Category) -> Option<i64> {
        let seat = self.seats.get_mut(player)?;
        if seat.scores.contains_key(&category) {
            return None;
        }
        let points = score_for(&seat.dice, category);
        let counts = face_counts(&seat.dice);
        let (_, best_count) = best_face(&counts);
        if best_count >= 5 && seat.scores.get(&Category::FiveKind) == Some(&FIVE_KIND_SCORE) {
            seat.five_kind_bonuses += 1;
        }
        seat.scores.insert(category, points);
        seat.start_turn();
        Some(points)
    }

    /// Whether every seat has a full score sheet.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.seats.is_empty() && self.seats.values().all(DicePlayer::is_complete)
    }
}

/// The per-turn action set: roll, five hold toggles, and one score action
/// per category.
#[must_use]
pub fn turn_action_set() -> ActionSet {
    let mut set = ActionSet::new("turn").with(
        Action::new("roll", "roll-dice", "roll")
            .enabled_when("can_roll")
            .visible_when("my_turn"),
    );
    for i in 0..DICE_PER_HAND {
        set.add(
            Action::new(format!("toggle_die_{i}"), format!("toggle-die-{i}"), "toggle_die")
                .enabled_when("can_toggle")
                .visible_when("my_turn"),
        );
    }
    for category in Category::ALL {
        set.add(
            Action::new(
                category.action_id(),
                format!("score-{}", category.id()),
                "score",
            )
            .enabled_when("can_score")
            .visible_when(format!("open_{}", category.id())),
        );
    }
    set
}

struct RollHandler;

impl ActionHandler<DiceGame> for RollHandler {
    fn invoke(
        &self,
        cx: &mut Cx<'_, DiceGame>,
        player: &PlayerId,
        _action: &ActionId,
        _input: Option<&str>,
    ) {
        cx.game.roll(player);
        cx.speak(player, "dice-rolled");
    }
}

struct ToggleHandler;

impl ActionHandler<DiceGame> for ToggleHandler {
    fn invoke(
        &self,
        cx: &mut Cx<'_, DiceGame>,
        player: &PlayerId,
        action: &ActionId,
        _input: Option<&str>,
    ) {
        let Some(index) = action
            .as_str()
            .strip_prefix("toggle_die_")
            .and_then(|s| s.parse::<usize>().ok())
        else {
            return;
        };
        cx.game.toggle_hold(player, index);
    }
}

struct ScoreHandler;

impl ActionHandler<DiceGame> for ScoreHandler {
    fn invoke(
        &self,
        cx: &mut Cx<'_, DiceGame>,
        player: &PlayerId,
        action: &ActionId,
        _input: Option<&str>,
    ) {
        let Some(category) = action
            .as_str()
            .strip_prefix("score_")
            .and_then(Category::from_id)
        else {
            return;
        };
        if cx.game.score(player, category).is_none() {
            return;
        }
        trace!(player = %player, category = category.id(), "category scored");
        if cx.game.is_complete() {
            cx.engine.phase = GamePhase::Finished;
            return;
        }
        cx.end_turn();
    }
}

struct MyTurn;

impl EnabledPredicate<DiceGame> for MyTurn {
    fn check(&self, view: &View<'_, DiceGame>, player: &Player) -> Enablement {
        if view.engine.turns.current() == Some(&player.id) {
            Enablement::Enabled
        } else {
            Enablement::disabled("not-your-turn")
        }
    }
}

struct CanRoll;

impl EnabledPredicate<DiceGame> for CanRoll {
    fn check(&self, view: &View<'_, DiceGame>, player: &Player) -> Enablement {
        if view.engine.turns.current() != Some(&player.id) {
            return Enablement::disabled("not-your-turn");
        }
        match view.game.seat(&player.id) {
            Some(seat) if seat.rolls_left > 0 => Enablement::Enabled,
            _ => Enablement::disabled("no-rolls-left"),
        }
    }
}

struct CanToggle;

impl EnabledPredicate<DiceGame> for CanToggle {
    fn check(&self, view: &View<'_, DiceGame>, player: &Player) -> Enablement {
        if view.engine.turns.current() != Some(&player.id) {
            return Enablement::disabled("not-your-turn");
        }
        match view.game.seat(&player.id) {
            Some(seat) if seat.has_rolled && seat.rolls_left > 0 => Enablement::Enabled,
            _ => Enablement::disabled("roll-first"),
        }
    }
}

struct CanScore;

impl EnabledPredicate<DiceGame> for CanScore {
    fn check(&self, view: &View<'_, DiceGame>, player: &Player) -> Enablement {
        if view.engine.turns.current() != Some(&player.id) {
            return Enablement::disabled("not-your-turn");
        }
        match view.game.seat(&player.id) {
            Some(seat) if seat.has_rolled => Enablement::Enabled,
            _ => Enablement::disabled("roll-first"),
        }
    }
}

/// Register the game's handlers, predicates, and bot policy.
pub fn register_rules(registry: &mut RulesRegistry<DiceGame>) {
    registry.handler("roll", RollHandler);
    registry.handler("toggle_die", ToggleHandler);
    registry.handler("score", ScoreHandler);

    registry.enabled_predicate("my_turn", MyTurn);
    registry.enabled_predicate("can_roll", CanRoll);
    registry.enabled_predicate("can_toggle", CanToggle);
    registry.enabled_predicate("can_score", CanScore);

    registry.visible_predicate(
        "my_turn",
        |view: &View<'_, DiceGame>, player: &Player| {
            view.engine.turns.current() == Some(&player.id)
        },
    );
    for category in Category::ALL {
        registry.visible_predicate(
            format!("open_{}", category.id()),
            move |view: &View<'_, DiceGame>, player: &Player| {
                view.engine.turns.current() == Some(&player.id)
                    && view
                        .game
                        .seat(&player.id)
                        .is_some_and(|seat| !seat.scores.contains_key(&category))
            },
        );
    }

    registry.bot_policy(bot::DiceBot);
}

/// One fast-forwarded all-bot playout, for duration estimation.
///
/// Builds a private table of `player_count` bots with zero think ticks
/// and pumps the engine until the game completes, returning the tick
/// count. Exceeding `tick_ceiling` is an error so estimation workers
/// always terminate.
pub fn simulate_playout(
    player_count: usize,
    seed: u64,
    tick_ceiling: u64,
) -> Result<u64, EstimateError> {
    let mut registry = RulesRegistry::new();
    register_rules(&mut registry);

    let config = EngineConfig::new()
        .with_players(player_count, player_count)
        .with_bot_think_ticks(0);
    let mut engine = Engine::new(config);

    let ids: Vec<PlayerId> = (0..player_count)
        .map(|i| PlayerId::new(format!("sim{i}")))
        .collect();
    for id in &ids {
        engine.add_player(Player::bot(id.clone(), id.as_str()));
        engine.add_action_set(id, turn_action_set());
    }
    engine.turns.set_order(ids.clone());
    engine.phase = GamePhase::Playing;

    let mut game = DiceGame::new(seed, &ids);
    let mut session = NullSession;

    for tick in 0..tick_ceiling {
        engine.tick(&registry, &mut game, &mut session);
        if engine.phase.is_finished() {
            return Ok(tick + 1);
        }
    }
    Err(EstimateError::TickCeiling(tick_ceiling))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_scoring() {
        let dice = [3, 3, 3, 1, 5];
        assert_eq!(score_for(&dice, Category::Threes), 9);
        assert_eq!(score_for(&dice, Category::Ones), 1);
        assert_eq!(score_for(&dice, Category::Sixes), 0);
    }

    #[test]
    fn test_kind_scoring_sums_all_dice() {
        let dice = [4, 4, 4, 2, 6];
        assert_eq!(score_for(&dice, Category::ThreeKind), 20);
        assert_eq!(score_for(&dice, Category::FourKind), 0);

        let four = [4, 4, 4, 4, 6];
        assert_eq!(score_for(&four, Category::FourKind), 22);
    }

    #[test]
    fn test_full_house_and_straights() {
        assert_eq!(score_for(&[2, 2, 3, 3, 3], Category::FullHouse), 25);
        assert_eq!(score_for(&[2, 2, 3, 3, 4], Category::FullHouse), 0);
        assert_eq!(score_for(&[1, 2, 3, 4, 6], Category::SmallStraight), 30);
        assert_eq!(score_for(&[1, 2, 3, 4, 6], Category::LargeStraight), 0);
        assert_eq!(score_for(&[2, 3, 4, 5, 6], Category::LargeStraight), 40);
    }

    #[test]
    fn test_five_kind_scoring() {
        assert_eq!(score_for(&[6, 6, 6, 6, 6], Category::FiveKind), 50);
        assert_eq!(score_for(&[6, 6, 6, 6, 5], Category::FiveKind), 0);
        // Five of a kind fills a full house too
        assert_eq!(score_for(&[6, 6, 6, 6, 6], Category::FullHouse), 25);
    }

    #[test]
    fn test_chance_is_plain_sum() {
        assert_eq!(score_for(&[1, 2, 3, 4, 5], Category::Chance), 15);
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run(&[1, 2, 3, 4, 6]), 4);
        assert_eq!(longest_run(&[2, 2, 2, 2, 2]), 1);
        assert_eq!(longest_run(&[2, 3, 4, 5, 6]), 5);
    }

    #[test]
    fn test_best_face_prefers_higher_tie() {
        let counts = face_counts(&[2, 2, 5, 5, 1]);
        assert_eq!(best_face(&counts), (5, 2));
    }

    #[test]
    fn test_roll_respects_holds_and_budget() {
        let p = PlayerId::new("p1");
        let mut game = DiceGame::new(42, &[p.clone()]);

        game.roll(&p);
        let first = game.seat(&p).unwrap().dice;
        assert!(first.iter().all(|&d| (1..=6).contains(&d)));

        game.toggle_hold(&p, 0);
        game.toggle_hold(&p, 1);
        game.roll(&p);
        let second = game.seat(&p).unwrap().dice;
        assert_eq!(first[0], second[0]);
        assert_eq!(first[1], second[1]);

        game.roll(&p);
        assert_eq!(game.seat(&p).unwrap().rolls_left, 0);
        // Out of rolls: hand unchanged
        let before = game.seat(&p).unwrap().dice;
        game.roll(&p);
        assert_eq!(game.seat(&p).unwrap().dice, before);
    }

    #[test]
    fn test_score_resets_seat_and_rejects_refill() {
        let p = PlayerId::new("p1");
        let mut game = DiceGame::new(42, &[p.clone()]);
        game.roll(&p);

        assert!(game.score(&p, Category::Chance).is_some());
        let seat = game.seat(&p).unwrap();
        assert_eq!(seat.rolls_left, ROLLS_PER_TURN);
        assert!(!seat.has_rolled);
        assert!(!seat.held.iter().any(|&h| h));

        game.roll(&p);
        assert!(game.score(&p, Category::Chance).is_none());
    }

    #[test]
    fn test_five_kind_bonus_counter() {
        let p = PlayerId::new("p1");
        let mut game = DiceGame::new(42, &[p.clone()]);

        {
            let seat = game.seat_mut(&p).unwrap();
            seat.scores.insert(Category::FiveKind, FIVE_KIND_SCORE);
            seat.dice = [4, 4, 4, 4, 4];
            seat.has_rolled = true;
        }
        game.score(&p, Category::Fours);
        let seat = game.seat(&p).unwrap();
        assert_eq!(seat.five_kind_bonuses, 1);
        assert_eq!(seat.scores[&Category::Fours], 20);
    }

    #[test]
    fn test_totals_with_upper_bonus() {
        let mut seat = DicePlayer::default();
        for (category, score) in Category::UPPER.into_iter().zip([3, 6, 9, 12, 15, 18]) {
            seat.scores.insert(category, score);
        }
        assert_eq!(seat.upper_total(), 63);
        assert!(seat.upper_bonus_awarded());
        assert_eq!(seat.total(), 63 + UPPER_BONUS);
    }

    #[test]
    fn test_open_categories_in_sheet_order() {
        let mut seat = DicePlayer::default();
        seat.scores.insert(Category::Ones, 2);
        seat.scores.insert(Category::Chance, 20);

        let open = seat.open_categories();
        assert_eq!(open.len(), 11);
        assert_eq!(open[0], Category::Twos);
        assert_eq!(*open.last().unwrap(), Category::FiveKind);
    }

    #[test]
    fn test_turn_action_set_shape() {
        let set = turn_action_set();
        assert_eq!(set.len(), 1 + DICE_PER_HAND + Category::ALL.len());
        assert!(set.get("roll").is_some());
        assert!(set.get("toggle_die_4").is_some());
        assert!(set.get("score_five_kind").is_some());
    }

    #[test]
    fn test_category_id_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
        assert!(Category::from_id("yahtzee").is_none());
    }

    #[test]
    fn test_game_serialization_round_trip() {
        let p = PlayerId::new("p1");
        let mut game = DiceGame::new(42, &[p.clone()]);
        game.roll(&p);
        game.toggle_hold(&p, 2);

        let json = serde_json::to_string(&game).unwrap();
        let mut back: DiceGame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seat(&p), game.seat(&p));

        // Restored RNG continues the same sequence
        game.roll(&p);
        back.roll(&p);
        assert_eq!(back.seat(&p), game.seat(&p));
    }

    #[test]
    fn test_simulated_playout_completes() {
        let ticks = simulate_playout(2, 7, 100_000).unwrap();
        assert!(ticks > 0);
    }

    #[test]
    fn test_simulated_playout_is_deterministic() {
        assert_eq!(
            simulate_playout(3, 11, 100_000).unwrap(),
            simulate_playout(3, 11, 100_000).unwrap()
        );
    }

    #[test]
    fn test_playout_ceiling_error() {
        let err = simulate_playout(2, 7, 5).unwrap_err();
        assert_eq!(err, EstimateError::TickCeiling(5));
    }
}
