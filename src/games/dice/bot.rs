//! Bot strategy for the dice game.
//!
//! Heuristic rather than optimal: while rolls remain the bot picks a
//! target category by potential value, holds the dice that serve it, and
//! rerolls the rest; once out of rolls (or holding everything) it scores
//! the category with the best immediate utility, weighting progress
//! toward the upper bonus and the five-of-a-kind bonus.

use crate::actions::ActionId;
use crate::core::Player;
use crate::dispatch::View;
use crate::rules::BotPolicy;

use super::{
    best_face, face_counts, longest_run, Category, DiceGame, DicePlayer, DICE_PER_HAND,
    FIVE_KIND_SCORE, UPPER_BONUS_THRESHOLD,
};

/// The dice game's turn policy for bot players.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiceBot;

impl BotPolicy<DiceGame> for DiceBot {
    fn decide(&self, view: &View<'_, DiceGame>, player: &Player) -> Option<ActionId> {
        if view.engine.turns.current() != Some(&player.id) {
            return None;
        }
        let seat = view.game.seat(&player.id)?;

        if !seat.has_rolled {
            return Some(ActionId::new("roll"));
        }

        let open = seat.open_categories();
        if open.is_empty() {
            return None;
        }

        let bonus_eligible = seat.scores.get(&Category::FiveKind) == Some(&FIVE_KIND_SCORE);

        if seat.rolls_left > 0 {
            let target = pick_target(&seat.dice, &open, seat.rolls_left, bonus_eligible);

            let counts = face_counts(&seat.dice);
            let (top_face, top_count) = best_face(&counts);
            // Bonus override: with four matching dice and the bonus live,
            // chase the fifth regardless of the target category.
            let desired = if bonus_eligible && top_count >= 4 {
                keep_matching(&seat.dice, top_face)
            } else {
                desired_keeps(&seat.dice, target)
            };

            for i in 0..DICE_PER_HAND {
                if desired[i] != seat.held[i] {
                    return Some(ActionId::new(format!("toggle_die_{i}")));
                }
            }

            if desired.iter().filter(|&&k| k).count() < DICE_PER_HAND {
                return Some(ActionId::new("roll"));
            }
        }

        Some(pick_best_category(seat, &open))
    }
}

fn keep_matching(dice: &[u8; DICE_PER_HAND], face: u8) -> [bool; DICE_PER_HAND] {
    let mut keep = [false; DICE_PER_HAND];
    for (i, &die) in dice.iter().enumerate() {
        keep[i] = die == face;
    }
    keep
}

fn keep_highest(dice: &[u8; DICE_PER_HAND]) -> [bool; DICE_PER_HAND] {
    let mut keep = [false; DICE_PER_HAND];
    let mut best = 0usize;
    for (i, &die) in dice.iter().enumerate() {
        if die > dice[best] {
            best = i;
        }
    }
    keep[best] = true;
    keep
}

/// Category to pursue while rolls remain.
fn pick_target(
    dice: &[u8; DICE_PER_HAND],
    open: &[Category],
    rolls_left: u8,
    bonus_eligible: bool,
) -> Category {
    let mut best_cat = open[0];
    let mut best_value = -1.0f64;
    for &cat in open {
        let value = category_potential(dice, cat, rolls_left, bonus_eligible);
        if value > best_value {
            best_value = value;
            best_cat = cat;
        }
    }
    best_cat
}

/// Heuristic value of pursuing a category with rolls remaining.
fn category_potential(
    dice: &[u8; DICE_PER_HAND],
    category: Category,
    rolls_left: u8,
    bonus_eligible: bool,
) -> f64 {
    let counts = face_counts(dice);
    let (top_face, top_count) = best_face(&counts);
    let top_face = f64::from(top_face);
    let top_count_f = f64::from(top_count);
    let rolls = f64::from(rolls_left);
    let run = f64::from(longest_run(dice));
    let sum: f64 = dice.iter().map(|&d| f64::from(d)).sum();

    if let Some(face) = category.target_face() {
        let matched = f64::from(counts[face as usize - 1]);
        let face = f64::from(face);
        return matched * face + (5.0 - matched) * face * 0.35 * rolls;
    }

    match category {
        Category::ThreeKind => {
            if top_count >= 3 {
                let reroll = 5.0 - top_count_f;
                sum + reroll * rolls
            } else {
                let need = f64::from(3 - top_count);
                top_count_f * top_face + need * top_face * 1.5 * rolls
            }
        }
        Category::FourKind => {
            if top_count >= 4 {
                let reroll = 5.0 - top_count_f;
                sum + reroll * rolls
            } else {
                let need = f64::from(4 - top_count);
                top_count_f * top_face + need * top_face * 1.2 * rolls
            }
        }
        Category::FiveKind => {
            let bonus = if bonus_eligible { 100.0 } else { 0.0 };
            if top_count == 5 {
                50.0 + bonus
            } else if top_count >= 3 {
                top_count_f * 8.0 + (5.0 - top_count_f) * 3.0 * rolls + bonus * 0.1
            } else {
                top_count_f * 5.0 + rolls * 2.0
            }
        }
        Category::FullHouse => {
            let mut shape: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
            shape.sort_unstable_by(|a, b| b.cmp(a));
            let first = shape.first().copied().unwrap_or(0);
            let second = shape.get(1).copied().unwrap_or(0);
            if first >= 3 && second >= 2 {
                45.0
            } else if first >= 3 && shape.len() >= 2 {
                28.0 + rolls * 4.0
            } else if first >= 2 && second >= 2 {
                24.0 + rolls * 3.0
            } else {
                10.0 + rolls * 2.0
            }
        }
        Category::SmallStraight => {
            if run >= 4.0 {
                35.0
            } else {
                run * 7.0 + rolls * 4.0
            }
        }
        Category::LargeStraight => {
            if run >= 5.0 {
                48.0
            } else {
                run * 6.0 + rolls * 3.0
            }
        }
        Category::Chance => {
            let low = dice.iter().filter(|&&d| d < 4).count() as f64;
            sum + low * 1.5 * rolls
        }
        // Upper categories handled above
        _ => 0.0,
    }
}

/// Which dice to hold while pursuing a category.
fn desired_keeps(dice: &[u8; DICE_PER_HAND], category: Category) -> [bool; DICE_PER_HAND] {
    let counts = face_counts(dice);

    if let Some(face) = category.target_face() {
        let keep = keep_matching(dice, face);
        return if keep.iter().any(|&k| k) {
            keep
        } else {
            keep_highest(dice)
        };
    }

    match category {
        Category::ThreeKind | Category::FourKind | Category::FiveKind => {
            let (top_face, _) = best_face(&counts);
            let keep = keep_matching(dice, top_face);
            if keep.iter().any(|&k| k) {
                keep
            } else {
                keep_highest(dice)
            }
        }
        Category::FullHouse => {
            // The two faces ranked by (count, face), descending.
            let mut faces: Vec<u8> = (1..=6).filter(|&f| counts[f as usize - 1] > 0).collect();
            faces.sort_unstable_by_key(|&f| std::cmp::Reverse((counts[f as usize - 1], f)));
            faces.truncate(2);
            let mut keep = [false; DICE_PER_HAND];
            for (i, &die) in dice.iter().enumerate() {
                keep[i] = faces.contains(&die);
            }
            if keep.iter().any(|&k| k) {
                keep
            } else {
                keep_highest(dice)
            }
        }
        Category::SmallStraight | Category::LargeStraight => {
            let run = best_run_faces(&counts);
            let mut keep = [false; DICE_PER_HAND];
            let mut used = [false; 6];
            for (i, &die) in dice.iter().enumerate() {
                if run.contains(&die) && !used[die as usize - 1] {
                    keep[i] = true;
                    used[die as usize - 1] = true;
                }
            }
            if keep.iter().any(|&k| k) {
                keep
            } else {
                keep_highest(dice)
            }
        }
        Category::Chance => {
            let mut keep = [false; DICE_PER_HAND];
            for (i, &die) in dice.iter().enumerate() {
                keep[i] = die >= 4;
            }
            if keep.iter().any(|&k| k) {
                keep
            } else {
                keep_highest(dice)
            }
        }
        _ => keep_highest(dice),
    }
}

/// The faces of the longest consecutive run present in the hand.
fn best_run_faces(counts: &[u8; 6]) -> Vec<u8> {
    let mut best_start = 0u8;
    let mut best_len = 0u8;
    let mut start = 0u8;
    let mut length = 0u8;
    for face in 1..=6u8 {
        if counts[face as usize - 1] > 0 {
            if length == 0 {
                start = face;
            }
            length += 1;
            if length > best_len {
                best_len = length;
                best_start = start;
            }
        } else {
            length = 0;
        }
    }
    (best_start..best_start + best_len).collect()
}

/// The best category to score right now, as a score action id.
fn pick_best_category(seat: &DicePlayer, open: &[Category]) -> ActionId {
    let counts = face_counts(&seat.dice);
    let (_, top_count) = best_face(&counts);
    // With five of a kind on the table and the box already holding 50,
    // the 100-point bonus arrives whatever we score, so pick by base score.
    let bonus_active =
        top_count >= 5 && seat.scores.get(&Category::FiveKind) == Some(&FIVE_KIND_SCORE);

    let upper_before = seat.upper_total();
    let mut best_cat: Option<Category> = None;
    let mut best_utility = -1.0f64;
    let mut best_score = 0i64;

    for &cat in open {
        let score = super::score_for(&seat.dice, cat);
        let mut utility = score as f64;
        if bonus_active {
            utility += 100.0;
        }
        if cat.is_upper() {
            let before_gap = (UPPER_BONUS_THRESHOLD - upper_before).max(0);
            let after_gap = (UPPER_BONUS_THRESHOLD - (upper_before + score)).max(0);
            if before_gap > 0 {
                utility += (before_gap - after_gap) as f64 * 0.2;
            }
            if before_gap > 0 && after_gap == 0 {
                utility += 35.0;
            }
        }
        if utility > best_utility {
            best_utility = utility;
            best_cat = Some(cat);
            best_score = score;
        }
    }

    if let Some(cat) = best_cat {
        if best_score > 0 {
            return ActionId::new(cat.action_id());
        }
    }

    // Forced to zero a box: waste the hardest-to-fill first, but protect
    // upper boxes while the 63-point bonus is still reachable.
    let mut waste = vec![
        Category::FiveKind,
        Category::LargeStraight,
        Category::SmallStraight,
        Category::FullHouse,
        Category::FourKind,
        Category::ThreeKind,
    ];
    if !seat.upper_bonus_awarded() && upper_before < UPPER_BONUS_THRESHOLD {
        waste.extend([
            Category::Ones,
            Category::Twos,
            Category::Threes,
            Category::Chance,
            Category::Fours,
            Category::Fives,
            Category::Sixes,
        ]);
    } else {
        waste.extend([
            Category::Chance,
            Category::Ones,
            Category::Twos,
            Category::Threes,
            Category::Fours,
            Category::Fives,
            Category::Sixes,
        ]);
    }
    for cat in waste {
        if open.contains(&cat) {
            return ActionId::new(cat.action_id());
        }
    }
    ActionId::new(Category::ALL[0].action_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, GamePhase, PlayerId};
    use crate::dispatch::Engine;
    use crate::games::dice::turn_action_set;

    fn table() -> (Engine, DiceGame, Player) {
        let mut engine = Engine::new(EngineConfig::default().with_bot_think_ticks(0));
        let bot = Player::bot("b1", "Robo");
        engine.add_player(bot.clone());
        engine.add_player(Player::bot("b2", "Roby"));
        engine.add_action_set(&bot.id, turn_action_set());
        engine
            .turns
            .set_order(vec![PlayerId::new("b1"), PlayerId::new("b2")]);
        engine.phase = GamePhase::Playing;

        let game = DiceGame::new(42, &[PlayerId::new("b1"), PlayerId::new("b2")]);
        (engine, game, bot)
    }

    fn decide(engine: &Engine, game: &DiceGame, player: &Player) -> Option<ActionId> {
        let view = View { engine, game };
        DiceBot.decide(&view, player)
    }

    #[test]
    fn test_waits_out_of_turn() {
        let (mut engine, game, bot) = table();
        engine.turns.set_current(&PlayerId::new("b2"));
        assert!(decide(&engine, &game, &bot).is_none());
    }

    #[test]
    fn test_rolls_first() {
        let (engine, game, bot) = table();
        assert_eq!(decide(&engine, &game, &bot).unwrap().as_str(), "roll");
    }

    #[test]
    fn test_holds_the_triple_before_last_roll() {
        let (engine, mut game, bot) = table();
        {
            let seat = game.seat_mut(&bot.id).unwrap();
            seat.dice = [1, 1, 1, 4, 5];
            seat.has_rolled = true;
            seat.rolls_left = 1;
        }

        // Wants the triple held: first mismatched die gets toggled.
        let action = decide(&engine, &game, &bot).unwrap();
        assert_eq!(action.as_str(), "toggle_die_0");

        // Apply toggles until the holds match, then the bot rerolls.
        let mut steps = 0;
        loop {
            let action = decide(&engine, &game, &bot).unwrap();
            if action.as_str() == "roll" {
                break;
            }
            let index: usize = action
                .as_str()
                .strip_prefix("toggle_die_")
                .unwrap()
                .parse()
                .unwrap();
            game.toggle_hold(&bot.id, index);
            steps += 1;
            assert!(steps <= 5, "bot toggled endlessly");
        }
        let seat = game.seat(&bot.id).unwrap();
        // The three ones always end up held
        assert!(seat.held[0] && seat.held[1] && seat.held[2]);
    }

    #[test]
    fn test_sole_open_three_kind_keeps_only_the_triple() {
        let (engine, mut game, bot) = table();
        {
            let seat = game.seat_mut(&bot.id).unwrap();
            for cat in Category::ALL {
                if cat != Category::ThreeKind {
                    seat.scores.insert(cat, 0);
                }
            }
            seat.dice = [1, 1, 1, 4, 5];
            seat.has_rolled = true;
            seat.rolls_left = 1;
        }

        // Pursuing three of a kind: hold exactly the three ones.
        assert_eq!(decide(&engine, &game, &bot).unwrap().as_str(), "toggle_die_0");
        game.toggle_hold(&bot.id, 0);
        assert_eq!(decide(&engine, &game, &bot).unwrap().as_str(), "toggle_die_1");
        game.toggle_hold(&bot.id, 1);
        assert_eq!(decide(&engine, &game, &bot).unwrap().as_str(), "toggle_die_2");
        game.toggle_hold(&bot.id, 2);

        // Holds now match the desired keeps: reroll the loose dice.
        assert_eq!(decide(&engine, &game, &bot).unwrap().as_str(), "roll");
    }

    #[test]
    fn test_scores_when_out_of_rolls() {
        let (engine, mut game, bot) = table();
        {
            let seat = game.seat_mut(&bot.id).unwrap();
            seat.dice = [3, 3, 3, 3, 2];
            seat.has_rolled = true;
            seat.rolls_left = 0;
        }

        let action = decide(&engine, &game, &bot).unwrap();
        assert!(action.as_str().starts_with("score_"));
    }

    #[test]
    fn test_keeps_full_hand_and_scores_large_straight() {
        let (engine, mut game, bot) = table();
        {
            let seat = game.seat_mut(&bot.id).unwrap();
            seat.dice = [2, 3, 4, 5, 6];
            seat.held = [true; 5];
            seat.has_rolled = true;
            seat.rolls_left = 1;
        }

        // Nothing to improve: all five dice serve the straight.
        let action = decide(&engine, &game, &bot).unwrap();
        assert_eq!(action.as_str(), "score_large_straight");
    }

    #[test]
    fn test_bonus_override_chases_fifth_die() {
        let (engine, mut game, bot) = table();
        {
            let seat = game.seat_mut(&bot.id).unwrap();
            seat.scores.insert(Category::FiveKind, FIVE_KIND_SCORE);
            seat.dice = [6, 6, 6, 6, 2];
            seat.has_rolled = true;
            seat.rolls_left = 2;
        }

        // Holds the four sixes one at a time, then rerolls the last die.
        let mut seen = Vec::new();
        loop {
            let action = decide(&engine, &game, &bot).unwrap();
            if action.as_str() == "roll" {
                break;
            }
            let index: usize = action
                .as_str()
                .strip_prefix("toggle_die_")
                .unwrap()
                .parse()
                .unwrap();
            game.toggle_hold(&bot.id, index);
            seen.push(index);
            assert!(seen.len() <= 5, "bot toggled endlessly");
        }
        let seat = game.seat(&bot.id).unwrap();
        assert_eq!(seat.held, [true, true, true, true, false]);
    }

    #[test]
    fn test_upper_bonus_weighting_prefers_sixes() {
        let mut seat = DicePlayer::default();
        // 45 in the upper section: 18 from sixes crosses the 63 threshold.
        for (cat, score) in Category::UPPER[..5].iter().zip([3, 6, 9, 12, 15]) {
            seat.scores.insert(*cat, score);
        }
        seat.dice = [6, 6, 6, 1, 2];
        seat.has_rolled = true;
        seat.rolls_left = 0;

        let action = pick_best_category(&seat, &seat.open_categories());
        assert_eq!(action.as_str(), "score_sixes");
    }

    #[test]
    fn test_wastes_five_kind_first() {
        let mut seat = DicePlayer::default();
        seat.dice = [1, 2, 2, 3, 5];
        seat.has_rolled = true;
        seat.rolls_left = 0;
        // Leave only zero-scoring options open.
        for cat in [
            Category::Chance,
            Category::Ones,
            Category::Twos,
            Category::Threes,
            Category::Fives,
        ] {
            seat.scores.insert(cat, 1);
        }

        let open = seat.open_categories();
        // Hand scores zero in everything still open except four/three kind
        // which also score zero here, so the waste order applies.
        let action = pick_best_category(&seat, &open);
        assert_eq!(action.as_str(), "score_five_kind");
    }

    #[test]
    fn test_straight_keeps_one_die_per_face() {
        let desired = desired_keeps(&[2, 2, 3, 4, 6], Category::SmallStraight);
        // One of the twos, the three, and the four
        assert_eq!(desired, [true, false, true, true, false]);
    }

    #[test]
    fn test_chance_keeps_high_dice() {
        let desired = desired_keeps(&[1, 2, 6, 5, 3], Category::Chance);
        assert_eq!(desired, [false, false, true, true, false]);
    }

    #[test]
    fn test_best_run_faces() {
        assert_eq!(best_run_faces(&face_counts(&[1, 2, 3, 5, 6])), vec![1, 2, 3]);
        assert_eq!(
            best_run_faces(&face_counts(&[2, 3, 4, 5, 6])),
            vec![2, 3, 4, 5, 6]
        );
    }
}
