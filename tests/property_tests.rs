//! Property tests for the pure arithmetic pieces: turn order and key
//! canonicalization.

use proptest::prelude::*;

use tabletop_engine::{canonical_key, PlayerId, TurnOrder};

fn order_of(n: usize) -> TurnOrder {
    let mut turns = TurnOrder::new();
    turns.set_order((0..n).map(|i| PlayerId::new(format!("p{i}"))).collect());
    turns
}

proptest! {
    #[test]
    fn turn_current_is_always_a_member(n in 1_usize..8, advances in 0_usize..40) {
        let mut turns = order_of(n);
        for _ in 0..advances {
            turns.advance();
        }
        let current = turns.current().expect("non-empty order has a current player");
        prop_assert!(turns.player_ids().contains(current));
    }

    #[test]
    fn turn_advance_without_skips_visits_everyone_once(n in 1_usize..8) {
        let mut turns = order_of(n);
        let mut seen = Vec::new();
        for _ in 0..n {
            seen.push(turns.current().unwrap().clone());
            turns.advance();
        }
        seen.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        seen.dedup();
        prop_assert_eq!(seen.len(), n);
        // One full lap returns to the start
        prop_assert_eq!(turns.current().unwrap().as_str(), "p0");
    }

    #[test]
    fn turn_reverse_undoes_advance(n in 2_usize..8, advances in 1_usize..20) {
        let mut turns = order_of(n);
        for _ in 0..advances {
            turns.advance();
        }
        let before = turns.current().unwrap().clone();

        turns.advance();
        turns.reverse();
        turns.advance();
        turns.reverse();
        prop_assert_eq!(turns.current().unwrap(), &before);
    }

    #[test]
    fn turn_skip_equals_extra_advances(n in 2_usize..8, skips in 0_u32..6) {
        let mut with_skip = order_of(n);
        with_skip.add_skip(skips);
        with_skip.advance();

        let mut stepped = order_of(n);
        for _ in 0..=skips {
            stepped.advance();
        }
        prop_assert_eq!(with_skip.current(), stepped.current());
        prop_assert_eq!(with_skip.skip_count(), 0);
    }

    #[test]
    fn turn_never_panics_with_removals(n in 1_usize..6, removals in 0_usize..6) {
        let mut turns = order_of(n);
        for i in 0..removals {
            turns.advance();
            turns.remove(&PlayerId::new(format!("p{}", i % n)));
        }
        turns.advance();
        prop_assert_eq!(turns.current().is_some(), !turns.is_empty());
    }

    #[test]
    fn canonical_key_is_lowercase(key in "[a-zA-Z][a-zA-Z0-9]{0,8}", s: bool, c: bool, a: bool) {
        let canon = canonical_key(&key, s, c, a);
        prop_assert_eq!(canon.clone(), canon.to_ascii_lowercase());
    }

    #[test]
    fn canonical_key_modifier_order_is_fixed(key in "[a-z][a-z0-9]{0,8}") {
        let canon = canonical_key(&key, true, true, true);
        prop_assert_eq!(canon, format!("alt+ctrl+shift+{key}"));
    }

    #[test]
    fn canonical_key_never_doubles_prefixes(key in "[a-z][a-z0-9]{0,8}", s: bool, c: bool, a: bool) {
        let once = canonical_key(&key, s, c, a);
        // Re-canonicalizing an already canonical key with the same
        // modifiers adds nothing new at the head
        let twice = canonical_key(&once, s && once.starts_with("shift+"), false, false);
        prop_assert!(!twice.contains("shift+shift+"));
        prop_assert!(!twice.contains("ctrl+ctrl+"));
    }
}
