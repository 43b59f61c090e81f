//! Property-based tests for the reaction map
//!
//! The reaction map is the one piece of real mutation logic in the system,
//! so its invariants get exercised over arbitrary toggle sequences:
//!
//! - a user appears in at most one bucket at any time
//! - toggling the same kind twice is a no-op for that user
//! - buckets never hold duplicate entries

use proptest::prelude::*;
use ripple::shared::{ReactionKind, ReactionMap};
use uuid::Uuid;

/// Strategy: an index into a small pool of users plus a reaction kind
fn toggle_op() -> impl Strategy<Value = (usize, ReactionKind)> {
    (0..8usize, prop_oneof![
        Just(ReactionKind::Like),
        Just(ReactionKind::Dislike),
        Just(ReactionKind::Heart),
        Just(ReactionKind::Angry),
        Just(ReactionKind::Laugh),
        Just(ReactionKind::Cry),
    ])
}

fn user_pool() -> Vec<Uuid> {
    (0..8).map(|_| Uuid::new_v4()).collect()
}

proptest! {
    #[test]
    fn test_user_in_at_most_one_bucket(ops in prop::collection::vec(toggle_op(), 0..64)) {
        let users = user_pool();
        let mut map = ReactionMap::new();

        for (user_index, kind) in ops {
            map.toggle(users[user_index], kind);

            for user in &users {
                let buckets_holding_user = ReactionKind::ALL
                    .iter()
                    .filter(|k| map.bucket(**k).contains(user))
                    .count();
                prop_assert!(buckets_holding_user <= 1);
            }
        }
    }

    #[test]
    fn test_double_toggle_is_identity(
        ops in prop::collection::vec(toggle_op(), 0..32),
        kind in prop_oneof![
            Just(ReactionKind::Like),
            Just(ReactionKind::Dislike),
            Just(ReactionKind::Heart),
            Just(ReactionKind::Angry),
            Just(ReactionKind::Laugh),
            Just(ReactionKind::Cry),
        ],
    ) {
        let users = user_pool();
        let mut map = ReactionMap::new();
        for (user_index, op_kind) in ops {
            map.toggle(users[user_index], op_kind);
        }

        // A fresh user toggling twice must leave the map exactly as it was.
        let newcomer = Uuid::new_v4();
        let before = map.clone();
        map.toggle(newcomer, kind);
        map.toggle(newcomer, kind);
        prop_assert_eq!(before, map);
    }

    #[test]
    fn test_no_duplicate_entries(ops in prop::collection::vec(toggle_op(), 0..64)) {
        let users = user_pool();
        let mut map = ReactionMap::new();

        for (user_index, kind) in ops {
            map.toggle(users[user_index], kind);
        }

        for kind in ReactionKind::ALL {
            let bucket = map.bucket(kind);
            let mut seen = std::collections::HashSet::new();
            for user in bucket {
                prop_assert!(seen.insert(*user), "duplicate entry in bucket");
            }
        }
    }

    #[test]
    fn test_total_never_exceeds_user_count(ops in prop::collection::vec(toggle_op(), 0..64)) {
        let users = user_pool();
        let mut map = ReactionMap::new();

        for (user_index, kind) in ops {
            map.toggle(users[user_index], kind);
        }

        prop_assert!(map.total() <= users.len());
    }

    #[test]
    fn test_serialization_roundtrip(ops in prop::collection::vec(toggle_op(), 0..32)) {
        let users = user_pool();
        let mut map = ReactionMap::new();
        for (user_index, kind) in ops {
            map.toggle(users[user_index], kind);
        }

        let json = serde_json::to_string(&map).unwrap();
        let deserialized: ReactionMap = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(map, deserialized);
    }
}
