//! Property-based invariant tests for key normalization and grouping.
//!
//! 1. Normalized keys are unique, even when every record shares one id
//! 2. Normalized keys are deterministic across passes
//! 3. Grouping is a total partition of the input
//! 4. Groups appear in first-seen order and keep input order inside
//! 5. Absent or empty field values land in the Unknown group

use std::collections::HashSet;

use droplist_widgets::grouping::{GroupBy, UNKNOWN_GROUP, group, normalize};
use droplist_widgets::item::Item;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn identity() -> impl Strategy<Value = (Option<String>, Option<u8>)> {
    (
        prop::option::of(prop_oneof![Just(String::new()), "[a-c]{1,2}"]),
        prop::option::of(0u8..4),
    )
}

fn category() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![Just(String::new()), "[XYZ]"])
}

fn item() -> impl Strategy<Value = Item> {
    (identity(), category()).prop_map(|((key, id), category)| {
        let mut item = Item::new("record");
        item.key = key;
        if let Some(id) = id {
            item = item.with_id(id);
        }
        if let Some(category) = category {
            item = item.with_field("category", category);
        }
        item
    })
}

fn items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item(), 0..40)
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Key uniqueness and determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn keys_are_unique(items in items()) {
        let normalized = normalize(&items);
        let keys: HashSet<&str> = normalized.iter().map(|n| n.key.as_str()).collect();
        prop_assert_eq!(keys.len(), items.len());
    }

    #[test]
    fn shared_id_still_unique(id in 0u8..10, n in 0usize..50) {
        let items = vec![Item::new("same").with_id(id); n];
        let normalized = normalize(&items);
        let keys: HashSet<&str> = normalized.iter().map(|n| n.key.as_str()).collect();
        prop_assert_eq!(keys.len(), n);
        for (i, entry) in normalized.iter().enumerate() {
            prop_assert_eq!(&entry.key, &format!("{id}-{i}"));
        }
    }

    #[test]
    fn keys_are_deterministic(items in items()) {
        let a: Vec<String> = normalize(&items).into_iter().map(|n| n.key).collect();
        let b: Vec<String> = normalize(&items).into_iter().map(|n| n.key).collect();
        prop_assert_eq!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3-5. Partition and ordering
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grouping_is_total_partition(items in items()) {
        let groups = group(normalize(&items), &GroupBy::field("category"));
        let mut seen: Vec<usize> = groups
            .iter()
            .flat_map(|g| g.items.iter().map(|n| n.index))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..items.len()).collect::<Vec<_>>());

        let names: HashSet<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        prop_assert_eq!(names.len(), groups.len());
        for g in &groups {
            prop_assert!(!g.items.is_empty());
        }
    }

    #[test]
    fn groups_follow_first_seen_order(items in items()) {
        let rule = GroupBy::field("category");
        let groups = group(normalize(&items), &rule);

        let mut expected: Vec<String> = Vec::new();
        for item in &items {
            let key = rule.group_key(item);
            if !expected.contains(&key) {
                expected.push(key);
            }
        }
        let actual: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
        prop_assert_eq!(actual, expected);

        for g in &groups {
            let indices: Vec<usize> = g.items.iter().map(|n| n.index).collect();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn missing_category_is_unknown(items in items()) {
        let groups = group(normalize(&items), &GroupBy::field("category"));
        for g in &groups {
            for entry in &g.items {
                let raw = entry.item.fields.get("category").and_then(|v| v.as_str());
                match raw {
                    None | Some("") => prop_assert_eq!(g.key.as_str(), UNKNOWN_GROUP),
                    Some(value) => prop_assert_eq!(g.key.as_str(), value),
                }
            }
        }
    }
}
