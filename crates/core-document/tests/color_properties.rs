//! Property tests: a group keeps its colour for the whole session.

use core_config::{ColorStrategy, DEFAULT_KEY_PATTERN};
use core_document::{KeyExtractor, LineStore, PALETTE};
use proptest::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;

fn strategy() -> impl Strategy<Value = ColorStrategy> {
    prop_oneof![Just(ColorStrategy::Hash), Just(ColorStrategy::Random)]
}

proptest! {
    #[test]
    fn every_line_of_a_group_has_the_same_colour(
        keys in prop::collection::vec(1u32..40, 1..200),
        colors in strategy(),
    ) {
        let body: String = keys.iter().map(|k| format!("{k} syscall()\n")).collect();
        let store = LineStore::new(KeyExtractor::new(DEFAULT_KEY_PATTERN).unwrap(), colors, 4);
        let doc = store.parse("prop".to_string(), Cursor::new(body.into_bytes())).unwrap();
        prop_assert_eq!(doc.total_lines(), keys.len());

        let mut seen = HashMap::new();
        for line in doc.lines() {
            prop_assert!(PALETTE.contains(&line.color()));
            let first = *seen.entry(line.group_key().to_string()).or_insert(line.color());
            prop_assert_eq!(first, line.color());
            prop_assert_eq!(doc.groups().get(line.group_key()), Some(first));
        }
        prop_assert_eq!(doc.groups().len(), seen.len());
    }
}
