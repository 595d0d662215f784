//! Group colour assignment.
//!
//! Colour ids are small integers interpreted by the renderer's style table.
//! Ids 0 and 1 are reserved (default text, frame border); groups draw from
//! the six palette ids `2..=7`.
//!
//! Assignment happens the first time a key is seen and is never revisited,
//! so a group keeps its colour for the lifetime of the session. Distinct
//! groups may share a colour: with more than six groups collisions are
//! unavoidable and the table does not try to spread them.

use ahash::{AHashMap, RandomState};
use core_config::ColorStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(pub u8);

impl ColorId {
    /// Default terminal foreground.
    pub const DEFAULT: ColorId = ColorId(0);
    /// Frame border styling.
    pub const BORDER: ColorId = ColorId(1);

    pub fn is_reserved(&self) -> bool {
        self.0 < 2
    }
}

/// Colour ids available to groups.
pub const PALETTE: [ColorId; 6] = [
    ColorId(2),
    ColorId(3),
    ColorId(4),
    ColorId(5),
    ColorId(6),
    ColorId(7),
];

// Fixed seeds make `ColorStrategy::Hash` repeatable from one run to the next.
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Maps group keys to palette colours, in first-seen order.
#[derive(Debug, Clone)]
pub struct GroupColorTable {
    hasher: RandomState,
    index: AHashMap<String, usize>,
    groups: Vec<(String, ColorId)>,
}

impl GroupColorTable {
    pub fn new(strategy: ColorStrategy) -> Self {
        let hasher = match strategy {
            ColorStrategy::Hash => {
                RandomState::with_seeds(HASH_SEEDS[0], HASH_SEEDS[1], HASH_SEEDS[2], HASH_SEEDS[3])
            }
            ColorStrategy::Random => RandomState::new(),
        };
        Self {
            hasher,
            index: AHashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Colour for `key`, assigning one on first sight.
    pub fn assign(&mut self, key: &str) -> ColorId {
        if let Some(&i) = self.index.get(key) {
            return self.groups[i].1;
        }
        let slot = (self.hasher.hash_one(key) % PALETTE.len() as u64) as usize;
        let color = PALETTE[slot];
        self.index.insert(key.to_string(), self.groups.len());
        self.groups.push((key.to_string(), color));
        tracing::trace!(target: "document.colors", group = self.groups.len(), color = color.0, "group_color_assigned");
        color
    }

    /// Previously assigned colour for `key`, if any.
    pub fn get(&self, key: &str) -> Option<ColorId> {
        self.index.get(key).map(|&i| self.groups[i].1)
    }

    /// Number of distinct groups seen.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups with their colours in the order they were first seen.
    pub fn groups(&self) -> impl Iterator<Item = (&str, ColorId)> + '_ {
        self.groups.iter().map(|(k, c)| (k.as_str(), *c))
    }
}

impl Default for GroupColorTable {
    fn default() -> Self {
        Self::new(ColorStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_excludes_reserved_ids() {
        assert!(PALETTE.iter().all(|c| !c.is_reserved()));
        assert!(ColorId::DEFAULT.is_reserved());
        assert!(ColorId::BORDER.is_reserved());
    }

    #[test]
    fn assignment_is_sticky() {
        let mut t = GroupColorTable::new(ColorStrategy::Random);
        let first = t.assign("101");
        t.assign("102");
        t.assign("103");
        assert_eq!(t.assign("101"), first);
        assert_eq!(t.get("101"), Some(first));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn hash_strategy_is_repeatable_across_tables() {
        let mut a = GroupColorTable::new(ColorStrategy::Hash);
        let mut b = GroupColorTable::new(ColorStrategy::Hash);
        // Different first-seen order must not change the outcome.
        let keys = ["7", "4242", "31337", "1", "99"];
        let from_a: Vec<_> = keys.iter().map(|k| a.assign(k)).collect();
        for k in keys.iter().rev() {
            b.assign(k);
        }
        let from_b: Vec<_> = keys.iter().map(|k| b.get(k).unwrap()).collect();
        assert_eq!(from_a, from_b);
    }

    #[test]
    fn groups_iterate_in_first_seen_order() {
        let mut t = GroupColorTable::default();
        t.assign("300");
        t.assign("100");
        t.assign("300");
        t.assign("200");
        let keys: Vec<_> = t.groups().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["300", "100", "200"]);
    }

    #[test]
    fn unknown_key_has_no_colour() {
        let t = GroupColorTable::default();
        assert!(t.get("1").is_none());
        assert!(t.is_empty());
    }
}
