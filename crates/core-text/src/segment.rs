//! Grapheme segmentation adapter.
//!
//! Contract:
//! - Clusters are yielded in order, non-overlapping, and concatenate back to
//!   the input.
//! - Each segment carries its display width as reported by `egc_width`.
//! - Does not log content; callers must not log raw trace text either.

use crate::egc_width;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub cluster: &'a str,
    pub width: u16,
}

/// Iterate the grapheme clusters of `input` with their display widths.
pub fn segments(input: &str) -> impl Iterator<Item = Segment<'_>> + '_ {
    input.graphemes(true).map(|g| Segment {
        cluster: g,
        width: egc_width(g),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clusters_concat_back_to_input() {
        let s = "漢😀e\u{0301}a";
        let joined: String = segments(s).map(|seg| seg.cluster).collect();
        assert_eq!(joined, s);
        let widths: Vec<u16> = segments(s).map(|seg| seg.width).collect();
        assert_eq!(widths, vec![2, 2, 1, 1]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(segments("").count(), 0);
    }
}
