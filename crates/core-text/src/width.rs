//! Grapheme cluster display width.
//!
//! `egc_width` is the single authority for how many terminal columns a
//! grapheme cluster (EGC) occupies. The canvas, the document width bound and
//! the horizontal scroll clamp all derive their column math from it, so the
//! pre-rendered canvas and the computed `max_line_width` can never disagree.
//!
//! Width precedence:
//! 1. Control characters render as a single replacement column.
//! 2. Baseline `unicode_width` measurement of the cluster.
//! 3. Conservative widen: pictographic or regional indicator signal => 2.
//!
//! Invariants:
//! - Every non-empty cluster measures at least 1 column (no zero-width leaders).
//! - Over-estimation is preferred over under-estimation; an extra blank cell
//!   is harmless while a short measurement shifts every following column.

use unicode_width::UnicodeWidthStr;

fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Return the display column width for a single grapheme cluster.
///
/// Precondition: `egc` is one grapheme cluster (callers segment first).
/// Empty input returns 0.
#[inline]
pub fn egc_width(egc: &str) -> u16 {
    let Some(first) = egc.chars().next() else {
        return 0;
    };
    if first.is_control() {
        return 1;
    }
    let mut width = (UnicodeWidthStr::width(egc).clamp(1, 2)) as u16;
    if width == 1
        && egc
            .chars()
            .any(|c| is_extended_pictographic(c) || is_regional_indicator(c))
    {
        width = 2;
    }
    width
}
