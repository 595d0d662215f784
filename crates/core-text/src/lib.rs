//! Text measurement helpers shared by the document loader and the renderer.
//!
//! Everything that needs a column count goes through [`display_width`] so
//! the loader's `max_line_width` and the canvas layout agree cell for cell.

pub mod segment;
pub mod width;

pub use segment::{Segment, segments};
pub use width::egc_width;

/// Total display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    segments(s).map(|seg| seg.width as usize).sum()
}

/// Expand tab characters into spaces aligned to `tab_width` columns.
///
/// Columns are counted in display width, so a tab after a wide cluster still
/// lands on the next tab stop. A `tab_width` of 0 drops tabs entirely.
pub fn expand_tabs(s: &str, tab_width: usize) -> String {
    if !s.contains('\t') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + tab_width);
    let mut col = 0usize;
    for seg in segments(s) {
        if seg.cluster == "\t" {
            if tab_width == 0 {
                continue;
            }
            let pad = tab_width - (col % tab_width);
            out.extend(std::iter::repeat_n(' ', pad));
            col += pad;
        } else {
            out.push_str(seg.cluster);
            col += seg.width as usize;
        }
    }
    out
}
