//! Status line composition.
//!
//! Format: ` <name>  lines <first>-<last>/<total>  col <h_scroll>  groups <n> `
//! with 1-based line numbers. An empty document shows `lines 0/0`. The
//! result is padded or truncated (never splitting a grapheme cluster) to
//! exactly the terminal width so it overwrites the previous status in place.

use core_model::{DocExtent, ViewportState};
use core_text::segments;
use std::fmt::Write as _;

/// What the status line needs to know.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub name: &'a str,
    pub state: &'a ViewportState,
    pub extent: DocExtent,
    pub groups: usize,
}

pub fn compose_status(ctx: &StatusContext<'_>) -> String {
    let mut s = String::with_capacity(64);
    let _ = write!(s, " {}  lines ", ctx.name);
    match ctx.state.bottom_index(ctx.extent) {
        Some(bottom) => {
            let _ = write!(
                s,
                "{}-{}/{}",
                ctx.state.doc_top + 1,
                bottom + 1,
                ctx.extent.total_lines
            );
        }
        None => s.push_str("0/0"),
    }
    let _ = write!(s, "  col {}  groups {} ", ctx.state.h_scroll, ctx.groups);
    s
}

/// Fit `text` to exactly `width` columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut col = 0;
    for seg in segments(text) {
        let w = seg.width as usize;
        if col + w > width {
            break;
        }
        out.push_str(seg.cluster);
        col += w;
    }
    out.extend(std::iter::repeat_n(' ', width - col));
    out
}

pub fn build_status_line(ctx: &StatusContext<'_>, width: usize) -> String {
    fit_to_width(&compose_status(ctx), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx<'a>(state: &'a ViewportState, extent: DocExtent) -> StatusContext<'a> {
        StatusContext {
            name: "app.trace",
            state,
            extent,
            groups: 3,
        }
    }

    #[test]
    fn shows_one_based_range() {
        let mut state = ViewportState::new(10, 80, 60);
        state.doc_top = 4;
        state.h_scroll = 7;
        let s = compose_status(&ctx(&state, DocExtent::new(100, 90)));
        assert_eq!(s, " app.trace  lines 5-14/100  col 7  groups 3 ");
    }

    #[test]
    fn short_document_range_ends_at_last_line() {
        let state = ViewportState::new(10, 80, 60);
        let s = compose_status(&ctx(&state, DocExtent::new(3, 10)));
        assert_eq!(s, " app.trace  lines 1-3/3  col 0  groups 3 ");
    }

    #[test]
    fn empty_document() {
        let state = ViewportState::new(10, 80, 60);
        let s = compose_status(&ctx(&state, DocExtent::default()));
        assert_eq!(s, " app.trace  lines 0/0  col 0  groups 3 ");
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 3), "abc");
        assert_eq!(fit_to_width("a漢", 2), "a ");
    }
}
