//! Viewport state machine.
//!
//! The viewer never re-derives the whole screen from scratch after startup.
//! Instead every key press is one transition of [`ViewportState`] that also
//! names the smallest screen update able to reproduce it (a [`RenderOp`]).
//! The transition itself is a pure function of `(state, extent, direction)`
//! so it can be exercised without a terminal; [`ViewportController`] binds
//! it to a loaded [`Document`].
//!
//! Coordinates:
//! * `doc_top` is the document index shown on the first text row.
//! * `cursor_y` is 0-based within the visible rows.
//! * `cursor_x` is 0-based within `0..=content_width_bound`.
//! * `h_scroll` is the number of display columns hidden to the left.
//!
//! Invariants (checked in debug builds after every step):
//! * `doc_top + min(viewport_height, total) <= total`
//! * `cursor_y < max(1, visible_rows)`
//! * `cursor_x <= content_width_bound`
//! * `h_scroll <= max(content_width_bound, max_line_width)`

use core_document::{Document, Line};
use core_events::Direction;
use tracing::trace;

pub mod layout;

pub use layout::{Layout, LayoutRegion, TerminalTooSmall};

/// The document dimensions a transition depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocExtent {
    pub total_lines: usize,
    pub max_line_width: usize,
}

impl DocExtent {
    pub fn new(total_lines: usize, max_line_width: usize) -> Self {
        Self {
            total_lines,
            max_line_width,
        }
    }

    pub fn of(document: &Document) -> Self {
        Self::new(document.total_lines(), document.max_line_width())
    }
}

/// Minimal screen update implied by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOp {
    /// Nothing visible changed (edge hit).
    Unchanged,
    /// Only the cursor position moved.
    MoveCursorOnly,
    /// Every visible row must be re-clipped at the new `h_scroll`.
    HorizontalShift { delta: isize },
    /// Rows moved up by one; `entering` is the document index now on the
    /// last text row.
    ScrollDown { entering: usize },
    /// Rows moved down by one; `entering` is the document index now on the
    /// first text row.
    ScrollUp { entering: usize },
}

impl RenderOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderOp::Unchanged => "unchanged",
            RenderOp::MoveCursorOnly => "move_cursor_only",
            RenderOp::HorizontalShift { .. } => "horizontal_shift",
            RenderOp::ScrollDown { .. } => "scroll_down",
            RenderOp::ScrollUp { .. } => "scroll_up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub viewport_height: usize,
    pub viewport_width: usize,
    pub content_width_bound: usize,
    pub h_scroll: usize,
    pub doc_top: usize,
    pub cursor_x: usize,
    pub cursor_y: usize,
}

/// Result of one step: the successor state and how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewportState,
    pub op: RenderOp,
}

impl ViewportState {
    /// Initial state: top of the document, no horizontal scroll, cursor at
    /// the origin of the text area.
    pub fn new(viewport_height: usize, viewport_width: usize, content_width_bound: usize) -> Self {
        Self {
            viewport_height,
            viewport_width,
            content_width_bound,
            h_scroll: 0,
            doc_top: 0,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn from_layout(layout: &Layout) -> Self {
        Self::new(
            layout.viewport_height() as usize,
            layout.columns() as usize,
            layout.content_width_bound() as usize,
        )
    }

    /// Rows actually occupied by document lines.
    pub fn visible_rows(&self, extent: DocExtent) -> usize {
        self.viewport_height.min(extent.total_lines)
    }

    /// Document index of the last visible line, if any.
    pub fn bottom_index(&self, extent: DocExtent) -> Option<usize> {
        match self.visible_rows(extent) {
            0 => None,
            n => Some(self.doc_top + n - 1),
        }
    }

    /// Document index under the cursor, if any.
    pub fn cursor_line(&self, extent: DocExtent) -> Option<usize> {
        (self.visible_rows(extent) > 0).then_some(self.doc_top + self.cursor_y)
    }

    pub fn max_h_scroll(&self, extent: DocExtent) -> usize {
        self.content_width_bound.max(extent.max_line_width)
    }

    /// Apply one cursor move.
    #[must_use]
    pub fn step(&self, extent: DocExtent, direction: Direction) -> Transition {
        let mut next = *self;
        let op = match direction {
            Direction::Down => next.step_down(extent),
            Direction::Up => next.step_up(),
            Direction::Left => {
                next.cursor_x = next.cursor_x.saturating_sub(1);
                next.h_scroll = next.h_scroll.saturating_sub(1);
                self.horizontal_op(&next)
            }
            Direction::Right => {
                if next.cursor_x < next.content_width_bound {
                    next.cursor_x += 1;
                }
                next.h_scroll = (next.h_scroll + 1).min(next.max_h_scroll(extent));
                self.horizontal_op(&next)
            }
        };
        debug_assert!(next.holds_invariants(extent), "{next:?} / {extent:?}");
        Transition { state: next, op }
    }

    fn step_down(&mut self, extent: DocExtent) -> RenderOp {
        let visible = self.visible_rows(extent);
        if self.cursor_y + 1 < visible {
            self.cursor_y += 1;
            RenderOp::MoveCursorOnly
        } else if self.doc_top + self.viewport_height < extent.total_lines {
            self.doc_top += 1;
            RenderOp::ScrollDown {
                entering: self.doc_top + self.viewport_height - 1,
            }
        } else {
            RenderOp::Unchanged
        }
    }

    fn step_up(&mut self) -> RenderOp {
        if self.cursor_y > 0 {
            self.cursor_y -= 1;
            RenderOp::MoveCursorOnly
        } else if self.doc_top > 0 {
            self.doc_top -= 1;
            RenderOp::ScrollUp {
                entering: self.doc_top,
            }
        } else {
            RenderOp::Unchanged
        }
    }

    fn horizontal_op(&self, next: &ViewportState) -> RenderOp {
        if next.h_scroll != self.h_scroll {
            RenderOp::HorizontalShift {
                delta: next.h_scroll as isize - self.h_scroll as isize,
            }
        } else if next.cursor_x != self.cursor_x {
            RenderOp::MoveCursorOnly
        } else {
            RenderOp::Unchanged
        }
    }

    pub fn holds_invariants(&self, extent: DocExtent) -> bool {
        let visible = self.visible_rows(extent);
        self.doc_top + visible <= extent.total_lines
            && self.cursor_y < visible.max(1)
            && self.cursor_x <= self.content_width_bound
            && self.h_scroll <= self.max_h_scroll(extent)
    }
}

/// Viewport bound to a document for the lifetime of a session.
#[derive(Debug)]
pub struct ViewportController<'d> {
    document: &'d Document,
    extent: DocExtent,
    state: ViewportState,
}

impl<'d> ViewportController<'d> {
    pub fn new(document: &'d Document, state: ViewportState) -> Self {
        Self {
            document,
            extent: DocExtent::of(document),
            state,
        }
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn extent(&self) -> DocExtent {
        self.extent
    }

    /// Advance the state and report the render operation it needs.
    pub fn apply(&mut self, direction: Direction) -> RenderOp {
        let Transition { state, op } = self.state.step(self.extent, direction);
        trace!(
            target: "viewport",
            direction = direction.as_str(),
            op = op.as_str(),
            doc_top = state.doc_top,
            cursor_x = state.cursor_x,
            cursor_y = state.cursor_y,
            h_scroll = state.h_scroll,
            "viewport_step"
        );
        self.state = state;
        op
    }

    /// Lines currently shown, top to bottom.
    pub fn visible_lines(&self) -> impl Iterator<Item = &'d Line> + 'd {
        let start = self.state.doc_top;
        let end = start + self.state.visible_rows(self.extent);
        self.document.lines()[start..end].iter()
    }
}
