//! Screen geometry.
//!
//! Derived once from the terminal size at startup (there is no resize
//! handling). Coordinates are terminal cells, origin top-left.
//!
//! ```text
//!  col 0                  content_width_bound
//!  ┌───────────────────────┐   <- row 0 (frame top)
//!  │ text area             │      sidebar margin (blank)
//!  │ rows 1..=rows-3       │
//!  └───────────────────────┘   <- row rows-2 (frame bottom)
//!  status line                 <- row rows-1
//! ```
//!
//! Invariants:
//! * `content_width_bound = floor(columns * ratio)`, capped at `columns - 1`
//!   so the right frame edge is always on screen.
//! * The text area is strictly inside the frame: origin `(1, 1)`, width
//!   `content_width_bound - 1`, height `rows - 3`.
//! * Construction fails with [`TerminalTooSmall`] rather than producing a
//!   degenerate (zero-height or one-column) text area.

use thiserror::Error;

const MIN_TEXT_WIDTH: u16 = 2;
const MIN_TEXT_HEIGHT: u16 = 1;
// Frame top + frame bottom + status line.
const RESERVED_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("terminal too small: {columns}x{rows}")]
pub struct TerminalTooSmall {
    pub columns: u16,
    pub rows: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Last column inside the region.
    pub fn right(&self) -> u16 {
        self.x + self.width.saturating_sub(1)
    }

    /// Last row inside the region.
    pub fn bottom(&self) -> u16 {
        self.y + self.height.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    columns: u16,
    rows: u16,
    content_width_bound: u16,
    frame: LayoutRegion,
    text: LayoutRegion,
}

impl Layout {
    pub fn compute(columns: u16, rows: u16, ratio: f32) -> Result<Self, TerminalTooSmall> {
        let too_small = TerminalTooSmall { columns, rows };
        let bound = ((columns as f32) * ratio).floor() as u16;
        let bound = bound.min(columns.saturating_sub(1));
        let text_width = bound.saturating_sub(1);
        if text_width < MIN_TEXT_WIDTH || rows < RESERVED_ROWS + MIN_TEXT_HEIGHT {
            return Err(too_small);
        }
        let frame = LayoutRegion::new(0, 0, bound + 1, rows - 1);
        let text = LayoutRegion::new(1, 1, text_width, rows - RESERVED_ROWS);
        Ok(Self {
            columns,
            rows,
            content_width_bound: bound,
            frame,
            text,
        })
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn content_width_bound(&self) -> u16 {
        self.content_width_bound
    }

    /// Bordered frame around the text area.
    pub fn frame(&self) -> LayoutRegion {
        self.frame
    }

    /// Region lines are painted into.
    pub fn text_area(&self) -> LayoutRegion {
        self.text
    }

    /// Number of document rows visible at once.
    pub fn viewport_height(&self) -> u16 {
        self.text.height
    }

    pub fn status_row(&self) -> u16 {
        self.rows - 1
    }

    /// Columns right of the frame reserved for a sidebar; may be empty.
    pub fn sidebar(&self) -> LayoutRegion {
        let x = self.frame.right() + 1;
        LayoutRegion::new(x, 0, self.columns.saturating_sub(x), self.frame.height)
    }
}
