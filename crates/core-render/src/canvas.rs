//! Off-screen canvas backing the text area.
//!
//! The canvas holds exactly `viewport_height` rows and is at least as wide
//! as the widest document line, so a line is laid out once when it enters
//! the viewport and never again while it stays visible. Vertical scrolling
//! rotates the row ring; horizontal scrolling only changes which column
//! slice [`Canvas::clip`] copies out.
//!
//! Invariants:
//! * Grapheme clusters of a row are contiguous: each starts at the column
//!   where the previous one ended, beginning at column 0.
//! * A cluster is never split. A wide cluster straddling either clip edge
//!   is replaced by spaces for the covered columns, so a clipped row is
//!   always exactly `cols` columns wide.
//! * Rotation reuses row allocations; the row leaving the viewport becomes
//!   the blank entering row.
//! * Control characters never reach the terminal; each such cluster is
//!   stored as `?`.

use core_document::ColorId;
use core_text::segments;
use std::collections::VecDeque;

const CONTROL_STANDIN: char = '?';

/// One grapheme cluster laid out on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placed {
    start: usize,
    end: usize,
    col: usize,
    width: usize,
}

#[derive(Debug, Clone)]
pub struct CanvasRow {
    text: String,
    color: ColorId,
    clusters: Vec<Placed>,
    width: usize,
}

impl Default for CanvasRow {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: ColorId::DEFAULT,
            clusters: Vec::new(),
            width: 0,
        }
    }
}

impl CanvasRow {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> ColorId {
        self.color
    }

    /// Occupied columns.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_blank(&self) -> bool {
        self.clusters.is_empty()
    }

    fn clear(&mut self) {
        self.text.clear();
        self.clusters.clear();
        self.color = ColorId::DEFAULT;
        self.width = 0;
    }

    fn paint(&mut self, text: &str, color: ColorId, limit: usize) {
        self.clear();
        self.color = color;
        let mut col = 0usize;
        for seg in segments(text) {
            let width = seg.width as usize;
            if col + width > limit {
                break;
            }
            let start = self.text.len();
            if seg.cluster.chars().any(char::is_control) {
                self.text.push(CONTROL_STANDIN);
            } else {
                self.text.push_str(seg.cluster);
            }
            self.clusters.push(Placed {
                start,
                end: self.text.len(),
                col,
                width,
            });
            col += width;
        }
        self.width = col;
    }

    /// Columns `[offset, offset + cols)` of the row, padded with spaces.
    pub fn slice(&self, offset: usize, cols: usize) -> String {
        let end = offset + cols;
        let mut out = String::with_capacity(cols);
        let mut col = offset;
        let first = self.clusters.partition_point(|p| p.col + p.width <= offset);
        for p in &self.clusters[first..] {
            if p.col >= end || p.col + p.width > end {
                break;
            }
            if p.col < offset {
                // Wide cluster cut by the left edge.
                let covered = p.col + p.width - offset;
                out.extend(std::iter::repeat_n(' ', covered));
                col += covered;
                continue;
            }
            out.push_str(&self.text[p.start..p.end]);
            col += p.width;
        }
        out.extend(std::iter::repeat_n(' ', end - col));
        out
    }
}

/// Row text clipped to the visible slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippedRow {
    pub text: String,
    pub color: ColorId,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    rows: VecDeque<CanvasRow>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: (0..height).map(|_| CanvasRow::default()).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: usize) -> Option<&CanvasRow> {
        self.rows.get(row)
    }

    /// Lay out `text` on `row`, replacing its previous content. Returns
    /// `false` when `row` is outside the canvas.
    pub fn paint_line(&mut self, row: usize, text: &str, color: ColorId) -> bool {
        let width = self.width;
        match self.rows.get_mut(row) {
            Some(r) => {
                r.paint(text, color, width);
                true
            }
            None => false,
        }
    }

    pub fn clear_row(&mut self, row: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            r.clear();
        }
    }

    /// Drop the top row; a blank row enters at the bottom.
    pub fn shift_rows_up(&mut self) {
        if let Some(mut r) = self.rows.pop_front() {
            r.clear();
            self.rows.push_back(r);
        }
    }

    /// Drop the bottom row; a blank row enters at the top.
    pub fn shift_rows_down(&mut self) {
        if let Some(mut r) = self.rows.pop_back() {
            r.clear();
            self.rows.push_front(r);
        }
    }

    pub fn clip(&self, row: usize, offset: usize, cols: usize) -> Option<ClippedRow> {
        self.rows.get(row).map(|r| ClippedRow {
            text: r.slice(offset, cols),
            color: r.color(),
        })
    }
}
