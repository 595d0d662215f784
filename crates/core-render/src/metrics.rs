//! Render path counters.
//!
//! Records what the renderer actually did per operation, which lets tests
//! assert that a vertical step touched one row rather than the whole
//! viewport. Counters are atomics so a snapshot can be taken through a
//! shared reference.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderMetrics {
    /// Frames that repainted every text row plus border and status.
    pub full_frames: AtomicU64,
    /// Vertical steps served by a terminal scroll region.
    pub scroll_shifts: AtomicU64,
    /// Vertical steps repainted row by row (no scroll region support).
    pub scroll_degraded_full: AtomicU64,
    /// Horizontal re-clips of the visible rows.
    pub horizontal_shifts: AtomicU64,
    /// Operations that only moved the physical cursor.
    pub cursor_only_frames: AtomicU64,
    /// Text rows written to the terminal.
    pub rows_painted: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMetricsSnapshot {
    pub full_frames: u64,
    pub scroll_shifts: u64,
    pub scroll_degraded_full: u64,
    pub horizontal_shifts: u64,
    pub cursor_only_frames: u64,
    pub rows_painted: u64,
}

impl RenderMetrics {
    pub fn snapshot(&self) -> RenderMetricsSnapshot {
        RenderMetricsSnapshot {
            full_frames: self.full_frames.load(Ordering::Relaxed),
            scroll_shifts: self.scroll_shifts.load(Ordering::Relaxed),
            scroll_degraded_full: self.scroll_degraded_full.load(Ordering::Relaxed),
            horizontal_shifts: self.horizontal_shifts.load(Ordering::Relaxed),
            cursor_only_frames: self.cursor_only_frames.load(Ordering::Relaxed),
            rows_painted: self.rows_painted.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }
}
