//! Incremental terminal rendering for the trace viewer.
//!
//! Components:
//! - [`canvas`]: off-screen row ring at least as wide as the widest line;
//!   rotation for vertical shifts, column slicing for horizontal clips.
//! - [`renderer`]: owns the output sink, mirrors the canvas onto it and
//!   exposes the drawing primitives.
//! - [`apply`]: maps each viewport `RenderOp` onto those primitives.
//! - [`writer`]: ordered command queue flushed once per operation.
//! - [`status`], [`style`]: status line text and colour-id mapping.
//! - [`metrics`]: counters proving the per-step cost stays at one row.
//!
//! Cost model: a vertical step writes one text row (plus the status line)
//! when the terminal honours scroll regions; a horizontal step rewrites the
//! visible rows from the canvas without laying out any line again.

use std::io;
use thiserror::Error;

pub mod apply;
pub mod canvas;
pub mod metrics;
pub mod renderer;
pub mod status;
pub mod style;
pub mod writer;

pub use apply::{apply_op, paint_initial};
pub use canvas::{Canvas, CanvasRow, ClippedRow};
pub use metrics::{RenderMetrics, RenderMetricsSnapshot};
pub use renderer::Renderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal too small: {columns}x{rows}")]
    TerminalTooSmall { columns: u16, rows: u16 },
    #[error("terminal write failed")]
    Io(#[from] io::Error),
}

impl From<core_model::TerminalTooSmall> for RenderError {
    fn from(e: core_model::TerminalTooSmall) -> Self {
        RenderError::TerminalTooSmall {
            columns: e.columns,
            rows: e.rows,
        }
    }
}
