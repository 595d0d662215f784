//! Render entry points driven by the viewport controller.
//!
//! `paint_initial` draws the whole screen once; afterwards every
//! [`RenderOp`] is served by [`apply_op`] with the smallest primitive that
//! reproduces it:
//!
//! | op                | terminal work                                  |
//! |-------------------|------------------------------------------------|
//! | `Unchanged`       | none                                           |
//! | `MoveCursorOnly`  | cursor move                                    |
//! | `HorizontalShift` | re-clip visible rows, status, cursor           |
//! | `ScrollDown/Up`   | one-row shift, entering row, status, cursor    |

use crate::RenderError;
use crate::renderer::Renderer;
use crate::status::StatusContext;
use core_model::{RenderOp, ViewportController};
use std::io::Write;
use tracing::trace;

fn status_context<'a>(vc: &'a ViewportController<'_>) -> StatusContext<'a> {
    StatusContext {
        name: vc.document().name(),
        state: vc.state(),
        extent: vc.extent(),
        groups: vc.document().groups().len(),
    }
}

/// Full first frame: border, every text row, status line, cursor.
pub fn paint_initial<W: Write>(
    renderer: &mut Renderer<W>,
    vc: &ViewportController<'_>,
) -> Result<(), RenderError> {
    renderer.clear_screen();
    renderer.present_border();
    let height = renderer.canvas().height();
    let mut painted = 0;
    for (row, line) in vc.visible_lines().enumerate() {
        renderer.paint_line(row, line.display(), line.color());
        painted += 1;
    }
    for row in painted..height {
        renderer.clear_row(row);
    }
    renderer.paint_status(&status_context(vc));
    let state = vc.state();
    renderer.move_cursor(state.cursor_x, state.cursor_y);
    renderer.present()
}

/// Reflect one transition on screen. `vc` must already hold the state the
/// operation was produced for.
pub fn apply_op<W: Write>(
    renderer: &mut Renderer<W>,
    vc: &ViewportController<'_>,
    op: RenderOp,
) -> Result<(), RenderError> {
    let state = *vc.state();
    trace!(target: "render.engine", op = op.as_str(), "apply_op");
    match op {
        RenderOp::Unchanged => return Ok(()),
        RenderOp::MoveCursorOnly => renderer.note_cursor_only(),
        RenderOp::HorizontalShift { .. } => {
            renderer.clip(state.h_scroll);
            renderer.note_horizontal_shift();
            renderer.paint_status(&status_context(vc));
        }
        RenderOp::ScrollDown { entering } => {
            renderer.shift_rows_up();
            paint_entering(renderer, vc, entering, state.doc_top);
            renderer.paint_status(&status_context(vc));
        }
        RenderOp::ScrollUp { entering } => {
            renderer.shift_rows_down();
            paint_entering(renderer, vc, entering, state.doc_top);
            renderer.paint_status(&status_context(vc));
        }
    }
    renderer.move_cursor(state.cursor_x, state.cursor_y);
    renderer.present()
}

fn paint_entering<W: Write>(
    renderer: &mut Renderer<W>,
    vc: &ViewportController<'_>,
    entering: usize,
    doc_top: usize,
) {
    if let Some(line) = vc.document().line(entering) {
        renderer.paint_line(entering - doc_top, line.display(), line.color());
    }
}
