//! Renderer: sole owner of the physical screen.
//!
//! The renderer keeps the [`Canvas`] mirror of the text area in step with
//! the terminal and turns each primitive (`paint_line`, `shift_rows_up`,
//! `shift_rows_down`, `clip`, `move_cursor`, `present_border`) into queued
//! terminal commands. Nothing reaches the sink until [`Renderer::present`].
//!
//! Vertical shifts use a scroll region restricted to the text rows
//! (`CSI top;bottom r`, then `CSI 1 S` / `CSI 1 T`, then `CSI r`). The
//! frame's side borders scroll with the rows, so only the entering row is
//! written afterwards. Terminals without scroll-region support get every
//! surviving row rewritten from the canvas instead; the canvas rotation is
//! the same in both cases.

use crate::canvas::Canvas;
use crate::metrics::{RenderMetrics, RenderMetricsSnapshot};
use crate::status::{StatusContext, build_status_line};
use crate::style::{border_color, foreground};
use crate::writer::Writer;
use crate::RenderError;
use core_document::{ColorId, Document};
use core_model::Layout;
use core_terminal::TerminalCapabilities;
use std::io::Write;
use tracing::{debug, trace};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

pub struct Renderer<W: Write> {
    out: W,
    layout: Layout,
    capabilities: TerminalCapabilities,
    canvas: Canvas,
    h_scroll: usize,
    pending: Writer,
    metrics: RenderMetrics,
}

impl<W: Write> Renderer<W> {
    pub fn new(
        out: W,
        layout: Layout,
        capabilities: TerminalCapabilities,
        canvas_width: usize,
    ) -> Self {
        let text = layout.text_area();
        let width = canvas_width.max(text.width as usize);
        Self {
            out,
            layout,
            capabilities,
            canvas: Canvas::new(width, text.height as usize),
            h_scroll: 0,
            pending: Writer::new(),
            metrics: RenderMetrics::default(),
        }
    }

    /// Renderer whose canvas fits the widest line of `document`.
    pub fn for_document(
        out: W,
        layout: Layout,
        capabilities: TerminalCapabilities,
        document: &Document,
    ) -> Self {
        Self::new(out, layout, capabilities, document.max_line_width())
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn h_scroll(&self) -> usize {
        self.h_scroll
    }

    pub fn sink(&self) -> &W {
        &self.out
    }

    pub fn metrics_snapshot(&self) -> RenderMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Wipe the screen ahead of a full frame.
    pub fn clear_screen(&mut self) {
        self.pending.reset_color();
        self.pending.clear_all();
        RenderMetrics::bump(&self.metrics.full_frames, 1);
    }

    /// Draw the frame around the text area in the border colour.
    pub fn present_border(&mut self) {
        let frame = self.layout.frame();
        let inner = frame.width.saturating_sub(2) as usize;
        let horizontal: String = std::iter::repeat_n(HORIZONTAL, inner).collect();
        self.pending.set_color(Some(border_color()));
        self.pending.move_to(frame.x, frame.y);
        self.pending
            .print(format!("{TOP_LEFT}{horizontal}{TOP_RIGHT}"));
        for y in frame.y + 1..frame.bottom() {
            self.pending.move_to(frame.x, y);
            self.pending.print(VERTICAL);
            self.pending.move_to(frame.right(), y);
            self.pending.print(VERTICAL);
        }
        self.pending.move_to(frame.x, frame.bottom());
        self.pending
            .print(format!("{BOTTOM_LEFT}{horizontal}{BOTTOM_RIGHT}"));
        self.pending.reset_color();
    }

    /// Lay out `text` on canvas row `row` and write its visible slice.
    pub fn paint_line(&mut self, row: usize, text: &str, color: ColorId) {
        if self.canvas.paint_line(row, text, color) {
            self.emit_row(row);
        }
    }

    /// Blank a row (rows past the end of a short document).
    pub fn clear_row(&mut self, row: usize) {
        self.canvas.clear_row(row);
        self.emit_row(row);
    }

    /// Drop the top text row; the bottom row becomes blank.
    pub fn shift_rows_up(&mut self) {
        self.canvas.shift_rows_up();
        let entering = self.canvas.height().saturating_sub(1);
        self.emit_shift('S', entering);
    }

    /// Drop the bottom text row; the top row becomes blank.
    pub fn shift_rows_down(&mut self) {
        self.canvas.shift_rows_down();
        self.emit_shift('T', 0);
    }

    /// Show the canvas from column `offset`; rewrites every text row but
    /// lays out nothing.
    pub fn clip(&mut self, offset: usize) {
        self.h_scroll = offset;
        for row in 0..self.canvas.height() {
            self.emit_row(row);
        }
    }

    /// Place the terminal cursor at text-area relative `(x, y)`, clamped to
    /// the text area.
    pub fn move_cursor(&mut self, x: usize, y: usize) {
        let text = self.layout.text_area();
        let max_x = text.width.saturating_sub(1) as usize;
        let max_y = text.height.saturating_sub(1) as usize;
        let cx = text.x + x.min(max_x) as u16;
        let cy = text.y + y.min(max_y) as u16;
        self.pending.move_to(cx, cy);
    }

    pub fn paint_status(&mut self, ctx: &StatusContext<'_>) {
        let line = build_status_line(ctx, self.layout.columns() as usize);
        self.pending.reset_color();
        self.pending.move_to(0, self.layout.status_row());
        self.pending.print(line);
    }

    pub fn note_cursor_only(&mut self) {
        RenderMetrics::bump(&self.metrics.cursor_only_frames, 1);
    }

    pub fn note_horizontal_shift(&mut self) {
        RenderMetrics::bump(&self.metrics.horizontal_shifts, 1);
    }

    /// Flush queued commands to the sink.
    pub fn present(&mut self) -> Result<(), RenderError> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(());
        }
        let n = pending.flush(&mut self.out)?;
        trace!(target: "render.engine", commands = n, "present");
        Ok(())
    }

    fn emit_shift(&mut self, direction: char, entering: usize) {
        if self.capabilities.supports_scroll_region {
            let text = self.layout.text_area();
            // ANSI rows are 1-based.
            let top = text.y + 1;
            let bottom = text.bottom() + 1;
            self.pending
                .print(format!("\x1b[{top};{bottom}r\x1b[1{direction}\x1b[r"));
            RenderMetrics::bump(&self.metrics.scroll_shifts, 1);
        } else {
            for row in (0..self.canvas.height()).filter(|r| *r != entering) {
                self.emit_row(row);
            }
            RenderMetrics::bump(&self.metrics.scroll_degraded_full, 1);
            debug!(target: "render.engine", rows = self.canvas.height(), "scroll_shift_degraded");
        }
    }

    fn emit_row(&mut self, row: usize) {
        let text = self.layout.text_area();
        let frame = self.layout.frame();
        let Some(clipped) = self.canvas.clip(row, self.h_scroll, text.width as usize) else {
            return;
        };
        let y = text.y + row as u16;
        self.pending.set_color(Some(border_color()));
        self.pending.move_to(frame.x, y);
        self.pending.print(VERTICAL);
        self.pending.set_color(foreground(clipped.color));
        self.pending.print(clipped.text);
        self.pending.set_color(Some(border_color()));
        self.pending.print(VERTICAL);
        self.pending.reset_color();
        RenderMetrics::bump(&self.metrics.rows_painted, 1);
    }
}
