//! Terminal command queue.
//!
//! Render paths push primitive commands and flush them once per frame into
//! whatever sink the renderer owns (stdout in the binary, a `Vec<u8>` in
//! tests).
//!
//! Invariants:
//! * Commands preserve ordering; nothing is written before `flush`.
//! * All positions are absolute, `(0,0)` origin; callers keep them on screen.
//! * A colour set by `SetColor` stays active until `ResetColor`.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Print(String),
    SetColor(Color),
    ResetColor,
    ClearAll,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    /// `None` selects the terminal's default foreground.
    pub fn set_color(&mut self, color: Option<Color>) {
        match color {
            Some(c) => self.cmds.push(Command::SetColor(c)),
            None => self.cmds.push(Command::ResetColor),
        }
    }

    pub fn reset_color(&mut self) {
        self.cmds.push(Command::ResetColor);
    }

    pub fn clear_all(&mut self) {
        self.cmds.push(Command::ClearAll);
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Emit every queued command and flush `out`. Returns the number of
    /// commands written.
    pub fn flush<W: Write>(self, out: &mut W) -> io::Result<usize> {
        let n = self.cmds.len();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::SetColor(color) => queue!(out, SetForegroundColor(color))?,
                Command::ResetColor => queue!(out, ResetColor)?,
                Command::ClearAll => queue!(out, Clear(ClearType::All))?,
            }
        }
        out.flush()?;
        Ok(n)
    }
}
