//! Terminal backend abstraction and crossterm implementation.
//!
//! The terminal is the one process-wide resource of the viewer. It is
//! acquired through [`TerminalGuard`], which restores cooked mode and the
//! primary screen when dropped, so every exit path (early return, error,
//! unwinding panic) releases it. [`restore_terminal`] is the best-effort
//! variant used from a panic hook where no guard is reachable.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

// Resets any scroll region left behind by an interrupted scroll shift.
const RESET_SCROLL_REGION: &str = "\x1b[r";

// Set while some backend holds raw mode and the alternate screen.
static TERMINAL_ENTERED: AtomicBool = AtomicBool::new(false);

fn mark_entered(entered: bool) {
    TERMINAL_ENTERED.store(entered, Ordering::SeqCst);
}

fn take_entered() -> bool {
    TERMINAL_ENTERED.swap(false, Ordering::SeqCst)
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current size as `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;
}

pub struct CrosstermBackend {
    entered: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode().context("enable raw mode")?;
            execute!(stdout(), EnterAlternateScreen, Show).context("enter alternate screen")?;
            self.entered = true;
            mark_entered(true);
            tracing::debug!(target: "runtime.startup", "terminal_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            let mut out = stdout();
            out.write_all(RESET_SCROLL_REGION.as_bytes())?;
            execute!(out, LeaveAlternateScreen, Show).context("leave alternate screen")?;
            disable_raw_mode().context("disable raw mode")?;
            self.entered = false;
            mark_entered(false);
            tracing::debug!(target: "runtime.shutdown", "terminal_left");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        crossterm::terminal::size().context("query terminal size")
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a, B: TerminalBackend> {
    backend: &'a mut B,
    active: bool,
}

impl<'a, B: TerminalBackend> TerminalGuard<'a, B> {
    /// Enter the backend and return a guard that will leave on drop.
    pub fn enter(backend: &'a mut B) -> Result<Self> {
        backend.enter()?;
        Ok(Self {
            backend,
            active: true,
        })
    }

    pub fn backend(&self) -> &B {
        self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.backend
    }

    /// Leave now, surfacing the error that `Drop` would swallow.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        self.backend.leave()
    }
}

impl<B: TerminalBackend> Drop for TerminalGuard<'_, B> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// Best-effort restore without a backend handle (panic hook path).
///
/// Does nothing unless a backend is currently entered, so a panic before
/// the terminal was acquired leaves the primary screen untouched. Returns
/// whether a restore was attempted.
pub fn restore_terminal() -> bool {
    if !take_entered() {
        return false;
    }
    let mut out = stdout();
    let _ = out.write_all(RESET_SCROLL_REGION.as_bytes());
    let _ = execute!(out, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
    true
}
