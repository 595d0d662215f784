//! Terminal capability probing.
//!
//! Detection runs once at startup and only consults the environment; no
//! probe sequence is written to the terminal. The renderer reads
//! `supports_scroll_region` to choose between a scroll-region shift and a
//! repaint of every text row.

const TERM_ENV: &str = "TERM";

// Terminals known to ignore DECSTBM / SU / SD.
const NO_SCROLL_REGION: &[&str] = &["dumb", "unknown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub supports_scroll_region: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            supports_scroll_region: true,
        }
    }
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let term = std::env::var(TERM_ENV).ok();
        let caps = Self::from_term(term.as_deref());
        tracing::debug!(
            target: "runtime.startup",
            term = term.as_deref().unwrap_or(""),
            scroll_region = caps.supports_scroll_region,
            "terminal_capabilities"
        );
        caps
    }

    /// Capabilities implied by a `TERM` value. An unset `TERM` is treated
    /// optimistically since Windows consoles never set it.
    pub fn from_term(term: Option<&str>) -> Self {
        let supports_scroll_region = match term {
            Some(t) => !NO_SCROLL_REGION.contains(&t.trim()),
            None => true,
        };
        Self {
            supports_scroll_region,
        }
    }

    /// Capabilities of a terminal that only understands cursor addressing.
    pub fn minimal() -> Self {
        Self {
            supports_scroll_region: false,
        }
    }
}
