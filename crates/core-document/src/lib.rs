//! Trace document loading (the line store).
//!
//! A trace file is read once, fully, before the viewer takes over the
//! terminal. Each line is tagged with its grouping key (by default the
//! leading process id) and the colour of that group, then frozen: the
//! resulting [`Document`] is never mutated and is shared read-only with the
//! viewport controller and renderer.
//!
//! Invariants:
//! - `Line::doc_index` equals the line's zero-based position in the file.
//! - `Line::display` is the raw text trimmed of surrounding whitespace with
//!   tabs expanded; widths are always measured on `display`.
//! - `Document::max_line_width` is the maximum `Line::width`.
//! - Every line of a successfully loaded document has a non-empty group key.
//!
//! Loading is all-or-nothing: the first line without an extractable key
//! aborts the load with [`LoadError::MalformedLine`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod color;
pub mod key;

pub use color::{ColorId, GroupColorTable, PALETTE};
pub use key::{KeyExtractor, KeyPatternError};

use core_config::ColorStrategy;

// Longest prefix of an offending line echoed back in a diagnostic.
const MALFORMED_PREVIEW_CHARS: usize = 60;
const NAME_CONTROL_STANDIN: char = '?';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: no such file", path.display())]
    NotFound { path: PathBuf },
    #[error("{}: read failed", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line_number}: no grouping key in `{text}`")]
    MalformedLine { line_number: usize, text: String },
}

/// One immutable trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    display: String,
    group_key: String,
    color: ColorId,
    doc_index: usize,
    width: usize,
}

impl Line {
    /// Text as read from the file, without the line terminator.
    pub fn raw(&self) -> &str {
        &self.raw
    }
    /// Text painted on screen.
    pub fn display(&self) -> &str {
        &self.display
    }
    pub fn group_key(&self) -> &str {
        &self.group_key
    }
    pub fn color(&self) -> ColorId {
        self.color
    }
    pub fn doc_index(&self) -> usize {
        self.doc_index
    }
    /// Display width of `display()` in terminal columns.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Ordered, immutable sequence of lines plus the group colour table built
/// while loading them.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    lines: Vec<Line>,
    max_line_width: usize,
    groups: GroupColorTable,
}

impl Document {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
    pub fn max_line_width(&self) -> usize {
        self.max_line_width
    }
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
    pub fn groups(&self) -> &GroupColorTable {
        &self.groups
    }
}

/// Document loader: key extraction rule + colour policy + tab expansion.
#[derive(Debug, Clone)]
pub struct LineStore {
    extractor: KeyExtractor,
    strategy: ColorStrategy,
    tab_width: usize,
}

impl LineStore {
    pub fn new(extractor: KeyExtractor, strategy: ColorStrategy, tab_width: usize) -> Self {
        Self {
            extractor,
            strategy,
            tab_width,
        }
    }

    /// Load and tag every line of the file at `path`.
    pub fn load(&self, path: &Path) -> Result<Document, LoadError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("trace")
            .to_string();
        let doc = self.parse(name, BufReader::new(file)).map_err(|e| match e {
            LoadError::Io { source, .. } => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(
            target: "document",
            file = %path.display(),
            line_count = doc.total_lines(),
            groups = doc.groups.len(),
            max_line_width = doc.max_line_width,
            "document_loaded"
        );
        Ok(doc)
    }

    /// Tag every line from `reader`. Invalid UTF-8 is replaced rather than
    /// rejected; trace tools routinely emit raw bytes from syscall buffers.
    pub fn parse<R: BufRead>(&self, name: String, mut reader: R) -> Result<Document, LoadError> {
        let mut groups = GroupColorTable::new(self.strategy);
        let mut lines = Vec::new();
        let mut max_line_width = 0usize;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LoadError::Io {
                    path: PathBuf::from(&name),
                    source,
                })?;
            if n == 0 {
                break;
            }
            strip_line_terminator(&mut buf);
            let raw = String::from_utf8_lossy(&buf).into_owned();
            let doc_index = lines.len();
            let Some(key) = self.extractor.extract(&raw) else {
                tracing::debug!(target: "document", line_number = doc_index + 1, "malformed_line");
                return Err(LoadError::MalformedLine {
                    line_number: doc_index + 1,
                    text: preview(&raw),
                });
            };
            let group_key = key.to_string();
            let color = groups.assign(&group_key);
            let display = core_text::expand_tabs(raw.trim(), self.tab_width);
            let width = core_text::display_width(&display);
            max_line_width = max_line_width.max(width);
            lines.push(Line {
                raw,
                display,
                group_key,
                color,
                doc_index,
                width,
            });
        }
        Ok(Document {
            name: printable_name(&name),
            lines,
            max_line_width,
            groups,
        })
    }
}

fn strip_line_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

/// The name ends up in the status line and the window title, so control
/// characters are replaced before it can reach the terminal.
fn printable_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { NAME_CONTROL_STANDIN } else { c })
        .collect()
}

fn preview(raw: &str) -> String {
    let mut out: String = raw.chars().take(MALFORMED_PREVIEW_CHARS).collect();
    if raw.chars().count() > MALFORMED_PREVIEW_CHARS {
        out.push('…');
    }
    out
}
