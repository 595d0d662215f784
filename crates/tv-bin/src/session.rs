//! One viewing session: load, acquire the terminal, loop, release.
//!
//! Failures are split by whether the terminal was touched. Anything that
//! goes wrong before [`TerminalGuard::enter`] (unreadable file, malformed
//! line, unusable key pattern) is a [`Failure::Startup`] and leaves the
//! terminal exactly as it was. After entry every failure is a
//! [`Failure::Render`] and is returned only once the guard has restored the
//! terminal.

use anyhow::{Context, Result};
use core_config::Config;
use core_document::{Document, KeyExtractor, LineStore};
use core_events::{Command, ShutdownReason};
use core_input::{Input, KeySource};
use core_model::{Layout, ViewportController, ViewportState};
use core_render::{RenderError, Renderer, apply_op, paint_initial};
use core_terminal::{TerminalBackend, TerminalCapabilities, TerminalGuard};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub enum Failure {
    /// Reported before any terminal mode change.
    Startup(anyhow::Error),
    /// Reported after the terminal was restored.
    Render(anyhow::Error),
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

pub fn load_document(path: &Path, config: &Config) -> Result<Document> {
    let extractor = KeyExtractor::new(config.key_pattern()).context("invalid key_pattern")?;
    let store = LineStore::new(extractor, config.color_strategy(), config.tab_width());
    let doc = store.load(path)?;
    info!(
        target: "runtime.startup",
        lines = doc.total_lines(),
        groups = doc.groups().len(),
        max_width = doc.max_line_width(),
        "document_ready"
    );
    Ok(doc)
}

pub fn run<B, K, W>(
    path: &Path,
    config: &Config,
    backend: &mut B,
    keys: &mut K,
    out: W,
    caps: TerminalCapabilities,
) -> Result<ShutdownReason, Failure>
where
    B: TerminalBackend,
    K: KeySource,
    W: Write,
{
    let doc = load_document(path, config).map_err(Failure::Startup)?;

    let (columns, rows) = backend.size().map_err(Failure::Render)?;
    let layout = Layout::compute(columns, rows, config.effective_content_width_ratio())
        .map_err(|e| Failure::Render(RenderError::from(e).into()))?;
    debug!(
        target: "runtime.startup",
        columns,
        rows,
        viewport_height = layout.viewport_height(),
        content_width_bound = layout.content_width_bound(),
        "layout"
    );

    let mut guard = TerminalGuard::enter(backend).map_err(Failure::Render)?;
    let title = format!("traceview: {}", doc.name());
    let outcome = guard
        .backend_mut()
        .set_title(&title)
        .and_then(|_| event_loop(&doc, layout, caps, keys, out));

    match outcome {
        Ok(reason) => {
            log_shutdown_stage(reason, "begin");
            guard.restore().map_err(Failure::Render)?;
            log_shutdown_stage(reason, "complete");
            Ok(reason)
        }
        Err(e) => {
            drop(guard);
            Err(Failure::Render(e))
        }
    }
}

fn event_loop<K: KeySource, W: Write>(
    doc: &Document,
    layout: Layout,
    caps: TerminalCapabilities,
    keys: &mut K,
    out: W,
) -> Result<ShutdownReason> {
    let mut vc = ViewportController::new(doc, ViewportState::from_layout(&layout));
    let mut renderer = Renderer::for_document(out, layout, caps, doc);
    paint_initial(&mut renderer, &vc).context("initial paint")?;

    let span = tracing::debug_span!(target: "runtime", "event_loop");
    let _enter = span.enter();
    let reason = loop {
        match keys.next_input()? {
            Input::Command(Command::Move(direction)) => {
                let op = vc.apply(direction);
                apply_op(&mut renderer, &vc, op)
                    .with_context(|| format!("render {}", op.as_str()))?;
            }
            Input::Command(Command::Quit) => break ShutdownReason::QuitKey,
            Input::Interrupt => break ShutdownReason::Interrupt,
            Input::Closed => break ShutdownReason::InputClosed,
        }
    };

    let m = renderer.metrics_snapshot();
    info!(
        target: "render.engine",
        full_frames = m.full_frames,
        scroll_shifts = m.scroll_shifts,
        scroll_degraded_full = m.scroll_degraded_full,
        horizontal_shifts = m.horizontal_shifts,
        cursor_only_frames = m.cursor_only_frames,
        rows_painted = m.rows_painted,
        "render_metrics"
    );
    Ok(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_document::LoadError;
    use core_events::{InputEvent, KeyCode, KeyEvent};
    use core_input::ScriptedKeySource;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    struct RecordingBackend {
        calls: Vec<&'static str>,
        size: (u16, u16),
    }

    impl RecordingBackend {
        fn new(columns: u16, rows: u16) -> Self {
            Self {
                calls: Vec::new(),
                size: (columns, rows),
            }
        }
    }

    impl TerminalBackend for RecordingBackend {
        fn enter(&mut self) -> Result<()> {
            self.calls.push("enter");
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            self.calls.push("leave");
            Ok(())
        }
        fn set_title(&mut self, _title: &str) -> Result<()> {
            self.calls.push("title");
            Ok(())
        }
        fn size(&self) -> Result<(u16, u16)> {
            Ok(self.size)
        }
    }

    struct FailingKeys;

    impl KeySource for FailingKeys {
        fn next_input(&mut self) -> Result<Input> {
            Err(anyhow::anyhow!("input device vanished"))
        }
    }

    fn trace_file(lines: &[&str]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        for l in lines {
            writeln!(f, "{l}").unwrap();
        }
        f
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(KeyCode::Char(c)))
    }

    fn ten_lines() -> NamedTempFile {
        let lines: Vec<String> = (0..10).map(|i| format!("{} getpid() = {i}", 300 + i % 3)).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        trace_file(&refs)
    }

    #[test]
    fn missing_file_never_touches_terminal() {
        let mut backend = RecordingBackend::new(80, 24);
        let mut keys = ScriptedKeySource::new([key('q')]);
        let mut out = Vec::new();
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &dir.path().join("absent.trace"),
            &Config::default(),
            &mut backend,
            &mut keys,
            &mut out,
            TerminalCapabilities::default(),
        );
        let Err(Failure::Startup(e)) = result else {
            panic!("expected startup failure");
        };
        assert!(matches!(
            e.downcast_ref::<LoadError>(),
            Some(LoadError::NotFound { .. })
        ));
        assert!(backend.calls.is_empty());
        assert!(out.is_empty());
        assert_eq!(keys.remaining(), 1);
    }

    #[test]
    fn malformed_file_never_touches_terminal() {
        let file = trace_file(&["1 ok", "no key here"]);
        let mut backend = RecordingBackend::new(80, 24);
        let mut keys = ScriptedKeySource::new(Vec::new());
        let result = run(
            file.path(),
            &Config::default(),
            &mut backend,
            &mut keys,
            Vec::new(),
            TerminalCapabilities::default(),
        );
        let Err(Failure::Startup(e)) = result else {
            panic!("expected startup failure");
        };
        assert!(matches!(
            e.downcast_ref::<LoadError>(),
            Some(LoadError::MalformedLine { line_number: 2, .. })
        ));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn quit_key_restores_terminal() {
        let file = ten_lines();
        let mut backend = RecordingBackend::new(60, 6);
        let mut keys = ScriptedKeySource::new([key('j'), key('j'), key('j'), key('x'), key('q')]);
        let mut out = Vec::new();
        let reason = run(
            file.path(),
            &Config::default(),
            &mut backend,
            &mut keys,
            &mut out,
            TerminalCapabilities::default(),
        )
        .unwrap();
        assert_eq!(reason, ShutdownReason::QuitKey);
        assert_eq!(backend.calls, vec!["enter", "title", "leave"]);
        let screen = String::from_utf8_lossy(&out);
        assert!(screen.contains("\x1b[1S"));
        assert!(screen.contains("lines 2-4/10"));
    }

    #[test]
    fn interrupt_and_closed_input_are_clean_exits() {
        let file = ten_lines();
        for (events, expected) in [
            (vec![key('l'), InputEvent::CtrlC], ShutdownReason::Interrupt),
            (vec![key('k')], ShutdownReason::InputClosed),
        ] {
            let mut backend = RecordingBackend::new(60, 6);
            let mut keys = ScriptedKeySource::new(events);
            let reason = run(
                file.path(),
                &Config::default(),
                &mut backend,
                &mut keys,
                Vec::new(),
                TerminalCapabilities::default(),
            )
            .unwrap();
            assert_eq!(reason, expected);
            assert_eq!(backend.calls.last(), Some(&"leave"));
        }
    }

    #[test]
    fn too_small_terminal_fails_before_entering() {
        let file = ten_lines();
        let mut backend = RecordingBackend::new(80, 3);
        let mut keys = ScriptedKeySource::new(Vec::new());
        let result = run(
            file.path(),
            &Config::default(),
            &mut backend,
            &mut keys,
            Vec::new(),
            TerminalCapabilities::default(),
        );
        let Err(Failure::Render(e)) = result else {
            panic!("expected render failure");
        };
        assert!(matches!(
            e.downcast_ref::<RenderError>(),
            Some(RenderError::TerminalTooSmall { columns: 80, rows: 3 })
        ));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn failure_mid_session_still_restores() {
        let file = ten_lines();
        let mut backend = RecordingBackend::new(60, 6);
        let result = run(
            file.path(),
            &Config::default(),
            &mut backend,
            &mut FailingKeys,
            Vec::new(),
            TerminalCapabilities::default(),
        );
        let Err(Failure::Render(e)) = result else {
            panic!("expected render failure");
        };
        assert!(format!("{e:?}").contains("input device vanished"));
        assert_eq!(backend.calls, vec!["enter", "title", "leave"]);
    }
}
