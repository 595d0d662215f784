mod common;

use common::{numbered, written_since};
use core_config::{ColorStrategy, DEFAULT_KEY_PATTERN};
use core_document::{KeyExtractor, LineStore};
use core_model::{Layout, ViewportController, ViewportState};
use core_render::{Renderer, paint_initial};
use core_terminal::TerminalCapabilities;
use std::io::Cursor;

#[test]
fn control_bytes_in_name_never_reach_the_terminal() {
    let extractor = KeyExtractor::new(DEFAULT_KEY_PATTERN).unwrap();
    let doc = LineStore::new(extractor, ColorStrategy::Hash, 4)
        .parse(
            "evil\x1b[2J\x07.trace".to_string(),
            Cursor::new(numbered(3).join("\n").into_bytes()),
        )
        .unwrap();
    let layout = Layout::compute(60, 8, 1.0).unwrap();
    let vc = ViewportController::new(&doc, ViewportState::from_layout(&layout));
    let mut r = Renderer::for_document(Vec::new(), layout, TerminalCapabilities::default(), &doc);
    paint_initial(&mut r, &vc).unwrap();

    let out = written_since(&r, 0);
    assert!(!out.contains('\x07'));
    assert!(out.contains("evil?[2J?.trace"));
}
