use core_config::{ColorStrategy, DEFAULT_KEY_PATTERN};
use core_document::{Document, KeyExtractor, LineStore};
use core_model::{Layout, ViewportController, ViewportState};
use core_render::{Renderer, paint_initial};
use core_terminal::TerminalCapabilities;
use std::io::Cursor;

pub fn document(lines: &[String]) -> Document {
    let extractor = KeyExtractor::new(DEFAULT_KEY_PATTERN).unwrap();
    LineStore::new(extractor, ColorStrategy::Hash, 4)
        .parse("t.trace".to_string(), Cursor::new(lines.join("\n").into_bytes()))
        .unwrap()
}

pub fn numbered(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("{} write(1, \"line {i}\", 8) = 8", 100 + i % 4))
        .collect()
}

/// Controller plus a renderer writing into memory, already showing the
/// first frame.
pub fn session<'d>(
    doc: &'d Document,
    columns: u16,
    rows: u16,
    caps: TerminalCapabilities,
) -> (ViewportController<'d>, Renderer<Vec<u8>>) {
    let layout = Layout::compute(columns, rows, 1.0).unwrap();
    let vc = ViewportController::new(doc, ViewportState::from_layout(&layout));
    let mut renderer = Renderer::for_document(Vec::new(), layout, caps, doc);
    paint_initial(&mut renderer, &vc).unwrap();
    (vc, renderer)
}

pub fn canvas_texts(renderer: &Renderer<Vec<u8>>) -> Vec<String> {
    let canvas = renderer.canvas();
    (0..canvas.height())
        .filter_map(|r| canvas.row(r))
        .map(|r| r.text().to_string())
        .collect()
}

/// Bytes written since `mark`, lossily decoded.
pub fn written_since(renderer: &Renderer<Vec<u8>>, mark: usize) -> String {
    String::from_utf8_lossy(&renderer.sink()[mark..]).into_owned()
}
