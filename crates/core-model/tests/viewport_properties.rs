use core_config::{ColorStrategy, DEFAULT_KEY_PATTERN};
use core_document::{Document, KeyExtractor, LineStore};
use core_events::Direction;
use core_model::{DocExtent, RenderOp, ViewportController, ViewportState};
use proptest::prelude::*;
use std::io::Cursor;

fn document(lines: &[&str]) -> Document {
    let extractor = KeyExtractor::new(DEFAULT_KEY_PATTERN).unwrap();
    let store = LineStore::new(extractor, ColorStrategy::Hash, 8);
    let text = lines.join("\n");
    store
        .parse("test.trace".to_string(), Cursor::new(text.into_bytes()))
        .unwrap()
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn shown(vc: &ViewportController<'_>) -> Vec<String> {
    vc.visible_lines()
        .map(|l| l.display().to_string())
        .collect()
}

#[test]
fn three_lines_two_rows_scenario() {
    let doc = document(&["1 open", "2 read", "3 close"]);
    let mut vc = ViewportController::new(&doc, ViewportState::new(2, 40, 30));
    assert_eq!(shown(&vc), vec!["1 open", "2 read"]);

    assert_eq!(vc.apply(Direction::Down), RenderOp::MoveCursorOnly);
    assert_eq!(vc.apply(Direction::Down), RenderOp::ScrollDown { entering: 2 });
    assert_eq!(shown(&vc), vec!["2 read", "3 close"]);
    assert_eq!(vc.apply(Direction::Down), RenderOp::Unchanged);

    assert_eq!(vc.apply(Direction::Up), RenderOp::MoveCursorOnly);
    assert_eq!(vc.apply(Direction::Up), RenderOp::ScrollUp { entering: 0 });
    assert_eq!(shown(&vc), vec!["1 open", "2 read"]);
    assert_eq!(vc.apply(Direction::Up), RenderOp::Unchanged);
}

#[test]
fn bottom_of_document_stays_put() {
    let lines: Vec<String> = (1..=5).map(|n| format!("{n} write(1, \"x\", 1)")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let doc = document(&refs);
    let mut vc = ViewportController::new(&doc, ViewportState::new(3, 40, 30));
    for _ in 0..20 {
        vc.apply(Direction::Down);
    }
    assert_eq!(vc.state().doc_top, 2);
    assert_eq!(vc.state().cursor_y, 2);
    assert_eq!(vc.visible_lines().last().map(|l| l.doc_index()), Some(4));
}

proptest! {
    #[test]
    fn invariants_hold_for_any_walk(
        total in 0usize..60,
        max_width in 0usize..200,
        height in 1usize..30,
        bound in 2usize..120,
        walk in prop::collection::vec(direction(), 0..200),
    ) {
        let extent = DocExtent::new(total, max_width);
        let mut s = ViewportState::new(height, bound + 1, bound);
        for d in walk {
            s = s.step(extent, d).state;
            prop_assert!(s.holds_invariants(extent));
        }
    }

    // Once the cursor sits on the bottom edge, each further Down scrolls by
    // exactly one line until the last line is visible.
    #[test]
    fn down_at_bottom_edge_scrolls_by_one(
        total in 1usize..80,
        height in 1usize..20,
    ) {
        let extent = DocExtent::new(total, 10);
        let mut s = ViewportState::new(height, 40, 30);
        s.cursor_y = s.visible_rows(extent) - 1;
        while s.doc_top + height < total {
            let t = s.step(extent, Direction::Down);
            prop_assert_eq!(t.state.doc_top, s.doc_top + 1);
            prop_assert_eq!(t.op, RenderOp::ScrollDown { entering: s.doc_top + height });
            s = t.state;
        }
        prop_assert_eq!(s.step(extent, Direction::Down).op, RenderOp::Unchanged);
    }

    #[test]
    fn up_never_goes_above_first_line(
        ups in 0usize..50,
        start in 0usize..40,
    ) {
        let extent = DocExtent::new(50, 10);
        let mut s = ViewportState::new(10, 40, 30);
        s.doc_top = start;
        for _ in 0..ups {
            s = s.step(extent, Direction::Up).state;
        }
        prop_assert!(s.doc_top <= start);
        let expected_top = start.saturating_sub(ups);
        prop_assert_eq!(s.doc_top, expected_top);
    }

    #[test]
    fn right_then_left_restores_scroll(
        h_scroll in 1usize..100,
        max_width in 100usize..300,
    ) {
        let extent = DocExtent::new(1, max_width);
        let mut s = ViewportState::new(5, 40, 30);
        s.h_scroll = h_scroll;
        let there = s.step(extent, Direction::Right).state;
        let back = there.step(extent, Direction::Left).state;
        prop_assert_eq!(back.h_scroll, h_scroll);
    }

    #[test]
    fn left_then_right_restores_scroll(
        h_scroll in 1usize..100,
        max_width in 100usize..300,
    ) {
        let extent = DocExtent::new(1, max_width);
        let mut s = ViewportState::new(5, 40, 30);
        s.h_scroll = h_scroll;
        let there = s.step(extent, Direction::Left);
        prop_assert_eq!(there.op, RenderOp::HorizontalShift { delta: -1 });
        let back = there.state.step(extent, Direction::Right).state;
        prop_assert_eq!(back.h_scroll, h_scroll);
    }
}
