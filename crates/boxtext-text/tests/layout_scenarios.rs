//! End-to-end layout scenarios on a one-cell-per-column font.
//!
//! The end buffer glyph `n` is one cell wide, so a line of `w` cells has
//! `w - 1` usable cells.

use boxtext_text::{
    FixedAdvanceMetrics, HorizontalAlignment, LayoutConfig, LayoutEngine, LayoutError,
    RecordingSurface, StyleFlags, TextBox, VerticalAlignment,
};
use std::sync::Arc;
use std::thread;

fn cells() -> FixedAdvanceMetrics {
    FixedAdvanceMetrics::cells()
}

fn wrapped(engine: &LayoutEngine, text: &str, width: f64) -> Vec<String> {
    engine
        .wrap(text, width, &cells(), false)
        .unwrap()
        .lines()
        .iter()
        .map(|l| l.plain().to_string())
        .collect()
}

#[test]
fn scenario_a_wide_box_keeps_one_line() {
    let engine = LayoutEngine::default();
    assert_eq!(wrapped(&engine, "hello world", 12.0), vec!["hello world"]);
    assert!(engine.fits_without_wrap("hello world", 12.0, &cells()));
}

#[test]
fn scenario_b_narrow_box_breaks_between_words() {
    let engine = LayoutEngine::default();
    assert_eq!(wrapped(&engine, "hello world", 7.0), vec!["hello", "world"]);
    assert_eq!(engine.wrapped_height("hello world", 7.0, &cells()).unwrap(), 2.0);
}

#[test]
fn scenario_c_empty_line_has_one_line_height() {
    let engine = LayoutEngine::default();
    let result = engine.wrap("", 3.0, &cells(), false).unwrap();
    assert_eq!(result.line_count(), 1);
    assert_eq!(result.lines()[0].plain(), "");
    assert_eq!(result.height(), 1.0);
}

#[test]
fn scenario_d_long_word_is_truncated() {
    let engine = LayoutEngine::default();
    assert_eq!(
        wrapped(&engine, "abcdefghij", 4.0),
        vec!["abc", "def", "ghi", "j"]
    );
}

#[test]
fn scenario_e_strict_mode_reports_long_word() {
    let engine = LayoutEngine::default();
    let err = engine.wrap("abcdefghij", 4.0, &cells(), true).unwrap_err();
    assert_eq!(err, LayoutError::WordTooWide {
        word: "abcdefghij".into(),
        width: 4.0,
    });
    assert_eq!(err.to_string(), "word 'abcdefghij' is too wide for width 4");
}

#[test]
fn scenario_f_short_box_is_reported() {
    let engine = LayoutEngine::default();
    let mut surface = RecordingSurface::new(cells());
    let err = engine
        .draw_text(
            &mut surface,
            &["hello world"],
            TextBox::new(0.0, 0.0, 7.0, 1.0),
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
        )
        .unwrap_err();
    assert!(matches!(err, LayoutError::InsufficientHeight { .. }));
    assert!(surface.calls().is_empty());
}

#[test]
fn class_box_round_trip() {
    // Typical element: a bold title and member lines, sized to its text.
    let engine = LayoutEngine::default();
    let m = cells();
    let lines = ["*Customer*", "name: String", "_id: long_"];
    let width = engine.min_width_lines(&lines, &m).ceil();
    let height = engine.wrapped_height_lines(&lines, width, &m).unwrap();
    assert_eq!(width, 10.0);
    assert_eq!(height, 4.0);

    let mut surface = RecordingSurface::new(m);
    engine
        .draw_text(
            &mut surface,
            &lines,
            TextBox::new(0.0, 0.0, width, height),
            HorizontalAlignment::Center,
            VerticalAlignment::Center,
        )
        .unwrap();
    let calls = surface.calls();
    assert_eq!(surface.drawn_text(), vec!["Customer", "name:", "String", "id: long"]);
    assert_eq!(calls[0].line.flags(), StyleFlags::BOLD);
    assert_eq!(calls[3].line.flags(), StyleFlags::UNDERLINE);
    assert!(calls.iter().all(|c| c.x == 5.0));
}

#[test]
fn escapes_and_guillemets() {
    let engine = LayoutEngine::default();
    assert_eq!(
        wrapped(&engine, "<<interface>> a\\*b", 30.0),
        vec!["«interface» a*b"]
    );
}

#[test]
fn concurrent_callers_converge() {
    let engine = Arc::new(LayoutEngine::new(
        LayoutConfig::new().wrap_cache_capacity(4).min_width_cache_capacity(4),
    ));
    let texts = [
        "the quick brown fox",
        "jumps over",
        "the lazy dog",
        "*bold statement here*",
        "averyveryverylongword and more",
    ];
    let expected: Vec<_> = texts
        .iter()
        .map(|t| LayoutEngine::default().wrap(t, 9.0, &cells(), false).unwrap())
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|offset| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut out = Vec::new();
                for round in 0..50 {
                    let idx = (offset + round) % texts.len();
                    let result = engine.wrap(texts[idx], 9.0, &cells(), false).unwrap();
                    out.push((idx, result));
                }
                out
            })
        })
        .collect();

    for handle in handles {
        for (idx, result) in handle.join().unwrap() {
            assert_eq!(*result, *expected[idx]);
        }
    }
    let stats = engine.cache_stats().wrap;
    assert_eq!(stats.hits + stats.misses, 400);
    assert!(stats.size <= 4);
}
