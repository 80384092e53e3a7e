mod common;

use common::{fixed, schema, Mono};
use pdf_flow::layout::{Alignment, LayoutConfig, LayoutResult, TextLayout, TextStyle};
use pdf_flow::{Mm, Pt};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[a-z ,.\n]{0,160}"
}

fn lay_out(value: &str, width: f32, height: f32, style: TextStyle) -> LayoutResult {
    let config = LayoutConfig::default();
    let s = schema(10.0, 30.0, width, height, style);
    TextLayout::new(&Mono, &config).layout(&s, value)
}

/// Undo the line breaking: lines of a paragraph run together, paragraphs are joined
/// by the newline that ended them
fn rejoin(result: &LayoutResult) -> String {
    let lines: Vec<_> = result.lines().collect();
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&line.text);
        if line.terminal && i + 1 < lines.len() {
            out.push('\n');
        }
    }
    out
}

proptest! {
    #[test]
    fn lines_stay_inside_the_box(value in text(), width in 10.0f32..120.0, size in 4.0f32..24.0) {
        let result = lay_out(&value, width, 500.0, fixed(size));
        let box_width: Pt = Mm(width).into();
        for line in result.lines() {
            // only a lone word (with the whitespace after it) may overflow
            let lone_word = !line.text.trim_end().contains(' ') || line.text.trim().is_empty();
            prop_assert!(line.width <= box_width || lone_word, "{:?} overflows", line.text);
        }
    }

    #[test]
    fn every_character_is_kept(value in text(), width in 10.0f32..120.0, height in 5.0f32..80.0) {
        let result = lay_out(&value, width, height, fixed(10.0));
        prop_assert_eq!(rejoin(&result), value);
    }

    #[test]
    fn layout_is_deterministic(value in text(), width in 10.0f32..120.0, height in 5.0f32..80.0) {
        let style = TextStyle {
            alignment: Alignment::Justify,
            ..fixed(9.0)
        };
        let first = lay_out(&value, width, height, style.clone());
        let second = lay_out(&value, width, height, style);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn terminal_lines_are_never_stretched(
        value in text(),
        width in 10.0f32..120.0,
        spacing in 0.0f32..2.0,
    ) {
        let style = TextStyle {
            alignment: Alignment::Justify,
            character_spacing: Pt(spacing),
            ..fixed(10.0)
        };
        let result = lay_out(&value, width, 200.0, style);
        for line in result.lines().filter(|line| line.terminal) {
            prop_assert_eq!(line.character_spacing, Pt(spacing));
        }
        if let Some(last) = result.lines().last() {
            prop_assert!(last.terminal);
        }
    }

    #[test]
    fn pages_and_lines_are_in_order(value in text(), height in 2.0f32..40.0, size in 6.0f32..30.0) {
        let result = lay_out(&value, 60.0, height, fixed(size));
        for (expected, page) in result.pages.iter().enumerate() {
            prop_assert_eq!(page.index, expected);
            prop_assert!(!page.lines.is_empty());
        }
        let indices: Vec<usize> = result.lines().map(|line| line.line_index).collect();
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(indices.first().copied().unwrap_or(0), 0);
    }
}
