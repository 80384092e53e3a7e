use super::grapheme::is_break_space;
use crate::metrics::FontMetrics;
use crate::units::Pt;
use unicode_segmentation::UnicodeSegmentation;

/// One wrapped line of text, measured at the font size it was broken for
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// The line's content, whitespace included exactly as it appeared in the input
    pub text: String,
    /// Number of grapheme clusters in `text`
    pub grapheme_count: usize,
    /// Measured width, including character spacing between graphemes
    pub width: Pt,
    /// Whether this is the last line of its paragraph (followed by an explicit break,
    /// or the end of the text). Terminal lines are never justified.
    pub terminal: bool,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.grapheme_count == 0
    }
}

/// A word followed by the whitespace after it. Lines only ever break between tokens.
struct Token<'t> {
    text: &'t str,
    graphemes: usize,
    width: Pt,
}

/// Greedy word-wrapper for a single font size
pub struct LineBreaker<'m> {
    metrics: &'m dyn FontMetrics,
    size: Pt,
    character_spacing: Pt,
}

impl<'m> LineBreaker<'m> {
    pub fn new(metrics: &'m dyn FontMetrics, size: Pt, character_spacing: Pt) -> LineBreaker<'m> {
        LineBreaker {
            metrics,
            size,
            character_spacing,
        }
    }

    /// Wrap `text` (newlines already normalised to `\n`) into lines no wider than
    /// `max_width`. A word wider than `max_width` gets a line of its own and overflows
    /// rather than being split. With no `max_width`, lines only break at `\n`.
    ///
    /// Empty text yields no lines; otherwise every paragraph yields at least one line,
    /// so an empty paragraph becomes an empty line.
    pub fn break_lines(&self, text: &str, max_width: Option<Pt>) -> Vec<Line> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut lines: Vec<Line> = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = self.empty_line();
            for token in self.tokens(paragraph) {
                if !line.is_empty() {
                    let candidate = line.width + self.character_spacing + token.width;
                    if max_width.is_some_and(|max| candidate > max) {
                        lines.push(std::mem::replace(&mut line, self.empty_line()));
                    }
                }
                self.append(&mut line, &token);
            }
            line.terminal = true;
            lines.push(line);
        }

        lines
    }

    fn empty_line(&self) -> Line {
        Line {
            text: String::new(),
            grapheme_count: 0,
            width: Pt(0.0),
            terminal: false,
        }
    }

    fn append(&self, line: &mut Line, token: &Token) {
        if !line.is_empty() {
            line.width += self.character_spacing;
        }
        line.width += token.width;
        line.grapheme_count += token.graphemes;
        line.text.push_str(token.text);
    }

    fn tokens<'t>(&self, paragraph: &'t str) -> Vec<Token<'t>> {
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut in_space = false;
        for (idx, grapheme) in paragraph.grapheme_indices(true) {
            let space = is_break_space(grapheme);
            if in_space && !space {
                tokens.push(self.token(&paragraph[start..idx]));
                start = idx;
            }
            in_space = space;
        }
        if start < paragraph.len() {
            tokens.push(self.token(&paragraph[start..]));
        }
        tokens
    }

    fn token<'t>(&self, text: &'t str) -> Token<'t> {
        Token {
            text,
            graphemes: text.graphemes(true).count(),
            width: self
                .metrics
                .measure(text, self.size, self.character_spacing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MonoMetrics;

    // at 10pt every grapheme is 5pt wide
    fn wrap(text: &str, max_width: Option<f32>) -> Vec<Line> {
        let metrics = MonoMetrics::default();
        LineBreaker::new(&metrics, Pt(10.0), Pt(0.0)).break_lines(text, max_width.map(Pt))
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", Some(100.0)).is_empty());
    }

    #[test]
    fn short_text_is_one_terminal_line() {
        let lines = wrap("Hello world", Some(100.0));
        assert_eq!(texts(&lines), vec!["Hello world"]);
        assert_eq!(lines[0].width, Pt(55.0));
        assert_eq!(lines[0].grapheme_count, 11);
        assert!(lines[0].terminal);
    }

    #[test]
    fn wraps_between_words_keeping_whitespace() {
        // "Hello " is 30pt, "world" is 25pt: only one fits in 40pt
        let lines = wrap("Hello world", Some(40.0));
        assert_eq!(texts(&lines), vec!["Hello ", "world"]);
        assert!(!lines[0].terminal);
        assert!(lines[1].terminal);
        assert_eq!(lines[0].width, Pt(30.0));
    }

    #[test]
    fn long_words_overflow_on_their_own_line() {
        let lines = wrap("a verylongword b", Some(30.0));
        assert_eq!(texts(&lines), vec!["a ", "verylongword ", "b"]);
        assert!(lines[1].width > Pt(30.0));
    }

    #[test]
    fn explicit_breaks_always_break() {
        let lines = wrap("one\ntwo\n\nthree", Some(1000.0));
        assert_eq!(texts(&lines), vec!["one", "two", "", "three"]);
        assert!(lines.iter().all(|l| l.terminal));
    }

    #[test]
    fn trailing_newline_yields_an_empty_last_line() {
        let lines = wrap("abc\n", Some(1000.0));
        assert_eq!(texts(&lines), vec!["abc", ""]);
    }

    #[test]
    fn leading_whitespace_is_preserved() {
        let lines = wrap("  indented", Some(1000.0));
        assert_eq!(texts(&lines), vec!["  indented"]);
        assert_eq!(lines[0].grapheme_count, 10);
    }

    #[test]
    fn unbounded_width_only_breaks_at_newlines() {
        let lines = wrap("a b c d e f g\nh", None);
        assert_eq!(texts(&lines), vec!["a b c d e f g", "h"]);
    }

    #[test]
    fn character_spacing_counts_between_tokens() {
        let metrics = MonoMetrics::default();
        let breaker = LineBreaker::new(&metrics, Pt(10.0), Pt(1.0));
        let lines = breaker.break_lines("ab cd", Some(Pt(1000.0)));
        // 5 graphemes * 5pt + 4 gaps * 1pt
        assert_eq!(lines[0].width, Pt(29.0));
        assert_eq!(lines[0].width, metrics.measure("ab cd", Pt(10.0), Pt(1.0)));
    }

    #[test]
    fn no_break_spaces_hold_words_together() {
        // "10\u{a0}km" is 25pt: too wide for the box, but it stays one word
        let lines = wrap("run 10\u{a0}km", Some(20.0));
        assert_eq!(texts(&lines), vec!["run ", "10\u{a0}km"]);
    }
}
