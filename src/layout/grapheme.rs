use unicode_segmentation::UnicodeSegmentation;

/// Normalise line endings so that `\r\n` and lone `\r` both become `\n`. This runs
/// before segmentation, otherwise `\r\n` would be a single grapheme cluster that the
/// line breaker would have to special-case.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into extended grapheme clusters (user-perceived characters). Locale
/// independent and pure: the same input always yields the same segmentation.
/// `\n` is always its own cluster.
pub fn segment(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Count grapheme clusters without allocating
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Whether a grapheme cluster is whitespace that words can wrap after. Newlines are
/// not included; they are hard breaks, handled separately. Neither are the no-break
/// spaces, which join the words either side of them.
pub fn is_break_space(grapheme: &str) -> bool {
    grapheme != "\n"
        && grapheme
            .chars()
            .all(|ch| ch.is_whitespace() && !is_no_break_space(ch))
}

fn is_no_break_space(ch: char) -> bool {
    matches!(ch, '\u{A0}' | '\u{2007}' | '\u{202F}')
}
