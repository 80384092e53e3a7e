//! Deterministic metrics for tests: every grapheme advances half the font size, the
//! ascent is 0.8em and the descent -0.2em. These numbers are the reference vector the
//! vertical alignment tests are pinned against.

use crate::{metrics::FontMetrics, Font, Pt};

#[derive(Debug, Clone, Copy)]
pub(crate) struct MonoMetrics {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        MonoMetrics {
            advance: 0.5,
            ascent: 0.8,
            descent: -0.2,
        }
    }
}

impl FontMetrics for MonoMetrics {
    fn advance_width(&self, grapheme: &str, size: Pt) -> Pt {
        if grapheme == "\n" {
            Pt(0.0)
        } else {
            size * self.advance
        }
    }

    fn ascent(&self, size: Pt) -> Pt {
        size * self.ascent
    }

    fn descent(&self, size: Pt) -> Pt {
        size * self.descent
    }

    fn line_gap(&self, _size: Pt) -> Pt {
        Pt(0.0)
    }
}

/// Fonts commonly installed on test machines, tried in order
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A real TrueType font from the machine running the tests, if one can be found
pub(crate) fn system_font() -> Option<Font> {
    SYSTEM_FONTS
        .iter()
        .find_map(|path| std::fs::read(path).ok())
        .and_then(|bytes| Font::load(bytes).ok())
}
