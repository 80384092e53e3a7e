//! Content stream rendering for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, RectangleLayout, SpanLayout};
use id_arena::Arena;
use std::collections::BTreeMap;
use std::io::Write;
use unicode_segmentation::UnicodeSegmentation;

/// Opacities are matched to graphics states in thousandths
const OPACITY_STEPS: f32 = 1000.0;

/// The distinct partial opacities used across a document, each of which gets its own
/// `ExtGState` resource named `GS{index}`
#[derive(Debug, Default, Clone)]
pub(crate) struct GraphicsStates {
    states: BTreeMap<u16, usize>,
}

impl GraphicsStates {
    fn key(opacity: f32) -> u16 {
        let opacity = if opacity.is_finite() { opacity } else { 1.0 };
        (opacity.clamp(0.0, 1.0) * OPACITY_STEPS).round() as u16
    }

    /// Register an opacity; fully opaque content needs no graphics state
    pub(crate) fn register(&mut self, opacity: f32) {
        let key = GraphicsStates::key(opacity);
        if key as f32 >= OPACITY_STEPS {
            return;
        }
        let next = self.states.len();
        self.states.entry(key).or_insert(next);
    }

    /// The graphics state to draw `opacity` with, if it isn't fully opaque
    pub(crate) fn get(&self, opacity: f32) -> Option<usize> {
        self.states.get(&GraphicsStates::key(opacity)).copied()
    }

    /// Every (alpha, index) pair
    pub(crate) fn iter(&self) -> impl Iterator<Item = (f32, usize)> + '_ {
        self.states
            .iter()
            .map(|(&key, &index)| (key as f32 / OPACITY_STEPS, index))
    }
}

/// Renders page contents to an (uncompressed) PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
    states: &GraphicsStates,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        write!(&mut content, "q\n")?;
        match page_content {
            PageContents::Text(span) => {
                write_state(&mut content, states, span.opacity)?;
                render_text_span(&mut content, span, fonts)?;
            }
            PageContents::Rectangle(rectangle) => {
                write_state(&mut content, states, rectangle.opacity)?;
                render_rectangle(&mut content, rectangle)?;
            }
        }
        write!(&mut content, "Q\n")?;
    }

    Ok(content)
}

fn write_state(
    content: &mut Vec<u8>,
    states: &GraphicsStates,
    opacity: f32,
) -> Result<(), std::io::Error> {
    match states.get(opacity) {
        Some(index) => writeln!(content, "/GS{index} gs"),
        None => Ok(()),
    }
}

#[allow(clippy::write_with_newline)]
fn render_text_span(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(font) = fonts.get(span.font.id) else {
        log::warn!("skipping text drawn with a font missing from the document");
        return Ok(());
    };

    write!(content, "/F{} {} Tf\n", span.font.id.index(), span.font.size)?;
    write_colour(content, span.colour, false)?;

    write!(content, "BT\n")?;
    write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
    write_glyphs(content, span, |ch| font.glyph_for(ch).0)?;
    write!(content, "ET\n")?;
    Ok(())
}

/// Show the span's glyphs. Character spacing goes between grapheme clusters, not
/// between glyphs (which is what `Tc` would do), so spaced text is drawn as a `TJ` array
/// with an adjustment after every cluster but the last.
#[allow(clippy::write_with_newline)]
fn write_glyphs<G: Fn(char) -> u16>(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    glyph: G,
) -> Result<(), std::io::Error> {
    let spacing = span.character_spacing;
    if spacing.0 == 0.0 || span.font.size.0 == 0.0 {
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", glyph(ch))?;
        }
        return write!(content, "> Tj\n");
    }

    // TJ adjustments are thousandths of text space, subtracted from the advance
    let adjustment = -spacing.0 * 1000.0 / span.font.size.0;
    write!(content, "[")?;
    for (i, grapheme) in span.text.graphemes(true).enumerate() {
        if i > 0 {
            write!(content, " {adjustment} ")?;
        }
        write!(content, "<")?;
        for ch in grapheme.chars() {
            write!(content, "{:04x}", glyph(ch))?;
        }
        write!(content, ">")?;
    }
    write!(content, "] TJ\n")
}

#[allow(clippy::write_with_newline)]
fn render_rectangle(
    content: &mut Vec<u8>,
    rectangle: &RectangleLayout,
) -> Result<(), std::io::Error> {
    if let Some(fill) = rectangle.fill {
        write_colour(content, fill, false)?;
    }
    if let Some((width, stroke)) = rectangle.stroke {
        write!(content, "{width} w\n")?;
        write_colour(content, stroke, true)?;
    }

    let rect = rectangle.rect;
    write!(
        content,
        "{} {} {} {} re\n",
        rect.x1,
        rect.y1,
        rect.width(),
        rect.height()
    )?;

    let op = match (rectangle.fill.is_some(), rectangle.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        (false, false) => "n",
    };
    write!(content, "{op}\n")
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour, stroke: bool) -> Result<(), std::io::Error> {
    match (colour, stroke) {
        (Colour::RGB { r, g, b }, false) => write!(content, "{r} {g} {b} rg\n"),
        (Colour::RGB { r, g, b }, true) => write!(content, "{r} {g} {b} RG\n"),
        (Colour::CMYK { c, m, y, k }, false) => write!(content, "{c} {m} {y} {k} k\n"),
        (Colour::CMYK { c, m, y, k }, true) => write!(content, "{c} {m} {y} {k} K\n"),
        (Colour::Grey { g }, false) => write!(content, "{g} g\n"),
        (Colour::Grey { g }, true) => write!(content, "{g} G\n"),
    }
}
