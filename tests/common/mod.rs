#![allow(dead_code)]

use pdf_flow::layout::{FontSizing, TextBox, TextSchema, TextStyle};
use pdf_flow::{FontMetrics, FontProvider, Mm, PDFError, Pt};
use std::sync::Arc;

/// Every grapheme advances half the font size; 0.8em ascent, -0.2em descent
#[derive(Debug, Clone, Copy, Default)]
pub struct Mono;

impl FontMetrics for Mono {
    fn advance_width(&self, grapheme: &str, size: Pt) -> Pt {
        if grapheme == "\n" {
            Pt(0.0)
        } else {
            size * 0.5
        }
    }

    fn ascent(&self, size: Pt) -> Pt {
        size * 0.8
    }

    fn descent(&self, size: Pt) -> Pt {
        size * -0.2
    }

    fn line_gap(&self, _size: Pt) -> Pt {
        Pt(0.0)
    }
}

/// Knows a single font, `Mono`, which is also the fallback
pub struct MonoProvider;

impl FontProvider for MonoProvider {
    fn load_font(&self, name: &str) -> Result<Arc<dyn FontMetrics>, PDFError> {
        match name {
            "Mono" => Ok(Arc::new(Mono)),
            _ => Err(PDFError::FontNotFound(name.to_string())),
        }
    }

    fn fallback_font(&self) -> &str {
        "Mono"
    }
}

pub fn schema(x: f32, y: f32, width: f32, height: f32, style: TextStyle) -> TextSchema {
    TextSchema::new("field", TextBox::new(Mm(x), Mm(y), Mm(width), Mm(height))).with_style(style)
}

pub fn fixed(size: f32) -> TextStyle {
    TextStyle {
        font_size: FontSizing::Fixed(Pt(size)),
        ..TextStyle::default()
    }
}

pub fn close(a: Pt, b: Pt) -> bool {
    (a.0 - b.0).abs() < 1e-3
}
