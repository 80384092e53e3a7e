use super::config::{DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT};
use crate::colour::Colour;
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// The rectangle text flows into, in millimetres, with its origin at the top-left of
/// the page and y growing downward.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub x: Mm,
    pub y: Mm,
    pub width: Mm,
    pub height: Mm,
}

impl TextBox {
    pub fn new(x: Mm, y: Mm, width: Mm, height: Mm) -> TextBox {
        TextBox {
            x,
            y,
            width,
            height,
        }
    }

    /// A box with no area can't wrap or align text. Editors briefly produce these while
    /// the user is resizing a field.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.0 > 0.0 && self.height.0 > 0.0)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch character spacing so every line but the last of a paragraph fills the box
    Justify,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Which dimension auto-fitting makes the text fit
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitAxis {
    /// Wrap to the box width, shrink until the wrapped lines fit the box height
    #[default]
    Vertical,
    /// Only break at explicit newlines, shrink until the widest line fits the box width
    Horizontal,
}

/// How big the text is: a fixed size, or the largest size in a range that fits the box
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSizing {
    Fixed(Pt),
    AutoFit {
        min: Pt,
        max: Pt,
        #[serde(default)]
        fit: FitAxis,
    },
}

impl Default for FontSizing {
    fn default() -> Self {
        FontSizing::Fixed(DEFAULT_FONT_SIZE)
    }
}

/// Everything about how a text field looks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font to draw with; `None` uses the font provider's fallback font
    pub font_name: Option<String>,
    pub font_size: FontSizing,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
    /// Distance between baselines as a multiple of the font size. `0` means single
    /// spacing, the same as `1`
    pub line_height: f32,
    /// Extra space between graphemes
    pub character_spacing: Pt,
    pub font_colour: Colour,
    pub background_colour: Option<Colour>,
    pub opacity: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_name: None,
            font_size: FontSizing::default(),
            alignment: Alignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            line_height: DEFAULT_LINE_HEIGHT,
            character_spacing: Pt(0.0),
            font_colour: Colour::default(),
            background_colour: None,
            opacity: 1.0,
        }
    }
}

impl TextStyle {
    /// The baseline-to-baseline distance as a multiple of the font size
    pub fn line_pitch(&self) -> f32 {
        if self.line_height.is_finite() && self.line_height > 0.0 {
            self.line_height
        } else {
            1.0
        }
    }

    /// The line height with anything negative or non-finite treated as `0`
    pub fn sanitized_line_height(&self) -> f32 {
        if self.line_height.is_finite() {
            self.line_height.max(0.0)
        } else {
            0.0
        }
    }

    /// Character spacing, never negative
    pub fn sanitized_character_spacing(&self) -> Pt {
        self.character_spacing.max(Pt(0.0))
    }
}

/// A named text field: where it goes and how it looks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSchema {
    pub name: String,
    pub position: TextBox,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl TextSchema {
    pub fn new<S: ToString>(name: S, position: TextBox) -> TextSchema {
        TextSchema {
            name: name.to_string(),
            position,
            style: TextStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> TextSchema {
        self.style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_deserializes_with_defaults() {
        let schema: TextSchema = serde_json::from_str(
            r#"{
                "name": "title",
                "position": { "x": 10, "y": 20, "width": 100, "height": 15 }
            }"#,
        )
        .unwrap();

        assert_eq!(schema.position.width, Mm(100.0));
        assert_eq!(schema.style.font_size, FontSizing::Fixed(Pt(13.0)));
        assert_eq!(schema.style.alignment, Alignment::Left);
        assert_eq!(schema.style.vertical_alignment, VerticalAlignment::Top);
        assert_eq!(schema.style.line_height, 1.0);
        assert_eq!(schema.style.opacity, 1.0);
    }

    #[test]
    fn auto_fit_sizing_deserializes() {
        let schema: TextSchema = serde_json::from_str(
            r#"{
                "name": "body",
                "position": { "x": 0, "y": 0, "width": 50, "height": 20 },
                "fontSize": { "min": 6, "max": 24 },
                "alignment": "justify",
                "verticalAlignment": "middle",
                "characterSpacing": 0.5
            }"#,
        )
        .unwrap();

        assert_eq!(
            schema.style.font_size,
            FontSizing::AutoFit {
                min: Pt(6.0),
                max: Pt(24.0),
                fit: FitAxis::Vertical
            }
        );
        assert_eq!(schema.style.alignment, Alignment::Justify);
        assert_eq!(schema.style.vertical_alignment, VerticalAlignment::Middle);
        assert_eq!(schema.style.character_spacing, Pt(0.5));
    }

    #[test]
    fn zero_line_height_is_single_spacing() {
        let style = TextStyle {
            line_height: 0.0,
            ..TextStyle::default()
        };
        assert_eq!(style.line_pitch(), 1.0);
        assert_eq!(style.sanitized_line_height(), 0.0);
    }

    #[test]
    fn degenerate_boxes() {
        assert!(TextBox::new(Mm(0.0), Mm(0.0), Mm(0.0), Mm(10.0)).is_degenerate());
        assert!(TextBox::new(Mm(0.0), Mm(0.0), Mm(10.0), Mm(-1.0)).is_degenerate());
        assert!(!TextBox::new(Mm(0.0), Mm(0.0), Mm(10.0), Mm(10.0)).is_degenerate());
    }
}
