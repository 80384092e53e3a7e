use super::config::LayoutConfig;
use super::font_size::FontSizeResolver;
use super::grapheme::normalize_newlines;
use super::justify::{LinePlacer, Placement};
use super::line_break::LineBreaker;
use super::paginate::{LayoutPage, Paginator};
use super::style::{Alignment, FitAxis, FontSizing, TextSchema, VerticalAlignment};
use super::vertical::BlockMetrics;
use crate::metrics::FontMetrics;
use crate::units::Pt;

/// A line ready to draw: its content, and where and how to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    /// Index of the line within the whole laid-out text
    pub line_index: usize,
    /// Left edge of the line, in canvas coordinates
    pub x: Pt,
    /// Baseline of the line, in canvas coordinates (measured up from the page bottom)
    pub y: Pt,
    /// Measured width at the base character spacing
    pub width: Pt,
    /// Spacing between graphemes, widened on justified lines
    pub character_spacing: Pt,
    /// Whether this line ends its paragraph
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedPage {
    /// 0-based, relative to the page the text starts on
    pub index: usize,
    pub lines: Vec<PositionedLine>,
}

/// The outcome of laying out one text value. Pages are in order and contiguous from 0;
/// empty text has no pages at all.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// The font size the text was set at, after any auto-fitting
    pub font_size: Pt,
    /// Distance between consecutive baselines
    pub line_advance: Pt,
    pub pages: Vec<PositionedPage>,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every line on every page, in order
    pub fn lines(&self) -> impl Iterator<Item = &PositionedLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Flip a y measured down from the top of the page into the canvas' bottom-up frame
pub fn canvas_y(page_height: Pt, region_top: Pt, offset: Pt) -> Pt {
    page_height - region_top - offset
}

/// Lays out text values for schemas, measuring with one font
pub struct TextLayout<'a> {
    metrics: &'a dyn FontMetrics,
    config: &'a LayoutConfig,
}

impl<'a> TextLayout<'a> {
    pub fn new(metrics: &'a dyn FontMetrics, config: &'a LayoutConfig) -> TextLayout<'a> {
        TextLayout { metrics, config }
    }

    /// The font size `value` will be set at in `schema`'s box
    pub fn resolve_font_size(&self, schema: &TextSchema, text: &str) -> Pt {
        let style = &schema.style;
        match style.font_size {
            FontSizing::Fixed(size) => size.max(Pt(0.0)),
            FontSizing::AutoFit { min, max, .. } if schema.position.is_degenerate() => {
                max.max(min).max(Pt(0.0))
            }
            FontSizing::AutoFit { min, max, fit } => {
                let resolver = FontSizeResolver {
                    metrics: self.metrics,
                    character_spacing: style.sanitized_character_spacing(),
                    line_pitch: style.line_pitch(),
                    box_width: schema.position.width.into(),
                    box_height: schema.position.height.into(),
                };
                resolver.resolve(
                    text,
                    min.max(self.config.min_font_size),
                    max,
                    self.config.fit_step,
                    fit,
                )
            }
        }
    }

    /// Lay out `value` inside `schema`'s box, flowing onto continuation pages if it runs
    /// past the bottom of the box.
    pub fn layout(&self, schema: &TextSchema, value: &str) -> LayoutResult {
        let style = &schema.style;
        let frame = schema.position;
        let text = normalize_newlines(value);
        let font_size = self.resolve_font_size(schema, &text);
        let block = BlockMetrics {
            font_size,
            ascent: self.metrics.ascent(font_size),
            descent: self.metrics.descent(font_size),
            line_height: style.sanitized_line_height(),
        };

        if text.is_empty() {
            return LayoutResult {
                font_size,
                line_advance: block.line_advance(),
                pages: Vec::new(),
            };
        }

        let spacing = style.sanitized_character_spacing();
        let box_top: Pt = frame.y.into();
        let box_width: Pt = frame.width.into();
        let box_height: Pt = frame.height.into();
        let degenerate = frame.is_degenerate();

        let wrap_width = match style.font_size {
            _ if degenerate => None,
            FontSizing::AutoFit {
                fit: FitAxis::Horizontal,
                ..
            } => None,
            _ => Some(box_width),
        };
        let lines = LineBreaker::new(self.metrics, font_size, spacing).break_lines(&text, wrap_width);

        let (first_offset, first_bottom, alignment) = if degenerate {
            log::debug!(
                "`{}` has a degenerate {}x{}mm box, laying out unwrapped",
                schema.name,
                frame.width,
                frame.height
            );
            (
                block.first_baseline(VerticalAlignment::Top, lines.len(), box_height),
                None,
                Alignment::Left,
            )
        } else {
            (
                block.first_baseline(style.vertical_alignment, lines.len(), box_height),
                Some(box_top + box_height),
                style.alignment,
            )
        };

        let paginator = Paginator {
            first_top: box_top,
            first_bottom,
            first_offset,
            continuation_top: self.config.continuation_top(),
            continuation_bottom: self.config.continuation_bottom(),
            continuation_offset: block.first_baseline(VerticalAlignment::Top, 1, box_height),
            line_advance: block.line_advance(),
        };
        let placer = LinePlacer {
            alignment,
            box_x: frame.x.into(),
            box_width,
            base_spacing: spacing,
        };

        let pages = paginator
            .paginate(lines)
            .into_iter()
            .map(|page| self.position(page, &placer))
            .collect::<Vec<_>>();

        log::debug!(
            "`{}` laid out at {font_size}pt over {} page(s)",
            schema.name,
            pages.len()
        );

        LayoutResult {
            font_size,
            line_advance: block.line_advance(),
            pages,
        }
    }

    fn position(&self, page: LayoutPage, placer: &LinePlacer) -> PositionedPage {
        let page_height = self.config.page_height();
        let LayoutPage { index, top, lines, .. } = page;
        let lines = lines
            .into_iter()
            .map(|placed| {
                let Placement {
                    x,
                    character_spacing,
                } = placer.place(&placed.line);
                PositionedLine {
                    x,
                    y: canvas_y(page_height, top, placed.offset),
                    width: placed.line.width,
                    character_spacing,
                    terminal: placed.line.terminal,
                    line_index: placed.line_index,
                    text: placed.line.text,
                }
            })
            .collect();
        PositionedPage { index, lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::{TextBox, TextStyle};
    use crate::test_support::MonoMetrics;
    use crate::units::{Mm, Pt};

    fn schema(width: f32, height: f32, style: TextStyle) -> TextSchema {
        TextSchema::new("field", TextBox::new(Mm(10.0), Mm(20.0), Mm(width), Mm(height)))
            .with_style(style)
    }

    fn fixed(size: f32) -> TextStyle {
        TextStyle {
            font_size: FontSizing::Fixed(Pt(size)),
            ..TextStyle::default()
        }
    }

    fn close(a: Pt, b: Pt) -> bool {
        (a.0 - b.0).abs() < 1e-3
    }

    #[test]
    fn empty_values_have_no_pages() {
        let metrics = MonoMetrics::default();
        let config = LayoutConfig::default();
        let result = TextLayout::new(&metrics, &config).layout(&schema(50.0, 10.0, fixed(10.0)), "");
        assert!(result.is_empty());
    }

    #[test]
    fn single_line_top_left() {
        let metrics = MonoMetrics::default();
        let config = LayoutConfig::default();
        let s = schema(100.0, 20.0, fixed(10.0));
        let result = TextLayout::new(&metrics, &config).layout(&s, "Hello world");

        assert_eq!(result.pages.len(), 1);
        let line = &result.pages[0].lines[0];
        assert_eq!(line.text, "Hello world");
        assert_eq!(line.x, Pt::from(Mm(10.0)));
        // baseline sits one ascent below the box top, flipped to canvas coordinates
        let expected = config.page_height() - Pt::from(Mm(20.0)) - Pt(8.0);
        assert!(close(line.y, expected));
    }

    #[test]
    fn degenerate_boxes_lay_out_unwrapped_on_one_page() {
        let metrics = MonoMetrics::default();
        let config = LayoutConfig::default();
        let s = schema(0.0, 0.0, fixed(10.0));
        let result = TextLayout::new(&metrics, &config).layout(&s, "one two three\nfour");

        assert_eq!(result.pages.len(), 1);
        let texts: Vec<&str> = result.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one two three", "four"]);
    }

    #[test]
    fn auto_fit_with_a_degenerate_box_uses_the_largest_size() {
        let metrics = MonoMetrics::default();
        let config = LayoutConfig::default();
        let style = TextStyle {
            font_size: FontSizing::AutoFit {
                min: Pt(4.0),
                max: Pt(18.0),
                fit: FitAxis::Vertical,
            },
            ..TextStyle::default()
        };
        let result = TextLayout::new(&metrics, &config).layout(&schema(-5.0, 10.0, style), "x");
        assert_eq!(result.font_size, Pt(18.0));
    }

    #[test]
    fn justified_paragraph_lines_fill_the_box() {
        let metrics = MonoMetrics::default();
        let config = LayoutConfig::default();
        let style = TextStyle {
            alignment: Alignment::Justify,
            ..fixed(10.0)
        };
        let s = schema(30.0, 100.0, style);
        let result = TextLayout::new(&metrics, &config).layout(&s, "aaa bbb ccc ddd eee fff");

        let box_width: Pt = Mm(30.0).into();
        let lines: Vec<&PositionedLine> = result.lines().collect();
        assert!(lines.len() > 1);
        for line in &lines[..lines.len() - 1] {
            let graphemes = line.text.chars().count();
            let stretched = line.width + line.character_spacing * (graphemes - 1) as f32;
            assert!(close(stretched, box_width));
        }
        assert_eq!(lines.last().unwrap().character_spacing, Pt(0.0));
    }
}
