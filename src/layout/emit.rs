use super::config::LayoutConfig;
use super::engine::LayoutResult;
use super::style::TextSchema;
use crate::colour::Colour;
use crate::rect::Rect;
use crate::units::{Mm, Pt};
use std::sync::Arc;

/// Draw a run of text with its baseline starting at (`x`, `y`), in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The font the text was measured with
    pub font: Arc<str>,
    pub text: String,
    pub x: Pt,
    pub y: Pt,
    pub size: Pt,
    pub colour: Colour,
    /// Baseline-to-baseline distance of the block the run belongs to
    pub line_height: Pt,
    pub character_spacing: Pt,
    pub opacity: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: Pt,
    pub colour: Colour,
}

/// Draw a rectangle, filled and / or stroked
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectangleCommand {
    pub rect: Rect,
    pub fill: Option<Colour>,
    pub border: Option<Border>,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rectangle(RectangleCommand),
    Text(TextRun),
}

/// Draw instructions for one page, in painting order
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// 0-based, relative to the page the schema starts on
    pub index: usize,
    pub commands: Vec<DrawCommand>,
}

/// Everything needed to paint one schema, page by page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPlan {
    pub pages: Vec<PagePlan>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All text runs across all pages, in order
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages
            .iter()
            .flat_map(|page| page.commands.iter())
            .filter_map(|command| match command {
                DrawCommand::Text(run) => Some(run),
                DrawCommand::Rectangle(_) => None,
            })
    }
}

/// Turn a layout into draw commands: an optional background behind the box on the first
/// page, header / footer placeholders on continuation pages, then one text run per
/// non-empty line.
pub fn emit(
    schema: &TextSchema,
    font: Arc<str>,
    layout: &LayoutResult,
    config: &LayoutConfig,
) -> RenderPlan {
    let style = &schema.style;
    let opacity = style.opacity.clamp(0.0, 1.0);

    let pages = layout
        .pages
        .iter()
        .map(|page| {
            let mut commands = Vec::with_capacity(page.lines.len() + 2);

            if page.index == 0 {
                if let Some(fill) = style.background_colour {
                    if !schema.position.is_degenerate() {
                        commands.push(DrawCommand::Rectangle(RectangleCommand {
                            rect: box_rect(schema, config),
                            fill: Some(fill),
                            border: None,
                            opacity,
                        }));
                    }
                }
            } else if let Some(markers) = config.continuation_markers {
                let height: Pt = markers.height.into();
                let width = config.page_width();
                for y in [config.page_height() - height, Pt(0.0)] {
                    commands.push(DrawCommand::Rectangle(RectangleCommand {
                        rect: Rect::from_origin(Pt(0.0), y, width, height),
                        fill: Some(markers.fill),
                        border: None,
                        opacity: markers.opacity.clamp(0.0, 1.0),
                    }));
                }
            }

            commands.extend(page.lines.iter().filter(|line| !line.text.is_empty()).map(
                |line| {
                    DrawCommand::Text(TextRun {
                        font: font.clone(),
                        text: line.text.clone(),
                        x: line.x,
                        y: line.y,
                        size: layout.font_size,
                        colour: style.font_colour,
                        line_height: layout.line_advance,
                        character_spacing: line.character_spacing,
                        opacity,
                    })
                },
            ));

            PagePlan {
                index: page.index,
                commands,
            }
        })
        .collect();

    RenderPlan { pages }
}

/// The schema's box in canvas coordinates
fn box_rect(schema: &TextSchema, config: &LayoutConfig) -> Rect {
    let frame = schema.position;
    let bottom: Mm = frame.y + frame.height;
    Rect::from_origin(
        frame.x.into(),
        config.page_height() - bottom.into(),
        frame.width.into(),
        frame.height.into(),
    )
}
