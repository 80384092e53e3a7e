//! Text layout: flowing a text value into a box on a page.
//!
//! Laying out one value runs through these stages, each usable on its own:
//!
//! 1. [`normalize_newlines`] and grapheme segmentation
//! 2. [`FontSizeResolver`] picks a size when the schema auto-fits
//! 3. [`LineBreaker`] wraps the text into [`Line`]s at that size
//! 4. [`BlockMetrics`] finds the first baseline for the vertical alignment
//! 5. [`Paginator`] distributes the lines over the starting page and any
//!    continuation pages
//! 6. [`LinePlacer`] positions each line horizontally, stretching justified lines
//! 7. [`emit`] turns the result into a [`RenderPlan`] a [Canvas](crate::Canvas) can draw
//!
//! [`TextLayout`] runs stages 1 to 6 in one call.
//!
//! # Example
//!
//! ```no_run
//! use pdf_flow::layout::{LayoutConfig, TextBox, TextLayout, TextSchema};
//! use pdf_flow::{Font, Mm};
//!
//! let font = Font::load(std::fs::read("font.ttf").expect("can read font")).expect("can load font");
//! let config = LayoutConfig::default();
//! let schema = TextSchema::new(
//!     "greeting",
//!     TextBox::new(Mm(20.0), Mm(20.0), Mm(80.0), Mm(30.0)),
//! );
//!
//! let layout = TextLayout::new(&font, &config).layout(&schema, "Hello, world!");
//! for line in layout.lines() {
//!     println!("{} at ({}, {})", line.text, line.x, line.y);
//! }
//! ```

mod config;
mod emit;
mod engine;
mod font_size;
mod grapheme;
mod justify;
mod line_break;
mod margins;
mod paginate;
mod style;
mod vertical;

pub use config::*;
pub use emit::*;
pub use engine::*;
pub use font_size::*;
pub use grapheme::*;
pub use justify::*;
pub use line_break::*;
pub use margins::*;
pub use paginate::*;
pub use style::*;
pub use vertical::*;
