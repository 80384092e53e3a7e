use super::Margins;
use crate::colour::{colours, Colour};
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// Default size for text whose schema doesn't specify one
pub const DEFAULT_FONT_SIZE: Pt = Pt(13.0);
/// Default line height multiplier
pub const DEFAULT_LINE_HEIGHT: f32 = 1.0;
/// Default top and bottom margin of continuation pages
pub const DEFAULT_CONTINUATION_MARGIN: Mm = Mm(20.0);

/// Document-wide page geometry and layout tunables. Lengths that describe the page are in
/// millimetres; font-size related values are in points. The layout engine converts the
/// millimetre values to points once, when it starts laying out a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Size of every page, including continuation pages
    pub page_size: PageSize,
    /// Margins used on pages created when text overflows the page it started on
    pub continuation_margins: Margins,
    /// Placeholder rectangles drawn into the margins of continuation pages
    pub continuation_markers: Option<MarkerStyle>,
    /// Decrement between candidate sizes when fitting text to its box
    pub fit_step: Pt,
    /// Smallest font size auto-fitting will ever pick
    pub min_font_size: Pt,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_size: pagesize::A4,
            continuation_margins: Margins::symmetric(DEFAULT_CONTINUATION_MARGIN, Mm(0.0)),
            continuation_markers: None,
            fit_step: Pt(0.25),
            min_font_size: Pt(1.0),
        }
    }
}

impl LayoutConfig {
    /// Replace the nominal page height with the one the surrounding document uses
    pub fn with_page_height<H: Into<Mm>>(mut self, height: H) -> LayoutConfig {
        self.page_size.1 = height.into();
        self
    }

    /// Draw header and footer placeholders on continuation pages
    pub fn with_continuation_markers(mut self, markers: MarkerStyle) -> LayoutConfig {
        self.continuation_markers = Some(markers);
        self
    }

    pub fn page_height(&self) -> Pt {
        self.page_size.1.into()
    }

    pub fn page_width(&self) -> Pt {
        self.page_size.0.into()
    }

    /// Absolute y (from the page top) at which text starts on a continuation page
    pub(crate) fn continuation_top(&self) -> Pt {
        self.continuation_margins.top.into()
    }

    /// Absolute y (from the page top) at or below which no baseline may start on a
    /// continuation page
    pub(crate) fn continuation_bottom(&self) -> Pt {
        self.page_height() - self.continuation_margins.bottom.into()
    }
}

/// How the header / footer placeholders of continuation pages are drawn
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerStyle {
    pub fill: Colour,
    /// Height of each placeholder band, measured inward from the page edge
    pub height: Mm,
    pub opacity: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            fill: colours::LIGHT_GREY,
            height: Mm(10.0),
            opacity: 1.0,
        }
    }
}
