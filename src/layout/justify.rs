use super::line_break::Line;
use super::style::Alignment;
use crate::units::Pt;

/// Character spacing for a justified line: the base spacing plus whatever spreads the
/// line across the full box width. Terminal lines and lines of a single grapheme keep
/// the base spacing, as do lines already wider than the box.
pub fn justified_spacing(line: &Line, box_width: Pt, base_spacing: Pt) -> Pt {
    if line.terminal || line.grapheme_count <= 1 {
        return base_spacing;
    }
    let gaps = (line.grapheme_count - 1) as f32;
    let extra = (box_width - line.width) / gaps;
    base_spacing + extra.max(Pt(0.0))
}

/// Horizontal placement of lines inside a box, resolved once per layout
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinePlacer {
    pub alignment: Alignment,
    pub box_x: Pt,
    pub box_width: Pt,
    pub base_spacing: Pt,
}

/// Where a line starts and how far apart its graphemes are
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub x: Pt,
    pub character_spacing: Pt,
}

impl LinePlacer {
    pub fn place(&self, line: &Line) -> Placement {
        let slack = self.box_width - line.width;
        let (x, character_spacing) = match self.alignment {
            Alignment::Left => (self.box_x, self.base_spacing),
            Alignment::Center => (self.box_x + slack / 2.0, self.base_spacing),
            Alignment::Right => (self.box_x + slack, self.base_spacing),
            Alignment::Justify => (
                self.box_x,
                justified_spacing(line, self.box_width, self.base_spacing),
            ),
        };
        Placement {
            x,
            character_spacing,
        }
    }
}
