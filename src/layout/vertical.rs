use super::style::VerticalAlignment;
use crate::units::Pt;

/// The vertical measurements of a block of lines at its resolved font size
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BlockMetrics {
    pub font_size: Pt,
    /// Font ascent at `font_size`
    pub ascent: Pt,
    /// Font descent at `font_size` (usually negative)
    pub descent: Pt,
    /// Line height multiplier as configured; `0` means single spacing
    pub line_height: f32,
}

impl BlockMetrics {
    /// Distance between consecutive baselines
    pub fn line_advance(&self) -> Pt {
        let pitch = if self.line_height > 0.0 {
            self.line_height
        } else {
            1.0
        };
        self.font_size * pitch
    }

    /// Lines taller than the font are centred in their extra leading, which pushes the
    /// first baseline down by half of that leading.
    pub fn half_line_adjustment(&self) -> Pt {
        if self.line_height == 0.0 {
            Pt(0.0)
        } else {
            self.font_size * ((self.line_height - 1.0) / 2.0)
        }
    }

    /// Offset of the first baseline below the top of the box.
    ///
    /// The frame here has y growing downward from the box top; flipping into the
    /// bottom-up canvas frame is left to the emitter.
    pub fn first_baseline(
        &self,
        alignment: VerticalAlignment,
        line_count: usize,
        box_height: Pt,
    ) -> Pt {
        let following = self.line_advance() * line_count.saturating_sub(1) as f32;
        match alignment {
            VerticalAlignment::Top => self.ascent + self.half_line_adjustment(),
            VerticalAlignment::Bottom => {
                box_height - following + self.descent - self.half_line_adjustment()
            }
            VerticalAlignment::Middle => {
                (box_height - following - self.ascent + self.descent) / 2.0 + self.ascent
            }
        }
    }
}
