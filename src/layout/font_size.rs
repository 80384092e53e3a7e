use super::line_break::LineBreaker;
use super::style::FitAxis;
use crate::metrics::FontMetrics;
use crate::units::Pt;

const FALLBACK_STEP: Pt = Pt(0.25);

/// Upper limit on the sizes tried for one resolve; wider ranges are stepped more coarsely
const MAX_CANDIDATES: usize = 2048;

/// Searches for the largest font size at which text fits its box.
///
/// Candidates are scanned linearly from `max` down to `min`. Wrapping is only usually
/// monotonic in the font size (a smaller size can occasionally produce more lines, since
/// words land differently), so a binary search could skip the best size.
pub struct FontSizeResolver<'m> {
    pub metrics: &'m dyn FontMetrics,
    pub character_spacing: Pt,
    /// Baseline-to-baseline distance as a multiple of the font size
    pub line_pitch: f32,
    pub box_width: Pt,
    pub box_height: Pt,
}

impl FontSizeResolver<'_> {
    /// The largest candidate size in `[min, max]` (stepping down by `step`) at which
    /// `text` fits along `fit`. Never fails: if nothing fits, `min` is returned and the
    /// text will overflow.
    ///
    /// At most a fixed number of candidates are tried; if the range holds more than that
    /// at `step`, the step is widened to cover the range evenly.
    pub fn resolve(&self, text: &str, min: Pt, max: Pt, step: Pt, fit: FitAxis) -> Pt {
        let min = if min.0.is_finite() { min.max(Pt(0.0)) } else { Pt(0.0) };
        let max = if max.0.is_finite() { max.max(Pt(0.0)) } else { min };
        let min = min.min(max);
        let mut step = if step.0.is_finite() && step.0 > 0.0 {
            step
        } else {
            FALLBACK_STEP
        };
        if (max - min) / step > MAX_CANDIDATES as f32 {
            step = (max - min) / MAX_CANDIDATES as f32;
            log::debug!("auto-fit range {min}pt..={max}pt is wide, stepping by {step}pt");
        }

        // indexing the candidates avoids accumulating rounding error from repeated
        // subtraction
        let candidates = (((max - min) / step).floor() as usize).min(MAX_CANDIDATES);
        for i in 0..=candidates {
            let size = max - step * i as f32;
            if size > Pt(0.0) && self.fits(text, size, fit) {
                log::debug!("auto-fit settled on {size}pt after {} candidates", i + 1);
                return size;
            }
        }

        log::debug!("nothing in {min}pt..={max}pt fits, using {min}pt");
        min
    }

    /// Whether `text` set at `size` fits the box along `fit`
    pub fn fits(&self, text: &str, size: Pt, fit: FitAxis) -> bool {
        let breaker = LineBreaker::new(self.metrics, size, self.character_spacing);
        match fit {
            FitAxis::Vertical => {
                let lines = breaker.break_lines(text, Some(self.box_width));
                size * (lines.len() as f32 * self.line_pitch) <= self.box_height
            }
            FitAxis::Horizontal => breaker
                .break_lines(text, None)
                .iter()
                .all(|line| line.width <= self.box_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MonoMetrics;

    fn resolver(metrics: &MonoMetrics, width: f32, height: f32) -> FontSizeResolver<'_> {
        FontSizeResolver {
            metrics,
            character_spacing: Pt(0.0),
            line_pitch: 1.0,
            box_width: Pt(width),
            box_height: Pt(height),
        }
    }

    #[test]
    fn keeps_max_when_it_fits() {
        let metrics = MonoMetrics::default();
        let size = resolver(&metrics, 200.0, 50.0).resolve(
            "fits",
            Pt(4.0),
            Pt(20.0),
            Pt(0.25),
            FitAxis::Vertical,
        );
        assert_eq!(size, Pt(20.0));
    }

    #[test]
    fn shrinks_until_lines_fit_the_height() {
        let metrics = MonoMetrics::default();
        let r = resolver(&metrics, 60.0, 30.0);
        let text = "aaaa bbbb cccc dddd";
        let size = r.resolve(text, Pt(1.0), Pt(20.0), Pt(0.5), FitAxis::Vertical);

        assert!(size < Pt(20.0));
        assert!(r.fits(text, size, FitAxis::Vertical));
        // the next candidate up didn't fit
        assert!(!r.fits(text, size + Pt(0.5), FitAxis::Vertical));
    }

    #[test]
    fn falls_back_to_min_when_nothing_fits() {
        let metrics = MonoMetrics::default();
        let size = resolver(&metrics, 10.0, 1.0).resolve(
            "far too much text for this box",
            Pt(6.0),
            Pt(12.0),
            Pt(1.0),
            FitAxis::Vertical,
        );
        assert_eq!(size, Pt(6.0));
    }

    #[test]
    fn horizontal_fit_is_driven_by_the_widest_line() {
        let metrics = MonoMetrics::default();
        // "abcdefghij" is 10 graphemes, 5pt each at 10pt: it fits 50pt at exactly 10pt
        let size = resolver(&metrics, 50.0, 1000.0).resolve(
            "abc\nabcdefghij",
            Pt(1.0),
            Pt(24.0),
            Pt(1.0),
            FitAxis::Horizontal,
        );
        assert_eq!(size, Pt(10.0));
    }

    #[test]
    fn degenerate_steps_still_terminate() {
        let metrics = MonoMetrics::default();
        let size = resolver(&metrics, 10.0, 1.0).resolve(
            "text",
            Pt(2.0),
            Pt(3.0),
            Pt(0.0),
            FitAxis::Vertical,
        );
        assert_eq!(size, Pt(2.0));
    }

    #[test]
    fn huge_ranges_are_searched_in_bounded_steps() {
        let metrics = MonoMetrics::default();
        let r = resolver(&metrics, 50.0, 1000.0);
        let size = r.resolve("abcdefghij", Pt(1.0), Pt(1e30), Pt(0.25), FitAxis::Horizontal);
        assert_eq!(size, Pt(1.0));

        let size = r.resolve("abc", Pt(1.0), Pt(f32::INFINITY), Pt(0.25), FitAxis::Horizontal);
        assert_eq!(size, Pt(1.0));
    }
}
