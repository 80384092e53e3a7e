use super::line_break::Line;
use crate::units::Pt;

/// A line assigned to a page, with its vertical position on that page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: Line,
    /// Index of the line within the whole laid-out text
    pub line_index: usize,
    /// Baseline distance below the top of the page's text region
    pub offset: Pt,
}

/// The lines that landed on one page, and the vertical bounds that applied to them
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    /// 0-based, relative to the page the text starts on
    pub index: usize,
    /// Top of the text region, measured down from the top of the page
    pub top: Pt,
    /// Baselines may not start at or below this y, measured down from the top of the page.
    /// `None` when the page wasn't paginated.
    pub bottom_bound: Option<Pt>,
    pub lines: Vec<PlacedLine>,
}

/// Where text goes on the page it starts on, and on the pages it overflows onto
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Paginator {
    /// Top of the box on the first page
    pub first_top: Pt,
    /// Bottom bound on the first page; `None` disables pagination
    pub first_bottom: Option<Pt>,
    /// First baseline below `first_top`, as the vertical alignment placed it
    pub first_offset: Pt,
    /// Top margin of continuation pages
    pub continuation_top: Pt,
    /// Bottom bound of continuation pages
    pub continuation_bottom: Pt,
    /// First baseline below `continuation_top` on continuation pages
    pub continuation_offset: Pt,
    /// Distance between consecutive baselines
    pub line_advance: Pt,
}

struct Cursor {
    index: usize,
    top: Pt,
    bottom: Option<Pt>,
    first_offset: Pt,
    row: usize,
}

impl Paginator {
    /// Distribute `lines` over pages. Pages only exist once a line lands on them, and a
    /// page with no lines yet accepts the next line even if it overflows, so every line is
    /// placed and page indices run contiguously from 0.
    pub fn paginate(&self, lines: Vec<Line>) -> Vec<LayoutPage> {
        let mut pages: Vec<LayoutPage> = Vec::new();
        let mut cursor = Cursor {
            index: 0,
            top: self.first_top,
            bottom: self.first_bottom,
            first_offset: self.first_offset,
            row: 0,
        };

        for (line_index, line) in lines.into_iter().enumerate() {
            let started = pages.last().is_some_and(|page| page.index == cursor.index);
            let offset = cursor.first_offset + self.line_advance * cursor.row as f32;
            let overflows = cursor
                .bottom
                .is_some_and(|bottom| cursor.top + offset >= bottom);

            if started && overflows {
                log::debug!(
                    "line {line_index} overflows page {}, continuing on the next page",
                    cursor.index
                );
                cursor = Cursor {
                    index: cursor.index + 1,
                    top: self.continuation_top,
                    bottom: Some(self.continuation_bottom),
                    first_offset: self.continuation_offset,
                    row: 0,
                };
            }

            if !pages.last().is_some_and(|page| page.index == cursor.index) {
                pages.push(LayoutPage {
                    index: cursor.index,
                    top: cursor.top,
                    bottom_bound: cursor.bottom,
                    lines: Vec::new(),
                });
            }

            let offset = cursor.first_offset + self.line_advance * cursor.row as f32;
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    line,
                    line_index,
                    offset,
                });
            }
            cursor.row += 1;
        }

        pages
    }
}
