use crate::layout::{DrawCommand, RectangleCommand, RenderPlan, TextRun};
use crate::{PDFError, Pt};

/// Something that render plans can be drawn onto, page by page.
///
/// Coordinates passed to a canvas are in points with the origin at the bottom-left
/// corner of the page and y growing upward. Pages are addressed by 0-based index.
pub trait Canvas {
    /// How many pages currently exist
    fn page_count(&self) -> usize;

    /// Append a blank page, returning its index
    fn add_page(&mut self) -> usize;

    /// Height of the given page
    fn page_height(&self, page: usize) -> Result<Pt, PDFError>;

    /// Whether text runs set in the named font can be drawn
    fn has_font(&self, _font: &str) -> bool {
        true
    }

    fn draw_text_run(&mut self, page: usize, run: &TextRun) -> Result<(), PDFError>;

    fn draw_rectangle(&mut self, page: usize, rectangle: &RectangleCommand)
        -> Result<(), PDFError>;
}

/// Draw `plan` onto `canvas`, with the plan's page 0 landing on `base_page`. Pages the
/// plan overflows onto are appended to the canvas as needed.
///
/// A plan using a font the canvas doesn't have is rejected before anything is drawn or
/// any page is added.
pub fn render_plan<C: Canvas + ?Sized>(
    canvas: &mut C,
    base_page: usize,
    plan: &RenderPlan,
) -> Result<(), PDFError> {
    if let Some(run) = plan.text_runs().find(|run| !canvas.has_font(&run.font)) {
        return Err(PDFError::FontNotFound(run.font.to_string()));
    }

    for page_plan in plan.pages.iter() {
        let page = base_page + page_plan.index;
        while canvas.page_count() <= page {
            let added = canvas.add_page();
            log::debug!("added page {added} for overflowing text");
        }

        for command in page_plan.commands.iter() {
            match command {
                DrawCommand::Rectangle(rectangle) => canvas.draw_rectangle(page, rectangle)?,
                DrawCommand::Text(run) => canvas.draw_text_run(page, run)?,
            }
        }
    }
    Ok(())
}
