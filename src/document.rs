use crate::{
    canvas::Canvas,
    content::GraphicsStates,
    font::Font,
    layout::{RectangleCommand, TextRun},
    page::{PageContents, RectangleLayout, SpanFont, SpanLayout},
    pagesize::{self, PageSize},
    refs::{ObjectReferences, RefType},
    Page, PDFError, Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;

/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    font_names: HashMap<String, Id<Font>>,
    /// Size of pages added through [Canvas::add_page]
    pub page_size: PageSize,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(pagesize::A4)
    }
}

impl Document {
    pub fn new(page_size: PageSize) -> Document {
        Document {
            pages: Arena::new(),
            page_order: Vec::new(),
            fonts: Arena::new(),
            font_names: HashMap::new(),
            page_size,
        }
    }

    /// Add a page to the document, returning its ID. The page will be added to the end
    /// of the document.
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Get the page at the given 0-based position in the document
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.page_order
            .get(index)
            .and_then(|&id| self.pages.get(id))
    }

    fn page_mut(&mut self, index: usize) -> Result<&mut Page, PDFError> {
        self.page_order
            .get(index)
            .and_then(|&id| self.pages.get_mut(id))
            .ok_or(PDFError::PageMissing(index))
    }

    /// Add a font to the document under `name`, the name text runs refer to it by.
    /// Registering a second font under the same name replaces the mapping; the earlier
    /// font stays embedded for anything already drawn with it.
    pub fn add_font<S: ToString>(&mut self, name: S, font: Font) -> Id<Font> {
        let id = self.fonts.alloc(font);
        self.font_names.insert(name.to_string(), id);
        id
    }

    /// Look up a font by the name it was registered with
    pub fn font_id(&self, name: &str) -> Option<Id<Font>> {
        self.font_names.get(name).copied()
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    ///
    /// Each font's width table and ToUnicode map only cover the characters drawn with it.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            pages,
            page_order,
            fonts,
            ..
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        let mut used: HashMap<Id<Font>, BTreeSet<char>> = HashMap::new();
        let mut states = GraphicsStates::default();
        for (_, page) in pages.iter() {
            for content in page.contents.iter() {
                if let PageContents::Text(span) = content {
                    used.entry(span.font.id)
                        .or_default()
                        .extend(span.text.chars());
                }
            }
            for opacity in page.opacities() {
                states.register(opacity);
            }
        }

        let empty = BTreeSet::new();
        for (id, font) in fonts.iter() {
            font.write(
                &mut refs,
                id.index(),
                used.get(&id).unwrap_or(&empty),
                &mut writer,
            );
        }

        for (alpha, index) in states.iter() {
            let id = refs.gen(RefType::ExtGState(index));
            writer
                .ext_graphics(id)
                .non_stroking_alpha(alpha)
                .stroking_alpha(alpha);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing(page_index))?;
            page.write(&mut refs, page_index, &fonts, &states, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

impl Canvas for Document {
    fn page_count(&self) -> usize {
        self.page_order.len()
    }

    fn add_page(&mut self) -> usize {
        let page = Page::new(self.page_size);
        Document::add_page(self, page);
        self.page_order.len() - 1
    }

    fn page_height(&self, page: usize) -> Result<Pt, PDFError> {
        self.page(page)
            .map(Page::height)
            .ok_or(PDFError::PageMissing(page))
    }

    fn has_font(&self, font: &str) -> bool {
        self.font_id(font).is_some()
    }

    fn draw_text_run(&mut self, page: usize, run: &TextRun) -> Result<(), PDFError> {
        let id = self
            .font_id(&run.font)
            .ok_or_else(|| PDFError::FontNotFound(run.font.to_string()))?;
        self.page_mut(page)?.add_span(SpanLayout {
            text: run.text.clone(),
            font: SpanFont { id, size: run.size },
            colour: run.colour,
            coords: (run.x, run.y),
            character_spacing: run.character_spacing,
            opacity: run.opacity,
        });
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        page: usize,
        rectangle: &RectangleCommand,
    ) -> Result<(), PDFError> {
        self.page_mut(page)?.add_rectangle(RectangleLayout {
            rect: rectangle.rect,
            fill: rectangle.fill,
            stroke: rectangle.border.map(|border| (border.width, border.colour)),
            opacity: rectangle.opacity,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::rect::Rect;

    fn marker() -> RectangleCommand {
        RectangleCommand {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(100.0), Pt(10.0)),
            fill: Some(colours::LIGHT_GREY),
            border: None,
            opacity: 0.5,
        }
    }

    #[test]
    fn canvas_pages_use_the_document_page_size() {
        let mut doc = Document::new(pagesize::LETTER);
        assert_eq!(Canvas::add_page(&mut doc), 0);
        assert_eq!(Canvas::add_page(&mut doc), 1);
        assert_eq!(doc.page_count(), 2);
        assert!((doc.page_height(1).expect("page exists").0 - 792.0).abs() < 1e-3);
        assert!(matches!(doc.page_height(2), Err(PDFError::PageMissing(2))));
    }

    #[test]
    fn drawing_on_missing_pages_fails() {
        let mut doc = Document::default();
        assert!(matches!(
            doc.draw_rectangle(0, &marker()),
            Err(PDFError::PageMissing(0))
        ));
    }

    #[test]
    fn text_in_unregistered_fonts_is_rejected() {
        let mut doc = Document::default();
        Canvas::add_page(&mut doc);
        let run = TextRun {
            font: "Missing".into(),
            text: "hi".to_string(),
            x: Pt(0.0),
            y: Pt(0.0),
            size: Pt(10.0),
            colour: colours::BLACK,
            line_height: Pt(10.0),
            character_spacing: Pt(0.0),
            opacity: 1.0,
        };
        assert!(doc
            .draw_text_run(0, &run)
            .is_err_and(|e| e.is_font_not_found()));
    }

    #[test]
    fn writes_a_pdf() {
        let mut doc = Document::default();
        Canvas::add_page(&mut doc);
        doc.draw_rectangle(0, &marker()).expect("page exists");

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write");
        assert!(out.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/ExtGState"));
        assert!(text.contains("/CA 0.5"));
    }
}
