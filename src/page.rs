use crate::colour::Colour;
use crate::content::{render_contents, GraphicsStates};
use crate::font::Font;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::pagesize::PageSize;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// Which font (and at what size) to draw a span with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text drawn from a single baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline origin, in page coordinates
    pub coords: (Pt, Pt),
    /// Extra space between grapheme clusters
    pub character_spacing: Pt,
    pub opacity: f32,
}

/// A filled and / or stroked rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct RectangleLayout {
    pub rect: Rect,
    pub fill: Option<Colour>,
    pub stroke: Option<(Pt, Colour)>,
    pub opacity: f32,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Rectangle(RectangleLayout),
}

/// A page in the document, holding everything drawn on it in painting order
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::from_origin(Pt(0.0), Pt(0.0), size.0.into(), size.1.into()),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_rectangle(&mut self, rectangle: RectangleLayout) {
        self.contents.push(PageContents::Rectangle(rectangle));
    }

    /// Every opacity used on the page, in painting order
    pub(crate) fn opacities(&self) -> impl Iterator<Item = f32> + '_ {
        self.contents.iter().map(|content| match content {
            PageContents::Text(span) => span.opacity,
            PageContents::Rectangle(rectangle) => rectangle.opacity,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        states: &GraphicsStates,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::PageMissing(page_index))?;
        let page_tree = refs.get(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        if let Some(page_tree) = page_tree {
            page.parent(page_tree);
        }

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font.index())) {
                resource_fonts.pair(Name(format!("F{}", font.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();

        let mut resource_states = resources.ext_g_states();
        for (_, index) in states.iter() {
            if let Some(state_ref) = refs.get(RefType::ExtGState(index)) {
                resource_states.pair(Name(format!("GS{index}").as_bytes()), state_ref);
            }
        }
        resource_states.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts, states)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, &compressed)
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}
