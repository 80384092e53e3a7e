use crate::{
    metrics::FontMetrics,
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::Arc;

/// Glyph-space units PDF width arrays are expressed in
const PDF_GLYPH_UNITS: f32 = 1000.0;

/// A parsed TrueType / OpenType font. The font file is embedded whole in generated PDFs,
/// but the width table and the ToUnicode map only cover characters actually drawn.
///
/// Cloning is cheap: clones share the parsed face, so the same font can be registered
/// with a [Document](crate::Document) and handed out as [FontMetrics] by a
/// [FontSet](crate::FontSet).
#[derive(Clone)]
pub struct Font {
    face: Arc<OwnedFace>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("units_per_em", &self.face().units_per_em())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            face: Arc::new(face),
        })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the font carries one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the font carries one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    /// Scale a value in font design units to points at the given font size
    fn scale(&self, units: f32, size: Pt) -> Pt {
        size * (units / self.face().units_per_em() as f32)
    }

    /// The glyph used to draw `ch`. Characters the font doesn't cover map to the
    /// replacement character, then `?`, then `.notdef`.
    pub fn glyph_for(&self, ch: char) -> GlyphId {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .unwrap_or(GlyphId(0))
    }

    /// Calculate the default line height of the font for the given size: ascent,
    /// descent and the font's own line gap.
    pub fn line_height(&self, size: Pt) -> Pt {
        self.ascent(size) - self.descent(size) + self.line_gap(size)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &BTreeSet<char>,
        writer: &mut Pdf,
    ) {
        let glyphs: BTreeMap<u16, char> = used.iter().fold(BTreeMap::new(), |mut map, &ch| {
            map.entry(self.glyph_for(ch).0).or_insert(ch);
            map
        });

        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn pdf_units(&self, units: f32) -> f32 {
        units * PDF_GLYPH_UNITS / self.face().units_per_em() as f32
    }

    fn glyph_width(&self, gid: u16) -> f32 {
        self.pdf_units(self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32)
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        // the descriptor must be fully written before the CID font borrows the writer
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(self.glyph_width(0));

        // group the used glyphs into runs of consecutive glyph ids
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for &gid in glyphs.keys() {
            match runs.last_mut() {
                Some((start, widths)) if *start as usize + widths.len() == gid as usize => {
                    widths.push(self.glyph_width(gid));
                }
                _ => runs.push((gid, vec![self.glyph_width(gid)])),
            }
        }

        let mut widths = cid_font.widths();
        for (start, run) in runs {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);

        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: self.pdf_units(bbox.x_min as f32),
            y1: self.pdf_units(bbox.y_min as f32),
            x2: self.pdf_units(bbox.x_max as f32),
            y2: self.pdf_units(bbox.y_max as f32),
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(self.pdf_units(face.ascender() as f32));
        descriptor.descent(self.pdf_units(face.descender() as f32));
        descriptor.leading(self.pdf_units(face.line_gap() as f32));
        descriptor.cap_height(
            self.pdf_units(face.capital_height().unwrap_or(face.ascender()) as f32),
        );
        // ttf files don't record stem widths; this is the customary estimate
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
        for block in entries.chunks(100) {
            let _ = writeln!(cmap, "{} beginbfchar", block.len());
            for (gid, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                let _ = writeln!(cmap, "<{gid:04x}> <{hex}>");
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}

impl FontMetrics for Font {
    fn advance_width(&self, grapheme: &str, size: Pt) -> Pt {
        grapheme
            .chars()
            .map(|ch| {
                let advance = self
                    .face()
                    .glyph_hor_advance(self.glyph_for(ch))
                    .unwrap_or_default();
                self.scale(advance as f32, size)
            })
            .sum()
    }

    fn ascent(&self, size: Pt) -> Pt {
        self.scale(self.face().ascender() as f32, size)
    }

    fn descent(&self, size: Pt) -> Pt {
        self.scale(self.face().descender() as f32, size)
    }

    fn line_gap(&self, size: Pt) -> Pt {
        self.scale(self.face().line_gap() as f32, size)
    }
}
