//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer. Text is drawn only with
//! embedded composite fonts registered through [`PdfWriter::add_font`].

use super::content_stream::ContentStreamBuilder;
use super::font_manager::EmbeddedFont;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::fonts::OutlineKind;
use crate::object::{Object, ObjectRef};
use std::io::Write;

/// A5 portrait width in points.
pub const A5_WIDTH: f32 = 420.94;
/// A5 portrait height in points.
pub const A5_HEIGHT: f32 = 595.28;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            creator: Some(concat!("rent_receipt ", env!("CARGO_PKG_VERSION")).to_string()),
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams and embedded font data will be
    /// compressed using FlateDecode (zlib/deflate) to reduce file size.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
///
/// Returns compressed bytes suitable for FlateDecode filter.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Handle to a font registered with a [`PdfWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(usize);

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.writer.pages[self.page_index].width
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.writer.pages[self.page_index].height
    }

    /// Measured width of `text` in points.
    pub fn text_width(&self, text: &str, font: FontId, font_size: f32) -> f32 {
        self.writer.fonts[font.0].text_width(text, font_size)
    }

    /// Draw text with its baseline origin at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, font: FontId, font_size: f32) -> &mut Self {
        let embedded = &mut self.writer.fonts[font.0];
        let encoded = embedded.encode_string(text);
        let resource = resource_name(font);

        let page = &mut self.writer.pages[self.page_index];
        page.content_builder
            .set_font(&resource, font_size)
            .hex_text(&encoded, x, y);
        page.fonts_used.insert(font.0);
        self
    }

    /// Finish building this page and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder.end_text();
        self.writer
    }
}

/// Page dimension at hundredth-of-a-point precision.
fn points(value: f32) -> f64 {
    (value as f64 * 100.0).round() / 100.0
}

fn resource_name(font: FontId) -> String {
    format!("F{}", font.0 + 1)
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
    fonts_used: std::collections::BTreeSet<usize>,
}

/// Sequentially numbered indirect objects.
#[derive(Default)]
struct ObjectTable {
    objects: Vec<Object>,
}

impl ObjectTable {
    /// Reserve the next object number.
    fn reserve(&mut self) -> ObjectRef {
        self.objects.push(Object::Null);
        ObjectRef::new(self.objects.len() as u32, 0)
    }

    fn set(&mut self, r: ObjectRef, obj: Object) {
        self.objects[r.id as usize - 1] = obj;
    }

    fn add(&mut self, obj: Object) -> ObjectRef {
        let r = self.reserve();
        self.set(r, obj);
        r
    }
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, embedded fonts and content.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    fonts: Vec<EmbeddedFont>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts: Vec::new(),
        }
    }

    /// Register a font for drawing.
    pub fn add_font(&mut self, font: EmbeddedFont) -> FontId {
        self.fonts.push(font);
        FontId(self.fonts.len() - 1)
    }

    /// A registered font.
    pub fn font(&self, id: FontId) -> &EmbeddedFont {
        &self.fonts[id.0]
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
            fonts_used: Default::default(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Add an A5 portrait page.
    pub fn add_a5_page(&mut self) -> PageBuilder<'_> {
        self.add_page(A5_WIDTH, A5_HEIGHT)
    }

    /// Build a stream object, compressing it when configured.
    fn stream(&self, mut entries: Vec<(&str, Object)>, data: Vec<u8>) -> Result<Object> {
        let data = if self.config.compress {
            entries.push(("Filter", ObjectSerializer::name("FlateDecode")));
            compress_data(&data)?
        } else {
            data
        };
        Ok(ObjectSerializer::stream(entries, data))
    }

    /// Write the five objects of one composite font; returns the Type0 font.
    fn write_font(&self, table: &mut ObjectTable, font: &EmbeddedFont) -> Result<ObjectRef> {
        let parsed = font.font();
        let metrics = parsed.metrics();
        let base_font = font.subset_name();
        let program = parsed.raw_data();

        let file_ref = match parsed.outline() {
            OutlineKind::TrueType => table.add(self.stream(
                vec![("Length1", ObjectSerializer::integer(program.len() as i64))],
                program.to_vec(),
            )?),
            OutlineKind::Cff => table.add(self.stream(
                vec![("Subtype", ObjectSerializer::name("OpenType"))],
                program.to_vec(),
            )?),
        };
        let file_key = match parsed.outline() {
            OutlineKind::TrueType => "FontFile2",
            OutlineKind::Cff => "FontFile3",
        };

        let (llx, lly, urx, ury) = metrics.pdf_bbox();
        let descriptor = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("FontDescriptor")),
            ("FontName", ObjectSerializer::name(&base_font)),
            ("Flags", ObjectSerializer::integer(metrics.flags as i64)),
            (
                "FontBBox",
                ObjectSerializer::array(vec![
                    ObjectSerializer::integer(llx as i64),
                    ObjectSerializer::integer(lly as i64),
                    ObjectSerializer::integer(urx as i64),
                    ObjectSerializer::integer(ury as i64),
                ]),
            ),
            ("ItalicAngle", ObjectSerializer::real(metrics.italic_angle as f64)),
            ("Ascent", ObjectSerializer::integer(metrics.to_pdf_units(metrics.ascender) as i64)),
            ("Descent", ObjectSerializer::integer(metrics.to_pdf_units(metrics.descender) as i64)),
            ("CapHeight", ObjectSerializer::integer(metrics.to_pdf_units(metrics.cap_height) as i64)),
            ("StemV", ObjectSerializer::integer(metrics.stem_v as i64)),
            (file_key, ObjectSerializer::reference(file_ref)),
        ]);
        let descriptor_ref = table.add(descriptor);

        let widths: Vec<Object> = font
            .width_runs()
            .into_iter()
            .flat_map(|(start, widths)| {
                [
                    ObjectSerializer::integer(start as i64),
                    ObjectSerializer::array(
                        widths
                            .into_iter()
                            .map(|w| ObjectSerializer::integer(w as i64))
                            .collect(),
                    ),
                ]
            })
            .collect();

        let mut cid_entries = vec![
            ("Type", ObjectSerializer::name("Font")),
            (
                "Subtype",
                ObjectSerializer::name(match parsed.outline() {
                    OutlineKind::TrueType => "CIDFontType2",
                    OutlineKind::Cff => "CIDFontType0",
                }),
            ),
            ("BaseFont", ObjectSerializer::name(&base_font)),
            (
                "CIDSystemInfo",
                ObjectSerializer::dict(vec![
                    ("Registry", ObjectSerializer::string("Adobe")),
                    ("Ordering", ObjectSerializer::string("Identity")),
                    ("Supplement", ObjectSerializer::integer(0)),
                ]),
            ),
            ("FontDescriptor", ObjectSerializer::reference(descriptor_ref)),
            ("W", ObjectSerializer::array(widths)),
        ];
        if parsed.outline() == OutlineKind::TrueType {
            cid_entries.push(("CIDToGIDMap", ObjectSerializer::name("Identity")));
        }
        let cid_ref = table.add(ObjectSerializer::dict(cid_entries));

        let tounicode_ref = table.add(self.stream(Vec::new(), font.tounicode_cmap().into_bytes())?);

        let type0 = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("Type0")),
            ("BaseFont", ObjectSerializer::name(&base_font)),
            ("Encoding", ObjectSerializer::name("Identity-H")),
            (
                "DescendantFonts",
                ObjectSerializer::array(vec![ObjectSerializer::reference(cid_ref)]),
            ),
            ("ToUnicode", ObjectSerializer::reference(tounicode_ref)),
        ]);

        log::debug!(
            "Embedding font {} ({} bytes, {} width runs)",
            base_font,
            program.len(),
            font.width_runs().len()
        );
        Ok(table.add(type0))
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut table = ObjectTable::default();

        let catalog_ref = table.reserve();
        let pages_ref = table.reserve();

        // Only fonts that some page draws with are embedded.
        let mut font_refs: Vec<Option<ObjectRef>> = vec![None; self.fonts.len()];
        for (index, font) in self.fonts.iter().enumerate() {
            let used = self.pages.iter().any(|p| p.fonts_used.contains(&index));
            if used {
                font_refs[index] = Some(self.write_font(&mut table, font)?);
            }
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = self.stream(Vec::new(), page.content_builder.build()?)?;
            let content_ref = table.add(content);

            let font_resources: Vec<(String, Object)> = page
                .fonts_used
                .iter()
                .filter_map(|&index| {
                    font_refs[index].map(|r| (resource_name(FontId(index)), Object::Reference(r)))
                })
                .collect();
            let font_dict = Object::Dictionary(font_resources.into_iter().collect());

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_ref)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, points(page.width), points(page.height)),
                ),
                ("Contents", ObjectSerializer::reference(content_ref)),
                ("Resources", ObjectSerializer::dict(vec![("Font", font_dict)])),
            ]);
            kids.push(ObjectSerializer::reference(table.add(page_obj)));
        }

        table.set(
            pages_ref,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Count", ObjectSerializer::integer(kids.len() as i64)),
                ("Kids", ObjectSerializer::array(kids)),
            ]),
        );
        table.set(
            catalog_ref,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_ref)),
            ]),
        );

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::text_string(title)));
        }
        if let Some(author) = &self.config.author {
            info_entries.push(("Author", ObjectSerializer::text_string(author)));
        }
        if let Some(subject) = &self.config.subject {
            info_entries.push(("Subject", ObjectSerializer::text_string(subject)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::text_string(creator)));
        }
        let info_ref = table.add(ObjectSerializer::dict(info_entries));

        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();

        // PDF Header
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(table.objects.len());
        for (index, obj) in table.objects.iter().enumerate() {
            offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(index as u32 + 1, 0, obj)?);
        }

        let size = table.objects.len() as i64 + 1;
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);

        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer)?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
