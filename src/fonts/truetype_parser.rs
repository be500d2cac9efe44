//! sfnt font parsing for PDF embedding.
//!
//! Wraps `ttf-parser` to pull out everything an embedded composite font
//! needs: the Unicode to glyph mapping, advance widths in 1/1000 em and the
//! FontDescriptor metrics. The parsed face is dropped afterwards, so the
//! result owns its data and carries no lifetime.
//!
//! Both TrueType outlines (`glyf`) and CFF outlines (`OTTO`) are accepted.
//! The outline kind decides how the font program is embedded.

use std::collections::HashMap;

use bytes::Bytes;
use ttf_parser::{Face, GlyphId};

use super::signature::OPENTYPE_MAGIC;
use crate::error::{Error, Result};

/// Width used for glyphs with no advance in `hmtx`.
pub const DEFAULT_GLYPH_WIDTH: u16 = 500;

/// How glyph outlines are stored in the font program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    /// Quadratic `glyf` outlines, embedded as FontFile2
    TrueType,
    /// CFF outlines, embedded as FontFile3 /OpenType
    Cff,
}

/// A parsed single-face sfnt.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Bytes,
    outline: OutlineKind,
    /// Unicode codepoint -> glyph ID
    unicode_to_glyph: HashMap<u32, u16>,
    /// Glyph ID -> advance in 1/1000 em
    glyph_widths: Vec<u16>,
    metrics: FontMetrics,
}

impl TrueTypeFont {
    /// Parse a standalone sfnt (not a collection).
    pub fn parse(data: impl Into<Bytes>) -> Result<Self> {
        let data: Bytes = data.into();
        if data.is_empty() {
            return Err(Error::Font("font data is empty".to_string()));
        }

        let face = Face::parse(&data, 0).map_err(|e| Error::Font(format!("failed to parse font: {}", e)))?;
        if face.units_per_em() == 0 {
            return Err(Error::Font("font has zero units per em".to_string()));
        }

        let outline = if data.starts_with(&OPENTYPE_MAGIC) {
            OutlineKind::Cff
        } else {
            OutlineKind::TrueType
        };
        let unicode_to_glyph = build_unicode_map(&face);
        let glyph_widths = build_width_table(&face);
        let metrics = FontMetrics::from_face(&face);

        log::debug!(
            "Parsed font {} ({} glyphs, {} mapped codepoints)",
            metrics.name,
            glyph_widths.len(),
            unicode_to_glyph.len()
        );

        Ok(Self {
            data,
            outline,
            unicode_to_glyph,
            glyph_widths,
            metrics,
        })
    }

    /// Glyph ID for a Unicode codepoint.
    pub fn glyph_id(&self, codepoint: u32) -> Option<u16> {
        self.unicode_to_glyph.get(&codepoint).copied()
    }

    /// Glyph advance in 1/1000 em units.
    pub fn glyph_width(&self, glyph_id: u16) -> u16 {
        self.glyph_widths
            .get(glyph_id as usize)
            .copied()
            .unwrap_or(DEFAULT_GLYPH_WIDTH)
    }

    /// Advance of a character in 1/1000 em units.
    ///
    /// Characters the font cannot map are measured as the missing glyph.
    pub fn char_width(&self, codepoint: u32) -> u16 {
        self.glyph_width(self.glyph_id(codepoint).unwrap_or(0))
    }

    /// Number of glyphs in the face.
    pub fn num_glyphs(&self) -> usize {
        self.glyph_widths.len()
    }

    /// Outline storage of this face.
    pub fn outline(&self) -> OutlineKind {
        self.outline
    }

    /// Descriptor metrics.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// The font program bytes to embed.
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }
}

fn build_unicode_map(face: &Face<'_>) -> HashMap<u32, u16> {
    let mut map = HashMap::new();
    // BMP only
    for codepoint in 0..=0xFFFF_u32 {
        if let Some(ch) = char::from_u32(codepoint) {
            if let Some(glyph) = face.glyph_index(ch) {
                map.insert(codepoint, glyph.0);
            }
        }
    }
    map
}

fn build_width_table(face: &Face<'_>) -> Vec<u16> {
    let units_per_em = face.units_per_em() as u32;
    (0..face.number_of_glyphs())
        .map(|gid| {
            let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0) as u32;
            (advance * 1000 / units_per_em).min(u16::MAX as u32) as u16
        })
        .collect()
}

/// Font metrics extracted for the PDF FontDescriptor.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// PostScript name
    pub name: String,
    /// Units per em
    pub units_per_em: u16,
    /// Ascender (positive)
    pub ascender: i16,
    /// Descender (negative)
    pub descender: i16,
    /// Cap height
    pub cap_height: i16,
    /// Italic angle
    pub italic_angle: f32,
    /// Bounding box (llx, lly, urx, ury)
    pub bbox: (i16, i16, i16, i16),
    /// Stem V (vertical stem width)
    pub stem_v: i16,
    /// Font flags
    pub flags: u32,
}

impl FontMetrics {
    fn from_face(face: &Face<'_>) -> Self {
        let name = face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|name| name.to_string())
            .map(|name| sanitize_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let bbox = face.global_bounding_box();

        // Bit 6 nonsymbolic; bit 1 fixed pitch; bit 7 italic
        let mut flags = 1 << 5;
        if face.is_monospaced() {
            flags |= 1 << 0;
        }
        if face.is_italic() {
            flags |= 1 << 6;
        }

        Self {
            name,
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or(face.ascender()),
            italic_angle: face.tables().post.as_ref().map(|post| post.italic_angle).unwrap_or(0.0),
            bbox: (bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max),
            // not stored in sfnt; weight heuristic
            stem_v: if face.is_bold() { 140 } else { 80 },
            flags,
        }
    }

    /// Convert a value from font units to PDF units (1/1000 em).
    pub fn to_pdf_units(&self, value: i16) -> i32 {
        (value as i32 * 1000) / self.units_per_em as i32
    }

    /// Bounding box in PDF units.
    pub fn pdf_bbox(&self) -> (i32, i32, i32, i32) {
        (
            self.to_pdf_units(self.bbox.0),
            self.to_pdf_units(self.bbox.1),
            self.to_pdf_units(self.bbox.2),
            self.to_pdf_units(self.bbox.3),
        )
    }
}

/// Keep only characters that are safe in a PDF name without escaping.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
