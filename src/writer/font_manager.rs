//! Embedded fonts for PDF generation.
//!
//! Text is drawn with composite (Type0) fonts using Identity-H encoding,
//! so any character the font maps can be shown. Per PDF spec Section
//! 9.6-9.9 each embedded font needs:
//! - a CIDFont (Type 2 for TrueType outlines, Type 0 for CFF)
//! - a `/W` widths array for the glyphs actually used
//! - a ToUnicode CMap so text stays extractable
//! - the font program itself (FontFile2 or FontFile3)

use crate::error::Result;
use crate::fonts::{extract_face, FontFormat, FontSubsetter, TrueTypeFont, ValidatedFont};

/// A parsed font registered for drawing, with glyph usage tracking.
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    /// Asset the font was loaded from
    asset: String,
    /// Parsed face
    font: TrueTypeFont,
    /// Glyphs drawn so far
    subsetter: FontSubsetter,
    /// Characters drawn that the font cannot map
    missing: Vec<char>,
}

impl EmbeddedFont {
    /// Prepare a validated font for embedding.
    ///
    /// A collection is reduced to its first face, since a PDF font program
    /// must be a single sfnt.
    pub fn from_validated(font: &ValidatedFont) -> Result<Self> {
        let parsed = match font.format() {
            FontFormat::Collection => TrueTypeFont::parse(extract_face(font.data(), 0)?)?,
            FontFormat::TrueType | FontFormat::OpenType => TrueTypeFont::parse(font.bytes())?,
        };
        log::debug!(
            "Prepared font {} from {} ({:?} outlines)",
            parsed.metrics().name,
            font.asset(),
            parsed.outline()
        );

        Ok(Self {
            asset: font.asset().to_string(),
            font: parsed,
            subsetter: FontSubsetter::new(),
            missing: Vec::new(),
        })
    }

    /// Asset the font was loaded from.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// The parsed face.
    pub fn font(&self) -> &TrueTypeFont {
        &self.font
    }

    /// PostScript name of the face.
    pub fn name(&self) -> &str {
        &self.font.metrics().name
    }

    /// Calculate text width in points at the given font size.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let width_units: f32 = text
            .chars()
            .map(|c| self.font.char_width(c as u32) as f32)
            .sum();
        width_units * font_size / 1000.0
    }

    /// Encode a string for a content stream and record its glyphs as used.
    ///
    /// Returns a hex string like "<00410042>" where each 4-digit hex is a
    /// glyph ID. Unmapped characters become glyph 0.
    pub fn encode_string(&mut self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 4 + 2);
        hex.push('<');
        for ch in text.chars() {
            let codepoint = ch as u32;
            let glyph_id = match self.font.glyph_id(codepoint) {
                Some(gid) => {
                    self.subsetter.use_char(codepoint, gid);
                    gid
                },
                None => {
                    if !self.missing.contains(&ch) {
                        log::debug!("Font {} has no glyph for U+{:04X}", self.name(), codepoint);
                        self.missing.push(ch);
                    }
                    0
                },
            };
            hex.push_str(&format!("{:04X}", glyph_id));
        }
        hex.push('>');
        hex
    }

    /// Subset-tagged font name, e.g. `ABCDEF+NotoSans-Bold`.
    pub fn subset_name(&self) -> String {
        self.subsetter.subset_font_name(self.name())
    }

    /// Runs of consecutive used glyphs with their widths, for the `/W` array.
    pub fn width_runs(&self) -> Vec<(u16, Vec<u16>)> {
        self.subsetter.width_runs(|gid| self.font.glyph_width(gid))
    }

    /// ToUnicode CMap for the glyphs drawn so far.
    pub fn tounicode_cmap(&self) -> String {
        self.subsetter.tounicode_cmap()
    }

    /// Characters drawn that the font cannot show.
    pub fn missing_chars(&self) -> &[char] {
        &self.missing
    }

    /// Whether any text has been drawn with this font.
    pub fn is_used(&self) -> bool {
        !self.subsetter.is_empty() || !self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::test_support::{collection_font, opentype_font, truetype_font};
    use crate::fonts::OutlineKind;

    fn embedded(data: Vec<u8>) -> EmbeddedFont {
        let validated = ValidatedFont::from_bytes("test.ttf", data).unwrap();
        EmbeddedFont::from_validated(&validated).unwrap()
    }

    #[test]
    fn test_text_width_uses_advances() {
        let font = embedded(truetype_font("Test-Regular", 600));
        // space is 250, other printable glyphs 600
        assert!((font.text_width("AB", 10.0) - 12.0).abs() < 1e-4);
        assert!((font.text_width("A B", 10.0) - 14.5).abs() < 1e-4);
        assert_eq!(font.text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_encode_records_usage() {
        let mut font = embedded(truetype_font("Test-Regular", 600));
        assert!(!font.is_used());

        // 'A' = 0x41 -> glyph 0x41 - 0x1F
        assert_eq!(font.encode_string("AB"), "<00220023>");
        assert!(font.is_used());
        assert_eq!(font.width_runs(), vec![(0x22, vec![600, 600])]);
        assert!(font.tounicode_cmap().contains("<0022> <0041>"));
    }

    #[test]
    fn test_missing_glyph_encodes_notdef() {
        let mut font = embedded(truetype_font("Test-Regular", 600));
        assert_eq!(font.encode_string("\u{203A}"), "<0000>");
        assert_eq!(font.missing_chars(), &['\u{203A}']);
        // measured as the missing glyph
        assert!((font.text_width("\u{203A}", 10.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_subset_name() {
        let mut font = embedded(truetype_font("Test-Bold", 650));
        font.encode_string("Total");
        let name = font.subset_name();
        assert!(name.ends_with("+Test-Bold"));
        assert_eq!(font.name(), "Test-Bold");
    }

    #[test]
    fn test_opentype_and_collection() {
        let otf = embedded(opentype_font("Test-Cff", 600));
        assert_eq!(otf.font().outline(), OutlineKind::Cff);

        let ttc = embedded(collection_font("Test-Ttc", 600));
        assert_eq!(ttc.font().outline(), OutlineKind::TrueType);
        assert_eq!(ttc.name(), "Test-Ttc");
        assert_eq!(&ttc.font().raw_data()[..4], &[0, 1, 0, 0]);
    }
}
