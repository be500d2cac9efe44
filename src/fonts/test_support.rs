//! Minimal sfnt fonts for tests.
//!
//! The fonts are tiny but valid: glyph 0 is `.notdef` (500 units), glyphs
//! 1..=95 map the printable ASCII range, space is 250 units and every other
//! mapped glyph is `advance` units wide. Nothing outside ASCII maps.
//!
//! Compiled for this crate's unit tests and, through the `test-support`
//! feature, for its integration tests.

use super::loader::{FontPair, ValidatedFont};

const NUM_GLYPHS: u16 = 96;

fn be16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn be32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    be32(&mut t, 0x0001_0000); // version
    be32(&mut t, 0x0001_0000); // fontRevision
    be32(&mut t, 0); // checkSumAdjustment
    be32(&mut t, 0x5F0F_3CF5); // magic
    be16(&mut t, 0); // flags
    be16(&mut t, 1000); // unitsPerEm
    t.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, -250, 1000, 900] {
        be16(&mut t, v as u16);
    }
    be16(&mut t, 0); // macStyle
    be16(&mut t, 8); // lowestRecPPEM
    be16(&mut t, 2); // fontDirectionHint
    be16(&mut t, 0); // indexToLocFormat
    be16(&mut t, 0); // glyphDataFormat
    t
}

fn hhea() -> Vec<u8> {
    let mut t = Vec::new();
    be32(&mut t, 0x0001_0000);
    be16(&mut t, 900); // ascender
    be16(&mut t, (-250i16) as u16); // descender
    be16(&mut t, 0); // lineGap
    be16(&mut t, 1000); // advanceWidthMax
    t.extend_from_slice(&[0; 22]);
    be16(&mut t, NUM_GLYPHS); // numberOfHMetrics
    t
}

fn maxp() -> Vec<u8> {
    let mut t = Vec::new();
    be32(&mut t, 0x0000_5000);
    be16(&mut t, NUM_GLYPHS);
    t
}

fn hmtx(advance: u16) -> Vec<u8> {
    let mut t = Vec::new();
    for gid in 0..NUM_GLYPHS {
        let width = match gid {
            0 => 500,
            1 => 250, // space
            _ => advance,
        };
        be16(&mut t, width);
        be16(&mut t, 0);
    }
    t
}

fn cmap() -> Vec<u8> {
    let mut sub = Vec::new();
    be16(&mut sub, 4); // format
    be16(&mut sub, 32); // length
    be16(&mut sub, 0); // language
    be16(&mut sub, 4); // segCountX2
    be16(&mut sub, 4); // searchRange
    be16(&mut sub, 1); // entrySelector
    be16(&mut sub, 0); // rangeShift
    be16(&mut sub, 0x7E);
    be16(&mut sub, 0xFFFF);
    be16(&mut sub, 0); // reservedPad
    be16(&mut sub, 0x20);
    be16(&mut sub, 0xFFFF);
    be16(&mut sub, 1u16.wrapping_sub(0x20));
    be16(&mut sub, 1);
    be16(&mut sub, 0);
    be16(&mut sub, 0);

    let mut t = Vec::new();
    be16(&mut t, 0); // version
    be16(&mut t, 1); // numTables
    be16(&mut t, 3); // Windows
    be16(&mut t, 1); // Unicode BMP
    be32(&mut t, 12);
    t.extend_from_slice(&sub);
    t
}

fn name(postscript: &str) -> Vec<u8> {
    let encoded: Vec<u8> = postscript.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
    let mut t = Vec::new();
    be16(&mut t, 0); // format
    be16(&mut t, 1); // count
    be16(&mut t, 18); // storage offset
    be16(&mut t, 3);
    be16(&mut t, 1);
    be16(&mut t, 0x0409);
    be16(&mut t, 6); // PostScript name
    be16(&mut t, encoded.len() as u16);
    be16(&mut t, 0);
    t.extend_from_slice(&encoded);
    t
}

/// Assemble an sfnt whose table offsets start at `base`.
fn sfnt_at(version: [u8; 4], postscript: &str, advance: u16, base: usize) -> Vec<u8> {
    let tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap()),
        (b"head", head()),
        (b"hhea", hhea()),
        (b"hmtx", hmtx(advance)),
        (b"maxp", maxp()),
        (b"name", name(postscript)),
    ];

    let mut out = Vec::new();
    out.extend_from_slice(&version);
    be16(&mut out, tables.len() as u16);
    be16(&mut out, 64);
    be16(&mut out, 2);
    be16(&mut out, (tables.len() as u16 * 16).saturating_sub(64));

    let mut offset = base + 12 + tables.len() * 16;
    for (tag, body) in &tables {
        out.extend_from_slice(*tag);
        be32(&mut out, 0);
        be32(&mut out, offset as u32);
        be32(&mut out, body.len() as u32);
        offset += (body.len() + 3) & !3;
    }
    for (_, body) in &tables {
        out.extend_from_slice(body);
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }
    out
}

/// A TrueType-flavoured font where every printable glyph but space is
/// `advance` units wide.
pub fn truetype_font(postscript: &str, advance: u16) -> Vec<u8> {
    sfnt_at([0, 1, 0, 0], postscript, advance, 0)
}

/// The same font with the `OTTO` version tag.
pub fn opentype_font(postscript: &str, advance: u16) -> Vec<u8> {
    sfnt_at(*b"OTTO", postscript, advance, 0)
}

/// A single-face collection wrapping [`truetype_font`].
pub fn collection_font(postscript: &str, advance: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    be32(&mut out, 0x0001_0000);
    be32(&mut out, 1);
    be32(&mut out, 16);
    out.extend_from_slice(&sfnt_at([0, 1, 0, 0], postscript, advance, 16));
    out
}

/// A regular/bold pair of validated test fonts.
pub fn font_pair() -> FontPair {
    FontPair {
        regular: ValidatedFont::from_bytes("regular.ttf", truetype_font("Test-Regular", 500))
            .expect("regular font"),
        bold: ValidatedFont::from_bytes("bold.ttf", truetype_font("Test-Bold", 550))
            .expect("bold font"),
    }
}
