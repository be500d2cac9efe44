//! Glyph usage tracking for embedded fonts.
//!
//! The whole font program is embedded; what is tracked here is which glyphs
//! the page actually shows, so the `/W` array and the ToUnicode CMap only
//! describe those. The font name gets the usual `ABCDEF+` subset tag derived
//! from the used glyph set, so identical content yields an identical name.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// Tracks the characters and glyphs drawn with one font.
#[derive(Debug, Clone, Default)]
pub struct FontSubsetter {
    /// Used Unicode codepoints mapped to their glyph IDs
    used_chars: BTreeMap<u32, u16>,
    /// Used glyph IDs
    used_glyphs: BTreeSet<u16>,
}

impl FontSubsetter {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a character as used.
    pub fn use_char(&mut self, codepoint: u32, glyph_id: u16) {
        self.used_chars.insert(codepoint, glyph_id);
        self.used_glyphs.insert(glyph_id);
    }

    /// Used glyph IDs in ascending order.
    pub fn used_glyphs(&self) -> &BTreeSet<u16> {
        &self.used_glyphs
    }

    /// Used characters and their glyphs.
    pub fn used_chars(&self) -> &BTreeMap<u32, u16> {
        &self.used_chars
    }

    /// Whether nothing has been drawn yet.
    pub fn is_empty(&self) -> bool {
        self.used_glyphs.is_empty()
    }

    /// Six uppercase letters derived from the used glyph set.
    pub fn subset_tag(&self) -> String {
        // FNV-1a keeps the tag stable across runs
        let mut hasher = Fnv1a::default();
        for glyph in &self.used_glyphs {
            glyph.hash(&mut hasher);
        }
        let mut h = hasher.finish();

        let mut tag = String::with_capacity(6);
        for _ in 0..6 {
            tag.push(((h % 26) as u8 + b'A') as char);
            h /= 26;
        }
        tag
    }

    /// Subset name, e.g. `ABCDEF+NotoSans-Bold`.
    pub fn subset_font_name(&self, base_name: &str) -> String {
        format!("{}+{}", self.subset_tag(), base_name)
    }

    /// Group the used glyphs into runs of consecutive IDs with their widths.
    ///
    /// This is the shape of a CIDFont `/W` array: `[start [w1 w2 ...] ...]`.
    /// With Identity-H, CID = GID.
    pub fn width_runs(&self, glyph_width: impl Fn(u16) -> u16) -> Vec<(u16, Vec<u16>)> {
        let mut runs: Vec<(u16, Vec<u16>)> = Vec::new();
        for &gid in &self.used_glyphs {
            let width = glyph_width(gid);
            match runs.last_mut() {
                Some((start, widths)) if *start as usize + widths.len() == gid as usize => {
                    widths.push(width)
                },
                _ => runs.push((gid, vec![width])),
            }
        }
        runs
    }

    /// Generate a ToUnicode CMap mapping used glyphs back to text.
    pub fn tounicode_cmap(&self) -> String {
        let mut cmap = String::new();
        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

        // One glyph may serve several codepoints; the first one wins.
        let mut by_glyph: BTreeMap<u16, u32> = BTreeMap::new();
        for (&unicode, &gid) in &self.used_chars {
            by_glyph.entry(gid).or_insert(unicode);
        }
        let mappings: Vec<(u16, u32)> = by_glyph.into_iter().collect();

        // at most 100 entries per bfchar section
        for chunk in mappings.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for &(gid, unicode) in chunk {
                if unicode <= 0xFFFF {
                    cmap.push_str(&format!("<{:04X}> <{:04X}>\n", gid, unicode));
                } else {
                    let high = ((unicode - 0x10000) >> 10) + 0xD800;
                    let low = ((unicode - 0x10000) & 0x3FF) + 0xDC00;
                    cmap.push_str(&format!("<{:04X}> <{:04X}{:04X}>\n", gid, high, low));
                }
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");
        cmap
    }
}

struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Fnv1a(0xcbf2_9ce4_8422_2325)
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x0100_0000_01b3);
        }
    }
}
