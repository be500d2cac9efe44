//! Binary signature checks for outline-font containers.
//!
//! Only the first four bytes are inspected. Anything that does not start
//! with one of the accepted tags is described as precisely as possible so a
//! misconfigured asset path (an HTML error page, a WOFF web font) is obvious
//! from the error message alone.

use std::fmt;

/// sfnt version tag of a TrueType-outline font.
pub const TRUETYPE_MAGIC: [u8; 4] = [0x00, 0x01, 0x00, 0x00];
/// sfnt version tag of a CFF-outline OpenType font ("OTTO").
pub const OPENTYPE_MAGIC: [u8; 4] = *b"OTTO";
/// Header tag of a font collection ("ttcf").
pub const COLLECTION_MAGIC: [u8; 4] = *b"ttcf";

/// Accepted outline-font container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    /// TrueType outlines (`00 01 00 00`)
    TrueType,
    /// OpenType with CFF outlines (`OTTO`)
    OpenType,
    /// TrueType/OpenType collection (`ttcf`)
    Collection,
}

impl FontFormat {
    /// Identify the container from its leading bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        let head: [u8; 4] = data.get(..4)?.try_into().ok()?;
        match head {
            TRUETYPE_MAGIC => Some(FontFormat::TrueType),
            OPENTYPE_MAGIC => Some(FontFormat::OpenType),
            COLLECTION_MAGIC => Some(FontFormat::Collection),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            FontFormat::TrueType => "ttf",
            FontFormat::OpenType => "otf",
            FontFormat::Collection => "ttc",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFormat::TrueType => write!(f, "TrueType"),
            FontFormat::OpenType => write!(f, "OpenType/CFF"),
            FontFormat::Collection => write!(f, "font collection"),
        }
    }
}

/// Leading bytes as lowercase hex pairs, e.g. `3c 21 44 4f`.
pub fn signature_hex(data: &[u8]) -> String {
    let hex: Vec<String> = data.iter().take(4).map(|b| format!("{:02x}", b)).collect();
    if hex.is_empty() {
        "(empty)".to_string()
    } else {
        hex.join(" ")
    }
}

/// Best guess at what a rejected buffer actually is.
pub fn describe_unrecognized(data: &[u8]) -> String {
    if data.is_empty() {
        return "the asset is empty".to_string();
    }
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(0);
    let text = &data[start..];
    let lower: Vec<u8> = text.iter().take(9).map(|b| b.to_ascii_lowercase()).collect();

    if lower.starts_with(b"<!do") || lower.starts_with(b"<htm") || lower.starts_with(b"<?xml") {
        "looks like an HTML/XML document (often a 404 page served instead of the font)".to_string()
    } else if data.starts_with(b"wOFF") {
        "looks like a WOFF web font; convert it to TTF/OTF".to_string()
    } else if data.starts_with(b"wOF2") {
        "looks like a WOFF2 web font; convert it to TTF/OTF".to_string()
    } else if data.starts_with(b"true") {
        "looks like a legacy Apple 'true' font, which is not supported".to_string()
    } else if text.first() == Some(&b'{') {
        "looks like a JSON document".to_string()
    } else if data.len() < 4 {
        format!("only {} bytes long", data.len())
    } else {
        "unknown binary signature; expected 00 01 00 00, 'OTTO' or 'ttcf'".to_string()
    }
}
