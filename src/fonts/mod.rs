//! Typeface acquisition and parsing.
//!
//! Fonts arrive as opaque assets (from disk, memory or, with the `http`
//! feature, a web server), are validated by their leading bytes in
//! [`loader`], and are parsed for embedding in [`truetype_parser`]. Font
//! collections are reduced to a single face by [`collection`].

pub mod collection;
pub mod font_subsetter;
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod http_source;
pub mod loader;
pub mod signature;
pub mod truetype_parser;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use collection::{extract_face, face_count};
pub use font_subsetter::FontSubsetter;
#[cfg(feature = "http")]
pub use http_source::HttpFontSource;
pub use loader::{
    DirectoryFontSource, FetchedAsset, FontPair, FontSource, StaticFontSource, TypefaceLoader,
    ValidatedFont,
};
pub use signature::{describe_unrecognized, signature_hex, FontFormat};
pub use truetype_parser::{FontMetrics, OutlineKind, TrueTypeFont};
