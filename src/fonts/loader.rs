//! Font acquisition and validation.
//!
//! A [`TypefaceLoader`] fetches assets through a [`FontSource`] and only
//! ever returns buffers whose leading bytes match a supported outline-font
//! container. Nothing is cached: each export session loads its own pair.

use super::signature::{describe_unrecognized, signature_hex, FontFormat};
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Raw bytes returned by a transport, with its declared content type.
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    /// Asset body
    pub data: Bytes,
    /// Content type reported by the transport, if any
    pub content_type: Option<String>,
}

impl FetchedAsset {
    /// Wrap bytes with no declared content type.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
        }
    }

    /// Set the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Transport that retrieves font assets by identifier.
#[async_trait]
pub trait FontSource: Send + Sync {
    /// Retrieve the asset, failing with [`Error::FontFetch`].
    async fn fetch(&self, asset: &str) -> Result<FetchedAsset>;
}

/// Reads assets from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryFontSource {
    root: PathBuf,
}

impl DirectoryFontSource {
    /// Serve assets relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, asset: &str) -> Result<PathBuf> {
        let relative = Path::new(asset.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || asset.trim().is_empty() {
            return Err(Error::FontFetch {
                asset: asset.to_string(),
                status: None,
                reason: "asset path must stay inside the font directory".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "ttf" => Some("font/ttf"),
        "otf" => Some("font/otf"),
        "ttc" => Some("font/collection"),
        "woff" => Some("font/woff"),
        "woff2" => Some("font/woff2"),
        "html" | "htm" => Some("text/html"),
        _ => None,
    }
}

#[async_trait]
impl FontSource for DirectoryFontSource {
    async fn fetch(&self, asset: &str) -> Result<FetchedAsset> {
        let path = self.resolve(asset)?;
        let data = tokio::fs::read(&path).await.map_err(|e| Error::FontFetch {
            asset: asset.to_string(),
            status: None,
            reason: format!("{} ({})", e, path.display()),
        })?;

        let mut fetched = FetchedAsset::new(data);
        fetched.content_type = content_type_for(&path).map(str::to_string);
        Ok(fetched)
    }
}

#[derive(Debug, Clone)]
enum StaticEntry {
    Asset(FetchedAsset),
    Failure { status: u16, reason: String },
}

/// In-memory asset table, e.g. fonts compiled in with `include_bytes!`.
///
/// Unknown assets fail with status 404, like a web server would.
#[derive(Debug, Clone, Default)]
pub struct StaticFontSource {
    entries: HashMap<String, StaticEntry>,
}

impl StaticFontSource {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset body.
    pub fn insert(&mut self, asset: impl Into<String>, data: impl Into<Bytes>) -> &mut Self {
        self.entries
            .insert(asset.into(), StaticEntry::Asset(FetchedAsset::new(data)));
        self
    }

    /// Register an asset body with a declared content type.
    pub fn insert_with_type(
        &mut self,
        asset: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> &mut Self {
        let fetched = FetchedAsset::new(data).with_content_type(content_type);
        self.entries.insert(asset.into(), StaticEntry::Asset(fetched));
        self
    }

    /// Make fetches of `asset` fail with a transport status.
    pub fn insert_failure(
        &mut self,
        asset: impl Into<String>,
        status: u16,
        reason: impl Into<String>,
    ) -> &mut Self {
        self.entries.insert(
            asset.into(),
            StaticEntry::Failure {
                status,
                reason: reason.into(),
            },
        );
        self
    }
}

#[async_trait]
impl FontSource for StaticFontSource {
    async fn fetch(&self, asset: &str) -> Result<FetchedAsset> {
        match self.entries.get(asset) {
            Some(StaticEntry::Asset(fetched)) => Ok(fetched.clone()),
            Some(StaticEntry::Failure { status, reason }) => Err(Error::FontFetch {
                asset: asset.to_string(),
                status: Some(*status),
                reason: reason.clone(),
            }),
            None => Err(Error::FontFetch {
                asset: asset.to_string(),
                status: Some(404),
                reason: "asset not found".to_string(),
            }),
        }
    }
}

/// Font bytes whose container signature has been checked.
#[derive(Debug, Clone)]
pub struct ValidatedFont {
    asset: String,
    format: FontFormat,
    data: Bytes,
}

impl ValidatedFont {
    /// Validate fetched bytes.
    ///
    /// A declared `text/html` content type is rejected immediately, but the
    /// signature is computed either way so the diagnostic always shows the
    /// real leading bytes.
    pub fn from_fetched(asset: &str, fetched: FetchedAsset) -> Result<Self> {
        let declared_html = fetched
            .content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false);

        let format = FontFormat::sniff(&fetched.data);
        match format {
            Some(format) if !declared_html => Ok(Self {
                asset: asset.to_string(),
                format,
                data: fetched.data,
            }),
            _ => {
                let detail = if declared_html && format.is_some() {
                    "served with content type text/html".to_string()
                } else {
                    describe_unrecognized(&fetched.data)
                };
                log::warn!("Rejected font asset {}: {}", asset, detail);
                Err(Error::FontFormat {
                    asset: asset.to_string(),
                    signature: signature_hex(&fetched.data),
                    detail,
                })
            },
        }
    }

    /// Validate raw bytes that carry no content type.
    pub fn from_bytes(asset: &str, data: impl Into<Bytes>) -> Result<Self> {
        Self::from_fetched(asset, FetchedAsset::new(data))
    }

    /// Identifier the font was loaded from.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Container format.
    pub fn format(&self) -> FontFormat {
        self.format
    }

    /// Font file bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the font file bytes.
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty (never true for a validated font).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The two weights a receipt is drawn with.
#[derive(Debug, Clone)]
pub struct FontPair {
    /// Body text
    pub regular: ValidatedFont,
    /// Headings, totals and payment details
    pub bold: ValidatedFont,
}

/// Fetches and validates font assets.
#[derive(Debug, Clone)]
pub struct TypefaceLoader<S> {
    source: S,
}

impl<S: FontSource> TypefaceLoader<S> {
    /// Create a loader over a transport.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying transport.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one asset and check its signature.
    pub async fn load(&self, asset: &str) -> Result<ValidatedFont> {
        let fetched = self.source.fetch(asset).await?;
        let font = ValidatedFont::from_fetched(asset, fetched)?;
        log::debug!("Loaded font {} ({}, {} bytes)", asset, font.format(), font.len());
        Ok(font)
    }

    /// Fetch both weights concurrently; either failure fails the pair.
    pub async fn load_pair(&self, regular: &str, bold: &str) -> Result<FontPair> {
        let (regular, bold) = tokio::try_join!(self.load(regular), self.load(bold))?;
        Ok(FontPair { regular, bold })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTF_HEAD: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x00, 0x0a];

    #[test]
    fn test_validate_accepts_signatures() {
        for (bytes, format) in [
            (TTF_HEAD.to_vec(), FontFormat::TrueType),
            (b"OTTO\0\0".to_vec(), FontFormat::OpenType),
            (b"ttcf\0\x01".to_vec(), FontFormat::Collection),
        ] {
            let font = ValidatedFont::from_bytes("f", bytes).unwrap();
            assert_eq!(font.format(), format);
        }
    }

    #[test]
    fn test_validate_rejects_html() {
        let err = ValidatedFont::from_bytes("fonts/a.ttf", &b"<!DOCTYPE html><html>"[..]).unwrap_err();
        match err {
            Error::FontFormat {
                asset,
                signature,
                detail,
            } => {
                assert_eq!(asset, "fonts/a.ttf");
                assert_eq!(signature, "3c 21 44 4f");
                assert!(detail.contains("HTML"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_declared_html_rejected_even_with_font_bytes() {
        let fetched = FetchedAsset::new(TTF_HEAD.to_vec()).with_content_type("text/html; charset=utf-8");
        let err = ValidatedFont::from_fetched("a.ttf", fetched).unwrap_err();
        assert!(matches!(err, Error::FontFormat { ref signature, .. } if signature == "00 01 00 00"));
    }

    #[test]
    fn test_declared_font_type_does_not_bypass_signature() {
        let fetched = FetchedAsset::new(&b"wOFF\0\0\0\0"[..]).with_content_type("font/ttf");
        assert!(matches!(
            ValidatedFont::from_fetched("a.ttf", fetched),
            Err(Error::FontFormat { .. })
        ));
    }

    #[test]
    fn test_directory_rejects_escaping_paths() {
        let source = DirectoryFontSource::new("/srv/fonts");
        assert!(source.resolve("../etc/passwd").is_err());
        assert!(source.resolve("").is_err());
        assert_eq!(
            source.resolve("/fonts/a.ttf").unwrap(),
            PathBuf::from("/srv/fonts/fonts/a.ttf")
        );
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(content_type_for(Path::new("a.TTF")), Some("font/ttf"));
        assert_eq!(content_type_for(Path::new("index.html")), Some("text/html"));
        assert_eq!(content_type_for(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn test_static_source_missing_is_404() {
        let loader = TypefaceLoader::new(StaticFontSource::new());
        let err = loader.load("missing.ttf").await.unwrap_err();
        assert!(matches!(err, Error::FontFetch { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_load_pair_fails_if_either_fails() {
        let mut source = StaticFontSource::new();
        source
            .insert("regular.ttf", TTF_HEAD.to_vec())
            .insert_failure("bold.ttf", 500, "internal error");
        let loader = TypefaceLoader::new(source);

        let err = loader.load_pair("regular.ttf", "bold.ttf").await.unwrap_err();
        assert!(matches!(err, Error::FontFetch { status: Some(500), .. }));
    }
}
