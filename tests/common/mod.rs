//! Shared helpers for integration tests.
//!
//! Test fonts come from the library's `test-support` module.

#![allow(dead_code)]

pub use rent_receipt::fonts::test_support::{
    collection_font, font_pair, opentype_font, truetype_font,
};

/// Install a test logger once per binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Find `needle` in `haystack`.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
