//! Error types for the billing ledger and receipt engine.
//!
//! This module defines every error that can surface from ledger writes,
//! font acquisition and receipt construction. The bill calculator itself
//! never fails.

use std::fmt;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The meter pair a reading validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    /// `elec_new` / `elec_old`
    Electricity,
    /// `water_new` / `water_old`
    Water,
}

impl fmt::Display for ReadingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingField::Electricity => write!(f, "elec_new < elec_old"),
            ReadingField::Water => write!(f, "water_new < water_old"),
        }
    }
}

/// Error types that can occur while recording readings or exporting receipts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A reading record violates `new >= old` for one of its meters
    #[error("Invalid reading: {field} (new {new}, old {old})")]
    Validation {
        /// Offending meter pair
        field: ReadingField,
        /// Opening meter value
        old: u64,
        /// Closing meter value
        new: u64,
    },

    /// A font asset could not be retrieved
    #[error("Could not fetch font '{asset}'{}: {reason}", status_suffix(.status))]
    FontFetch {
        /// Asset identifier that was requested
        asset: String,
        /// Transport status code, when the transport reports one
        status: Option<u16>,
        /// Human-readable cause
        reason: String,
    },

    /// A font asset was retrieved but is not a recognized outline-font binary
    #[error("Font '{asset}' is not a TTF/OTF/TTC binary (signature bytes: {signature}): {detail}")]
    FontFormat {
        /// Asset identifier that was requested
        asset: String,
        /// Leading bytes in hex, e.g. `3c 21 44 4f`
        signature: String,
        /// What the bytes look like instead
        detail: String,
    },

    /// A validated font could not be parsed or embedded
    #[error("Font error: {0}")]
    Font(String),

    /// Billing period is not a valid `YYYY-MM` month
    #[error("Invalid period '{0}': expected YYYY-MM")]
    InvalidPeriod(String),

    /// Room code is already taken by another room
    #[error("Room code '{0}' is already in use")]
    DuplicateRoomCode(String),

    /// Room code is empty after trimming
    #[error("Room code must not be empty")]
    EmptyRoomCode,

    /// Room identifier is not in the catalog
    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

impl Error {
    /// Returns true for failures that belong to font acquisition.
    pub fn is_font_error(&self) -> bool {
        matches!(self, Error::FontFetch { .. } | Error::FontFormat { .. } | Error::Font(_))
    }
}
