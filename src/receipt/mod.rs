//! Receipt documents.
//!
//! A receipt is a single A5 portrait page: a centered title block, the
//! electricity and water readings side by side, the itemized charges with
//! a bold total, the bank transfer details and the unit prices.
//!
//! ```ignore
//! use rent_receipt::receipt::{ReceiptDocumentBuilder, ReceiptInput};
//!
//! let fonts = loader.load_pair(&config.regular_font, &config.bold_font).await?;
//! let input = ReceiptInput::for_room(&room, period, &reading);
//! let bytes = ReceiptDocumentBuilder::new(config).build(&input, &fonts)?;
//! std::fs::write(input.file_name(), bytes)?;
//! ```

mod builder;
mod export;
mod input;
pub mod layout;

pub use builder::{ReceiptDocumentBuilder, RenderedReceipt};
pub use export::{ExportedReceipt, ReceiptExporter};
pub use input::{receipt_file_name, ReceiptInput};
pub use layout::{Edge, LayoutWarning, PlacedText};
