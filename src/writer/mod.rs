//! PDF writing module for generating receipt documents.
//!
//! ## Architecture
//!
//! ```text
//! text runs + embedded fonts
//!     ↓
//! [ContentStreamBuilder] (BT/Tf/Tm/Tj operators)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ```ignore
//! use rent_receipt::writer::{EmbeddedFont, PdfWriter};
//!
//! let mut writer = PdfWriter::new();
//! let regular = writer.add_font(EmbeddedFont::from_validated(&font)?);
//! let mut page = writer.add_a5_page();
//! page.draw_text("Hello", 32.0, 540.0, regular, 12.0);
//! page.finish();
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod font_manager;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::EmbeddedFont;
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{FontId, PageBuilder, PdfWriter, PdfWriterConfig, A5_HEIGHT, A5_WIDTH};
