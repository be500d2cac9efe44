//! One export session: fonts, document, ledger write.

use super::builder::ReceiptDocumentBuilder;
use super::input::ReceiptInput;
use super::layout::LayoutWarning;
use crate::billing::BillBreakdown;
use crate::config::ReceiptConfig;
use crate::error::Result;
use crate::fonts::{FontSource, TypefaceLoader};
use crate::ledger::{MonthlyReading, ReadingLedger, ReadingStore};
use crate::period::Period;
use crate::room::Room;

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportedReceipt {
    /// Suggested download name
    pub file_name: String,
    /// Complete PDF file
    pub bytes: Vec<u8>,
    /// The bill that was printed
    pub bill: BillBreakdown,
    /// Non-fatal layout problems
    pub warnings: Vec<LayoutWarning>,
}

/// Builds receipts and records the readings they were built from.
pub struct ReceiptExporter<S, R> {
    loader: TypefaceLoader<S>,
    builder: ReceiptDocumentBuilder,
    store: R,
}

impl<S: FontSource, R: ReadingStore> ReceiptExporter<S, R> {
    /// Create an exporter.
    pub fn new(source: S, store: R, config: ReceiptConfig) -> Self {
        Self {
            loader: TypefaceLoader::new(source),
            builder: ReceiptDocumentBuilder::new(config),
            store,
        }
    }

    /// The document builder.
    pub fn builder(&self) -> &ReceiptDocumentBuilder {
        &self.builder
    }

    /// The reading store.
    pub fn store(&self) -> &R {
        &self.store
    }

    /// Export the receipt for `room` in `period`.
    ///
    /// The reading is validated first and both fonts are fetched
    /// concurrently. Nothing is written to the ledger or the store unless
    /// the document was built, and the ledger is left unchanged if the
    /// store rejects the save.
    pub async fn export(
        &mut self,
        ledger: &mut ReadingLedger,
        room: &Room,
        period: Period,
        reading: MonthlyReading,
    ) -> Result<ExportedReceipt> {
        reading.validate()?;
        let input = ReceiptInput::for_room(room, period, &reading);

        let config = self.builder.config();
        let fonts = self
            .loader
            .load_pair(&config.regular_font, &config.bold_font)
            .await?;
        let rendered = self.builder.build_with_report(&input, &fonts)?;

        // The caller's ledger only changes once the store has accepted the write.
        let mut staged = ledger.clone();
        let records = staged.upsert(room.id, period, reading)?;
        self.store.save_all(&records)?;
        *ledger = staged;

        let file_name = input.file_name();
        log::info!(
            "Exported {} ({} bytes, total {}, {} warnings)",
            file_name,
            rendered.bytes.len(),
            input.bill().total,
            rendered.warnings.len()
        );

        Ok(ExportedReceipt {
            file_name,
            bytes: rendered.bytes,
            bill: input.bill(),
            warnings: rendered.warnings,
        })
    }
}
