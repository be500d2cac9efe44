//! Single-page receipt layout.
//!
//! The page is laid out top to bottom with a vertical cursor. Centered
//! lines move the cursor by their font size plus [`CENTER_GAP`]; every
//! other advance is a fixed step. Widths are measured with the embedded
//! fonts' advance widths, so right-aligned and centered text lands where
//! the viewer draws it.

use super::input::ReceiptInput;
use super::layout::{
    check_margins, LayoutWarning, PlacedText, CENTER_GAP, COLUMN_GAP, ITEM_INDENT, MARGIN,
    TOP_OFFSET, VALUE_OFFSET,
};
use crate::billing::format_money;
use crate::config::ReceiptConfig;
use crate::error::Result;
use crate::fonts::FontPair;
use crate::writer::{EmbeddedFont, FontId, PageBuilder, PdfWriter};

/// A built receipt and what was noticed while laying it out.
#[derive(Debug, Clone)]
pub struct RenderedReceipt {
    /// Complete PDF file
    pub bytes: Vec<u8>,
    /// Non-fatal layout problems
    pub warnings: Vec<LayoutWarning>,
    /// Every run of text in drawing order
    pub placed: Vec<PlacedText>,
}

/// Cursor-driven drawing on the receipt page.
struct Canvas<'a> {
    page: PageBuilder<'a>,
    regular: FontId,
    bold: FontId,
    width: f32,
    y: f32,
    placed: Vec<PlacedText>,
}

impl<'a> Canvas<'a> {
    fn new(page: PageBuilder<'a>, regular: FontId, bold: FontId) -> Self {
        let width = page.width();
        let y = page.height() - TOP_OFFSET;
        Self {
            page,
            regular,
            bold,
            width,
            y,
            placed: Vec::new(),
        }
    }

    fn font(&self, bold: bool) -> FontId {
        if bold {
            self.bold
        } else {
            self.regular
        }
    }

    fn measure(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.page.text_width(text, self.font(bold), size)
    }

    fn place(&mut self, text: &str, x: f32, y: f32, size: f32, bold: bool, width: f32) {
        let font = self.font(bold);
        self.page.draw_text(text, x, y, font, size);
        self.placed.push(PlacedText {
            text: text.to_string(),
            x,
            y,
            size,
            width,
            bold,
        });
    }

    /// Draw at the cursor line.
    fn draw(&mut self, text: &str, x: f32, size: f32, bold: bool) {
        let width = self.measure(text, size, bold);
        self.place(text, x, self.y, size, bold, width);
    }

    fn draw_right(&mut self, text: &str, right_x: f32, size: f32, bold: bool) {
        let width = self.measure(text, size, bold);
        self.place(text, right_x - width, self.y, size, bold, width);
    }

    /// Draw centered and move below the line.
    fn center(&mut self, text: &str, size: f32, bold: bool) {
        let width = self.measure(text, size, bold);
        self.place(text, (self.width - width) / 2.0, self.y, size, bold, width);
        self.y -= size + CENTER_GAP;
    }

    fn down(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn finish(self) -> Vec<PlacedText> {
        self.page.finish();
        self.placed
    }
}

/// Builds A5 receipt PDFs.
#[derive(Debug, Clone, Default)]
pub struct ReceiptDocumentBuilder {
    config: ReceiptConfig,
}

impl ReceiptDocumentBuilder {
    /// Create a builder.
    pub fn new(config: ReceiptConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    /// Build the receipt PDF.
    pub fn build(&self, input: &ReceiptInput, fonts: &FontPair) -> Result<Vec<u8>> {
        Ok(self.build_with_report(input, fonts)?.bytes)
    }

    /// Build the receipt PDF and report layout warnings.
    ///
    /// Font failures abort the build. Text that crosses a margin or uses
    /// characters the fonts lack is still drawn and reported.
    pub fn build_with_report(&self, input: &ReceiptInput, fonts: &FontPair) -> Result<RenderedReceipt> {
        let mut writer = PdfWriter::with_config(self.config.writer_config());
        let regular = writer.add_font(EmbeddedFont::from_validated(&fonts.regular)?);
        let bold = writer.add_font(EmbeddedFont::from_validated(&fonts.bold)?);

        let mut canvas = Canvas::new(writer.add_a5_page(), regular, bold);
        self.lay_out(&mut canvas, input);
        let page_width = canvas.width;
        let placed = canvas.finish();

        let mut warnings: Vec<LayoutWarning> = placed
            .iter()
            .filter_map(|p| check_margins(p, page_width))
            .collect();
        for id in [regular, bold] {
            let font = writer.font(id);
            if !font.missing_chars().is_empty() {
                warnings.push(LayoutWarning::MissingGlyphs {
                    font: font.name().to_string(),
                    chars: font.missing_chars().to_vec(),
                });
            }
        }
        for warning in &warnings {
            log::warn!("Receipt {}: {}", input.file_name(), warning);
        }

        let bytes = writer.finish()?;
        log::debug!("Built {} ({} bytes)", input.file_name(), bytes.len());

        Ok(RenderedReceipt {
            bytes,
            warnings,
            placed,
        })
    }

    /// One charge line: label at the indent, amount against the right margin.
    fn item(&self, canvas: &mut Canvas<'_>, label: &str, amount: u64, bold: bool) {
        let size = if bold { 11.0 } else { 10.0 };
        let label = format!("{} {}", self.config.labels.bullet, label);
        canvas.draw(&label, MARGIN + ITEM_INDENT, size, bold);
        let amount = format_money(amount, self.config.thousands_separator);
        canvas.draw_right(&amount, canvas.width - MARGIN, size, bold);
        canvas.down(16.0);
    }

    fn lay_out(&self, canvas: &mut Canvas<'_>, input: &ReceiptInput) {
        let labels = &self.config.labels;
        let payee = &self.config.payee;
        let money = |amount: u64| format_money(amount, self.config.thousands_separator);
        let bill = input.bill();

        let period_caption = input
            .period_caption
            .clone()
            .unwrap_or_else(|| labels.month_caption(input.period));
        let room_caption = input
            .room_caption
            .clone()
            .unwrap_or_else(|| labels.room_caption(&input.room_code));

        // Header
        canvas.center(&self.config.title, 18.0, true);
        canvas.center(&period_caption, 10.0, false);
        canvas.down(4.0);
        canvas.center(&room_caption, 12.0, true);
        canvas.down(14.0);

        // Readings, one column per meter
        let left_x = MARGIN;
        let right_x = canvas.width / 2.0 + COLUMN_GAP;
        canvas.draw(&labels.electricity_heading, left_x, 11.0, true);
        canvas.draw(&labels.water_heading, right_x, 11.0, true);
        canvas.down(18.0);

        let rows = [
            (&labels.elec_new, bill.elec_new, &labels.water_new, bill.water_new, 16.0),
            (&labels.elec_old, bill.elec_old, &labels.water_old, bill.water_old, 16.0),
            (&labels.consumption, bill.elec_total, &labels.consumption, bill.water_total, 26.0),
        ];
        for (elec_label, elec_value, water_label, water_value, advance) in rows {
            for (x, label, value) in [(left_x, elec_label, elec_value), (right_x, water_label, water_value)] {
                canvas.draw(label, x, 10.0, false);
                canvas.draw(&format!(":  {}", value), x + VALUE_OFFSET, 10.0, false);
            }
            canvas.down(advance);
        }

        // Charges
        canvas.draw(&labels.charges_heading, MARGIN, 11.0, true);
        canvas.down(18.0);

        self.item(canvas, &labels.rent, bill.rent, false);
        self.item(
            canvas,
            &format!("{}  ({} x {})", labels.electricity, bill.elec_total, money(bill.elec_price)),
            bill.elec_cost,
            false,
        );
        self.item(
            canvas,
            &format!("{}  ({} x {})", labels.water, bill.water_total, money(bill.water_price)),
            bill.water_cost,
            false,
        );
        self.item(canvas, &labels.trash_security, bill.trash_security, false);
        canvas.down(6.0);
        self.item(canvas, &labels.total, bill.total, true);

        // Bank transfer
        canvas.down(24.0);
        canvas.center(&labels.payment_heading, 12.0, true);
        canvas.down(16.0);
        canvas.center(&format!("{}: {}", labels.account_number, payee.account_number), 10.0, true);
        canvas.down(14.0);
        canvas.center(&format!("{}: {}", labels.account_name, payee.account_name), 10.0, true);
        canvas.down(14.0);
        canvas.center(&format!("{}: {}", labels.bank_name, payee.bank_name), 10.0, true);

        // Unit prices
        canvas.down(20.0);
        canvas.draw(
            &format!("{}: {} / 1 {}", labels.elec_price, money(bill.elec_price), labels.elec_unit),
            MARGIN,
            9.0,
            false,
        );
        canvas.down(14.0);
        canvas.draw(
            &format!("{}: {} / 1 {}", labels.water_price, money(bill.water_price), labels.water_unit),
            MARGIN,
            9.0,
            false,
        );
    }
}
