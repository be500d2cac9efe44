//! Configuration for receipt generation.
//!
//! [`ReceiptConfig`] can be built in code with the `with_*` methods or
//! deserialized from JSON; every field is optional in JSON and falls back
//! to its default.

use crate::billing::{UnitPrices, DEFAULT_THOUSANDS_SEPARATOR};
use crate::error::{Error, Result};
use crate::writer::PdfWriterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default regular-weight font asset.
pub const DEFAULT_REGULAR_FONT: &str = "fonts/NotoSans-Regular.ttf";
/// Default bold-weight font asset.
pub const DEFAULT_BOLD_FONT: &str = "fonts/NotoSans-Bold.ttf";

/// Bank transfer details printed in the payment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayeeDetails {
    /// Account number
    pub account_number: String,
    /// Account holder name
    pub account_name: String,
    /// Bank name
    pub bank_name: String,
}

impl PayeeDetails {
    /// Create payee details.
    pub fn new(
        account_number: impl Into<String>,
        account_name: impl Into<String>,
        bank_name: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            account_name: account_name.into(),
            bank_name: bank_name.into(),
        }
    }
}

/// Fixed wording printed on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptLabels {
    /// Word before the month caption
    pub month_prefix: String,
    /// Text between month and year in the month caption, spaces included
    pub month_year_separator: String,
    /// Word before the room code
    pub room_prefix: String,
    /// Electricity column heading
    pub electricity_heading: String,
    /// Water column heading
    pub water_heading: String,
    /// Closing electricity reading
    pub elec_new: String,
    /// Opening electricity reading
    pub elec_old: String,
    /// Closing water reading
    pub water_new: String,
    /// Opening water reading
    pub water_old: String,
    /// Consumption row, both columns
    pub consumption: String,
    /// Heading above the charge lines
    pub charges_heading: String,
    /// Rent charge
    pub rent: String,
    /// Electricity charge
    pub electricity: String,
    /// Water charge
    pub water: String,
    /// Trash/security charge
    pub trash_security: String,
    /// Emphasized total line
    pub total: String,
    /// Heading of the bank transfer block
    pub payment_heading: String,
    /// Account number line
    pub account_number: String,
    /// Account holder line
    pub account_name: String,
    /// Bank line
    pub bank_name: String,
    /// Electricity price footer
    pub elec_price: String,
    /// Electricity unit
    pub elec_unit: String,
    /// Water price footer
    pub water_price: String,
    /// Water unit
    pub water_unit: String,
    /// Marker drawn before each charge line
    pub bullet: String,
}

impl Default for ReceiptLabels {
    fn default() -> Self {
        Self {
            month_prefix: "Month".to_string(),
            month_year_separator: " / ".to_string(),
            room_prefix: "Room".to_string(),
            electricity_heading: "ELECTRICITY:".to_string(),
            water_heading: "WATER:".to_string(),
            elec_new: "New reading".to_string(),
            elec_old: "Old reading".to_string(),
            water_new: "New reading".to_string(),
            water_old: "Old reading".to_string(),
            consumption: "Total".to_string(),
            charges_heading: "CHARGES".to_string(),
            rent: "Room rent".to_string(),
            electricity: "Electricity".to_string(),
            water: "Water".to_string(),
            trash_security: "Trash + security".to_string(),
            total: "Total due".to_string(),
            payment_heading: "BANK TRANSFER DETAILS".to_string(),
            account_number: "Account number".to_string(),
            account_name: "Account name".to_string(),
            bank_name: "Bank".to_string(),
            elec_price: "Electricity price".to_string(),
            elec_unit: "kWh".to_string(),
            water_price: "Water price".to_string(),
            water_unit: "unit".to_string(),
            bullet: "\u{203A}".to_string(),
        }
    }
}

impl ReceiptLabels {
    /// Vietnamese wording.
    pub fn vietnamese() -> Self {
        Self {
            month_prefix: "Tháng".to_string(),
            month_year_separator: " năm ".to_string(),
            room_prefix: "Phòng".to_string(),
            electricity_heading: "ĐIỆN:".to_string(),
            water_heading: "NƯỚC:".to_string(),
            elec_new: "Số điện mới".to_string(),
            elec_old: "Số điện cũ".to_string(),
            water_new: "Số nước mới".to_string(),
            water_old: "Số nước cũ".to_string(),
            consumption: "Tổng".to_string(),
            charges_heading: "CHI PHÍ THANH TOÁN".to_string(),
            rent: "Tiền phòng".to_string(),
            electricity: "Tiền điện".to_string(),
            water: "Tiền nước".to_string(),
            trash_security: "Tiền rác + an ninh".to_string(),
            total: "Tổng cộng".to_string(),
            payment_heading: "THÔNG TIN CHUYỂN KHOẢN".to_string(),
            account_number: "Số tài khoản".to_string(),
            account_name: "Tên tài khoản".to_string(),
            bank_name: "Ngân hàng".to_string(),
            elec_price: "Giá điện".to_string(),
            elec_unit: "kWh".to_string(),
            water_price: "Giá nước".to_string(),
            water_unit: "số".to_string(),
            bullet: "\u{203A}".to_string(),
        }
    }

    /// Caption under the title, e.g. "Month 03 / 2024".
    pub fn month_caption(&self, period: crate::period::Period) -> String {
        format!(
            "{} {:02}{}{}",
            self.month_prefix,
            period.month(),
            self.month_year_separator,
            period.year()
        )
    }

    /// Room caption, e.g. "Room: 01".
    pub fn room_caption(&self, code: &str) -> String {
        format!("{}: {}", self.room_prefix, code)
    }
}

/// Receipt generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Receipt title, also used as the PDF title
    pub title: String,
    /// Regular-weight font asset id
    pub regular_font: String,
    /// Bold-weight font asset id
    pub bold_font: String,
    /// Bank transfer details
    pub payee: PayeeDetails,
    /// Printed wording
    pub labels: ReceiptLabels,
    /// Digit-group separator for currency
    pub thousands_separator: char,
    /// Prices suggested for a room's first recorded period
    pub default_prices: UnitPrices,
    /// Whether to compress PDF streams
    pub compress: bool,
    /// PDF creator string
    pub creator: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            title: "PAYMENT NOTICE".to_string(),
            regular_font: DEFAULT_REGULAR_FONT.to_string(),
            bold_font: DEFAULT_BOLD_FONT.to_string(),
            payee: PayeeDetails::default(),
            labels: ReceiptLabels::default(),
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
            default_prices: UnitPrices::new(3_500, 14_000),
            compress: true,
            creator: concat!("rent_receipt ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ReceiptConfig {
    /// Create configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with Vietnamese wording.
    pub fn vietnamese() -> Self {
        Self {
            title: "GIẤY BÁO THU TIỀN".to_string(),
            labels: ReceiptLabels::vietnamese(),
            ..Self::default()
        }
    }

    /// Set the receipt title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set both font asset ids.
    pub fn with_fonts(mut self, regular: impl Into<String>, bold: impl Into<String>) -> Self {
        self.regular_font = regular.into();
        self.bold_font = bold.into();
        self
    }

    /// Set the bank transfer details.
    pub fn with_payee(mut self, payee: PayeeDetails) -> Self {
        self.payee = payee;
        self
    }

    /// Set the printed wording.
    pub fn with_labels(mut self, labels: ReceiptLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the digit-group separator.
    pub fn with_thousands_separator(mut self, separator: char) -> Self {
        self.thousands_separator = separator;
        self
    }

    /// Set first-period default prices.
    pub fn with_default_prices(mut self, prices: UnitPrices) -> Self {
        self.default_prices = prices;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the PDF creator string.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Parse configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded receipt config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.regular_font.trim().is_empty() || self.bold_font.trim().is_empty() {
            return Err(Error::Config("font asset ids must not be empty".to_string()));
        }
        if self.thousands_separator.is_ascii_digit() {
            return Err(Error::Config(format!(
                "thousands separator '{}' must not be a digit",
                self.thousands_separator
            )));
        }
        Ok(())
    }

    /// Writer settings for a receipt document.
    pub fn writer_config(&self) -> PdfWriterConfig {
        PdfWriterConfig::default()
            .with_title(self.title.clone())
            .with_creator(self.creator.clone())
            .with_compress(self.compress)
    }
}
