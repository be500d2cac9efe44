//! What a receipt is printed from.

use crate::billing::{compute_bill, BillBreakdown, FixedFees, MeterReadings, UnitPrices};
use crate::ledger::MonthlyReading;
use crate::period::Period;
use crate::room::Room;

/// Everything one receipt needs besides fonts and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptInput {
    /// Room code, used in the file name and default caption
    pub room_code: String,
    /// Billing month
    pub period: Period,
    /// Meter readings
    pub readings: MeterReadings,
    /// Unit prices
    pub prices: UnitPrices,
    /// Fixed fees
    pub fees: FixedFees,
    /// Caption replacing the configured room caption
    pub room_caption: Option<String>,
    /// Caption replacing the configured month caption
    pub period_caption: Option<String>,
}

impl ReceiptInput {
    /// Create an input from typed values.
    pub fn new(
        room_code: impl Into<String>,
        period: Period,
        readings: MeterReadings,
        prices: UnitPrices,
        fees: FixedFees,
    ) -> Self {
        Self {
            room_code: room_code.into(),
            period,
            readings,
            prices,
            fees,
            room_caption: None,
            period_caption: None,
        }
    }

    /// Input for a room's reading in `period`.
    pub fn for_room(room: &Room, period: Period, reading: &MonthlyReading) -> Self {
        Self::new(
            room.code.clone(),
            period,
            reading.readings(),
            reading.prices(),
            FixedFees::new(room.rent, room.trash_security),
        )
    }

    /// Override the room caption.
    pub fn with_room_caption(mut self, caption: impl Into<String>) -> Self {
        self.room_caption = Some(caption.into());
        self
    }

    /// Override the month caption.
    pub fn with_period_caption(mut self, caption: impl Into<String>) -> Self {
        self.period_caption = Some(caption.into());
        self
    }

    /// The bill this receipt prints.
    pub fn bill(&self) -> BillBreakdown {
        compute_bill(&self.readings, &self.prices, &self.fees)
    }

    /// Conventional download name of this receipt.
    pub fn file_name(&self) -> String {
        receipt_file_name(&self.room_code, self.period)
    }
}

/// Conventional receipt file name, e.g. `Receipt_Room01_2024-03.pdf`.
pub fn receipt_file_name(room_code: &str, period: Period) -> String {
    format!("Receipt_Room{}_{}.pdf", room_code, period)
}
