//! Reading records and the suggestions derived from them.

use crate::billing::{MeterReadings, UnitPrices};
use crate::error::{Error, ReadingField, Result};
use crate::period::Period;
use crate::room::RoomId;
use serde::{Deserialize, Serialize};

/// Meter readings and unit prices captured for one room-month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReading {
    /// Opening electricity reading
    pub elec_old: u64,
    /// Closing electricity reading
    pub elec_new: u64,
    /// Opening water reading
    pub water_old: u64,
    /// Closing water reading
    pub water_new: u64,
    /// Electricity price per kWh for this month
    pub elec_price: u64,
    /// Water price per unit for this month
    pub water_price: u64,
}

impl MonthlyReading {
    /// Create a monthly reading.
    pub fn new(
        elec_old: u64,
        elec_new: u64,
        water_old: u64,
        water_new: u64,
        elec_price: u64,
        water_price: u64,
    ) -> Self {
        Self {
            elec_old,
            elec_new,
            water_old,
            water_new,
            elec_price,
            water_price,
        }
    }

    /// Assemble a reading from bill inputs.
    pub fn from_parts(readings: MeterReadings, prices: UnitPrices) -> Self {
        Self::new(
            readings.elec_old,
            readings.elec_new,
            readings.water_old,
            readings.water_new,
            prices.elec,
            prices.water,
        )
    }

    /// Check that neither meter runs backwards.
    pub fn validate(&self) -> Result<()> {
        if self.elec_new < self.elec_old {
            return Err(Error::Validation {
                field: ReadingField::Electricity,
                old: self.elec_old,
                new: self.elec_new,
            });
        }
        if self.water_new < self.water_old {
            return Err(Error::Validation {
                field: ReadingField::Water,
                old: self.water_old,
                new: self.water_new,
            });
        }
        Ok(())
    }

    /// The meter values as bill inputs.
    pub fn readings(&self) -> MeterReadings {
        MeterReadings::new(self.elec_old, self.elec_new, self.water_old, self.water_new)
    }

    /// The unit prices as bill inputs.
    pub fn prices(&self) -> UnitPrices {
        UnitPrices::new(self.elec_price, self.water_price)
    }
}

/// A persisted reading, keyed by `(room_id, period)`.
///
/// Serializes to the flat layout of the key-value store:
/// `{"roomId": .., "month": "2024-03", "elec_old": .., ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRecord {
    /// Owning room
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
    /// Billing month
    #[serde(rename = "month")]
    pub period: Period,
    /// Readings and prices
    #[serde(flatten)]
    pub reading: MonthlyReading,
}

impl ReadingRecord {
    /// Create a record.
    pub fn new(room_id: RoomId, period: Period, reading: MonthlyReading) -> Self {
        Self {
            room_id,
            period,
            reading,
        }
    }

    /// Composite key of this record.
    pub fn key(&self) -> (RoomId, Period) {
        (self.room_id, self.period)
    }
}

/// Values carried from the latest earlier month into a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarryForward {
    /// Month the values come from
    pub from: Period,
    /// Previous closing electricity reading
    pub elec_old: u64,
    /// Previous closing water reading
    pub water_old: u64,
    /// Previous electricity price
    pub elec_price: u64,
    /// Previous water price
    pub water_price: u64,
}

impl CarryForward {
    pub(crate) fn from_record(record: &ReadingRecord) -> Self {
        Self {
            from: record.period,
            elec_old: record.reading.elec_new,
            water_old: record.reading.water_new,
            elec_price: record.reading.elec_price,
            water_price: record.reading.water_price,
        }
    }
}

/// Where the values of a [`ReadingDraft`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSource {
    /// A record for this exact month already exists
    Existing,
    /// Opening readings and prices carried from an earlier month
    CarriedForward(Period),
    /// No history; zero opening readings and default prices
    Fresh,
}

/// Pre-filled form values for a room-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingDraft {
    /// Opening electricity reading
    pub elec_old: u64,
    /// Closing electricity reading, if already recorded
    pub elec_new: Option<u64>,
    /// Opening water reading
    pub water_old: u64,
    /// Closing water reading, if already recorded
    pub water_new: Option<u64>,
    /// Electricity unit price
    pub elec_price: u64,
    /// Water unit price
    pub water_price: u64,
    /// Origin of these values
    pub source: DraftSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok_when_equal() {
        assert!(MonthlyReading::new(5, 5, 3, 3, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_electricity_first() {
        let err = MonthlyReading::new(20, 10, 9, 3, 1, 1).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: ReadingField::Electricity,
                old: 20,
                new: 10
            }
        ));
    }

    #[test]
    fn test_validate_water() {
        let err = MonthlyReading::new(1, 2, 9, 3, 1, 1).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: ReadingField::Water,
                ..
            }
        ));
    }

    #[test]
    fn test_record_json_layout() {
        let id = RoomId::new();
        let record = ReadingRecord::new(
            id,
            "2024-03".parse().unwrap(),
            MonthlyReading::new(100, 150, 10, 15, 3_500, 14_000),
        );
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["roomId"], serde_json::json!(id.to_string()));
        assert_eq!(value["month"], "2024-03");
        assert_eq!(value["elec_new"], 150);
        assert_eq!(value["water_price"], 14_000);

        let back: ReadingRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
