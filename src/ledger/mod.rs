//! Per-room monthly reading ledger.
//!
//! The ledger holds at most one [`ReadingRecord`] per `(room, period)`.
//! Writes replace whole records; queries derive ordering from [`Period`]
//! values, never from storage order.
//!
//! ## Persistence
//!
//! The ledger never touches storage. A [`ReadingStore`] hands it the
//! persisted records at start ([`ReadingLedger::from_records`]) and receives
//! the full updated set after each write:
//!
//! ```ignore
//! let mut ledger = ReadingLedger::from_records(store.load_all()?);
//! let records = ledger.upsert(room_id, period, reading)?;
//! store.save_all(&records)?;
//! ```

mod record;
mod store;

pub use record::{CarryForward, DraftSource, MonthlyReading, ReadingDraft, ReadingRecord};
pub use store::{JsonFileStore, MemoryStore, ReadingStore};

use crate::billing::UnitPrices;
use crate::error::Result;
use crate::period::Period;
use crate::room::RoomId;
use indexmap::IndexMap;

/// Collection of reading records keyed by room and period.
#[derive(Debug, Clone, Default)]
pub struct ReadingLedger {
    records: IndexMap<(RoomId, Period), ReadingRecord>,
}

impl ReadingLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from persisted records.
    ///
    /// A later duplicate of the same key replaces an earlier one. Records
    /// that violate the reading invariant are kept (they were accepted by
    /// some earlier writer) but logged.
    pub fn from_records(records: impl IntoIterator<Item = ReadingRecord>) -> Self {
        let mut map = IndexMap::new();
        for record in records {
            if let Err(e) = record.reading.validate() {
                log::warn!(
                    "Loaded inconsistent reading for room {} {}: {}",
                    record.room_id,
                    record.period,
                    e
                );
            }
            map.insert(record.key(), record);
        }
        Self { records: map }
    }

    /// Insert or replace the record for `(room_id, period)`.
    ///
    /// Fails without touching the ledger when either meter runs backwards.
    /// Returns the full updated record set for the persistence collaborator.
    pub fn upsert(
        &mut self,
        room_id: RoomId,
        period: Period,
        reading: MonthlyReading,
    ) -> Result<Vec<ReadingRecord>> {
        reading.validate()?;

        let record = ReadingRecord::new(room_id, period, reading);
        let replaced = self.records.insert(record.key(), record).is_some();
        log::debug!(
            "{} reading for room {} {}",
            if replaced { "Replaced" } else { "Added" },
            room_id,
            period
        );

        Ok(self.records())
    }

    /// The record for exactly `(room_id, period)`.
    pub fn get(&self, room_id: RoomId, period: Period) -> Option<&ReadingRecord> {
        self.records.get(&(room_id, period))
    }

    /// The room's record with the greatest period strictly before `period`.
    pub fn latest_before(&self, room_id: RoomId, period: Period) -> Option<&ReadingRecord> {
        self.records
            .values()
            .filter(|r| r.room_id == room_id && r.period < period)
            .max_by_key(|r| r.period)
    }

    /// Opening readings and prices inherited from the latest earlier month.
    pub fn carry_forward(&self, room_id: RoomId, period: Period) -> Option<CarryForward> {
        self.latest_before(room_id, period)
            .map(CarryForward::from_record)
    }

    /// Values a form for `(room_id, period)` should start from.
    ///
    /// An existing record for the month wins; otherwise the closing readings
    /// and prices of the latest earlier month carry forward; otherwise the
    /// opening readings are zero and `default_prices` apply.
    pub fn draft(&self, room_id: RoomId, period: Period, default_prices: UnitPrices) -> ReadingDraft {
        if let Some(existing) = self.get(room_id, period) {
            let r = existing.reading;
            return ReadingDraft {
                elec_old: r.elec_old,
                elec_new: Some(r.elec_new),
                water_old: r.water_old,
                water_new: Some(r.water_new),
                elec_price: r.elec_price,
                water_price: r.water_price,
                source: DraftSource::Existing,
            };
        }

        match self.carry_forward(room_id, period) {
            Some(carry) => ReadingDraft {
                elec_old: carry.elec_old,
                elec_new: None,
                water_old: carry.water_old,
                water_new: None,
                elec_price: carry.elec_price,
                water_price: carry.water_price,
                source: DraftSource::CarriedForward(carry.from),
            },
            None => ReadingDraft {
                elec_old: 0,
                elec_new: None,
                water_old: 0,
                water_new: None,
                elec_price: default_prices.elec,
                water_price: default_prices.water,
                source: DraftSource::Fresh,
            },
        }
    }

    /// The room's records in period order.
    pub fn history(&self, room_id: RoomId) -> Vec<&ReadingRecord> {
        let mut history: Vec<_> = self
            .records
            .values()
            .filter(|r| r.room_id == room_id)
            .collect();
        history.sort_by_key(|r| r.period);
        history
    }

    /// Delete every record of a room. Returns how many were removed.
    pub fn remove_room(&mut self, room_id: RoomId) -> usize {
        let before = self.records.len();
        self.records.retain(|(id, _), _| *id != room_id);
        before - self.records.len()
    }

    /// Snapshot of all records in storage order.
    pub fn records(&self) -> Vec<ReadingRecord> {
        self.records.values().copied().collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
