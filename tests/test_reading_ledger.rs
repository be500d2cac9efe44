//! Integration tests for the reading ledger and its stores.
//!
//! These tests verify:
//! - carry-forward across months and gaps
//! - rejected writes leave the ledger untouched
//! - persistence through the JSON file store
//! - room removal cascading to readings

mod common;

use proptest::prelude::*;
use rent_receipt::ledger::{DraftSource, JsonFileStore, MemoryStore, ReadingStore};
use rent_receipt::{
    Error, MonthlyReading, Period, ReadingField, ReadingLedger, RoomCatalog, RoomId, UnitPrices,
};

fn p(s: &str) -> Period {
    s.parse().unwrap()
}

fn reading(elec_old: u64, elec_new: u64, water_old: u64, water_new: u64) -> MonthlyReading {
    MonthlyReading::new(elec_old, elec_new, water_old, water_new, 3_500, 14_000)
}

/// latest_before over three consecutive months.
#[test]
fn test_latest_before_three_months() {
    common::init_logging();
    let mut ledger = ReadingLedger::new();
    let room = RoomId::new();
    // written out of order on purpose
    ledger.upsert(room, p("2024-03"), reading(20, 30, 2, 3)).unwrap();
    ledger.upsert(room, p("2024-01"), reading(0, 10, 0, 1)).unwrap();
    ledger.upsert(room, p("2024-02"), reading(10, 20, 1, 2)).unwrap();

    let prev = ledger.latest_before(room, p("2024-03")).unwrap();
    assert_eq!(prev.period, p("2024-02"));
    assert!(ledger.latest_before(room, p("2024-01")).is_none());
}

/// Carry-forward skips missing months and ignores other rooms.
#[test]
fn test_carry_forward_across_gap() {
    let mut ledger = ReadingLedger::new();
    let room = RoomId::new();
    let other = RoomId::new();
    ledger
        .upsert(room, p("2023-11"), MonthlyReading::new(500, 620, 40, 47, 3_800, 15_000))
        .unwrap();
    ledger.upsert(other, p("2024-01"), reading(0, 999, 0, 99)).unwrap();

    let carry = ledger.carry_forward(room, p("2024-02")).unwrap();
    assert_eq!(carry.from, p("2023-11"));
    assert_eq!(carry.elec_old, 620);
    assert_eq!(carry.water_old, 47);
    assert_eq!((carry.elec_price, carry.water_price), (3_800, 15_000));

    let draft = ledger.draft(room, p("2024-02"), UnitPrices::new(3_500, 14_000));
    assert_eq!(draft.source, DraftSource::CarriedForward(p("2023-11")));
    assert_eq!(draft.elec_new, None);
}

/// A room without history starts from zero with default prices.
#[test]
fn test_fresh_draft_uses_defaults() {
    let ledger = ReadingLedger::new();
    let draft = ledger.draft(RoomId::new(), p("2024-02"), UnitPrices::new(3_500, 14_000));
    assert_eq!(draft.source, DraftSource::Fresh);
    assert_eq!((draft.elec_old, draft.water_old), (0, 0));
    assert_eq!((draft.elec_price, draft.water_price), (3_500, 14_000));
}

/// elec_new below elec_old is rejected without changing anything.
#[test]
fn test_backwards_meter_rejected() {
    let mut ledger = ReadingLedger::new();
    let room = RoomId::new();
    ledger.upsert(room, p("2024-01"), reading(0, 20, 0, 5)).unwrap();
    let before = ledger.records();

    let err = ledger.upsert(room, p("2024-01"), reading(20, 10, 0, 5)).unwrap_err();
    match err {
        Error::Validation { field, old, new } => {
            assert_eq!(field, ReadingField::Electricity);
            assert_eq!((old, new), (20, 10));
        },
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(ledger.records(), before);

    let err = ledger.upsert(room, p("2024-02"), reading(20, 30, 9, 3)).unwrap_err();
    assert!(err.to_string().contains("water_new < water_old"));
    assert_eq!(ledger.len(), 1);
}

/// Records survive a round trip through the JSON file store.
#[test]
fn test_json_store_round_trip() {
    common::init_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("readings.json"));
    assert!(store.load_all().unwrap().is_empty());

    let room = RoomId::new();
    let mut ledger = ReadingLedger::from_records(store.load_all().unwrap());
    let records = ledger.upsert(room, p("2024-01"), reading(0, 10, 0, 1)).unwrap();
    store.save_all(&records).unwrap();
    let records = ledger.upsert(room, p("2024-02"), reading(10, 25, 1, 4)).unwrap();
    store.save_all(&records).unwrap();

    let reloaded = ReadingLedger::from_records(store.load_all().unwrap());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get(room, p("2024-02")).map(|r| r.reading.elec_new), Some(25));
    assert_eq!(reloaded.carry_forward(room, p("2024-03")).map(|c| c.elec_old), Some(25));

    let json = std::fs::read_to_string(store.path()).unwrap();
    assert!(json.contains("\"roomId\""));
    assert!(json.contains("\"month\": \"2024-02\""));
}

/// The memory store keeps the latest full set.
#[test]
fn test_memory_store_replaces_collection() {
    let mut store = MemoryStore::new();
    let mut ledger = ReadingLedger::new();
    let room = RoomId::new();

    let records = ledger.upsert(room, p("2024-01"), reading(0, 10, 0, 1)).unwrap();
    store.save_all(&records).unwrap();
    let records = ledger.upsert(room, p("2024-01"), reading(0, 12, 0, 1)).unwrap();
    store.save_all(&records).unwrap();

    let stored = store.load_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].reading.elec_new, 12);
    assert_eq!(store.save_count(), 2);
}

/// Removing a room from the catalog drops its readings only.
#[test]
fn test_room_removal_cascades() {
    let mut catalog = RoomCatalog::new();
    let mut ledger = ReadingLedger::new();
    let a = catalog.add("01", 3_000_000, 30_000).unwrap().id;
    let b = catalog.add("02", 3_200_000, 30_000).unwrap().id;

    ledger.upsert(a, p("2024-01"), reading(0, 10, 0, 1)).unwrap();
    ledger.upsert(a, p("2024-02"), reading(10, 20, 1, 2)).unwrap();
    ledger.upsert(b, p("2024-01"), reading(0, 5, 0, 1)).unwrap();

    let removed = catalog.remove(a, &mut ledger).unwrap();
    assert_eq!(removed.code, "01");
    assert!(ledger.history(a).is_empty());
    assert_eq!(ledger.history(b).len(), 1);
    assert!(matches!(catalog.remove(a, &mut ledger), Err(Error::UnknownRoom(_))));
}

fn arb_reading() -> impl Strategy<Value = MonthlyReading> {
    (0u64..100_000, 0u64..10_000, 0u64..100_000, 0u64..10_000, 0u64..10_000, 0u64..50_000).prop_map(
        |(elec_old, elec_used, water_old, water_used, elec_price, water_price)| {
            MonthlyReading::new(
                elec_old,
                elec_old + elec_used,
                water_old,
                water_old + water_used,
                elec_price,
                water_price,
            )
        },
    )
}

proptest! {
    /// Writing the same record twice leaves the same ledger as writing it once.
    #[test]
    fn prop_upsert_idempotent(year in 2000i32..2100, month in 1u32..=12, r in arb_reading()) {
        let period = Period::new(year, month).unwrap();
        let room = RoomId::new();
        let mut ledger = ReadingLedger::new();

        let once = ledger.upsert(room, period, r).unwrap();
        let twice = ledger.upsert(room, period, r).unwrap();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(ledger.len(), 1);
    }

    /// Carry-forward always comes from the closest earlier month.
    #[test]
    fn prop_carry_forward_is_latest_earlier(months in proptest::collection::btree_set(1u32..=12, 1..12)) {
        let room = RoomId::new();
        let mut ledger = ReadingLedger::new();
        for &m in &months {
            let value = u64::from(m) * 10;
            ledger.upsert(room, Period::new(2024, m).unwrap(), reading(value, value + 5, 0, 1)).unwrap();
        }
        let query = Period::new(2025, 1).unwrap();
        let last = *months.iter().next_back().unwrap();
        let carry = ledger.carry_forward(room, query).unwrap();
        prop_assert_eq!(carry.from, Period::new(2024, last).unwrap());
        prop_assert_eq!(carry.elec_old, u64::from(last) * 10 + 5);
    }
}
