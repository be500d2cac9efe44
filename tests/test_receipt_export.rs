//! Integration tests for the export session: fonts, document, ledger, store.

mod common;

use rent_receipt::fonts::{DirectoryFontSource, StaticFontSource};
use rent_receipt::ledger::{DraftSource, JsonFileStore, MemoryStore, ReadingStore};
use rent_receipt::receipt::ReceiptExporter;
use rent_receipt::{Error, MonthlyReading, Period, ReadingLedger, ReceiptConfig, Room};

fn p(s: &str) -> Period {
    s.parse().unwrap()
}

fn font_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let fonts = dir.path().join("fonts");
    std::fs::create_dir(&fonts).unwrap();
    std::fs::write(fonts.join("NotoSans-Regular.ttf"), common::truetype_font("Test-Regular", 500))
        .unwrap();
    std::fs::write(fonts.join("NotoSans-Bold.ttf"), common::truetype_font("Test-Bold", 550)).unwrap();
    dir
}

/// Two consecutive months: the second starts from the first's closing readings.
#[tokio::test]
async fn test_two_month_export_with_carry_forward() {
    common::init_logging();
    let fonts = font_dir();
    let data = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(data.path().join("readings.json"));
    let config = ReceiptConfig::default();
    let defaults = config.default_prices;

    let mut ledger = ReadingLedger::from_records(store.load_all().unwrap());
    let mut exporter = ReceiptExporter::new(DirectoryFontSource::new(fonts.path()), store, config);
    let room = Room::new("01", 3_500_000, 30_000);

    let draft = ledger.draft(room.id, p("2024-02"), defaults);
    assert_eq!(draft.source, DraftSource::Fresh);
    let february = MonthlyReading::new(
        draft.elec_old,
        100,
        draft.water_old,
        10,
        draft.elec_price,
        draft.water_price,
    );
    exporter.export(&mut ledger, &room, p("2024-02"), february).await.unwrap();

    let draft = ledger.draft(room.id, p("2024-03"), defaults);
    assert_eq!(draft.source, DraftSource::CarriedForward(p("2024-02")));
    let march = MonthlyReading::new(draft.elec_old, 150, draft.water_old, 15, 3_500, 14_000);
    let receipt = exporter.export(&mut ledger, &room, p("2024-03"), march).await.unwrap();

    assert_eq!(receipt.file_name, "Receipt_Room01_2024-03.pdf");
    assert_eq!(receipt.bill.elec_total, 50);
    assert_eq!(receipt.bill.water_total, 5);
    assert_eq!(receipt.bill.total, 3_775_000);
    assert!(receipt.bytes.starts_with(b"%PDF-"));

    let persisted = exporter.store().load_all().unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(ReadingLedger::from_records(persisted).records(), ledger.records());
}

/// Re-exporting the same month replaces its record.
#[tokio::test]
async fn test_reexport_replaces_record() {
    let mut source = StaticFontSource::new();
    let config = ReceiptConfig::default();
    source
        .insert(config.regular_font.clone(), common::truetype_font("Test-Regular", 500))
        .insert(config.bold_font.clone(), common::truetype_font("Test-Bold", 550));
    let mut exporter = ReceiptExporter::new(source, MemoryStore::new(), config);
    let mut ledger = ReadingLedger::new();
    let room = Room::new("07", 2_800_000, 20_000);

    let first = MonthlyReading::new(0, 40, 0, 4, 3_500, 14_000);
    let corrected = MonthlyReading::new(0, 45, 0, 4, 3_500, 14_000);
    exporter.export(&mut ledger, &room, p("2024-05"), first).await.unwrap();
    let receipt = exporter.export(&mut ledger, &room, p("2024-05"), corrected).await.unwrap();

    assert_eq!(receipt.bill.elec_cost, 45 * 3_500);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.get(room.id, p("2024-05")).map(|r| r.reading), Some(corrected));
    assert_eq!(exporter.store().save_count(), 2);
}

/// A font directory serving HTML aborts the export before anything is saved.
#[tokio::test]
async fn test_bad_font_aborts_export() {
    let dir = tempfile::tempdir().unwrap();
    let fonts = dir.path().join("fonts");
    std::fs::create_dir(&fonts).unwrap();
    std::fs::write(fonts.join("NotoSans-Regular.ttf"), common::truetype_font("Test-Regular", 500))
        .unwrap();
    std::fs::write(fonts.join("NotoSans-Bold.ttf"), b"<html><body>Not Found</body></html>").unwrap();

    let mut exporter = ReceiptExporter::new(
        DirectoryFontSource::new(dir.path()),
        MemoryStore::new(),
        ReceiptConfig::default(),
    );
    let mut ledger = ReadingLedger::new();
    let room = Room::new("01", 0, 0);

    let err = exporter
        .export(&mut ledger, &room, p("2024-03"), MonthlyReading::new(0, 1, 0, 1, 1, 1))
        .await
        .unwrap_err();
    match &err {
        Error::FontFormat { asset, signature, .. } => {
            assert_eq!(asset, "fonts/NotoSans-Bold.ttf");
            assert_eq!(signature, "3c 68 74 6d");
        },
        other => panic!("unexpected error: {}", other),
    }
    assert!(ledger.is_empty());
    assert_eq!(exporter.store().save_count(), 0);
}
