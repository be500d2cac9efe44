//! Integration tests for bill computation.

use proptest::prelude::*;
use rent_receipt::billing::{format_money, RawBillInput};
use rent_receipt::{compute_bill, FixedFees, MeterReadings, UnitPrices};

/// The worked example: one month of a typical room.
#[test]
fn test_end_to_end_example() {
    let bill = compute_bill(
        &MeterReadings::new(100, 150, 10, 15),
        &UnitPrices::new(3_500, 14_000),
        &FixedFees::new(3_500_000, 30_000),
    );

    assert_eq!(bill.elec_total, 50);
    assert_eq!(bill.elec_cost, 175_000);
    assert_eq!(bill.water_total, 5);
    assert_eq!(bill.water_cost, 70_000);
    assert_eq!(bill.total, 3_775_000);
    assert_eq!(format_money(bill.total, '.'), "3.775.000");
}

/// Raw form text with garbage and fractions.
#[test]
fn test_raw_form_input() {
    let raw = RawBillInput {
        elec_old: "100",
        elec_new: "150.9",
        water_old: "abc",
        water_new: " 15 ",
        elec_price: "3500",
        water_price: "",
        rent: "3500000",
        trash_security: "-30000",
    };
    let bill = raw.compute();

    assert_eq!(bill.elec_new, 150);
    assert_eq!(bill.elec_total, 50);
    assert_eq!(bill.water_old, 0);
    assert_eq!(bill.water_total, 15);
    assert_eq!(bill.water_cost, 0);
    assert_eq!(bill.trash_security, 0);
    assert_eq!(bill.total, 3_500_000 + 175_000);
}

/// Non-finite floats coerce to zero.
#[test]
fn test_non_finite_input() {
    let raw = RawBillInput {
        elec_old: f64::NAN,
        elec_new: f64::INFINITY,
        water_old: 0.0,
        water_new: 7.99,
        elec_price: 3_500.0,
        water_price: 14_000.0,
        rent: f64::NEG_INFINITY,
        trash_security: 30_000.0,
    };
    let bill = raw.compute();
    assert_eq!(bill.elec_total, 0);
    assert_eq!(bill.water_total, 7);
    assert_eq!(bill.total, 7 * 14_000 + 30_000);
}

proptest! {
    /// Totals are exactly the sum of their parts.
    #[test]
    fn prop_total_is_sum(
        elec_old in 0u64..1_000_000,
        elec_new in 0u64..1_000_000,
        water_old in 0u64..100_000,
        water_new in 0u64..100_000,
        elec_price in 0u64..10_000,
        water_price in 0u64..100_000,
        rent in 0u64..100_000_000,
        trash in 0u64..1_000_000,
    ) {
        let bill = compute_bill(
            &MeterReadings::new(elec_old, elec_new, water_old, water_new),
            &UnitPrices::new(elec_price, water_price),
            &FixedFees::new(rent, trash),
        );

        prop_assert_eq!(bill.elec_total, elec_new.saturating_sub(elec_old));
        prop_assert_eq!(bill.water_total, water_new.saturating_sub(water_old));
        prop_assert_eq!(bill.elec_cost, bill.elec_total * elec_price);
        prop_assert_eq!(bill.water_cost, bill.water_total * water_price);
        prop_assert_eq!(bill.total, rent + trash + bill.elec_cost + bill.water_cost);
    }

    /// Arbitrary text never panics and stays consistent.
    #[test]
    fn prop_garbage_text_is_safe(fields in proptest::collection::vec(".{0,12}", 8)) {
        let raw = RawBillInput {
            elec_old: fields[0].clone(),
            elec_new: fields[1].clone(),
            water_old: fields[2].clone(),
            water_new: fields[3].clone(),
            elec_price: fields[4].clone(),
            water_price: fields[5].clone(),
            rent: fields[6].clone(),
            trash_security: fields[7].clone(),
        };
        let bill = raw.compute();
        prop_assert!(bill.elec_new >= bill.elec_old || bill.elec_total == 0);
        prop_assert!(bill.total >= bill.rent);
    }

    /// Grouped digits read back as the same number.
    #[test]
    fn prop_money_groups(amount in any::<u64>()) {
        let formatted = format_money(amount, '.');
        prop_assert_eq!(formatted.replace('.', ""), amount.to_string());
        prop_assert!(formatted.split('.').skip(1).all(|group| group.len() == 3));
    }
}
