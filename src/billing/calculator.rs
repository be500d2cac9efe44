//! Pure bill computation.

use super::coerce::ToAmount;
use serde::{Deserialize, Serialize};

/// Opening and closing meter values for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReadings {
    /// Electricity meter at the start of the period
    pub elec_old: u64,
    /// Electricity meter at the end of the period
    pub elec_new: u64,
    /// Water meter at the start of the period
    pub water_old: u64,
    /// Water meter at the end of the period
    pub water_new: u64,
}

impl MeterReadings {
    /// Create readings from already-typed values.
    pub fn new(elec_old: u64, elec_new: u64, water_old: u64, water_new: u64) -> Self {
        Self {
            elec_old,
            elec_new,
            water_old,
            water_new,
        }
    }
}

/// Price per consumed unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrices {
    /// Currency per kWh
    pub elec: u64,
    /// Currency per water unit
    pub water: u64,
}

impl UnitPrices {
    /// Create unit prices.
    pub fn new(elec: u64, water: u64) -> Self {
        Self { elec, water }
    }
}

/// Fixed monthly fees of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFees {
    /// Room rent
    pub rent: u64,
    /// Trash collection and security fee
    pub trash_security: u64,
}

impl FixedFees {
    /// Create fixed fees.
    pub fn new(rent: u64, trash_security: u64) -> Self {
        Self {
            rent,
            trash_security,
        }
    }
}

/// Raw, untyped bill inputs as typed into a form.
///
/// Each field may hold anything [`ToAmount`] accepts; garbage becomes 0.
#[derive(Debug, Clone, Default)]
pub struct RawBillInput<T> {
    /// Opening electricity reading
    pub elec_old: T,
    /// Closing electricity reading
    pub elec_new: T,
    /// Opening water reading
    pub water_old: T,
    /// Closing water reading
    pub water_new: T,
    /// Electricity unit price
    pub elec_price: T,
    /// Water unit price
    pub water_price: T,
    /// Monthly rent
    pub rent: T,
    /// Trash/security fee
    pub trash_security: T,
}

impl<T: ToAmount> RawBillInput<T> {
    /// Coerce every field into typed inputs.
    pub fn coerce(&self) -> (MeterReadings, UnitPrices, FixedFees) {
        (
            MeterReadings::new(
                self.elec_old.to_amount(),
                self.elec_new.to_amount(),
                self.water_old.to_amount(),
                self.water_new.to_amount(),
            ),
            UnitPrices::new(self.elec_price.to_amount(), self.water_price.to_amount()),
            FixedFees::new(self.rent.to_amount(), self.trash_security.to_amount()),
        )
    }

    /// Coerce and compute in one step, for live previews.
    pub fn compute(&self) -> BillBreakdown {
        let (readings, prices, fees) = self.coerce();
        compute_bill(&readings, &prices, &fees)
    }
}

/// Consumption and cost breakdown of one monthly bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BillBreakdown {
    /// Opening electricity reading
    pub elec_old: u64,
    /// Closing electricity reading
    pub elec_new: u64,
    /// Electricity consumed
    pub elec_total: u64,
    /// Electricity unit price
    pub elec_price: u64,
    /// Electricity charge
    pub elec_cost: u64,
    /// Opening water reading
    pub water_old: u64,
    /// Closing water reading
    pub water_new: u64,
    /// Water consumed
    pub water_total: u64,
    /// Water unit price
    pub water_price: u64,
    /// Water charge
    pub water_cost: u64,
    /// Room rent
    pub rent: u64,
    /// Trash/security fee
    pub trash_security: u64,
    /// Sum of all charges
    pub total: u64,
    /// Some charge exceeded `u64::MAX` and was pinned there
    pub saturated: bool,
}

/// Compute a bill from readings, prices and fixed fees.
///
/// Consumption is clamped at zero when a closing reading is below its
/// opening reading. Arithmetic saturates rather than wrapping; a capped
/// bill is logged and flagged in [`BillBreakdown::saturated`].
pub fn compute_bill(readings: &MeterReadings, prices: &UnitPrices, fees: &FixedFees) -> BillBreakdown {
    let elec_total = readings.elec_new.saturating_sub(readings.elec_old);
    let water_total = readings.water_new.saturating_sub(readings.water_old);

    let elec_cost = elec_total.checked_mul(prices.elec);
    let water_cost = water_total.checked_mul(prices.water);

    let total = [elec_cost, water_cost, Some(fees.trash_security)]
        .into_iter()
        .try_fold(fees.rent, |sum, part| part.and_then(|p| sum.checked_add(p)));

    let saturated = total.is_none();
    if saturated {
        log::warn!(
            "Bill overflowed and was capped (elec {} x {}, water {} x {}, rent {}, trash {})",
            elec_total,
            prices.elec,
            water_total,
            prices.water,
            fees.rent,
            fees.trash_security
        );
    }
    let elec_cost = elec_cost.unwrap_or(u64::MAX);
    let water_cost = water_cost.unwrap_or(u64::MAX);
    let total = total.unwrap_or(u64::MAX);

    BillBreakdown {
        elec_old: readings.elec_old,
        elec_new: readings.elec_new,
        elec_total,
        elec_price: prices.elec,
        elec_cost,
        water_old: readings.water_old,
        water_new: readings.water_new,
        water_total,
        water_price: prices.water,
        water_cost,
        rent: fees.rent,
        trash_security: fees.trash_security,
        total,
        saturated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_bill() {
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
        assert!(!bill.saturated);
    }

    #[test]
    fn test_backwards_meter_clamped() {
        let bill = compute_bill(
            &MeterReadings::new(20, 10, 9, 3),
            &UnitPrices::new(3_500, 14_000),
            &FixedFees::new(100, 10),
        );
        assert_eq!(bill.elec_total, 0);
        assert_eq!(bill.water_total, 0);
        assert_eq!(bill.elec_cost, 0);
        assert_eq!(bill.total, 110);
    }

    #[test]
    fn test_saturates_on_overflow() {
        let bill = compute_bill(
            &MeterReadings::new(0, u64::MAX, 0, 0),
            &UnitPrices::new(2, 0),
            &FixedFees::new(1, 1),
        );
        assert_eq!(bill.elec_cost, u64::MAX);
        assert_eq!(bill.total, u64::MAX);
        assert!(bill.saturated);

        let bill = compute_bill(
            &MeterReadings::new(0, 1, 0, 0),
            &UnitPrices::new(1, 0),
            &FixedFees::new(u64::MAX, 1),
        );
        assert_eq!(bill.elec_cost, 1);
        assert_eq!(bill.total, u64::MAX);
        assert!(bill.saturated);
    }

    #[test]
    fn test_exact_maximum_not_flagged() {
        let bill = compute_bill(
            &MeterReadings::new(0, 0, 0, 0),
            &UnitPrices::new(0, 0),
            &FixedFees::new(u64::MAX - 1, 1),
        );
        assert_eq!(bill.total, u64::MAX);
        assert!(!bill.saturated);
    }

    #[test]
    fn test_raw_text_input() {
        let raw = RawBillInput {
            elec_old: "100",
            elec_new: "150.7",
            water_old: "10",
            water_new: "abc",
            elec_price: "3500",
            water_price: "14000",
            rent: "3500000",
            trash_security: "",
        };
        let bill = raw.compute();
        assert_eq!(bill.elec_total, 50);
        assert_eq!(bill.water_new, 0);
        assert_eq!(bill.water_total, 0);
        assert_eq!(bill.trash_security, 0);
        assert_eq!(bill.total, 3_500_000 + 175_000);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let raw = RawBillInput {
            elec_old: 1.0,
            elec_new: 9.9,
            water_old: 0.0,
            water_new: f64::NAN,
            elec_price: 3_500.0,
            water_price: 14_000.0,
            rent: 10.0,
            trash_security: 1.0,
        };
        assert_eq!(raw.compute(), raw.compute());
        assert_eq!(raw.compute().elec_total, 8);
    }
}
