//! Bill computation.
//!
//! [`compute_bill`] is a pure function over typed inputs; [`RawBillInput`]
//! and [`ToAmount`] cover the lenient coercion of form text so a live
//! preview can be recomputed on every keystroke.

mod calculator;
mod coerce;
mod money;

pub use calculator::{
    compute_bill, BillBreakdown, FixedFees, MeterReadings, RawBillInput, UnitPrices,
};
pub use coerce::{to_amount, ToAmount};
pub use money::{format_money, DEFAULT_THOUSANDS_SEPARATOR};
