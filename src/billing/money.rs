//! Currency formatting with thousands separators.

/// Separator used by the default (vi-VN) locale: `3.500.000`.
pub const DEFAULT_THOUSANDS_SEPARATOR: char = '.';

/// Format an amount, grouping digits in threes with `separator`.
pub fn format_money(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_unchanged() {
        assert_eq!(format_money(0, '.'), "0");
        assert_eq!(format_money(7, '.'), "7");
        assert_eq!(format_money(999, '.'), "999");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_money(1_000, '.'), "1.000");
        assert_eq!(format_money(30_000, '.'), "30.000");
        assert_eq!(format_money(175_000, '.'), "175.000");
        assert_eq!(format_money(3_775_000, '.'), "3.775.000");
        assert_eq!(format_money(3_775_000, ','), "3,775,000");
    }

    #[test]
    fn test_max_value() {
        assert_eq!(format_money(u64::MAX, ','), "18,446,744,073,709,551,615");
    }
}
