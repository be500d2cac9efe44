//! Lenient numeric coercion for bill inputs.
//!
//! Form fields arrive as text or floats. Every value is truncated toward
//! zero; anything non-numeric, non-finite or negative becomes 0.

/// Conversion of a raw input value into a non-negative integer amount.
pub trait ToAmount {
    /// Coerce to an amount. Never fails.
    fn to_amount(&self) -> u64;
}

impl ToAmount for u64 {
    fn to_amount(&self) -> u64 {
        *self
    }
}

impl ToAmount for u32 {
    fn to_amount(&self) -> u64 {
        u64::from(*self)
    }
}

impl ToAmount for i64 {
    fn to_amount(&self) -> u64 {
        u64::try_from(*self).unwrap_or(0)
    }
}

impl ToAmount for i32 {
    fn to_amount(&self) -> u64 {
        u64::try_from(*self).unwrap_or(0)
    }
}

impl ToAmount for f64 {
    fn to_amount(&self) -> u64 {
        if !self.is_finite() || *self <= 0.0 {
            return 0;
        }
        // `as` saturates at u64::MAX for huge values
        self.trunc() as u64
    }
}

impl ToAmount for f32 {
    fn to_amount(&self) -> u64 {
        f64::from(*self).to_amount()
    }
}

impl ToAmount for str {
    fn to_amount(&self) -> u64 {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return 0;
        }
        if let Ok(n) = trimmed.parse::<u64>() {
            return n;
        }
        trimmed.parse::<f64>().map(|f| f.to_amount()).unwrap_or(0)
    }
}

impl ToAmount for String {
    fn to_amount(&self) -> u64 {
        self.as_str().to_amount()
    }
}

impl<T: ToAmount + ?Sized> ToAmount for &T {
    fn to_amount(&self) -> u64 {
        (**self).to_amount()
    }
}

impl<T: ToAmount> ToAmount for Option<T> {
    fn to_amount(&self) -> u64 {
        self.as_ref().map(|v| v.to_amount()).unwrap_or(0)
    }
}

/// Coerce any supported raw value to an amount.
#[inline]
pub fn to_amount<T: ToAmount + ?Sized>(value: &T) -> u64 {
    value.to_amount()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(to_amount(&42u64), 42);
        assert_eq!(to_amount(&-5i64), 0);
        assert_eq!(to_amount(&7i32), 7);
    }

    #[test]
    fn test_floats_truncate_toward_zero() {
        assert_eq!(to_amount(&3.99f64), 3);
        assert_eq!(to_amount(&0.5f64), 0);
        assert_eq!(to_amount(&-0.5f64), 0);
        assert_eq!(to_amount(&f64::NAN), 0);
        assert_eq!(to_amount(&f64::INFINITY), 0);
        assert_eq!(to_amount(&f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_text() {
        assert_eq!(to_amount("150"), 150);
        assert_eq!(to_amount(" 150 "), 150);
        assert_eq!(to_amount("150.9"), 150);
        assert_eq!(to_amount("1e3"), 1000);
        assert_eq!(to_amount(""), 0);
        assert_eq!(to_amount("abc"), 0);
        assert_eq!(to_amount("-20"), 0);
        assert_eq!(to_amount("NaN"), 0);
        assert_eq!(to_amount("inf"), 0);
    }

    #[test]
    fn test_option() {
        assert_eq!(to_amount(&Some(12u64)), 12);
        assert_eq!(to_amount(&None::<u64>), 0);
        assert_eq!(to_amount(&Some("9")), 9);
    }
}
