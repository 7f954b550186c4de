//! Arbitrary-precision decimal arithmetic.
//!
//! A [`Decimal`] is a [`BigInt`] mantissa paired with a decimal scale
//! (number of digits after the point), so `"12.340"` is mantissa `12340`
//! at scale `3`. Arithmetic aligns scales exactly; nothing is rounded
//! except division, which truncates toward zero at the caller-requested
//! scale, matching fixed-point calculator semantics.
//!
//! This module is independent of [`Collection`](crate::Collection).
//!
//! ## Examples
//!
//! ```rust
//! use kollect::bc::Decimal;
//!
//! let a: Decimal = "1.05".parse().unwrap();
//! let b: Decimal = "2.5".parse().unwrap();
//!
//! assert_eq!(a.add(&b).to_string(), "3.55");
//! assert_eq!(a.mul(&b).to_string(), "2.625");
//! assert_eq!(b.div(&a, 4).unwrap().to_string(), "2.3809");
//! ```

use crate::{Error, Result};
use num_bigint::BigInt;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An exact decimal number: mantissa and scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

impl Decimal {
    /// Builds a decimal from a raw mantissa and scale.
    #[must_use]
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Decimal { mantissa, scale }
    }

    /// The zero value.
    #[must_use]
    pub fn zero() -> Self {
        Decimal::new(BigInt::from(0), 0)
    }

    /// Returns `true` if this decimal equals zero at any scale.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa == BigInt::from(0)
    }

    /// Rescales to exactly `scale` fractional digits, truncating toward
    /// zero when narrowing.
    #[must_use]
    pub fn with_scale(&self, scale: u32) -> Self {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Decimal::new(&self.mantissa * pow10(scale - self.scale), scale),
            Ordering::Less => Decimal::new(&self.mantissa / pow10(self.scale - scale), scale),
        }
    }

    fn aligned(&self, other: &Decimal) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        (
            &self.mantissa * pow10(scale - self.scale),
            &other.mantissa * pow10(scale - other.scale),
            scale,
        )
    }

    /// Exact addition.
    #[must_use]
    pub fn add(&self, other: &Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(other);
        Decimal::new(a + b, scale)
    }

    /// Exact subtraction.
    #[must_use]
    pub fn sub(&self, other: &Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(other);
        Decimal::new(a - b, scale)
    }

    /// Exact multiplication. The result scale is the sum of the operand
    /// scales.
    #[must_use]
    pub fn mul(&self, other: &Decimal) -> Decimal {
        Decimal::new(&self.mantissa * &other.mantissa, self.scale + other.scale)
    }

    /// Division truncated toward zero at `scale` fractional digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] when `other` is zero.
    pub fn div(&self, other: &Decimal, scale: u32) -> Result<Decimal> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let numerator = &self.mantissa * pow10(scale + other.scale);
        let denominator = &other.mantissa * pow10(self.scale);
        Ok(Decimal::new(numerator / denominator, scale))
    }

    /// Remainder after truncating integer division, carrying the sign of
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] when `other` is zero.
    pub fn rem(&self, other: &Decimal) -> Result<Decimal> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let quotient = self.div(other, 0)?;
        Ok(self.sub(&quotient.mul(other)))
    }

    /// Compares two decimals by numeric value regardless of scale.
    #[must_use]
    pub fn cmp_decimal(&self, other: &Decimal) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::InvalidDecimal(input.to_string()));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidDecimal(input.to_string()));
        }
        let mantissa = format!("{}{}{}", sign, int_part, frac_part);
        let mantissa = BigInt::from_str(&mantissa)
            .map_err(|_| Error::InvalidDecimal(input.to_string()))?;
        Ok(Decimal::new(mantissa, frac_part.len() as u32))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let negative = self.mantissa < BigInt::from(0);
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let split = padded.len() - scale;
        write!(
            f,
            "{}{}.{}",
            if negative { "-" } else { "" },
            &padded[..split],
            &padded[split..]
        )
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        for literal in ["0", "12", "-3.50", "0.001", "-0.5"] {
            assert_eq!(dec(literal).to_string(), literal);
        }
        assert!("".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("abc".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_add_sub_align_scales() {
        assert_eq!(dec("1.05").add(&dec("2.5")).to_string(), "3.55");
        assert_eq!(dec("1").sub(&dec("0.001")).to_string(), "0.999");
        assert_eq!(dec("-1.5").add(&dec("1.5")).to_string(), "0.0");
    }

    #[test]
    fn test_mul_sums_scales() {
        assert_eq!(dec("1.5").mul(&dec("0.2")).to_string(), "0.30");
        assert_eq!(dec("-4").mul(&dec("2.25")).to_string(), "-9.00");
    }

    #[test]
    fn test_div_truncates_at_scale() {
        assert_eq!(dec("1").div(&dec("3"), 4).unwrap().to_string(), "0.3333");
        assert_eq!(dec("10").div(&dec("4"), 0).unwrap().to_string(), "2");
        assert_eq!(dec("1").div(&dec("0"), 2), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_rem() {
        assert_eq!(dec("10").rem(&dec("3")).unwrap().to_string(), "1");
        assert_eq!(dec("5.5").rem(&dec("2")).unwrap().to_string(), "1.5");
        assert_eq!(dec("1").rem(&dec("0")), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_cmp_ignores_scale() {
        assert_eq!(dec("1.50").cmp_decimal(&dec("1.5")), Ordering::Equal);
        assert_eq!(dec("2").cmp_decimal(&dec("1.999")), Ordering::Greater);
        assert_eq!(dec("-3").cmp_decimal(&dec("0.1")), Ordering::Less);
    }

    #[test]
    fn test_big_values() {
        let big = dec("123456789012345678901234567890.5");
        assert_eq!(
            big.add(&dec("0.5")).to_string(),
            "123456789012345678901234567891.0"
        );
    }
}
