//! Arbitrary-precision `xs:decimal` values

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// An `xs:decimal` value kept as digit strings
///
/// The integral digits carry no leading zeros and the fractional digits carry
/// no trailing zeros. The number of trailing zeros that appeared in the
/// lexical form is kept apart so that `1.200` has `fraction_digits() == 1`
/// and `trailing_zeros() == 2`. Equality and ordering are by numeric value.
#[derive(Debug, Clone)]
pub struct XsdDecimal {
    negative: bool,
    integral: String,
    fraction: String,
    trailing_zeros: u32,
}

impl XsdDecimal {
    /// Parse the `xs:decimal` lexical form: optional sign, digits, optional
    /// single `.`, digits, with at least one digit overall
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let integral = int_part.trim_start_matches('0');
        let fraction = frac_part.trim_end_matches('0');
        let trailing_zeros = u32::try_from(frac_part.len() - fraction.len()).ok()?;
        let is_zero = integral.is_empty() && fraction.is_empty();

        Some(Self {
            negative: negative && !is_zero,
            integral: integral.to_string(),
            fraction: fraction.to_string(),
            trailing_zeros,
        })
    }

    /// Build an integral value
    pub fn from_i64(value: i64) -> Self {
        Self::from_i128(i128::from(value))
    }

    /// Build an integral value wide enough for the `unsignedLong` range
    pub fn from_i128(value: i128) -> Self {
        let digits = value.unsigned_abs().to_string();
        let integral = if value == 0 { String::new() } else { digits };
        Self {
            negative: value < 0,
            integral,
            fraction: String::new(),
            trailing_zeros: 0,
        }
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.integral.is_empty() && self.fraction.is_empty()
    }

    /// Whether the value has no significant fractional digits
    pub fn is_integral(&self) -> bool {
        self.fraction.is_empty()
    }

    /// Integral digits without leading zeros (empty for values below one)
    pub fn integral_digits(&self) -> &str {
        &self.integral
    }

    /// Significant fractional digits, trailing zeros excluded
    pub fn fraction_str(&self) -> &str {
        &self.fraction
    }

    /// Number of significant fractional digits
    pub fn fraction_digits(&self) -> u32 {
        self.fraction.len() as u32
    }

    /// Number of zeros that trailed the fractional digits in the lexical form
    pub fn trailing_zeros(&self) -> u32 {
        self.trailing_zeros
    }

    /// Number of significant digits, ignoring leading and trailing zeros.
    /// Zero has one digit.
    pub fn total_digits(&self) -> u32 {
        ((self.integral.len() + self.fraction.len()) as u32).max(1)
    }

    /// Canonical lexical form
    pub fn canonical(&self) -> String {
        let mut out = String::with_capacity(self.integral.len() + self.fraction.len() + 3);
        if self.negative {
            out.push('-');
        }
        if self.integral.is_empty() {
            out.push('0');
        } else {
            out.push_str(&self.integral);
        }
        if !self.fraction.is_empty() {
            out.push('.');
            out.push_str(&self.fraction);
        }
        out
    }

    /// Convert to a fixed-precision [`Decimal`], if it fits
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_str_exact(&self.canonical()).ok()
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.integral
            .len()
            .cmp(&other.integral.len())
            .then_with(|| self.integral.cmp(&other.integral))
            .then_with(|| self.fraction.cmp(&other.fraction))
    }
}

impl Ord for XsdDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for XsdDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for XsdDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for XsdDecimal {}

impl fmt::Display for XsdDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl Serialize for XsdDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}
