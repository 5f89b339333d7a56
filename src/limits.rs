//! Limits and constraints for lexical value processing
//!
//! This module defines limits that bound the work a single validation call
//! may do, protecting callers against pathological input (megabyte-long
//! decimals, lists with millions of items, years that overflow the calendar
//! arithmetic).

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length of a raw lexical value, in characters
    pub max_lexical_length: usize,

    /// Maximum number of items in a list value
    pub max_list_items: usize,

    /// Maximum number of digits in a decimal value
    pub max_decimal_digits: usize,

    /// Maximum number of integer digits in one date/time or duration field
    /// (a year, or a duration component before any fraction). Values beyond
    /// 18 digits cannot be held by the calendar and duration arithmetic, so
    /// larger settings are capped there.
    pub max_temporal_digits: usize,
}

/// Largest field width the temporal value model holds without overflow
pub const TEMPORAL_DIGITS_CEILING: usize = 18;

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_lexical_length: 16 * 1024 * 1024, // 16M chars
            max_list_items: 1_000_000,
            max_decimal_digits: 4096,
            max_temporal_digits: TEMPORAL_DIGITS_CEILING,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_lexical_length: 64 * 1024,
            max_list_items: 10_000,
            max_decimal_digits: 128,
            max_temporal_digits: 9,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_lexical_length: usize::MAX,
            max_list_items: usize::MAX,
            max_decimal_digits: 1024 * 1024,
            max_temporal_digits: TEMPORAL_DIGITS_CEILING,
        }
    }

    /// Check if a lexical value is within limits
    pub fn check_lexical_length(&self, length: usize) -> Result<()> {
        if length > self.max_lexical_length {
            Err(Error::LimitExceeded(format!(
                "lexical value of {} characters exceeds maximum {}",
                length, self.max_lexical_length
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of list items is within limits
    pub fn check_list_items(&self, count: usize) -> Result<()> {
        if count > self.max_list_items {
            Err(Error::LimitExceeded(format!(
                "list of {} items exceeds maximum {}",
                count, self.max_list_items
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of decimal digits is within limits
    pub fn check_decimal_digits(&self, digits: usize) -> Result<()> {
        if digits > self.max_decimal_digits {
            Err(Error::LimitExceeded(format!(
                "decimal with {} digits exceeds maximum {}",
                digits, self.max_decimal_digits
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the widest numeric field of a date/time or duration is
    /// within limits
    pub fn check_temporal_digits(&self, digits: usize) -> Result<()> {
        let max = self.max_temporal_digits.min(TEMPORAL_DIGITS_CEILING);
        if digits > max {
            Err(Error::LimitExceeded(format!(
                "temporal field of {} digits exceeds maximum {}",
                digits, max
            )))
        } else {
            Ok(())
        }
    }
}
