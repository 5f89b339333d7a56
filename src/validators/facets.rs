//! XSD constraining facets
//!
//! This module implements white space normalization and the facets that
//! constrain simple types. Facet bounds and enumeration values are held as
//! typed values, so comparisons happen in the value space of the type.

use crate::error::{Error, ErrorKind, ParseError, Result, ValidationError};
use crate::values::{AtomicValue, ListValue, TypedValue, XsdDecimal};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// White space handling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhiteSpace {
    /// Preserve all white space
    Preserve,
    /// Replace tabs and newlines with spaces
    Replace,
    /// Replace and collapse multiple spaces
    Collapse,
}

impl FromStr for WhiteSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "preserve" => Ok(WhiteSpace::Preserve),
            "replace" => Ok(WhiteSpace::Replace),
            "collapse" => Ok(WhiteSpace::Collapse),
            _ => Err(Error::Parse(ParseError::new(format!(
                "Invalid whiteSpace value: '{}'. Must be 'preserve', 'replace', or 'collapse'",
                s
            )))),
        }
    }
}

impl WhiteSpace {
    /// Facet value as written in a schema
    pub fn as_str(&self) -> &'static str {
        match self {
            WhiteSpace::Preserve => "preserve",
            WhiteSpace::Replace => "replace",
            WhiteSpace::Collapse => "collapse",
        }
    }

    /// Normalize a string according to this white space mode
    pub fn normalize<'a>(&self, s: &'a str) -> Cow<'a, str> {
        let is_ws = |c: char| matches!(c, '\t' | '\n' | '\r');
        match self {
            WhiteSpace::Preserve => Cow::Borrowed(s),
            WhiteSpace::Replace => {
                if s.contains(is_ws) {
                    Cow::Owned(s.replace(['\t', '\n', '\r'], " "))
                } else {
                    Cow::Borrowed(s)
                }
            }
            WhiteSpace::Collapse => {
                let mut result = String::with_capacity(s.len());
                let mut prev_space = true; // drops leading spaces

                for c in s.chars() {
                    if c == ' ' || is_ws(c) {
                        if !prev_space {
                            result.push(' ');
                            prev_space = true;
                        }
                    } else {
                        result.push(c);
                        prev_space = false;
                    }
                }

                if result.ends_with(' ') {
                    result.pop();
                }
                if result == s {
                    Cow::Borrowed(s)
                } else {
                    Cow::Owned(result)
                }
            }
        }
    }
}

impl fmt::Display for WhiteSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize text by an optional white space facet; `None` (the ur-type)
/// passes text through unchanged
pub fn normalize(text: &str, white_space: Option<WhiteSpace>) -> Cow<'_, str> {
    match white_space {
        Some(ws) => ws.normalize(text),
        None => Cow::Borrowed(text),
    }
}

fn violation(kind: ErrorKind, message: String, reason: String) -> Error {
    Error::Validation(ValidationError::new(kind, message).with_reason(reason))
}

/// Length facet constrains the length of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFacet {
    /// Required length
    pub value: usize,
}

impl LengthFacet {
    /// Create a new length facet
    pub fn new(value: usize) -> Self {
        Self { value }
    }

    /// Validate a measured length against this facet
    pub fn validate(&self, length: usize) -> Result<()> {
        if length != self.value {
            Err(violation(
                ErrorKind::LengthInvalid,
                format!("Length must be exactly {}", self.value),
                format!("Actual length: {}", length),
            ))
        } else {
            Ok(())
        }
    }
}

/// Minimum length facet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLengthFacet {
    /// Minimum length
    pub value: usize,
}

impl MinLengthFacet {
    /// Create a new minimum length facet
    pub fn new(value: usize) -> Self {
        Self { value }
    }

    /// Validate a measured length against this facet
    pub fn validate(&self, length: usize) -> Result<()> {
        if length < self.value {
            Err(violation(
                ErrorKind::MinLengthInvalid,
                format!("Length must be at least {}", self.value),
                format!("Actual length: {}", length),
            ))
        } else {
            Ok(())
        }
    }
}

/// Maximum length facet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLengthFacet {
    /// Maximum length
    pub value: usize,
}

impl MaxLengthFacet {
    /// Create a new maximum length facet
    pub fn new(value: usize) -> Self {
        Self { value }
    }

    /// Validate a measured length against this facet
    pub fn validate(&self, length: usize) -> Result<()> {
        if length > self.value {
            Err(violation(
                ErrorKind::MaxLengthInvalid,
                format!("Length must be at most {}", self.value),
                format!("Actual length: {}", length),
            ))
        } else {
            Ok(())
        }
    }
}

/// Pattern facet
///
/// Patterns are recorded so that the facet set is complete, but values are
/// not matched against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFacet {
    /// Regular expression in XML Schema syntax
    pub pattern: String,
}

impl PatternFacet {
    /// Create a new pattern facet
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// Enumeration facet restricts values to a specific set
#[derive(Debug, Clone)]
pub struct EnumerationFacet {
    /// Allowed values
    pub values: Vec<TypedValue>,
}

impl EnumerationFacet {
    /// Create a new enumeration facet
    pub fn new(values: Vec<TypedValue>) -> Self {
        Self { values }
    }

    /// Validate a value against this enumeration, by value-space equality
    pub fn validate(&self, value: &TypedValue) -> Result<()> {
        self.check(|allowed| allowed.value_eq(value), || value.canonical())
    }

    /// Validate an atomic value against this enumeration
    pub fn validate_atomic(&self, value: &AtomicValue) -> Result<()> {
        self.check(
            |allowed| allowed.as_atomic().map_or(false, |a| a.value_eq(value)),
            || value.canonical(),
        )
    }

    /// Validate a list value against this enumeration
    pub fn validate_list(&self, value: &ListValue) -> Result<()> {
        self.check(
            |allowed| allowed.as_list().map_or(false, |l| l.value_eq(value)),
            || value.canonical(),
        )
    }

    fn check(
        &self,
        matches: impl Fn(&TypedValue) -> bool,
        canonical: impl FnOnce() -> String,
    ) -> Result<()> {
        if self.values.iter().any(matches) {
            Ok(())
        } else {
            let allowed: Vec<String> = self.values.iter().map(TypedValue::canonical).collect();
            Err(violation(
                ErrorKind::InvalidEnumeration,
                "Value is not in the enumeration".to_string(),
                format!("Value {:?}, allowed values: {:?}", canonical(), allowed),
            ))
        }
    }
}

/// Which of the four range facets a [`RangeFacet`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// `minInclusive`
    MinInclusive,
    /// `maxInclusive`
    MaxInclusive,
    /// `minExclusive`
    MinExclusive,
    /// `maxExclusive`
    MaxExclusive,
}

impl RangeKind {
    fn error_kind(&self) -> ErrorKind {
        match self {
            RangeKind::MinInclusive => ErrorKind::MinInclusiveInvalid,
            RangeKind::MaxInclusive => ErrorKind::MaxInclusiveInvalid,
            RangeKind::MinExclusive => ErrorKind::MinExclusiveInvalid,
            RangeKind::MaxExclusive => ErrorKind::MaxExclusiveInvalid,
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            RangeKind::MinInclusive => ">=",
            RangeKind::MaxInclusive => "<=",
            RangeKind::MinExclusive => ">",
            RangeKind::MaxExclusive => "<",
        }
    }

    fn accepts(&self, order: Ordering) -> bool {
        match self {
            RangeKind::MinInclusive => order != Ordering::Less,
            RangeKind::MaxInclusive => order != Ordering::Greater,
            RangeKind::MinExclusive => order == Ordering::Greater,
            RangeKind::MaxExclusive => order == Ordering::Less,
        }
    }
}

/// An ordered bound facet
#[derive(Debug, Clone)]
pub struct RangeFacet {
    /// Which bound
    pub kind: RangeKind,
    /// Bound value, in the value space of the restricted type
    pub value: AtomicValue,
}

impl RangeFacet {
    /// Create a new range facet
    pub fn new(kind: RangeKind, value: AtomicValue) -> Self {
        Self { kind, value }
    }

    /// Validate a value against this bound. Values the primitive's order
    /// cannot place relative to the bound (NaN) fail.
    pub fn validate(&self, value: &AtomicValue) -> Result<()> {
        match value.compare(&self.value) {
            Some(order) if self.kind.accepts(order) => Ok(()),
            _ => Err(violation(
                self.kind.error_kind(),
                format!("Value must be {} {}", self.kind.operator(), self.value.canonical()),
                format!("Value: {}", value.canonical()),
            )),
        }
    }
}

/// Total digits facet - constrains the maximum number of decimal digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalDigitsFacet {
    /// Maximum total number of digits allowed
    pub value: u32,
}

impl TotalDigitsFacet {
    /// Create a new total digits facet
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Validate a decimal value; leading and trailing zeros do not count
    pub fn validate(&self, value: &XsdDecimal) -> Result<()> {
        let digits = value.total_digits();
        if digits > self.value {
            Err(violation(
                ErrorKind::TotalDigitsInvalid,
                format!("Value exceeds totalDigits limit of {}", self.value),
                format!("Value {} has {} significant digits", value, digits),
            ))
        } else {
            Ok(())
        }
    }
}

/// Fraction digits facet - constrains the maximum number of decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionDigitsFacet {
    /// Maximum number of fractional digits allowed
    pub value: u32,
}

impl FractionDigitsFacet {
    /// Create a new fraction digits facet
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Validate a decimal value; trailing zeros do not count
    pub fn validate(&self, value: &XsdDecimal) -> Result<()> {
        let digits = value.fraction_digits();
        if digits > self.value {
            Err(violation(
                ErrorKind::FractionDigitsInvalid,
                format!("Value exceeds fractionDigits limit of {}", self.value),
                format!("Value {} has {} fractional digits", value, digits),
            ))
        } else {
            Ok(())
        }
    }
}

/// The resolved facets of a simple type
#[derive(Debug, Clone, Default)]
pub struct FacetSet {
    /// whiteSpace, `None` for the ur-type and unions
    pub white_space: Option<WhiteSpace>,
    /// length
    pub length: Option<LengthFacet>,
    /// minLength
    pub min_length: Option<MinLengthFacet>,
    /// maxLength
    pub max_length: Option<MaxLengthFacet>,
    /// totalDigits
    pub total_digits: Option<TotalDigitsFacet>,
    /// fractionDigits
    pub fraction_digits: Option<FractionDigitsFacet>,
    /// minInclusive
    pub min_inclusive: Option<RangeFacet>,
    /// maxInclusive
    pub max_inclusive: Option<RangeFacet>,
    /// minExclusive
    pub min_exclusive: Option<RangeFacet>,
    /// maxExclusive
    pub max_exclusive: Option<RangeFacet>,
    /// pattern, one entry per derivation step
    pub patterns: Vec<PatternFacet>,
    /// enumeration
    pub enumeration: Option<EnumerationFacet>,
}

impl FacetSet {
    /// Apply the whiteSpace facet
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        normalize(text, self.white_space)
    }

    /// Check the length family. An exact length makes min/max irrelevant.
    pub fn check_length(&self, length: usize) -> Result<()> {
        if let Some(facet) = &self.length {
            return facet.validate(length);
        }
        if let Some(facet) = &self.min_length {
            facet.validate(length)?;
        }
        if let Some(facet) = &self.max_length {
            facet.validate(length)?;
        }
        Ok(())
    }

    /// Check totalDigits and fractionDigits
    pub fn check_digits(&self, value: &XsdDecimal) -> Result<()> {
        if let Some(facet) = &self.total_digits {
            facet.validate(value)?;
        }
        if let Some(facet) = &self.fraction_digits {
            facet.validate(value)?;
        }
        Ok(())
    }

    /// Check the four range facets
    pub fn check_range(&self, value: &AtomicValue) -> Result<()> {
        for facet in [
            &self.min_inclusive,
            &self.max_inclusive,
            &self.min_exclusive,
            &self.max_exclusive,
        ]
        .into_iter()
        .flatten()
        {
            facet.validate(value)?;
        }
        Ok(())
    }

    /// Check length, digit and range facets of an atomic value, in that order
    pub fn check_atomic(&self, value: &AtomicValue) -> Result<()> {
        if self.has_length() {
            if let Some(length) = value.length() {
                self.check_length(length)?;
            }
        }
        if let Some(decimal) = value.as_decimal() {
            self.check_digits(decimal)?;
        }
        self.check_range(value)
    }

    /// Check the enumeration facet
    pub fn check_enumeration(&self, value: &TypedValue) -> Result<()> {
        match &self.enumeration {
            Some(facet) => facet.validate(value),
            None => Ok(()),
        }
    }

    /// Whether any length facet is set
    pub fn has_length(&self) -> bool {
        self.length.is_some() || self.min_length.is_some() || self.max_length.is_some()
    }

    /// Range facet slot for `kind`
    pub fn range_mut(&mut self, kind: RangeKind) -> &mut Option<RangeFacet> {
        match kind {
            RangeKind::MinInclusive => &mut self.min_inclusive,
            RangeKind::MaxInclusive => &mut self.max_inclusive,
            RangeKind::MinExclusive => &mut self.min_exclusive,
            RangeKind::MaxExclusive => &mut self.max_exclusive,
        }
    }
}
