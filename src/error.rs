//! Error types for xmlschema-datatypes
//!
//! Validation failures are classified by a closed [`ErrorKind`] so that callers
//! can branch on the exact failure. Misuse of the entry points is reported as a
//! [`UsageError`], schema construction problems as a [`ParseError`].

use crate::schema::Handle;
use crate::values::TypedValue;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for datatype validation
#[derive(Error, Debug)]
pub enum Error {
    /// The lexical value is not valid for the type
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An entry point was called with an unsuitable schema component
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// The schema graph could not be constructed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A configured resource limit was exceeded
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl Error {
    /// Classified kind of a validation failure, `None` for any other error
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Validation(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Borrow the validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Sub-kind of an invalid `xs:language` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LanguageError {
    /// The primary subtag is empty, too long, not alphabetic, or a
    /// single letter other than `i` / `x`
    PrimaryTag,
    /// A subtag after the first `-` is empty, too long, or not alphanumeric
    SubsequentTag,
}

/// Classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    // Lexical-syntax errors
    /// Not a boolean literal
    InvalidBoolean,
    /// Not a decimal literal
    InvalidDecimal,
    /// Not an integer literal (integer-derived types)
    InvalidInteger,
    /// Not a float literal
    InvalidFloat,
    /// Not a double literal
    InvalidDouble,
    /// Not a duration literal
    InvalidDuration,
    /// Not a dateTime literal
    InvalidDateTime,
    /// Not a time literal
    InvalidTime,
    /// Not a date literal
    InvalidDate,
    /// Not a gYearMonth literal
    InvalidGYearMonth,
    /// Not a gYear literal
    InvalidGYear,
    /// Not a gMonthDay literal
    InvalidGMonthDay,
    /// Not a gDay literal
    InvalidGDay,
    /// Not a gMonth literal
    InvalidGMonth,
    /// Malformed QName or NOTATION, or an unresolvable prefix
    InvalidQName,
    /// Not valid base64
    InvalidBase64Binary,
    /// Not valid hex
    InvalidHexBinary,
    /// Not a valid anyURI
    InvalidAnyUri,
    /// normalizedString containing TAB, LF or CR
    InvalidNormalizedString,
    /// token with leading, trailing or doubled spaces
    InvalidToken,
    /// Not an XML Name
    InvalidName,
    /// Not an XML NCName
    InvalidNCName,
    /// Not an XML NMTOKEN
    InvalidNmtoken,
    /// Not a language tag
    InvalidLanguage(LanguageError),
    /// UTF-16 input with an unpaired surrogate
    InvalidSurrogatePair,

    // Facet violations
    /// length facet
    LengthInvalid,
    /// minLength facet
    MinLengthInvalid,
    /// maxLength facet
    MaxLengthInvalid,
    /// totalDigits facet
    TotalDigitsInvalid,
    /// fractionDigits facet
    FractionDigitsInvalid,
    /// minInclusive facet
    MinInclusiveInvalid,
    /// maxInclusive facet
    MaxInclusiveInvalid,
    /// minExclusive facet
    MinExclusiveInvalid,
    /// maxExclusive facet
    MaxExclusiveInvalid,
    /// enumeration facet
    InvalidEnumeration,

    // Semantic errors
    /// No member type of a union accepted the value
    InvalidUnion,

    // Constraint errors
    /// Attribute value differs from the declared fixed value
    AttributeInvalidPerFixed,
    /// Element value differs from the declared fixed value
    ElementInvalidPerFixed,
}

impl ErrorKind {
    /// Stable upper-case identifier of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidBoolean => "INVALID_BOOLEAN",
            ErrorKind::InvalidDecimal => "INVALID_DECIMAL",
            ErrorKind::InvalidInteger => "INVALID_INTEGER",
            ErrorKind::InvalidFloat => "INVALID_FLOAT",
            ErrorKind::InvalidDouble => "INVALID_DOUBLE",
            ErrorKind::InvalidDuration => "INVALID_DURATION",
            ErrorKind::InvalidDateTime => "INVALID_DATETIME",
            ErrorKind::InvalidTime => "INVALID_TIME",
            ErrorKind::InvalidDate => "INVALID_DATE",
            ErrorKind::InvalidGYearMonth => "INVALID_GYEARMONTH",
            ErrorKind::InvalidGYear => "INVALID_GYEAR",
            ErrorKind::InvalidGMonthDay => "INVALID_GMONTHDAY",
            ErrorKind::InvalidGDay => "INVALID_GDAY",
            ErrorKind::InvalidGMonth => "INVALID_GMONTH",
            ErrorKind::InvalidQName => "INVALID_QNAME",
            ErrorKind::InvalidBase64Binary => "INVALID_BASE64_BINARY",
            ErrorKind::InvalidHexBinary => "INVALID_HEX_BINARY",
            ErrorKind::InvalidAnyUri => "INVALID_ANYURI",
            ErrorKind::InvalidNormalizedString => "INVALID_NORMALIZED_STRING",
            ErrorKind::InvalidToken => "INVALID_TOKEN",
            ErrorKind::InvalidName => "INVALID_NAME",
            ErrorKind::InvalidNCName => "INVALID_NCNAME",
            ErrorKind::InvalidNmtoken => "INVALID_NMTOKEN",
            ErrorKind::InvalidLanguage(LanguageError::PrimaryTag) => {
                "INVALID_LANGUAGE_PRIMARY_TAG"
            }
            ErrorKind::InvalidLanguage(LanguageError::SubsequentTag) => {
                "INVALID_LANGUAGE_SUBSEQUENT_TAG"
            }
            ErrorKind::InvalidSurrogatePair => "INVALID_SURROGATE_PAIR",
            ErrorKind::LengthInvalid => "LENGTH_INVALID",
            ErrorKind::MinLengthInvalid => "MIN_LENGTH_INVALID",
            ErrorKind::MaxLengthInvalid => "MAX_LENGTH_INVALID",
            ErrorKind::TotalDigitsInvalid => "TOTAL_DIGITS_INVALID",
            ErrorKind::FractionDigitsInvalid => "FRACTION_DIGITS_INVALID",
            ErrorKind::MinInclusiveInvalid => "MIN_INCLUSIVE_INVALID",
            ErrorKind::MaxInclusiveInvalid => "MAX_INCLUSIVE_INVALID",
            ErrorKind::MinExclusiveInvalid => "MIN_EXCLUSIVE_INVALID",
            ErrorKind::MaxExclusiveInvalid => "MAX_EXCLUSIVE_INVALID",
            ErrorKind::InvalidEnumeration => "INVALID_ENUMERATION",
            ErrorKind::InvalidUnion => "INVALID_UNION",
            ErrorKind::AttributeInvalidPerFixed => "ATTRIBUTE_INVALID_PER_FIXED",
            ErrorKind::ElementInvalidPerFixed => "ELEMENT_INVALID_PER_FIXED",
        }
    }

    /// Whether this kind reports a violated constraining facet
    pub fn is_facet_violation(&self) -> bool {
        matches!(
            self,
            ErrorKind::LengthInvalid
                | ErrorKind::MinLengthInvalid
                | ErrorKind::MaxLengthInvalid
                | ErrorKind::TotalDigitsInvalid
                | ErrorKind::FractionDigitsInvalid
                | ErrorKind::MinInclusiveInvalid
                | ErrorKind::MaxInclusiveInvalid
                | ErrorKind::MinExclusiveInvalid
                | ErrorKind::MaxExclusiveInvalid
                | ErrorKind::InvalidEnumeration
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified validation failure
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Classification of the failure
    pub kind: ErrorKind,
    /// Error message
    pub message: String,
    /// Additional detail, e.g. the offending facet value
    pub reason: Option<String>,
    /// The value the caller supplied, once parsed. Always present on the
    /// `*InvalidPerFixed` kinds.
    pub value: Option<Box<TypedValue>>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
            value: None,
        }
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach the parsed value
    pub fn with_value(mut self, value: TypedValue) -> Self {
        self.value = Some(Box::new(value));
        self
    }

    /// The parsed value carried by this error, if any
    pub fn value(&self) -> Option<&TypedValue> {
        self.value.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Misuse of a validation entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The handle is the reserved absent handle or out of range
    #[error("handle {0:?} does not address a schema component")]
    AbsentHandle(Handle),

    /// The handle does not address a simple type
    #[error("component {0:?} is not a simple type")]
    NotASimpleType(Handle),

    /// The element entry point was given something other than an element
    #[error("component {0:?} is not an element declaration")]
    NotAnElement(Handle),

    /// The element's content is element-only, mixed or empty
    #[error("element {0:?} does not have simple content")]
    NotSimpleContent(Handle),

    /// The attribute entry point was given neither an attribute nor an attribute use
    #[error("component {0:?} is neither an attribute nor an attribute use")]
    NotAnAttribute(Handle),

    /// No text was supplied and the declaration has no fixed or default value
    #[error("no value supplied for {0:?} and no fixed or default value is declared")]
    MissingValue(Handle),
}

/// Schema graph construction error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Name of the component being constructed
    pub component: Option<String>,
    /// The validation failure of a facet or value constraint, if that caused it
    pub cause: Option<ValidationError>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            component: None,
            cause: None,
        }
    }

    /// Set the component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the underlying validation failure
    pub fn with_cause(mut self, cause: ValidationError) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref component) = self.component {
            write!(f, "\n\nComponent: {}", component)?;
        }

        if let Some(ref cause) = self.cause {
            write!(f, "\n\nCause: {}", cause)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorKind::MinLengthInvalid, "value is too short")
            .with_reason("minLength is 3, length is 2");

        let msg = format!("{}", err);
        assert!(msg.contains("MIN_LENGTH_INVALID"));
        assert!(msg.contains("value is too short"));
        assert!(msg.contains("Reason:"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("invalid facet value")
            .with_component("{urn:test}shortString")
            .with_cause(ValidationError::new(ErrorKind::InvalidDecimal, "not a decimal"));

        let msg = format!("{}", err);
        assert!(msg.contains("invalid facet value"));
        assert!(msg.contains("Component:"));
        assert!(msg.contains("INVALID_DECIMAL"));
    }

    #[test]
    fn test_error_conversion() {
        let val_err = ValidationError::new(ErrorKind::InvalidUnion, "test");
        let err: Error = val_err.into();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.kind(), Some(ErrorKind::InvalidUnion));

        let usage: Error = UsageError::NotAnElement(Handle::ABSENT).into();
        assert_eq!(usage.kind(), None);
    }

    #[test]
    fn test_language_kinds_are_distinct() {
        let primary = ErrorKind::InvalidLanguage(LanguageError::PrimaryTag);
        let subsequent = ErrorKind::InvalidLanguage(LanguageError::SubsequentTag);
        assert_ne!(primary, subsequent);
        assert!(matches!(primary, ErrorKind::InvalidLanguage(_)));
        assert!(!primary.is_facet_violation());
        assert!(ErrorKind::LengthInvalid.is_facet_violation());
    }
}
