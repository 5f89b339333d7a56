//! Lexical parsers of the built-in datatypes
//!
//! Each parser takes whitespace-normalized text and produces the native value
//! of the primitive, or a [`ValidationError`] whose kind names the datatype.

use crate::codecs;
use crate::error::{Error, ErrorKind, Result, ValidationError};
use crate::limits::Limits;
use crate::names::{
    is_valid_name, is_valid_ncname, is_valid_nmtoken, is_valid_qname, split_qname,
    validate_language,
};
use crate::namespaces::NamespaceBindings;
use crate::values::{
    NativeValue, Primitive, QNameValue, TemporalKind, XsdDateTime, XsdDecimal, XsdDuration,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Lexical constraint a built-in derived type adds to its primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalRule {
    /// Only the primitive's grammar
    Plain,
    /// `xs:integer` and its derivations: no fractional part
    Integer,
    /// `xs:normalizedString`: no TAB, LF or CR
    NormalizedString,
    /// `xs:token`: additionally no leading, trailing or doubled spaces
    Token,
    /// `xs:language`
    Language,
    /// `xs:Name`
    Name,
    /// `xs:NCName`, `xs:ID`, `xs:IDREF`, `xs:ENTITY`
    NCName,
    /// `xs:NMTOKEN`
    Nmtoken,
}

static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|INF|-INF|NaN)$")
        .expect("float grammar is a valid regex")
});

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer grammar is a valid regex"));

fn invalid(kind: ErrorKind, text: &str) -> Error {
    Error::Validation(
        ValidationError::new(kind, format!("'{}' is not a valid lexical value", text)),
    )
}

/// Parse `text` as a value of `primitive`, applying the extra lexical `rule`
/// of built-in derived types
///
/// `bindings` resolve the prefix of `QName` and `NOTATION` values. A prefixed
/// name without bindings is invalid.
pub fn parse_atomic(
    primitive: Primitive,
    rule: LexicalRule,
    text: &str,
    bindings: Option<&NamespaceBindings>,
    limits: &Limits,
) -> Result<NativeValue> {
    match primitive {
        Primitive::String => parse_string(rule, text).map(|s| NativeValue::String(s.to_string())),
        Primitive::Boolean => parse_boolean(text).map(NativeValue::Boolean),
        Primitive::Decimal => parse_decimal(rule, text, limits).map(NativeValue::Decimal),
        Primitive::Float => parse_float::<f32>(text)
            .map(NativeValue::Float)
            .ok_or_else(|| invalid(ErrorKind::InvalidFloat, text)),
        Primitive::Double => parse_float::<f64>(text)
            .map(NativeValue::Double)
            .ok_or_else(|| invalid(ErrorKind::InvalidDouble, text)),
        Primitive::Duration => {
            limits.check_temporal_digits(widest_integer_field(text))?;
            XsdDuration::parse(text)
                .map(NativeValue::Duration)
                .ok_or_else(|| invalid(ErrorKind::InvalidDuration, text))
        }
        Primitive::DateTime
        | Primitive::Time
        | Primitive::Date
        | Primitive::GYearMonth
        | Primitive::GYear
        | Primitive::GMonthDay
        | Primitive::GDay
        | Primitive::GMonth => {
            let kind = primitive.temporal_kind().unwrap_or(TemporalKind::DateTime);
            limits.check_temporal_digits(widest_integer_field(text))?;
            XsdDateTime::parse(kind, text)
                .map(NativeValue::DateTime)
                .ok_or_else(|| invalid(temporal_error(kind), text))
        }
        Primitive::HexBinary => codecs::decode_hex(text)
            .map(NativeValue::Binary)
            .map_err(|e| {
                Error::Validation(
                    ValidationError::new(ErrorKind::InvalidHexBinary, "invalid hexBinary value")
                        .with_reason(e.to_string()),
                )
            }),
        Primitive::Base64Binary => codecs::decode_base64(text)
            .map(NativeValue::Binary)
            .map_err(|e| {
                Error::Validation(
                    ValidationError::new(
                        ErrorKind::InvalidBase64Binary,
                        "invalid base64Binary value",
                    )
                    .with_reason(e.to_string()),
                )
            }),
        Primitive::AnyUri => parse_any_uri(text).map(|s| NativeValue::String(s.to_string())),
        Primitive::QName | Primitive::Notation => {
            parse_qname(text, bindings).map(NativeValue::QName)
        }
    }
}

fn temporal_error(kind: TemporalKind) -> ErrorKind {
    match kind {
        TemporalKind::DateTime => ErrorKind::InvalidDateTime,
        TemporalKind::Time => ErrorKind::InvalidTime,
        TemporalKind::Date => ErrorKind::InvalidDate,
        TemporalKind::GYearMonth => ErrorKind::InvalidGYearMonth,
        TemporalKind::GYear => ErrorKind::InvalidGYear,
        TemporalKind::GMonthDay => ErrorKind::InvalidGMonthDay,
        TemporalKind::GDay => ErrorKind::InvalidGDay,
        TemporalKind::GMonth => ErrorKind::InvalidGMonth,
    }
}

/// Length of the longest digit run in `text` that is not a fractional part
fn widest_integer_field(text: &str) -> usize {
    let mut widest = 0;
    let mut run = 0;
    let mut fractional = false;
    let mut prev = None;
    for b in text.bytes() {
        if b.is_ascii_digit() {
            if run == 0 {
                fractional = prev == Some(b'.');
            }
            run += 1;
            if !fractional {
                widest = widest.max(run);
            }
        } else {
            run = 0;
        }
        prev = Some(b);
    }
    widest
}

fn parse_string(rule: LexicalRule, text: &str) -> Result<&str> {
    let has_breaks = text.contains(['\t', '\n', '\r']);
    let untokenized = text.starts_with(' ') || text.ends_with(' ') || text.contains("  ");

    match rule {
        LexicalRule::Plain | LexicalRule::Integer => Ok(text),
        LexicalRule::NormalizedString if has_breaks => {
            Err(invalid(ErrorKind::InvalidNormalizedString, text))
        }
        LexicalRule::NormalizedString => Ok(text),
        LexicalRule::Token if has_breaks || untokenized => {
            Err(invalid(ErrorKind::InvalidToken, text))
        }
        LexicalRule::Token => Ok(text),
        LexicalRule::Language => match validate_language(text) {
            Ok(()) => Ok(text),
            Err(sub) => Err(invalid(ErrorKind::InvalidLanguage(sub), text)),
        },
        LexicalRule::Name if is_valid_name(text) => Ok(text),
        LexicalRule::Name => Err(invalid(ErrorKind::InvalidName, text)),
        LexicalRule::NCName if is_valid_ncname(text) => Ok(text),
        LexicalRule::NCName => Err(invalid(ErrorKind::InvalidNCName, text)),
        LexicalRule::Nmtoken if is_valid_nmtoken(text) => Ok(text),
        LexicalRule::Nmtoken => Err(invalid(ErrorKind::InvalidNmtoken, text)),
    }
}

/// Parse an `xs:boolean` literal
pub fn parse_boolean(text: &str) -> Result<bool> {
    match text {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(ErrorKind::InvalidBoolean, text)),
    }
}

/// Parse an `xs:decimal` literal, or an `xs:integer` one under
/// [`LexicalRule::Integer`]
pub fn parse_decimal(rule: LexicalRule, text: &str, limits: &Limits) -> Result<XsdDecimal> {
    limits.check_decimal_digits(text.bytes().filter(u8::is_ascii_digit).count())?;

    if rule == LexicalRule::Integer {
        if !INTEGER.is_match(text) {
            return Err(invalid(ErrorKind::InvalidInteger, text));
        }
        return XsdDecimal::parse(text).ok_or_else(|| invalid(ErrorKind::InvalidInteger, text));
    }
    XsdDecimal::parse(text).ok_or_else(|| invalid(ErrorKind::InvalidDecimal, text))
}

/// Parse an `xs:float` / `xs:double` literal. Only `INF`, `-INF` and `NaN`
/// are accepted as special values.
pub fn parse_float<F: std::str::FromStr>(text: &str) -> Option<F> {
    if !FLOAT.is_match(text) {
        return None;
    }
    match text {
        "INF" => "inf".parse().ok(),
        "-INF" => "-inf".parse().ok(),
        _ => text.parse().ok(),
    }
}

fn parse_any_uri(text: &str) -> Result<&str> {
    if text.chars().any(char::is_control) {
        Err(invalid(ErrorKind::InvalidAnyUri, text))
    } else {
        Ok(text)
    }
}

/// Parse a `QName` / `NOTATION` lexical value, resolving its prefix
pub fn parse_qname(text: &str, bindings: Option<&NamespaceBindings>) -> Result<QNameValue> {
    if !is_valid_qname(text) {
        return Err(invalid(ErrorKind::InvalidQName, text));
    }

    let (prefix, local_name) = split_qname(text);
    let namespace = match (prefix, bindings) {
        (Some(prefix), Some(bindings)) => match bindings.get_namespace(prefix) {
            Some(ns) => Some(ns.to_string()),
            None => {
                return Err(Error::Validation(
                    ValidationError::new(ErrorKind::InvalidQName, "unbound namespace prefix")
                        .with_reason(format!("prefix '{}' is not declared", prefix)),
                ))
            }
        },
        (Some(prefix), None) => {
            return Err(Error::Validation(
                ValidationError::new(
                    ErrorKind::InvalidQName,
                    "prefixed name without namespace bindings",
                )
                .with_reason(format!("cannot resolve prefix '{}'", prefix)),
            ))
        }
        (None, Some(bindings)) => bindings.get_default_namespace().map(str::to_string),
        (None, None) => None,
    };

    Ok(QNameValue {
        namespace,
        local_name: local_name.to_string(),
        prefix: prefix.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LanguageError;

    fn parse(primitive: Primitive, rule: LexicalRule, text: &str) -> Result<NativeValue> {
        parse_atomic(primitive, rule, text, None, &Limits::default())
    }

    fn kind(result: Result<NativeValue>) -> Option<ErrorKind> {
        result.err().and_then(|e| e.kind())
    }

    #[test]
    fn test_boolean() {
        assert!(matches!(
            parse(Primitive::Boolean, LexicalRule::Plain, "1"),
            Ok(NativeValue::Boolean(true))
        ));
        assert_eq!(
            kind(parse(Primitive::Boolean, LexicalRule::Plain, "TRUE")),
            Some(ErrorKind::InvalidBoolean)
        );
    }

    #[test]
    fn test_decimal_and_integer() {
        assert!(parse(Primitive::Decimal, LexicalRule::Plain, "-1.5").is_ok());
        assert_eq!(
            kind(parse(Primitive::Decimal, LexicalRule::Plain, "-")),
            Some(ErrorKind::InvalidDecimal)
        );
        assert!(parse(Primitive::Decimal, LexicalRule::Integer, "+42").is_ok());
        assert_eq!(
            kind(parse(Primitive::Decimal, LexicalRule::Integer, "4.0")),
            Some(ErrorKind::InvalidInteger)
        );
    }

    #[test]
    fn test_decimal_digit_limit() {
        let limits = Limits {
            max_decimal_digits: 3,
            ..Limits::default()
        };
        let err = parse_decimal(LexicalRule::Plain, "1234", &limits).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }

    #[test]
    fn test_widest_integer_field() {
        assert_eq!(widest_integer_field("2024-01-15T10:30:00.123456789Z"), 4);
        assert_eq!(widest_integer_field("P12Y3DT4.0000000000000000000005S"), 2);
        assert_eq!(widest_integer_field("-123456789012-05"), 12);
        assert_eq!(widest_integer_field("PT"), 0);
    }

    #[test]
    fn test_temporal_magnitude_limit() {
        let limits = Limits::default();
        let parse = |primitive: Primitive, text: &str| {
            parse_atomic(primitive, LexicalRule::Plain, text, None, &limits)
        };
        for text in ["P1000000000000000000000000D", "P100000000000000000000Y"] {
            assert!(matches!(parse(Primitive::Duration, text), Err(Error::LimitExceeded(_))));
        }
        assert!(matches!(
            parse(Primitive::GYear, "10000000000000000000000"),
            Err(Error::LimitExceeded(_))
        ));
        assert!(parse(Primitive::Duration, "P999999999999999999Y11M").is_ok());
        assert!(parse(Primitive::GYear, "-999999999999999999").is_ok());

        let strict = Limits::strict();
        let err = parse_atomic(Primitive::GYear, LexicalRule::Plain, "1234567890", None, &strict);
        assert!(matches!(err, Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_float_grammar() {
        assert_eq!(parse_float::<f64>("1.23e10"), Some(1.23e10));
        assert_eq!(parse_float::<f64>("INF"), Some(f64::INFINITY));
        assert_eq!(parse_float::<f32>("-INF"), Some(f32::NEG_INFINITY));
        assert!(parse_float::<f64>("NaN").map_or(false, f64::is_nan));
        assert_eq!(parse_float::<f64>(".5"), Some(0.5));
        assert_eq!(parse_float::<f64>("5."), Some(5.0));

        assert_eq!(parse_float::<f64>("inf"), None);
        assert_eq!(parse_float::<f64>("+INF"), None);
        assert_eq!(parse_float::<f64>("nan"), None);
        assert_eq!(parse_float::<f64>("Infinity"), None);
        assert_eq!(parse_float::<f64>("1e"), None);
        assert_eq!(parse_float::<f64>(""), None);
    }

    #[test]
    fn test_string_rules() {
        assert_eq!(
            kind(parse(Primitive::String, LexicalRule::NormalizedString, "a\tb")),
            Some(ErrorKind::InvalidNormalizedString)
        );
        assert_eq!(
            kind(parse(Primitive::String, LexicalRule::Token, "a  b")),
            Some(ErrorKind::InvalidToken)
        );
        assert_eq!(
            kind(parse(Primitive::String, LexicalRule::Name, "1abc")),
            Some(ErrorKind::InvalidName)
        );
        assert_eq!(
            kind(parse(Primitive::String, LexicalRule::NCName, "a:b")),
            Some(ErrorKind::InvalidNCName)
        );
        assert_eq!(
            kind(parse(Primitive::String, LexicalRule::Nmtoken, "de facto")),
            Some(ErrorKind::InvalidNmtoken)
        );
        assert_eq!(
            kind(parse(Primitive::String, LexicalRule::Language, "en-")),
            Some(ErrorKind::InvalidLanguage(LanguageError::SubsequentTag))
        );
        assert!(parse(Primitive::String, LexicalRule::Plain, "  any\ttext ").is_ok());
    }

    #[test]
    fn test_temporal_error_kinds() {
        assert_eq!(
            kind(parse(Primitive::DateTime, LexicalRule::Plain, "1999-09-16T24:01:00")),
            Some(ErrorKind::InvalidDateTime)
        );
        assert_eq!(
            kind(parse(Primitive::GMonth, LexicalRule::Plain, "--05")),
            Some(ErrorKind::InvalidGMonth)
        );
        assert_eq!(
            kind(parse(Primitive::Duration, LexicalRule::Plain, "P1H")),
            Some(ErrorKind::InvalidDuration)
        );
    }

    #[test]
    fn test_binary() {
        assert_eq!(
            kind(parse(Primitive::HexBinary, LexicalRule::Plain, "0gB7")),
            Some(ErrorKind::InvalidHexBinary)
        );
        assert_eq!(
            kind(parse(Primitive::Base64Binary, LexicalRule::Plain, "=A==")),
            Some(ErrorKind::InvalidBase64Binary)
        );
        assert!(matches!(
            parse(Primitive::Base64Binary, LexicalRule::Plain, ""),
            Ok(NativeValue::Binary(bytes)) if bytes.is_empty()
        ));
    }

    #[test]
    fn test_any_uri() {
        assert!(parse(Primitive::AnyUri, LexicalRule::Plain, "http://example.com/a b").is_ok());
        assert_eq!(
            kind(parse(Primitive::AnyUri, LexicalRule::Plain, "http://x/\u{1}")),
            Some(ErrorKind::InvalidAnyUri)
        );
    }

    #[test]
    fn test_qname_resolution() {
        let bindings = NamespaceBindings::new()
            .bind("foo", "urn:foo")
            .bind_default("urn:default");

        let q = parse_qname("foo:bar", Some(&bindings)).unwrap();
        assert_eq!(q.namespace.as_deref(), Some("urn:foo"));
        assert_eq!(q.prefix.as_deref(), Some("foo"));

        let q = parse_qname("bar", Some(&bindings)).unwrap();
        assert_eq!(q.namespace.as_deref(), Some("urn:default"));

        let q = parse_qname("bar", None).unwrap();
        assert_eq!(q.namespace, None);

        assert!(parse_qname("baz:bar", Some(&bindings)).is_err());
        assert!(parse_qname("foo:bar", None).is_err());
        assert!(parse_qname("foo:", Some(&bindings)).is_err());
    }
}
