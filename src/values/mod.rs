//! Typed value model
//!
//! Every successfully validated lexical value is turned into a [`TypedValue`]:
//! either one [`AtomicValue`] or, for list types, a [`ListValue`] of them.
//! Atomic values carry a [`NativeValue`] whose representation depends on the
//! primitive type, the handle of the declared type, and the primitive itself.

pub mod datetime;
pub mod decimal;
pub mod duration;

pub use datetime::{TemporalKind, XsdDateTime};
pub use decimal::XsdDecimal;
pub use duration::XsdDuration;

use crate::codecs;
use crate::schema::Handle;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// The 19 primitive datatypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    /// `xs:string`
    String,
    /// `xs:boolean`
    Boolean,
    /// `xs:decimal`
    Decimal,
    /// `xs:float`
    Float,
    /// `xs:double`
    Double,
    /// `xs:duration`
    Duration,
    /// `xs:dateTime`
    DateTime,
    /// `xs:time`
    Time,
    /// `xs:date`
    Date,
    /// `xs:gYearMonth`
    GYearMonth,
    /// `xs:gYear`
    GYear,
    /// `xs:gMonthDay`
    GMonthDay,
    /// `xs:gDay`
    GDay,
    /// `xs:gMonth`
    GMonth,
    /// `xs:hexBinary`
    HexBinary,
    /// `xs:base64Binary`
    Base64Binary,
    /// `xs:anyURI`
    AnyUri,
    /// `xs:QName`
    QName,
    /// `xs:NOTATION`
    Notation,
}

impl Primitive {
    /// All primitives in the order of XML Schema Part 2 section 3.2
    pub const ALL: [Primitive; 19] = [
        Primitive::String,
        Primitive::Boolean,
        Primitive::Decimal,
        Primitive::Float,
        Primitive::Double,
        Primitive::Duration,
        Primitive::DateTime,
        Primitive::Time,
        Primitive::Date,
        Primitive::GYearMonth,
        Primitive::GYear,
        Primitive::GMonthDay,
        Primitive::GDay,
        Primitive::GMonth,
        Primitive::HexBinary,
        Primitive::Base64Binary,
        Primitive::AnyUri,
        Primitive::QName,
        Primitive::Notation,
    ];

    /// Local name of the primitive in the XSD namespace
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::Decimal => "decimal",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Duration => "duration",
            Primitive::DateTime => "dateTime",
            Primitive::Time => "time",
            Primitive::Date => "date",
            Primitive::GYearMonth => "gYearMonth",
            Primitive::GYear => "gYear",
            Primitive::GMonthDay => "gMonthDay",
            Primitive::GDay => "gDay",
            Primitive::GMonth => "gMonth",
            Primitive::HexBinary => "hexBinary",
            Primitive::Base64Binary => "base64Binary",
            Primitive::AnyUri => "anyURI",
            Primitive::QName => "QName",
            Primitive::Notation => "NOTATION",
        }
    }

    /// The calendar kind of a date/time primitive
    pub fn temporal_kind(&self) -> Option<TemporalKind> {
        match self {
            Primitive::DateTime => Some(TemporalKind::DateTime),
            Primitive::Time => Some(TemporalKind::Time),
            Primitive::Date => Some(TemporalKind::Date),
            Primitive::GYearMonth => Some(TemporalKind::GYearMonth),
            Primitive::GYear => Some(TemporalKind::GYear),
            Primitive::GMonthDay => Some(TemporalKind::GMonthDay),
            Primitive::GDay => Some(TemporalKind::GDay),
            Primitive::GMonth => Some(TemporalKind::GMonth),
            _ => None,
        }
    }

    /// Whether values of this primitive are totally or partially ordered
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            Primitive::Decimal | Primitive::Float | Primitive::Double | Primitive::Duration
        ) || self.temporal_kind().is_some()
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved `xs:QName` or `xs:NOTATION` value
///
/// Equality ignores the prefix, which is kept only to reproduce the lexical
/// form.
#[derive(Debug, Clone, Serialize)]
pub struct QNameValue {
    /// Namespace name the prefix resolved to
    pub namespace: Option<String>,
    /// Local part
    pub local_name: String,
    /// Prefix used in the source text
    pub prefix: Option<String>,
}

impl PartialEq for QNameValue {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_name == other.local_name
    }
}

impl fmt::Display for QNameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Native representation of an atomic value
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum NativeValue {
    /// Text of the string-like primitives (`string`, `anyURI` and derived types)
    String(String),
    /// `xs:boolean`
    Boolean(bool),
    /// `xs:decimal` and the integer lineage
    Decimal(XsdDecimal),
    /// `xs:float`
    Float(f32),
    /// `xs:double`
    Double(f64),
    /// `xs:duration`
    Duration(XsdDuration),
    /// The eight date/time primitives
    DateTime(XsdDateTime),
    /// Decoded octets of `hexBinary` / `base64Binary`
    Binary(Vec<u8>),
    /// `xs:QName` / `xs:NOTATION`
    QName(QNameValue),
}

fn float_canonical(text: String) -> String {
    match text.as_str() {
        "inf" => "INF".to_string(),
        "-inf" => "-INF".to_string(),
        "NaN" => "NaN".to_string(),
        _ => text.replace('e', "E"),
    }
}

impl NativeValue {
    /// Value-space equality. NaN is equal to itself so that it can be
    /// matched against an enumeration or fixed value.
    pub fn value_eq(&self, other: &NativeValue) -> bool {
        match (self, other) {
            (NativeValue::String(a), NativeValue::String(b)) => a == b,
            (NativeValue::Boolean(a), NativeValue::Boolean(b)) => a == b,
            (NativeValue::Decimal(a), NativeValue::Decimal(b)) => a == b,
            (NativeValue::Float(a), NativeValue::Float(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (NativeValue::Double(a), NativeValue::Double(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (NativeValue::Duration(a), NativeValue::Duration(b)) => a.value_eq(b),
            (NativeValue::DateTime(a), NativeValue::DateTime(b)) => a.value_eq(b),
            (NativeValue::Binary(a), NativeValue::Binary(b)) => a == b,
            (NativeValue::QName(a), NativeValue::QName(b)) => a == b,
            _ => false,
        }
    }

    /// Order two values, `None` when they are unordered or incomparable
    pub fn compare(&self, other: &NativeValue) -> Option<Ordering> {
        match (self, other) {
            (NativeValue::Decimal(a), NativeValue::Decimal(b)) => Some(a.cmp(b)),
            (NativeValue::Float(a), NativeValue::Float(b)) => a.partial_cmp(b),
            (NativeValue::Double(a), NativeValue::Double(b)) => a.partial_cmp(b),
            (NativeValue::Duration(a), NativeValue::Duration(b)) => a.compare(b),
            (NativeValue::DateTime(a), NativeValue::DateTime(b)) => a.compare(b),
            _ => None,
        }
    }

    /// Canonical lexical form
    pub fn canonical(&self, primitive: Primitive) -> String {
        match self {
            NativeValue::String(s) => s.clone(),
            NativeValue::Boolean(b) => b.to_string(),
            NativeValue::Decimal(d) => d.canonical(),
            NativeValue::Float(v) => float_canonical(format!("{:?}", v)),
            NativeValue::Double(v) => float_canonical(format!("{:?}", v)),
            NativeValue::Duration(d) => d.to_string(),
            NativeValue::DateTime(dt) => dt.to_string(),
            NativeValue::Binary(bytes) => match primitive {
                Primitive::Base64Binary => codecs::encode_base64(bytes),
                _ => codecs::encode_hex(bytes),
            },
            NativeValue::QName(q) => q.to_string(),
        }
    }
}

/// A validated atomic value
#[derive(Debug, Clone, Serialize)]
pub struct AtomicValue {
    /// The native value
    pub value: NativeValue,
    /// Handle of the type the value was validated against
    pub type_handle: Handle,
    /// Primitive ancestor of that type
    pub primitive: Primitive,
}

impl AtomicValue {
    /// Create an atomic value
    pub fn new(value: NativeValue, type_handle: Handle, primitive: Primitive) -> Self {
        Self {
            value,
            type_handle,
            primitive,
        }
    }

    /// Value-space equality; values of different primitives are never equal
    pub fn value_eq(&self, other: &AtomicValue) -> bool {
        self.primitive == other.primitive && self.value.value_eq(&other.value)
    }

    /// Order relation of the primitive
    pub fn compare(&self, other: &AtomicValue) -> Option<Ordering> {
        if self.primitive != other.primitive {
            return None;
        }
        self.value.compare(&other.value)
    }

    /// Length as measured by the length facets: octets for binary values,
    /// characters for string-like values
    pub fn length(&self) -> Option<usize> {
        match &self.value {
            NativeValue::String(s) => Some(s.chars().count()),
            NativeValue::Binary(bytes) => Some(bytes.len()),
            NativeValue::QName(q) => Some(q.to_string().chars().count()),
            _ => None,
        }
    }

    /// Canonical lexical form
    pub fn canonical(&self) -> String {
        self.value.canonical(self.primitive)
    }

    /// The decimal value, for `xs:decimal` and its derivations
    pub fn as_decimal(&self) -> Option<&XsdDecimal> {
        match &self.value {
            NativeValue::Decimal(d) => Some(d),
            _ => None,
        }
    }
}

/// A validated list value
#[derive(Debug, Clone, Serialize)]
pub struct ListValue {
    /// Handle of the list's item type
    pub item_type: Handle,
    /// Items in document order
    pub items: Vec<AtomicValue>,
}

impl ListValue {
    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Member-wise value equality
    pub fn value_eq(&self, other: &ListValue) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.value_eq(b))
    }

    /// Item canonicals separated by single spaces
    pub fn canonical(&self) -> String {
        self.items
            .iter()
            .map(AtomicValue::canonical)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The typed value produced by a successful validation
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    /// Value of an atomic type, or of the winning member of a union
    Atomic(AtomicValue),
    /// Value of a list type
    List(ListValue),
}

impl TypedValue {
    /// Value-space equality: atomic values by their primitive's equality,
    /// lists item by item
    pub fn value_eq(&self, other: &TypedValue) -> bool {
        match (self, other) {
            (TypedValue::Atomic(a), TypedValue::Atomic(b)) => a.value_eq(b),
            (TypedValue::List(a), TypedValue::List(b)) => a.value_eq(b),
            _ => false,
        }
    }

    /// Canonical lexical form
    pub fn canonical(&self) -> String {
        match self {
            TypedValue::Atomic(a) => a.canonical(),
            TypedValue::List(l) => l.canonical(),
        }
    }

    /// The atomic value, if this is not a list
    pub fn as_atomic(&self) -> Option<&AtomicValue> {
        match self {
            TypedValue::Atomic(a) => Some(a),
            TypedValue::List(_) => None,
        }
    }

    /// The list value, if this is one
    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            TypedValue::List(l) => Some(l),
            TypedValue::Atomic(_) => None,
        }
    }
}
