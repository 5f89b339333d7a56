//! XSD built-in types
//!
//! This module defines the built-in primitive and derived simple types of
//! XML Schema 1.0 and the facets each family admits. The registry is turned
//! into schema components by [`SchemaGraphBuilder`](crate::schema::SchemaGraphBuilder).

use crate::validators::facets::WhiteSpace;
use crate::validators::lexical::LexicalRule;
use crate::values::Primitive;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// XSD Namespace Constants
// =============================================================================

/// XSD 1.0 Namespace
pub const XSD_NAMESPACE: &str = crate::XSD_NAMESPACE;

// =============================================================================
// Facet Names
// =============================================================================

/// XSD length facet name
pub const XSD_LENGTH: &str = "length";
/// XSD minLength facet name
pub const XSD_MIN_LENGTH: &str = "minLength";
/// XSD maxLength facet name
pub const XSD_MAX_LENGTH: &str = "maxLength";
/// XSD pattern facet name
pub const XSD_PATTERN: &str = "pattern";
/// XSD enumeration facet name
pub const XSD_ENUMERATION: &str = "enumeration";
/// XSD whiteSpace facet name
pub const XSD_WHITE_SPACE: &str = "whiteSpace";
/// XSD maxInclusive facet name
pub const XSD_MAX_INCLUSIVE: &str = "maxInclusive";
/// XSD maxExclusive facet name
pub const XSD_MAX_EXCLUSIVE: &str = "maxExclusive";
/// XSD minInclusive facet name
pub const XSD_MIN_INCLUSIVE: &str = "minInclusive";
/// XSD minExclusive facet name
pub const XSD_MIN_EXCLUSIVE: &str = "minExclusive";
/// XSD totalDigits facet name
pub const XSD_TOTAL_DIGITS: &str = "totalDigits";
/// XSD fractionDigits facet name
pub const XSD_FRACTION_DIGITS: &str = "fractionDigits";

// =============================================================================
// Admitted Facets Sets
// =============================================================================

lazy_static::lazy_static! {
    /// Facets admitted for string, binary, anyURI and QName types
    pub static ref STRING_FACETS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert(XSD_LENGTH);
        s.insert(XSD_MIN_LENGTH);
        s.insert(XSD_MAX_LENGTH);
        s.insert(XSD_PATTERN);
        s.insert(XSD_ENUMERATION);
        s.insert(XSD_WHITE_SPACE);
        s
    };

    /// Facets admitted for boolean type
    pub static ref BOOLEAN_FACETS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert(XSD_PATTERN);
        s.insert(XSD_WHITE_SPACE);
        s
    };

    /// Facets admitted for float/double types
    pub static ref FLOAT_FACETS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert(XSD_PATTERN);
        s.insert(XSD_ENUMERATION);
        s.insert(XSD_WHITE_SPACE);
        s.insert(XSD_MAX_INCLUSIVE);
        s.insert(XSD_MAX_EXCLUSIVE);
        s.insert(XSD_MIN_INCLUSIVE);
        s.insert(XSD_MIN_EXCLUSIVE);
        s
    };

    /// Facets admitted for decimal types
    pub static ref DECIMAL_FACETS: HashSet<&'static str> = {
        let mut s = FLOAT_FACETS.clone();
        s.insert(XSD_TOTAL_DIGITS);
        s.insert(XSD_FRACTION_DIGITS);
        s
    };

    /// Facets admitted for duration and date/time types
    pub static ref DATETIME_FACETS: HashSet<&'static str> = FLOAT_FACETS.clone();

    /// Facets admitted for list types
    pub static ref LIST_FACETS: HashSet<&'static str> = STRING_FACETS.clone();

    /// Facets admitted for union types
    pub static ref UNION_FACETS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert(XSD_PATTERN);
        s.insert(XSD_ENUMERATION);
        s
    };
}

/// Facets admitted by atomic types with the given primitive ancestor
pub fn admitted_facets(primitive: Primitive) -> &'static HashSet<&'static str> {
    match primitive {
        Primitive::Boolean => &BOOLEAN_FACETS,
        Primitive::Float | Primitive::Double => &FLOAT_FACETS,
        Primitive::Decimal => &DECIMAL_FACETS,
        Primitive::Duration
        | Primitive::DateTime
        | Primitive::Time
        | Primitive::Date
        | Primitive::GYearMonth
        | Primitive::GYear
        | Primitive::GMonthDay
        | Primitive::GDay
        | Primitive::GMonth => &DATETIME_FACETS,
        Primitive::String
        | Primitive::HexBinary
        | Primitive::Base64Binary
        | Primitive::AnyUri
        | Primitive::QName
        | Primitive::Notation => &STRING_FACETS,
    }
}

// =============================================================================
// Built-in Type Definition
// =============================================================================

/// The built-in simple types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Builtin {
    /// `xs:anySimpleType`
    AnySimpleType,
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
    /// `xs:normalizedString`
    NormalizedString,
    /// `xs:token`
    Token,
    /// `xs:language`
    Language,
    /// `xs:Name`
    Name,
    /// `xs:NCName`
    NCName,
    /// `xs:ID`
    Id,
    /// `xs:IDREF`
    IdRef,
    /// `xs:ENTITY`
    Entity,
    /// `xs:NMTOKEN`
    Nmtoken,
    /// `xs:NMTOKENS`
    Nmtokens,
    /// `xs:IDREFS`
    IdRefs,
    /// `xs:ENTITIES`
    Entities,
    /// `xs:integer`
    Integer,
    /// `xs:nonPositiveInteger`
    NonPositiveInteger,
    /// `xs:negativeInteger`
    NegativeInteger,
    /// `xs:long`
    Long,
    /// `xs:int`
    Int,
    /// `xs:short`
    Short,
    /// `xs:byte`
    Byte,
    /// `xs:nonNegativeInteger`
    NonNegativeInteger,
    /// `xs:unsignedLong`
    UnsignedLong,
    /// `xs:unsignedInt`
    UnsignedInt,
    /// `xs:unsignedShort`
    UnsignedShort,
    /// `xs:unsignedByte`
    UnsignedByte,
    /// `xs:positiveInteger`
    PositiveInteger,
}

impl Builtin {
    /// Registry entry of this built-in
    pub fn info(&self) -> &'static BuiltinType {
        BUILTIN_TYPES
            .iter()
            .find(|t| t.builtin == *self)
            .unwrap_or(&BUILTIN_TYPES[0])
    }

    /// Local name in the XSD namespace
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// The built-in whose type is the given primitive
    pub fn from_primitive(primitive: Primitive) -> Builtin {
        match primitive {
            Primitive::String => Builtin::String,
            Primitive::Boolean => Builtin::Boolean,
            Primitive::Decimal => Builtin::Decimal,
            Primitive::Float => Builtin::Float,
            Primitive::Double => Builtin::Double,
            Primitive::Duration => Builtin::Duration,
            Primitive::DateTime => Builtin::DateTime,
            Primitive::Time => Builtin::Time,
            Primitive::Date => Builtin::Date,
            Primitive::GYearMonth => Builtin::GYearMonth,
            Primitive::GYear => Builtin::GYear,
            Primitive::GMonthDay => Builtin::GMonthDay,
            Primitive::GDay => Builtin::GDay,
            Primitive::GMonth => Builtin::GMonth,
            Primitive::HexBinary => Builtin::HexBinary,
            Primitive::Base64Binary => Builtin::Base64Binary,
            Primitive::AnyUri => Builtin::AnyUri,
            Primitive::QName => Builtin::QName,
            Primitive::Notation => Builtin::Notation,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xs:{}", self.name())
    }
}

/// Shape of a built-in type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinShape {
    /// Atomic type with its primitive ancestor
    Atomic(Primitive),
    /// List of the given item type, with at least one item
    List(Builtin),
}

/// Definition of a built-in XSD type
#[derive(Debug, Clone)]
pub struct BuiltinType {
    /// Which built-in
    pub builtin: Builtin,
    /// Type name (local name without namespace)
    pub name: &'static str,
    /// Base type (`None` only for anySimpleType)
    pub base: Option<Builtin>,
    /// Atomic or list
    pub shape: BuiltinShape,
    /// White space handling, `None` passes text through untouched
    pub white_space: Option<WhiteSpace>,
    /// Lexical constraint beyond the primitive's grammar
    pub rule: LexicalRule,
    /// Lower bound of the integer value space
    pub min_inclusive: Option<i128>,
    /// Upper bound of the integer value space
    pub max_inclusive: Option<i128>,
}

impl BuiltinType {
    /// Check if this type is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.shape,
            BuiltinShape::Atomic(Primitive::Decimal | Primitive::Float | Primitive::Double)
        )
    }

    /// Check if this type derives from `xs:integer`
    pub fn is_integer(&self) -> bool {
        self.rule == LexicalRule::Integer
    }

    /// Check if this type is a string type
    pub fn is_string(&self) -> bool {
        self.shape == BuiltinShape::Atomic(Primitive::String)
    }

    /// Check if this type is a date/time type
    pub fn is_datetime(&self) -> bool {
        match self.shape {
            BuiltinShape::Atomic(p) => p == Primitive::Duration || p.temporal_kind().is_some(),
            BuiltinShape::List(_) => false,
        }
    }
}

fn primitive(builtin: Builtin, primitive: Primitive) -> BuiltinType {
    let white_space = match primitive {
        Primitive::String => WhiteSpace::Preserve,
        _ => WhiteSpace::Collapse,
    };
    BuiltinType {
        builtin,
        name: primitive.name(),
        base: Some(Builtin::AnySimpleType),
        shape: BuiltinShape::Atomic(primitive),
        white_space: Some(white_space),
        rule: LexicalRule::Plain,
        min_inclusive: None,
        max_inclusive: None,
    }
}

fn string_type(
    builtin: Builtin,
    name: &'static str,
    base: Builtin,
    white_space: WhiteSpace,
    rule: LexicalRule,
) -> BuiltinType {
    BuiltinType {
        builtin,
        name,
        base: Some(base),
        shape: BuiltinShape::Atomic(Primitive::String),
        white_space: Some(white_space),
        rule,
        min_inclusive: None,
        max_inclusive: None,
    }
}

fn integer_type(
    builtin: Builtin,
    name: &'static str,
    base: Builtin,
    min: Option<i128>,
    max: Option<i128>,
) -> BuiltinType {
    BuiltinType {
        builtin,
        name,
        base: Some(base),
        shape: BuiltinShape::Atomic(Primitive::Decimal),
        white_space: Some(WhiteSpace::Collapse),
        rule: LexicalRule::Integer,
        min_inclusive: min,
        max_inclusive: max,
    }
}

fn list_type(builtin: Builtin, name: &'static str, item: Builtin) -> BuiltinType {
    BuiltinType {
        builtin,
        name,
        base: Some(Builtin::AnySimpleType),
        shape: BuiltinShape::List(item),
        white_space: Some(WhiteSpace::Collapse),
        rule: LexicalRule::Plain,
        min_inclusive: None,
        max_inclusive: None,
    }
}

// =============================================================================
// Built-in Type Registry
// =============================================================================

lazy_static::lazy_static! {
    /// Registry of all built-in XSD types, every base before its derivations
    pub static ref BUILTIN_TYPES: Vec<BuiltinType> = vec![
        // Special types
        BuiltinType {
            builtin: Builtin::AnySimpleType,
            name: "anySimpleType",
            base: None,
            shape: BuiltinShape::Atomic(Primitive::String),
            white_space: None,
            rule: LexicalRule::Plain,
            min_inclusive: None,
            max_inclusive: None,
        },

        // Primitive types
        primitive(Builtin::String, Primitive::String),
        primitive(Builtin::Boolean, Primitive::Boolean),
        primitive(Builtin::Decimal, Primitive::Decimal),
        primitive(Builtin::Float, Primitive::Float),
        primitive(Builtin::Double, Primitive::Double),
        primitive(Builtin::Duration, Primitive::Duration),
        primitive(Builtin::DateTime, Primitive::DateTime),
        primitive(Builtin::Time, Primitive::Time),
        primitive(Builtin::Date, Primitive::Date),
        primitive(Builtin::GYearMonth, Primitive::GYearMonth),
        primitive(Builtin::GYear, Primitive::GYear),
        primitive(Builtin::GMonthDay, Primitive::GMonthDay),
        primitive(Builtin::GDay, Primitive::GDay),
        primitive(Builtin::GMonth, Primitive::GMonth),
        primitive(Builtin::HexBinary, Primitive::HexBinary),
        primitive(Builtin::Base64Binary, Primitive::Base64Binary),
        primitive(Builtin::AnyUri, Primitive::AnyUri),
        primitive(Builtin::QName, Primitive::QName),
        primitive(Builtin::Notation, Primitive::Notation),

        // Derived string types
        string_type(Builtin::NormalizedString, "normalizedString", Builtin::String,
            WhiteSpace::Replace, LexicalRule::NormalizedString),
        string_type(Builtin::Token, "token", Builtin::NormalizedString,
            WhiteSpace::Collapse, LexicalRule::Token),
        string_type(Builtin::Language, "language", Builtin::Token,
            WhiteSpace::Collapse, LexicalRule::Language),
        string_type(Builtin::Name, "Name", Builtin::Token,
            WhiteSpace::Collapse, LexicalRule::Name),
        string_type(Builtin::NCName, "NCName", Builtin::Name,
            WhiteSpace::Collapse, LexicalRule::NCName),
        string_type(Builtin::Id, "ID", Builtin::NCName,
            WhiteSpace::Collapse, LexicalRule::NCName),
        string_type(Builtin::IdRef, "IDREF", Builtin::NCName,
            WhiteSpace::Collapse, LexicalRule::NCName),
        string_type(Builtin::Entity, "ENTITY", Builtin::NCName,
            WhiteSpace::Collapse, LexicalRule::NCName),
        string_type(Builtin::Nmtoken, "NMTOKEN", Builtin::Token,
            WhiteSpace::Collapse, LexicalRule::Nmtoken),

        // Built-in lists
        list_type(Builtin::Nmtokens, "NMTOKENS", Builtin::Nmtoken),
        list_type(Builtin::IdRefs, "IDREFS", Builtin::IdRef),
        list_type(Builtin::Entities, "ENTITIES", Builtin::Entity),

        // Integer lineage
        integer_type(Builtin::Integer, "integer", Builtin::Decimal, None, None),
        integer_type(Builtin::NonPositiveInteger, "nonPositiveInteger", Builtin::Integer,
            None, Some(0)),
        integer_type(Builtin::NegativeInteger, "negativeInteger", Builtin::NonPositiveInteger,
            None, Some(-1)),
        integer_type(Builtin::Long, "long", Builtin::Integer,
            Some(i128::from(i64::MIN)), Some(i128::from(i64::MAX))),
        integer_type(Builtin::Int, "int", Builtin::Long,
            Some(i128::from(i32::MIN)), Some(i128::from(i32::MAX))),
        integer_type(Builtin::Short, "short", Builtin::Int,
            Some(i128::from(i16::MIN)), Some(i128::from(i16::MAX))),
        integer_type(Builtin::Byte, "byte", Builtin::Short,
            Some(i128::from(i8::MIN)), Some(i128::from(i8::MAX))),
        integer_type(Builtin::NonNegativeInteger, "nonNegativeInteger", Builtin::Integer,
            Some(0), None),
        integer_type(Builtin::UnsignedLong, "unsignedLong", Builtin::NonNegativeInteger,
            Some(0), Some(i128::from(u64::MAX))),
        integer_type(Builtin::UnsignedInt, "unsignedInt", Builtin::UnsignedLong,
            Some(0), Some(i128::from(u32::MAX))),
        integer_type(Builtin::UnsignedShort, "unsignedShort", Builtin::UnsignedInt,
            Some(0), Some(i128::from(u16::MAX))),
        integer_type(Builtin::UnsignedByte, "unsignedByte", Builtin::UnsignedShort,
            Some(0), Some(i128::from(u8::MAX))),
        integer_type(Builtin::PositiveInteger, "positiveInteger", Builtin::NonNegativeInteger,
            Some(1), None),
    ];
}

/// Get a built-in type by local name
pub fn get_builtin_type(name: &str) -> Option<&'static BuiltinType> {
    BUILTIN_TYPES.iter().find(|t| t.name == name)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let mut seen = HashSet::new();
        for builtin in BUILTIN_TYPES.iter() {
            if let Some(base) = builtin.base {
                assert!(seen.contains(&base), "{} registered before its base", builtin.name);
            }
            if let BuiltinShape::List(item) = builtin.shape {
                assert!(seen.contains(&item), "{} registered before its item", builtin.name);
            }
            assert!(seen.insert(builtin.builtin), "{} registered twice", builtin.name);
        }
        assert_eq!(seen.len(), 45);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(get_builtin_type("NMTOKENS").map(|t| t.builtin), Some(Builtin::Nmtokens));
        assert_eq!(get_builtin_type("gMonthDay").map(|t| t.builtin), Some(Builtin::GMonthDay));
        assert!(get_builtin_type("anyType").is_none());
        assert_eq!(Builtin::UnsignedShort.name(), "unsignedShort");
        assert_eq!(Builtin::QName.to_string(), "xs:QName");
    }

    #[test]
    fn test_type_categories() {
        assert!(Builtin::Byte.info().is_numeric());
        assert!(Builtin::Byte.info().is_integer());
        assert!(!Builtin::Decimal.info().is_integer());
        assert!(Builtin::Language.info().is_string());
        assert!(Builtin::GDay.info().is_datetime());
        assert!(Builtin::Duration.info().is_datetime());
        assert!(!Builtin::Nmtokens.info().is_string());
    }

    #[test]
    fn test_whitespace_policies() {
        assert_eq!(Builtin::AnySimpleType.info().white_space, None);
        assert_eq!(Builtin::String.info().white_space, Some(WhiteSpace::Preserve));
        assert_eq!(Builtin::NormalizedString.info().white_space, Some(WhiteSpace::Replace));
        assert_eq!(Builtin::Double.info().white_space, Some(WhiteSpace::Collapse));
    }

    #[test]
    fn test_admitted_facets() {
        assert!(admitted_facets(Primitive::Decimal).contains(XSD_FRACTION_DIGITS));
        assert!(!admitted_facets(Primitive::Double).contains(XSD_FRACTION_DIGITS));
        assert!(!admitted_facets(Primitive::Boolean).contains(XSD_ENUMERATION));
        assert!(admitted_facets(Primitive::HexBinary).contains(XSD_LENGTH));
        assert!(!UNION_FACETS.contains(XSD_LENGTH));
    }

    #[test]
    fn test_primitive_round_trip() {
        for p in Primitive::ALL {
            assert_eq!(Builtin::from_primitive(p).name(), p.name());
        }
    }
}
