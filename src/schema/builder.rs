//! Schema graph construction
//!
//! [`SchemaGraphBuilder`] starts from a graph holding every built-in type and
//! adds user-defined components one at a time. Facet values and declared
//! default/fixed values are validated as they are added, so a built
//! [`SchemaGraph`] never holds a component that could not be used.

use crate::error::{Error, ParseError, Result};
use crate::namespaces::{NamespaceBindings, QName};
use crate::schema::{
    AttributeDecl, AttributeUseDef, ComplexTypeDef, ConstraintKind, ContentKind, ElementDecl,
    Handle, Node, SchemaGraph, SimpleTypeDef, ValueConstraint, Variety,
};
use crate::validators::builtins::{
    admitted_facets, Builtin, BuiltinShape, BUILTIN_TYPES, LIST_FACETS, UNION_FACETS,
    XSD_ENUMERATION, XSD_FRACTION_DIGITS, XSD_LENGTH, XSD_MAX_EXCLUSIVE, XSD_MAX_INCLUSIVE,
    XSD_MAX_LENGTH, XSD_MIN_EXCLUSIVE, XSD_MIN_INCLUSIVE, XSD_MIN_LENGTH, XSD_NAMESPACE,
    XSD_PATTERN, XSD_TOTAL_DIGITS, XSD_WHITE_SPACE,
};
use crate::validators::facets::{
    EnumerationFacet, FacetSet, FractionDigitsFacet, LengthFacet, MaxLengthFacet,
    MinLengthFacet, PatternFacet, RangeFacet, RangeKind, TotalDigitsFacet, WhiteSpace,
};
use crate::validators::lexical::LexicalRule;
use crate::validators::simple_types::SimpleTypeValidator;
use crate::values::{AtomicValue, NativeValue, Primitive, TypedValue, XsdDecimal};
use std::collections::HashSet;
use tracing::debug;

/// Facets of a derivation by restriction, in lexical form
///
/// Bounds and enumeration values are parsed against the base type when the
/// restriction is added to the graph.
#[derive(Debug, Clone, Default)]
pub struct Restriction {
    name: Option<QName>,
    white_space: Option<WhiteSpace>,
    length: Option<usize>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    total_digits: Option<u32>,
    fraction_digits: Option<u32>,
    ranges: Vec<(RangeKind, String)>,
    enumeration: Vec<String>,
    patterns: Vec<String>,
}

impl Restriction {
    /// Create an anonymous restriction with no facets
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the derived type
    pub fn named(mut self, name: QName) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the whiteSpace facet
    pub fn white_space(mut self, white_space: WhiteSpace) -> Self {
        self.white_space = Some(white_space);
        self
    }

    /// Set the length facet
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the minLength facet
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Set the maxLength facet
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the totalDigits facet
    pub fn total_digits(mut self, total_digits: u32) -> Self {
        self.total_digits = Some(total_digits);
        self
    }

    /// Set the fractionDigits facet
    pub fn fraction_digits(mut self, fraction_digits: u32) -> Self {
        self.fraction_digits = Some(fraction_digits);
        self
    }

    /// Set the minInclusive facet
    pub fn min_inclusive(self, value: impl Into<String>) -> Self {
        self.range(RangeKind::MinInclusive, value)
    }

    /// Set the maxInclusive facet
    pub fn max_inclusive(self, value: impl Into<String>) -> Self {
        self.range(RangeKind::MaxInclusive, value)
    }

    /// Set the minExclusive facet
    pub fn min_exclusive(self, value: impl Into<String>) -> Self {
        self.range(RangeKind::MinExclusive, value)
    }

    /// Set the maxExclusive facet
    pub fn max_exclusive(self, value: impl Into<String>) -> Self {
        self.range(RangeKind::MaxExclusive, value)
    }

    fn range(mut self, kind: RangeKind, value: impl Into<String>) -> Self {
        self.ranges.retain(|(k, _)| *k != kind);
        self.ranges.push((kind, value.into()));
        self
    }

    /// Add an enumeration value
    pub fn enumeration(mut self, value: impl Into<String>) -> Self {
        self.enumeration.push(value.into());
        self
    }

    /// Add a pattern (recorded, not enforced)
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    fn facet_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.white_space.is_some() {
            names.push(XSD_WHITE_SPACE);
        }
        if self.length.is_some() {
            names.push(XSD_LENGTH);
        }
        if self.min_length.is_some() {
            names.push(XSD_MIN_LENGTH);
        }
        if self.max_length.is_some() {
            names.push(XSD_MAX_LENGTH);
        }
        if self.total_digits.is_some() {
            names.push(XSD_TOTAL_DIGITS);
        }
        if self.fraction_digits.is_some() {
            names.push(XSD_FRACTION_DIGITS);
        }
        for (kind, _) in &self.ranges {
            names.push(range_facet_name(*kind));
        }
        if !self.enumeration.is_empty() {
            names.push(XSD_ENUMERATION);
        }
        if !self.patterns.is_empty() {
            names.push(XSD_PATTERN);
        }
        names
    }
}

fn range_facet_name(kind: RangeKind) -> &'static str {
    match kind {
        RangeKind::MinInclusive => XSD_MIN_INCLUSIVE,
        RangeKind::MaxInclusive => XSD_MAX_INCLUSIVE,
        RangeKind::MinExclusive => XSD_MIN_EXCLUSIVE,
        RangeKind::MaxExclusive => XSD_MAX_EXCLUSIVE,
    }
}

/// A default or fixed value to declare on an attribute or element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Default value
    Default(String),
    /// Fixed value
    Fixed(String),
}

impl Constraint {
    /// A default value
    pub fn default_value(text: impl Into<String>) -> Self {
        Constraint::Default(text.into())
    }

    /// A fixed value
    pub fn fixed(text: impl Into<String>) -> Self {
        Constraint::Fixed(text.into())
    }
}

/// Builds a [`SchemaGraph`]
#[derive(Debug, Clone)]
pub struct SchemaGraphBuilder {
    graph: SchemaGraph,
    bindings: NamespaceBindings,
}

impl Default for SchemaGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaGraphBuilder {
    /// Create a builder whose graph holds the built-in types
    pub fn new() -> Self {
        let mut builder = Self {
            graph: SchemaGraph::default(),
            bindings: NamespaceBindings::new(),
        };
        builder.register_builtins();
        builder
    }

    fn register_builtins(&mut self) {
        for info in BUILTIN_TYPES.iter() {
            let base = info
                .base
                .map_or(Handle::ABSENT, |b| self.graph.builtin(b));
            let base_facets = self
                .graph
                .simple_type(base)
                .map(|def| def.facets.clone())
                .unwrap_or_default();
            let handle = Handle::new(self.graph.len() as u32);

            let (variety, facets) = match info.shape {
                BuiltinShape::Atomic(primitive) => {
                    // primitives start afresh from the ur-type
                    let mut facets = match info.base {
                        None | Some(Builtin::AnySimpleType) => FacetSet::default(),
                        Some(_) => base_facets,
                    };
                    facets.white_space = info.white_space;
                    if info.rule == LexicalRule::Integer {
                        facets.fraction_digits = Some(FractionDigitsFacet::new(0));
                    }
                    let bound = |value: i128| {
                        AtomicValue::new(
                            NativeValue::Decimal(XsdDecimal::from_i128(value)),
                            handle,
                            Primitive::Decimal,
                        )
                    };
                    if let Some(min) = info.min_inclusive {
                        facets.min_inclusive =
                            Some(RangeFacet::new(RangeKind::MinInclusive, bound(min)));
                    }
                    if let Some(max) = info.max_inclusive {
                        facets.max_inclusive =
                            Some(RangeFacet::new(RangeKind::MaxInclusive, bound(max)));
                    }
                    (Variety::Atomic { primitive }, facets)
                }
                BuiltinShape::List(item) => {
                    let facets = FacetSet {
                        white_space: info.white_space,
                        min_length: Some(MinLengthFacet::new(1)),
                        ..Default::default()
                    };
                    let item_type = self.graph.builtin(item);
                    (Variety::List { item_type }, facets)
                }
            };

            let name = QName::namespaced(XSD_NAMESPACE, info.name);
            let pushed = self.graph.push(Node::SimpleType(SimpleTypeDef {
                name: Some(name.clone()),
                base,
                variety,
                builtin: Some(info.builtin),
                rule: info.rule,
                facets,
            }));
            self.graph.register_builtin(info.builtin, pushed);
            self.graph.register_type(name, pushed);
        }
    }

    /// Handle of a built-in type
    pub fn builtin(&self, builtin: Builtin) -> Handle {
        self.graph.builtin(builtin)
    }

    /// Graph built so far
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Namespace bindings used to resolve QName-valued facets and
    /// default/fixed values added from now on
    pub fn set_bindings(&mut self, bindings: NamespaceBindings) {
        self.bindings = bindings;
    }

    /// Derive a simple type from `base` by restriction
    ///
    /// The derived type inherits the facets of `base`; facets named in
    /// `restriction` replace the inherited ones. Facets the base's variety
    /// or primitive does not admit are rejected.
    pub fn restrict(&mut self, base: Handle, restriction: Restriction) -> Result<Handle> {
        let component = restriction
            .name
            .as_ref()
            .map_or_else(|| "(anonymous)".to_string(), QName::to_string);
        let base_def = self
            .graph
            .simple_type(base)
            .ok_or_else(|| {
                ParseError::new(format!("base {} is not a simple type", base))
                    .with_component(component.clone())
            })?
            .clone();

        let admitted: &HashSet<&'static str> = match &base_def.variety {
            Variety::Atomic { primitive } => admitted_facets(*primitive),
            Variety::List { .. } => &*LIST_FACETS,
            Variety::Union { .. } => &*UNION_FACETS,
        };
        for facet in restriction.facet_names() {
            if !admitted.contains(facet) {
                return Err(ParseError::new(format!(
                    "facet '{}' is not admitted by base type {}",
                    facet,
                    base_def.display_name()
                ))
                .with_component(component)
                .into());
            }
        }

        let mut facets = base_def.facets.clone();

        if let Some(white_space) = restriction.white_space {
            if matches!(facets.white_space, Some(inherited) if white_space < inherited) {
                return Err(ParseError::new(format!(
                    "whiteSpace '{}' is less restrictive than the inherited value",
                    white_space
                ))
                .with_component(component)
                .into());
            }
            facets.white_space = Some(white_space);
        }
        if let Some(length) = restriction.length {
            facets.length = Some(LengthFacet::new(length));
        }
        if let Some(min_length) = restriction.min_length {
            facets.min_length = Some(MinLengthFacet::new(min_length));
        }
        if let Some(max_length) = restriction.max_length {
            facets.max_length = Some(MaxLengthFacet::new(max_length));
        }
        if let Some(total_digits) = restriction.total_digits {
            facets.total_digits = Some(TotalDigitsFacet::new(total_digits));
        }
        if let Some(fraction_digits) = restriction.fraction_digits {
            facets.fraction_digits = Some(FractionDigitsFacet::new(fraction_digits));
        }
        check_consistency(&facets).map_err(|msg| {
            Error::from(ParseError::new(msg).with_component(component.clone()))
        })?;

        {
            let validator = SimpleTypeValidator::new(&self.graph);
            for (kind, text) in &restriction.ranges {
                let value = self.parse_facet_value(
                    &validator,
                    base,
                    text,
                    range_facet_name(*kind),
                    &component,
                )?;
                match value {
                    TypedValue::Atomic(atomic) => {
                        *facets.range_mut(*kind) = Some(RangeFacet::new(*kind, atomic));
                    }
                    TypedValue::List(_) => {
                        return Err(ParseError::new(format!(
                            "{} requires an atomic base type",
                            range_facet_name(*kind)
                        ))
                        .with_component(component)
                        .into())
                    }
                }
            }
            if !restriction.enumeration.is_empty() {
                let mut values = Vec::with_capacity(restriction.enumeration.len());
                for text in &restriction.enumeration {
                    values.push(self.parse_facet_value(
                        &validator,
                        base,
                        text,
                        XSD_ENUMERATION,
                        &component,
                    )?);
                }
                facets.enumeration = Some(EnumerationFacet::new(values));
            }
        }

        facets
            .patterns
            .extend(restriction.patterns.iter().map(PatternFacet::new));

        let handle = self.graph.push(Node::SimpleType(SimpleTypeDef {
            name: restriction.name.clone(),
            base,
            variety: base_def.variety.clone(),
            builtin: None,
            rule: base_def.rule,
            facets,
        }));
        if let Some(name) = restriction.name {
            self.graph.register_type(name, handle);
        }
        debug!(handle = %handle, component = %component, "registered restricted simple type");
        Ok(handle)
    }

    fn parse_facet_value(
        &self,
        validator: &SimpleTypeValidator<'_>,
        base: Handle,
        text: &str,
        facet: &str,
        component: &str,
    ) -> Result<TypedValue> {
        match validator.validate_type(base, text, Some(&self.bindings)) {
            Ok(value) => Ok(value),
            Err(Error::Validation(cause)) => Err(ParseError::new(format!(
                "invalid {} value '{}'",
                facet, text
            ))
            .with_component(component)
            .with_cause(cause)
            .into()),
            Err(other) => Err(other),
        }
    }

    /// Define a list type over `item_type`
    pub fn list(&mut self, name: Option<QName>, item_type: Handle) -> Result<Handle> {
        let component = display(&name);
        match self.graph.variety(item_type) {
            None => {
                return Err(ParseError::new(format!("item type {} is not a simple type", item_type))
                    .with_component(component)
                    .into())
            }
            Some(_) if self.contains_list(item_type) => {
                return Err(ParseError::new("the item type of a list cannot be a list")
                    .with_component(component)
                    .into())
            }
            Some(_) => {}
        }

        let handle = self.graph.push(Node::SimpleType(SimpleTypeDef {
            name: name.clone(),
            base: self.graph.builtin(Builtin::AnySimpleType),
            variety: Variety::List { item_type },
            builtin: None,
            rule: LexicalRule::Plain,
            facets: FacetSet {
                white_space: Some(WhiteSpace::Collapse),
                ..Default::default()
            },
        }));
        if let Some(name) = name {
            self.graph.register_type(name, handle);
        }
        debug!(
            handle = %handle,
            item_type = %item_type,
            component = %component,
            "registered list type"
        );
        Ok(handle)
    }

    fn contains_list(&self, ty: Handle) -> bool {
        match self.graph.variety(ty) {
            Some(Variety::List { .. }) => true,
            Some(Variety::Union { member_types }) => {
                member_types.iter().any(|m| self.contains_list(*m))
            }
            _ => false,
        }
    }

    /// Define a union of `member_types`, tried in the given order
    pub fn union(&mut self, name: Option<QName>, member_types: Vec<Handle>) -> Result<Handle> {
        let component = display(&name);
        if member_types.is_empty() {
            return Err(ParseError::new("a union needs at least one member type")
                .with_component(component)
                .into());
        }
        if let Some(bad) = member_types
            .iter()
            .find(|m| self.graph.simple_type(**m).is_none())
        {
            return Err(ParseError::new(format!("member type {} is not a simple type", bad))
                .with_component(component)
                .into());
        }

        let handle = self.graph.push(Node::SimpleType(SimpleTypeDef {
            name: name.clone(),
            base: self.graph.builtin(Builtin::AnySimpleType),
            variety: Variety::Union { member_types },
            builtin: None,
            rule: LexicalRule::Plain,
            facets: FacetSet::default(),
        }));
        if let Some(name) = name {
            self.graph.register_type(name, handle);
        }
        debug!(handle = %handle, component = %component, "registered union type");
        Ok(handle)
    }

    /// Define a complex type. `simple_type` is required for simple content
    /// and ignored otherwise.
    pub fn complex_type(
        &mut self,
        name: Option<QName>,
        content: ContentKind,
        simple_type: Option<Handle>,
    ) -> Result<Handle> {
        let component = display(&name);
        let simple_type = match (content, simple_type) {
            (ContentKind::Simple, Some(ty)) if self.graph.simple_type(ty).is_some() => ty,
            (ContentKind::Simple, _) => {
                return Err(ParseError::new("simple content requires a simple type")
                    .with_component(component)
                    .into())
            }
            _ => Handle::ABSENT,
        };

        let handle = self.graph.push(Node::ComplexType(ComplexTypeDef {
            name: name.clone(),
            content,
            simple_type,
        }));
        if let Some(name) = name {
            self.graph.register_type(name, handle);
        }
        debug!(handle = %handle, component = %component, ?content, "registered complex type");
        Ok(handle)
    }

    /// Declare a global attribute
    pub fn attribute(
        &mut self,
        name: QName,
        type_handle: Handle,
        constraint: Option<Constraint>,
    ) -> Result<Handle> {
        let component = name.to_string();
        if self.graph.simple_type(type_handle).is_none() {
            return Err(ParseError::new(format!(
                "attribute type {} is not a simple type",
                type_handle
            ))
            .with_component(component)
            .into());
        }
        let constraint = self.value_constraint(type_handle, constraint, &component)?;

        let handle = self.graph.push(Node::Attribute(AttributeDecl {
            name: name.clone(),
            type_handle,
            constraint,
        }));
        self.graph.register_attribute(name, handle);
        debug!(handle = %handle, component = %component, "registered attribute");
        Ok(handle)
    }

    /// Declare a use of `attribute`, optionally with its own default or fixed value
    pub fn attribute_use(
        &mut self,
        attribute: Handle,
        required: bool,
        constraint: Option<Constraint>,
    ) -> Result<Handle> {
        let decl = self.graph.attribute(attribute).ok_or_else(|| {
            ParseError::new(format!("{} is not an attribute declaration", attribute))
        })?;
        let component = decl.name.to_string();
        let type_handle = decl.type_handle;
        let constraint = self.value_constraint(type_handle, constraint, &component)?;

        let handle = self.graph.push(Node::AttributeUse(AttributeUseDef {
            attribute,
            required,
            constraint,
        }));
        debug!(handle = %handle, component = %component, "registered attribute use");
        Ok(handle)
    }

    /// Declare a global element of a simple or complex type
    pub fn element(
        &mut self,
        name: QName,
        type_handle: Handle,
        constraint: Option<Constraint>,
    ) -> Result<Handle> {
        let component = name.to_string();
        let value_type = match self.graph.node(type_handle) {
            Some(Node::SimpleType(_)) => Some(type_handle),
            Some(Node::ComplexType(ct)) if ct.content == ContentKind::Simple => {
                Some(ct.simple_type)
            }
            Some(Node::ComplexType(_)) => None,
            _ => {
                return Err(ParseError::new(format!("element type {} is not a type", type_handle))
                    .with_component(component)
                    .into())
            }
        };
        let constraint = match value_type {
            Some(ty) => self.value_constraint(ty, constraint, &component)?,
            None if constraint.is_some() => {
                return Err(ParseError::new(
                    "a default or fixed value requires simple content",
                )
                .with_component(component)
                .into())
            }
            None => None,
        };

        let handle = self.graph.push(Node::Element(ElementDecl {
            name: name.clone(),
            type_handle,
            constraint,
        }));
        self.graph.register_element(name, handle);
        debug!(handle = %handle, component = %component, "registered element");
        Ok(handle)
    }

    fn value_constraint(
        &self,
        ty: Handle,
        constraint: Option<Constraint>,
        component: &str,
    ) -> Result<Option<ValueConstraint>> {
        let Some(constraint) = constraint else {
            return Ok(None);
        };
        let (kind, lexical) = match constraint {
            Constraint::Default(text) => (ConstraintKind::Default, text),
            Constraint::Fixed(text) => (ConstraintKind::Fixed, text),
        };

        let validator = SimpleTypeValidator::new(&self.graph);
        let facet = match kind {
            ConstraintKind::Default => "default",
            ConstraintKind::Fixed => "fixed",
        };
        let value = self.parse_facet_value(&validator, ty, &lexical, facet, component)?;
        Ok(Some(ValueConstraint {
            kind,
            canonical: value.canonical(),
            lexical,
            value,
        }))
    }

    /// Freeze the graph
    pub fn build(self) -> SchemaGraph {
        debug!(components = self.graph.len(), "schema graph built");
        self.graph
    }
}

fn display(name: &Option<QName>) -> String {
    name.as_ref()
        .map_or_else(|| "(anonymous)".to_string(), QName::to_string)
}

fn check_consistency(facets: &FacetSet) -> std::result::Result<(), String> {
    if let (Some(min), Some(max)) = (&facets.min_length, &facets.max_length) {
        if min.value > max.value {
            return Err(format!(
                "minLength {} is greater than maxLength {}",
                min.value, max.value
            ));
        }
    }
    if let (Some(fraction), Some(total)) = (&facets.fraction_digits, &facets.total_digits) {
        if fraction.value > total.value {
            return Err(format!(
                "fractionDigits {} is greater than totalDigits {}",
                fraction.value, total.value
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builtins_registered() {
        let graph = SchemaGraphBuilder::new().build();
        assert_eq!(graph.len(), BUILTIN_TYPES.len());
        let token = QName::namespaced(XSD_NAMESPACE, "token");
        assert_eq!(graph.lookup_type(&token), Some(graph.builtin(Builtin::Token)));
    }

    #[test]
    fn test_restriction_inherits_facets() {
        let mut builder = SchemaGraphBuilder::new();
        let byte = builder.builtin(Builtin::Byte);
        let small = builder
            .restrict(byte, Restriction::new().min_inclusive("0"))
            .unwrap();
        let graph = builder.build();
        let facets = graph.facets(small).unwrap();

        assert!(facets.min_inclusive.is_some());
        assert!(facets.max_inclusive.is_some());
        assert_eq!(facets.fraction_digits, Some(FractionDigitsFacet::new(0)));
        assert_eq!(facets.white_space, Some(WhiteSpace::Collapse));
    }

    #[test]
    fn test_unadmitted_facet_rejected() {
        let mut builder = SchemaGraphBuilder::new();
        let double = builder.builtin(Builtin::Double);
        let err = builder
            .restrict(double, Restriction::new().fraction_digits(2))
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let boolean = builder.builtin(Builtin::Boolean);
        assert!(builder
            .restrict(boolean, Restriction::new().enumeration("true"))
            .is_err());
    }

    #[test]
    fn test_invalid_facet_value() {
        let mut builder = SchemaGraphBuilder::new();
        let int = builder.builtin(Builtin::Int);
        let err = builder
            .restrict(int, Restriction::new().max_inclusive("abc"))
            .unwrap_err();
        match err {
            Error::Parse(parse) => {
                assert_eq!(parse.cause.map(|c| c.kind), Some(ErrorKind::InvalidInteger));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_cannot_loosen() {
        let mut builder = SchemaGraphBuilder::new();
        let token = builder.builtin(Builtin::Token);
        assert!(builder
            .restrict(token, Restriction::new().white_space(WhiteSpace::Preserve))
            .is_err());
        let string = builder.builtin(Builtin::String);
        assert!(builder
            .restrict(string, Restriction::new().white_space(WhiteSpace::Replace))
            .is_ok());
    }

    #[test]
    fn test_inconsistent_lengths() {
        let mut builder = SchemaGraphBuilder::new();
        let string = builder.builtin(Builtin::String);
        assert!(builder
            .restrict(string, Restriction::new().min_length(5).max_length(2))
            .is_err());
    }

    #[test]
    fn test_list_of_list_rejected() {
        let mut builder = SchemaGraphBuilder::new();
        let nmtokens = builder.builtin(Builtin::Nmtokens);
        assert!(builder.list(None, nmtokens).is_err());

        let int = builder.builtin(Builtin::Int);
        let union = builder.union(None, vec![int, nmtokens]).unwrap();
        assert!(builder.list(None, union).is_err());
        assert!(builder.union(None, vec![]).is_err());
    }

    #[test]
    fn test_fixed_value_validated_at_build_time() {
        let mut builder = SchemaGraphBuilder::new();
        let int = builder.builtin(Builtin::Int);
        let ok = builder.attribute(QName::local("a"), int, Some(Constraint::fixed(" 007 ")));
        let decl = builder.graph().attribute(ok.unwrap()).cloned().unwrap();
        let constraint = decl.constraint.unwrap();
        assert_eq!(constraint.canonical, "7");
        assert_eq!(constraint.lexical, " 007 ");
        assert!(constraint.is_fixed());

        assert!(builder
            .attribute(QName::local("b"), int, Some(Constraint::fixed("x")))
            .is_err());
    }

    #[test]
    fn test_element_constraints_need_simple_content() {
        let mut builder = SchemaGraphBuilder::new();
        let mixed = builder
            .complex_type(None, ContentKind::Mixed, None)
            .unwrap();
        assert!(builder
            .element(QName::local("e"), mixed, Some(Constraint::default_value("x")))
            .is_err());
        assert!(builder.element(QName::local("e"), mixed, None).is_ok());
        assert!(builder
            .complex_type(None, ContentKind::Simple, None)
            .is_err());
    }

    #[test]
    fn test_qname_enumeration_uses_bindings() {
        let mut builder = SchemaGraphBuilder::new();
        builder.set_bindings(NamespaceBindings::new().bind("a", "urn:a"));
        let qname = builder.builtin(Builtin::QName);
        assert!(builder
            .restrict(qname, Restriction::new().enumeration("a:x"))
            .is_ok());
        assert!(builder
            .restrict(qname, Restriction::new().enumeration("b:x"))
            .is_err());
    }
}
