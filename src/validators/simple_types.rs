//! XSD Simple Type validation
//!
//! This module dispatches validation of a lexical value by the variety of
//! the simple type:
//! - Atomic types: whitespace normalization, lexical parsing, facets
//! - List types: whitespace-separated items, each validated against the item type
//! - Union types: member types tried in declaration order, first match wins
//!
//! See: https://www.w3.org/TR/xmlschema-2/

use crate::error::{Error, ErrorKind, Result, ValidationError};
use crate::limits::Limits;
use crate::namespaces::NamespaceBindings;
use crate::schema::{Handle, SchemaGraph, SimpleTypeDef, Variety};
use crate::validators::lexical::parse_atomic;
use crate::values::{AtomicValue, ListValue, Primitive, TypedValue};
use serde::Serialize;
use tracing::{debug, trace};

/// Result of a successful validation
#[derive(Debug, Clone, Serialize)]
pub struct Validated {
    /// Canonical lexical form
    pub canonical: String,
    /// Typed value
    pub value: TypedValue,
}

impl Validated {
    pub(crate) fn new(value: TypedValue) -> Self {
        Self {
            canonical: value.canonical(),
            value,
        }
    }
}

/// Validates lexical values against the simple types of a [`SchemaGraph`]
///
/// The validator holds no state besides its configuration; one instance can
/// serve any number of threads.
#[derive(Debug, Clone)]
pub struct SimpleTypeValidator<'g> {
    graph: &'g SchemaGraph,
    limits: Limits,
}

impl<'g> SimpleTypeValidator<'g> {
    /// Create a validator with default limits
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self::with_limits(graph, Limits::default())
    }

    /// Create a validator with the given limits
    pub fn with_limits(graph: &'g SchemaGraph, limits: Limits) -> Self {
        Self { graph, limits }
    }

    /// The schema graph types are looked up in
    pub fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    /// The configured limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validate `text` against the simple type `ty`
    ///
    /// `bindings` are needed to resolve prefixed `QName` / `NOTATION` values.
    pub fn validate(
        &self,
        ty: Handle,
        text: &str,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<Validated> {
        self.limits.check_lexical_length(text.chars().count())?;
        let value = self.validate_type(ty, text, bindings)?;
        Ok(Validated::new(value))
    }

    /// Validate UTF-16 code units against the simple type `ty`
    ///
    /// An unpaired surrogate fails with [`ErrorKind::InvalidSurrogatePair`];
    /// otherwise the decoded text is validated as by [`validate`](Self::validate),
    /// with lengths counted in code points.
    pub fn validate_utf16(
        &self,
        ty: Handle,
        units: &[u16],
        bindings: Option<&NamespaceBindings>,
    ) -> Result<Validated> {
        let mut text = String::with_capacity(units.len());
        for (position, decoded) in char::decode_utf16(units.iter().copied()).enumerate() {
            match decoded {
                Ok(c) => text.push(c),
                Err(e) => {
                    return Err(Error::Validation(
                        ValidationError::new(
                            ErrorKind::InvalidSurrogatePair,
                            "unpaired surrogate in UTF-16 input",
                        )
                        .with_reason(format!(
                            "code unit {:#06X} at character {}",
                            e.unpaired_surrogate(),
                            position
                        )),
                    ))
                }
            }
        }
        self.validate(ty, &text, bindings)
    }

    /// Whether `text` is valid for `ty`
    pub fn is_valid(&self, ty: Handle, text: &str, bindings: Option<&NamespaceBindings>) -> bool {
        self.validate(ty, text, bindings).is_ok()
    }

    pub(crate) fn validate_type(
        &self,
        ty: Handle,
        text: &str,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<TypedValue> {
        let def = self.graph.expect_simple_type(ty)?;
        trace!(type_handle = %ty, variety = ?def.variety, "validating simple value");

        match &def.variety {
            Variety::Atomic { primitive } => self
                .validate_atomic(ty, def, *primitive, text, bindings)
                .map(TypedValue::Atomic),
            Variety::List { item_type } => self
                .validate_list(def, *item_type, text, bindings)
                .map(TypedValue::List),
            Variety::Union { member_types } => {
                self.validate_union(def, member_types, text, bindings)
            }
        }
    }

    fn validate_atomic(
        &self,
        ty: Handle,
        def: &SimpleTypeDef,
        primitive: Primitive,
        text: &str,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<AtomicValue> {
        let normalized = def.facets.normalize(text);
        let native = parse_atomic(primitive, def.rule, &normalized, bindings, &self.limits)?;
        let value = AtomicValue::new(native, ty, primitive);

        def.facets.check_atomic(&value)?;
        if let Some(enumeration) = &def.facets.enumeration {
            enumeration.validate_atomic(&value)?;
        }
        Ok(value)
    }

    fn validate_list(
        &self,
        def: &SimpleTypeDef,
        item_type: Handle,
        text: &str,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<ListValue> {
        let normalized = def.facets.normalize(text);
        let tokens: Vec<&str> = normalized
            .split([' ', '\t', '\n', '\r'])
            .filter(|s| !s.is_empty())
            .collect();
        self.limits.check_list_items(tokens.len())?;

        def.facets.check_length(tokens.len())?;

        let mut items = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.validate_type(item_type, token, bindings)? {
                TypedValue::Atomic(item) => items.push(item),
                TypedValue::List(nested) => items.extend(nested.items),
            }
        }

        let list = ListValue { item_type, items };
        if let Some(enumeration) = &def.facets.enumeration {
            enumeration.validate_list(&list)?;
        }
        Ok(list)
    }

    fn validate_union(
        &self,
        def: &SimpleTypeDef,
        member_types: &[Handle],
        text: &str,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<TypedValue> {
        for &member in member_types {
            match self.validate_type(member, text, bindings) {
                Ok(value) => {
                    trace!(member = %member, "union member accepted value");
                    def.facets.check_enumeration(&value)?;
                    return Ok(value);
                }
                Err(Error::Validation(err)) => {
                    debug!(member = %member, kind = %err.kind, "union member rejected value");
                }
                Err(other) => return Err(other),
            }
        }

        Err(Error::Validation(
            ValidationError::new(
                ErrorKind::InvalidUnion,
                format!("no member type of {} accepts the value", def.display_name()),
            )
            .with_reason(format!("Value: '{}'", text)),
        ))
    }
}
