//! Compiled schema graph
//!
//! Schema components live in one arena and refer to each other through
//! [`Handle`]s, plain indices into that arena. The graph is immutable once
//! built (see [`SchemaGraphBuilder`]) and can be shared between threads.

pub mod builder;

pub use builder::{Constraint, Restriction, SchemaGraphBuilder};

use crate::error::UsageError;
use crate::namespaces::QName;
use crate::validators::builtins::Builtin;
use crate::validators::facets::FacetSet;
use crate::validators::lexical::LexicalRule;
use crate::values::{Primitive, TypedValue};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Index of a component in a [`SchemaGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Handle(u32);

impl Handle {
    /// The reserved handle that addresses no component
    pub const ABSENT: Handle = Handle(u32::MAX);

    /// Create a handle from an arena index
    pub fn new(index: u32) -> Self {
        Handle(index)
    }

    /// Whether this is the reserved absent handle
    pub fn is_absent(&self) -> bool {
        *self == Self::ABSENT
    }

    /// Arena index, `None` for the absent handle
    pub fn index(&self) -> Option<usize> {
        if self.is_absent() {
            None
        } else {
            Some(self.0 as usize)
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absent() {
            f.write_str("#absent")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Variety of a simple type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variety {
    /// Atomic type with its primitive ancestor
    Atomic {
        /// Primitive ancestor
        primitive: Primitive,
    },
    /// List of items of one simple type
    List {
        /// Item type
        item_type: Handle,
    },
    /// Union of member types, tried in declaration order
    Union {
        /// Member types in declaration order
        member_types: Vec<Handle>,
    },
}

/// A simple type definition
#[derive(Debug, Clone)]
pub struct SimpleTypeDef {
    /// Type name, `None` for anonymous types
    pub name: Option<QName>,
    /// Base type (absent for `anySimpleType`)
    pub base: Handle,
    /// Variety
    pub variety: Variety,
    /// Which built-in this is, if any
    pub builtin: Option<Builtin>,
    /// Extra lexical constraint inherited from a built-in ancestor
    pub rule: LexicalRule,
    /// Resolved facets, including those inherited from the base type
    pub facets: FacetSet,
}

impl SimpleTypeDef {
    /// Primitive ancestor of an atomic type
    pub fn primitive(&self) -> Option<Primitive> {
        match self.variety {
            Variety::Atomic { primitive } => Some(primitive),
            _ => None,
        }
    }

    /// Whether this is one of the built-in types
    pub fn is_builtin(&self) -> bool {
        self.builtin.is_some()
    }

    /// Name for diagnostics
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => "(anonymous)".to_string(),
        }
    }
}

/// Content type of a complex type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentKind {
    /// No content
    Empty,
    /// Character data of a simple type
    Simple,
    /// Child elements only
    ElementOnly,
    /// Child elements and character data
    Mixed,
}

/// A complex type definition, reduced to what simple-value validation needs
#[derive(Debug, Clone)]
pub struct ComplexTypeDef {
    /// Type name, `None` for anonymous types
    pub name: Option<QName>,
    /// Content type
    pub content: ContentKind,
    /// Simple type of the content when `content` is [`ContentKind::Simple`]
    pub simple_type: Handle,
}

/// Whether a value constraint is a default or a fixed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    /// Used when no value is supplied
    Default,
    /// Used when no value is supplied, and any supplied value must equal it
    Fixed,
}

/// A declared default or fixed value, validated against the declared type
#[derive(Debug, Clone)]
pub struct ValueConstraint {
    /// Default or fixed
    pub kind: ConstraintKind,
    /// Lexical form as declared
    pub lexical: String,
    /// Canonical form
    pub canonical: String,
    /// Typed value
    pub value: TypedValue,
}

impl ValueConstraint {
    /// Whether this is a fixed value
    pub fn is_fixed(&self) -> bool {
        self.kind == ConstraintKind::Fixed
    }
}

/// An attribute declaration
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    /// Attribute name
    pub name: QName,
    /// Declared simple type
    pub type_handle: Handle,
    /// Default or fixed value of the declaration
    pub constraint: Option<ValueConstraint>,
}

/// An attribute use inside a complex type
#[derive(Debug, Clone)]
pub struct AttributeUseDef {
    /// The attribute declaration used
    pub attribute: Handle,
    /// Whether the attribute must appear
    pub required: bool,
    /// Default or fixed value of the use; overrides the declaration's
    pub constraint: Option<ValueConstraint>,
}

/// An element declaration
#[derive(Debug, Clone)]
pub struct ElementDecl {
    /// Element name
    pub name: QName,
    /// Declared simple or complex type
    pub type_handle: Handle,
    /// Default or fixed value
    pub constraint: Option<ValueConstraint>,
}

/// A schema component
#[derive(Debug, Clone)]
pub enum Node {
    /// Simple type definition
    SimpleType(SimpleTypeDef),
    /// Complex type definition
    ComplexType(ComplexTypeDef),
    /// Attribute declaration
    Attribute(AttributeDecl),
    /// Attribute use
    AttributeUse(AttributeUseDef),
    /// Element declaration
    Element(ElementDecl),
}

/// Immutable, handle-addressed schema components
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    nodes: Vec<Node>,
    builtins: IndexMap<Builtin, Handle>,
    types: IndexMap<QName, Handle>,
    attributes: IndexMap<QName, Handle>,
    elements: IndexMap<QName, Handle>,
}

impl SchemaGraph {
    /// Number of components
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no components
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Component addressed by `handle`
    pub fn node(&self, handle: Handle) -> Option<&Node> {
        handle.index().and_then(|i| self.nodes.get(i))
    }

    /// Handle of a built-in type
    pub fn builtin(&self, builtin: Builtin) -> Handle {
        self.builtins
            .get(&builtin)
            .copied()
            .unwrap_or(Handle::ABSENT)
    }

    /// Named type lookup
    pub fn lookup_type(&self, name: &QName) -> Option<Handle> {
        self.types.get(name).copied()
    }

    /// Global attribute lookup
    pub fn lookup_attribute(&self, name: &QName) -> Option<Handle> {
        self.attributes.get(name).copied()
    }

    /// Global element lookup
    pub fn lookup_element(&self, name: &QName) -> Option<Handle> {
        self.elements.get(name).copied()
    }

    /// Named types in registration order
    pub fn type_names(&self) -> impl Iterator<Item = &QName> {
        self.types.keys()
    }

    /// Simple type definition addressed by `handle`
    pub fn simple_type(&self, handle: Handle) -> Option<&SimpleTypeDef> {
        match self.node(handle) {
            Some(Node::SimpleType(def)) => Some(def),
            _ => None,
        }
    }

    /// Like [`simple_type`](Self::simple_type) but classifying the misuse
    pub fn expect_simple_type(&self, handle: Handle) -> Result<&SimpleTypeDef, UsageError> {
        match self.node(handle) {
            Some(Node::SimpleType(def)) => Ok(def),
            Some(_) => Err(UsageError::NotASimpleType(handle)),
            None => Err(UsageError::AbsentHandle(handle)),
        }
    }

    /// Complex type definition addressed by `handle`
    pub fn complex_type(&self, handle: Handle) -> Option<&ComplexTypeDef> {
        match self.node(handle) {
            Some(Node::ComplexType(def)) => Some(def),
            _ => None,
        }
    }

    /// Attribute declaration addressed by `handle`
    pub fn attribute(&self, handle: Handle) -> Option<&AttributeDecl> {
        match self.node(handle) {
            Some(Node::Attribute(decl)) => Some(decl),
            _ => None,
        }
    }

    /// Attribute use addressed by `handle`
    pub fn attribute_use(&self, handle: Handle) -> Option<&AttributeUseDef> {
        match self.node(handle) {
            Some(Node::AttributeUse(decl)) => Some(decl),
            _ => None,
        }
    }

    /// Element declaration addressed by `handle`
    pub fn element(&self, handle: Handle) -> Option<&ElementDecl> {
        match self.node(handle) {
            Some(Node::Element(decl)) => Some(decl),
            _ => None,
        }
    }

    /// Variety of a simple type
    pub fn variety(&self, handle: Handle) -> Option<&Variety> {
        self.simple_type(handle).map(|def| &def.variety)
    }

    /// Base type of a simple type
    pub fn base_type(&self, handle: Handle) -> Option<Handle> {
        self.simple_type(handle)
            .map(|def| def.base)
            .filter(|base| !base.is_absent())
    }

    /// Primitive ancestor of an atomic type
    pub fn primitive(&self, handle: Handle) -> Option<Primitive> {
        self.simple_type(handle).and_then(SimpleTypeDef::primitive)
    }

    /// Item type of a list type
    pub fn item_type(&self, handle: Handle) -> Option<Handle> {
        match self.variety(handle) {
            Some(Variety::List { item_type }) => Some(*item_type),
            _ => None,
        }
    }

    /// Member types of a union type, in declaration order
    pub fn member_types(&self, handle: Handle) -> Option<&[Handle]> {
        match self.variety(handle) {
            Some(Variety::Union { member_types }) => Some(member_types),
            _ => None,
        }
    }

    /// Resolved facets of a simple type
    pub fn facets(&self, handle: Handle) -> Option<&FacetSet> {
        self.simple_type(handle).map(|def| &def.facets)
    }

    /// Whether `handle` is `ancestor` or derived from it by restriction
    pub fn derives_from(&self, handle: Handle, ancestor: Handle) -> bool {
        let mut current = handle;
        while let Some(def) = self.simple_type(current) {
            if current == ancestor {
                return true;
            }
            current = def.base;
        }
        false
    }

    /// Declared type and value constraint of an attribute or attribute use.
    /// The use's own constraint takes precedence over the declaration's.
    pub fn attribute_target(
        &self,
        handle: Handle,
    ) -> Result<(Handle, Option<&ValueConstraint>), UsageError> {
        match self.node(handle) {
            Some(Node::Attribute(decl)) => Ok((decl.type_handle, decl.constraint.as_ref())),
            Some(Node::AttributeUse(use_def)) => {
                let decl = self
                    .attribute(use_def.attribute)
                    .ok_or(UsageError::NotAnAttribute(handle))?;
                let constraint = use_def.constraint.as_ref().or(decl.constraint.as_ref());
                Ok((decl.type_handle, constraint))
            }
            Some(_) => Err(UsageError::NotAnAttribute(handle)),
            None => Err(UsageError::AbsentHandle(handle)),
        }
    }

    /// Simple type of an element's content and its value constraint.
    /// Fails for non-elements and for elements without simple content.
    pub fn element_target(
        &self,
        handle: Handle,
    ) -> Result<(Handle, Option<&ValueConstraint>), UsageError> {
        let decl = match self.node(handle) {
            Some(Node::Element(decl)) => decl,
            Some(_) => return Err(UsageError::NotAnElement(handle)),
            None => return Err(UsageError::AbsentHandle(handle)),
        };
        let content_type = match self.node(decl.type_handle) {
            Some(Node::SimpleType(_)) => decl.type_handle,
            Some(Node::ComplexType(ct)) if ct.content == ContentKind::Simple => ct.simple_type,
            _ => return Err(UsageError::NotSimpleContent(handle)),
        };
        Ok((content_type, decl.constraint.as_ref()))
    }

    pub(crate) fn push(&mut self, node: Node) -> Handle {
        let handle = Handle::new(self.nodes.len() as u32);
        self.nodes.push(node);
        handle
    }

    pub(crate) fn register_builtin(&mut self, builtin: Builtin, handle: Handle) {
        self.builtins.insert(builtin, handle);
    }

    pub(crate) fn register_type(&mut self, name: QName, handle: Handle) {
        self.types.insert(name, handle);
    }

    pub(crate) fn register_attribute(&mut self, name: QName, handle: Handle) {
        self.attributes.insert(name, handle);
    }

    pub(crate) fn register_element(&mut self, name: QName, handle: Handle) {
        self.elements.insert(name, handle);
    }
}
