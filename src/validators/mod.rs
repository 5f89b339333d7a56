//! XML Schema simple type validators
//!
//! This module contains the validation logic for simple values: built-in
//! type definitions, facets, lexical parsing and the validator entry points
//! for plain types, attributes and elements.

// Type system
pub mod builtins;
pub mod facets;
pub mod lexical;

// Entry points
pub mod attributes;
pub mod elements;
pub mod simple_types;

// Re-exports
pub use builtins::{get_builtin_type, Builtin, BuiltinShape, BuiltinType, BUILTIN_TYPES};
pub use facets::{FacetSet, RangeKind, WhiteSpace};
pub use lexical::LexicalRule;
pub use simple_types::{SimpleTypeValidator, Validated};
