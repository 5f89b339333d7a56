//! # xmlschema-datatypes
//!
//! Validation of XML Schema 1.0 simple values: the built-in datatypes, their
//! facets, and list/union derivation.
//!
//! Schema components live in a [`SchemaGraph`], an arena of nodes addressed by
//! integer [`Handle`]s. A [`SimpleTypeValidator`] checks lexical values against
//! a type, an attribute or an element and returns the canonical form together
//! with the typed value.
//!
//! ## Features
//!
//! - All 19 primitive datatypes and the built-in derived types
//! - Facets: length, range, digits, enumeration and whiteSpace
//! - List and union varieties
//! - Fixed and default values of attributes and elements
//! - Namespace-resolved `QName` values
//! - Resource limits for untrusted input
//!
//! ## Example
//!
//! ```rust
//! use xmlschema_datatypes::{Builtin, Restriction, SchemaGraphBuilder, SimpleTypeValidator};
//!
//! let mut builder = SchemaGraphBuilder::new();
//! let decimal = builder.builtin(Builtin::Decimal);
//! let price = builder
//!     .restrict(decimal, Restriction::new().total_digits(5).fraction_digits(2))
//!     .unwrap();
//! let graph = builder.build();
//!
//! let validator = SimpleTypeValidator::new(&graph);
//! let validated = validator.validate(price, " 012.50 ", None).unwrap();
//! assert_eq!(validated.canonical, "12.5");
//! assert!(!validator.is_valid(price, "1.234", None));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod codecs;
pub mod names;
pub mod namespaces;

// Value model and schema graph
pub mod schema;
pub mod values;

// Validators
pub mod validators;

// Re-exports for convenience
pub use error::{Error, ErrorKind, LanguageError, ParseError, Result, UsageError, ValidationError};
pub use limits::Limits;
pub use namespaces::{NamespaceBindings, QName};
pub use schema::{
    Constraint, ContentKind, Handle, Restriction, SchemaGraph, SchemaGraphBuilder, Variety,
};
pub use validators::{Builtin, SimpleTypeValidator, Validated, WhiteSpace};
pub use values::{AtomicValue, ListValue, NativeValue, Primitive, TypedValue};

/// Version of the xmlschema-datatypes library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
