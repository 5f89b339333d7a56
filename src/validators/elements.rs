//! Element value validation
//!
//! Only elements whose type is simple, or complex with simple content, carry
//! a simple value. The value is validated against that simple type and then
//! against the element's fixed value, if any.

use crate::error::{ErrorKind, Result};
use crate::namespaces::NamespaceBindings;
use crate::schema::Handle;
use tracing::trace;

use super::simple_types::{SimpleTypeValidator, Validated};

impl<'g> SimpleTypeValidator<'g> {
    /// Validate the simple content of an element declaration
    ///
    /// Fails with [`UsageError::NotAnElement`](crate::error::UsageError::NotAnElement)
    /// for other components and with
    /// [`UsageError::NotSimpleContent`](crate::error::UsageError::NotSimpleContent)
    /// for element-only, mixed or empty content. Absent `text` takes the
    /// declared default or fixed value.
    pub fn validate_element(
        &self,
        handle: Handle,
        text: Option<&str>,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<Validated> {
        let (ty, constraint) = self.graph().element_target(handle)?;
        trace!(element = %handle, type_handle = %ty, "validating element value");
        self.validate_constrained(
            handle,
            ty,
            constraint,
            text,
            bindings,
            ErrorKind::ElementInvalidPerFixed,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, ErrorKind, UsageError};
    use crate::namespaces::{NamespaceBindings, QName};
    use crate::schema::{Constraint, ContentKind, SchemaGraphBuilder};
    use crate::validators::builtins::Builtin;
    use crate::validators::simple_types::SimpleTypeValidator;

    #[test]
    fn test_simple_content_element() {
        let mut builder = SchemaGraphBuilder::new();
        let date = builder.builtin(Builtin::Date);
        let ct = builder
            .complex_type(None, ContentKind::Simple, Some(date))
            .unwrap();
        let elem = builder
            .element(QName::local("when"), ct, Some(Constraint::default_value("2000-01-01Z")))
            .unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        assert_eq!(
            validator.validate_element(elem, Some(" 1999-12-31 "), None).unwrap().canonical,
            "1999-12-31"
        );
        assert_eq!(validator.validate_element(elem, None, None).unwrap().canonical, "2000-01-01Z");
    }

    #[test]
    fn test_fixed_list_element() {
        let mut builder = SchemaGraphBuilder::new();
        let int = builder.builtin(Builtin::Int);
        let list = builder.list(None, int).unwrap();
        let elem = builder
            .element(QName::local("v"), list, Some(Constraint::fixed("1 2 3")))
            .unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        assert!(validator.validate_element(elem, Some(" 01  2 +3 "), None).is_ok());
        let err = validator.validate_element(elem, Some("1 2"), None).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ElementInvalidPerFixed));
        let carried = err.as_validation().and_then(|e| e.value()).unwrap();
        assert_eq!(carried.as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_fixed_qname_resolved_equality() {
        let mut builder = SchemaGraphBuilder::new();
        builder.set_bindings(NamespaceBindings::new().bind("a", "urn:x"));
        let qname = builder.builtin(Builtin::QName);
        let elem = builder
            .element(QName::local("q"), qname, Some(Constraint::fixed("a:item")))
            .unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        let other_prefix = NamespaceBindings::new().bind("b", "urn:x");
        assert!(validator
            .validate_element(elem, Some("b:item"), Some(&other_prefix))
            .is_ok());
        let wrong_ns = NamespaceBindings::new().bind("a", "urn:y");
        assert_eq!(
            validator
                .validate_element(elem, Some("a:item"), Some(&wrong_ns))
                .unwrap_err()
                .kind(),
            Some(ErrorKind::ElementInvalidPerFixed)
        );
    }

    #[test]
    fn test_element_misuse() {
        let mut builder = SchemaGraphBuilder::new();
        let string = builder.builtin(Builtin::String);
        let mixed = builder.complex_type(None, ContentKind::Mixed, None).unwrap();
        let mixed_elem = builder.element(QName::local("m"), mixed, None).unwrap();
        let attr = builder.attribute(QName::local("a"), string, None).unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        assert!(matches!(
            validator.validate_element(mixed_elem, Some("x"), None),
            Err(Error::Usage(UsageError::NotSimpleContent(_)))
        ));
        assert!(matches!(
            validator.validate_element(attr, Some("x"), None),
            Err(Error::Usage(UsageError::NotAnElement(_)))
        ));
    }
}
