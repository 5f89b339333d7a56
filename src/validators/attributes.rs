//! Attribute value validation
//!
//! An attribute is validated against its declared simple type. A fixed value
//! declared on the attribute use (or, failing that, on the declaration) must
//! then be matched in value space; absent text takes the declared default or
//! fixed value.

use crate::error::{Error, ErrorKind, Result, UsageError, ValidationError};
use crate::namespaces::NamespaceBindings;
use crate::schema::{Handle, ValueConstraint};
use tracing::trace;

use super::simple_types::{SimpleTypeValidator, Validated};

impl<'g> SimpleTypeValidator<'g> {
    /// Validate the value of an attribute declaration or attribute use
    ///
    /// With `text` absent the declared default or fixed value is returned as
    /// if it had been supplied; with no such value the call fails with
    /// [`UsageError::MissingValue`].
    pub fn validate_attribute(
        &self,
        handle: Handle,
        text: Option<&str>,
        bindings: Option<&NamespaceBindings>,
    ) -> Result<Validated> {
        let (ty, constraint) = self.graph().attribute_target(handle)?;
        trace!(attribute = %handle, type_handle = %ty, "validating attribute value");
        self.validate_constrained(
            handle,
            ty,
            constraint,
            text,
            bindings,
            ErrorKind::AttributeInvalidPerFixed,
        )
    }

    /// Shared by the attribute and element entry points
    pub(super) fn validate_constrained(
        &self,
        handle: Handle,
        ty: Handle,
        constraint: Option<&ValueConstraint>,
        text: Option<&str>,
        bindings: Option<&NamespaceBindings>,
        per_fixed: ErrorKind,
    ) -> Result<Validated> {
        let Some(text) = text else {
            return match constraint {
                Some(constraint) => Ok(Validated::new(constraint.value.clone())),
                None => Err(UsageError::MissingValue(handle).into()),
            };
        };

        let validated = self.validate(ty, text, bindings)?;
        match constraint {
            Some(fixed) if fixed.is_fixed() && !validated.value.value_eq(&fixed.value) => {
                Err(Error::Validation(
                    ValidationError::new(
                        per_fixed,
                        format!("value must equal the fixed value '{}'", fixed.canonical),
                    )
                    .with_reason(format!("Value: '{}'", validated.canonical))
                    .with_value(validated.value),
                ))
            }
            _ => Ok(validated),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, ErrorKind, UsageError};
    use crate::namespaces::QName;
    use crate::schema::{Constraint, SchemaGraphBuilder};
    use crate::validators::builtins::Builtin;
    use crate::validators::simple_types::SimpleTypeValidator;

    #[test]
    fn test_fixed_decimal_value_space() {
        let mut builder = SchemaGraphBuilder::new();
        let decimal = builder.builtin(Builtin::Decimal);
        let attr = builder
            .attribute(QName::local("price"), decimal, Some(Constraint::fixed("1.2345")))
            .unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        let ok = validator.validate_attribute(attr, Some("1.23450"), None).unwrap();
        assert_eq!(ok.canonical, "1.2345");

        let err = validator
            .validate_attribute(attr, Some("1.23456"), None)
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::AttributeInvalidPerFixed));
        let carried = err.as_validation().and_then(|e| e.value()).unwrap();
        assert_eq!(carried.canonical(), "1.23456");
    }

    #[test]
    fn test_use_constraint_overrides_declaration() {
        let mut builder = SchemaGraphBuilder::new();
        let int = builder.builtin(Builtin::Int);
        let attr = builder
            .attribute(QName::local("n"), int, Some(Constraint::default_value("1")))
            .unwrap();
        let fixed_use = builder
            .attribute_use(attr, false, Some(Constraint::fixed("2")))
            .unwrap();
        let plain_use = builder.attribute_use(attr, true, None).unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        assert_eq!(validator.validate_attribute(attr, Some("5"), None).unwrap().canonical, "5");
        assert_eq!(validator.validate_attribute(attr, None, None).unwrap().canonical, "1");
        assert_eq!(validator.validate_attribute(fixed_use, None, None).unwrap().canonical, "2");
        assert_eq!(
            validator.validate_attribute(fixed_use, Some("5"), None).unwrap_err().kind(),
            Some(ErrorKind::AttributeInvalidPerFixed)
        );
        assert_eq!(validator.validate_attribute(plain_use, None, None).unwrap().canonical, "1");
    }

    #[test]
    fn test_missing_value_and_misuse() {
        let mut builder = SchemaGraphBuilder::new();
        let string = builder.builtin(Builtin::String);
        let attr = builder.attribute(QName::local("s"), string, None).unwrap();
        let elem = builder.element(QName::local("e"), string, None).unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        assert!(matches!(
            validator.validate_attribute(attr, None, None),
            Err(Error::Usage(UsageError::MissingValue(_)))
        ));
        assert!(matches!(
            validator.validate_attribute(elem, Some("x"), None),
            Err(Error::Usage(UsageError::NotAnAttribute(_)))
        ));
        assert!(matches!(
            validator.validate_attribute(string, Some("x"), None),
            Err(Error::Usage(UsageError::NotAnAttribute(_)))
        ));
    }

    #[test]
    fn test_type_errors_take_precedence() {
        let mut builder = SchemaGraphBuilder::new();
        let int = builder.builtin(Builtin::Int);
        let attr = builder
            .attribute(QName::local("n"), int, Some(Constraint::fixed("2")))
            .unwrap();
        let graph = builder.build();
        let validator = SimpleTypeValidator::new(&graph);

        assert_eq!(
            validator.validate_attribute(attr, Some("two"), None).unwrap_err().kind(),
            Some(ErrorKind::InvalidInteger)
        );
    }
}
