//! Field descriptors and their declaration builder.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

use crate::core::check::{self, FieldCheck, ValueKind};
use crate::schema::SchemaError;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// A value-time failure produced while checking one field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldViolation {
    #[error("illegal value {value} for field {field:?}")]
    IllegalValue { field: String, value: Value },

    #[error("validation {rule:?} failed: {message}")]
    RuleFailed {
        field: String,
        rule: String,
        message: String,
    },
}

impl FieldViolation {
    /// The field this violation is recorded under.
    pub fn field(&self) -> &str {
        match self {
            Self::IllegalValue { field, .. } => field,
            Self::RuleFailed { field, .. } => field,
        }
    }
}

/// One declared field of a record schema.
///
/// A descriptor owns the field's constraint check, its default value, and
/// its access flags. Descriptors are immutable once built and are only
/// produced through [`FieldBuilder`].
pub struct FieldDescriptor {
    name: String,
    check: Option<FieldCheck>,
    default: Option<Value>,
    readonly: bool,
    optional: bool,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a constraint check is attached.
    pub fn is_checked(&self) -> bool {
        self.check.is_some()
    }

    /// A field is optional iff it carries a default or was explicitly
    /// marked optional.
    pub fn is_optional(&self) -> bool {
        self.optional || self.default.is_some()
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Run the constraint check; a field without a check accepts anything.
    pub fn accepts(&self, value: &Value) -> bool {
        self.check.as_ref().map_or(true, |check| check.check(value))
    }

    /// Check a candidate value, reporting the failure as a [`Validation`]
    /// so callers can accumulate violations across fields.
    pub fn validate(&self, value: &Value) -> Validation<(), NonEmptyVec<FieldViolation>> {
        if self.accepts(value) {
            Validation::success(())
        } else {
            Validation::fail(FieldViolation::IllegalValue {
                field: self.name.clone(),
                value: value.clone(),
            })
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("checked", &self.is_checked())
            .field("default", &self.default)
            .field("readonly", &self.readonly)
            .field("optional", &self.optional)
            .finish()
    }
}

/// Builder for declaring one field.
///
/// Declaration mistakes are schema-time errors surfaced by [`build`]:
/// a non-identifier name, more than one check source, an unknown named
/// check, or a default value that fails its own check.
///
/// [`build`]: FieldBuilder::build
///
/// # Example
///
/// ```rust
/// use fieldguard::FieldBuilder;
/// use serde_json::json;
///
/// let field = FieldBuilder::new("retries")
///     .named_check("non_negative_int")
///     .default(json!(0))
///     .build()
///     .unwrap();
///
/// assert!(field.is_optional());
/// assert!(field.accepts(&json!(3)));
/// assert!(!field.accepts(&json!(-1)));
/// ```
pub struct FieldBuilder {
    name: String,
    check: Option<FieldCheck>,
    named: Option<String>,
    kind: Option<ValueKind>,
    default: Option<Value>,
    readonly: bool,
    optional: bool,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check: None,
            named: None,
            kind: None,
            default: None,
            readonly: false,
            optional: false,
        }
    }

    /// Attach a custom predicate check.
    pub fn check<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.check_with(FieldCheck::new(predicate))
    }

    /// Attach a prebuilt check, such as one adapted from a composable
    /// validator.
    pub fn check_with(mut self, check: FieldCheck) -> Self {
        self.check = Some(check);
        self
    }

    /// Attach a predefined check by name, resolved at build time.
    pub fn named_check(mut self, name: impl Into<String>) -> Self {
        self.named = Some(name.into());
        self
    }

    /// Attach a value-kind tag check.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Supply a default value; its presence makes the field optional.
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Forbid mutation after construction.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Mark the field optional without supplying a default.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Build the descriptor, validating the declaration itself.
    pub fn build(self) -> Result<FieldDescriptor, SchemaError> {
        if !IDENTIFIER.is_match(&self.name) {
            return Err(SchemaError::InvalidName(self.name));
        }

        let sources =
            usize::from(self.check.is_some()) + usize::from(self.named.is_some()) + usize::from(self.kind.is_some());
        if sources > 1 {
            return Err(SchemaError::ConflictingChecks(self.name));
        }

        let check = if let Some(named) = self.named {
            let resolved = check::predefined(&named).ok_or_else(|| SchemaError::UnknownCheck {
                name: named,
                known: check::readable_predefined_list(),
            })?;
            Some(resolved)
        } else if let Some(kind) = self.kind {
            Some(FieldCheck::of_kind(kind))
        } else {
            self.check
        };

        // A default that fails its own check is a declaration error, not a
        // runtime condition.
        if let (Some(check), Some(default)) = (&check, &self.default) {
            if !check.check(default) {
                return Err(SchemaError::IllegalDefault {
                    field: self.name,
                    value: default.clone(),
                });
            }
        }

        Ok(FieldDescriptor {
            name: self.name,
            check,
            default: self.default,
            readonly: self.readonly,
            optional: self.optional,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unchecked_field_accepts_anything() {
        let field = FieldBuilder::new("anything").build().unwrap();

        assert!(!field.is_checked());
        assert!(field.accepts(&json!(null)));
        assert!(field.accepts(&json!({"nested": true})));
    }

    #[test]
    fn name_must_be_identifier_shaped() {
        let result = FieldBuilder::new("not a name").build();

        assert!(matches!(result, Err(SchemaError::InvalidName(_))));
    }

    #[test]
    fn kind_and_custom_check_conflict() {
        let result = FieldBuilder::new("age")
            .kind(ValueKind::Number)
            .check(|v| v.is_u64())
            .build();

        assert!(matches!(result, Err(SchemaError::ConflictingChecks(_))));
    }

    #[test]
    fn named_and_custom_check_conflict() {
        let result = FieldBuilder::new("age")
            .named_check("int")
            .check(|v| v.is_u64())
            .build();

        assert!(matches!(result, Err(SchemaError::ConflictingChecks(_))));
    }

    #[test]
    fn unknown_named_check_lists_predefined_names() {
        let result = FieldBuilder::new("age").named_check("integer").build();

        match result {
            Err(SchemaError::UnknownCheck { name, known }) => {
                assert_eq!(name, "integer");
                assert!(known.contains("\"positive_int\""));
                assert!(known.contains("\"string\""));
            }
            other => panic!("expected unknown-check error, got {other:?}"),
        }
    }

    #[test]
    fn default_is_checked_at_declaration_time() {
        let result = FieldBuilder::new("count")
            .named_check("positive_int")
            .default(json!(0))
            .build();

        match result {
            Err(SchemaError::IllegalDefault { field, value }) => {
                assert_eq!(field, "count");
                assert_eq!(value, json!(0));
            }
            other => panic!("expected illegal-default error, got {other:?}"),
        }
    }

    #[test]
    fn valid_default_makes_field_optional() {
        let field = FieldBuilder::new("count")
            .named_check("positive_int")
            .default(json!(1))
            .build()
            .unwrap();

        assert!(field.is_optional());
        assert_eq!(field.default(), Some(&json!(1)));
    }

    #[test]
    fn explicit_optional_without_default() {
        let field = FieldBuilder::new("note").optional().build().unwrap();

        assert!(field.is_optional());
        assert!(field.default().is_none());
    }

    #[test]
    fn validate_reports_field_name_and_value() {
        let field = FieldBuilder::new("count")
            .named_check("positive_int")
            .build()
            .unwrap();

        match field.validate(&json!(0)) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                let message = errors.iter().next().unwrap().to_string();
                assert_eq!(message, "illegal value 0 for field \"count\"");
            }
            Validation::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn validate_accepts_legal_value() {
        let field = FieldBuilder::new("count")
            .named_check("positive_int")
            .build()
            .unwrap();

        assert!(field.validate(&json!(1)).is_success());
    }
}
