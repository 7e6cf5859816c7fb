//! Builder API for declaring record schemas.

use std::sync::Arc;

use log::debug;

use crate::core::FieldBuilder;
use crate::record::Record;
use crate::schema::error::SchemaError;
use crate::schema::rules::ValidationRule;
use crate::schema::schema::RecordSchema;

/// Builder for declaring a record schema with a fluent API.
///
/// Field declarations are collected in order and frozen into an immutable
/// [`RecordSchema`] by [`build`]; the builder is consumed, so no further
/// declaration can happen once the schema exists.
///
/// [`build`]: SchemaBuilder::build
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldBuilder, SchemaBuilder};
/// use serde_json::json;
///
/// let schema = SchemaBuilder::new("circle")
///     .field(FieldBuilder::new("radius").named_check("positive_int"))
///     .unwrap()
///     .field(FieldBuilder::new("label").default(json!("unnamed")))
///     .unwrap()
///     .build();
///
/// assert_eq!(schema.required_names(), vec!["radius"]);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<crate::core::FieldDescriptor>,
    rules: Vec<ValidationRule>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Declare a field. Fails on an invalid declaration or a duplicate name.
    pub fn field(mut self, builder: FieldBuilder) -> Result<Self, SchemaError> {
        let descriptor = builder.build()?;
        if self.fields.iter().any(|f| f.name() == descriptor.name()) {
            return Err(SchemaError::DuplicateField {
                schema: self.name,
                field: descriptor.name().to_string(),
            });
        }
        self.fields.push(descriptor);
        Ok(self)
    }

    /// Attach a named whole-record validation rule to one or more fields.
    ///
    /// The rule returns `None` on success or a failure description. It runs
    /// at most once per validation pass even when attached to several
    /// fields.
    pub fn validation<F>(
        mut self,
        name: impl Into<String>,
        fields: &[&str],
        rule: F,
    ) -> Result<Self, SchemaError>
    where
        F: Fn(&Record) -> Option<String> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.rules.iter().any(|r| r.name() == name) {
            return Err(SchemaError::DuplicateRule {
                schema: self.name,
                rule: name,
            });
        }
        if fields.is_empty() {
            return Err(SchemaError::EmptyRuleFields { rule: name });
        }
        for field in fields {
            if !self.fields.iter().any(|f| f.name() == *field) {
                return Err(SchemaError::UnknownRuleField {
                    rule: name,
                    field: (*field).to_string(),
                });
            }
        }

        let fields = fields.iter().map(|f| (*f).to_string()).collect();
        self.rules
            .push(ValidationRule::new(name, fields, Box::new(rule)));
        Ok(self)
    }

    /// Freeze the declarations into an immutable schema.
    ///
    /// The schema is returned behind an `Arc` because every record instance
    /// keeps a shared back-reference to it.
    pub fn build(self) -> Arc<RecordSchema> {
        debug!(
            "built schema {:?} with {} fields and {} validations",
            self.name,
            self.fields.len(),
            self.rules.len()
        );
        Arc::new(RecordSchema::new(self.name, self.fields, self.rules))
    }
}
