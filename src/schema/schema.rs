//! The immutable record schema.

use std::collections::BTreeSet;

use crate::core::{FieldDescriptor, FieldViolation};
use crate::record::Record;
use crate::schema::rules::ValidationRule;

/// Ordered, immutable set of field descriptors and validation rules
/// defining a record type.
///
/// A schema is produced once by [`SchemaBuilder`] and never changes
/// afterwards; it is shared by every record instance through an `Arc` and
/// is safe to read from multiple threads without locking.
///
/// [`SchemaBuilder`]: crate::schema::SchemaBuilder
#[derive(Debug)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    rules: Vec<ValidationRule>,
}

impl RecordSchema {
    pub(crate) fn new(
        name: String,
        fields: Vec<FieldDescriptor>,
        rules: Vec<ValidationRule>,
    ) -> Self {
        Self {
            name,
            fields,
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether a field exists and accepts writes after construction.
    pub fn is_writable(&self, name: &str) -> bool {
        self.field(name).map_or(false, |field| !field.is_readonly())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name()).collect()
    }

    /// Names of every non-optional field, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| !field.is_optional())
            .map(|field| field.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attached validation rules, in attachment order.
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Run every validation rule once for a full pass.
    ///
    /// Fields are visited in declaration order; each distinct rule executes
    /// at most once even when attached to several fields, and a failure is
    /// recorded under the field that triggered the execution.
    pub(crate) fn run_rules(&self, record: &Record) -> Vec<FieldViolation> {
        let mut executed = BTreeSet::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            for rule in &self.rules {
                if !rule.is_attached_to(field.name()) {
                    continue;
                }
                if !executed.insert(rule.name().to_string()) {
                    continue;
                }
                if let Some(message) = rule.run(record) {
                    violations.push(FieldViolation::RuleFailed {
                        field: field.name().to_string(),
                        rule: rule.name().to_string(),
                        message,
                    });
                }
            }
        }

        violations
    }

    /// Run only the rules attached to one field (checked mutation path).
    pub(crate) fn run_rules_for_field(&self, record: &Record, name: &str) -> Vec<FieldViolation> {
        self.rules
            .iter()
            .filter(|rule| rule.is_attached_to(name))
            .filter_map(|rule| {
                rule.run(record).map(|message| FieldViolation::RuleFailed {
                    field: name.to_string(),
                    rule: rule.name().to_string(),
                    message,
                })
            })
            .collect()
    }
}
