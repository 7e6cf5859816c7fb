//! Schema-time declaration errors.
//!
//! These indicate a programming mistake in a schema definition. They are
//! surfaced immediately while the schema is being declared and are not
//! runtime conditions to recover from.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while declaring fields and validation rules.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field name must be an identifier, not {0:?}")]
    InvalidName(String),

    #[error("field {field:?} already defined in schema {schema:?}")]
    DuplicateField { schema: String, field: String },

    #[error("must not provide more than one check for field {0:?}")]
    ConflictingChecks(String),

    #[error("undefined check {name:?}\npredefined: {known}")]
    UnknownCheck { name: String, known: String },

    #[error("illegal default value {value} for field {field:?}")]
    IllegalDefault { field: String, value: Value },

    #[error("validation {rule:?} already defined in schema {schema:?}")]
    DuplicateRule { schema: String, rule: String },

    #[error("validation {rule:?} refers to undeclared field {field:?}")]
    UnknownRuleField { rule: String, field: String },

    #[error("validation {rule:?} must be attached to at least one field")]
    EmptyRuleFields { rule: String },
}
