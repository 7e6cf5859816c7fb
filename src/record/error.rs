//! Value-time errors reported by the construction and mutation engine.

use std::fmt;

use thiserror::Error;

use crate::arguments::ArgumentSetFailure;
use crate::core::FieldViolation;

/// Coarse classification of a value-time error, usable for dispatch
/// without matching on the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The shape of the supplied arguments did not match the schema.
    Argument,
    /// One or more value-level constraints were violated.
    Constraint,
    /// Access to an undeclared field, or a write to a readonly field.
    Key,
    /// A plain failure carrying only a message.
    Failure,
}

/// Missing and spurious field names from a construction-argument check.
///
/// `missing` is in schema declaration order, `spurious` in input order.
/// Neither list is ever silently truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentFailure {
    missing: Vec<String>,
    spurious: Vec<String>,
}

impl ArgumentFailure {
    pub(crate) fn new(missing: Vec<String>, spurious: Vec<String>) -> Self {
        Self { missing, spurious }
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn spurious(&self) -> &[String] {
        &self.spurious
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.spurious.is_empty()
    }
}

impl fmt::Display for ArgumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if !self.missing.is_empty() {
            lines.push(format!("missing: {:?}", self.missing));
        }
        if !self.spurious.is_empty() {
            lines.push(format!("spurious: {:?}", self.spurious));
        }
        f.write_str(&lines.join("\n"))
    }
}

/// Constraint violations keyed by field name.
///
/// Every violated field is listed with every message it produced, in the
/// order the violations were found; nothing is collapsed to a first error.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintFailure {
    entries: Vec<(String, Vec<String>)>,
}

impl ConstraintFailure {
    pub(crate) fn from_violations(violations: Vec<FieldViolation>) -> Self {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        for violation in violations {
            let message = violation.to_string();
            let field = violation.field();
            match entries.iter_mut().find(|(name, _)| name == field) {
                Some((_, messages)) => messages.push(message),
                None => entries.push((field.to_string(), vec![message])),
            }
        }
        Self { entries }
    }

    /// Violated field names, first-seen order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn messages_for(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Total number of messages across all fields.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ConstraintFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Value-time errors: recoverable conditions reported with full detail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    #[error("{0}")]
    Arguments(ArgumentFailure),

    #[error("{0}")]
    Constraint(ConstraintFailure),

    #[error("{0}")]
    ArgumentSet(ArgumentSetFailure),

    #[error("expected {expected} positional values for schema {schema:?}, got {got}")]
    Arity {
        schema: String,
        expected: usize,
        got: usize,
    },

    #[error("undefined field {0}")]
    UndefinedField(String),

    #[error("must not modify readonly field {0}")]
    ReadonlyField(String),

    #[error("{0}")]
    Failure(String),
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Arguments(_) | Self::ArgumentSet(_) | Self::Arity { .. } => ErrorKind::Argument,
            Self::Constraint(_) => ErrorKind::Constraint,
            Self::UndefinedField(_) | Self::ReadonlyField(_) => ErrorKind::Key,
            Self::Failure(_) => ErrorKind::Failure,
        }
    }
}
