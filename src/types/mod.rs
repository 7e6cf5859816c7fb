//! Composable value validators.
//!
//! A validator is built once from a fixed set of constraints and then
//! checked against any number of candidate values. Every check accumulates
//! all failures into a [`Report`] instead of stopping at the first broken
//! constraint, and each invocation produces a fresh report.
//!
//! [`ConstrainedString`] is the template: future validators (numeric
//! ranges, enum membership) follow the same build-then-check contract and
//! report shape.

mod error;
mod string;

use std::fmt;

pub use error::ConstraintSpecError;
pub use string::{ConstrainedString, ConstrainedStringBuilder, Flag};

/// Accumulated result of checking one candidate value.
///
/// Valid iff no error was recorded; errors keep the order the checks ran
/// in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    errors: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure message.
    pub fn add(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = Report::new();

        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn errors_keep_insertion_order() {
        let mut report = Report::new();
        report.add("first");
        report.add("second");

        assert!(!report.is_valid());
        assert_eq!(report.errors(), ["first", "second"]);
        assert_eq!(report.to_string(), "first\nsecond");
        assert_eq!(report.into_errors(), vec!["first", "second"]);
    }
}
