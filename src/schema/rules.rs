//! Whole-record validation rules.

use std::fmt;

use crate::record::Record;

/// Type alias for whole-record validation functions. A rule returns `None`
/// when the record is acceptable, or a description of what failed.
pub type RuleFn = Box<dyn Fn(&Record) -> Option<String> + Send + Sync>;

/// A named validation routine attached to one or more fields.
///
/// A rule may be attached to several fields; the engine still executes it
/// at most once per validation pass, tracked by rule name.
pub struct ValidationRule {
    name: String,
    fields: Vec<String>,
    run: RuleFn,
}

impl ValidationRule {
    pub(crate) fn new(name: String, fields: Vec<String>, run: RuleFn) -> Self {
        Self { name, fields, run }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields the rule is attached to, in attachment order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn is_attached_to(&self, field: &str) -> bool {
        self.fields.iter().any(|name| name == field)
    }

    pub(crate) fn run(&self, record: &Record) -> Option<String> {
        (self.run)(record)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}
