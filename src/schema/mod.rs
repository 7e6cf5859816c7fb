//! Schema declaration and the immutable schema value.
//!
//! A schema is declared once through [`SchemaBuilder`], which collects
//! ordered field declarations and whole-record validation rules, then
//! freezes them into an immutable [`RecordSchema`]. Declaration mistakes
//! surface immediately as [`SchemaError`]s.

mod builder;
mod error;
mod rules;
#[allow(clippy::module_inception)]
mod schema;

pub use builder::SchemaBuilder;
pub use error::SchemaError;
pub use rules::{RuleFn, ValidationRule};
pub use schema::RecordSchema;
