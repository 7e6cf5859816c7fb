//! Fieldguard: runtime-checked record types with accumulating validation
//!
//! Fieldguard lets a caller declare a record type as an ordered set of
//! named fields, each with an optional constraint check, default value and
//! readonly flag, then enforces those constraints on every construction
//! and mutation. It is a lightweight "checked struct" engine, not a schema
//! language: validation happens over in-memory values and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Schema**: immutable, ordered field declarations built once through
//!   [`SchemaBuilder`]
//! - **Checks**: pure predicates over candidate values, built from custom
//!   closures, predefined named checks, or value-kind tags
//! - **Accumulation**: construction reports every violated field and rule
//!   in one pass, never just the first failure
//! - **Outcome**: an immutable success/failure value for call sites that
//!   prefer inspecting errors over propagating them
//!
//! # Example
//!
//! ```rust
//! use fieldguard::{FieldBuilder, Record, SchemaBuilder};
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new("circle")
//!     .field(FieldBuilder::new("radius").named_check("positive_int"))
//!     .unwrap()
//!     .field(FieldBuilder::new("label").default(json!("unnamed")))
//!     .unwrap()
//!     .build();
//!
//! let mut circle = Record::construct(&schema, [("radius", json!(3))]).unwrap();
//! assert_eq!(circle.get("label").unwrap(), &json!("unnamed"));
//!
//! // A rejected write leaves the record unchanged.
//! assert!(circle.set("radius", json!(0)).is_err());
//! assert_eq!(circle.get("radius").unwrap(), &json!(3));
//! ```

pub mod arguments;
pub mod core;
pub mod outcome;
pub mod record;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use crate::arguments::{Arguments, ArgumentsBuilder};
pub use crate::core::{FieldBuilder, FieldCheck, FieldDescriptor, ValueKind};
pub use crate::outcome::Outcome;
pub use crate::record::{ErrorKind, Record, RecordError};
pub use crate::schema::{RecordSchema, SchemaBuilder, SchemaError};
pub use crate::types::{ConstrainedString, ConstrainedStringBuilder, Flag, Report};

/// The runtime value type flowing through the engine.
pub use serde_json::Value;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
