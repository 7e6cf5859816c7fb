//! Record instances, the construction/mutation engine, and value-time
//! errors.
//!
//! Construction either fully succeeds or reports every problem found in a
//! single pass: argument-shape mismatches first, then every violated
//! constraint across all fields, then every failed whole-record rule.
//! Partial validation success is never silently accepted.

mod error;
mod instance;
#[macro_use]
mod macros;

pub use error::{ArgumentFailure, ConstraintFailure, ErrorKind, RecordError};
pub use instance::Record;
