//! Core constraint primitives.
//!
//! This module contains the pure building blocks of the engine:
//! - Value-kind tags and constraint predicates via [`FieldCheck`]
//! - The registry of predefined named checks
//! - Field descriptors and their declaration builder
//!
//! Everything here is pure: checks are deterministic predicates over
//! in-memory values, with no side effects.

mod check;
mod field;

pub use check::{predefined, predefined_names, FieldCheck, ValueKind};
pub use field::{FieldBuilder, FieldDescriptor, FieldViolation};
