//! Build errors for composable value validators.

use thiserror::Error;

/// Errors raised while building a constraint validator. These are
/// schema-time mistakes in the constraint combination itself, not
/// value-time failures.
#[derive(Debug, Error, PartialEq)]
pub enum ConstraintSpecError {
    #[error("size must not be an empty range")]
    EmptySize,

    #[error("min({min}) must not exceed max({max})")]
    MinExceedsMax { min: usize, max: usize },

    #[error("must not combine min or max with size")]
    SizeConflict,
}
