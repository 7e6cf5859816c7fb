//! Two-variant success/failure value.
//!
//! [`Outcome`] is the engine's non-panicking reporting channel for call
//! sites that want to inspect a failure as a value instead of propagating
//! it. The representation is private: the two named constructors (plus
//! [`Outcome::from_err`] for an already structured error) are the only way
//! to produce one, and nothing can be altered after construction.

use crate::record::{ErrorKind, RecordError};

/// Immutable success-or-failure value.
///
/// # Example
///
/// ```rust
/// use fieldguard::Outcome;
///
/// let ok = Outcome::ok(42);
/// assert!(ok.is_ok());
/// assert_eq!(ok.into_result().unwrap(), 42);
///
/// let error: Outcome<i32> = Outcome::error("boom");
/// assert!(!error.is_ok());
/// assert_eq!(error.into_result().unwrap_err().to_string(), "boom");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    inner: Inner<T>,
}

#[derive(Debug, Clone, PartialEq)]
enum Inner<T> {
    Ok(T),
    Error(RecordError),
}

impl<T> Outcome<T> {
    /// Success carrying a value.
    pub fn ok(value: T) -> Self {
        Self {
            inner: Inner::Ok(value),
        }
    }

    /// Failure carrying only a message, with the default failure kind.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            inner: Inner::Error(RecordError::Failure(message.into())),
        }
    }

    /// Failure carrying a structured engine error; the kind follows the
    /// error variant.
    pub fn from_err(error: RecordError) -> Self {
        Self {
            inner: Inner::Error(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.inner, Inner::Ok(_))
    }

    pub fn value(&self) -> Option<&T> {
        match &self.inner {
            Inner::Ok(value) => Some(value),
            Inner::Error(_) => None,
        }
    }

    pub fn err(&self) -> Option<&RecordError> {
        match &self.inner {
            Inner::Ok(_) => None,
            Inner::Error(error) => Some(error),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.err().map(RecordError::kind)
    }

    /// Convert into a plain `Result`: the value on success, the carried
    /// error otherwise.
    pub fn into_result(self) -> Result<T, RecordError> {
        match self.inner {
            Inner::Ok(value) => Ok(value),
            Inner::Error(error) => Err(error),
        }
    }

    /// Map the success value, leaving a failure untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.inner {
            Inner::Ok(value) => Outcome::ok(f(value)),
            Inner::Error(error) => Outcome::from_err(error),
        }
    }
}

impl Outcome<()> {
    /// Success carrying no value.
    pub fn unit() -> Self {
        Self::ok(())
    }
}
