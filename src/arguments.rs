//! Standalone argument-set validator.
//!
//! Validates an arbitrary set of provided names against an optional
//! `allowed` set, an `exclusive` set (at most one member present) and a
//! `required` set (at least one member present). Violations accumulate:
//! the check reports every broken rule, never just the first. The
//! construction path uses the same idea for its keyword check; this
//! validator is also usable on its own.

use std::fmt;

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

use crate::outcome::Outcome;
use crate::record::RecordError;

/// One violated argument-set rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArgumentViolation {
    #[error("illegal arguments {given:?}, allowed are: {allowed:?}")]
    Illegal {
        given: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("conflicting arguments {given:?}, only one of {exclusive:?} is allowed")]
    Conflicting {
        given: Vec<String>,
        exclusive: Vec<String>,
    },

    #[error("required argument missing, one of {required:?} must be provided")]
    MissingRequired { required: Vec<String> },
}

/// Every rule an argument set violated, in check order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSetFailure {
    violations: Vec<ArgumentViolation>,
}

impl ArgumentSetFailure {
    pub(crate) fn new(violations: Vec<ArgumentViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[ArgumentViolation] {
        &self.violations
    }
}

impl fmt::Display for ArgumentSetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .violations
            .iter()
            .map(ArgumentViolation::to_string)
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Rule set for validating provided argument names.
///
/// # Example
///
/// ```rust
/// use fieldguard::ArgumentsBuilder;
///
/// let rules = ArgumentsBuilder::new()
///     .allow(["size", "min", "max"])
///     .exclusive(["size", "min"])
///     .needs(["size", "min", "max"])
///     .build();
///
/// assert!(rules.check(["size"]).is_ok());
/// assert!(!rules.check(["size", "min"]).is_ok());
/// assert!(!rules.check([]).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Arguments {
    allowed: Option<Vec<String>>,
    exclusive: Vec<String>,
    required: Vec<String>,
}

impl Arguments {
    /// Whether a single name passes the `allowed` rule. `None` means
    /// unrestricted.
    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|a| a == name))
    }

    /// Check a provided name set against every rule, accumulating all
    /// violations into one argument-kind error.
    pub fn check<'a, I>(&self, values: I) -> Outcome<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let given: Vec<String> = values.into_iter().map(str::to_string).collect();

        let mut checks: Vec<Validation<(), NonEmptyVec<ArgumentViolation>>> = Vec::new();

        if let Some(allowed) = &self.allowed {
            let illegal: Vec<String> = given
                .iter()
                .filter(|name| !allowed.contains(*name))
                .cloned()
                .collect();
            let check = if illegal.is_empty() {
                Validation::success(())
            } else {
                Validation::fail(ArgumentViolation::Illegal {
                    given: illegal,
                    allowed: allowed.clone(),
                })
            };
            checks.push(check);
        }

        let conflicting: Vec<String> = given
            .iter()
            .filter(|name| self.exclusive.contains(*name))
            .cloned()
            .collect();
        if conflicting.len() > 1 {
            checks.push(Validation::fail(ArgumentViolation::Conflicting {
                given: conflicting,
                exclusive: self.exclusive.clone(),
            }));
        }

        if !self.required.is_empty() {
            let present = given.iter().any(|name| self.required.contains(name));
            if !present {
                checks.push(Validation::fail(ArgumentViolation::MissingRequired {
                    required: self.required.clone(),
                }));
            }
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(_) => Outcome::unit(),
            Validation::Failure(violations) => Outcome::from_err(RecordError::ArgumentSet(
                ArgumentSetFailure::new(violations.iter().cloned().collect()),
            )),
        }
    }
}

/// Builder for an [`Arguments`] rule set.
#[derive(Debug, Default)]
pub struct ArgumentsBuilder {
    allowed: Option<Vec<String>>,
    exclusive: Vec<String>,
    required: Vec<String>,
}

impl ArgumentsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the accepted names; unlisted names become illegal.
    pub fn allow<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// At most one of these names may be present.
    pub fn exclusive<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusive = names.into_iter().map(Into::into).collect();
        self
    }

    /// At least one of these names must be present.
    pub fn needs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Arguments {
        Arguments {
            allowed: self.allowed,
            exclusive: self.exclusive,
            required: self.required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ErrorKind;

    #[test]
    fn unrestricted_rules_accept_anything() {
        let rules = ArgumentsBuilder::new().build();

        assert!(rules.check(["whatever", "goes"]).is_ok());
        assert!(rules.is_allowed("anything"));
    }

    #[test]
    fn illegal_names_are_reported_with_the_allowed_set() {
        let rules = ArgumentsBuilder::new().allow(["size", "min"]).build();

        let outcome = rules.check(["size", "shape"]);
        assert_eq!(outcome.kind(), Some(ErrorKind::Argument));
        let message = outcome.into_result().unwrap_err().to_string();
        assert_eq!(
            message,
            "illegal arguments [\"shape\"], allowed are: [\"size\", \"min\"]"
        );
    }

    #[test]
    fn exclusive_names_conflict_only_in_pairs() {
        let rules = ArgumentsBuilder::new().exclusive(["size", "min"]).build();

        assert!(rules.check(["size"]).is_ok());
        assert!(rules.check(["min", "other"]).is_ok());

        let outcome = rules.check(["size", "min"]);
        let message = outcome.into_result().unwrap_err().to_string();
        assert!(message.contains("conflicting arguments"));
        assert!(message.contains("only one of [\"size\", \"min\"] is allowed"));
    }

    #[test]
    fn required_means_at_least_one_of() {
        let rules = ArgumentsBuilder::new().needs(["size", "min", "max"]).build();

        assert!(rules.check(["max"]).is_ok());

        let outcome = rules.check(["other"]);
        let message = outcome.into_result().unwrap_err().to_string();
        assert!(message.contains("required argument missing"));
    }

    #[test]
    fn empty_required_set_is_not_a_violation() {
        let rules = ArgumentsBuilder::new().build();

        assert!(rules.check([]).is_ok());
    }

    #[test]
    fn violations_accumulate_across_rules() {
        let rules = ArgumentsBuilder::new()
            .allow(["size", "min", "required_one"])
            .exclusive(["size", "min"])
            .needs(["required_one"])
            .build();

        let outcome = rules.check(["size", "min", "shape"]);
        match outcome.err() {
            Some(RecordError::ArgumentSet(failure)) => {
                assert_eq!(failure.violations().len(), 3);
            }
            other => panic!("expected argument-set failure, got {other:?}"),
        }
    }
}
