//! Composable string constraint validator.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::core::FieldCheck;
use crate::types::error::ConstraintSpecError;
use crate::types::Report;

static CAPITALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}\p{Ll}*$").expect("capitalized pattern"));
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Ll}*$").expect("lowercase pattern"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Lu}*$").expect("uppercase pattern"));

/// Shape flags for string subjects. Flags are checkable together; they are
/// not mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Flag {
    Capitalized,
    Lowercase,
    Uppercase,
}

impl Flag {
    fn check(self, subject: &str, report: &mut Report) {
        match self {
            Self::Capitalized => {
                if !CAPITALIZED.is_match(subject) {
                    report.add(format!("value {subject:?} is not capitalized"));
                }
            }
            Self::Lowercase => {
                if !LOWERCASE.is_match(subject) {
                    report.add(format!("value {subject:?} is not lowercase"));
                }
            }
            Self::Uppercase => {
                if !UPPERCASE.is_match(subject) {
                    report.add(format!("value {subject:?} is not uppercase"));
                }
            }
        }
    }
}

/// Reusable string checker built from a fixed set of constraints.
///
/// Checks run in a fixed order (type, size or min/max, pattern, prefix,
/// suffix, flags) and accumulate every failure; a check never stops at
/// the first broken constraint. Lengths are counted in characters.
///
/// A validator without any constraints is just a string-type check.
///
/// # Example
///
/// ```rust
/// use fieldguard::ConstrainedStringBuilder;
///
/// let name = ConstrainedStringBuilder::new().size(1..=3).build().unwrap();
///
/// assert!(name.check_str("eta").is_valid());
///
/// let report = name.check_str("etat");
/// assert!(!report.is_valid());
/// assert_eq!(
///     report.errors(),
///     ["illegal length of value \"etat\"; 4 not in required range 1..3"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConstrainedString {
    flags: BTreeSet<Flag>,
    size: Option<RangeInclusive<usize>>,
    min: Option<usize>,
    max: Option<usize>,
    pattern: Option<Regex>,
    prefix: Option<String>,
    suffix: Option<String>,
}

impl ConstrainedString {
    /// Check any runtime value. A non-string subject reports only the type
    /// failure.
    pub fn check(&self, subject: &Value) -> Report {
        let mut report = Report::new();
        match subject.as_str() {
            Some(text) => self.run_checks(text, &mut report),
            None => report.add(format!("{subject} is not a string")),
        }
        report
    }

    /// Check a string subject directly.
    pub fn check_str(&self, subject: &str) -> Report {
        let mut report = Report::new();
        self.run_checks(subject, &mut report);
        report
    }

    /// Adapt this validator into a field check for schema declarations.
    pub fn into_check(self) -> FieldCheck {
        FieldCheck::new(move |value| self.check(value).is_valid())
    }

    fn run_checks(&self, subject: &str, report: &mut Report) {
        let length = subject.chars().count();

        if let Some(size) = &self.size {
            if !size.contains(&length) {
                report.add(format!(
                    "illegal length of value {subject:?}; {length} not in required range {}..{}",
                    size.start(),
                    size.end()
                ));
            }
        }
        if let Some(min) = self.min {
            if length < min {
                report.add(format!(
                    "illegal length of value {subject:?}; {length} < than minimum {min}"
                ));
            }
        }
        if let Some(max) = self.max {
            if length > max {
                report.add(format!(
                    "illegal length of value {subject:?}; {length} > than maximum {max}"
                ));
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(subject) {
                report.add(format!(
                    "value {subject:?} does not match required pattern {pattern}"
                ));
            }
        }
        if let Some(prefix) = &self.prefix {
            if !subject.starts_with(prefix.as_str()) {
                report.add(format!("value {subject:?} does not start with {prefix:?}"));
            }
        }
        if let Some(suffix) = &self.suffix {
            if !subject.ends_with(suffix.as_str()) {
                report.add(format!("value {subject:?} does not end with {suffix:?}"));
            }
        }
        for flag in &self.flags {
            flag.check(subject, report);
        }
    }
}

/// Builder for [`ConstrainedString`].
///
/// Impossible constraint combinations fail at build time: an empty `size`
/// range, `min` above `max`, or `size` combined with `min`/`max`.
#[derive(Debug, Default)]
pub struct ConstrainedStringBuilder {
    flags: BTreeSet<Flag>,
    size: Option<RangeInclusive<usize>>,
    min: Option<usize>,
    max: Option<usize>,
    pattern: Option<Regex>,
    prefix: Option<String>,
    suffix: Option<String>,
}

impl ConstrainedStringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Inclusive character-length range; exclusive with `min`/`max`.
    pub fn size(mut self, range: RangeInclusive<usize>) -> Self {
        self.size = Some(range);
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn build(self) -> Result<ConstrainedString, ConstraintSpecError> {
        if self.size.is_some() && (self.min.is_some() || self.max.is_some()) {
            return Err(ConstraintSpecError::SizeConflict);
        }
        if let Some(size) = &self.size {
            if size.is_empty() {
                return Err(ConstraintSpecError::EmptySize);
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConstraintSpecError::MinExceedsMax { min, max });
            }
        }

        Ok(ConstrainedString {
            flags: self.flags,
            size: self.size,
            min: self.min,
            max: self.max,
            pattern: self.pattern,
            prefix: self.prefix,
            suffix: self.suffix,
        })
    }
}
