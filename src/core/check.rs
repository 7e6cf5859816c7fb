//! Constraint checks for field values.
//!
//! A check is a pure boolean predicate over a candidate value. Checks are
//! built from closures, from type-kind tags, or resolved from the registry
//! of predefined named checks.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON kind of a runtime value, used as a type tag for field checks.
///
/// A kind tag is shorthand for "the value's runtime kind must equal this
/// tag" and is mutually exclusive with a custom predicate on the same field.
///
/// # Example
///
/// ```rust
/// use fieldguard::ValueKind;
/// use serde_json::json;
///
/// assert_eq!(ValueKind::of(&json!("hello")), ValueKind::String);
/// assert!(ValueKind::Number.matches(&json!(42)));
/// assert!(!ValueKind::Number.matches(&json!("42")));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a runtime value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Check whether a value has this kind.
    pub fn matches(self, value: &Value) -> bool {
        Self::of(value) == self
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pure predicate that decides whether a value is acceptable for a field.
///
/// The predicate must be deterministic and thread-safe; the engine may run
/// it any number of times against the same value.
///
/// # Example
///
/// ```rust
/// use fieldguard::FieldCheck;
/// use serde_json::json;
///
/// let even = FieldCheck::new(|v| v.as_i64().map_or(false, |n| n % 2 == 0));
///
/// assert!(even.check(&json!(4)));
/// assert!(!even.check(&json!(3)));
/// ```
pub struct FieldCheck {
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl FieldCheck {
    /// Create a check from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        FieldCheck {
            predicate: Box::new(predicate),
        }
    }

    /// Create a check that accepts exactly one value kind.
    pub fn of_kind(kind: ValueKind) -> Self {
        Self::new(move |value| kind.matches(value))
    }

    /// Run the check against a candidate value.
    pub fn check(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for FieldCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldCheck(..)")
    }
}

type Predefined = fn(&Value) -> bool;

fn is_bool(value: &Value) -> bool {
    value.is_boolean()
}

fn is_int(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn is_non_negative_int(value: &Value) -> bool {
    value.as_u64().is_some()
}

fn is_number(value: &Value) -> bool {
    value.is_number()
}

fn is_positive_int(value: &Value) -> bool {
    value.as_u64().map_or(false, |n| n > 0)
}

fn is_string(value: &Value) -> bool {
    value.is_string()
}

static PREDEFINED_CHECKS: Lazy<BTreeMap<&'static str, Predefined>> = Lazy::new(|| {
    BTreeMap::from([
        ("bool", is_bool as Predefined),
        ("int", is_int as Predefined),
        ("non_negative_int", is_non_negative_int as Predefined),
        ("number", is_number as Predefined),
        ("positive_int", is_positive_int as Predefined),
        ("string", is_string as Predefined),
    ])
});

/// Resolve a predefined check by name.
///
/// Returns `None` for unknown names; declaration-time callers turn that
/// into a schema error listing [`predefined_names`].
pub fn predefined(name: &str) -> Option<FieldCheck> {
    PREDEFINED_CHECKS
        .get(name)
        .map(|predicate| FieldCheck::new(*predicate))
}

/// Names of every predefined check, sorted.
pub fn predefined_names() -> impl Iterator<Item = &'static str> {
    PREDEFINED_CHECKS.keys().copied()
}

/// Sorted predefined names, grouped by first letter, one group per line.
/// Used in the unknown-check error message.
pub(crate) fn readable_predefined_list() -> String {
    let mut groups: Vec<Vec<&'static str>> = Vec::new();
    for name in predefined_names() {
        let first = name.chars().next();
        match groups.last_mut() {
            Some(group) if group.last().and_then(|n| n.chars().next()) == first => {
                group.push(name);
            }
            _ => groups.push(vec![name]),
        }
    }
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|name| format!("{name:?}"))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n            ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_classifies_values() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
    }

    #[test]
    fn kind_check_accepts_only_matching_kind() {
        let check = FieldCheck::of_kind(ValueKind::String);

        assert!(check.check(&json!("hello")));
        assert!(!check.check(&json!(42)));
        assert!(!check.check(&json!(null)));
    }

    #[test]
    fn predicate_check_is_deterministic() {
        let check = FieldCheck::new(|v| v.as_i64().map_or(false, |n| n > 10));
        let value = json!(11);

        assert_eq!(check.check(&value), check.check(&value));
    }

    #[test]
    fn predefined_int_checks() {
        let int = predefined("int").unwrap();
        let non_negative = predefined("non_negative_int").unwrap();
        let positive = predefined("positive_int").unwrap();

        assert!(int.check(&json!(-3)));
        assert!(!int.check(&json!(1.5)));
        assert!(!int.check(&json!("3")));

        assert!(non_negative.check(&json!(0)));
        assert!(!non_negative.check(&json!(-1)));

        assert!(positive.check(&json!(1)));
        assert!(!positive.check(&json!(0)));
        assert!(!positive.check(&json!(-1)));
    }

    #[test]
    fn predefined_scalar_checks() {
        assert!(predefined("bool").unwrap().check(&json!(false)));
        assert!(predefined("string").unwrap().check(&json!("")));
        assert!(predefined("number").unwrap().check(&json!(1.25)));
        assert!(!predefined("number").unwrap().check(&json!("1.25")));
    }

    #[test]
    fn unknown_predefined_name_resolves_to_none() {
        assert!(predefined("no_such_check").is_none());
    }

    #[test]
    fn predefined_names_are_sorted() {
        let names: Vec<_> = predefined_names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn readable_list_groups_by_first_letter() {
        let list = readable_predefined_list();

        assert!(list.contains("\"bool\""));
        // "non_negative_int" and "number" share a line.
        assert!(list.contains("\"non_negative_int\", \"number\""));
    }
}
