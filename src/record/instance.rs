//! Record instances and the construction/mutation engine.

use std::sync::Arc;

use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use stillwater::validation::Validation;

use crate::core::FieldViolation;
use crate::outcome::Outcome;
use crate::record::error::{ArgumentFailure, ConstraintFailure, RecordError};
use crate::schema::RecordSchema;

/// One constructed instance of a record type.
///
/// A record holds exactly the field set declared by its schema, with
/// values stored in declaration order, and a shared back-reference to the
/// schema. It is never partially valid: construction fully succeeds or no
/// instance is produced, and a rejected mutation leaves the record
/// unchanged.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldBuilder, Record, SchemaBuilder};
/// use serde_json::json;
///
/// let schema = SchemaBuilder::new("circle")
///     .field(FieldBuilder::new("radius").named_check("positive_int"))
///     .unwrap()
///     .field(FieldBuilder::new("label").default(json!("unnamed")))
///     .unwrap()
///     .build();
///
/// let circle = Record::construct(&schema, [("radius", json!(3))]).unwrap();
///
/// assert_eq!(circle.get("radius").unwrap(), &json!(3));
/// assert_eq!(circle.get("label").unwrap(), &json!("unnamed"));
/// assert!(Record::construct(&schema, [("radius", json!(0))]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl Record {
    /// Construct a record from named field values.
    ///
    /// The full construction contract:
    /// 1. The supplied names are checked against the schema; missing
    ///    required fields (schema order) and spurious names (input order)
    ///    fail together in one argument error.
    /// 2. Defaults fill every absent optional field.
    /// 3. Every supplied value runs its field check; failures accumulate
    ///    across all fields instead of stopping at the first.
    /// 4. Whole-record validation rules run, each distinct rule at most
    ///    once, and their failures accumulate the same way.
    ///
    /// Duplicate names in the input keep the last value.
    pub fn construct<I, K>(schema: &Arc<RecordSchema>, fields: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut supplied: Vec<(String, Value)> = Vec::new();
        for (name, value) in fields {
            let name = name.into();
            match supplied.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => supplied.push((name, value)),
            }
        }

        let missing: Vec<String> = schema
            .required_names()
            .into_iter()
            .filter(|name| !supplied.iter().any(|(supplied_name, _)| supplied_name == name))
            .map(str::to_string)
            .collect();
        let spurious: Vec<String> = supplied
            .iter()
            .filter(|(name, _)| !schema.has_field(name))
            .map(|(name, _)| name.clone())
            .collect();
        if !missing.is_empty() || !spurious.is_empty() {
            return Err(RecordError::Arguments(ArgumentFailure::new(
                missing, spurious,
            )));
        }

        let mut checks = Vec::new();
        let mut values = Vec::with_capacity(schema.len());
        for field in schema.fields() {
            match supplied.iter().find(|(name, _)| name == field.name()) {
                Some((_, value)) => {
                    checks.push(field.validate(value));
                    values.push(value.clone());
                }
                // Explicitly-optional fields without a default hold null.
                None => values.push(field.default().cloned().unwrap_or(Value::Null)),
            }
        }
        if let Validation::Failure(errors) = Validation::all_vec(checks).map(|_| ()) {
            return Err(RecordError::Constraint(ConstraintFailure::from_violations(
                errors.iter().cloned().collect(),
            )));
        }

        let record = Record {
            schema: Arc::clone(schema),
            values,
        };

        let violations = schema.run_rules(&record);
        if !violations.is_empty() {
            return Err(RecordError::Constraint(ConstraintFailure::from_violations(
                violations,
            )));
        }

        debug!("constructed record for schema {:?}", schema.name());
        Ok(record)
    }

    /// Construct from positional values in declaration order.
    ///
    /// The number of values must equal the number of declared fields, so a
    /// missing trailing value can never be silently masked by a default.
    pub fn construct_positional(
        schema: &Arc<RecordSchema>,
        values: Vec<Value>,
    ) -> Result<Self, RecordError> {
        if values.len() != schema.len() {
            return Err(RecordError::Arity {
                schema: schema.name().to_string(),
                expected: schema.len(),
                got: values.len(),
            });
        }
        let pairs: Vec<(String, Value)> = schema
            .field_names()
            .into_iter()
            .map(str::to_string)
            .zip(values)
            .collect();
        Self::construct(schema, pairs)
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.schema.has_field(name)
    }

    /// Checked read.
    pub fn get(&self, name: &str) -> Result<&Value, RecordError> {
        let position = self
            .schema
            .position(name)
            .ok_or_else(|| RecordError::UndefinedField(name.to_string()))?;
        Ok(&self.values[position])
    }

    /// Checked write: validate-then-commit.
    ///
    /// The candidate value runs the field's constraint check and, when it
    /// passes, the validation rules attached to the field. A failing write
    /// is rolled back, leaving the record in its previous valid state.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), RecordError> {
        let schema = Arc::clone(&self.schema);
        let position = schema
            .position(name)
            .ok_or_else(|| RecordError::UndefinedField(name.to_string()))?;
        let field = &schema.fields()[position];
        if field.is_readonly() {
            return Err(RecordError::ReadonlyField(name.to_string()));
        }

        let previous = std::mem::replace(&mut self.values[position], value);

        let mut violations: Vec<FieldViolation> = Vec::new();
        if let Validation::Failure(errors) = field.validate(&self.values[position]) {
            violations.extend(errors.iter().cloned());
        } else {
            violations.extend(schema.run_rules_for_field(self, name));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            self.values[position] = previous;
            Err(RecordError::Constraint(ConstraintFailure::from_violations(
                violations,
            )))
        }
    }

    /// Every declared field with its current value, in declaration order.
    pub fn to_pairs(&self) -> Vec<(String, Value)> {
        self.schema
            .field_names()
            .into_iter()
            .map(str::to_string)
            .zip(self.values.iter().cloned())
            .collect()
    }

    /// The record's data as a JSON object. Use [`to_pairs`] when field
    /// declaration order matters.
    ///
    /// [`to_pairs`]: Record::to_pairs
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in self.to_pairs() {
            map.insert(name, value);
        }
        Value::Object(map)
    }

    /// Values for exactly the requested names, in request order, through
    /// the checked read path.
    pub fn values_at<'a, I>(&self, names: I) -> Result<Vec<Value>, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|name| self.get(name).cloned())
            .collect()
    }

    /// Derive a new record with overrides applied and fully re-validated.
    ///
    /// Total: either the merge produces a new valid record, or it fails
    /// with the same error shapes as construction. The receiver is never
    /// mutated.
    pub fn merge<I, K>(&self, overrides: I) -> Outcome<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut pairs = self.to_pairs();
        for (name, value) in overrides {
            let name = name.into();
            match pairs.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                // Unknown names flow through so construction reports them
                // as spurious.
                None => pairs.push((name, value)),
            }
        }
        match Self::construct(&self.schema, pairs) {
            Ok(record) => Outcome::ok(record),
            Err(error) => Outcome::from_err(error),
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}
