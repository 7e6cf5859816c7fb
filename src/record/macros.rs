//! Macro for declaring typed record wrappers.

/// Declare a checked record type with typed accessors.
///
/// The macro emits a wrapper struct over [`Record`] with a lazily-built
/// shared schema, `construct`/`positional` constructors, and per-field
/// accessors routed through the engine's checked read/write path. Fields
/// in the `fields` section get a getter and the named setter; fields in
/// the `readonly` section get a getter only and are declared readonly in
/// the schema, so even untyped writes through [`Record::set`] are
/// rejected.
///
/// [`Record`]: crate::Record
/// [`Record::set`]: crate::Record::set
///
/// # Example
///
/// ```rust
/// use fieldguard::record;
/// use serde_json::json;
///
/// record! {
///     pub struct Circle {
///         fields {
///             radius (set_radius) => |f| f.named_check("positive_int"),
///             label (set_label) => |f| f.default(json!("unnamed")),
///         }
///         readonly {
///             id => |f| f.named_check("positive_int"),
///         }
///     }
/// }
///
/// let mut circle = Circle::construct([("radius", json!(3)), ("id", json!(7))]).unwrap();
/// assert_eq!(circle.radius(), &json!(3));
/// assert_eq!(circle.label(), &json!("unnamed"));
///
/// circle.set_radius(json!(5)).unwrap();
/// assert!(circle.set_radius(json!(0)).is_err());
/// assert_eq!(circle.radius(), &json!(5));
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            fields {
                $( $field:ident ($setter:ident) => $builder:expr ),* $(,)?
            }
            $(readonly {
                $( $ro_field:ident => $ro_builder:expr ),* $(,)?
            })?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name {
            inner: $crate::Record,
        }

        impl $name {
            /// Schema shared by every instance of this record type.
            pub fn schema() -> &'static ::std::sync::Arc<$crate::RecordSchema> {
                static SCHEMA: $crate::__private::Lazy<
                    ::std::sync::Arc<$crate::RecordSchema>,
                > = $crate::__private::Lazy::new(|| {
                    fn __apply_field_builder(
                        build: impl ::std::ops::FnOnce($crate::FieldBuilder) -> $crate::FieldBuilder,
                        field: $crate::FieldBuilder,
                    ) -> $crate::FieldBuilder {
                        build(field)
                    }
                    let builder = $crate::SchemaBuilder::new(stringify!($name));
                    $(
                        let builder = builder
                            .field(__apply_field_builder(
                                $builder,
                                $crate::FieldBuilder::new(stringify!($field)),
                            ))
                            .expect("record! field declaration should be valid");
                    )*
                    $($(
                        let builder = builder
                            .field(
                                __apply_field_builder(
                                    $ro_builder,
                                    $crate::FieldBuilder::new(stringify!($ro_field)),
                                )
                                .readonly(),
                            )
                            .expect("record! field declaration should be valid");
                    )*)?
                    builder.build()
                });
                &*SCHEMA
            }

            pub fn construct<I, K>(fields: I) -> ::std::result::Result<Self, $crate::RecordError>
            where
                I: ::std::iter::IntoIterator<Item = (K, $crate::Value)>,
                K: ::std::convert::Into<::std::string::String>,
            {
                $crate::Record::construct(Self::schema(), fields).map(|inner| Self { inner })
            }

            pub fn positional(
                values: ::std::vec::Vec<$crate::Value>,
            ) -> ::std::result::Result<Self, $crate::RecordError> {
                $crate::Record::construct_positional(Self::schema(), values)
                    .map(|inner| Self { inner })
            }

            /// Derive a new instance with overrides applied and re-validated.
            pub fn merge<I, K>(&self, overrides: I) -> $crate::Outcome<Self>
            where
                I: ::std::iter::IntoIterator<Item = (K, $crate::Value)>,
                K: ::std::convert::Into<::std::string::String>,
            {
                self.inner.merge(overrides).map(|inner| Self { inner })
            }

            /// The untyped record behind the accessors.
            pub fn record(&self) -> &$crate::Record {
                &self.inner
            }

            $(
                pub fn $field(&self) -> &$crate::Value {
                    self.inner.get(stringify!($field)).expect("declared field")
                }

                pub fn $setter(
                    &mut self,
                    value: $crate::Value,
                ) -> ::std::result::Result<(), $crate::RecordError> {
                    self.inner.set(stringify!($field), value)
                }
            )*
            $($(
                pub fn $ro_field(&self) -> &$crate::Value {
                    self.inner.get(stringify!($ro_field)).expect("declared field")
                }
            )*)?
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::record::error::{ErrorKind, RecordError};

    record! {
        struct Circle {
            fields {
                radius (set_radius) => |f| f.named_check("positive_int"),
                label (set_label) => |f| f.default(json!("unnamed")),
            }
            readonly {
                id => |f| f.named_check("positive_int"),
            }
        }
    }

    #[test]
    fn generated_schema_is_shared_and_ordered() {
        let schema = Circle::schema();
        assert_eq!(schema.name(), "Circle");
        assert_eq!(schema.field_names(), vec!["radius", "label", "id"]);
        assert!(std::sync::Arc::ptr_eq(Circle::schema(), schema));
    }

    #[test]
    fn construct_and_accessors_round_trip() {
        let mut circle =
            Circle::construct([("radius", json!(3)), ("id", json!(7))]).unwrap();

        assert_eq!(circle.radius(), &json!(3));
        assert_eq!(circle.label(), &json!("unnamed"));
        assert_eq!(circle.id(), &json!(7));

        circle.set_label(json!("unit")).unwrap();
        assert_eq!(circle.label(), &json!("unit"));
    }

    #[test]
    fn setters_route_through_the_checked_path() {
        let mut circle =
            Circle::construct([("radius", json!(3)), ("id", json!(7))]).unwrap();

        let error = circle.set_radius(json!(0)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Constraint);
        assert_eq!(circle.radius(), &json!(3));
    }

    #[test]
    fn readonly_fields_reject_untyped_writes() {
        let circle = Circle::construct([("radius", json!(3)), ("id", json!(7))]).unwrap();
        let mut record = circle.record().clone();

        let error = record.set("id", json!(8)).unwrap_err();
        assert!(matches!(error, RecordError::ReadonlyField(_)));
    }

    #[test]
    fn positional_uses_declaration_order() {
        let circle = Circle::positional(vec![json!(2), json!("c"), json!(9)]).unwrap();

        assert_eq!(circle.radius(), &json!(2));
        assert_eq!(circle.label(), &json!("c"));
        assert_eq!(circle.id(), &json!(9));
    }

    #[test]
    fn merge_returns_the_typed_wrapper() {
        let circle = Circle::construct([("radius", json!(3)), ("id", json!(7))]).unwrap();

        let grown = circle.merge([("radius", json!(10))]).into_result().unwrap();
        assert_eq!(grown.radius(), &json!(10));
        assert_eq!(circle.radius(), &json!(3));
    }

    #[test]
    fn merge_failure_carries_the_constraint_kind() {
        let circle = Circle::construct([("radius", json!(3)), ("id", json!(7))]).unwrap();

        let outcome = circle.merge([("radius", json!(-2))]);
        assert_eq!(outcome.kind(), Some(ErrorKind::Constraint));
    }
}
