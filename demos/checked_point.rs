//! Basic checked-record usage: declare a schema, construct records, and
//! watch the engine reject bad shapes and values with full detail.

use fieldguard::{FieldBuilder, Record, SchemaBuilder};
use serde_json::json;

fn main() {
    env_logger::init();

    let schema = SchemaBuilder::new("point")
        .field(FieldBuilder::new("x").named_check("int"))
        .expect("declare x")
        .field(FieldBuilder::new("y").named_check("int"))
        .expect("declare y")
        .field(FieldBuilder::new("label").default(json!("origin")))
        .expect("declare label")
        .build();

    // Defaults fill optional fields.
    let mut point = Record::construct(&schema, [("x", json!(3)), ("y", json!(4))])
        .expect("valid construction");
    println!("constructed: {}", point.to_value());

    // Checked mutation: a bad value is rejected and rolled back.
    match point.set("x", json!("three")) {
        Ok(()) => unreachable!("a string is not an int"),
        Err(error) => println!("rejected write: {error}"),
    }
    println!("x is still {}", point.get("x").expect("declared field"));

    // Missing and spurious names are reported together.
    match Record::construct(&schema, [("x", json!(1)), ("color", json!("red"))]) {
        Ok(_) => unreachable!("y is missing and color is spurious"),
        Err(error) => println!("bad argument set:\n{error}"),
    }

    // Merge derives a new validated record, reported as an Outcome.
    let moved = point.merge([("x", json!(10))]);
    println!(
        "merged: {}",
        moved.into_result().expect("valid merge").to_value()
    );
}
