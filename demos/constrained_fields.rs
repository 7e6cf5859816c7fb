//! Composable validators and whole-record rules: a string validator plugs
//! into a field declaration, and a named rule spans two fields.

use fieldguard::{record, ConstrainedStringBuilder, Flag, Record, SchemaBuilder};
use fieldguard::{ArgumentsBuilder, FieldBuilder};
use serde_json::json;

record! {
    pub struct Badge {
        fields {
            holder (set_holder) => |f| f.named_check("string"),
        }
        readonly {
            serial => |f| f.named_check("positive_int"),
        }
    }
}

fn main() {
    env_logger::init();

    // A constrained string accumulates every broken constraint.
    let code = ConstrainedStringBuilder::new()
        .size(2..=8)
        .prefix("FG")
        .flag(Flag::Uppercase)
        .build()
        .expect("consistent constraints");
    let report = code.check_str("x");
    println!("valid: {}", report.is_valid());
    for error in report.errors() {
        println!("  {error}");
    }

    // The same validator becomes a field check.
    let schema = SchemaBuilder::new("gate")
        .field(FieldBuilder::new("code").check_with(
            ConstrainedStringBuilder::new()
                .size(2..=8)
                .prefix("FG")
                .build()
                .expect("consistent constraints")
                .into_check(),
        ))
        .expect("declare code")
        .field(FieldBuilder::new("limit").named_check("non_negative_int"))
        .expect("declare limit")
        .validation("code_within_limit", &["code", "limit"], |record| {
            let code = record.get("code").ok()?.as_str()?;
            let limit = record.get("limit").ok()?.as_u64()? as usize;
            (code.len() > limit).then(|| format!("code {code:?} exceeds limit {limit}"))
        })
        .expect("attach rule")
        .build();

    match Record::construct(&schema, [("code", json!("FGX")), ("limit", json!(2))]) {
        Ok(_) => unreachable!("rule rejects codes longer than the limit"),
        Err(error) => println!("rule failure: {error}"),
    }

    // The record! macro emits typed accessors over the same engine.
    let mut badge =
        Badge::construct([("holder", json!("ada")), ("serial", json!(1))]).expect("valid badge");
    badge.set_holder(json!("grace")).expect("writable field");
    println!("badge: {}", badge.record().to_value());

    // The argument-set validator stands alone as well.
    let rules = ArgumentsBuilder::new()
        .allow(["size", "min", "max"])
        .exclusive(["size", "min"])
        .build();
    if let Some(error) = rules.check(["size", "min"]).err() {
        println!("argument rules: {error}");
    }
}
