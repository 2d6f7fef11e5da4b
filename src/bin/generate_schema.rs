//! Generate JSON Schema for formgrid documents
//!
//! This binary generates JSON Schemas from the field list and config types
//! using schemars, for editors and other tools that validate those files.
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > field-list-schema.json
//!   cargo run --features dev-bins --bin generate_schema -- config > config-schema.json

use formgrid::config::Config;
use formgrid::model::FieldDescriptor;
use schemars::schema_for;

fn main() {
    let schema = match std::env::args().nth(1).as_deref() {
        Some("config") => schema_for!(Config),
        _ => schema_for!(Vec<FieldDescriptor>),
    };
    let json = serde_json::to_string_pretty(&schema).expect("Failed to serialize schema");
    println!("{}", json);
}
