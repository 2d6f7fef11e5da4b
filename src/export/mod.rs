//! Export of the built form

pub mod schema;

pub use schema::{export_schema, FormSchema, JsonType, PropertySchema};
