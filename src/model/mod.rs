//! Form data model
//!
//! - `field` - field descriptors, widths and partial updates
//! - `registry` - static catalog of field types and width options
//! - `factory` - creation of fields with type-specific defaults
//! - `form` - the field list being edited, plus validation

pub mod factory;
pub mod field;
pub mod form;
pub mod registry;

pub use factory::FieldFactory;
pub use field::{
    FieldDescriptor, FieldId, FieldIdAllocator, FieldOption, FieldType, FieldUpdate, FieldWidth,
};
pub use form::{load_fields, save_fields, FormBuilder, ValidationIssue};
