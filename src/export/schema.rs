//! JSON schema export
//!
//! The exported document has the shape
//!
//! ```text
//! { "type": "object",
//!   "properties": { <name>: { type, title, description, enum?, enumNames? } },
//!   "required": [<name>, ...] }
//! ```
//!
//! Properties keep the order of the field list. Layout-only fields (titles,
//! spacers, dividers) carry no data and are left out. When several fields
//! share a name the last one wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::field::{FieldDescriptor, FieldType};

/// JSON type of an exported property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Array,
    Object,
}

impl From<FieldType> for JsonType {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Number => JsonType::Number,
            FieldType::Multiple => JsonType::Array,
            FieldType::Date
            | FieldType::Text
            | FieldType::Select
            | FieldType::Title
            | FieldType::Spacer
            | FieldType::HorizontalRule => JsonType::String,
        }
    }
}

/// Schema of one form property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,
    pub title: String,
    pub description: String,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<String>>,
}

/// Exported form schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub properties: IndexMap<String, PropertySchema>,
    pub required: Vec<String>,
}

impl FormSchema {
    /// The schema as a JSON value
    pub fn to_value(&self) -> serde_json::Value {
        // Every member is a string, list or map with string keys.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn property(field: &FieldDescriptor) -> PropertySchema {
    let (enum_values, enum_names) = if field.field_type.is_choice() {
        (
            Some(field.options.iter().map(|o| o.value.clone()).collect()),
            Some(field.options.iter().map(|o| o.label.clone()).collect()),
        )
    } else {
        (None, None)
    };

    PropertySchema {
        json_type: field.field_type.into(),
        title: field.label.clone(),
        description: field.helper_text.clone(),
        enum_values,
        enum_names,
    }
}

/// Build the schema for `fields`
///
/// Titles, spacers and horizontal rules have no entry in `properties` or
/// `required`. A name shared by several fields keeps the position of its
/// first occurrence and the content of its last.
pub fn export_schema(fields: &[FieldDescriptor], title: Option<&str>) -> FormSchema {
    let mut properties = IndexMap::new();
    let mut required: Vec<String> = Vec::new();

    for field in fields.iter().filter(|f| !f.field_type.is_layout_only()) {
        if properties
            .insert(field.name.clone(), property(field))
            .is_some()
        {
            tracing::debug!(name = %field.name, "duplicate field name, later field wins");
        }
        required.retain(|name| name != &field.name);
        if field.required {
            required.push(field.name.clone());
        }
    }

    FormSchema {
        json_type: JsonType::Object,
        title: title.map(str::to_string),
        properties,
        required,
    }
}
