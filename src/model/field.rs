//! Field descriptors
//!
//! A form is an ordered list of [`FieldDescriptor`]s. List order is the source
//! of truth for default placement; `row_index` and `sector_position` override
//! it when set.
//!
//! Widths use a single canonical model: a row is four sectors wide. The
//! legacy twelve-column span is derived from the sector count and only exists
//! as a display convenience for the row grouper.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of sectors in one row of the sector grid
pub const SECTORS_PER_ROW: usize = 4;

/// Number of columns in one row of the legacy column grid
pub const COLUMNS_PER_ROW: usize = 12;

/// Unique identifier for a field
///
/// Issued by [`FieldIdAllocator`], never reused within one allocator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field-{}", self.0)
    }
}

/// Monotonic source of field ids
#[derive(Debug, Clone, Default)]
pub struct FieldIdAllocator {
    next: u64,
}

impl FieldIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating after the largest id already present in `fields`
    ///
    /// Used when a field list is loaded from a document so new fields never
    /// collide with existing ones.
    pub fn after(fields: &[FieldDescriptor]) -> Self {
        let next = fields
            .iter()
            .map(|f| f.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        Self { next }
    }

    /// Issue the next id
    ///
    /// Once the id space is exhausted the last id is issued again.
    pub fn allocate(&mut self) -> FieldId {
        let id = FieldId(self.next);
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => tracing::warn!(%id, "field id space exhausted, reissuing last id"),
        }
        id
    }
}

/// Kind of a form field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Select,
    Multiple,
    Title,
    Spacer,
    HorizontalRule,
}

impl FieldType {
    /// All field types, in catalog order
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Date,
        FieldType::Select,
        FieldType::Multiple,
        FieldType::Title,
        FieldType::Spacer,
        FieldType::HorizontalRule,
    ];

    /// Wire key, as used in documents and drag payloads
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Multiple => "multiple",
            FieldType::Title => "title",
            FieldType::Spacer => "spacer",
            FieldType::HorizontalRule => "horizontal-rule",
        }
    }

    /// Whether the field offers a fixed set of options
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Multiple)
    }

    /// Whether the field only decorates the layout and carries no data
    pub fn is_layout_only(self) -> bool {
        matches!(
            self,
            FieldType::Title | FieldType::Spacer | FieldType::HorizontalRule
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field type or width key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for FieldType {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownKey {
                kind: "field type",
                value: s.to_string(),
            })
    }
}

/// Horizontal extent of a field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum FieldWidth {
    #[default]
    Full,
    ThreeFourths,
    Half,
    Fourth,
}

impl FieldWidth {
    /// All widths, widest first
    pub const ALL: [FieldWidth; 4] = [
        FieldWidth::Full,
        FieldWidth::ThreeFourths,
        FieldWidth::Half,
        FieldWidth::Fourth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldWidth::Full => "full",
            FieldWidth::ThreeFourths => "three-fourths",
            FieldWidth::Half => "half",
            FieldWidth::Fourth => "fourth",
        }
    }

    /// Number of sectors covered in a four-sector row
    pub fn sectors(self) -> usize {
        match self {
            FieldWidth::Full => 4,
            FieldWidth::ThreeFourths => 3,
            FieldWidth::Half => 2,
            FieldWidth::Fourth => 1,
        }
    }

    /// Span in the legacy twelve-column grid
    pub fn columns(self) -> usize {
        self.sectors() * (COLUMNS_PER_ROW / SECTORS_PER_ROW)
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldWidth {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldWidth::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| UnknownKey {
                kind: "width",
                value: s.to_string(),
            })
    }
}

/// One choice of a select or multiple field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single field of the form being built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Key in the exported schema and the form-data map
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default)]
    pub width: FieldWidth,
    /// Explicit sector offset within the row, `None` for auto placement
    #[serde(default)]
    pub sector_position: Option<usize>,
    /// Explicit target row, `None` to derive it from list position
    #[serde(default)]
    pub row_index: Option<usize>,
}

impl FieldDescriptor {
    /// Sectors covered by this field
    pub fn sector_count(&self) -> usize {
        self.width.sectors()
    }

    /// Legacy column span of this field
    pub fn column_span(&self) -> usize {
        self.width.columns()
    }

    /// Shallow-merge `update` into this field
    pub fn apply(&mut self, update: FieldUpdate) {
        let FieldUpdate {
            field_type,
            name,
            label,
            placeholder,
            helper_text,
            required,
            options,
            min,
            max,
            step,
            width,
            sector_position,
            row_index,
        } = update;

        if let Some(v) = field_type {
            self.field_type = v;
        }
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = label {
            self.label = v;
        }
        if let Some(v) = placeholder {
            self.placeholder = v;
        }
        if let Some(v) = helper_text {
            self.helper_text = v;
        }
        if let Some(v) = required {
            self.required = v;
        }
        if let Some(v) = options {
            self.options = v;
        }
        if let Some(v) = min {
            self.min = v;
        }
        if let Some(v) = max {
            self.max = v;
        }
        if let Some(v) = step {
            self.step = v;
        }
        if let Some(v) = width {
            self.width = v;
        }
        if let Some(v) = sector_position {
            self.sector_position = v;
        }
        if let Some(v) = row_index {
            self.row_index = v;
        }
    }
}

/// Partial update of a field, as sent by the property editor
///
/// Absent members leave the field untouched. Nullable members use a double
/// option: `Some(None)` (JSON `null`) clears the value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, deserialize_with = "present")]
    pub min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub step: Option<Option<f64>>,
    pub width: Option<FieldWidth>,
    #[serde(default, deserialize_with = "present")]
    pub sector_position: Option<Option<usize>>,
    #[serde(default, deserialize_with = "present")]
    pub row_index: Option<Option<usize>>,
}

// Distinguishes an explicit `null` from a missing key.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
