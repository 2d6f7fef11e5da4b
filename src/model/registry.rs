//! Static catalog of field types and width options
//!
//! Pure lookup tables. Lookups by key that miss fall back to the first field
//! type and to the full width respectively.

use super::field::{FieldType, FieldWidth};

/// Catalog entry for a field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeDefinition {
    pub kind: FieldType,
    /// Name shown in the palette
    pub label: &'static str,
    /// Icon key resolved by the rendering layer
    pub icon: &'static str,
    /// Width a freshly created field of this kind gets
    pub default_width: FieldWidth,
}

/// Catalog entry for a width option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthOption {
    pub width: FieldWidth,
    pub sectors: usize,
    pub columns: usize,
    /// Fraction shown in the width picker (e.g. "1/2")
    pub label: &'static str,
}

static FIELD_TYPES: [FieldTypeDefinition; 8] = [
    FieldTypeDefinition {
        kind: FieldType::Text,
        label: "Text",
        icon: "type",
        default_width: FieldWidth::Full,
    },
    FieldTypeDefinition {
        kind: FieldType::Number,
        label: "Number",
        icon: "hash",
        default_width: FieldWidth::Half,
    },
    FieldTypeDefinition {
        kind: FieldType::Date,
        label: "Date",
        icon: "calendar",
        default_width: FieldWidth::Half,
    },
    FieldTypeDefinition {
        kind: FieldType::Select,
        label: "Dropdown",
        icon: "chevron-down",
        default_width: FieldWidth::Full,
    },
    FieldTypeDefinition {
        kind: FieldType::Multiple,
        label: "Multiple Choice",
        icon: "list-checks",
        default_width: FieldWidth::Full,
    },
    FieldTypeDefinition {
        kind: FieldType::Title,
        label: "Section Title",
        icon: "heading",
        default_width: FieldWidth::Full,
    },
    FieldTypeDefinition {
        kind: FieldType::Spacer,
        label: "Spacer",
        icon: "square-dashed",
        default_width: FieldWidth::Fourth,
    },
    FieldTypeDefinition {
        kind: FieldType::HorizontalRule,
        label: "Divider",
        icon: "minus",
        default_width: FieldWidth::Full,
    },
];

static WIDTH_OPTIONS: [WidthOption; 4] = [
    WidthOption {
        width: FieldWidth::Full,
        sectors: 4,
        columns: 12,
        label: "1/1",
    },
    WidthOption {
        width: FieldWidth::ThreeFourths,
        sectors: 3,
        columns: 9,
        label: "3/4",
    },
    WidthOption {
        width: FieldWidth::Half,
        sectors: 2,
        columns: 6,
        label: "1/2",
    },
    WidthOption {
        width: FieldWidth::Fourth,
        sectors: 1,
        columns: 3,
        label: "1/4",
    },
];

/// All supported field types, in palette order
pub fn field_types() -> &'static [FieldTypeDefinition] {
    &FIELD_TYPES
}

/// All supported widths, widest first
pub fn width_options() -> &'static [WidthOption] {
    &WIDTH_OPTIONS
}

/// Catalog entry for `kind`
pub fn field_type(kind: FieldType) -> &'static FieldTypeDefinition {
    match kind {
        FieldType::Text => &FIELD_TYPES[0],
        FieldType::Number => &FIELD_TYPES[1],
        FieldType::Date => &FIELD_TYPES[2],
        FieldType::Select => &FIELD_TYPES[3],
        FieldType::Multiple => &FIELD_TYPES[4],
        FieldType::Title => &FIELD_TYPES[5],
        FieldType::Spacer => &FIELD_TYPES[6],
        FieldType::HorizontalRule => &FIELD_TYPES[7],
    }
}

/// Catalog entry for a type key, falling back to the first field type
pub fn field_type_by_key(key: &str) -> &'static FieldTypeDefinition {
    key.parse::<FieldType>()
        .map(field_type)
        .unwrap_or(&FIELD_TYPES[0])
}

/// Width option for `width`
pub fn width_option(width: FieldWidth) -> &'static WidthOption {
    match width {
        FieldWidth::Full => &WIDTH_OPTIONS[0],
        FieldWidth::ThreeFourths => &WIDTH_OPTIONS[1],
        FieldWidth::Half => &WIDTH_OPTIONS[2],
        FieldWidth::Fourth => &WIDTH_OPTIONS[3],
    }
}

/// Width option for a width key, falling back to full width
pub fn width_option_by_key(key: &str) -> &'static WidthOption {
    key.parse::<FieldWidth>()
        .map(width_option)
        .unwrap_or(&WIDTH_OPTIONS[0])
}
