//! The form being built
//!
//! [`FormBuilder`] owns the field list together with the state that refers to
//! it: the field currently open in the property editor and the drag session.
//! Every mutation replaces the list as a whole, so derived layouts are simply
//! recomputed from [`FormBuilder::fields`] before the next render.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use super::factory::FieldFactory;
use super::field::{FieldDescriptor, FieldId, FieldType, FieldUpdate};
use crate::error::{FormError, Result};
use crate::export::schema::{export_schema, FormSchema};
use crate::input::drag::{self, DragError, DragPreview, DragSession, DropOutcome, DropTarget};
use crate::layout::rows::group_into_rows;
use crate::layout::sectors::{organize_into_sectors, SectorRow};

/// Problem found by [`FormBuilder::validate`]
///
/// Validation is advisory: the builder accepts forms with issues, the UI
/// decides whether to block export.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// A select or multiple field without options
    MissingOptions { id: FieldId, name: String },
    /// A data field without a name
    EmptyName { id: FieldId },
    /// Several data fields share a name
    DuplicateName { name: String, ids: Vec<FieldId> },
    /// A number field whose minimum exceeds its maximum
    InvertedRange {
        id: FieldId,
        name: String,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingOptions { name, .. } => {
                write!(f, "'{}' needs at least one option", name)
            }
            ValidationIssue::EmptyName { id } => write!(f, "{} has no name", id),
            ValidationIssue::DuplicateName { name, ids } => {
                write!(f, "'{}' is used by {} fields", name, ids.len())
            }
            ValidationIssue::InvertedRange { name, min, max, .. } => {
                write!(f, "'{}' has min {} greater than max {}", name, min, max)
            }
        }
    }
}

/// Read a field list document (a JSON array of fields)
pub fn load_fields(path: &Path) -> Result<Vec<FieldDescriptor>> {
    let contents = std::fs::read_to_string(path).map_err(|source| FormError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| FormError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a field list document, pretty-printed
pub fn save_fields(path: &Path, fields: &[FieldDescriptor]) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(fields).map_err(|source| FormError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    contents.push('\n');
    std::fs::write(path, contents).map_err(|source| FormError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Editing state of one form
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: Vec<FieldDescriptor>,
    factory: FieldFactory,
    /// Field open in the property editor
    editing: Option<FieldId>,
    drag: DragSession,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder over an existing field list
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            factory: FieldFactory::continuing(&fields),
            fields,
            editing: None,
            drag: DragSession::new(),
        }
    }

    /// Builder over the field list document at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let fields = load_fields(path)?;
        tracing::debug!(path = %path.display(), fields = fields.len(), "loaded form");
        Ok(Self::from_fields(fields))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_fields(path, &self.fields)?;
        tracing::debug!(path = %path.display(), fields = self.fields.len(), "saved form");
        Ok(())
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn index_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Append a new field of `field_type`
    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        let field = self.factory.create_field(self.fields.len(), field_type);
        let id = field.id;
        let mut fields = self.fields.clone();
        fields.push(field);
        self.fields = fields;
        tracing::debug!(%id, kind = %field_type, "added field");
        id
    }

    /// Shallow-merge `update` into the field `id`
    ///
    /// Returns false if there is no such field.
    pub fn update_field(&mut self, id: FieldId, update: FieldUpdate) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::warn!(%id, "update for unknown field");
            return false;
        };
        let mut fields = self.fields.clone();
        fields[index].apply(update);
        self.fields = fields;
        true
    }

    /// Remove the field `id`, closing it in the property editor if open
    pub fn remove_field(&mut self, id: FieldId) -> bool {
        let before = self.fields.len();
        let fields: Vec<_> = self.fields.iter().filter(|f| f.id != id).cloned().collect();
        if fields.len() == before {
            return false;
        }
        self.fields = fields;
        if self.editing == Some(id) {
            self.editing = None;
        }
        tracing::debug!(%id, "removed field");
        true
    }

    /// Move the field `id` to list position `index`
    ///
    /// Same semantics as a vertical drop, for keyboard reordering.
    pub fn move_field(&mut self, id: FieldId, index: usize) -> bool {
        let Some(source_idx) = self.index_of(id) else {
            return false;
        };
        let outcome = drag::move_to_index(&self.fields, source_idx, index);
        self.apply_drop(outcome)
    }

    pub fn editing(&self) -> Option<FieldId> {
        self.editing
    }

    pub fn editing_field(&self) -> Option<&FieldDescriptor> {
        self.editing.and_then(|id| self.field(id))
    }

    /// Open `id` in the property editor, or close it with `None`
    ///
    /// Returns false (and leaves the selection alone) for unknown ids.
    pub fn set_editing(&mut self, id: Option<FieldId>) -> bool {
        match id {
            Some(id) if self.index_of(id).is_none() => false,
            _ => {
                self.editing = id;
                true
            }
        }
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn start_drag(&mut self, id: FieldId) -> std::result::Result<DragPreview, DragError> {
        self.drag.start(&self.fields, id)
    }

    pub fn drag_pointer_moved(&mut self, point: crate::layout::hit_test::Point) {
        self.drag.pointer_moved(point);
    }

    /// Hover the drag over `target`; returns whether it activated
    pub fn drag_hover(&mut self, target: DropTarget) -> bool {
        self.drag.hover(&self.fields, target)
    }

    pub fn drag_leave_horizontal(&mut self) {
        self.drag.leave_horizontal();
    }

    /// Drop the dragged field; returns whether the list changed
    pub fn drop(&mut self) -> bool {
        let outcome = self.drag.drop(&self.fields);
        self.apply_drop(outcome)
    }

    /// Drop using the browser's transfer data; returns whether the list changed
    pub fn drop_with_payload(&mut self, data: &str) -> bool {
        let outcome = self.drag.drop_with_payload(&self.fields, data);
        self.apply_drop(outcome)
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    /// Replace the field list with a drop result
    pub fn apply_drop(&mut self, outcome: DropOutcome) -> bool {
        match outcome {
            DropOutcome::Reordered(fields) => {
                self.fields = fields;
                true
            }
            DropOutcome::Unchanged | DropOutcome::Rejected(_) => false,
        }
    }

    /// Twelve-column display rows
    pub fn rows(&self) -> Vec<Vec<&FieldDescriptor>> {
        group_into_rows(&self.fields)
    }

    /// Four-sector rows
    pub fn sectors(&self) -> Vec<SectorRow<'_>> {
        organize_into_sectors(&self.fields)
    }

    pub fn export_schema(&self, title: Option<&str>) -> FormSchema {
        export_schema(&self.fields, title)
    }

    /// Check the form for problems
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut by_name: HashMap<&str, Vec<FieldId>> = HashMap::new();
        let mut names_in_order = Vec::new();

        for field in &self.fields {
            if field.field_type.is_choice() && field.options.is_empty() {
                issues.push(ValidationIssue::MissingOptions {
                    id: field.id,
                    name: field.name.clone(),
                });
            }
            if field.field_type == FieldType::Number {
                if let (Some(min), Some(max)) = (field.min, field.max) {
                    if min > max {
                        issues.push(ValidationIssue::InvertedRange {
                            id: field.id,
                            name: field.name.clone(),
                            min,
                            max,
                        });
                    }
                }
            }
            if field.field_type.is_layout_only() {
                continue;
            }
            if field.name.trim().is_empty() {
                issues.push(ValidationIssue::EmptyName { id: field.id });
                continue;
            }
            let ids = by_name.entry(field.name.as_str()).or_default();
            if ids.is_empty() {
                names_in_order.push(field.name.as_str());
            }
            ids.push(field.id);
        }

        for name in names_in_order {
            let ids = &by_name[name];
            if ids.len() > 1 {
                issues.push(ValidationIssue::DuplicateName {
                    name: name.to_string(),
                    ids: ids.clone(),
                });
            }
        }
        issues
    }

    /// Initial form-data map: field name to empty value
    ///
    /// Numbers start as `null`, multiple-choice fields as an empty list and
    /// everything else as an empty string. Layout-only fields have no entry.
    pub fn default_form_data(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|f| !f.field_type.is_layout_only())
            .map(|f| {
                let value = match f.field_type {
                    FieldType::Number => Value::Null,
                    FieldType::Multiple => Value::Array(Vec::new()),
                    _ => Value::String(String::new()),
                };
                (f.name.clone(), value)
            })
            .collect()
    }
}
