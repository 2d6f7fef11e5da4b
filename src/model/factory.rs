//! Construction of new fields with type-specific defaults

use super::field::{FieldDescriptor, FieldIdAllocator, FieldOption, FieldType};
use super::registry;

/// Builds new field descriptors
///
/// Owns the id allocator, so every field created through one factory gets a
/// distinct id. Appending the field to a form is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct FieldFactory {
    ids: FieldIdAllocator,
}

impl FieldFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose ids continue after those already in `fields`
    pub fn continuing(fields: &[FieldDescriptor]) -> Self {
        Self {
            ids: FieldIdAllocator::after(fields),
        }
    }

    /// Create a field of `field_type` for list position `ordinal`
    ///
    /// Names and labels are derived from `ordinal + 1`, so they read naturally
    /// ("Field 3") but can collide once fields are reordered or deleted.
    pub fn create_field(&mut self, ordinal: usize, field_type: FieldType) -> FieldDescriptor {
        let number = ordinal + 1;
        let definition = registry::field_type(field_type);

        let mut field = FieldDescriptor {
            id: self.ids.allocate(),
            field_type,
            name: format!("field_{number}"),
            label: format!("Field {number}"),
            placeholder: String::new(),
            helper_text: String::new(),
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
            width: definition.default_width,
            sector_position: None,
            row_index: None,
        };

        match field_type {
            FieldType::Text | FieldType::Date => {}
            FieldType::Number => {
                field.step = Some(1.0);
            }
            FieldType::Select | FieldType::Multiple => {
                field.options = vec![
                    FieldOption::new("option_1", "Option 1"),
                    FieldOption::new("option_2", "Option 2"),
                ];
            }
            FieldType::Title => {
                field.name = format!("title_{number}");
                field.label = "Section Title".to_string();
                field.placeholder = "Enter section title".to_string();
            }
            FieldType::Spacer => {
                field.name = format!("spacer_{number}");
                field.label = "Spacer".to_string();
            }
            FieldType::HorizontalRule => {
                field.name = format!("divider_{number}");
                field.label = "Divider".to_string();
            }
        }

        tracing::trace!(id = %field.id, kind = %field_type, ordinal, "created field");
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldWidth;

    #[test]
    fn test_names_follow_ordinal() {
        let mut factory = FieldFactory::new();
        let field = factory.create_field(2, FieldType::Text);
        assert_eq!(field.name, "field_3");
        assert_eq!(field.label, "Field 3");
        assert_eq!(field.width, FieldWidth::Full);
    }

    #[test]
    fn test_type_specific_defaults() {
        let mut factory = FieldFactory::new();

        let spacer = factory.create_field(0, FieldType::Spacer);
        assert_eq!(spacer.width, FieldWidth::Fourth);
        assert_eq!(spacer.name, "spacer_1");

        let title = factory.create_field(1, FieldType::Title);
        assert_eq!(title.width, FieldWidth::Full);
        assert_eq!(title.label, "Section Title");
        assert_eq!(title.placeholder, "Enter section title");

        let select = factory.create_field(2, FieldType::Select);
        assert_eq!(select.options.len(), 2);

        let number = factory.create_field(3, FieldType::Number);
        assert_eq!(number.step, Some(1.0));
        assert!(number.options.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut factory = FieldFactory::new();
        let a = factory.create_field(0, FieldType::Text);
        let b = factory.create_field(0, FieldType::Text);
        assert_ne!(a.id, b.id);
        // Same ordinal, same derived name: uniqueness of names is not promised.
        assert_eq!(a.name, b.name);
    }
}
