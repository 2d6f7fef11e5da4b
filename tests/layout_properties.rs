// Property tests for the derived grid layouts

use std::collections::HashSet;

use formgrid::layout::rows::{group_into_rows, row_columns};
use formgrid::layout::sectors::organize_into_sectors;
use formgrid::model::{FieldDescriptor, FieldId, FieldType, FieldWidth};
use proptest::prelude::*;

fn width_strategy() -> impl Strategy<Value = FieldWidth> {
    prop_oneof![
        Just(FieldWidth::Full),
        Just(FieldWidth::ThreeFourths),
        Just(FieldWidth::Half),
        Just(FieldWidth::Fourth),
    ]
}

/// Field lists with unique ids and a mix of explicit placement requests
fn fields_strategy() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    prop::collection::vec(
        (
            width_strategy(),
            prop::option::of(0usize..6),
            prop::option::of(0usize..4),
        ),
        0..24,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (width, row_index, sector_position))| FieldDescriptor {
                id: FieldId(i as u64),
                field_type: FieldType::Text,
                name: format!("f{i}"),
                label: format!("F{i}"),
                placeholder: String::new(),
                helper_text: String::new(),
                required: false,
                options: Vec::new(),
                min: None,
                max: None,
                step: None,
                width,
                sector_position,
                row_index,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_rows_respect_capacity(fields in fields_strategy()) {
        for row in group_into_rows(&fields) {
            prop_assert!(!row.is_empty());
            prop_assert!(row_columns(&row) <= 12);
        }
    }

    #[test]
    fn prop_rows_keep_every_field_in_order(fields in fields_strategy()) {
        let flattened: Vec<FieldId> = group_into_rows(&fields)
            .into_iter()
            .flatten()
            .map(|f| f.id)
            .collect();
        let original: Vec<FieldId> = fields.iter().map(|f| f.id).collect();
        prop_assert_eq!(flattened, original);
    }

    #[test]
    fn prop_sectors_place_each_field_once(fields in fields_strategy()) {
        let rows = organize_into_sectors(&fields);
        let mut seen = Vec::new();
        for row in &rows {
            for (sector, slot) in row.iter().enumerate() {
                let Some(slot) = slot else { continue };
                // Every occupied sector points back at the field's own span.
                prop_assert_eq!(slot.start_sector + slot.sector_index, sector);
                prop_assert_eq!(slot.sector_span, slot.field.sector_count());
                prop_assert!(slot.start_sector + slot.sector_span <= 4);
                if slot.is_origin() {
                    seen.push(slot.field.id);
                }
            }
        }

        let unique: HashSet<FieldId> = seen.iter().copied().collect();
        prop_assert_eq!(unique.len(), seen.len());
        let expected: HashSet<FieldId> = fields.iter().map(|f| f.id).collect();
        prop_assert_eq!(unique, expected);
    }

    #[test]
    fn prop_explicit_slots_honor_request(fields in fields_strategy()) {
        for row in organize_into_sectors(&fields) {
            for slot in row.iter().flatten().filter(|s| s.explicit) {
                prop_assert_eq!(slot.field.sector_position, Some(slot.start_sector));
            }
        }
    }

    #[test]
    fn prop_layouts_are_idempotent(fields in fields_strategy()) {
        prop_assert_eq!(group_into_rows(&fields), group_into_rows(&fields));
        prop_assert_eq!(organize_into_sectors(&fields), organize_into_sectors(&fields));
    }
}
