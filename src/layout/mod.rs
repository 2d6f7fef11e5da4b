//! Grid layout of the form canvas
//!
//! Two derived views of the same ordered field list:
//!
//! - `rows` - greedy twelve-column display rows
//! - `sectors` - four-sector rows honoring explicit placement requests
//!
//! Both are pure functions of the field list and are recomputed after every
//! mutation. `hit_test` maps pointer positions onto drop targets and `render`
//! draws either view as plain text.

pub mod render;
pub mod rows;
pub mod sectors;

pub use hit_test::{point_in_rect, resolve_drop_target, Point, Rect};
pub use rows::group_into_rows;
pub use sectors::{organize_into_sectors, SectorRow, SectorSlot};
