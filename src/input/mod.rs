//! Pointer-driven interaction with the form canvas

pub mod drag;

pub use drag::{
    can_place_side_by_side, DragError, DragPayload, DragPreview, DragSession, DragState, DropOutcome,
    DropSide, DropTarget, RejectReason,
};
