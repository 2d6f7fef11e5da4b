//! Drag-and-drop session
//!
//! A [`DragSession`] is owned by the form builder and driven by the UI's
//! pointer events. It moves between two states:
//!
//! ```text
//!          start()                    drop() / end()
//!  Idle ─────────────▶ Dragging ─────────────────────▶ Idle
//!                       │    ▲
//!                       └────┘ pointer_moved(), hover_*()
//! ```
//!
//! While dragging, the session tracks the cursor (for the floating preview)
//! and at most one drop target: a vertical index, or a horizontal zone on the
//! left or right edge of another field. Entering one kind of target clears
//! the other.
//!
//! Dropping never mutates the caller's list. It returns a [`DropOutcome`]
//! carrying the reordered list, and always leaves the session idle. Stale ids
//! and malformed transfer payloads reject the drop without partial changes.

use serde::{Deserialize, Serialize};

use crate::layout::hit_test::Point;
use crate::model::field::{FieldDescriptor, FieldId, FieldType, FieldWidth, SECTORS_PER_ROW};

/// Edge of a field a horizontal drop zone sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSide {
    Left,
    Right,
}

/// Where the dragged field would land if dropped now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The dragged field ends up at this list index
    Vertical(usize),
    /// The dragged field is placed beside `target`
    Horizontal { target: FieldId, side: DropSide },
}

/// Lightweight copy of the dragged field, for rendering the floating preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPreview {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub width: FieldWidth,
}

impl From<&FieldDescriptor> for DragPreview {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            id: field.id,
            label: field.label.clone(),
            field_type: field.field_type,
            width: field.width,
        }
    }
}

/// Data carried through the browser's drag transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub field_id: FieldId,
}

impl DragPayload {
    pub fn new(field_id: FieldId) -> Self {
        Self { field_id }
    }

    /// Serialize for the transfer
    pub fn encode(&self) -> String {
        // A struct holding a single integer always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse transfer data
    pub fn decode(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// State of an in-progress drag
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub source: FieldId,
    pub preview: DragPreview,
    pub cursor: Option<Point>,
    pub target: Option<DropTarget>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Reasons a drag cannot start
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("a drag of {0} is already in progress")]
    AlreadyDragging(FieldId),
    #[error("{0} is not in the field list")]
    UnknownField(FieldId),
}

/// Why a drop was discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No drag was in progress
    NotDragging,
    /// Transfer data could not be parsed
    MalformedPayload,
    /// Transfer data names a different field than the active drag
    PayloadMismatch { expected: FieldId, found: FieldId },
    /// A field the drop refers to is no longer in the list
    StaleField(FieldId),
}

/// Result of a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The new field order, to replace the caller's list
    Reordered(Vec<FieldDescriptor>),
    /// The drop would not change anything
    Unchanged,
    /// The drop was discarded; the list must stay as it is
    Rejected(RejectReason),
}

/// Whether `dragged` may sit beside `target` in one row
pub fn can_place_side_by_side(dragged: &FieldDescriptor, target: &FieldDescriptor) -> bool {
    dragged.sector_count() + target.sector_count() <= SECTORS_PER_ROW
}

/// A single drag-and-drop session
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(active) => Some(active),
            DragState::Idle => None,
        }
    }

    fn active_mut(&mut self) -> Option<&mut ActiveDrag> {
        match &mut self.state {
            DragState::Dragging(active) => Some(active),
            DragState::Idle => None,
        }
    }

    /// Id of the field being dragged
    pub fn source(&self) -> Option<FieldId> {
        self.active().map(|a| a.source)
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        self.active().map(|a| &a.preview)
    }

    pub fn cursor(&self) -> Option<Point> {
        self.active().and_then(|a| a.cursor)
    }

    pub fn target(&self) -> Option<DropTarget> {
        self.active().and_then(|a| a.target)
    }

    /// Active vertical insertion index, if any
    pub fn vertical_index(&self) -> Option<usize> {
        match self.target() {
            Some(DropTarget::Vertical(index)) => Some(index),
            _ => None,
        }
    }

    /// Active horizontal drop zone, if any
    pub fn horizontal_zone(&self) -> Option<(FieldId, DropSide)> {
        match self.target() {
            Some(DropTarget::Horizontal { target, side }) => Some((target, side)),
            _ => None,
        }
    }

    /// Begin dragging the field `id`
    ///
    /// Returns the preview payload for the floating drag image.
    pub fn start(
        &mut self,
        fields: &[FieldDescriptor],
        id: FieldId,
    ) -> Result<DragPreview, DragError> {
        if let Some(active) = self.active() {
            return Err(DragError::AlreadyDragging(active.source));
        }
        let field = fields
            .iter()
            .find(|f| f.id == id)
            .ok_or(DragError::UnknownField(id))?;

        let preview = DragPreview::from(field);
        tracing::debug!(%id, "drag started");
        self.state = DragState::Dragging(ActiveDrag {
            source: id,
            preview: preview.clone(),
            cursor: None,
            target: None,
        });
        Ok(preview)
    }

    /// Track the pointer for the floating preview
    pub fn pointer_moved(&mut self, point: Point) {
        if let Some(active) = self.active_mut() {
            tracing::trace!(x = point.x, y = point.y, "drag pointer moved");
            active.cursor = Some(point);
        }
    }

    /// Hover over the vertical insertion point `index`
    pub fn hover_vertical(&mut self, index: usize) {
        if let Some(active) = self.active_mut() {
            tracing::trace!(index, "hover vertical");
            active.target = Some(DropTarget::Vertical(index));
        }
    }

    /// Hover over the `side` edge of `target`
    ///
    /// The zone only activates when the dragged field and `target` fit in one
    /// row together. An incompatible zone leaves any vertical index in place so
    /// the drop falls back to vertical reordering. Returns whether the zone
    /// activated.
    pub fn hover_horizontal(
        &mut self,
        fields: &[FieldDescriptor],
        target: FieldId,
        side: DropSide,
    ) -> bool {
        let Some(active) = self.active_mut() else {
            return false;
        };
        if target == active.source {
            return false;
        }

        let dragged = fields.iter().find(|f| f.id == active.source);
        let hovered = fields.iter().find(|f| f.id == target);
        let compatible = match (dragged, hovered) {
            (Some(dragged), Some(hovered)) => can_place_side_by_side(dragged, hovered),
            _ => false,
        };

        if compatible {
            tracing::trace!(%target, ?side, "hover horizontal");
            active.target = Some(DropTarget::Horizontal { target, side });
        } else if matches!(active.target, Some(DropTarget::Horizontal { .. })) {
            active.target = None;
        }
        compatible
    }

    /// Leave whatever horizontal zone is active
    pub fn leave_horizontal(&mut self) {
        if let Some(active) = self.active_mut() {
            if matches!(active.target, Some(DropTarget::Horizontal { .. })) {
                active.target = None;
            }
        }
    }

    /// Apply a target resolved by hit testing
    ///
    /// Returns whether the target is now active.
    pub fn hover(&mut self, fields: &[FieldDescriptor], target: DropTarget) -> bool {
        match target {
            DropTarget::Vertical(index) => {
                self.hover_vertical(index);
                self.is_dragging()
            }
            DropTarget::Horizontal { target, side } => self.hover_horizontal(fields, target, side),
        }
    }

    /// Drop onto the current target
    pub fn drop(&mut self, fields: &[FieldDescriptor]) -> DropOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DropOutcome::Rejected(RejectReason::NotDragging),
            DragState::Dragging(active) => resolve_drop(&active, fields),
        }
    }

    /// Drop with the browser's transfer data
    ///
    /// The payload must parse and name the field being dragged; otherwise the
    /// session resets and the drop is rejected.
    pub fn drop_with_payload(&mut self, fields: &[FieldDescriptor], data: &str) -> DropOutcome {
        let active = match std::mem::take(&mut self.state) {
            DragState::Idle => return DropOutcome::Rejected(RejectReason::NotDragging),
            DragState::Dragging(active) => active,
        };

        let payload = match DragPayload::decode(data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("discarding drop with malformed payload: {}", e);
                return DropOutcome::Rejected(RejectReason::MalformedPayload);
            }
        };
        if payload.field_id != active.source {
            tracing::warn!(
                expected = %active.source,
                found = %payload.field_id,
                "discarding drop for a different field"
            );
            return DropOutcome::Rejected(RejectReason::PayloadMismatch {
                expected: active.source,
                found: payload.field_id,
            });
        }

        resolve_drop(&active, fields)
    }

    /// End the drag, whether or not a drop happened
    pub fn end(&mut self) {
        if self.is_dragging() {
            tracing::debug!("drag ended");
        }
        self.state = DragState::Idle;
    }
}

fn resolve_drop(active: &ActiveDrag, fields: &[FieldDescriptor]) -> DropOutcome {
    let Some(source_idx) = fields.iter().position(|f| f.id == active.source) else {
        tracing::warn!(id = %active.source, "dragged field no longer exists");
        return DropOutcome::Rejected(RejectReason::StaleField(active.source));
    };

    let outcome = match active.target {
        Some(DropTarget::Horizontal { target, side }) => {
            place_beside(fields, source_idx, target, side)
        }
        Some(DropTarget::Vertical(index)) => move_to_index(fields, source_idx, index),
        None => DropOutcome::Unchanged,
    };

    match &outcome {
        DropOutcome::Reordered(_) => {
            tracing::debug!(id = %active.source, target = ?active.target, "drop reordered fields")
        }
        DropOutcome::Unchanged => tracing::debug!(id = %active.source, "drop left order unchanged"),
        DropOutcome::Rejected(reason) => tracing::warn!(?reason, "drop rejected"),
    }
    outcome
}

/// Move the field at `source_idx` so it ends up at `index`
///
/// `index` is clamped to the last position.
pub(crate) fn move_to_index(
    fields: &[FieldDescriptor],
    source_idx: usize,
    index: usize,
) -> DropOutcome {
    let index = index.min(fields.len().saturating_sub(1));
    if index == source_idx {
        return DropOutcome::Unchanged;
    }

    let mut reordered = fields.to_vec();
    let moved = release_placement(reordered.remove(source_idx));
    reordered.insert(index, moved);
    DropOutcome::Reordered(reordered)
}

/// Place the field at `source_idx` on the `side` of `target`
fn place_beside(
    fields: &[FieldDescriptor],
    source_idx: usize,
    target: FieldId,
    side: DropSide,
) -> DropOutcome {
    if fields[source_idx].id == target {
        return DropOutcome::Unchanged;
    }

    let mut reordered = fields.to_vec();
    let moved = release_placement(reordered.remove(source_idx));
    let Some(target_idx) = reordered.iter().position(|f| f.id == target) else {
        tracing::warn!(%target, "drop target no longer exists");
        return DropOutcome::Rejected(RejectReason::StaleField(target));
    };

    let insert_at = match side {
        DropSide::Left => target_idx,
        DropSide::Right => target_idx + 1,
    };
    if insert_at == source_idx {
        return DropOutcome::Unchanged;
    }
    reordered.insert(insert_at, moved);
    DropOutcome::Reordered(reordered)
}

/// A moved field follows its new list position
fn release_placement(mut field: FieldDescriptor) -> FieldDescriptor {
    field.row_index = None;
    field.sector_position = None;
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::field;

    fn abcd() -> Vec<FieldDescriptor> {
        (0..4).map(|i| field(i, FieldWidth::Half)).collect()
    }

    fn order(outcome: &DropOutcome) -> Vec<u64> {
        match outcome {
            DropOutcome::Reordered(fields) => fields.iter().map(|f| f.id.0).collect(),
            other => panic!("expected a reorder, got {:?}", other),
        }
    }

    #[test]
    fn test_start_captures_preview() {
        let fields = abcd();
        let mut session = DragSession::new();
        let preview = session.start(&fields, FieldId(2)).unwrap();

        assert_eq!(preview.id, FieldId(2));
        assert_eq!(preview.label, "F2");
        assert_eq!(preview.width, FieldWidth::Half);
        assert_eq!(session.source(), Some(FieldId(2)));
    }

    #[test]
    fn test_second_start_is_rejected() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        assert_eq!(
            session.start(&fields, FieldId(1)),
            Err(DragError::AlreadyDragging(FieldId(0)))
        );
        assert_eq!(session.source(), Some(FieldId(0)));
    }

    #[test]
    fn test_start_unknown_field() {
        let mut session = DragSession::new();
        assert_eq!(
            session.start(&abcd(), FieldId(99)),
            Err(DragError::UnknownField(FieldId(99)))
        );
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_vertical_and_horizontal_are_exclusive() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();

        session.hover_vertical(2);
        assert_eq!(session.vertical_index(), Some(2));

        assert!(session.hover_horizontal(&fields, FieldId(1), DropSide::Right));
        assert_eq!(session.vertical_index(), None);
        assert_eq!(session.horizontal_zone(), Some((FieldId(1), DropSide::Right)));

        session.hover_vertical(3);
        assert_eq!(session.horizontal_zone(), None);
        assert_eq!(session.vertical_index(), Some(3));
    }

    #[test]
    fn test_hover_over_self_does_not_activate() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        assert!(!session.hover_horizontal(&fields, FieldId(0), DropSide::Left));
    }

    #[test]
    fn test_leave_horizontal_keeps_vertical() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        session.hover_vertical(1);
        session.leave_horizontal();
        assert_eq!(session.vertical_index(), Some(1));
    }

    #[test]
    fn test_vertical_moves() {
        let fields = abcd();
        let mut session = DragSession::new();

        session.start(&fields, FieldId(0)).unwrap();
        session.hover_vertical(3);
        assert_eq!(order(&session.drop(&fields)), vec![1, 2, 3, 0]);

        session.start(&fields, FieldId(3)).unwrap();
        session.hover_vertical(0);
        assert_eq!(order(&session.drop(&fields)), vec![3, 0, 1, 2]);

        session.start(&fields, FieldId(1)).unwrap();
        session.hover_vertical(1);
        assert_eq!(session.drop(&fields), DropOutcome::Unchanged);
    }

    #[test]
    fn test_vertical_index_is_clamped() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(1)).unwrap();
        session.hover_vertical(10);
        assert_eq!(order(&session.drop(&fields)), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_drop_without_target_is_noop() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(1)).unwrap();
        assert_eq!(session.drop(&fields), DropOutcome::Unchanged);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_horizontal_left_and_right() {
        let fields = abcd();
        let mut session = DragSession::new();

        session.start(&fields, FieldId(3)).unwrap();
        session.hover_horizontal(&fields, FieldId(1), DropSide::Left);
        assert_eq!(order(&session.drop(&fields)), vec![0, 3, 1, 2]);

        session.start(&fields, FieldId(0)).unwrap();
        session.hover_horizontal(&fields, FieldId(2), DropSide::Right);
        assert_eq!(order(&session.drop(&fields)), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_horizontal_to_current_spot_is_noop() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        session.hover_horizontal(&fields, FieldId(1), DropSide::Left);
        assert_eq!(session.drop(&fields), DropOutcome::Unchanged);
    }

    #[test]
    fn test_moved_field_drops_explicit_placement() {
        let mut fields = abcd();
        fields[0].row_index = Some(3);
        fields[0].sector_position = Some(2);

        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        session.hover_vertical(2);
        let DropOutcome::Reordered(reordered) = session.drop(&fields) else {
            panic!("expected a reorder");
        };
        assert_eq!(reordered[2].id, FieldId(0));
        assert_eq!(reordered[2].row_index, None);
        assert_eq!(reordered[2].sector_position, None);
    }

    #[test]
    fn test_stale_source_is_rejected() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(2)).unwrap();
        session.hover_vertical(0);

        let remaining: Vec<_> = fields.into_iter().filter(|f| f.id != FieldId(2)).collect();
        assert_eq!(
            session.drop(&remaining),
            DropOutcome::Rejected(RejectReason::StaleField(FieldId(2)))
        );
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_stale_target_is_rejected() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        session.hover_horizontal(&fields, FieldId(3), DropSide::Left);

        let remaining: Vec<_> = fields[..3].to_vec();
        assert_eq!(
            session.drop(&remaining),
            DropOutcome::Rejected(RejectReason::StaleField(FieldId(3)))
        );
    }

    #[test]
    fn test_payload_round_trip_and_checks() {
        let fields = abcd();
        let mut session = DragSession::new();

        session.start(&fields, FieldId(0)).unwrap();
        session.hover_vertical(3);
        let data = DragPayload::new(FieldId(0)).encode();
        assert_eq!(data, r#"{"fieldId":0}"#);
        assert_eq!(order(&session.drop_with_payload(&fields, &data)), vec![1, 2, 3, 0]);

        session.start(&fields, FieldId(0)).unwrap();
        session.hover_vertical(3);
        assert_eq!(
            session.drop_with_payload(&fields, "not json"),
            DropOutcome::Rejected(RejectReason::MalformedPayload)
        );
        assert!(!session.is_dragging());

        session.start(&fields, FieldId(0)).unwrap();
        assert_eq!(
            session.drop_with_payload(&fields, r#"{"fieldId":2}"#),
            DropOutcome::Rejected(RejectReason::PayloadMismatch {
                expected: FieldId(0),
                found: FieldId(2)
            })
        );
    }

    #[test]
    fn test_end_clears_everything() {
        let fields = abcd();
        let mut session = DragSession::new();
        session.start(&fields, FieldId(0)).unwrap();
        session.pointer_moved(Point::new(4.0, 2.0));
        session.hover_vertical(2);
        assert_eq!(session.cursor(), Some(Point::new(4.0, 2.0)));

        session.end();
        assert_eq!(session.state(), &DragState::Idle);
        assert_eq!(session.preview(), None);
        assert_eq!(session.cursor(), None);
        assert_eq!(session.target(), None);
        assert_eq!(
            session.drop(&fields),
            DropOutcome::Rejected(RejectReason::NotDragging)
        );
    }
}
