use serde::{Deserialize, Serialize};

use crate::{Edge, Item, ItemId, Millis, Span, TrackId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Move,
    Resize(Edge),
}

/// Transient state of one pointer drag, owned by the caller from pointer-down
/// to pointer-up. Dropping it cancels the gesture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub item_id: ItemId,
    pub source_track: TrackId,
    pub mode: DragMode,
    /// Pointer time minus item start at pointer-down, so the item does not
    /// jump to put its start under the pointer.
    pub grab_offset: Millis,
    /// Item span when the drag began.
    pub original: Span,
}

impl DragSession {
    pub fn begin_move(item: &Item, pointer_time: Millis) -> Self {
        Self {
            item_id: item.id,
            source_track: item.track_id,
            mode: DragMode::Move,
            grab_offset: pointer_time - item.start_time,
            original: item.span(),
        }
    }

    pub fn begin_resize(item: &Item, edge: Edge, pointer_time: Millis) -> Self {
        let anchor = match edge {
            Edge::Left => item.start_time,
            Edge::Right => item.end_time(),
        };
        Self {
            item_id: item.id,
            source_track: item.track_id,
            mode: DragMode::Resize(edge),
            grab_offset: pointer_time - anchor,
            original: item.span(),
        }
    }

    /// Where the dragged edge (or the item start, for a move) wants to be for
    /// the current pointer time.
    pub fn requested_time(&self, pointer_time: Millis) -> Millis {
        pointer_time - self.grab_offset
    }

    pub fn is_resize(&self) -> bool {
        matches!(self.mode, DragMode::Resize(_))
    }
}
