use serde::{Deserialize, Serialize};

use crate::{Millis, MIN_ITEM_DURATION};

/// Tunable constants for placement and snapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Duration floor for shrink and resize.
    pub min_item_duration_ms: Millis,

    /// How close the playhead must be to an item edge for a new item to
    /// attach to it.
    pub insert_proximity_ms: Millis,

    /// Snap threshold while dragging an item edge.
    pub resize_snap_ms: Millis,

    /// Snap threshold while dragging a whole item.
    pub move_snap_ms: Millis,

    /// Enable snapping for drags and resizes
    pub snap_enabled: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_item_duration_ms: MIN_ITEM_DURATION,
            insert_proximity_ms: 1000,
            resize_snap_ms: 200,
            move_snap_ms: 200,
            snap_enabled: true,
        }
    }
}

impl PlacementConfig {
    /// Toggle snapping on/off
    pub fn toggle_snapping(&mut self) {
        self.snap_enabled = !self.snap_enabled;
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
