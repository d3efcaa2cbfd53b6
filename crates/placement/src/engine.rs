use crate::{
    apply_resize, default_start, resize_bounds, resolve_placement, snap, Edge, Item, Millis,
    Placement, PlacementConfig, ResizeBounds,
};

/// Placement operations bound to one [`PlacementConfig`].
///
/// Holds configuration only. Every method is a pure function of its
/// arguments, so calling it repeatedly during a drag with unchanged input
/// yields the same answer.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    fn snapped(&self, candidate: Millis, targets: Option<&[Millis]>, proximity_ms: Millis) -> Millis {
        match targets {
            Some(targets) if self.config.snap_enabled => snap(candidate, targets, proximity_ms),
            _ => candidate,
        }
    }

    /// Snap `requested_start` to `snap_targets`, then resolve it against the
    /// destination track.
    pub fn resolve(
        &self,
        item: &Item,
        requested_start: Millis,
        others: &[Item],
        total_duration: Millis,
        snap_targets: Option<&[Millis]>,
    ) -> Placement {
        let requested = self.snapped(requested_start, snap_targets, self.config.move_snap_ms);
        resolve_placement(
            item,
            requested,
            others,
            total_duration,
            self.config.min_item_duration_ms,
        )
    }

    pub fn resize_bounds(
        &self,
        item: &Item,
        others: &[Item],
        edge: Edge,
        total_duration: Millis,
    ) -> ResizeBounds {
        resize_bounds(
            item,
            others,
            edge,
            total_duration,
            self.config.min_item_duration_ms,
        )
    }

    /// Drag `edge` of `item` to `candidate`: snap, clamp into the resize
    /// bounds and apply the item's own duration cap.
    pub fn resize(
        &self,
        item: &Item,
        others: &[Item],
        edge: Edge,
        candidate: Millis,
        total_duration: Millis,
        snap_targets: Option<&[Millis]>,
    ) -> Placement {
        let candidate = self.snapped(candidate, snap_targets, self.config.resize_snap_ms);
        let bounds = self.resize_bounds(item, others, edge, total_duration);
        apply_resize(item, &bounds, edge, candidate)
    }

    pub fn default_start(&self, playhead: Millis, track_items: &[Item]) -> Millis {
        default_start(playhead, track_items, self.config.insert_proximity_ms)
    }

    /// Pick a start for `item` near the playhead and run it through the
    /// resolver so it cannot land on top of an existing item.
    pub fn insert_at_playhead(
        &self,
        item: &Item,
        playhead: Millis,
        track_items: &[Item],
        total_duration: Millis,
    ) -> Placement {
        let start = self.default_start(playhead, track_items);
        resolve_placement(
            item,
            start,
            track_items,
            total_duration,
            self.config.min_item_duration_ms,
        )
    }
}
