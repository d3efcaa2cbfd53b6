use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    collect_snap_targets, overlaps, DragMode, DragSession, Item, ItemId, Millis, Placement,
    PlacementEngine, PlacementError, Track, TrackId,
};

/// Snapshot of every track plus the shared timeline bound and playhead.
///
/// Edits never mutate in place: each one returns a new `Timeline`, leaving
/// the receiver untouched when validation fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub total_duration: Millis,
    #[serde(default)]
    pub playhead: Millis,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Timeline {
    pub fn new(total_duration: Millis) -> Self {
        Self {
            total_duration,
            playhead: 0,
            tracks: Vec::new(),
        }
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
        self.tracks.sort_by_key(|t| t.order);
    }

    pub fn track(&self, id: TrackId) -> Result<&Track, PlacementError> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .ok_or(PlacementError::TrackNotFound(id))
    }

    fn track_mut(&mut self, id: TrackId) -> Result<&mut Track, PlacementError> {
        self.tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(PlacementError::TrackNotFound(id))
    }

    pub fn find_item(&self, id: ItemId) -> Result<(&Track, &Item), PlacementError> {
        self.tracks
            .iter()
            .find_map(|track| track.item(id).map(|item| (track, item)))
            .ok_or(PlacementError::ItemNotFound(id))
    }

    /// Edges of every item on every track except `exclude`, then the playhead.
    pub fn snap_targets(&self, exclude: Option<ItemId>) -> Vec<Millis> {
        collect_snap_targets(
            self.tracks.iter().flat_map(|track| track.items.iter()),
            exclude,
            Some(self.playhead),
        )
    }

    /// Where the dragged item would land for `pointer_time`, without
    /// committing anything. Moves may target any track; resizes stay on the
    /// item's own track.
    pub fn preview_drag(
        &self,
        engine: &PlacementEngine,
        session: &DragSession,
        pointer_time: Millis,
        target_track: TrackId,
    ) -> Result<Placement, PlacementError> {
        let (source, item) = self.find_item(session.item_id)?;
        let targets = self.snap_targets(Some(item.id));
        let requested = session.requested_time(pointer_time);

        let placement = match session.mode {
            DragMode::Move => {
                let others = self.track(target_track)?.others(item.id);
                engine.resolve(
                    item,
                    requested,
                    &others,
                    self.total_duration,
                    Some(targets.as_slice()),
                )
            }
            DragMode::Resize(edge) => {
                let others = source.others(item.id);
                engine.resize(
                    item,
                    &others,
                    edge,
                    requested,
                    self.total_duration,
                    Some(targets.as_slice()),
                )
            }
        };
        Ok(placement)
    }

    /// Apply `placement` to an existing item, moving it to `target_track` if
    /// it lives elsewhere. Removal from the source and insertion into the
    /// target happen together or not at all.
    pub fn commit(
        &self,
        item_id: ItemId,
        target_track: TrackId,
        placement: Placement,
    ) -> Result<Timeline, PlacementError> {
        let (source, item) = self.find_item(item_id)?;
        let source_id = source.id;
        let mut moved = item.clone();
        moved.start_time = placement.start_time;
        moved.duration = placement.duration;
        moved.track_id = target_track;

        self.check_fits(&moved, self.track(target_track)?)?;

        let mut next = self.clone();
        next.track_mut(source_id)?.items.retain(|i| i.id != item_id);
        next.track_mut(target_track)?.items.push(moved);
        Ok(next)
    }

    /// Add a new item to `track_id` at its own start time and duration.
    pub fn insert_item(&self, track_id: TrackId, item: Item) -> Result<Timeline, PlacementError> {
        if self.find_item(item.id).is_ok() {
            return Err(PlacementError::DuplicateItem(item.id));
        }
        let mut item = item;
        item.track_id = track_id;
        self.check_fits(&item, self.track(track_id)?)?;

        let mut next = self.clone();
        next.track_mut(track_id)?.items.push(item);
        Ok(next)
    }

    /// Place a new item near the playhead on `track_id` and insert it.
    pub fn insert_at_playhead(
        &self,
        engine: &PlacementEngine,
        track_id: TrackId,
        item: Item,
    ) -> Result<Timeline, PlacementError> {
        let track = self.track(track_id)?;
        let placement =
            engine.insert_at_playhead(&item, self.playhead, &track.items, self.total_duration);
        let mut item = item;
        item.start_time = placement.start_time;
        item.duration = placement.duration;
        self.insert_item(track_id, item)
    }

    pub fn remove_item(&self, item_id: ItemId) -> Result<(Timeline, Item), PlacementError> {
        let (source, item) = self.find_item(item_id)?;
        let source_id = source.id;
        let removed = item.clone();

        let mut next = self.clone();
        next.track_mut(source_id)?.items.retain(|i| i.id != item_id);
        Ok((next, removed))
    }

    pub fn set_playhead(&self, playhead: Millis) -> Timeline {
        let mut next = self.clone();
        next.playhead = playhead.clamp(0, self.total_duration.max(0));
        next
    }

    fn check_fits(&self, item: &Item, track: &Track) -> Result<(), PlacementError> {
        let result = validate_slot(item, track, self.total_duration);
        if let Err(err) = &result {
            debug!(item = %item.id, track = %track.id, %err, "placement rejected");
        }
        result
    }
}

fn validate_slot(item: &Item, track: &Track, total_duration: Millis) -> Result<(), PlacementError> {
    if item.duration <= 0 {
        return Err(PlacementError::InvalidDuration {
            item: item.id,
            duration: item.duration,
        });
    }
    if item.start_time < 0 {
        return Err(PlacementError::NegativeStart {
            item: item.id,
            start: item.start_time,
        });
    }
    if item.end_time() > total_duration {
        return Err(PlacementError::OutOfBounds {
            item: item.id,
            end: item.end_time(),
            total: total_duration,
        });
    }
    let span = item.span();
    if let Some(other) = track
        .items
        .iter()
        .filter(|other| other.id != item.id)
        .find(|other| overlaps(&span, &other.span()))
    {
        return Err(PlacementError::Overlap {
            item: item.id,
            other: other.id,
        });
    }
    Ok(())
}
