use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Millis, PlacementError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TrackId(pub Uuid);

impl TrackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open interval `[start, start + duration)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Millis,
    pub duration: Millis,
}

impl Span {
    pub const fn new(start: Millis, duration: Millis) -> Self {
        Self { start, duration }
    }

    pub fn end(&self) -> Millis {
        self.start + self.duration
    }

    /// True when `time` lies strictly between the two edges.
    pub fn strictly_contains(&self, time: Millis) -> bool {
        self.start < time && time < self.end()
    }
}

/// Touching endpoints (`a.end == b.start`) do not count as an overlap.
pub fn overlaps(a: &Span, b: &Span) -> bool {
    !(a.end() <= b.start || b.end() <= a.start)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Video,
    Audio,
    Image,
}

impl Default for ItemKind {
    fn default() -> Self {
        Self::Video
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub kind: ItemKind,
    pub track_id: TrackId,
    pub start_time: Millis,
    pub duration: Millis,
    /// Offset into the source asset. Carried along, never read by placement.
    #[serde(default)]
    pub media_start_time: Option<Millis>,
    #[serde(default)]
    pub max_duration: Option<Millis>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Item {
    pub fn new(kind: ItemKind, track_id: TrackId, start_time: Millis, duration: Millis) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            track_id,
            start_time,
            duration,
            media_start_time: None,
            max_duration: None,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_max_duration(mut self, max_duration: Millis) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    pub fn with_media_start(mut self, media_start_time: Millis) -> Self {
        self.media_start_time = Some(media_start_time);
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.start_time, self.duration)
    }

    pub fn end_time(&self) -> Millis {
        self.start_time + self.duration
    }

    pub fn overlaps(&self, other: &Item) -> bool {
        overlaps(&self.span(), &other.span())
    }
}

/// Sorted view over a slice of items, ordered by start time. Items sharing a
/// start time keep their input order.
pub(crate) fn sorted_by_start(items: &[Item]) -> Vec<&Item> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by_key(|item| item.start_time);
    sorted
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    /// Display order, lowest first.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Track {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            order,
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Every item on this track except `id`, the shape the engine consumes.
    pub fn others(&self, id: ItemId) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect()
    }

    /// Last item by start time.
    pub fn last_item(&self) -> Option<&Item> {
        sorted_by_start(&self.items).last().copied()
    }

    /// Check the non-overlap invariant across every pair of items.
    pub fn validate(&self) -> Result<(), PlacementError> {
        let sorted = sorted_by_start(&self.items);
        for (i, item) in sorted.iter().enumerate() {
            if item.duration <= 0 {
                return Err(PlacementError::InvalidDuration {
                    item: item.id,
                    duration: item.duration,
                });
            }
            if let Some(next) = sorted.get(i + 1) {
                if item.id == next.id {
                    return Err(PlacementError::DuplicateItem(item.id));
                }
            }
            // Sorted by start, so any overlap shows up against a later item
            // whose start lies before this item's end.
            for later in sorted[i + 1..].iter() {
                if later.start_time >= item.end_time() {
                    break;
                }
                if item.overlaps(later) {
                    return Err(PlacementError::Overlap {
                        item: later.id,
                        other: item.id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spans_do_not_overlap() {
        let a = Span::new(0, 5000);
        let b = Span::new(5000, 1000);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn intersecting_spans_overlap() {
        let a = Span::new(0, 5000);
        assert!(overlaps(&a, &Span::new(4999, 10)));
        assert!(overlaps(&a, &Span::new(-10, 11)));
        assert!(overlaps(&a, &Span::new(1000, 100))); // contained
        assert!(overlaps(&Span::new(1000, 100), &a));
        assert!(!overlaps(&a, &Span::new(-10, 10)));
    }

    #[test]
    fn track_validate_detects_overlap() {
        let mut track = Track::new("Video 1", 0);
        let a = Item::new(ItemKind::Video, track.id, 0, 2000);
        let b = Item::new(ItemKind::Audio, track.id, 1500, 2000);
        let b_id = b.id;
        let a_id = a.id;
        track.items = vec![b, a];

        assert_eq!(
            track.validate(),
            Err(PlacementError::Overlap {
                item: b_id,
                other: a_id
            })
        );
    }

    #[test]
    fn track_validate_accepts_touching_items() {
        let mut track = Track::new("Video 1", 0);
        track.items = vec![
            Item::new(ItemKind::Video, track.id, 2000, 1000),
            Item::new(ItemKind::Image, track.id, 0, 2000),
        ];
        assert!(track.validate().is_ok());
        assert_eq!(track.last_item().map(|i| i.start_time), Some(2000));
    }

    #[test]
    fn item_round_trips_through_json_with_defaults() {
        let track_id = TrackId::new();
        let json = serde_json::json!({
            "id": ItemId::new(),
            "track_id": track_id,
            "start_time": 100,
            "duration": 400,
        });
        let item: Item = serde_json::from_value(json).unwrap();
        assert_eq!(item.kind, ItemKind::Video);
        assert_eq!(item.max_duration, None);
        assert_eq!(item.end_time(), 500);
    }
}
