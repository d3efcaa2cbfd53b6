use serde::{Deserialize, Serialize};

use crate::{Item, Millis, Placement};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
}

/// Legal range for the dragged edge of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResizeBounds {
    pub min_time: Millis,
    pub max_time: Millis,
}

impl ResizeBounds {
    pub fn clamp(&self, time: Millis) -> Millis {
        time.max(self.min_time).min(self.max_time)
    }
}

/// Range the `edge` of `item` may be dragged through without crossing a
/// neighbour, the timeline start or end, or shrinking below `min_duration`.
///
/// An item already shorter than `min_duration` may grow but not shrink, so
/// the dragged edge's current position is always inside the range.
pub fn resize_bounds(
    item: &Item,
    others: &[Item],
    edge: Edge,
    total_duration: Millis,
    min_duration: Millis,
) -> ResizeBounds {
    match edge {
        Edge::Left => {
            let min_time = others
                .iter()
                .filter(|other| other.end_time() <= item.start_time)
                .map(Item::end_time)
                .max()
                .unwrap_or(0);
            ResizeBounds {
                min_time,
                max_time: (item.end_time() - min_duration).max(item.start_time),
            }
        }
        Edge::Right => {
            let max_time = others
                .iter()
                .filter(|other| other.start_time >= item.end_time())
                .map(|other| other.start_time)
                .min()
                .map_or(total_duration, |start| start.min(total_duration));
            ResizeBounds {
                min_time: (item.start_time + min_duration).min(item.end_time()),
                max_time,
            }
        }
    }
}

/// Move `edge` of `item` to `candidate`, clamped into `bounds`. The opposite
/// edge stays where it is, including when `max_duration` caps the result.
pub fn apply_resize(item: &Item, bounds: &ResizeBounds, edge: Edge, candidate: Millis) -> Placement {
    let time = bounds.clamp(candidate);
    match edge {
        Edge::Left => {
            let end = item.end_time();
            let mut duration = end - time;
            if let Some(max) = item.max_duration {
                duration = duration.min(max);
            }
            Placement::new(end - duration, duration)
        }
        Edge::Right => {
            let mut duration = time - item.start_time;
            if let Some(max) = item.max_duration {
                duration = duration.min(max);
            }
            Placement::new(item.start_time, duration)
        }
    }
}
