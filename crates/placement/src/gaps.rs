use serde::{Deserialize, Serialize};

use crate::model::sorted_by_start;
use crate::{Item, ItemId, Millis};

/// A maximal free interval `[start, end)` on a track. `end` is `None` for the
/// trailing gap, which runs to infinity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gap {
    pub start: Millis,
    pub end: Option<Millis>,
    /// Item bounding the gap on the left, `None` at the start of the track.
    pub left: Option<ItemId>,
    /// Item bounding the gap on the right, `None` for the trailing gap.
    pub right: Option<ItemId>,
}

impl Gap {
    pub fn is_unbounded(&self) -> bool {
        self.end.is_none()
    }

    pub fn width(&self) -> Option<Millis> {
        self.end.map(|end| end - self.start)
    }

    pub fn contains(&self, time: Millis) -> bool {
        time >= self.start && self.end.map_or(true, |end| time < end)
    }

    /// Zero when `time` is inside the gap, otherwise the distance to the
    /// nearer edge.
    pub fn distance_to(&self, time: Millis) -> Millis {
        if self.contains(time) {
            0
        } else if time < self.start {
            self.start - time
        } else {
            // Past a bounded end; an unbounded gap contains everything after start.
            self.end.map_or(0, |end| time - end)
        }
    }
}

/// Lazily walks a track from time zero, yielding gaps in order. Zero-width
/// gaps between touching items are skipped; the trailing gap is always last.
pub struct Gaps<'a> {
    sorted: Vec<&'a Item>,
    index: usize,
    cursor: Millis,
    left: Option<ItemId>,
    finished: bool,
}

impl<'a> Gaps<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        Self {
            sorted: sorted_by_start(items),
            index: 0,
            cursor: 0,
            left: None,
            finished: false,
        }
    }
}

impl Iterator for Gaps<'_> {
    type Item = Gap;

    fn next(&mut self) -> Option<Gap> {
        while let Some(item) = self.sorted.get(self.index).copied() {
            self.index += 1;
            let gap = (item.start_time > self.cursor).then(|| Gap {
                start: self.cursor,
                end: Some(item.start_time),
                left: self.left,
                right: Some(item.id),
            });
            self.cursor = self.cursor.max(item.end_time());
            self.left = Some(item.id);
            if gap.is_some() {
                return gap;
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        Some(Gap {
            start: self.cursor,
            end: None,
            left: self.left,
            right: None,
        })
    }
}

pub fn gaps(items: &[Item]) -> Gaps<'_> {
    Gaps::new(items)
}

/// All free intervals of a track, covering `[0, ∞)` minus its items.
pub fn find_gaps(items: &[Item]) -> Vec<Gap> {
    gaps(items).collect()
}

/// The gap containing `time`, or `None` when `time` falls on an item.
/// Stops scanning at the first hit.
pub fn locate_gap(time: Millis, items: &[Item]) -> Option<Gap> {
    gaps(items).find(|gap| gap.contains(time))
}

/// The gap closest to `time`. Ties go to the earliest gap in track order.
pub fn nearest_gap(time: Millis, gaps: &[Gap]) -> Option<&Gap> {
    let mut best: Option<(&Gap, Millis)> = None;
    for gap in gaps {
        let distance = gap.distance_to(time);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((gap, distance)),
        }
    }
    best.map(|(gap, _)| gap)
}
