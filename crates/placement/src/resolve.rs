use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{find_gaps, locate_gap, nearest_gap, Gap, Item, Millis, Span};

/// Final position and size computed for an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub start_time: Millis,
    pub duration: Millis,
    /// Set when the target gap was narrower than the minimum duration and the
    /// duration floor pushed the item into its right-hand neighbour.
    #[serde(default)]
    pub forced_overlap: bool,
}

impl Placement {
    pub const fn new(start_time: Millis, duration: Millis) -> Self {
        Self {
            start_time,
            duration,
            forced_overlap: false,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start_time, self.duration)
    }

    pub fn end_time(&self) -> Millis {
        self.start_time + self.duration
    }
}

/// Duration that fits between `start` and the timeline end, never negative.
fn fit_to_total(wanted: Millis, start: Millis, total_duration: Millis) -> Millis {
    wanted.min(total_duration - start).max(0)
}

/// Start for an open-ended placement at or after `floor`. Requests past the
/// timeline end stop at the end instead of yielding a negative duration.
fn open_start(requested: Millis, floor: Millis, total_duration: Millis) -> Millis {
    requested.min(total_duration).max(floor)
}

/// Compute where `item` lands when dropped at `requested_start` on a track
/// holding `others` (which must not include `item` itself).
///
/// The result never overlaps `others` unless the selected gap is narrower than
/// `min_duration`, in which case [`Placement::forced_overlap`] is set.
pub fn resolve_placement(
    item: &Item,
    requested_start: Millis,
    others: &[Item],
    total_duration: Millis,
    min_duration: Millis,
) -> Placement {
    if others.is_empty() {
        let start = open_start(requested_start, 0, total_duration);
        let placement = Placement::new(start, fit_to_total(item.duration, start, total_duration));
        trace!(item = %item.id, ?placement, "resolved on empty track");
        return placement;
    }

    // Negative requests probe from zero so they land in a leading gap.
    let probe = requested_start.max(0);
    let gap = match locate_gap(probe, others) {
        Some(gap) => gap,
        None => {
            let gaps = find_gaps(others);
            // find_gaps always yields the trailing gap, so this never falls through.
            let Some(gap) = nearest_gap(requested_start, &gaps).copied() else {
                return Placement::new(probe, fit_to_total(item.duration, probe, total_duration));
            };
            debug!(
                item = %item.id,
                requested_start,
                gap_start = gap.start,
                gap_end = ?gap.end,
                "request overlaps an item, using nearest gap"
            );
            gap
        }
    };

    let placement = place_in_gap(item, requested_start, &gap, total_duration, min_duration);
    if placement.forced_overlap {
        debug!(
            item = %item.id,
            ?placement,
            gap_width = ?gap.width(),
            min_duration,
            "gap narrower than minimum duration"
        );
    } else {
        trace!(item = %item.id, ?placement, "resolved");
    }
    placement
}

fn place_in_gap(
    item: &Item,
    requested_start: Millis,
    gap: &Gap,
    total_duration: Millis,
    min_duration: Millis,
) -> Placement {
    let Some(gap_end) = gap.end else {
        // Never start before the trailing gap, or the item slides back over
        // the last item on the track.
        let start = open_start(requested_start, gap.start, total_duration);
        return Placement::new(start, fit_to_total(item.duration, start, total_duration));
    };

    let width = gap_end - gap.start;
    if item.duration <= width {
        let start = requested_start.clamp(gap.start, gap_end - item.duration);
        return Placement::new(start, fit_to_total(item.duration, start, total_duration));
    }

    let duration = min_duration.max(width.min(total_duration - gap.start));
    Placement {
        start_time: gap.start,
        duration,
        forced_overlap: duration > width,
    }
}
