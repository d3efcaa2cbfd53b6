use crate::model::sorted_by_start;
use crate::{Item, Millis};

/// Start time for a new item dropped at the playhead.
///
/// When the playhead sits within `proximity_ms` of an item, the new item is
/// attached to that item: after its end when the end is close enough, before
/// its start otherwise. A playhead inside an item appends after the track's
/// last item. The result is a suggestion; run it through
/// [`resolve_placement`](crate::resolve_placement) before committing.
pub fn default_start(playhead: Millis, track_items: &[Item], proximity_ms: Millis) -> Millis {
    let Some(closest) = closest_item(playhead, track_items) else {
        return playhead;
    };

    if (closest.end_time() - playhead).abs() <= proximity_ms {
        return closest.end_time();
    }

    if (closest.start_time - playhead).abs() <= proximity_ms {
        if closest.start_time <= 0 {
            // Nothing fits before an item at zero.
            return after_last_item(track_items);
        }
        return track_items
            .iter()
            .filter(|item| item.end_time() <= closest.start_time)
            .map(Item::end_time)
            .max()
            .unwrap_or(0);
    }

    if track_items
        .iter()
        .any(|item| item.span().strictly_contains(playhead))
    {
        return after_last_item(track_items);
    }

    playhead
}

fn edge_distance(item: &Item, time: Millis) -> Millis {
    (item.start_time - time)
        .abs()
        .min((item.end_time() - time).abs())
}

/// First item in list order whose nearer edge is closest to `time`.
fn closest_item(time: Millis, items: &[Item]) -> Option<&Item> {
    let mut best: Option<(&Item, Millis)> = None;
    for item in items {
        let distance = edge_distance(item, time);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((item, distance)),
        }
    }
    best.map(|(item, _)| item)
}

fn after_last_item(items: &[Item]) -> Millis {
    sorted_by_start(items)
        .last()
        .map_or(0, |item| item.end_time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, TrackId};

    const PROXIMITY: Millis = 1000;

    fn item(start: Millis, duration: Millis) -> Item {
        Item::new(ItemKind::Video, TrackId::new(), start, duration)
    }

    #[test]
    fn empty_track_uses_playhead() {
        assert_eq!(default_start(4200, &[], PROXIMITY), 4200);
    }

    #[test]
    fn attaches_after_nearby_end() {
        let items = vec![item(0, 5000), item(20_000, 1000)];
        assert_eq!(default_start(5600, &items, PROXIMITY), 5000);
        assert_eq!(default_start(4400, &items, PROXIMITY), 5000);
    }

    #[test]
    fn attaches_before_nearby_start() {
        let items = vec![item(0, 2000), item(10_000, 5000)];
        // 9500 is 500 from the start of the second item and 7500 from the first.
        assert_eq!(default_start(9500, &items, PROXIMITY), 2000);
    }

    #[test]
    fn attaches_before_nearby_start_with_nothing_before() {
        let items = vec![item(10_000, 5000)];
        assert_eq!(default_start(9500, &items, PROXIMITY), 0);
    }

    #[test]
    fn item_at_zero_falls_back_to_end_of_track() {
        let items = vec![item(30_000, 1000), item(0, 8000)];
        assert_eq!(default_start(300, &items, PROXIMITY), 31_000);
    }

    #[test]
    fn playhead_inside_item_appends() {
        let items = vec![item(0, 10_000), item(12_000, 3000)];
        assert_eq!(default_start(5000, &items, PROXIMITY), 15_000);
    }

    #[test]
    fn far_from_everything_uses_playhead() {
        let items = vec![item(0, 2000), item(10_000, 1000)];
        assert_eq!(default_start(6000, &items, PROXIMITY), 6000);
    }

    #[test]
    fn closest_item_ties_go_to_first() {
        // 3000 is exactly 1000 from A's end and from B's start.
        let a = item(0, 2000);
        let b = item(4000, 1000);
        assert_eq!(default_start(3000, &[a.clone(), b.clone()], PROXIMITY), 2000);
        // With B first, B's start is attached to and A is the preceding item.
        assert_eq!(default_start(3000, &[b, a], PROXIMITY), 2000);
    }
}
