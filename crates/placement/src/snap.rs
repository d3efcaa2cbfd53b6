use crate::{Item, ItemId, Millis};

/// Pull `candidate` onto the closest target when it is strictly within
/// `proximity_ms`. Equal distances resolve to the earlier target in `targets`.
pub fn snap(candidate: Millis, targets: &[Millis], proximity_ms: Millis) -> Millis {
    let mut best: Option<(Millis, Millis)> = None; // (target, distance)
    for &target in targets {
        let distance = (candidate - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((target, distance)),
        }
    }

    match best {
        Some((target, distance)) if distance < proximity_ms => target,
        _ => candidate,
    }
}

/// Start and end of every item except `exclude`, in input order, followed by
/// the playhead.
pub fn collect_snap_targets<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    exclude: Option<ItemId>,
    playhead: Option<Millis>,
) -> Vec<Millis> {
    let mut targets = Vec::new();
    for item in items {
        if Some(item.id) == exclude {
            continue;
        }
        targets.push(item.start_time);
        targets.push(item.end_time());
    }
    targets.extend(playhead);
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, TrackId};

    #[test]
    fn snaps_to_closest_target_within_threshold() {
        assert_eq!(snap(1040, &[0, 1000, 2000], 100), 1000);
        assert_eq!(snap(1960, &[0, 1000, 2000], 100), 2000);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(snap(1100, &[1000], 100), 1100);
        assert_eq!(snap(1099, &[1000], 100), 1000);
    }

    #[test]
    fn no_targets_returns_candidate() {
        assert_eq!(snap(1234, &[], 500), 1234);
    }

    #[test]
    fn ties_go_to_first_target() {
        assert_eq!(snap(1500, &[1450, 1550], 100), 1450);
        assert_eq!(snap(1500, &[1550, 1450], 100), 1550);
    }

    #[test]
    fn collects_edges_and_playhead() {
        let track = TrackId::new();
        let a = Item::new(ItemKind::Video, track, 0, 1000);
        let b = Item::new(ItemKind::Audio, track, 2000, 500);
        let targets = collect_snap_targets([&a, &b], Some(a.id), Some(7000));
        assert_eq!(targets, vec![2000, 2500, 7000]);

        let targets = collect_snap_targets([&a, &b], None, None);
        assert_eq!(targets, vec![0, 1000, 2000, 2500]);
    }
}
