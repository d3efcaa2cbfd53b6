/// End-to-end placement scenarios: literal drag/resize cases and a full
/// drag gesture driven through the timeline snapshot.
use placement::*;

const TOTAL: Millis = 60_000;

fn item(track: TrackId, start: Millis, duration: Millis) -> Item {
    Item::new(ItemKind::Video, track, start, duration)
}

#[test]
fn test_drag_into_narrow_gap_shrinks_item() {
    let track = TrackId::new();
    let others = vec![item(track, 0, 5000), item(track, 6000, 5000)];
    let moving = item(track, 20_000, 3000);

    let placement = resolve_placement(&moving, 5500, &others, TOTAL, MIN_ITEM_DURATION);
    assert_eq!(placement, Placement::new(5000, 1000));
}

#[test]
fn test_drag_onto_neighbour_does_not_overlap_it() {
    let track = TrackId::new();
    let a = item(track, 0, 2000);
    let b = item(track, 3000, 2000);
    let c = item(track, 6000, 2000);

    let placement = resolve_placement(&c, 4500, &[a, b.clone()], TOTAL, MIN_ITEM_DURATION);
    assert!(placement.start_time >= 5000);
    assert!(!placement.span().eq(&Span::new(4500, 2000)));
    assert!(!overlaps(&placement.span(), &b.span()));
}

#[test]
fn test_drag_on_empty_track_keeps_request() {
    let moving = item(TrackId::new(), 0, 3000);
    let placement = resolve_placement(&moving, 5000, &[], TOTAL, MIN_ITEM_DURATION);
    assert_eq!(placement, Placement::new(5000, 3000));
}

#[test]
fn test_gap_below_minimum_floors_duration() {
    let track = TrackId::new();
    let others = vec![item(track, 0, 3000), item(track, 3050, 3000)];
    let moving = item(track, 20_000, 3000);

    let placement = resolve_placement(&moving, 3025, &others, TOTAL, 100);
    assert_eq!(placement.start_time, 3000);
    assert_eq!(placement.duration, 100);
    // Known limitation: the floor spills 50ms into the right-hand neighbour.
    assert!(placement.forced_overlap);
    assert!(overlaps(&placement.span(), &others[1].span()));
}

#[test]
fn test_right_edge_resize_bounds() {
    let track = TrackId::new();
    let target = item(track, 5000, 3000);
    let others = vec![item(track, 10_000, 2000)];

    let bounds = resize_bounds(&target, &others, Edge::Right, 20_000, MIN_ITEM_DURATION);
    assert_eq!(
        bounds,
        ResizeBounds {
            min_time: 5100,
            max_time: 10_000
        }
    );
}

#[test]
fn test_item_shortened_at_timeline_end_resizes_without_overlap() {
    let engine = PlacementEngine::default();
    let track = TrackId::new();
    let a = item(track, 0, 9950);
    let others = vec![a.clone()];
    let moving = item(track, 0, 3000);

    let placement = engine.resolve(&moving, 9950, &others, 10_000, None);
    assert_eq!(placement, Placement::new(9950, 50));

    let mut placed = moving.clone();
    placed.start_time = placement.start_time;
    placed.duration = placement.duration;

    for candidate in [9900, 9950, 9990, 10_000] {
        let resized = engine.resize(&placed, &others, Edge::Left, candidate, 10_000, None);
        assert!(!overlaps(&resized.span(), &a.span()), "{candidate}: {resized:?}");
        assert_eq!(resized.end_time(), 10_000);
    }
}

#[test]
fn test_full_drag_gesture_across_tracks() {
    let engine = PlacementEngine::default();
    let mut timeline = Timeline::new(TOTAL);
    let v1 = Track::new("Video 1", 0);
    let v2 = Track::new("Video 2", 1);
    let (v1_id, v2_id) = (v1.id, v2.id);
    timeline.add_track(v1);
    timeline.add_track(v2);

    let clip = item(v1_id, 0, 4000);
    let other = item(v2_id, 10_000, 5000);
    let timeline = timeline
        .insert_item(v1_id, clip.clone())
        .and_then(|t| t.insert_item(v2_id, other.clone()))
        .unwrap();

    // Pointer-down 1000ms into the clip.
    let session = DragSession::begin_move(&clip, 1000);

    // Pointer moves over track 2.
    for pointer in [2000, 4000, 7000, 9000, 12_000] {
        let placement = timeline
            .preview_drag(&engine, &session, pointer, v2_id)
            .unwrap();
        assert!(!overlaps(&placement.span(), &other.span()));
    }

    // 9000 - 1000 = 8000 would end at 12_000, so it is clamped to end at
    // 10_000 where the other clip starts. Nothing is close enough to snap to
    // (targets are 10_000, 15_000 and the playhead at 0).
    let placement = timeline
        .preview_drag(&engine, &session, 9000, v2_id)
        .unwrap();
    assert_eq!(placement, Placement::new(6000, 4000));
    let again = timeline
        .preview_drag(&engine, &session, 9000, v2_id)
        .unwrap();
    assert_eq!(placement, again);

    let next = timeline.commit(clip.id, v2_id, placement).unwrap();
    assert!(next.track(v1_id).unwrap().items.is_empty());
    assert_eq!(next.track(v2_id).unwrap().items.len(), 2);
    assert!(next.track(v2_id).unwrap().validate().is_ok());
}

#[test]
fn test_timeline_scene_round_trips_through_json() {
    let mut timeline = Timeline::new(TOTAL);
    let track = Track::new("Video 1", 0);
    let track_id = track.id;
    timeline.add_track(track);
    let timeline = timeline
        .insert_item(track_id, item(track_id, 1000, 2000).with_max_duration(8000))
        .unwrap()
        .set_playhead(2500);

    let json = serde_json::to_string(&timeline).unwrap();
    let back: Timeline = serde_json::from_str(&json).unwrap();
    assert_eq!(back, timeline);
}

#[test]
fn test_pointer_mapper_feeds_drag() {
    let engine = PlacementEngine::default();
    let mapper = ViewportMapper::new(100.0, 0.0, 0.1);
    let mut timeline = Timeline::new(TOTAL);
    let track = Track::new("Video 1", 0);
    let track_id = track.id;
    timeline.add_track(track);
    let clip = item(track_id, 0, 2000);
    let timeline = timeline.insert_item(track_id, clip.clone()).unwrap();

    // Grab the clip at its start (x = 100) and drag to x = 400.
    let session = DragSession::begin_move(&clip, mapper.time_at(100.0));
    let placement = timeline
        .preview_drag(&engine, &session, mapper.time_at(400.0), track_id)
        .unwrap();
    assert_eq!(placement, Placement::new(3000, 2000));
}
