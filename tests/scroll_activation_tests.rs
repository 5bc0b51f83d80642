use timeline_rs::interaction::{Activation, ScrollActivationTracker, TrackerState};

fn tracker(positions: &[f64], distance: f64) -> ScrollActivationTracker {
    let mut tracker = ScrollActivationTracker::new();
    tracker.rebuild(positions, distance);
    tracker
}

fn activated(index: usize) -> Option<Activation> {
    Some(Activation {
        index,
        notify: true,
    })
}

#[test]
fn held_point_stays_active_across_gaps() {
    // Zero-width viewport: the center is the scroll offset itself.
    let mut tracker = tracker(&[0.0, 100.0, 500.0], 10.0);

    assert_eq!(tracker.resolve(0.0, 0.0), activated(0));
    assert_eq!(tracker.resolve(55.0, 0.0), None);
    assert_eq!(tracker.active(), Some(0));
    assert_eq!(tracker.resolve(95.0, 0.0), activated(1));
    assert_eq!(tracker.resolve(55.0, 0.0), None);
    assert_eq!(tracker.active(), Some(1));
    assert_eq!(tracker.resolve(5.0, 0.0), activated(0));
    assert_eq!(tracker.resolve(5.0, 0.0), None);
}

#[test]
fn gap_entry_without_held_neighbour_follows_direction() {
    let mut backward = tracker(&[0.0, 100.0, 500.0], 10.0);
    // No prior offset reads as backward: the later neighbour wins.
    assert_eq!(backward.resolve(300.0, 0.0), activated(2));

    let mut forward = tracker(&[0.0, 100.0, 500.0], 10.0);
    forward.record_offset(200.0);
    assert_eq!(forward.resolve(300.0, 0.0), activated(1));

    let mut stationary = tracker(&[0.0, 100.0, 500.0], 10.0);
    stationary.record_offset(300.0);
    assert_eq!(stationary.resolve(300.0, 0.0), None);
    assert_eq!(stationary.active(), None);
}

#[test]
fn center_outside_every_zone_changes_nothing() {
    let mut tracker = tracker(&[0.0, 100.0, 500.0], 10.0);
    assert_eq!(tracker.resolve(-100.0, 0.0), None);
    assert_eq!(tracker.resolve(1000.0, 0.0), None);
    assert_eq!(tracker.active(), None);
}

#[test]
fn viewport_center_drives_resolution() {
    let mut tracker = tracker(&[500.0, 740.0], 10.0);
    assert_eq!(tracker.resolve(240.0, 1000.0), activated(1));
    assert_eq!(tracker.resolve(-5.0, 1000.0), activated(0));
}

#[test]
fn wide_distance_splits_neighbours_at_midpoint() {
    let mut tracker = tracker(&[0.0, 100.0], 60.0);
    let zones = tracker.zones();
    assert_eq!((zones[0].before, zones[0].after), (-60.0, 50.0));
    assert_eq!((zones[1].before, zones[1].after), (50.0, 160.0));

    assert_eq!(tracker.resolve(49.0, 0.0), activated(0));
    assert_eq!(tracker.resolve(50.0, 0.0), activated(1));
}

#[test]
fn transition_defers_activation_until_finished() {
    let mut tracker = tracker(&[0.0, 100.0, 500.0], 10.0);
    tracker.begin_transition(Activation {
        index: 2,
        notify: false,
    });
    assert_eq!(tracker.state(), TrackerState::Transitioning);
    assert_eq!(tracker.resolve(100.0, 0.0), None);
    assert_eq!(tracker.active(), None);

    let finished = tracker.finish_transition().expect("pending target");
    assert_eq!(finished.index, 2);
    assert!(!finished.notify);
    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(tracker.active(), Some(2));
    assert_eq!(tracker.finish_transition(), None);
}

#[test]
fn rebuild_drops_an_out_of_range_active_index() {
    let mut tracker = tracker(&[0.0, 100.0, 500.0], 10.0);
    tracker.set_active(2);
    tracker.rebuild(&[0.0, 100.0], 10.0);
    assert_eq!(tracker.active(), None);
    assert!(tracker.resolve(f64::NAN, 0.0).is_none());
}
