use std::collections::HashSet;

use proptest::prelude::*;
use timeline_rs::core::PointSet;

proptest! {
    #[test]
    fn point_set_stays_ordered_with_dense_indices(
        entries in prop::collection::vec(
            (-62_000_000_000_000i64..62_000_000_000_000, -5.0f64..5.0),
            1..64
        ),
        removals in prop::collection::vec(0usize..64, 0..8)
    ) {
        let mut set = PointSet::new();
        let mut ids = HashSet::new();
        for (position, (millis, weight)) in entries.iter().enumerate() {
            let id = set.insert(*millis, None, *weight, position).expect("timestamp input");
            prop_assert!(ids.insert(id));
        }
        for index in removals {
            let _ = set.remove_at(index);
        }

        let points = set.points();
        for (position, point) in points.iter().enumerate() {
            prop_assert_eq!(point.index, position);
            prop_assert_eq!(set.index_of(point.id), Some(position));
        }
        for pair in points.windows(2) {
            prop_assert!(
                (pair[0].instant, pair[0].weight) <= (pair[1].instant, pair[1].weight)
            );
        }
        if let Some(range) = set.range() {
            prop_assert!(points.iter().all(|point| range.contains(point.instant)));
        }
    }
}
