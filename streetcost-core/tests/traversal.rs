use std::sync::Arc;

use geo::line_string;
use rayon::prelude::*;
use streetcost_core::prelude::*;

fn segment(length: f64, permission: StreetTraversalPermission) -> StreetSegment {
    StreetSegment::new(
        line_string![(x: 0.0, y: 0.0), (x: 0.0, y: length)],
        "Harbor Road",
        length,
        permission,
        false,
    )
    .expect("valid segment")
}

fn modes(modes: &[TraverseMode]) -> TraverseModeSet {
    modes.iter().copied().collect()
}

fn all_options() -> Vec<TraverseOptions> {
    let mode_sets = [
        modes(&[TraverseMode::Walk]),
        modes(&[TraverseMode::Bicycle]),
        modes(&[TraverseMode::Car]),
        modes(&[TraverseMode::Walk, TraverseMode::Bicycle]),
        modes(&[TraverseMode::Bicycle, TraverseMode::Car]),
    ];
    let criteria = [
        OptimizeType::Quick,
        OptimizeType::Safe,
        OptimizeType::Flat,
        OptimizeType::Greenways,
        OptimizeType::Transfers,
    ];

    let mut options = Vec::new();
    for set in mode_sets {
        for optimize_for in criteria {
            let base = TraverseOptions::new(set)
                .with_optimize_for(optimize_for)
                .with_speed(4.0)
                .with_walk_reluctance(1.5)
                .with_walk_factor(WalkFactor::Limited {
                    max_walk_distance: 200.0,
                    overage_reluctance: 1.0,
                });
            options.push(base.clone());
            options.push(base.with_wheelchair(0.05));
        }
    }
    options
}

fn all_segments() -> Vec<StreetSegment> {
    let permissions = [
        StreetTraversalPermission::NONE,
        StreetTraversalPermission::PEDESTRIAN,
        StreetTraversalPermission::BICYCLE,
        StreetTraversalPermission::CAR,
        StreetTraversalPermission::PEDESTRIAN_AND_BICYCLE,
        StreetTraversalPermission::ALL,
    ];
    let hill = ElevationProfile::try_from(vec![(0.0, 10.0), (40.0, 13.0), (80.0, 12.0)])
        .expect("valid profile");

    let mut segments = Vec::new();
    for permission in permissions {
        let flat = segment(80.0, permission);

        let mut steep = segment(80.0, permission);
        steep
            .set_elevation_profile(hill.clone(), &GradeCostModel::default())
            .expect("profile attaches");
        steep.set_bicycle_safety_effective_length(140.0).unwrap();
        steep.set_slope_speed_effective_length(95.0).unwrap();

        let mut closed = segment(80.0, permission);
        closed.set_wheelchair_accessible(false);

        segments.extend([flat, steep, closed]);
    }
    segments
}

#[test]
fn accessibility_overrides_modes() {
    for segment in all_segments() {
        for options in all_options() {
            let blocked = options.wheelchair_accessible
                && (!segment.is_wheelchair_accessible() || segment.max_slope() > options.max_slope);
            if blocked {
                assert!(!segment.can_traverse(&options), "{segment:?} {options:?}");
            }
        }
    }
}

#[test]
fn feasible_weights_are_non_negative() {
    let state = TraversalState {
        walk_distance: 250.0,
        time: 0,
    };
    for segment in all_segments() {
        for options in all_options() {
            if !segment.can_traverse(&options) {
                continue;
            }
            let result = segment
                .traverse(&state, &options)
                .expect("well formed inputs")
                .expect("feasible segment");
            assert!(result.weight >= 0.0, "{segment:?} {options:?}");
        }
    }
}

#[test]
fn forward_then_backward_restores_time() {
    let start = TraversalState::new(8 * 3600);
    for segment in all_segments() {
        for options in all_options() {
            let Some(forward) = segment.traverse(&start, &options).unwrap() else {
                continue;
            };
            let backward = segment
                .traverse_back(&forward.state, &options)
                .unwrap()
                .expect("same options cross the segment both ways");
            assert_eq!(backward.state.time, start.time);
        }
    }
}

#[test]
fn bicycle_only_segment_is_dead_end_for_pedestrians() {
    let s = segment(100.0, StreetTraversalPermission::BICYCLE);
    let options = TraverseOptions::new(modes(&[TraverseMode::Walk]))
        .with_speed(1.0)
        .with_optimize_for(OptimizeType::Quick);

    assert!(!s.can_traverse(&options));
    let result = s.traverse(&TraversalState::default(), &options).unwrap();
    assert!(result.is_none());
    let result = s.traverse_back(&TraversalState::default(), &options).unwrap();
    assert!(result.is_none());
}

#[test]
fn safe_cycling_uses_safety_length() {
    let mut s = segment(100.0, StreetTraversalPermission::BICYCLE);
    s.set_bicycle_safety_effective_length(120.0).unwrap();
    let options = TraverseOptions::new(modes(&[TraverseMode::Bicycle]))
        .with_optimize_for(OptimizeType::Safe)
        .with_speed(5.0)
        .with_walk_reluctance(1.0)
        .with_walk_factor(WalkFactor::Constant { factor: 1.0 });

    let result = s
        .traverse(&TraversalState::default(), &options)
        .unwrap()
        .unwrap();
    assert!((result.weight - 24.0).abs() < 1e-12);
    assert_eq!(result.state.time, 20);
    assert_eq!(result.state.walk_distance, 100.0);
}

#[test]
fn steep_segment_blocks_wheelchair_even_for_pedestrians() {
    let mut s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
    let ramp = ElevationProfile::try_from(vec![(0.0, 0.0), (100.0, 10.0)]).unwrap();
    s.set_elevation_profile(ramp, &GradeCostModel::default())
        .unwrap();
    assert!((s.max_slope() - 0.10).abs() < 1e-12);

    let options = TraverseOptions::default().with_wheelchair(0.08);
    assert!(!s.can_traverse(&options));
    assert!(
        s.traverse(&TraversalState::default(), &options)
            .unwrap()
            .is_none()
    );
}

#[test]
fn full_range_slice_is_whole_profile() {
    let mut s = segment(80.0, StreetTraversalPermission::ALL);
    let profile =
        ElevationProfile::try_from(vec![(0.0, 10.0), (40.0, 13.0), (80.0, 12.0)]).unwrap();
    s.set_elevation_profile(profile.clone(), &GradeCostModel::default())
        .unwrap();

    assert_eq!(s.profile_slice(0.0, s.length()), Some(profile));
    assert!(s.profile_slice(60.0, 10.0).unwrap().is_empty());
}

#[test]
fn slope_override_stores_two_samples() {
    let mut s = segment(80.0, StreetTraversalPermission::ALL);
    s.set_slope_override(true);
    let profile = ElevationProfile::try_from(vec![
        (0.0, 10.0),
        (20.0, 25.0),
        (40.0, 13.0),
        (80.0, 12.0),
    ])
    .unwrap();
    s.set_elevation_profile(profile, &GradeCostModel::default())
        .unwrap();

    let stored = s.elevation_profile().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.first().map(|c| (c.x, c.y)), Some((0.0, 10.0)));
    assert_eq!(stored.last().map(|c| (c.x, c.y)), Some((80.0, 12.0)));
}

#[test]
fn segments_are_shared_across_threads() {
    let segments: Arc<Vec<StreetSegment>> = Arc::new(all_segments());
    let options = TraverseOptions::new(modes(&[TraverseMode::Walk, TraverseMode::Bicycle]))
        .with_optimize_for(OptimizeType::Flat);

    let sequential: Vec<Option<f64>> = segments
        .iter()
        .map(|s| {
            s.traverse(&TraversalState::default(), &options)
                .unwrap()
                .map(|r| r.weight)
        })
        .collect();

    let parallel: Vec<Option<f64>> = segments
        .par_iter()
        .map(|s| {
            s.traverse(&TraversalState::default(), &options)
                .unwrap()
                .map(|r| r.weight)
        })
        .collect();

    assert_eq!(sequential, parallel);
}
