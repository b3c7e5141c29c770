use log::{error, trace};

use super::state::TraversalState;
use super::strategy::WeightStrategy;
use crate::{Error, StreetSegment, StreetTraversalPermission, Time, TraverseMode, TraverseOptions};

/// Outcome of crossing a segment
#[derive(Debug, Clone, Copy)]
pub struct TraversalResult<'a> {
    /// Non-negative search weight
    pub weight: f64,
    /// Path state after the segment
    pub state: TraversalState,
    pub segment: &'a StreetSegment,
    /// Mode the segment was crossed with. `Walk` when a bicycle was pushed.
    pub mode: TraverseMode,
}

/// Capability the search algorithm needs from an edge
pub trait StreetTraversal {
    /// Whether any enabled mode may use this edge under the accessibility
    /// requirements of `options`
    fn can_traverse(&self, options: &TraverseOptions) -> bool;

    /// Cross the edge in its own direction.
    ///
    /// `Ok(None)` means no mode, including walking a bicycle, can cross it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeWeight`] if the computed weight is negative,
    /// which points at broken options or effective lengths.
    fn traverse(
        &self,
        state: &TraversalState,
        options: &TraverseOptions,
    ) -> Result<Option<TraversalResult<'_>>, Error>;

    /// Cross the edge while searching backwards from the destination. The
    /// weight equals the forward weight, time runs backwards.
    ///
    /// # Errors
    ///
    /// Same as [`StreetTraversal::traverse`]
    fn traverse_back(
        &self,
        state: &TraversalState,
        options: &TraverseOptions,
    ) -> Result<Option<TraversalResult<'_>>, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl StreetTraversal for StreetSegment {
    fn can_traverse(&self, options: &TraverseOptions) -> bool {
        if options.wheelchair_accessible {
            if !self.is_wheelchair_accessible() {
                return false;
            }
            if self.max_slope() > options.max_slope {
                return false;
            }
        }

        options
            .modes
            .iter()
            .any(|mode| self.permission().allows_mode(mode))
    }

    fn traverse(
        &self,
        state: &TraversalState,
        options: &TraverseOptions,
    ) -> Result<Option<TraversalResult<'_>>, Error> {
        traverse_segment(self, state, options, Direction::Forward, false)
    }

    fn traverse_back(
        &self,
        state: &TraversalState,
        options: &TraverseOptions,
    ) -> Result<Option<TraversalResult<'_>>, Error> {
        traverse_segment(self, state, options, Direction::Backward, false)
    }
}

fn traverse_segment<'a>(
    segment: &'a StreetSegment,
    state: &TraversalState,
    options: &TraverseOptions,
    direction: Direction,
    dismounted: bool,
) -> Result<Option<TraversalResult<'a>>, Error> {
    if !segment.can_traverse(options) {
        return walk_bike(segment, state, options, direction, dismounted);
    }

    let length = segment.length();
    let time = length / options.speed;

    let strategy = WeightStrategy::select(options);
    let walk_factor = options.distance_walk_factor(state.walk_distance + length / 2.0);
    let weight = strategy.base_weight(segment, options) * walk_factor * options.walk_reluctance;

    if walk_factor.is_nan() || walk_factor < 0.0 || weight.is_nan() || weight < 0.0 {
        error!(
            "Negative weight {weight} on '{}' with {strategy:?} \
             (speed {}, walk factor {walk_factor}, reluctance {})",
            segment.name(),
            options.speed,
            options.walk_reluctance
        );
        return Err(Error::NegativeWeight {
            weight,
            segment: segment.name().to_string(),
        });
    }

    let rounded = time.round();
    #[allow(clippy::cast_precision_loss)]
    let limit = Time::MAX as f64;
    if !(rounded.is_finite() && rounded < limit) {
        return Err(time_overflow(segment, state));
    }
    #[allow(clippy::cast_possible_truncation)]
    let seconds = rounded as Time;
    let seconds = match direction {
        Direction::Forward => seconds,
        Direction::Backward => -seconds,
    };
    let next = state
        .advanced(length, seconds)
        .ok_or_else(|| time_overflow(segment, state))?;

    let mode = if dismounted {
        TraverseMode::Walk
    } else {
        crossing_mode(segment.permission(), options)
    };

    Ok(Some(TraversalResult {
        weight,
        state: next,
        segment,
        mode,
    }))
}

fn time_overflow(segment: &StreetSegment, state: &TraversalState) -> Error {
    error!(
        "Clock overflow crossing '{}' from time {}",
        segment.name(),
        state.time
    );
    Error::TimeOverflow {
        time: state.time,
        segment: segment.name().to_string(),
    }
}

/// Walk the bicycle across a segment closed to cycling
fn walk_bike<'a>(
    segment: &'a StreetSegment,
    state: &TraversalState,
    options: &TraverseOptions,
    direction: Direction,
    dismounted: bool,
) -> Result<Option<TraversalResult<'a>>, Error> {
    if dismounted || !options.modes.contains(TraverseMode::Bicycle) {
        trace!("'{}' cannot be traversed with {:?}", segment.name(), options.modes);
        return Ok(None);
    }

    trace!("Walking bicycle across '{}'", segment.name());
    let walking = options.walking_options();
    traverse_segment(segment, state, &walking, direction, true)
}

fn crossing_mode(permission: StreetTraversalPermission, options: &TraverseOptions) -> TraverseMode {
    [TraverseMode::Car, TraverseMode::Bicycle, TraverseMode::Walk]
        .into_iter()
        .find(|mode| options.modes.contains(*mode) && permission.allows_mode(*mode))
        .unwrap_or(TraverseMode::Walk)
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;
    use crate::{OptimizeType, TraverseModeSet, WalkFactor};

    fn segment(length: f64, permission: StreetTraversalPermission) -> StreetSegment {
        StreetSegment::new(
            line_string![(x: 0.0, y: 0.0), (x: length, y: 0.0)],
            "Elm Street",
            length,
            permission,
            false,
        )
        .unwrap()
    }

    fn bike(optimize_for: OptimizeType, speed: f64) -> TraverseOptions {
        TraverseOptions::new(TraverseModeSet::from(TraverseMode::Bicycle))
            .with_optimize_for(optimize_for)
            .with_speed(speed)
    }

    #[test]
    fn wheelchair_blocks_inaccessible_segment() {
        let mut s = segment(50.0, StreetTraversalPermission::ALL);
        s.set_wheelchair_accessible(false);
        let options = TraverseOptions::default().with_wheelchair(0.08);
        assert!(!s.can_traverse(&options));
        assert!(s.can_traverse(&TraverseOptions::default()));
    }

    #[test]
    fn permission_needs_one_matching_mode() {
        let s = segment(50.0, StreetTraversalPermission::CAR);
        let walk = TraverseOptions::default();
        assert!(!s.can_traverse(&walk));
        let walk_or_drive = TraverseOptions::new(
            TraverseModeSet::from(TraverseMode::Walk).with(TraverseMode::Car),
        );
        assert!(s.can_traverse(&walk_or_drive));
    }

    #[test]
    fn walking_weight_is_time() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default()
            .with_speed(2.0)
            .with_walk_reluctance(3.0);
        let result = s
            .traverse(&TraversalState::new(0), &options)
            .unwrap()
            .unwrap();
        assert_eq!(result.weight, 150.0);
        assert_eq!(result.state.time, 50);
        assert_eq!(result.state.walk_distance, 100.0);
        assert_eq!(result.mode, TraverseMode::Walk);
        assert!(std::ptr::eq(result.segment, &s));
    }

    #[test]
    fn flat_uses_slope_cost_without_speed() {
        let mut s = segment(100.0, StreetTraversalPermission::BICYCLE);
        s.set_slope_cost_effective_length(130.0).unwrap();
        let result = s
            .traverse(&TraversalState::default(), &bike(OptimizeType::Flat, 5.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.weight, 130.0);
        assert_eq!(result.state.time, 20);
        assert_eq!(result.mode, TraverseMode::Bicycle);
    }

    #[test]
    fn quick_uses_slope_speed_length() {
        let mut s = segment(100.0, StreetTraversalPermission::BICYCLE);
        s.set_slope_speed_effective_length(150.0).unwrap();
        let result = s
            .traverse(&TraversalState::default(), &bike(OptimizeType::Quick, 5.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.weight, 30.0);
    }

    #[test]
    fn walk_factor_sampled_at_midpoint() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default()
            .with_speed(1.0)
            .with_walk_factor(WalkFactor::custom(|d| d / 100.0));
        let state = TraversalState {
            walk_distance: 150.0,
            time: 0,
        };
        let result = s.traverse(&state, &options).unwrap().unwrap();
        // factor at 150 + 50 = 2.0
        assert!((result.weight - 200.0).abs() < 1e-9);
    }

    #[test]
    fn time_is_rounded() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default().with_speed(3.0);
        let forward = s
            .traverse(&TraversalState::default(), &options)
            .unwrap()
            .unwrap();
        assert_eq!(forward.state.time, 33);
        let options = TraverseOptions::default().with_speed(8.0);
        let forward = s
            .traverse(&TraversalState::default(), &options)
            .unwrap()
            .unwrap();
        assert_eq!(forward.state.time, 13);
    }

    #[test]
    fn backward_runs_time_backwards() {
        let s = segment(120.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default().with_speed(1.5);
        let start = TraversalState::new(1000);
        let forward = s.traverse(&start, &options).unwrap().unwrap();
        let backward = s.traverse_back(&start, &options).unwrap().unwrap();
        assert_eq!(forward.state.time, 1080);
        assert_eq!(backward.state.time, 920);
        assert_eq!(forward.weight, backward.weight);
    }

    #[test]
    fn bicycle_is_walked_across_pedestrian_segment() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = bike(OptimizeType::Safe, 5.0)
            .with_walking_options(TraverseOptions::default().with_speed(1.25));
        let result = s
            .traverse(&TraversalState::default(), &options)
            .unwrap()
            .unwrap();
        assert_eq!(result.weight, 80.0);
        assert_eq!(result.state.time, 80);
        assert_eq!(result.mode, TraverseMode::Walk);
    }

    #[test]
    fn dismounting_happens_once() {
        let s = segment(100.0, StreetTraversalPermission::CAR);
        let options = bike(OptimizeType::Quick, 5.0).with_walking_options(TraverseOptions::new(
            TraverseModeSet::from(TraverseMode::Bicycle),
        ));
        assert!(
            s.traverse(&TraversalState::default(), &options)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn negative_walk_factor_is_fatal() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default().with_walk_factor(WalkFactor::custom(|_| -2.0));
        let result = s.traverse(&TraversalState::default(), &options);
        assert!(matches!(result, Err(Error::NegativeWeight { .. })));
    }

    #[test]
    fn nan_walk_factor_is_fatal() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options =
            TraverseOptions::default().with_walk_factor(WalkFactor::custom(|_| f64::NAN));
        let result = s.traverse_back(&TraversalState::default(), &options);
        assert!(matches!(result, Err(Error::NegativeWeight { .. })));
    }

    #[test]
    fn negative_factor_on_zero_length_weight_is_fatal() {
        let mut s = segment(100.0, StreetTraversalPermission::BICYCLE);
        s.set_slope_cost_effective_length(0.0).unwrap();
        let options =
            bike(OptimizeType::Flat, 5.0).with_walk_factor(WalkFactor::custom(|_| -1.0));
        let result = s.traverse(&TraversalState::default(), &options);
        assert!(matches!(result, Err(Error::NegativeWeight { .. })));
    }

    #[test]
    fn huge_travel_time_is_an_error() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default().with_speed(1e-300);
        assert!(options.validate().is_ok());
        let result = s.traverse(&TraversalState::new(10), &options);
        assert!(matches!(result, Err(Error::TimeOverflow { time: 10, .. })));
    }

    #[test]
    fn clock_overflow_is_an_error() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default().with_speed(1.0);
        let forward = s.traverse(&TraversalState::new(Time::MAX - 10), &options);
        assert!(matches!(forward, Err(Error::TimeOverflow { .. })));
        let backward = s.traverse_back(&TraversalState::new(Time::MIN + 10), &options);
        assert!(matches!(backward, Err(Error::TimeOverflow { .. })));
    }

    #[test]
    fn negative_weight_is_fatal() {
        let s = segment(100.0, StreetTraversalPermission::PEDESTRIAN);
        let options = TraverseOptions::default().with_walk_reluctance(-1.0);
        let result = s.traverse(&TraversalState::default(), &options);
        assert!(matches!(result, Err(Error::NegativeWeight { .. })));
    }
}
