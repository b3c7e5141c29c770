use crate::{OptimizeType, StreetSegment, TraverseMode, TraverseOptions};

/// How the base weight of a segment is computed, before reluctance scaling.
///
/// Selected from the (wheelchair, bicycle, criterion) combination of the
/// traverse options; see [`WeightStrategy::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightStrategy {
    /// Slope adjusted travel time. Wheelchair users and quick cycling.
    SlopeSpeed,
    /// Time over the bicycle safety adjusted length
    BicycleSafety,
    /// Slope cost length used as the weight directly, without dividing by speed
    SlopeCost,
    /// Reserved for greenway preference. Plain cycling time until greenway
    /// data is attached to segments.
    GreenwayPreference,
    /// Plain cycling time for criteria without a street level model
    BicycleTime,
    /// Plain travel time for walking and driving
    TravelTime,
}

impl WeightStrategy {
    pub fn select(options: &TraverseOptions) -> Self {
        let bicycle = options.modes.contains(TraverseMode::Bicycle);
        match (options.wheelchair_accessible, bicycle, options.optimize_for) {
            (true, _, _) => WeightStrategy::SlopeSpeed,
            (false, true, OptimizeType::Safe) => WeightStrategy::BicycleSafety,
            (false, true, OptimizeType::Flat) => WeightStrategy::SlopeCost,
            (false, true, OptimizeType::Quick) => WeightStrategy::SlopeSpeed,
            (false, true, OptimizeType::Greenways) => WeightStrategy::GreenwayPreference,
            (false, true, OptimizeType::Transfers) => WeightStrategy::BicycleTime,
            (false, false, _) => WeightStrategy::TravelTime,
        }
    }

    /// Weight of `segment` before reluctance is applied
    pub fn base_weight(self, segment: &StreetSegment, options: &TraverseOptions) -> f64 {
        match self {
            WeightStrategy::SlopeSpeed => segment.slope_speed_effective_length() / options.speed,
            WeightStrategy::BicycleSafety => {
                segment.bicycle_safety_effective_length() / options.speed
            }
            WeightStrategy::SlopeCost => segment.slope_cost_effective_length(),
            WeightStrategy::GreenwayPreference
            | WeightStrategy::BicycleTime
            | WeightStrategy::TravelTime => segment.length() / options.speed,
        }
    }
}
