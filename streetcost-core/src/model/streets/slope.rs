//! Slope-dependent effective lengths derived from an elevation profile

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::profile::ElevationProfile;

/// Length equivalents derived from an elevation profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeCosts {
    /// Length penalized by the work of climbing and descending
    pub slope_cost_effective_length: f64,
    /// Length adjusted for the speed change on slopes
    pub slope_speed_effective_length: f64,
    /// Steepest absolute grade along the profile
    pub max_slope: f64,
}

/// Turns an elevation profile into slope-adjusted lengths.
///
/// `label` names the profile's owner in diagnostics.
pub trait SlopeCostModel: Send + Sync {
    fn slope_costs(&self, profile: &ElevationProfile, label: &str) -> SlopeCosts;
}

/// Grade based cost model.
///
/// Each piece between two samples costs `run * (1 + grade_penalty * slope²)`
/// and its speed length follows Tobler's hiking function normalized to flat
/// ground. Grades steeper than `max_plausible_slope` are elevation model
/// artifacts (bridges, tunnels) and count as flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeCostModel {
    pub grade_penalty: f64,
    pub max_plausible_slope: f64,
}

impl Default for GradeCostModel {
    fn default() -> Self {
        Self {
            grade_penalty: 10.0,
            max_plausible_slope: 0.35,
        }
    }
}

impl GradeCostModel {
    /// Walking speed on `slope` relative to flat ground
    fn tobler_ratio(slope: f64) -> f64 {
        (-3.5 * ((slope + 0.05).abs() - 0.05)).exp()
    }
}

impl SlopeCostModel for GradeCostModel {
    fn slope_costs(&self, profile: &ElevationProfile, label: &str) -> SlopeCosts {
        let mut costs = SlopeCosts {
            slope_cost_effective_length: 0.0,
            slope_speed_effective_length: 0.0,
            max_slope: 0.0,
        };

        for (a, b) in profile.samples().iter().tuple_windows() {
            let run = b.x - a.x;
            if run <= 0.0 {
                continue;
            }
            let mut slope = (b.y - a.y) / run;
            if slope.abs() > self.max_plausible_slope {
                log::warn!(
                    "Slope {slope:.3} on '{label}' at {:.1}m exceeds {:.2}, treating it as flat",
                    a.x,
                    self.max_plausible_slope
                );
                slope = 0.0;
            }

            costs.max_slope = costs.max_slope.max(slope.abs());
            costs.slope_cost_effective_length += run * (1.0 + self.grade_penalty * slope * slope);
            costs.slope_speed_effective_length += run / Self::tobler_ratio(slope);
        }

        costs
    }
}
