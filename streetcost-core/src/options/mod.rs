//! Traveler configuration consumed by the per-edge cost model

mod config;
mod modes;
mod walk_factor;

pub use modes::{OptimizeType, TraverseMode, TraverseModeSet};
pub use walk_factor::WalkFactor;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_SLOPE, DEFAULT_WALK_SPEED, Error};

/// Parameters of one search request.
///
/// Read-only during a search and shared by every segment it visits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraverseOptions {
    /// Enabled travel modes
    pub modes: TraverseModeSet,
    /// Only wheelchair accessible segments may be used
    pub wheelchair_accessible: bool,
    /// Steepest grade tolerated when `wheelchair_accessible` is set
    pub max_slope: f64,
    pub optimize_for: OptimizeType,
    /// Travel speed in meters per second
    pub speed: f64,
    /// Speed used when a bicycle has to be walked
    pub walk_speed: f64,
    pub walk_reluctance: f64,
    /// Reluctance as a function of the distance walked so far
    pub walk_factor: WalkFactor,
    /// Configuration used when walking a bicycle across a segment closed to
    /// cycling. Derived from this configuration when absent.
    pub walking_options: Option<Box<TraverseOptions>>,
}

impl Default for TraverseOptions {
    fn default() -> Self {
        Self {
            modes: TraverseModeSet::from(TraverseMode::Walk),
            wheelchair_accessible: false,
            max_slope: DEFAULT_MAX_SLOPE,
            optimize_for: OptimizeType::Quick,
            speed: DEFAULT_WALK_SPEED,
            walk_speed: DEFAULT_WALK_SPEED,
            walk_reluctance: 1.0,
            walk_factor: WalkFactor::default(),
            walking_options: None,
        }
    }
}

impl TraverseOptions {
    pub fn new(modes: TraverseModeSet) -> Self {
        Self {
            modes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_modes(mut self, modes: TraverseModeSet) -> Self {
        self.modes = modes;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_optimize_for(mut self, optimize_for: OptimizeType) -> Self {
        self.optimize_for = optimize_for;
        self
    }

    #[must_use]
    pub fn with_wheelchair(mut self, max_slope: f64) -> Self {
        self.wheelchair_accessible = true;
        self.max_slope = max_slope;
        self
    }

    #[must_use]
    pub fn with_walk_reluctance(mut self, walk_reluctance: f64) -> Self {
        self.walk_reluctance = walk_reluctance;
        self
    }

    #[must_use]
    pub fn with_walk_factor(mut self, walk_factor: WalkFactor) -> Self {
        self.walk_factor = walk_factor;
        self
    }

    #[must_use]
    pub fn with_walking_options(mut self, walking: TraverseOptions) -> Self {
        self.walking_options = Some(Box::new(walking));
        self
    }

    /// Reluctance multiplier after walking `walk_distance` meters
    pub fn distance_walk_factor(&self, walk_distance: f64) -> f64 {
        self.walk_factor.factor(walk_distance)
    }

    /// Configuration for walking a bicycle
    pub fn walking_options(&self) -> Cow<'_, TraverseOptions> {
        match &self.walking_options {
            Some(walking) => Cow::Borrowed(walking.as_ref()),
            None => Cow::Owned(Self {
                modes: TraverseModeSet::from(TraverseMode::Walk),
                optimize_for: OptimizeType::Quick,
                speed: self.walk_speed,
                walking_options: None,
                ..self.clone()
            }),
        }
    }

    /// Check that every weight computed with these options is non-negative
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the offending parameter
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !(self.walk_speed.is_finite() && self.walk_speed > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "walk_speed must be positive, got {}",
                self.walk_speed
            )));
        }
        if !(self.walk_reluctance.is_finite() && self.walk_reluctance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "walk_reluctance must be non-negative, got {}",
                self.walk_reluctance
            )));
        }
        if !(self.max_slope.is_finite() && self.max_slope >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_slope must be non-negative, got {}",
                self.max_slope
            )));
        }
        self.walk_factor.validate()?;

        if let Some(walking) = &self.walking_options {
            if walking.modes.contains(TraverseMode::Bicycle) {
                return Err(Error::InvalidConfig(
                    "walking options must not enable bicycle mode".to_string(),
                ));
            }
            walking.validate()?;
        }
        Ok(())
    }
}
