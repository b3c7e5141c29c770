//! Per-edge cost model for multimodal street routing.
//!
//! A [`StreetSegment`] decides whether a traveler configured by
//! [`TraverseOptions`] may cross it and, if so, at what weight. The shortest
//! path search consuming these weights lives outside this crate.

pub mod error;
pub mod loading;
pub mod model;
pub mod options;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{
    ElevationProfile, GradeCostModel, SlopeCostModel, SlopeCosts, StreetSegment,
    StreetTraversalPermission,
};
pub use options::{OptimizeType, TraverseMode, TraverseModeSet, TraverseOptions, WalkFactor};
pub use routing::{StreetTraversal, TraversalResult, TraversalState, WeightStrategy};

/// Signed clock time in seconds. Decreases when a path is explored backwards.
pub type Time = i64;

/// Distance along the street network in meters
pub type Distance = f64;

/// Default walking speed in meters per second
pub const DEFAULT_WALK_SPEED: f64 = 1.33;

/// Steepest grade a wheelchair user is assumed to handle (1:12 ramp)
pub const DEFAULT_MAX_SLOPE: f64 = 0.083_333_333_333;
