pub use crate::{DEFAULT_MAX_SLOPE, DEFAULT_WALK_SPEED};

// Street segment and its build-time data
pub use crate::model::{
    ElevationProfile, GradeCostModel, SlopeCostModel, SlopeCosts, StreetSegment,
    StreetTraversalPermission,
};

// Traveler configuration
pub use crate::options::{OptimizeType, TraverseMode, TraverseModeSet, TraverseOptions, WalkFactor};

// Per-edge traversal
pub use crate::routing::{StreetTraversal, TraversalResult, TraversalState, WeightStrategy};

// Build-time batch operations
pub use crate::loading::apply_elevation_profiles;

pub use crate::Distance;
pub use crate::Error;
pub use crate::Time; // seconds
