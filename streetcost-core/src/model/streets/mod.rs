//! Street network model

pub mod components;
pub mod permission;
pub mod profile;
pub mod slope;

pub use components::{ElevationUpdate, StreetSegment};
pub use permission::StreetTraversalPermission;
pub use profile::ElevationProfile;
pub use slope::{GradeCostModel, SlopeCostModel, SlopeCosts};
