//! Data model for street segments
//!
//! Contains the segment itself together with the build-time data attached to
//! it: travel permissions, elevation profiles and the slope cost model.

pub mod streets;

pub use streets::components::{ElevationUpdate, StreetSegment};
pub use streets::permission::StreetTraversalPermission;
pub use streets::profile::ElevationProfile;
pub use streets::slope::{GradeCostModel, SlopeCostModel, SlopeCosts};
