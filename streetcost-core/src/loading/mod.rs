//! Build-time operations that attach derived data to street segments
//! before they are handed to searches.

mod elevation;

pub use elevation::apply_elevation_profiles;
