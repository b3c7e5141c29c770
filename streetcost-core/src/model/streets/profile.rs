//! Elevation samples along a street segment

use geo::Coord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Ordered elevation samples along a segment.
///
/// `x` is the distance along the segment and `y` the elevation, both in
/// meters. Samples are sorted by `x` (non-decreasing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct ElevationProfile {
    samples: Vec<Coord<f64>>,
}

impl ElevationProfile {
    /// Build a profile from `(distance, elevation)` samples
    ///
    /// # Errors
    ///
    /// Returns an error if a sample is not finite or distances decrease
    pub fn new(samples: Vec<Coord<f64>>) -> Result<Self, Error> {
        if let Some(bad) = samples
            .iter()
            .find(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(Error::InvalidData(format!(
                "Elevation sample ({}, {}) is not finite",
                bad.x, bad.y
            )));
        }
        if let Some((a, b)) = samples.iter().tuple_windows().find(|(a, b)| b.x < a.x) {
            return Err(Error::InvalidData(format!(
                "Elevation profile distances must not decrease ({} followed by {})",
                a.x, b.x
            )));
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Coord<f64>] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<Coord<f64>> {
        self.samples.first().copied()
    }

    pub fn last(&self) -> Option<Coord<f64>> {
        self.samples.last().copied()
    }

    /// Profile reduced to its first and last sample, with their original `x`.
    /// Profiles with fewer than two samples are returned unchanged.
    #[must_use]
    pub fn endpoints(&self) -> Self {
        match (self.samples.as_slice(), self.first(), self.last()) {
            ([_, _, _, ..], Some(first), Some(last)) => Self {
                samples: vec![first, last],
            },
            _ => self.clone(),
        }
    }

    /// Samples with `start <= x <= end`, shifted so that `start` becomes zero.
    ///
    /// An inverted range yields an empty profile. Callers clamp the range to
    /// the segment; see [`crate::StreetSegment::profile_slice`].
    #[must_use]
    pub fn slice(&self, start: f64, end: f64) -> Self {
        let samples = self
            .samples
            .iter()
            .filter(|c| c.x >= start && c.x <= end)
            .map(|c| Coord {
                x: c.x - start,
                y: c.y,
            })
            .collect();
        Self { samples }
    }
}

impl TryFrom<Vec<(f64, f64)>> for ElevationProfile {
    type Error = Error;

    fn try_from(pairs: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Self::new(pairs.into_iter().map(Coord::from).collect())
    }
}

impl From<ElevationProfile> for Vec<(f64, f64)> {
    fn from(profile: ElevationProfile) -> Self {
        profile.samples.into_iter().map(|c| (c.x, c.y)).collect()
    }
}
