//! Street segment - the edge the per-edge cost model is evaluated on

use geo::LineString;
use log::debug;

use super::permission::StreetTraversalPermission;
use super::profile::ElevationProfile;
use super::slope::{SlopeCostModel, SlopeCosts};
use crate::Error;

/// Street graph edge (street segment)
///
/// Built once while the graph is constructed, read-only afterwards and safe
/// to share between concurrent searches.
#[derive(Debug, Clone)]
pub struct StreetSegment {
    /// Build-time identifier, not used for routing
    id: Option<String>,
    name: String,
    geometry: LineString<f64>,
    /// Physical length in meters
    length: f64,
    permission: StreetTraversalPermission,
    wheelchair_accessible: bool,
    /// Steepest absolute grade, zero until an elevation profile is attached
    max_slope: f64,
    slope_speed_effective_length: f64,
    bicycle_safety_effective_length: f64,
    slope_cost_effective_length: f64,
    elevation_profile: Option<ElevationProfile>,
    crossable: bool,
    slope_override: bool,
    /// Reverse half of a bidirectional pair
    back: bool,
}

impl StreetSegment {
    /// # Errors
    ///
    /// Returns an error if `length` is not a positive finite number
    pub fn new(
        geometry: LineString<f64>,
        name: impl Into<String>,
        length: f64,
        permission: StreetTraversalPermission,
        back: bool,
    ) -> Result<Self, Error> {
        let name = name.into();
        if !(length.is_finite() && length > 0.0) {
            return Err(Error::InvalidData(format!(
                "Segment '{name}' must have a positive length, got {length}"
            )));
        }

        Ok(Self {
            id: None,
            name,
            geometry,
            length,
            permission,
            wheelchair_accessible: true,
            max_slope: 0.0,
            slope_speed_effective_length: length,
            bicycle_safety_effective_length: length,
            slope_cost_effective_length: length,
            elevation_profile: None,
            crossable: true,
            slope_override: false,
            back,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn permission(&self) -> StreetTraversalPermission {
        self.permission
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.wheelchair_accessible
    }

    pub fn max_slope(&self) -> f64 {
        self.max_slope
    }

    pub fn slope_speed_effective_length(&self) -> f64 {
        self.slope_speed_effective_length
    }

    pub fn bicycle_safety_effective_length(&self) -> f64 {
        self.bicycle_safety_effective_length
    }

    pub fn slope_cost_effective_length(&self) -> f64 {
        self.slope_cost_effective_length
    }

    pub fn elevation_profile(&self) -> Option<&ElevationProfile> {
        self.elevation_profile.as_ref()
    }

    pub fn is_crossable(&self) -> bool {
        self.crossable
    }

    pub fn slope_override(&self) -> bool {
        self.slope_override
    }

    pub fn is_back(&self) -> bool {
        self.back
    }

    /// Elevation between `start` and `end` meters along the segment, with
    /// distances measured from `start`. The range is clamped to the segment.
    pub fn profile_slice(&self, start: f64, end: f64) -> Option<ElevationProfile> {
        let profile = self.elevation_profile.as_ref()?;
        Some(profile.slice(start.max(0.0), end.min(self.length)))
    }
}

/// Elevation data checked against a segment, see
/// [`StreetSegment::prepare_elevation`]
#[derive(Debug, Clone)]
pub struct ElevationUpdate {
    profile: ElevationProfile,
    costs: Option<SlopeCosts>,
}

impl ElevationUpdate {
    pub fn profile(&self) -> &ElevationProfile {
        &self.profile
    }

    pub fn costs(&self) -> Option<SlopeCosts> {
        self.costs
    }
}

// Graph build phase setters
impl StreetSegment {
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn set_permission(&mut self, permission: StreetTraversalPermission) {
        self.permission = permission;
    }

    pub fn set_wheelchair_accessible(&mut self, wheelchair_accessible: bool) {
        self.wheelchair_accessible = wheelchair_accessible;
    }

    pub fn set_crossable(&mut self, crossable: bool) {
        self.crossable = crossable;
    }

    /// Only keep the endpoints of elevation profiles attached from now on
    pub fn set_slope_override(&mut self, slope_override: bool) {
        self.slope_override = slope_override;
    }

    /// # Errors
    ///
    /// Returns an error if `length` is negative or not finite
    pub fn set_slope_speed_effective_length(&mut self, length: f64) -> Result<(), Error> {
        self.slope_speed_effective_length = self.checked_effective_length("slope speed", length)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `length` is negative or not finite
    pub fn set_bicycle_safety_effective_length(&mut self, length: f64) -> Result<(), Error> {
        self.bicycle_safety_effective_length =
            self.checked_effective_length("bicycle safety", length)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `length` is negative or not finite
    pub fn set_slope_cost_effective_length(&mut self, length: f64) -> Result<(), Error> {
        self.slope_cost_effective_length = self.checked_effective_length("slope cost", length)?;
        Ok(())
    }

    /// Attach an elevation profile and derive the slope cost length and the
    /// maximum slope from it.
    ///
    /// With slope override set only the first and last sample are kept.
    /// Profiles with fewer than two samples are stored without deriving
    /// anything. Returns the derived costs.
    ///
    /// # Errors
    ///
    /// Returns an error if the model produces a negative or non-finite value.
    /// The segment is left unchanged in that case.
    pub fn set_elevation_profile(
        &mut self,
        profile: ElevationProfile,
        model: &dyn SlopeCostModel,
    ) -> Result<Option<SlopeCosts>, Error> {
        let update = self.prepare_elevation(profile, model)?;
        Ok(self.apply_elevation(update, false))
    }

    /// Like [`StreetSegment::set_elevation_profile`], also replacing the slope
    /// speed length with the one derived by `model`.
    ///
    /// # Errors
    ///
    /// Same as [`StreetSegment::set_elevation_profile`]
    pub fn set_elevation_profile_with_speed(
        &mut self,
        profile: ElevationProfile,
        model: &dyn SlopeCostModel,
    ) -> Result<Option<SlopeCosts>, Error> {
        let update = self.prepare_elevation(profile, model)?;
        Ok(self.apply_elevation(update, true))
    }

    /// Run `model` over `profile` and check every derived value without
    /// touching the segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the model produces a negative or non-finite value
    pub fn prepare_elevation(
        &self,
        profile: ElevationProfile,
        model: &dyn SlopeCostModel,
    ) -> Result<ElevationUpdate, Error> {
        let profile = if self.slope_override {
            debug!(
                "Slope override on '{}': keeping 2 of {} elevation samples",
                self.name,
                profile.len()
            );
            profile.endpoints()
        } else {
            profile
        };

        if profile.len() < 2 {
            debug!(
                "Elevation profile of '{}' has {} samples, slope costs unchanged",
                self.name,
                profile.len()
            );
            return Ok(ElevationUpdate {
                profile,
                costs: None,
            });
        }

        let costs = model.slope_costs(&profile, &self.name);
        self.checked_effective_length("slope cost", costs.slope_cost_effective_length)?;
        self.checked_effective_length("slope speed", costs.slope_speed_effective_length)?;
        if !(costs.max_slope.is_finite() && costs.max_slope >= 0.0) {
            return Err(Error::InvalidData(format!(
                "Segment '{}' got invalid max slope {}",
                self.name, costs.max_slope
            )));
        }

        Ok(ElevationUpdate {
            profile,
            costs: Some(costs),
        })
    }

    /// Commit a checked update. Returns the derived costs, if any.
    pub fn apply_elevation(
        &mut self,
        update: ElevationUpdate,
        with_speed: bool,
    ) -> Option<SlopeCosts> {
        if let Some(costs) = update.costs {
            self.slope_cost_effective_length = costs.slope_cost_effective_length;
            self.max_slope = costs.max_slope;
            if with_speed {
                self.slope_speed_effective_length = costs.slope_speed_effective_length;
            }
        }
        self.elevation_profile = Some(update.profile);
        update.costs
    }

    fn checked_effective_length(&self, kind: &str, length: f64) -> Result<f64, Error> {
        if length.is_finite() && length >= 0.0 {
            Ok(length)
        } else {
            Err(Error::InvalidData(format!(
                "Segment '{}' got invalid {kind} effective length {length}",
                self.name
            )))
        }
    }
}
