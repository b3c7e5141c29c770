use log::info;
use rayon::prelude::*;

use crate::model::{ElevationProfile, ElevationUpdate, SlopeCostModel};
use crate::{Error, StreetSegment};

/// Attach elevation profiles to segments in parallel.
///
/// `profiles[i]` belongs to `segments[i]`; `None` leaves a segment untouched.
/// Each segment is updated as by
/// [`StreetSegment::set_elevation_profile_with_speed`].
/// Returns the number of segments whose slope data changed.
///
/// # Errors
///
/// Returns an error if the slices differ in length or any segment rejects its
/// derived values. No segment is modified then.
pub fn apply_elevation_profiles(
    segments: &mut [StreetSegment],
    profiles: Vec<Option<ElevationProfile>>,
    model: &dyn SlopeCostModel,
) -> Result<usize, Error> {
    if segments.len() != profiles.len() {
        return Err(Error::InvalidData(format!(
            "Got {} elevation profiles for {} segments",
            profiles.len(),
            segments.len()
        )));
    }

    // Check everything first so a rejected profile leaves every segment as it was
    let updates = segments
        .par_iter()
        .zip(profiles.into_par_iter())
        .map(|(segment, profile)| {
            profile
                .map(|profile| segment.prepare_elevation(profile, model))
                .transpose()
        })
        .collect::<Result<Vec<Option<ElevationUpdate>>, Error>>()?;

    let updated = segments
        .par_iter_mut()
        .zip(updates.into_par_iter())
        .filter_map(|(segment, update)| {
            update.and_then(|update| segment.apply_elevation(update, true))
        })
        .count();

    info!(
        "Derived slope costs for {updated} of {} street segments",
        segments.len()
    );
    Ok(updated)
}
