use serde::{Deserialize, Serialize};

use crate::{Distance, Time};

/// Running totals of one candidate path.
///
/// A plain value: advancing a state returns a new one, so branches of the
/// search never observe each other's totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TraversalState {
    /// Meters walked (or ridden) so far
    pub walk_distance: Distance,
    /// Clock time in seconds
    pub time: Time,
}

impl TraversalState {
    pub fn new(time: Time) -> Self {
        Self {
            walk_distance: 0.0,
            time,
        }
    }

    /// State after covering `distance` meters in `seconds` (negative when
    /// exploring backwards). `None` if the clock leaves the `Time` range.
    #[must_use]
    pub fn advanced(self, distance: Distance, seconds: Time) -> Option<Self> {
        Some(Self {
            walk_distance: self.walk_distance + distance,
            time: self.time.checked_add(seconds)?,
        })
    }
}
