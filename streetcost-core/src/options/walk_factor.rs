use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Walk reluctance as a function of the distance already walked.
///
/// The factor is evaluated at the midpoint of each segment, so it grows with
/// fatigue along a long walk. Outputs must be non-negative; a custom function
/// breaking that makes traversal fail with [`Error::NegativeWeight`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WalkFactor {
    Constant { factor: f64 },
    /// No penalty up to `max_walk_distance`, then a linear increase of
    /// `overage_reluctance` per `max_walk_distance` walked beyond it
    Limited {
        max_walk_distance: f64,
        overage_reluctance: f64,
    },
    #[serde(skip)]
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Default for WalkFactor {
    fn default() -> Self {
        WalkFactor::Constant { factor: 1.0 }
    }
}

impl WalkFactor {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        WalkFactor::Custom(Arc::new(f))
    }

    pub fn factor(&self, walk_distance: f64) -> f64 {
        match self {
            WalkFactor::Constant { factor } => *factor,
            WalkFactor::Limited {
                max_walk_distance,
                overage_reluctance,
            } => {
                if walk_distance <= *max_walk_distance {
                    1.0
                } else {
                    1.0 + overage_reluctance * (walk_distance - max_walk_distance)
                        / max_walk_distance
                }
            }
            WalkFactor::Custom(f) => f(walk_distance),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        match self {
            WalkFactor::Constant { factor } if !(factor.is_finite() && *factor >= 0.0) => Err(
                Error::InvalidConfig(format!("walk factor must be non-negative, got {factor}")),
            ),
            WalkFactor::Limited {
                max_walk_distance,
                overage_reluctance,
            } if !(max_walk_distance.is_finite()
                && *max_walk_distance > 0.0
                && overage_reluctance.is_finite()
                && *overage_reluctance >= 0.0) =>
            {
                Err(Error::InvalidConfig(format!(
                    "walk factor limit {max_walk_distance} with reluctance \
                     {overage_reluctance} is invalid"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for WalkFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkFactor::Constant { factor } => {
                f.debug_struct("Constant").field("factor", factor).finish()
            }
            WalkFactor::Limited {
                max_walk_distance,
                overage_reluctance,
            } => f
                .debug_struct("Limited")
                .field("max_walk_distance", max_walk_distance)
                .field("overage_reluctance", overage_reluctance)
                .finish(),
            WalkFactor::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
