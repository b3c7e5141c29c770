//! Which travel modes may use a street segment

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, TraverseMode};

/// Set of travel modes allowed on a segment, stored as a bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreetTraversalPermission(u8);

impl StreetTraversalPermission {
    pub const NONE: Self = Self(0);
    pub const PEDESTRIAN: Self = Self(1);
    pub const BICYCLE: Self = Self(1 << 1);
    pub const PEDESTRIAN_AND_BICYCLE: Self = Self(Self::PEDESTRIAN.0 | Self::BICYCLE.0);
    pub const CAR: Self = Self(1 << 2);
    pub const PEDESTRIAN_AND_CAR: Self = Self(Self::PEDESTRIAN.0 | Self::CAR.0);
    pub const BICYCLE_AND_CAR: Self = Self(Self::BICYCLE.0 | Self::CAR.0);
    pub const ALL: Self = Self(Self::PEDESTRIAN.0 | Self::BICYCLE.0 | Self::CAR.0);

    const NAMES: [(&'static str, Self); 8] = [
        ("none", Self::NONE),
        ("pedestrian", Self::PEDESTRIAN),
        ("bicycle", Self::BICYCLE),
        ("pedestrian_and_bicycle", Self::PEDESTRIAN_AND_BICYCLE),
        ("car", Self::CAR),
        ("pedestrian_and_car", Self::PEDESTRIAN_AND_CAR),
        ("bicycle_and_car", Self::BICYCLE_AND_CAR),
        ("all", Self::ALL),
    ];

    /// True if every mode in `other` is also allowed by `self`
    pub fn allows(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn allows_mode(self, mode: TraverseMode) -> bool {
        self.allows(Self::from(mode))
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn remove(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, permission)| *permission == self)
            .map_or("none", |(name, _)| *name)
    }
}

impl From<TraverseMode> for StreetTraversalPermission {
    fn from(mode: TraverseMode) -> Self {
        match mode {
            TraverseMode::Walk => Self::PEDESTRIAN,
            TraverseMode::Bicycle => Self::BICYCLE,
            TraverseMode::Car => Self::CAR,
        }
    }
}

impl FromStr for StreetTraversalPermission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, permission)| *permission)
            .ok_or_else(|| Error::InvalidData(format!("Unknown street permission: {s}")))
    }
}

impl TryFrom<String> for StreetTraversalPermission {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StreetTraversalPermission> for String {
    fn from(permission: StreetTraversalPermission) -> Self {
        permission.name().to_string()
    }
}

impl fmt::Display for StreetTraversalPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
