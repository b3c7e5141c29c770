use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
}

impl TraverseMode {
    pub const ALL: [TraverseMode; 3] = [
        TraverseMode::Walk,
        TraverseMode::Bicycle,
        TraverseMode::Car,
    ];

    fn bit(self) -> u8 {
        match self {
            TraverseMode::Walk => 1,
            TraverseMode::Bicycle => 1 << 1,
            TraverseMode::Car => 1 << 2,
        }
    }
}

impl fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TraverseMode::Walk => "walk",
            TraverseMode::Bicycle => "bicycle",
            TraverseMode::Car => "car",
        })
    }
}

/// Set of enabled travel modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TraverseMode>", into = "Vec<TraverseMode>")]
pub struct TraverseModeSet(u8);

impl TraverseModeSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, mode: TraverseMode) -> bool {
        self.0 & mode.bit() != 0
    }

    #[must_use]
    pub fn with(self, mode: TraverseMode) -> Self {
        Self(self.0 | mode.bit())
    }

    #[must_use]
    pub fn without(self, mode: TraverseMode) -> Self {
        Self(self.0 & !mode.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TraverseMode> {
        TraverseMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }
}

impl From<TraverseMode> for TraverseModeSet {
    fn from(mode: TraverseMode) -> Self {
        Self::empty().with(mode)
    }
}

impl FromIterator<TraverseMode> for TraverseModeSet {
    fn from_iter<I: IntoIterator<Item = TraverseMode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<Vec<TraverseMode>> for TraverseModeSet {
    fn from(modes: Vec<TraverseMode>) -> Self {
        modes.into_iter().collect()
    }
}

impl From<TraverseModeSet> for Vec<TraverseMode> {
    fn from(set: TraverseModeSet) -> Self {
        set.iter().collect()
    }
}

/// What the traveler wants the route to favor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeType {
    /// Shortest travel time
    #[default]
    Quick,
    /// Streets with low bicycle stress
    Safe,
    /// Least climbing
    Flat,
    /// Greenways and dedicated paths
    Greenways,
    /// Fewest transit transfers
    Transfers,
}
