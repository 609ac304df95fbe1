//! Team identification and per-team data storage.
//!
//! ## TeamId
//!
//! Type-safe identifier for one of the exercise's two teams.
//!
//! ## TeamMap
//!
//! Per-team data storage backed by a fixed pair for O(1) access.
//! Supports iteration and indexing by `TeamId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of teams in an exercise. Turns alternate strictly between them.
pub const TEAM_COUNT: usize = 2;

/// Team identifier: index 0 moves first, index 1 second.
///
/// Serialized as its index; out-of-range indices fail to deserialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TeamId(u8);

impl TeamId {
    /// The team that takes the first turn.
    pub const FIRST: TeamId = TeamId(0);

    /// The team that takes the second turn.
    pub const SECOND: TeamId = TeamId(1);

    /// Create a new team ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub fn new(id: u8) -> Self {
        match Self::try_from(id) {
            Ok(team) => team,
            Err(e) => panic!("{e}"),
        }
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The team that moves after this one.
    ///
    /// ```
    /// use ttx_deck::core::TeamId;
    ///
    /// assert_eq!(TeamId::FIRST.other(), TeamId::SECOND);
    /// assert_eq!(TeamId::SECOND.other(), TeamId::FIRST);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        TeamId(self.0 ^ 1)
    }

    /// Iterate over both team IDs in turn order.
    pub fn all() -> impl Iterator<Item = TeamId> {
        [TeamId::FIRST, TeamId::SECOND].into_iter()
    }
}

impl TryFrom<u8> for TeamId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if (id as usize) < TEAM_COUNT {
            Ok(Self(id))
        } else {
            Err(format!("Team index must be 0 or 1, got {id}"))
        }
    }
}

impl From<TeamId> for u8 {
    fn from(team: TeamId) -> u8 {
        team.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Per-team data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ttx_deck::core::{TeamId, TeamMap};
///
/// let mut score: TeamMap<u32> = TeamMap::with_default();
/// score[TeamId::SECOND] += 1;
///
/// assert_eq!(score[TeamId::FIRST], 0);
/// assert_eq!(score[TeamId::SECOND], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamMap<T> {
    data: [T; TEAM_COUNT],
}

impl<T> TeamMap<T> {
    /// Create a map from a value per team, in turn order.
    pub fn from_pair(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(TeamId) -> T) -> Self {
        Self::from_pair(factory(TeamId::FIRST), factory(TeamId::SECOND))
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a team's data.
    #[must_use]
    pub fn get(&self, team: TeamId) -> &T {
        &self.data[team.index()]
    }

    /// Get a mutable reference to a team's data.
    pub fn get_mut(&mut self, team: TeamId) -> &mut T {
        &mut self.data[team.index()]
    }

    /// Iterate over (TeamId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (TeamId::new(i as u8), v))
    }
}

impl<T> Index<TeamId> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: TeamId) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<TeamId> for TeamMap<T> {
    fn index_mut(&mut self, team: TeamId) -> &mut Self::Output {
        self.get_mut(team)
    }
}
