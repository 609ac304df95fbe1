//! Cards - the runtime state of one dealt card.
//!
//! A card starts facedown and unowned. Flipping it reveals the prompt and
//! assigns it, once, to the team whose turn it was.

use serde::{Deserialize, Serialize};

use crate::core::team::TeamId;

/// Card identifier, stable within a phase pool (e.g. `"Q7"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A card dealt into a phase.
///
/// `owner` is `Some` exactly when `flipped` is true; the only way to change
/// either is `flip`, and the only way back is dealing a fresh card on reset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Stable identifier.
    pub id: CardId,

    /// Text shown once the card is face-up.
    pub prompt: String,

    flipped: bool,
    owner: Option<TeamId>,
}

impl Card {
    /// Create a facedown, unowned card.
    #[must_use]
    pub fn new(id: CardId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            flipped: false,
            owner: None,
        }
    }

    /// Is this card face-up?
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The team that flipped this card.
    #[must_use]
    pub fn owner(&self) -> Option<TeamId> {
        self.owner
    }

    /// Turn the card face-up and assign it to `team`.
    ///
    /// Returns false, leaving the card untouched, if it was already flipped.
    pub fn flip(&mut self, team: TeamId) -> bool {
        if self.flipped {
            return false;
        }
        self.flipped = true;
        self.owner = Some(team);
        true
    }
}
