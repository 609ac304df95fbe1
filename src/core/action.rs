//! Flip records: the exercise's event log.
//!
//! Every successful flip is recorded with the acting team, the phase, and the
//! card that was revealed. The log is what facilitators read back after the
//! exercise, so records carry the prompt text as it was shown.

use serde::{Deserialize, Serialize};

use super::team::TeamId;
use crate::cards::CardId;

/// One successful flip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipRecord {
    /// The team that flipped the card.
    pub team: TeamId,

    /// Phase the card belongs to.
    pub phase: String,

    /// The revealed card.
    pub card: CardId,

    /// Prompt shown on the card.
    pub prompt: String,

    /// Position in the session's flip order (0-based).
    pub sequence: u32,
}

impl FlipRecord {
    /// Create a new flip record.
    #[must_use]
    pub fn new(
        team: TeamId,
        phase: impl Into<String>,
        card: CardId,
        prompt: impl Into<String>,
        sequence: u32,
    ) -> Self {
        Self {
            team,
            phase: phase.into(),
            card,
            prompt: prompt.into(),
            sequence,
        }
    }

    /// Log line for display, e.g. `Team A flipped Q3: HR calm comms?`.
    #[must_use]
    pub fn describe(&self, team_name: &str) -> String {
        format!("{} flipped {}: {}", team_name, self.card, self.prompt)
    }
}
