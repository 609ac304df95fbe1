//! Exercise state: phases, cards, turn, score, zoom, event log.
//!
//! ## Phase
//!
//! A named pool of dealt cards with its configured flip limit. Phases have no
//! lifecycle of their own; a phase is "done" only in the sense that its flip
//! limit has been reached.
//!
//! ## ExerciseState
//!
//! The root value of a session. It is dealt once from a `DeckConfig`, mutated
//! in place by session operations, and replaced wholesale on reset.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::action::FlipRecord;
use super::config::DeckConfig;
use super::rng::RandomSource;
use super::team::{TeamId, TeamMap};
use crate::cards::{Card, CardId, PromptCatalog};

/// One phase of the exercise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Phase {
    /// Display label and lookup key.
    pub name: String,

    /// Dealt cards in display order.
    pub pool: Vec<Card>,

    /// Configured maximum flips. `0` means unlimited.
    pub flip_limit: usize,
}

impl Phase {
    /// Create a phase from already-dealt cards.
    #[must_use]
    pub fn new(name: impl Into<String>, pool: Vec<Card>, flip_limit: usize) -> Self {
        Self {
            name: name.into(),
            pool,
            flip_limit,
        }
    }

    /// Configured limit, with `0` read as unlimited.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        (self.flip_limit > 0).then_some(self.flip_limit)
    }

    /// Number of face-up cards.
    #[must_use]
    pub fn flipped_count(&self) -> usize {
        self.pool.iter().filter(|c| c.is_flipped()).count()
    }

    /// Number of cards in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Check if nothing was dealt into this phase.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Get a card by position.
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn card(&self, index: usize) -> &Card {
        self.pool.get(index).unwrap_or_else(|| {
            panic!(
                "card index {index} out of range for phase {:?} ({} cards)",
                self.name,
                self.pool.len()
            )
        })
    }

    /// Get a mutable card by position.
    ///
    /// Panics if `index` is out of range.
    pub fn card_mut(&mut self, index: usize) -> &mut Card {
        let len = self.pool.len();
        let name = &self.name;
        match self.pool.get_mut(index) {
            Some(card) => card,
            None => panic!("card index {index} out of range for phase {name:?} ({len} cards)"),
        }
    }

    /// Current position of a card.
    #[must_use]
    pub fn position_of(&self, id: &CardId) -> Option<usize> {
        self.pool.iter().position(|c| &c.id == id)
    }

    /// Move face-up cards to the front (keeping their order) and randomly
    /// permute the facedown cards behind them.
    pub fn shuffle_unflipped<R: RandomSource>(&mut self, rng: &mut R) {
        let (mut pool, mut facedown): (Vec<Card>, Vec<Card>) =
            self.pool.drain(..).partition(Card::is_flipped);
        rng.shuffle(&mut facedown);
        pool.append(&mut facedown);
        self.pool = pool;
    }
}

/// Card selected for enlarged display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ZoomSelection {
    /// Phase holding the card.
    pub phase: String,

    /// Position of the card in the phase pool.
    pub index: usize,
}

impl ZoomSelection {
    /// Create a new zoom selection.
    #[must_use]
    pub fn new(phase: impl Into<String>, index: usize) -> Self {
        Self {
            phase: phase.into(),
            index,
        }
    }

    /// Does this selection point at `(phase, index)`?
    #[must_use]
    pub fn is(&self, phase: &str, index: usize) -> bool {
        self.phase == phase && self.index == index
    }
}

/// Complete state of one exercise session.
///
/// Uses `im::Vector` for the event log so snapshots stay cheap as it grows.
#[derive(Clone, Debug, Serialize)]
pub struct ExerciseState {
    phases: Vec<Phase>,

    #[serde(skip)]
    phase_index: FxHashMap<String, usize>,

    teams: TeamMap<String>,

    /// Team whose turn it is.
    pub turn: TeamId,

    /// Cards flipped per team.
    pub score: TeamMap<u32>,

    /// Card currently shown enlarged.
    pub zoom: Option<ZoomSelection>,

    /// Successful flips in order.
    pub log: Vector<FlipRecord>,
}

impl ExerciseState {
    /// Deal a fresh exercise from configuration.
    ///
    /// ## Defaults
    ///
    /// - `turn`: first team
    /// - `score`: 0 for both teams
    /// - `zoom`: none
    /// - every card facedown and unowned
    ///
    /// Panics if the config fails `DeckConfig::validate` (duplicate phase
    /// names or card IDs would make lookups ambiguous).
    #[must_use]
    pub fn deal<R: RandomSource>(config: &DeckConfig, catalog: &PromptCatalog, rng: &mut R) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid deck config: {e}");
        }

        let mut phases = Vec::with_capacity(config.phases.len());
        let mut phase_index = FxHashMap::default();

        for phase_config in &config.phases {
            let mut ids = phase_config.candidates.clone();
            rng.shuffle(&mut ids);
            ids.truncate(phase_config.dealt_count());

            let pool = ids
                .into_iter()
                .map(|id| {
                    let prompt = catalog.prompt(&id).to_string();
                    Card::new(id, prompt)
                })
                .collect();

            phase_index.insert(phase_config.name.clone(), phases.len());
            phases.push(Phase::new(phase_config.name.clone(), pool, phase_config.flip_limit));
        }

        Self {
            phases,
            phase_index,
            teams: config.teams.clone(),
            turn: TeamId::FIRST,
            score: TeamMap::with_default(),
            zoom: None,
            log: Vector::new(),
        }
    }

    // === Phases ===

    /// Phases in display order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Look up a phase by name.
    #[must_use]
    pub fn get_phase(&self, name: &str) -> Option<&Phase> {
        self.phase_index.get(name).map(|&i| &self.phases[i])
    }

    /// Look up a phase by name.
    ///
    /// Panics if no phase has that name.
    #[must_use]
    pub fn phase(&self, name: &str) -> &Phase {
        self.get_phase(name)
            .unwrap_or_else(|| panic!("unknown phase {name:?}"))
    }

    /// Look up a phase by name for mutation.
    ///
    /// Panics if no phase has that name.
    pub fn phase_mut(&mut self, name: &str) -> &mut Phase {
        match self.phase_index.get(name) {
            Some(&i) => &mut self.phases[i],
            None => panic!("unknown phase {name:?}"),
        }
    }

    /// Iterate over every dealt card.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.phases.iter().flat_map(|p| p.pool.iter())
    }

    // === Teams ===

    /// Team names in turn order.
    #[must_use]
    pub fn teams(&self) -> &TeamMap<String> {
        &self.teams
    }

    /// Display name of a team.
    #[must_use]
    pub fn team_name(&self, team: TeamId) -> &str {
        &self.teams[team]
    }

    /// Number of cards in the session owned by `team`.
    #[must_use]
    pub fn owned_count(&self, team: TeamId) -> u32 {
        self.cards().filter(|c| c.owner() == Some(team)).count() as u32
    }

    // === Flips ===

    /// Number of successful flips so far.
    #[must_use]
    pub fn flip_count(&self) -> u32 {
        self.log.len() as u32
    }

    /// Credit a flip to the team on turn and pass the turn.
    ///
    /// The card itself must already have been flipped by the caller.
    pub fn record_flip(&mut self, phase: &str, card: &Card) {
        let team = self.turn;
        let sequence = self.flip_count();
        self.score[team] += 1;
        self.log.push_back(FlipRecord::new(
            team,
            phase,
            card.id.clone(),
            card.prompt.clone(),
            sequence,
        ));
        self.turn = team.other();
    }

    /// Display lines for the most recent flips, newest first.
    #[must_use]
    pub fn recent_log(&self, limit: usize) -> Vec<String> {
        self.log
            .iter()
            .rev()
            .take(limit)
            .map(|r| r.describe(self.team_name(r.team)))
            .collect()
    }
}
