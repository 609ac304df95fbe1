//! Exercise configuration types.
//!
//! An exercise is configured at startup by providing:
//! - `PhaseConfig`: One phase's candidate cards, deal count and flip limit
//! - `DeckConfig`: Teams, phases in display order, zoom policy, prompts
//!
//! Configuration is either built in code or loaded from TOML:
//!
//! ```toml
//! teams = ["Team A", "Team B"]
//! allow_zoom_facedown = false
//! seed = 42
//!
//! [[phases]]
//! name = "Phase 1"
//! candidates = ["Q1", "Q2", "Q3"]
//! deal_count = 3
//! flip_limit = 3
//!
//! [prompts]
//! Q1 = "Strategic: Activate CIRP immediately?"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use super::team::{TeamId, TeamMap};
use crate::cards::{CardId, PromptCatalog};

/// Environment variable naming the TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "TTX_DECK_CONFIG";

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("phase #{position} has an empty name")]
    EmptyPhaseName { position: usize },

    #[error("phase name {0:?} is used more than once")]
    DuplicatePhase(String),

    #[error("card {id} appears more than once in phase {phase:?}")]
    DuplicateCandidate { phase: String, id: CardId },

    #[error("team names must be non-empty")]
    EmptyTeamName,

    #[error("both teams are named {0:?}")]
    DuplicateTeam(String),
}

/// Configuration for a single phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Display label; also the key used by every phase operation.
    pub name: String,

    /// Cards that may be dealt into this phase.
    #[serde(default)]
    pub candidates: Vec<CardId>,

    /// How many candidates to deal. `None` deals all of them.
    #[serde(default)]
    pub deal_count: Option<usize>,

    /// Maximum flips in this phase. `0` means unlimited.
    #[serde(default)]
    pub flip_limit: usize,
}

impl PhaseConfig {
    /// Create a phase that deals every candidate with no flip limit.
    pub fn new<I, C>(name: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CardId>,
    {
        Self {
            name: name.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            deal_count: None,
            flip_limit: 0,
        }
    }

    /// Deal only `count` of the candidates.
    #[must_use]
    pub fn with_deal_count(mut self, count: usize) -> Self {
        self.deal_count = Some(count);
        self
    }

    /// Set the flip limit (`0` for unlimited).
    #[must_use]
    pub fn with_flip_limit(mut self, limit: usize) -> Self {
        self.flip_limit = limit;
        self
    }

    /// Number of cards actually dealt.
    #[must_use]
    pub fn dealt_count(&self) -> usize {
        self.deal_count
            .map_or(self.candidates.len(), |n| n.min(self.candidates.len()))
    }
}

/// Complete exercise configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Team names in turn order.
    #[serde(default = "default_teams")]
    pub teams: TeamMap<String>,

    /// Phases in display order.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,

    /// May a facedown card be zoomed (showing its back)?
    #[serde(default)]
    pub allow_zoom_facedown: bool,

    /// Fixed RNG seed. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Prompts overlaid on the built-in demo story.
    #[serde(default)]
    pub prompts: BTreeMap<String, String>,
}

fn default_teams() -> TeamMap<String> {
    TeamMap::from_pair("Team A".into(), "Team B".into())
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            teams: default_teams(),
            phases: Vec::new(),
            allow_zoom_facedown: false,
            seed: None,
            prompts: BTreeMap::new(),
        }
    }
}

impl DeckConfig {
    /// Create a configuration with two teams and no phases.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            teams: TeamMap::from_pair(first.into(), second.into()),
            ..Self::default()
        }
    }

    /// The built-in four-phase exercise over the demo story.
    ///
    /// Phase 1 deals all three of its candidates, later phases deal two of three.
    #[must_use]
    pub fn demo_exercise() -> Self {
        Self::default()
            .with_phase(PhaseConfig::new("Phase 1", ["Q1", "Q2", "Q3"]).with_flip_limit(3))
            .with_phase(
                PhaseConfig::new("Phase 2", ["Q4", "Q5", "Q6"])
                    .with_deal_count(2)
                    .with_flip_limit(2),
            )
            .with_phase(
                PhaseConfig::new("Phase 3", ["Q7", "Q8", "Q9"])
                    .with_deal_count(2)
                    .with_flip_limit(2),
            )
            .with_phase(
                PhaseConfig::new("Phase 4", ["Q10", "Q11", "Q12"])
                    .with_deal_count(2)
                    .with_flip_limit(2),
            )
    }

    /// Add a phase after the existing ones.
    #[must_use]
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Allow zooming facedown cards.
    #[must_use]
    pub fn allow_zoom_facedown(mut self) -> Self {
        self.allow_zoom_facedown = true;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a card prompt, overriding the demo story.
    #[must_use]
    pub fn with_prompt(mut self, id: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.prompts.insert(id.into(), prompt.into());
        self
    }

    /// Get a phase config by name.
    #[must_use]
    pub fn get_phase(&self, name: &str) -> Option<&PhaseConfig> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// The prompt catalog: demo story overlaid with configured prompts.
    #[must_use]
    pub fn catalog(&self) -> PromptCatalog {
        let mut catalog = PromptCatalog::demo_story();
        catalog.extend(self.prompts.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }

    /// Check names and candidate lists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (_, name) in self.teams.iter() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyTeamName);
            }
        }
        let (first, second) = (&self.teams[TeamId::FIRST], &self.teams[TeamId::SECOND]);
        if first == second {
            return Err(ConfigError::DuplicateTeam(first.clone()));
        }

        let mut names = FxHashSet::default();
        for (position, phase) in self.phases.iter().enumerate() {
            if phase.name.trim().is_empty() {
                return Err(ConfigError::EmptyPhaseName { position });
            }
            if !names.insert(phase.name.as_str()) {
                return Err(ConfigError::DuplicatePhase(phase.name.clone()));
            }
            let mut ids = FxHashSet::default();
            for id in &phase.candidates {
                if !ids.insert(id) {
                    return Err(ConfigError::DuplicateCandidate {
                        phase: phase.name.clone(),
                        id: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: DeckConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load the file named by `TTX_DECK_CONFIG`, if the variable is set.
    ///
    /// Returns `Ok(None)` when the variable is unset.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(path) = std::env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };
        match Self::from_path(&path) {
            Ok(config) => {
                info!(target: "ttx_deck", %path, phases = config.phases.len(), "Loaded deck config (TOML)");
                Ok(Some(config))
            }
            Err(e) => {
                error!(target: "ttx_deck", %path, error = %e, "Failed to load deck config");
                Err(e)
            }
        }
    }
}
