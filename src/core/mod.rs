//! Core exercise types: teams, state, flip records, RNG, configuration.
//!
//! This module contains the data the session operates on. Exercises configure
//! it via `DeckConfig` rather than by modifying the core.

pub mod team;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use team::{TeamId, TeamMap, TEAM_COUNT};
pub use rng::{DeckRng, RandomSource, ScriptedRandom};
pub use config::{ConfigError, DeckConfig, PhaseConfig, CONFIG_PATH_ENV};
pub use action::FlipRecord;
pub use state::{ExerciseState, Phase, ZoomSelection};
