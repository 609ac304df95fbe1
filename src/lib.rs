//! # ttx-deck
//!
//! Phased turn-taking card deck for tabletop exercises.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: One `ExerciseState` value per session, owned by a
//!    `DeckSession` and mutated only through its named operations.
//!
//! 2. **No-op, Not Error**: Requests a player can make through the UI but that
//!    the rules forbid (flipping past a phase's limit, zooming a facedown
//!    card) change nothing. Unknown phases and bad indices panic.
//!
//! 3. **Injected Collaborators**: Randomness (`RandomSource`) and card images
//!    (`CardRenderer`) are supplied by the caller, so tests can script exact
//!    deals and shuffles.
//!
//! ## Modules
//!
//! - `core`: Teams, cards-in-play state, flip log, RNG, configuration
//! - `cards`: Card identity, prompt catalog, rendering seam
//! - `session`: Session operations, flip policy, presentation view, adapter
//! - `telemetry`: Tracing subscriber setup

pub mod core;
pub mod cards;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{
    TeamId, TeamMap,
    DeckRng, RandomSource, ScriptedRandom,
    ConfigError, DeckConfig, PhaseConfig,
    FlipRecord,
    ExerciseState, Phase, ZoomSelection,
};

pub use crate::cards::{BlankRenderer, Card, CardId, CardImages, CardRenderer, PromptCatalog};

pub use crate::session::{
    DeckSession, FlipPolicy, LimitOverride,
    SessionAction, SessionReply, SessionView,
};
