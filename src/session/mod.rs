//! Deck sessions: operations, flip policy, presentation view, UI adapter.
//!
//! ## Key Types
//!
//! - `DeckSession`: owns the exercise state and exposes every operation
//! - `FlipPolicy`: limit overrides, reveal-all, facedown zoom
//! - `SessionView`: serializable snapshot for a presentation layer
//! - `SessionAction` / `SessionReply`: the JSON protocol spoken by the adapter

pub mod adapter;
pub mod deck;
pub mod policy;
pub mod view;

pub use adapter::{dispatch, handle_line, SessionAction, SessionReply};
pub use deck::DeckSession;
pub use policy::{FlipPolicy, LimitOverride, MAX_OVERRIDE_LIMIT};
pub use view::{CardView, PhaseView, ScoreLine, SessionView, ZoomView, LOG_LINES};
