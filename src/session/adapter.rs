//! UI event adapter: JSON messages in, session views out.
//!
//! Each client message names one session operation. Phase names and indices
//! arrive from untrusted input, so they are checked here and answered with an
//! `error` reply; the session itself treats them as caller bugs.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::deck::DeckSession;
use super::policy::LimitOverride;
use super::view::SessionView;
use crate::core::RandomSource;

/// Messages a client can send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionAction {
    Flip { phase: String, index: usize },
    Shuffle { phase: String },
    OpenZoom { phase: String, index: usize },
    ToggleZoom { phase: String, index: usize },
    CloseZoom,
    Reset,
    /// Operator: fixed limit (clamped to 0-3, 0 meaning unlimited).
    SetLimit { phase: String, limit: usize },
    /// Operator: lift the limit.
    Unlimit { phase: String },
    /// Operator: back to the configured limit.
    ClearLimit { phase: String },
    /// Operator: force the phase open.
    RevealAll { phase: String, enabled: bool },
    View,
}

/// Messages sent back to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionReply {
    View { view: SessionView },
    Error { message: String },
}

impl SessionAction {
    /// Phase and card index the action targets, if any.
    fn target(&self) -> (Option<&str>, Option<usize>) {
        match self {
            SessionAction::Flip { phase, index }
            | SessionAction::OpenZoom { phase, index }
            | SessionAction::ToggleZoom { phase, index } => (Some(phase.as_str()), Some(*index)),
            SessionAction::Shuffle { phase }
            | SessionAction::SetLimit { phase, .. }
            | SessionAction::Unlimit { phase }
            | SessionAction::ClearLimit { phase }
            | SessionAction::RevealAll { phase, .. } => (Some(phase.as_str()), None),
            SessionAction::CloseZoom | SessionAction::Reset | SessionAction::View => (None, None),
        }
    }
}

/// Check the action's phase and index against the session.
fn validate<R: RandomSource>(session: &DeckSession<R>, action: &SessionAction) -> Result<(), String> {
    let (Some(name), index) = action.target() else {
        return Ok(());
    };
    let Some(phase) = session.state().get_phase(name) else {
        return Err(format!("Unknown phase: {name}"));
    };
    match index {
        Some(i) if i >= phase.len() => Err(format!(
            "Card index {i} out of range for phase {name} ({} cards)",
            phase.len()
        )),
        _ => Ok(()),
    }
}

/// Apply one action and describe the resulting state.
#[instrument(level = "debug", skip(session))]
pub fn dispatch<R: RandomSource>(session: &mut DeckSession<R>, action: SessionAction) -> SessionReply {
    if let Err(message) = validate(session, &action) {
        warn!(target: "adapter", %message, "Rejected action");
        return SessionReply::Error { message };
    }

    match action {
        SessionAction::Flip { phase, index } => {
            session.flip_card(&phase, index);
        }
        SessionAction::Shuffle { phase } => session.shuffle_unflipped(&phase),
        SessionAction::OpenZoom { phase, index } => session.open_zoom(&phase, index),
        SessionAction::ToggleZoom { phase, index } => session.toggle_zoom(&phase, index),
        SessionAction::CloseZoom => session.close_zoom(),
        SessionAction::Reset => session.reset(),
        SessionAction::SetLimit { phase, limit } => {
            session.set_limit_override(&phase, LimitOverride::fixed(limit));
        }
        SessionAction::Unlimit { phase } => session.set_limit_override(&phase, LimitOverride::Unlimited),
        SessionAction::ClearLimit { phase } => session.clear_limit_override(&phase),
        SessionAction::RevealAll { phase, enabled } => session.set_reveal_all(&phase, enabled),
        SessionAction::View => {}
    }

    SessionReply::View { view: session.view() }
}

/// Parse one JSON message, dispatch it, and serialize the reply.
pub fn handle_line<R: RandomSource>(session: &mut DeckSession<R>, line: &str) -> String {
    let reply = match serde_json::from_str::<SessionAction>(line) {
        Ok(action) => {
            debug!(target: "adapter", ?action, "Received action");
            dispatch(session, action)
        }
        Err(e) => SessionReply::Error {
            message: format!("Invalid JSON: {}", e),
        },
    };
    serde_json::to_string(&reply).unwrap_or_else(|e| {
        serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
    })
}
