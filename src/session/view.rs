//! Presentation view of a session.
//!
//! The view is what a UI renders: per card, whether its Flip and Zoom controls
//! are enabled; per phase, its progress against the limit in force; plus the
//! turn indicator, scoreboard, zoom overlay and recent event log. Facedown
//! cards expose neither their ID nor their prompt.

use serde::Serialize;

use super::deck::DeckSession;
use crate::cards::CardId;
use crate::core::{Phase, RandomSource};

/// Number of event log lines included in a view.
pub const LOG_LINES: usize = 20;

/// Everything a UI needs to draw the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub teams: Vec<String>,
    pub current_turn: String,
    pub score: Vec<ScoreLine>,
    pub phases: Vec<PhaseView>,
    pub zoom: Option<ZoomView>,
    /// Most recent flips, newest first.
    pub log: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
    pub team: String,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PhaseView {
    pub name: String,
    pub flipped: usize,
    /// Limit in force; `None` when unlimited.
    pub limit: Option<usize>,
    pub reveal_all: bool,
    pub can_flip: bool,
    pub cards: Vec<CardView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub index: usize,
    pub flipped: bool,
    pub id: Option<CardId>,
    pub prompt: Option<String>,
    pub owner: Option<String>,
    pub flip_enabled: bool,
    pub zoom_enabled: bool,
    pub zoomed: bool,
}

/// The enlarged card. The UI offers a single Close control while this is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZoomView {
    pub phase: String,
    pub index: usize,
    pub face_up: bool,
    pub id: Option<CardId>,
    pub prompt: Option<String>,
}

impl<R: RandomSource> DeckSession<R> {
    /// Build the presentation view of the current state.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let state = self.state();

        let teams = state.teams().iter().map(|(_, name)| name.clone()).collect();
        let score = state
            .score
            .iter()
            .map(|(team, &score)| ScoreLine {
                team: state.team_name(team).to_string(),
                score,
            })
            .collect();

        let phases = state.phases().iter().map(|p| self.phase_view(p)).collect();

        let zoom = state.zoom.as_ref().map(|z| {
            let card = state.phase(&z.phase).card(z.index);
            let face_up = card.is_flipped();
            ZoomView {
                phase: z.phase.clone(),
                index: z.index,
                face_up,
                id: face_up.then(|| card.id.clone()),
                prompt: face_up.then(|| card.prompt.clone()),
            }
        });

        SessionView {
            teams,
            current_turn: state.team_name(state.turn).to_string(),
            score,
            phases,
            zoom,
            log: state.recent_log(LOG_LINES),
        }
    }

    fn phase_view(&self, phase: &Phase) -> PhaseView {
        let state = self.state();
        let policy = self.policy();
        let can_flip = policy.can_flip(phase);

        let cards = phase
            .pool
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let flipped = card.is_flipped();
                CardView {
                    index,
                    flipped,
                    id: flipped.then(|| card.id.clone()),
                    prompt: flipped.then(|| card.prompt.clone()),
                    owner: card.owner().map(|t| state.team_name(t).to_string()),
                    flip_enabled: !flipped && can_flip,
                    zoom_enabled: flipped || policy.allow_zoom_facedown,
                    zoomed: state.zoom.as_ref().is_some_and(|z| z.is(&phase.name, index)),
                }
            })
            .collect();

        PhaseView {
            name: phase.name.clone(),
            flipped: phase.flipped_count(),
            limit: policy.effective_limit(phase),
            reveal_all: policy.is_reveal_all(&phase.name),
            can_flip,
            cards,
        }
    }
}
