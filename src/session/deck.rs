//! The deck session: every operation a presentation layer can invoke.
//!
//! A `DeckSession` owns one `ExerciseState` together with the things needed to
//! rebuild it (configuration, prompt catalog, randomness) and the operator
//! policy that `can_flip` consults.
//!
//! ## Invalid requests
//!
//! Requests a player can reach through the UI (flipping a face-up card,
//! flipping past the limit, zooming a facedown card) are silent no-ops. Unknown
//! phase names and out-of-range indices are caller bugs and panic.

use tracing::{debug, info, instrument};

use super::policy::{FlipPolicy, LimitOverride};
use crate::cards::{BlankRenderer, Card, CardImages, CardRenderer, PromptCatalog};
use crate::core::{DeckConfig, DeckRng, ExerciseState, RandomSource, ZoomSelection};

/// One exercise session.
///
/// ## Example
///
/// ```
/// use ttx_deck::core::{DeckConfig, PhaseConfig, ScriptedRandom, TeamId};
/// use ttx_deck::session::DeckSession;
///
/// let config = DeckConfig::new("Red", "Blue")
///     .with_phase(PhaseConfig::new("P1", ["Q1", "Q2"]).with_flip_limit(1));
/// let mut session = DeckSession::with_rng(config, ScriptedRandom::identity());
///
/// session.flip_card("P1", 0);
/// assert_eq!(session.state().turn, TeamId::SECOND);
/// assert!(!session.can_flip("P1"));
/// ```
pub struct DeckSession<R = DeckRng> {
    config: DeckConfig,
    catalog: PromptCatalog,
    rng: R,
    renderer: Box<dyn CardRenderer>,
    images: CardImages,
    policy: FlipPolicy,
    state: ExerciseState,
}

impl DeckSession<DeckRng> {
    /// Create a session seeded from the config (or entropy) with blank images.
    #[must_use]
    pub fn from_config(config: DeckConfig) -> Self {
        let rng = config.seed.map_or_else(DeckRng::from_entropy, DeckRng::new);
        info!(target: "deck", seed = rng.seed(), "Seeded deck RNG");
        Self::new(config, rng, Box::new(BlankRenderer))
    }
}

impl<R: RandomSource> DeckSession<R> {
    /// Create a session and deal the first exercise.
    #[instrument(level = "info", skip_all, fields(phases = config.phases.len()))]
    pub fn new(config: DeckConfig, mut rng: R, renderer: Box<dyn CardRenderer>) -> Self {
        let catalog = config.catalog();
        let policy = FlipPolicy::new(config.allow_zoom_facedown);
        let state = ExerciseState::deal(&config, &catalog, &mut rng);

        let mut images = CardImages::new();
        let renders = images.warm(renderer.as_ref(), state.cards());
        debug!(target: "deck", renders, "Rendered card images");
        info!(target: "deck", cards = state.cards().count(), "Exercise dealt");

        Self {
            config,
            catalog,
            rng,
            renderer,
            images,
            policy,
            state,
        }
    }

    /// Create a session with blank images.
    #[must_use]
    pub fn with_rng(config: DeckConfig, rng: R) -> Self {
        Self::new(config, rng, Box::new(BlankRenderer))
    }

    // === Accessors ===

    /// Current exercise state.
    #[must_use]
    pub fn state(&self) -> &ExerciseState {
        &self.state
    }

    /// Configuration the session deals from.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Operator policy.
    #[must_use]
    pub fn policy(&self) -> &FlipPolicy {
        &self.policy
    }

    /// Rendered card images.
    #[must_use]
    pub fn images(&self) -> &CardImages {
        &self.images
    }

    /// The card under the zoom selection.
    #[must_use]
    pub fn zoomed_card(&self) -> Option<&Card> {
        let zoom = self.state.zoom.as_ref()?;
        Some(self.state.phase(&zoom.phase).card(zoom.index))
    }

    // === Flipping ===

    /// May another card in `phase` be flipped?
    ///
    /// Panics if the phase does not exist.
    #[must_use]
    pub fn can_flip(&self, phase: &str) -> bool {
        self.policy.can_flip(self.state.phase(phase))
    }

    /// Flip a card for the team on turn and pass the turn.
    ///
    /// Returns the flipped card, or `None` if the card was already face-up or
    /// the phase is at its limit.
    #[instrument(level = "debug", skip(self))]
    pub fn flip_card(&mut self, phase: &str, index: usize) -> Option<&Card> {
        if self.state.phase(phase).card(index).is_flipped() {
            debug!(target: "deck", phase, index, "Flip ignored: card already face-up");
            return None;
        }
        if !self.can_flip(phase) {
            debug!(target: "deck", phase, index, "Flip ignored: phase limit reached");
            return None;
        }

        let team = self.state.turn;
        let card = {
            let card = self.state.phase_mut(phase).card_mut(index);
            card.flip(team);
            card.clone()
        };
        self.state.record_flip(phase, &card);
        info!(
            target: "deck",
            team = self.state.team_name(team),
            card = %card.id,
            phase,
            flips = self.state.flip_count(),
            "Card flipped"
        );

        Some(self.state.phase(phase).card(index))
    }

    /// Reorder the facedown cards of a phase, keeping face-up cards in front.
    ///
    /// A zoom selection in this phase follows its card.
    #[instrument(level = "debug", skip(self))]
    pub fn shuffle_unflipped(&mut self, phase: &str) {
        let zoomed_id = match &self.state.zoom {
            Some(zoom) if zoom.phase == phase => Some(self.state.phase(phase).card(zoom.index).id.clone()),
            _ => None,
        };

        let pool = self.state.phase_mut(phase);
        pool.shuffle_unflipped(&mut self.rng);

        if let Some(id) = zoomed_id {
            let index = pool.position_of(&id);
            self.state.zoom = index.map(|index| ZoomSelection::new(phase, index));
        }
        info!(target: "deck", phase, "Shuffled unflipped cards");
    }

    // === Zoom ===

    /// Show a card enlarged.
    ///
    /// Facedown cards can only be zoomed when the policy allows it.
    #[instrument(level = "debug", skip(self))]
    pub fn open_zoom(&mut self, phase: &str, index: usize) {
        let card = self.state.phase(phase).card(index);
        if !card.is_flipped() && !self.policy.allow_zoom_facedown {
            debug!(target: "deck", phase, index, "Zoom ignored: card is facedown");
            return;
        }
        self.state.zoom = Some(ZoomSelection::new(phase, index));
    }

    /// Close the zoom if it shows this card, otherwise open it.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle_zoom(&mut self, phase: &str, index: usize) {
        if self.state.zoom.as_ref().is_some_and(|z| z.is(phase, index)) {
            self.close_zoom();
        } else {
            self.open_zoom(phase, index);
        }
    }

    /// Close the zoom. Always succeeds.
    pub fn close_zoom(&mut self) {
        self.state.zoom = None;
    }

    // === Reset ===

    /// Deal a fresh exercise from the same configuration.
    ///
    /// Operator overrides are kept.
    #[instrument(level = "info", skip(self))]
    pub fn reset(&mut self) {
        self.state = ExerciseState::deal(&self.config, &self.catalog, &mut self.rng);
        let renders = self.images.warm(self.renderer.as_ref(), self.state.cards());
        info!(target: "deck", renders, "Exercise reset");
    }

    // === Operator controls ===

    fn assert_phase(&self, phase: &str) {
        assert!(self.state.get_phase(phase).is_some(), "unknown phase {phase:?}");
    }

    /// Override a phase's flip limit.
    ///
    /// Panics if the phase does not exist.
    pub fn set_limit_override(&mut self, phase: &str, limit: LimitOverride) {
        self.assert_phase(phase);
        self.policy.set_override(phase, limit);
        info!(target: "deck", phase, ?limit, "Flip limit overridden");
    }

    /// Return a phase to its configured limit.
    pub fn clear_limit_override(&mut self, phase: &str) {
        self.assert_phase(phase);
        self.policy.clear_override(phase);
        info!(target: "deck", phase, "Flip limit override cleared");
    }

    /// Force a phase open (or closed again) regardless of its limit.
    pub fn set_reveal_all(&mut self, phase: &str, enabled: bool) {
        self.assert_phase(phase);
        self.policy.set_reveal_all(phase, enabled);
        info!(target: "deck", phase, enabled, "Reveal-all toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PhaseConfig, ScriptedRandom, TeamId};

    fn session() -> DeckSession<ScriptedRandom> {
        let config = DeckConfig::new("A", "B")
            .with_phase(PhaseConfig::new("P1", ["Q1", "Q2", "Q3"]).with_flip_limit(2))
            .with_phase(PhaseConfig::new("P2", ["Q4", "Q5"]));
        DeckSession::with_rng(config, ScriptedRandom::identity())
    }

    #[test]
    fn test_flip_returns_card() {
        let mut s = session();
        let card = s.flip_card("P1", 1).cloned().unwrap();
        assert_eq!(card.id.as_str(), "Q2");
        assert_eq!(card.owner(), Some(TeamId::FIRST));
    }

    #[test]
    fn test_flip_face_up_is_noop() {
        let mut s = session();
        s.flip_card("P1", 0);
        assert!(s.flip_card("P1", 0).is_none());
        assert_eq!(s.state().turn, TeamId::SECOND);
        assert_eq!(s.state().flip_count(), 1);
    }

    #[test]
    fn test_flip_past_limit_is_noop() {
        let mut s = session();
        s.flip_card("P1", 0);
        s.flip_card("P1", 1);
        assert!(!s.can_flip("P1"));
        assert!(s.flip_card("P1", 2).is_none());
        assert!(!s.state().phase("P1").card(2).is_flipped());
        assert_eq!(s.state().turn, TeamId::FIRST);
    }

    #[test]
    fn test_override_and_reveal_all() {
        let mut s = session();
        s.set_limit_override("P1", LimitOverride::Fixed(1));
        s.flip_card("P1", 0);
        assert!(!s.can_flip("P1"));

        s.set_reveal_all("P1", true);
        assert!(s.flip_card("P1", 1).is_some());

        s.set_reveal_all("P1", false);
        s.clear_limit_override("P1");
        assert!(!s.can_flip("P1"));
    }

    #[test]
    fn test_overrides_survive_reset() {
        let mut s = session();
        s.set_limit_override("P1", LimitOverride::Unlimited);
        s.reset();
        assert_eq!(s.policy().override_for("P1"), Some(LimitOverride::Unlimited));
    }

    #[test]
    fn test_zoom_follows_card_through_shuffle() {
        let config = DeckConfig::new("A", "B")
            .with_phase(PhaseConfig::new("P1", ["Q1", "Q2", "Q3"]))
            .allow_zoom_facedown();
        let mut s = DeckSession::with_rng(config, ScriptedRandom::identity());

        s.flip_card("P1", 2);
        s.open_zoom("P1", 2);

        // Q3 moves to the front; facedown [Q1, Q2] keep order
        s.shuffle_unflipped("P1");
        assert_eq!(s.state().zoom, Some(ZoomSelection::new("P1", 0)));
        assert_eq!(s.zoomed_card().map(|c| c.id.as_str()), Some("Q3"));
    }

    #[test]
    fn test_reset_renders_only_new_cards() {
        let mut s = session();
        assert_eq!(s.images().front_count(), 5);
        s.reset();
        assert_eq!(s.images().front_count(), 5);
    }

    #[test]
    #[should_panic(expected = "unknown phase")]
    fn test_flip_unknown_phase_panics() {
        session().flip_card("P9", 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_zoom_out_of_range_panics() {
        session().open_zoom("P2", 2);
    }

    #[test]
    #[should_panic(expected = "unknown phase")]
    fn test_override_unknown_phase_panics() {
        session().set_reveal_all("P9", true);
    }

    #[test]
    #[should_panic(expected = "unknown phase \"P9\"")]
    fn test_limit_override_unknown_phase_panics() {
        session().set_limit_override("P9", LimitOverride::Unlimited);
    }

    #[test]
    #[should_panic(expected = "is used more than once")]
    fn test_duplicate_phase_names_rejected() {
        let config = DeckConfig::new("A", "B")
            .with_phase(PhaseConfig::new("P1", ["Q1", "Q2"]))
            .with_phase(PhaseConfig::new("P1", ["Q3", "Q4"]));
        let _ = DeckSession::with_rng(config, ScriptedRandom::identity());
    }
}
