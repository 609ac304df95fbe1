//! Deck session integration tests.
//!
//! These tests drive a `DeckSession` through whole exercises using scripted
//! randomness, so every deal and shuffle order is known in advance.

use ttx_deck::core::{DeckConfig, PhaseConfig, ScriptedRandom, TeamId, TeamMap, ZoomSelection};
use ttx_deck::session::{DeckSession, LimitOverride};

fn ids(session: &DeckSession<ScriptedRandom>, phase: &str) -> Vec<String> {
    session
        .state()
        .phase(phase)
        .pool
        .iter()
        .map(|c| c.id.to_string())
        .collect()
}

fn three_card_session() -> DeckSession<ScriptedRandom> {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("P1", ["Q1", "Q2", "Q3"]).with_flip_limit(3));
    DeckSession::with_rng(config, ScriptedRandom::identity())
}

// =============================================================================
// Flipping
// =============================================================================

/// Three flips alternate turns, credit owners and exhaust the phase.
#[test]
fn test_three_flips_fill_phase() {
    let mut s = three_card_session();
    let a = TeamId::FIRST;
    let b = TeamId::SECOND;

    s.flip_card("P1", 0);
    assert_eq!(s.state().phase("P1").card(0).owner(), Some(a));
    assert_eq!(s.state().score, TeamMap::from_pair(1, 0));
    assert_eq!(s.state().turn, b);

    s.flip_card("P1", 1);
    assert_eq!(s.state().phase("P1").card(1).owner(), Some(b));
    assert_eq!(s.state().score, TeamMap::from_pair(1, 1));
    assert_eq!(s.state().turn, a);

    s.flip_card("P1", 2);
    assert_eq!(s.state().phase("P1").card(2).owner(), Some(a));
    assert_eq!(s.state().score, TeamMap::from_pair(2, 1));
    assert_eq!(s.state().turn, b);

    assert!(!s.can_flip("P1"));
}

/// Turns alternate across phases, not per phase.
#[test]
fn test_turn_is_global() {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("P1", ["Q1", "Q2"]))
        .with_phase(PhaseConfig::new("P2", ["Q3", "Q4"]));
    let mut s = DeckSession::with_rng(config, ScriptedRandom::identity());

    s.flip_card("P1", 0);
    s.flip_card("P2", 0);
    s.flip_card("P2", 1);

    assert_eq!(s.state().phase("P2").card(0).owner(), Some(TeamId::SECOND));
    assert_eq!(s.state().phase("P2").card(1).owner(), Some(TeamId::FIRST));
    assert_eq!(s.state().turn, TeamId::SECOND);
}

/// Rejected flips leave turn and score alone.
#[test]
fn test_rejected_flips_change_nothing() {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("P1", ["Q1", "Q2", "Q3"]).with_flip_limit(1));
    let mut s = DeckSession::with_rng(config, ScriptedRandom::identity());

    s.flip_card("P1", 0);
    assert!(s.flip_card("P1", 0).is_none());
    assert!(s.flip_card("P1", 1).is_none());

    assert_eq!(s.state().turn, TeamId::SECOND);
    assert_eq!(s.state().score, TeamMap::from_pair(1, 0));
    assert_eq!(s.state().flip_count(), 1);
}

/// A phase with no cards can always "flip" but has nothing to flip.
#[test]
fn test_empty_phase() {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("Empty", Vec::<&str>::new()).with_flip_limit(2));
    let mut s = DeckSession::with_rng(config, ScriptedRandom::identity());

    assert!(s.state().phase("Empty").is_empty());
    assert!(s.can_flip("Empty"));
    s.shuffle_unflipped("Empty");
    assert!(s.state().phase("Empty").is_empty());
}

/// Operator controls can reopen a phase that hit its limit.
#[test]
fn test_operator_reopens_phase() {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("P1", ["Q1", "Q2", "Q3", "Q4"]).with_flip_limit(1));
    let mut s = DeckSession::with_rng(config, ScriptedRandom::identity());

    s.flip_card("P1", 0);
    assert!(!s.can_flip("P1"));

    s.set_limit_override("P1", LimitOverride::fixed(2));
    assert!(s.flip_card("P1", 1).is_some());
    assert!(!s.can_flip("P1"));

    s.set_limit_override("P1", LimitOverride::Unlimited);
    assert!(s.flip_card("P1", 2).is_some());
    assert!(s.flip_card("P1", 3).is_some());
    assert_eq!(s.state().phase("P1").flipped_count(), 4);
}

// =============================================================================
// Shuffle
// =============================================================================

/// Shuffling keeps face-up cards in front in pool order, not flip order.
#[test]
fn test_shuffle_keeps_flipped_prefix() {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("P1", ["Q1", "Q2", "Q3", "Q4", "Q5"]));
    // First four draws keep the deal in order, the last two drive the shuffle
    let mut s = DeckSession::with_rng(config, ScriptedRandom::new([4, 3, 2, 1, 0, 0]));
    assert_eq!(ids(&s, "P1"), vec!["Q1", "Q2", "Q3", "Q4", "Q5"]);

    s.flip_card("P1", 3);
    s.flip_card("P1", 1);

    // [Q1, Q3, Q5]: i=2 swaps with 0 -> [Q5, Q3, Q1]; i=1 swaps with 0 -> [Q3, Q5, Q1]
    s.shuffle_unflipped("P1");
    assert_eq!(ids(&s, "P1"), vec!["Q2", "Q4", "Q3", "Q5", "Q1"]);
    assert_eq!(s.state().phase("P1").card(0).owner(), Some(TeamId::SECOND));
    assert_eq!(s.state().phase("P1").card(1).owner(), Some(TeamId::FIRST));
}

// =============================================================================
// Zoom
// =============================================================================

/// Zooming a facedown card does nothing unless allowed.
#[test]
fn test_open_zoom_facedown_is_noop() {
    let mut s = three_card_session();
    s.open_zoom("P1", 0);
    assert_eq!(s.state().zoom, None);
}

/// Zooming a facedown card works when the config allows it.
#[test]
fn test_open_zoom_facedown_allowed() {
    let config = DeckConfig::new("A", "B")
        .with_phase(PhaseConfig::new("P1", ["Q1", "Q2"]))
        .allow_zoom_facedown();
    let mut s = DeckSession::with_rng(config, ScriptedRandom::identity());

    s.open_zoom("P1", 1);
    assert_eq!(s.state().zoom, Some(ZoomSelection::new("P1", 1)));
    assert_eq!(s.view().zoom.map(|z| z.face_up), Some(false));
}

/// Toggling the same card twice closes the zoom again.
#[test]
fn test_toggle_zoom_twice() {
    let mut s = three_card_session();
    s.flip_card("P1", 1);

    s.toggle_zoom("P1", 1);
    assert_eq!(s.state().zoom, Some(ZoomSelection::new("P1", 1)));
    s.toggle_zoom("P1", 1);
    assert_eq!(s.state().zoom, None);
}

/// Toggling a different card moves the zoom there.
#[test]
fn test_toggle_zoom_switches_card() {
    let mut s = three_card_session();
    s.flip_card("P1", 0);
    s.flip_card("P1", 2);

    s.toggle_zoom("P1", 0);
    s.toggle_zoom("P1", 2);
    assert_eq!(s.state().zoom, Some(ZoomSelection::new("P1", 2)));

    s.close_zoom();
    s.close_zoom();
    assert_eq!(s.state().zoom, None);
}

// =============================================================================
// Reset
// =============================================================================

/// Reset deals a fresh exercise and clears everything transient.
#[test]
fn test_reset_restores_initial_state() {
    let mut s = three_card_session();
    s.flip_card("P1", 0);
    s.flip_card("P1", 1);
    s.open_zoom("P1", 0);

    s.reset();

    let state = s.state();
    assert_eq!(state.turn, TeamId::FIRST);
    assert_eq!(state.score, TeamMap::from_pair(0, 0));
    assert_eq!(state.zoom, None);
    assert!(state.log.is_empty());
    assert!(state.cards().all(|c| !c.is_flipped() && c.owner().is_none()));
    assert_eq!(ids(&s, "P1"), vec!["Q1", "Q2", "Q3"]);
    assert!(s.can_flip("P1"));
}

// =============================================================================
// Demo exercise
// =============================================================================

/// The built-in exercise deals three cards then two per later phase.
#[test]
fn test_demo_exercise_deal() {
    let s = DeckSession::from_config(DeckConfig::demo_exercise().with_seed(11));
    let sizes: Vec<_> = s.state().phases().iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![3, 2, 2, 2]);

    let p2 = s.state().phase("Phase 2");
    assert!(p2.pool.iter().all(|c| ["Q4", "Q5", "Q6"].contains(&c.id.as_str())));
    assert!(p2.pool.iter().all(|c| !c.prompt.is_empty()));
}

/// The same seed deals the same exercise.
#[test]
fn test_seeded_deal_is_reproducible() {
    let a = DeckSession::from_config(DeckConfig::demo_exercise().with_seed(99));
    let b = DeckSession::from_config(DeckConfig::demo_exercise().with_seed(99));
    assert_eq!(a.state().phases(), b.state().phases());
}

/// The event log reads newest first.
#[test]
fn test_event_log() {
    let mut s = three_card_session();
    s.flip_card("P1", 0);
    s.flip_card("P1", 2);

    assert_eq!(
        s.view().log,
        vec![
            "B flipped Q3: Operational: HR calm comms?",
            "A flipped Q1: Strategic: Activate CIRP immediately?",
        ]
    );
}
