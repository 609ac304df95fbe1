//! Flip policy: who may flip, and when.
//!
//! A phase's configured limit can be overridden by an operator, either lifted
//! entirely or replaced by a small fixed number. An operator can also force a
//! phase open ("reveal all"), which ignores the limit altogether. Overrides
//! are operator policy, not exercise state, so they survive a reset.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::Phase;

/// Largest limit an operator override may set.
pub const MAX_OVERRIDE_LIMIT: usize = 3;

/// Operator override for one phase's flip limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitOverride {
    /// No limit.
    Unlimited,
    /// Replace the configured limit. `0` means unlimited.
    Fixed(usize),
}

impl LimitOverride {
    /// A fixed override, clamped to `0..=MAX_OVERRIDE_LIMIT`.
    #[must_use]
    pub fn fixed(limit: usize) -> Self {
        LimitOverride::Fixed(limit.min(MAX_OVERRIDE_LIMIT))
    }
}

/// Per-session flip and zoom policy.
///
/// ## Example
///
/// ```
/// use ttx_deck::core::Phase;
/// use ttx_deck::session::{FlipPolicy, LimitOverride};
///
/// let phase = Phase::new("P1", Vec::new(), 2);
/// let mut policy = FlipPolicy::new(false);
/// assert_eq!(policy.effective_limit(&phase), Some(2));
///
/// policy.set_override("P1", LimitOverride::Unlimited);
/// assert_eq!(policy.effective_limit(&phase), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlipPolicy {
    overrides: FxHashMap<String, LimitOverride>,
    reveal_all: FxHashSet<String>,

    /// May a facedown card be zoomed?
    pub allow_zoom_facedown: bool,
}

impl FlipPolicy {
    /// Create a policy with no overrides.
    #[must_use]
    pub fn new(allow_zoom_facedown: bool) -> Self {
        Self {
            allow_zoom_facedown,
            ..Self::default()
        }
    }

    /// Override a phase's limit. Fixed overrides are clamped to `MAX_OVERRIDE_LIMIT`.
    pub fn set_override(&mut self, phase: impl Into<String>, limit: LimitOverride) {
        let limit = match limit {
            LimitOverride::Fixed(n) => LimitOverride::fixed(n),
            unlimited => unlimited,
        };
        self.overrides.insert(phase.into(), limit);
    }

    /// Return a phase to its configured limit.
    pub fn clear_override(&mut self, phase: &str) {
        self.overrides.remove(phase);
    }

    /// Current override for a phase.
    #[must_use]
    pub fn override_for(&self, phase: &str) -> Option<LimitOverride> {
        self.overrides.get(phase).copied()
    }

    /// Turn reveal-all on or off for a phase.
    pub fn set_reveal_all(&mut self, phase: impl Into<String>, enabled: bool) {
        let phase = phase.into();
        if enabled {
            self.reveal_all.insert(phase);
        } else {
            self.reveal_all.remove(&phase);
        }
    }

    /// Is reveal-all on for a phase?
    #[must_use]
    pub fn is_reveal_all(&self, phase: &str) -> bool {
        self.reveal_all.contains(phase)
    }

    /// The limit in force for a phase, `None` when unlimited.
    #[must_use]
    pub fn effective_limit(&self, phase: &Phase) -> Option<usize> {
        match self.override_for(&phase.name) {
            Some(LimitOverride::Unlimited) => None,
            Some(LimitOverride::Fixed(n)) => (n > 0).then_some(n),
            None => phase.limit(),
        }
    }

    /// May another card in this phase be flipped?
    #[must_use]
    pub fn can_flip(&self, phase: &Phase) -> bool {
        if self.is_reveal_all(&phase.name) {
            return true;
        }
        match self.effective_limit(phase) {
            Some(limit) => phase.flipped_count() < limit,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::TeamId;

    fn phase_with(flipped: usize, total: usize, limit: usize) -> Phase {
        let mut pool: Vec<Card> = (0..total)
            .map(|i| Card::new(format!("Q{i}").into(), ""))
            .collect();
        for card in pool.iter_mut().take(flipped) {
            card.flip(TeamId::FIRST);
        }
        Phase::new("P", pool, limit)
    }

    #[test]
    fn test_configured_limit() {
        let policy = FlipPolicy::default();
        assert!(policy.can_flip(&phase_with(1, 3, 2)));
        assert!(!policy.can_flip(&phase_with(2, 3, 2)));
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let policy = FlipPolicy::default();
        assert!(policy.can_flip(&phase_with(5, 6, 0)));
        assert_eq!(policy.effective_limit(&phase_with(0, 1, 0)), None);
    }

    #[test]
    fn test_unlimited_override() {
        let mut policy = FlipPolicy::default();
        policy.set_override("P", LimitOverride::Unlimited);
        assert!(policy.can_flip(&phase_with(2, 3, 2)));

        policy.clear_override("P");
        assert!(!policy.can_flip(&phase_with(2, 3, 2)));
    }

    #[test]
    fn test_fixed_override_clamped() {
        let mut policy = FlipPolicy::default();
        policy.set_override("P", LimitOverride::Fixed(9));
        assert_eq!(policy.override_for("P"), Some(LimitOverride::Fixed(3)));
        assert_eq!(policy.effective_limit(&phase_with(0, 5, 1)), Some(3));

        policy.set_override("P", LimitOverride::fixed(1));
        assert!(!policy.can_flip(&phase_with(1, 5, 5)));

        policy.set_override("P", LimitOverride::Fixed(0));
        assert!(policy.can_flip(&phase_with(4, 5, 1)));
    }

    #[test]
    fn test_reveal_all() {
        let mut policy = FlipPolicy::default();
        policy.set_reveal_all("P", true);
        assert!(policy.can_flip(&phase_with(2, 3, 2)));

        policy.set_reveal_all("P", false);
        assert!(!policy.is_reveal_all("P"));
        assert!(!policy.can_flip(&phase_with(2, 3, 2)));
    }

    #[test]
    fn test_override_serde() {
        let json = serde_json::to_string(&LimitOverride::Fixed(2)).unwrap();
        assert_eq!(json, r#"{"fixed":2}"#);
        let back: LimitOverride = serde_json::from_str(r#""unlimited""#).unwrap();
        assert_eq!(back, LimitOverride::Unlimited);
    }
}
