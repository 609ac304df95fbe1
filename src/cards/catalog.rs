//! Prompt catalog for card lookup.
//!
//! The `PromptCatalog` maps card IDs to the prompt text shown once a card is
//! flipped. It ships with the twelve-card demo story and can be overlaid with
//! prompts from configuration.

use rustc_hash::FxHashMap;

use super::card::CardId;

/// The demo story: one short inject per card, Q1 through Q12.
const DEMO_STORY: [(&str, &str); 12] = [
    ("Q1", "Strategic: Activate CIRP immediately?"),
    ("Q2", "Tactical: First containment action?"),
    ("Q3", "Operational: HR calm comms?"),
    ("Q4", "Strategic: Partner notification timing?"),
    ("Q5", "Tactical: Isolate repos/servers?"),
    ("Q6", "Operational: Contact center script?"),
    ("Q7", "Strategic: Ransom stance (LE & backups)?"),
    ("Q8", "Tactical: Verify backup integrity first?"),
    ("Q9", "Operational: Staff breach notice guidance?"),
    ("Q10", "Strategic: Improve CIRP + BCP?"),
    ("Q11", "Tactical: Backup test + EDR + awareness?"),
    ("Q12", "Wildcard: Chaos card / random constraint"),
];

/// Catalog of card prompts.
///
/// ## Example
///
/// ```
/// use ttx_deck::cards::{CardId, PromptCatalog};
///
/// let mut catalog = PromptCatalog::demo_story();
/// catalog.insert(CardId::new("Q13"), "Bonus: Press leak");
///
/// assert_eq!(catalog.prompt(&CardId::new("Q13")), "Bonus: Press leak");
/// assert_eq!(catalog.prompt(&CardId::new("Q99")), "");
/// ```
#[derive(Clone, Debug, Default)]
pub struct PromptCatalog {
    prompts: FxHashMap<CardId, String>,
}

impl PromptCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in twelve-card demo story.
    #[must_use]
    pub fn demo_story() -> Self {
        let mut catalog = Self::new();
        for (id, prompt) in DEMO_STORY {
            catalog.insert(CardId::new(id), prompt);
        }
        catalog
    }

    /// Set the prompt for a card, replacing any previous one.
    pub fn insert(&mut self, id: CardId, prompt: impl Into<String>) {
        self.prompts.insert(id, prompt.into());
    }

    /// Overlay another set of prompts on top of this catalog.
    pub fn extend<I, K, V>(&mut self, prompts: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<CardId>,
        V: Into<String>,
    {
        for (id, prompt) in prompts {
            self.insert(id.into(), prompt);
        }
    }

    /// Prompt text for a card; cards missing from the catalog get an empty prompt.
    #[must_use]
    pub fn prompt(&self, id: &CardId) -> &str {
        self.prompts.get(id).map_or("", String::as_str)
    }

    /// Number of prompts in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
