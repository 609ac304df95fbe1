//! Card image rendering seam.
//!
//! Drawing card faces is not this crate's job. A presentation layer plugs in a
//! `CardRenderer`; the session asks it for the shared back once and for each
//! dealt card's front once, and keeps the results in a `CardImages` cache.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::card::{Card, CardId};

/// Encoded image bytes (PNG, SVG, whatever the renderer produces).
pub type ImageBytes = Arc<[u8]>;

/// Produces card images. Implementations should be deterministic and free of
/// side effects; the session may call them again after a reset for cards it
/// has not seen before.
pub trait CardRenderer {
    /// Render the image shared by every facedown card.
    fn render_back(&self) -> Vec<u8>;

    /// Render the face of one card.
    fn render_front(&self, id: &CardId, prompt: &str) -> Vec<u8>;
}

/// Renderer that produces empty images, for headless drivers and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlankRenderer;

impl CardRenderer for BlankRenderer {
    fn render_back(&self) -> Vec<u8> {
        Vec::new()
    }

    fn render_front(&self, _id: &CardId, _prompt: &str) -> Vec<u8> {
        Vec::new()
    }
}

/// Rendered images for one session, keyed by card ID.
#[derive(Clone, Debug, Default)]
pub struct CardImages {
    back: Option<ImageBytes>,
    fronts: FxHashMap<CardId, ImageBytes>,
}

impl CardImages {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render whatever is missing for `cards`.
    ///
    /// Returns the number of renderer calls made.
    pub fn warm<'a>(
        &mut self,
        renderer: &dyn CardRenderer,
        cards: impl IntoIterator<Item = &'a Card>,
    ) -> usize {
        let mut calls = 0;
        if self.back.is_none() {
            self.back = Some(renderer.render_back().into());
            calls += 1;
        }
        for card in cards {
            if !self.fronts.contains_key(&card.id) {
                let front = renderer.render_front(&card.id, &card.prompt);
                self.fronts.insert(card.id.clone(), front.into());
                calls += 1;
            }
        }
        calls
    }

    /// The shared card back, once rendered.
    #[must_use]
    pub fn back(&self) -> Option<&ImageBytes> {
        self.back.as_ref()
    }

    /// The front of a card, once rendered.
    #[must_use]
    pub fn front(&self, id: &CardId) -> Option<&ImageBytes> {
        self.fronts.get(id)
    }

    /// Number of cached fronts.
    #[must_use]
    pub fn front_count(&self) -> usize {
        self.fronts.len()
    }
}
