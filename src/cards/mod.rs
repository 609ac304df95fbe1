//! Card system: dealt cards, prompt catalog, and rendered images.
//!
//! ## Key Types
//!
//! - `CardId`: Stable card identifier (e.g. `"Q7"`)
//! - `Card`: Runtime card state (flipped, owner)
//! - `PromptCatalog`: Prompt text lookup, with the built-in demo story
//! - `CardRenderer`: Seam for the external image renderer
//! - `CardImages`: Per-session cache of rendered backs and fronts

pub mod card;
pub mod catalog;
pub mod render;

pub use card::{Card, CardId};
pub use catalog::PromptCatalog;
pub use render::{BlankRenderer, CardImages, CardRenderer, ImageBytes};
