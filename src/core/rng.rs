//! Injectable randomness for dealing and shuffling.
//!
//! ## Key Features
//!
//! - **Injectable**: sessions are generic over `RandomSource`
//! - **Deterministic**: `DeckRng` with the same seed deals identical decks
//! - **Scriptable**: `ScriptedRandom` lets tests dictate exact shuffle results
//!
//! ## Example
//!
//! ```
//! use ttx_deck::core::{DeckRng, RandomSource};
//!
//! let mut rng1 = DeckRng::new(42);
//! let mut rng2 = DeckRng::new(42);
//!
//! let mut a = vec![1, 2, 3, 4, 5];
//! let mut b = a.clone();
//! rng1.shuffle(&mut a);
//! rng2.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness consumed by a deck session.
///
/// Implementors only provide `gen_index`; the default `shuffle` is a
/// Fisher-Yates pass driven by it, walking from the last slot down.
pub trait RandomSource {
    /// Return an index in `0..upper`. `upper` is always at least 1.
    fn gen_index(&mut self, upper: usize) -> usize;

    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Seeded ChaCha8 RNG used by live sessions.
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The chosen seed is kept so a session can be replayed from logs.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for DeckRng {
    fn gen_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Replays a fixed sequence of indices, for tests that assert exact orders.
///
/// Each scripted value is reduced modulo the requested bound. Once the script
/// is exhausted every draw returns `upper - 1`, which makes the default
/// Fisher-Yates shuffle leave the slice untouched.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    script: VecDeque<usize>,
}

impl ScriptedRandom {
    /// Create a source that replays `script` and then keeps order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// A source whose shuffles never reorder anything.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn gen_index(&mut self, upper: usize) -> usize {
        match self.script.pop_front() {
            Some(value) => value % upper,
            None => upper - 1,
        }
    }
}
