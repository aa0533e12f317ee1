//! Outcomes of cache lookups.

use crate::generation::Generation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a lookup was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Efficiency {
    /// The requested index was cached.
    Hit,
    /// An earlier index was cached and evolved forward.
    PartialHit,
    /// Nothing at or before the requested index was cached.
    Miss,
}

/// The result of [`GenerationRepository::get`](crate::GenerationRepository::get).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationResult {
    /// The generation found or computed.
    ///
    /// Empty on a [`Miss`](Efficiency::Miss).
    pub generation: Generation,

    /// How the lookup was satisfied.
    pub efficiency: Efficiency,

    /// Number of evolution steps performed to produce the generation.
    pub calculations: u64,
}

impl GenerationResult {
    /// An exact hit.
    pub fn hit(generation: Generation) -> Self {
        GenerationResult {
            generation,
            efficiency: Efficiency::Hit,
            calculations: 0,
        }
    }

    /// A generation computed from an earlier one in `calculations` steps.
    pub fn partial_hit(generation: Generation, calculations: u64) -> Self {
        GenerationResult {
            generation,
            efficiency: Efficiency::PartialHit,
            calculations,
        }
    }

    /// Nothing usable was cached.
    pub fn miss() -> Self {
        GenerationResult {
            generation: Generation::empty(),
            efficiency: Efficiency::Miss,
            calculations: 0,
        }
    }

    /// Whether a generation was found or computed.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.efficiency != Efficiency::Miss
    }
}
