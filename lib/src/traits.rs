//! A trait for generation stores.

use crate::{generation::Generation, result::GenerationResult};

/// A store of generations, keyed by plane name and generation index.
///
/// So that callers can switch between different stores using trait objects.
///
/// Implementations must be safe to share between threads. Operations on
/// one plane never wait for, or observe, operations on another plane.
pub trait GenerationRepository: Send + Sync {
    /// Stores `generation` as the generation of `plane` at `index`,
    /// replacing whatever was stored there.
    fn add(&self, plane: &str, index: u64, generation: Generation);

    /// Looks up the generation of `plane` at `index`.
    ///
    /// * If that exact index is stored, returns a
    ///   [`Hit`](crate::Efficiency::Hit).
    /// * Otherwise, if some earlier index is stored, evolves the closest one
    ///   forward, stores the result at `index`, and returns a
    ///   [`PartialHit`](crate::Efficiency::PartialHit).
    /// * Otherwise returns a [`Miss`](crate::Efficiency::Miss).
    ///   Later generations are never used to answer for earlier ones.
    fn get(&self, plane: &str, index: u64) -> GenerationResult;
}
