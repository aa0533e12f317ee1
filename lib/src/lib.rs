//! A memoizing cache of Game of Life generations.
//!
//! Generations live on independent, named planes. A [`GenerationRepository`]
//! remembers every generation it is given or computes, and answers a lookup
//! by evolving the closest earlier generation of the same plane forward.

mod cells;
mod config;
mod error;
mod generation;
mod repository;
mod result;
mod rule;
mod traits;

pub use cells::Cell;
pub use config::Config;
pub use error::Error;
pub use generation::Generation;
pub use repository::InMemoryGenerationRepository;
pub use result::{Efficiency, GenerationResult};
pub use rule::Rule;
pub use traits::GenerationRepository;
