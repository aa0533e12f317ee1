//! The in-memory generation cache.

use crate::{
    generation::Generation, result::GenerationResult, rule::Rule, traits::GenerationRepository,
};
use dashmap::DashMap;
use log::{debug, trace};
use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};

/// The cached generations of one plane, ordered by index.
type Plane = BTreeMap<u64, Generation>;

/// A [`GenerationRepository`] keeping every generation in memory.
///
/// Each plane has its own lock, created on first use. The map from plane
/// names to planes is only locked long enough to find or insert a plane,
/// never while a generation is being computed.
///
/// Nothing is ever evicted.
#[derive(Debug, Default)]
pub struct InMemoryGenerationRepository {
    /// The rule used to evolve cached generations forward.
    rule: Rule,

    /// Whether to store every generation computed on the way to the
    /// requested one, instead of the requested one only.
    cache_intermediate: bool,

    planes: DashMap<String, Arc<Mutex<Plane>>>,
}

impl InMemoryGenerationRepository {
    /// An empty repository evolving generations under Conway's Game of Life.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty repository evolving generations under `rule`.
    pub fn with_rule(rule: Rule) -> Self {
        InMemoryGenerationRepository {
            rule,
            ..Self::default()
        }
    }

    /// Sets whether to store intermediate generations when a lookup
    /// evolves over more than one step.
    ///
    /// This only saves later computations; the results of lookups,
    /// including their calculation counts, are the same either way.
    pub fn set_cache_intermediate(mut self, cache_intermediate: bool) -> Self {
        self.cache_intermediate = cache_intermediate;
        self
    }

    /// The rule used to evolve generations.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Names of all planes with at least one stored generation.
    pub fn planes(&self) -> Vec<String> {
        let mut names: Vec<_> = self.planes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Stored indices of `plane`, in ascending order.
    pub fn indices(&self, plane: &str) -> Vec<u64> {
        self.find_plane(plane)
            .map(|p| p.lock().keys().copied().collect())
            .unwrap_or_default()
    }

    fn find_plane(&self, name: &str) -> Option<Arc<Mutex<Plane>>> {
        self.planes.get(name).map(|p| Arc::clone(p.value()))
    }

    fn find_or_create_plane(&self, name: &str) -> Arc<Mutex<Plane>> {
        if let Some(plane) = self.find_plane(name) {
            return plane;
        }
        let plane = self.planes.entry(name.to_owned()).or_insert_with(|| {
            debug!("Creating plane {:?}", name);
            Arc::default()
        });
        Arc::clone(plane.value())
    }

    /// Evolves `base` by `steps` generations, storing the intermediate
    /// generations in `entries` if asked to.
    fn advance(
        &self,
        entries: &mut Plane,
        base_index: u64,
        base: Generation,
        steps: u64,
    ) -> Generation {
        if !self.cache_intermediate {
            return base.step_n(&self.rule, steps);
        }
        let mut gen = base;
        for i in 1..steps {
            gen = gen.step(&self.rule);
            entries.insert(base_index + i, gen.clone());
        }
        gen.step(&self.rule)
    }
}

impl GenerationRepository for InMemoryGenerationRepository {
    fn add(&self, plane: &str, index: u64, generation: Generation) {
        let plane_lock = self.find_or_create_plane(plane);
        plane_lock.lock().insert(index, generation);
        trace!("Stored generation {} of plane {:?}", index, plane);
    }

    fn get(&self, plane: &str, index: u64) -> GenerationResult {
        let plane_lock = match self.find_plane(plane) {
            Some(plane_lock) => plane_lock,
            None => {
                trace!("Miss for generation {} of unknown plane {:?}", index, plane);
                return GenerationResult::miss();
            }
        };

        // The plane stays locked until the computed generation is stored.
        let mut entries = plane_lock.lock();

        if let Some(generation) = entries.get(&index) {
            trace!("Hit for generation {} of plane {:?}", index, plane);
            return GenerationResult::hit(generation.clone());
        }

        let (base_index, base) = match entries.range(..index).next_back() {
            Some((&i, gen)) => (i, gen.clone()),
            None => {
                trace!("Miss for generation {} of plane {:?}", index, plane);
                return GenerationResult::miss();
            }
        };

        let steps = index - base_index;
        debug!(
            "Evolving plane {:?} from generation {} to {} ({} steps)",
            plane, base_index, index, steps
        );
        let generation = self.advance(&mut entries, base_index, base, steps);
        entries.insert(index, generation.clone());
        GenerationResult::partial_hit(generation, steps)
    }
}
