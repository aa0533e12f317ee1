//! Seeding planes and querying their generations.

use crate::args::{Args, Plane};
use lifecache_lib::{Efficiency, Error, GenerationRepository, GenerationResult};
use log::{info, warn};
use std::{
    io::{self, Write},
    thread,
};

/// What happened on one plane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) plane: String,
    pub(crate) hits: u64,
    pub(crate) partial_hits: u64,
    pub(crate) misses: u64,
    pub(crate) calculations: u64,
    pub(crate) population: usize,
}

impl Summary {
    fn record(&mut self, result: &GenerationResult) {
        match result.efficiency {
            Efficiency::Hit => self.hits += 1,
            Efficiency::PartialHit => self.partial_hits += 1,
            Efficiency::Miss => self.misses += 1,
        }
        self.calculations += result.calculations;
        self.population = result.generation.alive_count();
    }
}

/// Seeds `plane` and queries it from its starting index on.
///
/// Queried generations are written to `out`, if any, until a write fails.
fn drive<R, W>(
    repository: &R,
    plane: &Plane,
    generations: u64,
    step: usize,
    mut out: Option<W>,
) -> Summary
where
    R: GenerationRepository + ?Sized,
    W: Write,
{
    let mut summary = Summary {
        plane: plane.name.clone(),
        ..Summary::default()
    };
    repository.add(&plane.name, plane.index, plane.seed.clone());
    let last = plane.index.saturating_add(generations);
    for index in (plane.index..=last).step_by(step) {
        let result = repository.get(&plane.name, index);
        if let Some(writer) = out.as_mut() {
            if let Err(e) = write!(
                writer,
                "{} generation {}: {:?}, {} calculations\n{}",
                plane.name, index, result.efficiency, result.calculations, result.generation
            ) {
                warn!("Stopped printing plane {:?}: {}", plane.name, e);
                out = None;
            }
        }
        summary.record(&result);
    }
    summary
}

/// Runs every plane on its own thread against one shared repository.
pub(crate) fn run(args: &Args) -> Result<Vec<Summary>, Error> {
    let repository = args.config.repository()?;
    info!(
        "Running {} planes under {} for {} generations",
        args.planes.len(),
        repository.rule(),
        args.generations
    );
    let summaries = thread::scope(|s| {
        let handles: Vec<_> = args
            .planes
            .iter()
            .map(|plane| {
                let repository = &repository;
                s.spawn(move || {
                    let out = args.print.then(io::stdout);
                    drive(repository, plane, args.generations, args.step, out)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
    });
    let mut results = Vec::with_capacity(summaries.len());
    for summary in summaries {
        match summary {
            Ok(summary) => results.push(summary),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
    Ok(results)
}

/// Prints the summaries as a table.
pub(crate) fn print_summaries(summaries: &[Summary]) {
    println!(
        "{:<16} {:>8} {:>12} {:>8} {:>12} {:>10}",
        "plane", "hits", "partial hits", "misses", "calculations", "population"
    );
    for s in summaries {
        println!(
            "{:<16} {:>8} {:>12} {:>8} {:>12} {:>10}",
            s.plane, s.hits, s.partial_hits, s.misses, s.calculations, s.population
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecache_lib::{Generation, InMemoryGenerationRepository};

    #[test]
    fn serial_queries_are_one_step_each() {
        let repository = InMemoryGenerationRepository::new();
        let plane = Plane {
            name: String::from("bar"),
            index: 3,
            seed: Generation::horizontal_bar_at(0, 0),
        };
        let summary = drive(&repository, &plane, 10, 1, None::<Vec<u8>>);
        assert_eq!(
            summary,
            Summary {
                plane: String::from("bar"),
                hits: 1,
                partial_hits: 10,
                misses: 0,
                calculations: 10,
                population: 3,
            }
        );
        assert_eq!(repository.indices("bar").len(), 11);
    }

    #[test]
    fn strided_queries() {
        let repository = InMemoryGenerationRepository::new();
        let plane = Plane {
            name: String::from("block"),
            index: 0,
            seed: Generation::block_at(0, 0),
        };
        let summary = drive(&repository, &plane, 9, 3, None::<Vec<u8>>);
        assert_eq!(summary.hits, 1);
        assert_eq!(summary.partial_hits, 3);
        assert_eq!(summary.calculations, 9);
        assert_eq!(summary.population, 4);
    }

    #[test]
    fn printed_generations() {
        let repository = InMemoryGenerationRepository::new();
        let plane = Plane {
            name: String::from("bar"),
            index: 0,
            seed: Generation::horizontal_bar_at(1, 0),
        };
        let mut out = Vec::new();
        drive(&repository, &plane, 1, 1, Some(&mut out));
        assert_eq!(
            String::from_utf8_lossy(&out),
            "bar generation 0: Hit, 0 calculations\n!Origin: (0, 0)\nooo\n\
             bar generation 1: PartialHit, 1 calculations\n!Origin: (1, -1)\no\no\no\n"
        );
    }

    /// A writer whose reader has gone away.
    struct ClosedPipe {
        attempts: usize,
    }

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn printing_stops_after_a_failed_write() {
        let repository = InMemoryGenerationRepository::new();
        let plane = Plane {
            name: String::from("block"),
            index: 0,
            seed: Generation::block_at(0, 0),
        };
        let mut pipe = ClosedPipe { attempts: 0 };
        let summary = drive(&repository, &plane, 5, 1, Some(&mut pipe));
        assert_eq!(pipe.attempts, 1);
        assert_eq!(summary.hits + summary.partial_hits, 6);
        assert_eq!(summary.calculations, 5);
    }
}
