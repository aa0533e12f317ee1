use lifecache_lib::{
    Cell, Config, Efficiency, Generation, GenerationRepository, GenerationResult,
    InMemoryGenerationRepository,
};
use std::error::Error;

fn single() -> Generation {
    Generation::with_alive_cells([Cell::new(0, 1)])
}

#[test]
fn stores_a_generation_by_plane_and_index() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("single", 4, single());
    assert_eq!(
        repository.get("single", 4),
        GenerationResult::hit(single())
    );
}

#[test]
fn missing_values_are_misses() {
    let repository = InMemoryGenerationRepository::new();
    assert_eq!(repository.get("single", 4), GenerationResult::miss());
    assert_eq!(repository.get("single", 0), GenerationResult::miss());
}

#[test]
fn outdated_values_are_evolved_forward() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("single", 3, single());
    assert_eq!(
        repository.get("single", 4),
        GenerationResult::partial_hit(Generation::empty(), 1)
    );

    repository.add("block", 3, Generation::block_at(0, 1));
    assert_eq!(
        repository.get("block", 4),
        GenerationResult::partial_hit(Generation::block_at(0, 1).evolve(), 1)
    );
}

#[test]
fn the_closest_earlier_generation_is_the_base() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("single", 2, single());
    repository.add("single", 3, Generation::block_at(0, 1));
    assert_eq!(
        repository.get("single", 5),
        GenerationResult::partial_hit(Generation::block_at(0, 1).evolve().evolve(), 2)
    );
}

#[test]
fn insertion_order_is_irrelevant() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("single", 3, Generation::block_at(0, 1));
    repository.add("single", 2, single());
    assert_eq!(
        repository.get("single", 5),
        GenerationResult::partial_hit(Generation::block_at(0, 1), 2)
    );
}

#[test]
fn computed_generations_are_cached() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("single", 3, Generation::block_at(0, 1));
    let first = repository.get("single", 5);
    assert_eq!(first.efficiency, Efficiency::PartialHit);
    let second = repository.get("single", 5);
    assert_eq!(second, GenerationResult::hit(first.generation));
    assert_eq!(repository.indices("single"), vec![3, 5]);
}

#[test]
fn earlier_generations_are_not_computed_from_later_ones() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("single", 4, single());
    assert_eq!(repository.get("single", 3), GenerationResult::miss());
    assert_eq!(repository.indices("single"), vec![4]);
}

#[test]
fn add_overwrites() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("plane", 0, Generation::block_at(0, 0));
    repository.add("plane", 0, Generation::horizontal_bar_at(0, 0));
    assert_eq!(
        repository.get("plane", 0),
        GenerationResult::hit(Generation::horizontal_bar_at(0, 0))
    );
    assert_eq!(
        repository.get("plane", 1).generation,
        Generation::vertical_bar_at(0, 0)
    );
}

#[test]
fn planes_are_independent() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("a", 0, Generation::horizontal_bar_at(0, 0));
    repository.add("b", 5, Generation::block_at(3, 3));
    assert_eq!(repository.get("a", 5).calculations, 5);
    assert_eq!(
        repository.get("b", 5),
        GenerationResult::hit(Generation::block_at(3, 3))
    );
    assert_eq!(repository.get("b", 2), GenerationResult::miss());
    assert_eq!(repository.planes(), vec!["a", "b"]);
}

#[test]
fn serial_access_needs_one_step_each() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("bar", 0, Generation::horizontal_bar_at(0, 1));
    assert_eq!(repository.get("bar", 0).efficiency, Efficiency::Hit);
    for i in 1..50 {
        let result = repository.get("bar", i);
        assert_eq!(result.efficiency, Efficiency::PartialHit);
        assert_eq!(result.calculations, 1);
    }
}

#[test]
fn requery_is_a_hit() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("bar", 0, Generation::horizontal_bar_at(0, 0));
    for i in [7, 3, 20, 3] {
        let first = repository.get("bar", i);
        let second = repository.get("bar", i);
        assert_eq!(second.efficiency, Efficiency::Hit);
        assert_eq!(second.generation, first.generation);
    }
}

#[test]
fn config_rule() -> Result<(), Box<dyn Error>> {
    // HighLife: the dead cell at (1, 1) has 6 living neighbors and is born.
    let repository = Config::new().set_rule_string("B36/S23").repository()?;
    let ring = Generation::with_alive_cells([(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2)]);
    repository.add("highlife", 0, ring.clone());
    let result = repository.get("highlife", 1);
    assert_eq!(result.generation, ring.step(repository.rule()));
    assert!(result.generation.contains(Cell::new(1, 1)));
    assert_ne!(result.generation, ring.evolve());
    Ok(())
}

#[test]
fn config_rejects_bad_rules() {
    assert!(Config::new().set_rule_string("B0/S8").repository().is_err());
    assert!(Config::new().set_rule_string("what").repository().is_err());
}

#[test]
fn config_cache_intermediate() -> Result<(), Box<dyn Error>> {
    let repository = Config::new().set_cache_intermediate(true).repository()?;
    repository.add("block", 0, Generation::block_at(0, 0));
    assert_eq!(repository.get("block", 3).calculations, 3);
    assert_eq!(repository.get("block", 2).efficiency, Efficiency::Hit);
    Ok(())
}

#[test]
fn trait_objects() {
    let repository: Box<dyn GenerationRepository> = Box::new(InMemoryGenerationRepository::new());
    repository.add("block", 1, Generation::block_at(0, 0));
    assert_eq!(repository.get("block", 2).calculations, 1);
}

#[test]
fn planes_reach_the_edges_of_the_coordinate_range() {
    let repository = InMemoryGenerationRepository::new();
    repository.add("edge", 0, Generation::with_alive_cells([Cell::new(i32::MIN, 0)]));
    assert_eq!(
        repository.get("edge", 1),
        GenerationResult::partial_hit(Generation::empty(), 1)
    );

    repository.add("bar", 0, Generation::horizontal_bar_at(i32::MAX - 1, 0));
    assert_eq!(
        repository.get("bar", 3),
        GenerationResult::partial_hit(Generation::vertical_bar_at(i32::MAX - 1, 0), 3)
    );
}
