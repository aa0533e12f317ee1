//! Generations of the automaton on the infinite plane.

use crate::{cells::Cell, error::Error, rule::Rule};
use rand::Rng;
use std::{
    collections::{BTreeSet, HashMap},
    fmt::{self, Display, Formatter},
    sync::Arc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the automaton: the set of living cells.
///
/// Every cell not in the set is dead, so the plane is unbounded
/// and only the living cells take memory.
///
/// The set is shared behind an [`Arc`]. Cloning a generation is cheap,
/// and a generation can be handed to other threads without copying.
/// Evolving never touches the current set; it always builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<Cell>", into = "Vec<Cell>")
)]
pub struct Generation {
    alive: Arc<BTreeSet<Cell>>,
}

impl Generation {
    /// The generation where every cell is dead.
    pub fn empty() -> Self {
        Generation::default()
    }

    /// A generation whose living cells are exactly `cells`.
    pub fn with_alive_cells<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Generation {
            alive: Arc::new(cells.into_iter().map(Into::into).collect()),
        }
    }

    /// A 2×2 [block](https://conwaylife.com/wiki/Block) whose
    /// top-left cell is `(x, y)`.
    ///
    /// It is a still life.
    pub fn block_at(x: i32, y: i32) -> Self {
        Generation::with_alive_cells([(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)])
    }

    /// A horizontal [blinker](https://conwaylife.com/wiki/Blinker)
    /// centered at `(x, y)`.
    ///
    /// It becomes [`vertical_bar_at(x, y)`](Self::vertical_bar_at)
    /// in the next generation.
    pub fn horizontal_bar_at(x: i32, y: i32) -> Self {
        Generation::with_alive_cells([(x - 1, y), (x, y), (x + 1, y)])
    }

    /// A vertical [blinker](https://conwaylife.com/wiki/Blinker)
    /// centered at `(x, y)`.
    ///
    /// It becomes [`horizontal_bar_at(x, y)`](Self::horizontal_bar_at)
    /// in the next generation.
    pub fn vertical_bar_at(x: i32, y: i32) -> Self {
        Generation::with_alive_cells([(x, y - 1), (x, y), (x, y + 1)])
    }

    /// A random soup filling a `width` × `height` rectangle whose top-left
    /// cell is the origin.
    ///
    /// Each cell is alive with probability `density`.
    pub fn soup<R: Rng + ?Sized>(
        rng: &mut R,
        width: u32,
        height: u32,
        density: f64,
    ) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::DensityError(density));
        }
        let width = i32::try_from(width).map_err(|_| Error::PatternSizeError)?;
        let height = i32::try_from(height).map_err(|_| Error::PatternSizeError)?;
        let mut alive = BTreeSet::new();
        for y in 0..height {
            for x in 0..width {
                if rng.gen_bool(density) {
                    alive.insert(Cell::new(x, y));
                }
            }
        }
        Ok(Generation {
            alive: Arc::new(alive),
        })
    }

    /// Parses a pattern in [Plaintext](https://conwaylife.com/wiki/Plaintext)
    /// format, placing its first character at `origin`.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o`, `O` or `*`;
    /// * Lines starting with `!` are comments.
    ///
    /// Rows may have different lengths; missing cells are dead.
    pub fn from_plaintext(text: &str, origin: Cell) -> Result<Self, Error> {
        let mut alive = BTreeSet::new();
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.starts_with('!'));
        for (row, (i, line)) in rows.enumerate() {
            for (j, ch) in line.trim_end().chars().enumerate() {
                match ch {
                    '.' => (),
                    'o' | 'O' | '*' => {
                        alive.insert(Self::plaintext_cell(origin, j, row)?);
                    }
                    _ => {
                        return Err(Error::PatternCharError {
                            ch,
                            line: i + 1,
                            column: j + 1,
                        })
                    }
                }
            }
        }
        Ok(Generation {
            alive: Arc::new(alive),
        })
    }

    fn plaintext_cell(origin: Cell, column: usize, row: usize) -> Result<Cell, Error> {
        let dx = i32::try_from(column).map_err(|_| Error::PatternSizeError)?;
        let dy = i32::try_from(row).map_err(|_| Error::PatternSizeError)?;
        match (origin.x.checked_add(dx), origin.y.checked_add(dy)) {
            (Some(x), Some(y)) => Ok(Cell::new(x, y)),
            _ => Err(Error::PatternSizeError),
        }
    }

    /// Whether every cell is dead.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Number of living cells.
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Whether `cell` is alive.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }

    /// The living cells, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let mut cells: Vec<_> = self.alive.iter().copied().collect();
        cells.sort_by_key(|c| (c.y, c.x));
        cells.into_iter()
    }

    /// The smallest rectangle containing every living cell,
    /// as `(top-left, bottom-right)`, both inclusive.
    ///
    /// `None` for the empty generation.
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        let first = *self.alive.iter().next()?;
        let bbox = self.alive.iter().fold((first, first), |(min, max), c| {
            (
                Cell::new(min.x.min(c.x), min.y.min(c.y)),
                Cell::new(max.x.max(c.x), max.y.max(c.y)),
            )
        });
        Some(bbox)
    }

    /// The same pattern shifted by `(dx, dy)`.
    ///
    /// Fails if some living cell would leave the coordinate range.
    pub fn translate(&self, dx: i32, dy: i32) -> Result<Self, Error> {
        let alive = self
            .alive
            .iter()
            .map(|c| c.checked_offset(dx, dy).ok_or(Error::PatternSizeError))
            .collect::<Result<_, _>>()?;
        Ok(Generation {
            alive: Arc::new(alive),
        })
    }

    /// The next generation under Conway's Game of Life.
    pub fn evolve(&self) -> Self {
        self.step(&Rule::conway())
    }

    /// The generation `n` steps later under Conway's Game of Life.
    pub fn evolve_n(&self, n: u64) -> Self {
        self.step_n(&Rule::conway(), n)
    }

    /// The next generation under `rule`.
    ///
    /// Only living cells and their neighbors can be alive in the next
    /// generation, so those are the only cells examined.
    /// Cells outside the `i32` coordinate range never come alive.
    pub fn step(&self, rule: &Rule) -> Self {
        let mut counts: HashMap<Cell, u8> = HashMap::with_capacity(self.alive.len() * 9);
        for &cell in self.alive.iter() {
            counts.entry(cell).or_insert(0);
            for nbr in cell.neighbors() {
                *counts.entry(nbr).or_insert(0) += 1;
            }
        }
        let alive = counts
            .into_iter()
            .filter(|&(cell, n)| rule.next_state(self.alive.contains(&cell), n))
            .map(|(cell, _)| cell)
            .collect();
        Generation {
            alive: Arc::new(alive),
        }
    }

    /// The generation `n` steps later under `rule`.
    pub fn step_n(&self, rule: &Rule, n: u64) -> Self {
        let mut gen = self.clone();
        for _ in 0..n {
            gen = gen.step(rule);
        }
        gen
    }
}

impl From<Vec<Cell>> for Generation {
    fn from(cells: Vec<Cell>) -> Self {
        Generation::with_alive_cells(cells)
    }
}

impl From<Generation> for Vec<Cell> {
    fn from(gen: Generation) -> Self {
        gen.alive.iter().copied().collect()
    }
}

/// Displays the bounding box of the generation in
/// [Plaintext](https://conwaylife.com/wiki/Plaintext) format,
/// preceded by a comment line giving the coordinates of its top-left cell.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
///
/// The empty generation is displayed as a lone comment line.
impl Display for Generation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (min, max) = match self.bounding_box() {
            Some(bbox) => bbox,
            None => return writeln!(f, "!Empty"),
        };
        writeln!(f, "!Origin: {}", min)?;
        for y in min.y..=max.y {
            let mut row = String::with_capacity(max.x.abs_diff(min.x) as usize + 1);
            for x in min.x..=max.x {
                row.push(if self.contains(Cell::new(x, y)) { 'o' } else { '.' });
            }
            writeln!(f, "{}", row.trim_end_matches('.'))?;
        }
        Ok(())
    }
}
