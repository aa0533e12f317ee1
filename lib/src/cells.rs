//! Cells on the plane.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The relative positions of the eight neighbors of a cell.
static NEIGHBORHOOD: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A cell on the infinite plane, identified by its coordinates.
///
/// The `x` axis grows to the right and the `y` axis grows downwards,
/// matching the row order of [Plaintext](https://conwaylife.com/wiki/Plaintext).
///
/// Cells are plain values: two cells are equal iff their coordinates are.
///
/// Coordinates are `i32`. A cell whose neighbor would fall outside that range
/// simply has fewer neighbors; nothing wraps around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// The x-coordinate.
    pub x: i32,
    /// The y-coordinate.
    pub y: i32,
}

impl Cell {
    /// Creates a cell at `(x, y)`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The cell shifted by `(dx, dy)`,
    /// or `None` if that leaves the coordinate range.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Cell::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// The cells surrounding this one.
    ///
    /// There are eight of them, except on the edges of the coordinate range.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBORHOOD
            .iter()
            .filter_map(move |&(dx, dy)| self.checked_offset(dx, dy))
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
