//! Grid geometry
//!
//! Integer cell coordinates, 0-indexed from the top-left corner.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A grid cell (x grows right, y grows down)
pub type Position = IVec2;

/// Unit heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this heading
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `other` points exactly the other way
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// True if `pos` occurs anywhere in `cells`
pub fn contains<'a>(cells: impl IntoIterator<Item = &'a Position>, pos: Position) -> bool {
    cells.into_iter().any(|&c| c == pos)
}

/// True if `pos` lies inside a `cols` x `rows` board
#[inline]
pub fn in_bounds(pos: Position, cols: i32, rows: i32) -> bool {
    pos.x >= 0 && pos.x < cols && pos.y >= 0 && pos.y < rows
}

/// Uniform random cell in [0, cols) x [0, rows)
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, cols: i32, rows: i32) -> Position {
    IVec2::new(rng.random_range(0..cols), rng.random_range(0..rows))
}
