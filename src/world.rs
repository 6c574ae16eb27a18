use std::fmt;

use crate::{pos, Pos};

/// dimensions of the toroidal grid, fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
}

impl Grid {
    /// both dimensions must be positive.
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self { rows, cols }
    }

    pub fn contains(&self, Pos { x, y }: Pos) -> bool {
        (0..self.cols).contains(&x) && (0..self.rows).contains(&y)
    }

    /// maps any position onto the torus.
    pub fn wrap(&self, Pos { x, y }: Pos) -> Pos {
        pos!(x.rem_euclid(self.cols), y.rem_euclid(self.rows))
    }

    /// every position of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let Self { rows, cols } = *self;
        (0..rows).flat_map(move |y| (0..cols).map(move |x| pos!(x, y)))
    }

    pub fn area(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// a set of live cells. a position is either present (alive) or absent (dead).
///
/// implementors never wrap positions themselves, callers are expected to only
/// store positions that are inside the grid.
pub trait World: Default + Clone + Send + 'static {
    fn is_alive(&self, pos: Pos) -> bool;
    fn set_alive(&mut self, pos: Pos, alive: bool);
    fn actives(&self) -> Vec<Pos>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// flips the state of a cell, returns whether it is now alive.
    fn toggle(&mut self, pos: Pos) -> bool {
        let alive = !self.is_alive(pos);
        self.set_alive(pos, alive);
        alive
    }
}

pub use hashed_world::HashedWorld;
mod hashed_world;
