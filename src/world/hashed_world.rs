use std::collections::HashSet;

use metrohash::MetroBuildHasher;

use crate::{Pos, World};

/// live cells stored in a hash set keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashedWorld {
    cells: HashSet<Pos, MetroBuildHasher>,
}

impl FromIterator<Pos> for HashedWorld {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl World for HashedWorld {
    fn is_alive(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    fn set_alive(&mut self, pos: Pos, alive: bool) {
        if alive {
            self.cells.insert(pos);
        } else {
            self.cells.remove(&pos);
        }
    }

    fn actives(&self) -> Vec<Pos> {
        self.cells.iter().copied().collect()
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn clear(&mut self) {
        self.cells.clear()
    }
}
