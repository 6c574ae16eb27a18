use std::ops::Add;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos { x: $x, y: $y }
    };
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

/// the eight offsets of the moore neighborhood.
pub const NEIGHBOR_OFFSETS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(0, -1),
    pos!(1, -1),
    pos!(-1, 0),
    pos!(1, 0),
    pos!(-1, 1),
    pos!(0, 1),
    pos!(1, 1),
];

impl Pos {
    /// iterates over the positions surrounding this one, without wrapping.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        NEIGHBOR_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}

#[test]
fn test_neighbors() {
    let neighbors: Vec<_> = pos!(3, 3).neighbors().collect();
    assert_eq!(neighbors.len(), 8);
    assert!(!neighbors.contains(&pos!(3, 3)));
    assert!(neighbors.contains(&pos!(2, 2)));
    assert!(neighbors.contains(&pos!(4, 4)));
    assert!(neighbors.contains(&pos!(3, 4)));
}
