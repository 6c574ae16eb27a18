//! initial populations for a world.

use rand::Rng;

use crate::{Grid, Pos, World};

/// every cell of the grid is independently alive with probability `density`.
///
/// densities outside of `[0, 1]` are clamped, a NaN density yields an empty world.
pub fn generate_random<W, R>(grid: Grid, density: f64, rng: &mut R) -> W
where
    W: World,
    R: Rng + ?Sized,
{
    if density.is_nan() {
        return W::default();
    }
    let density = density.clamp(0.0, 1.0);
    let mut world = W::default();
    for pos in grid.positions() {
        if rng.gen_bool(density) {
            world.set_alive(pos, true);
        }
    }
    world
}

/// a fixed decorative overlay: a cross, an x, a ring, a parabola and a quartic
/// curve, all centered on the grid.
pub fn generate_pattern<W>(grid: Grid) -> W
where
    W: World,
{
    let mut world = W::default();
    for pos in grid.positions().filter(|pos| in_pattern(grid, *pos)) {
        world.set_alive(pos, true);
    }
    world
}

fn in_pattern(grid: Grid, Pos { x, y }: Pos) -> bool {
    let (rows, cols) = (grid.rows as i64, grid.cols as i64);
    let (x, y) = (x as i64, y as i64);
    let (center_x, center_y) = (cols / 2, rows / 2);
    let (dx, dy) = (x - center_x, y - center_y);

    let cross = x == center_x || y == center_y;
    let diagonals = x == y || x == cols - y;

    let inner = (rows - 10).div_euclid(2).pow(2);
    let outer = (rows / 2).pow(2);
    let distance = dx * dx + dy * dy;
    let ring = inner < distance && distance < outer;

    let parabola = y == center_y - dx.pow(2) / 100;
    let quartic = y == center_y - dx.pow(4) / 1_000_000;

    cross || diagonals || ring || parabola || quartic
}
