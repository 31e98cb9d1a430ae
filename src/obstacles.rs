//! Random obstacle placement

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::grid::{Cell, Grid};

/// Blocked cells of one maze. Never holds the start or end cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstacleSet {
    cells: HashSet<Cell>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }
}

impl FromIterator<Cell> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Number of random draws for a grid of `size`, a quarter of the cells.
pub fn default_draws(size: usize) -> usize {
    size * size / 4
}

/// Draw `draws` uniform cells with replacement.
///
/// Duplicate draws collapse and draws landing on a terminal are discarded, so
/// the result may hold fewer than `draws` cells. There is no topping up.
pub fn generate_obstacles(grid: &Grid, draws: usize, rng: &mut impl Rng) -> ObstacleSet {
    let (start, end) = (grid.start(), grid.end());
    let mut obstacles = ObstacleSet::new();
    for _ in 0..draws {
        let cell = Cell::new(rng.gen_range(0..grid.size()), rng.gen_range(0..grid.size()));
        if cell != start && cell != end {
            obstacles.insert(cell);
        }
    }
    debug!("placed {} obstacles from {} draws", obstacles.len(), draws);
    obstacles
}
