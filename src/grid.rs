//! Grid coordinates and adjacency

use std::fmt;

/// Location on the grid, `x` is the column and `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    /// Scan order used by the path finder. Ties between equally short paths
    /// are broken by this order.
    pub const ALL: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
        }
    }
}

/// Square `size` x `size` grid with fixed terminals in opposite corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    pub fn end(&self) -> Cell {
        Cell::new(self.size - 1, self.size - 1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    /// Cell one step away in `dir`, if it is still on the grid.
    pub fn step(&self, cell: Cell, dir: Dir) -> Option<Cell> {
        let (dx, dy) = dir.delta();
        let nx = cell.x as isize + dx;
        let ny = cell.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let next = Cell::new(nx as usize, ny as usize);
        self.contains(next).then_some(next)
    }

    /// In-bounds orthogonal neighbours in [Dir::ALL] order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Dir::ALL.into_iter().filter_map(move |dir| self.step(cell, dir))
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell::new(x, y)))
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminals_are_opposite_corners() {
        let grid = Grid::new(20);
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.end(), Cell::new(19, 19));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let grid = Grid::new(5);
        let n: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(n, vec![Cell::new(1, 0), Cell::new(0, 1)]);

        let n: Vec<_> = grid.neighbors(Cell::new(4, 4)).collect();
        assert_eq!(n, vec![Cell::new(3, 4), Cell::new(4, 3)]);
    }

    #[test]
    fn interior_neighbors_follow_scan_order() {
        let grid = Grid::new(5);
        let n: Vec<_> = grid.neighbors(Cell::new(2, 2)).collect();
        assert_eq!(
            n,
            vec![
                Cell::new(1, 2),
                Cell::new(3, 2),
                Cell::new(2, 1),
                Cell::new(2, 3)
            ]
        );
    }

    #[test]
    fn cells_cover_grid_once() {
        let grid = Grid::new(4);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert!(cells.iter().all(|c| grid.contains(*c)));
        assert!(!grid.contains(Cell::new(4, 0)));
    }
}
