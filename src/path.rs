//! Breadth-first shortest path search

use std::collections::VecDeque;

use log::debug;

use crate::grid::{Cell, Grid};
use crate::obstacles::ObstacleSet;

/// Shortest route from start to end, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Every cell on the route, beginning with the start cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells after the start cell, one per move.
    pub fn steps(&self) -> &[Cell] {
        &self.cells[1..]
    }

    pub fn step_count(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Cell {
        self.cells[0]
    }

    pub fn last(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }
}

/// Find the shortest path from `start` to `end` avoiding `obstacles`.
///
/// Neighbours are scanned in [crate::Dir::ALL] order and marked as visited
/// when enqueued, so every cell is queued at most once. Returns `None` when
/// `end` is unreachable.
pub fn find_path(grid: &Grid, start: Cell, end: Cell, obstacles: &ObstacleSet) -> Option<Path> {
    let size = grid.size();
    let mut prev: Vec<Vec<Option<Cell>>> = vec![vec![None; size]; size];
    let mut visited = vec![vec![false; size]; size];
    let mut q = VecDeque::new();
    visited[start.y][start.x] = true;
    q.push_back(start);

    while let Some(current) = q.pop_front() {
        if current == end {
            let path = reconstruct(&prev, start, end);
            debug!("path of {} steps from {} to {}", path.step_count(), start, end);
            return Some(path);
        }
        for next in grid.neighbors(current) {
            if visited[next.y][next.x] || obstacles.contains(next) {
                continue;
            }
            visited[next.y][next.x] = true;
            prev[next.y][next.x] = Some(current);
            q.push_back(next);
        }
    }
    None
}

fn reconstruct(prev: &[Vec<Option<Cell>>], start: Cell, end: Cell) -> Path {
    let mut cells = vec![end];
    let mut current = end;
    while current != start {
        match prev[current.y][current.x] {
            Some(p) => {
                cells.push(p);
                current = p;
            }
            None => break,
        }
    }
    cells.reverse();
    Path { cells }
}
