/// Fuzzes obstacle generation and path finding over many seeded grids, checking every returned path
/// against an independent reachability flood fill, and runs whole sessions to completion.
use std::collections::{HashSet, VecDeque};

use grid_maze::{
    default_draws, find_path, generate_obstacles, Cell, Grid, ObstacleSet, Session,
    SessionConfig, Status, Variant,
};
use rand::prelude::*;

fn visualize(grid: &Grid, obstacles: &ObstacleSet) {
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let c = Cell::new(x, y);
            if c == grid.start() {
                print!("S");
            } else if c == grid.end() {
                print!("G");
            } else if obstacles.contains(c) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Distance from start to end by flood fill, ignoring scan order.
fn distance(grid: &Grid, obstacles: &ObstacleSet) -> Option<usize> {
    let mut seen = HashSet::from([grid.start()]);
    let mut q = VecDeque::from([(grid.start(), 0)]);
    while let Some((cell, d)) = q.pop_front() {
        if cell == grid.end() {
            return Some(d);
        }
        for next in grid.neighbors(cell) {
            if !obstacles.contains(next) && seen.insert(next) {
                q.push_back((next, d + 1));
            }
        }
    }
    None
}

#[test]
fn fuzz() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for size in [2, 3, 5, 10, 20] {
        let grid = Grid::new(size);
        let draws = default_draws(size).max(1) * 2;
        for _ in 0..N_GRIDS {
            let obstacles = generate_obstacles(&grid, draws, &mut rng);
            assert!(!obstacles.contains(grid.start()));
            assert!(!obstacles.contains(grid.end()));
            assert!(obstacles.len() <= draws);

            let path = find_path(&grid, grid.start(), grid.end(), &obstacles);
            let expected = distance(&grid, &obstacles);
            if path.as_ref().map(|p| p.step_count()) != expected {
                visualize(&grid, &obstacles);
            }
            assert_eq!(path.as_ref().map(|p| p.step_count()), expected);

            if let Some(path) = path {
                assert_eq!(path.first(), grid.start());
                assert_eq!(path.last(), grid.end());
                assert!(path.steps()[0].is_adjacent(grid.start()));
                let unique: HashSet<_> = path.cells().iter().collect();
                assert_eq!(unique.len(), path.len());
                for pair in path.cells().windows(2) {
                    assert!(pair[0].is_adjacent(pair[1]));
                }
                assert!(path.cells().iter().all(|c| !obstacles.contains(*c)));
            }
        }
    }
}

#[test]
fn sessions_always_win_on_their_own() {
    for seed in 0..50 {
        for variant in [Variant::Classic, Variant::Collisions] {
            let config = SessionConfig {
                variant,
                ..SessionConfig::default()
            };
            let mut session = Session::new(config, StdRng::seed_from_u64(seed)).unwrap();
            let limit = 2 * session.path().len();
            for _ in 0..limit {
                session.advance_tick().unwrap();
            }
            assert_eq!(session.status(), Status::Won);
            assert_eq!(session.lives(), 3);
            assert_eq!(session.walker(), session.grid().end());
        }
    }
}

#[test]
fn small_dense_grid_still_finds_a_maze() {
    let config = SessionConfig {
        grid_size: 4,
        obstacle_draws: 8,
        ..SessionConfig::with_grid_size(4)
    };
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let session = Session::new(config.clone(), StdRng::seed_from_u64(rng.gen())).unwrap();
        let steps = session.path().step_count();
        assert!(steps >= 6);
        assert_eq!(steps % 2, 0);
        assert_eq!(session.maze_count(), 1);
    }
}

#[test]
fn regeneration_replaces_maze() {
    let config = SessionConfig::with_grid_size(10);
    let mut session = Session::new(config, StdRng::seed_from_u64(5)).unwrap();
    let first = session.obstacles().clone();
    session.regenerate().unwrap();
    assert_ne!(session.obstacles(), &first);
    assert_eq!(session.maze_count(), 2);
    assert!(session
        .path()
        .cells()
        .iter()
        .all(|c| !session.obstacles().contains(*c)));
}
