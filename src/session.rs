//! Walker session: maze search, per-tick movement, hits and retries

use anyhow::bail;
use log::{debug, info};
use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::obstacles::{default_draws, generate_obstacles, ObstacleSet};
use crate::path::{find_path, Path};
use crate::{DEFAULT_GRID_SIZE, DEFAULT_LIVES};

/// Rule set for a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Walker always reaches the end, lives never change.
    Classic,
    /// Landing on an obstacle costs a life and rebuilds the maze.
    Collisions,
}

/// Where the session stands after the last tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Advancing,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Advancing)
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub grid_size: usize,
    /// Random draws per maze, see [generate_obstacles].
    pub obstacle_draws: usize,
    pub lives: u32,
    pub variant: Variant,
    /// Consecutive unsolvable mazes tolerated before giving up. `None`
    /// retries forever.
    pub max_attempts: Option<usize>,
}

impl SessionConfig {
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            obstacle_draws: default_draws(grid_size),
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            obstacle_draws: default_draws(DEFAULT_GRID_SIZE),
            lives: DEFAULT_LIVES,
            variant: Variant::Classic,
            max_attempts: None,
        }
    }
}

/// Read-only view of a session, handed to the renderer once per tick.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub obstacles: &'a ObstacleSet,
    pub path: &'a Path,
    pub walker: Cell,
    pub path_index: usize,
    pub history: &'a [Cell],
    pub lives: u32,
    pub status: Status,
    pub maze_count: u32,
}

pub struct Session<R> {
    config: SessionConfig,
    grid: Grid,
    rng: R,
    obstacles: ObstacleSet,
    path: Path,
    walker: Cell,
    path_index: usize,
    history: Vec<Cell>,
    lives: u32,
    status: Status,
    maze_count: u32,
}

impl<R: Rng> Session<R> {
    /// Start a session on a freshly generated, solvable maze.
    ///
    /// Fails only when `config.max_attempts` is set and that many mazes in a
    /// row had no path.
    pub fn new(config: SessionConfig, mut rng: R) -> anyhow::Result<Self> {
        let grid = Grid::new(config.grid_size);
        let (obstacles, path) = solvable_maze(&grid, &config, &mut rng)?;
        Ok(Self {
            grid,
            walker: grid.start(),
            path_index: 0,
            history: Vec::new(),
            lives: config.lives,
            status: Status::Advancing,
            maze_count: 1,
            obstacles,
            path,
            rng,
            config,
        })
    }

    /// Advance the walker by one tick.
    ///
    /// If the walker already stands on the next path cell the path index
    /// moves on, otherwise the walker jumps onto it. Terminal sessions are
    /// left untouched.
    pub fn advance_tick(&mut self) -> anyhow::Result<Snapshot<'_>> {
        if self.status.is_terminal() {
            return Ok(self.snapshot());
        }

        let Some(target) = self.path.get(self.path_index) else {
            info!("walker reached {} after {} mazes", self.walker, self.maze_count);
            self.status = Status::Won;
            return Ok(self.snapshot());
        };

        if target == self.walker {
            self.path_index += 1;
        } else {
            let from = self.walker;
            self.walker = target;
            if self.config.variant == Variant::Collisions {
                // Checked against the obstacles the committed path was built
                // from, so this only fires if they changed mid-path.
                if self.obstacles.contains(self.walker) {
                    if let Err(err) = self.hit() {
                        self.walker = from;
                        return Err(err);
                    }
                } else {
                    self.history.push(self.walker);
                }
            }
        }
        Ok(self.snapshot())
    }

    /// Lose a life and rebuild the maze, or end the session on the last life.
    ///
    /// Lives are only taken once the replacement maze exists.
    fn hit(&mut self) -> anyhow::Result<()> {
        let lives = self.lives.saturating_sub(1);
        if lives == 0 {
            self.lives = 0;
            info!("hit an obstacle at {}, out of lives", self.walker);
            self.status = Status::Lost;
            return Ok(());
        }
        let at = self.walker;
        self.regenerate()?;
        self.lives = lives;
        info!("hit an obstacle at {}, lives remaining: {}", at, self.lives);
        Ok(())
    }

    /// Replace the maze and restart the walker from the start cell.
    ///
    /// Lives are kept. On error the current maze and progress are unchanged.
    pub fn regenerate(&mut self) -> anyhow::Result<()> {
        let (obstacles, path) = solvable_maze(&self.grid, &self.config, &mut self.rng)?;
        self.obstacles = obstacles;
        self.path = path;
        self.walker = self.grid.start();
        self.path_index = 0;
        self.history.clear();
        self.maze_count += 1;
        debug!("maze #{} ready", self.maze_count);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            obstacles: &self.obstacles,
            path: &self.path,
            walker: self.walker,
            path_index: self.path_index,
            history: &self.history,
            lives: self.lives,
            status: self.status,
            maze_count: self.maze_count,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn walker(&self) -> Cell {
        self.walker
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    pub fn history(&self) -> &[Cell] {
        &self.history
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn maze_count(&self) -> u32 {
        self.maze_count
    }
}

/// Generate mazes until one has a path from start to end.
fn solvable_maze(
    grid: &Grid,
    config: &SessionConfig,
    rng: &mut impl Rng,
) -> anyhow::Result<(ObstacleSet, Path)> {
    let (start, end) = (grid.start(), grid.end());
    let mut attempts = 0;
    loop {
        let obstacles = generate_obstacles(grid, config.obstacle_draws, rng);
        attempts += 1;
        if let Some(path) = find_path(grid, start, end, &obstacles) {
            return Ok((obstacles, path));
        }
        info!("no path from {} to {}, regenerating maze (attempt {})", start, end, attempts);
        if let Some(max) = config.max_attempts {
            if attempts >= max {
                bail!("no solvable maze found after {} attempts", attempts);
            }
        }
    }
}
