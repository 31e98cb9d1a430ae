//! Autonomous grid maze
//!
//! A square grid is seeded with random obstacles, a shortest path from the
//! top-left corner to the bottom-right corner is found with a breadth-first
//! search, and a walker follows that path one cell per tick. Unsolvable
//! mazes are thrown away and regenerated.
//!
//! # Examples
//! ```
//! use grid_maze::{Session, SessionConfig, Status};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut session = Session::new(SessionConfig::default(), StdRng::seed_from_u64(7)).unwrap();
//! while session.status() == Status::Advancing {
//!     session.advance_tick().unwrap();
//! }
//! assert_eq!(session.status(), Status::Won);
//! assert_eq!(session.walker(), session.grid().end());
//! ```

pub mod grid;
pub mod obstacles;
pub mod path;
pub mod session;

pub use grid::{Cell, Dir, Grid};
pub use obstacles::{default_draws, generate_obstacles, ObstacleSet};
pub use path::{find_path, Path};
pub use session::{Session, SessionConfig, Snapshot, Status, Variant};

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const DEFAULT_LIVES: u32 = 3;
pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_RENDER_FPS: u64 = 30;
