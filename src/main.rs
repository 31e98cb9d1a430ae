//! Terminal front end: a walker follows the shortest path through a random maze

mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use grid_maze::{
    default_draws, Session, SessionConfig, Status, Variant, DEFAULT_GRID_SIZE, DEFAULT_LIVES,
    DEFAULT_RENDER_FPS, DEFAULT_TICK_MS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::{render_game_over, Renderer, CELL_W};

/// Largest accepted `--size`, keeps the board well inside `u16` terminal coordinates
const MAX_SIZE: usize = 200;
const _: () = assert!(MAX_SIZE * CELL_W < u16::MAX as usize);

/// Watch a walker cross a randomly obstructed grid along the shortest path
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Grid width and height in cells
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = parse_size)]
    size: usize,

    /// Lives at the start of the session
    #[arg(long, default_value_t = DEFAULT_LIVES)]
    lives: u32,

    /// Random obstacle draws per maze [default: size * size / 4]
    #[arg(long)]
    draws: Option<usize>,

    /// Landing on an obstacle costs a life and rebuilds the maze
    #[arg(short, long)]
    collisions: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many unsolvable mazes in a row [default: never]
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Write log records to this file, filtered by RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            grid_size: self.size,
            obstacle_draws: self.draws.unwrap_or_else(|| default_draws(self.size)),
            lives: self.lives,
            variant: if self.collisions {
                Variant::Collisions
            } else {
                Variant::Classic
            },
            max_attempts: self.max_attempts,
        }
    }
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if !(2..=MAX_SIZE).contains(&size) {
        return Err(format!("grid size must be between 2 and {MAX_SIZE}"));
    }
    Ok(size)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(args.session_config(), rng)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut session);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    match result? {
        Some(Status::Won) => println!("You win!"),
        Some(Status::Lost) => println!("Game over!"),
        _ => {}
    }
    Ok(())
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Tick the session until it ends or the user quits.
///
/// Returns the terminal status, or `None` on quit.
fn run<R: Rng>(stdout: &mut Stdout, session: &mut Session<R>) -> anyhow::Result<Option<Status>> {
    let mut renderer = Renderer::new(session.grid().size());
    let (tick_ms, render_fps) = read_speed_settings();
    let tick_time = Duration::from_millis(tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut last_tick = Instant::now();

    renderer.draw(stdout, &session.snapshot())?;
    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(None)
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            let snapshot = session.advance_tick()?;
            renderer.draw(stdout, &snapshot)?;
            match snapshot.status {
                Status::Advancing => {}
                Status::Won => return Ok(Some(Status::Won)),
                Status::Lost => {
                    render_game_over(stdout)?;
                    return Ok(Some(Status::Lost));
                }
            }
        } else {
            renderer.draw(stdout, &session.snapshot())?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}
