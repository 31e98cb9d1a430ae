use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use grid_maze::{Cell, Snapshot};
use unicode_width::UnicodeWidthStr;

/// Terminal columns per grid cell
pub const CELL_W: usize = 2;
const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Walker,
    Trail,
    Obstacle,
    Start,
    End,
    Ahead,
    Open,
}

impl Glyph {
    /// Pick what to show on `cell`; later layers only show where earlier ones don't.
    fn at(snapshot: &Snapshot, cell: Cell) -> Self {
        let ahead = &snapshot.path.cells()[snapshot.path_index.min(snapshot.path.len())..];
        if cell == snapshot.walker {
            Glyph::Walker
        } else if snapshot.history.contains(&cell) {
            Glyph::Trail
        } else if snapshot.obstacles.contains(cell) {
            Glyph::Obstacle
        } else if cell == snapshot.grid.start() {
            Glyph::Start
        } else if cell == snapshot.grid.end() {
            Glyph::End
        } else if ahead.contains(&cell) {
            Glyph::Ahead
        } else {
            Glyph::Open
        }
    }

    fn text(self) -> &'static str {
        match self {
            Glyph::Trail => "▓▓",
            Glyph::Ahead => "··",
            Glyph::Open => "  ",
            _ => "██",
        }
    }

    fn color(self) -> Color {
        match self {
            Glyph::Walker => Color::Blue,
            Glyph::Trail => Color::Yellow,
            Glyph::Obstacle => Color::DarkGrey,
            Glyph::Start => Color::Green,
            Glyph::End => Color::Red,
            Glyph::Ahead => Color::Cyan,
            Glyph::Open => Color::Reset,
        }
    }
}

/// Terminal drawing state. A cell is only rewritten when its glyph changed
/// since the previous frame; `None` means unknown and forces a draw.
pub struct Renderer {
    size: usize,
    shown: Vec<Option<Glyph>>,
    hud: String,
    origin: Option<(u16, u16)>,
}

impl Renderer {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            shown: vec![None; size * size],
            hud: String::new(),
            origin: None,
        }
    }

    fn invalidate(&mut self) {
        self.shown.fill(None);
        self.hud.clear();
    }

    /// Top-left corner of the board for the current terminal size, or `None`
    /// when the board does not fit. Forgets the screen when the corner moves.
    fn place(&mut self) -> io::Result<Option<(u16, u16)>> {
        let board_w = (self.size * CELL_W) as u16;
        let board_h = (self.size + 1) as u16;
        let (term_w, term_h) = terminal::size()?;
        if term_w < board_w || term_h < board_h {
            self.origin = None;
            return Ok(None);
        }
        let origin = ((term_w - board_w) / 2, (term_h - board_h) / 2 + 1);
        if self.origin != Some(origin) {
            self.origin = Some(origin);
            self.invalidate();
        }
        Ok(Some(origin))
    }

    pub fn draw(&mut self, out: &mut Stdout, snapshot: &Snapshot) -> io::Result<()> {
        let Some((left, top)) = self.place()? else {
            self.invalidate();
            out.queue(Clear(ClearType::All))?;
            out.queue(MoveTo(0, 0))?;
            out.queue(Print(format!(
                "Terminal too small for a {0}x{0} grid, need {1} columns and {2} rows.",
                self.size,
                self.size * CELL_W,
                self.size + 1
            )))?;
            return out.flush();
        };
        if self.shown.iter().all(Option::is_none) {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Lives: {}  Steps: {}/{}  Maze: {}  (q to quit)",
            snapshot.lives,
            snapshot.path_index.min(snapshot.path.len()),
            snapshot.path.len(),
            snapshot.maze_count
        );
        if hud != self.hud {
            out.queue(MoveTo(left, top - 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(PrintStyledContent(hud.as_str().white()))?;
            self.hud = hud;
        }

        for cell in snapshot.grid.cells() {
            let glyph = Glyph::at(snapshot, cell);
            let slot = &mut self.shown[cell.y * self.size + cell.x];
            if *slot == Some(glyph) {
                continue;
            }
            *slot = Some(glyph);
            out.queue(MoveTo(left + (cell.x * CELL_W) as u16, top + cell.y as u16))?;
            out.queue(PrintStyledContent(glyph.text().with(glyph.color())))?;
        }
        out.flush()
    }
}

/// Show a centered "Game Over!" for a few seconds, or until `q` is pressed.
pub fn render_game_over(out: &mut Stdout) -> io::Result<()> {
    let text = "Game Over!";
    let (term_w, term_h) = terminal::size()?;
    let w = UnicodeWidthStr::width(text) as u16;
    out.queue(Clear(ClearType::All))?;
    out.queue(MoveTo(term_w.saturating_sub(w) / 2, term_h / 2))?;
    out.queue(PrintStyledContent(text.red()))?;
    out.flush()?;

    let shown = Instant::now();
    while shown.elapsed() < GAME_OVER_HOLD {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use grid_maze::{Session, SessionConfig};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const ALL: [Glyph; 7] = [
        Glyph::Walker,
        Glyph::Trail,
        Glyph::Obstacle,
        Glyph::Start,
        Glyph::End,
        Glyph::Ahead,
        Glyph::Open,
    ];

    #[test]
    fn every_glyph_fills_one_cell() {
        for glyph in ALL {
            assert_eq!(UnicodeWidthStr::width(glyph.text()), CELL_W);
        }
    }

    #[test]
    fn walker_covers_start_then_path_shows_ahead() {
        let mut session = Session::new(SessionConfig::default(), StdRng::seed_from_u64(1)).unwrap();
        let snapshot = session.snapshot();
        let grid = snapshot.grid;
        assert!(Glyph::at(&snapshot, grid.start()) == Glyph::Walker);
        assert!(Glyph::at(&snapshot, grid.end()) == Glyph::End);
        let next = snapshot.path.cells()[1];
        assert!(Glyph::at(&snapshot, next) == Glyph::Ahead);
        if let Some(blocked) = snapshot.obstacles.iter().next() {
            assert!(Glyph::at(&snapshot, *blocked) == Glyph::Obstacle);
        }

        session.advance_tick().unwrap();
        let snapshot = session.advance_tick().unwrap();
        assert!(Glyph::at(&snapshot, next) == Glyph::Walker);
        assert!(Glyph::at(&snapshot, grid.start()) == Glyph::Start);
    }
}
