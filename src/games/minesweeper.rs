//! Minesweeper on a 10x10 board with a guaranteed safe opening.
//!
//! Mines are laid on the first reveal, away from the revealed cell and its
//! eight neighbors. Revealing a cell with no adjacent mines opens the whole
//! connected empty region plus its numbered border.

use crossterm::event::{KeyCode, MouseButton};
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::canvas::{Canvas, Paint};
use crate::event::Input;
use crate::games::{cell_rect, common_keys, conclude, grid_cell, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

pub const GRID_SIZE: usize = 10;
pub const MINES: usize = 10;
const CELL: (u16, u16) = (4, 2);
const ORIGIN: (u16, u16) = (20, 1);
const REVEAL_POINTS: i32 = 10;
const FLAG_POINTS: i32 = 5;
const CLEAR_BONUS: i32 = 100;

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    mine: bool,
    revealed: bool,
    flagged: bool,
    /// Mines among the up to eight neighbors.
    adjacent: u8,
}

pub struct Minesweeper {
    player: String,
    grid: [[Cell; GRID_SIZE]; GRID_SIZE],
    mines_placed: bool,
    cursor: (usize, usize),
    score: i32,
    game_over: bool,
    won: bool,
}

/// In-bounds Moore neighborhood of (row, col), excluding the cell itself.
fn neighbors(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1isize..=1)
        .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
        .filter(|&d| d != (0, 0))
        .filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < GRID_SIZE && c < GRID_SIZE).then_some((r, c))
        })
}

impl Minesweeper {
    pub fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
            grid: [[Cell::default(); GRID_SIZE]; GRID_SIZE],
            mines_placed: false,
            cursor: (GRID_SIZE / 2, GRID_SIZE / 2),
            score: 0,
            game_over: false,
            won: false,
        }
    }

    fn place_mines(&mut self, safe_row: usize, safe_col: usize, rng: &mut impl Rng) {
        let candidates: Vec<(usize, usize)> = (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| r.abs_diff(safe_row) > 1 || c.abs_diff(safe_col) > 1)
            .collect();
        for &(r, c) in candidates.choose_multiple(rng, MINES) {
            self.grid[r][c].mine = true;
        }
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                self.grid[r][c].adjacent = neighbors(r, c).filter(|&(nr, nc)| self.grid[nr][nc].mine).count() as u8;
            }
        }
        self.mines_placed = true;
        log::debug!("minesweeper: mines laid around safe cell ({safe_row}, {safe_col})");
    }

    fn revealed_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.revealed).count()
    }

    fn reveal(&mut self, row: usize, col: usize, session: &mut Session) -> Transition {
        let start = self.grid[row][col];
        if self.game_over || start.revealed || start.flagged {
            return Transition::None;
        }
        if !self.mines_placed {
            self.place_mines(row, col, &mut session.rng);
        }

        let mut pending = vec![(row, col)];
        while let Some((r, c)) = pending.pop() {
            let cell = &mut self.grid[r][c];
            if cell.revealed || cell.flagged {
                continue;
            }
            cell.revealed = true;
            self.score += REVEAL_POINTS;

            if cell.mine {
                self.game_over = true;
                return conclude(&*self, session);
            }
            if cell.adjacent == 0 {
                pending.extend(neighbors(r, c).filter(|&(nr, nc)| !self.grid[nr][nc].revealed));
            }
        }

        if self.revealed_count() == GRID_SIZE * GRID_SIZE - MINES {
            self.score += CLEAR_BONUS;
            self.won = true;
            self.game_over = true;
            return conclude(&*self, session);
        }
        Transition::None
    }

    fn toggle_flag(&mut self, row: usize, col: usize) {
        let cell = &mut self.grid[row][col];
        if self.game_over || cell.revealed {
            return;
        }
        cell.flagged = !cell.flagged;
        self.score += if cell.flagged { FLAG_POINTS } else { -FLAG_POINTS };
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max = GRID_SIZE as isize - 1;
        self.cursor = (
            (self.cursor.0 as isize + d_row).clamp(0, max) as usize,
            (self.cursor.1 as isize + d_col).clamp(0, max) as usize,
        );
    }
}

impl Game for Minesweeper {
    fn kind(&self) -> GameKind {
        GameKind::Minesweeper
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn score(&self) -> i32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.game_over
    }

    fn result_line(&self) -> Option<String> {
        self.game_over.then(|| if self.won { "Win!" } else { "Game Over!" }.to_string())
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        if self.game_over {
            return Transition::None;
        }
        match *input {
            Input::Click { button, x, y } => {
                let Some((row, col)) = grid_cell(ORIGIN, CELL, (GRID_SIZE, GRID_SIZE), x, y) else {
                    return Transition::None;
                };
                self.cursor = (row, col);
                match button {
                    MouseButton::Left => return self.reveal(row, col, session),
                    MouseButton::Right => self.toggle_flag(row, col),
                    MouseButton::Middle => {}
                }
            }
            Input::Key(key) => match key.code {
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let (row, col) = self.cursor;
                    return self.reveal(row, col, session);
                }
                KeyCode::Char('f') | KeyCode::Char('F') => {
                    let (row, col) = self.cursor;
                    self.toggle_flag(row, col);
                }
                _ => {}
            },
        }
        Transition::None
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let theme = canvas.theme();
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let rect = cell_rect(ORIGIN, CELL, row, col);
                let lost_mine = self.game_over && !self.won && cell.mine;
                let label = if cell.revealed || lost_mine {
                    canvas.rect(rect, if cell.mine { Color::Red } else { Color::Gray }, Paint::Filled);
                    match (cell.mine, cell.adjacent) {
                        (true, _) => "*".to_string(),
                        (false, 0) => String::new(),
                        (false, n) => n.to_string(),
                    }
                } else if cell.flagged {
                    canvas.rect(rect, Color::Blue, Paint::Filled);
                    "F".to_string()
                } else {
                    canvas.rect(rect, theme.border(), Paint::Outlined);
                    String::new()
                };
                if !self.game_over && self.cursor == (row, col) {
                    canvas.rect(rect, theme.accent(), Paint::Outlined);
                }
                if !label.is_empty() {
                    canvas.text_in(rect, &label, theme.text());
                }
            }
        }
        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Left-click to reveal, Right-click to flag, ESC to Menu"),
        }
    }
}
