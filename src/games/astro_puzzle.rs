//! Eight-tile sliding puzzle.
//!
//! Only permutations with an even number of inversions can reach the goal
//! layout `1 2 3 / 4 5 6 / 7 8 _`, so the board is reshuffled until it has one.

use crossterm::event::{KeyCode, MouseButton};
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::canvas::{Canvas, Paint};
use crate::event::Input;
use crate::games::{cell_rect, centered, common_keys, conclude, grid_cell, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

const SIDE: usize = 3;
const TILES: usize = SIDE * SIDE;
const BLANK: u8 = 0;
const GOAL: [u8; TILES] = [1, 2, 3, 4, 5, 6, 7, 8, BLANK];
const CELL: (u16, u16) = (8, 4);
const MOVE_POINTS: i32 = 10;
const SOLVE_BONUS: i32 = 50;

pub struct AstroPuzzle {
    player: String,
    tiles: [u8; TILES],
    score: i32,
    game_over: bool,
}

/// Number of pairs out of order, ignoring the blank.
pub fn inversions(tiles: &[u8]) -> usize {
    let numbered: Vec<u8> = tiles.iter().copied().filter(|&t| t != BLANK).collect();
    numbered
        .iter()
        .enumerate()
        .map(|(i, a)| numbered[i + 1..].iter().filter(|b| a > b).count())
        .sum()
}

pub fn is_solvable(tiles: &[u8]) -> bool {
    inversions(tiles) % 2 == 0
}

/// True when `a` and `b` share a row or a column and sit next to each other.
pub fn orthogonally_adjacent(a: usize, b: usize) -> bool {
    let (ar, ac) = (a / SIDE, a % SIDE);
    let (br, bc) = (b / SIDE, b % SIDE);
    (ar == br && ac.abs_diff(bc) == 1) || (ac == bc && ar.abs_diff(br) == 1)
}

fn origin() -> (u16, u16) {
    centered(CELL.0 * SIDE as u16, CELL.1 * SIDE as u16)
}

impl AstroPuzzle {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        let mut tiles = GOAL;
        while tiles == GOAL || !is_solvable(&tiles) {
            tiles.shuffle(rng);
        }
        Self {
            player: player.to_string(),
            tiles,
            score: 0,
            game_over: false,
        }
    }

    fn blank(&self) -> usize {
        self.tiles.iter().position(|&t| t == BLANK).unwrap_or(TILES - 1)
    }

    /// Slide the tile at `idx` into the blank. Returns whether it moved.
    fn slide(&mut self, idx: usize) -> bool {
        let blank = self.blank();
        if idx >= TILES || !orthogonally_adjacent(idx, blank) {
            return false;
        }
        self.tiles.swap(idx, blank);
        self.score += MOVE_POINTS;
        true
    }

    fn move_tile(&mut self, idx: usize, session: &mut Session) -> Transition {
        if self.game_over || !self.slide(idx) || self.tiles != GOAL {
            return Transition::None;
        }
        self.score += SOLVE_BONUS;
        self.game_over = true;
        conclude(&*self, session)
    }

    /// Tile that an arrow key pushes into the blank.
    fn tile_for_arrow(&self, code: KeyCode) -> Option<usize> {
        let blank = self.blank();
        match code {
            KeyCode::Up if blank < TILES - SIDE => Some(blank + SIDE),
            KeyCode::Down if blank >= SIDE => Some(blank - SIDE),
            KeyCode::Left if blank % SIDE < SIDE - 1 => Some(blank + 1),
            KeyCode::Right if blank % SIDE > 0 => Some(blank - 1),
            _ => None,
        }
    }
}

impl Game for AstroPuzzle {
    fn kind(&self) -> GameKind {
        GameKind::AstroPuzzle
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
        self.game_over.then(|| format!("Puzzle solved! Score: {}", self.score))
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        let target = match *input {
            Input::Click { button: MouseButton::Left, x, y } => {
                grid_cell(origin(), CELL, (SIDE, SIDE), x, y).map(|(row, col)| row * SIDE + col)
            }
            Input::Key(key) => self.tile_for_arrow(key.code),
            _ => None,
        };
        match target {
            Some(idx) => self.move_tile(idx, session),
            None => Transition::None,
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let theme = canvas.theme();
        for (idx, &tile) in self.tiles.iter().enumerate() {
            let rect = cell_rect(origin(), CELL, idx / SIDE, idx % SIDE);
            if tile == BLANK {
                canvas.rect(rect, theme.border(), Paint::Outlined);
            } else {
                canvas.rect(rect, Color::Gray, Paint::Filled);
                canvas.text_in(rect, &tile.to_string(), theme.text());
            }
        }
        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Click tiles or use arrows, ESC to Menu"),
        }
    }
}
