use crossterm::event::KeyCode;
use ratatui::style::Color;

use crate::canvas::{Canvas, Paint};
use crate::event::Input;
use crate::games::{cell_rect, centered, common_keys, conclude, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

const SIZE: usize = 5;
const CELL: (u16, u16) = (8, 3);
const START: (usize, usize) = (1, 1);
const TARGET: (usize, usize) = (3, 3);
const MOVE_POINTS: i32 = 10;
const ESCAPE_BONUS: i32 = 50;

/// `true` marks a wall.
const WALLS: [[bool; SIZE]; SIZE] = [
    [true, true, true, true, true],
    [true, false, false, false, true],
    [true, true, true, false, true],
    [true, false, false, false, true],
    [true, true, true, true, true],
];

pub struct NebulaMaze {
    player: String,
    position: (usize, usize),
    score: i32,
    game_over: bool,
}

fn origin() -> (u16, u16) {
    centered(CELL.0 * SIZE as u16, CELL.1 * SIZE as u16)
}

impl NebulaMaze {
    pub fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
            position: START,
            score: 0,
            game_over: false,
        }
    }

    fn step(&mut self, (dr, dc): (isize, isize), session: &mut Session) -> Transition {
        if self.game_over {
            return Transition::None;
        }
        let (row, col) = self.position;
        let (Some(row), Some(col)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            return Transition::None;
        };
        if row >= SIZE || col >= SIZE || WALLS[row][col] {
            return Transition::None;
        }
        self.position = (row, col);
        self.score += MOVE_POINTS;
        if self.position != TARGET {
            return Transition::None;
        }
        self.score += ESCAPE_BONUS;
        self.game_over = true;
        conclude(&*self, session)
    }
}

impl Game for NebulaMaze {
    fn kind(&self) -> GameKind {
        GameKind::NebulaMaze
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
        self.game_over.then(|| format!("Maze escaped! Score: {}", self.score))
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        let delta = match input.key_code() {
            Some(KeyCode::Up | KeyCode::Char('w' | 'W')) => (-1, 0),
            Some(KeyCode::Down | KeyCode::Char('s' | 'S')) => (1, 0),
            Some(KeyCode::Left | KeyCode::Char('a' | 'A')) => (0, -1),
            Some(KeyCode::Right | KeyCode::Char('d' | 'D')) => (0, 1),
            _ => return Transition::None,
        };
        self.step(delta, session)
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let theme = canvas.theme();
        for (row, walls) in WALLS.iter().enumerate() {
            for (col, &wall) in walls.iter().enumerate() {
                let rect = cell_rect(origin(), CELL, row, col);
                if wall {
                    canvas.rect(rect, Color::Gray, Paint::Filled);
                } else if (row, col) == self.position {
                    canvas.rect(rect, Color::Green, Paint::Filled);
                    canvas.text_in(rect, "P", theme.text());
                } else if (row, col) == TARGET {
                    canvas.rect(rect, Color::Red, Paint::Filled);
                    canvas.text_in(rect, "T", theme.text());
                } else {
                    canvas.rect(rect, theme.border(), Paint::Outlined);
                }
            }
        }
        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Use arrow keys or WASD, ESC to Menu"),
        }
    }
}
