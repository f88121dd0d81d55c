pub mod astro_puzzle;
pub mod code_breaker;
pub mod cosmic_jigsaw;
pub mod hangman;
pub mod meteor_match;
pub mod minesweeper;
pub mod nebula_maze;
pub mod number_guess;
pub mod quantum_circuit;
pub mod snake;
pub mod tic_tac_toe;

use clap::ValueEnum;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

use crate::canvas::{Canvas, HEIGHT, WIDTH};
use crate::event::Input;
use crate::screen::{Destination, Session, Transition};

/// Which collection of games the program runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    Classic,
    Cosmic,
}

impl Suite {
    pub fn title(&self) -> &'static str {
        match self {
            Suite::Classic => "Classic Game Suite",
            Suite::Cosmic => "Cosmic Quest Suite",
        }
    }

    pub fn games(&self) -> &'static [GameKind] {
        match self {
            Suite::Classic => &[
                GameKind::Snake,
                GameKind::TicTacToe,
                GameKind::Hangman,
                GameKind::Minesweeper,
                GameKind::NumberGuessing,
            ],
            Suite::Cosmic => &[
                GameKind::CodeBreaker,
                GameKind::MeteoriteMatch,
                GameKind::QuantumCircuit,
                GameKind::AstroPuzzle,
                GameKind::CosmicJigsaw,
                GameKind::NebulaMaze,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    Snake,
    TicTacToe,
    Hangman,
    Minesweeper,
    NumberGuessing,
    CodeBreaker,
    MeteoriteMatch,
    QuantumCircuit,
    AstroPuzzle,
    CosmicJigsaw,
    NebulaMaze,
}

impl GameKind {
    /// Display name, also the leaderboard key.
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::Hangman => "Hangman",
            GameKind::Minesweeper => "Minesweeper",
            GameKind::NumberGuessing => "Number Guessing",
            GameKind::CodeBreaker => "Alien Code Breaker",
            GameKind::MeteoriteMatch => "Meteorite Match-Up",
            GameKind::QuantumCircuit => "Quantum Circuit Puzzle",
            GameKind::AstroPuzzle => "Astro-Puzzle Navigator",
            GameKind::CosmicJigsaw => "Cosmic Jigsaw Explore",
            GameKind::NebulaMaze => "Nebula Maze Runner",
        }
    }

    pub fn suite(&self) -> Suite {
        match self {
            GameKind::Snake
            | GameKind::TicTacToe
            | GameKind::Hangman
            | GameKind::Minesweeper
            | GameKind::NumberGuessing => Suite::Classic,
            _ => Suite::Cosmic,
        }
    }

    /// Whether leaving an unfinished game still records its score.
    pub fn commits_on_escape(&self) -> bool {
        match self.suite() {
            Suite::Classic => matches!(self, GameKind::Minesweeper | GameKind::NumberGuessing),
            Suite::Cosmic => true,
        }
    }

    /// Where Esc leads: straight to the menu in the classic suite, via a
    /// space fact in the cosmic one.
    fn exit_transition(&self, headline: Option<String>) -> Transition {
        match self.suite() {
            Suite::Classic => Transition::Menu,
            Suite::Cosmic => Transition::Fact { next: Destination::Menu, headline },
        }
    }
}

/// Per-game behavior the driver relies on.
pub trait Game {
    fn kind(&self) -> GameKind;
    fn player(&self) -> &str;
    fn score(&self) -> i32;
    /// Win or lose condition reached; gates restart.
    fn is_terminal(&self) -> bool;
    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition;
    fn render(&self, canvas: &mut Canvas);

    /// Per-tick simulation step. Only games that advance on their own need it.
    fn update(&mut self, _session: &mut Session) {}

    /// True while typed letters belong to the game rather than to hotkeys.
    fn accepts_text(&self) -> bool {
        false
    }

    /// One-line summary of a finished game.
    fn result_line(&self) -> Option<String> {
        None
    }
}

/// Restart and escape handling shared by every game. Returns `None` when the
/// input is not one of those keys.
pub(crate) fn common_keys<G: Game + ?Sized>(game: &G, input: &Input, session: &mut Session) -> Option<Transition> {
    match input.key_code()? {
        KeyCode::Char('r') | KeyCode::Char('R') if game.is_terminal() => Some(Transition::Restart),
        KeyCode::Esc => {
            let kind = game.kind();
            if !game.is_terminal() && kind.commits_on_escape() {
                session.scores.submit(kind.title(), game.player(), game.score());
            }
            Some(kind.exit_transition(None))
        }
        _ => None,
    }
}

/// Record the score of a game that just reached its terminal state and say
/// what should happen next.
pub(crate) fn conclude<G: Game + ?Sized>(game: &G, session: &mut Session) -> Transition {
    let kind = game.kind();
    session.scores.submit(kind.title(), game.player(), game.score());
    match kind.suite() {
        Suite::Classic => Transition::None,
        Suite::Cosmic => kind.exit_transition(game.result_line()),
    }
}

/// Origin that centers a `width` x `height` block in the viewport.
pub(crate) fn centered(width: u16, height: u16) -> (u16, u16) {
    (WIDTH.saturating_sub(width) / 2, HEIGHT.saturating_sub(height) / 2)
}

/// Grid cell under a viewport position, as (row, col).
pub(crate) fn grid_cell(origin: (u16, u16), cell: (u16, u16), dims: (usize, usize), x: u16, y: u16) -> Option<(usize, usize)> {
    let (ox, oy) = origin;
    let (cw, ch) = cell;
    let (rows, cols) = dims;
    if x < ox || y < oy {
        return None;
    }
    let col = ((x - ox) / cw) as usize;
    let row = ((y - oy) / ch) as usize;
    (row < rows && col < cols).then_some((row, col))
}

/// Screen rectangle of grid cell (row, col).
pub(crate) fn cell_rect(origin: (u16, u16), cell: (u16, u16), row: usize, col: usize) -> Rect {
    Rect::new(origin.0 + col as u16 * cell.0, origin.1 + row as u16 * cell.1, cell.0, cell.1)
}

/// Footer lines every game shows: score bottom-left, hint or result centered.
pub(crate) fn render_footer(canvas: &mut Canvas, score: i32, message: &str) {
    let text = canvas.theme().text();
    canvas.text(1, HEIGHT - 1, &format!("Score: {score}"), text);
    canvas.text_centered(HEIGHT - 2, message, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suites_partition_the_games() {
        for suite in [Suite::Classic, Suite::Cosmic] {
            assert!(suite.games().iter().all(|g| g.suite() == suite));
        }
        assert_eq!(Suite::Classic.games().len() + Suite::Cosmic.games().len(), 11);
    }

    #[test]
    fn escape_commit_rules() {
        assert!(!GameKind::Snake.commits_on_escape());
        assert!(!GameKind::TicTacToe.commits_on_escape());
        assert!(!GameKind::Hangman.commits_on_escape());
        assert!(GameKind::Minesweeper.commits_on_escape());
        assert!(GameKind::NumberGuessing.commits_on_escape());
        assert!(Suite::Cosmic.games().iter().all(|g| g.commits_on_escape()));
    }

    #[test]
    fn grid_hit_testing() {
        let origin = (10, 2);
        assert_eq!(grid_cell(origin, (4, 2), (3, 3), 10, 2), Some((0, 0)));
        assert_eq!(grid_cell(origin, (4, 2), (3, 3), 21, 7), Some((2, 2)));
        assert_eq!(grid_cell(origin, (4, 2), (3, 3), 22, 7), None);
        assert_eq!(grid_cell(origin, (4, 2), (3, 3), 9, 3), None);
        assert_eq!(cell_rect(origin, (4, 2), 1, 2), Rect::new(18, 4, 4, 2));
    }
}
