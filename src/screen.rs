use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::event::Input;
use crate::fact::Fact;
use crate::games::astro_puzzle::AstroPuzzle;
use crate::games::code_breaker::CodeBreaker;
use crate::games::cosmic_jigsaw::CosmicJigsaw;
use crate::games::hangman::Hangman;
use crate::games::meteor_match::MeteorMatch;
use crate::games::minesweeper::Minesweeper;
use crate::games::nebula_maze::NebulaMaze;
use crate::games::number_guess::NumberGuess;
use crate::games::quantum_circuit::QuantumCircuit;
use crate::games::snake::{self, Snake};
use crate::games::tic_tac_toe::TicTacToe;
use crate::games::{Game, GameKind};
use crate::menu::Menu;
use crate::scores::Leaderboard;
use crate::theme::Theme;

pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

/// State shared by every screen for the lifetime of the program.
pub struct Session {
    pub theme: Theme,
    pub scores: Leaderboard,
    pub rng: StdRng,
    /// Time since startup, sampled once per tick.
    pub now: Duration,
}

impl Session {
    pub fn new(rng: StdRng) -> Self {
        Self {
            theme: Theme::default(),
            scores: Leaderboard::new(),
            rng,
            now: Duration::ZERO,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

/// Where the space-fact interstitial leads once dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Game(GameKind),
    Menu,
}

/// What a screen asks the driver to do after handling an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Fresh instance of the current game, same player. Terminal games only.
    Restart,
    Menu,
    Fact { next: Destination, headline: Option<String> },
    /// Name confirmed and game picked in the menu.
    Begin { player: String, game: GameKind },
    /// Continue from the interstitial into a game.
    Play(GameKind),
    Quit,
}

pub enum Screen {
    Menu(Menu),
    Fact(Fact),
    Snake(Snake),
    TicTacToe(TicTacToe),
    Hangman(Hangman),
    Minesweeper(Minesweeper),
    NumberGuess(NumberGuess),
    CodeBreaker(CodeBreaker),
    MeteorMatch(MeteorMatch),
    QuantumCircuit(QuantumCircuit),
    AstroPuzzle(AstroPuzzle),
    CosmicJigsaw(CosmicJigsaw),
    NebulaMaze(NebulaMaze),
}

impl Screen {
    /// A fresh game screen.
    pub fn game(kind: GameKind, player: &str, rng: &mut StdRng) -> Self {
        match kind {
            GameKind::Snake => Screen::Snake(Snake::new(player, rng)),
            GameKind::TicTacToe => Screen::TicTacToe(TicTacToe::new(player)),
            GameKind::Hangman => Screen::Hangman(Hangman::new(player, rng)),
            GameKind::Minesweeper => Screen::Minesweeper(Minesweeper::new(player)),
            GameKind::NumberGuessing => Screen::NumberGuess(NumberGuess::new(player, rng)),
            GameKind::CodeBreaker => Screen::CodeBreaker(CodeBreaker::new(player, rng)),
            GameKind::MeteoriteMatch => Screen::MeteorMatch(MeteorMatch::new(player, rng)),
            GameKind::QuantumCircuit => Screen::QuantumCircuit(QuantumCircuit::new(player, rng)),
            GameKind::AstroPuzzle => Screen::AstroPuzzle(AstroPuzzle::new(player, rng)),
            GameKind::CosmicJigsaw => Screen::CosmicJigsaw(CosmicJigsaw::new(player, rng)),
            GameKind::NebulaMaze => Screen::NebulaMaze(NebulaMaze::new(player)),
        }
    }

    fn as_game(&self) -> Option<&dyn Game> {
        let game: &dyn Game = match self {
            Screen::Menu(_) | Screen::Fact(_) => return None,
            Screen::Snake(g) => g,
            Screen::TicTacToe(g) => g,
            Screen::Hangman(g) => g,
            Screen::Minesweeper(g) => g,
            Screen::NumberGuess(g) => g,
            Screen::CodeBreaker(g) => g,
            Screen::MeteorMatch(g) => g,
            Screen::QuantumCircuit(g) => g,
            Screen::AstroPuzzle(g) => g,
            Screen::CosmicJigsaw(g) => g,
            Screen::NebulaMaze(g) => g,
        };
        Some(game)
    }

    fn as_game_mut(&mut self) -> Option<&mut dyn Game> {
        let game: &mut dyn Game = match self {
            Screen::Menu(_) | Screen::Fact(_) => return None,
            Screen::Snake(g) => g,
            Screen::TicTacToe(g) => g,
            Screen::Hangman(g) => g,
            Screen::Minesweeper(g) => g,
            Screen::NumberGuess(g) => g,
            Screen::CodeBreaker(g) => g,
            Screen::MeteorMatch(g) => g,
            Screen::QuantumCircuit(g) => g,
            Screen::AstroPuzzle(g) => g,
            Screen::CosmicJigsaw(g) => g,
            Screen::NebulaMaze(g) => g,
        };
        Some(game)
    }

    pub fn game_kind(&self) -> Option<GameKind> {
        self.as_game().map(|g| g.kind())
    }

    #[cfg(test)]
    pub fn player(&self) -> Option<&str> {
        self.as_game().map(|g| g.player())
    }

    pub fn is_terminal(&self) -> bool {
        self.as_game().is_some_and(|g| g.is_terminal())
    }

    pub fn accepts_text(&self) -> bool {
        match self {
            Screen::Menu(menu) => menu.accepts_text(),
            Screen::Fact(_) => false,
            _ => self.as_game().is_some_and(|g| g.accepts_text()),
        }
    }

    pub fn tick_rate(&self) -> u32 {
        match self {
            Screen::Snake(_) => snake::TICKS_PER_SECOND,
            _ => DEFAULT_TICKS_PER_SECOND,
        }
    }

    pub fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        match self {
            Screen::Menu(menu) => menu.handle_input(input),
            Screen::Fact(fact) => fact.handle_input(input),
            _ => match self.as_game_mut() {
                Some(game) => game.handle_input(input, session),
                None => Transition::None,
            },
        }
    }

    /// Only screens that advance without input are updated each tick.
    pub fn update(&mut self, session: &mut Session) {
        match self {
            Screen::Snake(game) => game.update(session),
            Screen::MeteorMatch(game) => game.update(session),
            _ => {}
        }
    }

    pub fn render(&self, canvas: &mut Canvas, scores: &Leaderboard) {
        match self {
            Screen::Menu(menu) => menu.render(canvas, scores),
            Screen::Fact(fact) => fact.render(canvas),
            _ => {
                if let Some(game) = self.as_game() {
                    game.render(canvas);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Suite;

    #[test]
    fn every_kind_builds_its_own_screen() {
        let mut session = Session::seeded(1);
        for suite in [Suite::Classic, Suite::Cosmic] {
            for &kind in suite.games() {
                let screen = Screen::game(kind, "AA", &mut session.rng);
                assert_eq!(screen.game_kind(), Some(kind));
                assert_eq!(screen.player(), Some("AA"));
                assert!(!screen.is_terminal());
            }
        }
    }

    #[test]
    fn only_snake_runs_slow() {
        let mut session = Session::seeded(1);
        assert_eq!(Screen::game(GameKind::Snake, "AA", &mut session.rng).tick_rate(), 10);
        assert_eq!(Screen::game(GameKind::Hangman, "AA", &mut session.rng).tick_rate(), 60);
        assert_eq!(Screen::Menu(Menu::new(Suite::Classic, "")).tick_rate(), 60);
    }

    #[test]
    fn menu_and_fact_are_not_games() {
        let mut session = Session::seeded(1);
        let menu = Screen::Menu(Menu::new(Suite::Cosmic, ""));
        let fact = Screen::Fact(Fact::new(Destination::Menu, None, &mut session.rng));
        for screen in [menu, fact] {
            assert_eq!(screen.game_kind(), None);
            assert!(!screen.is_terminal());
            assert!(!screen.accepts_text());
        }
    }

    #[test]
    fn text_screens_accept_text() {
        let mut session = Session::seeded(1);
        assert!(Screen::game(GameKind::Hangman, "AA", &mut session.rng).accepts_text());
        assert!(Screen::game(GameKind::CodeBreaker, "AA", &mut session.rng).accepts_text());
        assert!(!Screen::game(GameKind::NebulaMaze, "AA", &mut session.rng).accepts_text());
    }
}
