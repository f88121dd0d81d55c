use std::time::Duration;

use crossterm::event::{KeyCode, MouseButton};
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::canvas::{Canvas, Paint};
use crate::event::Input;
use crate::games::{cell_rect, centered, common_keys, conclude, grid_cell, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

const COLUMNS: usize = 4;
const ROWS: usize = 2;
const CARDS: usize = COLUMNS * ROWS;
const CELL: (u16, u16) = (10, 5);
pub const FLIP_BACK_DELAY: Duration = Duration::from_millis(500);
const PICK_POINTS: i32 = 5;
const PAIR_POINTS: i32 = 20;
const CLEAR_BONUS: i32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Meteor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Meteor {
    fn color(&self) -> Color {
        match self {
            Meteor::Red => Color::Red,
            Meteor::Blue => Color::Blue,
            Meteor::Green => Color::Green,
            Meteor::Yellow => Color::Yellow,
        }
    }

    fn initial(&self) -> &'static str {
        match self {
            Meteor::Red => "R",
            Meteor::Blue => "B",
            Meteor::Green => "G",
            Meteor::Yellow => "Y",
        }
    }
}

/// A mismatched pair waiting to be turned face down again.
#[derive(Clone, Copy, Debug)]
struct FlipBack {
    first: usize,
    second: usize,
    deadline: Duration,
}

pub struct MeteorMatch {
    player: String,
    cards: [Meteor; CARDS],
    revealed: [bool; CARDS],
    matched: [bool; CARDS],
    first_pick: Option<usize>,
    flip_back: Option<FlipBack>,
    cursor: usize,
    score: i32,
    game_over: bool,
}

fn origin() -> (u16, u16) {
    centered(CELL.0 * COLUMNS as u16, CELL.1 * ROWS as u16)
}

impl MeteorMatch {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        let mut cards = [
            Meteor::Red,
            Meteor::Blue,
            Meteor::Green,
            Meteor::Yellow,
            Meteor::Red,
            Meteor::Blue,
            Meteor::Green,
            Meteor::Yellow,
        ];
        cards.shuffle(rng);
        Self {
            player: player.to_string(),
            cards,
            revealed: [false; CARDS],
            matched: [false; CARDS],
            first_pick: None,
            flip_back: None,
            cursor: 0,
            score: 0,
            game_over: false,
        }
    }

    fn pick(&mut self, idx: usize, session: &mut Session) -> Transition {
        if self.game_over || self.flip_back.is_some() || self.revealed[idx] || self.matched[idx] {
            return Transition::None;
        }
        self.revealed[idx] = true;
        self.score += PICK_POINTS;

        let Some(first) = self.first_pick.take() else {
            self.first_pick = Some(idx);
            return Transition::None;
        };
        if self.cards[first] == self.cards[idx] {
            self.matched[first] = true;
            self.matched[idx] = true;
            self.score += PAIR_POINTS;
        } else {
            self.flip_back = Some(FlipBack {
                first,
                second: idx,
                deadline: session.now + FLIP_BACK_DELAY,
            });
        }
        self.check_cleared(session).unwrap_or(Transition::None)
    }

    fn check_cleared(&mut self, session: &mut Session) -> Option<Transition> {
        if self.game_over || !self.matched.iter().all(|&m| m) {
            return None;
        }
        self.score += CLEAR_BONUS;
        self.game_over = true;
        Some(conclude(&*self, session))
    }
}

impl Game for MeteorMatch {
    fn kind(&self) -> GameKind {
        GameKind::MeteoriteMatch
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
        self.game_over.then(|| format!("All matched! Score: {}", self.score))
    }

    /// Turns a mismatched pair face down once its deadline has passed.
    fn update(&mut self, session: &mut Session) {
        if let Some(pending) = self.flip_back {
            if session.now > pending.deadline {
                self.revealed[pending.first] = false;
                self.revealed[pending.second] = false;
                self.flip_back = None;
            }
        }
        self.check_cleared(session);
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        match *input {
            Input::Click { button: MouseButton::Left, x, y } => {
                match grid_cell(origin(), CELL, (ROWS, COLUMNS), x, y) {
                    Some((row, col)) => {
                        self.cursor = row * COLUMNS + col;
                        self.pick(self.cursor, session)
                    }
                    None => Transition::None,
                }
            }
            Input::Key(key) => {
                let (row, col) = (self.cursor / COLUMNS, self.cursor % COLUMNS);
                match key.code {
                    KeyCode::Left if col > 0 => self.cursor -= 1,
                    KeyCode::Right if col + 1 < COLUMNS => self.cursor += 1,
                    KeyCode::Up if row > 0 => self.cursor -= COLUMNS,
                    KeyCode::Down if row + 1 < ROWS => self.cursor += COLUMNS,
                    KeyCode::Enter | KeyCode::Char(' ') => return self.pick(self.cursor, session),
                    _ => {}
                }
                Transition::None
            }
            _ => Transition::None,
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let theme = canvas.theme();
        for idx in 0..CARDS {
            let rect = cell_rect(origin(), CELL, idx / COLUMNS, idx % COLUMNS);
            if self.matched[idx] || self.revealed[idx] {
                let card = self.cards[idx];
                canvas.rect(rect, if self.matched[idx] { Color::Gray } else { card.color() }, Paint::Filled);
                canvas.text_in(rect, card.initial(), theme.text());
            } else {
                canvas.rect(rect, theme.border(), Paint::Outlined);
            }
            if !self.game_over && idx == self.cursor {
                canvas.rect(rect, theme.accent(), Paint::Outlined);
            }
        }
        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Click to reveal, ESC to Menu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Destination;

    fn game() -> (MeteorMatch, Session) {
        let mut session = Session::seeded(0);
        let mut g = MeteorMatch::new("AA", &mut session.rng);
        g.cards = [
            Meteor::Red,
            Meteor::Red,
            Meteor::Blue,
            Meteor::Blue,
            Meteor::Green,
            Meteor::Green,
            Meteor::Yellow,
            Meteor::Yellow,
        ];
        (g, session)
    }

    fn click(idx: usize) -> Input {
        let rect = cell_rect(origin(), CELL, idx / COLUMNS, idx % COLUMNS);
        Input::left_click(rect.x + 2, rect.y + 2)
    }

    #[test]
    fn deck_has_four_pairs() {
        let mut session = Session::seeded(3);
        let g = MeteorMatch::new("AA", &mut session.rng);
        for meteor in [Meteor::Red, Meteor::Blue, Meteor::Green, Meteor::Yellow] {
            assert_eq!(g.cards.iter().filter(|&&c| c == meteor).count(), 2);
        }
    }

    #[test]
    fn matching_pair_stays_up() {
        let (mut g, mut session) = game();
        g.handle_input(&click(0), &mut session);
        g.handle_input(&click(1), &mut session);
        assert!(g.matched[0] && g.matched[1]);
        assert_eq!(g.score, 5 + 5 + 20);
        assert!(g.first_pick.is_none());
    }

    #[test]
    fn mismatch_flips_back_after_deadline_without_input() {
        let (mut g, mut session) = game();
        session.now = Duration::from_millis(1_000);
        g.handle_input(&click(0), &mut session);
        g.handle_input(&click(2), &mut session);
        assert!(g.revealed[0] && g.revealed[2]);

        session.now = Duration::from_millis(1_400);
        g.update(&mut session);
        assert!(g.revealed[0] && g.revealed[2]);

        // Picks are ignored while the pair is still showing.
        g.handle_input(&click(4), &mut session);
        assert!(!g.revealed[4]);

        session.now = Duration::from_millis(1_501);
        g.update(&mut session);
        assert!(!g.revealed[0] && !g.revealed[2]);
        assert!(g.flip_back.is_none());
        assert_eq!(g.score, 10);
    }

    #[test]
    fn clearing_the_board_finishes_once() {
        let (mut g, mut session) = game();
        let mut last = Transition::None;
        for idx in 0..CARDS {
            last = g.handle_input(&click(idx), &mut session);
        }
        assert!(g.is_terminal());
        assert_eq!(g.score, 8 * 5 + 4 * 20 + 50);
        assert!(matches!(last, Transition::Fact { next: Destination::Menu, .. }));

        // Ticking afterwards must not pay the bonus again.
        g.update(&mut session);
        g.update(&mut session);
        assert_eq!(g.score, 170);
        assert_eq!(session.scores.top_scores("Meteorite Match-Up").len(), 1);
    }

    #[test]
    fn keyboard_cursor_picks() {
        let (mut g, mut session) = game();
        g.handle_input(&Input::key(KeyCode::Down), &mut session);
        g.handle_input(&Input::key(KeyCode::Right), &mut session);
        g.handle_input(&Input::key(KeyCode::Enter), &mut session);
        assert!(g.revealed[5]);
        assert_eq!(g.first_pick, Some(5));
    }
}
