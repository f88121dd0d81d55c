use crossterm::event::{KeyCode, MouseButton};
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::canvas::{Canvas, Paint};
use crate::event::Input;
use crate::games::{cell_rect, centered, common_keys, conclude, grid_cell, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

const WORD: &str = "COSMIC";
const PIECES: usize = WORD.len();
const CELL: (u16, u16) = (8, 4);
const SWAP_POINTS: i32 = 10;
const SOLVE_BONUS: i32 = 50;

pub struct CosmicJigsaw {
    player: String,
    pieces: Vec<char>,
    cursor: usize,
    score: i32,
    game_over: bool,
}

fn origin() -> (u16, u16) {
    let (x, y) = centered(CELL.0 * PIECES as u16, CELL.1);
    (x, y.saturating_sub(2))
}

impl CosmicJigsaw {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        let mut pieces: Vec<char> = WORD.chars().collect();
        while pieces.iter().copied().eq(WORD.chars()) {
            pieces.shuffle(rng);
        }
        Self {
            player: player.to_string(),
            pieces,
            cursor: 0,
            score: 0,
            game_over: false,
        }
    }

    fn solved(&self) -> bool {
        self.pieces.iter().copied().eq(WORD.chars())
    }

    /// Swap piece `idx` with its right neighbor.
    fn swap(&mut self, idx: usize, session: &mut Session) -> Transition {
        if self.game_over || idx + 1 >= PIECES {
            return Transition::None;
        }
        self.pieces.swap(idx, idx + 1);
        self.score += SWAP_POINTS;
        if !self.solved() {
            return Transition::None;
        }
        self.score += SOLVE_BONUS;
        self.game_over = true;
        conclude(&*self, session)
    }
}

impl Game for CosmicJigsaw {
    fn kind(&self) -> GameKind {
        GameKind::CosmicJigsaw
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
        self.game_over.then(|| format!("Jigsaw complete! Score: {}", self.score))
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        match *input {
            Input::Click { button: MouseButton::Left, x, y } => match grid_cell(origin(), CELL, (1, PIECES), x, y) {
                Some((_, col)) => {
                    self.cursor = col.min(PIECES - 2);
                    self.swap(col, session)
                }
                None => Transition::None,
            },
            Input::Key(key) => {
                match key.code {
                    KeyCode::Left if self.cursor > 0 => self.cursor -= 1,
                    KeyCode::Right if self.cursor + 2 < PIECES => self.cursor += 1,
                    KeyCode::Enter | KeyCode::Char(' ') => return self.swap(self.cursor, session),
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
        for (idx, piece) in self.pieces.iter().enumerate() {
            let rect = cell_rect(origin(), CELL, 0, idx);
            canvas.rect(rect, Color::Gray, Paint::Filled);
            canvas.text_in(rect, &piece.to_string(), theme.text());
        }
        if !self.game_over {
            // The cursor spans the pair that Enter would swap.
            let left = cell_rect(origin(), CELL, 0, self.cursor);
            let pair = left.union(cell_rect(origin(), CELL, 0, self.cursor + 1));
            canvas.rect(pair, theme.accent(), Paint::Outlined);
        }
        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Click adjacent letters to swap, ESC to Menu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Destination;

    fn game(pieces: &str) -> (CosmicJigsaw, Session) {
        let mut session = Session::seeded(0);
        let mut g = CosmicJigsaw::new("AA", &mut session.rng);
        g.pieces = pieces.chars().collect();
        (g, session)
    }

    fn click(idx: usize) -> Input {
        let rect = cell_rect(origin(), CELL, 0, idx);
        Input::left_click(rect.x + 1, rect.y + 1)
    }

    #[test]
    fn never_starts_solved() {
        for seed in 0..100 {
            let mut session = Session::seeded(seed);
            let g = CosmicJigsaw::new("AA", &mut session.rng);
            assert!(!g.solved());
            let mut letters = g.pieces.clone();
            letters.sort_unstable();
            assert_eq!(letters, vec!['C', 'C', 'I', 'M', 'O', 'S']);
        }
    }

    #[test]
    fn click_swaps_with_right_neighbor() {
        let (mut g, mut session) = game("OCSMIC");
        g.handle_input(&click(2), &mut session);
        assert_eq!(g.pieces.iter().collect::<String>(), "OCMSIC");
        assert_eq!(g.score, 10);
    }

    #[test]
    fn last_piece_has_no_right_neighbor() {
        let (mut g, mut session) = game("OCSMIC");
        g.handle_input(&click(5), &mut session);
        assert_eq!(g.pieces.iter().collect::<String>(), "OCSMIC");
        assert_eq!(g.score, 0);
    }

    #[test]
    fn spelling_the_word_finishes() {
        let (mut g, mut session) = game("OCSMIC");
        let t = g.handle_input(&Input::key(KeyCode::Enter), &mut session);
        assert!(g.is_terminal());
        assert_eq!(g.score, 60);
        assert_eq!(
            t,
            Transition::Fact {
                next: Destination::Menu,
                headline: Some("Jigsaw complete! Score: 60".to_string()),
            }
        );
        assert_eq!(session.scores.top_scores("Cosmic Jigsaw Explore")[0].score, 60);
    }

    #[test]
    fn cursor_stays_on_swappable_pairs() {
        let (mut g, mut session) = game("OCSMIC");
        for _ in 0..10 {
            g.handle_input(&Input::key(KeyCode::Right), &mut session);
        }
        assert_eq!(g.cursor, PIECES - 2);
        g.handle_input(&Input::key(KeyCode::Enter), &mut session);
        assert_eq!(g.pieces.iter().collect::<String>(), "OCSMCI");
    }
}
