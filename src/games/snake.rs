use std::collections::VecDeque;

use crossterm::event::KeyCode;
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::canvas::{Canvas, Paint, HEIGHT};
use crate::event::Input;
use crate::games::{cell_rect, common_keys, conclude, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

pub const GRID_WIDTH: i32 = 40;
pub const GRID_HEIGHT: i32 = 20;
pub const TICKS_PER_SECOND: u32 = 10;
const CELL: (u16, u16) = (2, 1);
const ORIGIN: (u16, u16) = (0, 1);
const FOOD_POINTS: i32 = 10;

type Pos = (i32, i32);

pub struct Snake {
    player: String,
    body: VecDeque<Pos>,
    direction: Pos,
    pub(crate) food: Pos,
    score: i32,
    game_over: bool,
}

impl Snake {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        let mut body = VecDeque::new();
        body.push_back((GRID_WIDTH / 2, GRID_HEIGHT / 2));
        let mut snake = Self {
            player: player.to_string(),
            body,
            direction: (1, 0),
            food: (0, 0),
            score: 0,
            game_over: false,
        };
        // A single segment never fills the grid.
        snake.food = snake.free_cell(rng).unwrap_or((0, 0));
        snake
    }

    fn free_cell(&self, rng: &mut impl Rng) -> Option<Pos> {
        let free: Vec<Pos> = (0..GRID_HEIGHT)
            .flat_map(|y| (0..GRID_WIDTH).map(move |x| (x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();
        free.choose(rng).copied()
    }

    fn in_bounds((x, y): Pos) -> bool {
        (0..GRID_WIDTH).contains(&x) && (0..GRID_HEIGHT).contains(&y)
    }

    fn head(&self) -> Pos {
        self.body[0]
    }

    fn turn(&mut self, direction: Pos) {
        if direction != (-self.direction.0, -self.direction.1) {
            self.direction = direction;
        }
    }
}

impl Game for Snake {
    fn kind(&self) -> GameKind {
        GameKind::Snake
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

    fn update(&mut self, session: &mut Session) {
        if self.game_over {
            return;
        }
        let (hx, hy) = self.head();
        let next = (hx + self.direction.0, hy + self.direction.1);

        if self.body.contains(&next) || !Self::in_bounds(next) {
            self.game_over = true;
            conclude(&*self, session);
            return;
        }

        self.body.push_front(next);
        if next == self.food {
            self.score += FOOD_POINTS;
            match self.free_cell(&mut session.rng) {
                Some(food) => self.food = food,
                None => {
                    self.game_over = true;
                    conclude(&*self, session);
                }
            }
        } else {
            self.body.pop_back();
        }
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        match input.key_code() {
            Some(KeyCode::Up) => self.turn((0, -1)),
            Some(KeyCode::Down) => self.turn((0, 1)),
            Some(KeyCode::Left) => self.turn((-1, 0)),
            Some(KeyCode::Right) => self.turn((1, 0)),
            _ => {}
        }
        Transition::None
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let border = canvas.theme().border();
        canvas.text(0, 0, &"─".repeat(GRID_WIDTH as usize * CELL.0 as usize), border);

        for &(x, y) in &self.body {
            let color = if (x, y) == self.head() { Color::Rgb(120, 255, 120) } else { Color::Green };
            canvas.rect(cell_rect(ORIGIN, CELL, y as usize, x as usize), color, Paint::Filled);
        }
        let (fx, fy) = self.food;
        canvas.rect(cell_rect(ORIGIN, CELL, fy as usize, fx as usize), Color::Red, Paint::Filled);

        if self.game_over {
            let text = canvas.theme().text();
            canvas.text_centered(HEIGHT / 2, "Game Over! Press R to Restart or ESC to Menu", text);
            render_footer(canvas, self.score, "");
        } else {
            render_footer(canvas, self.score, "Arrows to steer, ESC to return to Menu");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::{contains_text, viewport};
    use crate::theme::Theme;
    use ratatui::buffer::Buffer;

    fn session() -> Session {
        Session::seeded(7)
    }

    fn snake(session: &mut Session) -> Snake {
        Snake::new("AA", &mut session.rng)
    }

    #[test]
    fn starts_centered_heading_right() {
        let mut session = session();
        let s = snake(&mut session);
        assert_eq!(s.head(), (20, 10));
        assert_eq!(s.direction, (1, 0));
        assert!(!s.body.contains(&s.food));
        assert!(Snake::in_bounds(s.food));
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut session = session();
        let mut s = snake(&mut session);
        s.food = (21, 10);
        s.update(&mut session);
        assert_eq!(s.score, 10);
        assert_eq!(s.body.len(), 2);
        assert_ne!(s.food, (21, 10));
        assert!(!s.body.contains(&s.food));
    }

    #[test]
    fn cannot_reverse() {
        let mut session = session();
        let mut s = snake(&mut session);
        s.handle_input(&Input::key(KeyCode::Left), &mut session);
        assert_eq!(s.direction, (1, 0));
        s.handle_input(&Input::key(KeyCode::Up), &mut session);
        assert_eq!(s.direction, (0, -1));
    }

    #[test]
    fn wall_ends_game_and_records_score() {
        let mut session = session();
        let mut s = snake(&mut session);
        s.food = (0, 0);
        for _ in 0..GRID_WIDTH {
            s.update(&mut session);
        }
        assert!(s.is_terminal());
        assert_eq!(session.scores.top_scores("Snake").len(), 1);
        assert_eq!(session.scores.top_scores("Snake")[0].score, 0);

        // No further movement or commits once over.
        s.update(&mut session);
        assert_eq!(session.scores.top_scores("Snake").len(), 1);
    }

    #[test]
    fn running_into_itself_ends_game() {
        let mut session = session();
        let mut s = snake(&mut session);
        s.body = VecDeque::from(vec![(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        s.direction = (0, 1);
        s.food = (0, 0);
        s.update(&mut session);
        assert!(s.is_terminal());
    }

    #[test]
    fn restart_only_when_over() {
        let mut session = session();
        let mut s = snake(&mut session);
        assert_eq!(s.handle_input(&Input::char('r'), &mut session), Transition::None);
        s.game_over = true;
        assert_eq!(s.handle_input(&Input::char('r'), &mut session), Transition::Restart);
    }

    #[test]
    fn escape_goes_to_menu_without_commit() {
        let mut session = session();
        let mut s = snake(&mut session);
        assert_eq!(s.handle_input(&Input::key(KeyCode::Esc), &mut session), Transition::Menu);
        assert!(session.scores.top_scores("Snake").is_empty());
    }

    #[test]
    fn renders_score_and_game_over() {
        let mut session = session();
        let mut s = snake(&mut session);
        s.score = 30;
        s.game_over = true;
        let mut buf = Buffer::empty(viewport());
        s.render(&mut Canvas::new(&mut buf, viewport(), Theme::default()));
        assert!(contains_text(&buf, "Score: 30"));
        assert!(contains_text(&buf, "Game Over!"));
    }
}
