use crossterm::event::{KeyCode, MouseButton};
use ratatui::layout::{Position, Rect};
use rand::Rng;

use crate::canvas::{Canvas, Paint, HEIGHT, WIDTH};
use crate::event::Input;
use crate::games::{common_keys, conclude, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

const STEP_POINTS: i32 = 5;
const ALIGN_BONUS: i32 = 50;
const PLUS_BUTTON: Rect = Rect { x: WIDTH / 2 - 12, y: HEIGHT / 2 + 1, width: 10, height: 3 };
const MINUS_BUTTON: Rect = Rect { x: WIDTH / 2 + 2, y: HEIGHT / 2 + 1, width: 10, height: 3 };

pub struct QuantumCircuit {
    player: String,
    target: i32,
    value: i32,
    score: i32,
    game_over: bool,
}

impl QuantumCircuit {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        Self {
            player: player.to_string(),
            target: rng.gen_range(1..=20),
            value: 0,
            score: 0,
            game_over: false,
        }
    }

    fn step(&mut self, delta: i32, session: &mut Session) -> Transition {
        if self.game_over {
            return Transition::None;
        }
        self.value += delta;
        self.score += STEP_POINTS;
        if self.value != self.target {
            return Transition::None;
        }
        self.score += ALIGN_BONUS;
        self.game_over = true;
        conclude(&*self, session)
    }
}

impl Game for QuantumCircuit {
    fn kind(&self) -> GameKind {
        GameKind::QuantumCircuit
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
        self.game_over.then(|| format!("Circuit aligned at {}!", self.target))
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        match *input {
            Input::Click { button: MouseButton::Left, x, y } => {
                let at = Position::new(x, y);
                if PLUS_BUTTON.contains(at) {
                    self.step(1, session)
                } else if MINUS_BUTTON.contains(at) {
                    self.step(-1, session)
                } else {
                    Transition::None
                }
            }
            Input::Key(key) => match key.code {
                KeyCode::Char('+') | KeyCode::Char('=') => self.step(1, session),
                KeyCode::Char('-') => self.step(-1, session),
                _ => Transition::None,
            },
            _ => Transition::None,
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let theme = canvas.theme();
        canvas.text_centered(HEIGHT / 2 - 5, &format!("Quantum Circuit: Reach value {}!", self.target), theme.text());
        canvas.text_centered(
            HEIGHT / 2 - 3,
            &format!("Current Value: {} Score: {}", self.value, self.score),
            theme.text(),
        );
        for (button, label) in [(PLUS_BUTTON, "+1"), (MINUS_BUTTON, "-1")] {
            canvas.rect(button, theme.border(), Paint::Outlined);
            canvas.text_in(button, label, theme.text());
        }
        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Click buttons or use +/- keys, ESC to Menu"),
        }
    }
}
