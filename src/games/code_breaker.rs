use crossterm::event::KeyCode;
use rand::Rng;

use crate::canvas::{Canvas, HEIGHT};
use crate::event::Input;
use crate::games::{common_keys, conclude, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

pub const CODE_LEN: usize = 4;
pub const ATTEMPTS: u32 = 5;
const LETTER_POINTS: i32 = 10;
const CRACK_BONUS: i32 = 50;

pub struct CodeBreaker {
    player: String,
    code: String,
    attempts_left: u32,
    current_guess: String,
    feedback: String,
    score: i32,
    game_over: bool,
    cracked: bool,
}

impl CodeBreaker {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        let code = (0..CODE_LEN).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect();
        Self {
            player: player.to_string(),
            code,
            attempts_left: ATTEMPTS,
            current_guess: String::new(),
            feedback: String::new(),
            score: 0,
            game_over: false,
            cracked: false,
        }
    }

    /// Positions where the guess matches the code, ignoring case.
    fn matching_positions(&self, guess: &str) -> usize {
        guess
            .chars()
            .zip(self.code.chars())
            .filter(|(g, c)| g.to_ascii_uppercase() == *c)
            .count()
    }

    fn submit(&mut self, session: &mut Session) -> Transition {
        let valid = self.current_guess.chars().count() == CODE_LEN
            && self.current_guess.chars().all(|c| c.is_ascii_alphabetic());
        if !valid {
            self.feedback = format!("Enter a {CODE_LEN}-letter code!");
            return Transition::None;
        }

        self.attempts_left -= 1;
        let correct = self.matching_positions(&self.current_guess);
        self.score += correct as i32 * LETTER_POINTS;

        if correct == CODE_LEN {
            self.score += CRACK_BONUS;
            self.cracked = true;
            self.game_over = true;
        } else if self.attempts_left == 0 {
            self.game_over = true;
        } else {
            self.feedback = format!("{correct} correct letters");
            self.current_guess.clear();
        }

        if self.game_over {
            conclude(&*self, session)
        } else {
            Transition::None
        }
    }
}

impl Game for CodeBreaker {
    fn kind(&self) -> GameKind {
        GameKind::CodeBreaker
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

    fn accepts_text(&self) -> bool {
        !self.game_over
    }

    fn result_line(&self) -> Option<String> {
        if !self.game_over {
            return None;
        }
        Some(if self.cracked {
            format!("Code cracked! Score: {}", self.score)
        } else {
            format!("Game Over! Code was {}", self.code)
        })
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        if self.game_over {
            return Transition::None;
        }
        match input.key_code() {
            Some(KeyCode::Backspace) => {
                self.current_guess.pop();
            }
            Some(KeyCode::Enter) if !self.current_guess.is_empty() => return self.submit(session),
            Some(KeyCode::Char(c)) if c.is_ascii_alphabetic() && self.current_guess.len() < CODE_LEN => {
                self.current_guess.push(c);
            }
            _ => {}
        }
        Transition::None
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let text = canvas.theme().text();
        let mut y = HEIGHT / 2 - 6;
        canvas.text_centered(y, &format!("Alien Code Breaker: Guess the {CODE_LEN}-letter code!"), text);
        y += 2;
        canvas.text_centered(y, &format!("Guess: {}", self.current_guess), text);
        y += 2;
        canvas.text_centered(y, &format!("Attempts left: {} Score: {}", self.attempts_left, self.score), text);
        y += 2;
        canvas.text_centered(y, &self.feedback, text);

        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Enter 4 letters and press ENTER, ESC to Menu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Destination;

    fn game(code: &str) -> (CodeBreaker, Session) {
        let mut session = Session::seeded(0);
        let mut g = CodeBreaker::new("AA", &mut session.rng);
        g.code = code.to_string();
        (g, session)
    }

    fn type_guess(g: &mut CodeBreaker, session: &mut Session, text: &str) -> Transition {
        for c in text.chars() {
            g.handle_input(&Input::char(c), session);
        }
        g.handle_input(&Input::key(KeyCode::Enter), session)
    }

    #[test]
    fn code_is_four_uppercase_letters() {
        let mut session = Session::seeded(42);
        let g = CodeBreaker::new("AA", &mut session.rng);
        assert_eq!(g.code.len(), CODE_LEN);
        assert!(g.code.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn partial_match_scores_per_position() {
        let (mut g, mut session) = game("MARS");
        assert_eq!(type_guess(&mut g, &mut session, "maxx"), Transition::None);
        assert_eq!(g.score, 20);
        assert_eq!(g.attempts_left, 4);
        assert_eq!(g.feedback, "2 correct letters");
        assert!(g.current_guess.is_empty());
    }

    #[test]
    fn short_guess_is_rejected_without_cost() {
        let (mut g, mut session) = game("MARS");
        type_guess(&mut g, &mut session, "ma");
        assert_eq!(g.feedback, "Enter a 4-letter code!");
        assert_eq!(g.attempts_left, ATTEMPTS);
        assert_eq!(g.score, 0);
    }

    #[test]
    fn cracking_the_code_goes_to_a_fact() {
        let (mut g, mut session) = game("MARS");
        let t = type_guess(&mut g, &mut session, "mArS");
        assert!(g.is_terminal());
        assert_eq!(g.score, 40 + 50);
        assert_eq!(
            t,
            Transition::Fact {
                next: Destination::Menu,
                headline: Some("Code cracked! Score: 90".to_string()),
            }
        );
        assert_eq!(session.scores.top_scores("Alien Code Breaker")[0].score, 90);
    }

    #[test]
    fn running_out_reports_the_code() {
        let (mut g, mut session) = game("MARS");
        let mut last = Transition::None;
        for _ in 0..ATTEMPTS {
            last = type_guess(&mut g, &mut session, "zzzz");
        }
        assert!(g.is_terminal());
        assert_eq!(g.attempts_left, 0);
        assert!(g.result_line().unwrap().contains("MARS"));
        match last {
            Transition::Fact { headline: Some(h), .. } => assert!(h.contains("Code was MARS")),
            other => panic!("unexpected transition {other:?}"),
        }
    }

    #[test]
    fn escape_commits_and_routes_through_fact() {
        let (mut g, mut session) = game("MARS");
        type_guess(&mut g, &mut session, "mxxx");
        let t = g.handle_input(&Input::key(KeyCode::Esc), &mut session);
        assert_eq!(t, Transition::Fact { next: Destination::Menu, headline: None });
        assert_eq!(session.scores.top_scores("Alien Code Breaker")[0].score, 10);
    }
}
