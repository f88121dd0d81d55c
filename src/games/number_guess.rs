use crossterm::event::KeyCode;
use rand::Rng;

use crate::canvas::{Canvas, HEIGHT};
use crate::event::Input;
use crate::games::{common_keys, conclude, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

pub const MAX_ATTEMPTS: u32 = 10;
const LOWEST: u32 = 1;
const HIGHEST: u32 = 100;
const MAX_DIGITS: usize = 3;
const GUESS_POINTS: i32 = 5;
const ATTEMPT_BONUS: i32 = 10;

pub struct NumberGuess {
    player: String,
    target: u32,
    attempts: u32,
    current_guess: String,
    feedback: String,
    score: i32,
    game_over: bool,
    won: bool,
}

impl NumberGuess {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        Self {
            player: player.to_string(),
            target: rng.gen_range(LOWEST..=HIGHEST),
            attempts: 0,
            current_guess: String::new(),
            feedback: String::new(),
            score: 0,
            game_over: false,
            won: false,
        }
    }

    fn submit(&mut self, session: &mut Session) -> Transition {
        let text = std::mem::take(&mut self.current_guess);
        let guess = match text.parse::<u32>() {
            Ok(guess) => guess,
            Err(_) => {
                self.feedback = "Invalid input! Enter a number.".to_string();
                return Transition::None;
            }
        };
        if !(LOWEST..=HIGHEST).contains(&guess) {
            self.feedback = format!("Please enter a number between {LOWEST} and {HIGHEST}");
            return Transition::None;
        }

        self.attempts += 1;
        self.score += GUESS_POINTS;
        if guess == self.target {
            self.score += (MAX_ATTEMPTS - self.attempts + 1) as i32 * ATTEMPT_BONUS;
            self.won = true;
            self.game_over = true;
            self.feedback = "Correct!".to_string();
        } else {
            self.feedback = if guess < self.target { "Too low!" } else { "Too high!" }.to_string();
            if self.attempts >= MAX_ATTEMPTS {
                self.game_over = true;
            }
        }

        if self.game_over {
            conclude(&*self, session)
        } else {
            Transition::None
        }
    }
}

impl Game for NumberGuess {
    fn kind(&self) -> GameKind {
        GameKind::NumberGuessing
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
        Some(if self.won { "Win!".to_string() } else { format!("Game Over! Number was {}", self.target) })
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
            Some(KeyCode::Char(c)) if c.is_ascii_digit() && self.current_guess.len() < MAX_DIGITS => {
                self.current_guess.push(c);
            }
            _ => {}
        }
        Transition::None
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let text = canvas.theme().text();
        let mut y = HEIGHT / 2 - 5;
        canvas.text_centered(y, &format!("Guess the number ({LOWEST}-{HIGHEST}): {}", self.current_guess), text);
        y += 2;
        canvas.text_centered(
            y,
            &format!("Attempts: {}/{} Score: {}", self.attempts, MAX_ATTEMPTS, self.score),
            text,
        );
        y += 2;
        canvas.text_centered(y, &self.feedback, text);

        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Enter your guess and press ENTER, ESC to Menu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(target: u32) -> (NumberGuess, Session) {
        let mut session = Session::seeded(0);
        let mut g = NumberGuess::new("AA", &mut session.rng);
        g.target = target;
        (g, session)
    }

    fn type_guess(g: &mut NumberGuess, session: &mut Session, text: &str) -> Transition {
        for c in text.chars() {
            g.handle_input(&Input::char(c), session);
        }
        g.handle_input(&Input::key(KeyCode::Enter), session)
    }

    #[test]
    fn target_in_range() {
        for seed in 0..50 {
            let mut session = Session::seeded(seed);
            let g = NumberGuess::new("AA", &mut session.rng);
            assert!((1..=100).contains(&g.target));
        }
    }

    #[test]
    fn wrong_guesses_cost_an_attempt_and_give_five() {
        let (mut g, mut session) = game(40);
        type_guess(&mut g, &mut session, "20");
        assert_eq!(g.feedback, "Too low!");
        type_guess(&mut g, &mut session, "60");
        assert_eq!(g.feedback, "Too high!");
        assert_eq!((g.attempts, g.score), (2, 10));
        assert!(g.current_guess.is_empty());
    }

    #[test]
    fn exact_hit_adds_attempt_bonus_and_ends() {
        for used_before in 0..MAX_ATTEMPTS {
            let (mut g, mut session) = game(50);
            for _ in 0..used_before {
                type_guess(&mut g, &mut session, "1");
            }
            let before = g.score;
            type_guess(&mut g, &mut session, "50");
            let used = used_before + 1;
            assert!(g.is_terminal());
            assert!(g.won);
            assert_eq!(g.score - before, (MAX_ATTEMPTS - used + 1) as i32 * 10 + 5);
            assert_eq!(session.scores.top_scores("Number Guessing")[0].score, g.score);
        }
    }

    #[test]
    fn out_of_range_is_feedback_only() {
        let (mut g, mut session) = game(50);
        type_guess(&mut g, &mut session, "0");
        assert_eq!(g.feedback, "Please enter a number between 1 and 100");
        type_guess(&mut g, &mut session, "101");
        assert_eq!((g.attempts, g.score), (0, 0));
        assert!(g.current_guess.is_empty());
    }

    #[test]
    fn only_three_digits_are_accepted() {
        let (mut g, mut session) = game(50);
        for c in "12a34".chars() {
            g.handle_input(&Input::char(c), &mut session);
        }
        assert_eq!(g.current_guess, "123");
        g.handle_input(&Input::key(KeyCode::Backspace), &mut session);
        assert_eq!(g.current_guess, "12");
    }

    #[test]
    fn empty_enter_does_nothing() {
        let (mut g, mut session) = game(50);
        g.handle_input(&Input::key(KeyCode::Enter), &mut session);
        assert_eq!(g.attempts, 0);
        assert!(g.feedback.is_empty());
    }

    #[test]
    fn running_out_of_attempts_loses() {
        let (mut g, mut session) = game(99);
        for _ in 0..MAX_ATTEMPTS {
            type_guess(&mut g, &mut session, "1");
        }
        assert!(g.is_terminal());
        assert!(!g.won);
        assert_eq!(g.score, 50);
        assert_eq!(g.result_line().as_deref(), Some("Game Over! Number was 99"));
        assert_eq!(session.scores.top_scores("Number Guessing").len(), 1);
        // Further typing is ignored.
        type_guess(&mut g, &mut session, "99");
        assert_eq!(g.attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn escape_commits_unfinished_score() {
        let (mut g, mut session) = game(99);
        type_guess(&mut g, &mut session, "1");
        assert_eq!(g.handle_input(&Input::key(KeyCode::Esc), &mut session), Transition::Menu);
        assert_eq!(session.scores.top_scores("Number Guessing")[0].score, 5);
    }
}
