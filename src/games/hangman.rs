use std::collections::BTreeSet;

use crossterm::event::KeyCode;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::canvas::{Canvas, HEIGHT};
use crate::event::Input;
use crate::games::{common_keys, conclude, render_footer, Game, GameKind};
use crate::screen::{Session, Transition};

const WORDS: [&str; 5] = ["PYTHON", "PROGRAMMING", "COMPUTER", "ALGORITHM", "DATABASE"];
const LIVES: u32 = 6;
const GUESS_POINTS: i32 = 5;
const LIFE_BONUS: i32 = 10;

pub struct Hangman {
    player: String,
    word: &'static str,
    guessed: BTreeSet<char>,
    lives: u32,
    score: i32,
    game_over: bool,
}

impl Hangman {
    pub fn new(player: &str, rng: &mut impl Rng) -> Self {
        Self {
            player: player.to_string(),
            word: WORDS.choose(rng).copied().unwrap_or(WORDS[0]),
            guessed: BTreeSet::new(),
            lives: LIVES,
            score: 0,
            game_over: false,
        }
    }

    fn solved(&self) -> bool {
        self.word.chars().all(|c| self.guessed.contains(&c))
    }

    fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .collect()
    }

    fn guess(&mut self, letter: char, session: &mut Session) -> Transition {
        let letter = letter.to_ascii_uppercase();
        if self.game_over || !self.guessed.insert(letter) {
            return Transition::None;
        }
        if !self.word.contains(letter) {
            self.lives = self.lives.saturating_sub(1);
        }
        self.score += GUESS_POINTS;

        if self.solved() {
            self.score += self.lives as i32 * LIFE_BONUS;
            self.game_over = true;
            conclude(&*self, session)
        } else if self.lives == 0 {
            self.game_over = true;
            conclude(&*self, session)
        } else {
            Transition::None
        }
    }
}

impl Game for Hangman {
    fn kind(&self) -> GameKind {
        GameKind::Hangman
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
        let result = if self.lives > 0 { "Win!" } else { "Lose!" };
        Some(format!("{result} Word was {}.", self.word))
    }

    fn handle_input(&mut self, input: &Input, session: &mut Session) -> Transition {
        if let Some(transition) = common_keys(&*self, input, session) {
            return transition;
        }
        match input.key_code() {
            Some(KeyCode::Char(c)) if c.is_ascii_alphabetic() => self.guess(c, session),
            _ => Transition::None,
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let text = canvas.theme().text();
        let spaced: Vec<String> = self.masked_word().chars().map(String::from).collect();
        canvas.text_centered(HEIGHT / 2 - 4, &format!("Word: {}", spaced.join(" ")), text);
        canvas.text_centered(HEIGHT / 2 - 2, &format!("Lives: {} Score: {}", self.lives, self.score), text);
        let tried: String = self.guessed.iter().collect();
        canvas.text_centered(HEIGHT / 2, &format!("Tried: {tried}"), text);

        match self.result_line() {
            Some(result) => render_footer(canvas, self.score, &format!("{result} Press R to Restart or ESC to Menu")),
            None => render_footer(canvas, self.score, "Type letters to guess, ESC to return to Menu"),
        }
    }
}
