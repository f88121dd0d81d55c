//! "Did You Know?" interstitial shown between cosmic games and the menu.

use crossterm::event::{KeyCode, MouseButton};
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::layout::{Position, Rect};

use crate::canvas::{wrap_words, Canvas, Paint, HEIGHT, WIDTH};
use crate::event::Input;
use crate::screen::{Destination, Transition};

pub const SPACE_FACTS: [&str; 10] = [
    "The Sun is a star, about 4.6 billion years old, and makes up 99.86% of the Solar System's mass.",
    "Jupiter has 79 known moons, the largest being Ganymede, which is bigger than Mercury.",
    "A light-year is the distance light travels in one year, about 5.88 trillion miles (9.46 trillion km).",
    "The Milky Way galaxy contains an estimated 100-400 billion stars and is about 100,000 light-years across.",
    "Black holes have such strong gravity that not even light can escape; they form from massive star collapses.",
    "The first human in space was Yuri Gagarin, who orbited Earth on April 12, 1961, aboard Vostok 1.",
    "Mars has the largest volcano in the Solar System, Olympus Mons, which is 13.6 miles (22 km) high.",
    "Neutron stars are so dense that a teaspoon of their material would weigh as much as Mount Everest.",
    "The Hubble Space Telescope has been observing the universe since 1990, capturing images of distant galaxies.",
    "Saturn's rings are made of ice and rock particles, some as small as dust and others as large as mountains.",
];

const STARS: usize = 50;
const TITLE_ROW: u16 = 5;
const BUTTON_WIDTH: u16 = 14;
const BUTTON_HEIGHT: u16 = 3;

pub struct Fact {
    next: Destination,
    headline: Option<String>,
    lines: Vec<String>,
    stars: Vec<(u16, u16)>,
    button: Rect,
}

impl Fact {
    pub fn new(next: Destination, headline: Option<String>, rng: &mut impl Rng) -> Self {
        let fact = SPACE_FACTS.choose(rng).copied().unwrap_or(SPACE_FACTS[0]);
        let lines = wrap_words(fact, WIDTH - 4);
        let stars = (0..STARS)
            .map(|_| (rng.gen_range(0..WIDTH), rng.gen_range(0..HEIGHT)))
            .collect();
        let below_text = Self::first_line_row(headline.is_some()) + lines.len() as u16 + 1;
        let button = Rect::new((WIDTH - BUTTON_WIDTH) / 2, below_text, BUTTON_WIDTH, BUTTON_HEIGHT);
        Self { next, headline, lines, stars, button }
    }

    fn first_line_row(has_headline: bool) -> u16 {
        if has_headline { TITLE_ROW + 4 } else { TITLE_ROW + 2 }
    }

    #[cfg(test)]
    pub fn next(&self) -> Destination {
        self.next
    }

    fn continue_transition(&self) -> Transition {
        match self.next {
            Destination::Game(kind) => Transition::Play(kind),
            Destination::Menu => Transition::Menu,
        }
    }

    pub fn handle_input(&mut self, input: &Input) -> Transition {
        match *input {
            Input::Click { button: MouseButton::Left, x, y } if self.button.contains(Position::new(x, y)) => {
                self.continue_transition()
            }
            Input::Key(key) if key.code == KeyCode::Enter => self.continue_transition(),
            _ => Transition::None,
        }
    }

    pub fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        let theme = canvas.theme();
        for &(x, y) in &self.stars {
            canvas.circle(x, y, 0, theme.text());
        }
        canvas.text_centered(TITLE_ROW, "Did You Know?", theme.text());
        if let Some(headline) = &self.headline {
            canvas.text_centered(TITLE_ROW + 2, headline, theme.accent());
        }
        let mut y = Self::first_line_row(self.headline.is_some());
        for line in &self.lines {
            canvas.text_centered(y, line, theme.text());
            y += 1;
        }
        canvas.rect(self.button, theme.border(), Paint::Outlined);
        canvas.text_in(self.button, "Continue", theme.text());
        if let Destination::Game(kind) = self.next {
            canvas.text_centered(HEIGHT - 2, &format!("Next up: {}", kind.title()), theme.text());
        }
    }
}
