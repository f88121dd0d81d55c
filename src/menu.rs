use crossterm::event::KeyCode;
use ratatui::layout::Rect;

use crate::canvas::{Canvas, Paint, HEIGHT, WIDTH};
use crate::event::Input;
use crate::games::{GameKind, Suite};
use crate::scores::{Leaderboard, NAME_LEN};
use crate::screen::Transition;

const FIRST_OPTION_ROW: u16 = 4;
const OPTION_SPACING: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuOption {
    Play(GameKind),
    Quit,
}

impl MenuOption {
    fn label(&self) -> &'static str {
        match self {
            MenuOption::Play(kind) => kind.title(),
            MenuOption::Quit => "Quit",
        }
    }
}

pub struct Menu {
    suite: Suite,
    options: Vec<MenuOption>,
    selected: usize,
    player_name: String,
    name_input: bool,
    show_scores: bool,
}

impl Menu {
    /// A menu whose name prompt starts out holding `last_player`.
    pub fn new(suite: Suite, last_player: &str) -> Self {
        let mut options: Vec<MenuOption> = suite.games().iter().copied().map(MenuOption::Play).collect();
        options.push(MenuOption::Quit);
        Self {
            suite,
            options,
            selected: 0,
            player_name: last_player.chars().take(NAME_LEN).collect(),
            name_input: false,
            show_scores: false,
        }
    }

    pub fn accepts_text(&self) -> bool {
        self.name_input
    }

    pub fn handle_input(&mut self, input: &Input) -> Transition {
        let Some(code) = input.key_code() else {
            return Transition::None;
        };
        if self.name_input {
            return self.handle_name_key(code);
        }
        let count = self.options.len();
        match code {
            KeyCode::Up => self.selected = (self.selected + count - 1) % count,
            KeyCode::Down => self.selected = (self.selected + 1) % count,
            KeyCode::Char('h') | KeyCode::Char('H') => self.show_scores = !self.show_scores,
            KeyCode::Enter => match self.options[self.selected] {
                MenuOption::Quit => return Transition::Quit,
                MenuOption::Play(_) => {
                    self.name_input = true;
                    self.show_scores = false;
                }
            },
            _ => {}
        }
        Transition::None
    }

    fn handle_name_key(&mut self, code: KeyCode) -> Transition {
        match code {
            KeyCode::Enter if !self.player_name.is_empty() => {
                if let MenuOption::Play(game) = self.options[self.selected] {
                    return Transition::Begin { player: self.player_name.clone(), game };
                }
            }
            KeyCode::Backspace => {
                self.player_name.pop();
            }
            KeyCode::Esc => {
                self.name_input = false;
                self.player_name.clear();
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() && self.player_name.len() < NAME_LEN => {
                self.player_name.push(c);
            }
            _ => {}
        }
        Transition::None
    }

    pub fn render(&self, canvas: &mut Canvas, scores: &Leaderboard) {
        canvas.clear();
        let theme = canvas.theme();
        canvas.text_centered(1, self.suite.title(), theme.text());

        if self.name_input {
            canvas.text_centered(HEIGHT / 2, &format!("Enter Name: {}", self.player_name), theme.text());
            canvas.text_centered(HEIGHT / 2 + 2, "Press ENTER to confirm", theme.text());
            return;
        }
        if self.show_scores {
            self.render_scores(canvas, scores);
        } else {
            for (i, option) in self.options.iter().enumerate() {
                let color = if i == self.selected { theme.accent() } else { theme.text() };
                canvas.text_centered(FIRST_OPTION_ROW + i as u16 * OPTION_SPACING, option.label(), color);
            }
        }
        canvas.text(1, HEIGHT - 2, "Press T to toggle theme, H for high scores", theme.text());
    }

    fn render_scores(&self, canvas: &mut Canvas, scores: &Leaderboard) {
        let theme = canvas.theme();
        let panel = Rect::new(2, 2, WIDTH - 4, HEIGHT - 5);
        canvas.rect(panel, theme.border(), Paint::Outlined);
        canvas.text_in(Rect::new(panel.x, panel.y, panel.width, 1), " High Scores ", theme.accent());

        let mut y = panel.y + 1;
        for kind in self.suite.games() {
            canvas.text(panel.x + 2, y, kind.title(), theme.accent());
            let entries = scores.top_scores(kind.title());
            let line = if entries.is_empty() {
                "no scores yet".to_string()
            } else {
                entries
                    .iter()
                    .map(|e| format!("{} {}", e.name, e.score))
                    .collect::<Vec<_>>()
                    .join("  ")
            };
            canvas.text(panel.x + 4, y + 1, &line, theme.text());
            y += 2;
        }
    }
}
