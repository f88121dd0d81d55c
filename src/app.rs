use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};

use crate::canvas::{Canvas, HEIGHT, WIDTH};
use crate::event::Input;
use crate::fact::Fact;
use crate::games::{GameKind, Suite};
use crate::menu::Menu;
use crate::screen::{Destination, Screen, Session, Transition};

/// The screen driver: owns the active screen and applies the transitions it
/// asks for.
pub struct App {
    pub should_quit: bool,
    pub suite: Suite,
    pub screen: Screen,
    pub session: Session,
    player: String,
    /// Where the logical viewport sits on the terminal, set by the renderer.
    pub viewport: Rect,
}

impl App {
    pub fn new(suite: Suite, session: Session) -> Self {
        Self {
            should_quit: false,
            suite,
            screen: Screen::Menu(Menu::new(suite, "")),
            session,
            player: String::new(),
            viewport: Rect::new(0, 0, WIDTH, HEIGHT),
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.screen.tick_rate()
    }

    /// Advance the clock and let ticking screens move on their own.
    pub fn on_tick(&mut self, now: Duration) {
        self.session.now = now;
        self.screen.update(&mut self.session);
    }

    pub fn render(&self, canvas: &mut Canvas) {
        self.screen.render(canvas, &self.session.scores);
    }

    pub fn on_input(&mut self, input: Input) {
        let input = match input {
            Input::Key(key) => {
                if is_ctrl(&key, 'c') {
                    log::info!("ctrl+c, shutting down");
                    self.should_quit = true;
                    return;
                }
                if self.is_theme_key(&key) {
                    self.session.theme.toggle();
                    return;
                }
                input
            }
            Input::Click { button, x, y } => {
                // Mouse positions arrive in terminal cells.
                if !self.viewport.contains(Position::new(x, y)) {
                    return;
                }
                Input::Click {
                    button,
                    x: x - self.viewport.x,
                    y: y - self.viewport.y,
                }
            }
        };
        let transition = self.screen.handle_input(&input, &mut self.session);
        self.apply(transition);
    }

    fn is_theme_key(&self, key: &KeyEvent) -> bool {
        if is_ctrl(key, 't') {
            return true;
        }
        let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        plain && matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T')) && !self.screen.accepts_text()
    }

    pub fn apply(&mut self, transition: Transition) {
        if transition != Transition::None {
            log::debug!("transition: {transition:?}");
        }
        match transition {
            Transition::None => {}
            Transition::Restart => match self.screen.game_kind() {
                Some(kind) if self.screen.is_terminal() => self.start(kind),
                _ => log::error!("restart requested while the current screen is still running, ignoring"),
            },
            Transition::Menu => self.screen = Screen::Menu(Menu::new(self.suite, &self.player)),
            Transition::Fact { next, headline } => {
                self.screen = Screen::Fact(Fact::new(next, headline, &mut self.session.rng));
            }
            Transition::Begin { player, game } => {
                self.player = player;
                match game.suite() {
                    Suite::Classic => self.start(game),
                    Suite::Cosmic => self.apply(Transition::Fact { next: Destination::Game(game), headline: None }),
                }
            }
            Transition::Play(kind) => self.start(kind),
            Transition::Quit => self.should_quit = true,
        }
    }

    fn start(&mut self, kind: GameKind) {
        log::info!("{} starts {}", self.player, kind.title());
        self.screen = Screen::game(kind, &self.player, &mut self.session.rng);
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}
