use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// One user action, as seen by screens.
///
/// Click positions are absolute terminal cells when they come off the reader
/// thread; the driver rewrites them to viewport-local cells before dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Click { button: MouseButton, x: u16, y: u16 },
}

impl Input {
    pub fn key_code(&self) -> Option<KeyCode> {
        match self {
            Input::Key(key) => Some(key.code),
            Input::Click { .. } => None,
        }
    }
}

#[cfg(test)]
impl Input {
    pub fn key(code: KeyCode) -> Self {
        Input::Key(KeyEvent::new(code, event::KeyModifiers::NONE))
    }

    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Input::Key(KeyEvent::new(KeyCode::Char(c), event::KeyModifiers::CONTROL))
    }

    pub fn left_click(x: u16, y: u16) -> Self {
        Input::Click { button: MouseButton::Left, x, y }
    }

    pub fn right_click(x: u16, y: u16) -> Self {
        Input::Click { button: MouseButton::Right, x, y }
    }
}

/// Reads terminal events on a background thread and queues them until the
/// main loop drains them at the start of a tick.
pub struct EventHandler {
    rx: mpsc::Receiver<Input>,
    shutdown: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(shutdown: Arc<AtomicBool>) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::clone(&shutdown);

        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                    continue;
                }
                let input = match event::read() {
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Input::Key(key)
                    }
                    Ok(crossterm::event::Event::Mouse(mouse)) => match mouse.kind {
                        MouseEventKind::Down(button) => Input::Click {
                            button,
                            x: mouse.column,
                            y: mouse.row,
                        },
                        _ => continue,
                    },
                    Ok(_) => continue,
                    Err(err) => {
                        log::error!("reading terminal events failed: {err}");
                        stop.store(true, Ordering::Relaxed);
                        return;
                    }
                };
                if tx.send(input).is_err() {
                    return;
                }
            }
        });

        Self { rx, shutdown }
    }

    /// Everything that arrived since the last call, oldest first.
    pub fn drain(&self) -> Vec<Input> {
        self.rx.try_iter().collect()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    pub fn shut_down(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
