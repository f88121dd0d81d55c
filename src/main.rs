mod app;
mod canvas;
mod cli;
mod event;
mod fact;
mod games;
mod menu;
mod scores;
mod screen;
mod theme;
mod ui;

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use event::EventHandler;
use screen::Session;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    cli::init_logging(&args)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(args.suite, Session::new(rng));
    log::info!("starting {}", args.suite.title());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal, also when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("game loop stopped: {err:#}");
    }
    result
}

/// Render, advance, then dispatch queued input, once per tick.
fn run(terminal: &mut Term, app: &mut App) -> anyhow::Result<()> {
    let events = EventHandler::new(Arc::new(AtomicBool::new(false)));
    let start = Instant::now();

    while !app.should_quit && !events.is_shut_down() {
        let tick_start = Instant::now();

        terminal.draw(|frame| ui::render(frame, app))?;
        app.on_tick(start.elapsed());
        for input in events.drain() {
            app.on_input(input);
            if app.should_quit {
                break;
            }
        }

        let budget = Duration::from_secs(1) / app.tick_rate();
        if let Some(rest) = budget.checked_sub(tick_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    events.shut_down();
    log::info!("bye");
    Ok(())
}
