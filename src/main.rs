//! snipdeck - terminal code snippet browser
//!
//! With no subcommand this opens the interactive browser; see `snipdeck
//! --help` for the one-shot commands.

use clap::Parser;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use snipdeck::app::App;
use snipdeck::cli::{self, Cli, Command, commands};
use snipdeck::clipboard::SystemClipboard;
use snipdeck::config::Config;
use snipdeck::handlers;
use snipdeck::highlight::{Highlight, PlainHighlighter, SyntectHighlighter};
use snipdeck::logging;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<ExitCode, Box<dyn Error>> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?.apply(cli.overrides());

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            run_browser(config)?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            logging::init_stderr_logging();
            match commands::execute(command, &config)? {
                commands::Outcome::Success => Ok(ExitCode::SUCCESS),
                commands::Outcome::NotFound => Ok(ExitCode::from(1)),
            }
        }
    }
}

/// Builds the app and runs the TUI, restoring the terminal afterwards even
/// if the event loop fails.
fn run_browser(config: Config) -> Result<(), Box<dyn Error>> {
    if let Ok(dir) = cli::storage_dir(&config) {
        if std::fs::create_dir_all(&dir).is_ok() {
            logging::init_file_logging(&dir);
        }
    }

    let catalog = cli::load_catalog(&config)?;
    let highlighter: Box<dyn Highlight> = if config.highlight {
        Box::new(SyntectHighlighter::new(&config.theme))
    } else {
        Box::new(PlainHighlighter)
    };

    let mut app = App::new(
        catalog,
        cli::open_favorites(&config),
        Box::new(SystemClipboard::new()),
        highlighter,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    loop {
        // The copy indicator needs a redraw when it expires.
        if app.needs_redraw {
            terminal.draw(|frame| app.render(frame))?;
            app.needs_redraw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    if handlers::keys::handle_key_events(key, app) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            }
        }

        app.tick();
    }
}
