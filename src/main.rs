use std::{
    io::{self, stdin, Stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use motiondrill::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, DrillEvent, DrillEventSource, FixedTicker, Runner, Ticker},
    session::TargetSize,
};

/// drill vim operator+motion keystrokes with live accuracy and speed
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the operator+motion pairs as they scroll by. ':edit' restarts the session, ':config N' restarts it with N operations. Ctrl+C quits."
)]
pub struct Cli {
    /// number of operations in a session
    #[clap(short = 'n', long = "size")]
    size: Option<usize>,

    /// redraw interval in milliseconds
    #[clap(long = "tick-rate")]
    tick_rate_ms: Option<u64>,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// config file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the default config file and exit
    #[clap(long)]
    init_config: bool,
}

impl Cli {
    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command-line flags take precedence over the config file.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(size) = self.size {
            config.session_size = size;
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        config
    }
}

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn acquire() -> motiondrill::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = cli.store();

    if cli.init_config {
        let config = cli.apply(Config::default());
        store
            .save(&config)
            .with_context(|| format!("writing {}", store.path().display()))?;
        println!("{}", store.path().display());
        return Ok(());
    }

    let (config, load_error) = match store.load() {
        Ok(config) => (cli.apply(config), None),
        Err(e) => (cli.apply(Config::default()), Some(e)),
    };

    let _log_guard = match &config.log_file {
        Some(path) => Some(
            logging::init(path, &config.log_filter)
                .with_context(|| format!("logging to {}", path.display()))?,
        ),
        None => None,
    };
    if let Some(e) = load_error {
        eprintln!("warning: {e}; using default settings");
        tracing::warn!("{e}; using default settings");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(TargetSize::Count(config.session_size()));
    tracing::info!(size = config.session_size(), "starting");

    let mut guard = TerminalGuard::acquire().context("setting up the terminal")?;
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(config.tick_rate()));
    let result = start_tui(&mut guard.terminal, &mut app, &runner);
    drop(runner);
    drop(guard);

    tracing::info!(
        correct = app.session.correct_count,
        wrong = app.session.wrong_count,
        "exiting"
    );
    result
}

fn start_tui<B: Backend, E: DrillEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<()> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            DrillEvent::Key(key) => app.handle_key_event(&key),
            DrillEvent::Resize | DrillEvent::Tick => {}
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
