use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use hangmath::{
    app::App,
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore, MemoryConfigStore},
    difficulty::Difficulty,
    game::Game,
    question::{QuestionSource, RandomQuestions},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    sound::{BellSink, CueSink, RodioSink},
};
use log::{info, warn, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
};

/// multiplication drill tui with a hangman twist
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Answer multiplication questions against the clock. Six mistakes and the hangman is complete; every 50 points earns a super streak."
)]
pub struct Cli {
    /// skip the menu and start at this level
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seed for the question generator, for repeatable drills
    #[clap(long)]
    seed: Option<u64>,

    /// silence tones and music for this run (the saved preference is left alone)
    #[clap(long)]
    mute: bool,

    /// keep preference changes in memory only
    #[clap(long)]
    no_save: bool,

    /// write a debug log to the default state directory
    #[clap(long)]
    log: bool,

    /// write a debug log to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn log_target(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(path.clone()),
            None if self.log => AppDirs::log_path(),
            None => None,
        }
    }

    fn config_store(&self) -> Box<dyn ConfigStore> {
        if self.no_save {
            // start from whatever is on disk but never write back
            Box::new(MemoryConfigStore::new(FileConfigStore::new().load()))
        } else {
            Box::new(FileConfigStore::new())
        }
    }

    fn questions(&self) -> RandomQuestions {
        self.seed.map(RandomQuestions::seeded).unwrap_or_default()
    }
}

/// Synthesised tones when there is an output device, the terminal bell otherwise
fn audio_sink() -> Box<dyn CueSink> {
    match RodioSink::try_new() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!("{e}; falling back to the terminal bell");
            Box::new(BellSink::stdout())
        }
    }
}

/// The terminal is ours, so log lines go to a file instead of stderr
fn init_logging(path: PathBuf) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    info!("logging to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_target() {
        init_logging(path)?;
    }

    let mut app = App::new(
        Game::with_source(cli.questions()),
        cli.config_store(),
        audio_sink(),
    );
    app.set_muted(cli.mute);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.on_resize(size.width, size.height);
    if let Some(difficulty) = cli.difficulty {
        app.start(difficulty);
    }

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, Q: QuestionSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<Q>,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let step = runner.step();
        // time keeps moving whatever woke us up
        app.on_tick(step.elapsed);
        match step.event {
            AppEvent::Tick => {}
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize(w, h) => app.on_resize(w, h),
        }

        if app.should_quit {
            info!("quitting with {} points", app.session().score);
            return Ok(());
        }
    }
}
