use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use sentype::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{key_from_event, AppEvent, CrosstermEventSource, FixedTicker, Runner},
    ui::GameView,
    Dictionary, Game, LengthPolicy, Outcome,
};
use std::{
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 250;

/// type randomly generated sentences and watch your wpm and accuracy live
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// builtin word list to draw sentences from
    #[clap(short = 'l', long, value_enum)]
    language: Option<BuiltinDictionary>,

    /// text file with one word per line, overrides --language
    #[clap(short = 'd', long)]
    dictionary: Option<PathBuf>,

    /// seed for the random word picks, for reproducible sentences
    #[clap(long)]
    seed: Option<u64>,

    /// length at which only words that keep the sentence under --max-len are picked
    #[clap(long)]
    restrict_at: Option<usize>,

    /// stop adding words once the sentence is at least this long
    #[clap(long)]
    target_len: Option<usize>,

    /// upper bound on sentence length
    #[clap(long)]
    max_len: Option<usize>,

    /// log level (error, warn, info, debug, trace), defaults to RUST_LOG or info
    #[clap(long)]
    log_level: Option<String>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinDictionary {
    English,
    Programming,
}

impl Cli {
    /// Layers command line overrides on top of the stored config
    fn merge_into(&self, mut cfg: Config) -> Result<Config> {
        if let Some(lang) = self.language {
            cfg.language = lang.to_string();
        }
        if let Some(ref path) = self.dictionary {
            cfg.dictionary_path = Some(path.clone());
        }
        cfg.policy = LengthPolicy::new(
            self.restrict_at.unwrap_or(cfg.policy.restrict_at),
            self.target_len.unwrap_or(cfg.policy.target),
            self.max_len.unwrap_or(cfg.policy.max),
        )?;
        Ok(cfg)
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let Some(log_path) = AppDirs::log_path() else {
        return Ok(());
    };
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {log_path:?}"))?;

    // the terminal belongs to the UI, so logs only go to the file
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level.parse().unwrap_or(log::LevelFilter::Info));
    }
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(cli.log_level.as_deref())?;

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load())?;

    let mut game = Game::new(config.policy, config.max_attempts, cli.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = store.save(&config) {
        error!("failed to save config to {:?}: {e}", store.path());
    }

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game, config: &Config) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    let mut message: Option<String> = None;

    // draw once before the dictionary is read so the loading state shows
    terminal.draw(|f| {
        f.render_widget(
            GameView {
                session: game.session(),
                snapshot: game.snapshot(),
                message: None,
            },
            f.area(),
        )
    })?;

    let dictionary =
        Dictionary::load_or_fallback(config.dictionary_path.as_deref(), &config.language);
    if let Err(e) = game.set_dictionary(dictionary) {
        message = Some(format!("Could not build a sentence: {e}"));
    }

    loop {
        terminal.draw(|f| {
            f.render_widget(
                GameView {
                    session: game.session(),
                    snapshot: game.snapshot(),
                    message: message.as_deref(),
                },
                f.area(),
            )
        })?;

        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Tab | KeyCode::Right => {
                    message = match game.new_sentence() {
                        Ok(()) => None,
                        Err(e) => Some(format!("Could not build a sentence: {e}")),
                    };
                }
                _ => {
                    let outcome = game.handle_key(&key_from_event(&key));
                    if outcome == Outcome::Correct
                        && game.session().is_some_and(|s| s.has_finished())
                    {
                        let snapshot = game.snapshot();
                        info!(
                            "sentence completed: {} wpm, {:.2}% accuracy",
                            snapshot.wpm, snapshot.accuracy
                        );
                    }
                }
            },
        }
    }

    Ok(())
}
