//! Wordle Assistant - CLI
//!
//! Terminal front end for a Wordle suggestion service, with TUI and line modes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wordle_assist::{
    catalog,
    commands::{build_puzzle, run_simple, run_suggest},
    core::PuzzleState,
    interactive::{App, run_tui},
    prefs::{PreferenceStore, UiPreferences},
    suggest::{ClientConfig, DEFAULT_SERVER, PredClient, scheduler::DEFAULT_QUIET_PERIOD},
};

#[derive(Parser)]
#[command(
    name = "wordle_assist",
    about = "Wordle assistant backed by a remote suggestion service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the suggestion service
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// Dictionary for this session (not saved)
    #[arg(long, global = true)]
    dict: Option<String>,

    /// Word length for this session (not saved)
    #[arg(long, global = true, value_parser = parse_length)]
    length: Option<usize>,

    /// Number of suggestions per list
    #[arg(short = 'k', long, global = true, default_value = "5")]
    count: usize,

    /// Quiet period before suggestions refresh, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_QUIET_PERIOD.as_millis() as u64)]
    quiet_ms: u64,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Preferences file (default: platform config directory)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Log file for the TUI (default: alongside the preferences)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based, no TUI)
    Simple,

    /// Print suggestions for the given rows and exit
    Suggest {
        /// Played rows as WORD=DIGITS, e.g. WEARY=20010
        rows: Vec<String>,
    },
}

fn parse_length(s: &str) -> Result<usize, String> {
    let len: usize = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    catalog::check_word_length(len)
}

fn default_log_path() -> Result<PathBuf> {
    Ok(PreferenceStore::config_dir()?.join("wordle_assist.log"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// The TUI owns the terminal, so its logs go to a file (or nowhere)
fn init_tracing(tui: bool, log_file: Option<&Path>) {
    let (writer, ansi) = if tui {
        let file = log_file
            .map_or_else(default_log_path, |p| Ok(p.to_path_buf()))
            .and_then(|path| open_log_file(&path));
        match file {
            Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            Err(_) => (BoxMakeWriter::new(std::io::sink), false),
        }
    } else {
        (BoxMakeWriter::new(std::io::stderr), true)
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    init_tracing(matches!(command, Commands::Play), cli.log_file.as_deref());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let store = cli
        .prefs
        .clone()
        .map_or_else(PreferenceStore::platform, PreferenceStore::at);
    let mut prefs = UiPreferences::load(store);
    prefs.override_session(cli.dict.clone(), cli.length);

    let client = PredClient::new(&ClientConfig {
        server: cli.server.clone(),
        timeout: cli.timeout.map(Duration::from_secs),
    })
    .context("Failed to build HTTP client")?;
    info!(endpoint = client.endpoint(), "suggestion service");

    match command {
        Commands::Play => {
            let quiet = Duration::from_millis(cli.quiet_ms);
            let app = App::new(prefs, quiet, cli.count, Instant::now());
            run_tui(app, Arc::new(client), runtime.handle())
        }
        Commands::Simple => {
            if cli.quiet_ms != DEFAULT_QUIET_PERIOD.as_millis() as u64 {
                warn!("--quiet-ms only applies to the TUI");
            }
            let state = PuzzleState::new(prefs.word_length());
            run_simple(
                &client,
                runtime.handle(),
                state,
                prefs.dictionary(),
                cli.count,
            )
        }
        Commands::Suggest { rows } => {
            let state = build_puzzle(&rows, cli.length, prefs.word_length())?;
            run_suggest(
                &client,
                runtime.handle(),
                &state,
                prefs.dictionary(),
                cli.count,
            )
        }
    }
}
