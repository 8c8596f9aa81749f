mod commands;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chessmate_client::config::ConfigError;
use chessmate_client::dom::DomError;
use chessmate_client::net::transport::{HttpTransport, Transport};
use chessmate_client::net::types::{HttpRequest, TransportError};
use chessmate_client::state::prefs::FileStore;
use chessmate_client::{ClientConfig, Exit, Navigation, UiEvent, View, ViewKind, run};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use commands::{Command, HELP};
use terminal::Terminal;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("page contract error: {0}")]
    Dom(#[from] DomError),
    #[error("{path} answered HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("session expired; log in at {0}")]
    LoginRequired(String),
}

#[derive(Parser, Debug)]
#[command(name = "chessmate", about = "Headless chessmate puzzle and placement client")]
struct Cli {
    /// Server base URL; overrides the environment configuration.
    #[arg(long, env = "CHESSMATE_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "CHESSMATE_PREFS_PATH")]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    page: PageCommand,
}

#[derive(Subcommand, Debug)]
enum PageCommand {
    /// Solve puzzles against the computer.
    Puzzle {
        /// Let the computer move first regardless of the page flag.
        #[arg(long, default_value_t = false)]
        computer_first: bool,
    },
    /// Free piece placement board.
    Placement,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(prefs) = cli.prefs {
        config.prefs_path = prefs;
    }
    let (kind, mut computer_first) = match cli.page {
        PageCommand::Puzzle { computer_first } => (ViewKind::Puzzle, computer_first),
        PageCommand::Placement => (ViewKind::Placement, false),
    };

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config)?);
    let generation = Arc::new(AtomicU64::new(0));
    let (tx, mut rx) = mpsc::channel(16);
    tokio::spawn(read_commands(kind, Arc::clone(&generation), tx));

    let mut next = HttpRequest::get(kind.path());
    loop {
        let html = load(transport.as_ref(), &next, &config.login_path).await?;
        let mut view = View::new(
            kind,
            &config,
            &html,
            Box::new(Terminal::new(Arc::clone(&generation))),
            Box::new(FileStore::open(&config.prefs_path)),
        )?;
        if std::mem::take(&mut computer_first) {
            view = view.with_computer_first(true);
        }

        match run(view, Arc::clone(&transport), &mut rx).await {
            Exit::Closed => {
                info!("input closed; bye");
                return Ok(());
            }
            Exit::Navigated(Navigation::Login(path)) => return Err(CliError::LoginRequired(path)),
            Exit::Navigated(Navigation::Reload) => next = HttpRequest::get(kind.path()),
            Exit::Navigated(Navigation::SubmitForm { path, fields }) => {
                next = fields
                    .into_iter()
                    .fold(HttpRequest::post(path), |request, (name, value)| request.with_field(&name, value));
            }
        }
    }
}

/// Fetch a full page for a fresh view.
async fn load(transport: &dyn Transport, request: &HttpRequest, login_path: &str) -> Result<String, CliError> {
    let response = transport.send(request).await?;
    if response.redirected_to_login(login_path) {
        return Err(CliError::LoginRequired(login_path.to_owned()));
    }
    if !response.is_success() {
        return Err(CliError::Status { path: request.path.clone(), status: response.status });
    }
    info!(path = %request.path, final_url = %response.final_url, "page loaded");
    Ok(response.body)
}

async fn read_commands(kind: ViewKind, generation: Arc<AtomicU64>, tx: mpsc::Sender<UiEvent>) {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        match commands::parse(&line, kind, generation.load(Ordering::Relaxed)) {
            Ok(None) => {}
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Event(event))) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => println!("  {e}"),
        }
    }
}
