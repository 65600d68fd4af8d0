mod app;
mod config;
mod dialogs;
mod error;
mod gallery;
mod loader;
mod projector;
mod session;
mod store;
mod ui;

use app::App;
use clap::Parser;
use config::Config;
use crossterm::event::{self, Event, KeyEventKind};
use error::AppError;
use session::StaticSession;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Browse saved streets in a terminal gallery
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Open this user's gallery on start
    #[arg(short, long)]
    user: Option<String>,

    /// Open the gallery of all streets on start
    #[arg(short, long, conflicts_with = "user")]
    all: bool,

    /// Pretend to be signed in as this user
    #[arg(long)]
    signed_in_as: Option<String>,

    /// JSON file with street summaries (defaults to the bundled demo set)
    #[arg(short, long)]
    streets: Option<PathBuf>,

    /// Make the first gallery load fail
    #[arg(long)]
    fail_first_load: bool,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(AppError::from)?;
    if cli.signed_in_as.is_some() {
        config.signed_in_as = cli.signed_in_as.clone();
    }
    if cli.streets.is_some() {
        config.streets_file = cli.streets.clone();
    }
    config.fail_first_load |= cli.fail_first_load;

    let log_path = init_logging(&config)?;

    let session = StaticSession::new(config.signed_in_as.clone());
    let mut app = App::new(&config, Box::new(session));
    if let Some(user) = cli.user {
        app.show_gallery(Some(user));
    } else if cli.all {
        app.show_gallery(None);
    }
    tracing::info!(log = %log_path.display(), "starting");

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app).await;
    ratatui::restore();

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting on error");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the cache directory; the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let cache_dir = config::project_dirs()?.cache_dir().to_path_buf();
    std::fs::create_dir_all(&cache_dir)?;
    let log_path = cache_dir.join("street-gallery.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(log_path)
}

async fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<(), AppError> {
    loop {
        app.update()?;
        terminal.draw(|frame| ui::render(app, frame))?;
        app.after_draw();

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 100ms timeout
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
        tokio::task::yield_now().await;
    }
}
