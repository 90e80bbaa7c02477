use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod app;
mod config;
mod error;
mod i18n;
mod models;
mod page;
mod services;
mod session;
mod tui;

use app::App;
use config::Config;
use error::Result;
use tui::{draw, handle_key_event};

#[derive(Parser, Debug)]
#[command(name = "article-desk", version, about)]
struct Cli {
    /// Slug of the article to open
    slug: String,

    /// Language code (`en` or `bn`); defaults to `default_lang` from the config
    #[arg(short, long)]
    lang: Option<String>,

    /// Print the assembled page as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.slug.trim().is_empty() {
        return Err(anyhow::anyhow!("article slug must not be empty").into());
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let lang = cli.lang.clone().unwrap_or_else(|| config.default_lang.clone());

    let mut app = App::new(&config, &cli.slug, &lang)?;

    // Headless: assemble the page once and print it
    if cli.dump {
        let outcome = app.load_now().await;
        if outcome.is_not_found() {
            tracing::warn!("No article found for {}", cli.slug);
        }
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    app.start();
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Poll for completed page loads
        app.poll_page_result();

        // Count the view once the reader has stayed long enough
        app.poll_view_counter();

        // Poll for events with timeout to allow async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(key, app.show_help) {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
