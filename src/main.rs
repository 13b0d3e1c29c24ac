//! # Quotebox CLI Entry Point
//!
//! Starts the quotebox TUI, or runs one of its actions non-interactively.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive TUI
//! quotebox
//!
//! # One random quote, optionally from a category
//! quotebox random --category Life
//!
//! # Add, list, import and export
//! quotebox add "Stay hungry, stay foolish." --category Inspiration
//! quotebox list
//! quotebox import ./friends_quotes.json
//! quotebox export --output ./backup.json
//!
//! # Use a different storage directory
//! quotebox --data-dir /tmp/quotes
//! ```
//!
//! ## Key Bindings
//!
//! - `n` / `Space` / `Enter` - Show a new random quote
//! - `j` / `Down`, `k` / `Up` - Change the category filter
//! - `a` - Add a quote (`Tab` switches field, `Enter` submits, `Esc` cancels)
//! - `o` - Import quotes from a JSON file
//! - `e` - Export all quotes to a JSON file
//! - `t` - Next color theme
//! - `?` - Help
//! - `q` / `Ctrl+c` - Quit
//!
//! ## Logging
//!
//! The TUI logs to `quotebox.log` in the data directory; subcommands log to
//! stderr. `RUST_LOG` sets the level.

use quotebox::cli;
use quotebox::storage::default_data_dir;
use quotebox::ui;
use quotebox::ui::app::NoticeLevel;
use quotebox::ui::config::Config;
use quotebox::ui::theme::Theme;
use quotebox::ui::{App, Command};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File the TUI writes its log to, inside the data directory
const LOG_FILE_NAME: &str = "quotebox.log";

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Quotebox - random quotes by category, right in your terminal
#[derive(Parser, Debug)]
#[command(name = "quotebox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Random quotes by category, with JSON import and export", long_about = None)]
struct Args {
    /// Directory holding storage.json and the log file
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Action>,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Print one random quote
    Random {
        /// Only draw from this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a quote
    Add {
        /// The quote text
        text: String,
        /// The quote's category
        #[arg(short, long)]
        category: String,
    },
    /// Print the category filter options
    Categories,
    /// Print every quote
    List,
    /// Write every quote to a JSON file
    Export {
        /// Output file (default: the configured export file)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Append the quotes from a JSON file
    Import {
        /// A JSON array of {"text", "category"} objects
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_error) = Config::load();

    let data_dir = match args.data_dir.clone().or_else(|| config.data_dir.clone()) {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    init_logging(&data_dir, args.command.is_none());
    if let Some(e) = config_error {
        log::warn!("Ignoring unreadable config: {:#}", e);
    }

    match args.command {
        None => run_tui(config, &data_dir).await,
        Some(action) => run_action(action, &config, &data_dir).await,
    }
}

/// Route `log` output: to a file while the TUI owns the screen, else stderr.
fn init_logging(data_dir: &Path, tui: bool) {
    let default_level = if tui { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if tui {
        let log_file = fs::create_dir_all(data_dir).and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(data_dir.join(LOG_FILE_NAME))
        });
        match log_file {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // Nowhere to write that won't corrupt the screen
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    builder.init();
}

async fn run_action(action: Action, config: &Config, data_dir: &Path) -> Result<()> {
    let mut store = cli::open_store(data_dir)?;
    let mut out = io::stdout().lock();

    match action {
        Action::Random { category } => {
            cli::random(
                &mut store,
                category.as_deref(),
                &mut rand::thread_rng(),
                &mut out,
            )
        }
        Action::Add { text, category } => cli::add(&mut store, &text, &category, &mut out),
        Action::Categories => cli::categories(&store, &mut out),
        Action::List => cli::list(&store, &mut out),
        Action::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.export_file));
            cli::export(&store, &path, &mut out)
        }
        Action::Import { file } => cli::import(&mut store, &file, &mut out).await,
    }
}

async fn run_tui(mut config: Config, data_dir: &Path) -> Result<()> {
    let theme = Theme::by_name(&config.theme)
        .unwrap_or_else(Theme::default_theme)
        .clone();
    let mut app = App::open(data_dir, theme)?;
    app.export_file = config.export_file.clone();

    log::info!("Starting quotebox with data in {}", data_dir.display());

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode().context("Failed to enable raw mode for terminal")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader, &mut config).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);
    let _ = panic::take_hook();

    log::info!("quotebox exited");
    run_result?;
    cleanup_result?;
    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
    config: &mut Config,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let Some(event) = event_reader.read_event(Duration::from_millis(250))? else {
            continue;
        };

        if let Event::Key(key) = event {
            // Windows reports both press and release
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(command) = ui::handle_key(app, key)? {
                run_command(app, command, config).await?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn run_command(app: &mut App, command: Command, config: &mut Config) -> Result<()> {
    match command {
        Command::Import(path) => {
            app.import_from_json_file(&path).await?;
        }
        Command::SaveTheme(name) => {
            config.theme = name.to_string();
            match config.save() {
                Ok(()) => app.notify(NoticeLevel::Info, format!("Theme: {}", name)),
                Err(e) => {
                    log::warn!("Failed to save config: {:#}", e);
                    app.notify(NoticeLevel::Error, format!("Theme not saved: {}", e));
                }
            }
        }
    }
    Ok(())
}
