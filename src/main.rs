use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagenotes::document::DocumentSource;
use pagenotes::event_source::TerminalEventSource;
use pagenotes::panic_handler;
use pagenotes::settings::Settings;
use pagenotes::{App, run_app_with_event_source};

/// Page through a PDF and pin sticky notes to its pages
#[derive(Parser, Debug)]
#[command(name = "pagenotes", version, about)]
struct Args {
    /// Path or URL of the PDF document
    document: String,

    /// Total number of pages to navigate (overrides the config file)
    #[arg(short, long)]
    pages: Option<u32>,

    /// Read settings from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, value_name = "PATH", default_value = "pagenotes.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level: LevelFilter = args
        .log_level
        .parse()
        .map_err(|_| anyhow!("Invalid log level {:?}", args.log_level))?;

    // The terminal owns stdout, so logs go to a file
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("Failed to create log file {:?}", args.log_file))?;
    WriteLogger::init(log_level, Config::default(), log_file)?;

    info!("Starting pagenotes");

    let mut settings = Settings::load(args.config.as_deref());
    if let Some(pages) = args.pages {
        settings.page_count = pages;
    }
    let source = DocumentSource::parse(&args.document);

    panic_handler::initialize_panic_handler(&args.log_file);

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, settings);
    let mut event_source = TerminalEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {err:?}");
        println!("{err:?}");
    }

    info!(
        "Shutting down pagenotes with {} note(s) in session",
        app.viewer().notes().len()
    );
    Ok(())
}
