// src/main.rs
mod app;
mod config;
mod error;
mod input;
mod logging;
mod markdown;
mod models;
mod network;
mod state;
mod theme;
mod ui;
mod utils;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};

use crate::app::App;
use crate::config::Settings;
use crate::models::Selection;
use crate::network::UploadClient;

/// Upload a document and get a summary, key points and a quiz.
#[derive(Parser, Debug)]
#[command(name = "smartnotes", version, about)]
struct Cli {
    /// Document to preselect (PDF, TXT, DOC, DOCX)
    file: Option<PathBuf>,

    /// Upload endpoint, overrides the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    timeout: Option<u64>,

    /// Submit FILE once and print the report as Markdown instead of opening the UI
    #[arg(long)]
    print: bool,

    /// Store --endpoint in the user config file
    #[arg(long, requires = "endpoint")]
    save_endpoint: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::new().context("Failed to load configuration")?;
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
        if cli.save_endpoint {
            crate::config::save_endpoint(endpoint)?;
        }
    }
    if cli.timeout.is_some() {
        settings.timeout_secs = cli.timeout;
    }

    let _guard = logging::init(&settings.log_dir(), &settings.log_level)?;
    info!(endpoint = %settings.endpoint, "starting");

    let selection = match &cli.file {
        Some(path) => {
            let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
            Some(Selection::from_path(&path)?)
        }
        None => None,
    };

    if cli.print {
        let Some(selection) = selection else {
            bail!("--print needs a FILE");
        };
        return print_report(&settings, &selection);
    }

    let mut app = App::new(settings, selection)?;
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    if let Err(e) = &result {
        error!(error = %e, "ui loop failed");
    }
    result
}

fn print_report(settings: &Settings, selection: &Selection) -> anyhow::Result<()> {
    let client = UploadClient::new(&settings.endpoint, settings.timeout())?;
    let rt = tokio::runtime::Runtime::new()?;
    let report = rt
        .block_on(client.upload(selection))
        .map_err(|e| anyhow::anyhow!("Failed to process the file: {}", e))?;
    println!("{}", markdown::report_markdown(&report, Some(&selection.name)));
    Ok(())
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        app.poll_pending();

        let frame = terminal.draw(|f| {
            ui::render(f, &app.view, app.mode, &app.path_input, &app.settings.accepted_extensions, &app.theme);
        })?;
        app.screen = frame.area;

        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !input::handle_key(app, key)? {
                        break;
                    }
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }
    }
    Ok(())
}
