//! Folio TUI: terminal portfolio dashboard.
//!
//! Panels:
//! 1. Overview: summary cards and risk metrics
//! 2. Positions: holdings table with per-row delete
//! 3. Charts: allocation shares and returns by position
//! 4. History: ticker selector and price line chart
//! 5. Help: keyboard shortcuts
//!
//! Backend calls run on a worker thread; the UI thread only draws, reads keys,
//! and applies finished outcomes.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use folio_core::api::http::HttpApi;
use folio_core::api::memory::MemoryApi;
use folio_core::{logging, Dashboard, DashboardConfig, PortfolioApi};

use crate::app::AppState;
use crate::worker::WorkerCommand;

#[derive(Debug, Parser)]
#[command(name = "folio-tui", version, about = "Terminal portfolio dashboard")]
struct Args {
    /// Config file (defaults to <config dir>/folio/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dashboard server URL, overriding the config file
    #[arg(long)]
    url: Option<String>,

    /// Run against an in-memory backend instead of a server
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = DashboardConfig::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        config.base_url = url;
    }

    let log_path = config.log_path();
    if let Err(e) = logging::init_file(&log_path, config.level_filter()) {
        eprintln!("warning: cannot open log file {}: {e}", log_path.display());
    }

    let api: Box<dyn PortfolioApi> = if args.offline {
        Box::new(MemoryApi::default())
    } else {
        Box::new(
            HttpApi::new(&config.base_url, config.timeout())
                .with_context(|| format!("invalid server URL {}", config.base_url))?,
        )
    };
    let backend = if args.offline {
        "offline".to_string()
    } else {
        config.base_url.clone()
    };
    log::info!("starting dashboard against {backend}");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(api, cmd_rx, resp_tx).context("failed to spawn worker thread")?;

    let mut app = AppState::new(
        Dashboard::new(config.history_days),
        backend,
        cmd_tx.clone(),
        resp_rx,
    );
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("dashboard closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
