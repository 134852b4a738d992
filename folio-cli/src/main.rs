//! Folio CLI: one-shot dashboard commands against a portfolio server.
//!
//! Commands:
//! - `show`: summary, positions, allocation, returns and risk metrics
//! - `add`: add a position (values are sent to the server as typed)
//! - `delete`: delete a position after confirmation
//! - `clear`: remove every position after confirmation
//! - `sample`: replace the portfolio with five demo positions
//! - `history`: recent prices for one ticker

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use folio_core::api::http::HttpApi;
use folio_core::controller::Confirm;
use folio_core::model::MAX_HISTORY_DAYS;
use folio_core::view::{HistoricalChart, RenderState, ReturnsChart, TableRow};
use folio_core::{logging, Controller, DashboardConfig, Notice, NoticeLevel, PortfolioApi};

#[derive(Parser)]
#[command(name = "folio", version, about = "Folio CLI: portfolio dashboard commands")]
struct Cli {
    /// Config file (defaults to <config dir>/folio/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dashboard server URL, overriding the config file.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Print the whole dashboard.
    Show,
    /// Add a position.
    Add {
        ticker: String,
        shares: String,
        purchase_price: String,
        current_price: String,
    },
    /// Delete a position.
    Delete {
        ticker: String,

        /// Skip the confirmation prompt.
        #[arg(long, short, default_value_t = false)]
        yes: bool,
    },
    /// Remove all positions.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short, default_value_t = false)]
        yes: bool,
    },
    /// Replace the portfolio with sample positions.
    Sample,
    /// Price history for one ticker.
    History {
        ticker: String,

        /// Days of history. Defaults to the configured window.
        #[arg(long, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_HISTORY_DAYS)))]
        days: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    logging::init_stderr(config.level_filter());

    let api = HttpApi::new(&config.base_url, config.timeout())
        .with_context(|| format!("invalid server URL {}", config.base_url))?;
    log::debug!("{:?} against {}", cli.command, api.base_url());

    let days = match &cli.command {
        Commands::History { days: Some(d), .. } => *d,
        _ => config.history_days,
    };
    let mut controller = Controller::new(api, days);

    let yes = matches!(
        cli.command,
        Commands::Delete { yes: true, .. } | Commands::Clear { yes: true }
    );
    let mut confirm = |prompt: &str| yes || ask(prompt);

    let notices = run_command(&mut controller, cli.command.clone(), &mut confirm);
    let failed = report(&notices);

    let lines = match cli.command {
        Commands::History { .. } => history_lines(controller.render_state()),
        _ => overview_lines(controller.render_state()),
    };
    for line in lines {
        println!("{line}");
    }

    if failed {
        bail!("command failed");
    }
    Ok(())
}

fn run_command<A: PortfolioApi>(
    controller: &mut Controller<A>,
    command: Commands,
    confirm: &mut dyn Confirm,
) -> Vec<Notice> {
    match command {
        Commands::Show => controller.start(),
        Commands::Add {
            ticker,
            shares,
            purchase_price,
            current_price,
        } => controller.add_position(&ticker, &shares, &purchase_price, &current_price),
        Commands::Delete { ticker, .. } => controller.delete_position(&ticker, confirm),
        Commands::Clear { .. } => controller.clear_all_positions(confirm),
        Commands::Sample => controller.load_sample_data(),
        Commands::History { ticker, .. } => controller.load_historical_data(&ticker),
    }
}

/// Ask on stdin; anything but y/yes is a no.
fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Print notices; returns true if any write failed.
fn report(notices: &[Notice]) -> bool {
    let mut failed = false;
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
            NoticeLevel::Error => {
                eprintln!("error: {}", notice.message);
                failed = true;
            }
        }
    }
    failed
}

fn overview_lines(state: &RenderState) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(summary) = &state.summary else {
        return lines;
    };

    lines.push(format!(
        "Total Value {}  Total Cost {}  Gain/Loss {} ({})  Return {}  Positions {}",
        summary.total_value,
        summary.total_cost,
        summary.gain_loss.text,
        summary.gain_loss.class(),
        summary.overall_return.text,
        summary.num_positions,
    ));
    lines.push(String::new());

    for row in &state.table.rows {
        match row {
            TableRow::Position(p) => {
                let cells = p.cells();
                lines.push(format!(
                    "{:<8} {:>8} {:>14} {:>14} {:>14} {:>14} {:>12} {:>9}",
                    cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7]
                ));
            }
            TableRow::Placeholder(message) => lines.push((*message).to_string()),
        }
    }

    if let Some(allocation) = state.charts.allocation.get() {
        let legend = allocation.legend();
        if !legend.is_empty() {
            lines.push(String::new());
            lines.push("Allocation".to_string());
            lines.extend(legend.into_iter().map(|l| format!("  {l}")));
        }
    }

    if let Some(returns) = state.charts.returns.get().filter(|r| !r.is_placeholder()) {
        lines.push(String::new());
        lines.push(ReturnsChart::SERIES_LABEL.to_string());
        for bar in &returns.bars {
            lines.push(format!("  {:<8} {}", bar.label, ReturnsChart::tooltip(bar)));
        }
    }

    if let Some(risk) = &state.risk {
        lines.push(String::new());
        lines.push("Risk Metrics".to_string());
        for (label, value) in risk.fields() {
            lines.push(format!("  {label:<20} {value}"));
        }
    }
    lines
}

fn history_lines(state: &RenderState) -> Vec<String> {
    let Some(chart) = state.charts.historical.get() else {
        return Vec::new();
    };
    if chart.is_empty() {
        return vec![format!("No price history for {}", chart.ticker)];
    }
    let mut lines = vec![chart.label.clone()];
    for (date, price) in chart.dates.iter().zip(&chart.prices) {
        lines.push(format!("  {date}  {}", HistoricalChart::tooltip(*price)));
    }
    lines
}
