//! Commands and their network scripts.
//!
//! Each [`Command`] is one dashboard operation. [`execute`] performs all of its
//! backend calls strictly in sequence and collects the results into an
//! [`Outcome`]; nothing here touches the render state. This split lets the
//! network half run on a worker thread while the UI thread applies outcomes.

use crate::api::{ApiError, PortfolioApi};
use crate::model::{
    HistoricalSeries, MutationResponse, NewPosition, PortfolioSnapshot, RiskMetrics,
};

/// Demo portfolio submitted by [`Command::LoadSampleData`]:
/// `(ticker, shares, purchase_price, current_price)`.
pub const SAMPLE_POSITIONS: [(&str, &str, &str, &str); 5] = [
    ("AAPL", "50", "150.00", "175.50"),
    ("GOOGL", "25", "2800.00", "2950.00"),
    ("MSFT", "40", "300.00", "325.00"),
    ("AMZN", "30", "3200.00", "3400.00"),
    ("TSLA", "20", "700.00", "650.00"),
];

pub fn sample_positions() -> Vec<NewPosition> {
    SAMPLE_POSITIONS
        .iter()
        .map(|&(t, s, p, c)| NewPosition::new(t, s, p, c))
        .collect()
}

/// A dashboard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadPortfolio,
    LoadRiskMetrics,
    AddPosition(NewPosition),
    DeletePosition { ticker: String },
    ClearAll,
    LoadSampleData,
    /// `seq` identifies the selector change that issued the request.
    LoadHistorical { ticker: String, days: u32, seq: u64 },
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::LoadPortfolio => "load portfolio",
            Command::LoadRiskMetrics => "load risk metrics",
            Command::AddPosition(_) => "add position",
            Command::DeletePosition { .. } => "delete position",
            Command::ClearAll => "clear positions",
            Command::LoadSampleData => "load sample data",
            Command::LoadHistorical { .. } => "load price history",
        }
    }
}

/// Portfolio and risk reads issued after a successful write.
#[derive(Debug)]
pub struct Reload {
    pub portfolio: Result<PortfolioSnapshot, ApiError>,
    pub risk: Result<RiskMetrics, ApiError>,
}

impl Reload {
    /// Portfolio first, then risk metrics.
    pub fn fetch(api: &dyn PortfolioApi) -> Self {
        let portfolio = api.fetch_portfolio();
        let risk = api.fetch_risk_metrics();
        Self { portfolio, risk }
    }
}

/// Everything a command's backend calls produced.
#[derive(Debug)]
pub enum Outcome {
    Portfolio(Result<PortfolioSnapshot, ApiError>),
    RiskMetrics(Result<RiskMetrics, ApiError>),
    Added {
        ticker: String,
        result: Result<MutationResponse, ApiError>,
        reload: Option<Reload>,
    },
    Deleted {
        ticker: String,
        result: Result<MutationResponse, ApiError>,
        reload: Option<Reload>,
    },
    Cleared {
        result: Result<MutationResponse, ApiError>,
        reload: Option<Reload>,
    },
    SampleLoaded {
        /// Tickers whose add request failed.
        failed: Vec<String>,
        reload: Reload,
    },
    Historical {
        ticker: String,
        seq: u64,
        result: Result<HistoricalSeries, ApiError>,
    },
}

fn succeeded(result: &Result<MutationResponse, ApiError>) -> bool {
    matches!(result, Ok(resp) if resp.success)
}

/// Reload only after the write went through.
fn reload_if(api: &dyn PortfolioApi, result: &Result<MutationResponse, ApiError>) -> Option<Reload> {
    succeeded(result).then(|| Reload::fetch(api))
}

/// Run a command's backend calls in order.
pub fn execute(api: &dyn PortfolioApi, command: Command) -> Outcome {
    match command {
        Command::LoadPortfolio => Outcome::Portfolio(api.fetch_portfolio()),
        Command::LoadRiskMetrics => Outcome::RiskMetrics(api.fetch_risk_metrics()),
        Command::AddPosition(position) => {
            let result = api.add_position(&position);
            let reload = reload_if(api, &result);
            Outcome::Added {
                ticker: position.ticker,
                result,
                reload,
            }
        }
        Command::DeletePosition { ticker } => {
            let result = api.delete_position(&ticker);
            let reload = reload_if(api, &result);
            Outcome::Deleted {
                ticker,
                result,
                reload,
            }
        }
        Command::ClearAll => {
            let result = api.clear_positions();
            let reload = reload_if(api, &result);
            Outcome::Cleared { result, reload }
        }
        Command::LoadSampleData => load_sample_data(api),
        Command::LoadHistorical { ticker, days, seq } => {
            let result = api.fetch_historical(&ticker, days);
            Outcome::Historical {
                ticker,
                seq,
                result,
            }
        }
    }
}

/// Clear, then add each demo position one after another, then reload.
/// Write results are logged but never abort the sequence.
fn load_sample_data(api: &dyn PortfolioApi) -> Outcome {
    if let Err(e) = api.clear_positions() {
        log::warn!("sample data: clear failed: {e}");
    }

    let mut failed = Vec::new();
    for position in sample_positions() {
        match api.add_position(&position) {
            Ok(resp) if resp.success => {}
            Ok(resp) => {
                log::warn!(
                    "sample data: {} rejected: {}",
                    position.ticker,
                    resp.error.unwrap_or_default()
                );
                failed.push(position.ticker);
            }
            Err(e) => {
                log::warn!("sample data: {} failed: {e}", position.ticker);
                failed.push(position.ticker);
            }
        }
    }

    Outcome::SampleLoaded {
        failed,
        reload: Reload::fetch(api),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{ApiCall, MemoryApi};

    #[test]
    fn rejected_add_skips_reload() {
        let api = MemoryApi::default();
        let outcome = execute(
            &api,
            Command::AddPosition(NewPosition::new("AAPL", "x", "1", "1")),
        );
        match outcome {
            Outcome::Added { reload, result, .. } => {
                assert!(reload.is_none());
                assert!(!result.unwrap().success);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(api.calls(), vec![ApiCall::Add { ticker: "AAPL".into() }]);
    }

    #[test]
    fn successful_delete_reloads_portfolio_then_risk() {
        let api = MemoryApi::default();
        execute(&api, Command::DeletePosition { ticker: "AAPL".into() });
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::Delete { ticker: "AAPL".into() },
                ApiCall::FetchPortfolio,
                ApiCall::FetchRiskMetrics,
            ]
        );
    }

    #[test]
    fn sample_data_keeps_going_when_backend_is_down() {
        let api = MemoryApi::default();
        api.set_unreachable(true);
        match execute(&api, Command::LoadSampleData) {
            Outcome::SampleLoaded { failed, reload } => {
                assert_eq!(failed.len(), 5);
                assert!(reload.portfolio.is_err());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        // clear + 5 adds + 2 reload reads
        assert_eq!(api.calls().len(), 8);
    }

    #[test]
    fn labels() {
        assert_eq!(Command::LoadRiskMetrics.label(), "load risk metrics");
    }
}
