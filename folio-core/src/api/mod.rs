//! Backend API trait and structured error types.
//!
//! The PortfolioApi trait abstracts over backends (the HTTP server, the
//! in-memory backend) so the controller can be driven without a network.

pub mod http;
pub mod memory;

use thiserror::Error;

use crate::model::{HistoricalSeries, MutationResponse, NewPosition, PortfolioSnapshot, RiskMetrics};

/// Structured error types for backend calls.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("price history misaligned: {dates} dates vs {prices} prices")]
    MisalignedSeries { dates: usize, prices: usize },

    #[error("no price history {days} days back")]
    HistoryRange { days: u32 },

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// The six backend endpoints the dashboard consumes.
///
/// Implementations are blocking; front-ends call them off the UI thread.
pub trait PortfolioApi: Send + Sync {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// `GET /api/portfolio`
    fn fetch_portfolio(&self) -> Result<PortfolioSnapshot, ApiError>;

    /// `GET /api/risk-metrics`
    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, ApiError>;

    /// `GET /api/historical/{ticker}?days={days}`
    fn fetch_historical(&self, ticker: &str, days: u32) -> Result<HistoricalSeries, ApiError>;

    /// `POST /api/portfolio/add`
    fn add_position(&self, position: &NewPosition) -> Result<MutationResponse, ApiError>;

    /// `DELETE /api/portfolio/delete/{ticker}`
    fn delete_position(&self, ticker: &str) -> Result<MutationResponse, ApiError>;

    /// `POST /api/portfolio/clear`
    fn clear_positions(&self) -> Result<MutationResponse, ApiError>;
}

impl<T: PortfolioApi + ?Sized> PortfolioApi for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_portfolio(&self) -> Result<PortfolioSnapshot, ApiError> {
        (**self).fetch_portfolio()
    }

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, ApiError> {
        (**self).fetch_risk_metrics()
    }

    fn fetch_historical(&self, ticker: &str, days: u32) -> Result<HistoricalSeries, ApiError> {
        (**self).fetch_historical(ticker, days)
    }

    fn add_position(&self, position: &NewPosition) -> Result<MutationResponse, ApiError> {
        (**self).add_position(position)
    }

    fn delete_position(&self, ticker: &str) -> Result<MutationResponse, ApiError> {
        (**self).delete_position(ticker)
    }

    fn clear_positions(&self) -> Result<MutationResponse, ApiError> {
        (**self).clear_positions()
    }
}
