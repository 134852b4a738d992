//! Folio Core: dashboard controller for a portfolio backend.
//!
//! This crate contains everything a front-end needs to drive the dashboard:
//! - Domain types (positions, snapshot summary, risk metrics, price history)
//! - The backend API trait with an HTTP client and an in-memory backend
//! - Number formatting matching the dashboard's display rules
//! - View models for summary cards, the positions table and three charts
//! - The controller: commands, outcomes, and the render state they update
//! - Configuration loading and logger set-up

pub mod api;
pub mod config;
pub mod controller;
pub mod format;
pub mod logging;
pub mod model;
pub mod view;

pub use api::{ApiError, PortfolioApi};
pub use config::DashboardConfig;
pub use controller::{Command, Controller, Dashboard, Notice, NoticeLevel, Outcome};
pub use model::{HistoricalSeries, NewPosition, PortfolioSnapshot, Position, RiskMetrics, Summary};
pub use view::RenderState;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything that crosses the worker channel is Send.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Command>();
        require_send::<Outcome>();
        require_send::<ApiError>();
        require_sync::<PortfolioSnapshot>();
        require_sync::<RiskMetrics>();
        require_sync::<HistoricalSeries>();
        require_send::<api::http::HttpApi>();
        require_sync::<api::http::HttpApi>();
        require_send::<api::memory::MemoryApi>();
        require_sync::<api::memory::MemoryApi>();
    }
}
