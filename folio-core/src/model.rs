//! Domain types exchanged with the portfolio backend.
//!
//! All derived figures (value, cost, gain/loss, return) are computed by the
//! server; the client only ever displays them.

use serde::{Deserialize, Serialize};

/// One held security lot, as reported by `GET /api/portfolio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub shares: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub total_cost: f64,
    pub gain_loss: f64,
    pub return_pct: f64,
}

/// Portfolio-wide aggregate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    pub overall_return: f64,
    #[serde(default)]
    pub num_positions: usize,
}

/// Positions plus summary as of the last read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub summary: Summary,
    pub portfolio: Vec<Position>,
}

impl PortfolioSnapshot {
    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.portfolio.iter().map(|p| p.ticker.as_str())
    }
}

/// Statistical indicators computed server-side over position returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_gain: f64,
    pub max_loss: f64,
    pub avg_return: f64,
    pub positive_positions: u32,
    pub negative_positions: u32,
}

/// Longest price history the dashboard asks for (about ten years).
pub const MAX_HISTORY_DAYS: u32 = 3650;

/// Wire shape of `GET /api/historical/{ticker}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct HistoricalResponse {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

/// Daily price history for one ticker.
///
/// `dates[i]` labels `prices[i]`; construction through [`HistoricalSeries::new`]
/// refuses misaligned input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    ticker: String,
    dates: Vec<String>,
    prices: Vec<f64>,
}

impl HistoricalSeries {
    /// Returns `None` when the two columns differ in length.
    pub fn new(ticker: impl Into<String>, dates: Vec<String>, prices: Vec<f64>) -> Option<Self> {
        if dates.len() != prices.len() {
            return None;
        }
        Some(Self {
            ticker: ticker.into(),
            dates,
            prices,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Add-form payload. Fields are forwarded verbatim; parsing is the server's job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewPosition {
    pub ticker: String,
    pub shares: String,
    pub purchase_price: String,
    pub current_price: String,
}

impl NewPosition {
    pub fn new(
        ticker: impl Into<String>,
        shares: impl Into<String>,
        purchase_price: impl Into<String>,
        current_price: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            shares: shares.into(),
            purchase_price: purchase_price.into(),
            current_price: current_price.into(),
        }
    }
}

/// Reply to add/delete/clear.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_decodes_server_payload() {
        let json = r#"{
            "portfolio": [{
                "ticker": "AAPL", "shares": 50, "purchase_price": 150.0,
                "current_price": 175.5, "total_value": 8775.0, "total_cost": 7500.0,
                "gain_loss": 1275.0, "return_pct": 17.0
            }],
            "summary": {
                "total_value": 8775.0, "total_cost": 7500.0, "total_gain_loss": 1275.0,
                "overall_return": 17.0, "num_positions": 1
            }
        }"#;
        let snap: PortfolioSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.portfolio.len(), 1);
        assert_eq!(snap.portfolio[0].shares, 50.0);
        assert_eq!(snap.summary.num_positions, 1);
        assert_eq!(snap.tickers().collect::<Vec<_>>(), vec!["AAPL"]);
    }

    #[test]
    fn summary_without_position_count_defaults_to_zero() {
        let json = r#"{"total_value": 0, "total_cost": 0, "total_gain_loss": 0, "overall_return": 0}"#;
        let summary: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.num_positions, 0);
    }

    #[test]
    fn mutation_response_error_is_optional() {
        let ok: MutationResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(ok, MutationResponse::ok());

        let failed: MutationResponse =
            serde_json::from_str(r#"{"success": false, "error": "could not convert string to float: 'x'"}"#)
                .unwrap();
        assert!(!failed.success);
        assert!(failed.error.unwrap().contains("convert"));
    }

    #[test]
    fn new_position_serializes_fields_as_strings() {
        let p = NewPosition::new("AAPL", "50", "150", "175.5");
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["shares"], "50");
        assert_eq!(v["purchase_price"], "150");
    }

    #[test]
    fn misaligned_series_is_rejected() {
        assert!(HistoricalSeries::new("AAPL", vec!["2024-01-01".into()], vec![]).is_none());
        let s = HistoricalSeries::new("AAPL", vec![], vec![]).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }
}
