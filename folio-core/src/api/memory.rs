//! In-memory backend.
//!
//! Mirrors the dashboard server's behaviour without a network: positions live
//! in a mutex-guarded vector, derived figures are computed on insert, and price
//! history is a seeded random walk. Every call is recorded so tests can assert
//! on request ordering.

use std::sync::Mutex;

use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ApiError, PortfolioApi};
use crate::model::{
    HistoricalSeries, MutationResponse, NewPosition, PortfolioSnapshot, Position, RiskMetrics,
    Summary, MAX_HISTORY_DAYS,
};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchPortfolio,
    FetchRiskMetrics,
    FetchHistorical { ticker: String, days: u32 },
    Add { ticker: String },
    Delete { ticker: String },
    Clear,
}

impl ApiCall {
    pub fn is_write(&self) -> bool {
        matches!(self, ApiCall::Add { .. } | ApiCall::Delete { .. } | ApiCall::Clear)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    positions: Vec<Position>,
    calls: Vec<ApiCall>,
    unreachable: bool,
}

/// Backend held entirely in process memory.
#[derive(Debug)]
pub struct MemoryApi {
    state: Mutex<MemoryState>,
    seed: u64,
    today: Option<NaiveDate>,
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new(42)
    }
}

impl MemoryApi {
    /// `seed` drives the historical random walk.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            seed,
            today: None,
        }
    }

    /// Pin "today" so history dates are reproducible.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// While set, every call fails with [`ApiError::Network`] (calls are still recorded).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn position_count(&self) -> usize {
        self.lock().positions.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and fail it if the backend is marked unreachable.
    fn enter(&self, call: ApiCall) -> Result<std::sync::MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.unreachable {
            return Err(ApiError::Network("backend unreachable".into()));
        }
        Ok(state)
    }

    fn ticker_seed(&self, ticker: &str) -> u64 {
        ticker
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_field(name: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid {name}: '{raw}'"))
}

/// Build a position with server-side derived figures.
fn derive_position(input: &NewPosition) -> Result<Position, String> {
    let shares = parse_field("shares", &input.shares)?;
    let purchase_price = parse_field("purchase_price", &input.purchase_price)?;
    let current_price = parse_field("current_price", &input.current_price)?;

    let return_pct = if purchase_price > 0.0 {
        (current_price - purchase_price) / purchase_price * 100.0
    } else {
        0.0
    };

    Ok(Position {
        ticker: input.ticker.to_uppercase(),
        shares: shares.trunc(),
        purchase_price: round2(purchase_price),
        current_price: round2(current_price),
        total_value: round2(shares * current_price),
        total_cost: round2(shares * purchase_price),
        gain_loss: round2((current_price - purchase_price) * shares),
        return_pct: round2(return_pct),
    })
}

fn summarize(positions: &[Position]) -> Summary {
    if positions.is_empty() {
        return Summary::default();
    }
    let total_value: f64 = positions.iter().map(|p| p.total_value).sum();
    let total_cost: f64 = positions.iter().map(|p| p.total_cost).sum();
    let total_gain_loss: f64 = positions.iter().map(|p| p.gain_loss).sum();
    let overall_return = if total_cost > 0.0 {
        round2(total_gain_loss / total_cost * 100.0)
    } else {
        0.0
    };
    Summary {
        total_value: round2(total_value),
        total_cost: round2(total_cost),
        total_gain_loss: round2(total_gain_loss),
        overall_return,
        num_positions: positions.len(),
    }
}

fn risk_metrics(positions: &[Position]) -> RiskMetrics {
    if positions.is_empty() {
        return RiskMetrics::default();
    }
    let returns: Vec<f64> = positions.iter().map(|p| p.return_pct).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    // Population standard deviation.
    let std = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt();

    RiskMetrics {
        volatility: if returns.len() > 1 { round2(std) } else { 0.0 },
        sharpe_ratio: if std > 0.0 { round2(mean / std) } else { 0.0 },
        max_gain: round2(returns.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        max_loss: round2(returns.iter().copied().fold(f64::INFINITY, f64::min)),
        avg_return: round2(mean),
        positive_positions: returns.iter().filter(|r| **r > 0.0).count() as u32,
        negative_positions: returns.iter().filter(|r| **r < 0.0).count() as u32,
    }
}

impl PortfolioApi for MemoryApi {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_portfolio(&self) -> Result<PortfolioSnapshot, ApiError> {
        let state = self.enter(ApiCall::FetchPortfolio)?;
        Ok(PortfolioSnapshot {
            summary: summarize(&state.positions),
            portfolio: state.positions.clone(),
        })
    }

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, ApiError> {
        let state = self.enter(ApiCall::FetchRiskMetrics)?;
        Ok(risk_metrics(&state.positions))
    }

    fn fetch_historical(&self, ticker: &str, days: u32) -> Result<HistoricalSeries, ApiError> {
        drop(self.enter(ApiCall::FetchHistorical {
            ticker: ticker.to_string(),
            days,
        })?);

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut rng = StdRng::seed_from_u64(self.ticker_seed(ticker));
        let mut base: f64 = rng.gen_range(100.0..500.0);

        // Longer requests get the most recent window.
        let days = days.min(MAX_HISTORY_DAYS);
        let mut dates = Vec::with_capacity(days as usize);
        let mut prices = Vec::with_capacity(days as usize);
        for back in (1..=u64::from(days)).rev() {
            let date = today
                .checked_sub_days(Days::new(back))
                .ok_or(ApiError::HistoryRange { days })?;
            let price = base * (1.0 + rng.gen_range(-0.05..0.05));
            dates.push(date.format("%Y-%m-%d").to_string());
            prices.push(round2(price));
            base = price;
        }

        HistoricalSeries::new(ticker, dates, prices).ok_or(ApiError::MisalignedSeries {
            dates: days as usize,
            prices: days as usize,
        })
    }

    fn add_position(&self, position: &NewPosition) -> Result<MutationResponse, ApiError> {
        let mut state = self.enter(ApiCall::Add {
            ticker: position.ticker.clone(),
        })?;
        match derive_position(position) {
            Ok(derived) => {
                state.positions.push(derived);
                Ok(MutationResponse::ok())
            }
            Err(e) => Ok(MutationResponse::failed(e)),
        }
    }

    fn delete_position(&self, ticker: &str) -> Result<MutationResponse, ApiError> {
        let mut state = self.enter(ApiCall::Delete {
            ticker: ticker.to_string(),
        })?;
        let wanted = ticker.to_uppercase();
        state.positions.retain(|p| p.ticker.to_uppercase() != wanted);
        Ok(MutationResponse::ok())
    }

    fn clear_positions(&self) -> Result<MutationResponse, ApiError> {
        let mut state = self.enter(ApiCall::Clear)?;
        state.positions.clear();
        Ok(MutationResponse::ok())
    }
}
