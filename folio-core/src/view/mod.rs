//! View models: synchronous, I/O-free renderings of server data.
//!
//! A front-end draws whatever [`RenderState`] currently holds. The state is
//! owned by the controller and passed into every render call; nothing here
//! reads global state.

pub mod charts;
pub mod risk;
pub mod selector;
pub mod summary;
pub mod table;

pub use charts::{AllocationChart, HistoricalChart, ReturnsChart, Rgb};
pub use risk::RiskPanel;
pub use selector::TickerSelector;
pub use summary::{SignedText, SummaryCards};
pub use table::{PositionRow, PositionTable, TableRow};

use crate::model::{HistoricalSeries, PortfolioSnapshot, RiskMetrics};

/// Which view a render step touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    SummaryCards,
    PositionTable,
    AllocationChart,
    ReturnsChart,
    TickerSelector,
    RiskMetrics,
    HistoricalChart,
}

/// Holder for one chart kind. Building a new chart drops the previous one.
#[derive(Debug, Clone)]
pub struct ChartSlot<T> {
    current: Option<T>,
    builds: u64,
}

impl<T> Default for ChartSlot<T> {
    fn default() -> Self {
        Self {
            current: None,
            builds: 0,
        }
    }
}

impl<T> ChartSlot<T> {
    /// Install `chart`, returning the one it replaced.
    pub fn replace(&mut self, chart: T) -> Option<T> {
        self.builds += 1;
        self.current.replace(chart)
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn exists(&self) -> bool {
        self.current.is_some()
    }

    /// Number of charts built into this slot so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

/// The three independently replaceable chart handles.
#[derive(Debug, Clone, Default)]
pub struct ChartHandles {
    pub allocation: ChartSlot<AllocationChart>,
    pub returns: ChartSlot<ReturnsChart>,
    pub historical: ChartSlot<HistoricalChart>,
}

/// Everything currently on screen.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub summary: Option<SummaryCards>,
    pub table: PositionTable,
    pub risk: Option<RiskPanel>,
    pub selector: TickerSelector,
    pub charts: ChartHandles,
    updates: Vec<ViewKind>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            summary: None,
            table: PositionTable::build(&[]),
            risk: None,
            selector: TickerSelector::default(),
            charts: ChartHandles::default(),
            updates: Vec::new(),
        }
    }
}

impl RenderState {
    /// Views touched since the last call, in the order they were rendered.
    pub fn take_updates(&mut self) -> Vec<ViewKind> {
        std::mem::take(&mut self.updates)
    }
}

/// Render a portfolio snapshot: summary cards, table, allocation chart,
/// returns chart, ticker selector. Always in that order.
pub fn render_snapshot(state: &mut RenderState, snapshot: &PortfolioSnapshot) {
    state.summary = Some(SummaryCards::build(&snapshot.summary));
    state.updates.push(ViewKind::SummaryCards);

    state.table = PositionTable::build(&snapshot.portfolio);
    state.updates.push(ViewKind::PositionTable);

    state
        .charts
        .allocation
        .replace(AllocationChart::build(&snapshot.portfolio));
    state.updates.push(ViewKind::AllocationChart);

    state
        .charts
        .returns
        .replace(ReturnsChart::build(&snapshot.portfolio));
    state.updates.push(ViewKind::ReturnsChart);

    state.selector = TickerSelector::build(snapshot.tickers());
    state.updates.push(ViewKind::TickerSelector);
}

/// Render the six risk metric fields.
pub fn render_risk(state: &mut RenderState, metrics: &RiskMetrics) {
    state.risk = Some(RiskPanel::build(metrics));
    state.updates.push(ViewKind::RiskMetrics);
}

/// Render a price history as the historical line chart.
pub fn render_historical(state: &mut RenderState, series: &HistoricalSeries) {
    state.charts.historical.replace(HistoricalChart::build(series));
    state.updates.push(ViewKind::HistoricalChart);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, Summary};

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            summary: Summary {
                total_value: 8775.0,
                total_cost: 7500.0,
                total_gain_loss: 1275.0,
                overall_return: 17.0,
                num_positions: 1,
            },
            portfolio: vec![Position {
                ticker: "AAPL".into(),
                shares: 50.0,
                purchase_price: 150.0,
                current_price: 175.5,
                total_value: 8775.0,
                total_cost: 7500.0,
                gain_loss: 1275.0,
                return_pct: 17.0,
            }],
        }
    }

    #[test]
    fn snapshot_renders_in_fixed_order() {
        let mut state = RenderState::default();
        render_snapshot(&mut state, &snapshot());
        assert_eq!(
            state.take_updates(),
            vec![
                ViewKind::SummaryCards,
                ViewKind::PositionTable,
                ViewKind::AllocationChart,
                ViewKind::ReturnsChart,
                ViewKind::TickerSelector,
            ]
        );
        assert!(state.take_updates().is_empty());
    }

    #[test]
    fn charts_are_rebuilt_not_patched() {
        let mut state = RenderState::default();
        assert!(!state.charts.allocation.exists());

        render_snapshot(&mut state, &snapshot());
        render_snapshot(&mut state, &PortfolioSnapshot::default());

        assert_eq!(state.charts.allocation.builds(), 2);
        assert_eq!(state.charts.returns.builds(), 2);
        assert!(state.charts.allocation.get().unwrap().is_placeholder());
        assert!(!state.charts.historical.exists());
    }

    #[test]
    fn slot_replace_returns_previous() {
        let mut slot: ChartSlot<u32> = ChartSlot::default();
        assert_eq!(slot.replace(1), None);
        assert_eq!(slot.replace(2), Some(1));
        assert_eq!(slot.get(), Some(&2));
    }

    #[test]
    fn initial_state_has_placeholder_table() {
        let state = RenderState::default();
        assert_eq!(state.table.rows.len(), 1);
        assert!(state.summary.is_none());
    }
}
