//! End-to-end controller behaviour against the in-memory backend.

use folio_core::api::memory::{ApiCall, MemoryApi};
use folio_core::controller::{Controller, NoticeLevel, Outcome};
use folio_core::view::ViewKind;
use folio_core::{ApiError, Command, Dashboard, PortfolioApi};

fn controller() -> Controller<MemoryApi> {
    Controller::new(MemoryApi::new(1), 30)
}

#[test]
fn startup_loads_portfolio_then_risk() {
    let mut c = controller();
    let notices = c.start();
    assert!(notices.is_empty());
    assert_eq!(
        c.api().calls(),
        vec![ApiCall::FetchPortfolio, ApiCall::FetchRiskMetrics]
    );

    let state = c.render_state();
    assert_eq!(state.summary.as_ref().unwrap().total_value, "$0");
    assert!(state.table.is_placeholder());
    assert!(state.charts.allocation.get().unwrap().is_placeholder());
    assert!(state.charts.returns.get().unwrap().is_placeholder());
    assert_eq!(state.risk.as_ref().unwrap().positive_positions, "0 / 0");
}

#[test]
fn add_reloads_and_confirms() {
    let mut c = controller();
    let notices = c.add_position("AAPL", "50", "150", "175.50");

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].message, "✓ AAPL added successfully!");
    assert_eq!(
        c.api().calls(),
        vec![
            ApiCall::Add { ticker: "AAPL".into() },
            ApiCall::FetchPortfolio,
            ApiCall::FetchRiskMetrics,
        ]
    );

    let state = c.render_state();
    let summary = state.summary.as_ref().unwrap();
    assert_eq!(summary.total_value, "$8,775");
    assert_eq!(summary.gain_loss.class(), "positive");
    assert_eq!(state.table.rows.len(), 1);
    assert_eq!(state.charts.allocation.get().unwrap().total(), 8775.0);
    assert_eq!(state.selector.entries().count(), 2);
}

#[test]
fn rejected_add_alerts_without_reload() {
    let mut c = controller();
    let notices = c.add_position("AAPL", "", "150", "175");
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.starts_with("Error adding position: invalid shares"));
    assert_eq!(c.api().calls(), vec![ApiCall::Add { ticker: "AAPL".into() }]);
    assert!(c.render_state().summary.is_none());
}

#[test]
fn unreachable_backend_on_add_gives_generic_alert() {
    let mut c = controller();
    c.api().set_unreachable(true);
    let notices = c.add_position("AAPL", "1", "1", "1");
    assert_eq!(notices[0].message, "Error adding position. Please try again.");
}

#[test]
fn declined_delete_sends_nothing() {
    let mut c = controller();
    c.add_position("AAPL", "1", "1", "1");
    c.api().clear_calls();

    let mut asked = Vec::new();
    let notices = c.delete_position("AAPL", &mut |prompt: &str| {
        asked.push(prompt.to_string());
        false
    });

    assert!(notices.is_empty());
    assert_eq!(asked, vec!["Are you sure you want to delete AAPL?".to_string()]);
    assert!(c.api().calls().is_empty());
    assert_eq!(c.api().position_count(), 1);
}

#[test]
fn accepted_delete_removes_and_reloads() {
    let mut c = controller();
    c.add_position("AAPL", "1", "1", "1");
    c.api().clear_calls();

    let notices = c.delete_position("AAPL", &mut |_: &str| true);
    assert!(notices.is_empty());
    assert_eq!(
        c.api().calls(),
        vec![
            ApiCall::Delete { ticker: "AAPL".into() },
            ApiCall::FetchPortfolio,
            ApiCall::FetchRiskMetrics,
        ]
    );
    assert!(c.render_state().table.is_placeholder());
}

#[test]
fn failed_delete_is_generic() {
    let mut c = controller();
    c.api().set_unreachable(true);
    let notices = c.delete_position("AAPL", &mut |_: &str| true);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Error deleting position");
}

#[test]
fn clear_requires_confirmation() {
    let mut c = controller();
    c.add_position("AAPL", "1", "1", "1");

    assert!(c.clear_all_positions(&mut |_: &str| false).is_empty());
    assert_eq!(c.api().position_count(), 1);

    let notices = c.clear_all_positions(&mut |_: &str| true);
    assert_eq!(notices.last().unwrap().message, "✓ All positions cleared!");
    assert_eq!(c.api().position_count(), 0);
}

#[test]
fn sample_data_is_one_clear_then_five_sequential_adds() {
    let mut c = controller();
    c.add_position("NVDA", "3", "400", "900");
    c.api().clear_calls();

    let notices = c.load_sample_data();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "✓ Sample data loaded!");

    let calls = c.api().calls();
    let writes: Vec<_> = calls.iter().filter(|call| call.is_write()).cloned().collect();
    assert_eq!(
        writes,
        vec![
            ApiCall::Clear,
            ApiCall::Add { ticker: "AAPL".into() },
            ApiCall::Add { ticker: "GOOGL".into() },
            ApiCall::Add { ticker: "MSFT".into() },
            ApiCall::Add { ticker: "AMZN".into() },
            ApiCall::Add { ticker: "TSLA".into() },
        ]
    );
    // Writes strictly precede the reload.
    assert_eq!(calls[6..], [ApiCall::FetchPortfolio, ApiCall::FetchRiskMetrics]);

    let state = c.render_state();
    assert_eq!(state.table.rows.len(), 5);
    let risk = state.risk.as_ref().unwrap();
    assert_eq!(risk.positive_positions, "4 / 5");
}

#[test]
fn read_failure_leaves_views_untouched() {
    let mut c = controller();
    c.add_position("AAPL", "50", "150", "175.50");
    let before = c.render_state().summary.clone();

    c.api().set_unreachable(true);
    let notices = c.load_portfolio_data();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(c.render_state().summary, before);
    assert_eq!(c.render_state().table.rows.len(), 1);
}

#[test]
fn history_renders_selected_ticker() {
    let mut c = controller();
    c.add_position("AAPL", "1", "1", "1");
    let notices = c.load_historical_data("AAPL");
    assert!(notices.is_empty());

    let chart = c.render_state().charts.historical.get().unwrap();
    assert_eq!(chart.label, "AAPL Price");
    assert_eq!(chart.dates.len(), 30);
    assert_eq!(chart.dates.len(), chart.prices.len());
}

#[test]
fn stale_history_from_worker_is_dropped() {
    // Simulates a worker finishing requests out of order.
    let api = MemoryApi::new(9);
    let mut dash = Dashboard::new(30);

    let first = dash.select_ticker("AAPL");
    let second = dash.select_ticker("MSFT");

    let late = folio_core::controller::execute(&api, first);
    let fresh = folio_core::controller::execute(&api, second);

    dash.apply(fresh);
    dash.apply(late);

    let chart = dash.render_state().charts.historical.get().unwrap();
    assert_eq!(chart.ticker, "MSFT");
}

#[test]
fn every_portfolio_load_renders_views_in_order() {
    let mut c = controller();
    let mut dash = Dashboard::new(30);
    c.add_position("AAPL", "1", "1", "1");

    let outcome = folio_core::controller::execute(c.api(), Command::LoadPortfolio);
    dash.apply(outcome);
    assert_eq!(
        dash.render_state_mut().take_updates(),
        vec![
            ViewKind::SummaryCards,
            ViewKind::PositionTable,
            ViewKind::AllocationChart,
            ViewKind::ReturnsChart,
            ViewKind::TickerSelector,
        ]
    );
}

/// A backend whose history endpoint returns misaligned columns.
struct BrokenHistory;

impl PortfolioApi for BrokenHistory {
    fn name(&self) -> &str {
        "broken"
    }
    fn fetch_portfolio(&self) -> Result<folio_core::PortfolioSnapshot, ApiError> {
        Ok(Default::default())
    }
    fn fetch_risk_metrics(&self) -> Result<folio_core::RiskMetrics, ApiError> {
        Ok(Default::default())
    }
    fn fetch_historical(&self, _: &str, _: u32) -> Result<folio_core::HistoricalSeries, ApiError> {
        Err(ApiError::MisalignedSeries { dates: 3, prices: 2 })
    }
    fn add_position(
        &self,
        _: &folio_core::NewPosition,
    ) -> Result<folio_core::model::MutationResponse, ApiError> {
        Ok(folio_core::model::MutationResponse::ok())
    }
    fn delete_position(&self, _: &str) -> Result<folio_core::model::MutationResponse, ApiError> {
        Ok(folio_core::model::MutationResponse::ok())
    }
    fn clear_positions(&self) -> Result<folio_core::model::MutationResponse, ApiError> {
        Ok(folio_core::model::MutationResponse::ok())
    }
}

#[test]
fn misaligned_history_is_a_read_failure() {
    let mut c = Controller::new(BrokenHistory, 30);
    let notices = c.load_historical_data("AAPL");
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert!(!c.render_state().charts.historical.exists());
}

#[test]
fn outcome_of_empty_history_renders() {
    let mut dash = Dashboard::new(0);
    let cmd = dash.select_ticker("AAPL");
    let outcome = folio_core::controller::execute(&MemoryApi::default(), cmd);
    assert!(matches!(outcome, Outcome::Historical { .. }));
    dash.apply(outcome);
    let chart = dash.render_state().charts.historical.get().unwrap();
    assert!(chart.is_empty());
    assert_eq!(chart.y_bounds(), None);
}
