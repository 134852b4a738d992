//! Dashboard controller.
//!
//! - [`command`]: operations and the backend calls each one makes
//! - [`dashboard`]: render state ownership, outcome application, notices
//! - [`Controller`]: synchronous driver that runs both halves back to back

pub mod command;
pub mod dashboard;

pub use command::{execute, sample_positions, Command, Outcome, Reload, SAMPLE_POSITIONS};
pub use dashboard::{Confirm, Dashboard, Notice, NoticeLevel, PendingConfirm};

use crate::api::PortfolioApi;
use crate::model::NewPosition;
use crate::view::RenderState;

/// Runs commands inline on the calling thread.
///
/// Front-ends that must not block (the TUI) use [`execute`] on a worker and
/// [`Dashboard::apply`] on the UI thread instead.
pub struct Controller<A: PortfolioApi> {
    api: A,
    dashboard: Dashboard,
}

impl<A: PortfolioApi> Controller<A> {
    pub fn new(api: A, history_days: u32) -> Self {
        Self {
            api,
            dashboard: Dashboard::new(history_days),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn render_state(&self) -> &RenderState {
        self.dashboard.render_state()
    }

    pub fn run(&mut self, command: Command) -> Vec<Notice> {
        log::debug!("running {}", command.label());
        let outcome = execute(&self.api, command);
        self.dashboard.apply(outcome)
    }

    /// Initial portfolio and risk loads.
    pub fn start(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        for command in self.dashboard.startup_commands() {
            notices.extend(self.run(command));
        }
        notices
    }

    pub fn load_portfolio_data(&mut self) -> Vec<Notice> {
        self.run(Command::LoadPortfolio)
    }

    pub fn load_risk_metrics(&mut self) -> Vec<Notice> {
        self.run(Command::LoadRiskMetrics)
    }

    pub fn add_position(
        &mut self,
        ticker: &str,
        shares: &str,
        purchase_price: &str,
        current_price: &str,
    ) -> Vec<Notice> {
        let form = NewPosition::new(ticker, shares, purchase_price, current_price);
        let command = self.dashboard.submit_form(form);
        self.run(command)
    }

    /// Nothing is sent unless `confirm` answers yes.
    pub fn delete_position(&mut self, ticker: &str, confirm: &mut dyn Confirm) -> Vec<Notice> {
        match self.dashboard.confirm_delete(ticker).resolve(confirm) {
            Some(command) => self.run(command),
            None => Vec::new(),
        }
    }

    pub fn clear_all_positions(&mut self, confirm: &mut dyn Confirm) -> Vec<Notice> {
        match self.dashboard.confirm_clear().resolve(confirm) {
            Some(command) => self.run(command),
            None => Vec::new(),
        }
    }

    pub fn load_sample_data(&mut self) -> Vec<Notice> {
        self.run(Command::LoadSampleData)
    }

    pub fn load_historical_data(&mut self, ticker: &str) -> Vec<Notice> {
        let command = self.dashboard.select_ticker(ticker);
        self.run(command)
    }
}
