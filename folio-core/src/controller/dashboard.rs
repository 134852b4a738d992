//! Dashboard state: single owner, UI thread only.
//!
//! Applies [`Outcome`]s to the [`RenderState`] and decides what the user is
//! told. Read failures are logged and surfaced as passive warnings; write
//! failures become blocking alerts.

use super::command::{Command, Outcome, Reload};
use crate::api::ApiError;
use crate::model::{MutationResponse, NewPosition};
use crate::view::{self, RenderState};

pub const CLEAR_PROMPT: &str = "Are you sure you want to clear ALL positions? This cannot be undone.";

pub fn delete_prompt(ticker: &str) -> String {
    format!("Are you sure you want to delete {ticker}?")
}

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Blocking confirmation of a completed write.
    Info,
    /// Passive: status line only, nothing to dismiss.
    Warning,
    /// Blocking alert for a failed write.
    Error,
}

/// A message for the user produced while applying an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Must the user dismiss this before continuing?
    pub fn is_blocking(&self) -> bool {
        self.level != NoticeLevel::Warning
    }
}

/// Interactive yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A destructive command waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub prompt: String,
    pub command: Command,
}

impl PendingConfirm {
    /// Ask; the command is only released on "yes".
    pub fn resolve(self, confirm: &mut dyn Confirm) -> Option<Command> {
        confirm.confirm(&self.prompt).then_some(self.command)
    }
}

pub struct Dashboard {
    render: RenderState,
    history_days: u32,
    history_seq: u64,
}

impl Dashboard {
    pub fn new(history_days: u32) -> Self {
        Self {
            render: RenderState::default(),
            history_days,
            history_seq: 0,
        }
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn render_state_mut(&mut self) -> &mut RenderState {
        &mut self.render
    }

    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    /// The two initial loads issued when the dashboard becomes ready.
    pub fn startup_commands(&self) -> [Command; 2] {
        [Command::LoadPortfolio, Command::LoadRiskMetrics]
    }

    /// Add-form submission. Values go to the server untouched.
    pub fn submit_form(&self, form: NewPosition) -> Command {
        Command::AddPosition(form)
    }

    pub fn confirm_delete(&self, ticker: &str) -> PendingConfirm {
        PendingConfirm {
            prompt: delete_prompt(ticker),
            command: Command::DeletePosition {
                ticker: ticker.to_string(),
            },
        }
    }

    pub fn confirm_clear(&self) -> PendingConfirm {
        PendingConfirm {
            prompt: CLEAR_PROMPT.to_string(),
            command: Command::ClearAll,
        }
    }

    /// Selector change: every call supersedes all earlier history requests.
    pub fn select_ticker(&mut self, ticker: &str) -> Command {
        self.history_seq += 1;
        Command::LoadHistorical {
            ticker: ticker.to_string(),
            days: self.history_days,
            seq: self.history_seq,
        }
    }

    /// Update the render state from a finished command.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Notice> {
        let mut notices = Vec::new();
        match outcome {
            Outcome::Portfolio(result) => self.apply_portfolio(result, &mut notices),
            Outcome::RiskMetrics(result) => self.apply_risk(result, &mut notices),
            Outcome::Added {
                ticker,
                result,
                reload,
            } => match result {
                Ok(MutationResponse { success: true, .. }) => {
                    self.apply_reload(reload, &mut notices);
                    log::info!("added position {ticker}");
                    notices.push(Notice::info(format!("✓ {ticker} added successfully!")));
                }
                Ok(MutationResponse { error, .. }) => {
                    let reason = error.unwrap_or_else(|| "unknown error".into());
                    log::error!("add {ticker} rejected: {reason}");
                    notices.push(Notice::error(format!("Error adding position: {reason}")));
                }
                Err(e) => {
                    log::error!("Error adding position: {e}");
                    notices.push(Notice::error("Error adding position. Please try again."));
                }
            },
            Outcome::Deleted {
                ticker,
                result,
                reload,
            } => match result {
                Ok(MutationResponse { success: true, .. }) => {
                    log::info!("deleted position {ticker}");
                    self.apply_reload(reload, &mut notices);
                }
                Ok(_) => {
                    log::error!("delete {ticker} rejected");
                    notices.push(Notice::error("Error deleting position"));
                }
                Err(e) => {
                    log::error!("Error deleting position: {e}");
                    notices.push(Notice::error("Error deleting position"));
                }
            },
            Outcome::Cleared { result, reload } => match result {
                Ok(MutationResponse { success: true, .. }) => {
                    log::info!("cleared all positions");
                    self.apply_reload(reload, &mut notices);
                    notices.push(Notice::info("✓ All positions cleared!"));
                }
                Ok(_) => {
                    log::error!("clear rejected");
                    notices.push(Notice::error("Error clearing positions"));
                }
                Err(e) => {
                    log::error!("Error clearing positions: {e}");
                    notices.push(Notice::error("Error clearing positions"));
                }
            },
            Outcome::SampleLoaded { failed, reload } => {
                if !failed.is_empty() {
                    log::warn!("sample data incomplete: {}", failed.join(", "));
                }
                self.apply_reload(Some(reload), &mut notices);
                notices.push(Notice::info("✓ Sample data loaded!"));
            }
            Outcome::Historical {
                ticker,
                seq,
                result,
            } => {
                if seq != self.history_seq {
                    log::debug!(
                        "discarding stale history for {ticker} (seq {seq}, latest {})",
                        self.history_seq
                    );
                    return notices;
                }
                match result {
                    Ok(series) => view::render_historical(&mut self.render, &series),
                    Err(e) => read_failure("historical data", &e, &mut notices),
                }
            }
        }
        notices
    }

    fn apply_portfolio(
        &mut self,
        result: Result<crate::model::PortfolioSnapshot, ApiError>,
        notices: &mut Vec<Notice>,
    ) {
        match result {
            Ok(snapshot) => view::render_snapshot(&mut self.render, &snapshot),
            Err(e) => read_failure("portfolio data", &e, notices),
        }
    }

    fn apply_risk(&mut self, result: Result<crate::model::RiskMetrics, ApiError>, notices: &mut Vec<Notice>) {
        match result {
            Ok(metrics) => view::render_risk(&mut self.render, &metrics),
            Err(e) => read_failure("risk metrics", &e, notices),
        }
    }

    fn apply_reload(&mut self, reload: Option<Reload>, notices: &mut Vec<Notice>) {
        if let Some(reload) = reload {
            self.apply_portfolio(reload.portfolio, notices);
            self.apply_risk(reload.risk, notices);
        }
    }
}

/// Reads never block the user: log, keep the stale view, leave a passive notice.
fn read_failure(what: &str, err: &ApiError, notices: &mut Vec<Notice>) {
    log::warn!("Error loading {what}: {err}");
    notices.push(Notice::warning(format!("Error loading {what}: {err}")));
}
