//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels; the
//! dashboard (render state, history sequence) is only ever touched from here.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use folio_core::controller::{Command, Dashboard, Notice, NoticeLevel, Outcome, PendingConfirm};
use folio_core::model::NewPosition;
use folio_core::view::RenderState;

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Positions,
    Charts,
    History,
    Help,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Overview,
        Panel::Positions,
        Panel::Charts,
        Panel::History,
        Panel::Help,
    ];

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Positions => 1,
            Panel::Charts => 2,
            Panel::History => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Positions => "Positions",
            Panel::Charts => "Charts",
            Panel::History => "History",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Where a recorded error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A load that left the previous view in place.
    Read,
    /// A rejected or failed mutation.
    Write,
    /// Worker channel trouble.
    Worker,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Read => "READ",
            ErrorCategory::Write => "WRITE",
            ErrorCategory::Worker => "WORK",
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Add-position form: four free-text fields sent to the server as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub fields: [String; 4],
    pub focus: usize,
}

impl AddForm {
    pub const LABELS: [&'static str; 4] = ["Ticker", "Shares", "Purchase Price", "Current Price"];

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn push(&mut self, c: char) {
        self.fields[self.focus].push(c);
    }

    pub fn pop(&mut self) {
        self.fields[self.focus].pop();
    }

    /// Take the entered values and reset the form.
    pub fn take(&mut self) -> NewPosition {
        let [ticker, shares, purchase, current] = std::mem::take(&mut self.fields);
        self.focus = 0;
        NewPosition::new(ticker, shares, purchase, current)
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    AddForm,
    Confirm(PendingConfirm),
    Alert(Notice),
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Dashboard
    pub dashboard: Dashboard,
    pub backend: String,
    pub table_cursor: usize,
    pub form: AddForm,
    pub in_flight: usize,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub pending_alerts: VecDeque<Notice>,
}

impl AppState {
    pub fn new(
        dashboard: Dashboard,
        backend: impl Into<String>,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            active_panel: Panel::Overview,
            running: true,
            dashboard,
            backend: backend.into(),
            table_cursor: 0,
            form: AddForm::default(),
            in_flight: 0,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            pending_alerts: VecDeque::new(),
        }
    }

    pub fn render(&self) -> &RenderState {
        self.dashboard.render_state()
    }

    /// Hand a command to the worker.
    pub fn send(&mut self, command: Command) {
        let label = command.label();
        match self.worker_tx.send(WorkerCommand::Run(command)) {
            Ok(()) => {
                self.in_flight += 1;
                log::debug!("queued {label}");
            }
            Err(_) => self.push_error(
                ErrorCategory::Worker,
                "Worker is not running".into(),
                label.into(),
            ),
        }
    }

    /// Queue the initial portfolio and risk loads.
    pub fn start(&mut self) {
        for command in self.dashboard.startup_commands() {
            self.send(command);
        }
    }

    pub fn reload(&mut self) {
        self.send(Command::LoadPortfolio);
        self.send(Command::LoadRiskMetrics);
        self.set_status("Reloading…");
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Finished { label, outcome } => self.apply_outcome(label, outcome),
        }
    }

    fn apply_outcome(&mut self, label: &'static str, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let notices = self.dashboard.apply(outcome);
        self.clamp_table_cursor();

        for notice in notices {
            match notice.level {
                NoticeLevel::Info => self.set_status(notice.message.clone()),
                NoticeLevel::Warning => {
                    self.record_error(ErrorCategory::Read, notice.message.clone(), label.into());
                    self.set_warning(notice.message.clone());
                }
                NoticeLevel::Error => {
                    self.push_error(ErrorCategory::Write, notice.message.clone(), label.into());
                }
            }
            if notice.is_blocking() {
                self.queue_alert(notice);
            }
        }
    }

    fn queue_alert(&mut self, notice: Notice) {
        self.pending_alerts.push_back(notice);
        self.show_next_alert();
    }

    /// Surface the next blocking notice once nothing else is on top.
    pub fn show_next_alert(&mut self) {
        if self.overlay == Overlay::None {
            if let Some(next) = self.pending_alerts.pop_front() {
                self.overlay = Overlay::Alert(next);
            }
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.show_next_alert();
    }

    fn clamp_table_cursor(&mut self) {
        let rows = self.dashboard.render_state().table.rows.len();
        self.table_cursor = self.table_cursor.min(rows.saturating_sub(1));
    }

    /// Ask before deleting the position under the table cursor.
    pub fn request_delete(&mut self) {
        let target = self
            .dashboard
            .render_state()
            .table
            .delete_target(self.table_cursor)
            .map(str::to_string);
        match target {
            Some(ticker) => self.overlay = Overlay::Confirm(self.dashboard.confirm_delete(&ticker)),
            None => self.set_warning("No position selected"),
        }
    }

    pub fn request_clear(&mut self) {
        self.overlay = Overlay::Confirm(self.dashboard.confirm_clear());
    }

    /// Answer the open confirmation; only "yes" sends anything.
    pub fn answer_confirm(&mut self, yes: bool) {
        if let Overlay::Confirm(pending) = std::mem::replace(&mut self.overlay, Overlay::None) {
            if let Some(command) = pending.resolve(&mut |_: &str| yes) {
                self.send(command);
            }
        }
        self.show_next_alert();
    }

    pub fn submit_form(&mut self) {
        let position = self.form.take();
        let command = self.dashboard.submit_form(position);
        self.send(command);
        self.close_overlay();
    }

    /// Request history for the ticker under the selector cursor.
    pub fn select_history_ticker(&mut self) {
        let selected = self
            .dashboard
            .render_state()
            .selector
            .selected()
            .map(str::to_string);
        if let Some(ticker) = selected {
            let command = self.dashboard.select_ticker(&ticker);
            self.send(command);
        }
    }

    pub fn move_selector(&mut self, delta: isize) {
        let selector = &mut self.dashboard.render_state_mut().selector;
        let next = selector.cursor().saturating_add_signed(delta);
        selector.set_cursor(next);
    }

    fn record_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        self.record_error(category, message.clone(), context);
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use folio_core::controller::execute;
    use folio_core::api::memory::MemoryApi;
    use folio_core::PortfolioApi;
    use std::sync::mpsc;

    /// App wired to plain channels; `drain` runs queued commands inline.
    pub(crate) struct Harness {
        pub app: AppState,
        pub api: MemoryApi,
        cmd_rx: Receiver<WorkerCommand>,
        resp_tx: Sender<WorkerResponse>,
    }

    impl Harness {
        pub(crate) fn new() -> Self {
            let (cmd_tx, cmd_rx) = mpsc::channel();
            let (resp_tx, resp_rx) = mpsc::channel();
            Self {
                app: AppState::new(Dashboard::new(30), "memory", cmd_tx, resp_rx),
                api: MemoryApi::new(3),
                cmd_rx,
                resp_tx,
            }
        }

        /// Execute everything queued so far and feed the outcomes back.
        pub(crate) fn drain(&mut self) {
            while let Ok(WorkerCommand::Run(command)) = self.cmd_rx.try_recv() {
                let label = command.label();
                let outcome = execute(&self.api as &dyn PortfolioApi, command);
                self.resp_tx
                    .send(WorkerResponse::Finished { label, outcome })
                    .unwrap();
            }
            while let Ok(resp) = self.app.worker_rx.try_recv() {
                self.app.handle_worker_response(resp);
            }
        }
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Overview.next(), Panel::Positions);
        assert_eq!(Panel::Help.next(), Panel::Overview);
        assert_eq!(Panel::Overview.prev(), Panel::Help);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..5 {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(5).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut h = Harness::new();
        for i in 0..60 {
            h.app
                .push_error(ErrorCategory::Write, format!("error {i}"), String::new());
        }
        assert_eq!(h.app.error_history.len(), 50);
        assert!(h.app.error_history[0].message.contains("59"));
    }

    #[test]
    fn form_submit_resets_and_sends() {
        let mut h = Harness::new();
        h.app.overlay = Overlay::AddForm;
        for c in "AAPL".chars() {
            h.app.form.push(c);
        }
        h.app.form.focus_next();
        h.app.form.push('5');
        h.app.form.focus_next();
        h.app.form.push('1');
        h.app.form.focus_next();
        h.app.form.push('2');

        h.app.submit_form();
        assert_eq!(h.app.form, AddForm::default());
        assert_eq!(h.app.in_flight, 1);

        h.drain();
        assert_eq!(h.app.in_flight, 0);
        assert_eq!(h.api.position_count(), 1);
        assert_eq!(
            h.app.overlay,
            Overlay::Alert(Notice::info("✓ AAPL added successfully!"))
        );
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let mut h = Harness::new();
        h.app.send(Command::AddPosition(NewPosition::new("MSFT", "1", "1", "1")));
        h.drain();
        h.app.close_overlay();

        h.app.request_delete();
        assert!(matches!(h.app.overlay, Overlay::Confirm(_)));
        h.app.answer_confirm(false);
        assert_eq!(h.app.overlay, Overlay::None);
        assert_eq!(h.app.in_flight, 0);
        h.drain();
        assert_eq!(h.api.position_count(), 1);
    }

    #[test]
    fn accepted_clear_empties_backend() {
        let mut h = Harness::new();
        h.app.send(Command::LoadSampleData);
        h.drain();
        h.app.close_overlay();
        assert_eq!(h.api.position_count(), 5);

        h.app.request_clear();
        h.app.answer_confirm(true);
        h.drain();
        assert_eq!(h.api.position_count(), 0);
        assert!(h.app.render().table.is_placeholder());
    }

    #[test]
    fn read_failure_is_passive() {
        let mut h = Harness::new();
        h.api.set_unreachable(true);
        h.app.start();
        h.drain();
        assert_eq!(h.app.overlay, Overlay::None);
        assert_eq!(h.app.error_history.len(), 2);
        assert_eq!(h.app.error_history[0].category, ErrorCategory::Read);
        assert!(matches!(h.app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn alerts_queue_behind_open_overlay() {
        let mut h = Harness::new();
        h.app.overlay = Overlay::ErrorHistory;
        h.app.send(Command::LoadSampleData);
        h.drain();
        assert_eq!(h.app.overlay, Overlay::ErrorHistory);
        h.app.close_overlay();
        assert_eq!(
            h.app.overlay,
            Overlay::Alert(Notice::info("✓ Sample data loaded!"))
        );
    }

    #[test]
    fn selector_enter_requests_history() {
        let mut h = Harness::new();
        h.app.send(Command::LoadSampleData);
        h.drain();

        // Prompt selected: nothing to load.
        h.app.select_history_ticker();
        assert_eq!(h.app.in_flight, 0);

        h.app.move_selector(2);
        h.app.select_history_ticker();
        h.drain();
        let chart = h.app.render().charts.historical.get().unwrap();
        assert_eq!(chart.ticker, "GOOGL");
    }

    #[test]
    fn table_cursor_clamped_after_reload() {
        let mut h = Harness::new();
        h.app.send(Command::LoadSampleData);
        h.drain();
        h.app.table_cursor = 4;

        h.app.send(Command::DeletePosition { ticker: "TSLA".into() });
        h.drain();
        assert_eq!(h.app.table_cursor, 3);
    }
}
