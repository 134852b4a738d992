//! Background worker thread: every backend call runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Commands are
//! processed strictly one at a time in arrival order, so the steps of a write
//! and its reload never interleave with another command's.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use folio_core::controller::{execute, Command, Outcome};
use folio_core::PortfolioApi;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Run(Command),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Finished { label: &'static str, outcome: Outcome },
}

/// Spawn the background worker thread that owns the backend.
pub fn spawn_worker(
    api: Box<dyn PortfolioApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("folio-worker".into())
        .spawn(move || worker_loop(api.as_ref(), rx, tx))
}

fn worker_loop(api: &dyn PortfolioApi, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    log::info!("worker started against {} backend", api.name());
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Run(command)) => {
                let label = command.label();
                log::debug!("worker: {label}");
                let outcome = execute(api, command);
                if tx.send(WorkerResponse::Finished { label, outcome }).is_err() {
                    // UI has gone away.
                    break;
                }
            }
        }
    }
    log::info!("worker stopped");
}
