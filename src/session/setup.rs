//! Session setup and initialization

use crate::backend::BackendClient;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::runtime::start_dashboard_workers;
use crate::workers::{ExportCommand, Outcome, SearchCommand};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Outcome receiver for worker data
    pub outcome_receiver: mpsc::Receiver<Outcome>,
    /// Sends search commands to the search worker
    pub search_sender: mpsc::Sender<SearchCommand>,
    /// Sends export commands to the export worker
    pub export_sender: mpsc::Sender<ExportCommand>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// The environment the session is connected to
    pub environment: Environment,
}

/// Sets up a dashboard session: channels, backend client and worker tasks.
/// The branch loader starts fetching immediately; search and export wait
/// for commands.
pub fn setup_session(environment: Environment) -> SessionData {
    let backend = Arc::new(BackendClient::new(environment));

    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (outcome_sender, outcome_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let handles =
        start_dashboard_workers(backend, event_sender, outcome_sender, &shutdown_sender);

    SessionData {
        event_receiver,
        outcome_receiver,
        search_sender: handles.search_sender,
        export_sender: handles.export_sender,
        join_handles: handles.join_handles,
        shutdown_sender,
        environment,
    }
}
