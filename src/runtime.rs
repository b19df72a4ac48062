//! Wires the worker tasks to their channels.

use crate::backend::BackendApi;
use crate::consts::cli_consts::COMMAND_QUEUE_SIZE;
use crate::events::Event;
use crate::workers::core::EventSender;
use crate::workers::{
    ExportCommand, Outcome, SearchCommand, branch_loader::start_branch_loader,
    exporter::start_export_worker, search::start_search_worker,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Command senders plus the worker join handles.
pub struct WorkerHandles {
    pub search_sender: mpsc::Sender<SearchCommand>,
    pub export_sender: mpsc::Sender<ExportCommand>,
    pub join_handles: Vec<JoinHandle<()>>,
}

/// Starts the branch loader, the search worker and the export worker.
pub fn start_dashboard_workers(
    backend: Arc<dyn BackendApi>,
    event_sender: mpsc::Sender<Event>,
    outcome_sender: mpsc::Sender<Outcome>,
    shutdown_sender: &broadcast::Sender<()>,
) -> WorkerHandles {
    let event_sender = EventSender::new(event_sender);
    let (search_sender, search_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
    let (export_sender, export_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);

    let join_handles = vec![
        start_branch_loader(
            backend.clone(),
            event_sender.clone(),
            outcome_sender.clone(),
            shutdown_sender.subscribe(),
        ),
        start_search_worker(
            backend.clone(),
            search_rx,
            event_sender.clone(),
            outcome_sender.clone(),
            shutdown_sender.subscribe(),
        ),
        start_export_worker(
            backend,
            export_rx,
            event_sender,
            outcome_sender,
            shutdown_sender.subscribe(),
        ),
    ];

    WorkerHandles {
        search_sender,
        export_sender,
        join_handles,
    }
}
