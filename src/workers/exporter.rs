//! Export worker
//!
//! Runs export requests off the UI loop and writes the returned payload to
//! the export directory.

use super::core::EventSender;
use super::{ExportCommand, Outcome};
use crate::backend::BackendApi;
use crate::events::EventType;
use crate::export;
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

pub fn start_export_worker(
    backend: Arc<dyn BackendApi>,
    mut command_rx: mpsc::Receiver<ExportCommand>,
    event_sender: EventSender,
    outcome_sender: mpsc::Sender<Outcome>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                command = command_rx.recv() => {
                    match command {
                        Some(command) => {
                            handle_command(&*backend, command, &event_sender, &outcome_sender)
                                .await;
                        }
                        None => break,
                    }
                }
            }
        }
    })
}

async fn handle_command(
    backend: &dyn BackendApi,
    command: ExportCommand,
    event_sender: &EventSender,
    outcome_sender: &mpsc::Sender<Outcome>,
) {
    let ExportCommand { format, pois, dir } = command;

    event_sender
        .send_export_event(
            format!("Exporting {} results as {}...", pois.len(), format),
            EventType::Refresh,
            LogLevel::Info,
        )
        .await;

    let result = export::run_export(backend, format, &pois, &dir).await;
    match &result {
        Ok(path) => {
            event_sender
                .send_export_event(
                    format!("Export written to {}", path.display()),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        }
        Err(error) => {
            event_sender
                .send_export_event(
                    format!("Export failed: {}", error),
                    EventType::Error,
                    LogLevel::Error,
                )
                .await;
        }
    }

    let _ = outcome_sender.send(Outcome::Export { format, result }).await;
}
