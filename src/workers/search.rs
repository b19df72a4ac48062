//! POI search worker
//!
//! Processes search commands from the UI one at a time. A command whose
//! cancellation token fires before the backend answers is dropped without
//! an outcome, so a superseded search can never clobber a newer one.

use super::core::EventSender;
use super::{Outcome, SearchCommand};
use crate::backend::BackendApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

pub fn start_search_worker(
    backend: Arc<dyn BackendApi>,
    mut command_rx: mpsc::Receiver<SearchCommand>,
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
    command: SearchCommand,
    event_sender: &EventSender,
    outcome_sender: &mpsc::Sender<Outcome>,
) {
    let SearchCommand {
        generation,
        request,
        location,
        cancel,
    } = command;

    // A command superseded while it sat in the queue never reaches the
    // backend at all.
    if cancel.is_cancelled() {
        event_sender
            .send_search_event(
                format!("Search '{}' superseded by a newer request", request.query),
                EventType::Waiting,
                LogLevel::Debug,
            )
            .await;
        return;
    }

    event_sender
        .send_search_event(
            format!("Searching for '{}' near {}...", request.query, location),
            EventType::Refresh,
            LogLevel::Info,
        )
        .await;

    tokio::select! {
        _ = cancel.cancelled() => {
            event_sender
                .send_search_event(
                    format!("Search '{}' superseded by a newer request", request.query),
                    EventType::Waiting,
                    LogLevel::Debug,
                )
                .await;
        }
        result = backend.search_poi(&request) => {
            match &result {
                Ok(response) => {
                    event_sender
                        .send_search_event(
                            format!("Found {} results for '{}'", response.count, request.query),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .await;
                }
                Err(error) => {
                    let level = ErrorClassifier::new().classify_backend_error(error);
                    event_sender
                        .send_search_event(
                            format!("Search failed: {}", error),
                            EventType::Error,
                            level,
                        )
                        .await;
                }
            }
            let _ = outcome_sender
                .send(Outcome::Search {
                    generation,
                    query: request.query,
                    location,
                    result,
                })
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendApi;
    use crate::backend::error::BackendError;
    use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE};
    use crate::models::{SearchRequest, SearchResponse};
    use tokio_util::sync::CancellationToken;

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            branches: vec![],
            max_results: 20,
            lat: None,
            lng: None,
        }
    }

    struct Harness {
        command_tx: mpsc::Sender<SearchCommand>,
        outcome_rx: mpsc::Receiver<Outcome>,
        shutdown_tx: broadcast::Sender<()>,
        handle: JoinHandle<()>,
    }

    fn spawn_worker(backend: MockBackendApi) -> Harness {
        let (event_tx, _event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (outcome_tx, outcome_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (shutdown_tx, _) = broadcast::channel(1);
        let handle = start_search_worker(
            Arc::new(backend),
            command_rx,
            EventSender::new(event_tx),
            outcome_tx,
            shutdown_tx.subscribe(),
        );
        Harness {
            command_tx,
            outcome_rx,
            shutdown_tx,
            handle,
        }
    }

    #[tokio::test]
    async fn test_successful_search_delivers_outcome_with_generation() {
        let mut backend = MockBackendApi::new();
        backend.expect_search_poi().returning(|_| {
            Ok(SearchResponse {
                success: true,
                data: vec![],
                count: 0,
            })
        });

        let mut harness = spawn_worker(backend);
        harness
            .command_tx
            .send(SearchCommand {
                generation: 7,
                request: request("pharmacy"),
                location: "All branches".to_string(),
                cancel: CancellationToken::new(),
            })
            .await
            .unwrap();

        match harness.outcome_rx.recv().await {
            Some(Outcome::Search {
                generation, query, ..
            }) => {
                assert_eq!(generation, 7);
                assert_eq!(query, "pharmacy");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let _ = harness.shutdown_tx.send(());
        harness.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_search_produces_no_outcome() {
        let mut backend = MockBackendApi::new();
        // The worker must not even reach the backend for a cancelled command.
        backend.expect_search_poi().never();

        let mut harness = spawn_worker(backend);
        let cancel = CancellationToken::new();
        cancel.cancel();
        harness
            .command_tx
            .send(SearchCommand {
                generation: 1,
                request: request("atm"),
                location: "All branches".to_string(),
                cancel,
            })
            .await
            .unwrap();

        let _ = harness.shutdown_tx.send(());
        harness.handle.await.unwrap();
        assert!(harness.outcome_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_search_delivers_error_outcome() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_search_poi()
            .returning(|_| Err(BackendError::Api("search reported failure".to_string())));

        let mut harness = spawn_worker(backend);
        harness
            .command_tx
            .send(SearchCommand {
                generation: 2,
                request: request("school"),
                location: "Koramangala".to_string(),
                cancel: CancellationToken::new(),
            })
            .await
            .unwrap();

        match harness.outcome_rx.recv().await {
            Some(Outcome::Search { result, .. }) => assert!(result.is_err()),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let _ = harness.shutdown_tx.send(());
        harness.handle.await.unwrap();
    }
}
