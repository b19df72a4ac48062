//! One-shot branch list loading

use super::Outcome;
use super::core::EventSender;
use crate::backend::BackendApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Fetches the branch list once at startup. A failure leaves the dashboard
/// with zero branches; there is no retry.
pub fn start_branch_loader(
    backend: Arc<dyn BackendApi>,
    event_sender: EventSender,
    outcome_sender: mpsc::Sender<Outcome>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        event_sender
            .send_branch_event(
                "Loading branch list...".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            )
            .await;

        tokio::select! {
            _ = shutdown_rx.recv() => {}
            result = backend.get_branches() => {
                match &result {
                    Ok(branches) => {
                        event_sender
                            .send_branch_event(
                                format!("Loaded {} branches", branches.len()),
                                EventType::Success,
                                LogLevel::Info,
                            )
                            .await;
                    }
                    Err(error) => {
                        let level = ErrorClassifier::new().classify_backend_error(error);
                        event_sender
                            .send_branch_event(
                                format!("Branch load failed: {}", error),
                                EventType::Error,
                                level,
                            )
                            .await;
                    }
                }
                let _ = outcome_sender.send(Outcome::Branches(result)).await;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendApi;
    use crate::backend::error::BackendError;
    use crate::consts::cli_consts::EVENT_QUEUE_SIZE;

    fn channels() -> (
        EventSender,
        mpsc::Receiver<crate::events::Event>,
        mpsc::Sender<Outcome>,
        mpsc::Receiver<Outcome>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (outcome_tx, outcome_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        (EventSender::new(event_tx), event_rx, outcome_tx, outcome_rx)
    }

    #[tokio::test]
    async fn test_successful_load_delivers_branches() {
        let mut backend = MockBackendApi::new();
        backend.expect_get_branches().returning(|| Ok(vec![]));

        let (event_sender, _event_rx, outcome_tx, mut outcome_rx) = channels();
        let (shutdown_tx, _) = broadcast::channel(1);
        let handle = start_branch_loader(
            Arc::new(backend),
            event_sender,
            outcome_tx,
            shutdown_tx.subscribe(),
        );
        handle.await.unwrap();

        match outcome_rx.recv().await {
            Some(Outcome::Branches(Ok(branches))) => assert!(branches.is_empty()),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_load_delivers_error_outcome() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_get_branches()
            .returning(|| Err(BackendError::Api("boom".to_string())));

        let (event_sender, mut event_rx, outcome_tx, mut outcome_rx) = channels();
        let (shutdown_tx, _) = broadcast::channel(1);
        let handle = start_branch_loader(
            Arc::new(backend),
            event_sender,
            outcome_tx,
            shutdown_tx.subscribe(),
        );
        handle.await.unwrap();

        assert!(matches!(
            outcome_rx.recv().await,
            Some(Outcome::Branches(Err(_)))
        ));

        // A progress event and an error event were logged.
        let mut saw_error = false;
        while let Ok(event) = event_rx.try_recv() {
            if event.event_type == EventType::Error {
                saw_error = true;
            }
        }
        assert!(saw_error);
    }
}
