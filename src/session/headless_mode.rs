//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::pretty::print_cmd_info;
use crate::stats::BranchMetrics;
use crate::workers::Outcome;
use std::error::Error;

/// Runs the application in headless mode
///
/// Streams worker events to the console until Ctrl+C. Useful for checking
/// backend connectivity without a terminal UI.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Event loop: log events and outcome summaries to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                println!("{}", event);
            }
            Some(outcome) = session.outcome_receiver.recv() => {
                if let Outcome::Branches(Ok(branches)) = outcome {
                    let metrics = BranchMetrics::compute(&branches);
                    print_cmd_info!(
                        "Branch network",
                        "{} branches across {} cities, latitude span {}",
                        metrics.total,
                        metrics.distinct_cities,
                        metrics.format_latitude_span()
                    );
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
