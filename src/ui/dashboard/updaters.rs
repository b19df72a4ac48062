//! Dashboard state update logic
//!
//! Applies worker outcomes and queued events to the state.

use super::state::{DashboardState, Tab};
use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::models::SearchHistoryEntry;
use crate::workers::Outcome;
use chrono::Local;

impl DashboardState {
    /// Advance one frame: bump the animation tick and fold queued events
    /// into the activity log.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    /// Apply a worker outcome. Failed and stale outcomes never touch the
    /// data they failed to replace.
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Branches(Ok(branches)) => {
                self.branches = branches;
                self.branches_loaded = true;
                self.branch_cursor = 0;
                self.form.branch_cursor = 0;
            }
            Outcome::Branches(Err(_)) => {
                // The loader already logged the error; the dashboard keeps
                // showing zero branches and zero metrics.
                self.branches_loaded = true;
            }
            Outcome::Search {
                generation,
                query,
                location,
                result,
            } => {
                if generation != self.search_generation() {
                    self.add_event(WorkerEvent::search_with_level(
                        format!("Discarded stale response for '{}'", query),
                        EventType::Waiting,
                        LogLevel::Debug,
                    ));
                    return;
                }
                self.finish_search();

                match result {
                    Ok(response) => {
                        self.poi_results = response.data;
                        self.result_cursor = 0;
                        self.search_history.push(SearchHistoryEntry {
                            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                            query,
                            location,
                            result_count: response.count,
                        });
                        self.switch_tab(Tab::Results);
                    }
                    Err(_) => {
                        // Prior results stay on screen; the worker already
                        // logged the failure.
                    }
                }
            }
            Outcome::Export { result, .. } => {
                self.finish_export();
                if let Ok(path) = result {
                    self.last_export = Some(path);
                }
            }
        }
    }
}
