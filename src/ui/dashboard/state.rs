//! Dashboard state management
//!
//! Single owner of all client-side state. Renderers read it; every
//! mutation goes through an explicit method here or in `updaters`.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventType};
use crate::export::ExportFormat;
use crate::logging::LogLevel;
use crate::models::{Branch, Poi, SearchHistoryEntry};
use crate::ui::app::UIConfig;
use crate::ui::dashboard::form::SearchForm;
use crate::workers::{ExportCommand, SearchCommand};

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// The dashboard's tab strip, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Tab {
    Overview,
    Search,
    Results,
    Charts,
    History,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Search,
        Tab::Results,
        Tab::Charts,
        Tab::History,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Book-keeping for the search currently on the wire.
#[derive(Debug)]
struct InFlightSearch {
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The environment the dashboard is connected to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
    /// Branch list, loaded once at startup.
    pub branches: Vec<Branch>,
    /// Whether the initial branch load has completed (successfully or not).
    pub branches_loaded: bool,
    /// Current POI result set; replaced wholesale on each successful search.
    pub poi_results: Vec<Poi>,
    /// Append-only search history, oldest first.
    pub search_history: Vec<SearchHistoryEntry>,
    /// The tab currently shown.
    pub active_tab: Tab,
    /// Search form state.
    pub form: SearchForm,
    /// Selected row in the branch table / overview map.
    pub branch_cursor: usize,
    /// Selected row in the results table / POI map.
    pub result_cursor: usize,
    /// Queue of events waiting to be processed.
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display.
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter.
    pub tick: usize,
    /// Whether to enable background colors.
    pub with_background_color: bool,
    /// Path of the most recent successful export, if any.
    pub last_export: Option<PathBuf>,

    /// Monotonic counter; only a response carrying the current value is
    /// applied, so a slow stale search can never overwrite a newer one.
    search_generation: u64,
    in_flight_search: Option<InFlightSearch>,
    export_in_flight: Option<ExportFormat>,
}

impl DashboardState {
    pub fn new(ui_config: &UIConfig, start_time: Instant) -> Self {
        Self {
            environment: ui_config.environment,
            start_time,
            export_dir: ui_config.export_dir.clone(),
            branches: Vec::new(),
            branches_loaded: false,
            poi_results: Vec::new(),
            search_history: Vec::new(),
            active_tab: Tab::Overview,
            form: SearchForm::new(ui_config.max_results),
            branch_cursor: 0,
            result_cursor: 0,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            with_background_color: ui_config.with_background_color,
            last_export: None,
            search_generation: 0,
            in_flight_search: None,
            export_in_flight: None,
        }
    }

    pub fn search_generation(&self) -> u64 {
        self.search_generation
    }

    pub fn search_in_flight(&self) -> bool {
        self.in_flight_search.is_some()
    }

    pub fn export_in_flight(&self) -> Option<ExportFormat> {
        self.export_in_flight
    }

    pub fn branch_names(&self) -> Vec<String> {
        self.branches.iter().map(|b| b.name.clone()).collect()
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    /// Move the selection cursor of the active tab.
    pub fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.active_tab {
            Tab::Overview => (&mut self.branch_cursor, self.branches.len()),
            Tab::Results => (&mut self.result_cursor, self.poi_results.len()),
            _ => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let max = len - 1;
        *cursor = cursor.saturating_add_signed(delta).min(max);
    }

    /// Empty the POI result set; derived views revert to their empty state.
    pub fn clear_results(&mut self) {
        self.poi_results.clear();
        self.result_cursor = 0;
        self.add_event(WorkerEvent::search_with_level(
            "Results cleared".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        ));
    }

    /// Validate the form and produce a search command, or log why not.
    /// A blank query never produces a command, so it never touches the
    /// network. Issuing a new command cancels the previous in-flight one.
    pub fn begin_search(&mut self) -> Option<SearchCommand> {
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(error) => {
                self.add_event(WorkerEvent::search_with_level(
                    error.to_string(),
                    EventType::Error,
                    LogLevel::Error,
                ));
                return None;
            }
        };

        if let Some(previous) = self.in_flight_search.take() {
            previous.cancel.cancel();
        }

        self.search_generation += 1;
        let cancel = CancellationToken::new();
        self.in_flight_search = Some(InFlightSearch {
            generation: self.search_generation,
            cancel: cancel.clone(),
        });

        Some(SearchCommand {
            generation: self.search_generation,
            location: self.form.location_descriptor(),
            request,
            cancel,
        })
    }

    /// Produce an export command, or log why not. An empty result set never
    /// produces a command.
    pub fn begin_export(&mut self, format: ExportFormat) -> Option<ExportCommand> {
        if self.poi_results.is_empty() {
            self.add_event(WorkerEvent::exporter_with_level(
                "No results to export".to_string(),
                EventType::Error,
                LogLevel::Error,
            ));
            return None;
        }

        self.export_in_flight = Some(format);
        Some(ExportCommand {
            format,
            pois: self.poi_results.clone(),
            dir: self.export_dir.clone(),
        })
    }

    pub(crate) fn finish_search(&mut self) {
        self.in_flight_search = None;
    }

    pub(crate) fn finish_export(&mut self) {
        self.export_in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> DashboardState {
        let ui_config = UIConfig {
            with_background_color: false,
            environment: Environment::Local,
            max_results: 20,
            export_dir: PathBuf::from("."),
        };
        DashboardState::new(&ui_config, Instant::now())
    }

    #[test]
    fn test_blank_query_produces_no_command() {
        let mut state = test_state();
        state.form.query = "   ".to_string();
        assert!(state.begin_search().is_none());

        // The rejection was logged as an error event.
        assert!(
            state
                .pending_events
                .iter()
                .any(|e| e.event_type == EventType::Error)
        );
    }

    #[test]
    fn test_search_bumps_generation_and_cancels_previous() {
        let mut state = test_state();
        state.form.query = "pharmacy".to_string();

        let first = state.begin_search().expect("first command");
        assert_eq!(first.generation, 1);
        assert!(!first.cancel.is_cancelled());

        let second = state.begin_search().expect("second command");
        assert_eq!(second.generation, 2);
        assert!(first.cancel.is_cancelled());
        assert!(!second.cancel.is_cancelled());
    }

    #[test]
    fn test_empty_results_produce_no_export_command() {
        let mut state = test_state();
        assert!(state.begin_export(ExportFormat::Csv).is_none());
        assert!(
            state
                .pending_events
                .iter()
                .any(|e| e.event_type == EventType::Error)
        );
    }

    #[test]
    fn test_export_snapshot_carries_current_results() {
        let mut state = test_state();
        state.poi_results = vec![Poi {
            name: "Cafe Blue".to_string(),
            ..Poi::default()
        }];
        let command = state.begin_export(ExportFormat::Json).expect("command");
        assert_eq!(command.pois.len(), 1);
        assert_eq!(state.export_in_flight(), Some(ExportFormat::Json));
    }

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::History.next(), Tab::Overview);
        assert_eq!(Tab::Overview.prev(), Tab::History);
        assert_eq!(Tab::from_index(2), Some(Tab::Results));
        assert_eq!(Tab::from_index(9), None);
    }

    #[test]
    fn test_cursor_clamps_to_list() {
        let mut state = test_state();
        state.poi_results = vec![Poi::default(), Poi::default()];
        state.active_tab = Tab::Results;
        state.move_cursor(5);
        assert_eq!(state.result_cursor, 1);
        state.move_cursor(-5);
        assert_eq!(state.result_cursor, 0);
    }

    #[test]
    fn test_clear_results_empties_derived_state() {
        let mut state = test_state();
        state.poi_results = vec![Poi::default()];
        state.result_cursor = 0;
        state.clear_results();
        assert!(state.poi_results.is_empty());
    }
}
