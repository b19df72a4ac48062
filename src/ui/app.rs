//! Main application state and UI loop
//!
//! Every key press is translated into an `Intent`, and `dispatch` turns
//! intents into state updates and worker commands. Keeping that pipeline
//! explicit makes ordering testable without a terminal.

use crate::consts::cli_consts::ui::{POLL_INTERVAL_MS, SPLASH_DURATION_MS};
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventType};
use crate::export::ExportFormat;
use crate::logging::LogLevel;
use crate::ui::dashboard::{DashboardState, Tab, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::{ExportCommand, Outcome, SearchCommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Frame, Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub environment: Environment,
    pub max_results: u32,
    pub export_dir: PathBuf,
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The dashboard itself.
    Dashboard,
}

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Quit,
    SwitchTab(Tab),
    NextTab,
    PrevTab,
    CursorUp,
    CursorDown,
    SubmitSearch,
    ClearResults,
    Export(ExportFormat),
    /// Any other key while the Search tab is active: routed to the form.
    FormKey(KeyEvent),
}

/// Translate a key press into an intent, given the active tab. On the
/// Search tab most keys belong to the form, so only Esc/Tab/Enter keep
/// their global meaning there.
pub fn intent_for_key(key: KeyEvent, active_tab: Tab) -> Option<Intent> {
    match key.code {
        KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Tab => Some(Intent::NextTab),
        KeyCode::BackTab => Some(Intent::PrevTab),
        KeyCode::Enter if active_tab == Tab::Search => Some(Intent::SubmitSearch),
        _ if active_tab == Tab::Search => Some(Intent::FormKey(key)),
        KeyCode::Char('q') => Some(Intent::Quit),
        KeyCode::Char(c @ '1'..='5') => {
            Tab::from_index(c as usize - '1' as usize).map(Intent::SwitchTab)
        }
        KeyCode::Up => Some(Intent::CursorUp),
        KeyCode::Down => Some(Intent::CursorDown),
        KeyCode::Char('c') => Some(Intent::ClearResults),
        KeyCode::Char('s') => Some(Intent::Export(ExportFormat::Csv)),
        KeyCode::Char('j') => Some(Intent::Export(ExportFormat::Json)),
        KeyCode::Char('x') => Some(Intent::Export(ExportFormat::Excel)),
        _ => None,
    }
}

/// Application state
pub struct App {
    /// All dashboard state; renderers read it, dispatch mutates it.
    pub state: DashboardState,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Receives data outcomes from worker tasks.
    outcome_receiver: mpsc::Receiver<Outcome>,

    /// Sends search commands to the search worker.
    search_sender: mpsc::Sender<SearchCommand>,

    /// Sends export commands to the export worker.
    export_sender: mpsc::Sender<ExportCommand>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        ui_config: &UIConfig,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        outcome_receiver: mpsc::Receiver<Outcome>,
        search_sender: mpsc::Sender<SearchCommand>,
        export_sender: mpsc::Sender<ExportCommand>,
        shutdown_sender: broadcast::Sender<()>,
    ) -> Self {
        Self {
            state: DashboardState::new(ui_config, Instant::now()),
            current_screen: Screen::Splash,
            event_receiver,
            outcome_receiver,
            search_sender,
            export_sender,
            shutdown_sender,
        }
    }

    /// Apply an intent. Returns true when the application should exit.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Quit => {
                let _ = self.shutdown_sender.send(());
                return true;
            }
            Intent::SwitchTab(tab) => self.state.switch_tab(tab),
            Intent::NextTab => self.state.next_tab(),
            Intent::PrevTab => self.state.prev_tab(),
            Intent::CursorUp => self.state.move_cursor(-1),
            Intent::CursorDown => self.state.move_cursor(1),
            Intent::SubmitSearch => {
                if let Some(command) = self.state.begin_search() {
                    let cancel = command.cancel.clone();
                    if self.search_sender.try_send(command).is_err() {
                        cancel.cancel();
                        self.state.finish_search();
                        self.state.add_event(WorkerEvent::search_with_level(
                            "Search queue is full, try again".to_string(),
                            EventType::Error,
                            LogLevel::Warn,
                        ));
                    }
                }
            }
            Intent::ClearResults => self.state.clear_results(),
            Intent::Export(format) => {
                if let Some(command) = self.state.begin_export(format) {
                    if self.export_sender.try_send(command).is_err() {
                        self.state.finish_export();
                        self.state.add_event(WorkerEvent::exporter_with_level(
                            "Export queue is full, try again".to_string(),
                            EventType::Error,
                            LogLevel::Warn,
                        ));
                    }
                }
            }
            Intent::FormKey(key) => {
                let branch_names = self.state.branch_names();
                self.state.form.handle_key(key, &branch_names);
            }
        }
        false
    }

    /// Drain worker channels into the state.
    fn drain_channels(&mut self) {
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            self.state.apply_outcome(outcome);
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.add_event(event);
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // UI event loop
    loop {
        // Fold incoming worker data and events into the state
        app.drain_channels();
        app.state.update();

        terminal.draw(|f| render(f, &app.current_screen, &app.state))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.current_screen = Screen::Dashboard;
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match &app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        // Any other key press skips the splash screen
                        app.current_screen = Screen::Dashboard;
                    }
                    Screen::Dashboard => {
                        if let Some(intent) = intent_for_key(key, app.state.active_tab) {
                            if app.dispatch(intent) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, state: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE};
    use crate::models::Poi;
    use crossterm::event::KeyModifiers;

    struct Channels {
        search_rx: mpsc::Receiver<SearchCommand>,
        export_rx: mpsc::Receiver<ExportCommand>,
    }

    fn test_app() -> (App, Channels) {
        let (_event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (_outcome_tx, outcome_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (search_tx, search_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (export_tx, export_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (shutdown_tx, _) = broadcast::channel(1);

        let ui_config = UIConfig {
            with_background_color: false,
            environment: Environment::Local,
            max_results: 20,
            export_dir: PathBuf::from("."),
        };
        let app = App::new(
            &ui_config,
            event_rx,
            outcome_rx,
            search_tx,
            export_tx,
            shutdown_tx,
        );
        (app, Channels {
            search_rx,
            export_rx,
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_blank_query_sends_no_search_command() {
        let (mut app, mut channels) = test_app();
        app.state.form.query = "   ".to_string();
        app.dispatch(Intent::SubmitSearch);
        assert!(channels.search_rx.try_recv().is_err());
    }

    #[test]
    fn test_valid_query_sends_search_command() {
        let (mut app, mut channels) = test_app();
        app.state.form.query = "pharmacy".to_string();
        app.dispatch(Intent::SubmitSearch);

        let command = channels.search_rx.try_recv().expect("command");
        assert_eq!(command.generation, 1);
        assert_eq!(command.request.query, "pharmacy");
    }

    #[test]
    fn test_empty_results_send_no_export_command() {
        let (mut app, mut channels) = test_app();
        app.dispatch(Intent::Export(ExportFormat::Csv));
        assert!(channels.export_rx.try_recv().is_err());
    }

    #[test]
    fn test_export_sends_snapshot() {
        let (mut app, mut channels) = test_app();
        app.state.poi_results = vec![Poi::default()];
        app.dispatch(Intent::Export(ExportFormat::Excel));

        let command = channels.export_rx.try_recv().expect("command");
        assert_eq!(command.format, ExportFormat::Excel);
        assert_eq!(command.pois.len(), 1);
    }

    #[test]
    fn test_quit_intent_exits() {
        let (mut app, _channels) = test_app();
        assert!(app.dispatch(Intent::Quit));
    }

    #[test]
    fn test_search_tab_keeps_chars_for_the_form() {
        // 'q' quits everywhere except while typing a query.
        assert_eq!(
            intent_for_key(key(KeyCode::Char('q')), Tab::Overview),
            Some(Intent::Quit)
        );
        assert_eq!(
            intent_for_key(key(KeyCode::Char('q')), Tab::Search),
            Some(Intent::FormKey(key(KeyCode::Char('q'))))
        );
        assert_eq!(
            intent_for_key(key(KeyCode::Esc), Tab::Search),
            Some(Intent::Quit)
        );
    }

    #[test]
    fn test_digit_keys_switch_tabs() {
        assert_eq!(
            intent_for_key(key(KeyCode::Char('3')), Tab::Overview),
            Some(Intent::SwitchTab(Tab::Results))
        );
        assert_eq!(intent_for_key(key(KeyCode::Char('9')), Tab::Overview), None);
    }

    #[test]
    fn test_form_key_types_into_query() {
        let (mut app, _channels) = test_app();
        app.state.switch_tab(Tab::Search);
        app.dispatch(Intent::FormKey(key(KeyCode::Char('a'))));
        app.dispatch(Intent::FormKey(key(KeyCode::Char('t'))));
        app.dispatch(Intent::FormKey(key(KeyCode::Char('m'))));
        assert_eq!(app.state.form.query, "atm");
    }
}
