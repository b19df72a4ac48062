pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum event buffer size for worker tasks.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum buffered search/export commands from the UI to the workers.
    pub const COMMAND_QUEUE_SIZE: usize = 8;

    // =============================================================================
    // SEARCH CONFIGURATION
    // =============================================================================

    /// Default number of POI results requested per search.
    pub const DEFAULT_MAX_RESULTS: u32 = 20;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        /// Connect timeout for backend requests.
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Overall request timeout. The POI search proxies a slow upstream
        /// scraper, so this is deliberately generous.
        pub const REQUEST_TIMEOUT_SECS: u64 = 30;

        pub fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        /// How long the splash screen is shown before the dashboard appears.
        pub const SPLASH_DURATION_MS: u64 = 1500;

        /// Key-event poll interval for the draw loop.
        pub const POLL_INTERVAL_MS: u64 = 100;
    }

    // =============================================================================
    // MAP CONFIGURATION
    // =============================================================================

    pub mod map {
        /// Fraction of the data bounding box added as viewport padding.
        pub const PADDING_FRACTION: f64 = 0.10;

        /// Minimum span in degrees, so a single point still gets a viewport.
        pub const MIN_SPAN_DEG: f64 = 0.01;
    }
}
