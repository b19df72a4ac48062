//! Worker tasks bridging the UI to the backend, plus the message types
//! exchanged with them.

pub mod branch_loader;
pub mod core;
pub mod exporter;
pub mod search;

use crate::backend::error::BackendError;
use crate::export::{ExportError, ExportFormat};
use crate::models::{Branch, Poi, SearchRequest, SearchResponse};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// A search dispatched by the UI. Each command carries the generation it
/// was issued under and a token the UI cancels when a newer search
/// supersedes it.
#[derive(Debug, Clone)]
pub struct SearchCommand {
    pub generation: u64,
    pub request: SearchRequest,
    /// Human-readable location descriptor for history and log lines.
    pub location: String,
    pub cancel: CancellationToken,
}

/// An export dispatched by the UI with a snapshot of the current results.
#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub format: ExportFormat,
    pub pois: Vec<Poi>,
    pub dir: PathBuf,
}

/// Data flowing back from the workers to the dashboard state.
#[derive(Debug)]
pub enum Outcome {
    Branches(Result<Vec<Branch>, BackendError>),
    Search {
        generation: u64,
        query: String,
        location: String,
        result: Result<SearchResponse, BackendError>,
    },
    Export {
        format: ExportFormat,
        result: Result<PathBuf, ExportError>,
    },
}
