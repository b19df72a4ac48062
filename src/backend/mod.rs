use crate::environment::Environment;
use crate::export::{ExportFormat, ExportPayload};
use crate::models::{Branch, Poi, SearchRequest, SearchResponse};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

use error::BackendError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the full branch list.
    async fn get_branches(&self) -> Result<Vec<Branch>, BackendError>;

    /// Run a POI search. A 2xx response with `success:false` is returned
    /// as `BackendError::Api`.
    async fn search_poi(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError>;

    /// Export a POI result set in the given format.
    async fn export(
        &self,
        format: ExportFormat,
        pois: &[Poi],
    ) -> Result<ExportPayload, BackendError>;
}
