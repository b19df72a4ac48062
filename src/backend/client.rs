//! Dashboard Backend Client
//!
//! A client for the branch/POI backend, covering branch listing, POI search
//! and result export.

use crate::backend::BackendApi;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::export::{ExportFormat, ExportPayload};
use crate::models::{Branch, Poi, SearchRequest, SearchResponse};
use reqwest::{Client, ClientBuilder, Response};

// User-Agent string with the dashboard version
const USER_AGENT: &str = concat!("branchscope/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json(&self, endpoint: &str) -> Result<serde_json::Value, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await?;

        Self::handle_response_status(response).await
    }

    /// Extract the CSV text out of the export endpoint's JSON wrapper.
    fn csv_from_wrapper(value: &serde_json::Value) -> Result<String, BackendError> {
        value
            .get("data")
            .and_then(|data| data.as_str())
            .map(str::to_string)
            .ok_or_else(|| BackendError::Api("export response missing CSV payload".to_string()))
    }
}

#[async_trait::async_trait]
impl BackendApi for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_branches(&self) -> Result<Vec<Branch>, BackendError> {
        let value = self.get_json("/api/branches").await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn search_poi(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        let response = self.post_json("/api/search-poi", request).await?;
        let bytes = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)?;

        if !parsed.success {
            return Err(BackendError::Api("search reported failure".to_string()));
        }
        Ok(parsed)
    }

    async fn export(
        &self,
        format: ExportFormat,
        pois: &[Poi],
    ) -> Result<ExportPayload, BackendError> {
        let endpoint = format!("/api/export?format={}", format.query_param());
        let response = self.post_json(&endpoint, pois).await?;

        match format {
            ExportFormat::Csv => {
                let bytes = response.bytes().await?;
                let wrapper: serde_json::Value = serde_json::from_slice(&bytes)?;
                Ok(ExportPayload::Csv(Self::csv_from_wrapper(&wrapper)?))
            }
            ExportFormat::Json => {
                let bytes = response.bytes().await?;
                Ok(ExportPayload::Json(serde_json::from_slice(&bytes)?))
            }
            ExportFormat::Excel => {
                let bytes = response.bytes().await?;
                Ok(ExportPayload::Excel(bytes.to_vec()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_url_joins_without_double_slash() {
        let client = BackendClient::new(Environment::Local);
        assert_eq!(
            client.build_url("/api/branches"),
            "http://localhost:8000/api/branches"
        );
        assert_eq!(
            client.build_url("api/branches"),
            "http://localhost:8000/api/branches"
        );
    }

    #[test]
    fn test_csv_from_wrapper_extracts_payload() {
        let wrapper = json!({"data": "name,rating\nCafe Blue,4.5\n"});
        let csv = BackendClient::csv_from_wrapper(&wrapper).unwrap();
        assert!(csv.starts_with("name,rating"));
    }

    #[test]
    fn test_csv_from_wrapper_rejects_missing_payload() {
        let wrapper = json!({"count": 3});
        assert!(matches!(
            BackendClient::csv_from_wrapper(&wrapper),
            Err(BackendError::Api(_))
        ));
    }
}
