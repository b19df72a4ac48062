//! Export adapter: format-specific payload handling and file output.
//!
//! The backend does the actual serialization; this module unwraps the
//! response per format and writes it to a fixed filename in the export
//! directory (the terminal equivalent of the browser download).

use crate::backend::BackendApi;
use crate::backend::error::BackendError;
use crate::models::Poi;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Copy, Clone, Eq, PartialEq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    /// Value of the `format` query parameter on the export endpoint.
    pub fn query_param(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
        }
    }

    /// Fixed output filename per format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "poi_results.csv",
            ExportFormat::Json => "poi_results.json",
            ExportFormat::Excel => "poi_results.xlsx",
        }
    }
}

/// What the export endpoint handed back, already unwrapped per format.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPayload {
    /// CSV text, extracted from the JSON wrapper.
    Csv(String),
    /// The echoed JSON document.
    Json(serde_json::Value),
    /// Opaque spreadsheet bytes.
    Excel(Vec<u8>),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export request failed: {0}")]
    Backend(#[from] BackendError),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Write a payload to `dir`, creating the directory if needed.
/// Returns the path of the written file.
pub fn write_payload(
    payload: &ExportPayload,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name());
    match payload {
        ExportPayload::Csv(text) => fs::write(&path, text)?,
        ExportPayload::Json(value) => {
            let pretty = serde_json::to_string_pretty(value).map_err(BackendError::Decode)?;
            fs::write(&path, pretty)?;
        }
        ExportPayload::Excel(bytes) => fs::write(&path, bytes)?,
    }
    Ok(path)
}

/// Request an export from the backend and write it out.
pub async fn run_export(
    backend: &dyn BackendApi,
    format: ExportFormat,
    pois: &[Poi],
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let payload = backend.export(format, pois).await?;
    write_payload(&payload, format, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendApi;
    use serde_json::json;

    #[test]
    fn test_file_names_are_fixed_per_format() {
        assert_eq!(ExportFormat::Csv.file_name(), "poi_results.csv");
        assert_eq!(ExportFormat::Json.file_name(), "poi_results.json");
        assert_eq!(ExportFormat::Excel.file_name(), "poi_results.xlsx");
    }

    #[test]
    fn test_write_csv_payload() {
        let dir = tempfile::tempdir().unwrap();
        let payload = ExportPayload::Csv("name,rating\nCafe Blue,4.5\n".to_string());
        let path = write_payload(&payload, ExportFormat::Csv, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "poi_results.csv");
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Cafe Blue"));
    }

    #[test]
    fn test_write_json_payload_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let payload = ExportPayload::Json(json!([{"name": "Cafe Blue"}]));
        let path = write_payload(&payload, ExportFormat::Json, dir.path()).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Cafe Blue"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert!(parsed.is_array());
    }

    #[test]
    fn test_write_excel_payload_is_byte_exact() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = vec![0x50, 0x4b, 0x03, 0x04, 0x00];
        let payload = ExportPayload::Excel(bytes.clone());
        let path = write_payload(&payload, ExportFormat::Excel, dir.path()).unwrap();

        assert_eq!(std::fs::read(path).unwrap(), bytes);
    }

    #[test]
    fn test_write_payload_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let payload = ExportPayload::Csv("a,b\n".to_string());
        let path = write_payload(&payload, ExportFormat::Csv, &nested).unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_run_export_writes_backend_payload() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = MockBackendApi::new();
        backend
            .expect_export()
            .returning(|_, _| Ok(ExportPayload::Csv("name\nCafe Blue\n".to_string())));

        let pois = vec![Poi {
            name: "Cafe Blue".to_string(),
            ..Poi::default()
        }];
        let path = run_export(&backend, ExportFormat::Csv, &pois, dir.path())
            .await
            .unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_run_export_propagates_backend_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = MockBackendApi::new();
        backend
            .expect_export()
            .returning(|_, _| Err(BackendError::Api("export failed".to_string())));

        let result = run_export(&backend, ExportFormat::Json, &[], dir.path()).await;
        assert!(matches!(result, Err(ExportError::Backend(_))));
    }
}
