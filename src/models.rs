//! Wire types shared between the backend client, the workers and the UI.

use serde::{Deserialize, Serialize};

/// A bank branch record. Loaded wholesale from the backend at startup and
/// immutable for the rest of the session. The backend serves PascalCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "Branch")]
    pub name: String,
    #[serde(rename = "IFSC_Code", default)]
    pub ifsc_code: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// A point of interest returned by the search backend. The upstream scraper
/// omits fields freely, so everything beyond the name is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Poi {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Poi {
    /// The first category entry, or "Unknown" when the backend sent none.
    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("Unknown")
    }

    /// Prefers the full address over the short one.
    pub fn display_address(&self) -> &str {
        self.full_address
            .as_deref()
            .or(self.address.as_deref())
            .unwrap_or("")
    }

    /// Coordinates, when the backend sent both.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Body of `POST /api/search-poi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub branches: Vec<String>,
    pub max_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Response envelope of `POST /api/search-poi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Poi>,
    #[serde(default)]
    pub count: usize,
}

/// One completed search, as shown on the History tab. Append-only; entries
/// are stored oldest-to-newest and rendered newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistoryEntry {
    pub timestamp: String,
    pub query: String,
    pub location: String,
    pub result_count: usize,
}
