//! Geocoding collaborator client (Nominatim HTTP API).

use serde::Deserialize;
use tracing::debug;

use greenpath_core::geocode::GeocodedPlace;

use crate::error::ApiError;

#[derive(Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl SearchResult {
    fn into_place(self) -> Option<GeocodedPlace> {
        Some(GeocodedPlace {
            lat: self.lat.parse().ok()?,
            lon: self.lon.parse().ok()?,
            display_name: self.display_name,
        })
    }
}

#[derive(Deserialize)]
struct ReverseResult {
    display_name: Option<String>,
}

#[derive(Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Free-text search; empty result vector means no match (not an error).
    pub async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodedPlace>, ApiError> {
        debug!(query, "geocoding");
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", &limit.to_string()),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                service: "geocoding",
                status: response.status().as_u16(),
            });
        }

        let results: Vec<SearchResult> = response.json().await?;
        Ok(results
            .into_iter()
            .filter_map(SearchResult::into_place)
            .collect())
    }

    /// Reverse geocode a point to a human-readable name.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "json"),
                ("lat", &lat.to_string()),
                ("lon", &lon.to_string()),
                ("zoom", &"18".to_string()),
                ("addressdetails", &"1".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                service: "geocoding",
                status: response.status().as_u16(),
            });
        }

        let result: ReverseResult = response.json().await?;
        Ok(result.display_name)
    }

    /// Viewbox-bounded point-of-interest search around a location.
    pub async fn nearby(
        &self,
        category: &str,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodedPlace>, ApiError> {
        const HALF_BOX_DEG: f64 = 0.1;

        let viewbox = format!(
            "{},{},{},{}",
            lon - HALF_BOX_DEG,
            lat - HALF_BOX_DEG,
            lon + HALF_BOX_DEG,
            lat + HALF_BOX_DEG
        );
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("format", "json"),
                ("q", category),
                ("limit", "8"),
                ("addressdetails", "1"),
                ("bounded", "1"),
                ("viewbox", &viewbox),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                service: "geocoding",
                status: response.status().as_u16(),
            });
        }

        let results: Vec<SearchResult> = response.json().await?;
        Ok(results
            .into_iter()
            .filter_map(SearchResult::into_place)
            .collect())
    }
}
