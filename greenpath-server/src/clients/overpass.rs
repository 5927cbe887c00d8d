//! Safety-point collaborator client (Overpass HTTP API).
//!
//! This lookup is best-effort: callers merge whatever it returns over the
//! deterministic fallback pins, and treat any failure as an empty result.

use serde::Deserialize;
use tracing::debug;

use greenpath_core::safety::{SafetyCategory, SafetyPin};

use crate::error::ApiError;

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    lat: f64,
    lon: f64,
    #[serde(default)]
    tags: OverpassTags,
}

#[derive(Deserialize, Default)]
struct OverpassTags {
    amenity: Option<String>,
    name: Option<String>,
}

#[derive(Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    interpreter_url: String,
}

impl OverpassClient {
    pub fn new(http: reqwest::Client, interpreter_url: String) -> Self {
        Self {
            http,
            interpreter_url,
        }
    }

    /// Looks up police stations and hospitals within 2 km. A single short
    /// query with a tight limit, to stay under the public timeout.
    pub async fn safety_points(&self, lat: f64, lon: f64) -> Result<Vec<SafetyPin>, ApiError> {
        const RADIUS_M: u32 = 2000;

        let query = format!(
            "[out:json][timeout:10];(\
             node[\"amenity\"=\"police\"](around:{RADIUS_M},{lat},{lon});\
             node[\"amenity\"=\"hospital\"](around:{RADIUS_M},{lat},{lon});\
             );out body 10;"
        );
        debug!(lat, lon, "fetching safety points");

        let response = self
            .http
            .post(&self.interpreter_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                service: "safety",
                status: response.status().as_u16(),
            });
        }

        let body: OverpassResponse = response.json().await?;
        Ok(body
            .elements
            .into_iter()
            .map(|element| {
                let category = match element.tags.amenity.as_deref() {
                    Some("police") => SafetyCategory::Police,
                    _ => SafetyCategory::Hospital,
                };
                let label = element
                    .tags
                    .name
                    .or(element.tags.amenity)
                    .unwrap_or_else(|| "Safety point".to_string());
                SafetyPin {
                    category,
                    label,
                    color: category.marker_color(),
                    lat: element.lat,
                    lon: element.lon,
                    live: true,
                }
            })
            .collect())
    }
}
