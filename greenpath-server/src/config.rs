//! Server configuration, loaded from a TOML file with CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub listen: String,
    /// Routing collaborator (OSRM-compatible) base URL.
    pub osrm_url: String,
    /// Geocoding collaborator (Nominatim-compatible) base URL.
    pub nominatim_url: String,
    /// Safety-point collaborator (Overpass-compatible) interpreter URL.
    pub overpass_url: String,
    /// User-Agent sent to every collaborator, as public OSM services require.
    pub user_agent: String,
    /// Fixed delay between sequential geocoding attempts, in milliseconds.
    /// Crude backpressure for the public rate limits, not a retry policy.
    pub geocode_delay_ms: u64,
    /// Fixed delay between sequential per-mode route fetches.
    pub route_delay_ms: u64,
    /// Per-request timeout towards any collaborator.
    pub request_timeout_secs: u64,
    /// JSON file backing the session key-value store.
    pub store_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            osrm_url: "https://router.project-osrm.org".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            user_agent: "GreenPath Navigation App/1.0".to_string(),
            geocode_delay_ms: 1000,
            route_delay_ms: 1200,
            request_timeout_secs: 15,
            store_path: PathBuf::from("greenpath-store.json"),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn geocode_delay(&self) -> Duration {
        Duration::from_millis(self.geocode_delay_ms)
    }

    pub fn route_delay(&self) -> Duration {
        Duration::from_millis(self.route_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
