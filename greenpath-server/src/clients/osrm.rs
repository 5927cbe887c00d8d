//! Routing collaborator client (OSRM HTTP API).

use geo::{LineString, Point, coord};
use serde::Deserialize;
use tracing::debug;

use greenpath_core::TransportMode;

use crate::error::ApiError;

/// OSRM routing profile. Rail modes have no road profile and always fall
/// back to synthetic estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsrmProfile {
    Foot,
    Bike,
    Driving,
}

impl OsrmProfile {
    pub fn for_mode(mode: TransportMode) -> Option<Self> {
        match mode {
            TransportMode::Walk => Some(OsrmProfile::Foot),
            TransportMode::Bike => Some(OsrmProfile::Bike),
            TransportMode::Bus
            | TransportMode::Car
            | TransportMode::CarElectric
            | TransportMode::CarHybrid
            | TransportMode::Rideshare
            | TransportMode::RidesharePool
            | TransportMode::Taxi
            | TransportMode::FreightTruck => Some(OsrmProfile::Driving),
            _ => None,
        }
    }

    /// Query-string form, as accepted by `/route?profile=`. `walk` is an
    /// alias for `foot`; anything unrecognized falls back to the driving
    /// profile rather than erroring.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "walk" | "foot" => OsrmProfile::Foot,
            "bike" => OsrmProfile::Bike,
            _ => OsrmProfile::Driving,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OsrmProfile::Foot => "foot",
            OsrmProfile::Bike => "bike",
            OsrmProfile::Driving => "driving",
        }
    }
}

/// A parsed leg of the collaborator response.
#[derive(Debug, Clone)]
pub struct FetchedRoute {
    pub path: LineString<f64>,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn route_url(&self, profile: OsrmProfile, start: Point<f64>, end: Point<f64>) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson&steps=true",
            self.base_url,
            profile.as_str(),
            start.x(),
            start.y(),
            end.x(),
            end.y(),
        )
    }

    /// Fetches one route between two lon/lat points, parsed into geometry
    /// plus raw distance/duration.
    pub async fn fetch_route(
        &self,
        profile: OsrmProfile,
        start: Point<f64>,
        end: Point<f64>,
    ) -> Result<FetchedRoute, ApiError> {
        let url = self.route_url(profile, start, end);
        debug!(profile = profile.as_str(), "fetching route");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                service: "routing",
                status: response.status().as_u16(),
            });
        }

        let body: OsrmResponse = response.json().await?;
        if body.code != "Ok" {
            return Err(ApiError::Upstream {
                service: "routing",
                status: 502,
            });
        }
        let route = body.routes.into_iter().next().ok_or(ApiError::Upstream {
            service: "routing",
            status: 502,
        })?;

        let path = LineString::new(
            route
                .geometry
                .coordinates
                .iter()
                .map(|[lon, lat]| coord! { x: *lon, y: *lat })
                .collect(),
        );
        Ok(FetchedRoute {
            path,
            distance_m: route.distance,
            duration_s: route.duration,
        })
    }

    /// Raw passthrough used by the `/route` proxy endpoint: returns the
    /// upstream status and body verbatim.
    pub async fn fetch_raw(
        &self,
        profile: OsrmProfile,
        start: &str,
        end: &str,
    ) -> Result<(u16, String), reqwest::Error> {
        let url = format!(
            "{}/route/v1/{}/{};{}?overview=full&geometries=geojson&steps=true",
            self.base_url,
            profile.as_str(),
            start,
            end,
        );
        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}
