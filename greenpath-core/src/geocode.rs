//! Address resolution helpers: coordinate-literal parsing and the query
//! simplification ladder the server walks when the geocoding collaborator
//! finds no match for the exact input.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A resolved place as returned by the geocoding collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl GeocodedPlace {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Parses a literal `"lat, lng"` input, bypassing the geocoder entirely.
///
/// Returns `None` when the input is not a bare numeric pair; an error when
/// it is a pair but out of WGS-84 range.
pub fn parse_coordinate_pair(input: &str) -> Result<Option<Point<f64>>, Error> {
    let mut parts = input.split(',');
    let (Some(lat_raw), Some(lon_raw), None) = (parts.next(), parts.next(), parts.next()) else {
        return Ok(None);
    };

    let (Ok(lat), Ok(lon)) = (
        lat_raw.trim().parse::<f64>(),
        lon_raw.trim().parse::<f64>(),
    ) else {
        return Ok(None);
    };

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidCoordinate(input.to_string()));
    }
    Ok(Some(Point::new(lon, lat)))
}

/// Stage of the geocode retry ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodeStage {
    /// The address as typed.
    Exact,
    /// Last three comma-separated parts (drops house-level detail).
    Simplified,
    /// Leading landmark plus the last two parts.
    Landmark,
}

/// One attempt in the ladder: the stage and the query to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeAttempt {
    pub stage: GeocodeStage,
    pub query: String,
}

/// Builds the ordered list of queries to try for a free-text address.
///
/// Stages that would repeat an earlier query verbatim are skipped, so a
/// short address like `"Chennai"` produces a single exact attempt. The
/// caller is responsible for the bounded delay between attempts.
pub fn query_plan(address: &str) -> Vec<GeocodeAttempt> {
    let mut plan = vec![GeocodeAttempt {
        stage: GeocodeStage::Exact,
        query: address.to_string(),
    }];

    let parts: Vec<&str> = address.split(',').map(str::trim).collect();

    if parts.len() > 3 {
        let simplified = parts[parts.len() - 3..].join(", ");
        if simplified != address {
            plan.push(GeocodeAttempt {
                stage: GeocodeStage::Simplified,
                query: simplified,
            });
        }
    }

    if parts.len() > 2 {
        let landmark = parts[0];
        if landmark.len() > 5 {
            let query = format!("{}, {}", landmark, parts[parts.len() - 2..].join(", "));
            if plan.iter().all(|attempt| attempt.query != query) {
                plan.push(GeocodeAttempt {
                    stage: GeocodeStage::Landmark,
                    query,
                });
            }
        }
    }

    plan
}
