//! Synthetic route estimation used when the routing collaborator is
//! unavailable or returns no result.
//!
//! The estimate is the straight-line great-circle distance scaled by a
//! per-mode terrain multiplier, with duration taken from the mode's fixed
//! average speed. The geometry is a three-point path through a slightly
//! offset midpoint so overlapping fallback routes stay distinguishable on
//! the map surface.

use geo::{LineString, Point, coord};

use crate::model::{Route, TransportMode};

/// Mean Earth radius in km.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two lon/lat points, in km.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Ratio of real-world route length to straight-line distance.
///
/// Road modes wander the most; rail is close to direct; sea and air lanes
/// are treated as straight.
pub fn terrain_multiplier(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walk => 1.2,
        TransportMode::Bike => 1.25,
        TransportMode::Bus => 1.5,
        TransportMode::Car
        | TransportMode::CarElectric
        | TransportMode::CarHybrid
        | TransportMode::Rideshare
        | TransportMode::RidesharePool
        | TransportMode::Taxi => 1.4,
        TransportMode::Train => 1.1,
        TransportMode::Subway => 1.15,
        TransportMode::Tram => 1.2,
        TransportMode::FreightTruck => 1.4,
        TransportMode::FreightRail => 1.1,
        TransportMode::FreightShip | TransportMode::FreightAir => 1.0,
    }
}

/// Lateral midpoint offset in degrees, so fallback polylines for different
/// modes do not sit exactly on top of each other.
fn midpoint_offset(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walk => 0.002,
        TransportMode::Bike => -0.002,
        _ => 0.0,
    }
}

/// Builds an estimated route between two lon/lat points.
pub fn synthetic_route(
    mode: TransportMode,
    start: Point<f64>,
    end: Point<f64>,
    peak_hour: bool,
) -> Route {
    let straight_km = haversine_km(start, end);
    let distance_km = straight_km * terrain_multiplier(mode);
    let duration_s = (distance_km / mode.average_speed_kmh()) * 3600.0;

    let offset = midpoint_offset(mode);
    let midpoint = coord! {
        x: (start.x() + end.x()) / 2.0 + offset,
        y: (start.y() + end.y()) / 2.0 + offset,
    };
    let path = LineString::new(vec![start.into(), midpoint, end.into()]);

    let mut route =
        Route::from_collaborator(mode, path, distance_km * 1000.0, duration_s, peak_hour);
    route.estimated = true;
    route
}
