//! Thin HTTP clients for the external collaborators. Each client owns only
//! the request/response shape; estimation and ranking stay in core.

pub mod nominatim;
pub mod osrm;
pub mod overpass;

pub use nominatim::NominatimClient;
pub use osrm::OsrmClient;
pub use overpass::OverpassClient;
