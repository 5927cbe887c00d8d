use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown transport mode: {0}")]
    UnknownMode(String),
    #[error("Missing input: {0}")]
    MissingInput(&'static str),
    #[error("No geocoding match for {input}")]
    NoGeocodeMatch { input: String },
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Upstream {service} unavailable (status {status})")]
    UpstreamUnavailable { service: &'static str, status: u16 },
    #[error("Preference weights must sum to 100, got {0}")]
    InvalidWeights(u64),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
