//! Error types for route queries and registry loading.

use crate::stations::StationId;

/// Errors raised while answering a route query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Station index outside `[0, count)`
    #[error("station index {index} out of range for {count} stations")]
    InvalidIndex { index: StationId, count: usize },

    /// No station carries this name
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The predecessor table does not describe a path back to the source
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Errors raised while loading a station registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Row has the wrong shape or an unparsable number
    #[error("line {line}: {message}")]
    BadRecord { line: u64, message: String },

    /// Latitude/longitude out of range or not finite
    #[error("line {line}: invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { line: u64, lat: f64, lon: f64 },

    #[error("registry contains no stations")]
    Empty,
}

impl From<RouteError> for std::io::Error {
    fn from(err: RouteError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
