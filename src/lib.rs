//! Shortest great-circle routes between the stations of a small transit
//! network.
//!
//! Every pair of stations is treated as an edge weighted by haversine
//! distance, and Dijkstra's algorithm runs over that complete graph.

pub mod dijkstra;
pub mod error;
pub mod frontier;
pub mod geo;
pub mod path;
pub mod planner;
pub mod report;
pub mod stations;

pub use error::{RegistryError, RouteError};
pub use planner::{plan, Outcome, PlanOptions};
pub use stations::{Station, StationId, StationRegistry};

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`).
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
