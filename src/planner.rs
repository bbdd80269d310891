//! Answers a single source/target query: validation, the degenerate
//! same-station case, the search itself, and route reconstruction.

use tracing::debug;

use crate::dijkstra::{dijkstra_with, SearchOptions};
use crate::error::RouteError;
use crate::frontier::FrontierKind;
use crate::geo::haversine_km;
use crate::path::{reconstruct_path, Route};
use crate::stations::{StationId, StationRegistry};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanOptions {
    pub frontier: FrontierKind,
    pub skip_stale: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Source and target are the same station; no search was run.
    SameStation(StationId),
    Unreachable {
        source: StationId,
        target: StationId,
    },
    Found(Route),
}

/// Shortest great-circle route from `source` to `target`.
///
/// # Errors
///
/// `InvalidIndex` before any search when either index is out of range;
/// `InternalInconsistency` if the search output cannot be walked back.
pub fn plan(
    registry: &StationRegistry,
    source: StationId,
    target: StationId,
    options: &PlanOptions,
) -> Result<Outcome, RouteError> {
    registry.check(source)?;
    registry.check(target)?;
    if source == target {
        return Ok(Outcome::SameStation(source));
    }

    let search = SearchOptions {
        target: Some(target),
        skip_stale: options.skip_stale,
    };
    let paths = dijkstra_with(
        registry,
        haversine_km,
        source,
        search,
        options.frontier.build(),
    )?;

    let outcome = match reconstruct_path(registry, &paths, haversine_km, target)? {
        Some(route) => Outcome::Found(route),
        None => Outcome::Unreachable { source, target },
    };
    debug!(source, target, frontier = ?options.frontier, "planned route");
    Ok(outcome)
}
