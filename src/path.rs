//! Walks predecessor links back from a target to rebuild the route.

use hashbrown::HashSet;

use crate::dijkstra::ShortestPaths;
use crate::error::RouteError;
use crate::frontier::Cost;
use crate::geo::Coordinate;
use crate::stations::{StationId, StationRegistry};

/// One leg of a route: the station arrived at and the direct distance from
/// the station before it.
#[derive(Clone, Debug, PartialEq)]
pub struct Hop {
    pub station: StationId,
    pub name: String,
    pub km: Cost,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub source: StationId,
    pub target: StationId,
    /// Cumulative distance from the search's distance table.
    pub total_km: Cost,
    /// Ordered source to target, excluding the source itself.
    pub hops: Vec<Hop>,
}

impl Route {
    pub fn hop_sum(&self) -> Cost {
        self.hops.iter().map(|h| h.km).sum()
    }
}

/// Rebuilds the route to `target`. Returns `Ok(None)` when the target was
/// never reached.
///
/// # Errors
///
/// `InvalidIndex` if `target` is not in the registry, and
/// `InternalInconsistency` if the predecessor links break off or loop.
pub fn reconstruct_path<D>(
    registry: &StationRegistry,
    paths: &ShortestPaths,
    distance: D,
    target: StationId,
) -> Result<Option<Route>, RouteError>
where
    D: Fn(Coordinate, Coordinate) -> Cost,
{
    registry.check(target)?;
    if !paths.is_reachable(target) {
        return Ok(None);
    }

    let source = paths.source();
    let mut hops = Vec::new();
    let mut visited = HashSet::new();
    let mut current = target;
    while current != source {
        if !visited.insert(current) || visited.len() > registry.len() {
            return Err(RouteError::InternalInconsistency(format!(
                "predecessor cycle through station {current}"
            )));
        }
        let prev = paths.predecessor(current).ok_or_else(|| {
            RouteError::InternalInconsistency(format!(
                "station {current} is reachable but has no predecessor"
            ))
        })?;
        let station = registry.get(current)?;
        let km = distance(registry.coordinate(prev)?, station.coord);
        hops.push(Hop {
            station: current,
            name: station.name.clone(),
            km,
        });
        current = prev;
    }
    hops.reverse();

    Ok(Some(Route {
        source,
        target,
        total_km: paths.distance(target),
        hops,
    }))
}
