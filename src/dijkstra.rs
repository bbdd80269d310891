use tracing::{debug, trace};

use crate::error::RouteError;
use crate::frontier::{Cost, Frontier, LazyHeap};
use crate::geo::Coordinate;
use crate::stations::{StationId, StationRegistry};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop as soon as this station is popped; its distance is final then.
    pub target: Option<StationId>,
    /// Drop popped entries whose distance was already improved on.
    pub skip_stale: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub pops: usize,
    pub stale_pops: usize,
    pub relaxations: usize,
    pub target_settled: bool,
}

/// Distance and predecessor tables produced by one search.
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    pub(crate) source: StationId,
    pub(crate) dist: Vec<Cost>,
    pub(crate) prev: Vec<Option<StationId>>,
    pub stats: SearchStats,
}

impl ShortestPaths {
    pub fn source(&self) -> StationId {
        self.source
    }

    /// Best known distance from the source, `f64::INFINITY` when unreachable.
    pub fn distance(&self, station: StationId) -> Cost {
        self.dist.get(station).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, station: StationId) -> Option<StationId> {
        self.prev.get(station).copied().flatten()
    }

    pub fn is_reachable(&self, station: StationId) -> bool {
        self.distance(station).is_finite()
    }

    pub fn distances(&self) -> &[Cost] {
        &self.dist
    }

    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }
}

/// Dijkstra from `source` over the complete graph of `registry`, with edge
/// weights from `distance`, using a lazy binary-heap frontier.
pub fn dijkstra<D>(
    registry: &StationRegistry,
    distance: D,
    source: StationId,
    target: Option<StationId>,
) -> Result<ShortestPaths, RouteError>
where
    D: Fn(Coordinate, Coordinate) -> Cost,
{
    let options = SearchOptions {
        target,
        ..SearchOptions::default()
    };
    dijkstra_with(registry, distance, source, options, LazyHeap::new())
}

/// Dijkstra with an explicit frontier.
///
/// Every pop rescans all stations, so this is O(V² log V); fine for tens of
/// stations. `distance` must never return a negative value.
pub fn dijkstra_with<D, F>(
    registry: &StationRegistry,
    distance: D,
    source: StationId,
    options: SearchOptions,
    mut frontier: F,
) -> Result<ShortestPaths, RouteError>
where
    D: Fn(Coordinate, Coordinate) -> Cost,
    F: Frontier,
{
    registry.check(source)?;
    if let Some(target) = options.target {
        registry.check(target)?;
    }

    let coords = registry.coordinates();
    let n = coords.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![None; n];
    let mut stats = SearchStats::default();

    dist[source] = 0.0;
    frontier.push(source, 0.0);

    while let Some((node_id, cost)) = frontier.pop() {
        stats.pops += 1;
        if cost > dist[node_id] {
            stats.stale_pops += 1;
            if options.skip_stale {
                continue;
            }
        }
        if options.target == Some(node_id) {
            stats.target_settled = true;
            break;
        }
        for next in (0..n).filter(|&i| i != node_id) {
            let w = distance(coords[node_id], coords[next]);
            debug_assert!(!(w < 0.0), "negative edge weight {w} ({node_id} -> {next})");
            let next_cost = cost + w;
            if next_cost < dist[next] {
                trace!(from = node_id, to = next, cost = next_cost, "relax");
                dist[next] = next_cost;
                prev[next] = Some(node_id);
                frontier.push(next, next_cost);
                stats.relaxations += 1;
            }
        }
    }

    debug!(
        source,
        target = ?options.target,
        pops = stats.pops,
        stale_pops = stats.stale_pops,
        relaxations = stats.relaxations,
        target_settled = stats.target_settled,
        "search complete"
    );

    Ok(ShortestPaths {
        source,
        dist,
        prev,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::{FrontierKind, KeyedHeap, OrxHeap};
    use crate::geo::haversine_km;
    use crate::stations::Station;
    use proptest::prelude::*;

    fn line(n: usize) -> StationRegistry {
        StationRegistry::new(
            (0..n)
                .map(|i| Station {
                    name: format!("S{i}"),
                    coord: Coordinate::new(0.0, i as f64 * 0.01),
                })
                .collect(),
        )
    }

    // Squared haversine distance: two short hops beat one long one.
    fn squared(a: Coordinate, b: Coordinate) -> f64 {
        haversine_km(a, b).powi(2)
    }

    #[test]
    fn source_is_zero_without_predecessor() {
        let registry = StationRegistry::chennai();
        let paths = dijkstra(&registry, haversine_km, 4, None).unwrap();
        assert_eq!(paths.source(), 4);
        assert_eq!(paths.distance(4), 0.0);
        assert_eq!(paths.predecessor(4), None);
        assert_eq!(paths.len(), 20);
        assert!((0..20).all(|i| paths.is_reachable(i)));
    }

    #[test]
    fn haversine_is_direct_hop() {
        // Great-circle distance satisfies the triangle inequality, so every
        // station is reached straight from the source.
        let registry = StationRegistry::chennai();
        let paths = dijkstra(&registry, haversine_km, 0, None).unwrap();
        for i in 1..registry.len() {
            let direct = haversine_km(
                registry.coordinate(0).unwrap(),
                registry.coordinate(i).unwrap(),
            );
            assert!((paths.distance(i) - direct).abs() < 1e-9, "station {i}");
        }
    }

    #[test]
    fn squared_weights_chain_through_every_stop() {
        let registry = line(5);
        let paths = dijkstra(&registry, squared, 0, None).unwrap();
        for i in 1..5 {
            assert_eq!(paths.predecessor(i), Some(i - 1), "station {i}");
        }
        let hop = squared(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01));
        assert!((paths.distance(4) - 4.0 * hop).abs() < 1e-6);
    }

    #[test]
    fn early_exit_settles_target() {
        let registry = StationRegistry::chennai();
        let full = dijkstra(&registry, haversine_km, 3, None).unwrap();
        let early = dijkstra(&registry, haversine_km, 3, Some(16)).unwrap();
        assert!(early.stats.target_settled);
        assert!(!full.stats.target_settled);
        assert!(early.stats.pops <= full.stats.pops);
        assert!((early.distance(16) - full.distance(16)).abs() < 1e-9);
    }

    #[test]
    fn infinite_weights_leave_stations_unreachable() {
        let registry = line(3);
        let paths = dijkstra(&registry, |_, _| f64::INFINITY, 0, Some(2)).unwrap();
        assert!(!paths.is_reachable(2));
        assert_eq!(paths.predecessor(2), None);
        assert!(!paths.stats.target_settled);
        assert_eq!(paths.stats.relaxations, 0);
    }

    #[test]
    fn single_station() {
        let registry = line(1);
        let paths = dijkstra(&registry, haversine_km, 0, None).unwrap();
        assert_eq!(paths.distances(), &[0.0]);
        assert_eq!(paths.stats.pops, 1);
    }

    #[test]
    fn rejects_out_of_range() {
        let registry = StationRegistry::chennai();
        assert_eq!(
            dijkstra(&registry, haversine_km, 99, None).unwrap_err(),
            RouteError::InvalidIndex {
                index: 99,
                count: 20
            }
        );
        assert!(dijkstra(&registry, haversine_km, 0, Some(20)).is_err());
    }

    #[test]
    fn stale_skip_only_saves_work() {
        let registry = line(8);
        let plain = dijkstra_with(&registry, squared, 7, SearchOptions::default(), LazyHeap::new())
            .unwrap();
        let options = SearchOptions {
            skip_stale: true,
            ..SearchOptions::default()
        };
        let skipping = dijkstra_with(&registry, squared, 7, options, LazyHeap::new()).unwrap();
        assert_eq!(plain.distances(), skipping.distances());
        assert_eq!(plain.prev, skipping.prev);
        assert!(plain.stats.stale_pops > 0);
        assert!(skipping.stats.relaxations <= plain.stats.relaxations);
    }

    #[test]
    fn frontiers_agree() {
        let registry = line(10);
        for source in 0..registry.len() {
            let lazy =
                dijkstra_with(&registry, squared, source, SearchOptions::default(), LazyHeap::new())
                    .unwrap();
            let keyed =
                dijkstra_with(&registry, squared, source, SearchOptions::default(), KeyedHeap::new())
                    .unwrap();
            let orx =
                dijkstra_with(&registry, squared, source, SearchOptions::default(), OrxHeap::new())
                    .unwrap();
            for i in 0..registry.len() {
                assert!((lazy.distance(i) - keyed.distance(i)).abs() < 1e-9);
                assert!((lazy.distance(i) - orx.distance(i)).abs() < 1e-9);
            }
            assert_eq!(keyed.stats.stale_pops, 0);
            assert_eq!(orx.stats.stale_pops, 0);
        }
    }

    proptest! {
        #[test]
        fn predecessor_walk_terminates(source in 0usize..20, kind_idx in 0usize..3) {
            let registry = StationRegistry::chennai();
            let kind = FrontierKind::ALL[kind_idx];
            let paths = dijkstra_with(
                &registry,
                squared,
                source,
                SearchOptions::default(),
                kind.build(),
            ).unwrap();
            prop_assert_eq!(paths.distance(source), 0.0);
            prop_assert_eq!(paths.predecessor(source), None);
            for target in (0..registry.len()).filter(|&t| t != source) {
                let mut cur = target;
                let mut steps = 0;
                while cur != source {
                    cur = paths.predecessor(cur).unwrap();
                    steps += 1;
                    prop_assert!(steps <= registry.len());
                }
            }
        }
    }
}
