//! Plain-text and CSV rendering of query results.

use std::io::{self, Write};

use crate::dijkstra::ShortestPaths;
use crate::planner::Outcome;
use crate::stations::StationRegistry;

pub fn write_station_list<W: Write>(out: &mut W, registry: &StationRegistry) -> io::Result<()> {
    writeln!(out, "List of stations:")?;
    for (idx, station) in registry.iter() {
        writeln!(out, "{idx}: {}", station.name)?;
    }
    Ok(())
}

/// Writes the answer to one query. Fails on I/O, or with `InvalidInput` if
/// `outcome` names stations missing from `registry`.
pub fn write_outcome<W: Write>(
    out: &mut W,
    registry: &StationRegistry,
    outcome: &Outcome,
) -> io::Result<()> {
    match outcome {
        Outcome::SameStation(idx) => {
            writeln!(
                out,
                "Source and target stations are the same: {}",
                registry.name(*idx)?
            )?;
        }
        Outcome::Unreachable { source, target } => {
            writeln!(
                out,
                "No path found between {} and {}.",
                registry.name(*source)?,
                registry.name(*target)?
            )?;
        }
        Outcome::Found(route) => {
            let source = registry.name(route.source)?;
            writeln!(
                out,
                "Shortest distance between {source} and {}: {:.2} kilometers",
                registry.name(route.target)?,
                route.total_km
            )?;
            writeln!(out)?;
            writeln!(out, "Connecting stations:")?;
            write!(out, "{source}")?;
            for hop in &route.hops {
                write!(out, " -> {} ({:.2} km)", hop.name, hop.km)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Dumps a full distance table as `station,name,distance_km,predecessor`.
pub fn write_distance_csv<W: Write>(
    out: W,
    registry: &StationRegistry,
    paths: &ShortestPaths,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["station", "name", "distance_km", "predecessor"])?;
    for (idx, station) in registry.iter() {
        let d = paths.distance(idx);
        let distance = if d.is_finite() {
            format!("{d:.6}")
        } else {
            String::from("inf")
        };
        let predecessor = paths
            .predecessor(idx)
            .map(|p| p.to_string())
            .unwrap_or_default();
        wtr.write_record([idx.to_string(), station.name.clone(), distance, predecessor])?;
    }
    wtr.flush()?;
    Ok(())
}
