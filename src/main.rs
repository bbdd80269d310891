use std::fs::File;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use railpath::dijkstra::{dijkstra_with, SearchOptions};
use railpath::frontier::FrontierKind;
use railpath::geo::haversine_km;
use railpath::report::{write_distance_csv, write_outcome, write_station_list};
use railpath::{plan, PlanOptions, StationId, StationRegistry};

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Find the shortest great-circle route between two stations.", long_about = None)]
struct Cli {
    /// Station CSV (name,latitude,longitude). Defaults to the built-in Chennai network.
    #[arg(long)]
    stations: Option<String>,

    /// Source station, by index or exact name. Prompted for when omitted.
    #[arg(short, long)]
    source: Option<String>,

    /// Target station, by index or exact name. Prompted for when omitted.
    #[arg(short, long)]
    target: Option<String>,

    #[arg(short, long, value_enum, default_value_t = FrontierKind::Lazy)]
    frontier: FrontierKind,

    /// Discard frontier entries that were superseded by a shorter distance
    #[arg(long, default_value_t = false)]
    skip_stale: bool,

    /// Also write the full distance table from the source to this CSV file
    #[arg(short, long)]
    out: Option<String>,

    /// Print the station list and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn load_registry(path: Option<&str>) -> Result<StationRegistry> {
    match path {
        Some(path) => {
            StationRegistry::from_csv_path(path).with_context(|| format!("loading stations from {path}"))
        }
        None => Ok(StationRegistry::chennai()),
    }
}

fn prompt_station(registry: &StationRegistry, label: &str) -> Result<StationId> {
    print!(
        "Enter the {label} station (0 to {}): ",
        registry.len().saturating_sub(1)
    );
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("no {label} station given");
    }
    Ok(registry.resolve(&line)?)
}

fn select(registry: &StationRegistry, given: Option<&str>, label: &str) -> Result<StationId> {
    match given {
        Some(query) => registry
            .resolve(query)
            .with_context(|| format!("{label} station")),
        None => prompt_station(registry, label),
    }
}

fn main() -> Result<()> {
    railpath::init_logging();
    let cli = Cli::parse();

    let registry = load_registry(cli.stations.as_deref())?;

    let mut stdout = io::stdout().lock();
    write_station_list(&mut stdout, &registry)?;
    if cli.list {
        return Ok(());
    }
    writeln!(stdout)?;
    drop(stdout);

    let source = select(&registry, cli.source.as_deref(), "source")?;
    let target = select(&registry, cli.target.as_deref(), "target")?;

    let options = PlanOptions {
        frontier: cli.frontier,
        skip_stale: cli.skip_stale,
    };
    let outcome = plan(&registry, source, target, &options)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    write_outcome(&mut stdout, &registry, &outcome)?;

    if let Some(out_path) = cli.out {
        let search = SearchOptions {
            target: None,
            skip_stale: cli.skip_stale,
        };
        let paths = dijkstra_with(&registry, haversine_km, source, search, cli.frontier.build())?;
        let file = File::create(&out_path).with_context(|| format!("creating CSV {out_path}"))?;
        write_distance_csv(file, &registry, &paths)
            .with_context(|| format!("writing CSV {out_path}"))?;
        writeln!(
            stdout,
            "Wrote distances for {} stations to {}",
            paths.len(),
            out_path
        )?;
    }

    Ok(())
}
