use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use railpath::dijkstra::{dijkstra_with, SearchOptions};
use railpath::frontier::FrontierKind;
use railpath::geo::haversine_km;
use railpath::StationRegistry;

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Time repeated single-source searches over a station registry.", long_about = None)]
struct Cli {
    /// Station CSV (name,latitude,longitude). Defaults to the built-in Chennai network.
    #[arg(long)]
    stations: Option<String>,

    /// Number of runs. Run i searches from station i modulo the station count.
    #[arg(short, long)]
    num_runs: usize,

    #[arg(short, long, value_enum, default_value_t = FrontierKind::Lazy)]
    frontier: FrontierKind,

    #[arg(long, default_value_t = false)]
    skip_stale: bool,
}

fn main() -> Result<()> {
    railpath::init_logging();
    let cli = Cli::parse();

    let registry = match cli.stations.as_deref() {
        Some(path) => StationRegistry::from_csv_path(path)
            .with_context(|| format!("loading stations from {path}"))?,
        None => StationRegistry::chennai(),
    };

    let options = SearchOptions {
        target: None,
        skip_stale: cli.skip_stale,
    };
    let mut duration_millis = Vec::with_capacity(cli.num_runs);
    let mut stale_pops = 0;
    for run in 0..cli.num_runs {
        let source = run % registry.len();
        let now = Instant::now();
        let paths = dijkstra_with(&registry, haversine_km, source, options, cli.frontier.build())?;
        duration_millis.push(now.elapsed().as_secs_f64() * 1000.0);
        stale_pops += paths.stats.stale_pops;
    }
    println!("{:?}", duration_millis);
    if !duration_millis.is_empty() {
        let total: f64 = duration_millis.iter().sum();
        println!(
            "{} runs over {} stations ({:?}): mean {:.4} ms, {} stale pops",
            duration_millis.len(),
            registry.len(),
            cli.frontier,
            total / duration_millis.len() as f64,
            stale_pops
        );
    }

    Ok(())
}
