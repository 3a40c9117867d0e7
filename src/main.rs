mod config;
mod crs;
mod data;
mod error;
mod sim;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use config::SimulationConfig;
use data::{loader, writer};
use sim::Simulation;

#[derive(Parser, Debug)]
#[command(name = "c14sim")]
#[command(
    about = "Simulate a synthetic radiocarbon dataset matching a real one",
    long_about = None
)]
struct Args {
    /// Source dataset (.csv, .xlsx)
    #[arg(short, long)]
    records: PathBuf,

    /// Study-area boundary polygon (.geojson, .shp), in the study CRS
    #[arg(short, long)]
    boundary: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    output: PathBuf,

    /// RNG seed; omit to seed from OS entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Rate constant of the exponential age weighting
    #[arg(long, default_value_t = 5e-4)]
    rate: f64,

    /// Round sampled measurement errors to integers
    #[arg(long)]
    round_errors: bool,

    /// How many of the most frequent lab prefixes to sample from
    #[arg(long, default_value_t = 10)]
    top_prefixes: usize,

    /// EPSG code of the source latitude/longitude columns
    #[arg(long, default_value_t = 4326)]
    source_epsg: u32,

    /// EPSG code of the boundary polygon; spatial sampling happens here
    #[arg(long, default_value_t = 3035)]
    study_epsg: u32,

    /// Known-bad coordinate pair to drop, as "lat,lon" (repeatable)
    #[arg(long = "exclude", value_name = "LAT,LON", value_parser = parse_coordinate)]
    exclusions: Vec<(f64, f64)>,
}

fn parse_coordinate(s: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| "expected LAT,LON".to_string())?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
    Ok((lat, lon))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SimulationConfig {
        seed: args.seed,
        rate: args.rate,
        round_errors: args.round_errors,
        top_prefixes: args.top_prefixes,
        source_epsg: args.source_epsg,
        study_epsg: args.study_epsg,
        exclusions: args.exclusions,
    };

    let source = loader::load_records(&args.records)?;
    log::info!(
        "loaded {} source records from {}",
        source.len(),
        args.records.display()
    );
    let boundary = loader::load_boundary(&args.boundary)?;

    let simulation = Simulation {
        config: &config,
        boundary: &boundary,
    };
    let mut rng = config.rng();
    let output = simulation.run(source, &mut rng)?;
    log::info!(
        "kept {} records ({} on the exclusion list, {} outside the boundary)",
        output.filter.kept,
        output.filter.excluded_coordinates,
        output.filter.outside_boundary
    );

    writer::write_csv(&args.output, &output.records)?;
    log::info!(
        "wrote {} simulated records to {}",
        output.records.len(),
        args.output.display()
    );
    Ok(())
}
