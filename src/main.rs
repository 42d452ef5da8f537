use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hillpath::HeightMap;


/// Which answers to print
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
enum Part {
    /// Fewest steps from S to E
    One,
    /// Fewest steps to E from any lowest cell
    Two,
    #[default]
    Both,
}

/// Shortest climbs over a height map
#[derive(Parser, Debug)]
#[command(name = "hillpath", version, about)]
struct Args {
    /// Height map file, one row of a-z elevations per line with S and E markers
    input: PathBuf,

    #[arg(short, long, value_enum, default_value = "both")]
    part: Part,

    /// Increase log verbosity (-v debug, -vv trace), RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn answer(steps: Option<u32>) -> String {
    steps.map_or_else(|| "no path".to_string(), |s| s.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let map: HeightMap = input.parse()
        .with_context(|| format!("invalid height map in {}", args.input.display()))?;
    info!(rows = map.rows(), cols = map.cols(), start = %map.start(), end = %map.end(), "loaded height map");

    if matches!(args.part, Part::One | Part::Both) {
        println!("Part 1: {}", answer(map.fewest_steps()?));
    }
    if matches!(args.part, Part::Two | Part::Both) {
        println!("Part 2: {}", answer(map.fewest_steps_from_lowest()?));
    }

    Ok(())
}
