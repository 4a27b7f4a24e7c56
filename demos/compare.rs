//! Cross-check Dijkstra, A* and JPS on a random grid and time them.
//!
//! Run: cargo run --bin compare -- [noise|cave] [width] [height] [iterations] [seed]
//!
//! Every A* and JPS cost is checked against Dijkstra's; mismatches are
//! logged and make the program exit with status 1.

use clap::{Parser, ValueEnum};
use jumpgrid_demos::{DemoError, init_logging};
use jumpgrid_maps::{CaveConfig, Comparer, NoiseConfig, cave_grid, noise_grid};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MapKind {
    /// Independent random walls
    Noise,
    /// Cellular automata cave
    Cave,
}

#[derive(Parser, Debug)]
#[command(name = "compare")]
#[command(about = "Check that A* and JPS match Dijkstra on random start/goal pairs")]
struct Args {
    /// Map generator
    #[arg(value_enum, default_value_t = MapKind::Noise)]
    kind: MapKind,

    /// Grid width in cells
    #[arg(default_value_t = 100, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Grid height in cells
    #[arg(default_value_t = 100, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,

    /// Start/goal pairs to search
    #[arg(default_value_t = 100)]
    iterations: u32,

    /// Map and endpoint seed; random when omitted
    seed: Option<u64>,
}

fn run(args: &Args) -> Result<bool, DemoError> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let (width, height) = (args.width, args.height);

    let mut rng = StdRng::seed_from_u64(seed);
    let grid = match args.kind {
        MapKind::Noise => noise_grid(width, height, &NoiseConfig::default(), &mut rng),
        MapKind::Cave => cave_grid(width, height, &CaveConfig::default(), &mut rng),
    };
    println!(
        "{:?} {width}x{height} (seed {seed}), {} walkable cells",
        args.kind,
        grid.walkable_count()
    );

    let report = Comparer::new(&grid, rng).run(args.iterations)?;
    println!("{report}");
    for m in &report.mismatches {
        println!("  {m}");
    }
    Ok(report.is_consistent())
}

fn main() {
    init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
