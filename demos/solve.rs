//! Solve a text map with one or all algorithms and draw the result.
//!
//! Run: cargo run --bin solve -- <map-file> [dijkstra|astar|jps|all]
//!
//! Map files use `#` for walls, `.` for floor, `S` for the start and `G`
//! (or `E`) for the goal. Set `JUMPGRID_LOG=debug` for search summaries.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use jumpgrid_core::AsciiMap;
use jumpgrid_demos::{DemoError, draw_path, init_logging, parse_algorithms};
use jumpgrid_paths::PathFinder;

#[derive(Parser, Debug)]
#[command(name = "solve")]
#[command(about = "Find a shortest path on a text map and draw it")]
struct Args {
    /// Map file with one `S` and one `G` marker
    map: PathBuf,

    /// dijkstra, astar, jps or all
    algorithm: Option<String>,
}

fn run(args: &Args) -> Result<(), DemoError> {
    let algorithms = parse_algorithms(args.algorithm.as_deref())?;
    let path = args.map.display().to_string();

    let text = std::fs::read_to_string(&args.map).map_err(|source| DemoError::Io {
        path: path.clone(),
        source,
    })?;
    let map = AsciiMap::parse(&text)?;
    let (Some(start), Some(goal)) = (map.start, map.goal) else {
        return Err(DemoError::Usage(format!(
            "{path}: map needs an S and a G marker"
        )));
    };

    let mut finder = PathFinder::new(&map.grid);
    for alg in algorithms {
        let began = Instant::now();
        let found = finder.find_path(&map.grid, alg, start, goal)?;
        let elapsed = began.elapsed();
        let stats = finder.stats();
        match found {
            Some(p) => {
                println!(
                    "{alg}: cost {} over {} cells, {} expanded, {} opened, {elapsed:.3?}",
                    p.cost(),
                    p.expand().len(),
                    stats.expanded,
                    stats.opened
                );
                print!("{}", draw_path(&map, &p));
            }
            None => println!(
                "{alg}: no path from {start} to {goal} ({} expanded, {elapsed:.3?})",
                stats.expanded
            ),
        }
        println!();
    }
    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
