//! Shared plumbing for the `solve` and `compare` demos: errors, logging
//! setup and path drawing.

use std::collections::HashSet;
use std::fmt;

use jumpgrid_core::{AsciiMap, MapError, Point};
use jumpgrid_paths::{Algorithm, Path, PathError, UnknownAlgorithm};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "JUMPGRID_LOG";

/// Filter used when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_LOG: &str = "warn";

/// Errors a demo reports before exiting with status 1.
#[derive(Debug)]
pub enum DemoError {
    Usage(String),
    Io { path: String, source: std::io::Error },
    Map(MapError),
    Path(PathError),
    Algorithm(UnknownAlgorithm),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}"),
            Self::Io { path, source } => write!(f, "cannot read {path}: {source}"),
            Self::Map(e) => write!(f, "invalid map: {e}"),
            Self::Path(e) => write!(f, "search failed: {e}"),
            Self::Algorithm(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Map(e) => Some(e),
            Self::Path(e) => Some(e),
            Self::Algorithm(e) => Some(e),
            Self::Usage(_) => None,
        }
    }
}

impl From<MapError> for DemoError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

impl From<PathError> for DemoError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

impl From<UnknownAlgorithm> for DemoError {
    fn from(e: UnknownAlgorithm) -> Self {
        Self::Algorithm(e)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// The filter for a [`LOG_ENV`] value, e.g. `debug` or
/// `jumpgrid_paths=trace,warn`.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

/// Send the library crates' `log` records to stderr, filtered by
/// [`LOG_ENV`].
pub fn init_logging() {
    let directives = std::env::var(LOG_ENV).ok();
    let installed = tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = installed {
        eprintln!("logging disabled: {e}");
    }
}

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

/// `all` (or nothing) for every algorithm, otherwise a single name.
pub fn parse_algorithms(arg: Option<&str>) -> Result<Vec<Algorithm>, DemoError> {
    match arg {
        None => Ok(Algorithm::ALL.to_vec()),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(Algorithm::ALL.to_vec()),
        Some(s) => Ok(vec![s.parse()?]),
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draw `path` over `map`: `*` on every cell the route passes through, `o`
/// on the jump points of a non-contiguous path, `S`/`G` at the ends.
pub fn draw_path(map: &AsciiMap, path: &Path) -> String {
    let steps: HashSet<Point> = path.expand().nodes().iter().map(|n| n.pos).collect();
    let turns: HashSet<Point> = if path.is_contiguous() {
        HashSet::new()
    } else {
        path.nodes().iter().map(|n| n.pos).collect()
    };
    let (start, goal) = (path.start(), path.goal());
    map.render(|p| {
        if p == start {
            Some('S')
        } else if p == goal {
            Some('G')
        } else if turns.contains(&p) {
            Some('o')
        } else if steps.contains(&p) {
            Some('*')
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpgrid_paths::PathFinder;

    const MAP: &str = "
        S...#
        ..#.#
        ....G
    ";

    #[test]
    fn draws_contiguous_path() {
        let m = AsciiMap::parse(MAP).unwrap();
        let mut pf = PathFinder::new(&m.grid);
        let path = pf
            .astar_path(&m.grid, m.start.unwrap(), m.goal.unwrap())
            .unwrap()
            .unwrap();
        let text = draw_path(&m, &path);
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.matches('*').count(), path.len() - 2);
        assert!(!text.contains('o'));
        assert!(text.starts_with('S'));
    }

    #[test]
    fn marks_jump_points() {
        let m = AsciiMap::parse(MAP).unwrap();
        let mut pf = PathFinder::new(&m.grid);
        let path = pf
            .jps_path(&m.grid, m.start.unwrap(), m.goal.unwrap())
            .unwrap()
            .unwrap();
        let text = draw_path(&m, &path);
        let full = path.expand();
        let marked = text.matches(['*', 'o']).count();
        assert_eq!(marked, full.len() - 2);
    }

    #[test]
    fn algorithm_selection() {
        assert_eq!(parse_algorithms(None).unwrap().len(), 3);
        assert_eq!(parse_algorithms(Some("ALL")).unwrap().len(), 3);
        assert_eq!(
            parse_algorithms(Some("jps")).unwrap(),
            vec![Algorithm::Jps]
        );
        assert!(matches!(
            parse_algorithms(Some("bfs")),
            Err(DemoError::Algorithm(_))
        ));
    }

    #[test]
    fn log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG);
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(Some("jumpgrid_paths=trace")).to_string(),
            "jumpgrid_paths=trace"
        );
    }
}
