use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rcb_core::Difficulty;
use rcb_core::map_file::load_map_file;
use rcb_tools::{MapProblem, check_map};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Validate level map files", long_about = None)]
struct Args {
    /// Map files to check
    #[arg(required = true)]
    maps: Vec<PathBuf>,
    /// Difficulty whose items and pursuer spawn are checked against each map
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,
}

fn describe(problem: &MapProblem) -> String {
    match problem {
        MapProblem::BlockedCell { what, cell } => {
            format!("{what} at ({}, {}) is not walkable", cell.col, cell.row)
        }
        MapProblem::Unreachable { what, cell } => {
            format!("{what} at ({}, {}) cannot be reached from the start", cell.col, cell.row)
        }
        MapProblem::NoLevelEnd => "map has no level-end tile".to_string(),
    }
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut failed = false;
    for path in &args.maps {
        let map = load_map_file(path).with_context(|| path.display().to_string())?;
        let problems = check_map(&map, args.difficulty);
        if problems.is_empty() {
            println!("{}: ok", path.display());
            continue;
        }
        failed = true;
        for problem in &problems {
            println!("{}: {}", path.display(), describe(problem));
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
