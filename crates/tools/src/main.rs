use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rcb_tools::replay_journal_file;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Re-simulate a saved round journal", long_about = None)]
struct Args {
    /// Path to the round journal (.jsonl)
    #[arg(short, long)]
    journal: PathBuf,
    /// Map file the round was played on; defaults to the embedded map for its difficulty
    #[arg(short, long)]
    map: Option<PathBuf>,
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let summary = replay_journal_file(&args.journal, args.map.as_deref(), args.max_ticks)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("Replay complete.");
    println!("Seed: {} ({})", summary.seed, summary.difficulty);
    println!("Recorded ticks: {}", summary.recorded_ticks);
    println!("Final state: {}", summary.final_state);
    println!("Final tick: {}", summary.final_tick);
    println!("Final score: {}", summary.final_score);
    println!("Snapshot hash: {}", summary.snapshot_hash_hex);

    Ok(())
}
