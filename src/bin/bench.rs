//! SlotDB Benchmark Driver
//!
//! Runs the store benchmarks against generated data and prints the timings.

use clap::{Parser, Subcommand};
use slotdb::bench::{Measurement, PerformanceRunner};
use slotdb::config::{BenchConfig, DeletionPolicy};
use tracing_subscriber::{fmt, EnvFilter};

/// SlotDB benchmark driver
#[derive(Parser, Debug)]
#[command(name = "slotdb-bench")]
#[command(about = "Benchmarks for the SlotDB in-memory record store")]
#[command(version)]
struct Args {
    /// Record count for fixed-size runs
    #[arg(short, long, default_value = "1000000")]
    records: u32,

    /// Repetitions of the fixed-size find benchmark
    #[arg(long, default_value = "5")]
    runs: u32,

    /// Number of escalating find runs (10^2, 10^3, ...)
    #[arg(long, default_value = "6")]
    growth_steps: u32,

    /// Number of delete runs (ids 10, 100, ...)
    #[arg(long, default_value = "5")]
    delete_steps: u32,

    /// Use physical erase instead of tombstones
    #[arg(long)]
    physical: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find matching records (several hits, fixed then escalating sizes)
    Find,

    /// Find a single unique record
    FindOne,

    /// Remove records by id
    Remove,

    /// Delete then re-insert records
    Add,

    /// Run every suite
    All,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slotdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("SlotDB Bench v{}", slotdb::VERSION);

    let policy = if args.physical {
        DeletionPolicy::Physical
    } else {
        DeletionPolicy::Tombstone
    };

    let config = BenchConfig::builder()
        .record_count(args.records)
        .same_size_runs(args.runs)
        .growth_steps(args.growth_steps)
        .delete_steps(args.delete_steps)
        .deletion_policy(policy)
        .build();

    let runner = match PerformanceRunner::new(config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Invalid benchmark configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Find => runner.run_find_suite(),
        Commands::FindOne => runner.run_find_one_suite(),
        Commands::Remove => runner.run_remove_suite(),
        Commands::Add => runner.run_add_suite(),
        Commands::All => run_all(&runner),
    };

    match result {
        Ok(measurements) => print_summary(&measurements),
        Err(e) => {
            tracing::error!("Benchmark failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all(runner: &PerformanceRunner) -> slotdb::Result<Vec<Measurement>> {
    let mut all = runner.run_find_one_suite()?;
    all.extend(runner.run_find_suite()?);
    all.extend(runner.run_remove_suite()?);
    all.extend(runner.run_add_suite()?);
    Ok(all)
}

fn print_summary(measurements: &[Measurement]) {
    println!("{:<28} {:>10} {:>14}", "operation", "records", "milliseconds");
    for m in measurements {
        println!(
            "{:<28} {:>10} {:>14.3}",
            m.operation,
            m.records,
            m.elapsed.as_secs_f64() * 1000.0
        );
    }
}
