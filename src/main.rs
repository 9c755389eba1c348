//! Command-line entry point.
//!
//! Reads a three-line instance file, runs the annealing search, and prints
//! the console protocol: the echoed parameters, one progress line per
//! iteration, the final and best answers, and the inclusion string.

use std::path::PathBuf;

use clap::Parser;

use knapsack_anneal::error::KnapsackError;
use knapsack_anneal::instance::Instance;
use knapsack_anneal::sa::{format_indices, AnnealRunner};

/// Simulated-annealing optimizer for the 0/1 knapsack problem.
#[derive(Parser)]
#[command(name = "knapsack-anneal", version)]
struct Cli {
    /// Path to the instance file.
    input: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("knapsack-anneal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), KnapsackError> {
    let cli = Cli::parse();
    let (instance, config) = Instance::from_path(&cli.input)?;

    println!(
        "k = {} n = {} T = {} delta = {}",
        instance.capacity,
        instance.len(),
        config.initial_temperature,
        config.cooling_step
    );

    let result = AnnealRunner::run_with_observer(&instance, &config, |record| {
        println!("{record}");
    })?;

    println!(
        "founded answer: total_value = {} {}",
        result.current.total_value(),
        format_indices(&result.current.taken_indices())
    );
    println!(
        "best answer: total_value = {} {}",
        result.best.total_value(),
        format_indices(&result.best.taken_indices())
    );
    println!("{}", result.current.inclusion_string());

    Ok(())
}
