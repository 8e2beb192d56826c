//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod logger;
mod output;

// Link the 2023 solutions so their plugins are collected
use aoc_2023 as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, SolverResult, WorkItem};
use inputs::InputStore;
use output::OutputFormatter;
use tracing::{debug, warn};

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args);
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    debug!(solvers = registry.len(), "registry built");

    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    validate_explicit_input(&config, &work_items)?;

    // Report missing inputs up front; their parts still come back as errors
    let missing = check_missing_inputs(&work_items, executor.inputs());
    if !missing.is_empty() {
        eprintln!("Missing {} input file(s):", missing.len());
        for path in &missing {
            warn!(path = %path.display(), "missing input");
            eprintln!("  - {}", path.display());
        }
    }

    run_executor(executor, &work_items, config.quiet)
}

/// An explicit input file only makes sense for exactly one selected solver
fn validate_explicit_input(config: &Config, work_items: &[WorkItem]) -> Result<(), CliError> {
    match (&config.input, work_items.len()) {
        (Some(_), n) if n != 1 => Err(CliError::Config(format!(
            "an input file needs exactly one selected solver, but {} match; \
             narrow it down with --year/--day",
            n
        ))),
        _ => Ok(()),
    }
}

/// Input paths that do not exist for the selected work items
fn check_missing_inputs(work_items: &[WorkItem], inputs: &InputStore) -> Vec<std::path::PathBuf> {
    work_items
        .iter()
        .filter(|w| !inputs.contains(w.year, w.day))
        .map(|w| inputs.input_path(w.year, w.day))
        .collect()
}

/// Run the executor and print results in (year, day, part) order
fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    // only non-empty if a result went missing
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    check_failures(&results)
}

/// Any failed part fails the whole run
fn check_failures(results: &[SolverResult]) -> Result<(), CliError> {
    let failed = results.iter().filter(|r| r.answer.is_err()).count();
    if failed > 0 {
        return Err(CliError::PartsFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Build registry with tag filtering; every given tag must be present
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
