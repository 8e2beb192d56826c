//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError, PartError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, PartError>,
    pub solve_duration: TimeDelta,
    /// Time spent parsing, only on the first part solved against that parse
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: PartError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// The parts of the executor shared by reference with worker threads
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone(), config.input.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            count = work_items.len(),
            mode = ?self.sync_executor_config.parallelize_by,
            threads = self.thread_pool.current_num_threads(),
            "scheduling solvers"
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                // work items come sorted by year, so adjacent grouping is enough
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each work item in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singletons = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel_grouped(singletons, &tx)
            }
        }
    }

    /// Run groups in parallel; items inside a group run in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run given the part filter and the solver's part count
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if (1..=max_parts).contains(&p) => p..=p,
        #[allow(clippy::reversed_empty_ranges)]
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Read the input for one work item and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match sync_executor_config.inputs.read(year, day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year, day, error = %e, "input unavailable");
            let message = e.to_string();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, PartError::Input(message.clone())))?;
            }
            return Ok(());
        }
    };
    debug!(year, day, bytes = input.len(), "input loaded");

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_parts_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

/// Every part gets its own freshly parsed solver; results go out in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => SolverResult::failed(year, day, part, e.into()),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results.into_iter().try_for_each(|result| send(tx, result))
}

/// Parse once and solve the parts in order against the same instance
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            warn!(year, day, error = %e, "solver creation failed");
            return work.parts.clone().try_for_each(|part| {
                let error = match &e {
                    SolverError::ParseError(parse) => SolverError::ParseError(parse.clone()),
                    other => SolverError::ParseError(ParseError::Other(other.to_string())),
                };
                send(tx, SolverResult::failed(year, day, part, error.into()))
            });
        }
    };

    for (i, part) in work.parts.clone().enumerate() {
        let mut result = solve_part(year, day, part, &mut *solver);
        if i > 0 {
            // the first part already accounts for the shared parse
            result.parse_duration = None;
        }
        send(tx, result)?;
    }
    Ok(())
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    let started = chrono::Utc::now();

    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(SolverError::from(e).into()),
            solve_duration: chrono::Utc::now() - started,
            parse_duration,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{AocParser, SolveError, Solver, SolverRegistryBuilder};
    use std::fs;
    use tempfile::TempDir;

    /// Part 1 sums the numbers, part 2 multiplies them
    struct Arith;

    impl AocParser for Arith {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(ParseError::invalid))
                .collect()
        }
    }

    impl Solver for Arith {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.iter().sum::<i64>().to_string()),
                2 => Ok(shared.iter().product::<i64>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    fn config(dir: &TempDir, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input: None,
            input_dir: dir.path().to_path_buf(),
            thread_count: 2,
            parallelize_by,
            quiet: true,
            verbose: false,
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver::<Arith>(2023, 1)
            .and_then(|b| b.register_solver::<Arith>(2023, 2))
            .and_then(|b| b.register_solver::<Arith>(2023, 3))
            .unwrap()
            .build()
    }

    fn write_input(dir: &TempDir, day: u8, content: &str) {
        let year_dir = dir.path().join("2023");
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join(format!("day{:02}.txt", day)), content).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<SolverResult> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_work_items_respect_filters() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, ParallelizeBy::Sequential);
        cfg.day_filter = Some(2);
        cfg.part_filter = Some(1);
        let executor = Executor::new(registry(), &cfg).unwrap();

        assert_eq!(
            executor.collect_work_items(),
            vec![WorkItem {
                year: 2023,
                day: 2,
                parts: 1..=1
            }]
        );
    }

    #[test]
    fn test_every_mode_produces_the_same_answers() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "1 2 3");
        write_input(&dir, 2, "4 5");
        write_input(&dir, 3, "x");

        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let executor = Executor::new(registry(), &config(&dir, mode)).unwrap();
            let results = run(&executor);
            let answers: Vec<Option<&str>> =
                results.iter().map(|r| r.answer.as_deref().ok()).collect();

            assert_eq!(
                answers,
                vec![Some("6"), Some("6"), Some("9"), Some("20"), None, None],
                "mode {mode:?}"
            );
        }
    }

    #[test]
    fn test_missing_input_yields_error_results() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "1 2 3");
        let executor = Executor::new(registry(), &config(&dir, ParallelizeBy::Day)).unwrap();

        let results = run(&executor);
        assert_eq!(results.len(), 6);
        let missing: Vec<(u8, u8)> = results
            .iter()
            .filter(|r| matches!(r.answer, Err(PartError::Input(_))))
            .map(|r| (r.day, r.part))
            .collect();
        assert_eq!(missing, vec![(2, 1), (2, 2), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_results_carry_timing() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "2 2");
        let mut cfg = config(&dir, ParallelizeBy::Sequential);
        cfg.day_filter = Some(1);
        let executor = Executor::new(registry(), &cfg).unwrap();

        let results = run(&executor);
        for result in &results {
            assert_eq!(result.answer.as_deref().ok(), Some("4"));
            assert!(result.solve_duration >= TimeDelta::zero());
        }
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn test_shared_parse_is_counted_once() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "3 4");
        write_input(&dir, 2, "5");

        for mode in [ParallelizeBy::Sequential, ParallelizeBy::Year, ParallelizeBy::Day] {
            let executor = Executor::new(registry(), &config(&dir, mode)).unwrap();
            let parsed: Vec<(u8, u8)> = run(&executor)
                .iter()
                .filter(|r| r.parse_duration.is_some())
                .map(|r| (r.day, r.part))
                .collect();
            assert_eq!(parsed, vec![(1, 1), (2, 1)], "mode {mode:?}");
        }

        // each part parses on its own
        let executor = Executor::new(registry(), &config(&dir, ParallelizeBy::Part)).unwrap();
        let parsed = run(&executor)
            .iter()
            .filter(|r| r.parse_duration.is_some())
            .count();
        assert_eq!(parsed, 4);
    }
}
