//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code 2023 solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers on local puzzle inputs", version)]
pub struct Args {
    /// Puzzle input file; only allowed when the filters select a single day
    pub input: Option<PathBuf>,

    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/day{DD}.txt` inputs
    #[arg(long, env = "AOC_INPUT_DIR", default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.input, None);
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.tags.is_empty());
        assert!(!args.quiet && !args.verbose);
    }

    #[test]
    fn test_single_day_with_input_path() {
        let args =
            Args::try_parse_from(["aoc", "my_input.txt", "-y", "2023", "-d", "5", "-p", "2", "-q"])
                .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("my_input.txt")));
        assert_eq!((args.year, args.day, args.part), (Some(2023), Some(5), Some(2)));
        assert!(args.quiet);
    }

    #[test]
    fn test_tags_and_parallelism() {
        let args = Args::try_parse_from(["aoc", "-t", "2023,grid", "--parallelize-by", "part"])
            .unwrap();
        assert_eq!(args.tags, vec!["2023", "grid"]);
        assert_eq!(args.parallelize_by, ParallelizeBy::Part);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--parallelize-by", "week"]).is_err());
    }
}
