use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    time: u64,
    record: u64,
}

#[derive(Debug)]
pub struct SharedData {
    races: Vec<Race>,
    /// The same sheet read with the spaces between digits ignored
    single: Race,
}

/// Number of whole hold times whose distance strictly beats the record.
fn ways_to_win(Race { time, record }: Race) -> u64 {
    let beats = |hold: u64| hold * (time - hold) > record;

    // distance peaks at time / 2
    if !beats(time / 2) {
        return 0;
    }

    // smaller root of hold^2 - time*hold + record = 0, then fixed up exactly
    let discriminant = (time as f64).powi(2) - 4.0 * record as f64;
    let mut low = ((time as f64 - discriminant.max(0.0).sqrt()) / 2.0).floor().max(0.0) as u64;
    low = low.min(time / 2);
    while !beats(low) {
        low += 1;
    }
    while low > 0 && beats(low - 1) {
        low -= 1;
    }

    // winning holds are symmetric around time / 2
    time - 2 * low + 1
}

fn parse_line<'a>(line: Option<&'a str>, label: &str) -> anyhow::Result<&'a str> {
    line.and_then(|l| l.trim().strip_prefix(label))
        .with_context(|| format!("missing {label:?} line"))
}

fn parse_sheet(input: &str) -> anyhow::Result<SharedData> {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());
    let times = parse_line(lines.next(), "Time:")?;
    let records = parse_line(lines.next(), "Distance:")?;

    let numbers = |s: &str| -> anyhow::Result<Vec<u64>> {
        s.split_whitespace()
            .map(|n| n.parse::<u64>().with_context(|| format!("bad number {n:?}")))
            .collect()
    };
    let joined = |s: &str| -> anyhow::Result<u64> {
        let digits: String = s.split_whitespace().collect();
        digits.parse::<u64>().with_context(|| format!("bad number {digits:?}"))
    };

    let (time_values, record_values) = (numbers(times)?, numbers(records)?);
    if time_values.len() != record_values.len() {
        bail!("{} times but {} distances", time_values.len(), record_values.len());
    }

    Ok(SharedData {
        races: time_values
            .into_iter()
            .zip(record_values)
            .map(|(time, record)| Race { time, record })
            .collect(),
        single: Race {
            time: joined(times)?,
            record: joined(records)?,
        },
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_sheet(input).map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .races
            .iter()
            .map(|&race| ways_to_win(race))
            .product::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(ways_to_win(shared.single).to_string())
    }
}
