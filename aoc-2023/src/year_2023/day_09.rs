use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["2023", "sequences"])]
pub struct Solver;

/// Next value of `history` by repeated differencing.
fn extrapolate(history: &[i64]) -> i64 {
    let mut row = history.to_vec();
    let mut next = 0;
    while row.iter().any(|&v| v != 0) {
        next += row.last().copied().unwrap_or_default();
        row = row.iter().tuple_windows().map(|(a, b)| b - a).collect();
    }
    next
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                line.split_whitespace()
                    .map(|n| n.parse::<i64>().with_context(|| format!("bad number {n:?}")))
                    .collect::<anyhow::Result<Vec<_>>>()
                    .map_err(|e| anyhow!("(line {}) {:#}", idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|h| extrapolate(h)).sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // extrapolating backwards is extrapolating the reversed history
        Ok(shared
            .iter()
            .map(|h| h.iter().rev().copied().collect_vec())
            .map(|h| extrapolate(&h))
            .sum::<i64>()
            .to_string())
    }
}
