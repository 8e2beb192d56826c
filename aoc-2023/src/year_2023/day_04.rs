use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["2023", "counting"])]
pub struct Solver;

fn parse_numbers(s: &str) -> anyhow::Result<Vec<u32>> {
    s.split_whitespace()
        .map(|n| n.parse::<u32>().with_context(|| format!("bad number {n:?}")))
        .collect()
}

/// Count of own numbers that are also winning numbers.
fn parse_matches(line: &str) -> anyhow::Result<usize> {
    let (_, numbers) = line.split_once(':').context("missing ':'")?;
    let (winning, own) = numbers.split_once('|').context("missing '|'")?;
    let winning: HashSet<u32> = parse_numbers(winning)?.into_iter().collect();
    Ok(parse_numbers(own)?.iter().filter(|n| winning.contains(n)).count())
}

impl AocParser for Solver {
    /// Matches per card, in card order.
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                parse_matches(line).map_err(|e| anyhow!("(line {}) {:#}", idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut copies = vec![1u64; shared.len()];
        for (card, &matches) in shared.iter().enumerate() {
            // won copies stop at the last card
            let last = (card + matches).min(shared.len() - 1);
            for next in card + 1..=last {
                copies[next] += copies[card];
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}
