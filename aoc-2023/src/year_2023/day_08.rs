use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["2023", "graph"])]
pub struct Solver;

static NODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z0-9]{3}) = \(([A-Z0-9]{3}), ([A-Z0-9]{3})\)$").expect("valid node pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Debug)]
pub struct Network<'a> {
    turns: Vec<Turn>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    /// Steps from `start` until `is_end` holds for the current node.
    ///
    /// Fails on an unknown label or when the walk cycles without ever ending.
    fn steps(&self, start: &'a str, is_end: impl Fn(&str) -> bool) -> anyhow::Result<u64> {
        // (node, turn index) pairs repeat after this many steps
        let limit = self.nodes.len() * self.turns.len();
        let mut current = start;

        for (step, turn) in self.turns.iter().cycle().enumerate().take(limit + 1) {
            if is_end(current) {
                return Ok(step as u64);
            }
            let &(left, right) = self
                .nodes
                .get(current)
                .ok_or_else(|| anyhow!("unknown node {current:?}"))?;
            current = match turn {
                Turn::Left => left,
                Turn::Right => right,
            };
        }

        bail!("walk from {start:?} never reaches an end node")
    }
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

    let turns = lines
        .next()
        .context("missing instructions")?
        .chars()
        .map(|c| match c {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            other => Err(anyhow!("invalid instruction {other:?}")),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut nodes = HashMap::new();
    for line in lines {
        let caps = NODE
            .captures(line)
            .with_context(|| format!("could not parse node from {line:?}"))?;
        let (_, [label, left, right]) = caps.extract();
        if nodes.insert(label, (left, right)).is_some() {
            bail!("duplicate node {label:?}");
        }
    }

    Ok(Network { turns, nodes })
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .steps("AAA", |node| node == "ZZZ")
            .map(|steps| steps.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // each ghost's walk is periodic on the real inputs, so the first
        // arrival of each lines up at the LCM
        let mut starts: Vec<&str> = shared
            .nodes
            .keys()
            .copied()
            .filter(|n| n.ends_with('A'))
            .collect();
        starts.sort_unstable();
        if starts.is_empty() {
            return Err(SolveError::failed("no start nodes ending in 'A'"));
        }

        starts
            .into_iter()
            .map(|start| shared.steps(start, |node| node.ends_with('Z')))
            .try_fold(1, |acc, steps| steps.map(|s| lcm(acc, s)))
            .map(|steps| steps.to_string())
            .map_err(SolveError::failed)
    }
}
