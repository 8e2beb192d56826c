use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["2023", "hashing"])]
pub struct Solver;

static STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)(?:=([1-9])|-)$").expect("valid step pattern"));

const BOXES: usize = 256;

/// The HASH algorithm.
fn hash(s: &str) -> usize {
    s.bytes().fold(0, |acc, b| (acc + usize::from(b)) * 17 % BOXES)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert { label: String, focal_length: usize },
    Remove { label: String },
}

impl Operation {
    fn parse(step: &str) -> Result<Self, ParseError> {
        let caps = STEP
            .captures(step)
            .ok_or_else(|| ParseError::InvalidFormat(format!("bad step {step:?}")))?;
        let label = caps[1].to_string();
        Ok(match caps.get(2) {
            Some(focal) => Operation::Insert {
                label,
                focal_length: usize::from(focal.as_str().as_bytes()[0] - b'0'),
            },
            None => Operation::Remove { label },
        })
    }
}

#[derive(Debug)]
pub struct SharedData {
    steps: Vec<String>,
    operations: Vec<Operation>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sequence: String = input.chars().filter(|&c| c != '\n' && c != '\r').collect();
        let steps: Vec<String> = sequence
            .trim()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if steps.is_empty() {
            return Err(ParseError::MissingData("empty initialization sequence".to_string()));
        }
        let operations = steps.iter().map(|s| Operation::parse(s)).collect::<Result<_, _>>()?;
        Ok(SharedData { steps, operations })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.steps.iter().map(|s| hash(s)).sum::<usize>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut boxes: Vec<Vec<(&str, usize)>> = vec![Vec::new(); BOXES];
        for op in &shared.operations {
            match op {
                Operation::Insert { label, focal_length } => {
                    let lenses = &mut boxes[hash(label)];
                    match lenses.iter_mut().find(|(l, _)| *l == label.as_str()) {
                        Some(lens) => lens.1 = *focal_length,
                        None => lenses.push((label.as_str(), *focal_length)),
                    }
                }
                Operation::Remove { label } => {
                    boxes[hash(label)].retain(|(l, _)| *l != label.as_str());
                }
            }
        }

        let power: usize = boxes
            .iter()
            .enumerate()
            .flat_map(|(box_idx, lenses)| {
                lenses
                    .iter()
                    .enumerate()
                    .map(move |(slot, &(_, focal))| (box_idx + 1) * (slot + 1) * focal)
            })
            .sum();
        Ok(power.to_string())
    }
}
