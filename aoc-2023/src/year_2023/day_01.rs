use std::sync::LazyLock;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "strings"])]
pub struct Solver;

const WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

// anchored so it can be tried at every offset; spelled digits may overlap ("twone")
static DIGIT_AT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{}|[0-9])", WORDS.join("|"))).expect("valid digit pattern")
});

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".to_string()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_calibration(shared, |line| {
            line.bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| u32::from(b - b'0'))
                .collect()
        })
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_calibration(shared, spelled_digits)
    }
}

fn spelled_digits(line: &str) -> Vec<u32> {
    (0..line.len())
        .filter(|&i| line.is_char_boundary(i))
        .filter_map(|i| DIGIT_AT_START.find(&line[i..]))
        .map(|m| match m.as_str().parse::<u32>() {
            Ok(digit) => digit,
            Err(_) => WORDS.iter().position(|w| *w == m.as_str()).map_or(0, |p| p as u32 + 1),
        })
        .collect()
}

fn sum_calibration(
    lines: &[&str],
    digits: impl Fn(&str) -> Vec<u32>,
) -> Result<String, SolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let found = digits(line);
            match (found.first(), found.last()) {
                (Some(first), Some(last)) => Ok(first * 10 + last),
                _ => Err(anyhow!("(line {}) no digit in {:?}", idx + 1, line)),
            }
        })
        .sum::<Result<u32, _>>()
        .map(|total| total.to_string())
        .map_err(SolveError::failed)
}
