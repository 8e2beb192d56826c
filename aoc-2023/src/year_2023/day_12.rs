use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::dp_cache::{DpCache, DpProblem, Vec2DBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "dp"])]
pub struct Solver;

const UNFOLD: usize = 5;

/// One row of the condition records.
#[derive(Debug, Clone)]
pub struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    fn unfold(&self) -> Record {
        Record {
            springs: itertools::repeat_n(self.springs.as_slice(), UNFOLD)
                .collect_vec()
                .join(&b'?'),
            groups: self.groups.repeat(UNFOLD),
        }
    }

    fn arrangements(&self) -> u64 {
        let problem = Arrangements {
            springs: &self.springs,
            groups: &self.groups,
        };
        let backend = Vec2DBackend::new(self.springs.len() + 1, self.groups.len() + 1);
        DpCache::with_problem(backend, problem).get(&(0, 0))
    }
}

/// Arrangements of `springs[i..]` matching `groups[g..]`, indexed by `(i, g)`.
struct Arrangements<'a> {
    springs: &'a [u8],
    groups: &'a [usize],
}

impl Arrangements<'_> {
    /// Whether a damaged run of `len` can start at `i` and end cleanly.
    fn fits(&self, i: usize, len: usize) -> bool {
        let end = i + len;
        end <= self.springs.len()
            && !self.springs[i..end].contains(&b'.')
            && self.springs.get(end) != Some(&b'#')
    }
}

impl DpProblem<(usize, usize), u64> for Arrangements<'_> {
    fn deps(&self, &(i, g): &(usize, usize)) -> Vec<(usize, usize)> {
        let Some(&spring) = self.springs.get(i) else {
            return vec![];
        };

        let mut deps = Vec::with_capacity(2);
        if spring != b'#' {
            deps.push((i + 1, g));
        }
        if spring != b'.' {
            if let Some(&len) = self.groups.get(g) {
                if self.fits(i, len) {
                    // skip the run and the operational spring after it
                    deps.push(((i + len + 1).min(self.springs.len()), g + 1));
                }
            }
        }
        deps
    }

    fn compute(&self, &(i, g): &(usize, usize), deps: Vec<u64>) -> u64 {
        if i == self.springs.len() {
            u64::from(g == self.groups.len())
        } else {
            deps.iter().sum()
        }
    }
}

fn parse_record(line: &str) -> anyhow::Result<Record> {
    let (springs, groups) = line.split_once(' ').context("expected '<springs> <groups>'")?;
    if let Some(bad) = springs.bytes().find(|&b| !matches!(b, b'.' | b'#' | b'?')) {
        bail!("unknown spring {:?}", char::from(bad));
    }
    let groups = groups
        .split(',')
        .map(|n| match n.trim().parse::<usize>() {
            Ok(0) => Err(anyhow!("group size must be positive")),
            Ok(len) => Ok(len),
            Err(e) => Err(anyhow!("bad group size {n:?}: {e}")),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Record {
        springs: springs.as_bytes().to_vec(),
        groups,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(idx, line)| parse_record(line).map_err(|e| anyhow!("(line {}) {}", idx + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Record::arrangements).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|record| record.unfold().arrangements())
            .sum::<u64>()
            .to_string())
    }
}
