use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023", "parsing"])]
pub struct Solver;

/// Cube counts; colours absent from a reveal are zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    fn contains(&self, other: &Cubes) -> bool {
        other.red <= self.red && other.green <= self.green && other.blue <= self.blue
    }

    fn max(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

#[derive(Debug)]
pub struct Game {
    id: u32,
    reveals: Vec<Cubes>,
}

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

fn parse_reveal(s: &str) -> anyhow::Result<Cubes> {
    let mut cubes = Cubes::default();
    for entry in s.split(',') {
        let (count, colour) = entry
            .trim()
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected '<count> <colour>', got {:?}", entry.trim()))?;
        let count: u32 = count.parse().with_context(|| format!("bad count {count:?}"))?;
        match colour {
            "red" => cubes.red = count,
            "green" => cubes.green = count,
            "blue" => cubes.blue = count,
            other => bail!("unknown colour {other:?}"),
        }
    }
    Ok(cubes)
}

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (header, reveals) = line.split_once(':').context("missing ':'")?;
    let id = header
        .strip_prefix("Game ")
        .context("missing 'Game' prefix")?
        .trim()
        .parse::<u32>()
        .context("bad game id")?;
    let reveals = reveals.split(';').map(parse_reveal).collect::<anyhow::Result<_>>()?;
    Ok(Game { id, reveals })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| parse_game(line).map_err(|e| anyhow!("(line {}) {:#}", idx + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|game| game.reveals.iter().all(|r| BAG.contains(r)))
            .map(|game| game.id)
            .sum::<u32>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|game| game.reveals.iter().copied().fold(Cubes::default(), Cubes::max).power())
            .sum::<u32>()
            .to_string())
    }
}
