use std::collections::{BTreeSet, HashMap};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

/// A number in the schematic and the symbols touching it.
#[derive(Debug)]
pub struct PartNumber {
    value: u32,
    symbols: BTreeSet<Pos>,
}

pub struct SharedData {
    grid: Grid<u8>,
    numbers: Vec<PartNumber>,
}

fn is_symbol(cell: u8) -> bool {
    cell != b'.' && !cell.is_ascii_digit()
}

fn scan_numbers(grid: &Grid<u8>) -> Vec<PartNumber> {
    let mut numbers = Vec::new();
    for row in 0..grid.height() {
        let cells = grid.row(row);
        let mut col = 0;
        while col < cells.len() {
            if !cells[col].is_ascii_digit() {
                col += 1;
                continue;
            }

            let start = col;
            let mut value = 0u32;
            while col < cells.len() && cells[col].is_ascii_digit() {
                value = value * 10 + u32::from(cells[col] - b'0');
                col += 1;
            }

            let symbols = (start..col)
                .flat_map(|c| grid.neighbours8((row, c)))
                .filter(|&pos| grid.get(pos).is_some_and(|&cell| is_symbol(cell)))
                .collect();
            numbers.push(PartNumber { value, symbols });
        }
    }
    numbers
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let numbers = scan_numbers(&grid);
        Ok(SharedData { grid, numbers })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .numbers
            .iter()
            .filter(|n| !n.symbols.is_empty())
            .map(|n| n.value)
            .sum::<u32>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut gears: HashMap<Pos, Vec<u32>> = HashMap::new();
        for number in &shared.numbers {
            for &pos in &number.symbols {
                if shared.grid.get(pos) == Some(&b'*') {
                    gears.entry(pos).or_default().push(number.value);
                }
            }
        }

        Ok(gears
            .values()
            .filter(|parts| parts.len() == 2)
            .map(|parts| u64::from(parts[0]) * u64::from(parts[1]))
            .sum::<u64>()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    fn run(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part_1_example() {
        assert_eq!(run(EXAMPLE, 1), "4361");
    }

    #[test]
    fn test_part_2_example() {
        assert_eq!(run(EXAMPLE, 2), "467835");
    }

    #[test]
    fn test_number_at_row_end_and_diagonal_symbol() {
        assert_eq!(run("..12\n.#..\n", 1), "12");
        assert_eq!(run("12..\n...#\n", 1), "0");
    }

    #[test]
    fn test_gear_needs_exactly_two_numbers() {
        assert_eq!(run("2*3*4\n", 2), "18");
        assert_eq!(run("2.3\n.*.\n.4.\n", 2), "0");
    }
}
