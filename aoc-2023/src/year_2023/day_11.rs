use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["2023", "grid"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Galaxy row indices, one per galaxy
    rows: Vec<u64>,
    /// Galaxy column indices, one per galaxy
    cols: Vec<u64>,
}

/// Sum of pairwise distances along one axis once every empty line between
/// galaxies counts `factor` times.
fn axis_distance(coords: &[u64], factor: u64) -> u64 {
    let mut sorted = coords.to_vec();
    sorted.sort_unstable();

    // expanded coordinates, walking the sorted positions
    let mut expanded = Vec::with_capacity(sorted.len());
    let mut shift = 0;
    for (i, &c) in sorted.iter().enumerate() {
        if i > 0 {
            let gap = c - sorted[i - 1];
            if gap > 1 {
                shift += (gap - 1) * (factor - 1);
            }
        }
        expanded.push(c + shift);
    }

    // each coordinate is subtracted by every earlier one
    expanded
        .iter()
        .enumerate()
        .map(|(i, &c)| c * i as u64)
        .sum::<u64>()
        - expanded
            .iter()
            .enumerate()
            .map(|(i, &c)| c * (expanded.len() - 1 - i) as u64)
            .sum::<u64>()
}

fn total_distance(shared: &SharedData, factor: u64) -> u64 {
    axis_distance(&shared.rows, factor) + axis_distance(&shared.cols, factor)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let (rows, cols) = grid
            .iter()
            .filter(|(_, cell)| **cell == b'#')
            .map(|((row, col), _)| (row as u64, col as u64))
            .unzip();
        Ok(SharedData { rows, cols })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(shared, 1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn test_part_1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "374");
    }

    #[test]
    fn test_larger_expansions() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(total_distance(&shared, 10), 1030);
        assert_eq!(total_distance(&shared, 100), 8410);
    }

    #[test]
    fn test_no_galaxies() {
        let mut shared = Solver::parse("...\n...\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "0");
    }

    proptest! {
        #[test]
        fn prop_axis_distance_matches_pairwise(
            coords in prop::collection::vec(0u64..50, 0..12),
            factor in 1u64..20,
        ) {
            let occupied: std::collections::BTreeSet<u64> = coords.iter().copied().collect();
            let expand = |c: u64| {
                c + (0..c).filter(|x| !occupied.contains(x)).count() as u64 * (factor - 1)
            };

            let mut brute = 0;
            for i in 0..coords.len() {
                for j in i + 1..coords.len() {
                    brute += expand(coords[i]).abs_diff(expand(coords[j]));
                }
            }
            prop_assert_eq!(axis_distance(&coords, factor), brute);
        }
    }
}
