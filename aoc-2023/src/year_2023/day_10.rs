use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "graph"])]
pub struct Solver;

const NORTH: u8 = 1;
const SOUTH: u8 = 2;
const EAST: u8 = 4;
const WEST: u8 = 8;
const DIRECTIONS: [u8; 4] = [NORTH, SOUTH, EAST, WEST];

fn offset(dir: u8) -> (isize, isize) {
    match dir {
        NORTH => (-1, 0),
        SOUTH => (1, 0),
        EAST => (0, 1),
        _ => (0, -1),
    }
}

fn opposite(dir: u8) -> u8 {
    match dir {
        NORTH => SOUTH,
        SOUTH => NORTH,
        EAST => WEST,
        _ => EAST,
    }
}

/// Directions a tile connects to, as a bit set.
fn connections(tile: u8) -> u8 {
    match tile {
        b'|' => NORTH | SOUTH,
        b'-' => EAST | WEST,
        b'L' => NORTH | EAST,
        b'J' => NORTH | WEST,
        b'7' => SOUTH | WEST,
        b'F' => SOUTH | EAST,
        _ => 0,
    }
}

#[derive(Debug)]
pub struct SharedData {
    /// Connection bits per tile, with the start tile's shape filled in
    pipes: Grid<u8>,
    on_loop: Grid<bool>,
    loop_len: usize,
}

fn parse_maze(input: &str) -> Result<SharedData, ParseError> {
    let tiles = Grid::parse(input)?;
    let start = tiles
        .position(|&t| t == b'S')
        .ok_or_else(|| ParseError::MissingData("no start tile 'S'".to_string()))?;

    let mut pipes = Grid::filled(tiles.width(), tiles.height(), 0u8);
    for (pos, &tile) in tiles.iter() {
        if let Some(cell) = pipes.get_mut(pos) {
            *cell = connections(tile);
        }
    }

    // the start connects wherever a neighbour points back at it
    let start_shape = DIRECTIONS
        .into_iter()
        .filter(|&dir| {
            tiles
                .step(start, offset(dir))
                .and_then(|next| pipes.get(next))
                .is_some_and(|&mask| mask & opposite(dir) != 0)
        })
        .fold(0, |shape, dir| shape | dir);
    if start_shape.count_ones() != 2 {
        return Err(ParseError::InvalidFormat(format!(
            "start tile at {start:?} must connect to exactly two pipes"
        )));
    }
    if let Some(cell) = pipes.get_mut(start) {
        *cell = start_shape;
    }

    let (on_loop, loop_len) = trace_loop(&pipes, start)?;
    Ok(SharedData {
        pipes,
        on_loop,
        loop_len,
    })
}

fn trace_loop(pipes: &Grid<u8>, start: Pos) -> Result<(Grid<bool>, usize), ParseError> {
    let broken =
        |pos: Pos| ParseError::InvalidFormat(format!("loop from start is broken at {pos:?}"));

    let mut on_loop = Grid::filled(pipes.width(), pipes.height(), false);
    let mut pos = start;
    let mut heading = DIRECTIONS
        .into_iter()
        .find(|&dir| pipes.get(start).is_some_and(|&mask| mask & dir != 0))
        .ok_or_else(|| broken(start))?;
    let mut len = 0;

    loop {
        if let Some(cell) = on_loop.get_mut(pos) {
            *cell = true;
        }
        len += 1;

        let next = pipes.step(pos, offset(heading)).ok_or_else(|| broken(pos))?;
        let mask = pipes.get(next).copied().unwrap_or_default();
        if mask & opposite(heading) == 0 {
            return Err(broken(next));
        }
        if next == start {
            return Ok((on_loop, len));
        }
        pos = next;
        heading = mask & !opposite(heading);
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_maze(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.loop_len / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // scanline parity: crossing a loop tile with a northern connection flips inside/outside
        let mut enclosed = 0;
        for row in 0..shared.pipes.height() {
            let mut inside = false;
            for col in 0..shared.pipes.width() {
                if shared.on_loop.row(row)[col] {
                    inside ^= shared.pipes.row(row)[col] & NORTH != 0;
                } else if inside {
                    enclosed += 1;
                }
            }
        }
        Ok(enclosed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SQUARE: &str = ".....
.S-7.
.|.|.
.L-J.
.....
";

    const COMPLEX: &str = "7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ
";

    const ENCLOSED: &str = "...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const SQUEEZED: &str = "..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";

    const LARGER: &str = ".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
";

    fn run(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part_1_examples() {
        assert_eq!(run(SQUARE, 1), "4");
        assert_eq!(run(COMPLEX, 1), "8");
    }

    #[test]
    fn test_part_2_examples() {
        assert_eq!(run(ENCLOSED, 2), "4");
        assert_eq!(run(SQUEEZED, 2), "4");
        assert_eq!(run(LARGER, 2), "8");
    }

    #[test]
    fn test_start_shape_is_inferred() {
        let shared = Solver::parse(SQUARE).unwrap();
        assert_eq!(shared.pipes.get((1, 1)), Some(&(SOUTH | EAST)));
        assert_eq!(shared.loop_len, 8);
    }

    #[test]
    fn test_start_on_edge_ignores_outside() {
        // 'S' in the corner only has two in-bounds neighbours
        let shared = Solver::parse("S7\nLJ\n").unwrap();
        assert_eq!(shared.pipes.get((0, 0)), Some(&(SOUTH | EAST)));
        assert_eq!(shared.loop_len, 4);
    }

    #[test]
    fn test_missing_or_isolated_start() {
        assert!(matches!(Solver::parse("F7\nLJ\n"), Err(ParseError::MissingData(_))));
        assert!(Solver::parse("...\n.S.\n...\n").is_err());
    }
}
