use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug)]
struct Histories {
    rows: Vec<Vec<i64>>,
    // filled in by part 1, reused by part 2
    row_sums: Option<Vec<i64>>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct DependentSolver;

impl AocParser for DependentSolver {
    type SharedData<'a> = Histories;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows = input
            .lines()
            .map(|line| {
                line.split_whitespace()
                    .map(|n| n.parse::<i64>().map_err(ParseError::invalid))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Histories {
            rows,
            row_sums: None,
        })
    }
}

fn row_sums(rows: &[Vec<i64>]) -> Vec<i64> {
    rows.iter().map(|row| row.iter().sum()).collect()
}

impl PartSolver<1> for DependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sums = shared.row_sums.get_or_insert_with(|| row_sums(&shared.rows));
        Ok(sums.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for DependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sums = shared.row_sums.get_or_insert_with(|| row_sums(&shared.rows));
        sums.iter()
            .max()
            .map(|m| m.to_string())
            .ok_or_else(|| SolveError::failed("no rows"))
    }
}

#[test]
fn test_parts_dispatch() {
    let mut shared = DependentSolver::parse("1 2 3\n10 -4").unwrap();
    assert_eq!(DependentSolver::PARTS, 2);
    assert_eq!(DependentSolver::solve_part(&mut shared, 1).unwrap(), "12");
    assert_eq!(DependentSolver::solve_part(&mut shared, 2).unwrap(), "6");
}

#[test]
fn test_part1_caches_for_part2() {
    let mut shared = DependentSolver::parse("1 2 3\n10 -4").unwrap();
    assert!(shared.row_sums.is_none());

    DependentSolver::solve_part(&mut shared, 1).unwrap();
    assert_eq!(shared.row_sums, Some(vec![6, 6]));
}

#[test]
fn test_part2_alone() {
    let mut shared = DependentSolver::parse("5\n7 1").unwrap();
    assert_eq!(DependentSolver::solve_part(&mut shared, 2).unwrap(), "8");
}

#[test]
fn test_part2_error_propagates() {
    let mut shared = DependentSolver::parse("").unwrap();
    assert!(matches!(
        DependentSolver::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
}

#[test]
fn test_unknown_part_not_implemented() {
    let mut shared = DependentSolver::parse("1").unwrap();
    assert!(matches!(
        DependentSolver::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        DependentSolver::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
}
