//! Property tests for part dispatch and part bounds

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverExt,
    SolverInstance,
};
use proptest::prelude::*;

/// Sums or multiplies a comma separated list of numbers
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Csv;

impl AocParser for Csv {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.trim().parse().map_err(ParseError::invalid))
            .collect()
    }
}

impl PartSolver<1> for Csv {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Csv {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

/// Answers with the part number, for any `PARTS`
struct Fixed<const N: u8>;

impl<const N: u8> AocParser for Fixed<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for Fixed<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{}", part))
    }
}

fn csv(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn derived_dispatch_matches_part_solver(
        numbers in prop::collection::vec(-20i64..20, 1..6),
        part in 1u8..=2,
    ) {
        let input = csv(&numbers);
        let mut via_dispatch = Csv::parse(&input).unwrap();
        let mut direct = Csv::parse(&input).unwrap();

        let dispatched = Csv::solve_part(&mut via_dispatch, part).unwrap();
        let expected = match part {
            1 => <Csv as PartSolver<1>>::solve(&mut direct),
            _ => <Csv as PartSolver<2>>::solve(&mut direct),
        }
        .unwrap();

        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn derived_dispatch_rejects_unknown_parts(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = Csv::parse("1,2").unwrap();
        match Csv::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn checked_range_rejects_outside_parts(part in 0u8..=255) {
        let mut shared = ();
        let result = Fixed::<3>::solve_part_checked_range(&mut shared, part);

        if part == 0 || part > 3 {
            prop_assert!(matches!(result, Err(SolveError::PartOutOfRange(p)) if p == part));
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{}", part));
        }
    }

    #[test]
    fn instance_answers_match_direct_calls(numbers in prop::collection::vec(0i64..50, 1..6)) {
        let input = csv(&numbers);
        let mut instance = SolverInstance::<Csv>::new(2023, 9, &input).unwrap();

        prop_assert_eq!(instance.shared(), &numbers);
        prop_assert!(instance.parse_duration() >= chrono::TimeDelta::zero());

        let result = instance.solve(1).unwrap();
        prop_assert_eq!(result.answer.clone(), numbers.iter().sum::<i64>().to_string());
        prop_assert!(result.duration() >= chrono::TimeDelta::zero());
    }
}

#[test]
fn test_instance_metadata() {
    let instance = SolverInstance::<Fixed<1>>::new(2023, 15, "").unwrap();
    assert_eq!(instance.year(), 2023);
    assert_eq!(instance.day(), 15);
    assert_eq!(instance.parts(), 1);
    assert!(instance.parse_end() >= instance.parse_start());
}

#[test]
fn test_instance_propagates_parse_error() {
    let result = SolverInstance::<Csv>::new(2023, 9, "1,x");
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

#[test]
fn test_instance_checks_range() {
    let mut instance = SolverInstance::<Csv>::new(2023, 9, "2,3").unwrap();
    assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
    assert_eq!(instance.solve(2).unwrap().answer, "6");
}
