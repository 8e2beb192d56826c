//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses a puzzle input into the data shared by every part of a day.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Calibration;
///
/// impl AocParser for Calibration {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().collect())
///     }
/// }
///
/// let lines = Calibration::parse("1abc2\npqr3stu8vwx").unwrap();
/// assert_eq!(lines.len(), 2);
/// ```
pub trait AocParser {
    /// Data produced by `parse` and handed mutably to each part.
    ///
    /// Borrow from the input (`&'a str`) when no transformation is needed,
    /// own it otherwise. Parts may stash intermediate results here for later
    /// parts to reuse.
    type SharedData<'a>: 'a;

    /// Parse the raw puzzle text.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement one of these per part and derive [`AocSolver`](crate::AocSolver)
/// to get the runtime dispatch in [`Solver::solve_part`] for free.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
///     }
/// }
///
/// let mut shared = Depths::parse("3\n9\n4").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut shared).unwrap(), "9");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Compute the answer for this part.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete solver for one year/day.
///
/// Usually generated by `#[derive(AocSolver)]`; a hand-written impl looks like:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Hash;
///
/// impl AocParser for Hash {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim().split(',').collect())
///     }
/// }
///
/// impl Solver for Hash {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.len().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut shared = Hash::parse("rn=1,cm-\n").unwrap();
/// assert_eq!(Hash::solve_part(&mut shared, 1).unwrap(), "2");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve `part` (1-based).
    ///
    /// Returns `SolveError::PartNotImplemented` for parts the solver does not know.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked part dispatch, available on every [`Solver`].
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`] but rejects `0` and anything above `PARTS`
    /// with `SolveError::PartOutOfRange` before touching the solver.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
