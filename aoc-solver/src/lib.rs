//! Advent of Code Solver Library
//!
//! The framework every 2023 solution plugs into. A solver parses its puzzle
//! input once into shared data and then answers each part against it.
//!
//! # Overview
//!
//! - [`AocParser`] turns the raw input into `SharedData`
//! - [`PartSolver<N>`] answers part `N`
//! - [`Solver`] dispatches a runtime part number, usually generated by
//!   `#[derive(AocSolver)]`
//! - [`SolverRegistry`] maps year/day to solver factories; plugins submitted
//!   with `#[derive(AutoRegisterSolver)]` are collected with `inventory`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
//! };
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Sonar;
//!
//! impl AocParser for Sonar {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split_whitespace()
//!             .map(|n| n.parse().map_err(ParseError::invalid))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sonar {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Sonar {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Sonar>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1 2 3 4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "10");
//! assert_eq!(solver.solve(2).unwrap().answer, "24");
//! ```
//!
//! # Sharing work between parts
//!
//! Both parts receive `&mut SharedData`, so a part can cache an intermediate
//! result (e.g. in an `Option` field) that the other part picks up. Parts must
//! still work when called alone.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    RegisterableSolver, SolverFactory, SolverInfo, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the AutoRegisterSolver derive
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
