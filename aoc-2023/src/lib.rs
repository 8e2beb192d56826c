//! Advent of Code 2023 puzzle solutions with automatic registration
//!
//! Every day is a `Solver` deriving `AutoRegisterSolver`, so linking this
//! crate is enough for `SolverRegistryBuilder::register_all_plugins` to find
//! them.

pub mod utils;

#[cfg(feature = "year-2023")]
pub mod year_2023;
