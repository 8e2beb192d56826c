//! Error types for the solver library

use thiserror::Error;

/// Failure to turn puzzle text into shared data
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input doesn't match the expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A required section or value is absent
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

impl ParseError {
    /// Shorthand used by solutions that build their messages with `anyhow`.
    pub fn invalid(err: impl std::fmt::Display) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

/// Failure while solving one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver has no implementation for this part
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part number is 0 or larger than the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The puzzle data could not produce an answer
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error (including `anyhow::Error`) as `SolveFailed`.
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::SolveFailed(err.into())
    }
}

/// Error from registry lookups and solver creation
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Year or day outside of what the registry can store
    #[error("Invalid year {0} or day {1}")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A solver is already registered for this year-day combination
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    #[error("Cannot register solver for year {0} day {1}: out of bounds")]
    InvalidYearDay(u16, u8),
}
