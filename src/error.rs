//! Crate-wide error type.
//!
//! Validation failures are fatal and surfaced to the caller; degenerate
//! quadratics are recoverable per region and are absorbed by the extremum
//! assembler (see `extrema::solver`).

/// Errors produced by the solvers and providers in this crate.
#[derive(Clone, PartialEq, Eq)]
pub enum ImpactError {
    /// Malformed inputs: non-increasing knots, mismatched coefficient
    /// length, an empty or inverted search interval, and the like.
    /// Raised before any computation.
    InvalidInput(String),
    /// A quadratic with zero leading coefficient. Recoverable when it arises
    /// from a single spline region; fatal when requested directly.
    DegenerateEquation(String),
    /// A lookup over supplied data found no usable rows.
    MissingData(String),
}

impl ImpactError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ImpactError::InvalidInput(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            ImpactError::InvalidInput(m) => m,
            ImpactError::DegenerateEquation(m) => m,
            ImpactError::MissingData(m) => m,
        }
    }
}

impl std::fmt::Display for ImpactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactError::InvalidInput(m) => write!(f, "invalid input: {m}"),
            ImpactError::DegenerateEquation(m) => write!(f, "degenerate equation: {m}"),
            ImpactError::MissingData(m) => write!(f, "missing data: {m}"),
        }
    }
}

impl std::fmt::Debug for ImpactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImpactError({self})")
    }
}

impl std::error::Error for ImpactError {}
