//! Running summary statistics.
//!
//! Sliding-window averages used when projecting slowly varying covariates:
//! each statistic owns an explicit window state and exposes pure
//! update/read operations.

pub mod running;

pub use running::*;
