//! Shared solver types.
//!
//! This module defines:
//!
//! - the extremum request/classification enums (`ExtremumKind`, `CandidateSource`)
//! - spline-region identifiers used in diagnostics (`SplineRegion`)
//! - solver outputs (`Candidate`, `EvaluatedCandidate`, `SplineExtrema`)

pub mod types;

pub use types::*;
