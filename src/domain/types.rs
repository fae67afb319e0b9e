//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory while solving
//! - exported to JSON alongside pipeline outputs
//! - reloaded later for inspection

use serde::{Deserialize, Serialize};

/// Which extremum a solve is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

impl ExtremumKind {
    /// Human-readable label for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            ExtremumKind::Minimum => "minimum",
            ExtremumKind::Maximum => "maximum",
        }
    }

    /// Whether a critical point with the given second-derivative sign is a
    /// local extremum of this kind. A zero sign is an inflection and matches
    /// neither.
    pub fn matches_concavity(self, sign: f64) -> bool {
        match self {
            ExtremumKind::Minimum => sign > 0.0,
            ExtremumKind::Maximum => sign < 0.0,
        }
    }
}

/// How a candidate location entered the candidate set.
///
/// Tags are diagnostic only: the final global selection re-evaluates the
/// curve at every candidate and does not trust the classification, because
/// tail corrections can distort local concavity near the last two knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// Root of the derivative with positive second derivative.
    CriticalMinimum,
    /// Root of the derivative with negative second derivative.
    CriticalMaximum,
    /// A knot of the spline.
    Knot,
    /// An endpoint of the search interval.
    Boundary,
}

/// A candidate extremum location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub x: f64,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(x: f64, source: CandidateSource) -> Self {
        Candidate { x, source }
    }
}

/// A candidate together with its evaluated curve value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedCandidate {
    pub x: f64,
    pub y: f64,
    pub source: CandidateSource,
}

/// Identifies one piecewise region of the spline in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplineRegion {
    /// The interior interval `[knots[k-1], knots[k]]`.
    Segment(usize),
    /// The interval between the last two knots.
    LastInterval,
    /// The half-line beyond the last knot.
    Beyond,
}

impl std::fmt::Display for SplineRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplineRegion::Segment(k) => write!(f, "segment {k}"),
            SplineRegion::LastInterval => write!(f, "last inter-knot interval"),
            SplineRegion::Beyond => write!(f, "beyond last knot"),
        }
    }
}

/// Output of a full extremum solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineExtrema {
    /// Location of the global minimum within the search interval.
    pub arg_min: f64,
    /// Location of the global maximum within the search interval.
    pub arg_max: f64,
    /// The evaluated candidate set the extrema were selected from.
    pub candidates: Vec<EvaluatedCandidate>,
    /// Regions whose quadratic was degenerate and was skipped, with reasons.
    pub skipped: Vec<(SplineRegion, String)>,
}
