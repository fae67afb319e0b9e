//! Global extremum assembly.
//!
//! The solver walks the knot sequence, collects critical points from each
//! interior segment and from the two natural-boundary tail regions, adds
//! every knot and both interval endpoints as fallback candidates, and picks
//! the global minimum and maximum by direct curve evaluation.
//!
//! Selection rules:
//!
//! 1. Candidates strictly outside `(minx, maxx)` are dropped; the interval
//!    endpoints are then re-appended unconditionally, so the candidate set
//!    is never empty.
//! 2. The final evaluation pass is mandatory: concavity classification is an
//!    optimization, not a correctness guarantee, because tail corrections
//!    can distort local concavity near the last two knots.
//! 3. A degenerate quadratic on one region is absorbed: the region is
//!    logged, recorded in `skipped`, and the knot/boundary fallbacks carry
//!    the result.

use crate::curve::{validate_spline, Curve, NaturalCubicCurve};
use crate::domain::{
    Candidate, CandidateSource, EvaluatedCandidate, ExtremumKind, SplineExtrema, SplineRegion,
};
use crate::error::ImpactError;
use crate::extrema::segment::extrema_within;
use crate::extrema::tail::TailCorrection;

/// Solve one region and append its classified critical points.
///
/// A degenerate quadratic is recorded and absorbed; any other failure
/// propagates.
fn push_region(
    intercept: f64,
    coeffs: &[f64],
    offsets: &[f64],
    lo: f64,
    hi: f64,
    region: SplineRegion,
    candidates: &mut Vec<Candidate>,
    skipped: &mut Vec<(SplineRegion, String)>,
) -> Result<(), ImpactError> {
    let minima = match extrema_within(intercept, coeffs, offsets, lo, hi, ExtremumKind::Minimum) {
        Ok(xs) => xs,
        Err(ImpactError::DegenerateEquation(reason)) => {
            log::warn!("skipping {region}: {reason}");
            skipped.push((region, reason));
            return Ok(());
        }
        Err(other) => return Err(other),
    };
    let maxima = extrema_within(intercept, coeffs, offsets, lo, hi, ExtremumKind::Maximum)?;

    candidates.extend(
        minima
            .into_iter()
            .map(|x| Candidate::new(x, CandidateSource::CriticalMinimum)),
    );
    candidates.extend(
        maxima
            .into_iter()
            .map(|x| Candidate::new(x, CandidateSource::CriticalMaximum)),
    );
    Ok(())
}

/// Locate the global minimum and maximum of a natural cubic spline over
/// `[minx, maxx]`, evaluating candidates through the given curve.
///
/// `curve` is the correctness oracle; it must describe the same curve as
/// `(knots, coeffs)` for the result to be meaningful.
pub fn solve_extrema<C: Curve + ?Sized>(
    knots: &[f64],
    coeffs: &[f64],
    minx: f64,
    maxx: f64,
    curve: &C,
) -> Result<SplineExtrema, ImpactError> {
    validate_spline(knots, coeffs)?;
    if !(minx.is_finite() && maxx.is_finite() && minx < maxx) {
        return Err(ImpactError::invalid_input(format!(
            "search interval must have finite bounds with minx < maxx, got [{minx}, {maxx}]"
        )));
    }

    let n = knots.len();
    let intercept = coeffs[0];
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut skipped: Vec<(SplineRegion, String)> = Vec::new();
    let mut tail = TailCorrection::new(knots);

    // Interior segments. Later cubic terms have not yet activated, so
    // segment k sees only coefficients 1..=k at the first k knots.
    for k in 1..(n - 1) {
        push_region(
            intercept,
            &coeffs[1..=k],
            &knots[..k],
            knots[k - 1],
            knots[k],
            SplineRegion::Segment(k),
            &mut candidates,
            &mut skipped,
        )?;
        tail.absorb(coeffs[k], knots[k - 1]);
    }

    // Tail regions: between the last two knots, then beyond the last knot
    // (no upper cut).
    let between = tail.between();
    push_region(
        intercept,
        &between.coeffs,
        &between.offsets,
        knots[n - 2],
        knots[n - 1],
        SplineRegion::LastInterval,
        &mut candidates,
        &mut skipped,
    )?;
    let beyond = tail.beyond();
    push_region(
        intercept,
        &beyond.coeffs,
        &beyond.offsets,
        knots[n - 1],
        f64::INFINITY,
        SplineRegion::Beyond,
        &mut candidates,
        &mut skipped,
    )?;

    // Knots can themselves be edge extrema.
    candidates.extend(knots.iter().map(|&x| Candidate::new(x, CandidateSource::Knot)));

    // Classification tags are not trusted past this point: keep the strict
    // interior, then the endpoints are always candidates.
    candidates.retain(|c| c.x > minx && c.x < maxx);
    candidates.push(Candidate::new(minx, CandidateSource::Boundary));
    candidates.push(Candidate::new(maxx, CandidateSource::Boundary));

    let xs: Vec<f64> = candidates.iter().map(|c| c.x).collect();
    let ys = curve.values(&xs);

    let evaluated: Vec<EvaluatedCandidate> = candidates
        .iter()
        .zip(&ys)
        .map(|(c, &y)| EvaluatedCandidate {
            x: c.x,
            y,
            source: c.source,
        })
        .collect();

    if let Some(bad) = evaluated.iter().find(|c| !c.y.is_finite()) {
        return Err(ImpactError::invalid_input(format!(
            "curve evaluation produced a non-finite value at x = {}",
            bad.x
        )));
    }

    // First candidate wins on exact ties.
    let mut best_min = evaluated[0];
    let mut best_max = evaluated[0];
    for &c in &evaluated[1..] {
        if c.y < best_min.y {
            best_min = c;
        }
        if c.y > best_max.y {
            best_max = c;
        }
    }

    Ok(SplineExtrema {
        arg_min: best_min.x,
        arg_max: best_max.x,
        candidates: evaluated,
        skipped,
    })
}

/// Locate both extrema using the built-in natural cubic evaluator.
pub fn find_spline_min_max(
    knots: &[f64],
    coeffs: &[f64],
    minx: f64,
    maxx: f64,
) -> Result<(f64, f64), ImpactError> {
    let curve = NaturalCubicCurve::new(knots.to_vec(), coeffs.to_vec())?;
    let extrema = solve_extrema(knots, coeffs, minx, maxx, &curve)?;
    Ok((extrema.arg_min, extrema.arg_max))
}

/// Location of the global minimum only (legacy single-value interface).
pub fn find_spline_min(
    knots: &[f64],
    coeffs: &[f64],
    minx: f64,
    maxx: f64,
) -> Result<f64, ImpactError> {
    let (arg_min, _) = find_spline_min_max(knots, coeffs, minx, maxx)?;
    Ok(arg_min)
}

/// Location of the global maximum only (legacy single-value interface).
pub fn find_spline_max(
    knots: &[f64],
    coeffs: &[f64],
    minx: f64,
    maxx: f64,
) -> Result<f64, ImpactError> {
    let (_, arg_max) = find_spline_min_max(knots, coeffs, minx, maxx)?;
    Ok(arg_max)
}
