//! Critical points of a local cubic expansion.
//!
//! On each spline region the curve has the form
//!
//! ```text
//! f(x) = intercept·x + Σ coeffs[i]·(x − offsets[i])³
//! ```
//!
//! whose derivative expands to the quadratic
//!
//! ```text
//! aa = Σ 3·coeffs[i]
//! bb = Σ −6·coeffs[i]·offsets[i]
//! cc = intercept + Σ 3·coeffs[i]·offsets[i]²
//! ```
//!
//! Roots are then filtered to the region's sub-interval and to the requested
//! concavity.

use crate::domain::ExtremumKind;
use crate::error::ImpactError;
use crate::math::{solve_quadratic, CriticalPoint};

/// Find all critical points of the expansion, classified by concavity.
///
/// No interval filter is applied; root order follows the closed form
/// (`(−bb + √D)/(2aa)` first).
pub fn critical_points(
    intercept: f64,
    coeffs: &[f64],
    offsets: &[f64],
) -> Result<Vec<CriticalPoint>, ImpactError> {
    if coeffs.len() != offsets.len() {
        return Err(ImpactError::invalid_input(format!(
            "coefficient/offset length mismatch: {} vs {}",
            coeffs.len(),
            offsets.len()
        )));
    }

    let aa: f64 = coeffs.iter().map(|c| 3.0 * c).sum();
    let bb: f64 = coeffs
        .iter()
        .zip(offsets)
        .map(|(c, o)| -6.0 * c * o)
        .sum();
    let cc: f64 = intercept
        + coeffs
            .iter()
            .zip(offsets)
            .map(|(c, o)| 3.0 * c * o * o)
            .sum::<f64>();

    solve_quadratic(aa, bb, cc)
}

/// Locations of local extrema of the given kind inside `[lo, hi]`.
///
/// `hi` may be `f64::INFINITY`, in which case no upper cut is applied (used
/// for the region beyond the last knot).
pub fn extrema_within(
    intercept: f64,
    coeffs: &[f64],
    offsets: &[f64],
    lo: f64,
    hi: f64,
    kind: ExtremumKind,
) -> Result<Vec<f64>, ImpactError> {
    let roots = critical_points(intercept, coeffs, offsets)?;
    Ok(roots
        .into_iter()
        .filter(|r| r.x >= lo && r.x <= hi && kind.matches_concavity(r.concavity))
        .map(|r| r.x)
        .collect())
}
