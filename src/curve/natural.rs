//! Natural cubic spline in the truncated-power basis.
//!
//! The curve is
//!
//! ```text
//! f(x) = coeffs[0]·x + Σ coeffs[k]·B_k(x)      k = 1 .. len(coeffs)-1
//! ```
//!
//! where `B_k` is the cubic term `(x − knots[k-1])₊³` corrected at the last
//! two knots:
//!
//! ```text
//! B_k(x) = (x − t_{k-1})₊³
//!        − (x − t_{n-2})₊³ · (t_{n-1} − t_{k-1}) / (t_{n-1} − t_{n-2})
//!        + (x − t_{n-1})₊³ · (t_{n-2} − t_{k-1}) / (t_{n-1} − t_{n-2})
//! ```
//!
//! The two corrections cancel every cubic and quadratic contribution beyond
//! `t_{n-1}`, so the curve grows linearly past the last knot (the natural
//! boundary condition). This is the same expansion the extremum solver's
//! tail correction accumulates, so evaluation and root-finding agree.

use crate::curve::Curve;
use crate::error::ImpactError;

/// Validate a knot/coefficient pair describing a natural cubic spline.
///
/// Requirements: at least 3 finite, strictly increasing knots and exactly
/// `len(knots) - 1` finite coefficients.
pub fn validate_spline(knots: &[f64], coeffs: &[f64]) -> Result<(), ImpactError> {
    if knots.len() < 3 {
        return Err(ImpactError::invalid_input(format!(
            "need at least 3 knots, got {}",
            knots.len()
        )));
    }
    if coeffs.len() != knots.len() - 1 {
        return Err(ImpactError::invalid_input(format!(
            "expected {} coefficients for {} knots, got {}",
            knots.len() - 1,
            knots.len(),
            coeffs.len()
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) || coeffs.iter().any(|c| !c.is_finite()) {
        return Err(ImpactError::invalid_input(
            "knots and coefficients must be finite",
        ));
    }
    for pair in knots.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ImpactError::invalid_input(format!(
                "knots must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

/// A natural cubic spline curve.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicCurve {
    knots: Vec<f64>,
    coeffs: Vec<f64>,
}

fn cube_plus(d: f64) -> f64 {
    if d > 0.0 { d * d * d } else { 0.0 }
}

impl NaturalCubicCurve {
    pub fn new(knots: Vec<f64>, coeffs: Vec<f64>) -> Result<Self, ImpactError> {
        validate_spline(&knots, &coeffs)?;
        Ok(NaturalCubicCurve { knots, coeffs })
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }
}

impl Curve for NaturalCubicCurve {
    fn value(&self, x: f64) -> f64 {
        let last = self.knots[self.knots.len() - 1];
        let second_last = self.knots[self.knots.len() - 2];
        let gap = last - second_last;

        let mut y = self.coeffs[0] * x;
        for (k, &c) in self.coeffs.iter().enumerate().skip(1) {
            let anchor = self.knots[k - 1];
            y += c * cube_plus(x - anchor);
            y -= c * (last - anchor) / gap * cube_plus(x - second_last);
            y += c * (second_last - anchor) / gap * cube_plus(x - last);
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_curve() -> NaturalCubicCurve {
        NaturalCubicCurve::new(
            vec![-12.0, -7.0, 0.0, 10.0, 18.0, 23.0, 28.0, 33.0],
            vec![
                -0.088404222535054311,
                0.00044585141069226897,
                -0.0013680191382785048,
                0.0015570001425749581,
                -0.00014956629970445078,
                -0.0036869690281538109,
                0.011688014471165964,
            ],
        )
        .unwrap()
    }

    #[test]
    fn interior_value_matches_active_terms_only() {
        let curve = sample_curve();
        // At x = 5 only the first three cubic terms are active and no
        // boundary correction applies.
        let x: f64 = 5.0;
        let expected = -0.088404222535054311 * x
            + 0.00044585141069226897 * (x + 12.0).powi(3)
            + -0.0013680191382785048 * (x + 7.0).powi(3)
            + 0.0015570001425749581 * x.powi(3);
        assert!((curve.value(x) - expected).abs() < 1e-12);
    }

    #[test]
    fn growth_beyond_last_knot_is_linear() {
        let curve = sample_curve();
        let v1 = curve.value(34.0);
        let v2 = curve.value(35.0);
        let v3 = curve.value(36.0);
        // Zero second difference on an equally spaced triple.
        assert!((v1 - 2.0 * v2 + v3).abs() < 1e-9);
    }

    #[test]
    fn continuous_across_knots() {
        let curve = sample_curve();
        for &k in curve.knots() {
            let below = curve.value(k - 1e-9);
            let above = curve.value(k + 1e-9);
            assert!((below - above).abs() < 1e-6, "discontinuity at knot {k}");
        }
    }

    #[test]
    fn values_batch_matches_scalar() {
        let curve = sample_curve();
        let xs = [-3.0, 0.0, 12.5, 40.0];
        let ys = curve.values(&xs);
        for (&x, &y) in xs.iter().zip(&ys) {
            assert_eq!(curve.value(x), y);
        }
    }

    #[test]
    fn rejects_malformed_definitions() {
        assert!(NaturalCubicCurve::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(NaturalCubicCurve::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(NaturalCubicCurve::new(vec![0.0, 2.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(NaturalCubicCurve::new(vec![0.0, 1.0, 2.0], vec![1.0]).is_err());
        assert!(NaturalCubicCurve::new(vec![0.0, 1.0, f64::NAN], vec![1.0, 2.0]).is_err());
        assert!(NaturalCubicCurve::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]).is_ok());
    }
}
