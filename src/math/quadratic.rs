//! Closed-form quadratic root solving with concavity classification.
//!
//! The extremum solver reduces each spline region's first-derivative
//! equation to `aa·x² + bb·x + cc = 0` and needs, for each real root, the
//! sign of the second derivative `2·aa·x + bb` there:
//!
//! - positive ⇒ local minimum
//! - negative ⇒ local maximum
//! - zero ⇒ inflection (neither)
//!
//! Numerical notes:
//! - A negative discriminant means no real critical point and returns an
//!   empty set, not an error.
//! - `aa == 0` would divide by zero in the closed form; it is reported as a
//!   recoverable `DegenerateEquation` instead of being special-cased into a
//!   linear solve.

use crate::error::ImpactError;

/// A real root of the derivative, tagged with the sign of the second
/// derivative at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPoint {
    pub x: f64,
    /// `+1.0`, `-1.0`, or `0.0`.
    pub concavity: f64,
}

/// Three-way sign: zero stays zero so inflections classify as neither
/// minimum nor maximum.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Solve `aa·x² + bb·x + cc = 0` and classify each real root.
///
/// Returns zero or two roots; a repeated root is reported twice, which is
/// harmless downstream since duplicate candidates never change an argmin or
/// argmax.
pub fn solve_quadratic(aa: f64, bb: f64, cc: f64) -> Result<Vec<CriticalPoint>, ImpactError> {
    if aa == 0.0 {
        return Err(ImpactError::DegenerateEquation(format!(
            "leading coefficient is zero ({bb}·x + {cc} = 0 is not quadratic)"
        )));
    }

    let discriminant = bb * bb - 4.0 * aa * cc;
    if discriminant < 0.0 {
        return Ok(Vec::new());
    }

    let sqrt_d = discriminant.sqrt();
    let one = (-bb + sqrt_d) / (2.0 * aa);
    let two = (-bb - sqrt_d) / (2.0 * aa);

    Ok(vec![
        CriticalPoint {
            x: one,
            concavity: sign(2.0 * aa * one + bb),
        },
        CriticalPoint {
            x: two,
            concavity: sign(2.0 * aa * two + bb),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_roots_are_classified() {
        // (x - 1)(x - 3) = x² - 4x + 3
        let roots = solve_quadratic(1.0, -4.0, 3.0).unwrap();
        assert_eq!(roots.len(), 2);
        assert!((roots[0].x - 3.0).abs() < 1e-12);
        assert_eq!(roots[0].concavity, 1.0);
        assert!((roots[1].x - 1.0).abs() < 1e-12);
        assert_eq!(roots[1].concavity, -1.0);
    }

    #[test]
    fn negative_discriminant_is_empty_not_error() {
        let roots = solve_quadratic(1.0, 0.0, 1.0).unwrap();
        assert!(roots.is_empty());
    }

    #[test]
    fn repeated_root_is_reported_twice_as_inflection() {
        // (x - 2)² = x² - 4x + 4
        let roots = solve_quadratic(1.0, -4.0, 4.0).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].x, roots[1].x);
        assert_eq!(roots[0].concavity, 0.0);
        assert_eq!(roots[1].concavity, 0.0);
    }

    #[test]
    fn zero_leading_coefficient_is_degenerate() {
        let err = solve_quadratic(0.0, 2.0, -4.0).unwrap_err();
        assert!(matches!(err, ImpactError::DegenerateEquation(_)));
    }

    #[test]
    fn downward_parabola_flips_classification() {
        // -(x - 1)(x - 3) = -x² + 4x - 3
        let roots = solve_quadratic(-1.0, 4.0, -3.0).unwrap();
        let min = roots.iter().find(|r| r.concavity > 0.0);
        let max = roots.iter().find(|r| r.concavity < 0.0);
        assert!((min.unwrap().x - 1.0).abs() < 1e-12);
        assert!((max.unwrap().x - 3.0).abs() < 1e-12);
    }
}
