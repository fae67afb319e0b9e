//! Natural-boundary tail corrections.
//!
//! Beyond the second-to-last knot the truncated cubic terms must be
//! corrected so the curve transitions to purely linear growth past the last
//! knot. Each interior term `(c, anchor)` contributes:
//!
//! - to the last inter-knot interval: the original term plus a correction
//!   anchored at the second-to-last knot
//! - to the region beyond the last knot: both of the above plus a second
//!   correction anchored at the last knot
//!
//! The correction weights are chosen so that the cubic (and, in combination,
//! quadratic) contributions cancel beyond the last knot.

/// Extended coefficient/offset lists describing one tail region's local
/// cubic expansion.
#[derive(Debug, Clone, Default)]
pub struct TailExpansion {
    pub coeffs: Vec<f64>,
    pub offsets: Vec<f64>,
}

/// Accumulator for the two tail-region expansions.
#[derive(Debug, Clone)]
pub struct TailCorrection {
    second_last: f64,
    last: f64,
    between: TailExpansion,
    beyond: TailExpansion,
}

impl TailCorrection {
    /// `knots` must be validated (≥ 3, strictly increasing) by the caller.
    pub fn new(knots: &[f64]) -> Self {
        TailCorrection {
            second_last: knots[knots.len() - 2],
            last: knots[knots.len() - 1],
            between: TailExpansion::default(),
            beyond: TailExpansion::default(),
        }
    }

    /// Fold one interior term `coeff·(x − anchor)³` into both tail regions.
    pub fn absorb(&mut self, coeff: f64, anchor: f64) {
        let gap = self.last - self.second_last;
        let correction_mid = -coeff * (self.last - anchor) / gap;
        let correction_end = coeff * (self.second_last - anchor) / gap;

        self.between.coeffs.extend([coeff, correction_mid]);
        self.between.offsets.extend([anchor, self.second_last]);

        self.beyond
            .coeffs
            .extend([coeff, correction_mid, correction_end]);
        self.beyond
            .offsets
            .extend([anchor, self.second_last, self.last]);
    }

    /// Expansion valid on `[knots[-2], knots[-1]]`.
    pub fn between(&self) -> &TailExpansion {
        &self.between
    }

    /// Expansion valid on `[knots[-1], +∞)`.
    pub fn beyond(&self) -> &TailExpansion {
        &self.beyond
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_grows_both_expansions() {
        let knots = [0.0, 1.0, 2.0, 4.0, 6.0];
        let mut tail = TailCorrection::new(&knots);
        tail.absorb(0.5, 0.0);
        tail.absorb(-0.25, 1.0);

        assert_eq!(tail.between().coeffs.len(), 4);
        assert_eq!(tail.between().offsets.len(), 4);
        assert_eq!(tail.beyond().coeffs.len(), 6);
        assert_eq!(tail.beyond().offsets.len(), 6);
    }

    #[test]
    fn correction_weights_follow_knot_geometry() {
        // second-to-last = 4, last = 6, gap = 2
        let knots = [0.0, 1.0, 2.0, 4.0, 6.0];
        let mut tail = TailCorrection::new(&knots);
        tail.absorb(1.0, 1.0);

        // between: (1, 1) then (-(6-1)/2, 4)
        assert_eq!(tail.between().coeffs, vec![1.0, -2.5]);
        assert_eq!(tail.between().offsets, vec![1.0, 4.0]);
        // beyond adds ((4-1)/2, 6)
        assert_eq!(tail.beyond().coeffs, vec![1.0, -2.5, 1.5]);
        assert_eq!(tail.beyond().offsets, vec![1.0, 4.0, 6.0]);
    }

    #[test]
    fn beyond_expansion_has_no_cubic_growth() {
        let knots = [-3.0, -1.0, 0.5, 2.0, 7.0, 11.0];
        let mut tail = TailCorrection::new(&knots);
        for (k, &anchor) in knots[..knots.len() - 2].iter().enumerate() {
            tail.absorb(0.1 * (k as f64 + 1.0), anchor);
        }
        // The defining property of the natural boundary: cubic coefficients
        // beyond the last knot sum to zero.
        let total: f64 = tail.beyond().coeffs.iter().sum();
        assert!(total.abs() < 1e-12, "cubic growth remains: {total}");
    }
}
