//! Curve evaluation.
//!
//! The extremum solver treats evaluation as a collaborator behind the
//! [`Curve`] trait; this module also ships the natural cubic spline
//! implementation the legacy API pairs with.

pub mod natural;

pub use natural::*;

/// A real-valued curve over the reals.
///
/// The extremum assembler uses this as its correctness oracle: candidate
/// locations are ranked by their evaluated values, never by local
/// classification alone.
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    /// Evaluate at each of the given locations.
    fn values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.value(x)).collect()
    }
}
