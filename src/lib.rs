//! `impact-common` library crate.
//!
//! Shared numerical plumbing for climate-impact projection pipelines:
//!
//! - `extrema`: global minimum/maximum of a natural cubic spline over a
//!   bounded interval (the core solver)
//! - `curve`: curve evaluation, including the truncated-power natural cubic
//!   spline that the solver's legacy API pairs with
//! - `stats`: running summary statistics over a sliding window of values
//! - `economy`: exogenous GDP-per-capita timeseries providers
//!
//! Everything here is synchronous and side-effect free; the consuming
//! pipelines own all I/O.

pub mod curve;
pub mod domain;
pub mod economy;
pub mod error;
pub mod extrema;
pub mod math;
pub mod stats;
