//! Exogenous economic timeseries providers.
//!
//! This module defines:
//!
//! - the provider seam used by downstream projection code (`SpaceTimeProvider`)
//! - the best-available GDP-per-capita provider (`BestGdppcProvider`)
//!
//! Providers consume already-parsed rows; reading and cleaning source files
//! belongs to the calling pipeline.

pub mod gdppc;
pub mod provider;

pub use gdppc::*;
pub use provider::*;
