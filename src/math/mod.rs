//! Mathematical utilities: closed-form quadratic solving.

pub mod quadratic;

pub use quadratic::*;
