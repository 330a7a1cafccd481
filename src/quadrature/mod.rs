//! Composite quadrature rules and the Runge error estimator.

pub mod rules;
pub mod runge;

pub use rules::{FailurePolicy, Rule};
pub use runge::runge_error;
