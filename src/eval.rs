//! Integrand evaluation as a result type.
//!
//! Integrands are partial functions of a real variable: evaluation can fail
//! with a domain error or produce a non-finite value. Both cases are carried
//! in [`EvalResult`] so that quadrature rules and the singularity detector can
//! branch on them instead of unwinding.

use std::fmt;

/// Result of evaluating an integrand at a single point.
pub type EvalResult = Result<f64, EvalError>;

/// Failure modes of a single integrand evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// Division by zero at the sample point.
    DivisionByZero,

    /// The sample point lies outside the function's domain
    /// (square root of a negative, logarithm of a non-positive value).
    DomainError,

    /// The value overflowed to infinity or is otherwise non-finite.
    Overflow,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::DomainError => write!(f, "argument outside the function domain"),
            Self::Overflow => write!(f, "value is not finite"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Lift a total `f64 -> f64` function into the checked integrand signature.
///
/// The wrapped function is called as-is; a NaN result is classified as a
/// domain error and an infinite result as overflow. Use this for closed-form
/// expressions whose only failure mode is a non-finite value.
///
/// # Example
///
/// ```
/// use adaptiq::eval::{checked, EvalError};
///
/// let f = checked(|x: f64| 1.0 / x);
/// assert_eq!(f(2.0), Ok(0.5));
/// assert_eq!(f(0.0), Err(EvalError::Overflow));
/// ```
pub fn checked<F>(f: F) -> impl Fn(f64) -> EvalResult
where
    F: Fn(f64) -> f64,
{
    move |x| {
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else if y.is_nan() {
            Err(EvalError::DomainError)
        } else {
            Err(EvalError::Overflow)
        }
    }
}
