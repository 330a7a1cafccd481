//! Error types for the quadrature pipeline.

use std::fmt;

use crate::eval::EvalError;

/// Result type for quadrature operations.
pub type QuadResult<T> = Result<T, QuadError>;

/// Errors that can occur while approximating an integral.
///
/// A divergent improper integral is deliberately *not* represented here: it is
/// a first-class outcome of the convergence tester
/// ([`Verdict::Divergent`](crate::convergence::Verdict)), not a failure of the
/// numerical machinery.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadError {
    /// Invalid interval provided (a >= b).
    InvalidInterval { a: f64, b: f64, context: String },

    /// Invalid parameter value.
    InvalidParameter { parameter: String, message: String },

    /// Integrand evaluation failed under the propagate policy.
    Evaluation {
        x: f64,
        source: EvalError,
        context: String,
    },

    /// The adaptive doubling loop exhausted its refinement budget.
    RefinementBudgetExceeded {
        refinements: usize,
        subdivisions: u64,
        error: f64,
        tolerance: f64,
    },
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval { a, b, context } => {
                write!(
                    f,
                    "Invalid interval [{}, {}] in {}: bounds must satisfy a < b",
                    a, b, context
                )
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::Evaluation { x, source, context } => {
                write!(f, "{}: evaluation failed at x = {:.6}: {}", context, x, source)
            }
            Self::RefinementBudgetExceeded {
                refinements,
                subdivisions,
                error,
                tolerance,
            } => {
                write!(
                    f,
                    "refinement budget of {} doublings exhausted at n = {}: \
                     error estimate {:.2e} still above tolerance {:.2e}",
                    refinements, subdivisions, error, tolerance
                )
            }
        }
    }
}

impl std::error::Error for QuadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuadError::InvalidInterval {
            a: 5.0,
            b: 3.0,
            context: "trapezoid".to_string(),
        };
        assert!(err.to_string().contains("Invalid interval"));
        assert!(err.to_string().contains("trapezoid"));

        let err = QuadError::Evaluation {
            x: 2.0,
            source: EvalError::DivisionByZero,
            context: "simpson".to_string(),
        };
        assert!(err.to_string().contains("division by zero"));

        let err = QuadError::RefinementBudgetExceeded {
            refinements: 24,
            subdivisions: 1 << 26,
            error: 1e-3,
            tolerance: 1e-9,
        };
        assert!(err.to_string().contains("24"));
        assert!(err.to_string().contains("exhausted"));
    }
}
