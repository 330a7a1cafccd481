//! Adaptive refinement driven by the Runge error estimate.

use log::debug;

use crate::error::{QuadError, QuadResult};
use crate::eval::EvalResult;
use crate::quadrature::{runge_error, FailurePolicy, Rule};

/// Options for adaptive refinement.
#[derive(Debug, Clone)]
pub struct AdaptiveOptions {
    /// Maximum number of subdivision doublings before giving up
    /// (default: 24).
    ///
    /// The doubling loop has no natural termination when the estimate never
    /// stabilizes, e.g. from residual instability near a tolerated
    /// near-singular region; exhausting the budget is reported as
    /// [`QuadError::RefinementBudgetExceeded`] rather than looping forever.
    pub max_refinements: usize,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self { max_refinements: 24 }
    }
}

/// A refined quadrature result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    /// Computed integral value.
    pub value: f64,
    /// Subdivision count that produced `value`.
    pub subdivisions: u64,
    /// Runge estimate of the absolute error of `value`.
    pub error: f64,
}

/// Refine ∫f over [a, b] until the Runge estimate drops below `epsilon`.
///
/// Starts at n = 4 and doubles: each iteration compares I_n with I_2n through
/// [`runge_error`] at the rule's order of accuracy, returning (I_2n, 2n,
/// error) as soon as the estimate is below tolerance. Samples are evaluated
/// with the skip-subinterval policy, so the caller must have vetted the
/// interval with the convergence tester first; residual near-singular panels
/// contribute zero rather than aborting the pass.
///
/// # Errors
///
/// Returns an error for an invalid interval, a non-positive tolerance, or
/// when `max_refinements` doublings pass without reaching the tolerance.
///
/// # Example
///
/// ```
/// use adaptiq::adaptive::{integrate_adaptive, AdaptiveOptions};
/// use adaptiq::eval::checked;
/// use adaptiq::quadrature::Rule;
///
/// let f = checked(|x: f64| x * x);
/// let q = integrate_adaptive(&f, 0.0, 1.0, 1e-6, Rule::Trapezoid, &AdaptiveOptions::default())
///     .unwrap();
/// assert!((q.value - 1.0 / 3.0).abs() < 1e-6);
/// assert!(q.subdivisions.is_power_of_two());
/// ```
pub fn integrate_adaptive<F>(
    f: &F,
    a: f64,
    b: f64,
    epsilon: f64,
    rule: Rule,
    options: &AdaptiveOptions,
) -> QuadResult<Quadrature>
where
    F: Fn(f64) -> EvalResult,
{
    if a >= b {
        return Err(QuadError::InvalidInterval {
            a,
            b,
            context: "integrate_adaptive".to_string(),
        });
    }
    if !(epsilon > 0.0) {
        return Err(QuadError::InvalidParameter {
            parameter: "epsilon".to_string(),
            message: "tolerance must be positive".to_string(),
        });
    }

    let mut n: u64 = 4;
    let mut coarse = rule.evaluate(f, a, b, n, FailurePolicy::SkipSubinterval)?;
    let mut estimate = f64::INFINITY;

    for _ in 0..options.max_refinements {
        let fine = rule.evaluate(f, a, b, 2 * n, FailurePolicy::SkipSubinterval)?;
        estimate = runge_error(coarse, fine, rule.order());
        debug!(
            "{}: n = {} -> {}, estimate {:.3e}",
            rule.name(),
            n,
            2 * n,
            estimate
        );
        if estimate < epsilon {
            return Ok(Quadrature {
                value: fine,
                subdivisions: 2 * n,
                error: estimate,
            });
        }
        coarse = fine;
        n *= 2;
    }

    Err(QuadError::RefinementBudgetExceeded {
        refinements: options.max_refinements,
        subdivisions: n,
        error: estimate,
        tolerance: epsilon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::checked;
    use std::f64::consts::PI;

    #[test]
    fn test_trapezoid_on_parabola() {
        let f = checked(|x: f64| x * x);
        let q = integrate_adaptive(
            &f,
            0.0,
            1.0,
            1e-6,
            Rule::Trapezoid,
            &AdaptiveOptions::default(),
        )
        .unwrap();
        assert!((q.value - 1.0 / 3.0).abs() < 1e-6);
        assert!(q.error < 1e-6);
        // n grows as a power of two from the initial 4.
        assert!(q.subdivisions >= 8 && q.subdivisions.is_power_of_two());
    }

    #[test]
    fn test_simpson_order_advantage_on_sine() {
        // Order-4 accuracy reaches the tolerance at a small n where the
        // order-2 trapezoid needs far more subdivisions.
        let f = checked(|x: f64| x.sin());
        let simpson = integrate_adaptive(
            &f,
            0.0,
            PI,
            1e-5,
            Rule::Simpson,
            &AdaptiveOptions::default(),
        )
        .unwrap();
        assert!((simpson.value - 2.0).abs() < 1e-5);
        assert!(simpson.subdivisions <= 16);

        let trapezoid = integrate_adaptive(
            &f,
            0.0,
            PI,
            1e-5,
            Rule::Trapezoid,
            &AdaptiveOptions::default(),
        )
        .unwrap();
        assert!((trapezoid.value - 2.0).abs() < 1e-4);
        assert!(trapezoid.subdivisions > simpson.subdivisions);
    }

    #[test]
    fn test_left_rectangle_converges_slowly() {
        let f = checked(|x: f64| x.exp());
        let exact = std::f64::consts::E - 1.0;
        let q = integrate_adaptive(
            &f,
            0.0,
            1.0,
            1e-4,
            Rule::RectangleLeft,
            &AdaptiveOptions::default(),
        )
        .unwrap();
        assert!((q.value - exact).abs() < 1e-3);
        assert!(q.subdivisions > 256);
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        let f = checked(|x: f64| x.sin());
        let tight = AdaptiveOptions { max_refinements: 2 };
        let err = integrate_adaptive(&f, 0.0, PI, 1e-12, Rule::Trapezoid, &tight).unwrap_err();
        assert!(matches!(
            err,
            QuadError::RefinementBudgetExceeded { refinements: 2, .. }
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        let f = checked(|x: f64| x);
        assert!(
            integrate_adaptive(&f, 1.0, 0.0, 1e-6, Rule::Trapezoid, &AdaptiveOptions::default())
                .is_err()
        );
        assert!(
            integrate_adaptive(&f, 0.0, 1.0, 0.0, Rule::Trapezoid, &AdaptiveOptions::default())
                .is_err()
        );
    }
}
