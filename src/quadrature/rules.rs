//! Composite quadrature rules.
//!
//! Each rule approximates ∫f over [a, b] from n equal subintervals of width
//! h = (b − a)/n. The rules differ in where they sample and in their order of
//! accuracy, which the adaptive integrator feeds to the Runge estimator.

use crate::error::{QuadError, QuadResult};
use crate::eval::{EvalError, EvalResult};

/// What to do when a sample fails to evaluate or comes back non-finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole evaluation with [`QuadError::Evaluation`].
    ///
    /// Used by the singularity detector and the convergence probes, where a
    /// failing sample is itself the signal.
    Propagate,

    /// A panel whose samples fail contributes zero; integration continues.
    ///
    /// Used by the adaptive pass after the convergence tester has vetted the
    /// interval, to tolerate residual near-singular samples.
    SkipSubinterval,
}

/// A composite quadrature rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Left rectangles: samples f(a + i·h). Order 1.
    RectangleLeft,
    /// Right rectangles: samples f(a + (i+1)·h). Order 1.
    RectangleRight,
    /// Midpoint rectangles: samples f(a + (i+½)·h). Order 2.
    RectangleMidpoint,
    /// Trapezoids: weights ½ at panel endpoints. Order 2.
    Trapezoid,
    /// Simpson's 1/3 rule, 1-4-2-…-4-1 weights. Order 4.
    ///
    /// Requires an even subdivision count; an odd n is silently incremented.
    Simpson,
}

impl Rule {
    /// Order of accuracy p: the truncation error shrinks as h^p.
    pub fn order(&self) -> u32 {
        match self {
            Self::RectangleLeft | Self::RectangleRight => 1,
            Self::RectangleMidpoint | Self::Trapezoid => 2,
            Self::Simpson => 4,
        }
    }

    /// Approximate ∫f over [a, b] with `n` subintervals.
    ///
    /// # Arguments
    ///
    /// * `f` - Integrand returning an [`EvalResult`] per sample
    /// * `a` - Lower bound
    /// * `b` - Upper bound (must exceed `a`)
    /// * `n` - Number of subintervals (at least 1)
    /// * `policy` - How to treat failing samples
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is invalid, `n` is zero, or a sample
    /// fails under [`FailurePolicy::Propagate`].
    ///
    /// # Example
    ///
    /// ```
    /// use adaptiq::eval::checked;
    /// use adaptiq::quadrature::{FailurePolicy, Rule};
    ///
    /// let f = checked(|x: f64| x * x);
    /// let approx = Rule::Simpson
    ///     .evaluate(&f, 0.0, 1.0, 100, FailurePolicy::Propagate)
    ///     .unwrap();
    /// assert!((approx - 1.0 / 3.0).abs() < 1e-10);
    /// ```
    pub fn evaluate<F>(
        &self,
        f: &F,
        a: f64,
        b: f64,
        n: u64,
        policy: FailurePolicy,
    ) -> QuadResult<f64>
    where
        F: Fn(f64) -> EvalResult,
    {
        if a >= b {
            return Err(QuadError::InvalidInterval {
                a,
                b,
                context: self.name().to_string(),
            });
        }
        if n == 0 {
            return Err(QuadError::InvalidParameter {
                parameter: "n".to_string(),
                message: "need at least 1 subinterval".to_string(),
            });
        }

        match self {
            Self::RectangleLeft => self.rectangles(f, a, b, n, 0.0, policy),
            Self::RectangleRight => self.rectangles(f, a, b, n, 1.0, policy),
            Self::RectangleMidpoint => self.rectangles(f, a, b, n, 0.5, policy),
            Self::Trapezoid => self.trapezoids(f, a, b, n, policy),
            Self::Simpson => self.simpson(f, a, b, n, policy),
        }
    }

    /// Short rule name used in error contexts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RectangleLeft => "rectangle-left",
            Self::RectangleRight => "rectangle-right",
            Self::RectangleMidpoint => "rectangle-midpoint",
            Self::Trapezoid => "trapezoid",
            Self::Simpson => "simpson",
        }
    }

    fn rectangles<F>(
        &self,
        f: &F,
        a: f64,
        b: f64,
        n: u64,
        shift: f64,
        policy: FailurePolicy,
    ) -> QuadResult<f64>
    where
        F: Fn(f64) -> EvalResult,
    {
        let h = (b - a) / n as f64;
        let mut sum = 0.0;
        for i in 0..n {
            let x = a + (i as f64 + shift) * h;
            if let Some(y) = self.sample(f, x, policy)? {
                sum += y;
            }
        }
        Ok(sum * h)
    }

    fn trapezoids<F>(
        &self,
        f: &F,
        a: f64,
        b: f64,
        n: u64,
        policy: FailurePolicy,
    ) -> QuadResult<f64>
    where
        F: Fn(f64) -> EvalResult,
    {
        let h = (b - a) / n as f64;
        let mut sum = 0.0;
        for i in 0..n {
            let x0 = a + i as f64 * h;
            // Both panel endpoints must evaluate for the panel to count.
            let y0 = self.sample(f, x0, policy)?;
            let y1 = self.sample(f, x0 + h, policy)?;
            if let (Some(y0), Some(y1)) = (y0, y1) {
                sum += 0.5 * (y0 + y1);
            }
        }
        Ok(sum * h)
    }

    fn simpson<F>(&self, f: &F, a: f64, b: f64, n: u64, policy: FailurePolicy) -> QuadResult<f64>
    where
        F: Fn(f64) -> EvalResult,
    {
        // Simpson's rule needs an even subdivision count.
        let n = if n % 2 == 1 { n + 1 } else { n };
        let h = (b - a) / n as f64;
        let mut sum = 0.0;
        for k in 0..n / 2 {
            let x0 = a + 2.0 * k as f64 * h;
            let y0 = self.sample(f, x0, policy)?;
            let y1 = self.sample(f, x0 + h, policy)?;
            let y2 = self.sample(f, x0 + 2.0 * h, policy)?;
            if let (Some(y0), Some(y1), Some(y2)) = (y0, y1, y2) {
                sum += y0 + 4.0 * y1 + y2;
            }
        }
        Ok(sum * h / 3.0)
    }

    fn sample<F>(&self, f: &F, x: f64, policy: FailurePolicy) -> QuadResult<Option<f64>>
    where
        F: Fn(f64) -> EvalResult,
    {
        let source = match f(x) {
            Ok(y) if y.is_finite() => return Ok(Some(y)),
            Ok(_) => EvalError::Overflow,
            Err(e) => e,
        };
        match policy {
            FailurePolicy::Propagate => Err(QuadError::Evaluation {
                x,
                source,
                context: self.name().to_string(),
            }),
            FailurePolicy::SkipSubinterval => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::checked;
    use std::f64::consts::PI;

    #[test]
    fn test_orders() {
        assert_eq!(Rule::RectangleLeft.order(), 1);
        assert_eq!(Rule::RectangleRight.order(), 1);
        assert_eq!(Rule::RectangleMidpoint.order(), 2);
        assert_eq!(Rule::Trapezoid.order(), 2);
        assert_eq!(Rule::Simpson.order(), 4);
    }

    #[test]
    fn test_constant_exact_for_all_rules() {
        let f = checked(|_| 5.0);
        for rule in [
            Rule::RectangleLeft,
            Rule::RectangleRight,
            Rule::RectangleMidpoint,
            Rule::Trapezoid,
            Rule::Simpson,
        ] {
            let v = rule
                .evaluate(&f, 0.0, 4.0, 10, FailurePolicy::Propagate)
                .unwrap();
            assert!((v - 20.0).abs() < 1e-12, "{}: got {}", rule.name(), v);
        }
    }

    #[test]
    fn test_trapezoid_exact_for_linear() {
        let f = checked(|x: f64| 3.0 * x + 1.0);
        // Integral over [0, 2] is 8.
        let v = Rule::Trapezoid
            .evaluate(&f, 0.0, 2.0, 7, FailurePolicy::Propagate)
            .unwrap();
        assert!((v - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_simpson_exact_for_cubics() {
        // Order-4 exactness: any polynomial of degree <= 3 is integrated
        // exactly (up to rounding) for every even n.
        let f = checked(|x: f64| x.powi(3) - 3.0 * x.powi(2) + 7.0 * x - 10.0);
        // Antiderivative: x^4/4 - x^3 + 3.5x^2 - 10x; over [-1, 3] this is -20.
        for n in [2, 4, 6, 8, 16, 64] {
            let v = Rule::Simpson
                .evaluate(&f, -1.0, 3.0, n, FailurePolicy::Propagate)
                .unwrap();
            assert!((v + 20.0).abs() < 1e-9, "n = {}: got {}", n, v);
        }
    }

    #[test]
    fn test_simpson_bumps_odd_n() {
        let f = checked(|x: f64| x.powi(3));
        // n = 3 is silently treated as n = 4, so the cubic is still exact.
        let v = Rule::Simpson
            .evaluate(&f, 0.0, 1.0, 3, FailurePolicy::Propagate)
            .unwrap();
        assert!((v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_midpoint_beats_endpoint_rectangles() {
        let f = checked(|x: f64| x.sin());
        let exact = 2.0;
        let left = Rule::RectangleLeft
            .evaluate(&f, 0.0, PI, 64, FailurePolicy::Propagate)
            .unwrap();
        let mid = Rule::RectangleMidpoint
            .evaluate(&f, 0.0, PI, 64, FailurePolicy::Propagate)
            .unwrap();
        assert!((mid - exact).abs() < (left - exact).abs());
    }

    #[test]
    fn test_propagate_aborts_on_singular_sample() {
        let f = checked(|x: f64| 1.0 / x);
        // Left rectangles sample x = 0 directly.
        let err = Rule::RectangleLeft
            .evaluate(&f, 0.0, 1.0, 10, FailurePolicy::Propagate)
            .unwrap_err();
        assert!(matches!(err, QuadError::Evaluation { .. }));
    }

    #[test]
    fn test_skip_drops_failing_panel() {
        let f = checked(|x: f64| 1.0 / x);
        // The panel touching x = 0 contributes zero; the rest still sums.
        let v = Rule::Trapezoid
            .evaluate(&f, 0.0, 1.0, 10, FailurePolicy::SkipSubinterval)
            .unwrap();
        let reference = Rule::Trapezoid
            .evaluate(&f, 0.1, 1.0, 9, FailurePolicy::Propagate)
            .unwrap();
        assert!((v - reference).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let f = checked(|x: f64| x);
        assert!(matches!(
            Rule::Trapezoid.evaluate(&f, 1.0, 0.0, 4, FailurePolicy::Propagate),
            Err(QuadError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Rule::Trapezoid.evaluate(&f, 0.0, 1.0, 0, FailurePolicy::Propagate),
            Err(QuadError::InvalidParameter { .. })
        ));
    }
}
