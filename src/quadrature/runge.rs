//! Runge's rule for estimating quadrature truncation error.

/// Estimate the absolute error of `i_2n` from two results at n and 2n
/// subintervals.
///
/// Assuming the rule's truncation error scales as C·h^p, halving h lets the
/// two results bracket the true value without knowing it:
/// |I_2n − I_n| / (2^p − 1). This is the sole stopping criterion of the
/// adaptive integrator. Near a singularity the estimate is unreliable; the
/// convergence tester is responsible for keeping such regions out of the
/// refined interval.
///
/// # Example
///
/// ```
/// use adaptiq::quadrature::runge_error;
///
/// // A trapezoid (p = 2) pair differing by 0.03 estimates a 0.01 error.
/// let e = runge_error(1.00, 1.03, 2);
/// assert!((e - 0.01).abs() < 1e-15);
/// ```
pub fn runge_error(i_n: f64, i_2n: f64, order: u32) -> f64 {
    (i_2n - i_n).abs() / ((1u64 << order) as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::checked;
    use crate::quadrature::{FailurePolicy, Rule};

    #[test]
    fn test_runge_denominators() {
        assert!((runge_error(0.0, 1.0, 1) - 1.0).abs() < 1e-15);
        assert!((runge_error(0.0, 1.0, 2) - 1.0 / 3.0).abs() < 1e-15);
        assert!((runge_error(0.0, 1.0, 4) - 1.0 / 15.0).abs() < 1e-15);
    }

    #[test]
    fn test_runge_is_non_negative_and_symmetric_in_sign() {
        assert!(runge_error(2.0, 1.0, 2) > 0.0);
        assert_eq!(runge_error(1.0, 2.0, 2), runge_error(2.0, 1.0, 2));
    }

    #[test]
    fn test_estimate_decreases_with_doubling() {
        // For a smooth integrand the estimate shrinks monotonically with n
        // until it hits the floating-point noise floor.
        let f = checked(|x: f64| x.exp());
        let rule = Rule::Trapezoid;
        let eval = |n: u64| {
            rule.evaluate(&f, 0.0, 1.0, n, FailurePolicy::Propagate)
                .unwrap()
        };

        let mut previous = f64::INFINITY;
        let mut n = 4;
        for _ in 0..8 {
            let estimate = runge_error(eval(n), eval(2 * n), rule.order());
            assert!(
                estimate < previous,
                "estimate did not shrink at n = {}: {} vs {}",
                n,
                estimate,
                previous
            );
            previous = estimate;
            n *= 2;
        }
    }

    #[test]
    fn test_estimate_tracks_true_error() {
        // For trapezoid on exp over [0, 1] the Runge estimate should be the
        // same magnitude as the actual error of the finer result.
        let f = checked(|x: f64| x.exp());
        let exact = std::f64::consts::E - 1.0;
        let i_n = Rule::Trapezoid
            .evaluate(&f, 0.0, 1.0, 64, FailurePolicy::Propagate)
            .unwrap();
        let i_2n = Rule::Trapezoid
            .evaluate(&f, 0.0, 1.0, 128, FailurePolicy::Propagate)
            .unwrap();
        let estimate = runge_error(i_n, i_2n, 2);
        let actual = (i_2n - exact).abs();
        assert!(estimate > 0.1 * actual && estimate < 10.0 * actual);
    }
}
