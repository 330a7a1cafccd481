//! Adaptive numerical integration with automatic improper-integral handling.
//!
//! The crate approximates definite integrals of single-variable real
//! functions to a caller-specified tolerance, detecting singularities inside
//! or at the boundary of the interval and deciding whether the improper
//! integral exists before computing it.
//!
//! # Pipeline
//!
//! Data flows one direction:
//!
//! 1. [`singularity::find_singularities`] scans the interval for points where
//!    the integrand fails or jumps;
//! 2. [`convergence::test_convergence`] probes one-sided partial integrals
//!    with shrinking offsets and either declares divergence or returns
//!    adjusted, finite bounds;
//! 3. [`adaptive::integrate_adaptive`] doubles the subdivision count of a
//!    [`quadrature::Rule`] until the [`quadrature::runge_error`] estimate is
//!    below tolerance.
//!
//! [`integrate_auto`] wires the three stages together. The function
//! [`catalog`] and the reference [`oracle`] are external collaborators: the
//! computed result never depends on either.
//!
//! # Example
//!
//! ```
//! use adaptiq::eval::checked;
//! use adaptiq::quadrature::Rule;
//! use adaptiq::{integrate_auto, IntegralOutcome, PipelineOptions};
//!
//! let f = checked(|x: f64| x * x);
//! let outcome = integrate_auto(&f, 0.0, 1.0, 1e-6, Rule::Trapezoid,
//!                              &PipelineOptions::default()).unwrap();
//! match outcome {
//!     IntegralOutcome::Converged { result, .. } => {
//!         assert!((result.value - 1.0 / 3.0).abs() < 1e-6);
//!     }
//!     IntegralOutcome::Divergent { .. } => unreachable!(),
//! }
//! ```

pub mod adaptive;
pub mod catalog;
pub mod convergence;
pub mod error;
pub mod eval;
pub mod oracle;
pub mod quadrature;
pub mod singularity;

pub use adaptive::{integrate_adaptive, AdaptiveOptions, Quadrature};
pub use convergence::{test_convergence, ConvergenceOptions, SingularityKind, Verdict};
pub use error::{QuadError, QuadResult};
pub use eval::{checked, EvalError, EvalResult};
pub use quadrature::{runge_error, FailurePolicy, Rule};
pub use singularity::{find_singularities, DetectorOptions};

/// Options for the full detector → tester → integrator pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub detector: DetectorOptions,
    pub convergence: ConvergenceOptions,
    pub adaptive: AdaptiveOptions,
}

/// Outcome of [`integrate_auto`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegralOutcome {
    /// The integral exists; `a` and `b` are the bounds actually refined,
    /// which differ from the requested ones when a boundary singularity was
    /// shifted away.
    Converged { result: Quadrature, a: f64, b: f64 },

    /// The improper integral does not exist.
    Divergent { at: f64 },
}

/// Run the full pipeline over [a, b].
///
/// Scans for singularities and tests convergence; unless the verdict is
/// divergent, refines with the given rule until the Runge estimate drops
/// below `epsilon`. Divergence is a first-class outcome; only genuine input
/// or budget failures surface as errors.
pub fn integrate_auto<F>(
    f: &F,
    a: f64,
    b: f64,
    epsilon: f64,
    rule: Rule,
    options: &PipelineOptions,
) -> QuadResult<IntegralOutcome>
where
    F: Fn(f64) -> EvalResult,
{
    let singularities = find_singularities(f, a, b, &options.detector)?;
    match test_convergence(f, a, b, &singularities, &options.convergence)? {
        Verdict::Divergent { at } => Ok(IntegralOutcome::Divergent { at }),
        Verdict::Convergent { a, b } => {
            let result = integrate_adaptive(f, a, b, epsilon, rule, &options.adaptive)?;
            Ok(IntegralOutcome::Converged { result, a, b })
        }
    }
}
