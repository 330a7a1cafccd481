//! Grid-scan singularity detection.
//!
//! Scans an interval for points where the integrand fails to evaluate, comes
//! back non-finite, or jumps abruptly between adjacent samples. The detector
//! only locates candidates; deciding whether the improper integral exists is
//! the convergence tester's job.

use log::debug;

use crate::error::{QuadError, QuadResult};
use crate::eval::EvalResult;

/// Options for the singularity scan.
#[derive(Debug, Clone)]
pub struct DetectorOptions {
    /// Number of grid subintervals sampled across [a, b] (default: 1_000_000).
    ///
    /// This is also the scan's computation budget: the pass is O(resolution).
    pub resolution: u64,
    /// Finite-difference magnitude between consecutive finite samples above
    /// which the midpoint is recorded as a suspected discontinuity
    /// (default: 1e6).
    pub jump_threshold: f64,
    /// Candidates closer together than this collapse into the first point of
    /// the cluster (default: 1e-3).
    pub proximity_delta: f64,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            resolution: 1_000_000,
            jump_threshold: 1e6,
            proximity_delta: 1e-3,
        }
    }
}

/// Scan [a, b] for candidate singularities.
///
/// Three strategies feed one candidate list:
/// 1. an even grid of `resolution + 1` samples, recording every x where
///    evaluation fails or is non-finite;
/// 2. the midpoint of consecutive finite samples whose difference exceeds
///    `jump_threshold` (a discontinuity between grid points would otherwise
///    slip through the pointwise test);
/// 3. every integer inside [a, b], since common closed-form discontinuities
///    land on integers the grid may straddle.
///
/// Candidates are sorted ascending and clusters closer than
/// `proximity_delta` collapse to their first point, so the same singularity
/// reported by two strategies appears once. The result is deterministic for
/// fixed inputs and options.
///
/// # Errors
///
/// Returns an error if the interval is invalid or `resolution` is zero.
///
/// # Example
///
/// ```
/// use adaptiq::eval::checked;
/// use adaptiq::singularity::{find_singularities, DetectorOptions};
///
/// let f = checked(|x: f64| 1.0 / (x - 2.0));
/// let options = DetectorOptions { resolution: 10_000, ..Default::default() };
/// let points = find_singularities(&f, 0.0, 4.0, &options).unwrap();
/// assert_eq!(points.len(), 1);
/// assert!((points[0] - 2.0).abs() < 0.01);
/// ```
pub fn find_singularities<F>(
    f: &F,
    a: f64,
    b: f64,
    options: &DetectorOptions,
) -> QuadResult<Vec<f64>>
where
    F: Fn(f64) -> EvalResult,
{
    if a >= b {
        return Err(QuadError::InvalidInterval {
            a,
            b,
            context: "find_singularities".to_string(),
        });
    }
    if options.resolution == 0 {
        return Err(QuadError::InvalidParameter {
            parameter: "resolution".to_string(),
            message: "need at least 1 grid subinterval".to_string(),
        });
    }

    let h = (b - a) / options.resolution as f64;
    let mut candidates = Vec::new();

    // Grid scan with pointwise and finite-difference tests.
    let mut previous: Option<(f64, f64)> = None;
    for i in 0..=options.resolution {
        let x = a + i as f64 * h;
        match f(x) {
            Ok(y) if y.is_finite() => {
                if let Some((px, py)) = previous {
                    if (y - py).abs() > options.jump_threshold {
                        candidates.push(0.5 * (px + x));
                    }
                }
                previous = Some((x, y));
            }
            _ => {
                candidates.push(x);
                previous = None;
            }
        }
    }

    // Integer probe.
    let lo = a.ceil() as i64;
    let hi = b.floor() as i64;
    for k in lo..=hi {
        let x = k as f64;
        match f(x) {
            Ok(y) if y.is_finite() => {}
            _ => candidates.push(x),
        }
    }

    candidates.sort_by(f64::total_cmp);

    // Collapse clusters, keeping the first point of each.
    let mut points: Vec<f64> = Vec::new();
    for x in candidates {
        match points.last() {
            Some(&last) if x - last < options.proximity_delta => {}
            _ => points.push(x),
        }
    }

    debug!(
        "singularity scan of [{}, {}] at resolution {}: {} point(s)",
        a,
        b,
        options.resolution,
        points.len()
    );
    Ok(points)
}
