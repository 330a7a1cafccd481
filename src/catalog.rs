//! The example-function registry.
//!
//! The numerical core never reads ambient tables: callers hand it a registry
//! value, and this module only supplies the stock entries the command surface
//! offers. Each entry carries a display label (also used verbatim as the
//! oracle expression), the checked callable, and any analytically known
//! singularities.

use crate::eval::{checked, EvalError, EvalResult};

/// One registry entry.
pub struct FunctionEntry {
    /// Display label, phrased so the reference oracle can parse it.
    pub label: String,
    /// The integrand.
    pub f: Box<dyn Fn(f64) -> EvalResult>,
    /// Singularities known analytically, if any.
    pub known_singularities: Vec<f64>,
}

impl FunctionEntry {
    pub fn new<F>(label: &str, f: F, known_singularities: Vec<f64>) -> Self
    where
        F: Fn(f64) -> EvalResult + 'static,
    {
        Self {
            label: label.to_string(),
            f: Box::new(f),
            known_singularities,
        }
    }
}

/// The stock catalog: six smooth integrands plus three improper ones.
pub fn builtin_catalog() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("sin(x)", checked(|x: f64| x.sin()), vec![]),
        FunctionEntry::new("exp(-x^2)", checked(|x: f64| (-x * x).exp()), vec![]),
        FunctionEntry::new("x^2", checked(|x: f64| x * x), vec![]),
        FunctionEntry::new("1 / (1 + x^2)", checked(|x: f64| 1.0 / (1.0 + x * x)), vec![]),
        FunctionEntry::new(
            "ln(x + 1)",
            |x: f64| {
                if x <= -1.0 {
                    Err(EvalError::DomainError)
                } else {
                    Ok((x + 1.0).ln())
                }
            },
            vec![-1.0],
        ),
        FunctionEntry::new(
            "x^3 - 3x^2 + 7x - 10",
            checked(|x: f64| x.powi(3) - 3.0 * x.powi(2) + 7.0 * x - 10.0),
            vec![],
        ),
        FunctionEntry::new(
            "1 / sqrt(x)",
            |x: f64| {
                if x < 0.0 {
                    Err(EvalError::DomainError)
                } else if x == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(1.0 / x.sqrt())
                }
            },
            vec![0.0],
        ),
        FunctionEntry::new(
            "1 / (x - 2)",
            |x: f64| {
                if x == 2.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(1.0 / (x - 2.0))
                }
            },
            vec![2.0],
        ),
        FunctionEntry::new(
            "1 / (x - 1)^2",
            |x: f64| {
                let d = x - 1.0;
                if d == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(1.0 / (d * d))
                }
            },
            vec![1.0],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_labels() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog[0].label, "sin(x)");
        assert_eq!(catalog[6].label, "1 / sqrt(x)");
    }

    #[test]
    fn test_typed_domain_failures() {
        let catalog = builtin_catalog();
        let inv_sqrt = &catalog[6].f;
        assert_eq!(inv_sqrt(0.0), Err(EvalError::DivisionByZero));
        assert_eq!(inv_sqrt(-1.0), Err(EvalError::DomainError));
        assert_eq!(inv_sqrt(4.0), Ok(0.5));

        let log_shift = &catalog[4].f;
        assert_eq!(log_shift(-2.0), Err(EvalError::DomainError));
        assert_eq!(log_shift(0.0), Ok(0.0));
    }

    #[test]
    fn test_known_singularities_match_labels() {
        let catalog = builtin_catalog();
        assert!(catalog[2].known_singularities.is_empty());
        assert_eq!(catalog[7].known_singularities, vec![2.0]);
        assert_eq!(catalog[8].known_singularities, vec![1.0]);
    }
}
