//! Closed-form real roots of univariate polynomials up to degree three.

use std::f64::consts::TAU;

use tracing::trace;

use crate::config::SolverConfig;
use crate::error::{FuncError, Result};
use crate::polynomial::{DegreeClass, Polynomial};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub value: f64,
    pub multiplicity: u32,
}

impl Root {
    fn simple(value: f64) -> Self {
        Root {
            value: value + 0.0,
            multiplicity: 1,
        }
    }

    fn repeated(value: f64, multiplicity: u32) -> Self {
        Root {
            value: value + 0.0,
            multiplicity,
        }
    }
}

/// Real roots of a univariate polynomial, ascending. The zero polynomial has no roots here;
/// callers treat it as the identity case before asking.
pub fn polynomial_roots(poly: &Polynomial, config: &SolverConfig) -> Result<Vec<Root>> {
    if let DegreeClass::HigherDegrees(n) = poly.merged().degree_class() {
        return Err(higher_degree(n));
    }
    let coeffs = match poly.variables().into_iter().next() {
        Some(var) => poly.coefficients(&var)?,
        None => vec![poly.constant_value().unwrap_or(0.0)],
    };
    real_roots(&coeffs, config)
}

/// Real roots of `coeffs[0] + coeffs[1]·x + ...`, ascending.
pub fn real_roots(coeffs: &[f64], config: &SolverConfig) -> Result<Vec<Root>> {
    let mut coeffs = coeffs.to_vec();
    while coeffs.len() > 1 && coeffs.last() == Some(&0.0) {
        coeffs.pop();
    }
    let degree = coeffs.len().saturating_sub(1) as u32;
    let mut roots = match DegreeClass::of(degree) {
        DegreeClass::Constant => Vec::new(),
        DegreeClass::Linear => vec![Root::simple(-coeffs[0] / coeffs[1])],
        DegreeClass::Quadratic => quadratic(coeffs[2], coeffs[1], coeffs[0], config),
        DegreeClass::Cubic => cubic(&coeffs, config),
        DegreeClass::HigherDegrees(n) => return Err(higher_degree(n)),
    };
    roots.sort_by(|a, b| a.value.total_cmp(&b.value));
    let roots = merge_close(roots, config);
    trace!(degree, ?roots, "polynomial roots");
    Ok(roots)
}

/// Folds neighbouring roots that agree within tolerance into one, summing multiplicities.
fn merge_close(sorted: Vec<Root>, config: &SolverConfig) -> Vec<Root> {
    let mut merged: Vec<Root> = Vec::with_capacity(sorted.len());
    for root in sorted {
        match merged.last_mut() {
            Some(last) if config.is_zero(root.value - last.value) => {
                last.multiplicity += root.multiplicity;
            }
            _ => merged.push(root),
        }
    }
    merged
}

fn higher_degree(n: u32) -> FuncError {
    FuncError::not_implemented(format!("real roots of a degree {n} polynomial"))
}

fn quadratic(a: f64, b: f64, c: f64, config: &SolverConfig) -> Vec<Root> {
    let delta = b * b - 4.0 * a * c;
    trace!(a, b, c, delta, "quadratic discriminant");
    if delta.abs() <= config.tolerance * (b * b).max((4.0 * a * c).abs()) {
        vec![Root::repeated(-b / (2.0 * a), 2)]
    } else if delta > 0.0 {
        let sqrt_delta = delta.sqrt();
        vec![
            Root::simple((-b - sqrt_delta) / (2.0 * a)),
            Root::simple((-b + sqrt_delta) / (2.0 * a)),
        ]
    } else {
        Vec::new()
    }
}

/// Depressed-cubic form `t³ + pt + q` with `x = t - b/3`.
fn cubic(coeffs: &[f64], config: &SolverConfig) -> Vec<Root> {
    let lead = coeffs[3];
    let (b, c, d) = (coeffs[2] / lead, coeffs[1] / lead, coeffs[0] / lead);
    let shift = b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let delta = -(4.0 * p * p * p + 27.0 * q * q);
    trace!(p, q, delta, "cubic discriminant");

    if config.is_zero(p) && config.is_zero(q) {
        return vec![Root::repeated(-shift, 3)];
    }
    let (cubed, squared) = (4.0 * p.abs().powi(3), 27.0 * q * q);
    // t³ + q = 0 once p no longer matters
    if cubed <= config.tolerance * squared {
        return vec![Root::simple(polish(coeffs, -q.cbrt() - shift))];
    }
    if delta.abs() <= config.tolerance * cubed.max(squared) {
        return vec![
            Root::repeated(-3.0 * q / (2.0 * p) - shift, 2),
            Root::simple(polish(coeffs, 3.0 * q / p - shift)),
        ];
    }
    if delta > 0.0 {
        let m = 2.0 * (-p / 3.0).sqrt();
        let arg = (3.0 * q / (p * m)).clamp(-1.0, 1.0);
        let theta = arg.acos() / 3.0;
        (0..3)
            .map(|k| {
                let t = m * (theta - TAU * f64::from(k) / 3.0).cos();
                Root::simple(polish(coeffs, t - shift))
            })
            .collect()
    } else {
        let half_q = q / 2.0;
        let s = (half_q * half_q + p * p * p / 27.0).sqrt();
        let t = (-half_q + s).cbrt() + (-half_q - s).cbrt();
        vec![Root::simple(polish(coeffs, t - shift))]
    }
}

/// Two Newton steps on the original coefficients to remove trigonometric round-off.
fn polish(coeffs: &[f64], mut x: f64) -> f64 {
    for _ in 0..2 {
        let (value, slope) = coeffs
            .iter()
            .rev()
            .fold((0.0, 0.0), |(v, s), c| (v * x + c, s * x + v));
        if slope == 0.0 || !slope.is_finite() {
            break;
        }
        x -= value / slope;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(coeffs: &[f64]) -> Vec<(f64, u32)> {
        real_roots(coeffs, &SolverConfig::default())
            .unwrap()
            .into_iter()
            .map(|r| (r.value, r.multiplicity))
            .collect()
    }

    fn assert_close(got: &[(f64, u32)], expected: &[(f64, u32)]) {
        assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
        for ((g, gm), (e, em)) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-9, "{got:?} vs {expected:?}");
            assert_eq!(gm, em);
        }
    }

    #[test]
    fn linear_and_quadratic() {
        assert_close(&values(&[4.0, 2.0]), &[(-2.0, 1)]);
        assert_close(&values(&[6.0, -5.0, 1.0]), &[(2.0, 1), (3.0, 1)]);
        assert_close(&values(&[1.0, 2.0, 1.0]), &[(-1.0, 2)]);
        assert!(values(&[1.0, 0.0, 1.0]).is_empty());
    }

    #[test]
    fn cubic_three_distinct() {
        assert_close(&values(&[-6.0, 11.0, -6.0, 1.0]), &[(1.0, 1), (2.0, 1), (3.0, 1)]);
    }

    #[test]
    fn cubic_repeated() {
        // (x - 1)²(x - 2)
        assert_close(&values(&[-2.0, 5.0, -4.0, 1.0]), &[(1.0, 2), (2.0, 1)]);
        // (x + 2)³
        assert_close(&values(&[8.0, 12.0, 6.0, 1.0]), &[(-2.0, 3)]);
    }

    #[test]
    fn cubic_single_real() {
        // x³ + x + 10 = (x + 2)(x² - 2x + 5)
        assert_close(&values(&[10.0, 1.0, 0.0, 1.0]), &[(-2.0, 1)]);
    }

    #[test]
    fn close_roots_stay_distinct() {
        // x³ - 0.0001x
        assert_close(
            &values(&[0.0, -0.0001, 0.0, 1.0]),
            &[(-0.01, 1), (0.0, 1), (0.01, 1)],
        );
        // x² - 1e-10
        assert_close(&values(&[-1e-10, 0.0, 1.0]), &[(-1e-5, 1), (1e-5, 1)]);
    }

    #[test]
    fn cubic_with_vanishing_linear_term() {
        let roots = values(&[5e-6, 0.0, 0.0, 1.0]);
        assert_eq!(roots.len(), 1);
        let (value, multiplicity) = roots[0];
        assert!(value.is_finite());
        assert!((value + 5e-6f64.cbrt()).abs() < 1e-12, "{value}");
        assert!((value + 0.0171).abs() < 1e-4);
        assert_eq!(multiplicity, 1);
    }

    #[test]
    fn coincident_roots_merge() {
        let merged = merge_close(
            vec![Root::simple(1.0), Root::simple(1.0 + 1e-12), Root::simple(2.0)],
            &SolverConfig::default(),
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].multiplicity, 2);
        assert_eq!(merged[1].multiplicity, 1);
    }

    #[test]
    fn huge_degree_fails_before_expanding() {
        let p = Polynomial::monomial(1.0, &crate::variable::Variable::default_free(), 1 << 31);
        let err = polynomial_roots(&p, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, FuncError::NotImplemented(msg) if msg.contains("degree 2147483648")));
    }

    #[test]
    fn quartic_is_not_implemented() {
        let err = real_roots(&[1.0, 0.0, 0.0, 0.0, 1.0], &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, FuncError::NotImplemented(msg) if msg.contains("degree 4")));
    }
}
