//! Construction-time domain and range inference.

use tracing::trace;

use super::{log_base, nth_root, Function, FunctionKind};
use crate::config::SolverConfig;
use crate::error::{FuncError, Result};
use crate::polynomial::Polynomial;
use crate::range::{merge_ranges, Range};
use crate::solver::roots::polynomial_roots;
use crate::solver::sign::{solve_sign, InequalityType};
use crate::variable::{Bindings, Variable};

pub(super) fn domain_of(kind: &FunctionKind) -> Result<Vec<Range>> {
    match kind {
        FunctionKind::Constant(_) | FunctionKind::Polynomial(_) => Ok(vec![Range::All]),
        FunctionKind::Log { body, .. } => {
            let positive = body_where(body, InequalityType::Greater)?;
            Ok(intersect_all(body.domain(), &positive))
        }
        FunctionKind::Radical { index, body } if index % 2 == 0 => {
            let non_negative = body_where(body, InequalityType::GreaterEqual)?;
            Ok(intersect_all(body.domain(), &non_negative))
        }
        FunctionKind::Radical { body, .. } => Ok(body.domain().to_vec()),
    }
}

/// Where `body <op> 0`, through the inequality engine.
fn body_where(body: &Function, op: InequalityType) -> Result<Vec<Range>> {
    let poly = match body.kind() {
        FunctionKind::Constant(c) => Polynomial::constant(*c),
        FunctionKind::Polynomial(p) => p.clone(),
        _ => {
            return Err(FuncError::not_implemented(format!(
                "domain restriction over a {} body",
                body.function_type()
            )))
        }
    };
    solve_sign(&poly, op, &SolverConfig::default())
}

pub(crate) fn intersect_all(a: &[Range], b: &[Range]) -> Vec<Range> {
    let pieces = a
        .iter()
        .flat_map(|r| b.iter().map(move |s| r.intersect(s)))
        .collect();
    merge_ranges(pieces)
}

pub(super) fn range_of(kind: &FunctionKind, var: &Variable) -> Vec<Range> {
    match kind {
        FunctionKind::Constant(c) => vec![Range::point(*c)],
        FunctionKind::Polynomial(p) => polynomial_range(p, var),
        FunctionKind::Log { base, body } => {
            let inputs = intersect_all(body.range(), &[Range::above(0.0, false)]);
            map_monotonic(&inputs, |v| log_base(v, *base), *base > 1.0)
        }
        FunctionKind::Radical { index, body } => {
            let inputs = if index % 2 == 0 {
                intersect_all(body.range(), &[Range::above(0.0, true)])
            } else {
                body.range().to_vec()
            };
            map_monotonic(&inputs, |v| nth_root(v, *index), true)
        }
    }
}

fn polynomial_range(p: &Polynomial, var: &Variable) -> Vec<Range> {
    let p = p.merged();
    if let Some(c) = p.constant_value() {
        return vec![Range::point(c)];
    }
    if p.degree() % 2 == 1 {
        return vec![Range::All];
    }
    if p.variables().iter().any(|v| v != var) {
        return vec![Range::All];
    }
    let leading = p.leading_coefficient();
    let critical = match polynomial_roots(&p.derivative(var), &SolverConfig::default()) {
        Ok(roots) => roots,
        Err(err) => {
            trace!(%err, "range left unrestricted");
            return vec![Range::All];
        }
    };
    let values = critical.iter().filter_map(|root| {
        let mut bindings = Bindings::new();
        bindings.insert(var.clone(), root.value);
        p.evaluate(&bindings).ok()
    });
    if leading > 0.0 {
        match values.reduce(f64::min) {
            Some(min) => vec![Range::above(min, true)],
            None => vec![Range::All],
        }
    } else {
        match values.reduce(f64::max) {
            Some(max) => vec![Range::below(max, true)],
            None => vec![Range::All],
        }
    }
}

/// Image of each range under a monotonic `f`.
fn map_monotonic(ranges: &[Range], f: impl Fn(f64) -> f64, increasing: bool) -> Vec<Range> {
    let images = ranges
        .iter()
        .filter_map(|r| {
            let (low, high) = (r.low()?, r.high()?);
            let (low_inclusive, high_inclusive) = match *r {
                Range::Bounded {
                    low_inclusive,
                    high_inclusive,
                    ..
                } => (low_inclusive, high_inclusive),
                _ => (false, false),
            };
            Some(if increasing {
                Range::make(f(low), f(high), low_inclusive, high_inclusive)
            } else {
                Range::make(f(high), f(low), high_inclusive, low_inclusive)
            })
        })
        .collect();
    merge_ranges(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Variable {
        Variable::new("x").unwrap()
    }

    #[test]
    fn quadratic_range_opens_from_the_vertex() {
        let p = Polynomial::from_coefficients(&x(), &[3.0, -2.0, 1.0]);
        assert_eq!(polynomial_range(&p, &x()), vec![Range::above(2.0, true)]);
        let q = p.scale(-1.0);
        assert_eq!(polynomial_range(&q, &x()), vec![Range::below(-2.0, true)]);
    }

    #[test]
    fn odd_degree_covers_the_line() {
        let p = Polynomial::from_coefficients(&x(), &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(polynomial_range(&p, &x()), vec![Range::All]);
    }
}
