use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::config::{RootCheck, SolverConfig};
use crate::error::{FuncError, Result};
use crate::format::pretty_solutions;
use crate::function::{Function, FunctionKind};
use crate::polynomial::Polynomial;
use crate::range::Range;
use crate::solver::roots::polynomial_roots;
use crate::solver::{lift, lift_pair, unsupported};
use crate::variable::{Bindings, Variable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Count(u32),
    Infinite,
}

impl Multiplicity {
    /// Numeric form; `-1` stands for infinitely many solutions.
    pub fn value(self) -> i32 {
        match self {
            Multiplicity::Count(n) => i32::try_from(n).unwrap_or(i32::MAX),
            Multiplicity::Infinite => -1,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::Count(n) => write!(f, "{n}"),
            Multiplicity::Infinite => write!(f, "∞"),
        }
    }
}

/// Solution points (as single-point ranges, or `All`) mapped to their multiplicity.
pub type Solutions = BTreeMap<Range, Multiplicity>;

fn every_real() -> Solutions {
    Solutions::from([(Range::All, Multiplicity::Infinite)])
}

/// `left = right`, not yet solved.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    left: Function,
    right: Function,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolvedEquation {
    left: Function,
    right: Function,
    solutions: Solutions,
}

impl Equation {
    pub fn new(left: Function, right: Function) -> Self {
        Equation { left, right }
    }

    pub fn left(&self) -> &Function {
        &self.left
    }

    pub fn right(&self) -> &Function {
        &self.right
    }

    pub fn solve(&self) -> Result<SolvedEquation> {
        self.solve_with(&SolverConfig::default())
    }

    pub fn solve_with(&self, config: &SolverConfig) -> Result<SolvedEquation> {
        let solutions = solve_sides(&self.left, &self.right, config)?;
        Ok(SolvedEquation {
            left: self.left.clone(),
            right: self.right.clone(),
            solutions,
        })
    }
}

impl SolvedEquation {
    pub fn left(&self) -> &Function {
        &self.left
    }

    pub fn right(&self) -> &Function {
        &self.right
    }

    pub fn solutions(&self) -> &Solutions {
        &self.solutions
    }

    pub fn into_solutions(self) -> Solutions {
        self.solutions
    }

    pub fn has_infinitely_many(&self) -> bool {
        self.solutions.values().any(|m| *m == Multiplicity::Infinite)
    }
}

fn solve_sides(left: &Function, right: &Function, config: &SolverConfig) -> Result<Solutions> {
    if left.simplify().structurally_equal(&right.simplify()) {
        debug!(%left, %right, "structurally equal sides");
        return Ok(every_real());
    }

    match (left.kind(), right.kind()) {
        (
            FunctionKind::Constant(_) | FunctionKind::Polynomial(_),
            FunctionKind::Constant(_) | FunctionKind::Polynomial(_),
        ) => {
            let (mut p, mut q) = lift_pair("equation", left, right)?;
            if p.is_constant() && !q.is_constant() {
                std::mem::swap(&mut p, &mut q);
            }
            solve_polynomial_equation(&p, &q, config)
        }
        (FunctionKind::Log { base, body }, _) => {
            let solutions = solve_log(*base, body, right, config)?;
            Ok(check_roots(left, right, solutions, config))
        }
        (_, FunctionKind::Log { base, body }) => {
            let solutions = solve_log(*base, body, left, config)?;
            Ok(check_roots(left, right, solutions, config))
        }
        (FunctionKind::Radical { index, body }, _) => {
            let solutions = solve_square_root(*index, body, right, config)?;
            Ok(check_roots(left, right, solutions, config))
        }
        (_, FunctionKind::Radical { index, body }) => {
            let solutions = solve_square_root(*index, body, left, config)?;
            Ok(check_roots(left, right, solutions, config))
        }
    }
}

/// Roots of `left - right` in its single variable, each as a point range.
pub fn solve_polynomial_equation(
    left: &Polynomial,
    right: &Polynomial,
    config: &SolverConfig,
) -> Result<Solutions> {
    let (left, right) = (left.merged(), right.merged());
    if left == right {
        return Ok(every_real());
    }
    let difference = left - right;
    if difference.is_zero() {
        return Ok(every_real());
    }
    debug!(
        degree = difference.degree(),
        class = ?difference.degree_class(),
        "solving polynomial equation"
    );
    Ok(polynomial_roots(&difference, config)?
        .into_iter()
        .map(|root| (Range::point(root.value), Multiplicity::Count(root.multiplicity)))
        .collect())
}

/// `log_base(body) = c` becomes `body = base^c`.
fn solve_log(
    base: f64,
    body: &Function,
    other: &Function,
    config: &SolverConfig,
) -> Result<Solutions> {
    let (Some(body_poly), Some(c)) = (lift(body), constant_value(other)) else {
        return Err(FuncError::not_implemented(format!(
            "logarithmic equation of a {} body against a {}",
            body.function_type(),
            other.function_type()
        )));
    };
    let target = base.powf(c);
    debug!(base, c, target, "reducing logarithmic equation");
    solve_polynomial_equation(&body_poly, &Polynomial::constant(target), config)
}

/// `√body = other` is squared; `√f = √g` equates the bodies.
fn solve_square_root(
    index: u32,
    body: &Function,
    other: &Function,
    config: &SolverConfig,
) -> Result<Solutions> {
    if index != 2 {
        return Err(FuncError::not_implemented(format!(
            "radical equation with root index {index}"
        )));
    }
    let Some(body_poly) = lift(body) else {
        return Err(unsupported("square-root equation", body, other));
    };
    match other.kind() {
        FunctionKind::Radical { index: 2, body: other_body } => {
            let Some(other_poly) = lift(other_body) else {
                return Err(unsupported("square-root equation", body, other_body));
            };
            debug!("equating square-root bodies");
            solve_polynomial_equation(&body_poly, &other_poly, config)
        }
        FunctionKind::Constant(_) | FunctionKind::Polynomial(_) => {
            let squared = lift(other).map(|q| q.pow(2)).transpose()?.unwrap_or_default();
            if config.root_check == RootCheck::Unfiltered {
                warn!("squaring a square-root equation; extraneous roots are not filtered");
            }
            solve_polynomial_equation(&body_poly, &squared, config)
        }
        _ => Err(unsupported("square-root equation", body, other)),
    }
}

fn constant_value(f: &Function) -> Option<f64> {
    match f.kind() {
        FunctionKind::Constant(c) => Some(*c),
        FunctionKind::Polynomial(p) => p.merged().constant_value(),
        _ => None,
    }
}

/// In strict mode, keeps only the roots at which both original sides agree.
fn check_roots(
    left: &Function,
    right: &Function,
    solutions: Solutions,
    config: &SolverConfig,
) -> Solutions {
    if config.root_check == RootCheck::Unfiltered {
        return solutions;
    }
    let var = equation_variable(left, right);
    solutions
        .into_iter()
        .filter(|(range, _)| {
            let Some(x) = range.as_point() else {
                return true;
            };
            let mut bindings = Bindings::new();
            bindings.insert(var.clone(), x);
            let (Ok(l), Ok(r)) = (left.evaluate(&bindings), right.evaluate(&bindings)) else {
                return false;
            };
            let scale = 1.0_f64.max(l.abs()).max(r.abs());
            let valid = l.is_finite()
                && r.is_finite()
                && (l - r).abs() <= config.verify_tolerance * scale;
            if !valid {
                debug!(x, l, r, "discarding extraneous root");
            }
            valid
        })
        .collect()
}

fn equation_variable(left: &Function, right: &Function) -> Variable {
    if left.variable().is_all() {
        right.variable().clone()
    } else {
        left.variable().clone()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left.body(), self.right.body())
    }
}

impl fmt::Display for SolvedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}: {}",
            self.left.body(),
            self.right.body(),
            pretty_solutions(&self.solutions)
        )
    }
}
