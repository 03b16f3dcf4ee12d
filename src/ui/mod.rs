//! String-based UI helpers for quick usage and rendering.

mod solve;

use crate::calculus::integrate as integrate_fn;
use crate::error::{FuncError, Result};
use crate::format::pretty_solutions;
use crate::function::{Function, MultiFunction};
use crate::parser::parse_polynomial;
use crate::polynomial::Polynomial;
use crate::solver::{Equation, Inequality, InequalityType, SolvedEquation, SolvedInequality};
use crate::variable::Variable;

pub use solve::{inequality_summary, solve_summary};

pub fn parse(input: &str) -> Result<Polynomial> {
    parse_polynomial(input)
}

/// `poly("f", "x", "x^2 - 1")` builds `f(x) = x² - 1`.
pub fn poly(name: &str, var: &str, body: &str) -> Result<Function> {
    Function::polynomial(name, Variable::new(var)?, parse_polynomial(body)?)
}

/// Partial derivative of a polynomial in any number of variables.
pub fn differentiate(input: &str, var: &str) -> Result<MultiFunction> {
    let var = Variable::new(var)?;
    MultiFunction::polynomial("f", parse_polynomial(input)?)?.partial_derivative(&var)
}

/// `diff("x^2 y", "x")` is `"2xy"`.
pub fn diff(input: &str, var: &str) -> Result<String> {
    Ok(differentiate(input, var)?.body().to_string())
}

pub fn integrate(input: &str, var: &str) -> Result<Function> {
    let var = Variable::new(var)?;
    integrate_fn(&poly("F", var.name(), input)?, &var)
}

pub fn inte(input: &str, var: &str) -> Result<String> {
    Ok(integrate(input, var)?.body())
}

pub fn solve_equation(lhs: &str, rhs: &str) -> Result<SolvedEquation> {
    let (left, right) = parse_sides(lhs, rhs)?;
    Equation::new(left, right).solve()
}

/// Solutions of `lhs = rhs`, e.g. `{[2, 2] → 1, [3, 3] → 1}`.
pub fn solve(lhs: &str, rhs: &str) -> Result<String> {
    Ok(pretty_solutions(solve_equation(lhs, rhs)?.solutions()))
}

/// Accepts a single `lhs = rhs` string.
pub fn solve_eq(input: &str) -> Result<String> {
    let (lhs, rhs) = input
        .split_once('=')
        .ok_or_else(|| FuncError::Parse("equation must contain '='".to_string()))?;
    solve(lhs.trim(), rhs.trim())
}

pub fn inequality(lhs: &str, op: &str, rhs: &str) -> Result<SolvedInequality> {
    let op: InequalityType = op.parse()?;
    let (left, right) = parse_sides(lhs, rhs)?;
    Inequality::new(left, op, right).solve()
}

/// Solution set of `lhs op rhs` as a union of ranges, e.g. `(-∞, -1) ∪ (1, ∞)`.
pub fn solve_inequality(lhs: &str, op: &str, rhs: &str) -> Result<String> {
    let solved = inequality(lhs, op, rhs)?;
    if solved.solution().is_empty() {
        return Ok("∅".to_string());
    }
    let parts: Vec<String> = solved.solution().iter().map(ToString::to_string).collect();
    Ok(parts.join(" ∪ "))
}

/// Both sides share the one variable either of them mentions; constants stay constants.
fn parse_sides(lhs: &str, rhs: &str) -> Result<(Function, Function)> {
    let (p, q) = (parse_polynomial(lhs)?, parse_polynomial(rhs)?);
    let mut vars = p.variables();
    vars.extend(q.variables());
    let var = match vars.len() {
        0 => None,
        1 => vars.into_iter().next(),
        n => {
            return Err(FuncError::not_implemented(format!(
                "solving in {n} variables"
            )))
        }
    };
    Ok((side("lhs", var.as_ref(), p)?, side("rhs", var.as_ref(), q)?))
}

fn side(name: &str, var: Option<&Variable>, body: Polynomial) -> Result<Function> {
    match (body.merged().constant_value(), var) {
        (Some(c), _) => Function::constant(name, c),
        (None, Some(var)) => Function::polynomial(name, var.clone(), body),
        (None, None) => Function::constant(name, 0.0),
    }
}
