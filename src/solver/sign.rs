//! Sign-interval analysis of a univariate polynomial: the core of inequality solving.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::{FuncError, Result};
use crate::polynomial::Polynomial;
use crate::range::{merge_ranges, Range};
use crate::solver::roots::polynomial_roots;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InequalityType {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Negative,
    Zero,
    Positive,
}

impl InequalityType {
    pub fn symbol(self) -> &'static str {
        match self {
            InequalityType::Less => "<",
            InequalityType::LessEqual => "<=",
            InequalityType::Greater => ">",
            InequalityType::GreaterEqual => ">=",
            InequalityType::Equal => "=",
            InequalityType::NotEqual => "!=",
        }
    }

    fn accepts(self, sign: Sign) -> bool {
        match self {
            InequalityType::Less => sign == Sign::Negative,
            InequalityType::LessEqual => sign != Sign::Positive,
            InequalityType::Greater => sign == Sign::Positive,
            InequalityType::GreaterEqual => sign != Sign::Negative,
            InequalityType::Equal => sign == Sign::Zero,
            InequalityType::NotEqual => sign != Sign::Zero,
        }
    }
}

impl fmt::Display for InequalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for InequalityType {
    type Err = FuncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "<" => Ok(InequalityType::Less),
            "<=" | "≤" => Ok(InequalityType::LessEqual),
            ">" => Ok(InequalityType::Greater),
            ">=" | "≥" => Ok(InequalityType::GreaterEqual),
            "=" | "==" => Ok(InequalityType::Equal),
            "!=" | "≠" => Ok(InequalityType::NotEqual),
            other => Err(FuncError::Parse(format!("unknown inequality `{other}`"))),
        }
    }
}

/// Solves `difference <op> 0`, returning maximal disjoint ranges in ascending order.
pub fn solve_sign(
    difference: &Polynomial,
    op: InequalityType,
    config: &SolverConfig,
) -> Result<Vec<Range>> {
    let difference = difference.merged();
    let found = polynomial_roots(&difference, config)?;
    let coeffs = match difference.variables().into_iter().next() {
        Some(var) => difference.coefficients(&var)?,
        None => vec![difference.constant_value().unwrap_or(0.0)],
    };

    let mut roots: Vec<f64> = Vec::new();
    for root in found {
        if roots
            .last()
            .map_or(true, |last| !config.is_zero(root.value - last))
        {
            roots.push(root.value);
        }
    }

    let sign_at = |x: f64| {
        let value = coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c);
        trace!(x, value, "sign test point");
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    };

    let mut pieces = Vec::with_capacity(2 * roots.len() + 1);
    let mut previous = f64::NEG_INFINITY;
    for &root in &roots {
        pieces.push((Range::open(previous, root), sign_at(test_point(previous, root))));
        pieces.push((Range::point(root), Sign::Zero));
        previous = root;
    }
    pieces.push((
        Range::open(previous, f64::INFINITY),
        sign_at(test_point(previous, f64::INFINITY)),
    ));

    let accepted: Vec<Range> = pieces
        .into_iter()
        .filter(|(_, sign)| op.accepts(*sign))
        .map(|(range, _)| range)
        .collect();
    let solution = merge_ranges(accepted);
    debug!(%op, critical_points = roots.len(), ?solution, "sign analysis");
    Ok(solution)
}

fn test_point(low: f64, high: f64) -> f64 {
    match (low.is_finite(), high.is_finite()) {
        (true, true) => low + (high - low) / 2.0,
        (true, false) => low + 1.0,
        (false, true) => high - 1.0,
        (false, false) => 0.0,
    }
}
