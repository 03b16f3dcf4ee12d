use std::fmt;

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::Result;
use crate::function::Function;
use crate::range::Range;
use crate::solver::lift_pair;
use crate::solver::sign::{solve_sign, InequalityType};

/// `left <op> right`, not yet solved.
#[derive(Clone, Debug, PartialEq)]
pub struct Inequality {
    left: Function,
    right: Function,
    op: InequalityType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolvedInequality {
    left: Function,
    right: Function,
    op: InequalityType,
    solution: Vec<Range>,
}

impl Inequality {
    pub fn new(left: Function, op: InequalityType, right: Function) -> Self {
        Inequality { left, right, op }
    }

    pub fn left(&self) -> &Function {
        &self.left
    }

    pub fn right(&self) -> &Function {
        &self.right
    }

    pub fn op(&self) -> InequalityType {
        self.op
    }

    pub fn solve(&self) -> Result<SolvedInequality> {
        self.solve_with(&SolverConfig::default())
    }

    /// Only constant and polynomial sides are supported; they are reduced to
    /// `left - right <op> 0`.
    pub fn solve_with(&self, config: &SolverConfig) -> Result<SolvedInequality> {
        let (p, q) = lift_pair("inequality", &self.left, &self.right)?;
        debug!(inequality = %self, "solving polynomial inequality");
        let solution = solve_sign(&(p - q), self.op, config)?;
        Ok(SolvedInequality {
            left: self.left.clone(),
            right: self.right.clone(),
            op: self.op,
            solution,
        })
    }
}

impl SolvedInequality {
    pub fn left(&self) -> &Function {
        &self.left
    }

    pub fn right(&self) -> &Function {
        &self.right
    }

    pub fn op(&self) -> InequalityType {
        self.op
    }

    pub fn solution(&self) -> &[Range] {
        &self.solution
    }

    pub fn into_solution(self) -> Vec<Range> {
        self.solution
    }

    pub fn contains(&self, x: f64) -> bool {
        self.solution.iter().any(|r| r.contains(x))
    }
}

impl fmt::Display for Inequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left.body(), self.op, self.right.body())
    }
}

impl fmt::Display for SolvedInequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}: ", self.left.body(), self.op, self.right.body())?;
        if self.solution.is_empty() {
            return write!(f, "∅");
        }
        let parts: Vec<String> = self.solution.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" ∪ "))
    }
}
