//! Equation and inequality solving.
//!
//! Every supported shape is reduced to a polynomial problem in one variable: equations end in
//! [`roots::polynomial_roots`], inequalities in the sign analysis of [`sign::solve_sign`]. The
//! function layer calls into `roots` and `sign` for domain and range inference; neither of those
//! depends on [`crate::function`].

pub mod equation;
pub mod inequality;
pub mod roots;
pub mod sign;

pub use equation::{solve_polynomial_equation, Equation, Multiplicity, Solutions, SolvedEquation};
pub use inequality::{Inequality, SolvedInequality};
pub use roots::{polynomial_roots, real_roots, Root};
pub use sign::{solve_sign, InequalityType};

use crate::error::{FuncError, Result};
use crate::function::{Function, FunctionKind};
use crate::polynomial::Polynomial;

/// Constant and polynomial sides as a polynomial; anything else is not liftable.
pub(crate) fn lift(side: &Function) -> Option<Polynomial> {
    match side.kind() {
        FunctionKind::Constant(c) => Some(Polynomial::constant(*c)),
        FunctionKind::Polynomial(p) => Some(p.merged()),
        _ => None,
    }
}

pub(crate) fn unsupported(what: &str, left: &Function, right: &Function) -> FuncError {
    FuncError::not_implemented(format!(
        "{what} between a {} and a {}",
        left.function_type(),
        right.function_type()
    ))
}

pub(crate) fn lift_pair(
    what: &str,
    left: &Function,
    right: &Function,
) -> Result<(Polynomial, Polynomial)> {
    match (lift(left), lift(right)) {
        (Some(p), Some(q)) => Ok((p, q)),
        _ => Err(unsupported(what, left, right)),
    }
}
