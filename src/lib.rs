//! Single-variable functions over the reals (constants, polynomials, logarithms, radicals) with
//! eager domain and range inference, closed-form equation solving up to degree three and
//! polynomial inequality solving by sign analysis.

pub mod calculus;
pub mod config;
pub mod error;
pub mod format;
pub mod function;
pub mod geometry;
pub mod parser;
pub mod polynomial;
pub mod prelude;
pub mod range;
pub mod solver;
pub mod ui;
pub mod variable;

pub use calculus::{differentiate, differentiate_multi, integrate};
pub use config::{RootCheck, SolverConfig};
pub use error::{FuncError, Result};
pub use format::{pretty_number, pretty_polynomial, pretty_solutions};
pub use function::{Function, FunctionKind, FunctionType, MultiBody, MultiFunction, Origin};
pub use geometry::Shape;
pub use parser::parse_polynomial;
pub use polynomial::{DegreeClass, Polynomial, PolynomialTerm};
pub use range::{complement_all, merge_ranges, Range};
pub use solver::{
    polynomial_roots, real_roots, solve_polynomial_equation, solve_sign, Equation, Inequality,
    InequalityType, Multiplicity, Root, Solutions, SolvedEquation, SolvedInequality,
};
pub use variable::{Bindings, Variable};
