//! Formatting helpers for rendering functions, ranges and solver output.

pub mod expr;
pub mod number;

pub use expr::{pretty_polynomial, pretty_solutions, pretty_term};
pub use number::{pretty_number, subscript, superscript};
