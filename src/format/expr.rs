use std::fmt;

use crate::format::{pretty_number, superscript};
use crate::polynomial::{Polynomial, PolynomialTerm};
use crate::solver::{Multiplicity, Solutions};

/// Renders a term with its sign, e.g. `-3x²y`.
pub fn pretty_term(term: &PolynomialTerm) -> String {
    let (negative, body) = unsigned_term(term);
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

fn unsigned_term(term: &PolynomialTerm) -> (bool, String) {
    let coefficient = term.coefficient();
    let magnitude = coefficient.abs();
    let mut body = String::new();
    let text = coefficient_text(magnitude);
    if term.is_constant() || text != "1" {
        body.push_str(&text);
    }
    for (var, exp) in term.exponents() {
        body.push_str(var.name());
        if *exp > 1 {
            body.push_str(&superscript(*exp));
        }
    }
    (coefficient < 0.0, body)
}

/// Two-decimal rounding, except that small nonzero magnitudes switch to scientific notation
/// instead of printing as `0`.
fn coefficient_text(magnitude: f64) -> String {
    let text = pretty_number(magnitude);
    if text == "0" && magnitude != 0.0 {
        format!("{magnitude:e}")
    } else {
        text
    }
}

pub fn pretty_polynomial(poly: &Polynomial) -> String {
    let mut out = String::new();
    for (i, term) in poly.terms().iter().enumerate() {
        let (negative, body) = unsigned_term(term);
        match (i, negative) {
            (0, false) => {}
            (0, true) => out.push('-'),
            (_, false) => out.push_str(" + "),
            (_, true) => out.push_str(" - "),
        }
        out.push_str(&body);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

impl fmt::Display for PolynomialTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty_term(self))
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty_polynomial(self))
    }
}

/// `{[2, 2] → 1, [3, 3] → 1}`; infinitely many solutions print as `ℝ → ∞`.
pub fn pretty_solutions(solutions: &Solutions) -> String {
    let entries: Vec<String> = solutions
        .iter()
        .map(|(range, multiplicity)| match multiplicity {
            Multiplicity::Count(n) => format!("{range} → {n}"),
            Multiplicity::Infinite => format!("{range} → ∞"),
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn renders_signs_and_exponents() {
        let x = Variable::new("x").unwrap();
        let p = Polynomial::from_coefficients(&x, &[6.0, -5.0, 1.0]);
        assert_eq!(pretty_polynomial(&p), "x² - 5x + 6");
        assert_eq!(pretty_polynomial(&-p), "-x² + 5x - 6");
        assert_eq!(pretty_polynomial(&Polynomial::zero()), "0");
    }

    #[test]
    fn small_coefficients_stay_visible() {
        let x = Variable::new("x").unwrap();
        let p = Polynomial::from_coefficients(&x, &[0.0, -0.0001, 0.0, 1.0]);
        assert_eq!(pretty_polynomial(&p), "x³ - 1e-4x");
        let q = Polynomial::from_coefficients(&x, &[0.003, 0.5]);
        assert_eq!(pretty_polynomial(&q), "0.5x + 3e-3");
    }
}
