//! Polynomials as ordered sequences of terms, with merge-by-exponent arithmetic.

mod term;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use num_traits::Zero;

use crate::error::{FuncError, Result};
use crate::variable::{Bindings, Variable};

pub use term::{Exponents, PolynomialTerm};

const MAX_DENSE_DEGREE: u32 = 1 << 16;

/// Root-finding strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegreeClass {
    Constant,
    Linear,
    Quadratic,
    Cubic,
    HigherDegrees(u32),
}

impl DegreeClass {
    pub fn of(degree: u32) -> Self {
        match degree {
            0 => DegreeClass::Constant,
            1 => DegreeClass::Linear,
            2 => DegreeClass::Quadratic,
            3 => DegreeClass::Cubic,
            n => DegreeClass::HigherDegrees(n),
        }
    }
}

/// A polynomial body. The constructor keeps terms as given; every arithmetic operation returns
/// a merged polynomial (like terms combined, zero coefficients removed, highest degree first).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polynomial {
    terms: Vec<PolynomialTerm>,
}

impl Polynomial {
    pub fn new(terms: Vec<PolynomialTerm>) -> Self {
        Polynomial { terms }
    }

    pub fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    pub fn one() -> Self {
        Polynomial::constant(1.0)
    }

    /// A degree-0 polynomial; `0` yields the empty polynomial.
    pub fn constant(c: f64) -> Self {
        if c.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            terms: vec![PolynomialTerm::constant(c)],
        }
    }

    pub fn monomial(coefficient: f64, var: &Variable, exponent: u32) -> Self {
        Polynomial::new(vec![PolynomialTerm::monomial(coefficient, var, exponent)]).merged()
    }

    pub fn variable(var: &Variable) -> Self {
        Polynomial::monomial(1.0, var, 1)
    }

    /// Dense univariate constructor: `coeffs[i]` multiplies `var^i`.
    pub fn from_coefficients(var: &Variable, coeffs: &[f64]) -> Self {
        let terms = coeffs
            .iter()
            .enumerate()
            .map(|(exp, c)| PolynomialTerm::monomial(*c, var, exp as u32))
            .collect();
        Polynomial::new(terms).merged()
    }

    pub fn terms(&self) -> &[PolynomialTerm] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(|t| t.coefficient().is_zero())
    }

    /// True when no term mentions a variable.
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(PolynomialTerm::is_constant)
    }

    pub fn constant_value(&self) -> Option<f64> {
        if self.is_constant() {
            Some(self.terms.iter().map(PolynomialTerm::coefficient).sum())
        } else {
            None
        }
    }

    pub fn degree(&self) -> u32 {
        self.terms
            .iter()
            .filter(|t| !t.coefficient().is_zero())
            .map(PolynomialTerm::degree)
            .max()
            .unwrap_or(0)
    }

    /// Coefficient of the highest-degree term after merging; 0 for the zero polynomial.
    pub fn leading_coefficient(&self) -> f64 {
        self.merged()
            .terms
            .first()
            .map_or(0.0, PolynomialTerm::coefficient)
    }

    pub fn degree_class(&self) -> DegreeClass {
        DegreeClass::of(self.degree())
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        self.terms
            .iter()
            .flat_map(|t| t.variables().cloned())
            .collect()
    }

    pub fn contains_variable(&self, var: &Variable) -> bool {
        self.terms.iter().any(|t| t.contains_variable(var))
    }

    /// Combines like terms, drops zero coefficients and orders terms by descending degree.
    pub fn merged(&self) -> Self {
        let mut coeffs: BTreeMap<Exponents, f64> = BTreeMap::new();
        for term in &self.terms {
            merge_into(&mut coeffs, term.exponents().clone(), term.coefficient());
        }
        Polynomial::from_map(coeffs)
    }

    fn from_map(coeffs: BTreeMap<Exponents, f64>) -> Self {
        let mut terms: Vec<PolynomialTerm> = coeffs
            .into_iter()
            .map(|(exps, c)| PolynomialTerm::from_parts(c, exps))
            .collect();
        terms.sort_by(|a, b| {
            b.degree()
                .cmp(&a.degree())
                .then_with(|| b.exponents().cmp(a.exponents()))
        });
        Polynomial { terms }
    }

    pub fn scale(&self, k: f64) -> Self {
        Polynomial::new(self.terms.iter().map(|t| t.scale(k)).collect()).merged()
    }

    /// Repeated multiplication; `pow(0)` is the constant 1.
    pub fn pow(&self, exp: u32) -> Result<Self> {
        let mut result = Polynomial::one();
        let mut base = self.merged();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result.try_mul(&base)?;
            }
            n /= 2;
            if n > 0 {
                base = base.try_mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Distributes every term over every term; fails when an exponent overflows.
    pub fn try_mul(&self, rhs: &Polynomial) -> Result<Self> {
        let mut coeffs = BTreeMap::new();
        for a in &self.terms {
            for b in &rhs.terms {
                let product = a.mul(b)?;
                let coeff = product.coefficient();
                merge_into(&mut coeffs, product.exponents().clone(), coeff);
            }
        }
        Ok(Polynomial::from_map(coeffs))
    }

    pub fn derivative(&self, var: &Variable) -> Self {
        Polynomial::new(self.terms.iter().filter_map(|t| t.derivative(var)).collect()).merged()
    }

    pub fn antiderivative(&self, var: &Variable) -> Result<Self> {
        let terms = self
            .terms
            .iter()
            .map(|t| t.antiderivative(var))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polynomial::new(terms).merged())
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        self.terms.iter().map(|t| t.evaluate(bindings)).sum()
    }

    pub fn partial_evaluate(&self, bindings: &Bindings) -> Self {
        Polynomial::new(
            self.terms
                .iter()
                .map(|t| t.partial_evaluate(bindings))
                .collect(),
        )
        .merged()
    }

    /// Dense coefficients in `var`, lowest power first. Fails when another variable appears or
    /// the degree is too large for a dense vector.
    pub fn coefficients(&self, var: &Variable) -> Result<Vec<f64>> {
        if self.degree() > MAX_DENSE_DEGREE {
            return Err(FuncError::not_implemented(format!(
                "dense coefficients of a degree {} polynomial",
                self.degree()
            )));
        }
        let mut coeffs = vec![0.0; self.degree() as usize + 1];
        for term in self.merged().terms {
            if let Some(other) = term.variables().find(|v| *v != var) {
                return Err(FuncError::not_implemented(format!(
                    "solving a polynomial in more than one variable ({var}, {other})"
                )));
            }
            coeffs[term.exponent(var) as usize] += term.coefficient();
        }
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Ok(coeffs)
    }
}

fn merge_into(coeffs: &mut BTreeMap<Exponents, f64>, exps: Exponents, coeff: f64) {
    match coeffs.entry(exps) {
        Entry::Vacant(entry) => {
            if !coeff.is_zero() {
                entry.insert(coeff);
            }
        }
        Entry::Occupied(mut entry) => {
            let updated = *entry.get() + coeff;
            if updated.is_zero() {
                entry.remove();
            } else {
                *entry.get_mut() = updated;
            }
        }
    }
}

impl std::ops::Add for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Polynomial) -> Polynomial {
        let mut terms = self.terms;
        terms.extend(rhs.terms);
        Polynomial { terms }.merged()
    }
}

impl std::ops::Add<&Polynomial> for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: &Polynomial) -> Polynomial {
        self + rhs.clone()
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl std::ops::Sub<&Polynomial> for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self - rhs.clone()
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        Polynomial::new(self.terms.iter().map(PolynomialTerm::negate).collect()).merged()
    }
}

impl FromStr for Polynomial {
    type Err = FuncError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_polynomial(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Variable {
        Variable::new("x").unwrap()
    }

    #[test]
    fn constructor_keeps_unmerged_terms() {
        let p = Polynomial::new(vec![
            PolynomialTerm::monomial(1.0, &x(), 1),
            PolynomialTerm::monomial(2.0, &x(), 1),
        ]);
        assert_eq!(p.terms().len(), 2);
        assert_eq!(p.merged().terms(), &[PolynomialTerm::monomial(3.0, &x(), 1)]);
    }

    #[test]
    fn cancellation_removes_terms() {
        let p = Polynomial::monomial(2.0, &x(), 2) + Polynomial::constant(1.0);
        let diff = p.clone() - p;
        assert!(diff.terms().is_empty());
        assert_eq!(diff.degree(), 0);
    }

    #[test]
    fn pow_stops_squaring_after_the_last_bit() {
        let p = Polynomial::variable(&x()).pow(1 << 31).unwrap();
        assert_eq!(p.degree(), 1 << 31);
        assert!(matches!(p.pow(2), Err(FuncError::NotImplemented(_))));
        assert_eq!(
            Polynomial::from_coefficients(&x(), &[1.0, 1.0]).pow(2).unwrap(),
            Polynomial::from_coefficients(&x(), &[1.0, 2.0, 1.0])
        );
        assert_eq!(Polynomial::zero().pow(0).unwrap(), Polynomial::one());
    }

    #[test]
    fn huge_degrees_have_no_dense_form() {
        let p = Polynomial::monomial(1.0, &x(), u32::MAX);
        assert!(matches!(p.coefficients(&x()), Err(FuncError::NotImplemented(_))));
        assert_eq!(p.leading_coefficient(), 1.0);
    }

    #[test]
    fn coefficients_are_dense() {
        let p = Polynomial::from_coefficients(&x(), &[6.0, 0.0, 1.0]);
        assert_eq!(p.coefficients(&x()).unwrap(), vec![6.0, 0.0, 1.0]);
        assert_eq!(p.degree_class(), DegreeClass::Quadratic);
    }
}
