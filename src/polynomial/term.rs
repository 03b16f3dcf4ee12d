use std::collections::BTreeMap;

use crate::error::{FuncError, Result};
use crate::variable::{Bindings, Variable};

/// Exponent map of a term; a missing variable has exponent 0.
pub type Exponents = BTreeMap<Variable, u32>;

/// `coefficient * x₁^e₁ * x₂^e₂ * ...`
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialTerm {
    coefficient: f64,
    exponents: Exponents,
}

impl PolynomialTerm {
    /// Repeated variables have their exponents summed (saturating at `u32::MAX`); zero exponents
    /// are dropped.
    pub fn new(coefficient: f64, exponents: impl IntoIterator<Item = (Variable, u32)>) -> Self {
        let mut map = Exponents::new();
        for (var, exp) in exponents {
            if exp == 0 || var.is_all() {
                continue;
            }
            let entry = map.entry(var).or_insert(0);
            *entry = entry.saturating_add(exp);
        }
        PolynomialTerm {
            coefficient,
            exponents: map,
        }
    }

    pub fn constant(coefficient: f64) -> Self {
        PolynomialTerm {
            coefficient,
            exponents: Exponents::new(),
        }
    }

    pub fn monomial(coefficient: f64, var: &Variable, exponent: u32) -> Self {
        PolynomialTerm::new(coefficient, [(var.clone(), exponent)])
    }

    pub(crate) fn from_parts(coefficient: f64, exponents: Exponents) -> Self {
        PolynomialTerm {
            coefficient,
            exponents,
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn exponents(&self) -> &Exponents {
        &self.exponents
    }

    pub fn exponent(&self, var: &Variable) -> u32 {
        self.exponents.get(var).copied().unwrap_or(0)
    }

    /// Total degree: the sum of all exponents, saturating at `u32::MAX`.
    pub fn degree(&self) -> u32 {
        self.exponents
            .values()
            .try_fold(0u32, |total, exp| total.checked_add(*exp))
            .unwrap_or(u32::MAX)
    }

    pub fn is_constant(&self) -> bool {
        self.exponents.is_empty()
    }

    pub fn is_like(&self, other: &PolynomialTerm) -> bool {
        self.exponents == other.exponents
    }

    pub fn contains_variable(&self, var: &Variable) -> bool {
        self.exponents.contains_key(var)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.exponents.keys()
    }

    pub fn scale(&self, k: f64) -> Self {
        PolynomialTerm {
            coefficient: self.coefficient * k,
            exponents: self.exponents.clone(),
        }
    }

    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Coefficients multiply, exponents add per shared variable. Fails when an exponent would
    /// leave the `u32` range.
    pub fn mul(&self, other: &PolynomialTerm) -> Result<Self> {
        let mut exponents = self.exponents.clone();
        for (var, exp) in &other.exponents {
            let entry = exponents.entry(var.clone()).or_insert(0);
            *entry = entry
                .checked_add(*exp)
                .ok_or_else(|| exponent_overflow(var))?;
        }
        Ok(PolynomialTerm {
            coefficient: self.coefficient * other.coefficient,
            exponents,
        })
    }

    /// Power rule in `var`; `None` when the term does not depend on `var`.
    pub fn derivative(&self, var: &Variable) -> Option<Self> {
        let exp = self.exponent(var);
        if exp == 0 {
            return None;
        }
        let mut exponents = self.exponents.clone();
        if exp == 1 {
            exponents.remove(var);
        } else {
            exponents.insert(var.clone(), exp - 1);
        }
        Some(PolynomialTerm {
            coefficient: self.coefficient * f64::from(exp),
            exponents,
        })
    }

    /// Reverse power rule in `var`.
    pub fn antiderivative(&self, var: &Variable) -> Result<Self> {
        let exp = self
            .exponent(var)
            .checked_add(1)
            .ok_or_else(|| exponent_overflow(var))?;
        let mut exponents = self.exponents.clone();
        exponents.insert(var.clone(), exp);
        Ok(PolynomialTerm {
            coefficient: self.coefficient / f64::from(exp),
            exponents,
        })
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        let mut value = self.coefficient;
        for (var, exp) in &self.exponents {
            let x = bindings
                .get(var)
                .ok_or_else(|| FuncError::UnboundVariable(var.name().to_string()))?;
            value *= power(*x, *exp);
        }
        Ok(value)
    }

    /// Folds bound variables into the coefficient, keeping the unbound ones.
    pub fn partial_evaluate(&self, bindings: &Bindings) -> Self {
        let mut coefficient = self.coefficient;
        let mut exponents = Exponents::new();
        for (var, exp) in &self.exponents {
            match bindings.get(var) {
                Some(x) => coefficient *= power(*x, *exp),
                None => {
                    exponents.insert(var.clone(), *exp);
                }
            }
        }
        PolynomialTerm {
            coefficient,
            exponents,
        }
    }
}

fn exponent_overflow(var: &Variable) -> FuncError {
    FuncError::not_implemented(format!("exponent of `{var}` above {}", u32::MAX))
}

pub(crate) fn power(x: f64, exp: u32) -> f64 {
    match i32::try_from(exp) {
        Ok(e) => x.powi(e),
        Err(_) => x.powf(f64::from(exp)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Variable {
        Variable::new("x").unwrap()
    }

    fn y() -> Variable {
        Variable::new("y").unwrap()
    }

    #[test]
    fn zero_exponents_are_dropped() {
        let t = PolynomialTerm::new(3.0, [(x(), 0), (y(), 2)]);
        assert!(!t.contains_variable(&x()));
        assert_eq!(t.degree(), 2);
    }

    #[test]
    fn multiplication_adds_exponents() {
        let a = PolynomialTerm::new(2.0, [(x(), 1), (y(), 1)]);
        let b = PolynomialTerm::monomial(-3.0, &x(), 2);
        let product = a.mul(&b).unwrap();
        assert_eq!(product.coefficient(), -6.0);
        assert_eq!(product.exponent(&x()), 3);
        assert_eq!(product.exponent(&y()), 1);
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let big = PolynomialTerm::monomial(1.0, &x(), u32::MAX);
        assert!(matches!(
            big.mul(&PolynomialTerm::monomial(1.0, &x(), 1)),
            Err(FuncError::NotImplemented(_))
        ));
        assert!(big.antiderivative(&x()).is_err());
        let mixed = PolynomialTerm::new(1.0, [(x(), u32::MAX), (y(), 1)]);
        assert_eq!(mixed.degree(), u32::MAX);
    }

    #[test]
    fn derivative_vanishes_without_the_variable() {
        let t = PolynomialTerm::monomial(5.0, &y(), 3);
        assert!(t.derivative(&x()).is_none());
        let d = t.derivative(&y()).unwrap();
        assert_eq!(d, PolynomialTerm::monomial(15.0, &y(), 2));
    }
}
