//! Functions of several variables. No solver consumes these directly; bind variables with
//! [`MultiFunction::partial_evaluate`] and convert with [`MultiFunction::to_univariate`].

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FuncError, Result};
use crate::format::{pretty_number, pretty_polynomial};
use crate::function::{Combine, Function, FunctionType};
use crate::polynomial::Polynomial;
use crate::range::Range;
use crate::variable::{validate_name, Bindings, Variable};

#[derive(Clone, Debug, PartialEq)]
pub enum MultiBody {
    Constant(f64),
    Polynomial(Polynomial),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiFunction {
    name: String,
    variables: Vec<Variable>,
    body: MultiBody,
    domain: BTreeMap<Variable, Range>,
    range: Vec<Range>,
}

impl MultiFunction {
    /// Every variable the body mentions must be declared; declared variables may go unused.
    pub fn new(name: impl Into<String>, variables: Vec<Variable>, body: MultiBody) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "function")?;
        let mut declared = Vec::with_capacity(variables.len());
        for var in variables {
            if var.is_all() {
                continue;
            }
            if declared.contains(&var) {
                return Err(FuncError::invalid(format!("variable `{var}` declared twice")));
            }
            declared.push(var);
        }
        if let MultiBody::Polynomial(p) = &body {
            if let Some(missing) = p.variables().into_iter().find(|v| !declared.contains(v)) {
                return Err(FuncError::invalid(format!(
                    "`{name}` uses undeclared variable `{missing}`"
                )));
            }
        }
        let domain = declared.iter().map(|v| (v.clone(), Range::All)).collect();
        let range = match &body {
            MultiBody::Constant(c) => vec![Range::point(*c)],
            MultiBody::Polynomial(p) => match p.merged().constant_value() {
                Some(c) => vec![Range::point(c)],
                None => vec![Range::All],
            },
        };
        Ok(MultiFunction {
            name,
            variables: declared,
            body,
            domain,
            range,
        })
    }

    pub fn constant(name: impl Into<String>, value: f64) -> Result<Self> {
        MultiFunction::new(name, Vec::new(), MultiBody::Constant(value))
    }

    /// Declares exactly the variables the polynomial mentions, in name order.
    pub fn polynomial(name: impl Into<String>, body: Polynomial) -> Result<Self> {
        let variables = body.variables().into_iter().collect();
        MultiFunction::new(name, variables, MultiBody::Polynomial(body))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn body(&self) -> &MultiBody {
        &self.body
    }

    pub fn domain(&self) -> &BTreeMap<Variable, Range> {
        &self.domain
    }

    pub fn range(&self) -> &[Range] {
        &self.range
    }

    pub fn function_type(&self) -> FunctionType {
        match self.body {
            MultiBody::Constant(_) => FunctionType::Constant,
            MultiBody::Polynomial(_) => FunctionType::Polynomial,
        }
    }

    pub fn is_constant(&self) -> bool {
        match &self.body {
            MultiBody::Constant(_) => true,
            MultiBody::Polynomial(p) => p.is_constant(),
        }
    }

    pub fn contains_variable(&self, var: &Variable) -> bool {
        match &self.body {
            MultiBody::Constant(_) => false,
            MultiBody::Polynomial(p) => p.contains_variable(var),
        }
    }

    /// Requires a binding for every declared variable.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        if let Some(missing) = self.variables.iter().find(|v| !bindings.contains_key(*v)) {
            return Err(FuncError::UnboundVariable(missing.name().to_string()));
        }
        match &self.body {
            MultiBody::Constant(c) => Ok(*c),
            MultiBody::Polynomial(p) => p.evaluate(bindings),
        }
    }

    /// Binds a subset of the variables, leaving a function of the rest.
    pub fn partial_evaluate(&self, bindings: &Bindings) -> Result<MultiFunction> {
        let remaining: Vec<Variable> = self
            .variables
            .iter()
            .filter(|v| !bindings.contains_key(*v))
            .cloned()
            .collect();
        let body = match &self.body {
            MultiBody::Constant(c) => MultiBody::Constant(*c),
            MultiBody::Polynomial(p) => {
                let reduced = p.partial_evaluate(bindings);
                match (remaining.is_empty(), reduced.constant_value()) {
                    (true, Some(c)) => MultiBody::Constant(c),
                    _ => MultiBody::Polynomial(reduced),
                }
            }
        };
        MultiFunction::new(self.name.clone(), remaining, body)
    }

    pub fn partial_derivative(&self, var: &Variable) -> Result<MultiFunction> {
        crate::calculus::differentiate_multi(self, var)
    }

    pub fn add(&self, other: &MultiFunction) -> Result<MultiFunction> {
        self.combine(other, Combine::Add)
    }

    pub fn subtract(&self, other: &MultiFunction) -> Result<MultiFunction> {
        self.combine(other, Combine::Subtract)
    }

    pub fn multiply(&self, other: &MultiFunction) -> Result<MultiFunction> {
        self.combine(other, Combine::Multiply)
    }

    pub fn divide(&self, other: &MultiFunction) -> Result<MultiFunction> {
        self.combine(other, Combine::Divide)
    }

    fn combine(&self, other: &MultiFunction, op: Combine) -> Result<MultiFunction> {
        let body = match (&self.body, &other.body) {
            (MultiBody::Constant(a), MultiBody::Constant(b)) => {
                MultiBody::Constant(op.scalars(*a, *b))
            }
            (MultiBody::Polynomial(p), MultiBody::Polynomial(q)) => {
                MultiBody::Polynomial(op.polynomials(p, q)?)
            }
            _ => {
                return Err(FuncError::UnsupportedCombination {
                    op: op.verb(),
                    left: self.function_type(),
                    right: other.function_type(),
                })
            }
        };
        let mut variables = self.variables.clone();
        for var in &other.variables {
            if !variables.contains(var) {
                variables.push(var.clone());
            }
        }
        MultiFunction::new(self.name.clone(), variables, body)
    }

    /// Bridges to the single-variable model once at most one variable is left.
    pub fn to_univariate(&self) -> Result<Function> {
        match (&self.body, self.variables.as_slice()) {
            (MultiBody::Constant(c), []) => Function::constant(self.name.clone(), *c),
            (MultiBody::Polynomial(p), []) => {
                Function::constant(self.name.clone(), p.constant_value().unwrap_or(0.0))
            }
            (MultiBody::Constant(c), [var]) => Function::polynomial(
                self.name.clone(),
                var.clone(),
                Polynomial::constant(*c),
            ),
            (MultiBody::Polynomial(p), [var]) => {
                Function::polynomial(self.name.clone(), var.clone(), p.clone())
            }
            (_, vars) => Err(FuncError::not_implemented(format!(
                "`{}` still depends on {} variables",
                self.name,
                vars.len()
            ))),
        }
    }
}

impl fmt::Display for MultiBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiBody::Constant(c) => f.write_str(&pretty_number(*c)),
            MultiBody::Polynomial(p) => f.write_str(&pretty_polynomial(p)),
        }
    }
}

impl fmt::Display for MultiFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = &self.body;
        if self.variables.is_empty() {
            return write!(f, "{} = {body}", self.name);
        }
        let vars: Vec<&str> = self.variables.iter().map(Variable::name).collect();
        write!(f, "{}({}) = {body}", self.name, vars.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Variable {
        Variable::new(name).unwrap()
    }

    fn xy() -> MultiFunction {
        // x²y + 3y
        let body: Polynomial = "x^2 y + 3y".parse().unwrap();
        MultiFunction::polynomial("f", body).unwrap()
    }

    #[test]
    fn declares_variables_in_name_order() {
        let f = xy();
        assert_eq!(f.variables(), &[var("x"), var("y")]);
        assert_eq!(f.domain().len(), 2);
        assert_eq!(f.range(), &[Range::All]);
    }

    #[test]
    fn rejects_undeclared_variables() {
        let body: Polynomial = "x + y".parse().unwrap();
        let err = MultiFunction::new("g", vec![var("x")], MultiBody::Polynomial(body)).unwrap_err();
        assert!(matches!(err, FuncError::InvalidConstruction(_)));
    }

    #[test]
    fn evaluate_needs_every_binding() {
        let f = xy();
        let mut bindings = Bindings::new();
        bindings.insert(var("x"), 2.0);
        assert_eq!(f.evaluate(&bindings), Err(FuncError::UnboundVariable("y".into())));
        bindings.insert(var("y"), 1.0);
        assert_eq!(f.evaluate(&bindings), Ok(7.0));
    }

    #[test]
    fn partial_evaluation_then_univariate() {
        let f = xy();
        let mut bindings = Bindings::new();
        bindings.insert(var("y"), 2.0);
        let g = f.partial_evaluate(&bindings).unwrap();
        assert_eq!(g.variables(), &[var("x")]);
        let h = g.to_univariate().unwrap();
        assert_eq!(h.evaluate_at(3.0), Ok(24.0));
    }

    #[test]
    fn partial_derivative_keeps_declared_variables() {
        let df = xy().partial_derivative(&var("x")).unwrap();
        assert_eq!(df.name(), "f'");
        assert_eq!(df.variables(), &[var("x"), var("y")]);
        assert_eq!(df.to_string(), "f'(x, y) = 2xy");
    }

    #[test]
    fn mixed_bodies_do_not_combine() {
        let c = MultiFunction::constant("c", 2.0).unwrap();
        let err = xy().add(&c).unwrap_err();
        assert!(matches!(err, FuncError::UnsupportedCombination { op: "add", .. }));
    }

    #[test]
    fn sum_unions_variables() {
        let f = xy();
        let g = MultiFunction::polynomial("g", "z".parse().unwrap()).unwrap();
        let sum = f.add(&g).unwrap();
        assert_eq!(sum.variables(), &[var("x"), var("y"), var("z")]);
        assert!(sum.to_univariate().is_err());
    }
}
