//! Univariate functions: a closed set of variants sharing one capability set.

mod domain;
pub mod multivariate;

use std::f64::consts::E;
use std::fmt;

use crate::error::{FuncError, Result};
use crate::format::{pretty_number, pretty_polynomial, subscript, superscript};
use crate::polynomial::Polynomial;
use crate::range::Range;
use crate::variable::{validate_name, Bindings, Variable};

pub use multivariate::{MultiBody, MultiFunction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionType {
    Constant,
    Polynomial,
    Logarithmic,
    Radical,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionType::Constant => "constant function",
            FunctionType::Polynomial => "polynomial function",
            FunctionType::Logarithmic => "logarithmic function",
            FunctionType::Radical => "radical function",
        };
        write!(f, "{name}")
    }
}

/// Whether a function was written down directly or produced by integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Defined,
    IndefiniteIntegral,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionKind {
    Constant(f64),
    Polynomial(Polynomial),
    Log { base: f64, body: Box<Function> },
    Radical { index: u32, body: Box<Function> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Combine {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Combine {
    pub(crate) fn verb(self) -> &'static str {
        match self {
            Combine::Add => "add",
            Combine::Subtract => "subtract",
            Combine::Multiply => "multiply",
            Combine::Divide => "divide",
        }
    }

    pub(crate) fn scalars(self, a: f64, b: f64) -> f64 {
        match self {
            Combine::Add => a + b,
            Combine::Subtract => a - b,
            Combine::Multiply => a * b,
            Combine::Divide => a / b,
        }
    }

    /// Polynomial combination; division is only defined by a constant divisor.
    pub(crate) fn polynomials(self, p: &Polynomial, q: &Polynomial) -> Result<Polynomial> {
        match self {
            Combine::Add => Ok(p.clone() + q),
            Combine::Subtract => Ok(p.clone() - q),
            Combine::Multiply => p.try_mul(q),
            Combine::Divide => match q.constant_value() {
                Some(c) => Ok(p.scale(1.0 / c)),
                None => Err(FuncError::not_implemented(
                    "polynomial division by a non-constant divisor",
                )),
            },
        }
    }
}

/// An immutable function of one variable. Domain and range are computed once, at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    name: String,
    var: Variable,
    kind: FunctionKind,
    domain: Vec<Range>,
    range: Vec<Range>,
    origin: Origin,
}

impl Function {
    pub fn constant(name: impl Into<String>, value: f64) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "function")?;
        Ok(Function::folded(name, value))
    }

    pub fn polynomial(name: impl Into<String>, var: Variable, body: Polynomial) -> Result<Self> {
        if let Some(other) = body.variables().into_iter().find(|v| *v != var) {
            return Err(FuncError::invalid(format!(
                "polynomial in `{var}` mentions `{other}`; use a MultiFunction"
            )));
        }
        Function::assemble(name.into(), var, FunctionKind::Polynomial(body), Origin::Defined)
    }

    pub fn log(name: impl Into<String>, base: f64, body: Function) -> Result<Self> {
        if !(base > 0.0 && base != 1.0 && base.is_finite()) {
            return Err(FuncError::invalid(format!(
                "logarithm base must be positive and not 1, got {base}"
            )));
        }
        let var = body.var.clone();
        let kind = FunctionKind::Log {
            base,
            body: Box::new(body),
        };
        Function::assemble(name.into(), var, kind, Origin::Defined)
    }

    pub fn natural_log(name: impl Into<String>, body: Function) -> Result<Self> {
        Function::log(name, E, body)
    }

    pub fn radical(name: impl Into<String>, index: u32, body: Function) -> Result<Self> {
        if index < 2 {
            return Err(FuncError::invalid(format!(
                "root index must be at least 2, got {index}"
            )));
        }
        let var = body.var.clone();
        let kind = FunctionKind::Radical {
            index,
            body: Box::new(body),
        };
        Function::assemble(name.into(), var, kind, Origin::Defined)
    }

    pub fn square_root(name: impl Into<String>, body: Function) -> Result<Self> {
        Function::radical(name, 2, body)
    }

    pub(crate) fn assemble(
        name: String,
        var: Variable,
        kind: FunctionKind,
        origin: Origin,
    ) -> Result<Self> {
        validate_name(&name, "function")?;
        let domain = domain::domain_of(&kind)?;
        let range = domain::range_of(&kind, &var);
        Ok(Function {
            name,
            var,
            kind,
            domain,
            range,
            origin,
        })
    }

    /// Constant result of folding; the name has already been validated.
    pub(crate) fn folded(name: String, value: f64) -> Self {
        Function {
            name,
            var: Variable::all(),
            kind: FunctionKind::Constant(value),
            domain: vec![Range::All],
            range: vec![Range::point(value)],
            origin: Origin::Defined,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable(&self) -> &Variable {
        &self.var
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn domain(&self) -> &[Range] {
        &self.domain
    }

    pub fn range(&self) -> &[Range] {
        &self.range
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn function_type(&self) -> FunctionType {
        match self.kind {
            FunctionKind::Constant(_) => FunctionType::Constant,
            FunctionKind::Polynomial(_) => FunctionType::Polynomial,
            FunctionKind::Log { .. } => FunctionType::Logarithmic,
            FunctionKind::Radical { .. } => FunctionType::Radical,
        }
    }

    pub fn as_polynomial(&self) -> Option<&Polynomial> {
        match &self.kind {
            FunctionKind::Polynomial(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        match &self.kind {
            FunctionKind::Constant(_) => true,
            FunctionKind::Polynomial(p) => p.is_constant(),
            FunctionKind::Log { body, .. } | FunctionKind::Radical { body, .. } => {
                body.is_constant()
            }
        }
    }

    pub fn contains_variable(&self, var: &Variable) -> bool {
        match &self.kind {
            FunctionKind::Constant(_) => false,
            FunctionKind::Polynomial(p) => p.contains_variable(var),
            FunctionKind::Log { body, .. } | FunctionKind::Radical { body, .. } => {
                body.contains_variable(var)
            }
        }
    }

    /// Same variant and the same body after merging, ignoring names.
    pub fn structurally_equal(&self, other: &Function) -> bool {
        match (&self.kind, &other.kind) {
            (FunctionKind::Constant(a), FunctionKind::Constant(b)) => a == b,
            (FunctionKind::Polynomial(p), FunctionKind::Polynomial(q)) => p.merged() == q.merged(),
            (
                FunctionKind::Log { base: b1, body: f },
                FunctionKind::Log { base: b2, body: g },
            ) => b1 == b2 && f.structurally_equal(g),
            (
                FunctionKind::Radical { index: n1, body: f },
                FunctionKind::Radical { index: n2, body: g },
            ) => n1 == n2 && f.structurally_equal(g),
            _ => false,
        }
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        match &self.kind {
            FunctionKind::Constant(c) => Ok(*c),
            FunctionKind::Polynomial(p) => p.evaluate(bindings),
            FunctionKind::Log { base, body } => Ok(log_base(body.evaluate(bindings)?, *base)),
            FunctionKind::Radical { index, body } => Ok(nth_root(body.evaluate(bindings)?, *index)),
        }
    }

    pub fn evaluate_at(&self, x: f64) -> Result<f64> {
        let mut bindings = Bindings::new();
        bindings.insert(self.var.clone(), x);
        self.evaluate(&bindings)
    }

    /// Merges polynomial bodies and folds constant bodies into a constant function.
    pub fn simplify(&self) -> Function {
        match &self.kind {
            FunctionKind::Constant(_) => self.clone(),
            FunctionKind::Polynomial(p) => {
                let merged = p.merged();
                match merged.constant_value() {
                    Some(c) => Function::folded(self.name.clone(), c),
                    None => Function {
                        kind: FunctionKind::Polynomial(merged),
                        ..self.clone()
                    },
                }
            }
            FunctionKind::Log { base, body } => {
                let body = body.simplify();
                match body.kind {
                    FunctionKind::Constant(c) => {
                        Function::folded(self.name.clone(), log_base(c, *base))
                    }
                    _ => Function {
                        kind: FunctionKind::Log {
                            base: *base,
                            body: Box::new(body),
                        },
                        ..self.clone()
                    },
                }
            }
            FunctionKind::Radical { index, body } => {
                let body = body.simplify();
                match body.kind {
                    FunctionKind::Constant(c) => {
                        Function::folded(self.name.clone(), nth_root(c, *index))
                    }
                    _ => Function {
                        kind: FunctionKind::Radical {
                            index: *index,
                            body: Box::new(body),
                        },
                        ..self.clone()
                    },
                }
            }
        }
    }

    pub fn add(&self, other: &Function) -> Result<Function> {
        self.combine(other, Combine::Add)
    }

    pub fn subtract(&self, other: &Function) -> Result<Function> {
        self.combine(other, Combine::Subtract)
    }

    pub fn multiply(&self, other: &Function) -> Result<Function> {
        self.combine(other, Combine::Multiply)
    }

    pub fn divide(&self, other: &Function) -> Result<Function> {
        self.combine(other, Combine::Divide)
    }

    fn combine(&self, other: &Function, op: Combine) -> Result<Function> {
        match (&self.kind, &other.kind) {
            (FunctionKind::Constant(a), FunctionKind::Constant(b)) => {
                Ok(Function::folded(self.name.clone(), op.scalars(*a, *b)))
            }
            (FunctionKind::Polynomial(p), FunctionKind::Polynomial(q)) => {
                if self.var != other.var {
                    return Err(FuncError::not_implemented(format!(
                        "combining functions of `{}` and `{}`; use a MultiFunction",
                        self.var, other.var
                    )));
                }
                let body = op.polynomials(p, q)?;
                Function::assemble(
                    self.name.clone(),
                    self.var.clone(),
                    FunctionKind::Polynomial(body),
                    Origin::Defined,
                )
            }
            _ => Err(FuncError::UnsupportedCombination {
                op: op.verb(),
                left: self.function_type(),
                right: other.function_type(),
            }),
        }
    }

    /// `self^n` by repeated multiplication; `power(0)` is the constant 1.
    pub fn power(&self, n: u32) -> Result<Function> {
        match &self.kind {
            FunctionKind::Constant(c) => Ok(Function::folded(self.name.clone(), c.powf(f64::from(n)))),
            FunctionKind::Polynomial(p) => Function::assemble(
                self.name.clone(),
                self.var.clone(),
                FunctionKind::Polynomial(p.pow(n)?),
                Origin::Defined,
            ),
            _ => Err(FuncError::not_implemented(format!(
                "power of a {}",
                self.function_type()
            ))),
        }
    }

    /// Right-hand side of the definition, e.g. `x² - 5x + 6`.
    pub fn body(&self) -> String {
        let body = match &self.kind {
            FunctionKind::Constant(c) => pretty_number(*c),
            FunctionKind::Polynomial(p) => pretty_polynomial(p),
            FunctionKind::Log { base, body } if *base == E => format!("ln({})", body.body()),
            FunctionKind::Log { base, body } => {
                let base = if base.fract() == 0.0 && *base < f64::from(u32::MAX) {
                    subscript(*base as u32)
                } else {
                    format!("_{}", pretty_number(*base))
                };
                format!("log{base}({})", body.body())
            }
            FunctionKind::Radical { index, body } => {
                let sign = match index {
                    2 => "√".to_string(),
                    3 => "∛".to_string(),
                    4 => "∜".to_string(),
                    n => format!("{}√", superscript(*n)),
                };
                format!("{sign}({})", body.body())
            }
        };
        match self.origin {
            Origin::Defined => body,
            Origin::IndefiniteIntegral => format!("{body} + C"),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.var.is_all() {
            write!(f, "{} = {}", self.name, self.body())
        } else {
            write!(f, "{}({}) = {}", self.name, self.var, self.body())
        }
    }
}

pub(crate) fn log_base(value: f64, base: f64) -> f64 {
    match base {
        b if b == E => value.ln(),
        b if b == 2.0 => value.log2(),
        b if b == 10.0 => value.log10(),
        b => value.log(b),
    }
}

/// Real n-th root; odd roots of negative values stay real.
pub(crate) fn nth_root(value: f64, index: u32) -> f64 {
    match index {
        2 => value.sqrt(),
        3 => value.cbrt(),
        n if n % 2 == 1 && value < 0.0 => -(-value).powf(1.0 / f64::from(n)),
        n => value.powf(1.0 / f64::from(n)),
    }
}
