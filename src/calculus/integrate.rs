use crate::error::{FuncError, Result};
use crate::function::{Function, FunctionKind, Origin};
use crate::polynomial::Polynomial;
use crate::variable::Variable;

/// Indefinite integral of `f` in `var`, flagged as [`Origin::IndefiniteIntegral`].
pub fn integrate(f: &Function, var: &Variable) -> Result<Function> {
    if var.is_all() {
        return Err(FuncError::invalid(format!(
            "integrating `{}` needs a variable of integration",
            f.name()
        )));
    }
    let antiderivative = match f.kind() {
        FunctionKind::Constant(c) => Polynomial::monomial(*c, var, 1),
        FunctionKind::Polynomial(p) if p.variables().iter().all(|v| v == var) => {
            p.antiderivative(var)?
        }
        FunctionKind::Polynomial(_) => {
            return Err(FuncError::not_implemented(format!(
                "integrating `{}` in `{var}`, which is not its variable",
                f.name()
            )))
        }
        FunctionKind::Log { .. } | FunctionKind::Radical { .. } => {
            return Err(FuncError::not_implemented(format!(
                "integral of a {}",
                f.function_type()
            )))
        }
    };
    Function::assemble(
        f.name().to_string(),
        var.clone(),
        FunctionKind::Polynomial(antiderivative),
        Origin::IndefiniteIntegral,
    )
}

impl Function {
    /// Indefinite integral in the function's own variable. A constant has none, so it is
    /// integrated in `x`: `3` becomes `3x + C`.
    pub fn integrate(&self) -> Result<Function> {
        if self.variable().is_all() {
            return integrate(self, &Variable::default_free());
        }
        integrate(self, self.variable())
    }

    pub fn integrate_in(&self, var: &Variable) -> Result<Function> {
        integrate(self, var)
    }

    /// `F(b) - F(a)` for the antiderivative `F`.
    pub fn definite_integral(&self, a: f64, b: f64) -> Result<f64> {
        match self.kind() {
            FunctionKind::Constant(c) => Ok(c * (b - a)),
            _ => {
                let antiderivative = self.integrate()?;
                Ok(antiderivative.evaluate_at(b)? - antiderivative.evaluate_at(a)?)
            }
        }
    }
}
