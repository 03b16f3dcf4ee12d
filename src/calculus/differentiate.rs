use crate::error::{FuncError, Result};
use crate::function::{Function, FunctionKind, MultiBody, MultiFunction, Origin};
use crate::variable::Variable;

/// Partial derivative of `f` in `var`, named `f'`.
pub fn differentiate(f: &Function, var: &Variable) -> Result<Function> {
    let name = format!("{}'", f.name());
    match f.kind() {
        FunctionKind::Constant(_) => Ok(Function::folded(name, 0.0)),
        FunctionKind::Polynomial(p) => Function::assemble(
            name,
            f.variable().clone(),
            FunctionKind::Polynomial(p.derivative(var)),
            Origin::Defined,
        ),
        FunctionKind::Log { .. } | FunctionKind::Radical { .. } => Err(
            FuncError::not_implemented(format!("derivative of a {}", f.function_type())),
        ),
    }
}

pub fn differentiate_multi(f: &MultiFunction, var: &Variable) -> Result<MultiFunction> {
    let body = match f.body() {
        MultiBody::Constant(_) => MultiBody::Constant(0.0),
        MultiBody::Polynomial(p) => MultiBody::Polynomial(p.derivative(var)),
    };
    MultiFunction::new(format!("{}'", f.name()), f.variables().to_vec(), body)
}

impl Function {
    /// Derivative in the function's own variable.
    pub fn derivative(&self) -> Result<Function> {
        differentiate(self, self.variable())
    }

    pub fn partial_derivative(&self, var: &Variable) -> Result<Function> {
        differentiate(self, var)
    }
}
