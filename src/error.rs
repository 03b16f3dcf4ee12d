use thiserror::Error;

use crate::function::FunctionType;

pub type Result<T> = std::result::Result<T, FuncError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuncError {
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
    #[error("unbound variable: {0}")]
    UnboundVariable(String),
    #[error("unsupported combination: cannot {op} {left} and {right}")]
    UnsupportedCombination {
        op: &'static str,
        left: FunctionType,
        right: FunctionType,
    },
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl FuncError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FuncError::InvalidConstruction(msg.into())
    }

    pub(crate) fn not_implemented(msg: impl Into<String>) -> Self {
        FuncError::NotImplemented(msg.into())
    }
}
