//! String-based convenience API for quick experimentation.

pub use crate::ui::{
    diff, differentiate, inequality, inequality_summary, inte, integrate, parse, poly, solve,
    solve_eq, solve_equation, solve_inequality, solve_summary,
};
