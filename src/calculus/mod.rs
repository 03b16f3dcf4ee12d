//! Calculus routines (differentiation and integration).

pub mod differentiate;
pub mod integrate;

pub use differentiate::{differentiate, differentiate_multi};
pub use integrate::integrate;
