//! Numeric policy shared by the solvers.

/// Near-zero threshold used for discriminants and repeated-root detection.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Agreement required between both sides when a root is re-validated.
pub const DEFAULT_VERIFY_TOLERANCE: f64 = 1e-6;

/// What to do with roots produced by a reduction step (squaring, exponentiating).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootCheck {
    /// Keep every root of the reduced polynomial equation, extraneous ones included.
    #[default]
    Unfiltered,
    /// Evaluate both original sides at every root and keep only those that agree.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub verify_tolerance: f64,
    pub root_check: RootCheck,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: DEFAULT_TOLERANCE,
            verify_tolerance: DEFAULT_VERIFY_TOLERANCE,
            root_check: RootCheck::Unfiltered,
        }
    }
}

impl SolverConfig {
    pub fn strict() -> Self {
        SolverConfig::default().with_root_check(RootCheck::Strict)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn with_verify_tolerance(mut self, tolerance: f64) -> Self {
        self.verify_tolerance = tolerance.abs();
        self
    }

    pub fn with_root_check(mut self, root_check: RootCheck) -> Self {
        self.root_check = root_check;
        self
    }

    pub(crate) fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.tolerance
    }
}
