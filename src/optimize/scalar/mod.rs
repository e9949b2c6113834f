//! Scalar (1D) algorithms over univariate functions.
//!
//! This module provides monotonicity testing, numeric inversion, gradient descent
//! and the two scalar minimizers the inverter is built on.
//! Functions are plain closures `f: (f64) -> f64`. A function is considered to
//! fail at `x` when it returns a non-finite value.

mod derivative;
mod gradient_descent;
mod inverse;
mod minimization;
mod monotonic;
mod simplex;

pub use derivative::{Precision, derivative};
pub use gradient_descent::{
    GradientDescentOptions, GradientDescentResult, gradient_descent,
    gradient_descent_with_derivative, heuristic_learning_rate,
};
pub use inverse::{
    InverseOptions, InverseResult, InversionMethod, invert, invert_batch, invert_with,
};
pub use minimization::{BoundedOptions, minimize_scalar_bounded};
pub use monotonic::{MonotonicOptions, is_monotonic, is_monotonic_with};
pub use simplex::{SimplexOptions, minimize_scalar_simplex};

/// Result from a scalar minimization method.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeResult {
    /// The minimum point found
    pub x: f64,
    /// Function value at minimum
    pub f_min: f64,
    /// Number of iterations used
    pub iterations: usize,
    /// Number of function evaluations
    pub nfev: usize,
    /// Whether the tolerance was met
    pub converged: bool,
}
