//! Scalar optimization algorithms for univar.
//!
//! This module provides monotonicity testing, numeric inversion, gradient
//! descent and the scalar minimizers they are built on.
//!
//! # Modules
//!
//! - [`scalar`] - Univariate (1D) monotonicity, inversion and minimization
//! - [`error`] - Error type shared by every routine
//!
//! # Quick Start
//!
//! ## Monotonicity
//!
//! ```
//! use univar::optimize::scalar::{is_monotonic, MonotonicOptions};
//!
//! let square = |x: f64| x * x;
//! assert!(is_monotonic(square, &MonotonicOptions::with_bounds(0.0, 500.0))?);
//! assert!(!is_monotonic(square, &MonotonicOptions::with_bounds(-500.0, 500.0))?);
//! # Ok::<(), univar::OptimizeError>(())
//! ```
//!
//! ## Inversion
//!
//! ```
//! use univar::optimize::scalar::{invert, InverseOptions};
//!
//! // Find x with sqrt(x) = 3
//! let result = invert(3.0, |x: f64| x.sqrt(), &InverseOptions::default())?;
//! assert!((result.x - 9.0).abs() < 1e-6);
//! # Ok::<(), univar::OptimizeError>(())
//! ```
//!
//! ## Gradient Descent
//!
//! ```
//! use univar::optimize::scalar::{gradient_descent, GradientDescentOptions};
//!
//! // Critical point of x^4 - 3x^3 + 2 at x = 9/4
//! let f = |x: f64| x.powi(4) - 3.0 * x.powi(3) + 2.0;
//! let result = gradient_descent(f, 4.0, &GradientDescentOptions::default())?;
//! assert!((result.x - 2.25).abs() < 1e-3);
//! # Ok::<(), univar::OptimizeError>(())
//! ```

pub mod error;
pub mod scalar;
pub(crate) mod utils;

pub use error::{OptimizeError, OptimizeResult};
pub use scalar::{
    BoundedOptions, GradientDescentOptions, GradientDescentResult, InverseOptions, InverseResult,
    InversionMethod, MinimizeResult, MonotonicOptions, Precision, SimplexOptions, derivative,
    gradient_descent, gradient_descent_with_derivative, heuristic_learning_rate, invert,
    invert_batch, invert_with, is_monotonic, is_monotonic_with, minimize_scalar_bounded,
    minimize_scalar_simplex,
};
