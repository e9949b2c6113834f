//! Error types for optimization operations.

use std::fmt;

/// Result type for optimization operations.
pub type OptimizeResult<T> = Result<T, OptimizeError>;

/// Errors that can occur during optimization.
///
/// Only `DomainOverflow`, `InvalidInterval` and `InvalidParameter` are meant to
/// abort a computation. The remaining variants describe failures that callers
/// such as [`invert`](crate::optimize::scalar::invert) recover from locally.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// The solver did not converge within the maximum iterations.
    DidNotConverge {
        iterations: usize,
        tolerance: f64,
        context: String,
    },

    /// The function could not be evaluated anywhere in the shrinking upper range.
    DomainOverflow {
        upper_bound: f64,
        attempts: usize,
        context: String,
    },

    /// The function returned a non-finite value at `x`.
    DomainError { x: f64, context: String },

    /// Invalid interval provided (e.g., for bracketing methods).
    InvalidInterval { a: f64, b: f64, context: String },

    /// Invalid parameter value.
    InvalidParameter { parameter: String, message: String },

    /// Numerical computation failed (e.g., division by zero).
    NumericalError { message: String },
}

impl OptimizeError {
    /// True for malformed inputs (bounds, sample counts, tolerances).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidInterval { .. } | Self::InvalidParameter { .. }
        )
    }
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DidNotConverge {
                iterations,
                tolerance,
                context,
            } => {
                write!(
                    f,
                    "{}: did not converge after {} iterations (tolerance: {})",
                    context, iterations, tolerance
                )
            }
            Self::DomainOverflow {
                upper_bound,
                attempts,
                context,
            } => {
                write!(
                    f,
                    "Math overflow in {}: function not evaluable after {} attempts \
                     (last upper bound: {}), try a smaller upper bound",
                    context, attempts, upper_bound
                )
            }
            Self::DomainError { x, context } => {
                write!(f, "Function is not finite at x={} in {}", x, context)
            }
            Self::InvalidInterval { a, b, context } => {
                write!(
                    f,
                    "Invalid interval [{}, {}] in {}: bounds must satisfy a < b",
                    a, b, context
                )
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
        }
    }
}

impl std::error::Error for OptimizeError {}
