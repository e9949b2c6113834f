//! Fixed-step gradient descent for scalar functions.
//!
//! The iteration is `x <- x - alpha * f'(x)` with a learning rate `alpha` that
//! stays fixed for the whole run. When no rate is given, one is derived from
//! the magnitude of `f(x0) / x0`.

use num_traits::Float;

use super::derivative::{Precision, derivative};
use crate::optimize::error::{OptimizeError, OptimizeResult};
use crate::optimize::utils::{cast, to_f64};

/// Options for [`gradient_descent`].
#[derive(Debug, Clone)]
pub struct GradientDescentOptions {
    /// Fixed learning rate; `None` or `Some(0.0)` derives one from `f(x0)`
    pub learning_rate: Option<f64>,
    /// Convergence threshold on `|alpha * f'(x)|`
    pub error_tolerance: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Scale applied to the derived learning rate
    pub learning_rate_multiplier: f64,
    /// Precision of the numeric derivative
    pub precision: Precision,
}

impl Default for GradientDescentOptions {
    fn default() -> Self {
        Self {
            learning_rate: None,
            error_tolerance: 1e-6,
            max_iterations: 10_000,
            learning_rate_multiplier: 1.0,
            precision: Precision::default(),
        }
    }
}

/// Result from gradient descent.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescentResult<T> {
    /// Final iterate
    pub x: T,
    /// Function value at the final iterate
    pub f_min: T,
    /// Number of iterations used
    pub iterations: usize,
    /// Last step taken, `alpha * f'(x)`
    pub final_step: T,
    /// Learning rate used for every step
    pub learning_rate: T,
    /// Whether `|final_step| <= error_tolerance`
    pub converged: bool,
}

/// Minimize `f` by gradient descent with a numeric derivative.
///
/// # Arguments
/// * `f` - Function to minimize
/// * `x0` - Initial guess
/// * `options` - Solver options
///
/// # Returns
/// The final iterate. Hitting `max_iterations` is not an error: the current
/// iterate is returned with `converged = false` and a warning is logged.
///
/// # Errors
/// * `InvalidParameter` for a non-finite `x0` or malformed options, including
///   a `precision` with more digits than `T` can represent
/// * `NumericalError` if no finite learning rate can be derived
///
/// # Note
/// The derivative is a central difference whose step follows
/// `options.precision`. `T` can be any `Float`, so the whole run can be
/// carried out in a type with more digits than `f64`.
pub fn gradient_descent<T, F>(
    f: F,
    x0: T,
    options: &GradientDescentOptions,
) -> OptimizeResult<GradientDescentResult<T>>
where
    T: Float,
    F: Fn(T) -> T,
{
    options.precision.check::<T>()?;
    let precision = options.precision;
    descend(&f, |x| derivative(&f, x, &precision), x0, options)
}

/// Minimize `f` by gradient descent with a supplied derivative `df`.
///
/// Same as [`gradient_descent`], with `df` used in place of the numeric
/// derivative. `options.precision` is ignored.
pub fn gradient_descent_with_derivative<T, F, DF>(
    f: F,
    df: DF,
    x0: T,
    options: &GradientDescentOptions,
) -> OptimizeResult<GradientDescentResult<T>>
where
    T: Float,
    F: Fn(T) -> T,
    DF: Fn(T) -> T,
{
    let grad = |x: T| {
        let d = df(x);
        if d.is_finite() {
            Ok(d)
        } else {
            Err(OptimizeError::NumericalError {
                message: format!("derivative is not finite at x={}", to_f64(x)),
            })
        }
    };
    descend(&f, grad, x0, options)
}

/// Heuristic starting learning rate.
///
/// `alpha = multiplier * 10^(-2 - floor(log10(|f(x0)| / |x0|)))`, so the
/// first update is about a hundredth of the scale of `f` relative to `x`.
/// When `x0` is zero or the formula does not give a finite positive rate, it
/// is evaluated again at `x0 + 0.1`.
///
/// # Errors
/// * `InvalidParameter` if `multiplier` is not finite and positive
/// * `NumericalError` if neither point gives a usable rate
pub fn heuristic_learning_rate<T, F>(f: &F, x0: T, multiplier: f64) -> OptimizeResult<T>
where
    T: Float,
    F: Fn(T) -> T,
{
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "learning_rate_multiplier".to_string(),
            message: format!("must be finite and positive, got {}", multiplier),
        });
    }
    let multiplier: T = cast(multiplier)?;

    if let Some(alpha) = rate_at(f, x0, multiplier)? {
        return Ok(alpha);
    }

    let shifted = x0 + cast::<T>(0.1)?;
    log::debug!(
        "heuristic_learning_rate: no usable rate at x0={}, retrying at {}",
        to_f64(x0),
        to_f64(shifted)
    );
    rate_at(f, shifted, multiplier)?.ok_or_else(|| OptimizeError::NumericalError {
        message: format!(
            "cannot derive a learning rate at x0={} or x0+0.1",
            to_f64(x0)
        ),
    })
}

fn rate_at<T, F>(f: &F, x: T, multiplier: T) -> OptimizeResult<Option<T>>
where
    T: Float,
    F: Fn(T) -> T,
{
    if x == T::zero() {
        return Ok(None);
    }
    let ratio = f(x).abs() / x.abs();
    let exponent = -cast::<T>(2.0)? - ratio.log10().floor();
    let alpha = multiplier * cast::<T>(10.0)?.powf(exponent);

    if alpha.is_finite() && alpha > T::zero() {
        Ok(Some(alpha))
    } else {
        Ok(None)
    }
}

fn descend<T, F, G>(
    f: &F,
    grad: G,
    x0: T,
    options: &GradientDescentOptions,
) -> OptimizeResult<GradientDescentResult<T>>
where
    T: Float,
    F: Fn(T) -> T,
    G: Fn(T) -> OptimizeResult<T>,
{
    validate(x0, options)?;

    let alpha = match options.learning_rate {
        Some(rate) if rate > 0.0 => cast(rate)?,
        _ => heuristic_learning_rate(f, x0, options.learning_rate_multiplier)?,
    };
    let tol: T = cast(options.error_tolerance)?;

    let mut x = x0;
    let mut step = T::zero();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < options.max_iterations {
        let slope = match grad(x) {
            Ok(slope) => slope,
            Err(err) => {
                log::warn!(
                    "gradient_descent: stopping at x={} after {} iterations: {}",
                    to_f64(x),
                    iterations,
                    err
                );
                break;
            }
        };

        let next_step = alpha * slope;
        let next_x = x - next_step;
        if !next_x.is_finite() {
            log::warn!(
                "gradient_descent: diverged after {} iterations (learning rate {:e}), \
                 returning last finite iterate x={}; try a smaller learning rate",
                iterations,
                to_f64(alpha),
                to_f64(x)
            );
            break;
        }

        step = next_step;
        x = next_x;
        iterations += 1;

        if step.abs() <= tol {
            converged = true;
            break;
        }
    }

    if !converged && iterations >= options.max_iterations {
        log::warn!(
            "gradient_descent: maximum iterations ({}) reached with step {:e} above tolerance {:e}; \
             adjust the learning rate or the initial guess",
            options.max_iterations,
            to_f64(step),
            options.error_tolerance
        );
    }

    log::debug!(
        "gradient_descent: {} iterations, final step {:e}, x={}",
        iterations,
        to_f64(step),
        to_f64(x)
    );

    Ok(GradientDescentResult {
        x,
        f_min: f(x),
        iterations,
        final_step: step,
        learning_rate: alpha,
        converged,
    })
}

fn validate<T: Float>(x0: T, options: &GradientDescentOptions) -> OptimizeResult<()> {
    if !x0.is_finite() {
        return Err(OptimizeError::InvalidParameter {
            parameter: "x0".to_string(),
            message: "initial guess must be finite".to_string(),
        });
    }
    if options.error_tolerance.is_nan() || options.error_tolerance < 0.0 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "error_tolerance".to_string(),
            message: format!("must be non-negative, got {}", options.error_tolerance),
        });
    }
    if let Some(rate) = options.learning_rate {
        if !rate.is_finite() || rate < 0.0 {
            return Err(OptimizeError::InvalidParameter {
                parameter: "learning_rate".to_string(),
                message: format!("must be finite and non-negative, got {}", rate),
            });
        }
    }
    if !options.learning_rate_multiplier.is_finite() || options.learning_rate_multiplier <= 0.0 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "learning_rate_multiplier".to_string(),
            message: format!(
                "must be finite and positive, got {}",
                options.learning_rate_multiplier
            ),
        });
    }
    Ok(())
}
