//! Nelder-Mead simplex minimization restricted to one dimension.

use super::MinimizeResult;
use crate::optimize::error::{OptimizeError, OptimizeResult};
use crate::optimize::utils::ZERO_THRESHOLD;

/// Options for [`minimize_scalar_simplex`].
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Absolute tolerance on the spread of the simplex vertices
    pub x_tol: f64,
    /// Relative tolerance on the spread of the simplex vertices
    pub x_rtol: f64,
    /// Absolute tolerance on the spread of the function values
    pub f_tol: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 200,
            x_tol: 1e-4,
            x_rtol: 0.0,
            f_tol: 1e-4,
        }
    }
}

/// Nelder-Mead simplex algorithm for derivative-free scalar minimization.
///
/// # Arguments
/// * `f` - Function to minimize
/// * `x0` - Initial guess
/// * `options` - Solver options
///
/// # Returns
/// Local minimum of `f` near `x0`
///
/// # Errors
/// * `InvalidParameter` if `x0` is not finite
/// * `DomainError` if `f` is not finite at a trial point
/// * `DidNotConverge` if iterations exceed max_iter
///
/// # Note
/// The search is unconstrained. It moves fast when well seeded but can walk
/// out of the domain of `f`, which is reported as `DomainError` rather than
/// silently compared as NaN.
pub fn minimize_scalar_simplex<F>(
    f: F,
    x0: f64,
    options: &SimplexOptions,
) -> OptimizeResult<MinimizeResult>
where
    F: Fn(f64) -> f64,
{
    if !x0.is_finite() {
        return Err(OptimizeError::InvalidParameter {
            parameter: "x0".to_string(),
            message: format!("initial guess must be finite, got {}", x0),
        });
    }

    // Simplex parameters
    let alpha = 1.0; // Reflection
    let gamma = 2.0; // Expansion
    let rho = 0.5; // Contraction
    let sigma = 0.5; // Shrink

    let eval = |x: f64| -> OptimizeResult<f64> {
        let fx = f(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(OptimizeError::DomainError {
                x,
                context: "minimize_scalar_simplex".to_string(),
            })
        }
    };

    let delta = if x0.abs() < ZERO_THRESHOLD {
        0.00025
    } else {
        0.05 * x0.abs()
    };

    // Two vertices, re-ordered at the top of every iteration
    let mut best = x0;
    let mut worst = x0 + delta;
    let mut f_best = eval(best)?;
    let mut f_worst = eval(worst)?;
    let mut nfev = 2;

    for iter in 0..options.max_iter {
        if f_worst < f_best {
            std::mem::swap(&mut best, &mut worst);
            std::mem::swap(&mut f_best, &mut f_worst);
        }

        let x_tol_here = options.x_tol + options.x_rtol * best.abs();
        if (worst - best).abs() <= x_tol_here && (f_worst - f_best).abs() <= options.f_tol {
            return Ok(MinimizeResult {
                x: best,
                f_min: f_best,
                iterations: iter + 1,
                nfev,
                converged: true,
            });
        }

        // With a single free coordinate the centroid is the best vertex
        let centroid = best;

        let x_r = centroid + alpha * (centroid - worst);
        let f_r = eval(x_r)?;
        nfev += 1;

        if f_r < f_best {
            let x_e = centroid + gamma * (x_r - centroid);
            let f_e = eval(x_e)?;
            nfev += 1;

            if f_e < f_r {
                worst = x_e;
                f_worst = f_e;
            } else {
                worst = x_r;
                f_worst = f_r;
            }
            continue;
        }

        let (x_c, f_c) = if f_r < f_worst {
            // Outside contraction
            let x_c = centroid + rho * (x_r - centroid);
            (x_c, eval(x_c)?)
        } else {
            // Inside contraction
            let x_c = centroid - rho * (centroid - worst);
            (x_c, eval(x_c)?)
        };
        nfev += 1;

        if f_c < f_worst.min(f_r) {
            worst = x_c;
            f_worst = f_c;
        } else {
            // Shrink towards the best vertex
            worst = best + sigma * (worst - best);
            f_worst = eval(worst)?;
            nfev += 1;
        }
    }

    log::debug!(
        "minimize_scalar_simplex: stopped after {} iterations at x={:e} ({} evaluations)",
        options.max_iter,
        best,
        nfev
    );

    Err(OptimizeError::DidNotConverge {
        iterations: options.max_iter,
        tolerance: options.x_tol,
        context: "minimize_scalar_simplex".to_string(),
    })
}
