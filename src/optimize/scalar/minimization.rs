//! Bounded scalar minimization.

use super::MinimizeResult;
use crate::optimize::error::{OptimizeError, OptimizeResult};
use crate::optimize::utils::{GOLDEN_MEAN, SQRT_EPS};

/// Options for [`minimize_scalar_bounded`].
#[derive(Debug, Clone)]
pub struct BoundedOptions {
    /// Absolute tolerance on the abscissa
    pub x_atol: f64,
    /// Maximum number of function evaluations
    pub max_fev: usize,
}

impl Default for BoundedOptions {
    fn default() -> Self {
        Self {
            x_atol: 1e-5,
            max_fev: 500,
        }
    }
}

/// Bounded scalar minimization using Brent's method.
///
/// # Arguments
/// * `f` - Function to minimize
/// * `bounds` - (xmin, xmax) bracket for minimization
/// * `options` - Solver options
///
/// # Returns
/// Local minimum of `f` in the bounded interval
///
/// # Errors
/// * `InvalidInterval` if xmin >= xmax or either bound is not finite
///
/// # Note
/// Combines golden section steps with parabolic interpolation. Every trial
/// point lies strictly inside the bracket, and non-finite function values are
/// treated as `+inf`, so a valid bracket never produces an error. Running out
/// of evaluations is reported through `converged = false` and a warning.
pub fn minimize_scalar_bounded<F>(
    f: F,
    bounds: (f64, f64),
    options: &BoundedOptions,
) -> OptimizeResult<MinimizeResult>
where
    F: Fn(f64) -> f64,
{
    let (xmin, xmax) = bounds;
    if !xmin.is_finite() || !xmax.is_finite() || xmin >= xmax {
        return Err(OptimizeError::InvalidInterval {
            a: xmin,
            b: xmax,
            context: "minimize_scalar_bounded".to_string(),
        });
    }
    if options.x_atol.is_nan() || options.x_atol <= 0.0 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "x_atol".to_string(),
            message: format!("must be positive, got {}", options.x_atol),
        });
    }

    let eval = |x: f64| {
        let fx = f(x);
        if fx.is_nan() { f64::INFINITY } else { fx }
    };

    let mut a = xmin;
    let mut b = xmax;

    // x: best point, w: second best, v: previous value of w
    let mut x = a + GOLDEN_MEAN * (b - a);
    let mut w = x;
    let mut v = x;
    let mut fx = eval(x);
    let mut fw = fx;
    let mut fv = fx;
    let mut nfev = 1;
    let mut iterations = 0;

    let mut d = 0.0_f64;
    let mut e = 0.0_f64;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = SQRT_EPS * x.abs() + options.x_atol / 3.0;
    let mut tol2 = 2.0 * tol1;
    let mut converged = true;

    while (x - xm).abs() > tol2 - 0.5 * (b - a) {
        if nfev >= options.max_fev {
            converged = false;
            break;
        }
        iterations += 1;

        let mut golden = true;
        if e.abs() > tol1 {
            // Parabolic fit through x, w, v
            let mut r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = d;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                // Do not evaluate too close to the bracket ends
                if (u - a) < tol2 || (b - u) < tol2 {
                    d = if xm >= x { tol1 } else { -tol1 };
                }
                golden = false;
            }
        }

        if golden {
            e = if x >= xm { a - x } else { b - x };
            d = GOLDEN_MEAN * e;
        }

        let u = if d >= 0.0 {
            x + d.abs().max(tol1)
        } else {
            x - d.abs().max(tol1)
        };
        let fu = eval(u);
        nfev += 1;

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = SQRT_EPS * x.abs() + options.x_atol / 3.0;
        tol2 = 2.0 * tol1;
    }

    if !converged {
        log::warn!(
            "minimize_scalar_bounded: maximum number of function evaluations ({}) exceeded, \
             returning best point x={:e}",
            options.max_fev,
            x
        );
    }

    Ok(MinimizeResult {
        x,
        f_min: fx,
        iterations,
        nfev,
        converged,
    })
}
