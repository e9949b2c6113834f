//! Numeric inversion of scalar functions.
//!
//! Given `y` and `f`, find `x` with `f(x) = y` by minimizing the squared
//! residual `(y - f(x))^2`. The unconstrained simplex search runs first; when
//! it fails on a domain error or does not converge, the bounded Brent search
//! over `[lower_bound, upper_bound]` takes over.

use rayon::prelude::*;

use super::minimization::{BoundedOptions, minimize_scalar_bounded};
use super::monotonic::{MonotonicOptions, is_monotonic_with};
use super::simplex::{SimplexOptions, minimize_scalar_simplex};
use crate::optimize::error::{OptimizeError, OptimizeResult};

/// Options for [`invert`].
#[derive(Debug, Clone)]
pub struct InverseOptions {
    /// Initial guess for the unconstrained search
    pub x0: f64,
    /// Lower end of the bounded fallback bracket
    pub lower_bound: f64,
    /// Upper end of the bounded fallback bracket
    pub upper_bound: f64,
    /// Run the monotonicity and accuracy diagnostics
    pub verify: bool,
    /// Acceptable `|f(x) - y|`
    pub threshold: f64,
    /// Unconstrained search settings
    pub simplex: SimplexOptions,
    /// Bounded fallback settings
    pub bounded: BoundedOptions,
    /// Sampled range for the monotonicity diagnostic
    pub monotonic: MonotonicOptions,
}

impl Default for InverseOptions {
    fn default() -> Self {
        Self {
            x0: 1.0,
            lower_bound: 0.0,
            upper_bound: 1e5,
            verify: true,
            threshold: 1e-6,
            simplex: SimplexOptions {
                max_iter: 500,
                x_tol: 1e-12,
                x_rtol: 1e-12,
                f_tol: 1e-16,
            },
            bounded: BoundedOptions::default(),
            monotonic: MonotonicOptions::default(),
        }
    }
}

/// Search that produced an [`InverseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionMethod {
    /// Unconstrained Nelder-Mead from `x0`
    Simplex,
    /// Bounded Brent search over the fallback bracket
    Bounded,
}

/// Result from a numeric inversion.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseResult {
    /// Input found for the target value
    pub x: f64,
    /// `f(x)`
    pub function_value: f64,
    /// `|f(x) - y|`
    pub residual: f64,
    /// Search that produced `x`
    pub method: InversionMethod,
    /// Outcome of the monotonicity diagnostic, `None` when it was not performed
    pub monotonic: Option<bool>,
    /// Whether `residual <= threshold`
    pub within_threshold: bool,
}

/// Find `x` such that `f(x) ≈ y`.
///
/// # Arguments
/// * `y` - Target value
/// * `f` - Function to invert
/// * `options` - Search and diagnostic options
///
/// # Returns
/// Best estimate of the inverse. Only local convergence from `x0` (or within
/// the fallback bracket) is attempted, so for a non-monotonic `f` any of the
/// valid inverses may be returned.
///
/// # Errors
/// * `InvalidParameter` if `y` is not finite or `threshold` is negative
/// * `InvalidInterval` if the fallback bracket is invalid and the fallback is needed
///
/// # Note
/// Diagnostics never fail the call. A non-monotonic function, a failed
/// monotonicity check and a residual above `threshold` are reported with
/// `log::warn!` and in the returned fields.
pub fn invert<F>(y: f64, f: F, options: &InverseOptions) -> OptimizeResult<InverseResult>
where
    F: Fn(f64) -> f64,
{
    invert_with(y, |x, _: &()| f(x), &(), options)
}

/// Find `x` such that `f(x, args) ≈ y`.
///
/// Same as [`invert`], with extra arguments forwarded to `f` on every call.
pub fn invert_with<F, A>(
    y: f64,
    f: F,
    args: &A,
    options: &InverseOptions,
) -> OptimizeResult<InverseResult>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    validate(y, options)?;

    let mut result = solve(y, &f, args, options)?;
    if options.verify {
        result.monotonic = check_monotonic(&f, args, &options.monotonic);
        warn_on_accuracy(y, &result, options.threshold);
    }
    Ok(result)
}

/// Invert `f` at each of `targets` in parallel.
///
/// The monotonicity diagnostic runs once for the whole batch. Each target
/// gets its own result, in the order of `targets`.
pub fn invert_batch<F>(
    targets: &[f64],
    f: F,
    options: &InverseOptions,
) -> Vec<OptimizeResult<InverseResult>>
where
    F: Fn(f64) -> f64 + Sync,
{
    let g = |x: f64, _: &()| f(x);
    let monotonic = if options.verify {
        check_monotonic(&g, &(), &options.monotonic)
    } else {
        None
    };

    targets
        .par_iter()
        .map(|&y| -> OptimizeResult<InverseResult> {
            validate(y, options)?;
            let mut result = solve(y, &g, &(), options)?;
            if options.verify {
                result.monotonic = monotonic;
                warn_on_accuracy(y, &result, options.threshold);
            }
            Ok(result)
        })
        .collect()
}

fn validate(y: f64, options: &InverseOptions) -> OptimizeResult<()> {
    if !y.is_finite() {
        return Err(OptimizeError::InvalidParameter {
            parameter: "y".to_string(),
            message: format!("target value must be finite, got {}", y),
        });
    }
    if options.threshold.is_nan() || options.threshold < 0.0 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "threshold".to_string(),
            message: format!("must be non-negative, got {}", options.threshold),
        });
    }
    Ok(())
}

/// Minimize the squared residual, falling back to the bounded search.
fn solve<F, A>(y: f64, f: &F, args: &A, options: &InverseOptions) -> OptimizeResult<InverseResult>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let objective = |x: f64| {
        let r = y - f(x, args);
        r * r
    };

    let (x, method) = match minimize_scalar_simplex(objective, options.x0, &options.simplex) {
        Ok(found) => (found.x, InversionMethod::Simplex),
        Err(err) if err.is_invalid_argument() => return Err(err),
        Err(err) => {
            log::warn!(
                "invert: unconstrained search from x0={} failed ({}), \
                 falling back to bounded search on [{}, {}]",
                options.x0,
                err,
                options.lower_bound,
                options.upper_bound
            );
            let found = minimize_scalar_bounded(
                objective,
                (options.lower_bound, options.upper_bound),
                &options.bounded,
            )?;
            (found.x, InversionMethod::Bounded)
        }
    };

    let function_value = f(x, args);
    let residual = (function_value - y).abs();

    Ok(InverseResult {
        x,
        function_value,
        residual,
        method,
        monotonic: None,
        within_threshold: residual <= options.threshold,
    })
}

/// Monotonicity diagnostic: any failure is downgraded to a warning.
fn check_monotonic<F, A>(f: &F, args: &A, options: &MonotonicOptions) -> Option<bool>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    match is_monotonic_with(f, args, options) {
        Ok(true) => Some(true),
        Ok(false) => {
            log::warn!(
                "invert: function does not appear to be monotonic, \
                 choose the initial guess x0 carefully"
            );
            Some(false)
        }
        Err(err) => {
            log::warn!(
                "invert: monotonicity check not performed ({}), please verify results",
                err
            );
            None
        }
    }
}

fn warn_on_accuracy(y: f64, result: &InverseResult, threshold: f64) {
    if !result.within_threshold {
        log::warn!(
            "invert: |f(x) - y| = {:e} at x={:e} for y={:e} is above threshold {:e}, \
             please verify inputs and results",
            result.residual,
            result.x,
            y,
            threshold
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_invert_sqrt() {
        log_init_test();
        let f = |x: f64| x.sqrt();
        let x_true = 1_829_347.0;
        let result = invert(f(x_true), f, &InverseOptions::default()).expect("invert failed");

        assert_eq!(result.method, InversionMethod::Simplex);
        assert!(result.within_threshold);
        assert!(result.residual < 1e-6);
        assert!((result.x - x_true).abs() / x_true < 1e-6);
        assert_eq!(result.monotonic, Some(true));
    }

    #[test]
    fn test_invert_round_trip_cube() {
        log_init_test();
        let f = |x: f64| x * x * x + 2.0 * x;
        let opts = InverseOptions {
            monotonic: MonotonicOptions::with_bounds(-100.0, 100.0),
            ..Default::default()
        };
        for &y in &[-50.0, -3.0, 0.5, 12.0, 900.0] {
            let result = invert(y, f, &opts).expect("invert failed");
            assert!(result.within_threshold, "y={} residual={}", y, result.residual);
            assert!((f(result.x) - y).abs() <= opts.threshold);
        }
    }

    #[test]
    fn test_invert_decreasing() {
        log_init_test();
        let f = |x: f64| 1.0 / (1.0 + x);
        let result = invert(0.2, f, &InverseOptions::default()).expect("invert failed");
        assert!((result.x - 4.0).abs() < 1e-2);
        assert!(result.within_threshold);
    }

    #[test]
    fn test_invert_with_args() {
        struct Affine {
            slope: f64,
            offset: f64,
        }
        let f = |x: f64, p: &Affine| p.slope * x + p.offset;
        let params = Affine {
            slope: 3.0,
            offset: -2.0,
        };
        let result =
            invert_with(10.0, f, &params, &InverseOptions::default()).expect("invert failed");
        assert!((result.x - 4.0).abs() < 1e-3);
        assert!(result.within_threshold);
    }

    #[test]
    fn test_invert_falls_back_on_domain_error() {
        log_init_test();
        // The simplex walks into x < 0 where ln is NaN; the bracket keeps the search valid
        let f = |x: f64| x.ln();
        let opts = InverseOptions {
            verify: false,
            ..Default::default()
        };
        let result = invert(-5.0, f, &opts).expect("invert failed");
        assert_eq!(result.method, InversionMethod::Bounded);
        assert!((result.x - (-5.0_f64).exp()).abs() < 1e-4);
        assert_eq!(result.monotonic, None);
    }

    #[test]
    fn test_invert_falls_back_on_non_convergence() {
        log_init_test();
        let opts = InverseOptions {
            simplex: SimplexOptions {
                max_iter: 1,
                ..InverseOptions::default().simplex
            },
            upper_bound: 100.0,
            verify: false,
            ..Default::default()
        };
        let result = invert(49.0, |x| x * x, &opts).expect("invert failed");
        assert_eq!(result.method, InversionMethod::Bounded);
        assert!((result.x - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_invert_non_monotonic_still_returns() {
        log_init_test();
        let f = |x: f64| x * x;
        let opts = InverseOptions {
            x0: 3.0,
            monotonic: MonotonicOptions::with_bounds(-10.0, 10.0),
            ..Default::default()
        };
        let result = invert(4.0, f, &opts).expect("invert failed");
        assert_eq!(result.monotonic, Some(false));
        assert!((result.x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_invert_monotonic_check_failure_is_not_fatal() {
        log_init_test();
        // NaN everywhere above 5 makes the diagnostic overflow
        let f = |x: f64| if x > 5.0 { f64::NAN } else { 2.0 * x };
        let result = invert(6.0, f, &InverseOptions::default()).expect("invert failed");
        assert_eq!(result.monotonic, None);
        assert!((result.x - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_invert_unreachable_target_flags_accuracy() {
        log_init_test();
        // x^2 + 1 never reaches 0: best effort is returned, not an error
        let result = invert(0.0, |x| x * x + 1.0, &InverseOptions::default())
            .expect("invert failed");
        assert!(!result.within_threshold);
        assert!((result.residual - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_invert_invalid_arguments() {
        let result = invert(f64::NAN, |x| x, &InverseOptions::default());
        assert!(matches!(result, Err(OptimizeError::InvalidParameter { .. })));

        let opts = InverseOptions {
            threshold: -1.0,
            ..Default::default()
        };
        let result = invert(1.0, |x| x, &opts);
        assert!(matches!(result, Err(OptimizeError::InvalidParameter { .. })));

        // A malformed initial guess propagates instead of triggering the fallback
        let opts = InverseOptions {
            x0: f64::NAN,
            verify: false,
            ..Default::default()
        };
        let result = invert(3.0, |x: f64| x.sqrt(), &opts);
        assert!(matches!(result, Err(OptimizeError::InvalidParameter { .. })));
    }

    #[test]
    fn test_invert_invalid_fallback_bracket() {
        let opts = InverseOptions {
            lower_bound: 10.0,
            upper_bound: 1.0,
            verify: false,
            ..Default::default()
        };
        let result = invert(-5.0, |x: f64| x.ln(), &opts);
        assert!(matches!(result, Err(OptimizeError::InvalidInterval { .. })));
    }

    #[test]
    fn test_invert_deterministic() {
        let f = |x: f64| x.powf(1.5);
        let opts = InverseOptions::default();
        let first = invert(27.0, f, &opts).unwrap();
        let second = invert(27.0, f, &opts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invert_batch_matches_sequential() {
        log_init_test();
        let f = |x: f64| x.sqrt();
        let targets = [1.0, 2.0, 10.0, 100.0, 1352.0];
        let opts = InverseOptions::default();

        let batch = invert_batch(&targets, f, &opts);
        assert_eq!(batch.len(), targets.len());
        for (y, res) in targets.iter().zip(batch) {
            let res = res.expect("invert_batch failed");
            let single = invert(*y, f, &opts).expect("invert failed");
            assert_eq!(res, single);
        }
    }

    #[test]
    fn test_invert_batch_reports_errors_per_target() {
        let targets = [4.0, f64::INFINITY];
        let batch = invert_batch(&targets, |x: f64| x * x, &InverseOptions::default());
        assert!(batch[0].is_ok());
        assert!(matches!(
            batch[1],
            Err(OptimizeError::InvalidParameter { .. })
        ));
    }
}
