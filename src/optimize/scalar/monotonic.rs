//! Sampling-based monotonicity test.

use crate::optimize::error::{OptimizeError, OptimizeResult};
use crate::optimize::utils::linspace;

/// Options for [`is_monotonic`].
#[derive(Debug, Clone)]
pub struct MonotonicOptions {
    /// Lower end of the sampled domain
    pub lower_bound: f64,
    /// Upper end of the sampled domain
    pub upper_bound: f64,
    /// Number of evenly spaced samples, both ends included (at least 2)
    pub samples: usize,
    /// Attempts at evaluating `f` at the upper bound, dividing it by 10 after
    /// each failure (at least 1). Only a positive bound is shrunk.
    pub max_shrinks: usize,
}

impl Default for MonotonicOptions {
    fn default() -> Self {
        Self {
            lower_bound: 0.0,
            upper_bound: 1e10,
            samples: 2500,
            max_shrinks: 10,
        }
    }
}

impl MonotonicOptions {
    /// Options sampling `[lower_bound, upper_bound]` with the default sample count.
    pub fn with_bounds(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            ..Default::default()
        }
    }
}

/// Check whether `f` is monotonic over a sampled domain.
///
/// # Arguments
/// * `f` - Function to test
/// * `options` - Domain and sampling options
///
/// # Returns
/// `true` if all consecutive sample differences are `<= 0` or all are `>= 0`.
/// A constant function is monotonic.
///
/// # Errors
/// * `InvalidInterval` if lower_bound > upper_bound or a bound is not finite
/// * `InvalidParameter` if fewer than 2 samples or no shrink attempts are requested
/// * `DomainOverflow` if `f` cannot be evaluated at the (shrinking) upper bound
/// * `DomainError` if `f` is not finite at one of the sample points
///
/// # Note
/// Before sampling, `f(upper_bound)` is probed. While it is not finite, the
/// upper bound is divided by 10, up to `max_shrinks` attempts. A bound that is
/// zero or negative is never shrunk, since dividing it would move it upwards.
pub fn is_monotonic<F>(f: F, options: &MonotonicOptions) -> OptimizeResult<bool>
where
    F: Fn(f64) -> f64,
{
    is_monotonic_with(|x, _: &()| f(x), &(), options)
}

/// Check whether `f(·, args)` is monotonic over a sampled domain.
///
/// Same as [`is_monotonic`], with extra arguments forwarded to `f` on every call.
pub fn is_monotonic_with<F, A>(f: F, args: &A, options: &MonotonicOptions) -> OptimizeResult<bool>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let lower = options.lower_bound;
    if !lower.is_finite() || !options.upper_bound.is_finite() || lower > options.upper_bound {
        return Err(OptimizeError::InvalidInterval {
            a: lower,
            b: options.upper_bound,
            context: "is_monotonic".to_string(),
        });
    }
    if options.samples < 2 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "samples".to_string(),
            message: format!("at least 2 samples are required, got {}", options.samples),
        });
    }
    if options.max_shrinks == 0 {
        return Err(OptimizeError::InvalidParameter {
            parameter: "max_shrinks".to_string(),
            message: "at least one evaluation of the upper bound is required".to_string(),
        });
    }

    let upper = probe_upper_bound(&f, args, lower, options)?;

    let mut values = Vec::with_capacity(options.samples);
    for x in linspace(lower, upper, options.samples) {
        let fx = f(x, args);
        if !fx.is_finite() {
            return Err(OptimizeError::DomainError {
                x,
                context: "is_monotonic".to_string(),
            });
        }
        values.push(fx);
    }

    let mut non_increasing = true;
    let mut non_decreasing = true;
    for pair in values.windows(2) {
        let diff = pair[1] - pair[0];
        non_increasing &= diff <= 0.0;
        non_decreasing &= diff >= 0.0;
        if !non_increasing && !non_decreasing {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Shrink the upper bound until `f` evaluates to a finite value there.
fn probe_upper_bound<F, A>(
    f: &F,
    args: &A,
    lower: f64,
    options: &MonotonicOptions,
) -> OptimizeResult<f64>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let mut upper = options.upper_bound;
    let mut attempts = 0;

    for attempt in 0..options.max_shrinks {
        if upper < lower {
            break;
        }
        attempts += 1;
        if f(upper, args).is_finite() {
            if attempt > 0 {
                log::debug!(
                    "is_monotonic: upper bound reduced to {:e} after {} attempts",
                    upper,
                    attempt
                );
            }
            return Ok(upper);
        }
        if upper <= 0.0 {
            break;
        }
        upper /= 10.0;
    }

    Err(OptimizeError::DomainOverflow {
        upper_bound: upper,
        attempts,
        context: "is_monotonic".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_increasing() {
        assert!(is_monotonic(|x: f64| x.sqrt(), &MonotonicOptions::default()).unwrap());
        assert!(is_monotonic(|x| 3.0 * x + 1.0, &MonotonicOptions::with_bounds(-50.0, 50.0)).unwrap());
    }

    #[test]
    fn test_monotonic_decreasing() {
        let opts = MonotonicOptions::with_bounds(1.0, 1000.0);
        assert!(is_monotonic(|x| 1.0 / x, &opts).unwrap());
        assert!(is_monotonic(|x: f64| (-x).exp(), &opts).unwrap());
    }

    #[test]
    fn test_monotonic_square() {
        let f = |x: f64| x * x;
        assert!(is_monotonic(f, &MonotonicOptions::with_bounds(0.0, 500.0)).unwrap());
        assert!(!is_monotonic(f, &MonotonicOptions::with_bounds(-500.0, 500.0)).unwrap());
    }

    #[test]
    fn test_monotonic_oscillating() {
        let opts = MonotonicOptions::with_bounds(0.0, 100.0);
        assert!(!is_monotonic(|x: f64| x.sin(), &opts).unwrap());
    }

    #[test]
    fn test_monotonic_constant() {
        let opts = MonotonicOptions::with_bounds(-10.0, 10.0);
        assert!(is_monotonic(|_| 4.2, &opts).unwrap());
    }

    #[test]
    fn test_monotonic_two_samples() {
        let opts = MonotonicOptions {
            samples: 2,
            ..MonotonicOptions::with_bounds(-1.0, 1.0)
        };
        // Only the endpoints are compared, so the parabola looks constant
        assert!(is_monotonic(|x| x * x, &opts).unwrap());
        assert!(is_monotonic(|x| -x, &opts).unwrap());
    }

    #[test]
    fn test_monotonic_equal_bounds() {
        let opts = MonotonicOptions::with_bounds(2.0, 2.0);
        assert!(is_monotonic(|x| x * x, &opts).unwrap());
    }

    #[test]
    fn test_monotonic_with_args() {
        struct Line {
            slope: f64,
        }
        let f = |x: f64, p: &Line| p.slope * x;
        let opts = MonotonicOptions::with_bounds(0.0, 10.0);
        assert!(is_monotonic_with(f, &Line { slope: -2.0 }, &opts).unwrap());
        assert!(is_monotonic_with(f, &Line { slope: 0.5 }, &opts).unwrap());
    }

    #[test]
    fn test_monotonic_shrinks_upper_bound() {
        // exp overflows to inf at 1e10 and 1e9, ..., but is finite at 100
        let result = is_monotonic(|x: f64| x.exp(), &MonotonicOptions::default()).unwrap();
        assert!(result);
    }

    #[test]
    fn test_monotonic_domain_overflow() {
        let result = is_monotonic(|_| f64::INFINITY, &MonotonicOptions::default());
        assert!(matches!(
            result,
            Err(OptimizeError::DomainOverflow { attempts: 10, .. })
        ));
    }

    #[test]
    fn test_monotonic_shrink_below_lower_bound() {
        // Never finite above 1, and shrinking crosses the lower bound of 50
        let opts = MonotonicOptions::with_bounds(50.0, 1e4);
        let result = is_monotonic(|x: f64| if x > 1.0 { f64::NAN } else { x }, &opts);
        assert!(matches!(result, Err(OptimizeError::DomainOverflow { .. })));
    }

    #[test]
    fn test_monotonic_domain_error_inside_range() {
        // Finite at both ends but undefined in between
        let f = |x: f64| if (4.0..6.0).contains(&x) { f64::NAN } else { x };
        let result = is_monotonic(f, &MonotonicOptions::with_bounds(0.0, 10.0));
        assert!(matches!(result, Err(OptimizeError::DomainError { .. })));
    }

    #[test]
    fn test_monotonic_invalid_arguments() {
        let result = is_monotonic(|x| x, &MonotonicOptions::with_bounds(5.0, 1.0));
        assert!(matches!(result, Err(OptimizeError::InvalidInterval { .. })));

        let opts = MonotonicOptions {
            samples: 1,
            ..Default::default()
        };
        let result = is_monotonic(|x| x, &opts);
        assert!(matches!(result, Err(OptimizeError::InvalidParameter { .. })));

        let opts = MonotonicOptions {
            max_shrinks: 0,
            ..MonotonicOptions::with_bounds(0.0, 10.0)
        };
        let result = is_monotonic(|x| x, &opts);
        assert!(matches!(result, Err(OptimizeError::InvalidParameter { .. })));
    }

    #[test]
    fn test_monotonic_single_shrink_attempt() {
        let opts = MonotonicOptions {
            max_shrinks: 1,
            ..MonotonicOptions::with_bounds(0.0, 10.0)
        };
        assert!(is_monotonic(|x| x, &opts).unwrap());
    }

    #[test]
    fn test_monotonic_negative_upper_bound_not_shrunk() {
        // Shrinking -1 would give -0.1, which lies above the requested range
        let f = |x: f64| if x == -1.0 { f64::NAN } else { x };
        let result = is_monotonic(f, &MonotonicOptions::with_bounds(-100.0, -1.0));
        assert!(matches!(
            result,
            Err(OptimizeError::DomainOverflow { attempts: 1, .. })
        ));
    }

    #[test]
    fn test_monotonic_deterministic() {
        let f = |x: f64| (x / 100.0).sin();
        let opts = MonotonicOptions::with_bounds(0.0, 1000.0);
        assert_eq!(is_monotonic(f, &opts).unwrap(), is_monotonic(f, &opts).unwrap());
    }
}
