//! Shared utility functions for the scalar algorithms.

use num_traits::{Float, NumCast};

use super::error::{OptimizeError, OptimizeResult};

/// Threshold for treating values as effectively zero.
pub const ZERO_THRESHOLD: f64 = 1e-10;

/// Square root of f64 machine epsilon, used for relative tolerances.
pub const SQRT_EPS: f64 = 1.490_116_119_384_765_6e-8;

/// Golden section ratio `(3 - sqrt(5)) / 2`.
pub const GOLDEN_MEAN: f64 = 0.381_966_011_250_105_1;

/// Evenly spaced points over `[start, stop]`, both ends included.
///
/// The last point is exactly `stop` so that floating point accumulation never
/// leaves the upper end unsampled.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut points: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            points[num - 1] = stop;
            points
        }
    }
}

/// Convert an `f64` constant into the working float type.
#[inline]
pub fn cast<T: Float>(value: f64) -> OptimizeResult<T> {
    <T as NumCast>::from(value).ok_or_else(|| OptimizeError::NumericalError {
        message: format!("{} is not representable in the working float type", value),
    })
}

/// Convert a working float back to `f64` for error reporting and logging.
#[inline]
pub fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let pts = linspace(0.0, 1.0, 5);
        assert_eq!(pts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let pts = linspace(-500.0, 500.0, 2500);
        assert_eq!(pts.len(), 2500);
        assert_eq!(pts[0], -500.0);
        assert_eq!(pts[2499], 500.0);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert_eq!(linspace(2.0, 2.0, 3), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_cast_round_trip() {
        let v: f32 = cast(0.5).unwrap();
        assert_eq!(v, 0.5f32);
        assert_eq!(to_f64(v), 0.5);
    }

    #[test]
    fn test_golden_mean() {
        assert!((GOLDEN_MEAN - 0.5 * (3.0 - 5.0_f64.sqrt())).abs() < 1e-15);
        assert!((SQRT_EPS - f64::EPSILON.sqrt()).abs() < 1e-20);
    }
}
