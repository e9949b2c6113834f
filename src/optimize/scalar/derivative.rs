//! Numeric differentiation with an explicit precision level.

use num_traits::Float;

use crate::optimize::error::{OptimizeError, OptimizeResult};
use crate::optimize::utils::{cast, to_f64};

/// Working precision for numeric differentiation.
///
/// `digits` is the number of significant decimal digits carried by the float
/// type the function is evaluated in (15 for `f64`, 6 for `f32`). The central
/// difference step is chosen as `10^(-digits/3)`, which balances truncation
/// and rounding error for that many digits. Higher-precision float types pass
/// a larger value to get a smaller step. `10^(-digits)` may not fall below the
/// machine epsilon of the float type in use, otherwise `x ± h` rounds back to
/// `x` and the difference collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    /// Significant decimal digits
    pub digits: u32,
}

impl Precision {
    /// Create a precision level of `digits` significant decimal digits.
    pub fn new(digits: u32) -> Self {
        Self { digits }
    }

    /// Check that `T` carries at least `digits` significant digits.
    pub(crate) fn check<T: Float>(&self) -> OptimizeResult<()> {
        if self.digits == 0 {
            return Err(OptimizeError::InvalidParameter {
                parameter: "precision".to_string(),
                message: "digits must be at least 1".to_string(),
            });
        }
        let resolution: T = cast::<T>(10.0)?.powf(cast(-(self.digits as f64))?);
        if resolution < T::epsilon() {
            return Err(OptimizeError::InvalidParameter {
                parameter: "precision".to_string(),
                message: format!(
                    "{} digits exceed the float type (epsilon {:e})",
                    self.digits,
                    to_f64(T::epsilon())
                ),
            });
        }
        Ok(())
    }

    /// Central difference step at `x`, scaled by `max(|x|, 1)`.
    pub(crate) fn step<T: Float>(&self, x: T) -> OptimizeResult<T> {
        self.check::<T>()?;
        let ten: T = cast(10.0)?;
        let exponent: T = cast(-(self.digits as f64) / 3.0)?;
        Ok(ten.powf(exponent) * x.abs().max(T::one()))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self { digits: 15 }
    }
}

/// Estimate `f'(x)` with a central difference.
///
/// # Arguments
/// * `f` - Function to differentiate
/// * `x` - Point of evaluation
/// * `precision` - Working precision that sets the difference step
///
/// # Errors
/// * `InvalidParameter` if `precision.digits` is zero or more than `T` can hold
/// * `NumericalError` if the estimate is not finite
pub fn derivative<T, F>(f: &F, x: T, precision: &Precision) -> OptimizeResult<T>
where
    T: Float,
    F: Fn(T) -> T,
{
    let h = precision.step(x)?;
    let two: T = cast(2.0)?;
    let df = (f(x + h) - f(x - h)) / (two * h);

    if !df.is_finite() {
        return Err(OptimizeError::NumericalError {
            message: format!("derivative is not finite at x={}", to_f64(x)),
        });
    }
    Ok(df)
}
