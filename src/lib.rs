//! univar - Numeric toolkit for univariate real functions
//!
//! univar answers three questions about a function `f: R -> R` given only as a
//! closure:
//!
//! - is `f` monotonic over a domain? (sampling-based test)
//! - which `x` gives `f(x) = y`? (numeric inversion with a bounded fallback)
//! - where does `f` reach a local minimum? (fixed-step gradient descent)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌──────────────────┐
//! │ is_monotonic │◄──┤ invert, invert_batch │   │ gradient_descent │
//! └──────────────┘   └──────────┬───────────┘   └────────┬─────────┘
//!     diagnostic                │ uses                   │ uses
//!                    ┌──────────▼───────────┐   ┌────────▼─────────┐
//!                    │  simplex, bounded    │   │ derivative       │
//!                    │  scalar minimizers   │   │ (Precision)      │
//!                    └──────────────────────┘   └──────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every routine returns [`OptimizeResult`]. Only malformed arguments and a
//! function that cannot be evaluated at all abort a call. Non-convergence,
//! inaccurate inverses and non-monotonic functions are reported through the
//! [`log`] facade at `warn` level, and in the fields of the returned result,
//! so callers can decide whether to escalate.
//!
//! # Parallelism
//!
//! All routines are synchronous and free of shared state. [`invert_batch`]
//! runs independent inversions on the rayon thread pool.
//!
//! # Example
//!
//! ```
//! use univar::{invert, is_monotonic, InverseOptions, MonotonicOptions};
//!
//! let f = |x: f64| x.sqrt();
//! assert!(is_monotonic(f, &MonotonicOptions::default())?);
//!
//! let y = f(1_829_347.0);
//! let result = invert(y, f, &InverseOptions::default())?;
//! assert!(result.within_threshold);
//! # Ok::<(), univar::OptimizeError>(())
//! ```

pub mod optimize;

// Re-export main types for convenience
pub use optimize::{OptimizeError, OptimizeResult, scalar::*};
