/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Construction errors for motions and blends.
//!
//! Every check happens once, when a motion is built. Evaluation through
//! [`crate::Motion`] is infallible for the lifetime of the object.

use thiserror::Error;

/// Failure to construct a motion.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MotionError {
    /// A polynomial was given no coefficients.
    #[error("polynomial motion needs at least one coefficient")]
    EmptyPolynomial,

    /// A blend was given a horizon that is zero, negative or NaN.
    #[error("blend horizon must be > 0.0, got {horizon}")]
    InvalidHorizon {
        /// The rejected horizon.
        horizon: f64,
    },

    /// A value computed during blend construction left the finite range of `f64`.
    #[error("numeric overflow while computing {quantity}")]
    NumericOverflow {
        /// Which intermediate quantity overflowed.
        quantity: &'static str,
    },
}
