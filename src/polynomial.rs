/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Fixed-coefficient polynomial motion, the leaf of every motion tree.
//!
//! ```text
//! x(t) = c0 + c1·(t − t0) + c2·(t − t0)² + … + cn·(t − t0)ⁿ
//! ```
//!
//! Coefficients are stored lowest order first. Position and velocity are
//! evaluated with Horner's rule, so evaluating exactly at `t0` returns `c0`
//! and `c1` bit for bit.
//!
//! # Invariants
//!
//! - At least one coefficient; the degree never changes after construction.
//! - Immutable. Share through [`crate::MotionNode`] rather than cloning.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::MotionError;
use crate::motion::Motion;

// ─── PolynomialMotion ───────────────────────────────────────────────────────

/// A one-dimensional motion described by a polynomial in `t − offset_time`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialMotion {
    /// Local time origin of the polynomial.
    offset_time: f64,
    /// `[c0, c1, …, cn]`, lowest order first. Never empty.
    coefficients: Vec<f64>,
}

impl PolynomialMotion {
    /// Construct a polynomial motion around `offset_time`.
    ///
    /// Returns [`MotionError::EmptyPolynomial`] if `coefficients` is empty.
    pub fn new(offset_time: f64, coefficients: impl Into<Vec<f64>>) -> Result<Self, MotionError> {
        let coefficients = coefficients.into();
        if coefficients.is_empty() {
            return Err(MotionError::EmptyPolynomial);
        }
        Ok(Self {
            offset_time,
            coefficients,
        })
    }

    /// Build from coefficients already known to be non-empty.
    pub(crate) fn from_parts(offset_time: f64, coefficients: Vec<f64>) -> Self {
        debug_assert!(!coefficients.is_empty());
        Self {
            offset_time,
            coefficients,
        }
    }

    /// A motion that stays at `position` forever.
    pub fn constant(offset_time: f64, position: f64) -> Self {
        Self {
            offset_time,
            coefficients: vec![position],
        }
    }

    /// A motion passing through `position` at `offset_time` with constant `velocity`.
    pub fn linear(offset_time: f64, position: f64, velocity: f64) -> Self {
        Self {
            offset_time,
            coefficients: vec![position, velocity],
        }
    }

    /// Local time origin.
    pub fn offset_time(&self) -> f64 {
        self.offset_time
    }

    /// Coefficients, lowest order first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Polynomial degree (`coefficients().len() - 1`).
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The derivative as a polynomial around the same origin.
    ///
    /// A constant motion differentiates to the zero constant, so the result
    /// always satisfies the non-empty invariant.
    pub fn derivative(&self) -> PolynomialMotion {
        if self.coefficients.len() < 2 {
            return Self::constant(self.offset_time, 0.0);
        }
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| i as f64 * c)
            .collect();
        Self {
            offset_time: self.offset_time,
            coefficients,
        }
    }

    /// The same curve re-expanded around `new_offset` (Taylor shift).
    ///
    /// Mathematically identical; floating-point results agree to rounding.
    pub fn shifted(&self, new_offset: f64) -> PolynomialMotion {
        let d = new_offset - self.offset_time;
        let mut b = self.coefficients.clone();
        let n = b.len();
        for k in 0..n {
            for j in (k..n - 1).rev() {
                b[j] += d * b[j + 1];
            }
        }
        Self {
            offset_time: new_offset,
            coefficients: b,
        }
    }
}

impl Motion for PolynomialMotion {
    #[inline]
    fn at(&self, t: f64) -> f64 {
        let dt = t - self.offset_time;
        match self.coefficients.split_last() {
            Some((&last, rest)) => rest.iter().rev().fold(last, |acc, &c| acc * dt + c),
            None => 0.0,
        }
    }

    #[inline]
    fn d_at(&self, t: f64) -> f64 {
        let n = self.coefficients.len();
        if n < 2 {
            return 0.0;
        }
        let dt = t - self.offset_time;
        let mut acc = (n - 1) as f64 * self.coefficients[n - 1];
        for i in (1..n - 1).rev() {
            acc = acc * dt + i as f64 * self.coefficients[i];
        }
        acc
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_empty_coefficients_rejected() {
        assert_eq!(
            PolynomialMotion::new(0.0, Vec::<f64>::new()),
            Err(MotionError::EmptyPolynomial)
        );
    }

    #[test]
    fn test_degree_from_length() {
        let m = PolynomialMotion::new(0.0, [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(m.degree(), 2);
        assert_eq!(PolynomialMotion::constant(0.0, 4.0).degree(), 0);
    }

    #[test]
    fn test_constant_motion() {
        for offset in [0.0, 1.0] {
            let m = PolynomialMotion::new(offset, [1.0, 0.0, 0.0]).unwrap();
            for t in linspace(0.0, 10.0, 100) {
                assert_eq!(m.at(t), 1.0);
                assert_eq!(m.d_at(t), 0.0);
            }
        }
    }

    #[test]
    fn test_linear_motion() {
        for offset in [0.0, 1.0] {
            let m = PolynomialMotion::new(offset, [1.0, 1.0, 0.0]).unwrap();
            for t in linspace(0.0, 10.0, 100) {
                assert!((m.at(t) - ((t - offset) + 1.0)).abs() < 1e-12);
                assert!((m.d_at(t) - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_quadratic_motion() {
        for offset in [0.0, 1.0] {
            let m = PolynomialMotion::new(offset, [0.0, 0.0, 1.0]).unwrap();
            for t in linspace(0.0, 10.0, 100) {
                let dt = t - offset;
                assert!((m.at(t) - dt * dt).abs() < 1e-9, "t = {}", t);
                assert!((m.d_at(t) - 2.0 * dt).abs() < 1e-9, "t = {}", t);
            }
        }
    }

    #[test]
    fn test_exact_values_at_offset() {
        let m = PolynomialMotion::new(2.5, [-0.8, 1.25, 0.5, 7.0]).unwrap();
        assert_eq!(m.at(2.5), -0.8);
        assert_eq!(m.d_at(2.5), 1.25);
    }

    #[test]
    fn test_derivative_polynomial_matches_d_at() {
        let m = PolynomialMotion::new(1.0, [3.0, -2.0, 0.5, 0.25]).unwrap();
        let d = m.derivative();
        assert_eq!(d.coefficients(), &[-2.0, 1.0, 0.75]);
        for t in linspace(-3.0, 3.0, 25) {
            assert!((d.at(t) - m.d_at(t)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_derivative_of_constant_is_zero() {
        let d = PolynomialMotion::constant(0.0, 5.0).derivative();
        assert_eq!(d.coefficients(), &[0.0]);
    }

    #[test]
    fn test_shifted_is_same_curve() {
        let m = PolynomialMotion::new(0.0, [-0.8, 1.0, 0.5]).unwrap();
        let s = m.shifted(2.5);
        assert_eq!(s.offset_time(), 2.5);
        for t in linspace(-5.0, 5.0, 41) {
            assert!((s.at(t) - m.at(t)).abs() < 1e-9);
            assert!((s.d_at(t) - m.d_at(t)).abs() < 1e-9);
        }
        assert!((s.coefficients()[0] - m.at(2.5)).abs() < 1e-12);
        assert!((s.coefficients()[1] - m.d_at(2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_batched_matches_scalar() {
        let m = PolynomialMotion::new(1.0, [0.0, 3.0, 5.0]).unwrap();
        let times = linspace(0.0, 10.0, 17);
        let xs = m.at_all(&times);
        let vs = m.d_at_all(&times);
        for (i, &t) in times.iter().enumerate() {
            assert_eq!(xs[i], m.at(t));
            assert_eq!(vs[i], m.d_at(t));
        }
    }
}
