/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Piecewise blending of two motions through a cubic Hermite transition.
//!
//! A [`BlendedMotion`] follows `before` until the pivot, a cubic transition
//! across the window `[pivot, pivot + horizon]`, and `after` from then on:
//!
//! ```text
//!            ┌ before(t)      t <  pivot
//! blend(t) = ┤ transition(t)  pivot <= t <= pivot + horizon
//!            └ after(t)       t >  pivot + horizon
//! ```
//!
//! The transition matches position and velocity of `before` at the pivot
//! and of `after` at the end of the window, so the result is C¹ everywhere.
//!
//! # Invariants
//!
//! - `horizon > 0` and `pivot + horizon` is finite.
//! - The transition is computed once, at construction, from exactly one
//!   position and one velocity read per parent.
//! - Evaluation never fails once construction succeeded.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use tracing::debug;

use crate::error::MotionError;
use crate::flatten::{flatten, prune};
use crate::motion::{Motion, MotionNode};
use crate::polynomial::PolynomialMotion;

// ─── Hermite transition ─────────────────────────────────────────────────────

/// Build the unique cubic through `(pivot, x0, v0)` and `(pivot + horizon, x1, v1)`.
///
/// In the normalised variable `s = (t − pivot) / horizon` this is the Hermite form
///
/// ```text
/// p(s) = h00(s)·x0 + h10(s)·h·v0 + h01(s)·x1 + h11(s)·h·v1
/// ```
///
/// returned as a [`PolynomialMotion`] in `t − pivot`:
///
/// ```text
/// c0 = x0
/// c1 = v0
/// c2 = (3·(x1 − x0)/h − 2·v0 − v1) / h
/// c3 = (2·(x0 − x1)/h + v0 + v1) / h²
/// ```
///
/// `c0` and `c1` are the boundary values themselves, so the transition
/// reproduces `x0` and `v0` bit for bit at the pivot.
///
/// `h` is the span `(pivot + horizon) − pivot` as it rounds in `f64`, the
/// same window the blend dispatches on. When `horizon` is too small to move
/// the pivot at all, the window is the single time `pivot` and `c2 = c3 = 0`.
///
/// # Errors
///
/// - [`MotionError::InvalidHorizon`] if `horizon` is not strictly positive.
/// - [`MotionError::NumericOverflow`] if the window end or a coefficient is
///   not finite.
pub fn hermite_transition(
    x0: f64,
    v0: f64,
    x1: f64,
    v1: f64,
    pivot_time: f64,
    horizon: f64,
) -> Result<PolynomialMotion, MotionError> {
    // Written as a negated comparison so NaN is rejected too.
    if !(horizon > 0.0) {
        return Err(MotionError::InvalidHorizon { horizon });
    }
    // The window actually spanned in `t`, after `pivot + horizon` rounds.
    let span = (pivot_time + horizon) - pivot_time;
    if !span.is_finite() {
        return Err(MotionError::NumericOverflow {
            quantity: "blend window end",
        });
    }
    let coefficients = if span == 0.0 {
        // The window is the single time `pivot`, where only c0 and c1 are seen.
        vec![x0, v0, 0.0, 0.0]
    } else {
        let slope = (x1 - x0) / span;
        let c2 = (3.0 * slope - 2.0 * v0 - v1) / span;
        // Divided twice: `span * span` underflows to zero for spans below ~1e-162.
        let c3 = (v0 + v1 - 2.0 * slope) / span / span;
        vec![x0, v0, c2, c3]
    };
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(MotionError::NumericOverflow {
            quantity: "transition coefficients",
        });
    }
    Ok(PolynomialMotion::from_parts(pivot_time, coefficients))
}

// ─── BlendConfig ────────────────────────────────────────────────────────────

/// Construction parameters for [`BlendedMotion::with_config`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendConfig {
    /// Length of the transition window. Must be > 0.  Default: 1.0.
    pub horizon: f64,

    /// Replace `before` with [`flatten`]`(before, pivot, flatten_order)`.
    ///
    /// Discards everything `before` knew about `t < pivot` and bounds tree
    /// depth under repeated re-blending. Values at or after the pivot are
    /// unchanged.  Default: `false`.
    pub flatten_before: bool,

    /// Degree of the flattened leaf, clamped to
    /// `1..=`[`MAX_FLATTEN_ORDER`](crate::flatten::MAX_FLATTEN_ORDER).  Default: 1.
    pub flatten_order: usize,

    /// Replace `after` with [`prune`]`(after, pivot)`.
    ///
    /// Exact for every `t >= pivot`.  Default: `false`.
    pub prune_after: bool,
}

impl BlendConfig {
    /// Configuration for continual real-time re-blending: flatten the
    /// history and prune the new estimate at every pivot.
    pub fn realtime(horizon: f64) -> Self {
        Self {
            horizon,
            flatten_before: true,
            flatten_order: 1,
            prune_after: true,
        }
    }
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            horizon: 1.0,
            flatten_before: false,
            flatten_order: 1,
            prune_after: false,
        }
    }
}

// ─── Regime ─────────────────────────────────────────────────────────────────

/// Which piece of a [`BlendedMotion`] answers a query time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
    /// `t < pivot`: the `before` motion.
    Before = 0,
    /// `pivot <= t <= pivot + horizon`: the cubic transition.
    Transition = 1,
    /// `t > pivot + horizon` (or NaN): the `after` motion.
    After = 2,
}

impl Regime {
    const ALL: [Regime; 3] = [Regime::Before, Regime::Transition, Regime::After];
}

#[derive(Clone, Copy)]
enum Channel {
    Position,
    Velocity,
}

// ─── BlendedMotion ──────────────────────────────────────────────────────────

/// C¹ blend of two motions around a pivot time.
///
/// Children are [`MotionNode`]s and may themselves be blends. Use
/// [`BlendConfig::flatten_before`] (or [`flatten`] directly) when blends are
/// chained indefinitely, otherwise evaluation depth grows by one per blend.
#[derive(Clone, Debug)]
pub struct BlendedMotion {
    before: MotionNode,
    after: MotionNode,
    pivot_time: f64,
    horizon: f64,
    /// `pivot_time + horizon`, checked finite at construction.
    end_time: f64,
    transition: Arc<PolynomialMotion>,
}

impl BlendedMotion {
    /// Blend `before` into `after` over `[pivot_time, pivot_time + horizon]`.
    ///
    /// Equivalent to [`BlendedMotion::with_config`] with only `horizon` set.
    pub fn new(
        before: impl Into<MotionNode>,
        after: impl Into<MotionNode>,
        pivot_time: f64,
        horizon: f64,
    ) -> Result<Self, MotionError> {
        let config = BlendConfig {
            horizon,
            ..BlendConfig::default()
        };
        Self::with_config(before, after, pivot_time, &config)
    }

    /// Blend `before` into `after` at `pivot_time` using `config`.
    ///
    /// # Errors
    ///
    /// - [`MotionError::InvalidHorizon`] if `config.horizon <= 0` or NaN.
    /// - [`MotionError::NumericOverflow`] if the window end, a boundary value
    ///   or a transition coefficient is not finite.
    pub fn with_config(
        before: impl Into<MotionNode>,
        after: impl Into<MotionNode>,
        pivot_time: f64,
        config: &BlendConfig,
    ) -> Result<Self, MotionError> {
        let horizon = config.horizon;
        if !(horizon > 0.0) {
            return Err(MotionError::InvalidHorizon { horizon });
        }
        let end_time = pivot_time + horizon;
        if !end_time.is_finite() {
            return Err(MotionError::NumericOverflow {
                quantity: "blend window end",
            });
        }

        let mut before = before.into();
        let mut after = after.into();
        if config.flatten_before {
            before = MotionNode::from(flatten(&before, pivot_time, config.flatten_order));
        }
        if config.prune_after {
            after = prune(&after, pivot_time);
        }

        let x0 = before.at(pivot_time);
        let v0 = before.d_at(pivot_time);
        let x1 = after.at(end_time);
        let v1 = after.d_at(end_time);
        if [x0, v0, x1, v1].iter().any(|v| !v.is_finite()) {
            return Err(MotionError::NumericOverflow {
                quantity: "blend boundary values",
            });
        }

        let transition = hermite_transition(x0, v0, x1, v1, pivot_time, horizon)?;
        debug!(
            pivot_time,
            horizon,
            before_depth = before.depth(),
            after_depth = after.depth(),
            "blend constructed"
        );
        Ok(Self {
            before,
            after,
            pivot_time,
            horizon,
            end_time,
            transition: Arc::new(transition),
        })
    }

    /// Same window and transition, different children.
    ///
    /// Only valid when the new children agree with the old ones wherever the
    /// caller will evaluate; used by [`prune`].
    pub(crate) fn with_children(&self, before: MotionNode, after: MotionNode) -> Self {
        Self {
            before,
            after,
            pivot_time: self.pivot_time,
            horizon: self.horizon,
            end_time: self.end_time,
            transition: Arc::clone(&self.transition),
        }
    }

    /// Motion followed before the pivot.
    pub fn before(&self) -> &MotionNode {
        &self.before
    }

    /// Motion followed after the transition window.
    pub fn after(&self) -> &MotionNode {
        &self.after
    }

    /// Start of the transition window.
    pub fn pivot_time(&self) -> f64 {
        self.pivot_time
    }

    /// Length of the transition window.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// End of the transition window (`pivot_time + horizon`).
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// `(pivot_time, end_time)`.
    pub fn range(&self) -> (f64, f64) {
        (self.pivot_time, self.end_time)
    }

    /// The cubic transition polynomial.
    pub fn transition(&self) -> &PolynomialMotion {
        &self.transition
    }

    pub(crate) fn shared_transition(&self) -> &Arc<PolynomialMotion> {
        &self.transition
    }

    /// Which piece answers queries at `t`.
    #[inline]
    pub fn regime(&self, t: f64) -> Regime {
        if t < self.pivot_time {
            Regime::Before
        } else if t <= self.end_time {
            Regime::Transition
        } else {
            Regime::After
        }
    }

    fn piece(&self, regime: Regime) -> &dyn Motion {
        match regime {
            Regime::Before => &self.before,
            Regime::Transition => &*self.transition,
            Regime::After => &self.after,
        }
    }

    /// Split `times` by regime, evaluate each piece on its whole batch, and
    /// scatter the results back into query order.
    fn dispatch(&self, times: &[f64], out: &mut [f64], channel: Channel) {
        assert_eq!(times.len(), out.len(), "times/out length mismatch");

        let mut indices: [Vec<usize>; 3] = Default::default();
        for (i, &t) in times.iter().enumerate() {
            indices[self.regime(t) as usize].push(i);
        }

        let mut batch_times = Vec::new();
        let mut batch_out = Vec::new();
        for regime in Regime::ALL {
            let idx = &indices[regime as usize];
            if idx.is_empty() {
                continue;
            }
            let piece = self.piece(regime);
            if idx.len() == times.len() {
                evaluate(piece, times, out, channel);
                return;
            }
            batch_times.clear();
            batch_times.extend(idx.iter().map(|&i| times[i]));
            batch_out.clear();
            batch_out.resize(idx.len(), 0.0);
            evaluate(piece, &batch_times, &mut batch_out, channel);
            for (&i, &x) in idx.iter().zip(&batch_out) {
                out[i] = x;
            }
        }
    }
}

fn evaluate(piece: &dyn Motion, times: &[f64], out: &mut [f64], channel: Channel) {
    match channel {
        Channel::Position => piece.at_into(times, out),
        Channel::Velocity => piece.d_at_into(times, out),
    }
}

impl Motion for BlendedMotion {
    #[inline]
    fn at(&self, t: f64) -> f64 {
        self.piece(self.regime(t)).at(t)
    }

    #[inline]
    fn d_at(&self, t: f64) -> f64 {
        self.piece(self.regime(t)).d_at(t)
    }

    fn at_into(&self, times: &[f64], out: &mut [f64]) {
        self.dispatch(times, out, Channel::Position);
    }

    fn d_at_into(&self, times: &[f64], out: &mut [f64]) {
        self.dispatch(times, out, Channel::Velocity);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
