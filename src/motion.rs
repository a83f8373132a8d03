/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The motion capability and the shared motion-tree handle.
//!
//! - [`Motion`]: position and velocity at a time, scalar or batched.
//! - [`MotionNode`]: a cheaply clonable handle to either a
//!   [`PolynomialMotion`] leaf or a [`BlendedMotion`] composite. Children are
//!   reference counted, so one leaf can sit in any number of independent trees.
//!
//! Trees are acyclic by construction: a blend can only be built from motions
//! that already exist, and nothing is mutated afterwards.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::blend::BlendedMotion;
use crate::polynomial::PolynomialMotion;

// ─── Motion ─────────────────────────────────────────────────────────────────

/// One-dimensional motion: position and first derivative over time.
///
/// Implementors provide the scalar forms. The batched forms default to a
/// per-element loop and may be overridden where a whole batch can be
/// dispatched at once (see [`BlendedMotion`]).
pub trait Motion {
    /// Position at time `t`.
    fn at(&self, t: f64) -> f64;

    /// Velocity (first derivative) at time `t`.
    fn d_at(&self, t: f64) -> f64;

    /// Positions at every time in `times`, written to `out` in the same order.
    ///
    /// # Panics
    ///
    /// If `times` and `out` differ in length.
    fn at_into(&self, times: &[f64], out: &mut [f64]) {
        assert_eq!(times.len(), out.len(), "times/out length mismatch");
        for (x, &t) in out.iter_mut().zip(times) {
            *x = self.at(t);
        }
    }

    /// Velocities at every time in `times`, written to `out` in the same order.
    ///
    /// # Panics
    ///
    /// If `times` and `out` differ in length.
    fn d_at_into(&self, times: &[f64], out: &mut [f64]) {
        assert_eq!(times.len(), out.len(), "times/out length mismatch");
        for (v, &t) in out.iter_mut().zip(times) {
            *v = self.d_at(t);
        }
    }

    /// Positions at every time in `times`.
    fn at_all(&self, times: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; times.len()];
        self.at_into(times, &mut out);
        out
    }

    /// Velocities at every time in `times`.
    fn d_at_all(&self, times: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; times.len()];
        self.d_at_into(times, &mut out);
        out
    }
}

macro_rules! forward_motion {
    ($($ptr:ty),*) => {$(
        impl<M: Motion + ?Sized> Motion for $ptr {
            #[inline]
            fn at(&self, t: f64) -> f64 {
                (**self).at(t)
            }
            #[inline]
            fn d_at(&self, t: f64) -> f64 {
                (**self).d_at(t)
            }
            fn at_into(&self, times: &[f64], out: &mut [f64]) {
                (**self).at_into(times, out)
            }
            fn d_at_into(&self, times: &[f64], out: &mut [f64]) {
                (**self).d_at_into(times, out)
            }
        }
    )*};
}

forward_motion!(&M, Box<M>, Arc<M>);

// ─── MotionNode ─────────────────────────────────────────────────────────────

/// Shared handle to a node of a motion tree.
///
/// This is the tagged-variant form of [`Motion`]: evaluation recurses by
/// matching on the variant, and tree-rewriting code ([`crate::prune`]) can
/// look inside composites.
#[derive(Clone, Debug)]
pub enum MotionNode {
    /// A polynomial leaf.
    Polynomial(Arc<PolynomialMotion>),
    /// A blend of two child nodes.
    Blended(Arc<BlendedMotion>),
}

impl MotionNode {
    /// Number of nodes on the longest root-to-leaf path. A leaf has depth 1.
    ///
    /// This is also the recursion depth of a scalar evaluation.
    pub fn depth(&self) -> usize {
        match self {
            Self::Polynomial(_) => 1,
            Self::Blended(b) => 1 + b.before().depth().max(b.after().depth()),
        }
    }

    /// Number of leaves reachable through the child links (transitions excluded).
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Polynomial(_) => 1,
            Self::Blended(b) => b.before().leaf_count() + b.after().leaf_count(),
        }
    }

    /// The leaf, if this node is one.
    pub fn as_polynomial(&self) -> Option<&PolynomialMotion> {
        match self {
            Self::Polynomial(p) => Some(p),
            Self::Blended(_) => None,
        }
    }

    /// The blend, if this node is one.
    pub fn as_blended(&self) -> Option<&BlendedMotion> {
        match self {
            Self::Blended(b) => Some(b),
            Self::Polynomial(_) => None,
        }
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &MotionNode) -> bool {
        match (self, other) {
            (Self::Polynomial(a), Self::Polynomial(b)) => Arc::ptr_eq(a, b),
            (Self::Blended(a), Self::Blended(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Motion for MotionNode {
    #[inline]
    fn at(&self, t: f64) -> f64 {
        match self {
            Self::Polynomial(p) => p.at(t),
            Self::Blended(b) => b.at(t),
        }
    }

    #[inline]
    fn d_at(&self, t: f64) -> f64 {
        match self {
            Self::Polynomial(p) => p.d_at(t),
            Self::Blended(b) => b.d_at(t),
        }
    }

    fn at_into(&self, times: &[f64], out: &mut [f64]) {
        match self {
            Self::Polynomial(p) => p.at_into(times, out),
            Self::Blended(b) => b.at_into(times, out),
        }
    }

    fn d_at_into(&self, times: &[f64], out: &mut [f64]) {
        match self {
            Self::Polynomial(p) => p.d_at_into(times, out),
            Self::Blended(b) => b.d_at_into(times, out),
        }
    }
}

impl From<PolynomialMotion> for MotionNode {
    fn from(p: PolynomialMotion) -> Self {
        Self::Polynomial(Arc::new(p))
    }
}

impl From<Arc<PolynomialMotion>> for MotionNode {
    fn from(p: Arc<PolynomialMotion>) -> Self {
        Self::Polynomial(p)
    }
}

impl From<BlendedMotion> for MotionNode {
    fn from(b: BlendedMotion) -> Self {
        Self::Blended(Arc::new(b))
    }
}

impl From<Arc<BlendedMotion>> for MotionNode {
    fn from(b: Arc<BlendedMotion>) -> Self {
        Self::Blended(b)
    }
}
