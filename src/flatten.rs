/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Bounding the depth of repeatedly re-blended motion trees.
//!
//! Every real-time re-blend nests the previous trajectory one level deeper.
//! Two rewrites keep that in check:
//!
//! - [`flatten`] collapses any motion into a single leaf that matches its
//!   position and velocity at an anchor time. Used on the *older* side of a
//!   new blend, whose only remaining role is to supply boundary values at
//!   the pivot.
//! - [`prune`] drops the parts of a tree that can no longer be reached for
//!   `t >= anchor`, keeping every value from the anchor on bit-identical.
//!   Safe on either side of a new blend.
//!
//! Neither rewrite recomputes a transition polynomial.

use alloc::vec;

use tracing::trace;

use crate::motion::{Motion, MotionNode};
use crate::polynomial::PolynomialMotion;

/// Highest degree [`flatten`] will produce.
pub const MAX_FLATTEN_ORDER: usize = 16;

/// Replace `motion` with a leaf anchored at `anchor_time`.
///
/// The leaf is `x + v·(t − anchor_time)` padded with zero coefficients up to
/// degree `order`, where `x` and `v` are the position and velocity of
/// `motion` at the anchor. `order` is clamped to `1..=MAX_FLATTEN_ORDER`, so
/// velocity is never dropped. Nothing is known about higher derivatives, so
/// they are left at zero.
///
/// Used as `before` of a blend pivoting at `anchor_time`, the blend's values
/// for `t >= anchor_time` are bit-identical to those of the same blend built
/// on the unflattened motion; only `t < anchor_time` changes.
pub fn flatten<M: Motion + ?Sized>(motion: &M, anchor_time: f64, order: usize) -> PolynomialMotion {
    let order = order.clamp(1, MAX_FLATTEN_ORDER);
    let mut coefficients = vec![0.0; order + 1];
    coefficients[0] = motion.at(anchor_time);
    coefficients[1] = motion.d_at(anchor_time);
    trace!(anchor_time, order, "motion flattened");
    PolynomialMotion::from_parts(anchor_time, coefficients)
}

/// Drop every subtree of `node` that no query at `t >= anchor_time` can reach.
///
/// For each blend, by where the anchor falls relative to its window:
///
/// | anchor            | result                                              |
/// |-------------------|-----------------------------------------------------|
/// | after the window  | `prune(after)`                                      |
/// | inside the window | `before` → transition leaf, `prune(after)`          |
/// | before the pivot  | `prune(before)`, `prune(after)`                     |
///
/// Transitions are reused as-is, and subtrees that need no change keep their
/// allocation, so pruning an already pruned tree returns the same handle.
pub fn prune(node: &MotionNode, anchor_time: f64) -> MotionNode {
    let blend = match node {
        MotionNode::Polynomial(_) => return node.clone(),
        MotionNode::Blended(b) => b,
    };

    if blend.end_time() < anchor_time {
        return prune(blend.after(), anchor_time);
    }

    let before = if blend.pivot_time() <= anchor_time {
        match blend.before() {
            MotionNode::Polynomial(_) => blend.before().clone(),
            MotionNode::Blended(_) => MotionNode::Polynomial(blend.shared_transition().clone()),
        }
    } else {
        prune(blend.before(), anchor_time)
    };
    let after = prune(blend.after(), anchor_time);

    if before.ptr_eq(blend.before()) && after.ptr_eq(blend.after()) {
        return node.clone();
    }
    trace!(
        anchor_time,
        depth_before = node.depth(),
        depth_after = 1 + before.depth().max(after.depth()),
        "motion pruned"
    );
    MotionNode::from(blend.with_children(before, after))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
