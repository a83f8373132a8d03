//! Serialisable description of a motion tree for persistence and transport.
//!
//! A [`MotionRecord`] stores the construction parameters of every node:
//! offsets and coefficients for leaves, pivot and horizon for blends.
//! Transitions are not stored. [`MotionRecord::build`] recomputes them
//! through the normal constructors, which are deterministic, so a rebuilt
//! tree evaluates bit-identically to the one it was captured from.
//!
//! Children shared between several blends are written once per use; the
//! rebuilt tree no longer shares them.
//!
//! # no_std
//!
//! This module requires the `serde` feature and works with `alloc` only.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::blend::BlendedMotion;
use crate::error::MotionError;
use crate::motion::MotionNode;
use crate::polynomial::PolynomialMotion;

/// Current [`MotionSnapshot`] format version.
pub const RECORD_VERSION: u16 = 1;

/// Construction parameters of one motion-tree node.
///
/// # Example
///
/// ```rust,ignore
/// use motion_blend::record::MotionRecord;
///
/// let record = MotionRecord::from(&node);
/// let json = serde_json::to_string(&record).unwrap();
/// let restored = serde_json::from_str::<MotionRecord>(&json).unwrap().build()?;
/// ```
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionRecord {
    /// A [`PolynomialMotion`] leaf.
    Polynomial {
        /// Local time origin.
        offset_time: f64,
        /// Coefficients, lowest order first.
        coefficients: Vec<f64>,
    },
    /// A [`BlendedMotion`] node.
    Blended {
        /// Motion followed before the pivot.
        before: Box<MotionRecord>,
        /// Motion followed after the transition window.
        after: Box<MotionRecord>,
        /// Start of the transition window.
        pivot_time: f64,
        /// Length of the transition window.
        horizon: f64,
    },
}

impl From<&PolynomialMotion> for MotionRecord {
    fn from(p: &PolynomialMotion) -> Self {
        Self::Polynomial {
            offset_time: p.offset_time(),
            coefficients: p.coefficients().to_vec(),
        }
    }
}

impl From<&BlendedMotion> for MotionRecord {
    fn from(b: &BlendedMotion) -> Self {
        Self::Blended {
            before: Box::new(Self::from(b.before())),
            after: Box::new(Self::from(b.after())),
            pivot_time: b.pivot_time(),
            horizon: b.horizon(),
        }
    }
}

impl From<&MotionNode> for MotionRecord {
    fn from(node: &MotionNode) -> Self {
        match node {
            MotionNode::Polynomial(p) => Self::from(&**p),
            MotionNode::Blended(b) => Self::from(&**b),
        }
    }
}

impl MotionRecord {
    /// Rebuild the motion tree, revalidating every node.
    ///
    /// Returns the first construction error met, depth first, before side
    /// ahead of after side.
    pub fn build(&self) -> Result<MotionNode, MotionError> {
        match self {
            Self::Polynomial {
                offset_time,
                coefficients,
            } => Ok(PolynomialMotion::new(*offset_time, coefficients.clone())?.into()),
            Self::Blended {
                before,
                after,
                pivot_time,
                horizon,
            } => {
                let before = before.build()?;
                let after = after.build()?;
                Ok(BlendedMotion::new(before, after, *pivot_time, *horizon)?.into())
            }
        }
    }

    /// Number of nodes (leaves and blends) in the record.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Polynomial { .. } => 1,
            Self::Blended { before, after, .. } => 1 + before.node_count() + after.node_count(),
        }
    }
}

/// A versioned [`MotionRecord`] for storage.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct MotionSnapshot {
    /// Format version, always [`RECORD_VERSION`] for newly created snapshots.
    pub version: u16,
    /// The captured tree.
    pub root: MotionRecord,
}

impl MotionSnapshot {
    /// Capture `node` at the current format version.
    pub fn capture(node: &MotionNode) -> Self {
        Self {
            version: RECORD_VERSION,
            root: MotionRecord::from(node),
        }
    }

    /// Rebuild the captured tree. See [`MotionRecord::build`].
    pub fn build(&self) -> Result<MotionNode, MotionError> {
        self.root.build()
    }
}
