/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Real-time fusion of repeatedly refined motion estimates.
//!
//! A tracker that re-estimates a projectile every frame produces a new
//! polynomial each time, and each one disagrees a little with the last.
//! [`FusedTrajectory`] keeps a single C¹ trajectory by blending the current
//! trajectory into every new estimate at the time it arrives.
//!
//! With [`BlendConfig::realtime`] the older side is flattened at each pivot,
//! so the tree never grows past two levels plus the depth of the estimate,
//! however many updates are applied.

use tracing::{debug, warn};

use crate::blend::{BlendConfig, BlendedMotion};
use crate::error::MotionError;
use crate::motion::{Motion, MotionNode};

/// A trajectory that is re-blended into each new estimate as it arrives.
#[derive(Clone, Debug)]
pub struct FusedTrajectory {
    current: MotionNode,
    config: BlendConfig,
    last_pivot: Option<f64>,
    updates: u64,
}

impl FusedTrajectory {
    /// Start from a single motion.
    pub fn new(initial: impl Into<MotionNode>, config: BlendConfig) -> Self {
        Self {
            current: initial.into(),
            config,
            last_pivot: None,
            updates: 0,
        }
    }

    /// Blend the current trajectory into `estimate`, pivoting at `now`.
    ///
    /// On error the trajectory is left unchanged.
    pub fn update(&mut self, estimate: impl Into<MotionNode>, now: f64) -> Result<(), MotionError> {
        if let Some(previous) = self.last_pivot {
            if now < previous {
                warn!(now, previous, "re-blend pivot moved backwards in time");
            }
        }
        let blend = BlendedMotion::with_config(self.current.clone(), estimate, now, &self.config)?;
        self.current = MotionNode::from(blend);
        self.last_pivot = Some(now);
        self.updates += 1;
        debug!(now, updates = self.updates, depth = self.current.depth(), "trajectory updated");
        Ok(())
    }

    /// The trajectory as it stands.
    pub fn current(&self) -> &MotionNode {
        &self.current
    }

    /// Depth of the current motion tree.
    pub fn depth(&self) -> usize {
        self.current.depth()
    }

    /// Number of successful updates.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Pivot of the most recent update, if any.
    pub fn last_pivot(&self) -> Option<f64> {
        self.last_pivot
    }

    /// Blend configuration applied on every update.
    pub fn config(&self) -> &BlendConfig {
        &self.config
    }
}

impl Motion for FusedTrajectory {
    #[inline]
    fn at(&self, t: f64) -> f64 {
        self.current.at(t)
    }

    #[inline]
    fn d_at(&self, t: f64) -> f64 {
        self.current.d_at(t)
    }

    fn at_into(&self, times: &[f64], out: &mut [f64]) {
        self.current.at_into(times, out);
    }

    fn d_at_into(&self, times: &[f64], out: &mut [f64]) {
        self.current.d_at_into(times, out);
    }
}
