//! # motion-blend
//!
//! Temporal blending of one-dimensional polynomial motion estimates.
//!
//! ---
//!
//! ## One trajectory from many disagreeing estimates
//!
//! A tracker refining a projectile estimate produces a new polynomial every
//! time it learns something. Each estimate is good on its own, but switching
//! from one to the next makes the trajectory jump.
//!
//! **Blending.** A [`BlendedMotion`] follows the old estimate until a pivot
//! time, then a cubic Hermite transition across a short horizon, then the new
//! estimate. Position and velocity match at both seams, so the result is
//! continuous and once differentiable everywhere.
//!
//! **Composition.** A blend is itself a motion, so it can be the old side of
//! the next blend. Trees of any depth evaluate through the same [`Motion`]
//! contract.
//!
//! **Flattening.** Repeated re-blending nests forever. [`flatten()`] collapses
//! the old side into one polynomial that agrees with it at the pivot, and
//! [`prune`] drops subtrees that can no longer be reached. Everything at or
//! after the pivot stays bit-identical.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! estimates → PolynomialMotion ─┐
//!                               ├→ BlendedMotion → (flatten / prune) → BlendedMotion → …
//!             MotionNode ───────┘                                        ↓
//!                                                              at(t), d_at(t)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`motion`] | [`Motion`], [`MotionNode`] | Position/velocity contract; shared tree handle |
//! | [`polynomial`] | [`PolynomialMotion`] | Leaf polynomial in `t − offset` |
//! | [`blend`] | [`BlendedMotion`], [`BlendConfig`] | Cubic Hermite transition and piecewise evaluation |
//! | [`flatten`](mod@flatten) | [`flatten()`], [`prune`] | Depth bounding for real-time re-blending |
//! | [`fusion`] | [`FusedTrajectory`] | Re-blend a trajectory into each new estimate |
//! | [`error`] | [`MotionError`] | Construction failures |
//! | `record` | `MotionRecord` | Serialisable tree description (requires `serde` feature) |
//!
//! ## Example
//!
//! ```rust
//! use motion_blend::{BlendedMotion, Motion, PolynomialMotion};
//!
//! let m1 = PolynomialMotion::new(0.0, [-0.8, 1.0, 0.5])?;
//! let m2 = PolynomialMotion::new(1.0, [0.0, 3.0, 5.0])?;
//! let blend = BlendedMotion::new(m1.clone(), m2.clone(), 2.5, 2.0)?;
//!
//! assert_eq!(blend.at(2.5), m1.at(2.5));
//! assert!((blend.at(4.5) - m2.at(4.5)).abs() < 1e-9);
//! # Ok::<(), motion_blend::MotionError>(())
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `std` feature to link the standard library, `serde` for the `record`
//! module, and `python-ffi` for the PyO3 bindings.
//!
//! ## License
//!
//! Business Source License 1.1. Free for evaluation and non-production use.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod blend;
pub mod error;
pub mod flatten;
pub mod fusion;
pub mod motion;
pub mod polynomial;
#[cfg(feature = "serde")]
pub mod record;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use blend::{hermite_transition, BlendConfig, BlendedMotion, Regime};
pub use error::MotionError;
pub use flatten::{flatten, prune, MAX_FLATTEN_ORDER};
pub use fusion::FusedTrajectory;
pub use motion::{Motion, MotionNode};
pub use polynomial::PolynomialMotion;
