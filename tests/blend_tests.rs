//! Integration tests for blending, nesting and flattening.
//!
//! Scenarios follow the projectile-fusion use case: three estimates blended
//! one after another, with and without depth bounding.

use approx::assert_relative_eq;
use motion_blend::{
    flatten, prune, BlendConfig, BlendedMotion, FusedTrajectory, Motion, MotionError, MotionNode,
    PolynomialMotion,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn m1() -> PolynomialMotion {
    PolynomialMotion::new(0.0, [-0.8, 1.0, 0.5]).unwrap()
}

fn m2() -> PolynomialMotion {
    PolynomialMotion::new(1.0, [0.0, 3.0, 5.0]).unwrap()
}

fn m3() -> PolynomialMotion {
    PolynomialMotion::new(3.0, [1.2, 5.0, 7.0]).unwrap()
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Two chained blends: m1 → m2 at 2.5, then (m1 → m2) → m3 at 3.5.
fn double_blend(flatten: bool) -> BlendedMotion {
    let config = BlendConfig {
        horizon: 3.0,
        flatten_before: flatten,
        prune_after: flatten,
        ..BlendConfig::default()
    };
    let first = BlendedMotion::with_config(m1(), m2(), 2.5, &config).unwrap();
    BlendedMotion::with_config(first, m3(), 3.5, &config).unwrap()
}

// ── Single blend ─────────────────────────────────────────────────────────────

#[test]
fn test_simple_blend_scenario() {
    let blend = BlendedMotion::new(m1(), m2(), 2.5, 2.0).unwrap();

    assert_eq!(blend.at(2.5), m1().at(2.5));
    assert_eq!(blend.d_at(2.5), m1().d_at(2.5));
    assert_relative_eq!(blend.at(4.5), m2().at(4.5), max_relative = 1e-12);
    assert_relative_eq!(blend.d_at(4.5), m2().d_at(4.5), max_relative = 1e-12);
}

#[test]
fn test_blend_is_c1_across_window() {
    let blend = BlendedMotion::new(m1(), m2(), 2.5, 2.0).unwrap();
    let h = 1e-6;
    // Central difference of position tracks the analytic velocity everywhere,
    // including straddling both seams.
    for t in linspace(0.0, 8.0, 161) {
        let numeric = (blend.at(t + h) - blend.at(t - h)) / (2.0 * h);
        assert!(
            (numeric - blend.d_at(t)).abs() < 1e-3,
            "t = {}: numeric {} vs analytic {}",
            t,
            numeric,
            blend.d_at(t)
        );
    }
}

#[test]
fn test_shared_leaf_in_independent_trees() {
    let shared = MotionNode::from(m2());
    let a = BlendedMotion::new(m1(), shared.clone(), 2.5, 2.0).unwrap();
    let b = BlendedMotion::new(shared.clone(), m3(), 5.0, 1.0).unwrap();
    assert!(a.after().ptr_eq(&shared));
    assert!(b.before().ptr_eq(&shared));
    assert_eq!(a.at(10.0), m2().at(10.0));
    assert_eq!(b.at(4.0), m2().at(4.0));
}

#[test]
fn test_horizon_must_be_positive() {
    for h in [0.0, -2.0, f64::NAN] {
        assert!(matches!(
            BlendedMotion::new(m1(), m2(), 2.5, h),
            Err(MotionError::InvalidHorizon { .. })
        ));
    }
}

#[test]
fn test_vanishing_horizon_meets_both_parents() {
    for h in [1e-1, 1e-3, 1e-5] {
        let blend = BlendedMotion::new(m1(), m2(), 2.5, h).unwrap();
        assert_eq!(blend.at(2.5), m1().at(2.5));
        let end = blend.end_time();
        assert_relative_eq!(blend.at(end), m2().at(end), max_relative = 1e-6);
    }
}

// ── Nesting ─────────────────────────────────────────────────────────────────

#[test]
fn test_nested_blend_boundary_laws() {
    let inner = BlendedMotion::new(m1(), m2(), 2.5, 3.0).unwrap();
    let outer = double_blend(false);

    assert_eq!(outer.at(3.5), inner.at(3.5));
    assert_eq!(outer.d_at(3.5), inner.d_at(3.5));
    assert_relative_eq!(outer.at(6.5), m3().at(6.5), max_relative = 1e-12);
    assert_relative_eq!(outer.d_at(6.5), m3().d_at(6.5), max_relative = 1e-12);
}

#[test]
fn test_deep_nesting_evaluates() {
    let mut node = MotionNode::from(m1());
    for k in 0..64 {
        let estimate = PolynomialMotion::new(0.0, [0.01 * k as f64, 1.0, 0.5]).unwrap();
        node = BlendedMotion::new(node, estimate, 0.1 * k as f64, 0.05).unwrap().into();
    }
    assert_eq!(node.depth(), 65);
    let times = linspace(-1.0, 8.0, 91);
    let batched = node.at_all(&times);
    for (i, &t) in times.iter().enumerate() {
        assert!(batched[i].is_finite());
        assert_eq!(batched[i], node.at(t));
    }
}

// ── Flattening ──────────────────────────────────────────────────────────────

#[test]
fn test_double_blend_flatten_equivalence() {
    let plain = double_blend(false);
    let flat = double_blend(true);

    assert_eq!(MotionNode::from(plain.clone()).depth(), 3);
    assert_eq!(MotionNode::from(flat.clone()).depth(), 2);

    let times = linspace(3.5, 12.0, 200);
    for &t in &times {
        assert_eq!(flat.at(t), plain.at(t), "position differs at t = {}", t);
        assert_eq!(flat.d_at(t), plain.d_at(t), "velocity differs at t = {}", t);
    }
    assert_eq!(flat.at_all(&times), plain.at_all(&times));
    assert_eq!(flat.d_at_all(&times), plain.d_at_all(&times));
}

#[test]
fn test_explicit_flatten_changes_only_history() {
    let first = BlendedMotion::new(m1(), m2(), 2.5, 3.0).unwrap();
    let pivot = 3.5;
    let flat_first = flatten(&first, pivot, 1);

    let plain = BlendedMotion::new(first, m3(), pivot, 3.0).unwrap();
    let flat = BlendedMotion::new(flat_first, m3(), pivot, 3.0).unwrap();

    for t in linspace(pivot, 10.0, 66) {
        assert_eq!(flat.at(t), plain.at(t));
        assert_eq!(flat.d_at(t), plain.d_at(t));
    }
    // History before the pivot is now a straight line, not the quadratic m1.
    assert_ne!(flat.at(0.0), plain.at(0.0));
}

#[test]
fn test_flatten_anchor_inside_ancestor_window() {
    // Anchor 3.0 lies inside the first blend's window [2.5, 5.5].
    let first = BlendedMotion::new(m1(), m2(), 2.5, 3.0).unwrap();
    let flat = flatten(&first, 3.0, 3);
    assert_eq!(flat.at(3.0), first.at(3.0));
    assert_eq!(flat.d_at(3.0), first.d_at(3.0));

    let plain = BlendedMotion::new(first, m3(), 3.0, 1.0).unwrap();
    let flattened = BlendedMotion::new(flat, m3(), 3.0, 1.0).unwrap();
    for t in linspace(3.0, 6.0, 31) {
        assert_eq!(flattened.at(t), plain.at(t));
    }
}

#[test]
fn test_prune_keeps_future_bit_identical() {
    let plain = MotionNode::from(double_blend(false));
    for anchor in [0.0, 2.0, 3.5, 4.0, 6.5, 7.0] {
        let pruned = prune(&plain, anchor);
        assert!(pruned.depth() <= plain.depth());
        for t in linspace(anchor, anchor + 8.0, 81) {
            assert_eq!(pruned.at(t), plain.at(t), "anchor {}, t {}", anchor, t);
            assert_eq!(pruned.d_at(t), plain.d_at(t), "anchor {}, t {}", anchor, t);
        }
    }
}

// ── Real-time fusion ────────────────────────────────────────────────────────

#[test]
fn test_fused_trajectory_matches_unbounded_chain() {
    let estimates: Vec<PolynomialMotion> = (0..40)
        .map(|k| PolynomialMotion::new(0.0, [1.0, 10.0 - 0.02 * k as f64, -4.9]).unwrap())
        .collect();

    let mut bounded = FusedTrajectory::new(estimates[0].clone(), BlendConfig::realtime(0.3));
    let mut unbounded = FusedTrajectory::new(
        estimates[0].clone(),
        BlendConfig {
            horizon: 0.3,
            ..BlendConfig::default()
        },
    );
    for (k, e) in estimates.iter().enumerate().skip(1) {
        let now = 0.05 * k as f64;
        bounded.update(e.clone(), now).unwrap();
        unbounded.update(e.clone(), now).unwrap();
    }

    assert_eq!(bounded.depth(), 2);
    assert_eq!(unbounded.depth(), 40);

    let last = bounded.last_pivot().unwrap();
    for t in linspace(last, last + 2.0, 41) {
        assert_eq!(bounded.at(t), unbounded.at(t));
        assert_eq!(bounded.d_at(t), unbounded.d_at(t));
    }
}
