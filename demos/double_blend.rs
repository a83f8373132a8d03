//! # Double blend
//!
//! Chains three estimates through two blends, once keeping the full tree and
//! once flattening the history at each pivot. The two trajectories agree
//! exactly from the second pivot on and differ only in the discarded past.

use std::error::Error;

use motion_blend::{BlendConfig, BlendedMotion, Motion, MotionNode, PolynomialMotion};
use tracing_subscriber::EnvFilter;

fn build(flatten: bool) -> Result<MotionNode, Box<dyn Error>> {
    let m1 = PolynomialMotion::new(0.0, [-0.8, 1.0, 0.5])?;
    let m2 = PolynomialMotion::new(1.0, [0.0, 3.0, 5.0])?;
    let m3 = PolynomialMotion::new(3.0, [1.2, 5.0, 7.0])?;

    let config = BlendConfig {
        horizon: 3.0,
        flatten_before: flatten,
        prune_after: flatten,
        ..BlendConfig::default()
    };
    let first = BlendedMotion::with_config(m1, m2, 2.5, &config)?;
    let second = BlendedMotion::with_config(first, m3, 3.5, &config)?;
    Ok(second.into())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let plain = build(false)?;
    let flat = build(true)?;
    println!("tree depth: plain = {}, flattened = {}", plain.depth(), flat.depth());
    println!();
    println!("{:>6} {:>12} {:>12} {:>8}", "t", "plain", "flattened", "equal");

    let times: Vec<f64> = (0..=40).map(|i| 0.25 * i as f64).collect();
    let xs_plain = plain.at_all(&times);
    let xs_flat = flat.at_all(&times);
    for (i, &t) in times.iter().enumerate() {
        println!(
            "{:>6.2} {:>12.4} {:>12.4} {:>8}",
            t,
            xs_plain[i],
            xs_flat[i],
            xs_plain[i] == xs_flat[i]
        );
    }
    Ok(())
}
