//! # Simple blend
//!
//! Blends two disagreeing quadratic estimates over a two-second window and
//! prints the sampled trajectory next to both parents.
//!
//! Run with `RUST_LOG=debug cargo run --example simple_blend` to see the
//! construction log.

use std::error::Error;

use motion_blend::{BlendedMotion, Motion, PolynomialMotion};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let m1 = PolynomialMotion::new(0.0, [-0.8, 1.0, 0.5])?;
    let m2 = PolynomialMotion::new(1.0, [0.0, 3.0, 5.0])?;

    let now = 2.5;
    let horizon = 2.0;
    let blend = BlendedMotion::new(m1.clone(), m2.clone(), now, horizon)?;

    println!("blend window: [{:.2}, {:.2}]", now, now + horizon);
    println!("transition coefficients: {:?}", blend.transition().coefficients());
    println!();
    println!("{:>6} {:>10} {:>10} {:>10} {:>10}", "t", "motion 1", "motion 2", "blend", "velocity");

    let times: Vec<f64> = (0..=40).map(|i| 0.25 * i as f64).collect();
    let positions = blend.at_all(&times);
    let velocities = blend.d_at_all(&times);
    for (i, &t) in times.iter().enumerate() {
        let marker = match blend.regime(t) {
            motion_blend::Regime::Transition => " *",
            _ => "",
        };
        println!(
            "{:>6.2} {:>10.3} {:>10.3} {:>10.3} {:>10.3}{}",
            t,
            m1.at(t),
            m2.at(t),
            positions[i],
            velocities[i],
            marker
        );
    }
    Ok(())
}
