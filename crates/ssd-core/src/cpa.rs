//! Closest-point-of-approach analysis under constant-velocity extrapolation.
//!
//! A pair with zero relative velocity never closes: tcpa and tlos resolve to
//! `f64::INFINITY` and dcpa is the present range. Downstream severity
//! classification treats those sentinels as "no conflict by time".

use serde::{Deserialize, Serialize};

use crate::spatial::Vec2;

/// Relative speeds below this (m²/s²) count as no closure.
const MIN_CLOSURE_SQ: f64 = 1e-12;

/// Time and distance metrics for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpaMetrics {
    /// Seconds to closest approach, clamped at zero
    pub tcpa_s: f64,
    /// Separation at closest approach (m)
    pub dcpa_m: f64,
    /// Seconds until separation drops to the loss radius
    pub tlos_s: f64,
    /// Separation right now (m)
    pub range_m: f64,
}

impl CpaMetrics {
    /// Whether the pair ever closes.
    pub fn is_closing(&self) -> bool {
        self.tcpa_s.is_finite() && self.tcpa_s > 0.0
    }
}

/// Compute tcpa, dcpa and tlos for two aircraft against `loss_radius_m`.
pub fn analyze(
    own_pos: Vec2,
    own_vel: Vec2,
    intruder_pos: Vec2,
    intruder_vel: Vec2,
    loss_radius_m: f64,
) -> CpaMetrics {
    let dp = intruder_pos - own_pos;
    let dv = intruder_vel - own_vel;
    let range_m = dp.norm();
    let closure_sq = dv.norm_sq();

    if closure_sq <= MIN_CLOSURE_SQ {
        return CpaMetrics {
            tcpa_s: f64::INFINITY,
            dcpa_m: range_m,
            tlos_s: if range_m <= loss_radius_m { 0.0 } else { f64::INFINITY },
            range_m,
        };
    }

    // Negative tcpa means the closest point is behind us; use the present.
    let tcpa_s = (-dp.dot(dv) / closure_sq).max(0.0);
    let dcpa_m = (dp + dv * tcpa_s).norm();
    let tlos_s = time_to_radius(dp, dv, loss_radius_m);

    CpaMetrics {
        tcpa_s,
        dcpa_m,
        tlos_s,
        range_m,
    }
}

/// Earliest non-negative t with |dp + dv·t| = radius.
fn time_to_radius(dp: Vec2, dv: Vec2, radius: f64) -> f64 {
    let c = dp.norm_sq() - radius * radius;
    if c <= 0.0 {
        return 0.0;
    }

    let a = dv.norm_sq();
    let b = 2.0 * dp.dot(dv);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return f64::INFINITY;
    }

    // Outside the circle (c > 0) both roots share a sign, so the smaller one
    // decides between "enters ahead" and "entered in the past".
    let root = (-b - discriminant.sqrt()) / (2.0 * a);
    if root >= 0.0 {
        root
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOSS_M: f64 = 9260.0;

    #[test]
    fn test_head_on_closure() {
        // Target 10 nm ahead, both at 250 kt toward each other
        let own_vel = Vec2::new(0.0, 128.6);
        let metrics = analyze(
            Vec2::ZERO,
            own_vel,
            Vec2::new(0.0, 18_520.0),
            Vec2::new(0.0, -128.6),
            LOSS_M,
        );

        assert!((metrics.tcpa_s - 18_520.0 / 257.2).abs() < 1e-6);
        assert!(metrics.dcpa_m < 1e-6);
        assert!((metrics.tlos_s - (18_520.0 - LOSS_M) / 257.2).abs() < 1e-6);
        assert!(metrics.is_closing());
    }

    #[test]
    fn test_identical_state_has_lost_separation() {
        let pos = Vec2::new(100.0, 200.0);
        let vel = Vec2::new(50.0, 50.0);
        let metrics = analyze(pos, vel, pos, vel, LOSS_M);

        assert_eq!(metrics.dcpa_m, 0.0);
        assert_eq!(metrics.tlos_s, 0.0);
        assert!(metrics.tcpa_s.is_infinite());
    }

    #[test]
    fn test_zero_relative_velocity_is_not_a_fault() {
        let vel = Vec2::new(0.0, 128.6);
        let metrics = analyze(Vec2::ZERO, vel, Vec2::new(20_000.0, 0.0), vel, LOSS_M);

        assert!(metrics.tcpa_s.is_infinite());
        assert!(metrics.tlos_s.is_infinite());
        assert!((metrics.dcpa_m - 20_000.0).abs() < 1e-9);
        assert!(!metrics.is_closing());
    }

    #[test]
    fn test_diverging_clamps_tcpa() {
        // Target behind, flying away from us while we fly away from it
        let metrics = analyze(
            Vec2::ZERO,
            Vec2::new(0.0, 128.6),
            Vec2::new(0.0, -37_040.0),
            Vec2::new(0.0, -128.6),
            LOSS_M,
        );

        assert_eq!(metrics.tcpa_s, 0.0);
        assert!((metrics.dcpa_m - 37_040.0).abs() < 1e-9);
        assert!(metrics.tlos_s.is_infinite());
    }

    #[test]
    fn test_near_miss_never_loses_separation() {
        // Passes 12 km abeam at closest approach
        let metrics = analyze(
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::new(12_000.0, 30_000.0),
            Vec2::new(0.0, -200.0),
            LOSS_M,
        );

        assert!((metrics.tcpa_s - 150.0).abs() < 1e-9);
        assert!((metrics.dcpa_m - 12_000.0).abs() < 1e-6);
        assert!(metrics.tlos_s.is_infinite());
    }

    #[test]
    fn test_already_inside_radius() {
        let metrics = analyze(
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            Vec2::new(3000.0, 0.0),
            Vec2::new(0.0, -100.0),
            LOSS_M,
        );
        assert_eq!(metrics.tlos_s, 0.0);
        assert_eq!(metrics.tcpa_s, 0.0);
    }
}
