//! Achievable-speed annulus and FBZ bounding.

use geo::{BooleanOps, MultiPolygon};
use serde::Serialize;

use crate::error::{Result, SsdError};
use crate::fbz::ForbiddenBeamZone;
use crate::spatial::{circle_polygon, Vec2, VelocityRegion};

/// Ring of reachable ownship velocities between the minimum and maximum
/// ground speed, centred on the velocity-space origin.
#[derive(Debug, Clone, Serialize)]
pub struct Annulus {
    pub min_speed_mps: f64,
    pub max_speed_mps: f64,
    pub region: VelocityRegion,
}

impl Annulus {
    pub fn new(min_speed_mps: f64, max_speed_mps: f64, segments: usize) -> Result<Self> {
        if !(min_speed_mps >= 0.0 && min_speed_mps < max_speed_mps && max_speed_mps.is_finite()) {
            return Err(SsdError::InvalidConfiguration(format!(
                "annulus needs 0 <= min ({min_speed_mps}) < max ({max_speed_mps})"
            )));
        }

        let outer = MultiPolygon::new(vec![circle_polygon(max_speed_mps, segments)]);
        let shape = if min_speed_mps > 0.0 {
            let inner = MultiPolygon::new(vec![circle_polygon(min_speed_mps, segments)]);
            outer.difference(&inner)
        } else {
            outer
        };

        Ok(Self {
            min_speed_mps,
            max_speed_mps,
            region: VelocityRegion::from_multi_polygon(shape),
        })
    }

    /// Whether a velocity has a reachable magnitude.
    pub fn contains(&self, velocity: Vec2) -> bool {
        let speed = velocity.norm();
        speed >= self.min_speed_mps && speed <= self.max_speed_mps
    }

    pub fn area(&self) -> f64 {
        self.region.area()
    }

    /// Clip a wedge to the reachable velocities. An empty result means no
    /// reachable velocity produces this conflict; it is not an error.
    pub fn bound(&self, zone: &ForbiddenBeamZone) -> VelocityRegion {
        let wedge = MultiPolygon::new(vec![zone.polygon()]);
        VelocityRegion::from_multi_polygon(self.region.as_multi_polygon().intersection(&wedge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const OUTER_M: f64 = 18_520.0;

    fn annulus() -> Annulus {
        Annulus::new(77.16, 180.04, 128).unwrap()
    }

    #[test]
    fn test_annulus_area_matches_ring() {
        let ring = annulus();
        let expected = PI * (180.04f64.powi(2) - 77.16f64.powi(2));
        assert!((ring.area() - expected).abs() / expected < 2e-3);
        assert_eq!(ring.region.part_count(), 1);
    }

    #[test]
    fn test_rejects_inverted_speeds() {
        assert!(Annulus::new(200.0, 100.0, 64).is_err());
        assert!(Annulus::new(-1.0, 100.0, 64).is_err());
    }

    #[test]
    fn test_zero_min_speed_is_full_disk() {
        let disk = Annulus::new(0.0, 100.0, 256).unwrap();
        assert!((disk.area() - PI * 100.0 * 100.0).abs() / (PI * 1e4) < 1e-3);
        assert!(disk.contains(Vec2::ZERO));
    }

    #[test]
    fn test_bounded_wedge_stays_inside_ring() {
        let ring = annulus();
        let zone = ForbiddenBeamZone::build(
            "A",
            Vec2::new(5_000.0, 30_000.0),
            Vec2::new(0.0, -128.6),
            OUTER_M,
            2000.0,
        )
        .unwrap();

        let bounded = ring.bound(&zone);
        assert!(!bounded.is_empty());
        assert!(bounded.area() < ring.area());
        for vertex in bounded.vertices() {
            let speed = vertex.norm();
            assert!(
                speed >= ring.min_speed_mps - 1.0 && speed <= ring.max_speed_mps + 1e-3,
                "vertex {vertex:?} outside ring"
            );
        }
    }

    #[test]
    fn test_wedge_outside_ring_bounds_to_empty() {
        let ring = annulus();
        // Apex far beyond the maximum speed, pointing further away
        let zone = ForbiddenBeamZone::build(
            "A",
            Vec2::new(0.0, 60_000.0),
            Vec2::new(0.0, 900.0),
            OUTER_M,
            500.0,
        )
        .unwrap();

        let bounded = ring.bound(&zone);
        assert!(bounded.is_empty());
        assert_eq!(bounded.area(), 0.0);
    }

    #[test]
    fn test_contains_checks_magnitude() {
        let ring = annulus();
        assert!(ring.contains(Vec2::new(0.0, 128.6)));
        assert!(!ring.contains(Vec2::new(0.0, 50.0)));
        assert!(!ring.contains(Vec2::new(300.0, 0.0)));
    }
}
