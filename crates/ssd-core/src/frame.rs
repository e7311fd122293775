//! Unit conversion and ownship-centred frame transform.
//!
//! Every intruder is translated so the ownship sits at the origin and
//! rotated so the ownship heading points along +y. Rotated coordinates are
//! rounded before conversion to metres; near-degenerate tangent geometry
//! downstream depends on that rounding.

use serde::{Deserialize, Serialize};

use crate::models::{AircraftState, NM_TO_M};
use crate::spatial::{normalize_deg, round_to, Vec2};

/// An aircraft expressed in the ownship's heading-aligned metric frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeState {
    pub id: String,
    pub position_m: Vec2,
    pub velocity_mps: Vec2,
    /// Heading relative to the ownship heading, in [0, 360)
    pub relative_heading_deg: f64,
    pub ground_speed_mps: f64,
}

/// The ownship in its own frame: at the origin, flying straight ahead.
pub fn ownship_state(ownship: &AircraftState) -> RelativeState {
    let speed = ownship.ground_speed_mps();
    RelativeState {
        id: ownship.id.clone(),
        position_m: Vec2::ZERO,
        velocity_mps: Vec2::new(0.0, speed),
        relative_heading_deg: 0.0,
        ground_speed_mps: speed,
    }
}

/// Express one aircraft relative to the ownship.
pub fn relative_to(ownship: &AircraftState, other: &AircraftState, decimals: u32) -> RelativeState {
    let heading = ownship.heading_deg.to_radians();
    let (sin_h, cos_h) = heading.sin_cos();

    let dx = other.position[0] - ownship.position[0];
    let dy = other.position[1] - ownship.position[1];
    let rx = round_to(dx * cos_h - dy * sin_h, decimals);
    let ry = round_to(dx * sin_h + dy * cos_h, decimals);

    let relative_heading_deg = normalize_deg(other.heading_deg - ownship.heading_deg);
    let speed = other.ground_speed_mps();

    RelativeState {
        id: other.id.clone(),
        position_m: Vec2::new(rx * NM_TO_M, ry * NM_TO_M),
        velocity_mps: Vec2::from_bearing(relative_heading_deg.to_radians(), speed),
        relative_heading_deg,
        ground_speed_mps: speed,
    }
}

/// Transform every aircraft other than the ownship, preserving input order.
pub fn transform(
    ownship: &AircraftState,
    others: &[AircraftState],
    decimals: u32,
) -> Vec<RelativeState> {
    others
        .iter()
        .filter(|other| other.id != ownship.id)
        .map(|other| relative_to(ownship, other, decimals))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic() -> Vec<AircraftState> {
        vec![
            AircraftState::new("OWN", [12.0, -4.0], 250.0, 37.0),
            AircraftState::new("A", [20.5, 3.25], 300.0, 200.0),
            AircraftState::new("B", [-7.0, 15.0], 180.0, 10.0),
            AircraftState::new("C", [12.0, 30.0], 420.0, 355.0),
        ]
    }

    #[test]
    fn test_ownship_is_excluded() {
        let traffic = traffic();
        let relative = transform(&traffic[0], &traffic, 2);
        assert_eq!(relative.len(), 3);
        assert!(relative.iter().all(|r| r.id != "OWN"));
    }

    #[test]
    fn test_transform_preserves_range() {
        let traffic = traffic();
        let own = &traffic[0];
        for other in &traffic[1..] {
            let rel = relative_to(own, other, 2);
            let dx = other.position[0] - own.position[0];
            let dy = other.position[1] - own.position[1];
            let range_nm = dx.hypot(dy);
            let transformed_nm = rel.position_m.norm() / NM_TO_M;
            assert!(
                (range_nm - transformed_nm).abs() <= 0.01,
                "range changed for {}: {range_nm} vs {transformed_nm}",
                other.id
            );
        }
    }

    #[test]
    fn test_intruder_east_is_ahead_when_heading_east() {
        let own = AircraftState::new("OWN", [0.0, 0.0], 250.0, 90.0);
        let intruder = AircraftState::new("A", [10.0, 0.0], 250.0, 270.0);
        let rel = relative_to(&own, &intruder, 2);

        assert!(rel.position_m.x.abs() < 1e-9);
        assert!((rel.position_m.y - 10.0 * NM_TO_M).abs() < 1e-9);
        assert_eq!(rel.relative_heading_deg, 180.0);
        // Intruder flies straight at the ownship
        assert!(rel.velocity_mps.y < 0.0);
        assert!(rel.velocity_mps.x.abs() < 1e-9);
    }

    #[test]
    fn test_full_turn_heading_is_identity() {
        let intruder = AircraftState::new("A", [3.3, -8.1], 275.0, 123.0);
        let north = AircraftState::new("OWN", [1.0, 1.0], 250.0, 0.0);
        let full_turn = AircraftState::new("OWN", [1.0, 1.0], 250.0, 360.0);

        let a = relative_to(&north, &intruder, 2);
        let b = relative_to(&full_turn, &intruder, 2);
        assert!((a.position_m - b.position_m).norm() < 1e-6);
        assert!((a.velocity_mps - b.velocity_mps).norm() < 1e-6);
        assert!((a.relative_heading_deg - b.relative_heading_deg).abs() < 1e-9);
    }

    #[test]
    fn test_relative_heading_wraps_negative() {
        let own = AircraftState::new("OWN", [0.0, 0.0], 250.0, 270.0);
        let intruder = AircraftState::new("A", [5.0, 5.0], 250.0, 90.0);
        let rel = relative_to(&own, &intruder, 2);
        assert_eq!(rel.relative_heading_deg, 180.0);

        let intruder = AircraftState::new("A", [5.0, 5.0], 250.0, 10.0);
        let rel = relative_to(&own, &intruder, 2);
        assert_eq!(rel.relative_heading_deg, 100.0);
    }

    #[test]
    fn test_coordinates_are_rounded_before_conversion() {
        let own = AircraftState::new("OWN", [0.0, 0.0], 250.0, 0.0);
        let intruder = AircraftState::new("A", [0.123456, 20.987654], 250.0, 180.0);

        let rel = relative_to(&own, &intruder, 2);
        assert!((rel.position_m.x - 0.12 * NM_TO_M).abs() < 1e-9);
        assert!((rel.position_m.y - 20.99 * NM_TO_M).abs() < 1e-9);

        let fine = relative_to(&own, &intruder, 4);
        assert!((fine.position_m.x - 0.1235 * NM_TO_M).abs() < 1e-9);
    }

    #[test]
    fn test_ownship_state_flies_along_y() {
        let own = AircraftState::new("OWN", [4.0, 4.0], 100.0, 213.0);
        let state = ownship_state(&own);
        assert_eq!(state.position_m, Vec2::ZERO);
        assert!((state.velocity_mps.y - 51.44).abs() < 1e-9);
        assert_eq!(state.velocity_mps.x, 0.0);
    }
}
