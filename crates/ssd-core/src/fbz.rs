//! Forbidden beam zone construction.
//!
//! In velocity space the ownship velocities that bring an intruder inside
//! the outer radius form a cone. Its apex is the intruder's own velocity and
//! its legs are tangent to a circle of the outer radius centred on
//! `apex + relative_position`. The cone is truncated at a finite leg length
//! into a triangle so it can take part in polygon booleans.

use geo::{Area, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SsdError};
use crate::spatial::{polygon_from_points, Vec2};

/// Tangent legs this close to perpendicular to the axis would give a
/// collinear (zero-area) wedge.
const MIN_COS_HALF_ANGLE: f64 = 1e-6;
/// Smallest wedge area accepted as well formed (m²/s²).
const MIN_WEDGE_AREA: f64 = 1e-6;
/// Slack applied on top of the minimum covering length.
const LEG_COVER_MARGIN: f64 = 1.05;

/// Triangle apex -> leg 1 -> leg 2 in the ownship velocity frame (m/s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForbiddenBeamZone {
    pub apex: Vec2,
    /// Centre of the tangent circle
    pub offset: Vec2,
    pub leg_ends: [Vec2; 2],
    /// Compass bearing of the cone axis
    pub axis_bearing_rad: f64,
    pub half_angle_rad: f64,
}

impl ForbiddenBeamZone {
    /// Build the wedge for one intruder.
    ///
    /// Fails with `DegenerateInput` when the intruder is already within
    /// `outer_radius_m` or the resulting triangle would be malformed.
    pub fn build(
        intruder_id: &str,
        relative_position: Vec2,
        intruder_velocity: Vec2,
        outer_radius_m: f64,
        leg_length_mps: f64,
    ) -> Result<Self> {
        let distance = relative_position.norm();
        if !distance.is_finite() || distance <= outer_radius_m {
            return Err(SsdError::degenerate(
                intruder_id,
                format!(
                    "range {:.1} m is inside the outer radius {:.1} m",
                    distance, outer_radius_m
                ),
            ));
        }

        let half_angle_rad = (outer_radius_m / distance).asin();
        if half_angle_rad.cos() < MIN_COS_HALF_ANGLE {
            return Err(SsdError::degenerate(
                intruder_id,
                "tangent legs are collinear",
            ));
        }

        let axis_bearing_rad = relative_position.bearing_rad();
        let apex = intruder_velocity;
        let leg_ends = [
            apex + Vec2::from_bearing(axis_bearing_rad - half_angle_rad, leg_length_mps),
            apex + Vec2::from_bearing(axis_bearing_rad + half_angle_rad, leg_length_mps),
        ];

        let zone = Self {
            apex,
            offset: apex + relative_position,
            leg_ends,
            axis_bearing_rad,
            half_angle_rad,
        };
        zone.check_well_formed(intruder_id)?;
        Ok(zone)
    }

    fn check_well_formed(&self, intruder_id: &str) -> Result<()> {
        if !self.vertices().iter().all(|v| v.is_finite()) {
            return Err(SsdError::degenerate(intruder_id, "wedge has non-finite vertices"));
        }
        if self.polygon().unsigned_area() < MIN_WEDGE_AREA {
            return Err(SsdError::degenerate(intruder_id, "wedge has no area"));
        }
        Ok(())
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.apex, self.leg_ends[0], self.leg_ends[1]]
    }

    pub fn polygon(&self) -> Polygon<f64> {
        polygon_from_points(&self.vertices())
    }
}

/// Leg length long enough that the closing chord of the wedge lies beyond
/// every velocity of magnitude `reach_mps`, never shorter than `configured`.
pub fn covering_leg_length(
    configured: f64,
    apex: Vec2,
    reach_mps: f64,
    relative_position: Vec2,
    outer_radius_m: f64,
) -> f64 {
    let distance = relative_position.norm();
    if distance <= outer_radius_m {
        return configured;
    }
    let cos_half = (1.0 - (outer_radius_m / distance).powi(2)).sqrt();
    if cos_half < MIN_COS_HALF_ANGLE {
        return configured;
    }
    configured.max((apex.norm() + reach_mps) / cos_half * LEG_COVER_MARGIN)
}
