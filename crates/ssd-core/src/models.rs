//! Snapshot data models for the SSD engine.
//!
//! Positions, speeds and radii are stored in the units they arrive in
//! (nautical miles, knots, degrees). Metric accessors apply the fixed
//! conversion factors below so every aircraft is converted the same way.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SsdError};

/// Knots to metres per second.
pub const KTS_TO_MPS: f64 = 0.5144;
/// Nautical miles to metres.
pub const NM_TO_M: f64 = 1852.0;

/// State of one aircraft at the snapshot instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    pub id: String,
    /// [east, north] in nautical miles
    pub position: [f64; 2],
    pub ground_speed_kt: f64,
    /// 0 = north, clockwise positive
    pub heading_deg: f64,
}

impl AircraftState {
    pub fn new(
        id: impl Into<String>,
        position: [f64; 2],
        ground_speed_kt: f64,
        heading_deg: f64,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            ground_speed_kt,
            heading_deg,
        }
    }

    pub fn ground_speed_mps(&self) -> f64 {
        self.ground_speed_kt * KTS_TO_MPS
    }

    fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.ground_speed_kt.is_finite()
            && self.heading_deg.is_finite()
    }
}

/// Separation radii shared by every pair in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectedZone {
    /// Loss-of-separation radius
    pub inner_radius_nm: f64,
    /// Alerting radius, used for the tangent construction
    pub outer_radius_nm: f64,
}

impl Default for ProtectedZone {
    fn default() -> Self {
        Self {
            inner_radius_nm: 5.0,
            outer_radius_nm: 10.0,
        }
    }
}

impl ProtectedZone {
    pub fn inner_radius_m(&self) -> f64 {
        self.inner_radius_nm * NM_TO_M
    }

    pub fn outer_radius_m(&self) -> f64 {
        self.outer_radius_nm * NM_TO_M
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.inner_radius_nm.is_finite() && self.outer_radius_nm.is_finite()) {
            return Err(SsdError::InvalidConfiguration(
                "protected zone radii must be finite".to_string(),
            ));
        }
        if self.inner_radius_nm <= 0.0 {
            return Err(SsdError::InvalidConfiguration(format!(
                "inner radius ({} nm) must be positive",
                self.inner_radius_nm
            )));
        }
        if self.inner_radius_nm >= self.outer_radius_nm {
            return Err(SsdError::InvalidConfiguration(format!(
                "inner radius ({} nm) must be less than outer radius ({} nm)",
                self.inner_radius_nm, self.outer_radius_nm
            )));
        }
        Ok(())
    }
}

/// Achievable ground-speed range of the ownship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedEnvelope {
    pub min_speed_kt: f64,
    pub max_speed_kt: f64,
}

impl Default for SpeedEnvelope {
    fn default() -> Self {
        Self {
            min_speed_kt: 150.0,
            max_speed_kt: 350.0,
        }
    }
}

impl SpeedEnvelope {
    pub fn min_speed_mps(&self) -> f64 {
        self.min_speed_kt * KTS_TO_MPS
    }

    pub fn max_speed_mps(&self) -> f64 {
        self.max_speed_kt * KTS_TO_MPS
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_speed_kt.is_finite() && self.max_speed_kt.is_finite()) {
            return Err(SsdError::InvalidConfiguration(
                "speed envelope must be finite".to_string(),
            ));
        }
        if self.min_speed_kt < 0.0 {
            return Err(SsdError::InvalidConfiguration(format!(
                "minimum speed ({} kt) cannot be negative",
                self.min_speed_kt
            )));
        }
        if self.min_speed_kt >= self.max_speed_kt {
            return Err(SsdError::InvalidConfiguration(format!(
                "minimum speed ({} kt) must be less than maximum speed ({} kt)",
                self.min_speed_kt, self.max_speed_kt
            )));
        }
        Ok(())
    }
}

/// A static picture of the traffic at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    pub aircraft: Vec<AircraftState>,
    #[serde(default)]
    pub protected_zone: ProtectedZone,
    #[serde(default)]
    pub speed_envelope: SpeedEnvelope,
}

impl Snapshot {
    pub fn new(
        aircraft: Vec<AircraftState>,
        protected_zone: ProtectedZone,
        speed_envelope: SpeedEnvelope,
    ) -> Self {
        Self {
            captured_at: None,
            aircraft,
            protected_zone,
            speed_envelope,
        }
    }

    /// Decode a snapshot from its JSON representation.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn find(&self, id: &str) -> Option<&AircraftState> {
        self.aircraft.iter().find(|a| a.id == id)
    }

    /// Check zone and envelope configuration, then the aircraft records.
    pub fn validate(&self) -> Result<()> {
        self.protected_zone.validate()?;
        self.speed_envelope.validate()?;

        let mut seen = HashSet::with_capacity(self.aircraft.len());
        for aircraft in &self.aircraft {
            if !seen.insert(aircraft.id.as_str()) {
                return Err(SsdError::InvalidSnapshot(format!(
                    "duplicate aircraft id {}",
                    aircraft.id
                )));
            }
            if !aircraft.is_finite() {
                return Err(SsdError::InvalidSnapshot(format!(
                    "aircraft {} has non-finite state",
                    aircraft.id
                )));
            }
            if aircraft.ground_speed_kt < 0.0 {
                return Err(SsdError::InvalidSnapshot(format!(
                    "aircraft {} has negative ground speed",
                    aircraft.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot::new(
            vec![
                AircraftState::new("MS848", [0.0, 0.0], 250.0, 0.0),
                AircraftState::new("KL204", [10.0, 0.0], 250.0, 270.0),
            ],
            ProtectedZone::default(),
            SpeedEnvelope::default(),
        )
    }

    #[test]
    fn test_metric_accessors() {
        let zone = ProtectedZone::default();
        assert!((zone.inner_radius_m() - 9260.0).abs() < 1e-9);
        assert!((zone.outer_radius_m() - 18_520.0).abs() < 1e-9);

        let aircraft = AircraftState::new("A", [0.0, 0.0], 100.0, 0.0);
        assert!((aircraft.ground_speed_mps() - 51.44).abs() < 1e-9);
    }

    #[test]
    fn test_zone_rejects_inverted_radii() {
        let zone = ProtectedZone {
            inner_radius_nm: 10.0,
            outer_radius_nm: 5.0,
        };
        assert!(matches!(
            zone.validate(),
            Err(SsdError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_envelope_rejects_inverted_speeds() {
        let envelope = SpeedEnvelope {
            min_speed_kt: 300.0,
            max_speed_kt: 300.0,
        };
        assert!(matches!(
            envelope.validate(),
            Err(SsdError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut snapshot = sample();
        snapshot
            .aircraft
            .push(AircraftState::new("MS848", [3.0, 3.0], 200.0, 90.0));
        assert!(matches!(
            snapshot.validate(),
            Err(SsdError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_decode_applies_defaults() {
        let json = r#"{
            "aircraft": [
                {"id": "MS848", "position": [0.0, 0.0], "ground_speed_kt": 250.0, "heading_deg": 0.0}
            ]
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.aircraft.len(), 1);
        assert_eq!(snapshot.protected_zone, ProtectedZone::default());
        assert!(snapshot.captured_at.is_none());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_decode_error_is_reported() {
        let err = Snapshot::from_json("{\"aircraft\": 3}").unwrap_err();
        assert!(matches!(err, SsdError::Decode(_)));
    }
}
