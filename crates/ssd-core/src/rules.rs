//! Engine settings for solution-space evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SsdError};
use crate::severity::SeverityThresholds;

/// How a pair that is already inside the outer radius contributes to the
/// forbidden region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Report the pair as Critical with an empty bounded region
    #[default]
    Exclude,
    /// Report the pair as Critical and forbid the whole annulus
    BlockAnnulus,
}

/// Tunables shared by every pair in an evaluation cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsdSettings {
    /// Decimal places kept after the frame transform (input distance units)
    pub coordinate_decimals: u32,
    /// Minimum length of each FBZ leg in m/s
    pub fbz_leg_length_mps: f64,
    /// Vertex count of the polygons approximating the speed circles
    pub circle_segments: usize,
    pub degenerate_policy: DegeneratePolicy,
    pub severity: SeverityThresholds,
}

impl Default for SsdSettings {
    fn default() -> Self {
        Self {
            coordinate_decimals: 2,
            fbz_leg_length_mps: 1000.0,
            circle_segments: 64,
            degenerate_policy: DegeneratePolicy::Exclude,
            severity: SeverityThresholds::default(),
        }
    }
}

impl SsdSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.fbz_leg_length_mps.is_finite() || self.fbz_leg_length_mps <= 0.0 {
            return Err(SsdError::InvalidConfiguration(format!(
                "FBZ leg length ({}) must be positive",
                self.fbz_leg_length_mps
            )));
        }
        if self.circle_segments < 8 {
            return Err(SsdError::InvalidConfiguration(format!(
                "circle segments ({}) must be at least 8",
                self.circle_segments
            )));
        }
        if self.coordinate_decimals > 9 {
            return Err(SsdError::InvalidConfiguration(format!(
                "coordinate decimals ({}) must be at most 9",
                self.coordinate_decimals
            )));
        }
        self.severity.validate()
    }
}
