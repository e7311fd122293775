//! Severity classification from CPA metrics.

use serde::{Deserialize, Serialize};

use crate::cpa::CpaMetrics;
use crate::error::{Result, SsdError};
use crate::models::ProtectedZone;

/// Ordered severity of an encounter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// No predicted loss of separation
    #[default]
    None,
    /// Loss of separation predicted within the alerting horizon
    Caution,
    /// Loss of separation predicted soon
    Warning,
    /// Separation lost now or CPA inside the loss radius
    Critical,
}

/// Threshold table for classification.
///
/// `None` distance thresholds fall back to the protected zone radii.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// Finite tlos at or below this promotes to Caution
    pub tlos_horizon_s: f64,
    /// tlos at or below this promotes to Warning
    pub tlos_warning_s: f64,
    /// dcpa promotions only apply to closest approaches within this time
    pub tcpa_horizon_s: f64,
    /// dcpa below this promotes to Critical
    #[serde(default)]
    pub dcpa_critical_m: Option<f64>,
    /// dcpa below this promotes to Caution
    #[serde(default)]
    pub dcpa_caution_m: Option<f64>,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            tlos_horizon_s: 300.0,
            tlos_warning_s: 120.0,
            tcpa_horizon_s: 600.0,
            dcpa_critical_m: None,
            dcpa_caution_m: None,
        }
    }
}

impl SeverityThresholds {
    pub fn validate(&self) -> Result<()> {
        let times = [
            ("tlos_horizon_s", self.tlos_horizon_s),
            ("tlos_warning_s", self.tlos_warning_s),
            ("tcpa_horizon_s", self.tcpa_horizon_s),
        ];
        for (name, value) in times {
            if value.is_nan() || value < 0.0 {
                return Err(SsdError::InvalidConfiguration(format!(
                    "{name} ({value}) must be non-negative"
                )));
            }
        }
        if self.tlos_warning_s > self.tlos_horizon_s {
            return Err(SsdError::InvalidConfiguration(format!(
                "tlos_warning_s ({}) exceeds tlos_horizon_s ({})",
                self.tlos_warning_s, self.tlos_horizon_s
            )));
        }
        for (name, value) in [
            ("dcpa_critical_m", self.dcpa_critical_m),
            ("dcpa_caution_m", self.dcpa_caution_m),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(SsdError::InvalidConfiguration(format!(
                        "{name} ({value}) must be finite and non-negative"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve distance fallbacks against a protected zone.
    pub fn classifier(&self, zone: &ProtectedZone) -> SeverityClassifier {
        SeverityClassifier {
            tlos_horizon_s: self.tlos_horizon_s,
            tlos_warning_s: self.tlos_warning_s,
            tcpa_horizon_s: self.tcpa_horizon_s,
            dcpa_critical_m: self.dcpa_critical_m.unwrap_or_else(|| zone.inner_radius_m()),
            dcpa_caution_m: self.dcpa_caution_m.unwrap_or_else(|| zone.outer_radius_m()),
        }
    }
}

/// Thresholds with every value resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityClassifier {
    pub tlos_horizon_s: f64,
    pub tlos_warning_s: f64,
    pub tcpa_horizon_s: f64,
    pub dcpa_critical_m: f64,
    pub dcpa_caution_m: f64,
}

impl SeverityClassifier {
    /// Map metrics to exactly one level. Infinite sentinels and NaN never
    /// satisfy a threshold, so they fall through to `None`.
    pub fn classify(&self, metrics: &CpaMetrics) -> SeverityLevel {
        let CpaMetrics {
            tcpa_s,
            dcpa_m,
            tlos_s,
            ..
        } = *metrics;
        let cpa_in_horizon = tcpa_s <= self.tcpa_horizon_s;

        if tlos_s == 0.0 || (cpa_in_horizon && dcpa_m < self.dcpa_critical_m) {
            SeverityLevel::Critical
        } else if tlos_s <= self.tlos_warning_s {
            SeverityLevel::Warning
        } else if tlos_s <= self.tlos_horizon_s
            || (cpa_in_horizon && dcpa_m < self.dcpa_caution_m)
        {
            SeverityLevel::Caution
        } else {
            SeverityLevel::None
        }
    }
}
