//! Engine settings from environment.

use std::env;
use std::str::FromStr;

use ssd_core::{DegeneratePolicy, SsdSettings};

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: SsdSettings,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SsdSettings::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<f64>().ok());

        let mut settings = SsdSettings {
            coordinate_decimals: parse_or(
                &lookup,
                "SSD_COORDINATE_DECIMALS",
                defaults.coordinate_decimals,
            ),
            fbz_leg_length_mps: parse_or(
                &lookup,
                "SSD_LEG_LENGTH_MPS",
                defaults.fbz_leg_length_mps,
            ),
            circle_segments: parse_or(&lookup, "SSD_CIRCLE_SEGMENTS", defaults.circle_segments),
            degenerate_policy: lookup("SSD_DEGENERATE_POLICY")
                .and_then(|s| parse_policy(&s))
                .unwrap_or(defaults.degenerate_policy),
            severity: defaults.severity.clone(),
        };

        let severity = &mut settings.severity;
        severity.tlos_horizon_s = parse_or(&lookup, "SSD_TLOS_HORIZON_S", severity.tlos_horizon_s);
        severity.tlos_warning_s = parse_or(&lookup, "SSD_TLOS_WARNING_S", severity.tlos_warning_s);
        severity.tcpa_horizon_s = parse_or(&lookup, "SSD_TCPA_HORIZON_S", severity.tcpa_horizon_s);
        severity.dcpa_critical_m = parsed("SSD_DCPA_CRITICAL_M").or(severity.dcpa_critical_m);
        severity.dcpa_caution_m = parsed("SSD_DCPA_CAUTION_M").or(severity.dcpa_caution_m);

        Self { settings }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_policy(value: &str) -> Option<DegeneratePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "exclude" => Some(DegeneratePolicy::Exclude),
        "block_annulus" | "block-annulus" => Some(DegeneratePolicy::BlockAnnulus),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = config(&[]).settings;
        let defaults = SsdSettings::default();
        assert_eq!(settings.coordinate_decimals, defaults.coordinate_decimals);
        assert_eq!(settings.circle_segments, defaults.circle_segments);
        assert_eq!(settings.degenerate_policy, DegeneratePolicy::Exclude);
        assert!(settings.severity.dcpa_critical_m.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let settings = config(&[
            ("SSD_LEG_LENGTH_MPS", "2500"),
            ("SSD_CIRCLE_SEGMENTS", "128"),
            ("SSD_DEGENERATE_POLICY", "block-annulus"),
            ("SSD_TLOS_WARNING_S", "90"),
            ("SSD_DCPA_CRITICAL_M", "5000"),
        ])
        .settings;

        assert_eq!(settings.fbz_leg_length_mps, 2500.0);
        assert_eq!(settings.circle_segments, 128);
        assert_eq!(settings.degenerate_policy, DegeneratePolicy::BlockAnnulus);
        assert_eq!(settings.severity.tlos_warning_s, 90.0);
        assert_eq!(settings.severity.dcpa_critical_m, Some(5000.0));
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let settings = config(&[
            ("SSD_CIRCLE_SEGMENTS", "lots"),
            ("SSD_DEGENERATE_POLICY", "panic"),
        ])
        .settings;
        assert_eq!(settings.circle_segments, SsdSettings::default().circle_segments);
        assert_eq!(settings.degenerate_policy, DegeneratePolicy::Exclude);
    }
}
