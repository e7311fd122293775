//! Pre-defined traffic encounters for demos and smoke tests.
//!
//! Every scenario puts the ownship `OWN` at the origin flying north at
//! 250 kt inside the default 5/10 nm zone and 150-350 kt envelope.

use clap::ValueEnum;
use ssd_core::{
    AircraftState, DegeneratePolicy, ProtectedZone, Snapshot, SpeedEnvelope, SsdSettings,
};

pub const OWNSHIP_ID: &str = "OWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    HeadOn,
    Diverging,
    Crossing,
    BoxedIn,
}

/// A named snapshot plus the settings it is meant to run with.
pub struct Scenario {
    pub name: String,
    pub snapshot: Snapshot,
    pub settings: SsdSettings,
}

impl Scenario {
    pub fn build(kind: ScenarioKind, settings: SsdSettings) -> Self {
        match kind {
            ScenarioKind::HeadOn => create_head_on_scenario(settings),
            ScenarioKind::Diverging => create_diverging_scenario(settings),
            ScenarioKind::Crossing => create_crossing_scenario(settings),
            ScenarioKind::BoxedIn => create_boxed_in_scenario(settings),
        }
    }
}

fn ownship() -> AircraftState {
    AircraftState::new(OWNSHIP_ID, [0.0, 0.0], 250.0, 0.0)
}

fn snapshot(intruders: Vec<AircraftState>) -> Snapshot {
    let mut aircraft = vec![ownship()];
    aircraft.extend(intruders);
    Snapshot::new(aircraft, ProtectedZone::default(), SpeedEnvelope::default())
}

/// Reciprocal traffic 20 nm dead ahead.
pub fn create_head_on_scenario(settings: SsdSettings) -> Scenario {
    Scenario {
        name: "head-on".to_string(),
        snapshot: snapshot(vec![AircraftState::new("KL204", [0.0, 20.0], 250.0, 180.0)]),
        settings,
    }
}

/// Traffic behind the ownship, flying away from it.
pub fn create_diverging_scenario(settings: SsdSettings) -> Scenario {
    Scenario {
        name: "diverging".to_string(),
        snapshot: snapshot(vec![AircraftState::new("BA117", [0.0, -20.0], 250.0, 180.0)]),
        settings,
    }
}

/// Westbound traffic from the right, both aircraft arriving at the same
/// point 20 nm ahead at the same time.
pub fn create_crossing_scenario(settings: SsdSettings) -> Scenario {
    Scenario {
        name: "crossing".to_string(),
        snapshot: snapshot(vec![AircraftState::new("AF332", [20.0, 20.0], 250.0, 270.0)]),
        settings,
    }
}

/// Two aircraft already inside the outer radius with the annulus blocked
/// for such pairs; nothing reachable is conflict free.
pub fn create_boxed_in_scenario(settings: SsdSettings) -> Scenario {
    Scenario {
        name: "boxed-in".to_string(),
        snapshot: snapshot(vec![
            AircraftState::new("LH410", [0.0, 8.0], 250.0, 180.0),
            AircraftState::new("EZY19", [-6.0, -4.0], 220.0, 45.0),
        ]),
        settings: SsdSettings {
            degenerate_policy: DegeneratePolicy::BlockAnnulus,
            ..settings
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssd_core::{evaluate_ownship, PairStatus, SeverityLevel};

    fn run(kind: ScenarioKind) -> ssd_core::SolutionSpace {
        let scenario = Scenario::build(kind, SsdSettings::default());
        evaluate_ownship(&scenario.snapshot, OWNSHIP_ID, &scenario.settings).unwrap()
    }

    #[test]
    fn test_head_on_is_critical() {
        let space = run(ScenarioKind::HeadOn);
        assert_eq!(space.max_severity, SeverityLevel::Critical);
        assert!(space.current_velocity_conflicting);
        assert!(!space.is_boxed_in());
    }

    #[test]
    fn test_diverging_is_clear() {
        let space = run(ScenarioKind::Diverging);
        assert_eq!(space.max_severity, SeverityLevel::None);
        assert!(!space.current_velocity_conflicting);
    }

    #[test]
    fn test_crossing_collides_at_common_point() {
        let space = run(ScenarioKind::Crossing);
        let pair = space.conflict("AF332").unwrap();
        assert!(pair.metrics.dcpa_m < 1.0);
        assert!(pair.metrics.tcpa_s > 0.0 && pair.metrics.tcpa_s < 300.0);
        assert_eq!(pair.severity, SeverityLevel::Critical);
        assert!(pair.blocks_current_velocity);
    }

    #[test]
    fn test_boxed_in_leaves_no_free_velocity() {
        let space = run(ScenarioKind::BoxedIn);
        assert!(space
            .conflicts
            .iter()
            .all(|c| c.status == PairStatus::AlreadyConflicting));
        assert!(space.is_boxed_in());
        assert_eq!(space.free_fraction(), 0.0);
    }
}
