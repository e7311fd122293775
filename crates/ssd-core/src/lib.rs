//! Solution-space-diagram conflict geometry.
//!
//! For an ownship and a static snapshot of surrounding traffic, derives the
//! forbidden beam zone of every intruder in velocity space, clips it to the
//! ownship's achievable-speed annulus, classifies the encounter and merges
//! everything into forbidden and free velocity regions.

pub mod cpa;
pub mod envelope;
pub mod error;
pub mod fbz;
pub mod frame;
pub mod models;
pub mod overview;
pub mod rules;
pub mod severity;
pub mod solution;
pub mod spatial;

pub use cpa::{analyze, CpaMetrics};
pub use envelope::Annulus;
pub use error::{Result, SsdError};
pub use fbz::ForbiddenBeamZone;
pub use frame::{transform, RelativeState};
pub use models::{AircraftState, ProtectedZone, Snapshot, SpeedEnvelope, KTS_TO_MPS, NM_TO_M};
pub use overview::{PlotExtents, TrafficOverview};
pub use rules::{DegeneratePolicy, SsdSettings};
pub use severity::{SeverityClassifier, SeverityLevel, SeverityThresholds};
pub use solution::{
    aggregate, evaluate_ownship, evaluate_snapshot, Aggregate, ConflictGeometry, PairStatus,
    SolutionSpace,
};
pub use spatial::{Vec2, VelocityPolygon, VelocityRegion};
