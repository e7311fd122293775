//! Solution-space aggregation and the per-snapshot evaluation driver.
//!
//! Each evaluation cycle is a pure function of one snapshot: pairs are
//! evaluated independently (in parallel), then every bounded FBZ for an
//! ownship is merged into the forbidden union and the free region.

use chrono::{DateTime, Utc};
use geo::{BooleanOps, MultiPolygon};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cpa::{self, CpaMetrics};
use crate::envelope::Annulus;
use crate::error::{Result, SsdError};
use crate::fbz::{covering_leg_length, ForbiddenBeamZone};
use crate::frame::{self, RelativeState};
use crate::models::{AircraftState, Snapshot};
use crate::rules::{DegeneratePolicy, SsdSettings};
use crate::severity::{SeverityClassifier, SeverityLevel};
use crate::spatial::{Vec2, VelocityRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    /// Wedge built and bounded normally
    Evaluated,
    /// Intruder already inside the outer radius; no wedge exists
    AlreadyConflicting,
}

/// Geometry and severity for one ownship–intruder pair.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictGeometry {
    pub intruder_id: String,
    pub status: PairStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbz: Option<ForbiddenBeamZone>,
    /// Wedge clipped to the annulus; may be empty
    pub bounded: VelocityRegion,
    pub metrics: CpaMetrics,
    pub severity: SeverityLevel,
    /// Whether the ownship's present velocity lies in `bounded`
    pub blocks_current_velocity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degenerate_reason: Option<String>,
}

/// Forbidden union and free region of one ownship.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregate {
    pub forbidden: VelocityRegion,
    pub free: VelocityRegion,
}

/// Everything the renderer needs for one ownship.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionSpace {
    pub ownship_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    /// Present ownship velocity in its own frame
    pub own_velocity: Vec2,
    pub annulus: Annulus,
    pub conflicts: Vec<ConflictGeometry>,
    pub forbidden: VelocityRegion,
    pub free: VelocityRegion,
    pub max_severity: SeverityLevel,
    pub current_velocity_conflicting: bool,
}

impl SolutionSpace {
    pub fn conflict(&self, intruder_id: &str) -> Option<&ConflictGeometry> {
        self.conflicts.iter().find(|c| c.intruder_id == intruder_id)
    }

    /// Share of the annulus that is conflict free, in [0, 1].
    pub fn free_fraction(&self) -> f64 {
        let total = self.annulus.area();
        if total <= 0.0 {
            return 0.0;
        }
        (self.free.area() / total).clamp(0.0, 1.0)
    }

    /// True when no reachable velocity is conflict free.
    pub fn is_boxed_in(&self) -> bool {
        self.free.is_empty()
    }
}

/// Union every bounded region and subtract it from the annulus.
///
/// Empty regions are skipped; the union is order independent up to vertex
/// ordering.
pub fn aggregate<'a>(
    annulus: &Annulus,
    bounded: impl IntoIterator<Item = &'a VelocityRegion>,
) -> Aggregate {
    let mut union: Option<MultiPolygon<f64>> = None;
    for region in bounded.into_iter().filter(|r| !r.is_empty()) {
        union = Some(match union {
            Some(acc) => acc.union(region.as_multi_polygon()),
            None => region.as_multi_polygon().clone(),
        });
    }

    match union {
        Some(union) => {
            let free = annulus.region.as_multi_polygon().difference(&union);
            Aggregate {
                forbidden: VelocityRegion::from_multi_polygon(union),
                free: VelocityRegion::from_multi_polygon(free),
            }
        }
        None => Aggregate {
            forbidden: VelocityRegion::empty(),
            free: annulus.region.clone(),
        },
    }
}

/// Shared read-only inputs for one ownship's pair evaluations.
struct PairContext<'a> {
    own_velocity: Vec2,
    annulus: &'a Annulus,
    classifier: SeverityClassifier,
    settings: &'a SsdSettings,
    inner_radius_m: f64,
    outer_radius_m: f64,
}

impl PairContext<'_> {
    fn evaluate(&self, intruder: &RelativeState) -> ConflictGeometry {
        let metrics = cpa::analyze(
            Vec2::ZERO,
            self.own_velocity,
            intruder.position_m,
            intruder.velocity_mps,
            self.inner_radius_m,
        );
        let leg_length = covering_leg_length(
            self.settings.fbz_leg_length_mps,
            intruder.velocity_mps,
            self.annulus.max_speed_mps,
            intruder.position_m,
            self.outer_radius_m,
        );

        match ForbiddenBeamZone::build(
            &intruder.id,
            intruder.position_m,
            intruder.velocity_mps,
            self.outer_radius_m,
            leg_length,
        ) {
            Ok(fbz) => {
                let bounded = self.annulus.bound(&fbz);
                let severity = self.classifier.classify(&metrics);
                tracing::debug!(
                    "pair -> {}: tcpa={:.1}s dcpa={:.0}m tlos={:.1}s severity={:?} bounded_area={:.1}",
                    intruder.id,
                    metrics.tcpa_s,
                    metrics.dcpa_m,
                    metrics.tlos_s,
                    severity,
                    bounded.area()
                );
                ConflictGeometry {
                    intruder_id: intruder.id.clone(),
                    status: PairStatus::Evaluated,
                    fbz: Some(fbz),
                    blocks_current_velocity: bounded.contains(self.own_velocity),
                    bounded,
                    metrics,
                    severity,
                    degenerate_reason: None,
                }
            }
            Err(err) => {
                tracing::warn!("{}; treating pair as already conflicting", err);
                let bounded = match self.settings.degenerate_policy {
                    DegeneratePolicy::Exclude => VelocityRegion::empty(),
                    DegeneratePolicy::BlockAnnulus => self.annulus.region.clone(),
                };
                let reason = match err {
                    SsdError::DegenerateInput { reason, .. } => reason,
                    other => other.to_string(),
                };
                ConflictGeometry {
                    intruder_id: intruder.id.clone(),
                    status: PairStatus::AlreadyConflicting,
                    fbz: None,
                    blocks_current_velocity: bounded.contains(self.own_velocity),
                    bounded,
                    metrics,
                    severity: SeverityLevel::Critical,
                    degenerate_reason: Some(reason),
                }
            }
        }
    }
}

fn check_cycle(snapshot: &Snapshot, settings: &SsdSettings) -> Result<Annulus> {
    settings.validate()?;
    snapshot.validate()?;
    Annulus::new(
        snapshot.speed_envelope.min_speed_mps(),
        snapshot.speed_envelope.max_speed_mps(),
        settings.circle_segments,
    )
}

fn evaluate_validated(
    snapshot: &Snapshot,
    ownship: &AircraftState,
    annulus: &Annulus,
    settings: &SsdSettings,
) -> SolutionSpace {
    let own = frame::ownship_state(ownship);
    let intruders = frame::transform(ownship, &snapshot.aircraft, settings.coordinate_decimals);
    tracing::info!(
        "Evaluating solution space for {} against {} intruder(s)",
        ownship.id,
        intruders.len()
    );

    let context = PairContext {
        own_velocity: own.velocity_mps,
        annulus,
        classifier: settings.severity.classifier(&snapshot.protected_zone),
        settings,
        inner_radius_m: snapshot.protected_zone.inner_radius_m(),
        outer_radius_m: snapshot.protected_zone.outer_radius_m(),
    };

    // Barrier: every pair completes before aggregation.
    let conflicts: Vec<ConflictGeometry> = intruders
        .par_iter()
        .map(|intruder| context.evaluate(intruder))
        .collect();

    let Aggregate { forbidden, free } = aggregate(annulus, conflicts.iter().map(|c| &c.bounded));
    let max_severity = conflicts
        .iter()
        .map(|c| c.severity)
        .max()
        .unwrap_or_default();

    SolutionSpace {
        ownship_id: ownship.id.clone(),
        captured_at: snapshot.captured_at,
        own_velocity: own.velocity_mps,
        current_velocity_conflicting: forbidden.contains(own.velocity_mps),
        annulus: annulus.clone(),
        conflicts,
        forbidden,
        free,
        max_severity,
    }
}

/// Evaluate the solution space of one ownship.
///
/// Configuration and snapshot problems fail before any pair is evaluated;
/// degenerate pairs are recovered individually.
pub fn evaluate_ownship(
    snapshot: &Snapshot,
    ownship_id: &str,
    settings: &SsdSettings,
) -> Result<SolutionSpace> {
    let annulus = check_cycle(snapshot, settings)?;
    let ownship = snapshot
        .find(ownship_id)
        .ok_or_else(|| SsdError::UnknownAircraft(ownship_id.to_string()))?;
    Ok(evaluate_validated(snapshot, ownship, &annulus, settings))
}

/// Evaluate every aircraft in the snapshot as ownship, in snapshot order.
pub fn evaluate_snapshot(
    snapshot: &Snapshot,
    settings: &SsdSettings,
) -> Result<Vec<SolutionSpace>> {
    let annulus = check_cycle(snapshot, settings)?;
    Ok(snapshot
        .aircraft
        .par_iter()
        .map(|ownship| evaluate_validated(snapshot, ownship, &annulus, settings))
        .collect())
}
