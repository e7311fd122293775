//! Absolute traffic picture for overview displays.
//!
//! Pure geometry: aircraft positions and velocity vectors in metres plus a
//! square viewing window around all of them.

use serde::Serialize;

use crate::models::{Snapshot, NM_TO_M};
use crate::spatial::Vec2;

/// Padding around the outermost aircraft.
const EXTENT_PADDING_NM: f64 = 15.0;

#[derive(Debug, Clone, Serialize)]
pub struct AircraftMarker {
    pub id: String,
    pub position_m: Vec2,
    pub heading_deg: f64,
    pub ground_speed_kt: f64,
    /// Ground velocity in the north-up frame
    pub velocity_mps: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotExtents {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotExtents {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the shorter axis symmetrically so the window is square.
    fn squared(self) -> Self {
        let (width, height) = (self.width(), self.height());
        if width < height {
            let pad = (height - width) / 2.0;
            Self {
                min_x: self.min_x - pad,
                max_x: self.max_x + pad,
                ..self
            }
        } else {
            let pad = (width - height) / 2.0;
            Self {
                min_y: self.min_y - pad,
                max_y: self.max_y + pad,
                ..self
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrafficOverview {
    pub markers: Vec<AircraftMarker>,
    /// `None` for an empty snapshot
    pub extents: Option<PlotExtents>,
}

impl TrafficOverview {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let markers: Vec<AircraftMarker> = snapshot
            .aircraft
            .iter()
            .map(|aircraft| AircraftMarker {
                id: aircraft.id.clone(),
                position_m: Vec2::new(
                    aircraft.position[0] * NM_TO_M,
                    aircraft.position[1] * NM_TO_M,
                ),
                heading_deg: aircraft.heading_deg,
                ground_speed_kt: aircraft.ground_speed_kt,
                velocity_mps: Vec2::from_bearing(
                    aircraft.heading_deg.to_radians(),
                    aircraft.ground_speed_mps(),
                ),
            })
            .collect();

        let extents = markers.first().map(|first| {
            let padding = EXTENT_PADDING_NM * NM_TO_M;
            let seed = PlotExtents {
                min_x: first.position_m.x,
                max_x: first.position_m.x,
                min_y: first.position_m.y,
                max_y: first.position_m.y,
            };
            let bounds = markers.iter().fold(seed, |acc, m| PlotExtents {
                min_x: acc.min_x.min(m.position_m.x),
                max_x: acc.max_x.max(m.position_m.x),
                min_y: acc.min_y.min(m.position_m.y),
                max_y: acc.max_y.max(m.position_m.y),
            });
            PlotExtents {
                min_x: bounds.min_x - padding,
                max_x: bounds.max_x + padding,
                min_y: bounds.min_y - padding,
                max_y: bounds.max_y + padding,
            }
            .squared()
        });

        Self { markers, extents }
    }
}
