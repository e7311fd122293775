//! Planar vector math and polygon plumbing for velocity-space geometry.
//!
//! Bearings follow the aviation convention used throughout the crate:
//! 0 rad points along +y (north / straight ahead), increasing clockwise.

use std::f64::consts::TAU;
use std::ops::{Add, Mul, Sub};

use geo::{Area, Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// Polygons smaller than this (m²/s²) are treated as slivers and dropped.
const SLIVER_AREA: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of `magnitude` pointing along a compass bearing.
    pub fn from_bearing(bearing_rad: f64, magnitude: f64) -> Self {
        Self::new(magnitude * bearing_rad.sin(), magnitude * bearing_rad.cos())
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Compass bearing of this vector in [0, 2π).
    pub fn bearing_rad(self) -> f64 {
        self.x.atan2(self.y).rem_euclid(TAU)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Vec2> for Coord<f64> {
    fn from(v: Vec2) -> Self {
        Coord { x: v.x, y: v.y }
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_deg(angle_deg: f64) -> f64 {
    let wrapped = angle_deg % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Regular polygon inscribed in a circle centred on the origin.
pub fn circle_polygon(radius: f64, segments: usize) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = (0..segments)
        .map(|i| {
            let bearing = TAU * i as f64 / segments as f64;
            Vec2::from_bearing(bearing, radius).into()
        })
        .collect();
    Polygon::new(LineString::new(ring), Vec::new())
}

/// Closed polygon through the given vertices.
pub fn polygon_from_points(points: &[Vec2]) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = points.iter().map(|&p| p.into()).collect();
    Polygon::new(LineString::new(ring), Vec::new())
}

/// One closed ring set of a velocity-space region, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityPolygon {
    /// Closed ring, first vertex repeated last
    pub exterior: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interiors: Vec<Vec<[f64; 2]>>,
    pub area: f64,
}

impl From<&Polygon<f64>> for VelocityPolygon {
    fn from(polygon: &Polygon<f64>) -> Self {
        Self {
            exterior: ring_to_arrays(polygon.exterior()),
            interiors: polygon.interiors().iter().map(ring_to_arrays).collect(),
            area: polygon.unsigned_area(),
        }
    }
}

fn ring_to_arrays(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// A possibly empty, possibly disconnected region of velocity space (m/s).
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityRegion {
    shape: MultiPolygon<f64>,
}

impl VelocityRegion {
    pub fn empty() -> Self {
        Self {
            shape: MultiPolygon::new(Vec::new()),
        }
    }

    /// Wrap a boolean-op result, discarding zero-area slivers.
    pub fn from_multi_polygon(shape: MultiPolygon<f64>) -> Self {
        let polygons = shape
            .0
            .into_iter()
            .filter(|p| p.unsigned_area() > SLIVER_AREA)
            .collect();
        Self {
            shape: MultiPolygon::new(polygons),
        }
    }

    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self::from_multi_polygon(MultiPolygon::new(vec![polygon]))
    }

    pub fn is_empty(&self) -> bool {
        self.shape.0.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Number of disjoint polygons in the region.
    pub fn part_count(&self) -> usize {
        self.shape.0.len()
    }

    pub fn contains(&self, velocity: Vec2) -> bool {
        self.shape.contains(&Point::new(velocity.x, velocity.y))
    }

    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    /// Every vertex of every ring.
    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.shape.0.iter().flat_map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors().iter())
                .flat_map(|ring| ring.coords().map(|c| Vec2::new(c.x, c.y)))
        })
    }

    pub fn polygons(&self) -> Vec<VelocityPolygon> {
        self.shape.0.iter().map(VelocityPolygon::from).collect()
    }
}

#[derive(Serialize)]
struct RegionView {
    area: f64,
    polygons: Vec<VelocityPolygon>,
}

impl Serialize for VelocityRegion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RegionView {
            area: self.area(),
            polygons: self.polygons(),
        }
        .serialize(serializer)
    }
}
