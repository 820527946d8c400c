//! Planar geometry primitives for route paths.
//!
//! Everything here is pure: no state, no I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// A 2-D coordinate in the route's planar coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, z): (f64, f64)) -> Self {
        Self { x, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The vertex coincides with one of its neighbors, so the angle is undefined.
    #[error("degenerate segment at vertex (a = {a}, b = {b})")]
    DegenerateSegment { a: f64, b: f64 },
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1.x - p2.x).hypot(p1.z - p2.z)
}

/// Cosine of the angle opposite side `c` in a triangle with sides `a`, `b`, `c`.
///
/// Not clamped: floating-point rounding can push the result slightly outside
/// `[-1, 1]` for near-collinear inputs.
pub fn cosine_from_sides(a: f64, b: f64, c: f64) -> Result<f64, GeometryError> {
    if a == 0.0 || b == 0.0 {
        return Err(GeometryError::DegenerateSegment { a, b });
    }
    // Normalized so squaring cannot overflow for large coordinates.
    let longest = a.max(b).max(c);
    let (a, b, c) = (a / longest, b / longest, c / longest);
    Ok((a * a + b * b - c * c) / (2.0 * a * b))
}

/// Angle in degrees between sides `a` and `b`, via the law of cosines.
pub fn angle_from_sides(a: f64, b: f64, c: f64) -> Result<f64, GeometryError> {
    let cos = cosine_from_sides(a, b, c)?;
    // Degree conversion of acos(-1) can land an ulp above 180. NaN stays NaN.
    Ok(clamp_cosine(cos).acos().to_degrees().clamp(0.0, 180.0))
}

fn clamp_cosine(cos: f64) -> f64 {
    if cos > 1.0 || cos < -1.0 {
        trace!(cos, "cosine outside [-1, 1], clamping");
    }
    cos.clamp(-1.0, 1.0)
}

/// Power of two that brings `m` into `[1, 2)`. Multiplying by it is exact.
fn unit_scale(m: f64) -> f64 {
    let exp = (((m.to_bits() >> 52) & 0x7ff) as i64 - 1023).clamp(-1022, 1022);
    f64::from_bits(((1023 - exp) as u64) << 52)
}

/// Exact answer for a vertex on the line through its neighbors.
///
/// Returns 180 when the path continues straight through `vertex`, 0 when it
/// doubles back, and `None` when the points are not collinear.
fn collinear_angle(prev: Point, vertex: Point, next: Point) -> Option<f64> {
    let (ux, uz) = (vertex.x - prev.x, vertex.z - prev.z);
    let (wx, wz) = (next.x - vertex.x, next.z - vertex.z);
    let s = unit_scale(ux.abs().max(uz.abs()).max(wx.abs()).max(wz.abs()));
    let (ux, uz, wx, wz) = (ux * s, uz * s, wx * s, wz * s);

    if ux * wz - uz * wx != 0.0 {
        return None;
    }
    let dot = ux * wx + uz * wz;
    if dot > 0.0 {
        Some(180.0)
    } else if dot < 0.0 {
        Some(0.0)
    } else {
        None
    }
}

/// Interior angle at `vertex`, in `[0, 180]` degrees.
///
/// 180 means the three points are collinear, 0 means the path reverses
/// on itself at `vertex`.
pub fn turn_angle_degrees(prev: Point, vertex: Point, next: Point) -> Result<f64, GeometryError> {
    let a = distance(prev, vertex);
    let b = distance(vertex, next);
    if a == 0.0 || b == 0.0 {
        return Err(GeometryError::DegenerateSegment { a, b });
    }
    if let Some(angle) = collinear_angle(prev, vertex, next) {
        return Ok(angle);
    }
    angle_from_sides(a, b, distance(prev, next))
}

/// How sharply the path bends at `vertex`: `180 - turn_angle_degrees`.
pub fn deviation_degrees(prev: Point, vertex: Point, next: Point) -> Result<f64, GeometryError> {
    turn_angle_degrees(prev, vertex, next).map(|angle| 180.0 - angle)
}

/// Returns `Err(DegenerateSegment)` if `vertex` coincides with either neighbor.
///
/// Compares coordinates directly; side lengths are only computed for the error.
pub(crate) fn check_vertex(prev: Point, vertex: Point, next: Point) -> Result<(), GeometryError> {
    if prev == vertex || vertex == next {
        return Err(GeometryError::DegenerateSegment {
            a: distance(prev, vertex),
            b: distance(vertex, next),
        });
    }
    Ok(())
}
