//! Corner filtering for route paths.
//!
//! Walks the interior vertices of a path and keeps only those where the path
//! bends by at least the configured threshold. Endpoints are always kept.
//!
//! A vertex that coincides with a neighbor has no defined turn angle. It is
//! dropped, and the next vertex is measured against the last non-degenerate
//! predecessor, so a run of identical points collapses to one.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{self, GeometryError, Point};
use crate::path::{FilteredRoutePath, PathError, RoutePath};

/// Minimum deviation from a straight line (degrees) for a vertex to count as a corner.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct CornerThreshold(pub f64);

impl CornerThreshold {
    pub fn degrees(deg: f64) -> Self {
        Self(deg)
    }

    pub fn as_degrees(self) -> f64 {
        self.0
    }
}

/// An interior vertex together with the point it is measured against.
#[derive(Debug, Clone, Copy)]
struct VertexWindow {
    prev: usize,
    index: usize,
}

/// Filters `path`, keeping endpoints and every corner.
pub fn filter(path: &RoutePath, threshold: CornerThreshold) -> FilteredRoutePath {
    let points = path.points();
    let windows = vertex_windows(points);

    let corners: Vec<usize> = windows
        .iter()
        .filter_map(|window| is_corner(points, *window, threshold).then_some(window.index))
        .collect();

    assemble(points, corners, windows.len(), threshold)
}

/// Same result as [`filter`], with per-vertex angles evaluated on the rayon pool.
pub fn filter_par(path: &RoutePath, threshold: CornerThreshold) -> FilteredRoutePath {
    let points = path.points();
    let windows = vertex_windows(points);

    // Indexed parallel collect keeps source order.
    let corners: Vec<usize> = windows
        .par_iter()
        .filter_map(|window| is_corner(points, *window, threshold).then_some(window.index))
        .collect();

    assemble(points, corners, windows.len(), threshold)
}

/// Validates a raw point slice and filters it.
pub fn filter_points(points: &[Point], threshold: CornerThreshold) -> Result<FilteredRoutePath, PathError> {
    let path = RoutePath::new(points.to_vec())?;
    Ok(filter(&path, threshold))
}

/// Resolves the comparison point for each interior vertex, skipping degenerate ones.
///
/// Only coordinates are compared here, so this stays a cheap sequential pass
/// even when the angles are evaluated in parallel.
fn vertex_windows(points: &[Point]) -> Vec<VertexWindow> {
    let n = points.len();
    let mut windows = Vec::with_capacity(n.saturating_sub(2));
    let mut prev = 0;

    for index in 1..n.saturating_sub(1) {
        match geometry::check_vertex(points[prev], points[index], points[index + 1]) {
            Ok(()) => {
                windows.push(VertexWindow { prev, index });
                prev = index;
            }
            Err(GeometryError::DegenerateSegment { a, b }) => {
                debug!(index, prev, a, b, "degenerate vertex dropped");
            }
        }
    }

    windows
}

fn is_corner(points: &[Point], window: VertexWindow, threshold: CornerThreshold) -> bool {
    let VertexWindow { prev, index } = window;
    // Degenerate vertices never get a window, so the angle is always defined here.
    geometry::deviation_degrees(points[prev], points[index], points[index + 1])
        .is_ok_and(|deviation| deviation >= threshold.0)
}

fn assemble(
    points: &[Point],
    corners: Vec<usize>,
    evaluated: usize,
    threshold: CornerThreshold,
) -> FilteredRoutePath {
    let last = points.len() - 1;
    let mut indices = Vec::with_capacity(corners.len() + 2);
    indices.push(0);
    indices.extend(corners);
    indices.push(last);

    debug!(
        input = points.len(),
        evaluated,
        degenerate = last.saturating_sub(1) - evaluated,
        retained = indices.len(),
        threshold = threshold.0,
        "filtered route path"
    );

    FilteredRoutePath::from_indices(points, indices)
}
