//! Route path representations.
//!
//! A `RoutePath` is the raw trace submitted for a route. A `FilteredRoutePath`
//! is the corner-reduced subsequence that actually gets persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;

/// Minimum number of points in a route path.
pub const MIN_PATH_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("route path must have at least {} points, got {len}", MIN_PATH_POINTS)]
    InvalidInput { len: usize },
}

/// An ordered sequence of at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct RoutePath {
    points: Vec<Point>,
}

impl RoutePath {
    /// Creates a route path, rejecting sequences shorter than two points.
    pub fn new(points: Vec<Point>) -> Result<Self, PathError> {
        if points.len() < MIN_PATH_POINTS {
            return Err(PathError::InvalidInput { len: points.len() });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated path.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl TryFrom<Vec<Point>> for RoutePath {
    type Error = PathError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<RoutePath> for Vec<Point> {
    fn from(path: RoutePath) -> Self {
        path.points
    }
}

/// The retained subsequence of a `RoutePath`.
///
/// `indices[k]` is the position of `points[k]` in the source path. Indices
/// are strictly increasing and always start at 0 and end at `len - 1` of the
/// source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredRoutePath {
    points: Vec<Point>,
    indices: Vec<usize>,
}

impl FilteredRoutePath {
    pub(crate) fn from_indices(source: &[Point], indices: Vec<usize>) -> Self {
        let points = indices.iter().map(|&i| source[i]).collect();
        Self { points, indices }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Source positions of the retained points.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
