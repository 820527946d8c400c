//! Route catalog records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Identifier assigned to a route by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub i64);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    /// Unique across the catalog.
    pub description: String,
    /// Route length in kilometers.
    pub km: f64,
}

/// A route submission, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    pub name: String,
    pub description: String,
    pub km: f64,
}

impl NewRoute {
    pub fn new(name: impl Into<String>, description: impl Into<String>, km: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            km,
        }
    }

    /// Checks the fields a store requires. Returns the reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        if !self.km.is_finite() || self.km < 0.0 {
            return Err(format!("km must be a non-negative number, got {}", self.km));
        }
        Ok(())
    }

    pub fn with_id(self, id: RouteId) -> Route {
        Route {
            id,
            name: self.name,
            description: self.description,
            km: self.km,
        }
    }
}

/// A persisted corner point belonging to a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    pub route_id: RouteId,
    pub x: f64,
    pub z: f64,
}

impl Localization {
    pub fn new(route_id: RouteId, point: Point) -> Self {
        Self {
            route_id,
            x: point.x,
            z: point.z,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.z)
    }
}
