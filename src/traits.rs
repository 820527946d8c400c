//! Persistence seam for the route catalog.
//!
//! The corner filter never talks to storage. Ingestion receives a store handle
//! explicitly and hands it the filtered points.

use thiserror::Error;

use crate::geometry::Point;
use crate::model::{NewRoute, Route, RouteId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("route {0} not found")]
    NotFound(RouteId),
    #[error("a route with description {0:?} already exists")]
    DuplicateDescription(String),
    #[error("invalid route: {0}")]
    InvalidRoute(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Stores routes and their localization points.
///
/// Implementations assign route ids, enforce unique descriptions, and delete a
/// route's localizations together with the route.
pub trait RouteStore {
    fn create_route(&self, route: &NewRoute) -> Result<Route, StoreError>;

    /// Returns `None` if no route has this id.
    fn route(&self, id: RouteId) -> Result<Option<Route>, StoreError>;

    fn delete_route(&self, id: RouteId) -> Result<(), StoreError>;

    /// Appends points to the route's localizations, in order.
    fn add_localizations(&self, id: RouteId, points: &[Point]) -> Result<(), StoreError>;

    fn localizations(&self, id: RouteId) -> Result<Vec<Point>, StoreError>;
}
