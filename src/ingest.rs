//! Route ingestion workflow.
//!
//! Validates submitted geometry, runs the corner filter, and hands the
//! retained points to the store handle the caller passes in.

use thiserror::Error;
use tracing::{info, warn};

use crate::corner::{self, CornerThreshold};
use crate::geometry::Point;
use crate::model::{NewRoute, Route, RouteId};
use crate::path::{FilteredRoutePath, PathError, RoutePath};
use crate::traits::{RouteStore, StoreError};

/// Corner threshold the catalog has always applied to submitted routes.
pub const DEFAULT_CORNER_THRESHOLD_DEG: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Minimum deviation (degrees) for an interior point to be stored.
    pub corner_threshold: CornerThreshold,
    /// Paths with at least this many points are filtered on the rayon pool.
    pub parallel_min_points: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            corner_threshold: CornerThreshold(DEFAULT_CORNER_THRESHOLD_DEG),
            parallel_min_points: 10_000,
        }
    }
}

impl IngestOptions {
    pub fn with_threshold(threshold: CornerThreshold) -> Self {
        Self {
            corner_threshold: threshold,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("corner threshold must be a number, got {0}")]
    InvalidThreshold(f64),
}

/// Outcome of ingesting a route's points.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub route_id: RouteId,
    pub submitted: usize,
    pub stored: FilteredRoutePath,
}

/// Creates a route record.
pub fn new_route<S: RouteStore>(store: &S, route: &NewRoute) -> Result<Route, IngestError> {
    let created = store.create_route(route)?;
    info!(id = %created.id, name = %created.name, "route registered");
    Ok(created)
}

/// Filters `points` and stores the corners as localizations of an existing route.
///
/// A path shorter than two points is rejected before the store is touched.
pub fn ingest_localizations<S: RouteStore>(
    store: &S,
    route_id: RouteId,
    points: Vec<Point>,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let path = validate(points, options)?;
    if store.route(route_id)?.is_none() {
        return Err(StoreError::NotFound(route_id).into());
    }
    store_filtered(store, route_id, &path, options)
}

/// Creates a route and stores the corners of its path in one call.
///
/// The path is validated first so a rejected submission leaves no route behind.
pub fn ingest_route<S: RouteStore>(
    store: &S,
    route: &NewRoute,
    points: Vec<Point>,
    options: &IngestOptions,
) -> Result<(Route, IngestReport), IngestError> {
    let path = validate(points, options)?;
    let created = new_route(store, route)?;

    match store_filtered(store, created.id, &path, options) {
        Ok(report) => Ok((created, report)),
        Err(err) => {
            if let Err(cleanup) = store.delete_route(created.id) {
                warn!(id = %created.id, %cleanup, "failed to remove route after ingestion error");
            }
            Err(err)
        }
    }
}

fn validate(points: Vec<Point>, options: &IngestOptions) -> Result<RoutePath, IngestError> {
    let threshold = options.corner_threshold.as_degrees();
    if threshold.is_nan() {
        return Err(IngestError::InvalidThreshold(threshold));
    }
    Ok(RoutePath::new(points)?)
}

fn store_filtered<S: RouteStore>(
    store: &S,
    route_id: RouteId,
    path: &RoutePath,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let filtered = if path.len() >= options.parallel_min_points {
        corner::filter_par(path, options.corner_threshold)
    } else {
        corner::filter(path, options.corner_threshold)
    };

    store.add_localizations(route_id, filtered.points())?;
    info!(
        id = %route_id,
        submitted = path.len(),
        stored = filtered.len(),
        "route localizations stored"
    );

    Ok(IngestReport {
        route_id,
        submitted: path.len(),
        stored: filtered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRouteStore;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_default_options() {
        let options = IngestOptions::default();
        assert_eq!(options.corner_threshold, CornerThreshold(30.0));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let store = MemoryRouteStore::new();
        let options = IngestOptions::with_threshold(CornerThreshold(f64::NAN));
        let result = ingest_route(
            &store,
            &NewRoute::new("a", "b", 1.0),
            pts(&[(0.0, 0.0), (1.0, 0.0)]),
            &options,
        );
        assert!(matches!(result, Err(IngestError::InvalidThreshold(_))));
        assert!(store.routes().unwrap().is_empty());
    }

    #[test]
    fn test_short_path_leaves_no_route() {
        let store = MemoryRouteStore::new();
        let result = ingest_route(
            &store,
            &NewRoute::new("a", "b", 1.0),
            pts(&[(0.0, 0.0)]),
            &IngestOptions::default(),
        );
        assert!(matches!(
            result,
            Err(IngestError::Path(PathError::InvalidInput { len: 1 }))
        ));
        assert!(store.routes().unwrap().is_empty());
    }

    #[test]
    fn test_parallel_path_selected_for_long_input() {
        let store = MemoryRouteStore::new();
        let route = new_route(&store, &NewRoute::new("a", "b", 1.0)).unwrap();
        let options = IngestOptions {
            corner_threshold: CornerThreshold(30.0),
            parallel_min_points: 2,
        };
        let report = ingest_localizations(
            &store,
            route.id,
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)]),
            &options,
        )
        .unwrap();
        assert_eq!(report.stored.len(), 4);
        assert_eq!(store.localizations(route.id).unwrap().len(), 4);
    }
}
