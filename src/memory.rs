//! In-process route store.
//!
//! Always available, no external service needed. Used by tests and by
//! embedders that do not need durable storage.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::geometry::Point;
use crate::model::{NewRoute, Route, RouteId};
use crate::traits::{RouteStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    routes: BTreeMap<RouteId, Route>,
    localizations: HashMap<RouteId, Vec<Point>>,
}

/// Mutex-guarded tables; safe to share between threads by reference.
#[derive(Debug, Default)]
pub struct MemoryRouteStore {
    tables: Mutex<Tables>,
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored routes, ordered by id.
    pub fn routes(&self) -> Result<Vec<Route>, StoreError> {
        Ok(self.lock()?.routes.values().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl RouteStore for MemoryRouteStore {
    fn create_route(&self, route: &NewRoute) -> Result<Route, StoreError> {
        route.validate().map_err(StoreError::InvalidRoute)?;

        let mut tables = self.lock()?;
        if tables
            .routes
            .values()
            .any(|existing| existing.description == route.description)
        {
            return Err(StoreError::DuplicateDescription(route.description.clone()));
        }

        tables.next_id += 1;
        let id = RouteId(tables.next_id);
        let stored = route.clone().with_id(id);
        tables.routes.insert(id, stored.clone());
        debug!(%id, name = %stored.name, "route created");
        Ok(stored)
    }

    fn route(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        Ok(self.lock()?.routes.get(&id).cloned())
    }

    fn delete_route(&self, id: RouteId) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.routes.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        let removed = tables.localizations.remove(&id).map_or(0, |points| points.len());
        debug!(%id, localizations = removed, "route deleted");
        Ok(())
    }

    fn add_localizations(&self, id: RouteId, points: &[Point]) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if !tables.routes.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        tables
            .localizations
            .entry(id)
            .or_default()
            .extend_from_slice(points);
        Ok(())
    }

    fn localizations(&self, id: RouteId) -> Result<Vec<Point>, StoreError> {
        let tables = self.lock()?;
        if !tables.routes.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        Ok(tables.localizations.get(&id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_assigned_in_order() {
        let store = MemoryRouteStore::new();
        let a = store.create_route(&NewRoute::new("a", "first", 1.0)).unwrap();
        let b = store.create_route(&NewRoute::new("b", "second", 2.0)).unwrap();
        assert_eq!(a.id, RouteId(1));
        assert_eq!(b.id, RouteId(2));
        assert_eq!(store.routes().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_duplicate_description_rejected() {
        let store = MemoryRouteStore::new();
        store.create_route(&NewRoute::new("a", "same", 1.0)).unwrap();
        let err = store.create_route(&NewRoute::new("b", "same", 2.0)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateDescription(desc) if desc == "same"));
    }

    #[test]
    fn test_invalid_route_rejected() {
        let store = MemoryRouteStore::new();
        let err = store.create_route(&NewRoute::new("", "x", 1.0)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRoute(_)));
        assert!(store.routes().unwrap().is_empty());
    }

    #[test]
    fn test_localizations_require_route() {
        let store = MemoryRouteStore::new();
        let err = store
            .add_localizations(RouteId(42), &[Point::new(0.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(RouteId(42))));
    }

    #[test]
    fn test_localizations_append_in_order() {
        let store = MemoryRouteStore::new();
        let route = store.create_route(&NewRoute::new("a", "b", 1.0)).unwrap();
        store
            .add_localizations(route.id, &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)])
            .unwrap();
        store.add_localizations(route.id, &[Point::new(1.0, 1.0)]).unwrap();
        assert_eq!(
            store.localizations(route.id).unwrap(),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]
        );
    }

    #[test]
    fn test_delete_cascades() {
        let store = MemoryRouteStore::new();
        let route = store.create_route(&NewRoute::new("a", "b", 1.0)).unwrap();
        store.add_localizations(route.id, &[Point::new(0.0, 0.0)]).unwrap();
        store.delete_route(route.id).unwrap();

        assert_eq!(store.route(route.id).unwrap(), None);
        assert!(matches!(
            store.localizations(route.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete_route(route.id), Err(StoreError::NotFound(_))));
    }
}
