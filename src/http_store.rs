//! HTTP adapter for a remote route catalog service.

use reqwest::StatusCode;
use reqwest::blocking::Response;

use crate::geometry::Point;
use crate::model::{NewRoute, Route, RouteId};
use crate::traits::{RouteStore, StoreError};

#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRouteStore {
    config: HttpStoreConfig,
    client: reqwest::blocking::Client,
}

impl HttpRouteStore {
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn routes_url(&self) -> String {
        format!("{}/routes", self.config.base_url.trim_end_matches('/'))
    }

    fn route_url(&self, id: RouteId) -> String {
        format!("{}/{}", self.routes_url(), id)
    }

    fn localizations_url(&self, id: RouteId) -> String {
        format!("{}/localizations", self.route_url(id))
    }
}

/// Maps the catalog service's status codes onto store errors.
fn check(response: Response, id: Option<RouteId>, route: Option<&NewRoute>) -> Result<Response, StoreError> {
    match (response.status(), id, route) {
        (StatusCode::NOT_FOUND, Some(id), _) => Err(StoreError::NotFound(id)),
        (StatusCode::CONFLICT, _, Some(route)) => {
            Err(StoreError::DuplicateDescription(route.description.clone()))
        }
        (StatusCode::UNPROCESSABLE_ENTITY, _, _) => Err(StoreError::InvalidRoute(
            response.text().unwrap_or_default(),
        )),
        _ => Ok(response.error_for_status()?),
    }
}

impl RouteStore for HttpRouteStore {
    fn create_route(&self, route: &NewRoute) -> Result<Route, StoreError> {
        route.validate().map_err(StoreError::InvalidRoute)?;

        let response = self.client.post(self.routes_url()).json(route).send()?;
        Ok(check(response, None, Some(route))?.json::<Route>()?)
    }

    fn route(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        let response = self.client.get(self.route_url(id)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json::<Route>()?))
    }

    fn delete_route(&self, id: RouteId) -> Result<(), StoreError> {
        let response = self.client.delete(self.route_url(id)).send()?;
        check(response, Some(id), None)?;
        Ok(())
    }

    fn add_localizations(&self, id: RouteId, points: &[Point]) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.localizations_url(id))
            .json(points)
            .send()?;
        check(response, Some(id), None)?;
        Ok(())
    }

    fn localizations(&self, id: RouteId) -> Result<Vec<Point>, StoreError> {
        let response = self.client.get(self.localizations_url(id)).send()?;
        Ok(check(response, Some(id), None)?.json::<Vec<Point>>()?)
    }
}
