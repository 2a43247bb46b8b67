// route/adapter.rs

use super::{normalize_route, Route, RoutePlanner, RouteRequest};
use log::{debug, warn};

/// Wraps a [`RoutePlanner`] transport with the crate's failure policy:
/// transport errors and malformed responses both come back as an empty
/// route, never as an error the caller has to branch on.
pub struct RouteAdapter {
    planner: Box<dyn RoutePlanner>,
}

impl RouteAdapter {
    /// Creates an adapter over a transport.
    pub fn new(planner: Box<dyn RoutePlanner>) -> Self {
        RouteAdapter { planner }
    }

    /// Fetches and normalizes a route. Infallible by design.
    pub fn fetch(&mut self, request: &RouteRequest) -> Route {
        match self.planner.plan_route(request) {
            Ok(body) => {
                let route = normalize_route(&body);
                if route.is_empty() {
                    warn!("Routing service returned no usable path");
                } else {
                    debug!(
                        "Route received: {} waypoints, {} instructions",
                        route.waypoints.len(),
                        route.instructions.len()
                    );
                }
                route
            }
            Err(e) => {
                warn!("Routing request failed ({}), continuing without a route", e);
                Route::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::MockRoutePlanner;
    use crate::{Coordinate, DestinationCatalog, MapMateError};
    use serde_json::json;

    fn library_request() -> RouteRequest {
        let destination = DestinationCatalog::campus_default()
            .get("library")
            .unwrap()
            .clone();
        RouteRequest::new(Coordinate::new(980.0, 1000.0), &destination)
    }

    #[test]
    fn transport_error_becomes_empty_route() {
        let mut planner = MockRoutePlanner::new();
        planner
            .expect_plan_route()
            .returning(|_| Err(MapMateError::Route("HTTP 500".to_string())));
        let mut adapter = RouteAdapter::new(Box::new(planner));
        assert!(adapter.fetch(&library_request()).is_empty());
    }

    #[test]
    fn successful_response_is_normalized() {
        let mut planner = MockRoutePlanner::new();
        planner.expect_plan_route().returning(|_| {
            Ok(json!({
                "path_coords": [{"x": 980.0, "y": 1000.0}, {"x": 915.0, "y": 637.0}],
                "instructions": ["Head toward the library"],
            }))
        });
        let mut adapter = RouteAdapter::new(Box::new(planner));
        let route = adapter.fetch(&library_request());
        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.instructions.len(), 1);
    }

    #[test]
    fn request_carries_the_expected_node() {
        let mut planner = MockRoutePlanner::new();
        planner
            .expect_plan_route()
            .withf(|request| request.destination_node.as_deref() == Some("N64"))
            .returning(|_| Ok(json!({"path_coords": []})));
        let mut adapter = RouteAdapter::new(Box::new(planner));
        assert!(adapter.fetch(&library_request()).is_empty());
    }
}
