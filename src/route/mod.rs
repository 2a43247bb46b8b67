// route/mod.rs

// Adapter around the external routing service. The service itself (graph
// pathfinding over the campus map) lives in the backend; this module owns
// the request shape, response normalization, and the failure policy: any
// transport error or malformed response degrades to an empty route, and the
// tracker then falls back to the destination's own waypoints.

mod adapter;

pub use adapter::RouteAdapter;

use crate::catalog::Destination;
use crate::geometry::Coordinate;
use crate::MapMateError;
use serde::Serialize;
use serde_json::Value;

/// Request body for the routing service's `/navigate` endpoint.
///
/// Start is always given as local coordinates; the destination is addressed
/// by graph node when the catalog knows one, otherwise by coordinates.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RouteRequest {
    /// Start x in the local frame
    pub start_x: f64,
    /// Start y in the local frame
    pub start_y: f64,
    /// Destination graph node, preferred when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_node: Option<String>,
    /// Destination x, sent when no node is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_x: Option<f64>,
    /// Destination y, sent when no node is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_y: Option<f64>,
}

impl RouteRequest {
    /// Builds the request for a start point and a catalog destination.
    pub fn new(start: Coordinate, destination: &Destination) -> Self {
        match &destination.node_id {
            Some(node) => RouteRequest {
                start_x: start.x,
                start_y: start.y,
                destination_node: Some(node.clone()),
                destination_x: None,
                destination_y: None,
            },
            None => RouteRequest {
                start_x: start.x,
                start_y: start.y,
                destination_node: None,
                destination_x: Some(destination.coordinate.x),
                destination_y: Some(destination.coordinate.y),
            },
        }
    }
}

/// A normalized route: ordered waypoints plus optional turn instructions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    /// Ordered path through the local frame, possibly empty
    pub waypoints: Vec<Coordinate>,
    /// Human-readable turn instructions, possibly empty
    pub instructions: Vec<String>,
    /// Total route length as reported by the service
    pub distance: Option<f64>,
}

impl Route {
    /// The "no route" value every failure path collapses to.
    pub fn empty() -> Self {
        Route::default()
    }

    /// True when the service produced no usable path.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Transport seam to the routing service.
///
/// Implementations perform the POST and hand back the raw JSON body; the
/// adapter owns normalization so every transport shares one failure policy.
#[cfg_attr(test, mockall::automock)]
pub trait RoutePlanner {
    /// Requests a path for `request`, returning the raw response body.
    fn plan_route(&mut self, request: &RouteRequest) -> Result<Value, MapMateError>;
}

/// Normalizes a raw routing response into a [`Route`].
///
/// The backend has answered with `path_coords`, `waypoints`, and `path` over
/// its lifetime; all three are accepted. A missing or non-array path field
/// means "no route", and entries without finite numeric x/y are dropped.
pub fn normalize_route(body: &Value) -> Route {
    let coords = body
        .get("path_coords")
        .or_else(|| body.get("waypoints"))
        .or_else(|| body.get("path"));

    let waypoints = match coords.and_then(Value::as_array) {
        Some(points) => points.iter().filter_map(parse_point).collect(),
        None => Vec::new(),
    };

    let instructions = body
        .get("instructions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Route {
        waypoints,
        instructions,
        distance: body.get("distance").and_then(Value::as_f64),
    }
}

fn parse_point(value: &Value) -> Option<Coordinate> {
    let x = value.get("x").and_then(Value::as_f64)?;
    let y = value.get("y").and_then(Value::as_f64)?;
    let point = Coordinate::new(x, y);
    point.is_finite().then_some(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_prefers_destination_node() {
        let destination = crate::DestinationCatalog::campus_default()
            .get("library")
            .unwrap()
            .clone();
        let request = RouteRequest::new(Coordinate::new(980.0, 1000.0), &destination);
        assert_eq!(request.destination_node.as_deref(), Some("N64"));
        assert_eq!(request.destination_x, None);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["start_x"], json!(980.0));
        assert_eq!(body["destination_node"], json!("N64"));
        assert!(body.get("destination_x").is_none());
    }

    #[test]
    fn request_uses_coordinates_without_node() {
        let mut destination = crate::DestinationCatalog::campus_default()
            .get("library")
            .unwrap()
            .clone();
        destination.node_id = None;
        let request = RouteRequest::new(Coordinate::new(0.0, 0.0), &destination);
        assert_eq!(request.destination_node, None);
        assert_eq!(request.destination_x, Some(915.0));
        assert_eq!(request.destination_y, Some(637.0));
    }

    #[test]
    fn normalize_accepts_path_coords() {
        let body = json!({
            "path_coords": [{"x": 1.0, "y": 2.0}, {"x": 3.0, "y": 4.0}],
            "instructions": ["Head north", "Arrive"],
            "distance": 12.5,
        });
        let route = normalize_route(&body);
        assert_eq!(
            route.waypoints,
            vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]
        );
        assert_eq!(route.instructions, vec!["Head north", "Arrive"]);
        assert_eq!(route.distance, Some(12.5));
    }

    #[test]
    fn normalize_accepts_legacy_field_names() {
        let waypoints = json!({ "waypoints": [{"x": 5.0, "y": 6.0}] });
        assert_eq!(
            normalize_route(&waypoints).waypoints,
            vec![Coordinate::new(5.0, 6.0)]
        );

        let path = json!({ "path": [{"x": 7.0, "y": 8.0}] });
        assert_eq!(
            normalize_route(&path).waypoints,
            vec![Coordinate::new(7.0, 8.0)]
        );
    }

    #[test]
    fn normalize_treats_missing_or_non_array_path_as_no_route() {
        assert!(normalize_route(&json!({})).is_empty());
        assert!(normalize_route(&json!({"path_coords": "oops"})).is_empty());
        assert!(normalize_route(&json!({"path_coords": null})).is_empty());
        assert!(normalize_route(&json!({"error": "Invalid start or destination node"})).is_empty());
    }

    #[test]
    fn normalize_drops_malformed_points() {
        let body = json!({
            "path_coords": [
                {"x": 1.0, "y": 2.0},
                {"x": "nan", "y": 2.0},
                {"y": 3.0},
                {"x": 4.0, "y": 5.0},
            ],
        });
        let route = normalize_route(&body);
        assert_eq!(
            route.waypoints,
            vec![Coordinate::new(1.0, 2.0), Coordinate::new(4.0, 5.0)]
        );
    }

    #[test]
    fn normalize_without_instructions_yields_empty_list() {
        let body = json!({ "path_coords": [{"x": 1.0, "y": 1.0}] });
        let route = normalize_route(&body);
        assert!(route.instructions.is_empty());
        assert_eq!(route.distance, None);
    }
}
