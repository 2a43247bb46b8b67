// src/catalog.rs

// Static destination catalog. Loaded once at startup (built-in campus set or
// a YAML file) and not editable at runtime. Coordinates are in the local map
// frame and must agree with the routing backend's graph nodes.

use crate::geometry::Coordinate;
use crate::MapMateError;
use serde::{Deserialize, Serialize};

/// A selectable navigation target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Destination {
    /// Stable identifier ("library", "fcse", ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// Building label, also used as the classification hint
    pub building: String,
    /// Node identifier in the routing backend's graph, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Target point in the local map frame
    pub coordinate: Coordinate,
    /// Fallback route used when the routing service returns no path;
    /// normally just the destination point itself
    pub waypoints: Vec<Coordinate>,
}

#[derive(Serialize, Deserialize)]
struct CatalogFile {
    destinations: Vec<Destination>,
    default_start: Coordinate,
}

/// The fixed set of destinations a session can navigate to, plus the default
/// start position used before any position source has reported.
#[derive(Clone, Debug)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
    default_start: Coordinate,
}

impl DestinationCatalog {
    /// Builds a catalog from explicit records.
    pub fn new(destinations: Vec<Destination>, default_start: Coordinate) -> Self {
        DestinationCatalog {
            destinations,
            default_start,
        }
    }

    /// The built-in GIKI campus catalog shipped with the client.
    pub fn campus_default() -> Self {
        let entry = |id: &str, name: &str, building: &str, node: &str, x: f64, y: f64| {
            Destination {
                id: id.to_string(),
                name: name.to_string(),
                building: building.to_string(),
                node_id: Some(node.to_string()),
                coordinate: Coordinate::new(x, y),
                waypoints: vec![Coordinate::new(x, y)],
            }
        };
        DestinationCatalog {
            destinations: vec![
                entry(
                    "fcse",
                    "Faculty of Computer Science & Engineering",
                    "FCSE",
                    "N58",
                    894.0,
                    872.0,
                ),
                entry("library", "Central Library", "Library", "N64", 915.0, 637.0),
                entry(
                    "mechanical",
                    "Faculty of Mechanical Engineering",
                    "Mechanical",
                    "N67",
                    1019.0,
                    847.0,
                ),
                entry("admin", "Admin Block", "Admin", "N55", 926.0, 1010.0),
                entry("acb", "Academic Block", "ACB", "N62", 859.0, 740.0),
            ],
            // Campus entrance (N56)
            default_start: Coordinate::new(980.0, 1000.0),
        }
    }

    /// Loads a catalog from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self, MapMateError> {
        let file = std::fs::File::open(path)
            .map_err(|e| MapMateError::Config(format!("failed to open {}: {}", path, e)))?;
        let parsed: CatalogFile = serde_yaml::from_reader(file)
            .map_err(|e| MapMateError::Config(format!("failed to parse {}: {}", path, e)))?;
        Ok(DestinationCatalog {
            destinations: parsed.destinations,
            default_start: parsed.default_start,
        })
    }

    /// Looks up a destination by identifier.
    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Iterates the catalog in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    /// Number of destinations.
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// True when the catalog has no destinations.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Position a session starts at before any source has reported.
    pub fn default_start(&self) -> Coordinate {
        self.default_start
    }
}
