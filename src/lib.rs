//! MapMate navigation core
//!
//! This library provides the navigation and localization logic behind the
//! MapMate campus AR-navigation client: waypoint progress tracking, position
//! source reconciliation (simulated movement, GPS, remote visual
//! classification), and route adaptation against an external routing service.
//!
//! Rendering, camera handling, and the routing backend's pathfinding are out
//! of scope; this crate owns the state those layers read from.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod catalog;
pub mod geometry;
pub mod localization;
pub mod navigation;
pub mod route;

// Re-export commonly used items for easier access
pub use catalog::{Destination, DestinationCatalog};
pub use geometry::{bearing, distance, move_toward, Coordinate};
pub use localization::{
    Classifier, GeoProjection, GpsFix, GpsWatch, LocalizationMode, LocalizationState,
    LocalizeRequest, LocalizeResponse, PositionReconciler,
};
pub use navigation::{NavigationState, ProgressTracker, RouteTicket};
pub use route::{Route, RouteAdapter, RoutePlanner, RouteRequest};

/// Top-level configuration for a MapMate session.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MapMateConfig {
    /// Waypoint tracking parameters
    pub navigation: NavigationConfig,
    /// GPS projection parameters
    pub gps: GpsConfig,
    /// Simulated-movement parameters
    pub simulation: SimulationConfig,
}

/// Waypoint tracking configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Distance below which the active waypoint counts as reached.
    /// The frontends shipped with two values (3 for per-waypoint advancement,
    /// 20 for destination-only arrival); the policy is a parameter here.
    pub arrival_threshold: f64,
}

/// GPS-to-local-frame projection configuration.
///
/// The projection is a fixed linear mapping anchored at a reference
/// latitude/longitude that corresponds to the local map origin. Defaults
/// match the GIKI campus map used by the routing backend.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GpsConfig {
    /// Reference latitude mapped to local y = 0
    pub reference_latitude: f64,
    /// Reference longitude mapped to local x = 0
    pub reference_longitude: f64,
    /// Meters-per-degree scale constant of the linear projection
    pub meters_per_degree: f64,
}

/// Simulated-movement configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Distance moved toward the active path point per tick
    pub step: f64,
    /// Distance at which the simulation advances to its next path point
    pub waypoint_tolerance: f64,
    /// Tick cadence for callers that drive the simulation on a timer
    pub tick_interval_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            arrival_threshold: 3.0,
        }
    }
}

impl Default for GpsConfig {
    fn default() -> Self {
        GpsConfig {
            reference_latitude: 33.6844,
            reference_longitude: 73.0479,
            meters_per_degree: 111_320.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            step: 2.0,
            waypoint_tolerance: 1.0,
            tick_interval_ms: 100,
        }
    }
}

impl MapMateConfig {
    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self, MapMateError> {
        let file = std::fs::File::open(path)
            .map_err(|e| MapMateError::Config(format!("failed to open {}: {}", path, e)))?;
        serde_yaml::from_reader(file)
            .map_err(|e| MapMateError::Config(format!("failed to parse {}: {}", path, e)))
    }
}

/// MapMate error types.
///
/// External collaborator failures (routing, classification, geolocation) are
/// soft: the session degrades to a fallback source instead of propagating
/// them, so these errors surface mainly at the adapter seams and in logs.
#[derive(Debug)]
pub enum MapMateError {
    /// Routing service error
    Route(String),
    /// Visual classification service error
    Classification(String),
    /// Device geolocation error
    Geolocation(String),
    /// Configuration error
    Config(String),
    /// Unknown destination identifier
    UnknownDestination(String),
}

impl std::fmt::Display for MapMateError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MapMateError::Route(msg) => write!(f, "Routing error: {}", msg),
            MapMateError::Classification(msg) => write!(f, "Classification error: {}", msg),
            MapMateError::Geolocation(msg) => write!(f, "Geolocation error: {}", msg),
            MapMateError::Config(msg) => write!(f, "Configuration error: {}", msg),
            MapMateError::UnknownDestination(id) => write!(f, "Unknown destination: {}", id),
        }
    }
}

impl std::error::Error for MapMateError {}

/// One navigation session wiring the reconciler, the tracker, and the route
/// adapter together.
///
/// All methods take `&mut self`; the session assumes the single-threaded,
/// event-driven model of the client it was extracted from, where timer
/// ticks, sensor callbacks, and network completions are serialized onto one
/// event queue by the caller.
pub struct MapMateSession {
    config: MapMateConfig,
    catalog: DestinationCatalog,
    reconciler: PositionReconciler,
    tracker: ProgressTracker,
    router: RouteAdapter,
    classifier: Option<Box<dyn Classifier>>,
}

impl MapMateSession {
    /// Creates a session over a destination catalog and a routing service.
    ///
    /// The current position starts at the catalog's default start point in
    /// GPS mode, matching the client's startup behavior.
    pub fn new(
        config: MapMateConfig,
        catalog: DestinationCatalog,
        planner: Box<dyn RoutePlanner>,
    ) -> Self {
        let reconciler = PositionReconciler::new(&config, catalog.default_start());
        let tracker = ProgressTracker::new(&config.navigation);
        MapMateSession {
            config,
            catalog,
            reconciler,
            tracker,
            router: RouteAdapter::new(planner),
            classifier: None,
        }
    }

    /// Attaches a visual classification service.
    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Starts navigating to a catalog destination.
    ///
    /// Resets navigation state, requests a route from the routing service
    /// (an unusable response leaves the destination's fallback waypoints in
    /// effect), and seeds the simulated path when running in simulated mode.
    /// `start_override` replaces the current position before routing, which
    /// is how a manual map pick of the start location comes in.
    pub fn start_navigation(
        &mut self,
        destination_id: &str,
        start_override: Option<Coordinate>,
    ) -> Result<(), MapMateError> {
        let destination = self
            .catalog
            .get(destination_id)
            .ok_or_else(|| MapMateError::UnknownDestination(destination_id.to_string()))?
            .clone();

        if let Some(start) = start_override {
            self.reconciler.update_position(start);
        }
        let start = self.reconciler.position();

        log::info!(
            "Starting navigation to {} ({}) from ({:.1}, {:.1})",
            destination.name,
            destination.building,
            start.x,
            start.y
        );

        // The ticket pins the route response to this attempt; a response
        // completing after stop_navigation is dropped by the tracker.
        let ticket = self.tracker.begin(destination.clone());
        let request = RouteRequest::new(start, &destination);
        let route = self.router.fetch(&request);
        self.tracker.apply_route(&ticket, route);

        if self.reconciler.mode() == LocalizationMode::Simulated {
            self.reconciler
                .start_simulation(self.tracker.effective_waypoints().to_vec());
        }

        self.tracker.update(start);
        Ok(())
    }

    /// Stops navigating and clears all navigation state.
    ///
    /// Outstanding route responses and simulation timers are invalidated:
    /// a route arriving after this call cannot resurrect the session.
    pub fn stop_navigation(&mut self) {
        log::info!("Stopping navigation");
        self.tracker.stop();
        self.reconciler.stop_simulation();
    }

    /// One simulated-movement timer tick. No-op unless a simulation path is
    /// active.
    pub fn tick(&mut self) {
        if let Some(position) = self.reconciler.tick_simulation() {
            self.tracker.update(position);
        }
    }

    /// Applies a manually picked position (map tap).
    pub fn report_position(&mut self, position: Coordinate) {
        self.reconciler.update_position(position);
        self.tracker.update(position);
    }

    /// Applies a one-shot GPS fix.
    pub fn report_gps_fix(&mut self, fix: GpsFix) {
        let position = self.reconciler.apply_gps_fix(&fix);
        self.tracker.update(position);
    }

    /// Records a failed GPS read: position is kept, confidence drops.
    pub fn report_gps_error(&mut self) {
        self.reconciler.gps_error();
    }

    /// Records that geolocation is unsupported or denied; the session falls
    /// back to simulated mode rather than leaving the position unset.
    pub fn geolocation_unavailable(&mut self) {
        self.reconciler.geolocation_unavailable();
    }

    /// Opens a continuous GPS watch. Fixes are reported through the returned
    /// handle and must be released with [`stop_gps_watch`], mirroring the
    /// single-owner rule for the device subscription.
    ///
    /// [`stop_gps_watch`]: MapMateSession::stop_gps_watch
    pub fn start_gps_watch(&mut self) -> localization::GpsWatch {
        self.reconciler.start_gps_watch()
    }

    /// Applies a fix from a continuous watch. Fixes from a released or
    /// superseded watch are ignored.
    pub fn report_watch_fix(&mut self, watch: &localization::GpsWatch, fix: GpsFix) {
        if let Some(position) = self.reconciler.report_watch_fix(watch, &fix) {
            self.tracker.update(position);
        }
    }

    /// Releases a continuous GPS watch.
    pub fn stop_gps_watch(&mut self, watch: localization::GpsWatch) {
        self.reconciler.stop_gps_watch(watch);
    }

    /// Sends a captured frame to the classification service and applies the
    /// result.
    ///
    /// On classification failure the session falls back to the supplied GPS
    /// fix; if that is unavailable too, the last known position is kept at
    /// low confidence. Never fatal.
    pub fn capture_and_localize(
        &mut self,
        request: &LocalizeRequest,
        gps_fallback: Option<GpsFix>,
    ) {
        let outcome = match self.classifier.as_mut() {
            Some(classifier) => classifier.classify(request),
            None => Err(MapMateError::Classification(
                "no classification service attached".to_string(),
            )),
        };

        let position = match outcome {
            Ok(response) if response.success => {
                Some(self.reconciler.apply_classification(&response))
            }
            Ok(response) => {
                log::warn!(
                    "Classification rejected capture (confidence {:.2}), falling back to GPS",
                    response.confidence
                );
                self.classification_fallback(gps_fallback)
            }
            Err(e) => {
                log::warn!("Classification unavailable ({}), falling back to GPS", e);
                self.classification_fallback(gps_fallback)
            }
        };

        if let Some(position) = position {
            self.tracker.update(position);
        }
    }

    fn classification_fallback(&mut self, gps_fallback: Option<GpsFix>) -> Option<Coordinate> {
        match gps_fallback {
            Some(fix) => Some(self.reconciler.apply_gps_fix(&fix)),
            None => {
                self.reconciler.gps_error();
                None
            }
        }
    }

    /// Current navigation state, as rendered by the arrow/distance UI.
    pub fn navigation(&self) -> &NavigationState {
        self.tracker.state()
    }

    /// Current localization state.
    pub fn localization(&self) -> &LocalizationState {
        self.reconciler.state()
    }

    /// Screen bearing in degrees from the current position to the active
    /// waypoint (0° = up), or `None` when there is nothing to point at.
    pub fn bearing_to_waypoint(&self) -> Option<f64> {
        let waypoint = self.tracker.active_waypoint()?;
        Some(bearing(self.reconciler.position(), waypoint))
    }

    /// Destination catalog backing this session.
    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    /// Session configuration.
    pub fn config(&self) -> &MapMateConfig {
        &self.config
    }
}
