// navigation/tracker.rs

use crate::catalog::Destination;
use crate::geometry::{distance, Coordinate};
use crate::route::Route;
use crate::NavigationConfig;
use log::{debug, info};

/// Navigation state as consumed by the UI overlay.
#[derive(Clone, Debug, Default)]
pub struct NavigationState {
    /// True between `begin` and `stop`, including after arrival
    pub is_navigating: bool,
    /// The destination being navigated to
    pub current_destination: Option<Destination>,
    /// Index into the effective waypoint list; never decreases while
    /// navigating
    pub current_waypoint_index: usize,
    /// Route returned by the routing service; empty when none was usable
    pub route_waypoints: Vec<Coordinate>,
    /// Turn instructions accompanying the route
    pub route_instructions: Vec<String>,
    /// Distance from the current position to the active waypoint; 0 once
    /// arrived
    pub distance_to_waypoint: f64,
    /// Terminal flag; sticky until `stop` or a new `begin`
    pub has_arrived: bool,
}

/// Token tying a route request to the navigation attempt that issued it.
///
/// `apply_route` rejects tickets from a previous attempt, so a response
/// completing after `stop` (or after a newer `begin`) cannot write into the
/// current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTicket {
    generation: u64,
}

/// Tracks a moving position against an ordered waypoint list.
///
/// The effective list is the service route when non-empty, otherwise the
/// destination's fallback waypoints. Advancement uses a single configurable
/// arrival threshold.
pub struct ProgressTracker {
    state: NavigationState,
    arrival_threshold: f64,
    generation: u64,
}

impl ProgressTracker {
    /// Creates an idle tracker.
    pub fn new(config: &NavigationConfig) -> Self {
        ProgressTracker {
            state: NavigationState::default(),
            arrival_threshold: config.arrival_threshold,
            generation: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Begins navigating to `destination` and returns the ticket the route
    /// response must present. Any previous attempt is superseded.
    pub fn begin(&mut self, destination: Destination) -> RouteTicket {
        self.generation += 1;
        self.state = NavigationState {
            is_navigating: true,
            current_destination: Some(destination),
            ..NavigationState::default()
        };
        RouteTicket {
            generation: self.generation,
        }
    }

    /// Applies a fetched route. Returns false (and changes nothing) when the
    /// ticket is stale or navigation has stopped; an empty route is accepted
    /// as a no-op so the fallback waypoints stay in effect.
    pub fn apply_route(&mut self, ticket: &RouteTicket, route: Route) -> bool {
        if ticket.generation != self.generation || !self.state.is_navigating {
            debug!("Dropping route response for a superseded navigation attempt");
            return false;
        }
        if !route.is_empty() {
            info!("Applying route with {} waypoints", route.waypoints.len());
            self.state.route_waypoints = route.waypoints;
            self.state.route_instructions = route.instructions;
        }
        true
    }

    /// Stops navigating and resets to the idle state. Outstanding tickets
    /// become stale.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.state = NavigationState::default();
    }

    /// Consumes one position update.
    ///
    /// Stores the distance to the active waypoint and advances the index
    /// when that distance falls below the arrival threshold; reaching the
    /// end of the list sets the terminal arrived flag in the same update.
    pub fn update(&mut self, position: Coordinate) {
        if !self.state.is_navigating || self.state.current_destination.is_none() {
            return;
        }

        let waypoints = self.effective_waypoints();
        let count = waypoints.len();

        // A destination with no route data counts as already reached.
        if count == 0 || self.state.current_waypoint_index >= count {
            self.arrive();
            return;
        }

        let target = waypoints[self.state.current_waypoint_index];
        let d = distance(position, target);
        self.state.distance_to_waypoint = d;

        if d < self.arrival_threshold {
            self.state.current_waypoint_index += 1;
            debug!(
                "Waypoint reached, advancing to index {}/{}",
                self.state.current_waypoint_index, count
            );
            if self.state.current_waypoint_index >= count {
                self.arrive();
            }
        }
    }

    /// The waypoint list currently being navigated: the service route when
    /// non-empty, else the destination's fallback waypoints.
    pub fn effective_waypoints(&self) -> &[Coordinate] {
        if !self.state.route_waypoints.is_empty() {
            return &self.state.route_waypoints;
        }
        self.state
            .current_destination
            .as_ref()
            .map(|d| d.waypoints.as_slice())
            .unwrap_or(&[])
    }

    /// The waypoint the arrow should point at, if any.
    pub fn active_waypoint(&self) -> Option<Coordinate> {
        if !self.state.is_navigating || self.state.has_arrived {
            return None;
        }
        self.effective_waypoints()
            .get(self.state.current_waypoint_index)
            .copied()
    }

    fn arrive(&mut self) {
        if !self.state.has_arrived {
            info!("Arrived at destination");
        }
        self.state.has_arrived = true;
        self.state.distance_to_waypoint = 0.0;
    }
}
