// localization/reconciler.rs

use super::classifier::LocalizeResponse;
use super::gps::{fix_confidence, GeoProjection, GpsFix};
use super::simulation::SimulatedMovement;
use crate::geometry::Coordinate;
use crate::{MapMateConfig, SimulationConfig};
use log::{debug, info, warn};

/// The source that last produced the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalizationMode {
    /// Simulated movement along a route
    Simulated,
    /// Device geolocation
    Gps,
    /// Remote visual classification (MIDAS backend)
    Classification,
    /// AR tracking, present in the client but stubbed
    ArStubbed,
}

impl std::fmt::Display for LocalizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            LocalizationMode::Simulated => "Simulated",
            LocalizationMode::Gps => "GPS",
            LocalizationMode::Classification => "Classification",
            LocalizationMode::ArStubbed => "AR (stubbed)",
        };
        write!(f, "{}", name)
    }
}

/// Localization state as read by the UI.
#[derive(Clone, Debug)]
pub struct LocalizationState {
    /// The authoritative current position; never unset
    pub current_position: Coordinate,
    /// Which producer wrote it
    pub localization_mode: LocalizationMode,
    /// Confidence of the latest estimate, when the source reports one
    pub capture_confidence: Option<f64>,
}

/// Handle to a continuous GPS watch.
///
/// The subscription it stands for is singly owned: fixes are only accepted
/// through the newest handle, and releasing it (or opening a newer one)
/// makes earlier handles inert. That keeps a torn-down view's callback from
/// writing into live state.
#[derive(Debug, PartialEq, Eq)]
pub struct GpsWatch {
    id: u64,
}

/// Merges the position producers into one authoritative value.
///
/// Last writer wins; each write tags the mode it came from. Producers never
/// run concurrently here — every entry point is a UI-serialized callback.
pub struct PositionReconciler {
    state: LocalizationState,
    projection: GeoProjection,
    simulation_config: SimulationConfig,
    simulation: Option<SimulatedMovement>,
    active_watch: Option<u64>,
    next_watch_id: u64,
}

impl PositionReconciler {
    /// Creates a reconciler starting at `initial_position` in GPS mode,
    /// matching the client's startup behavior.
    pub fn new(config: &MapMateConfig, initial_position: Coordinate) -> Self {
        PositionReconciler {
            state: LocalizationState {
                current_position: initial_position,
                localization_mode: LocalizationMode::Gps,
                capture_confidence: None,
            },
            projection: GeoProjection::new(config.gps.clone()),
            simulation_config: config.simulation.clone(),
            simulation: None,
            active_watch: None,
            next_watch_id: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &LocalizationState {
        &self.state
    }

    /// Current position.
    pub fn position(&self) -> Coordinate {
        self.state.current_position
    }

    /// Active localization mode.
    pub fn mode(&self) -> LocalizationMode {
        self.state.localization_mode
    }

    /// Applies a manually picked position without changing the mode.
    pub fn update_position(&mut self, position: Coordinate) {
        self.state.current_position = position;
    }

    /// Switches the localization mode without moving the position. Used by
    /// the mode selector UI, including the stubbed AR option.
    pub fn set_mode(&mut self, mode: LocalizationMode) {
        info!("Localization mode set to {}", mode);
        self.state.localization_mode = mode;
    }

    // --- Simulated movement -------------------------------------------------

    /// Starts (or restarts) simulated movement along `path`.
    pub fn start_simulation(&mut self, path: Vec<Coordinate>) {
        info!("Starting simulated movement over {} points", path.len());
        self.simulation = Some(SimulatedMovement::new(path, &self.simulation_config));
        self.state.localization_mode = LocalizationMode::Simulated;
    }

    /// Stops simulated movement. Subsequent ticks are no-ops, so a timer
    /// that fires after teardown cannot write a stale position.
    pub fn stop_simulation(&mut self) {
        self.simulation = None;
    }

    /// One simulation timer tick. Returns the new position when the
    /// simulation is active and not yet finished.
    pub fn tick_simulation(&mut self) -> Option<Coordinate> {
        let simulation = self.simulation.as_mut()?;
        let next = simulation.tick(self.state.current_position)?;
        self.state.current_position = next;
        self.state.localization_mode = LocalizationMode::Simulated;
        debug!("Simulated position: ({:.1}, {:.1})", next.x, next.y);
        Some(next)
    }

    // --- GPS ----------------------------------------------------------------

    /// Applies a one-shot GPS fix and returns the projected position.
    pub fn apply_gps_fix(&mut self, fix: &GpsFix) -> Coordinate {
        let local = self.projection.to_local(fix);
        self.state.current_position = local;
        self.state.localization_mode = LocalizationMode::Gps;
        self.state.capture_confidence = Some(fix_confidence(fix.accuracy_m));
        debug!(
            "GPS fix: ({:.6}, {:.6}) accuracy {:.0}m -> local ({:.1}, {:.1})",
            fix.latitude, fix.longitude, fix.accuracy_m, local.x, local.y
        );
        local
    }

    /// Records a failed GPS read. The last position is kept; only the
    /// confidence drops.
    pub fn gps_error(&mut self) {
        warn!("GPS read failed, keeping last known position");
        self.state.capture_confidence = Some(0.3);
    }

    /// Records that geolocation is unsupported or denied and falls back to
    /// simulated mode. The position is never unset.
    pub fn geolocation_unavailable(&mut self) {
        warn!("Geolocation unavailable, falling back to simulated mode");
        self.state.localization_mode = LocalizationMode::Simulated;
    }

    /// Opens a continuous watch, superseding any earlier one.
    pub fn start_gps_watch(&mut self) -> GpsWatch {
        self.next_watch_id += 1;
        self.active_watch = Some(self.next_watch_id);
        debug!("GPS watch {} started", self.next_watch_id);
        GpsWatch {
            id: self.next_watch_id,
        }
    }

    /// Applies a fix from a continuous watch. Fixes from a released or
    /// superseded watch are ignored and return `None`.
    pub fn report_watch_fix(&mut self, watch: &GpsWatch, fix: &GpsFix) -> Option<Coordinate> {
        if self.active_watch != Some(watch.id) {
            debug!("Dropping fix from stale GPS watch {}", watch.id);
            return None;
        }
        Some(self.apply_gps_fix(fix))
    }

    /// Releases a continuous watch. Consumes the handle; only the active
    /// watch is cleared, releasing a superseded handle is a no-op.
    pub fn stop_gps_watch(&mut self, watch: GpsWatch) {
        if self.active_watch == Some(watch.id) {
            debug!("GPS watch {} stopped", watch.id);
            self.active_watch = None;
        }
    }

    // --- Remote classification ----------------------------------------------

    /// Applies a successful classification result. Coordinates come back
    /// already in the local frame, so they are applied directly.
    pub fn apply_classification(&mut self, response: &LocalizeResponse) -> Coordinate {
        let position = Coordinate::new(response.map_x, response.map_y);
        info!(
            "Classified as {} at ({:.1}, {:.1}) with confidence {:.2}",
            response.building, position.x, position.y, response.confidence
        );
        self.state.current_position = position;
        self.state.localization_mode = LocalizationMode::Classification;
        self.state.capture_confidence = Some(response.confidence.clamp(0.0, 1.0));
        position
    }

    /// Clears a displayed confidence value (the UI fades it out a few
    /// seconds after a capture).
    pub fn clear_confidence(&mut self) {
        self.state.capture_confidence = None;
    }
}
