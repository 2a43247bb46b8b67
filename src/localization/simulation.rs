// localization/simulation.rs

use crate::geometry::{distance, move_toward, Coordinate};
use crate::SimulationConfig;

/// Simulated movement along a fixed path.
///
/// Each tick moves the position toward the active path point by the
/// configured step and advances to the next point once within tolerance.
/// Advancement is strictly sequential; one of the original frontends picked
/// a random waypoint per tick, which never converges and is not reproduced.
pub struct SimulatedMovement {
    path: Vec<Coordinate>,
    path_index: usize,
    step: f64,
    waypoint_tolerance: f64,
}

impl SimulatedMovement {
    /// Creates a simulation walking `path` with the configured step.
    pub fn new(path: Vec<Coordinate>, config: &SimulationConfig) -> Self {
        SimulatedMovement {
            path,
            path_index: 0,
            step: config.step,
            waypoint_tolerance: config.waypoint_tolerance,
        }
    }

    /// Advances one tick from `current`. Returns the new position, or `None`
    /// once the whole path has been walked.
    pub fn tick(&mut self, current: Coordinate) -> Option<Coordinate> {
        let target = *self.path.get(self.path_index)?;
        let next = move_toward(current, target, self.step);
        if distance(next, target) < self.waypoint_tolerance {
            self.path_index += 1;
        }
        Some(next)
    }

    /// True once every path point has been consumed.
    pub fn is_finished(&self) -> bool {
        self.path_index >= self.path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig {
            step: 2.0,
            waypoint_tolerance: 1.0,
            tick_interval_ms: 100,
        }
    }

    #[test]
    fn walks_the_path_sequentially() {
        let path = vec![Coordinate::new(10.0, 0.0), Coordinate::new(10.0, 10.0)];
        let mut sim = SimulatedMovement::new(path, &config());
        let mut position = Coordinate::new(0.0, 0.0);

        let mut ticks = 0;
        while let Some(next) = sim.tick(position) {
            // Always moves by at most one step.
            assert!(distance(position, next) <= 2.0 + 1e-9);
            position = next;
            ticks += 1;
            assert!(ticks < 100, "simulation failed to converge");
        }

        assert!(sim.is_finished());
        assert!(distance(position, Coordinate::new(10.0, 10.0)) < 1.0);
    }

    #[test]
    fn empty_path_finishes_immediately() {
        let mut sim = SimulatedMovement::new(Vec::new(), &config());
        assert!(sim.is_finished());
        assert_eq!(sim.tick(Coordinate::new(0.0, 0.0)), None);
    }

    #[test]
    fn tick_after_completion_returns_none() {
        let mut sim = SimulatedMovement::new(vec![Coordinate::new(0.5, 0.0)], &config());
        let position = Coordinate::new(0.0, 0.0);
        assert!(sim.tick(position).is_some()); // snaps onto the point
        assert!(sim.is_finished());
        assert_eq!(sim.tick(position), None);
    }
}
