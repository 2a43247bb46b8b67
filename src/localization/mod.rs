// localization/mod.rs

// Position estimation. Three independent producers (simulated movement, GPS,
// remote visual classification) write into a single reconciled position; the
// last writer wins and tags the active localization mode. Writes are
// UI-event driven and serialized by the caller, so no locking is needed.

mod classifier;
mod gps;
mod reconciler;
mod simulation;

pub use classifier::{Classifier, LocalizeRequest, LocalizeResponse};
pub use gps::{fix_confidence, GeoProjection, GpsFix};
pub use reconciler::{GpsWatch, LocalizationMode, LocalizationState, PositionReconciler};
pub use simulation::SimulatedMovement;

#[cfg(test)]
pub use classifier::MockClassifier;
