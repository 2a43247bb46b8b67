// navigation/mod.rs

// Waypoint progress tracking. The tracker is the one piece of state the
// arrow/distance UI renders from; it consumes position updates from whatever
// source the reconciler last applied and is agnostic to which one fired.

mod tracker;

pub use tracker::{NavigationState, ProgressTracker, RouteTicket};
