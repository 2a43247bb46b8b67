// src/main.rs
// Demo entry point: runs one simulated navigation session end to end,
// standing in for the camera/canvas client. The routing service is faked
// with a canned response so the demo works offline.

use log::info;
use mapmate::{
    Coordinate, DestinationCatalog, MapMateConfig, MapMateError, MapMateSession, RoutePlanner,
    RouteRequest,
};
use serde_json::{json, Value};
use std::error::Error;

/// Offline stand-in for the routing backend: answers every request with a
/// short two-leg path toward the requested destination.
struct CannedRoutePlanner;

impl RoutePlanner for CannedRoutePlanner {
    fn plan_route(&mut self, request: &RouteRequest) -> Result<Value, MapMateError> {
        let (dest_x, dest_y) = match request.destination_node.as_deref() {
            Some("N64") => (915.0, 637.0), // Library
            _ => (
                request.destination_x.unwrap_or(request.start_x),
                request.destination_y.unwrap_or(request.start_y),
            ),
        };
        let mid_x = (request.start_x + dest_x) / 2.0;
        let mid_y = (request.start_y + dest_y) / 2.0;
        Ok(json!({
            "path_coords": [
                { "x": mid_x, "y": mid_y },
                { "x": dest_x, "y": dest_y },
            ],
            "instructions": [
                "Head toward the walkway junction",
                "Continue straight to the destination",
            ],
        }))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting MapMate navigation demo...");

    let config = MapMateConfig::default();
    let tick_ms = config.simulation.tick_interval_ms;
    let catalog = DestinationCatalog::campus_default();
    let mut session = MapMateSession::new(config, catalog, Box::new(CannedRoutePlanner));

    // No device geolocation on a desktop demo; walk the route instead.
    session.geolocation_unavailable();
    session.start_navigation("library", Some(Coordinate::new(980.0, 1000.0)))?;

    for instruction in &session.navigation().route_instructions {
        info!("Instruction: {}", instruction);
    }

    let mut tick = 0u32;
    while !session.navigation().has_arrived && tick < 1000 {
        session.tick();

        if tick % 20 == 0 {
            let nav = session.navigation();
            let position = session.localization().current_position;
            info!(
                "tick {:4}: position ({:6.1}, {:6.1})  waypoint {}/{}  distance {:6.1}  bearing {:>6}",
                tick,
                position.x,
                position.y,
                nav.current_waypoint_index,
                nav.route_waypoints.len(),
                nav.distance_to_waypoint,
                session
                    .bearing_to_waypoint()
                    .map(|b| format!("{:.0}°", b))
                    .unwrap_or_else(|| "-".to_string()),
            );
        }

        std::thread::sleep(std::time::Duration::from_millis(tick_ms));
        tick += 1;
    }

    if session.navigation().has_arrived {
        info!("Arrived at the Central Library after {} ticks", tick);
    } else {
        info!("Demo stopped before arrival");
    }
    session.stop_navigation();

    Ok(())
}
