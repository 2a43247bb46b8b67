// localization/gps.rs

// Device GPS support: a fixed linear projection from latitude/longitude into
// the local map frame, and the accuracy-to-confidence mapping. The projection
// is anchored at a reference coordinate (campus origin); latitude grows
// northward while local y grows down-screen, so y is flipped.

use crate::geometry::Coordinate;
use crate::GpsConfig;
use nalgebra::Vector2;

/// One geolocation reading as delivered by the device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GpsFix {
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    /// Reported accuracy radius in meters
    pub accuracy_m: f64,
}

/// Linear projection between the WGS84 degrees the device reports and the
/// local planar frame the map and routing graph use.
#[derive(Clone, Debug)]
pub struct GeoProjection {
    config: GpsConfig,
}

impl GeoProjection {
    /// Creates a projection from configuration.
    pub fn new(config: GpsConfig) -> Self {
        GeoProjection { config }
    }

    /// Projects a device fix into the local frame.
    pub fn to_local(&self, fix: &GpsFix) -> Coordinate {
        let local = Vector2::new(
            (fix.longitude - self.config.reference_longitude) * self.config.meters_per_degree,
            (self.config.reference_latitude - fix.latitude) * self.config.meters_per_degree,
        );
        Coordinate::from(local)
    }
}

/// Confidence score for a fix with the given accuracy radius.
///
/// `max(0.5, 1 - accuracy/100)`: a 10 m fix scores 0.9, anything worse than
/// 50 m bottoms out at 0.5. Clamped into [0, 1] against nonsensical inputs.
pub fn fix_confidence(accuracy_m: f64) -> f64 {
    (1.0 - accuracy_m / 100.0).max(0.5).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn projection() -> GeoProjection {
        GeoProjection::new(GpsConfig::default())
    }

    #[test]
    fn reference_point_projects_to_origin() {
        let local = projection().to_local(&GpsFix {
            latitude: 33.6844,
            longitude: 73.0479,
            accuracy_m: 5.0,
        });
        assert!(local.x.abs() < 1e-6);
        assert!(local.y.abs() < 1e-6);
    }

    #[test]
    fn north_east_maps_to_up_right() {
        // 0.001° ≈ 111.32 m at the configured scale.
        let local = projection().to_local(&GpsFix {
            latitude: 33.6854,
            longitude: 73.0489,
            accuracy_m: 5.0,
        });
        assert!((local.x - 111.32).abs() < 1e-3);
        assert!((local.y + 111.32).abs() < 1e-3); // north is -y on screen
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(10.0, 0.9)]
    #[case(50.0, 0.5)]
    #[case(200.0, 0.5)] // clamped to the documented minimum
    #[case(-5.0, 1.0)] // bogus negative accuracy still lands in [0, 1]
    fn confidence_formula(#[case] accuracy: f64, #[case] expected: f64) {
        assert!((fix_confidence(accuracy) - expected).abs() < 1e-9);
    }
}
