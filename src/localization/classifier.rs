// localization/classifier.rs

// Seam to the remote visual classification service (`/localize/`). The
// service receives a captured frame plus a building hint as a multipart form
// and answers with a position already in the local map frame. The model
// behind it is opaque to this crate.

use crate::MapMateError;
use serde::{Deserialize, Serialize};

/// A capture submitted for classification.
#[derive(Clone, Debug)]
pub struct LocalizeRequest {
    /// Building the user believes they are near; biases the classifier
    pub building_hint: String,
    /// Encoded image bytes (JPEG as captured from the camera stream)
    pub image: Vec<u8>,
}

impl LocalizeRequest {
    /// Creates a request from a hint and captured image bytes.
    pub fn new(building_hint: &str, image: Vec<u8>) -> Self {
        LocalizeRequest {
            building_hint: building_hint.to_string(),
            image,
        }
    }
}

/// Classification service response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalizeResponse {
    /// Whether the classifier recognized the scene
    pub success: bool,
    /// Estimated x in the local map frame
    pub map_x: f64,
    /// Estimated y in the local map frame
    pub map_y: f64,
    /// Recognized building label
    pub building: String,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
}

/// Transport seam to the classification service.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier {
    /// Classifies a captured frame into a map position.
    fn classify(&mut self, request: &LocalizeRequest) -> Result<LocalizeResponse, MapMateError>;
}
