use image::RgbImage;

use crate::types::{Calibration, MachineCoordinate, PixelLocationSet};

/// Calibration plus the annotated final-round image.
#[derive(Debug, Clone)]
pub struct CalibrationOutcome {
    pub calibration: Calibration,
    /// Detection rounds that ran.
    pub rounds: usize,
    pub annotated: RgbImage,
}

/// One test pass: detections in the rotation-corrected image and their
/// machine coordinates.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TestPass {
    /// Machine position reported when the image was taken.
    pub machine_position: [f64; 2],
    pub detections: PixelLocationSet,
    pub coordinates: Vec<MachineCoordinate>,
}

/// A test pass plus its annotated image.
#[derive(Debug, Clone)]
pub struct LocateOutcome {
    pub pass: TestPass,
    pub annotated: RgbImage,
}

/// Everything a calibrate-then-test session produced.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionReport {
    pub calibration: Calibration,
    pub tests: Vec<TestPass>,
}

impl SessionReport {
    /// Total number of located markers across all test passes.
    pub fn n_located(&self) -> usize {
        self.tests.iter().map(|t| t.coordinates.len()).sum()
    }
}
