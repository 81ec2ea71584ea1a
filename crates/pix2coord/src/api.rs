//! High-level calibration API.
//!
//! [`Calibrator`] is the primary entry point. It owns an immutable
//! [`CalibrationConfig`] and exposes the two passes of the pipeline:
//! calibration on an image of the two reference markers, then location of
//! markers in further images.

use image::DynamicImage;

use crate::config::CalibrationConfig;
use crate::error::Result;
use crate::pipeline::{self, CalibrationOutcome, LocateOutcome};
use crate::types::Calibration;

/// Primary calibration interface.
///
/// Create once, calibrate once, then locate on as many images as needed.
///
/// # Examples
///
/// ```no_run
/// use pix2coord::{CalibrationConfig, Calibrator};
///
/// let config = CalibrationConfig::new([0, 1], 153.0, 500.0, [300.0, 100.0], 3);
/// let calibrator = Calibrator::new(config)?;
/// let image = image::open("calibration.jpg").unwrap();
/// let outcome = calibrator.calibrate(&image)?;
/// let test = image::open("test.jpg").unwrap();
/// let located = calibrator.locate(&test, &outcome.calibration, [200.0, 400.0])?;
/// for c in &located.pass.coordinates {
///     println!("{c}");
/// }
/// # Ok::<(), pix2coord::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    /// Validate `config` and wrap it.
    pub fn new(config: CalibrationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Access the configuration.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Run the rotation convergence loop and solve the per-axis scale.
    pub fn calibrate(&self, image: &DynamicImage) -> Result<CalibrationOutcome> {
        pipeline::calibrate(image, &self.config)
    }

    /// Locate markers in `image` with a previous calibration.
    ///
    /// `machine_position` is the machine's position when `image` was taken.
    pub fn locate(
        &self,
        image: &DynamicImage,
        calibration: &Calibration,
        machine_position: [f64; 2],
    ) -> Result<LocateOutcome> {
        pipeline::locate(image, calibration, machine_position, &self.config)
    }
}
