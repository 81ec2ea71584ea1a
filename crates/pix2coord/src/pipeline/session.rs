//! One calibrate-then-test cycle against the external providers.

use image::DynamicImage;

use crate::api::Calibrator;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::providers::{CoordinateProvider, ImageSink, ImageSource};
use crate::rotation::rotate_image;

use super::result::SessionReport;

/// Drives calibration and the test passes that follow it.
///
/// The first captured image calibrates; each following capture is located
/// with that calibration. When `test_rotation_deg` is non-zero every
/// captured image is rotated by it first, which simulates a skewed camera.
pub struct Session<'a> {
    config: &'a SessionConfig,
    calibrator: Calibrator,
    source: &'a mut dyn ImageSource,
    position: &'a mut dyn CoordinateProvider,
    sink: &'a mut dyn ImageSink,
}

impl<'a> Session<'a> {
    pub fn new(
        config: &'a SessionConfig,
        source: &'a mut dyn ImageSource,
        position: &'a mut dyn CoordinateProvider,
        sink: &'a mut dyn ImageSink,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            calibrator: Calibrator::new(config.calibration.clone())?,
            source,
            position,
            sink,
        })
    }

    fn acquire(&mut self) -> Result<DynamicImage> {
        let image = self.source.capture()?;
        if self.config.test_rotation_deg == 0.0 {
            return Ok(image);
        }
        tracing::debug!(
            angle_deg = self.config.test_rotation_deg,
            "applying test rotation"
        );
        rotate_image(&image, self.config.test_rotation_deg)
    }

    fn show(&mut self, image: &image::RgbImage) {
        if self.config.display {
            self.sink.display(image);
        }
    }

    /// Calibrate, then run `config.source.test_count()` test passes.
    pub fn run(&mut self) -> Result<SessionReport> {
        let image = self.acquire()?;
        let outcome = self.calibrator.calibrate(&image)?;
        self.show(&outcome.annotated);
        let calibration = outcome.calibration;

        let n_tests = self.config.source.test_count();
        let mut tests = Vec::with_capacity(n_tests);
        for i in 0..n_tests {
            let image = self.acquire()?;
            let position = self.position.current()?;
            tracing::debug!(pass = i, x = position[0], y = position[1], "test pass");
            let located = self.calibrator.locate(&image, &calibration, position)?;
            self.show(&located.annotated);
            tests.push(located.pass);
        }

        Ok(SessionReport { calibration, tests })
    }
}
