//! pix2coord — pixel-to-machine coordinate calibration from two colored
//! reference markers.
//!
//! A camera rides on a machine (a gantry, a plotter, a garden bot). Two
//! markers of known diameter and known center distance are placed in view;
//! from them the crate learns the camera's rotation and per-axis pixel scale,
//! and then turns any marker seen later into a machine coordinate.
//!
//! The pipeline stages are:
//!
//! 1. **Segment** – median smoothing, two-band HSV threshold for red (the hue
//!    axis wraps), square closing, external contours, minimal enclosing
//!    circles.
//! 2. **Rotation** – marker-pair angle estimate and rigid image rotation.
//! 3. **Converge** – detect / estimate / re-rotate from the unrotated
//!    original for a fixed number of rounds.
//! 4. **Calibrate** – per-axis scale from marker separation and diameter.
//! 5. **Transform** – pixel offset from the image center to machine
//!    coordinates, with per-axis sign and camera offset.
//!
//! # Public API
//! - [`Calibrator`] as primary entry point, configured by [`CalibrationConfig`]
//! - [`Session`] to drive a full cycle against the provider traits
//!   ([`ImageSource`], [`CoordinateProvider`], [`ImageSink`])
//! - the individual stages ([`segment()`], [`estimate_rotation`],
//!   [`rotate_image`], [`solve_scale`], [`transform()`]) for callers that
//!   want to wire things differently

mod api;
mod calibrate;
mod config;
mod error;
mod pipeline;
mod providers;
mod rotation;
pub mod segment;
mod transform;
mod types;

#[cfg(test)]
mod test_utils;

pub use api::Calibrator;
pub use calibrate::solve_scale;
pub use config::{
    CalibrationConfig, HsvBand, MarkerRoles, SegmentConfig, SessionConfig, SourceConfig,
};
pub use error::{Error, Result};
pub use pipeline::{CalibrationOutcome, LocateOutcome, Session, SessionReport, TestPass};
pub use providers::{
    image_source_from_config, read_image_file, CommandImageSource, CoordinateProvider,
    FileImageSource, FixedPosition, ImageSink, ImageSource, NullSink, PngDirSink,
};
pub use rotation::{estimate_rotation, rotate_image};
pub use segment::{segment, Segmentation};
pub use transform::transform;
pub use types::{
    Calibration, CalibrationScale, DetectedObject, MachineCoordinate, PixelLocationSet,
    MIN_CALIBRATION_MARKERS,
};
