//! External collaborators: image acquisition, machine position, display.
//!
//! The calibration core never talks to hardware. A [`crate::Session`] pulls
//! images from an [`ImageSource`], asks a [`CoordinateProvider`] where the
//! machine is, and hands annotated images to an [`ImageSink`].

mod command;
mod file;
mod sink;

use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::config::SourceConfig;
use crate::error::{Error, Result};

pub use command::CommandImageSource;
pub use file::FileImageSource;
pub use sink::{NullSink, PngDirSink};

/// Producer of raw images.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, RgbImage};
/// use pix2coord::{ImageSource, Result};
///
/// struct Blank;
///
/// impl ImageSource for Blank {
///     fn capture(&mut self) -> Result<DynamicImage> {
///         Ok(DynamicImage::ImageRgb8(RgbImage::new(64, 48)))
///     }
/// }
/// ```
pub trait ImageSource {
    /// Acquire the next image. May block.
    fn capture(&mut self) -> Result<DynamicImage>;

    /// Decode a stored image.
    fn read_file(&self, path: &Path) -> Result<DynamicImage> {
        read_image_file(path)
    }
}

/// Current machine position, in machine units.
pub trait CoordinateProvider {
    fn current(&mut self) -> Result<[f64; 2]>;
}

/// Destination for annotated images. Failures are logged, never returned.
pub trait ImageSink {
    fn display(&mut self, image: &RgbImage);
}

/// Position that never changes; stands in for a live machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub [f64; 2]);

impl CoordinateProvider for FixedPosition {
    fn current(&mut self) -> Result<[f64; 2]> {
        Ok(self.0)
    }
}

/// Open and decode an image file.
pub fn read_image_file(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the image source described by `config`.
pub fn image_source_from_config(config: &SourceConfig) -> Box<dyn ImageSource> {
    match config {
        SourceConfig::File {
            calibration_image,
            test_images,
        } => Box::new(FileImageSource::new(
            std::iter::once(calibration_image.clone()).chain(test_images.iter().cloned()),
        )),
        SourceConfig::Live {
            command,
            output,
            settle_ms,
            ..
        } => Box::new(CommandImageSource::new(
            command.clone(),
            output.clone(),
            std::time::Duration::from_millis(*settle_ms),
        )),
    }
}
