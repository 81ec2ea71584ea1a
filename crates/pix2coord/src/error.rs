//! Error type shared by every pipeline stage.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by calibration, location and the I/O providers.
///
/// Nothing in the crate retries or recovers from these; a failing stage
/// aborts the call that triggered it.
#[derive(Error, Debug)]
pub enum Error {
    /// Not enough markers besides the image-center entry.
    #[error("insufficient markers: found {found}, need at least {required}")]
    InsufficientMarkers { found: usize, required: usize },

    /// Image file could not be read or decoded.
    #[error("failed to decode image {}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Live capture failed.
    #[error("capture failed: {message}")]
    Capture { message: String },

    /// A measured pixel quantity makes the scale undefined.
    #[error("degenerate marker geometry: {quantity} = {value}")]
    DegenerateGeometry { quantity: &'static str, value: f64 },

    /// Image channel layout is not supported by rotation.
    #[error("unsupported image layout {color:?}")]
    ShapeMismatch { color: image::ColorType },

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the schema.
    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn insufficient(found: usize) -> Self {
        Self::InsufficientMarkers {
            found,
            required: crate::types::MIN_CALIBRATION_MARKERS,
        }
    }

    pub(crate) fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }
}
