//! Calibration and session configuration.
//!
//! Everything here is an immutable value handed to [`crate::Calibrator`] or
//! [`crate::Session`] at call time. The session file is JSON; the geometric
//! parameters have no defaults and must be spelled out, while the tuning
//! sections (`segmentation`, `marker_roles`, `rotation_zero_threshold_px`)
//! fall back to the values documented on their `Default` impls.

use std::path::{Path, PathBuf};

use nalgebra::Vector2;

use crate::error::{Error, Result};

/// How the two calibration markers are picked out of a detection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRoles {
    /// Leftmost and rightmost marker by center x.
    #[default]
    Extremes,
    /// First two markers in contour-discovery order.
    DetectionOrder,
}

/// Inclusive HSV box. Hue in degrees `[0, 360]`, saturation/value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HsvBand {
    pub hue_deg: [f32; 2],
    pub saturation: [f32; 2],
    pub value: [f32; 2],
}

impl HsvBand {
    pub fn contains(&self, hue_deg: f32, saturation: f32, value: f32) -> bool {
        let within = |range: [f32; 2], v: f32| v >= range[0] && v <= range[1];
        within(self.hue_deg, hue_deg)
            && within(self.saturation, saturation)
            && within(self.value, value)
    }
}

/// Marker color segmentation parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentConfig {
    /// Median filter radius (pixels); 2 gives a 5x5 window.
    pub median_radius: u32,
    /// Color bands OR-ed into the marker mask.
    pub bands: Vec<HsvBand>,
    /// Half-size of the square closing element; 7 gives 15x15.
    pub close_half_size: u8,
}

impl Default for SegmentConfig {
    /// Red markers: the hue axis wraps, so two bands cover it.
    fn default() -> Self {
        let sv = [100.0 / 255.0, 1.0];
        Self {
            median_radius: 2,
            bands: vec![
                HsvBand {
                    hue_deg: [0.0, 40.0],
                    saturation: sv,
                    value: sv,
                },
                HsvBand {
                    hue_deg: [320.0, 360.0],
                    saturation: sv,
                    value: sv,
                },
            ],
            close_half_size: 7,
        }
    }
}

/// Parameters of one calibration/test cycle.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationConfig {
    /// Per axis, `1` when machine coordinates grow toward the image origin
    /// edge; anything else flips that axis.
    pub origin_location: [u8; 2],
    /// Physical marker diameter.
    pub marker_diameter: f64,
    /// Physical distance between the two marker centers.
    pub marker_separation: f64,
    /// Camera position relative to the reported machine position.
    pub camera_offset: [f64; 2],
    /// Detection rounds; at least 2 when the camera may be rotated.
    pub iterations: usize,
    #[serde(default)]
    pub segmentation: SegmentConfig,
    #[serde(default)]
    pub marker_roles: MarkerRoles,
    /// Vertical marker offset (pixels) at or below which no rotation is applied.
    #[serde(default)]
    pub rotation_zero_threshold_px: f64,
}

impl CalibrationConfig {
    /// Config with the given geometry and default tuning.
    pub fn new(
        origin_location: [u8; 2],
        marker_diameter: f64,
        marker_separation: f64,
        camera_offset: [f64; 2],
        iterations: usize,
    ) -> Self {
        Self {
            origin_location,
            marker_diameter,
            marker_separation,
            camera_offset,
            iterations,
            segmentation: SegmentConfig::default(),
            marker_roles: MarkerRoles::default(),
            rotation_zero_threshold_px: 0.0,
        }
    }

    /// `+1` / `-1` per axis from `origin_location`.
    pub fn axis_signs(&self) -> Vector2<f64> {
        let sign = |loc: u8| if loc == 1 { 1.0 } else { -1.0 };
        Vector2::new(sign(self.origin_location[0]), sign(self.origin_location[1]))
    }

    pub(crate) fn camera_offset(&self) -> Vector2<f64> {
        Vector2::from(self.camera_offset)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be >= 1".to_string()));
        }
        if !self.marker_diameter.is_finite() || self.marker_diameter <= 0.0 {
            return Err(Error::InvalidConfig(
                "marker_diameter must be finite and > 0".to_string(),
            ));
        }
        if !self.marker_separation.is_finite() || self.marker_separation <= 0.0 {
            return Err(Error::InvalidConfig(
                "marker_separation must be finite and > 0".to_string(),
            ));
        }
        if self.camera_offset.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(
                "camera_offset must be finite".to_string(),
            ));
        }
        if !self.rotation_zero_threshold_px.is_finite() || self.rotation_zero_threshold_px < 0.0 {
            return Err(Error::InvalidConfig(
                "rotation_zero_threshold_px must be finite and >= 0".to_string(),
            ));
        }
        if self.segmentation.bands.is_empty() {
            return Err(Error::InvalidConfig(
                "segmentation.bands must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where raw images come from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum SourceConfig {
    /// Read stored images.
    File {
        calibration_image: PathBuf,
        test_images: Vec<PathBuf>,
    },
    /// Run an external capture program that writes `output`.
    Live {
        command: Vec<String>,
        output: PathBuf,
        settle_ms: u64,
        test_captures: usize,
    },
}

impl SourceConfig {
    /// Number of test passes that follow calibration.
    pub fn test_count(&self) -> usize {
        match self {
            Self::File { test_images, .. } => test_images.len(),
            Self::Live { test_captures, .. } => *test_captures,
        }
    }
}

/// Full runtime configuration of one calibrate-then-test session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub calibration: CalibrationConfig,
    /// Machine position reported by the stub coordinate provider.
    pub machine_position: [f64; 2],
    /// Artificial rotation (degrees) applied to every acquired image; 0 disables.
    pub test_rotation_deg: f64,
    /// Send annotated images to the image sink.
    pub display: bool,
    pub source: SourceConfig,
}

impl SessionConfig {
    /// Load and validate a session config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        if self.machine_position.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(
                "machine_position must be finite".to_string(),
            ));
        }
        if !self.test_rotation_deg.is_finite() {
            return Err(Error::InvalidConfig(
                "test_rotation_deg must be finite".to_string(),
            ));
        }
        if let SourceConfig::Live { command, .. } = &self.source {
            if command.is_empty() {
                return Err(Error::InvalidConfig(
                    "live capture command must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION_JSON: &str = r#"{
        "calibration": {
            "origin_location": [0, 1],
            "marker_diameter": 153,
            "marker_separation": 500,
            "camera_offset": [300, 100],
            "iterations": 3
        },
        "machine_position": [200, 400],
        "test_rotation_deg": 20,
        "display": false,
        "source": {
            "mode": "file",
            "calibration_image": "calibration.png",
            "test_images": ["a.png", "b.png"]
        }
    }"#;

    #[test]
    fn parses_session_with_default_tuning() {
        let cfg: SessionConfig = serde_json::from_str(SESSION_JSON).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.calibration.iterations, 3);
        assert_eq!(cfg.calibration.marker_roles, MarkerRoles::Extremes);
        assert_eq!(cfg.calibration.segmentation, SegmentConfig::default());
        assert_eq!(cfg.source.test_count(), 2);
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = SESSION_JSON.replace("\"display\"", "\"displya\"");
        assert!(serde_json::from_str::<SessionConfig>(&json).is_err());
    }

    #[test]
    fn rejects_unknown_tuning_fields() {
        let typo = SESSION_JSON.replace(
            "\"iterations\": 3",
            "\"iterations\": 3, \"segmentation\": {\"median_radiu\": 3}",
        );
        assert!(serde_json::from_str::<SessionConfig>(&typo).is_err());

        let band = r#"{"hue_deg": [0, 10], "saturation": [0, 1], "value": [0, 1], "alpha": 1}"#;
        assert!(serde_json::from_str::<HsvBand>(band).is_err());

        let partial = SESSION_JSON.replace(
            "\"iterations\": 3",
            "\"iterations\": 3, \"segmentation\": {\"median_radius\": 3}",
        );
        let cfg: SessionConfig = serde_json::from_str(&partial).unwrap();
        assert_eq!(cfg.calibration.segmentation.median_radius, 3);
        assert_eq!(cfg.calibration.segmentation.close_half_size, 7);
    }

    #[test]
    fn parses_live_source() {
        let json = r#"{"mode": "live", "command": ["fswebcam", "shot.jpg"],
            "output": "shot.jpg", "settle_ms": 100, "test_captures": 1}"#;
        let src: SourceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(src.test_count(), 1);
    }

    #[test]
    fn axis_signs_follow_origin_location() {
        let cfg = CalibrationConfig::new([0, 1], 1.0, 1.0, [0.0, 0.0], 1);
        assert_eq!(cfg.axis_signs(), Vector2::new(-1.0, 1.0));
    }

    #[test]
    fn validate_rejects_zero_iterations() {
        let cfg = CalibrationConfig::new([1, 1], 153.0, 500.0, [0.0, 0.0], 0);
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn default_bands_cover_red_wraparound() {
        let seg = SegmentConfig::default();
        let hit = |h| seg.bands.iter().any(|b| b.contains(h, 1.0, 1.0));
        assert!(hit(0.0));
        assert!(hit(355.0));
        assert!(!hit(120.0));
        assert!(!seg.bands[0].contains(0.0, 0.2, 1.0));
    }
}
