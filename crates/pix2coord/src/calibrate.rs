//! Per-axis scale from the known marker geometry.

use crate::config::CalibrationConfig;
use crate::error::{Error, Result};
use crate::types::{CalibrationScale, PixelLocationSet};

fn nonzero(quantity: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value.abs() <= f64::EPSILON {
        return Err(Error::DegenerateGeometry { quantity, value });
    }
    Ok(value)
}

/// Physical units per pixel along x and y.
///
/// `scale_x` comes from the horizontal pixel distance between the two
/// calibration markers, so it is only meaningful once the markers sit on a
/// horizontal line. `scale_y` comes from the mean marker diameter over all
/// detections.
pub fn solve_scale(
    locations: &PixelLocationSet,
    config: &CalibrationConfig,
) -> Result<CalibrationScale> {
    let (first, second) = locations.marker_pair(config.marker_roles)?;
    let separation_px = nonzero("pixel separation", (first.center_x - second.center_x).abs())?;

    let markers = locations.markers();
    let mean_diameter =
        markers.iter().map(|m| 2.0 * m.radius).sum::<f64>() / markers.len() as f64;
    let diameter_px = nonzero("pixel diameter", mean_diameter)?;

    let scale = CalibrationScale {
        scale_x: config.marker_separation / separation_px,
        scale_y: config.marker_diameter / diameter_px,
    };
    tracing::debug!(
        separation_px,
        diameter_px,
        scale_x = scale.scale_x,
        scale_y = scale.scale_y,
        "scale solved"
    );
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkerRoles;
    use crate::types::DetectedObject;
    use approx::assert_relative_eq;

    fn config() -> CalibrationConfig {
        CalibrationConfig::new([1, 0], 153.0, 500.0, [300.0, 100.0], 3)
    }

    fn set(markers: Vec<DetectedObject>) -> PixelLocationSet {
        PixelLocationSet::with_markers(400, 400, markers)
    }

    #[test]
    fn scale_from_separation_and_diameter() {
        let s = set(vec![
            DetectedObject::new(100.0, 200.0, 50.0),
            DetectedObject::new(300.0, 200.0, 50.0),
        ]);
        let scale = solve_scale(&s, &config()).unwrap();
        assert_relative_eq!(scale.scale_x, 2.5);
        assert_relative_eq!(scale.scale_y, 1.53);
    }

    #[test]
    fn separation_is_horizontal_only() {
        let s = set(vec![
            DetectedObject::new(100.0, 100.0, 25.0),
            DetectedObject::new(300.0, 300.0, 25.0),
        ]);
        let scale = solve_scale(&s, &config()).unwrap();
        assert_relative_eq!(scale.scale_x, 2.5);
        assert_relative_eq!(scale.scale_y, 153.0 / 50.0);
    }

    #[test]
    fn diameter_averages_every_marker() {
        let s = set(vec![
            DetectedObject::new(100.0, 200.0, 40.0),
            DetectedObject::new(300.0, 200.0, 60.0),
            DetectedObject::new(200.0, 300.0, 20.0),
        ]);
        let scale = solve_scale(&s, &config()).unwrap();
        assert_relative_eq!(scale.scale_y, 153.0 / 80.0);
    }

    #[test]
    fn center_only_is_insufficient() {
        let err = solve_scale(&PixelLocationSet::new(400, 400), &config()).unwrap_err();
        assert!(matches!(err, Error::InsufficientMarkers { found: 0, .. }));
    }

    #[test]
    fn stacked_markers_are_degenerate() {
        let mut cfg = config();
        cfg.marker_roles = MarkerRoles::DetectionOrder;
        let s = set(vec![
            DetectedObject::new(150.0, 100.0, 20.0),
            DetectedObject::new(150.0, 300.0, 20.0),
        ]);
        let err = solve_scale(&s, &cfg).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateGeometry {
                quantity: "pixel separation",
                ..
            }
        ));
    }

    #[test]
    fn point_markers_are_degenerate() {
        let s = set(vec![
            DetectedObject::new(100.0, 200.0, 0.0),
            DetectedObject::new(300.0, 200.0, 0.0),
        ]);
        let err = solve_scale(&s, &config()).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateGeometry {
                quantity: "pixel diameter",
                ..
            }
        ));
    }
}
