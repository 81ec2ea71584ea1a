//! Pixel offsets from the image center to machine coordinates.

use nalgebra::Vector2;

use crate::config::CalibrationConfig;
use crate::error::Result;
use crate::types::{CalibrationScale, MachineCoordinate, PixelLocationSet};

/// Machine coordinate of every marker in `locations`, in marker order.
///
/// `machine_position` is where the machine reports itself; the image center
/// sits at `machine_position + camera_offset`. Each marker lands at
/// `camera + sign * scale * (center_px - marker_px)`, per axis.
///
/// The marker count is checked before the iterator is handed out.
pub fn transform<'a>(
    locations: &'a PixelLocationSet,
    scale: &CalibrationScale,
    machine_position: [f64; 2],
    config: &CalibrationConfig,
) -> Result<impl Iterator<Item = MachineCoordinate> + 'a> {
    locations.require_markers()?;

    let camera = Vector2::from(machine_position) + config.camera_offset();
    let gain = config.axis_signs().component_mul(&scale.as_vector());
    let center = locations.center().center();

    Ok(locations.markers().iter().map(move |m| {
        let offset_px = center - m.center();
        MachineCoordinate::from(camera + gain.component_mul(&offset_px))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::DetectedObject;
    use approx::assert_relative_eq;

    fn scenario() -> (PixelLocationSet, CalibrationScale, CalibrationConfig) {
        let set = PixelLocationSet::with_markers(
            400,
            400,
            vec![
                DetectedObject::new(100.0, 200.0, 50.0),
                DetectedObject::new(300.0, 200.0, 50.0),
            ],
        );
        let scale = CalibrationScale {
            scale_x: 2.5,
            scale_y: 1.53,
        };
        let cfg = CalibrationConfig::new([1, 0], 153.0, 500.0, [300.0, 100.0], 3);
        (set, scale, cfg)
    }

    #[test]
    fn markers_map_through_offset_scale_and_sign() {
        let (set, scale, cfg) = scenario();
        let coords: Vec<_> = transform(&set, &scale, [200.0, 400.0], &cfg)
            .unwrap()
            .collect();
        assert_eq!(coords.len(), 2);
        assert_relative_eq!(coords[0].x, 750.0);
        assert_relative_eq!(coords[0].y, 500.0);
        assert_relative_eq!(coords[1].x, 250.0);
        assert_relative_eq!(coords[1].y, 500.0);
    }

    #[test]
    fn negative_sign_flips_axis() {
        let (mut set, scale, cfg) = scenario();
        set.push(DetectedObject::new(200.0, 100.0, 50.0));
        let coords: Vec<_> = transform(&set, &scale, [0.0, 0.0], &cfg)
            .unwrap()
            .collect();
        // y sign is -1: marker 100 px above center moves to lower y.
        assert_relative_eq!(coords[2].x, 300.0);
        assert_relative_eq!(coords[2].y, 100.0 - 153.0);
    }

    #[test]
    fn repeated_calls_agree() {
        let (set, scale, cfg) = scenario();
        let a: Vec<_> = transform(&set, &scale, [200.0, 400.0], &cfg)
            .unwrap()
            .collect();
        let b: Vec<_> = transform(&set, &scale, [200.0, 400.0], &cfg)
            .unwrap()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn center_only_set_is_an_error() {
        let (_, scale, cfg) = scenario();
        let locs = PixelLocationSet::new(400, 400);
        let result = transform(&locs, &scale, [0.0, 0.0], &cfg);
        assert!(matches!(
            result.err(),
            Some(Error::InsufficientMarkers { found: 0, .. })
        ));
    }
}
