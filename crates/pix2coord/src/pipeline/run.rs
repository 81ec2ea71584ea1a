//! Convergence loop, scale solve and test pass.

use image::{DynamicImage, RgbImage};

use crate::calibrate::solve_scale;
use crate::config::CalibrationConfig;
use crate::error::Result;
use crate::rotation::{estimate_rotation, rotate_image};
use crate::segment::segment;
use crate::transform::transform;
use crate::types::{Calibration, PixelLocationSet};

use super::result::{CalibrationOutcome, LocateOutcome, TestPass};

/// Terminal state of the rotation convergence loop.
pub(crate) struct Convergence {
    pub locations: PixelLocationSet,
    pub rotation_deg: f64,
    pub annotated: RgbImage,
    pub rounds: usize,
}

/// Detect, estimate rotation, re-rotate from `original`; repeat.
///
/// Every working image is derived from `original` with the accumulated angle,
/// so resampling error never compounds. The last round only detects.
pub(crate) fn converge(
    original: &DynamicImage,
    config: &CalibrationConfig,
) -> Result<Convergence> {
    let rounds = config.iterations;
    let mut total_deg = 0.0;
    let mut working = original.clone();
    let mut round = 0;
    loop {
        let seg = segment(&working, &config.segmentation);
        tracing::debug!(
            round,
            n_markers = seg.locations.markers().len(),
            total_deg,
            "detection round"
        );
        if round + 1 >= rounds {
            return Ok(Convergence {
                locations: seg.locations,
                rotation_deg: total_deg,
                annotated: seg.annotated,
                rounds: round + 1,
            });
        }

        let step = estimate_rotation(
            &seg.locations,
            config.marker_roles,
            config.rotation_zero_threshold_px,
        )?;
        total_deg += step;
        tracing::trace!(round, step, total_deg, "rotation step");
        working = rotate_image(original, total_deg)?;
        round += 1;
    }
}

pub(crate) fn calibrate(
    image: &DynamicImage,
    config: &CalibrationConfig,
) -> Result<CalibrationOutcome> {
    let conv = converge(image, config)?;
    if conv.rotation_deg != 0.0 {
        tracing::info!("rotation required: {:.2} degrees", conv.rotation_deg);
    }
    let scale = solve_scale(&conv.locations, config)?;
    tracing::info!(
        scale_x = scale.scale_x,
        scale_y = scale.scale_y,
        rounds = conv.rounds,
        "calibration complete"
    );
    Ok(CalibrationOutcome {
        calibration: Calibration {
            scale,
            rotation_deg: conv.rotation_deg,
            detections: conv.locations,
        },
        rounds: conv.rounds,
        annotated: conv.annotated,
    })
}

pub(crate) fn locate(
    image: &DynamicImage,
    calibration: &Calibration,
    machine_position: [f64; 2],
    config: &CalibrationConfig,
) -> Result<LocateOutcome> {
    let corrected = rotate_image(image, calibration.rotation_deg)?;
    let seg = segment(&corrected, &config.segmentation);
    let coordinates: Vec<_> =
        transform(&seg.locations, &calibration.scale, machine_position, config)?.collect();
    tracing::info!("{} markers located", coordinates.len());
    Ok(LocateOutcome {
        pass: TestPass {
            machine_position,
            detections: seg.locations,
            coordinates,
        },
        annotated: seg.annotated,
    })
}
