//! Color segmentation of calibration markers.
//!
//! The stages are:
//!
//! 1. **Mask** – median smoothing, HSV band thresholds (two bands for red,
//!    which wraps the hue origin), saturating OR, square closing.
//! 2. **Contours** – top-level outer borders of the mask.
//! 3. **Circles** – minimal enclosing circle per contour.
//!
//! Output order is contour-discovery order, which callers must not read
//! spatial meaning into.

mod annotate;
mod enclosing_circle;
mod mask;

use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType, Contour};

use crate::config::SegmentConfig;
use crate::types::{DetectedObject, PixelLocationSet};

pub use enclosing_circle::{min_enclosing_circle, Circle};

/// Output of [`segment`].
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Image center followed by one entry per detected blob.
    pub locations: PixelLocationSet,
    /// Input copy with circles and contours drawn on it.
    pub annotated: RgbImage,
    /// Cleaned binary mask the contours were traced on.
    pub mask: GrayImage,
}

fn is_external(contour: &Contour<i32>) -> bool {
    contour.border_type == BorderType::Outer && contour.parent.is_none()
}

/// Segment marker-colored blobs in `image`.
pub fn segment(image: &DynamicImage, config: &SegmentConfig) -> Segmentation {
    let rgb = image.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mask = mask::marker_mask(&rgb, config);

    let mut locations = PixelLocationSet::new(w, h);
    let mut annotated = rgb;
    let contours = find_contours::<i32>(&mask);
    for contour in contours.iter().filter(|c| is_external(c)) {
        let points: Vec<[f64; 2]> = contour
            .points
            .iter()
            .map(|p| [p.x as f64, p.y as f64])
            .collect();
        let Some(circle) = min_enclosing_circle(&points) else {
            continue;
        };
        let obj = DetectedObject::new(circle.center.x, circle.center.y, circle.radius);
        tracing::trace!(
            x = obj.center_x,
            y = obj.center_y,
            r = obj.radius,
            n_points = points.len(),
            "blob"
        );
        annotate::draw_circle(&mut annotated, &obj);
        annotate::draw_contour(&mut annotated, &contour.points);
        locations.push(obj);
    }

    tracing::debug!("{} blobs segmented", locations.markers().len());

    Segmentation {
        locations,
        annotated,
        mask,
    }
}
