//! Marker color mask: median smoothing, HSV band thresholds, closing.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use palette::{FromColor, Hsv, Srgb};

use crate::config::{HsvBand, SegmentConfig};

const ON: u8 = 255;

/// Per-pixel `[hue_deg, saturation, value]`, row-major.
fn hsv_planes(rgb: &RgbImage) -> Vec<[f32; 3]> {
    rgb.pixels()
        .map(|p| {
            let srgb = Srgb::new(p[0], p[1], p[2]).into_format::<f32>();
            let hsv: Hsv = Hsv::from_color(srgb);
            [hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value]
        })
        .collect()
}

fn band_mask(hsv: &[[f32; 3]], width: u32, height: u32, band: &HsvBand) -> GrayImage {
    let raw = hsv
        .iter()
        .map(|&[h, s, v]| if band.contains(h, s, v) { ON } else { 0 })
        .collect();
    GrayImage::from_raw(width, height, raw).unwrap_or_else(|| GrayImage::new(width, height))
}

/// Saturating per-pixel sum of two equally sized masks.
fn add_saturating(acc: &mut GrayImage, other: &GrayImage) {
    for (a, b) in acc.pixels_mut().zip(other.pixels()) {
        *a = Luma([a[0].saturating_add(b[0])]);
    }
}

/// Binary mask (0 / 255) of marker-colored regions, ready for contour tracing.
pub(crate) fn marker_mask(rgb: &RgbImage, config: &SegmentConfig) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let smoothed = if config.median_radius > 0 {
        imageproc::filter::median_filter(rgb, config.median_radius, config.median_radius)
    } else {
        rgb.clone()
    };
    let hsv = hsv_planes(&smoothed);

    let mut mask = GrayImage::new(w, h);
    for band in &config.bands {
        add_saturating(&mut mask, &band_mask(&hsv, w, h, band));
    }

    if config.close_half_size > 0 {
        imageproc::morphology::close(&mask, Norm::LInf, config.close_half_size)
    } else {
        mask
    }
}
