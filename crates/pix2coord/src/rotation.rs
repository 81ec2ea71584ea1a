//! Rotation estimation from the marker pair and rigid image rotation.
//!
//! Angles are in degrees; positive values rotate image content
//! counter-clockwise as seen on screen (y axis pointing down).

use image::DynamicImage;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use crate::config::MarkerRoles;
use crate::error::{Error, Result};
use crate::types::PixelLocationSet;

/// Angle that brings the two calibration markers onto a horizontal line.
///
/// Returns 0 when their vertical offset is at or below `zero_threshold_px`.
pub fn estimate_rotation(
    locations: &PixelLocationSet,
    roles: MarkerRoles,
    zero_threshold_px: f64,
) -> Result<f64> {
    let (first, second) = locations.marker_pair(roles)?;
    let dy = second.center_y - first.center_y;
    if dy.abs() <= zero_threshold_px {
        return Ok(0.0);
    }
    let dx = second.center_x - first.center_x;
    Ok((dy / dx).atan().to_degrees())
}

/// Rotate `image` by `angle_deg` about its center, keeping its dimensions.
///
/// Uncovered pixels are zero. 8- and 16-bit layouts keep their type; float
/// layouts come back as 8-bit with the same channel count. An angle of
/// exactly zero returns an unchanged copy.
pub fn rotate_image(image: &DynamicImage, angle_deg: f64) -> Result<DynamicImage> {
    if angle_deg == 0.0 {
        return Ok(image.clone());
    }
    // imageproc turns clockwise for positive angles.
    let theta = (-angle_deg).to_radians() as f32;
    let interp = Interpolation::Bilinear;
    let rotated = match image {
        DynamicImage::ImageLuma8(img) => DynamicImage::ImageLuma8(rotate_about_center(
            img,
            theta,
            interp,
            image::Luma([0]),
        )),
        DynamicImage::ImageLumaA8(img) => DynamicImage::ImageLumaA8(rotate_about_center(
            img,
            theta,
            interp,
            image::LumaA([0, 0]),
        )),
        DynamicImage::ImageRgb8(img) => DynamicImage::ImageRgb8(rotate_about_center(
            img,
            theta,
            interp,
            image::Rgb([0, 0, 0]),
        )),
        DynamicImage::ImageRgba8(img) => DynamicImage::ImageRgba8(rotate_about_center(
            img,
            theta,
            interp,
            image::Rgba([0, 0, 0, 0]),
        )),
        DynamicImage::ImageLuma16(img) => DynamicImage::ImageLuma16(rotate_about_center(
            img,
            theta,
            interp,
            image::Luma([0]),
        )),
        DynamicImage::ImageLumaA16(img) => DynamicImage::ImageLumaA16(rotate_about_center(
            img,
            theta,
            interp,
            image::LumaA([0, 0]),
        )),
        DynamicImage::ImageRgb16(img) => DynamicImage::ImageRgb16(rotate_about_center(
            img,
            theta,
            interp,
            image::Rgb([0, 0, 0]),
        )),
        DynamicImage::ImageRgba16(img) => DynamicImage::ImageRgba16(rotate_about_center(
            img,
            theta,
            interp,
            image::Rgba([0, 0, 0, 0]),
        )),
        DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb8(rotate_about_center(
            &image.to_rgb8(),
            theta,
            interp,
            image::Rgb([0, 0, 0]),
        )),
        DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba8(rotate_about_center(
            &image.to_rgba8(),
            theta,
            interp,
            image::Rgba([0, 0, 0, 0]),
        )),
        other => {
            return Err(Error::ShapeMismatch {
                color: other.color(),
            })
        }
    };
    Ok(rotated)
}
