//! Shared synthetic images for unit tests.

use image::{DynamicImage, Rgb, RgbImage};

pub(crate) const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub(crate) const MARKER: Rgb<u8> = Rgb([230, 20, 20]);

/// White canvas with a filled red disc of `radius` at each center.
///
/// A pixel belongs to a disc when its distance to the center is `<= radius`.
pub(crate) fn draw_marker_image(
    w: u32,
    h: u32,
    centers: &[[f64; 2]],
    radius: f64,
) -> DynamicImage {
    let mut img = RgbImage::from_pixel(w, h, BACKGROUND);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let inside = centers.iter().any(|c| {
            let dx = x as f64 - c[0];
            let dy = y as f64 - c[1];
            dx * dx + dy * dy <= radius * radius
        });
        if inside {
            *px = MARKER;
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// Position of `p` after rotating it by `angle_deg` (counter-clockwise on
/// screen) about the center of a `w x h` image.
pub(crate) fn rotate_point(p: [f64; 2], angle_deg: f64, w: u32, h: u32) -> [f64; 2] {
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    let (s, c) = angle_deg.to_radians().sin_cos();
    let (dx, dy) = (p[0] - cx, p[1] - cy);
    [cx + c * dx + s * dy, cy - s * dx + c * dy]
}
