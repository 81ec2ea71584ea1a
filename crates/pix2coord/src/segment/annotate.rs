//! Overlay of detections for visual inspection only.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use imageproc::point::Point;

use crate::types::DetectedObject;

const CIRCLE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CIRCLE_THICKNESS: i32 = 4;
const CONTOUR_HALF_WIDTH: i32 = 1;

pub(crate) fn draw_circle(canvas: &mut RgbImage, obj: &DetectedObject) {
    let center = (obj.center_x as i32, obj.center_y as i32);
    let r = obj.radius as i32;
    let first = r - CIRCLE_THICKNESS / 2;
    for radius in first.max(0)..first + CIRCLE_THICKNESS {
        draw_hollow_circle_mut(canvas, center, radius, CIRCLE_COLOR);
    }
}

pub(crate) fn draw_contour(canvas: &mut RgbImage, points: &[Point<i32>]) {
    for p in points {
        draw_filled_circle_mut(canvas, (p.x, p.y), CONTOUR_HALF_WIDTH, CONTOUR_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_outline_is_drawn_in_place() {
        let mut canvas = RgbImage::new(50, 50);
        draw_circle(&mut canvas, &DetectedObject::new(25.0, 25.0, 10.0));
        assert_eq!(*canvas.get_pixel(35, 25), CIRCLE_COLOR);
        assert_eq!(*canvas.get_pixel(25, 25), Rgb([0, 0, 0]));
    }

    #[test]
    fn contour_points_outside_canvas_are_clipped() {
        let mut canvas = RgbImage::new(10, 10);
        draw_contour(&mut canvas, &[Point::new(0, 0), Point::new(-3, 20)]);
        assert_eq!(*canvas.get_pixel(0, 0), CONTOUR_COLOR);
    }
}
