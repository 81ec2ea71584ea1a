//! Minimal enclosing circle of a point set (Welzl, iterative form).
//!
//! Points are visited in a shuffled order so the expected running time is
//! linear. The shuffle is seeded, so identical inputs always give identical
//! circles.

use nalgebra::{Point2, Vector2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const SHUFFLE_SEED: u64 = 0x5eed_c1c1e;

/// Relative slack when testing containment, absorbs round-off in the
/// circumcircle construction.
const CONTAIN_EPS: f64 = 1e-9;

/// Circle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl Circle {
    fn from_point(p: Point2<f64>) -> Self {
        Self {
            center: p,
            radius: 0.0,
        }
    }

    fn from_diameter(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            center: nalgebra::center(&a, &b),
            radius: 0.5 * (b - a).norm(),
        }
    }

    /// Circumcircle of a triangle; widest two-point circle when collinear.
    fn from_triangle(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Self {
        let ab: Vector2<f64> = b - a;
        let ac: Vector2<f64> = c - a;
        let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
        if d.abs() < 1e-12 {
            return [
                Self::from_diameter(a, b),
                Self::from_diameter(a, c),
                Self::from_diameter(b, c),
            ]
            .into_iter()
            .max_by(|l, r| l.radius.total_cmp(&r.radius))
            .unwrap_or_else(|| Self::from_point(a));
        }
        let ab2 = ab.norm_squared();
        let ac2 = ac.norm_squared();
        let ux = (ac.y * ab2 - ab.y * ac2) / d;
        let uy = (ab.x * ac2 - ac.x * ab2) / d;
        let offset = Vector2::new(ux, uy);
        Self {
            center: a + offset,
            radius: offset.norm(),
        }
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        (p - self.center).norm() <= self.radius * (1.0 + CONTAIN_EPS) + CONTAIN_EPS
    }
}

/// Smallest circle containing every point, or `None` for an empty slice.
pub fn min_enclosing_circle(points: &[[f64; 2]]) -> Option<Circle> {
    let mut pts: Vec<Point2<f64>> = points.iter().map(|&[x, y]| Point2::new(x, y)).collect();
    let first = *pts.first()?;
    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    pts.shuffle(&mut rng);

    let mut circle = Circle::from_point(first);
    for i in 0..pts.len() {
        if circle.contains(&pts[i]) {
            continue;
        }
        circle = Circle::from_point(pts[i]);
        for j in 0..i {
            if circle.contains(&pts[j]) {
                continue;
            }
            circle = Circle::from_diameter(pts[i], pts[j]);
            for k in 0..j {
                if !circle.contains(&pts[k]) {
                    circle = Circle::from_triangle(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    Some(circle)
}
