//! Plain numeric records passed between pipeline stages.

use std::ops::Index;

use nalgebra::Vector2;

use crate::config::MarkerRoles;
use crate::error::{Error, Result};

/// Markers (excluding the image-center entry) needed to calibrate or transform.
pub const MIN_CALIBRATION_MARKERS: usize = 2;

/// One segmented blob reduced to its minimal enclosing circle (pixels).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DetectedObject {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl DetectedObject {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    pub(crate) fn center(&self) -> Vector2<f64> {
        Vector2::new(self.center_x, self.center_y)
    }
}

/// Image-center pseudo-object followed by the detections, in contour order.
///
/// Index 0 is always the center entry (radius 0); markers start at index 1.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelLocationSet {
    center: DetectedObject,
    markers: Vec<DetectedObject>,
}

impl PixelLocationSet {
    /// Empty set for an image of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_markers(width, height, Vec::new())
    }

    pub fn with_markers(width: u32, height: u32, markers: Vec<DetectedObject>) -> Self {
        Self {
            center: DetectedObject::new(width as f64 / 2.0, height as f64 / 2.0, 0.0),
            markers,
        }
    }

    pub fn push(&mut self, marker: DetectedObject) {
        self.markers.push(marker);
    }

    /// Total entries, center included. Never zero.
    pub fn len(&self) -> usize {
        self.markers.len() + 1
    }

    /// Always `false`: the center entry is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn center(&self) -> &DetectedObject {
        &self.center
    }

    pub fn markers(&self) -> &[DetectedObject] {
        &self.markers
    }

    /// All entries, center first.
    pub fn iter(&self) -> impl Iterator<Item = &DetectedObject> + '_ {
        std::iter::once(&self.center).chain(self.markers.iter())
    }

    /// Fail with `InsufficientMarkers` unless calibration has enough markers.
    pub fn require_markers(&self) -> Result<()> {
        if self.markers.len() < MIN_CALIBRATION_MARKERS {
            return Err(Error::insufficient(self.markers.len()));
        }
        Ok(())
    }

    /// Pick the two calibration markers according to `roles`.
    ///
    /// The first returned marker is the reference the second is measured from.
    pub fn marker_pair(&self, roles: MarkerRoles) -> Result<(DetectedObject, DetectedObject)> {
        self.require_markers()?;
        match roles {
            MarkerRoles::DetectionOrder => Ok((self.markers[0], self.markers[1])),
            MarkerRoles::Extremes => {
                let by_x =
                    |a: &&DetectedObject, b: &&DetectedObject| a.center_x.total_cmp(&b.center_x);
                let left = self.markers.iter().min_by(by_x);
                let right = self.markers.iter().max_by(by_x);
                match (left, right) {
                    (Some(l), Some(r)) => Ok((*l, *r)),
                    _ => Err(Error::insufficient(self.markers.len())),
                }
            }
        }
    }
}

impl Index<usize> for PixelLocationSet {
    type Output = DetectedObject;

    fn index(&self, index: usize) -> &DetectedObject {
        if index == 0 {
            &self.center
        } else {
            &self.markers[index - 1]
        }
    }
}

/// Physical units per pixel, per axis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationScale {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CalibrationScale {
    pub(crate) fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.scale_x, self.scale_y)
    }
}

/// Location of a marker in machine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MachineCoordinate {
    pub x: f64,
    pub y: f64,
}

impl From<Vector2<f64>> for MachineCoordinate {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl std::fmt::Display for MachineCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={:.0} y={:.0}", self.x, self.y)
    }
}

/// Result of one calibration run, valid for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Calibration {
    pub scale: CalibrationScale,
    /// Total rotation (degrees) applied to the calibration image.
    pub rotation_deg: f64,
    /// Detections in the final, rotation-corrected calibration image.
    pub detections: PixelLocationSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_markers() -> PixelLocationSet {
        PixelLocationSet::with_markers(
            400,
            300,
            vec![
                DetectedObject::new(250.0, 100.0, 10.0),
                DetectedObject::new(50.0, 110.0, 11.0),
                DetectedObject::new(350.0, 90.0, 9.0),
            ],
        )
    }

    #[test]
    fn center_entry_leads_the_set() {
        let set = PixelLocationSet::new(400, 300);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0], DetectedObject::new(200.0, 150.0, 0.0));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn indexing_skips_center() {
        let set = three_markers();
        assert_eq!(set.len(), 4);
        assert_eq!(set[1].center_x, 250.0);
        assert_eq!(set[3].center_x, 350.0);
    }

    #[test]
    fn extremes_pick_leftmost_and_rightmost() {
        let (a, b) = three_markers().marker_pair(MarkerRoles::Extremes).unwrap();
        assert_eq!(a.center_x, 50.0);
        assert_eq!(b.center_x, 350.0);
    }

    #[test]
    fn detection_order_uses_first_two() {
        let (a, b) = three_markers()
            .marker_pair(MarkerRoles::DetectionOrder)
            .unwrap();
        assert_eq!(a.center_x, 250.0);
        assert_eq!(b.center_x, 50.0);
    }

    #[test]
    fn pair_requires_two_markers() {
        let mut set = PixelLocationSet::new(10, 10);
        set.push(DetectedObject::new(1.0, 1.0, 1.0));
        let err = set.marker_pair(MarkerRoles::Extremes).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientMarkers {
                found: 1,
                required: 2
            }
        ));
    }

    #[test]
    fn coordinate_display_rounds() {
        let c = MachineCoordinate { x: 749.6, y: 500.2 };
        assert_eq!(c.to_string(), "x=750 y=500");
    }
}
