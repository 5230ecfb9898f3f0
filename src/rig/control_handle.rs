use nalgebra::Point3;

use crate::misc::BoundingBox;

/// A draggable cube marker owning one control point of the curve.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlHandle {
    position: Point3<f64>,
    size: f64,
}

impl ControlHandle {
    pub fn new(position: Point3<f64>, size: f64) -> Self {
        Self { position, size }
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    /// Edge length of the marker cube
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Pickable volume of the marker.
    pub fn bounding_box(&self) -> BoundingBox<f64> {
        BoundingBox::from_center(&self.position, self.size)
    }
}
