use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;

/// An axis-aligned bounding box in 3D space.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox<T: FloatingPoint> {
    min: Vector3<T>,
    max: Vector3<T>,
}

impl<T: FloatingPoint> BoundingBox<T> {
    /// Create a new bounding box from two corners in any order.
    pub fn new(a: Vector3<T>, b: Vector3<T>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create a cube-shaped bounding box of edge `size` centered at `center`.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use spline_handles::prelude::BoundingBox;
    ///
    /// let b = BoundingBox::from_center(&Point3::new(1., 0., 0.), 0.5);
    /// assert_eq!(b.min(), &Vector3::new(0.75, -0.25, -0.25));
    /// assert_eq!(b.max(), &Vector3::new(1.25, 0.25, 0.25));
    /// ```
    pub fn from_center(center: &Point3<T>, size: T) -> Self {
        let half = Vector3::from_element(size * T::from_f64_lossy(0.5));
        Self::new(center.coords - half, center.coords + half)
    }

    pub fn min(&self) -> &Vector3<T> {
        &self.min
    }

    pub fn max(&self) -> &Vector3<T> {
        &self.max
    }
}
