use nalgebra::{Point3, Unit, Vector3};

use crate::misc::FloatingPoint;

/// An infinite plane defined by a point on it and a unit normal.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T: FloatingPoint> {
    origin: Point3<T>,
    normal: Unit<Vector3<T>>,
}

impl<T: FloatingPoint> Plane<T> {
    /// Create a plane through `origin`.
    /// Returns `None` if `normal` is too short to be normalized.
    pub fn try_new(origin: Point3<T>, normal: Vector3<T>) -> Option<Self> {
        Unit::try_new(normal, T::default_epsilon()).map(|normal| Self { origin, normal })
    }

    pub fn origin(&self) -> &Point3<T> {
        &self.origin
    }

    pub fn normal(&self) -> &Vector3<T> {
        self.normal.as_ref()
    }

    /// Signed distance from the plane, positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3<T>) -> T {
        self.normal.dot(&(point - self.origin))
    }
}
