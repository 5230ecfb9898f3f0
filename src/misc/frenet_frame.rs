use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;

/// A Frenet frame at a point on a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct FrenetFrame<T: FloatingPoint> {
    position: Point3<T>,
    tangent: Vector3<T>,
    normal: Vector3<T>,
    binormal: Vector3<T>,
}

impl<T: FloatingPoint> FrenetFrame<T> {
    pub fn new(
        position: Point3<T>,
        tangent: Vector3<T>,
        normal: Vector3<T>,
        binormal: Vector3<T>,
    ) -> Self {
        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    pub fn position(&self) -> &Point3<T> {
        &self.position
    }

    pub fn tangent(&self) -> &Vector3<T> {
        &self.tangent
    }

    pub fn normal(&self) -> &Vector3<T> {
        &self.normal
    }

    pub fn binormal(&self) -> &Vector3<T> {
        &self.binormal
    }

    /// Blend two frames, renormalizing the axes.
    pub fn lerp(&self, other: &Self, t: T) -> Self {
        let axis = |a: &Vector3<T>, b: &Vector3<T>| {
            let v = a.lerp(b, t);
            v.try_normalize(T::default_epsilon()).unwrap_or(*a)
        };
        Self {
            position: self.position + (other.position - self.position) * t,
            tangent: axis(&self.tangent, &other.tangent),
            normal: axis(&self.normal, &other.normal),
            binormal: axis(&self.binormal, &other.binormal),
        }
    }

    /// Place a point given in (normal, binormal) offsets onto the frame's cross section.
    pub fn cross_section_point(&self, normal_offset: T, binormal_offset: T) -> Point3<T> {
        self.position + self.normal * normal_offset + self.binormal * binormal_offset
    }
}
