use nalgebra::{Point3, Vector3};

use crate::misc::{BoundingBox, FloatingPoint, Plane};

/// Represents a ray in 3D space.
#[derive(Clone, Debug)]
pub struct Ray<T: FloatingPoint> {
    pub(crate) origin: Point3<T>,
    pub(crate) direction: Vector3<T>,
}

impl<T: FloatingPoint> Ray<T> {
    pub fn new(origin: Point3<T>, direction: Vector3<T>) -> Self {
        Self { origin, direction }
    }

    pub fn origin(&self) -> &Point3<T> {
        &self.origin
    }

    pub fn direction(&self) -> &Vector3<T> {
        &self.direction
    }

    pub fn point_at(&self, t: T) -> Point3<T> {
        self.origin + self.direction * t
    }

    /// Finds the ray parameter where the ray enters the box.
    /// If the origin is inside the box, the exit parameter is returned instead.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use spline_handles::prelude::{BoundingBox, Ray};
    ///
    /// let bbox = BoundingBox::new(Vector3::from_element(-1.), Vector3::from_element(1.));
    /// let ray = Ray::new(Point3::new(0., 0., 5.), -Vector3::z());
    /// assert_eq!(ray.intersect_bounding_box(&bbox), Some(4.));
    ///
    /// let miss = Ray::new(Point3::new(2., 0., 5.), -Vector3::z());
    /// assert_eq!(miss.intersect_bounding_box(&bbox), None);
    /// ```
    pub fn intersect_bounding_box(&self, bbox: &BoundingBox<T>) -> Option<T> {
        let mut near = T::from_f64_lossy(f64::NEG_INFINITY);
        let mut far = T::from_f64_lossy(f64::INFINITY);

        for i in 0..3 {
            let o = self.origin[i];
            let d = self.direction[i];
            let (lo, hi) = (bbox.min()[i], bbox.max()[i]);

            // Parallel to the slab
            if d.abs() < T::default_epsilon() {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = T::one() / d;
            let t0 = (lo - o) * inv;
            let t1 = (hi - o) * inv;
            let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            near = near.max(t0);
            far = far.min(t1);
            if near > far {
                return None;
            }
        }

        if far < T::zero() {
            None
        } else if near >= T::zero() {
            Some(near)
        } else {
            Some(far)
        }
    }

    /// Finds the ray parameter where the ray crosses the plane.
    /// Rays parallel to the plane or pointing away from it do not intersect.
    pub fn intersect_plane(&self, plane: &Plane<T>) -> Option<T> {
        let denom = plane.normal().dot(&self.direction);
        if denom.abs() < T::default_epsilon() {
            return None;
        }
        let t = -plane.signed_distance(&self.origin) / denom;
        (t >= T::zero()).then_some(t)
    }
}
