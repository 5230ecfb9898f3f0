use nalgebra::{
    Isometry3, Perspective3, Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3,
};

use crate::misc::Ray;

/// A perspective camera looking down its local -Z axis with +Y up.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    fov_y: f64,
    aspect: f64,
    near: f64,
    far: f64,
    position: Point3<f64>,
    rotation: UnitQuaternion<f64>,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        let mut camera = Self::new(40., 1., 1., 1000.);
        camera.set_position(Point3::new(2., 2., 4.));
        camera.look_at(&Point3::origin());
        camera
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    /// Overwrite the whole pose, e.g. when an orbit controller moved the camera.
    pub fn set_pose(&mut self, position: Point3<f64>, rotation: UnitQuaternion<f64>) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Rotate the camera so that it looks at `target`.
    /// Does nothing if `target` is the camera position.
    pub fn look_at(&mut self, target: &Point3<f64>) {
        let back = self.position - target;
        if back.norm_squared() <= f64::EPSILON {
            return;
        }
        let up = if back.cross(&Vector3::y()).norm_squared() <= f64::EPSILON {
            Vector3::z()
        } else {
            Vector3::y()
        };
        // +Z of the camera points away from the target
        self.rotation = UnitQuaternion::face_towards(&back, &up);
    }

    /// Update the aspect ratio after the viewport was resized.
    /// Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, size: Vector2<f64>) {
        if size.x > 0. && size.y > 0. {
            self.aspect = size.x / size.y;
        }
    }

    /// Unit vector the camera is looking along.
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * -Vector3::z()
    }

    fn projection(&self) -> Perspective3<f64> {
        Perspective3::new(self.aspect, self.fov_y.to_radians(), self.near, self.far)
    }

    fn world_from_view(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
    }

    /// Project a world point into normalized device coordinates.
    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        let view = self.world_from_view().inverse_transform_point(point);
        self.projection().project_point(&view)
    }

    /// Build a picking ray from the camera through normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: &Point2<f64>) -> Ray<f64> {
        let view = self
            .projection()
            .unproject_point(&Point3::new(ndc.x, ndc.y, 0.5));
        let world = self.world_from_view() * view;
        let direction = (world - self.position)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(|| self.forward());
        Ray::new(self.position, direction)
    }
}

/// Convert a pointer position in client pixels (origin at the top left)
/// to normalized device coordinates with +Y up.
pub fn ndc_from_client(client: &Point2<f64>, viewport: &Vector2<f64>) -> Point2<f64> {
    Point2::new(
        client.x / viewport.x * 2. - 1.,
        -(client.y / viewport.y) * 2. + 1.,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_camera_looks_at_origin() {
        let camera = PerspectiveCamera::default();
        let expected = (Point3::origin() - camera.position()).normalize();
        assert_relative_eq!(camera.forward(), expected, epsilon = 1e-12);
    }

    #[test]
    fn center_ray_goes_through_target() {
        let camera = PerspectiveCamera::default();
        let ray = camera.ray_from_ndc(&Point2::origin());
        assert_relative_eq!(*ray.origin(), *camera.position());
        assert_relative_eq!(*ray.direction(), camera.forward(), epsilon = 1e-9);
    }

    #[test]
    fn projected_point_round_trips_through_ray() {
        let camera = PerspectiveCamera::default();
        let target = Point3::new(1., 0., 1.);
        let ndc = camera.project(&target);
        let ray = camera.ray_from_ndc(&Point2::new(ndc.x, ndc.y));
        let to_target = (target - camera.position()).normalize();
        assert_relative_eq!(*ray.direction(), to_target, epsilon = 1e-9);
    }

    #[test]
    fn corner_ray_spans_field_of_view() {
        let mut camera = PerspectiveCamera::new(90., 1., 0.1, 100.);
        camera.look_at(&Point3::new(0., 0., -1.));
        let ray = camera.ray_from_ndc(&Point2::new(0., 1.));
        // half of a 90 degree field of view
        assert_relative_eq!(ray.direction().y, -ray.direction().z, epsilon = 1e-9);
    }

    #[test]
    fn resize_only_updates_aspect() {
        let mut camera = PerspectiveCamera::default();
        let before = camera.clone();
        camera.set_viewport(Vector2::new(1600., 800.));
        assert_relative_eq!(camera.aspect(), 2.);
        assert_eq!(camera.position(), before.position());
        assert_eq!(camera.fov_y(), before.fov_y());
        camera.set_viewport(Vector2::new(0., 800.));
        assert_relative_eq!(camera.aspect(), 2.);
    }

    #[test]
    fn client_to_ndc_flips_y() {
        let viewport = Vector2::new(800., 600.);
        assert_eq!(
            ndc_from_client(&Point2::new(0., 0.), &viewport),
            Point2::new(-1., 1.)
        );
        assert_eq!(
            ndc_from_client(&Point2::new(800., 600.), &viewport),
            Point2::new(1., -1.)
        );
        assert_eq!(
            ndc_from_client(&Point2::new(400., 300.), &viewport),
            Point2::new(0., 0.)
        );
    }
}
