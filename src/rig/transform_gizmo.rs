use log::debug;
use nalgebra::{Point3, Vector3};

use crate::misc::{Plane, Ray};

#[derive(Clone, Debug)]
struct DragSession {
    plane: Plane<f64>,
    offset: Vector3<f64>,
}

/// Translate gizmo shared by all handles.
///
/// At most one handle is attached at a time. A drag moves the attached
/// handle within the plane through it that faces the camera.
#[derive(Clone, Debug, Default)]
pub struct TransformGizmo {
    attached: Option<usize>,
    visible: bool,
    drag: Option<DragSession>,
}

impl TransformGizmo {
    /// Attach to the handle at `index`, replacing any previous attachment,
    /// and show the gizmo.
    pub fn attach(&mut self, index: usize) {
        if self.attached != Some(index) {
            self.drag = None;
        }
        self.attached = Some(index);
        self.visible = true;
        debug!("gizmo attached to handle {}", index);
    }

    pub fn detach(&mut self) {
        self.attached = None;
        self.visible = false;
        self.drag = None;
    }

    pub fn attached(&self) -> Option<usize> {
        self.attached
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start dragging the attached handle at `position`
    /// if `ray` hits the plane through it with `normal`.
    pub fn begin_drag(
        &mut self,
        ray: &Ray<f64>,
        position: &Point3<f64>,
        normal: &Vector3<f64>,
    ) -> bool {
        if self.attached.is_none() {
            return false;
        }
        let Some(plane) = Plane::try_new(*position, *normal) else {
            return false;
        };
        let Some(t) = ray.intersect_plane(&plane) else {
            return false;
        };
        let offset = position - ray.point_at(t);
        self.drag = Some(DragSession { plane, offset });
        true
    }

    /// New position of the attached handle for the pointer `ray`.
    /// `None` when not dragging or the ray misses the drag plane.
    pub fn drag(&self, ray: &Ray<f64>) -> Option<Point3<f64>> {
        let session = self.drag.as_ref()?;
        let t = ray.intersect_plane(&session.plane)?;
        Some(ray.point_at(t) + session.offset)
    }

    /// Close the editing session.
    /// Returns `true` if a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        let ended = self.drag.take().is_some();
        if ended {
            debug!("gizmo drag ended on handle {:?}", self.attached);
        }
        ended
    }
}
