use std::cmp::Ordering;

use log::trace;
use nalgebra::{Point2, Point3, Vector2};

use crate::{camera::ndc_from_client, misc::Ray, rig::ControlHandle};

/// Whether a pick is waiting for the next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PickAction {
    #[default]
    None,
    Select,
}

/// A ray hit on a control handle.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleIntersection {
    pub index: usize,
    pub distance: f64,
    pub point: Point3<f64>,
}

/// Turns pointer presses into at most one pick per press.
///
/// A press only records the pointer and arms the picker;
/// the frame loop resolves the pick with [`Picker::take`].
#[derive(Clone, Debug, Default)]
pub struct Picker {
    action: PickAction,
    pointer: Point2<f64>,
}

impl Picker {
    /// Record a pointer press in client pixels and arm the picker.
    pub fn pointer_down(&mut self, client: &Point2<f64>, viewport: &Vector2<f64>) {
        self.pointer = ndc_from_client(client, viewport);
        self.action = PickAction::Select;
        trace!("pick armed at {:?}", self.pointer);
    }

    pub fn action(&self) -> PickAction {
        self.action
    }

    pub fn is_armed(&self) -> bool {
        self.action == PickAction::Select
    }

    /// Disarm and return the pointer if a pick is pending.
    pub fn take(&mut self) -> Option<Point2<f64>> {
        match std::mem::take(&mut self.action) {
            PickAction::Select => Some(self.pointer),
            PickAction::None => None,
        }
    }
}

/// Intersect `ray` with every handle, nearest hit first.
pub fn intersect_handles(ray: &Ray<f64>, handles: &[ControlHandle]) -> Vec<HandleIntersection> {
    let mut hits: Vec<_> = handles
        .iter()
        .enumerate()
        .filter_map(|(index, handle)| {
            ray.intersect_bounding_box(&handle.bounding_box())
                .map(|distance| HandleIntersection {
                    index,
                    distance,
                    point: ray.point_at(distance),
                })
        })
        .collect();
    hits.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
    hits
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use super::*;

    fn handles() -> Vec<ControlHandle> {
        vec![
            ControlHandle::new(Point3::new(0., 0., -2.), 0.5),
            ControlHandle::new(Point3::new(0., 0., -1.), 0.5),
            ControlHandle::new(Point3::new(3., 0., -1.), 0.5),
        ]
    }

    #[test]
    fn one_pick_per_press() {
        let mut picker = Picker::default();
        assert!(picker.take().is_none());

        picker.pointer_down(&Point2::new(400., 300.), &Vector2::new(800., 600.));
        assert!(picker.is_armed());
        assert_eq!(picker.take(), Some(Point2::origin()));
        assert_eq!(picker.action(), PickAction::None);
        assert!(picker.take().is_none());
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let ray = Ray::new(Point3::origin(), -Vector3::z());
        let hits = intersect_handles(&ray, &handles());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[1].index, 0);
        assert!(hits[0].distance < hits[1].distance);
        assert_eq!(hits[0].point, Point3::new(0., 0., -0.75));
    }

    #[test]
    fn ray_missing_everything() {
        let ray = Ray::new(Point3::new(0., 5., 0.), -Vector3::z());
        assert!(intersect_handles(&ray, &handles()).is_empty());
    }
}
