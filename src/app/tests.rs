use approx::assert_relative_eq;
use nalgebra::{Point2, Point3, Vector2, Vector3};

use super::*;
use crate::{config::RigConfig, rig::intersect_handles};

fn viewport() -> Vector2<f64> {
    Vector2::new(800., 600.)
}

fn app() -> CurveApp {
    let mut app = CurveApp::try_new(RigConfig::default()).unwrap();
    app.resize(800., 600.);
    app
}

/// Pixel position of a world point on screen.
fn client_of(app: &CurveApp, point: &Point3<f64>) -> Point2<f64> {
    let ndc = app.camera().project(point);
    let size = viewport();
    Point2::new((ndc.x + 1.) * 0.5 * size.x, (1. - ndc.y) * 0.5 * size.y)
}

/// Barycentric weights of `p` projected onto the triangle `corners`.
fn barycentric(p: &Point3<f64>, corners: &[Point3<f64>; 3]) -> Vector3<f64> {
    let [a, b, c] = corners;
    let (v0, v1, v2) = (b - a, c - a, p - a);
    let (d00, d01, d11) = (v0.dot(&v0), v0.dot(&v1), v1.dot(&v1));
    let (d20, d21) = (v2.dot(&v0), v2.dot(&v1));
    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Vector3::new(1. - v - w, v, w)
}

#[test]
fn appending_the_origin() {
    let mut app = app();
    assert_eq!(app.rig().len(), 2);

    app.panel_mut().set_x(0.);
    app.panel_mut().set_y(0.);
    app.panel_mut().set_z(0.);
    let index = app.commit_panel().unwrap();
    assert_eq!(index, 2);
    assert_eq!(app.rig().len(), 3);
    assert_eq!(app.rig().revision(), 1);
    assert_eq!(app.rig().preview().len(), 51);

    let corners: [Point3<f64>; 3] = [0, 1, 2].map(|i| app.rig().curve().control_points()[i]);
    let start = app.rig().point_at(0.);
    let weights = barycentric(&start, &corners);
    assert!(start.y.abs() < 1e-12);
    assert!(weights.iter().all(|w| *w >= -1e-9));
    assert_relative_eq!(weights.sum(), 1., epsilon = 1e-9);
    assert_relative_eq!(start, Point3::new(1., 0., -1.), epsilon = 1e-9);
}

#[test]
fn pick_attaches_nearest_handle_once() {
    let mut app = app();
    let target = *app.rig().handle(1).unwrap().position();
    let client = client_of(&app, &target);

    app.pointer_down(&client, &viewport());
    assert!(app.picker().is_armed());
    let frame = app.tick();
    assert_eq!(frame.picked, Some(1));
    assert_eq!(app.gizmo().attached(), Some(1));
    assert!(app.gizmo().is_visible());

    // the press is consumed by the first frame
    assert!(!app.picker().is_armed());
    assert_eq!(app.tick().picked, None);
}

#[test]
fn missed_pick_keeps_attachment() {
    let mut app = app();
    let target = *app.rig().handle(0).unwrap().position();
    app.pointer_down(&client_of(&app, &target), &viewport());
    app.tick();
    assert_eq!(app.gizmo().attached(), Some(0));

    app.pointer_down(&Point2::new(5., 5.), &viewport());
    assert_eq!(app.tick().picked, None);
    assert_eq!(app.gizmo().attached(), Some(0));
}

#[test]
fn drag_end_refreshes_preview() {
    let mut app = app();
    app.commit_panel().unwrap();
    let target = *app.rig().handle(2).unwrap().position();
    let client = client_of(&app, &target);
    app.pointer_down(&client, &viewport());
    assert_eq!(app.tick().picked, Some(2));

    let off = app.pointer_ray(&Point2::new(5., 5.), &viewport());
    assert!(!app.begin_drag(&off));
    let grab = app.pointer_ray(&client, &viewport());
    assert!(app.begin_drag(&grab));

    let before = app.rig().preview().to_vec();
    let moved = app.pointer_ray(&(client + Vector2::new(60., -40.)), &viewport());
    assert_eq!(app.drag(&moved).unwrap(), Some(2));
    let dragged = *app.rig().handle(2).unwrap().position();
    assert!((dragged - target).norm() > 1e-3);
    // still stale until the drag ends
    assert_eq!(app.rig().preview(), before.as_slice());

    assert!(app.end_drag().unwrap());
    assert_eq!(app.rig().revision(), 2);
    assert_ne!(app.rig().preview(), before.as_slice());
    assert_eq!(app.rig().preview(), app.rig().sample(50).as_slice());
    assert_relative_eq!(app.rig().curve().control_points()[2], dragged);

    assert!(!app.end_drag().unwrap());
    assert_eq!(app.rig().revision(), 2);
}

#[test]
fn press_on_attached_handle_keeps_the_drag() {
    let mut app = app();
    let target = *app.rig().handle(0).unwrap().position();
    let client = client_of(&app, &target);
    app.pointer_down(&client, &viewport());
    assert_eq!(app.tick().picked, Some(0));

    // a new handle halfway between the camera and handle 0 hides it
    let camera = *app.camera().position();
    let front = camera + (target - camera) * 0.5;
    app.panel_mut().set_x(front.x);
    app.panel_mut().set_y(front.y);
    app.panel_mut().set_z(front.z);
    assert_eq!(app.commit_panel().unwrap(), 2);
    let ray = app.pointer_ray(&client, &viewport());
    assert_eq!(intersect_handles(&ray, app.rig().handles())[0].index, 2);

    app.pointer_down(&client, &viewport());
    assert!(app.begin_drag(&ray));
    assert_eq!(app.tick().picked, None);
    assert!(!app.picker().is_armed());
    assert_eq!(app.gizmo().attached(), Some(0));
    assert!(app.gizmo().is_dragging());
    assert!(app.end_drag().unwrap());

    // once released the same press picks the nearer handle
    app.pointer_down(&client, &viewport());
    assert_eq!(app.tick().picked, Some(2));
}

#[test]
fn drag_without_attachment_is_ignored() {
    let mut app = app();
    let ray = app.pointer_ray(&Point2::new(400., 300.), &viewport());
    assert!(!app.begin_drag(&ray));
    assert_eq!(app.drag(&ray).unwrap(), None);
    assert!(!app.end_drag().unwrap());
}

#[test]
fn traveler_advances_and_wraps() {
    let mut app = app();
    let first = app.tick();
    assert_relative_eq!(app.traveler().t(), 0.005);
    assert_relative_eq!(first.traveler.position, app.rig().point_at(0.005));

    app.traveler_mut().set_t(0.998);
    let frame = app.tick();
    assert_eq!(app.traveler().t(), 0.);
    assert_relative_eq!(frame.traveler.position, app.rig().point_at(0.));
}

#[test]
fn resize_only_touches_camera_aspect() {
    let mut app = app();
    let handles = app.rig().handles().to_vec();
    app.resize(1000., 500.);
    assert_relative_eq!(app.camera().aspect(), 2.);
    assert_eq!(app.rig().handles(), handles.as_slice());
    assert_eq!(app.rig().revision(), 0);
}

#[cfg(feature = "flow")]
#[test]
fn flow_moves_every_frame_and_follows_edits() {
    use crate::rig::ribbon_mesh;

    let mut app = app();
    app.set_flow(ribbon_mesh(1., 0.05, 0.02, 16).positions);
    let length = app.flow().unwrap().length();

    app.tick();
    app.tick();
    assert_relative_eq!(app.flow().unwrap().offset(), 0.002, epsilon = 1e-12);

    app.panel_mut().set_x(-1.);
    app.commit_panel().unwrap();
    let flow = app.flow().unwrap();
    assert_relative_eq!(flow.length(), app.rig().curve().length());
    assert!((flow.length() - length).abs() > 1e-3);
}
