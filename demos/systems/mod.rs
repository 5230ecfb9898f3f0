use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};
use bevy_egui::EguiContexts;
use bevy_panorbit_camera::PanOrbitCamera;
use nalgebra::{Point2, Point3, Quaternion, UnitQuaternion, Vector2};

use spline_handles::prelude::CurveApp;

/// The spline rig shared by every system.
#[derive(Resource)]
pub struct Rig(pub CurveApp);

pub fn to_vec3(p: &Point3<f64>) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

pub fn to_point3(v: Vec3) -> Point3<f64> {
    Point3::new(v.x as f64, v.y as f64, v.z as f64)
}

pub fn to_quat(q: &UnitQuaternion<f64>) -> Quat {
    Quat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32)
}

pub fn to_unit_quaternion(q: Quat) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(
        q.w as f64, q.x as f64, q.y as f64, q.z as f64,
    ))
}

/// Drop mouse input that belongs to the egui panel.
pub fn absorb_egui_inputs(mut mouse: ResMut<ButtonInput<MouseButton>>, mut contexts: EguiContexts) {
    if contexts.ctx_mut().is_pointer_over_area() {
        mouse.reset_all();
    }
}

/// Mirror the orbit-controlled camera pose into the rig camera.
pub fn sync_camera(mut rig: ResMut<Rig>, camera: Query<&GlobalTransform, With<Camera3d>>) {
    let Ok(transform) = camera.single() else {
        return;
    };
    let (_, rotation, translation) = transform.to_scale_rotation_translation();
    rig.0
        .camera_mut()
        .set_pose(to_point3(translation), to_unit_quaternion(rotation));
}

pub fn window_resize(mut rig: ResMut<Rig>, mut events: EventReader<WindowResized>) {
    for event in events.read() {
        rig.0.resize(event.width as f64, event.height as f64);
    }
}

/// Arm picks on press, move the grabbed handle while held, close the drag on release.
pub fn pointer_input(
    mut rig: ResMut<Rig>,
    mouse: Res<ButtonInput<MouseButton>>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut orbit: Query<&mut PanOrbitCamera>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let viewport = Vector2::new(window.width() as f64, window.height() as f64);
    let cursor = window
        .cursor_position()
        .map(|c| Point2::new(c.x as f64, c.y as f64));

    if let Some(client) = cursor {
        if mouse.just_pressed(MouseButton::Left) {
            rig.0.pointer_down(&client, &viewport);
            let ray = rig.0.pointer_ray(&client, &viewport);
            if rig.0.begin_drag(&ray) {
                for mut orbit in orbit.iter_mut() {
                    orbit.enabled = false;
                }
            }
        } else if mouse.pressed(MouseButton::Left) && rig.0.gizmo().is_dragging() {
            let ray = rig.0.pointer_ray(&client, &viewport);
            if let Err(e) = rig.0.drag(&ray) {
                error!("failed to move handle: {e}");
            }
        }
    }

    if mouse.just_released(MouseButton::Left) {
        if let Err(e) = rig.0.end_drag() {
            error!("failed to rebuild curve: {e}");
        }
        // whatever happened to the drag, the orbit camera is free again
        for mut orbit in orbit.iter_mut() {
            orbit.enabled = true;
        }
    }
}
