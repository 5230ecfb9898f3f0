use bevy::{
    color::palettes::css::{LIME, RED, WHITE, YELLOW},
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
    render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues},
};
use bevy_egui::{egui, EguiContextPass, EguiContexts, EguiPlugin};
use bevy_infinite_grid::{InfiniteGridBundle, InfiniteGridPlugin};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use nalgebra::Point3;

use spline_handles::prelude::*;

mod materials;
mod systems;

use materials::*;
use systems::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: (800., 600.).into(),
                title: "Spline Handles".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(LineMaterialPlugin)
        .add_plugins(InfiniteGridPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(AppPlugin)
        .run();
}

struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut bevy::prelude::App) {
        let rig = match CurveApp::try_new(RigConfig::default()) {
            Ok(rig) => rig,
            Err(e) => panic!("invalid rig configuration: {e}"),
        };
        app.insert_resource(Rig(rig))
            .add_systems(Startup, setup)
            .add_systems(
                PreUpdate,
                (absorb_egui_inputs,)
                    .after(bevy_egui::input::write_egui_input_system)
                    .before(bevy_egui::begin_pass_system),
            )
            .add_systems(EguiContextPass, update_ui)
            .add_systems(
                Update,
                (
                    window_resize,
                    sync_camera,
                    pointer_input,
                    advance,
                    sync_handles,
                    sync_preview,
                    draw_gizmo,
                )
                    .chain(),
            );
    }
}

#[derive(Component)]
struct HandleMarker(usize);

#[derive(Component)]
struct PreviewLine;

#[derive(Component)]
struct TravelerCube;

#[cfg(feature = "flow")]
#[derive(Component)]
struct FlowRibbon;

#[derive(Resource)]
struct MarkerAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

fn polyline(points: &[Point3<f64>]) -> VertexAttributeValues {
    VertexAttributeValues::Float32x3(
        points
            .iter()
            .map(|p| p.cast::<f32>())
            .map(|p| [p.x, p.y, p.z])
            .collect(),
    )
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut line_materials: ResMut<Assets<LineMaterial>>,
    mut rig: ResMut<Rig>,
    window: Query<&Window>,
) {
    if let Ok(window) = window.single() {
        rig.0.resize(window.width() as f64, window.height() as f64);
    }
    let config = rig.0.config().clone();

    let marker = MarkerAssets {
        mesh: meshes.add(Cuboid::from_length(config.marker_size as f32)),
        material: materials.add(StandardMaterial {
            base_color: WHITE.into(),
            unlit: true,
            ..Default::default()
        }),
    };
    for (i, handle) in rig.0.rig().handles().iter().enumerate() {
        commands.spawn((
            HandleMarker(i),
            Mesh3d(marker.mesh.clone()),
            MeshMaterial3d(marker.material.clone()),
            Transform::from_translation(to_vec3(handle.position())),
        ));
    }
    commands.insert_resource(marker);

    let line = Mesh::new(PrimitiveTopology::LineStrip, default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, polyline(rig.0.rig().preview()));
    commands
        .spawn((
            PreviewLine,
            Mesh3d(meshes.add(line)),
            MeshMaterial3d(line_materials.add(LineMaterial {
                color: LIME.into(),
            })),
        ))
        .insert(Name::new("preview"));

    commands
        .spawn((
            TravelerCube,
            Mesh3d(meshes.add(Cuboid::from_length(config.traveler_size as f32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: RED.into(),
                unlit: true,
                ..Default::default()
            })),
            Transform::default(),
        ))
        .insert(Name::new("traveler"));

    #[cfg(feature = "flow")]
    {
        let ribbon = ribbon_mesh(1.5, 0.08, 0.02, 128);
        rig.0.set_flow(ribbon.positions.clone());
        let mesh = Mesh::new(PrimitiveTopology::TriangleList, default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, polyline(&ribbon.positions))
            .with_inserted_indices(Indices::U32(ribbon.indices))
            .with_computed_normals();
        commands
            .spawn((
                FlowRibbon,
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb_u8(0x99, 0xff, 0xff),
                    ..Default::default()
                })),
            ))
            .insert(Name::new("flow"));
    }

    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0xff, 0xaa, 0x33),
            ..Default::default()
        },
        Transform::from_translation(Vec3::new(-10., 10., 10.)).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x00, 0x39, 0x73),
        brightness: 500.,
        ..Default::default()
    });

    let camera = rig.0.camera();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: (camera.fov_y() as f32).to_radians(),
            near: camera.near() as f32,
            far: camera.far() as f32,
            ..Default::default()
        }),
        Transform::from_translation(to_vec3(camera.position())).looking_at(Vec3::ZERO, Vec3::Y),
        PanOrbitCamera::default(),
    ));
    commands.spawn(InfiniteGridBundle::default());
}

fn update_ui(
    mut contexts: EguiContexts,
    mut rig: ResMut<Rig>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let field = *rig.0.panel().field();
    let range = field.min..=field.max;
    egui::Window::new("curve")
        .collapsible(false)
        .resizable(false)
        .default_width(240.)
        .show(contexts.ctx_mut(), |ui| {
            let fps = diagnostics
                .get(&FrameTimeDiagnosticsPlugin::FPS)
                .and_then(|d| d.smoothed());
            if let Some(fps) = fps {
                ui.label(format!("{:.0} fps", fps));
            }

            let panel = rig.0.panel_mut();
            let (mut x, mut y, mut z) = (panel.x(), panel.y(), panel.z());
            ui.add(egui::Slider::new(&mut x, range.clone()).step_by(field.step).text("x"));
            ui.add(egui::Slider::new(&mut y, range.clone()).step_by(field.step).text("y"));
            ui.add(egui::Slider::new(&mut z, range).step_by(field.step).text("z"));
            panel.set_x(x);
            panel.set_y(y);
            panel.set_z(z);

            if ui.button("Add Point").clicked() {
                match rig.0.commit_panel() {
                    Ok(index) => info!("added control point {index}"),
                    Err(e) => error!("failed to add control point: {e}"),
                }
            }
        });
}

/// One frame of the rig: resolve picks, move the flow mesh and the traveler.
fn advance(
    mut rig: ResMut<Rig>,
    mut traveler: Query<&mut Transform, With<TravelerCube>>,
    #[cfg(feature = "flow")] flow: Query<&Mesh3d, With<FlowRibbon>>,
    #[cfg(feature = "flow")] mut meshes: ResMut<Assets<Mesh>>,
) {
    let frame = rig.0.tick();
    if let Some(index) = frame.picked {
        info!("selected control point {index}");
    }

    if let Ok(mut transform) = traveler.single_mut() {
        transform.translation = to_vec3(&frame.traveler.position);
        transform.rotation = to_quat(&frame.traveler.rotation);
    }

    #[cfg(feature = "flow")]
    if let (Some(state), Ok(handle)) = (rig.0.flow(), flow.single()) {
        if let Some(mesh) = meshes.get_mut(&handle.0) {
            mesh.insert_attribute(
                Mesh::ATTRIBUTE_POSITION,
                polyline(&state.deformed_positions()),
            );
            mesh.compute_normals();
        }
    }
}

/// Keep markers on their handles and spawn markers for appended handles.
fn sync_handles(
    mut commands: Commands,
    rig: Res<Rig>,
    assets: Res<MarkerAssets>,
    mut markers: Query<(&HandleMarker, &mut Transform)>,
) {
    let handles = rig.0.rig().handles();
    let mut count = 0;
    for (marker, mut transform) in markers.iter_mut() {
        if let Some(handle) = handles.get(marker.0) {
            transform.translation = to_vec3(handle.position());
        }
        count += 1;
    }
    for (i, handle) in handles.iter().enumerate().skip(count) {
        commands.spawn((
            HandleMarker(i),
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(to_vec3(handle.position())),
        ));
    }
}

/// Replace the preview polyline whenever the rig regenerated it.
fn sync_preview(
    rig: Res<Rig>,
    line: Query<&Mesh3d, With<PreviewLine>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut revision: Local<u64>,
) {
    let current = rig.0.rig().revision();
    if current == *revision {
        return;
    }
    let Ok(handle) = line.single() else {
        return;
    };
    if let Some(mesh) = meshes.get_mut(&handle.0) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, polyline(rig.0.rig().preview()));
        *revision = current;
    }
}

fn draw_gizmo(rig: Res<Rig>, mut gizmos: Gizmos) {
    let gizmo = rig.0.gizmo();
    if !gizmo.is_visible() {
        return;
    }
    let Some(handle) = gizmo.attached().and_then(|i| rig.0.rig().handle(i)) else {
        return;
    };
    let position = to_vec3(handle.position());
    gizmos.axes(Transform::from_translation(position), 0.3);
    if gizmo.is_dragging() {
        gizmos.sphere(
            Isometry3d::from_translation(position),
            handle.size() as f32,
            YELLOW,
        );
    }
}
