use bevy::{
    asset::load_internal_asset,
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderRef},
};

const LINE_SHADER: Handle<Shader> = Handle::weak_from_u128(0x5b1e_4a2d_9c07_41f3_8e62_d0a9_c3f1_7e24);

/// Flat colored material for line strips such as the curve preview.
#[derive(Asset, TypePath, Default, AsBindGroup, Debug, Clone)]
pub struct LineMaterial {
    #[uniform(0)]
    pub color: Color,
}

impl Material for LineMaterial {
    fn fragment_shader() -> ShaderRef {
        ShaderRef::Handle(LINE_SHADER.clone())
    }
}

/// Registers [`LineMaterial`] together with its embedded shader.
pub struct LineMaterialPlugin;

impl Plugin for LineMaterialPlugin {
    fn build(&self, app: &mut App) {
        load_internal_asset!(app, LINE_SHADER, "line_material.wgsl", Shader::from_wgsl);
        app.add_plugins(MaterialPlugin::<LineMaterial>::default());
    }
}
