//! Ocean rendering: the animated water material and the sun/sky update.
//!
//! The water plane uses a custom WGSL fragment shader (`water.wgsl`) that
//! perturbs the surface normal with moving ripples and lights it with the
//! sun direction taken from [`SkyParams`]. The shader time comes from the
//! same [`SimulationClock`] sample the boats bob with.

use bevy::{
    asset::embedded_asset,
    color::ColorToComponents,
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderRef, ShaderType},
};

use crate::resources::{SkyParams, WaterParams};
use crate::simulation::{SimulationClock, SimulationSet};

const WATER_SHADER: &str = "embedded://flotilla/render/water.wgsl";

/// Plugin for the ocean scene's water surface and sky.
pub struct OceanRenderPlugin;

impl Plugin for OceanRenderPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "water.wgsl");

        app.add_plugins(MaterialPlugin::<WaterMaterial>::default())
            .init_resource::<WaterParams>()
            .add_systems(Startup, spawn_water)
            .add_systems(
                Update,
                (
                    update_sun.run_if(resource_changed::<SkyParams>),
                    update_water_material.after(SimulationSet::Clock),
                ),
            );
    }
}

/// Marker for the directional light that follows [`SkyParams`].
#[derive(Component, Debug, Default)]
pub struct Sun;

impl Sun {
    /// Light transform shining from `direction` towards the origin.
    pub fn transform(direction: Vec3) -> Transform {
        // looking straight down needs a different up vector
        let up = if direction.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
        Transform::from_translation(direction).looking_at(Vec3::ZERO, up)
    }
}

/// Uniform block read by `water.wgsl`. Field order must match the shader.
#[derive(ShaderType, Debug, Clone, Default)]
pub struct WaterUniforms {
    pub time: f32,
    pub size: f32,
    pub distortion_scale: f32,
    pub sun_direction: Vec3,
    pub sun_color: Vec4,
    pub water_color: Vec4,
    pub sky_color: Vec4,
}

impl WaterUniforms {
    pub fn new(water: &WaterParams, sky: &SkyParams, time: f32) -> Self {
        Self {
            time,
            size: water.size,
            distortion_scale: water.distortion_scale,
            sun_direction: sky.sun_direction(),
            sun_color: water.sun_color.to_linear().to_vec4(),
            water_color: water.water_color.to_linear().to_vec4(),
            sky_color: sky.sky_color().to_linear().to_vec4(),
        }
    }
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct WaterMaterial {
    #[uniform(0)]
    pub uniforms: WaterUniforms,
}

impl Material for WaterMaterial {
    fn fragment_shader() -> ShaderRef {
        WATER_SHADER.into()
    }
}

/// Marker for the water plane.
#[derive(Component, Debug)]
pub struct WaterSurface;

fn spawn_water(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
    water: Res<WaterParams>,
    sky: Res<SkyParams>,
) {
    let plane = Plane3d::default().mesh().size(water.extent, water.extent);
    commands.spawn((
        Name::new("Water"),
        WaterSurface,
        Mesh3d(meshes.add(plane)),
        MeshMaterial3d(materials.add(WaterMaterial {
            uniforms: WaterUniforms::new(&water, &sky, 0.0),
        })),
        Transform::default(),
    ));
}

/// Point the sun light and recolour the sky after the sun moves.
fn update_sun(
    sky: Res<SkyParams>,
    mut clear_color: ResMut<ClearColor>,
    mut suns: Query<(&mut Transform, &mut DirectionalLight), With<Sun>>,
) {
    let direction = sky.sun_direction();
    clear_color.0 = sky.sky_color();
    for (mut transform, mut light) in &mut suns {
        *transform = Sun::transform(direction);
        light.illuminance = sky.sun_illuminance();
    }
    debug!(
        "Sun moved: elevation={:.1} azimuth={:.1}",
        sky.elevation, sky.azimuth
    );
}

/// Push the frame time and current parameters into every water material.
fn update_water_material(
    clock: Res<SimulationClock>,
    water: Res<WaterParams>,
    sky: Res<SkyParams>,
    surfaces: Query<&MeshMaterial3d<WaterMaterial>, With<WaterSurface>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    // wrap so f32 keeps sub-millisecond precision on long runs
    const PERIOD: f64 = 3600.0;
    let time = clock.elapsed.rem_euclid(PERIOD) as f32;
    for surface in &surfaces {
        if let Some(material) = materials.get_mut(&surface.0) {
            material.uniforms = WaterUniforms::new(&water, &sky, time);
        }
    }
}
