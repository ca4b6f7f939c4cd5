//! Scene presets for the two demo scenes.
//!
//! Select one with `--scene static` or `--scene ocean` on the command line.

use std::f32::consts::PI;

use bevy::prelude::*;

// ==================== SCENE CONFIGS ====================

pub mod config {
    use bevy::prelude::*;

    // Static scene
    pub const STATIC_BACKGROUND: Color = Color::srgb(
        0x78 as f32 / 255.0,
        0x9b as f32 / 255.0,
        0xdb as f32 / 255.0,
    );
    pub const STATIC_AMBIENT_BRIGHTNESS: f32 = 1000.0;
    pub const STATIC_SUN_ILLUMINANCE: f32 = 5000.0;
    pub const STATIC_SUN_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);

    // Ocean scene
    pub const OCEAN_AMBIENT_BRIGHTNESS: f32 = 200.0;
    /// Stops darker than Bevy's default exposure (half the light)
    pub const OCEAN_EXPOSURE_STOPS: f32 = 1.0;
}

/// Which demo scene to build.
#[derive(Resource, clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneKind {
    /// Boats on a flat background colour
    Static,
    /// Boats bobbing on an animated ocean under a sky
    #[default]
    Ocean,
}

impl SceneKind {
    /// Whether boats in this scene get a floating body.
    pub fn floats(self) -> bool {
        matches!(self, SceneKind::Ocean)
    }

    pub fn camera(self) -> CameraPreset {
        match self {
            SceneKind::Static => CameraPreset {
                fov_degrees: 65.0,
                near: 1.0,
                far: 2000.0,
                position: Vec3::new(0.0, 50.0, 500.0),
                target: Vec3::new(500.0, 0.0, 0.0), // middle of the fleet
                min_distance: 50.0,
                max_distance: 2000.0,
                max_polar_angle: PI,
                smoothing: Some(0.25),
            },
            SceneKind::Ocean => CameraPreset {
                fov_degrees: 55.0,
                near: 1.0,
                far: 200_000.0,
                position: Vec3::new(30.0, 30.0, 100.0),
                target: Vec3::new(0.0, 10.0, 0.0),
                min_distance: 40.0,
                max_distance: 600.0,
                // keep the camera above the water plane
                max_polar_angle: PI * 0.495,
                smoothing: None,
            },
        }
    }
}

/// Initial camera placement and orbit limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPreset {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest angle between the camera offset and +Y
    pub max_polar_angle: f32,
    /// Orbit easing factor, see [`crate::camera::OrbitCamera::smoothed`]
    pub smoothing: Option<f32>,
}

impl CameraPreset {
    pub fn projection(&self) -> Projection {
        Projection::Perspective(PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            ..default()
        })
    }
}
