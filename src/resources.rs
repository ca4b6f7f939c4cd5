//! Tunable parameters for the fleet, the sky and the water surface.
//!
//! All values start from the scene defaults below and are clamped to the
//! ranges the runtime controls are allowed to reach.

use std::f32::consts::FRAC_PI_2;
use std::ops::RangeInclusive;

use bevy::color::Mix;
use bevy::prelude::*;

/// Layout of the replicated boat models.
#[derive(Resource, Clone, Debug)]
pub struct FleetConfig {
    /// Asset path of the boat model (glTF binary)
    pub model_path: String,
    /// Number of boats placed side by side
    pub boat_count: usize,
    /// Distance between neighbouring boats along X
    pub spacing: f32,
    /// Yaw applied to every boat (radians)
    pub yaw: f32,
    /// Uniform scale applied to every boat
    pub scale: f32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            model_path: "models/boat.glb".into(),
            boat_count: 10,
            spacing: 100.0,
            yaw: FRAC_PI_2, // boats face along Z
            scale: 1.0,
        }
    }
}

impl FleetConfig {
    /// Rest transform of boat `index`.
    pub fn placement(&self, index: usize) -> Transform {
        Transform::from_xyz(index as f32 * self.spacing, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_y(self.yaw))
            .with_scale(Vec3::splat(self.scale))
    }

    /// Rest transforms of the whole fleet, in spawn order.
    pub fn placements(&self) -> Vec<Transform> {
        (0..self.boat_count).map(|i| self.placement(i)).collect()
    }
}

/// Sun position, in degrees.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SkyParams {
    /// Angle above the horizon
    pub elevation: f32,
    /// Angle around the vertical axis, 0 = +Z
    pub azimuth: f32,
}

impl SkyParams {
    pub const ELEVATION_RANGE: RangeInclusive<f32> = 0.0..=90.0;
    pub const AZIMUTH_RANGE: RangeInclusive<f32> = -180.0..=180.0;

    pub fn set_elevation(&mut self, degrees: f32) {
        self.elevation = clamp_to(degrees, &Self::ELEVATION_RANGE);
    }

    pub fn set_azimuth(&mut self, degrees: f32) {
        self.azimuth = clamp_to(degrees, &Self::AZIMUTH_RANGE);
    }

    /// Unit vector pointing from the scene towards the sun.
    pub fn sun_direction(&self) -> Vec3 {
        let phi = (90.0 - self.elevation).to_radians(); // polar angle from +Y
        let theta = self.azimuth.to_radians();
        Vec3::new(
            phi.sin() * theta.sin(),
            phi.cos(),
            phi.sin() * theta.cos(),
        )
    }

    /// Background colour: deep blue with the sun high, warm haze near the horizon.
    pub fn sky_color(&self) -> Color {
        let day = LinearRgba::rgb(0.18, 0.36, 0.78);
        let dusk = LinearRgba::rgb(0.82, 0.46, 0.28);
        let height = self.sun_direction().y.clamp(0.0, 1.0).sqrt();
        Color::LinearRgba(dusk.mix(&day, height))
    }

    /// Directional light strength for the current sun height.
    pub fn sun_illuminance(&self) -> f32 {
        const NOON: f32 = 10_000.0;
        const TWILIGHT: f32 = 400.0;
        TWILIGHT + (NOON - TWILIGHT) * self.sun_direction().y.max(0.0)
    }
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            elevation: 2.0,
            azimuth: 180.0,
        }
    }
}

/// Appearance of the animated water surface.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct WaterParams {
    /// Strength of the normal perturbation
    pub distortion_scale: f32,
    /// Ripple size multiplier (larger = wider ripples)
    pub size: f32,
    pub water_color: Color,
    pub sun_color: Color,
    /// Side length of the square water plane
    pub extent: f32,
}

impl WaterParams {
    pub const DISTORTION_RANGE: RangeInclusive<f32> = 0.0..=8.0;
    pub const SIZE_RANGE: RangeInclusive<f32> = 0.1..=10.0;

    pub fn set_distortion_scale(&mut self, value: f32) {
        self.distortion_scale = clamp_to(value, &Self::DISTORTION_RANGE);
    }

    pub fn set_size(&mut self, value: f32) {
        self.size = clamp_to(value, &Self::SIZE_RANGE);
    }
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            distortion_scale: 3.7,
            size: 1.0,
            water_color: Color::srgb_u8(0x00, 0x1e, 0x0f),
            sun_color: Color::WHITE,
            extent: 10_000.0,
        }
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}
