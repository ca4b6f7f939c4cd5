//! Keyboard controls for the sky and water parameters.
//!
//! Up/Down: sun elevation, Left/Right: sun azimuth,
//! Q/E: water distortion, Z/C: water ripple size.

use bevy::prelude::*;

use crate::resources::{SkyParams, WaterParams};

const ELEVATION_SPEED: f32 = 10.0; // degrees per second
const AZIMUTH_SPEED: f32 = 45.0; // degrees per second
const DISTORTION_SPEED: f32 = 1.0; // units per second
const SIZE_SPEED: f32 = 1.0; // units per second

/// -1, 0 or +1 depending on which of the two keys is held.
fn axis(keyboard: &ButtonInput<KeyCode>, negative: KeyCode, positive: KeyCode) -> f32 {
    let mut value = 0.0;
    if keyboard.pressed(negative) {
        value -= 1.0;
    }
    if keyboard.pressed(positive) {
        value += 1.0;
    }
    value
}

/// System to move the sun with the arrow keys.
pub fn handle_sky_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut sky: ResMut<SkyParams>,
) {
    let elevation = axis(&keyboard, KeyCode::ArrowDown, KeyCode::ArrowUp);
    let azimuth = axis(&keyboard, KeyCode::ArrowLeft, KeyCode::ArrowRight);
    if elevation == 0.0 && azimuth == 0.0 {
        return;
    }

    let dt = time.delta_secs();
    let (current_elevation, current_azimuth) = (sky.elevation, sky.azimuth);
    sky.set_elevation(current_elevation + elevation * ELEVATION_SPEED * dt);
    sky.set_azimuth(current_azimuth + azimuth * AZIMUTH_SPEED * dt);
}

/// System to tune the water surface.
pub fn handle_water_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut water: ResMut<WaterParams>,
) {
    let distortion = axis(&keyboard, KeyCode::KeyQ, KeyCode::KeyE);
    let size = axis(&keyboard, KeyCode::KeyZ, KeyCode::KeyC);
    if distortion == 0.0 && size == 0.0 {
        return;
    }

    let dt = time.delta_secs();
    let (current_distortion, current_size) = (water.distortion_scale, water.size);
    water.set_distortion_scale(current_distortion + distortion * DISTORTION_SPEED * dt);
    water.set_size(current_size + size * SIZE_SPEED * dt);
}
