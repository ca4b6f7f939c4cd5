//! Scene preset tests: fleet layout, sun placement, and runtime parameter ranges.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use flotilla::resources::{FleetConfig, SkyParams, WaterParams};
use flotilla::simulation::SceneKind;

#[test]
fn test_default_fleet_layout() {
    let fleet = FleetConfig::default();
    let placements = fleet.placements();
    assert_eq!(placements.len(), 10);

    for (i, placement) in placements.iter().enumerate() {
        assert_eq!(placement.translation, Vec3::new(i as f32 * 100.0, 0.0, 0.0));
        assert_eq!(placement.scale, Vec3::ONE);
        let (yaw, pitch, roll) = placement.rotation.to_euler(EulerRot::YXZ);
        assert!((yaw - FRAC_PI_2).abs() < 1e-5, "boat {i} yaw {yaw}");
        assert!(pitch.abs() < 1e-5 && roll.abs() < 1e-5);
    }
}

#[test]
fn test_fleet_size_follows_config() {
    let fleet = FleetConfig {
        boat_count: 3,
        spacing: 40.0,
        ..default()
    };
    let placements = fleet.placements();
    assert_eq!(placements.len(), 3);
    assert_eq!(placements[2].translation.x, 80.0);
}

#[test]
fn test_default_sun_is_low_behind_fleet() {
    let sun = SkyParams::default().sun_direction();
    // 2 degrees above the horizon, towards -Z
    assert!((sun.y - 2f32.to_radians().sin()).abs() < 1e-5);
    assert!(sun.z < -0.99);
    assert!(sun.x.abs() < 1e-5);
}

#[test]
fn test_sun_follows_azimuth() {
    let sky = SkyParams {
        elevation: 0.0,
        azimuth: 90.0,
    };
    assert!(sky.sun_direction().abs_diff_eq(Vec3::X, 1e-5));
}

#[test]
fn test_water_defaults_inside_control_ranges() {
    let water = WaterParams::default();
    assert!(WaterParams::DISTORTION_RANGE.contains(&water.distortion_scale));
    assert!(WaterParams::SIZE_RANGE.contains(&water.size));
}

#[test]
fn test_ocean_camera_stays_above_water() {
    let preset = SceneKind::Ocean.camera();
    assert!(preset.max_polar_angle < PI / 2.0);
    assert!(preset.position.y > 0.0);
}
