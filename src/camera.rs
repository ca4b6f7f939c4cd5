//! Orbit camera: left-drag orbits around a target, right-drag pans, the
//! wheel zooms. Distance and polar angle are clamped.

use std::f32::consts::PI;

use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};

const ORBIT_SENSITIVITY: f32 = 0.005; // radians per pixel
const PAN_SENSITIVITY: f32 = 0.0015; // fraction of distance per pixel
const ZOOM_STEP: f32 = 0.95; // distance multiplier per wheel line
const PIXELS_PER_LINE: f32 = 40.0;
const MIN_POLAR: f32 = 1e-3;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, orbit_camera);
    }
}

/// Spherical camera rig around `target`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle from +Y
    pub polar: f32,
    /// Angle around +Y, 0 = +Z
    pub azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar: f32,
    /// Fraction of the remaining motion covered per 60 Hz frame; `None` snaps
    pub smoothing: Option<f32>,
}

impl OrbitCamera {
    /// Rig that places the camera at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };
        Self {
            target,
            distance,
            polar,
            azimuth: offset.x.atan2(offset.z),
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            max_polar: PI,
            smoothing: None,
        }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.clamp(min, max);
        self
    }

    pub fn with_max_polar_angle(mut self, max_polar: f32) -> Self {
        self.max_polar = max_polar;
        self.polar = self.polar.clamp(MIN_POLAR, self.max_polar_limit());
        self
    }

    pub fn with_smoothing(mut self, smoothing: Option<f32>) -> Self {
        self.smoothing = smoothing.map(|factor| factor.clamp(0.0, 1.0));
        self
    }

    fn max_polar_limit(&self) -> f32 {
        self.max_polar.min(PI - MIN_POLAR)
    }

    /// Camera position implied by the rig.
    pub fn translation(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        let direction = Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth);
        self.target + self.distance * direction
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(self.target, Vec3::Y)
    }

    /// Rotate by a mouse delta in pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * ORBIT_SENSITIVITY;
        self.polar = (self.polar - delta.y * ORBIT_SENSITIVITY)
            .clamp(MIN_POLAR, self.max_polar_limit());
    }

    /// Move the target in the camera's view plane.
    pub fn pan(&mut self, delta: Vec2, rotation: Quat) {
        let scale = self.distance * PAN_SENSITIVITY;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.target += (-delta.x * right + delta.y * up) * scale;
    }

    /// Zoom by wheel lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * ZOOM_STEP.powf(lines))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Step `current` towards the rig's transform after `dt` seconds.
    pub fn smoothed(&self, current: &Transform, dt: f32) -> Transform {
        let goal = self.transform();
        let Some(factor) = self.smoothing else {
            return goal;
        };
        let alpha = 1.0 - (1.0 - factor).powf(dt * 60.0);
        Transform {
            translation: current.translation.lerp(goal.translation, alpha),
            rotation: current.rotation.slerp(goal.rotation, alpha),
            scale: goal.scale,
        }
    }
}

pub fn orbit_camera(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let delta: Vec2 = motion.read().map(|event| event.delta).sum();
    let lines: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        })
        .sum();

    let orbiting = buttons.pressed(MouseButton::Left) && delta != Vec2::ZERO;
    let panning = buttons.pressed(MouseButton::Right) && delta != Vec2::ZERO;
    let moved = orbiting || panning || lines != 0.0;

    for (mut rig, mut transform) in &mut cameras {
        if orbiting {
            rig.orbit(delta);
        }
        if panning {
            rig.pan(delta, transform.rotation);
        }
        if lines != 0.0 {
            rig.zoom(lines);
        }
        // smoothed rigs keep easing after the input stops
        if moved || rig.smoothing.is_some() {
            let next = rig.smoothed(&transform, time.delta_secs());
            *transform = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_reproduces_start_position() {
        let position = Vec3::new(30.0, 30.0, 100.0);
        let rig = OrbitCamera::new(position, Vec3::new(0.0, 10.0, 0.0));
        assert!(rig.translation().abs_diff_eq(position, 1e-3));
    }

    #[test]
    fn zoom_respects_limits() {
        let mut rig = OrbitCamera::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO)
            .with_distance_limits(40.0, 600.0);
        rig.zoom(100.0);
        assert_eq!(rig.distance, 40.0);
        rig.zoom(-1000.0);
        assert_eq!(rig.distance, 600.0);
    }

    #[test]
    fn unsmoothed_rig_snaps_to_goal() {
        let rig = OrbitCamera::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        let stale = Transform::from_xyz(5.0, 5.0, 5.0);
        assert_eq!(rig.smoothed(&stale, 1.0 / 60.0), rig.transform());
    }

    #[test]
    fn smoothing_covers_a_fraction_per_frame() {
        let rig = OrbitCamera::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO)
            .with_smoothing(Some(0.25));
        let start = Transform::from_xyz(0.0, 0.0, 200.0).looking_at(Vec3::ZERO, Vec3::Y);
        let step = rig.smoothed(&start, 1.0 / 60.0);
        assert!((step.translation.z - 175.0).abs() < 1e-2, "z = {}", step.translation.z);

        let mut current = start;
        for _ in 0..600 {
            current = rig.smoothed(&current, 1.0 / 60.0);
        }
        assert!(current.translation.abs_diff_eq(rig.translation(), 1e-3));
    }

    #[test]
    fn orbit_never_dips_below_max_polar() {
        let mut rig = OrbitCamera::new(Vec3::new(0.0, 50.0, 50.0), Vec3::ZERO)
            .with_max_polar_angle(PI * 0.495);
        rig.orbit(Vec2::new(0.0, -10_000.0));
        assert!(rig.polar <= PI * 0.495);
        assert!(rig.translation().y > 0.0);
    }
}
