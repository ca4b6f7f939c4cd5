//! Scene construction: camera, lights, and the boat fleet.
//!
//! The boat model loads asynchronously. Once the glTF is ready its scene is
//! instanced once per fleet slot; a failed load is logged and the scene
//! keeps running without boats.

use bevy::{
    asset::LoadState, core_pipeline::tonemapping::Tonemapping, gltf::Gltf, prelude::*,
    render::camera::Exposure,
};

use super::scenarios::{config, SceneKind};
use super::systems::{Floating, FloatingAnimator};
use crate::camera::OrbitCamera;
use crate::render::Sun;
use crate::resources::{FleetConfig, SkyParams};

/// Marker for every spawned boat.
#[derive(Component, Debug)]
pub struct Boat {
    /// Slot in the fleet layout
    pub index: usize,
}

/// Resource tracking the boat model load.
#[derive(Resource, Debug)]
pub struct BoatModel {
    pub handle: Handle<Gltf>,
    pub status: ModelStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelStatus {
    Loading,
    Spawned,
    Failed,
}

/// Start loading the boat model.
pub fn load_boat_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    fleet: Res<FleetConfig>,
) {
    info!("Loading boat model from {}", fleet.model_path);
    commands.insert_resource(BoatModel {
        handle: asset_server.load(fleet.model_path.clone()),
        status: ModelStatus::Loading,
    });
}

/// Run condition: the model has neither spawned nor failed yet.
pub fn model_pending(model: Option<Res<BoatModel>>) -> bool {
    model.is_some_and(|model| model.status == ModelStatus::Loading)
}

/// Spawn the fleet once the model finishes loading.
pub fn spawn_fleet(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    fleet: Res<FleetConfig>,
    scene_kind: Res<SceneKind>,
    mut model: ResMut<BoatModel>,
    mut animator: ResMut<FloatingAnimator>,
) {
    match asset_server.load_state(&model.handle) {
        LoadState::Loaded => {}
        LoadState::Failed(err) => {
            error!("Failed to load boat model {}: {err}", fleet.model_path);
            model.status = ModelStatus::Failed;
            return;
        }
        _ => return,
    }

    let Some(scene) = gltfs
        .get(&model.handle)
        .and_then(|gltf| gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned()))
    else {
        error!("Boat model {} contains no scene", fleet.model_path);
        model.status = ModelStatus::Failed;
        return;
    };

    let floating = spawn_boats(&mut commands, &scene, &fleet, scene_kind.floats(), &mut animator);
    model.status = ModelStatus::Spawned;
    info!("Spawned {} boats ({floating} floating)", fleet.boat_count);
}

/// Instance `scene` at every fleet slot, registering a floating body per
/// boat when `floats` is set. Returns how many boats float.
pub fn spawn_boats(
    commands: &mut Commands,
    scene: &Handle<Scene>,
    fleet: &FleetConfig,
    floats: bool,
    animator: &mut FloatingAnimator,
) -> usize {
    let mut floating = 0;
    for (index, placement) in fleet.placements().into_iter().enumerate() {
        let mut boat = commands.spawn((
            Name::new(format!("Boat {index}")),
            Boat { index },
            SceneRoot(scene.clone()),
            placement,
        ));

        if !floats {
            continue;
        }
        match animator.register(placement.translation.as_dvec3(), None, None) {
            Ok(handle) => {
                boat.insert(Floating { handle });
                floating += 1;
            }
            Err(err) => warn!("Boat {index} will not float: {err}"),
        }
    }
    floating
}

/// Camera, lights and background for the selected scene.
pub fn setup_scene(mut commands: Commands, scene_kind: Res<SceneKind>, sky: Res<SkyParams>) {
    let preset = scene_kind.camera();
    let orbit = OrbitCamera::new(preset.position, preset.target)
        .with_distance_limits(preset.min_distance, preset.max_distance)
        .with_max_polar_angle(preset.max_polar_angle)
        .with_smoothing(preset.smoothing);

    match *scene_kind {
        SceneKind::Static => {
            commands.insert_resource(ClearColor(config::STATIC_BACKGROUND));
            commands.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: config::STATIC_AMBIENT_BRIGHTNESS,
            });
            commands.spawn((
                DirectionalLight {
                    illuminance: config::STATIC_SUN_ILLUMINANCE,
                    ..default()
                },
                Transform::from_translation(config::STATIC_SUN_POSITION.normalize())
                    .looking_at(Vec3::ZERO, Vec3::Y),
            ));
            commands.spawn((Camera3d::default(), preset.projection(), orbit.transform(), orbit));
        }
        SceneKind::Ocean => {
            commands.insert_resource(ClearColor(sky.sky_color()));
            commands.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: config::OCEAN_AMBIENT_BRIGHTNESS,
            });
            commands.spawn((
                Sun,
                DirectionalLight {
                    illuminance: sky.sun_illuminance(),
                    ..default()
                },
                Sun::transform(sky.sun_direction()),
            ));
            commands.spawn((
                Camera3d::default(),
                preset.projection(),
                Tonemapping::AcesFitted,
                Exposure {
                    ev100: Exposure::default().ev100 + config::OCEAN_EXPOSURE_STOPS,
                },
                orbit.transform(),
                orbit,
            ));
        }
    }

    info!("Scene {:?} ready", *scene_kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn fleet_world(fleet: FleetConfig, floats: bool) -> World {
        let mut world = World::new();
        world.insert_resource(fleet);
        world.insert_resource(FloatingAnimator::new(Some(11)));
        world
            .run_system_once(
                move |mut commands: Commands,
                      fleet: Res<FleetConfig>,
                      mut animator: ResMut<FloatingAnimator>| {
                    spawn_boats(&mut commands, &Handle::default(), &fleet, floats, &mut animator)
                },
            )
            .unwrap();
        world
    }

    #[test]
    fn static_fleet_does_not_float() {
        let mut world = fleet_world(FleetConfig::default(), false);

        let boats: Vec<_> = world
            .query::<(&Boat, Option<&Floating>)>()
            .iter(&world)
            .map(|(boat, floating)| (boat.index, floating.is_some()))
            .collect();
        assert_eq!(boats.len(), 10);
        assert!(boats.iter().all(|(_, floats)| !floats));
        assert!(world.resource::<FloatingAnimator>().is_empty());
    }

    #[test]
    fn ocean_fleet_registers_one_body_per_boat() {
        let fleet = FleetConfig {
            boat_count: 4,
            ..default()
        };
        let mut world = fleet_world(fleet, true);

        let mut boats: Vec<_> = world
            .query::<(&Boat, &Floating, &Transform)>()
            .iter(&world)
            .map(|(boat, floating, transform)| (boat.index, floating.handle, transform.translation))
            .collect();
        boats.sort_by_key(|(index, _, _)| *index);
        assert_eq!(boats.len(), 4);

        let animator = world.resource::<FloatingAnimator>();
        assert_eq!(animator.len(), 4);
        for (index, handle, translation) in boats {
            let body = animator.get(handle).expect("boat body registered");
            assert_eq!(body.base_position(), translation.as_dvec3());
            assert_eq!(translation.x, index as f32 * 100.0);
        }
    }

    #[test]
    fn missing_model_fails_without_spawning() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Gltf>()
            .insert_resource(FleetConfig {
                model_path: "models/does_not_exist.glb".into(),
                ..default()
            })
            .insert_resource(SceneKind::Ocean)
            .insert_resource(FloatingAnimator::new(Some(1)))
            .add_systems(Startup, load_boat_model)
            .add_systems(Update, spawn_fleet.run_if(model_pending));

        // the load resolves on the IO task pool
        for _ in 0..500 {
            app.update();
            if app.world().resource::<BoatModel>().status != ModelStatus::Loading {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(app.world().resource::<BoatModel>().status, ModelStatus::Failed);
        let boats = app
            .world_mut()
            .query::<&Boat>()
            .iter(app.world())
            .count();
        assert_eq!(boats, 0);
        assert!(app.world().resource::<FloatingAnimator>().is_empty());
    }
}
