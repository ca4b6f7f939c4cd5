//! Simulation module - floating fleet on top of Bevy's scene graph.

mod input;
mod scenarios;
mod setup;
mod systems;

use bevy::prelude::*;

pub use input::{handle_sky_input, handle_water_input};
pub use scenarios::{config, CameraPreset, SceneKind};
pub use setup::{Boat, BoatModel, ModelStatus};
pub use systems::{Floating, FloatingAnimator, SimulationClock};

use crate::resources::{FleetConfig, SkyParams, WaterParams};

/// Ordering of the per-frame simulation work.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Sample the frame time
    Clock,
    /// Move floating bodies
    Motion,
}

/// Plugin that builds the selected scene and animates the fleet.
#[derive(Default)]
pub struct SimulationPlugin {
    pub scene: SceneKind,
    pub fleet: FleetConfig,
    /// Seed for the sampled float parameters; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.scene)
            .insert_resource(self.fleet.clone())
            .insert_resource(FloatingAnimator::new(self.seed))
            .init_resource::<SimulationClock>()
            .init_resource::<SkyParams>()
            .init_resource::<WaterParams>()
            .configure_sets(Update, (SimulationSet::Clock, SimulationSet::Motion).chain())
            .add_systems(Startup, (setup::setup_scene, setup::load_boat_model))
            .add_systems(
                Update,
                (
                    systems::tick_clock.in_set(SimulationSet::Clock),
                    systems::bob_bodies.in_set(SimulationSet::Motion),
                    setup::spawn_fleet
                        .run_if(setup::model_pending)
                        .before(SimulationSet::Motion),
                ),
            )
            .add_observer(systems::release_body);

        if self.scene.floats() {
            app.add_systems(Update, (handle_sky_input, handle_water_input));
        }
    }
}
