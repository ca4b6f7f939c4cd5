//! Flotilla - Main Entry
//!
//! Ten boats on a plane, either on a flat background or floating on an
//! animated ocean under a movable sun.

use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};
use clap::Parser;
use flotilla::camera::OrbitCameraPlugin;
use flotilla::render::OceanRenderPlugin;
use flotilla::resources::FleetConfig;
use flotilla::simulation::{SceneKind, SimulationPlugin};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene to show
    #[arg(long, value_enum, default_value_t = SceneKind::Ocean)]
    scene: SceneKind,

    /// Seed for the boats' float amplitude and speed
    #[arg(long)]
    seed: Option<u64>,

    /// Boat model, relative to the assets folder
    #[arg(long, default_value = "models/boat.glb")]
    model: String,

    /// Number of boats
    #[arg(long, default_value_t = 10)]
    boats: usize,
}

fn main() {
    let args = Args::parse();
    let fleet = FleetConfig {
        model_path: args.model,
        boat_count: args.boats,
        ..default()
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Flotilla".into(),
            resolution: (1280.0, 720.0).into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(FrameTimeDiagnosticsPlugin)
    .add_plugins(SimulationPlugin {
        scene: args.scene,
        fleet,
        seed: args.seed,
    })
    .add_plugins(OrbitCameraPlugin)
    .insert_resource(FrameCounter(0))
    .add_systems(Update, log_frame);

    if args.scene == SceneKind::Ocean {
        app.add_plugins(OceanRenderPlugin);
    }

    app.run();
}

/// Frame counter for logging
#[derive(Resource)]
struct FrameCounter(u32);

/// Log every N frames
fn log_frame(mut counter: ResMut<FrameCounter>, diagnostics: Res<DiagnosticsStore>) {
    counter.0 += 1;
    if counter.0 % 60 == 0 {
        let fps = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
            .unwrap_or(0.0);
        info!("Frame {}: {:.1} fps", counter.0, fps);
    }
}
