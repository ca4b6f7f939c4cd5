//! Flotilla - a fleet of boats bobbing on the water
//!
//! Exposes the floating-body animator and the Bevy plugins for testing and reuse.

pub mod camera;
pub mod floating;
pub mod render;
pub mod resources;
pub mod simulation;
