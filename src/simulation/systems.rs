//! Per-frame systems driving the floating fleet.
//!
//! Frame order:
//! 1. Sample the frame clock once
//! 2. Compute offsets for every registered body
//! 3. Write `rest height + offset` into each boat transform

use bevy::prelude::*;

use crate::floating::{BodyHandle, FloatingBodyAnimator};

// ==================== Resources & Components ====================

/// The fleet's floating-body registry.
#[derive(Resource, Deref, DerefMut)]
pub struct FloatingAnimator(pub FloatingBodyAnimator);

impl FloatingAnimator {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(FloatingBodyAnimator::from_seed(seed)),
            None => Self(FloatingBodyAnimator::new()),
        }
    }
}

/// Elapsed time sampled once per frame. Everything animated reads this
/// instead of querying the clock on its own.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SimulationClock {
    /// Seconds since startup
    pub elapsed: f64,
}

/// Links an entity to its body in [`FloatingAnimator`].
#[derive(Component, Debug, Clone, Copy)]
pub struct Floating {
    pub handle: BodyHandle,
}

// ==================== Systems ====================

pub fn tick_clock(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    clock.elapsed = time.elapsed_secs_f64();
}

/// Apply the bobbing offset of every floating body to its transform.
pub fn bob_bodies(
    clock: Res<SimulationClock>,
    animator: Res<FloatingAnimator>,
    mut bodies: Query<(&Floating, &mut Transform)>,
) {
    let offsets = match animator.update(clock.elapsed) {
        Ok(offsets) => offsets,
        Err(err) => {
            warn!("Skipping float update: {err}");
            return;
        }
    };

    for (floating, mut transform) in &mut bodies {
        let (Some(offset), Some(body)) =
            (offsets.get(&floating.handle), animator.get(floating.handle))
        else {
            continue;
        };
        transform.translation.y = (body.base_position().y + offset) as f32;
    }
}

/// Observer: drop the body when its entity loses [`Floating`] or is despawned.
pub fn release_body(
    trigger: Trigger<OnRemove, Floating>,
    bodies: Query<&Floating>,
    mut animator: ResMut<FloatingAnimator>,
) {
    let Ok(floating) = bodies.get(trigger.entity()) else {
        return;
    };
    if let Err(err) = animator.deregister(floating.handle) {
        warn!("Entity {:?}: {err}", trigger.entity());
    }
}
