//! Procedural floating motion for boats.
//!
//! Each registered body bobs vertically as `amplitude * sin(time * speed)`.
//! The animator only stores motion parameters; the host owns the renderable
//! object and copies the computed offset onto its transform every frame.
//!
//! ```
//! use bevy::math::DVec3;
//! use flotilla::floating::FloatingBodyAnimator;
//!
//! let mut animator = FloatingBodyAnimator::from_seed(7);
//! let boat = animator.register(DVec3::ZERO, Some(0.5), Some(2.0)).unwrap();
//! let offsets = animator.update(std::f64::consts::FRAC_PI_4).unwrap();
//! assert!((offsets[&boat] - 0.5).abs() < 1e-9);
//! ```

mod error;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use bevy::log::debug;
use bevy::math::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use error::{FloatingError, FloatingResult};

/// Range sampled for `amplitude` when none is given at registration.
pub const AMPLITUDE_RANGE: Range<f64> = 0.2..0.7;
/// Range sampled for `speed` when none is given at registration.
pub const SPEED_RANGE: Range<f64> = 1.0..3.0;

/// Opaque identifier for a registered body. Never reused by the animator
/// that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(u64);

impl BodyHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Motion parameters of one bobbing body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingBody {
    /// Peak vertical displacement
    pub amplitude: f64,
    /// Angular frequency multiplier
    pub speed: f64,
    base_position: DVec3,
}

impl FloatingBody {
    /// Rest position. The vertical component is the level the body bobs around.
    pub fn base_position(&self) -> DVec3 {
        self.base_position
    }

    /// Vertical displacement at `time` seconds.
    pub fn offset_at(&self, time: f64) -> f64 {
        self.amplitude * (time * self.speed).sin()
    }

    /// Base position with the vertical offset at `time` applied.
    pub fn position_at(&self, time: f64) -> DVec3 {
        let mut position = self.base_position;
        position.y += self.offset_at(time);
        position
    }
}

/// Registry of floating bodies and their bobbing parameters.
///
/// Holds no rendering state: offsets are a pure function of the time passed
/// to [`update`](Self::update) and the stored parameters.
pub struct FloatingBodyAnimator<R = StdRng> {
    bodies: BTreeMap<BodyHandle, FloatingBody>,
    next_handle: u64,
    rng: R,
}

impl FloatingBodyAnimator<StdRng> {
    /// Animator whose sampled parameters come from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Animator with reproducible sampled parameters.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for FloatingBodyAnimator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FloatingBodyAnimator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            bodies: BTreeMap::new(),
            next_handle: 0,
            rng,
        }
    }

    /// Register a body resting at `base_position`.
    ///
    /// Missing `amplitude`/`speed` are drawn from [`AMPLITUDE_RANGE`] and
    /// [`SPEED_RANGE`]. Explicit values must be finite and strictly positive.
    pub fn register(
        &mut self,
        base_position: DVec3,
        amplitude: Option<f64>,
        speed: Option<f64>,
    ) -> FloatingResult<BodyHandle> {
        // Validate before sampling so a rejected call doesn't advance the rng.
        if let Some(value) = amplitude {
            check_positive("amplitude", value)?;
        }
        if let Some(value) = speed {
            check_positive("speed", value)?;
        }

        let amplitude = match amplitude {
            Some(value) => value,
            None => self.rng.gen_range(AMPLITUDE_RANGE),
        };
        let speed = match speed {
            Some(value) => value,
            None => self.rng.gen_range(SPEED_RANGE),
        };

        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(
            handle,
            FloatingBody {
                amplitude,
                speed,
                base_position,
            },
        );
        debug!(
            "registered floating body {handle}: amplitude={amplitude:.3} speed={speed:.3}"
        );
        Ok(handle)
    }

    /// Remove a body, returning its parameters.
    pub fn deregister(&mut self, handle: BodyHandle) -> FloatingResult<FloatingBody> {
        let body = self
            .bodies
            .remove(&handle)
            .ok_or(FloatingError::NotFound(handle))?;
        debug!("deregistered floating body {handle}");
        Ok(body)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&FloatingBody> {
        self.bodies.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Registered bodies in handle (registration) order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &FloatingBody)> {
        self.bodies.iter().map(|(handle, body)| (*handle, body))
    }

    /// Vertical offset of every registered body at `time`.
    pub fn update(&self, time: f64) -> FloatingResult<BTreeMap<BodyHandle, f64>> {
        check_time(time)?;
        Ok(self
            .bodies
            .iter()
            .map(|(handle, body)| (*handle, body.offset_at(time)))
            .collect())
    }

    /// Vertical offset of a single body at `time`.
    pub fn offset_of(&self, handle: BodyHandle, time: f64) -> FloatingResult<f64> {
        check_time(time)?;
        self.get(handle)
            .map(|body| body.offset_at(time))
            .ok_or(FloatingError::NotFound(handle))
    }
}

fn check_positive(name: &'static str, value: f64) -> FloatingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FloatingError::InvalidParameter { name, value })
    }
}

fn check_time(time: f64) -> FloatingResult<()> {
    if time.is_finite() {
        Ok(())
    } else {
        Err(FloatingError::InvalidTime(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn sampled_parameters_stay_in_range() {
        let mut animator = FloatingBodyAnimator::from_seed(42);
        for _ in 0..200 {
            animator.register(DVec3::ZERO, None, None).unwrap();
        }
        for (_, body) in animator.iter() {
            assert!(AMPLITUDE_RANGE.contains(&body.amplitude), "amplitude {}", body.amplitude);
            assert!(SPEED_RANGE.contains(&body.speed), "speed {}", body.speed);
        }
    }

    #[test]
    fn same_seed_same_parameters() {
        let mut a = FloatingBodyAnimator::from_seed(9);
        let mut b = FloatingBodyAnimator::from_seed(9);
        for _ in 0..10 {
            let ha = a.register(DVec3::ZERO, None, None).unwrap();
            let hb = b.register(DVec3::ZERO, None, None).unwrap();
            assert_eq!(a.get(ha), b.get(hb));
        }
    }

    #[test]
    fn rejected_registration_leaves_registry_unchanged() {
        let mut animator = FloatingBodyAnimator::from_seed(1);
        let err = animator
            .register(DVec3::ZERO, Some(0.4), Some(-1.0))
            .unwrap_err();
        assert_eq!(err, FloatingError::InvalidParameter { name: "speed", value: -1.0 });
        assert!(animator.is_empty());

        let err = animator
            .register(DVec3::ZERO, Some(f64::INFINITY), None)
            .unwrap_err();
        assert!(matches!(err, FloatingError::InvalidParameter { name: "amplitude", .. }));
        assert!(animator.is_empty());
    }

    #[test]
    fn handles_are_never_reused() {
        let mut animator = FloatingBodyAnimator::from_seed(3);
        let first = animator.register(DVec3::ZERO, Some(0.3), Some(1.5)).unwrap();
        animator.deregister(first).unwrap();
        let second = animator.register(DVec3::ZERO, Some(0.3), Some(1.5)).unwrap();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn position_keeps_horizontal_axes() {
        let body = FloatingBody {
            amplitude: 0.5,
            speed: 2.0,
            base_position: DVec3::new(300.0, 1.0, -4.0),
        };
        let position = body.position_at(PI / 4.0);
        assert_eq!(position.x, 300.0);
        assert_eq!(position.z, -4.0);
        assert!((position.y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn offset_of_unknown_handle() {
        let animator = FloatingBodyAnimator::from_seed(0);
        let err = animator.offset_of(BodyHandle(12), 1.0).unwrap_err();
        assert_eq!(err, FloatingError::NotFound(BodyHandle(12)));
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let mut animator = FloatingBodyAnimator::from_seed(0);
        animator.register(DVec3::ZERO, None, None).unwrap();
        assert!(matches!(animator.update(f64::NAN), Err(FloatingError::InvalidTime(_))));
        assert_eq!(
            animator.update(f64::NEG_INFINITY),
            Err(FloatingError::InvalidTime(f64::NEG_INFINITY))
        );
    }
}
