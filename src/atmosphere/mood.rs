//! Fear level drift.

use rand::Rng;

pub const MIN_FEAR: f32 = 0.1;
pub const MAX_FEAR: f32 = 1.0;
/// Largest change per tick in either direction.
pub const FEAR_STEP: f32 = 0.02;

/// Clamp a fear level into `[MIN_FEAR, MAX_FEAR]`. NaN maps to the floor.
#[inline]
pub fn clamp_fear(fear: f32) -> f32 {
    if fear.is_nan() {
        return MIN_FEAR;
    }
    fear.clamp(MIN_FEAR, MAX_FEAR)
}

/// One random-walk step of the fear level.
pub fn drift_fear<R: Rng + ?Sized>(fear: f32, rng: &mut R) -> f32 {
    clamp_fear(fear + rng.random_range(-FEAR_STEP..=FEAR_STEP))
}
