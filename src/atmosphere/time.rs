//! Time of day as a fraction of a day with day counting.

use std::f32::consts::TAU;

/// Tracks time of day as a fraction in `[0, 1)` (0 = midnight, 0.5 = noon).
///
/// Time is derived from the start fraction plus total elapsed seconds, not
/// accumulated per step, so long runs do not drift.
#[derive(Clone, Debug)]
pub struct TimeOfDay {
    start: f64,
    elapsed_days: f64,
}

impl TimeOfDay {
    /// Create a new time starting at the given fraction of a day.
    pub fn new(start: f32) -> Self {
        let start = if start.is_finite() { start.rem_euclid(1.0) } else { 0.0 };
        Self { start: start as f64, elapsed_days: 0.0 }
    }

    /// Advance by `dt_seconds`, where `day_length_seconds` real seconds make
    /// one full day. Non-positive day lengths freeze time.
    pub fn advance(&mut self, dt_seconds: f32, day_length_seconds: f32) {
        if day_length_seconds <= 0.0 || !dt_seconds.is_finite() {
            return;
        }
        self.elapsed_days += dt_seconds as f64 / day_length_seconds as f64;
    }

    /// Set the fraction directly, wrapping into `[0, 1)` and keeping the day count.
    pub fn set(&mut self, fraction: f32) {
        let days = self.day_count() as f64;
        *self = Self::new(fraction);
        self.elapsed_days = days;
    }

    /// Current fraction of the day in `[0, 1)`.
    #[inline]
    pub fn fraction(&self) -> f32 {
        let f = (self.start + self.elapsed_days).fract() as f32;
        // f64 -> f32 rounding can land exactly on 1.0
        if f >= 1.0 { 0.0 } else { f }
    }

    /// Number of midnights that have passed.
    #[inline]
    pub fn day_count(&self) -> u32 {
        (self.start + self.elapsed_days).floor() as u32
    }

    /// 1 at midnight, 0 at noon.
    #[inline]
    pub fn night_factor(&self) -> f32 {
        0.5 + 0.5 * (TAU * self.fraction()).cos()
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        let f = self.fraction();
        f < 0.23 || f > 0.81
    }

    #[inline]
    pub fn is_dawn(&self) -> bool {
        (0.21..0.31).contains(&self.fraction())
    }

    #[inline]
    pub fn is_dusk(&self) -> bool {
        (0.71..0.81).contains(&self.fraction())
    }
}
