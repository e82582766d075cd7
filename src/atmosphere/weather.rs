//! Weather drift.
//!
//! Fog and wind follow noise-driven targets that depend on time of day and
//! move toward them with exponential smoothing, one step per evolution tick.

use crate::core::WeightMap;
use crate::noise_field::NoiseField;

use super::time::TimeOfDay;

/// Fraction of the gap to the target closed each tick.
pub const WEATHER_SMOOTHING: f32 = 0.1;

/// Noise coordinate advance per tick.
const NOISE_STEP: f32 = 0.17;

/// Fog and wind intensities, both in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherState {
    pub fog: f32,
    pub wind: f32,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self { fog: 0.3, wind: 0.2 }
    }
}

impl WeatherState {
    /// Read `fog` and `wind` from a weight map, falling back to defaults.
    pub fn from_weights(weights: &WeightMap) -> Self {
        let d = Self::default();
        Self {
            fog: weights.get("fog", d.fog),
            wind: weights.get("wind", d.wind),
        }
        .clamped()
    }

    /// Linearly interpolate between two states.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            fog: self.fog + (other.fog - self.fog) * t,
            wind: self.wind + (other.wind - self.wind) * t,
        }
    }

    pub fn clamped(self) -> Self {
        Self { fog: self.fog.clamp(0.0, 1.0), wind: self.wind.clamp(0.0, 1.0) }
    }

    /// Write both intensities into a weight map.
    pub fn write_to(&self, weights: &mut WeightMap) {
        weights.set("fog", self.fog);
        weights.set("wind", self.wind);
    }
}

/// Smoothed, noise-driven weather.
#[derive(Clone, Debug)]
pub struct WeatherDrift {
    state: WeatherState,
    fog_noise: NoiseField,
    wind_noise: NoiseField,
    ticks: u64,
}

impl WeatherDrift {
    pub fn new(seed: u32, initial: WeatherState) -> Self {
        let base = NoiseField::new(seed);
        Self {
            state: initial.clamped(),
            fog_noise: base.channel(101),
            wind_noise: base.channel(102),
            ticks: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> WeatherState {
        self.state
    }

    /// Targets for the current tick: fog thickens at night, wind picks up
    /// at dawn and dusk.
    pub fn targets(&self, time: &TimeOfDay) -> WeatherState {
        let s = self.ticks as f32 * NOISE_STEP;
        let fog_n = (self.fog_noise.perlin_1d(s + 0.5) + 1.0) * 0.5;
        let wind_n = (self.wind_noise.perlin_1d(s + 0.5) + 1.0) * 0.5;

        let fog = 0.15 + 0.5 * time.night_factor() + 0.35 * fog_n;
        let mut wind = 0.1 + 0.6 * wind_n;
        if time.is_dawn() || time.is_dusk() {
            wind *= 1.5;
        }
        WeatherState { fog, wind }.clamped()
    }

    /// Advance one tick and return the new state.
    pub fn tick(&mut self, time: &TimeOfDay) -> WeatherState {
        let target = self.targets(time);
        self.state = self.state.lerp(&target, WEATHER_SMOOTHING).clamped();
        self.ticks += 1;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        let a = WeatherState { fog: 0.0, wind: 1.0 };
        let b = WeatherState { fog: 1.0, wind: 0.0 };
        let m = a.lerp(&b, 0.25);
        assert!((m.fog - 0.25).abs() < 1e-6);
        assert!((m.wind - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_from_weights_defaults_and_clamps() {
        let w: WeightMap = [("fog", 3.0)].into_iter().collect();
        let s = WeatherState::from_weights(&w);
        assert_eq!(s.fog, 1.0);
        assert_eq!(s.wind, WeatherState::default().wind);
    }

    #[test]
    fn test_tick_moves_a_tenth_toward_target() {
        let time = TimeOfDay::new(0.0);
        let mut drift = WeatherDrift::new(5, WeatherState { fog: 0.0, wind: 0.0 });
        let target = drift.targets(&time);
        let after = drift.tick(&time);
        assert!((after.fog - target.fog * WEATHER_SMOOTHING).abs() < 1e-6);
        assert!((after.wind - target.wind * WEATHER_SMOOTHING).abs() < 1e-6);
    }

    #[test]
    fn test_stays_in_range() {
        let mut time = TimeOfDay::new(0.0);
        let mut drift = WeatherDrift::new(9, WeatherState::default());
        for _ in 0..2000 {
            time.advance(7.0, 600.0);
            let s = drift.tick(&time);
            assert!((0.0..=1.0).contains(&s.fog), "fog {}", s.fog);
            assert!((0.0..=1.0).contains(&s.wind), "wind {}", s.wind);
        }
    }

    #[test]
    fn test_night_is_foggier_than_noon() {
        // Same noise sample, different time of day
        let drift = WeatherDrift::new(3, WeatherState::default());
        let night = drift.targets(&TimeOfDay::new(0.0));
        let noon = drift.targets(&TimeOfDay::new(0.5));
        assert!(night.fog > noon.fog);
    }

    #[test]
    fn test_deterministic() {
        let time = TimeOfDay::new(0.3);
        let mut a = WeatherDrift::new(77, WeatherState::default());
        let mut b = WeatherDrift::new(77, WeatherState::default());
        for _ in 0..50 {
            assert_eq!(a.tick(&time), b.tick(&time));
        }
    }
}
