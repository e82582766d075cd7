//! Time of day, weather and mood drift for a living scene.
//!
//! These are the slow-moving global signals the scene evolver advances each
//! tick and mirrors into the scene's weather and atmosphere weight maps.

pub mod mood;
pub mod time;
pub mod weather;

pub use mood::{clamp_fear, drift_fear, MAX_FEAR, MIN_FEAR};
pub use time::TimeOfDay;
pub use weather::{WeatherDrift, WeatherState};
