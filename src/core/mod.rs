//! Core errors, logging and weight maps shared by every generation stage

pub mod error;
pub mod logging;
pub mod weights;

pub use error::{Error, Result};
pub use weights::WeightMap;
