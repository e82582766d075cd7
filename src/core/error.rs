//! Error types for the gloam engine

use thiserror::Error;

/// Main error type for the engine.
///
/// Only construction-time validation produces errors; per-frame queries and
/// evolution ticks degrade to sentinel values instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown biome: {0}")]
    UnknownBiome(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::UnknownBiome("volcano".into()).to_string(), "unknown biome: volcano");
        assert_eq!(
            Error::InvalidConfig("grid must be non-empty".into()).to_string(),
            "invalid configuration: grid must be non-empty"
        );
    }
}
