//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable. Calling this more than once
/// is harmless; later calls are ignored.
///
/// # Example
/// ```
/// gloam::core::logging::init();
/// log::info!("World generated");
/// ```
pub fn init() {
    init_with_default("info");
}

/// Initialize logging with a custom default filter, e.g. `"gloam=debug"`.
/// RUST_LOG still takes precedence.
pub fn init_with_default(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init();
}

/// Logger for unit tests: output is captured per test and shown on failure.
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
