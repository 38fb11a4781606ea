//! Error types for the session binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the session
//! loop so `main` can propagate with `?`.

/// Top-level error for the session binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tanaman_core::config::ConfigError,
    },

    /// Offline catch-up failed.
    #[error("garden error: {source}")]
    Garden {
        /// The underlying garden error.
        #[from]
        source: tanaman_world::GardenError,
    },

    /// The session loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: tanaman_core::runner::RunnerError,
    },
}
