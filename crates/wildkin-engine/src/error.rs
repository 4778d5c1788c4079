//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop the engine during
//! startup or while the loop is running.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wildkin_core::ConfigError,
    },

    /// A tick failed, or the fresh world could not be generated.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: wildkin_core::TickError,
    },
}
