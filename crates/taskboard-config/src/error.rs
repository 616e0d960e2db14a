//! Error types for configuration operations.

use thiserror::Error;

/// Primary error type for configuration operations.
///
/// Resolution and redirect evaluation never fail; only rendering the
/// configuration into external formats can.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Rendering the framework manifest failed.
    #[error("failed to serialize configuration manifest")]
    ManifestSerialize {
        /// Source serde error.
        source: serde_json::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
