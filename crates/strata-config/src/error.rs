//! Configuration file error types.

/// Errors that can occur when loading, saving, or validating `strata.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The file parsed but the world settings are unusable.
    #[error("invalid world config: {0}")]
    Invalid(#[from] strata_worldgen::ConfigError),
}
