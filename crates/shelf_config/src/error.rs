//! Errors raised while loading `shelf.toml`.

/// Failure to read, parse, or validate a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML text is malformed or has fields of the wrong type.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value parsed but is out of range.
    #[error("validation error: {0}")]
    ValidationError(String),
}
