//! Error types for codecs and the format registry

use gamemaps_core::{AttributeError, MapError, ValidationError};
use thiserror::Error;

use crate::SuppKind;

/// Failure of a codec operation.
///
/// `open` and `write` are all-or-nothing: when one of these is returned no
/// map was built and no output was produced.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A stream could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are inconsistent with the format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A supplementary file the format needs was not supplied
    #[error("Missing supplementary file: {0}")]
    MissingSupplement(SuppKind),

    /// The map breaks a hard limit of the target format
    #[error("Map cannot be written in this format: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// No registered codec matches the given code or input
    #[error("Unknown map format: {0}")]
    UnknownFormat(String),
}

impl FormatError {
    /// Shorthand for [`FormatError::InvalidFormat`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        FormatError::InvalidFormat(msg.into())
    }
}

/// Configuration errors raised while building a registry.
///
/// These point at a setup mistake, not at bad input data.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A format with code '{0}' is already registered")]
    DuplicateCode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

/// A convenience `Result` type alias for codec operations.
pub type Result<T> = std::result::Result<T, FormatError>;
