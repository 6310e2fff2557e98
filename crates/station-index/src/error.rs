//! Registry loading and validation errors.

use thiserror::Error;

/// Errors raised while loading or validating the station registry.
///
/// All of these are fatal at startup only; a running pipeline keeps its
/// last good index.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read station registry: {0}")]
    Io(#[from] std::io::Error),

    /// The registry file could not be parsed.
    #[error("failed to parse station registry: {0}")]
    Parse(#[from] csv::Error),

    /// A record is missing required fields or carries bad values.
    #[error("invalid station record {serial:?}: {reason}")]
    InvalidRecord { serial: String, reason: String },

    /// Two records share a serial.
    #[error("duplicate station serial: {0}")]
    DuplicateSerial(String),

    /// The registry parsed but contained no usable records.
    #[error("station registry is empty")]
    Empty,
}
