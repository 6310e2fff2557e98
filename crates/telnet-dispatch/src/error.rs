//! Per-port dispatch errors.

use std::time::Duration;

use thiserror::Error;

/// A recoverable failure on one port attempt.
///
/// None of these abort a batch: the dispatcher moves to the station's next
/// port, and once the port list is exhausted the station is reported as
/// failed with the last error seen.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// TCP connect failed.
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Write or read failed after connecting.
    #[error("i/o on {addr} failed: {source}")]
    Io {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The attempt did not complete within the bounded window.
    #[error("no response from {addr} within {timeout:?}")]
    Timeout { addr: String, timeout: Duration },

    /// The server accepted the connection and closed it without sending
    /// anything. Treated as a failure, not a silent success.
    #[error("{addr} closed the connection without responding")]
    EmptyResponse { addr: String },
}
