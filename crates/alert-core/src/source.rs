//! The alert source seam.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::event::AlertEvent;

/// Provider of the current public alert, polled on a fixed cadence.
///
/// `Ok(None)` means the feed is reachable and reports no active alert.
/// Implementations must bound their own request latency; the pipeline does
/// not layer an extra timeout on top of this call.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch the current alert, if any.
    async fn current_alert(&self) -> Result<Option<AlertEvent>, SourceError>;

    /// Name of this source, for logging.
    fn name(&self) -> &str;
}
