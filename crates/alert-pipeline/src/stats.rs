//! Running counters for one pipeline instance.

use serde::Serialize;

/// Counters since the pipeline started.
///
/// Owned by the pipeline and read through its handle; there is no global
/// statistics state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Poll cycles that ran (including those that found no alert).
    pub scan_count: u64,
    /// Events admitted past deduplication.
    pub alert_count: u64,
    /// Stations notified successfully, across all events.
    pub sent_ok: u64,
    /// Stations whose ports all failed, across all events.
    pub sent_failed: u64,
}
